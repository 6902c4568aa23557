//! Campaign clock.
//!
//! Tracks the in-game wall clock down to the second. New campaigns start
//! at noon, January 1st 1999. The clock also provides the localization
//! keys the save browser needs for its date columns.

use serde::{Deserialize, Serialize};

const SECONDS_PER_STEP: u32 = 5;

/// In-game date and time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTime {
    /// Day of week, 1 (Sunday) through 7 (Saturday).
    pub weekday: u8,
    pub day: u8,
    pub month: u8,
    pub year: u16,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl GameTime {
    pub fn new(weekday: u8, day: u8, month: u8, year: u16, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            weekday,
            day,
            month,
            year,
            hour,
            minute,
            second,
        }
    }

    /// The campaign starting time.
    pub fn campaign_start() -> Self {
        Self::new(6, 1, 1, 1999, 12, 0, 0)
    }

    /// Advance the clock by one 5-second step, rolling over minutes,
    /// hours, days, months and years as needed.
    pub fn advance(&mut self) {
        self.second += SECONDS_PER_STEP as u8;
        if self.second < 60 {
            return;
        }
        self.second -= 60;
        self.minute += 1;
        if self.minute < 60 {
            return;
        }
        self.minute = 0;
        self.hour += 1;
        if self.hour < 24 {
            return;
        }
        self.hour = 0;
        self.weekday = self.weekday % 7 + 1;
        self.day += 1;
        if self.day <= days_in_month(self.month, self.year) {
            return;
        }
        self.day = 1;
        self.month += 1;
        if self.month <= 12 {
            return;
        }
        self.month = 1;
        self.year += 1;
    }

    /// "H:MM" display string for the save browser.
    pub fn time_string(&self) -> String {
        format!("{}:{:02}", self.hour, self.minute)
    }

    /// Localization key for the ordinal suffix of the day of month.
    pub fn day_suffix_key(&self) -> &'static str {
        match self.day {
            1 | 21 | 31 => "STR_ST",
            2 | 22 => "STR_ND",
            3 | 23 => "STR_RD",
            _ => "STR_TH",
        }
    }

    /// Localization key for the month name.
    pub fn month_key(&self) -> &'static str {
        match self.month {
            1 => "STR_JAN",
            2 => "STR_FEB",
            3 => "STR_MAR",
            4 => "STR_APR",
            5 => "STR_MAY",
            6 => "STR_JUN",
            7 => "STR_JUL",
            8 => "STR_AUG",
            9 => "STR_SEP",
            10 => "STR_OCT",
            11 => "STR_NOV",
            _ => "STR_DEC",
        }
    }
}

impl Default for GameTime {
    fn default() -> Self {
        Self::campaign_start()
    }
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(month: u8, year: u16) -> u8 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advance_seconds(time: &mut GameTime, seconds: u32) {
        for _ in 0..seconds / SECONDS_PER_STEP {
            time.advance();
        }
    }

    #[test]
    fn campaign_epoch() {
        let t = GameTime::campaign_start();
        assert_eq!((t.day, t.month, t.year), (1, 1, 1999));
        assert_eq!((t.hour, t.minute, t.second), (12, 0, 0));
        assert_eq!(t.weekday, 6);
    }

    #[test]
    fn minute_and_hour_rollover() {
        let mut t = GameTime::new(6, 1, 1, 1999, 12, 59, 55);
        t.advance();
        assert_eq!((t.hour, t.minute, t.second), (13, 0, 0));
    }

    #[test]
    fn day_rollover_updates_weekday() {
        let mut t = GameTime::new(7, 1, 1, 1999, 23, 59, 55);
        t.advance();
        assert_eq!(t.day, 2);
        assert_eq!(t.weekday, 1);
    }

    #[test]
    fn january_to_february() {
        let mut t = GameTime::new(6, 31, 1, 1999, 23, 59, 55);
        t.advance();
        assert_eq!((t.day, t.month), (1, 2));
    }

    #[test]
    fn february_respects_leap_years() {
        let mut t = GameTime::new(1, 28, 2, 1999, 23, 59, 55);
        t.advance();
        assert_eq!((t.day, t.month), (1, 3));

        let mut leap = GameTime::new(1, 28, 2, 2000, 23, 59, 55);
        leap.advance();
        assert_eq!((leap.day, leap.month), (29, 2));
    }

    #[test]
    fn year_rollover() {
        let mut t = GameTime::new(5, 31, 12, 1999, 23, 59, 55);
        t.advance();
        assert_eq!((t.day, t.month, t.year), (1, 1, 2000));
    }

    #[test]
    fn display_keys() {
        let t = GameTime::new(6, 21, 3, 1999, 9, 5, 0);
        assert_eq!(t.time_string(), "9:05");
        assert_eq!(t.day_suffix_key(), "STR_ST");
        assert_eq!(t.month_key(), "STR_MAR");
    }

    #[test]
    fn a_full_hour_of_steps() {
        let mut t = GameTime::campaign_start();
        advance_seconds(&mut t, 3600);
        assert_eq!((t.hour, t.minute, t.second), (13, 0, 0));
    }
}
