//! Pure campaign logic for Xenowar.
//!
//! This crate contains the campaign rules engine that is independent of any
//! storage, engine, or runtime. Functions take plain data and return results,
//! making them unit-testable and portable to any front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`rules`] | Immutable rule catalog (research, manufacture, geoscape rules) |
//! | [`items`] | String-keyed base inventory container |
//! | [`research`] | Research eligibility, discovery cascade, dependable queries |
//! | [`production`] | Manufacturing availability per base |
//! | [`personnel`] | Soldier stats, promotion scoring, rank capacity passes |

pub mod items;
pub mod personnel;
pub mod production;
pub mod research;
pub mod rules;
