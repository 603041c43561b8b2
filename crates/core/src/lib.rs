//! Domain logic for the taskboard service, free of I/O.
//!
//! - [`types`] -- shared id/timestamp aliases and closed enums.
//! - [`error`] -- the [`error::CoreError`] taxonomy.
//! - [`position`] -- dense position planning for sibling lists and cards.
//! - [`progress`] -- board completion percentage.
//! - [`access`] -- principal model and authorization decisions.

pub mod access;
pub mod error;
pub mod position;
pub mod progress;
pub mod types;
