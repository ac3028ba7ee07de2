//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Password registration and login
//! - `ledger` - Shift summaries, daily reports and adjustment messages

pub mod auth;
pub mod ledger;
