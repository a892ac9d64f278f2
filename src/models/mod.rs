//! Data models for the phone lookup.
//!
//! This module contains the user records read from a directory and the
//! request/response shapes of the lookup endpoint.

pub mod lookup;
pub mod user;

pub use lookup::{LookupQuery, LookupResponse, MatchResult};
pub use user::UserRecord;
