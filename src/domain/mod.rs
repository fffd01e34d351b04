//! Domain layer for the Rollcall plugin.
//!
//! Holds the types the rest of the crate speaks in, independent of Zellij
//! APIs and rendering concerns.
//!
//! - [`error`]: Error types and result aliases
//! - [`user`]: The `UserRecord` fetched from the directory endpoint

pub mod error;
pub mod user;

pub use error::{FetchFailure, Result, RollcallError};
pub use user::{UserId, UserRecord};
