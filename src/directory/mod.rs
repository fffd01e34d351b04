//! The user directory: store, fetch tickets and payload decoding.
//!
//! - [`store`]: [`DirectoryStore`] with its Loading/Ready/Failed cycle
//! - [`fetch`]: [`FetchTicket`], [`FetchRequest`] and response decoding

pub mod fetch;
pub mod store;

pub use fetch::{decode_response, decode_users, FetchOutcome, FetchRequest, FetchTicket, TraceContext};
pub use store::{DirectoryState, DirectoryStore, FetchStatus};
