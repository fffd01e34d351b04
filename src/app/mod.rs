//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the directory/domain layers.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Key / Mouse / WebRequestResult → Event → handle_event → AppState → Actions
//!                                                                      ↓
//!                        WebRequestResult ←──── web_request ←── FetchUsers
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`filter`]: Substring and exact name matching
//! - [`handler`]: Event processing and state transitions
//! - [`keys`]: Key presses to events, per input mode
//! - [`modes`]: Input and theme mode types
//! - [`selection`]: Current user, history and panel visibility
//! - [`state`]: Central state container and view model computation

pub mod actions;
pub mod filter;
pub mod handler;
pub mod keys;
pub mod modes;
pub mod selection;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, ThemeMode};
pub use selection::{SelectionState, Visibility};
pub use state::{AppState, PointerTarget};
