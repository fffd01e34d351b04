//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) never talks to Zellij itself. It
//! mutates [`AppState`](super::AppState) and returns the [`Action`]s the
//! plugin shim has to carry out, in order.

use crate::directory::FetchRequest;

/// Commands executed by the plugin runtime after an event was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues the directory request through the host's web request API.
    ///
    /// The request's context map must be passed along unchanged so the
    /// result can be matched to its ticket.
    FetchUsers(FetchRequest),
}
