//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed
//! by the renderer. They hold display-ready data only; every decision about
//! what to show has already been taken.

use crate::ui::layout::FrameLayout;

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Row assignment the frame is drawn with.
    pub layout: FrameLayout,

    pub header: HeaderInfo,

    /// Present in search mode only.
    pub search_bar: Option<SearchBarInfo>,

    /// Directory rows, or a message in their place.
    pub list: ListBody,

    /// "The current Head of user is ..." line, when a user is selected.
    pub banner: Option<String>,

    pub toggles: ToggleBarInfo,

    /// Current/previous panel lines, already clipped to the layout.
    pub panel: Vec<PanelLine>,

    pub footer: FooterInfo,
}

/// What occupies the list area.
#[derive(Debug, Clone)]
pub enum ListBody {
    Items(Vec<DisplayItem>),
    Message(EmptyState),
}

/// One row of the directory table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub name: String,

    /// Second column, empty when the payload carries no e-mail.
    pub email: String,

    /// Whether the list cursor is on this row.
    pub is_cursor: bool,

    /// Whether this user is the current selection.
    pub is_current: bool,

    /// Character ranges matching the search query, `(start, end)` exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Message shown instead of the list (loading, failure, no match).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,
}

/// State of the two panel toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleBarInfo {
    pub current: ToggleInfo,
    pub previous: ToggleInfo,
}

/// One toggle label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleInfo {
    /// The panel is currently shown.
    pub shown: bool,
    /// The guard holds, so pressing the toggle would show the panel.
    pub enabled: bool,
}

/// Which list a panel line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Current,
    Previous,
}

/// One line of the current/previous panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLine {
    pub kind: PanelKind,
    pub name: String,
}
