//! Application state management and view model computation.
//!
//! [`AppState`] is the single container for everything the plugin knows:
//! the directory store, the selection controller, the search query and the
//! derived filtered view, the list cursor, and the theme. It is only ever
//! mutated through [`handle_event`](super::handle_event), one event at a
//! time, so every frame is rendered from a state where all updates of the
//! previous event have landed together.

use super::filter::{filter_users, find_exact, match_range};
use super::modes::{InputMode, ThemeMode};
use super::selection::SelectionState;
use crate::directory::{DirectoryStore, FetchStatus};
use crate::domain::{UserId, UserRecord};
use crate::ui::helpers::{time_ago, truncate_chars};
use crate::ui::layout::{FrameLayout, Toggle};
use crate::ui::theme::{Theme, ThemePair};
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, ListBody, PanelKind, PanelLine,
    SearchBarInfo, ToggleBarInfo, ToggleInfo, UIViewModel,
};

/// Characters of a name shown in the NAME column.
pub const NAME_COLUMN_WIDTH: usize = 32;

/// Pane size of the last render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub rows: usize,
    pub cols: usize,
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// A directory row showing this user.
    User(UserId),
    /// One of the panel toggles.
    Toggle(Toggle),
    /// Inside the tracked region, but on nothing clickable.
    Inside,
    /// Outside the tracked region.
    Outside,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Fetched users and fetch status.
    pub directory: DirectoryStore,

    /// Current user, history and panel visibility.
    pub selection: SelectionState,

    /// Directory users whose name contains `search_query`, in directory order.
    ///
    /// Recomputed by `apply_search_filter()` whenever the directory or the
    /// query changes.
    pub filtered_users: Vec<UserRecord>,

    /// Zero-based index of the list cursor within `filtered_users`.
    pub cursor: usize,

    pub input_mode: InputMode,

    pub search_query: String,

    pub theme_mode: ThemeMode,

    pub themes: ThemePair,

    /// Whether the `WebAccess` permission has been granted.
    pub web_access: bool,

    /// Pane size of the last render, used for pointer hit testing.
    pub viewport: Viewport,
}

impl AppState {
    /// Creates a state with an empty, loading directory.
    #[must_use]
    pub fn new(directory: DirectoryStore, themes: ThemePair, theme_mode: ThemeMode) -> Self {
        Self {
            directory,
            selection: SelectionState::new(),
            filtered_users: Vec::new(),
            cursor: 0,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            theme_mode,
            themes,
            web_access: false,
            viewport: Viewport::default(),
        }
    }

    /// The theme of the active mode.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        self.themes.get(self.theme_mode)
    }

    /// Records the pane size the next frame is drawn with.
    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.viewport = Viewport { rows, cols };
    }

    /// Moves the cursor down, wrapping to the top. No-op on an empty list.
    pub fn move_cursor_down(&mut self) {
        if self.filtered_users.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.filtered_users.len();
    }

    /// Moves the cursor up, wrapping to the bottom. No-op on an empty list.
    pub fn move_cursor_up(&mut self) {
        if self.filtered_users.is_empty() {
            return;
        }
        if self.cursor == 0 {
            self.cursor = self.filtered_users.len() - 1;
        } else {
            self.cursor -= 1;
        }
    }

    /// The user under the list cursor, if any.
    #[must_use]
    pub fn highlighted_user(&self) -> Option<&UserRecord> {
        self.filtered_users.get(self.cursor)
    }

    /// Recomputes `filtered_users` from the directory and the query and
    /// clamps the cursor.
    pub fn apply_search_filter(&mut self) {
        let _span = tracing::debug_span!(
            "apply_search_filter",
            total_users = self.directory.records().len(),
            query_len = self.search_query.len()
        )
        .entered();

        self.filtered_users = filter_users(self.directory.records(), &self.search_query)
            .into_iter()
            .cloned()
            .collect();

        if self.filtered_users.is_empty() {
            self.cursor = 0;
        } else {
            self.cursor = self.cursor.min(self.filtered_users.len() - 1);
        }

        tracing::debug!(filtered_count = self.filtered_users.len(), "search filter applied");
    }

    /// Replaces the search query and refilters. Returns `true` if it changed.
    pub fn set_query(&mut self, query: String) -> bool {
        if self.search_query == query {
            return false;
        }
        self.search_query = query;
        self.apply_search_filter();
        true
    }

    /// Selects the directory user with `id`.
    ///
    /// Ids that are not part of the current directory are ignored. Returns
    /// `true` if the selection changed.
    pub fn select_user(&mut self, id: UserId) -> bool {
        let Some(user) = self.directory.find(id).cloned() else {
            tracing::debug!(user_id = id, "ignoring selection of unknown user");
            return false;
        };

        tracing::debug!(user_id = user.id, user_name = %user.name, "user selected");
        self.selection.select(user)
    }

    /// Selects the first directory user whose name equals the query,
    /// ignoring case. Returns `true` if the selection changed.
    pub fn commit_search(&mut self) -> bool {
        let Some(id) = find_exact(self.directory.records(), &self.search_query).map(|u| u.id)
        else {
            tracing::debug!(query = %self.search_query, "no exact name match");
            return false;
        };
        self.select_user(id)
    }

    /// Panel contents before clipping: the current user, then the history.
    #[must_use]
    pub fn panel_lines(&self) -> Vec<PanelLine> {
        let mut lines = Vec::new();

        if self.selection.show_current().is_shown() {
            if let Some(current) = self.selection.current() {
                lines.push(PanelLine {
                    kind: PanelKind::Current,
                    name: current.name.clone(),
                });
            }
        }

        if self.selection.show_previous().is_shown() {
            lines.extend(self.selection.history().iter().map(|user| PanelLine {
                kind: PanelKind::Previous,
                name: user.name.clone(),
            }));
        }

        lines
    }

    /// Panel contents fitted into `rows` lines.
    ///
    /// The current line stays on top; when the history does not fit, its
    /// oldest entries are dropped so the most recent ones remain visible.
    #[must_use]
    pub fn clipped_panel_lines(&self, rows: usize) -> Vec<PanelLine> {
        let mut lines = self.panel_lines();
        if lines.len() <= rows {
            return lines;
        }

        let pinned = lines
            .first()
            .map_or(0, |line| usize::from(line.kind == PanelKind::Current))
            .min(rows);
        let tail = rows - pinned;
        let cut_end = lines.len() - tail;
        lines.drain(pinned..cut_end);
        lines
    }

    /// Layout of a frame with `rows` lines for the current state.
    #[must_use]
    pub fn frame_layout(&self, rows: usize) -> FrameLayout {
        FrameLayout::compute(
            rows,
            self.input_mode == InputMode::Search,
            self.selection.current().is_some(),
            self.panel_lines().len(),
        )
    }

    /// Slice of `filtered_users` shown in `list_rows` rows, as `start..end`.
    ///
    /// The window is centred on the cursor and pulled back at the end of the
    /// list so no rows are wasted.
    #[must_use]
    pub fn visible_window(&self, list_rows: usize) -> (usize, usize) {
        let total = self.filtered_users.len();
        let mut start = self.cursor.saturating_sub(list_rows / 2);
        let end = (start + list_rows).min(total);

        if end - start < list_rows && total >= list_rows {
            start = end.saturating_sub(list_rows);
        }

        (start, end)
    }

    /// Resolves a pointer position against the last rendered frame.
    #[must_use]
    pub fn pointer_target(&self, row: usize, col: usize) -> PointerTarget {
        let layout = self.frame_layout(self.viewport.rows);

        if !layout.tracked_region().contains(row, col) {
            return PointerTarget::Outside;
        }

        if let Some(toggle) = layout.toggle_at(row, col) {
            return PointerTarget::Toggle(toggle);
        }

        if let Some(slot) = layout.list_slot_at(row) {
            let (start, end) = self.visible_window(layout.list_rows);
            if start + slot < end {
                if let Some(user) = self.filtered_users.get(start + slot) {
                    return PointerTarget::User(user.id);
                }
            }
        }

        PointerTarget::Inside
    }

    /// Moves the cursor onto `id` if it is part of the filtered view.
    ///
    /// Returns `true` if the cursor moved, which shifts the visible window.
    pub fn focus_user(&mut self, id: UserId) -> bool {
        match self.filtered_users.iter().position(|u| u.id == id) {
            Some(index) if index != self.cursor => {
                self.cursor = index;
                true
            }
            _ => false,
        }
    }

    /// Computes the view model for a pane of `rows` by `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let layout = self.frame_layout(rows);

        let panel = self.clipped_panel_lines(layout.panel_rows);

        UIViewModel {
            layout,
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            list: self.compute_list(layout.list_rows, cols),
            banner: self
                .selection
                .current()
                .map(|user| format!("The current Head of user is {}", user.name)),
            toggles: self.compute_toggles(),
            panel,
            footer: self.compute_footer(),
        }
    }

    fn compute_list(&self, list_rows: usize, cols: usize) -> ListBody {
        if let Some(empty) = self.compute_empty_state() {
            return ListBody::Message(empty);
        }

        let (start, end) = self.visible_window(list_rows);
        let highlight = self.input_mode == InputMode::Search && !self.search_query.is_empty();

        ListBody::Items(
            self.filtered_users[start..end]
                .iter()
                .enumerate()
                .map(|(offset, user)| {
                    self.compute_display_item(user, start + offset, cols, highlight)
                })
                .collect(),
        )
    }

    fn compute_display_item(
        &self,
        user: &UserRecord,
        index: usize,
        cols: usize,
        highlight: bool,
    ) -> DisplayItem {
        let max_email_width = cols.saturating_sub(NAME_COLUMN_WIDTH + 6);

        let highlight_ranges = if highlight {
            match_range(&user.name, &self.search_query)
                .into_iter()
                .collect()
        } else {
            Vec::new()
        };

        DisplayItem {
            name: truncate_chars(&user.name, NAME_COLUMN_WIDTH),
            email: truncate_chars(user.email().unwrap_or_default(), max_email_width),
            is_cursor: index == self.cursor,
            is_current: self.selection.is_current(user),
            highlight_ranges,
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        match self.directory.status() {
            FetchStatus::Loading => Some(EmptyState {
                message: "Loading users...".to_string(),
                subtitle: self.directory.endpoint().to_string(),
            }),
            FetchStatus::Failed(reason) => Some(EmptyState {
                message: "No users available".to_string(),
                subtitle: format!("{reason} (press r to retry)"),
            }),
            FetchStatus::Ready if self.directory.records().is_empty() => Some(EmptyState {
                message: "No users available".to_string(),
                subtitle: "the directory is empty".to_string(),
            }),
            FetchStatus::Ready if self.filtered_users.is_empty() => Some(EmptyState {
                message: "No users match".to_string(),
                subtitle: format!("no name contains \"{}\"", self.search_query),
            }),
            FetchStatus::Ready => None,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.directory.status() {
            FetchStatus::Loading => " User Directory · loading ".to_string(),
            FetchStatus::Failed(_) => " User Directory · unavailable ".to_string(),
            FetchStatus::Ready => {
                let shown = self.filtered_users.len();
                let total = self.directory.records().len();
                self.directory.loaded_at().map_or_else(
                    || format!(" User Directory ({shown}/{total}) "),
                    |loaded_at| {
                        let ago = time_ago(loaded_at, chrono::Utc::now().timestamp());
                        format!(" User Directory ({shown}/{total}) · loaded {ago} ")
                    },
                )
            }
        };
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search => {
                "Type to filter  Enter: select exact name  Ctrl+n/p: move  ESC: exit search"
            }
            InputMode::Normal => {
                "j/k: move  Enter: select  /: search  c: current  p: previous  t: theme  r: reload  q: quit"
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        (self.input_mode == InputMode::Search).then(|| SearchBarInfo {
            query: self.search_query.clone(),
        })
    }

    fn compute_toggles(&self) -> ToggleBarInfo {
        ToggleBarInfo {
            current: ToggleInfo {
                shown: self.selection.show_current().is_shown(),
                enabled: self.selection.current().is_some(),
            },
            previous: ToggleInfo {
                shown: self.selection.show_previous().is_shown(),
                enabled: !self.selection.history().is_empty(),
            },
        }
    }
}
