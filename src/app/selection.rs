//! Current/previous selection and panel visibility.
//!
//! [`SelectionState`] holds the current user, the history of displaced users
//! and the two panel flags. Each panel follows the same two-state machine:
//!
//! ```text
//!            toggle (guard holds)
//!   Hidden ─────────────────────────► Shown
//!     ▲                                 │
//!     └──── toggle / outside click ─────┘
//! ```
//!
//! The guard is "a current user exists" for the current panel and "history
//! is non-empty" for the previous panel. An outside click hides both panels
//! whatever their state.

use crate::domain::UserRecord;

/// Visibility of one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Shown,
}

impl Visibility {
    #[must_use]
    pub const fn is_shown(self) -> bool {
        matches!(self, Self::Shown)
    }

    const fn flipped(self) -> Self {
        match self {
            Self::Hidden => Self::Shown,
            Self::Shown => Self::Hidden,
        }
    }
}

/// Selection and visibility state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    current: Option<UserRecord>,
    history: Vec<UserRecord>,
    show_current: Visibility,
    show_previous: Visibility,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn current(&self) -> Option<&UserRecord> {
        self.current.as_ref()
    }

    /// Previously current users, oldest first. May contain duplicates.
    #[must_use]
    pub fn history(&self) -> &[UserRecord] {
        &self.history
    }

    #[must_use]
    pub const fn show_current(&self) -> Visibility {
        self.show_current
    }

    #[must_use]
    pub const fn show_previous(&self) -> Visibility {
        self.show_previous
    }

    /// Returns `true` if `user` is the current selection.
    #[must_use]
    pub fn is_current(&self, user: &UserRecord) -> bool {
        self.current.as_ref().is_some_and(|current| current.same_user(user))
    }

    /// Makes `user` current, archiving the displaced user into the history.
    ///
    /// Reselecting the user that is already current changes nothing. Returns
    /// `true` if the selection changed.
    pub fn select(&mut self, user: UserRecord) -> bool {
        if self.is_current(&user) {
            tracing::debug!(user_id = user.id, "user already current, selection unchanged");
            return false;
        }

        if let Some(displaced) = self.current.replace(user) {
            tracing::debug!(
                user_id = displaced.id,
                history_len = self.history.len() + 1,
                "archiving displaced user"
            );
            self.history.push(displaced);
        }
        true
    }

    /// Flips the current panel if a current user exists.
    ///
    /// Returns `true` if the flag changed.
    pub fn toggle_current(&mut self) -> bool {
        if self.current.is_none() {
            tracing::debug!("no current user, current panel stays hidden");
            return false;
        }
        self.show_current = self.show_current.flipped();
        true
    }

    /// Flips the previous panel if the history is non-empty.
    ///
    /// Returns `true` if the flag changed.
    pub fn toggle_previous(&mut self) -> bool {
        if self.history.is_empty() {
            tracing::debug!("history empty, previous panel stays hidden");
            return false;
        }
        self.show_previous = self.show_previous.flipped();
        true
    }

    /// Hides both panels. Returns `true` if either was shown.
    pub fn collapse(&mut self) -> bool {
        let changed = self.show_current.is_shown() || self.show_previous.is_shown();
        self.show_current = Visibility::Hidden;
        self.show_previous = Visibility::Hidden;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::{SelectionState, Visibility};
    use crate::domain::UserRecord;

    fn ann() -> UserRecord {
        UserRecord::new(1, "Ann")
    }

    fn bob() -> UserRecord {
        UserRecord::new(2, "Bob")
    }

    #[test]
    fn second_selection_archives_first() {
        let mut selection = SelectionState::new();
        assert!(selection.select(ann()));
        assert!(selection.select(bob()));

        assert_eq!(selection.current(), Some(&bob()));
        assert_eq!(selection.history(), &[ann()]);
    }

    #[test]
    fn reselecting_current_is_a_no_op() {
        let mut selection = SelectionState::new();
        selection.select(ann());
        assert!(!selection.select(ann()));

        assert_eq!(selection.current(), Some(&ann()));
        assert!(selection.history().is_empty());
    }

    #[test]
    fn history_keeps_duplicates_when_user_returns() {
        let mut selection = SelectionState::new();
        selection.select(ann());
        selection.select(bob());
        selection.select(ann());
        selection.select(bob());

        let names: Vec<&str> = selection.history().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Ann", "Bob", "Ann"]);
        assert_eq!(selection.current(), Some(&bob()));
    }

    #[test]
    fn toggles_are_guarded() {
        let mut selection = SelectionState::new();

        assert!(!selection.toggle_current());
        assert!(!selection.toggle_previous());
        assert_eq!(selection.show_current(), Visibility::Hidden);
        assert_eq!(selection.show_previous(), Visibility::Hidden);

        selection.select(ann());
        assert!(selection.toggle_current());
        assert!(!selection.toggle_previous());
        assert_eq!(selection.show_current(), Visibility::Shown);
        assert_eq!(selection.show_previous(), Visibility::Hidden);
    }

    #[test]
    fn toggling_twice_hides_again() {
        let mut selection = SelectionState::new();
        selection.select(ann());
        selection.select(bob());

        selection.toggle_previous();
        assert!(selection.show_previous().is_shown());
        selection.toggle_previous();
        assert!(!selection.show_previous().is_shown());
    }

    #[test]
    fn collapse_hides_both_regardless_of_state() {
        let mut selection = SelectionState::new();
        selection.select(ann());
        selection.select(bob());
        selection.toggle_current();
        selection.toggle_previous();

        assert!(selection.collapse());
        assert_eq!(selection.show_current(), Visibility::Hidden);
        assert_eq!(selection.show_previous(), Visibility::Hidden);

        assert!(!selection.collapse());
    }
}
