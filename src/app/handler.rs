//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where [`AppState`] changes. It takes one
//! [`Event`], applies every state update that event implies, and returns
//! whether a redraw is needed plus the [`Action`]s the plugin shim has to run.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`
//! - **Selection**: `SelectHighlighted`, `SelectUser`, `CommitSearch`
//! - **Search**: `SearchMode`, `ExitSearch`, `Char`, `Backspace`, `SetQuery`
//! - **Panels**: `ToggleCurrent`, `TogglePrevious`, `CollapsePanels`, `PointerDown`
//! - **Directory**: `Reload`, `UsersFetched`, `PermissionsResult`, `Teardown`

use super::modes::InputMode;
use super::state::PointerTarget;
use crate::app::{Action, AppState};
use crate::directory::{FetchOutcome, FetchTicket};
use crate::domain::error::Result;
use crate::domain::{FetchFailure, UserId};
use crate::ui::layout::Toggle;

/// Events triggered by user input or host callbacks.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Moves the list cursor down by one position (wraps to top).
    KeyDown,
    /// Moves the list cursor up by one position (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,

    /// Selects the user under the list cursor.
    SelectHighlighted,
    /// Selects a user by id. Unknown ids are ignored.
    SelectUser {
        id: UserId,
    },

    /// Enters search mode with an empty query.
    SearchMode,
    /// Leaves search mode and clears the query.
    ExitSearch,
    /// Appends a character to the search query.
    Char(char),
    /// Removes the last character from the search query.
    Backspace,
    /// Replaces the whole search query.
    SetQuery(String),
    /// Selects the user whose name equals the query, ignoring case.
    CommitSearch,

    ToggleCurrent,
    TogglePrevious,
    /// Hides both panels.
    CollapsePanels,
    ToggleTheme,

    /// Left button pressed at a 1-indexed pane position.
    PointerDown {
        row: usize,
        col: usize,
    },

    /// Starts a new directory fetch, superseding any in flight.
    Reload,

    /// A directory request finished.
    UsersFetched {
        ticket: FetchTicket,
        outcome: FetchOutcome,
    },

    /// Answer to the `WebAccess` permission request.
    PermissionsResult {
        granted: bool,
    },

    /// The plugin is about to be unloaded.
    Teardown,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns `(should_render, actions)`. Actions must be executed in order.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for handlers that touch
/// fallible resources.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyDown => {
            state.move_cursor_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_cursor_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SelectHighlighted => {
            let Some(id) = state.highlighted_user().map(|user| user.id) else {
                tracing::debug!("no user highlighted");
                return Ok((false, vec![]));
            };
            Ok((state.select_user(id), vec![]))
        }
        Event::SelectUser { id } => {
            let changed = state.select_user(*id);
            let moved = changed && state.focus_user(*id);
            Ok((changed || moved, vec![]))
        }
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search;
            state.set_query(String::new());
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.search_query, "exiting search mode");
            state.input_mode = InputMode::Normal;
            state.set_query(String::new());
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }

            let mut query = state.search_query.clone();
            query.push(*c);
            tracing::trace!(query = %query, char = %c, "search query updated");
            state.set_query(query);
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }

            let mut query = state.search_query.clone();
            query.pop();
            Ok((state.set_query(query), vec![]))
        }
        Event::SetQuery(query) => {
            let entered = state.input_mode != InputMode::Search;
            state.input_mode = InputMode::Search;
            let changed = state.set_query(query.clone());
            Ok((entered || changed, vec![]))
        }
        Event::CommitSearch => {
            let changed = state.commit_search();
            let moved = state
                .selection
                .current()
                .map(|user| user.id)
                .is_some_and(|id| state.focus_user(id));
            Ok((changed || moved, vec![]))
        }
        Event::ToggleCurrent => Ok((state.selection.toggle_current(), vec![])),
        Event::TogglePrevious => Ok((state.selection.toggle_previous(), vec![])),
        Event::CollapsePanels => Ok((state.selection.collapse(), vec![])),
        Event::ToggleTheme => {
            state.theme_mode = state.theme_mode.toggled();
            tracing::debug!(theme_mode = state.theme_mode.label(), "theme toggled");
            Ok((true, vec![]))
        }
        Event::PointerDown { row, col } => {
            let target = state.pointer_target(*row, *col);
            tracing::debug!(row, col, target = ?target, "pointer down");

            let changed = match target {
                PointerTarget::User(id) => {
                    let selected = state.select_user(id);
                    let moved = state.focus_user(id);
                    selected || moved
                }
                PointerTarget::Toggle(Toggle::Current) => state.selection.toggle_current(),
                PointerTarget::Toggle(Toggle::Previous) => state.selection.toggle_previous(),
                PointerTarget::Inside => false,
                PointerTarget::Outside => state.selection.collapse(),
            };
            Ok((changed, vec![]))
        }
        Event::Reload => {
            if !state.web_access {
                tracing::debug!("web access not granted, skipping directory load");
                return Ok((false, vec![]));
            }
            Ok((true, vec![start_load(state)]))
        }
        Event::UsersFetched { ticket, outcome } => {
            if !state.directory.complete(*ticket, outcome.clone()) {
                return Ok((false, vec![]));
            }
            state.apply_search_filter();
            Ok((true, vec![]))
        }
        Event::PermissionsResult { granted } => {
            state.web_access = *granted;

            if *granted {
                tracing::debug!("web access granted");
                return Ok((true, vec![start_load(state)]));
            }

            tracing::warn!("web access denied, directory unavailable");
            state.directory.fail(FetchFailure::PermissionDenied);
            state.apply_search_filter();
            Ok((true, vec![]))
        }
        Event::Teardown => {
            state.directory.cancel();
            Ok((false, vec![]))
        }
    }
}

fn start_load(state: &mut AppState) -> Action {
    let request = state.directory.load();
    state.apply_search_filter();
    Action::FetchUsers(request)
}

#[cfg(test)]
mod tests {
    use super::{handle_event, Event};
    use crate::app::modes::{InputMode, ThemeMode};
    use crate::app::{Action, AppState};
    use crate::directory::{DirectoryStore, FetchStatus, FetchTicket};
    use crate::domain::{FetchFailure, UserRecord};
    use crate::ui::theme::ThemePair;
    use crate::ui::viewmodel::ListBody;

    fn state() -> AppState {
        let mut state = AppState::new(
            DirectoryStore::new("http://example.test/users"),
            ThemePair::default(),
            ThemeMode::Light,
        );
        state.set_viewport(24, 80);
        state
    }

    fn users() -> Vec<UserRecord> {
        vec![
            UserRecord::new(1, "Ann"),
            UserRecord::new(2, "Bob"),
            UserRecord::new(3, "Anna"),
        ]
    }

    fn fetch_ticket(actions: &[Action]) -> FetchTicket {
        match actions {
            [Action::FetchUsers(request)] => request.ticket,
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    fn loaded_state() -> AppState {
        let mut state = state();
        let (_, actions) =
            handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        let ticket = fetch_ticket(&actions);
        handle_event(&mut state, &Event::UsersFetched { ticket, outcome: Ok(users()) }).unwrap();
        state
    }

    #[test]
    fn granted_permission_starts_the_fetch() {
        let mut state = state();
        let (render, actions) =
            handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();

        assert!(render);
        assert!(state.web_access);
        assert_eq!(fetch_ticket(&actions), state.directory.in_flight().unwrap());
        assert_eq!(state.directory.status(), &FetchStatus::Loading);
    }

    #[test]
    fn denied_permission_fails_the_directory() {
        let mut state = state();
        handle_event(&mut state, &Event::PermissionsResult { granted: false }).unwrap();

        assert_eq!(
            state.directory.status(),
            &FetchStatus::Failed(FetchFailure::PermissionDenied)
        );

        let (render, actions) = handle_event(&mut state, &Event::Reload).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn fetched_users_populate_the_filtered_view() {
        let state = loaded_state();
        assert_eq!(state.directory.status(), &FetchStatus::Ready);
        assert_eq!(state.filtered_users.len(), 3);
    }

    #[test]
    fn reload_supersedes_the_previous_request() {
        let mut state = state();
        let (_, first) =
            handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        let (_, second) = handle_event(&mut state, &Event::Reload).unwrap();

        let stale = Event::UsersFetched {
            ticket: fetch_ticket(&first),
            outcome: Ok(users()),
        };
        let (render, _) = handle_event(&mut state, &stale).unwrap();
        assert!(!render);
        assert_eq!(state.directory.status(), &FetchStatus::Loading);

        let fresh = Event::UsersFetched {
            ticket: fetch_ticket(&second),
            outcome: Ok(vec![UserRecord::new(9, "Zed")]),
        };
        handle_event(&mut state, &fresh).unwrap();
        assert_eq!(state.directory.status(), &FetchStatus::Ready);
        assert_eq!(state.filtered_users[0].name, "Zed");
    }

    #[test]
    fn teardown_drops_the_late_response() {
        let mut state = state();
        let (_, actions) =
            handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        handle_event(&mut state, &Event::Teardown).unwrap();
        handle_event(&mut state, &Event::Teardown).unwrap();

        let late = Event::UsersFetched {
            ticket: fetch_ticket(&actions),
            outcome: Ok(users()),
        };
        handle_event(&mut state, &late).unwrap();

        assert_eq!(state.directory.status(), &FetchStatus::Failed(FetchFailure::Cancelled));
        assert!(state.filtered_users.is_empty());
    }

    #[test]
    fn failed_fetch_keeps_no_partial_data() {
        let mut state = state();
        let (_, actions) =
            handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        let failed = Event::UsersFetched {
            ticket: fetch_ticket(&actions),
            outcome: Err(FetchFailure::Status(503)),
        };
        handle_event(&mut state, &failed).unwrap();

        assert_eq!(state.directory.status(), &FetchStatus::Failed(FetchFailure::Status(503)));
        assert!(state.directory.records().is_empty());
    }

    #[test]
    fn typing_outside_search_mode_is_ignored() {
        let mut state = loaded_state();
        let (render, _) = handle_event(&mut state, &Event::Char('a')).unwrap();
        assert!(!render);
        assert!(state.search_query.is_empty());
    }

    #[test]
    fn search_keystrokes_filter_and_escape_restores() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Char('b')).unwrap();
        assert_eq!(state.filtered_users.len(), 1);

        handle_event(&mut state, &Event::Backspace).unwrap();
        assert_eq!(state.filtered_users.len(), 3);

        handle_event(&mut state, &Event::SetQuery("NN".to_string())).unwrap();
        assert_eq!(state.filtered_users.len(), 2);

        handle_event(&mut state, &Event::ExitSearch).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.search_query.is_empty());
        assert_eq!(state.filtered_users.len(), 3);
    }

    #[test]
    fn enter_selects_the_highlighted_user() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::KeyDown).unwrap();
        let (render, _) = handle_event(&mut state, &Event::SelectHighlighted).unwrap();

        assert!(render);
        assert_eq!(state.selection.current().map(|u| u.id), Some(2));

        let (render, _) = handle_event(&mut state, &Event::SelectHighlighted).unwrap();
        assert!(!render);
        assert!(state.selection.history().is_empty());
    }

    #[test]
    fn clicking_a_row_selects_that_user() {
        let mut state = loaded_state();
        let row = state.frame_layout(24).list_top + 2;

        handle_event(&mut state, &Event::PointerDown { row, col: 6 }).unwrap();

        assert_eq!(state.selection.current().map(|u| u.id), Some(3));
        assert_eq!(state.cursor, 2);
    }

    fn state_with(users: Vec<UserRecord>) -> AppState {
        let mut state = state();
        let (_, actions) =
            handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        handle_event(
            &mut state,
            &Event::UsersFetched {
                ticket: fetch_ticket(&actions),
                outcome: Ok(users),
            },
        )
        .unwrap();
        state
    }

    #[test]
    fn clicking_the_current_row_redraws_when_the_cursor_moves() {
        let users = (1..=30).map(|id| UserRecord::new(id, format!("user-{id}"))).collect();
        let mut state = state_with(users);
        handle_event(&mut state, &Event::SelectUser { id: 11 }).unwrap();
        state.cursor = 0;

        let list_top = state.frame_layout(24).list_top;
        let (render, _) =
            handle_event(&mut state, &Event::PointerDown { row: list_top + 10, col: 6 }).unwrap();
        assert!(render);
        assert_eq!(state.cursor, 10);

        // The next click is resolved against the frame drawn after the move.
        let vm = state.compute_viewmodel(24, 80);
        let ListBody::Items(items) = vm.list else {
            panic!("expected list items");
        };
        let first_drawn = items[0].name.clone();

        handle_event(&mut state, &Event::PointerDown { row: list_top, col: 6 }).unwrap();
        assert_eq!(
            state.selection.current().map(|u| u.name.clone()),
            Some(first_drawn)
        );
    }

    #[test]
    fn clicking_the_focused_current_row_needs_no_redraw() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::SelectUser { id: 2 }).unwrap();
        assert_eq!(state.cursor, 1);

        let row = state.frame_layout(24).list_top + 1;
        let (render, _) = handle_event(&mut state, &Event::PointerDown { row, col: 6 }).unwrap();
        assert!(!render);
    }

    #[test]
    fn committing_the_current_name_refocuses_the_cursor() {
        let mut state = state_with(vec![UserRecord::new(1, "Annabel"), UserRecord::new(2, "Anna")]);
        handle_event(&mut state, &Event::SelectUser { id: 2 }).unwrap();
        handle_event(&mut state, &Event::SetQuery("anna".to_string())).unwrap();
        state.cursor = 0;

        let (render, _) = handle_event(&mut state, &Event::CommitSearch).unwrap();
        assert!(render);
        assert_eq!(state.cursor, 1);
        assert_eq!(state.selection.current().map(|u| u.id), Some(2));
        assert!(state.selection.history().is_empty());
    }

    #[test]
    fn clicking_toggle_labels_flips_panels() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::SelectUser { id: 1 }).unwrap();
        handle_event(&mut state, &Event::SelectUser { id: 2 }).unwrap();

        let row = state.frame_layout(24).toggle_row;
        handle_event(&mut state, &Event::PointerDown { row, col: 4 }).unwrap();
        handle_event(&mut state, &Event::PointerDown { row, col: 18 }).unwrap();

        assert!(state.selection.show_current().is_shown());
        assert!(state.selection.show_previous().is_shown());
    }

    #[test]
    fn outside_click_and_escape_collapse_panels() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::SelectUser { id: 1 }).unwrap();
        handle_event(&mut state, &Event::ToggleCurrent).unwrap();

        let header = state.frame_layout(24).header_row;
        let (render, _) =
            handle_event(&mut state, &Event::PointerDown { row: header, col: 10 }).unwrap();
        assert!(render);
        assert!(!state.selection.show_current().is_shown());

        handle_event(&mut state, &Event::ToggleCurrent).unwrap();
        let (render, _) = handle_event(&mut state, &Event::CollapsePanels).unwrap();
        assert!(render);
        assert!(!state.selection.show_current().is_shown());

        let (render, _) = handle_event(&mut state, &Event::CollapsePanels).unwrap();
        assert!(!render);
    }

    #[test]
    fn unknown_user_ids_are_ignored() {
        let mut state = loaded_state();
        let (render, _) = handle_event(&mut state, &Event::SelectUser { id: 42 }).unwrap();
        assert!(!render);
        assert!(state.selection.current().is_none());
    }

    #[test]
    fn theme_toggle_flips_mode() {
        let mut state = state();
        handle_event(&mut state, &Event::ToggleTheme).unwrap();
        assert_eq!(state.theme_mode, ThemeMode::Dark);
        assert_eq!(state.theme().name, "catppuccin-mocha");
        handle_event(&mut state, &Event::ToggleTheme).unwrap();
        assert_eq!(state.theme_mode, ThemeMode::Light);
    }

    #[test]
    fn close_focus_emits_action_without_render() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
