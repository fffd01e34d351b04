//! Keyboard mapping from Zellij keys to [`Event`]s.
//!
//! `Ctrl+n`/`Ctrl+p` move the cursor in every mode. Any other chord held
//! with Ctrl, Alt or Super is ignored, so it never edits the query or fires
//! a normal-mode binding.

use super::handler::Event;
use super::modes::InputMode;
use zellij_tile::prelude::{BareKey, KeyModifier, KeyWithModifier};

/// Maps a key press in `mode` to an event. Unbound keys yield `None`.
#[must_use]
pub fn map_key(mode: InputMode, key: &KeyWithModifier) -> Option<Event> {
    tracing::debug!(bare_key = ?key.bare_key, mode = ?mode, "key event");

    if key.has_modifiers(&[KeyModifier::Ctrl]) {
        return match key.bare_key {
            BareKey::Char('n') => Some(Event::KeyDown),
            BareKey::Char('p') => Some(Event::KeyUp),
            _ => None,
        };
    }
    if key.has_modifiers(&[KeyModifier::Alt]) || key.has_modifiers(&[KeyModifier::Super]) {
        return None;
    }

    match mode {
        InputMode::Search => map_search_key(key.bare_key),
        InputMode::Normal => map_normal_key(key.bare_key),
    }
}

fn map_search_key(key: BareKey) -> Option<Event> {
    Some(match key {
        BareKey::Down => Event::KeyDown,
        BareKey::Up => Event::KeyUp,
        BareKey::Esc => Event::ExitSearch,
        BareKey::Enter => Event::CommitSearch,
        BareKey::Backspace => Event::Backspace,
        BareKey::Char(c) => Event::Char(c),
        _ => return None,
    })
}

fn map_normal_key(key: BareKey) -> Option<Event> {
    Some(match key {
        BareKey::Down | BareKey::Char('j') => Event::KeyDown,
        BareKey::Up | BareKey::Char('k') => Event::KeyUp,
        BareKey::Enter => Event::SelectHighlighted,
        BareKey::Esc => Event::CollapsePanels,
        BareKey::Char('/') => Event::SearchMode,
        BareKey::Char('c') => Event::ToggleCurrent,
        BareKey::Char('p') => Event::TogglePrevious,
        BareKey::Char('t') => Event::ToggleTheme,
        BareKey::Char('r') => Event::Reload,
        BareKey::Char('q') => Event::CloseFocus,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::map_key;
    use crate::app::handler::Event;
    use crate::app::modes::InputMode;
    use zellij_tile::prelude::{BareKey, KeyWithModifier};

    fn key(c: char) -> KeyWithModifier {
        KeyWithModifier::new(BareKey::Char(c))
    }

    #[test]
    fn plain_and_shifted_chars_edit_the_query() {
        assert_eq!(map_key(InputMode::Search, &key('c')), Some(Event::Char('c')));
        assert_eq!(
            map_key(InputMode::Search, &key('A').with_shift_modifier()),
            Some(Event::Char('A'))
        );
    }

    #[test]
    fn modified_chars_never_reach_the_query() {
        assert_eq!(map_key(InputMode::Search, &key('c').with_ctrl_modifier()), None);
        assert_eq!(map_key(InputMode::Search, &key('b').with_alt_modifier()), None);
        assert_eq!(map_key(InputMode::Search, &key('v').with_super_modifier()), None);
    }

    #[test]
    fn ctrl_n_and_ctrl_p_move_in_every_mode() {
        for mode in [InputMode::Normal, InputMode::Search] {
            assert_eq!(map_key(mode, &key('n').with_ctrl_modifier()), Some(Event::KeyDown));
            assert_eq!(map_key(mode, &key('p').with_ctrl_modifier()), Some(Event::KeyUp));
        }
    }

    #[test]
    fn normal_bindings_ignore_chords() {
        assert_eq!(map_key(InputMode::Normal, &key('c')), Some(Event::ToggleCurrent));
        assert_eq!(map_key(InputMode::Normal, &key('c').with_ctrl_modifier()), None);
        assert_eq!(map_key(InputMode::Normal, &key('q').with_alt_modifier()), None);
        assert_eq!(
            map_key(InputMode::Normal, &KeyWithModifier::new(BareKey::Enter)),
            Some(Event::SelectHighlighted)
        );
    }
}
