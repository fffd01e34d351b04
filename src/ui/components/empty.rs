//! Message shown in place of the directory list.

use crate::ui::helpers::{char_width, position_cursor, truncate_chars};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the message and its subtitle centered in the list area.
///
/// The area spans `rows` rows from `top`. Lines that do not fit are skipped.
pub fn render_empty_state(top: usize, rows: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    if rows == 0 {
        return;
    }

    let message_row = top + rows.saturating_sub(2) / 2;

    let message = truncate_chars(&empty.message, cols);
    let msg_len = char_width(&message);
    let msg_padding = (cols.saturating_sub(msg_len)) / 2;

    position_cursor(message_row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", " ".repeat(msg_padding));
    print!("{message}");
    print!("{}", Theme::reset());

    if message_row + 1 >= top + rows {
        return;
    }

    let subtitle = truncate_chars(&empty.subtitle, cols);
    let sub_len = char_width(&subtitle);
    let sub_padding = (cols.saturating_sub(sub_len)) / 2;

    position_cursor(message_row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(sub_padding));
    print!("{subtitle}");
    print!("{}", Theme::reset());
}
