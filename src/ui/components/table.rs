//! Table component renderer.
//!
//! Renders the directory as a two-column table (NAME, EMAIL). The cursor row
//! is drawn with the cursor colors across the full width, and the current
//! user carries a marker in front of its name.

use crate::app::state::NAME_COLUMN_WIDTH;
use crate::ui::helpers::{self, char_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Marker drawn in front of the current user.
const CURRENT_MARKER: &str = "● ";

/// Width of the marker column.
const MARKER_WIDTH: usize = 2;

/// Space between the NAME and EMAIL columns.
const COLUMN_GAP: usize = 2;

/// Renders the NAME/EMAIL column headers at `row`.
///
/// Returns the next available row.
pub fn render_table_headers(row: usize, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        "{}{:<width$}{}EMAIL",
        " ".repeat(MARKER_WIDTH),
        "NAME",
        " ".repeat(COLUMN_GAP),
        width = NAME_COLUMN_WIDTH
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders `items` one per row starting at `row`.
///
/// Returns the row after the last item.
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Base styling of a row, re-applied after every highlight.
fn row_style(item: &DisplayItem, theme: &Theme) -> String {
    if item.is_cursor {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.cursor_fg),
            Theme::bg(&theme.colors.cursor_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    }
}

fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let style = row_style(item, theme);

    position_cursor(row, 1);
    print!("{style}");

    if item.is_current {
        if !item.is_cursor {
            print!("{}", Theme::fg(&theme.colors.current_user_fg));
        }
        print!("{}", Theme::bold());
        print!("{CURRENT_MARKER}");
        print!("{}", Theme::reset());
        print!("{style}");
    } else {
        print!("{}", " ".repeat(MARKER_WIDTH));
    }

    helpers::render_highlighted_text(&item.name, &item.highlight_ranges, theme, &style);
    print!(
        "{}",
        " ".repeat(NAME_COLUMN_WIDTH.saturating_sub(char_width(&item.name)) + COLUMN_GAP)
    );

    if !item.is_cursor {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", item.email);

    let line_len = MARKER_WIDTH + NAME_COLUMN_WIDTH + COLUMN_GAP + char_width(&item.email);
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
