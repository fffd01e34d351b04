//! Composable UI component renderers.
//!
//! Each component prints one part of the frame at the rows the
//! [`FrameLayout`](crate::ui::layout::FrameLayout) assigned to it.
//!
//! # Components
//!
//! - [`header`]: Title bar with the directory summary
//! - [`search`]: Search input box (search mode only)
//! - [`table`]: Directory list with NAME and EMAIL columns
//! - [`empty`]: Loading / failure / no-match message in place of the list
//! - [`toggles`]: Current-user banner, toggle bar and panel
//! - [`footer`]: Keybinding hints

mod empty;
mod footer;
mod header;
mod search;
mod table;
mod toggles;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ListBody, UIViewModel};

use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};
use toggles::{render_banner, render_panel, render_toggle_bar};

/// Renders a horizontal border line at `row`.
///
/// Returns the next available row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders a whole frame.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines]      (search mode only)
/// [Table Headers]
/// [Table Rows | message]
/// [Banner]                    (when a user is selected)
/// [Toggle bar]
/// [Panel rows]
/// [Blank padding]
/// [Border]
/// [Footer]
/// ```
pub fn render_frame(vm: &UIViewModel, theme: &Theme, cols: usize) {
    let layout = &vm.layout;

    let border_after_header = render_header(layout.header_row, &vm.header, theme, cols);
    render_border(border_after_header, &theme.colors.border, cols);

    if let (Some(row), Some(search)) = (layout.search_row, &vm.search_bar) {
        render_search_bar(row, search, theme, cols);
    }

    render_table_headers(layout.table_header_row, theme);

    match &vm.list {
        ListBody::Items(items) => {
            render_table_rows(layout.list_top, items, theme, cols);
        }
        ListBody::Message(empty) => {
            render_empty_state(layout.list_top, layout.list_rows, empty, theme, cols);
        }
    }

    if let (Some(row), Some(banner)) = (layout.banner_row, &vm.banner) {
        render_banner(row, banner, theme, cols);
    }

    render_toggle_bar(layout.toggle_row, &vm.toggles, theme);
    render_panel(layout.panel_top, &vm.panel, theme, cols);

    render_border(layout.border_row, &theme.colors.border, cols);
    render_footer(layout.footer_row, &vm.footer, theme, cols);
}
