//! Current-user banner, toggle bar and the current/previous panel.
//!
//! The toggle labels are printed at the columns [`FrameLayout::toggle_at`]
//! hit-tests against.
//!
//! [`FrameLayout::toggle_at`]: crate::ui::layout::FrameLayout::toggle_at

use crate::ui::helpers::{position_cursor, truncate_chars};
use crate::ui::layout::{
    CURRENT_TOGGLE_LABEL, PREVIOUS_TOGGLE_LABEL, TOGGLE_BAR_MARGIN, TOGGLE_GAP,
};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{PanelKind, PanelLine, ToggleBarInfo, ToggleInfo};

/// Renders the "current Head of user" line at `row`.
pub fn render_banner(row: usize, banner: &str, theme: &Theme, cols: usize) {
    position_cursor(row, TOGGLE_BAR_MARGIN + 1);
    print!("{}", Theme::italic());
    print!("{}", Theme::fg(&theme.colors.banner_fg));
    print!("{}", truncate_chars(banner, cols.saturating_sub(TOGGLE_BAR_MARGIN)));
    print!("{}", Theme::reset());
}

fn render_toggle(label: &str, toggle: ToggleInfo, theme: &Theme) {
    if toggle.shown {
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.toggle_on_fg));
        print!("{}", Theme::bg(&theme.colors.toggle_on_bg));
    } else if toggle.enabled {
        print!("{}", Theme::fg(&theme.colors.toggle_off_fg));
    } else {
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{label}");
    print!("{}", Theme::reset());
}

/// Renders both toggle labels at `row`.
pub fn render_toggle_bar(row: usize, toggles: &ToggleBarInfo, theme: &Theme) {
    position_cursor(row, TOGGLE_BAR_MARGIN + 1);
    render_toggle(CURRENT_TOGGLE_LABEL, toggles.current, theme);
    print!("{}", " ".repeat(TOGGLE_GAP));
    render_toggle(PREVIOUS_TOGGLE_LABEL, toggles.previous, theme);
}

/// Renders the panel lines from `top`, one per row.
pub fn render_panel(top: usize, lines: &[PanelLine], theme: &Theme, cols: usize) {
    let width = cols.saturating_sub(TOGGLE_BAR_MARGIN + 4);

    for (offset, line) in lines.iter().enumerate() {
        position_cursor(top + offset, TOGGLE_BAR_MARGIN + 1);
        match line.kind {
            PanelKind::Current => {
                print!("{}", Theme::fg(&theme.colors.current_user_fg));
                print!("● ");
                print!("{}", Theme::fg(&theme.colors.text_normal));
            }
            PanelKind::Previous => {
                print!("{}", Theme::fg(&theme.colors.text_dim));
                print!("↳ ");
            }
        }
        print!("{}", truncate_chars(&line.name, width));
        print!("{}", Theme::reset());
    }
}
