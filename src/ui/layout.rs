//! Frame layout and hit testing.
//!
//! The renderer and the pointer handling both work from the same
//! [`FrameLayout`], so a click is always interpreted against the rows that
//! were actually drawn. Rows are 1-indexed, matching ANSI cursor addressing.
//!
//! ```text
//!  1  [blank]
//!  2  [Header]
//!  3  [Border]
//!  4  [Search bar, 3 rows]           (search mode only)
//!  .  [Table headers]
//!  .  ┐
//!  .  │ list rows                    ┐
//!  .  ┘                              │
//!  .  [Current user banner]          │ tracked region
//!  .  [Toggle bar]                   │
//!  .  [Panel rows]                   ┘
//!  .  [blank padding]
//! n-1 [Border]
//!  n  [Footer]
//! ```

/// Rows kept for the list before the panel may grow.
const MIN_LIST_ROWS: usize = 3;

/// Column where the toggle bar starts.
pub const TOGGLE_BAR_MARGIN: usize = 2;

/// Label of the current panel toggle.
pub const CURRENT_TOGGLE_LABEL: &str = "[c] Current";

/// Label of the previous panel toggle.
pub const PREVIOUS_TOGGLE_LABEL: &str = "[p] Previous";

/// Gap between the two toggle labels.
pub const TOGGLE_GAP: usize = 3;

/// A panel toggle hit by a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Current,
    Previous,
}

/// Full-width band of rows, `top..bottom`.
///
/// Pointer-down events outside the band collapse the current/previous
/// panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub top: usize,
    pub bottom: usize,
}

impl Region {
    /// Hit test. The band spans the whole pane width, so `col` only matters
    /// for being on screen at all.
    #[must_use]
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        col >= 1 && row >= self.top && row < self.bottom
    }
}

/// Row assignment for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    pub header_row: usize,
    pub search_row: Option<usize>,
    pub table_header_row: usize,
    pub list_top: usize,
    pub list_rows: usize,
    pub banner_row: Option<usize>,
    pub toggle_row: usize,
    pub panel_top: usize,
    pub panel_rows: usize,
    pub border_row: usize,
    pub footer_row: usize,
}

impl FrameLayout {
    /// Lays out a frame of `rows` lines.
    ///
    /// The panel takes at most `panel_len` rows and never squeezes the list
    /// below [`MIN_LIST_ROWS`]; the list gets whatever is left. On very small
    /// panes everything degrades to zero-height sections instead of
    /// overflowing.
    #[must_use]
    pub fn compute(rows: usize, search_active: bool, has_banner: bool, panel_len: usize) -> Self {
        let header_row = 2;
        let search_row = search_active.then_some(header_row + 2);
        let table_header_row = search_row.map_or(header_row + 2, |row| row + 3);
        let list_top = table_header_row + 1;

        let footer_row = rows;
        let border_row = rows.saturating_sub(1);
        let space = border_row.saturating_sub(list_top);

        let fixed = 1 + usize::from(has_banner);
        let panel_rows = panel_len.min(space.saturating_sub(fixed + MIN_LIST_ROWS));
        let list_rows = space.saturating_sub(fixed + panel_rows);

        let after_list = list_top + list_rows;
        let banner_row = has_banner.then_some(after_list);
        let toggle_row = after_list + usize::from(has_banner);

        Self {
            header_row,
            search_row,
            table_header_row,
            list_top,
            list_rows,
            banner_row,
            toggle_row,
            panel_top: toggle_row + 1,
            panel_rows,
            border_row,
            footer_row,
        }
    }

    /// Band covering the list, banner, toggle bar and panel.
    #[must_use]
    pub const fn tracked_region(&self) -> Region {
        Region {
            top: self.list_top,
            bottom: self.panel_top + self.panel_rows,
        }
    }

    /// Zero-based list slot under `row`, if `row` is a list row.
    #[must_use]
    pub const fn list_slot_at(&self, row: usize) -> Option<usize> {
        if row >= self.list_top && row < self.list_top + self.list_rows {
            Some(row - self.list_top)
        } else {
            None
        }
    }

    /// Toggle label under `(row, col)`, if any.
    #[must_use]
    pub fn toggle_at(&self, row: usize, col: usize) -> Option<Toggle> {
        if row != self.toggle_row {
            return None;
        }

        let current_start = TOGGLE_BAR_MARGIN + 1;
        let current_end = current_start + CURRENT_TOGGLE_LABEL.len();
        let previous_start = current_end + TOGGLE_GAP;
        let previous_end = previous_start + PREVIOUS_TOGGLE_LABEL.len();

        if (current_start..current_end).contains(&col) {
            Some(Toggle::Current)
        } else if (previous_start..previous_end).contains(&col) {
            Some(Toggle::Previous)
        } else {
            None
        }
    }
}
