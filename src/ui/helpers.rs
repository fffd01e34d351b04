//! Shared rendering utilities and helpers.
//!
//! Everything here works on character indices, not byte indices, so names
//! with multi-byte characters are cut and highlighted on character
//! boundaries.

use crate::ui::theme::Theme;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`, used as its display width.
#[must_use]
pub fn char_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `max` characters, ending with `…` when cut.
#[must_use]
pub fn truncate_chars(text: &str, max: usize) -> String {
    if char_width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut cut: String = text.chars().take(max - 1).collect();
    cut.push('…');
    cut
}

/// Renders a Unix timestamp relative to `now`, as "just now", "5m ago", "3h ago"
/// or "2d ago".
#[must_use]
pub fn time_ago(timestamp: i64, now: i64) -> String {
    let diff = now - timestamp;

    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        format!("{}m ago", diff / SECONDS_PER_MINUTE)
    } else if diff < SECONDS_PER_DAY {
        format!("{}h ago", diff / SECONDS_PER_HOUR)
    } else {
        format!("{}d ago", diff / SECONDS_PER_DAY)
    }
}

/// Splits `text` into `(segment, highlighted)` pieces along character ranges.
///
/// Ranges past the end of the text are clamped; overlapping or unordered
/// ranges are skipped.
#[must_use]
pub fn split_highlights(text: &str, ranges: &[(usize, usize)]) -> Vec<(String, bool)> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < pos || start >= end {
            continue;
        }

        if start > pos {
            segments.push((chars[pos..start].iter().collect(), false));
        }
        segments.push((chars[start..end].iter().collect(), true));
        pos = end;
    }

    if pos < chars.len() {
        segments.push((chars[pos..].iter().collect(), false));
    }

    segments
}

/// Prints `text` with the given character ranges in match highlight colors.
///
/// `restore` is the escape sequence re-applied after each highlight so the
/// rest of the row keeps its styling.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    restore: &str,
) {
    if ranges.is_empty() {
        print!("{text}");
        return;
    }

    for (segment, highlighted) in split_highlights(text, ranges) {
        if highlighted {
            print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
            print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
            print!("{segment}");
            print!("{}", Theme::reset());
            print!("{restore}");
        } else {
            print!("{segment}");
        }
    }
}
