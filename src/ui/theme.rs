//! Theme management and ANSI escape sequence generation.
//!
//! Two themes are active at any time, one for light mode and one for dark
//! mode ([`ThemePair`]). Each slot is configured with either the name of a
//! built-in theme or the path to a TOML theme file.
//!
//! # Built-in Themes
//!
//! - `catppuccin-latte`: light (default light slot)
//! - `catppuccin-mocha`: dark (default dark slot)
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#4c4f69"
//! cursor_fg = "#eff1f5"
//! cursor_bg = "#1e66f5"
//! text_normal = "#4c4f69"
//! text_dim = "#8c8fa1"
//! border = "#bcc0cc"
//! search_bar_border = "#1e66f5"
//! match_highlight_fg = "#eff1f5"
//! match_highlight_bg = "#df8e1d"
//! empty_state_fg = "#1e66f5"
//! current_user_fg = "#40a02b"
//! banner_fg = "#8839ef"
//! toggle_on_fg = "#eff1f5"
//! toggle_on_bg = "#1e66f5"
//! toggle_off_fg = "#1e66f5"
//! ```

use crate::app::modes::ThemeMode;
use crate::domain::error::{Result, RollcallError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Built-in theme used for light mode when nothing else is configured.
pub const DEFAULT_LIGHT_THEME: &str = "catppuccin-latte";

/// Built-in theme used for dark mode when nothing else is configured.
pub const DEFAULT_DARK_THEME: &str = "catppuccin-mocha";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// List row under the cursor.
    pub cursor_fg: String,
    pub cursor_bg: String,

    pub text_normal: String,
    /// Footer, email column, secondary info.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// Loading / failure / no-match messages.
    pub empty_state_fg: String,

    /// Marker in front of the current user, in the list and the panel.
    pub current_user_fg: String,

    /// "The current Head of user is ..." line.
    pub banner_fg: String,

    /// Toggle label whose panel is shown.
    pub toggle_on_fg: String,
    pub toggle_on_bg: String,
    /// Toggle label whose panel is hidden.
    pub toggle_off_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`RollcallError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            RollcallError::Theme(format!("failed to read {}: {e}", path.display()))
        })?;

        toml::from_str(&contents).map_err(|e| {
            RollcallError::Theme(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Resolves a configured theme: a built-in name first, then a file path.
    ///
    /// # Errors
    ///
    /// Returns [`RollcallError::Theme`] if `name_or_path` is neither a built-in name
    /// nor a readable theme file.
    pub fn resolve(name_or_path: &str) -> Result<Self> {
        Self::from_name(name_or_path).map_or_else(|| Self::from_file(name_or_path), Ok)
    }

    /// Resolves `name_or_path` if given, falling back to the built-in `fallback`.
    #[must_use]
    pub fn resolve_or(name_or_path: Option<&str>, fallback: &str) -> Self {
        let resolved = name_or_path.and_then(|value| {
            Self::resolve(value)
                .map_err(|e| {
                    tracing::debug!(theme = %value, error = %e, "failed to load theme, using default");
                })
                .ok()
        });

        resolved
            .or_else(|| Self::from_name(fallback))
            .unwrap_or_else(Self::default)
    }

    /// Converts a hex color to RGB. Malformed input renders as white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn italic() -> &'static str {
        "\u{001b}[3m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// The built-in light theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse, which is a build defect.
    fn default() -> Self {
        Self::from_name(DEFAULT_LIGHT_THEME)
            .expect("Built-in catppuccin-latte theme should always parse")
    }
}

/// The light and dark theme slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemePair {
    pub light: Theme,
    pub dark: Theme,
}

impl ThemePair {
    /// Resolves both slots from configuration, falling back to the built-ins.
    #[must_use]
    pub fn resolve(light: Option<&str>, dark: Option<&str>) -> Self {
        Self {
            light: Theme::resolve_or(light, DEFAULT_LIGHT_THEME),
            dark: Theme::resolve_or(dark, DEFAULT_DARK_THEME),
        }
    }

    #[must_use]
    pub const fn get(&self, mode: ThemeMode) -> &Theme {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }
}

impl Default for ThemePair {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}
