//! Input and theme mode types.
//!
//! [`InputMode`] decides how keys are interpreted: in `Normal` mode letters
//! are commands, in `Search` mode they edit the query. [`ThemeMode`] picks
//! which of the two configured themes is active.

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation and command keys (j/k, c, p, t, r, q, /).
    #[default]
    Normal,

    /// Typing into the search field. Enter commits an exact-name match.
    Search,
}

/// Light or dark palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub const fn from_dark(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}
