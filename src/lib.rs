//! Rollcall: a Zellij plugin for browsing a remote user directory.
//!
//! Rollcall fetches a list of users from a REST endpoint and provides:
//! - Live, case-insensitive name filtering with match highlighting
//! - A "current" user plus the history of previously selected users
//! - Two independent panels (current / previous) toggled by key or click
//! - Collapsing both panels with a click outside the directory area
//! - Light and dark themes, switchable at runtime
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling (reducer)                         │
//! │  - Selection & visibility controller                │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                   │
//! ┌───────────────────────┐       ┌───────────────────────┐
//! │ Directory (directory/)│       │ UI Layer (ui/)        │
//! │ - Store + fetch cycle │       │ - Layout / hit tests  │
//! │ - Fetch tickets       │       │ - Components, themes  │
//! │ - Payload decoding    │       │                       │
//! └───────────────────────┘       └───────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/): UserRecord, errors               │
//! │  Observability (observability/): OTLP file tracing  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/rollcall.wasm" {
//!         endpoint "https://jsonplaceholder.typicode.com/users"
//!         light_theme "catppuccin-latte"
//!         dark_theme "/path/to/theme.toml"
//!         dark_mode "true"
//!         trace_level "rollcall=debug"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Load**: parse [`Config`], install tracing, build the [`AppState`],
//!    request the `WebAccess` permission, subscribe to events
//! 2. **Permission granted**: the handler starts a directory load and returns
//!    an [`Action::FetchUsers`] that the shim turns into a web request
//! 3. **Result**: the response is decoded and completed against its fetch
//!    ticket; stale responses are dropped
//! 4. **Interaction**: keys and clicks become [`Event`]s for [`handle_event`]

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod directory;
pub mod domain;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode, ThemeMode};
pub use directory::{DirectoryStore, FetchStatus};
pub use domain::{FetchFailure, Result, RollcallError, UserRecord};
pub use ui::Theme;

use std::collections::BTreeMap;
use ui::ThemePair;

/// Directory endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

/// Default `EnvFilter` directive.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL answering `GET` with a JSON array of users.
    pub endpoint: String,

    /// Built-in theme name or TOML file path for light mode.
    pub light_theme: Option<String>,

    /// Built-in theme name or TOML file path for dark mode.
    pub dark_theme: Option<String>,

    /// Start in dark mode.
    pub dark_mode: bool,

    /// `EnvFilter` directive, e.g. `debug` or `rollcall=trace`.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            light_theme: None,
            dark_theme: None,
            dark_mode: false,
            trace_level: DEFAULT_TRACE_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Missing or blank values fall back to the defaults. `dark_mode` accepts
    /// `true`/`false`, `yes`/`no` and `1`/`0`; anything else is `false`.
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let non_blank = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let dark_mode = non_blank("dark_mode").is_some_and(|value| {
            matches!(value.to_ascii_lowercase().as_str(), "true" | "yes" | "1")
        });

        Self {
            endpoint: non_blank("endpoint").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            light_theme: non_blank("light_theme"),
            dark_theme: non_blank("dark_theme"),
            dark_mode,
            trace_level: non_blank("trace_level")
                .unwrap_or_else(|| DEFAULT_TRACE_LEVEL.to_string()),
        }
    }
}

/// Builds the initial [`AppState`]: themes resolved, directory loading.
///
/// No request goes out until the `WebAccess` permission is granted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(endpoint = %config.endpoint, "initializing rollcall plugin");

    let themes = ThemePair::resolve(config.light_theme.as_deref(), config.dark_theme.as_deref());

    AppState::new(
        DirectoryStore::new(config.endpoint.clone()),
        themes,
        ThemeMode::from_dark(config.dark_mode),
    )
}

#[cfg(test)]
mod tests {
    use super::{initialize, Config, DEFAULT_ENDPOINT};
    use crate::app::ThemeMode;
    use crate::directory::FetchStatus;
    use std::collections::BTreeMap;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_configuration_uses_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn parses_all_keys() {
        let config = Config::from_zellij(&map(&[
            ("endpoint", "http://localhost:8080/users"),
            ("light_theme", "catppuccin-latte"),
            ("dark_theme", "/tmp/night.toml"),
            ("dark_mode", "TRUE"),
            ("trace_level", "rollcall=debug"),
        ]));

        assert_eq!(config.endpoint, "http://localhost:8080/users");
        assert_eq!(config.light_theme.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.dark_theme.as_deref(), Some("/tmp/night.toml"));
        assert!(config.dark_mode);
        assert_eq!(config.trace_level, "rollcall=debug");
    }

    #[test]
    fn blank_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("endpoint", "  "),
            ("dark_mode", "maybe"),
            ("light_theme", ""),
        ]));

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(!config.dark_mode);
        assert!(config.light_theme.is_none());
    }

    #[test]
    fn initialize_starts_loading_in_configured_mode() {
        let config = Config {
            dark_mode: true,
            ..Config::default()
        };
        let state = initialize(&config);

        assert_eq!(state.theme_mode, ThemeMode::Dark);
        assert_eq!(state.directory.status(), &FetchStatus::Loading);
        assert_eq!(state.directory.endpoint(), DEFAULT_ENDPOINT);
        assert!(!state.web_access);
    }
}
