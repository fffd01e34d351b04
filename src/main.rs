//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Rollcall library and the Zellij plugin
//! system: Zellij events are mapped to library [`Event`]s, and the
//! [`Action`]s returned by the handler are carried out with host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess`; the directory loads once granted
//! 3. **Subscribe**: Key, Mouse, `WebRequestResult`, `PermissionRequestResult`,
//!    `BeforeClose`
//! 4. **Update**: Map events, delegate to the library, execute actions
//! 5. **Render**: Record the pane size, call the library render function
//! 6. **Close**: Cancel the in-flight request, release the mouse subscription
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n`: Move down
//! - `Ctrl+p`: Move up
//! - other `Ctrl`/`Alt`/`Super` chords are ignored
//!
//! In normal mode:
//! - `j`/`Down`, `k`/`Up`: Move the cursor
//! - `Enter`: Select the highlighted user
//! - `/`: Enter search mode
//! - `c`: Toggle the current panel
//! - `p`: Toggle the previous panel
//! - `t`: Toggle light/dark theme
//! - `r`: Reload the directory
//! - `Esc`: Collapse both panels
//! - `q`: Close plugin
//!
//! In search mode:
//! - any character: Type into the query
//! - `Enter`: Select the user whose name equals the query
//! - `Esc`: Exit search
//!
//! Mouse: click a row to select it, click `[c] Current` / `[p] Previous` to
//! toggle a panel, click anywhere else outside the list to collapse both.

#![allow(clippy::multiple_crate_versions)]
#![cfg_attr(not(target_family = "wasm"), allow(dead_code, unused_imports))]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use rollcall::directory::{decode_response, FetchTicket, TraceContext};
use rollcall::app::keys::map_key;
use rollcall::{handle_event, Action, Config, Event};

#[cfg(target_family = "wasm")]
register_plugin!(State);

/// Host builds only exist so integration tests can link; the plugin itself
/// runs as `wasm32-wasip1` inside Zellij.
#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("rollcall is a Zellij plugin: build it with --target wasm32-wasip1");
}

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: rollcall::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: rollcall::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Requests `WebAccess`; the first directory load is started by the
    /// permission result, not here.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        if let Err(e) = rollcall::observability::init_tracing(&config) {
            eprintln!("rollcall: tracing disabled: {e}");
        }

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(endpoint = %config.endpoint, dark_mode = config.dark_mode, "parsed configuration");
        self.app = rollcall::initialize(&config);

        tracing::debug!("requesting permissions");
        request_permission(&[PermissionType::WebAccess]);

        tracing::debug!("subscribing to events");
        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
            EventType::BeforeClose,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");

        // Results are traced under the span that issued the request.
        let _parent = match &event {
            zellij_tile::prelude::Event::WebRequestResult(_, _, _, context) => {
                TraceContext::from_context(context).and_then(|trace| trace.attach())
            }
            _ => None,
        };

        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(mouse) => match Self::map_mouse_event(mouse) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, headers, body, context) => {
                match Self::map_web_request_result(status, &headers, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                Self::map_permission_result(permissions)
            }
            zellij_tile::prelude::Event::BeforeClose => {
                tracing::debug!("plugin closing - releasing mouse subscription");
                unsubscribe(&[EventType::Mouse]);
                Event::Teardown
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    Self::execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Renders the plugin UI.
    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport(rows, cols);
        rollcall::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(mouse) => format!("Mouse({mouse:?})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            zellij_tile::prelude::Event::BeforeClose => "BeforeClose".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        map_key(self.app.input_mode, key)
    }

    /// Maps a left click to a 1-indexed pointer-down. Other mouse events are ignored.
    fn map_mouse_event(mouse: Mouse) -> Option<Event> {
        let Mouse::LeftClick(line, col) = mouse else {
            return None;
        };
        let row = usize::try_from(line).ok()? + 1;
        Some(Event::PointerDown { row, col: col + 1 })
    }

    /// Maps a web request result carrying one of our tickets.
    fn map_web_request_result(
        status: u16,
        headers: &BTreeMap<String, String>,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(ticket) = FetchTicket::from_context(context) else {
            tracing::debug!("ignoring web request result without a rollcall ticket");
            return None;
        };

        tracing::debug!(ticket = %ticket, status, body_len = body.len(), "directory response received");
        Some(Event::UsersFetched {
            ticket,
            outcome: decode_response(status, headers, body),
        })
    }

    fn map_permission_result(permissions: PermissionStatus) -> Event {
        let granted = matches!(permissions, PermissionStatus::Granted);
        if !granted {
            tracing::warn!("web access denied - directory cannot be loaded");
        }
        Event::PermissionsResult { granted }
    }

    /// Executes an action returned from event handling.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::FetchUsers(request) => {
                tracing::debug!(endpoint = %request.endpoint, ticket = %request.ticket, "issuing directory request");
                web_request(
                    &request.endpoint,
                    HttpVerb::Get,
                    BTreeMap::new(),
                    vec![],
                    request.context(),
                );
            }
        }
    }
}
