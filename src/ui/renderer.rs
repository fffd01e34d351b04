//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Print each part at the rows its layout assigns

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// The frame is laid out with the same [`FrameLayout`] that pointer events
/// are hit-tested against, so the caller must record the pane size with
/// [`AppState::set_viewport`] before calling this.
///
/// [`FrameLayout`]: crate::ui::layout::FrameLayout
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows, cols).entered();

    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_frame(&viewmodel, state.theme(), cols);
}
