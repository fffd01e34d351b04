//! User interface rendering layer with component-based architecture.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//!                  │
//!                  └── FrameLayout ──→ pointer hit testing
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`layout`]: Row assignment and hit regions of a frame
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, truncation)
//! - [`theme`]: Color schemes and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod layout;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use layout::{FrameLayout, Region, Toggle};
pub use renderer::render;
pub use theme::{Theme, ThemePair};
pub use viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, ListBody, SearchBarInfo, UIViewModel,
};
