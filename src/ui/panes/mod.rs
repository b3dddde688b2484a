//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the TUI,
//! organized by responsibility for maintainability.
//!
//! # Pane Modules
//!
//! - [`array`]: Array bars with mark colors, pointer arrows, and labels
//! - [`inspector`]: Pointers, variables, metrics, watch, and outcome
//! - [`detail`]: Script source with highlighting, or auxiliary state
//! - [`log`]: Narration message and captured log lines
//! - [`status`]: Status bar with keybindings and playback state
//!
//! # Architecture
//!
//! Each pane module exports:
//! - A primary `render_*` function
//! - Associated scroll state types where the pane scrolls
//!
//! Render functions take the frame, the pane's area, the data they display,
//! and a focus flag; they never hold state between frames themselves.

pub mod array;
pub mod detail;
pub mod inspector;
pub mod log;
pub mod status;

// Re-export render functions for convenience
pub use array::render_array_pane;
pub use detail::{render_detail_pane, DetailScrollState};
pub use inspector::render_inspector_pane;
pub use log::render_log_pane;
pub use status::render_status_bar;
