//! # Introduction
//!
//! Algotty runs classic array algorithms (and small user scripts) and
//! records every observable step as an event. The event list is folded into
//! a complete snapshot timeline up front; playback in either direction is
//! then a cursor move through precomputed state, navigated through a
//! terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Algorithm/Script → Events → Reducer → Timeline → Player → TUI
//! ```
//!
//! 1. [`event`] — the closed event vocabulary every producer speaks.
//! 2. [`algo`] — built-in algorithms: eager producers that return the full
//!    event list of a run in one call.
//! 3. [`script`] — a sandboxed interpreter for user scripts whose
//!    instrumentation hooks emit the same events.
//! 4. [`timeline`] — the pure reducer and the precomputed snapshot
//!    timeline with O(1) seeks.
//! 5. [`player`] — the playback controller: transport, speed, and the
//!    deadline timer that drives auto-play.
//! 6. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Built-in catalog
//!
//! Sorting: bubble, insertion, selection, quick, merge, heap, counting.
//! Searching: linear, binary. Arrays: reverse, maximum subarray.

pub mod algo;
pub mod event;
pub mod player;
pub mod script;
pub mod timeline;
pub mod ui;
