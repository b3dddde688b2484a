//! User-script parsing and sandboxed execution
//!
//! This module turns script text into visualization events:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parser`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//! - [`runner`]: Tree-walking interpreter with instrumentation hooks
//! - [`error`]: Runtime fault types
//!
//! # Supported Language
//!
//! A small JavaScript-flavored imperative language:
//! - `let` bindings, `if`/`else if`/`else`, `while`, `for`, `break`,
//!   `continue`, `return`
//! - 64-bit integers, booleans, and strings; checked arithmetic
//! - `arr[index]` and `len(arr)` read the host array; all writes go
//!   through the `set` and `swap` hooks
//!
//! # Execution Model
//!
//! The script runs against a private copy of the input array. Hook calls
//! (`compare`, `swap`, `set`, `mark`, `visit`, `highlight`, `message`)
//! append events as side effects; `log` feeds a separate text channel.
//! A wall-clock deadline and an event cap bound every run, so a hostile
//! script cannot hang or flood the host.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for
//! binary operators. No external parser generator dependencies.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod runner;

pub use error::RuntimeFault;
pub use parser::ParseError;
pub use runner::{ExecutionResult, ScriptEngine, ScriptFault, TimedEvent};

use std::time::Duration;

/// Default wall-clock budget for one script run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Default cap on recorded events per run.
pub const DEFAULT_MAX_EVENTS: usize = 5000;

/// Default cap on `log` lines per run.
pub const DEFAULT_MAX_LOGS: usize = 1000;

/// Resource bounds applied to every script execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_duration: Duration,
    pub max_events: usize,
    pub max_logs: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_duration: DEFAULT_TIMEOUT,
            max_events: DEFAULT_MAX_EVENTS,
            max_logs: DEFAULT_MAX_LOGS,
        }
    }
}
