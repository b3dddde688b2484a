//! Runtime fault types for the script engine
//!
//! All runtime faults are fatal. The engine stops at the faulting
//! statement and reports the fault alongside whatever events were
//! recorded before it.

use super::ast::SourceLocation;
use thiserror::Error;

/// Runtime faults that halt script execution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeFault {
    #[error("Undefined variable '{name}' at line {}", .location.line)]
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },

    #[error("'{name}' belongs to the host and cannot be reassigned at line {}", .location.line)]
    ReservedName {
        name: String,
        location: SourceLocation,
    },

    #[error("Type error at line {}: expected {expected}, got {found}", .location.line)]
    TypeMismatch {
        expected: &'static str,
        found: String,
        location: SourceLocation,
    },

    #[error("Index {index} out of bounds for length {len} at line {}", .location.line)]
    IndexOutOfBounds {
        index: i64,
        len: usize,
        location: SourceLocation,
    },

    #[error("Division by zero at line {}", .location.line)]
    DivisionByZero { location: SourceLocation },

    #[error("Integer overflow in {operation} at line {}", .location.line)]
    IntegerOverflow {
        operation: String,
        location: SourceLocation,
    },

    #[error("Unknown function '{name}' at line {}", .location.line)]
    UnknownFunction {
        name: String,
        location: SourceLocation,
    },

    #[error("Unknown mark kind '{kind}' at line {}", .location.line)]
    UnknownMarkKind {
        kind: String,
        location: SourceLocation,
    },

    #[error("'{function}' expects {expected} argument(s), got {found} at line {}", .location.line)]
    ArgumentCount {
        function: String,
        expected: &'static str,
        found: usize,
        location: SourceLocation,
    },

    #[error("Execution exceeded the {limit_ms}ms budget at line {}", .location.line)]
    TimeoutExceeded {
        limit_ms: u64,
        location: SourceLocation,
    },

    #[error("The array can only be read through arr[index] and len(arr), line {}", .location.line)]
    ArrayMisuse { location: SourceLocation },
}

impl RuntimeFault {
    /// Returns the source location where this fault was raised.
    pub fn location(&self) -> SourceLocation {
        match self {
            RuntimeFault::UndefinedVariable { location, .. }
            | RuntimeFault::ReservedName { location, .. }
            | RuntimeFault::TypeMismatch { location, .. }
            | RuntimeFault::IndexOutOfBounds { location, .. }
            | RuntimeFault::DivisionByZero { location }
            | RuntimeFault::IntegerOverflow { location, .. }
            | RuntimeFault::UnknownFunction { location, .. }
            | RuntimeFault::UnknownMarkKind { location, .. }
            | RuntimeFault::ArgumentCount { location, .. }
            | RuntimeFault::TimeoutExceeded { location, .. }
            | RuntimeFault::ArrayMisuse { location } => *location,
        }
    }
}
