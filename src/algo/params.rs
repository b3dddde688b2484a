//! Typed parameter declarations for algorithms.
//!
//! Each algorithm declares the knobs it accepts as a list of [`ParamSpec`]s;
//! the surrounding UI (or the CLI) collects concrete values into a
//! [`ParamValues`] map and passes it through to `run` unchanged. Every spec
//! carries a default, so an empty map is always a valid input.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Declaration of a single algorithm parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParamSpec {
    /// Bounded integer with a step size for UI spinners.
    Number {
        id: &'static str,
        label: &'static str,
        default: i64,
        min: i64,
        max: i64,
        step: i64,
    },
    /// One choice out of a fixed option list.
    Select {
        id: &'static str,
        label: &'static str,
        default: &'static str,
        options: &'static [&'static str],
    },
    /// Free-form text with a length cap.
    Text {
        id: &'static str,
        label: &'static str,
        default: &'static str,
        placeholder: &'static str,
        max_length: usize,
    },
}

impl ParamSpec {
    pub fn id(&self) -> &'static str {
        match self {
            ParamSpec::Number { id, .. }
            | ParamSpec::Select { id, .. }
            | ParamSpec::Text { id, .. } => id,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ParamSpec::Number { label, .. }
            | ParamSpec::Select { label, .. }
            | ParamSpec::Text { label, .. } => label,
        }
    }

    pub fn default_value(&self) -> ParamValue {
        match self {
            ParamSpec::Number { default, .. } => ParamValue::Number(*default),
            ParamSpec::Select { default, .. } | ParamSpec::Text { default, .. } => {
                ParamValue::Text((*default).to_string())
            }
        }
    }
}

/// A concrete parameter value supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(i64),
    Text(String),
}

impl ParamValue {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            ParamValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            ParamValue::Number(_) => None,
        }
    }
}

/// Collected parameter values, keyed by spec id.
#[derive(Debug, Clone, Default)]
pub struct ParamValues {
    values: FxHashMap<String, ParamValue>,
}

impl ParamValues {
    pub fn new() -> Self {
        ParamValues::default()
    }

    /// Seed a map with every spec's default value.
    pub fn with_defaults(specs: &[ParamSpec]) -> Self {
        let mut values = FxHashMap::default();
        for spec in specs {
            values.insert(spec.id().to_string(), spec.default_value());
        }
        ParamValues { values }
    }

    pub fn set(&mut self, id: impl Into<String>, value: ParamValue) {
        self.values.insert(id.into(), value);
    }

    pub fn get(&self, id: &str) -> Option<&ParamValue> {
        self.values.get(id)
    }

    /// Integer value for `id`, falling back to `default` when absent or of
    /// the wrong kind.
    pub fn number_or(&self, id: &str, default: i64) -> i64 {
        self.values
            .get(id)
            .and_then(ParamValue::as_number)
            .unwrap_or(default)
    }

    /// Text value for `id`, falling back to `default` when absent or of the
    /// wrong kind.
    pub fn text_or<'a>(&'a self, id: &str, default: &'a str) -> &'a str {
        self.values
            .get(id)
            .and_then(ParamValue::as_text)
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECS: &[ParamSpec] = &[
        ParamSpec::Number {
            id: "target",
            label: "Target value",
            default: 5,
            min: -999,
            max: 999,
            step: 1,
        },
        ParamSpec::Select {
            id: "pivot",
            label: "Pivot strategy",
            default: "last",
            options: &["first", "middle", "last"],
        },
        ParamSpec::Text {
            id: "note",
            label: "Note",
            default: "",
            placeholder: "optional note",
            max_length: 40,
        },
    ];

    #[test]
    fn test_defaults_cover_every_spec() {
        let params = ParamValues::with_defaults(SPECS);
        assert_eq!(params.number_or("target", 0), 5);
        assert_eq!(params.text_or("pivot", "?"), "last");
        assert_eq!(params.text_or("note", "?"), "");
    }

    #[test]
    fn test_overrides_and_fallbacks() {
        let mut params = ParamValues::with_defaults(SPECS);
        params.set("target", ParamValue::Number(42));
        assert_eq!(params.number_or("target", 0), 42);

        // Wrong kind falls back to the given default.
        params.set("pivot", ParamValue::Number(3));
        assert_eq!(params.text_or("pivot", "last"), "last");

        // Unknown id falls back too.
        assert_eq!(params.number_or("missing", 7), 7);
    }
}
