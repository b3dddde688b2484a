//! The closed set of operation events an algorithm run is made of.
//!
//! Every producer (built-in algorithm or sandboxed script) reports what it
//! did as an ordered sequence of [`Event`] values. Events are plain data:
//! they carry exactly the fields needed to replay the operation, and the
//! reducer in [`crate::timeline`] gives each variant its precise meaning.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Relational outcome of a comparison, recorded alongside the compared pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareOutcome {
    Less,
    Equal,
    Greater,
}

impl CompareOutcome {
    /// Conventional -1 / 0 / 1 encoding, used by the script `compare` hook.
    pub fn signum(self) -> i64 {
        match self {
            CompareOutcome::Less => -1,
            CompareOutcome::Equal => 0,
            CompareOutcome::Greater => 1,
        }
    }
}

impl From<std::cmp::Ordering> for CompareOutcome {
    fn from(ord: std::cmp::Ordering) -> Self {
        match ord {
            std::cmp::Ordering::Less => CompareOutcome::Less,
            std::cmp::Ordering::Equal => CompareOutcome::Equal,
            std::cmp::Ordering::Greater => CompareOutcome::Greater,
        }
    }
}

/// Visual category attached to an array index by mark events.
///
/// Overlapping marks on the same index are last-write-wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    Comparing,
    Swapping,
    Sorted,
    Visited,
    Pivot,
    Found,
    Minimum,
    Boundary,
    Current,
}

impl MarkKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MarkKind::Comparing => "comparing",
            MarkKind::Swapping => "swapping",
            MarkKind::Sorted => "sorted",
            MarkKind::Visited => "visited",
            MarkKind::Pivot => "pivot",
            MarkKind::Found => "found",
            MarkKind::Minimum => "minimum",
            MarkKind::Boundary => "boundary",
            MarkKind::Current => "current",
        }
    }
}

impl fmt::Display for MarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comparing" => Ok(MarkKind::Comparing),
            "swapping" => Ok(MarkKind::Swapping),
            "sorted" => Ok(MarkKind::Sorted),
            "visited" => Ok(MarkKind::Visited),
            "pivot" => Ok(MarkKind::Pivot),
            "found" => Ok(MarkKind::Found),
            "minimum" => Ok(MarkKind::Minimum),
            "boundary" => Ok(MarkKind::Boundary),
            "current" => Ok(MarkKind::Current),
            _ => Err(()),
        }
    }
}

/// Severity of a narration message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Palette slot for a pointer label. The theme maps tints to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerTint {
    Blue,
    Orange,
    Green,
    Red,
    Purple,
}

impl PointerTint {
    /// Cycle through the palette so adjacent pointers get distinct tints.
    pub fn nth(n: usize) -> Self {
        const ORDER: [PointerTint; 5] = [
            PointerTint::Blue,
            PointerTint::Orange,
            PointerTint::Green,
            PointerTint::Red,
            PointerTint::Purple,
        ];
        ORDER[n % ORDER.len()]
    }
}

/// A named arrow pinned to an array index (`lo`, `mid`, `hi`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerMarker {
    pub name: String,
    pub index: usize,
    pub tint: PointerTint,
}

/// Scalar value a tracked variable can hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarValue {
    Int(i64),
    Bool(bool),
    Text(String),
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarValue::Int(n) => write!(f, "{}", n),
            VarValue::Bool(b) => write!(f, "{}", b),
            VarValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A named variable update carried by a pointer event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableBinding {
    pub name: String,
    pub value: VarValue,
}

/// One labelled group of values in a bucket visualization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    pub items: Vec<i64>,
}

/// Structured side-visualization payload.
///
/// Auxiliary events always carry a complete payload; the reducer replaces
/// the previous one wholesale, never merges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AuxState {
    /// Array-encoded binary heap: children of `i` live at `2i+1` and `2i+2`.
    /// Indices at `heap_size` and beyond have been extracted.
    Heap {
        nodes: Vec<i64>,
        heap_size: usize,
        active: Vec<usize>,
    },
    /// Labelled buckets, as used by counting sort.
    Buckets { buckets: Vec<Bucket> },
    /// The two halves and the growing output of a merge step.
    Merge {
        left: Vec<i64>,
        right: Vec<i64>,
        merged: Vec<i64>,
    },
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    Found,
    NotFound,
    Completed,
}

/// Terminal outcome attached to the final snapshots of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub value: Option<i64>,
    pub label: Option<String>,
}

/// One discrete operation in an algorithm run.
///
/// The exact state effect of each variant is implemented by
/// [`crate::timeline::apply`]; the notes here describe intent only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    /// Two indices were compared. Clears all marks, then marks the pair.
    Compare {
        indices: [usize; 2],
        outcome: Option<CompareOutcome>,
    },

    /// The values at two indices were exchanged.
    Swap { indices: [usize; 2] },

    /// A single index was overwritten. `previous` preserves the old value
    /// for inspection; it has no state effect.
    Set {
        index: usize,
        value: i64,
        previous: Option<i64>,
    },

    /// Additive mark update: every listed index gets `kind`.
    Mark { indices: Vec<usize>, kind: MarkKind },

    /// Subtractive mark update: every listed index loses its mark.
    Unmark { indices: Vec<usize> },

    /// Replace the narration message. When `highlight_line` is set, the
    /// highlighted-line set becomes exactly that line.
    Message {
        text: String,
        level: Option<MessageLevel>,
        highlight_line: Option<usize>,
    },

    /// Replace the highlighted-line set wholesale.
    Highlight { lines: Vec<usize> },

    /// Set the named counter to `value`, or increment it by `delta` when
    /// `delta` is present (`value` is ignored in that case).
    Metric {
        name: String,
        value: i64,
        delta: Option<i64>,
    },

    /// Replace the pointer list and watched expression wholesale; merge
    /// `variables` into the tracked set by name.
    Pointer {
        pointers: Vec<PointerMarker>,
        variables: Vec<VariableBinding>,
        expression: Option<String>,
    },

    /// Replace the auxiliary visualization payload wholesale.
    Auxiliary { state: AuxState },

    /// Terminal outcome. At most one per run; leaves the array untouched.
    Result {
        kind: OutcomeKind,
        value: Option<i64>,
        label: Option<String>,
    },
}

impl Event {
    pub fn compare(i: usize, j: usize, outcome: CompareOutcome) -> Self {
        Event::Compare {
            indices: [i, j],
            outcome: Some(outcome),
        }
    }

    pub fn swap(i: usize, j: usize) -> Self {
        Event::Swap { indices: [i, j] }
    }

    pub fn set(index: usize, value: i64, previous: i64) -> Self {
        Event::Set {
            index,
            value,
            previous: Some(previous),
        }
    }

    pub fn mark(indices: Vec<usize>, kind: MarkKind) -> Self {
        Event::Mark { indices, kind }
    }

    pub fn unmark(indices: Vec<usize>) -> Self {
        Event::Unmark { indices }
    }

    pub fn message(text: impl Into<String>) -> Self {
        Event::Message {
            text: text.into(),
            level: None,
            highlight_line: None,
        }
    }

    /// Short name of the variant, for logs and the UI event trail.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Event::Compare { .. } => "compare",
            Event::Swap { .. } => "swap",
            Event::Set { .. } => "set",
            Event::Mark { .. } => "mark",
            Event::Unmark { .. } => "unmark",
            Event::Message { .. } => "message",
            Event::Highlight { .. } => "highlight",
            Event::Metric { .. } => "metric",
            Event::Pointer { .. } => "pointer",
            Event::Auxiliary { .. } => "auxiliary",
            Event::Result { .. } => "result",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Compare { indices, .. } => {
                write!(f, "compared [{}] and [{}]", indices[0], indices[1])
            }
            Event::Swap { indices } => {
                write!(f, "swapped [{}] and [{}]", indices[0], indices[1])
            }
            Event::Set { index, value, .. } => write!(f, "set [{}] = {}", index, value),
            Event::Mark { indices, kind } => {
                write!(f, "marked {} index(es) as {}", indices.len(), kind)
            }
            Event::Unmark { indices } => write!(f, "unmarked {} index(es)", indices.len()),
            Event::Message { text, .. } => write!(f, "message: {}", text),
            Event::Highlight { lines } => write!(f, "highlighted {} line(s)", lines.len()),
            Event::Metric { name, value, delta } => match delta {
                Some(d) => write!(f, "metric {} += {}", name, d),
                None => write!(f, "metric {} = {}", name, value),
            },
            Event::Pointer { pointers, .. } => {
                let names: Vec<&str> = pointers.iter().map(|p| p.name.as_str()).collect();
                write!(f, "pointers: {}", names.join(", "))
            }
            Event::Auxiliary { .. } => write!(f, "auxiliary state updated"),
            Event::Result { kind, value, .. } => match value {
                Some(v) => write!(f, "result: {:?} ({})", kind, v),
                None => write!(f, "result: {:?}", kind),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_kind_round_trip() {
        for kind in [
            MarkKind::Comparing,
            MarkKind::Swapping,
            MarkKind::Sorted,
            MarkKind::Visited,
            MarkKind::Pivot,
            MarkKind::Found,
            MarkKind::Minimum,
            MarkKind::Boundary,
            MarkKind::Current,
        ] {
            assert_eq!(kind.as_str().parse::<MarkKind>(), Ok(kind));
        }
        assert!("bogus".parse::<MarkKind>().is_err());
    }

    #[test]
    fn test_compare_outcome_signum() {
        assert_eq!(CompareOutcome::Less.signum(), -1);
        assert_eq!(CompareOutcome::Equal.signum(), 0);
        assert_eq!(CompareOutcome::Greater.signum(), 1);
        assert_eq!(CompareOutcome::from(std::cmp::Ordering::Less), CompareOutcome::Less);
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = Event::swap(2, 5);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"swap\""));
        assert!(json.contains("[2,5]"));
    }

    #[test]
    fn test_pointer_tint_cycles() {
        assert_eq!(PointerTint::nth(0), PointerTint::Blue);
        assert_eq!(PointerTint::nth(5), PointerTint::Blue);
        assert_eq!(PointerTint::nth(6), PointerTint::Orange);
    }
}
