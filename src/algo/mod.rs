//! The contract every built-in algorithm implements, plus the catalog.
//!
//! An algorithm is a pure producer: given a validated input array and a
//! parameter map it returns the full, ordered event list of its run in one
//! call. Producers are authored against the push-style [`Trace`] buffer,
//! which pairs each array operation with the event that reports it, so the
//! working copy and the event stream cannot drift apart.
//!
//! - [`sorting`] — comparison and distribution sorts
//! - [`searching`] — linear and binary search
//! - [`arrays`] — two-pointer and scanning routines

pub mod arrays;
pub mod params;
pub mod searching;
pub mod sorting;

use crate::event::{
    AuxState, CompareOutcome, Event, MarkKind, MessageLevel, OutcomeKind, PointerMarker,
    PointerTint, VarValue, VariableBinding,
};
use params::{ParamSpec, ParamValues};
use std::cmp::Ordering;
use thiserror::Error;
use tracing::debug;

/// Inputs longer than this are rejected by validation. Keeps the
/// precomputed timeline (one snapshot per event) comfortably bounded.
pub const MAX_INPUT_LEN: usize = 64;
/// Inputs shorter than this are rejected by validation.
pub const MIN_INPUT_LEN: usize = 1;
/// Largest magnitude a value may have. Bars stay renderable and all
/// arithmetic stays far from overflow.
pub const MAX_VALUE: i64 = 999;
pub const MIN_VALUE: i64 = -999;

/// Array used when the caller does not supply one.
pub const DEMO_INPUT: &[i64] = &[5, 3, 8, 1, 9, 2, 7];

/// Why an input array was rejected before running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("input needs at least {min} value(s), got {len}")]
    TooShort { len: usize, min: usize },

    #[error("input exceeds {max} values, got {len}")]
    TooLong { len: usize, max: usize },

    #[error("value {value} at position {index} is outside {min}..={max}")]
    ValueOutOfRange {
        index: usize,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("input must be sorted in ascending order, position {index} breaks the order")]
    NotSorted { index: usize },
}

/// Shared length and range checks used by every producer's `validate`.
pub fn validate_bounds(input: &[i64]) -> Result<(), InputError> {
    if input.len() < MIN_INPUT_LEN {
        return Err(InputError::TooShort {
            len: input.len(),
            min: MIN_INPUT_LEN,
        });
    }
    if input.len() > MAX_INPUT_LEN {
        return Err(InputError::TooLong {
            len: input.len(),
            max: MAX_INPUT_LEN,
        });
    }
    for (index, &value) in input.iter().enumerate() {
        if !(MIN_VALUE..=MAX_VALUE).contains(&value) {
            return Err(InputError::ValueOutOfRange {
                index,
                value,
                min: MIN_VALUE,
                max: MAX_VALUE,
            });
        }
    }
    Ok(())
}

/// Broad grouping used by the catalog listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Sorting,
    Searching,
    Arrays,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Sorting => "sorting",
            Category::Searching => "searching",
            Category::Arrays => "arrays",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

/// Asymptotic complexity strings shown in the catalog and the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Complexity {
    pub time_best: &'static str,
    pub time_average: &'static str,
    pub time_worst: &'static str,
    pub space: &'static str,
}

/// Display metadata for one algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub difficulty: Difficulty,
    pub complexity: Complexity,
}

/// The producer contract.
///
/// `validate` must be called and must succeed before `run`; `run` may then
/// assume a well-formed input and is infallible. `run` drains eagerly: the
/// returned list is the complete, ordered record of the whole execution.
pub trait Algorithm {
    fn info(&self) -> AlgorithmInfo;

    /// Parameter declarations, empty for algorithms without knobs.
    fn params(&self) -> Vec<ParamSpec> {
        Vec::new()
    }

    /// Pure input check. The default accepts anything within the global
    /// length and value bounds.
    fn validate(&self, input: &[i64]) -> Result<(), InputError> {
        validate_bounds(input)
    }

    fn run(&self, input: &[i64], params: &ParamValues) -> Vec<Event>;
}

/// Every built-in algorithm, in catalog order.
pub fn all() -> Vec<Box<dyn Algorithm>> {
    vec![
        Box::new(sorting::BubbleSort),
        Box::new(sorting::InsertionSort),
        Box::new(sorting::SelectionSort),
        Box::new(sorting::QuickSort),
        Box::new(sorting::MergeSort),
        Box::new(sorting::HeapSort),
        Box::new(sorting::CountingSort),
        Box::new(searching::LinearSearch),
        Box::new(searching::BinarySearch),
        Box::new(arrays::Reverse),
        Box::new(arrays::MaxSubarray),
    ]
}

/// Look an algorithm up by its catalog id.
pub fn find(id: &str) -> Option<Box<dyn Algorithm>> {
    all().into_iter().find(|algo| algo.info().id == id)
}

/// Push-style event buffer that producers are written against.
///
/// The array-touching helpers (`compare`, `swap`, `set`) perform the
/// operation on the producer's working copy and record the matching event
/// in one step.
#[derive(Debug, Default)]
pub struct Trace {
    events: Vec<Event>,
}

impl Trace {
    pub fn new() -> Self {
        Trace::default()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Finish the run and hand the drained event list to the caller.
    pub fn into_events(self) -> Vec<Event> {
        debug!(events = self.events.len(), "trace drained");
        self.events
    }

    /// Compare two positions of the working array, recording the outcome.
    pub fn compare(&mut self, a: &[i64], i: usize, j: usize) -> Ordering {
        let ord = a[i].cmp(&a[j]);
        self.push(Event::compare(i, j, CompareOutcome::from(ord)));
        ord
    }

    /// Exchange two positions of the working array.
    pub fn swap(&mut self, a: &mut [i64], i: usize, j: usize) {
        a.swap(i, j);
        self.push(Event::swap(i, j));
    }

    /// Overwrite one position of the working array.
    pub fn set(&mut self, a: &mut [i64], index: usize, value: i64) {
        let previous = a[index];
        a[index] = value;
        self.push(Event::set(index, value, previous));
    }

    pub fn mark(&mut self, indices: &[usize], kind: MarkKind) {
        self.push(Event::mark(indices.to_vec(), kind));
    }

    pub fn mark_one(&mut self, index: usize, kind: MarkKind) {
        self.push(Event::mark(vec![index], kind));
    }

    pub fn unmark(&mut self, indices: &[usize]) {
        self.push(Event::unmark(indices.to_vec()));
    }

    pub fn message(&mut self, text: impl Into<String>) {
        self.push(Event::message(text));
    }

    /// Narration message with the success level, for completed milestones.
    pub fn success(&mut self, text: impl Into<String>) {
        self.push(Event::Message {
            text: text.into(),
            level: Some(MessageLevel::Success),
            highlight_line: None,
        });
    }

    pub fn metric(&mut self, name: &str, value: i64) {
        self.push(Event::Metric {
            name: name.to_string(),
            value,
            delta: None,
        });
    }

    pub fn metric_add(&mut self, name: &str, delta: i64) {
        self.push(Event::Metric {
            name: name.to_string(),
            value: 0,
            delta: Some(delta),
        });
    }

    /// Replace the pointer set. Tints are assigned by position so adjacent
    /// pointers stay visually distinct.
    pub fn pointers(&mut self, ptrs: &[(&str, usize)]) {
        self.inspect(ptrs, &[], None);
    }

    /// Replace the pointer set and upsert tracked variables.
    pub fn pointers_with_vars(&mut self, ptrs: &[(&str, usize)], vars: &[(&str, i64)]) {
        self.inspect(ptrs, vars, None);
    }

    /// Full inspection update: pointers, variables, and the watched
    /// expression in one event.
    pub fn inspect(&mut self, ptrs: &[(&str, usize)], vars: &[(&str, i64)], expr: Option<&str>) {
        let pointers = ptrs
            .iter()
            .enumerate()
            .map(|(n, (name, index))| PointerMarker {
                name: (*name).to_string(),
                index: *index,
                tint: PointerTint::nth(n),
            })
            .collect();
        let variables = vars
            .iter()
            .map(|(name, value)| VariableBinding {
                name: (*name).to_string(),
                value: VarValue::Int(*value),
            })
            .collect();
        self.push(Event::Pointer {
            pointers,
            variables,
            expression: expr.map(|e| e.to_string()),
        });
    }

    pub fn aux(&mut self, state: AuxState) {
        self.push(Event::Auxiliary { state });
    }

    pub fn found(&mut self, value: i64, label: impl Into<String>) {
        self.push(Event::Result {
            kind: OutcomeKind::Found,
            value: Some(value),
            label: Some(label.into()),
        });
    }

    pub fn not_found(&mut self, label: impl Into<String>) {
        self.push(Event::Result {
            kind: OutcomeKind::NotFound,
            value: None,
            label: Some(label.into()),
        });
    }

    pub fn completed(&mut self, value: Option<i64>, label: impl Into<String>) {
        self.push(Event::Result {
            kind: OutcomeKind::Completed,
            value,
            label: Some(label.into()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_bounds_rejects_extremes() {
        assert_eq!(
            validate_bounds(&[]),
            Err(InputError::TooShort { len: 0, min: 1 })
        );
        let long = vec![1; MAX_INPUT_LEN + 1];
        assert!(matches!(
            validate_bounds(&long),
            Err(InputError::TooLong { .. })
        ));
        assert!(matches!(
            validate_bounds(&[0, 1000]),
            Err(InputError::ValueOutOfRange { index: 1, .. })
        ));
        assert!(validate_bounds(DEMO_INPUT).is_ok());
    }

    #[test]
    fn test_registry_ids_are_unique_and_findable() {
        let algos = all();
        for algo in &algos {
            let id = algo.info().id;
            assert!(find(id).is_some(), "id {} should resolve", id);
            assert_eq!(
                algos.iter().filter(|a| a.info().id == id).count(),
                1,
                "id {} must be unique",
                id
            );
        }
    }

    #[test]
    fn test_trace_pairs_operations_with_events() {
        let mut a = vec![3, 1];
        let mut t = Trace::new();
        assert_eq!(t.compare(&a, 0, 1), Ordering::Greater);
        t.swap(&mut a, 0, 1);
        t.set(&mut a, 0, 9);

        assert_eq!(a, vec![9, 3]);
        let events = t.into_events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], Event::Compare { .. }));
        assert!(matches!(events[1], Event::Swap { indices: [0, 1] }));
        assert!(matches!(
            events[2],
            Event::Set {
                index: 0,
                value: 9,
                previous: Some(1),
            }
        ));
    }
}
