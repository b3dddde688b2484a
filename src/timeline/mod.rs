//! Snapshot timeline: the event-sourced heart of playback.
//!
//! A run is replayed by folding its event list with the pure reducer
//! [`apply`], producing one [`Snapshot`] per prefix of the event stream
//! (plus the initial state). With the whole timeline precomputed, every
//! playback operation, including seeking backward, is an O(1) index into
//! [`Timeline::snapshots`]. Nothing is ever re-run and nothing is inverted.

use crate::event::{AuxState, Event, MarkKind, MessageLevel, Outcome, PointerMarker, VarValue};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Reducer-owned counter names. These two are maintained by [`apply`]
/// itself; explicit metric events may add further counters but never need
/// to touch these.
pub const METRIC_COMPARISONS: &str = "comparisons";
pub const METRIC_SWAPS: &str = "swaps";

/// Message shown before any event has been applied.
const READY_MESSAGE: &str = "Ready";

/// Complete derived state after a prefix of the event stream.
///
/// Snapshots are immutable once built; the playback controller only ever
/// moves an index between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// How many events produced this state. The initial snapshot is step 0.
    pub step: usize,
    /// Current values of the visualized array.
    pub array: Vec<i64>,
    /// Active visual mark per index. Last write wins on overlap.
    pub marks: FxHashMap<usize, MarkKind>,
    /// Current narration message.
    pub message: String,
    pub message_level: Option<MessageLevel>,
    /// Highlighted source lines, kept sorted and deduplicated.
    pub highlighted: Vec<usize>,
    /// Named counters in insertion order.
    pub metrics: IndexMap<String, i64>,
    /// Active pointer markers, replaced wholesale by pointer events.
    pub pointers: Vec<PointerMarker>,
    /// Tracked variables in insertion order. Names only ever accumulate
    /// within a run; values are upserted by name.
    pub variables: IndexMap<String, VarValue>,
    /// Watched expression, replaced wholesale by pointer events.
    pub expression: Option<String>,
    /// Current auxiliary visualization payload.
    pub aux: Option<AuxState>,
    /// Terminal outcome, set by the result event.
    pub outcome: Option<Outcome>,
}

impl Snapshot {
    /// State before anything has happened: the raw input and nothing else.
    pub fn initial(input: &[i64]) -> Self {
        Snapshot {
            step: 0,
            array: input.to_vec(),
            marks: FxHashMap::default(),
            message: READY_MESSAGE.to_string(),
            message_level: None,
            highlighted: Vec::new(),
            metrics: IndexMap::new(),
            pointers: Vec::new(),
            variables: IndexMap::new(),
            expression: None,
            aux: None,
            outcome: None,
        }
    }
}

/// Apply one event to a snapshot, producing the next snapshot.
///
/// This is a pure function: the inputs are never mutated and the same
/// arguments always produce the same result. It is also total; events that
/// reference indices outside the array leave the array untouched instead
/// of panicking.
pub fn apply(prev: &Snapshot, event: &Event) -> Snapshot {
    let mut next = prev.clone();
    next.step = prev.step + 1;

    match event {
        Event::Compare { indices, .. } => {
            next.marks.clear();
            for &i in indices {
                if i < next.array.len() {
                    next.marks.insert(i, MarkKind::Comparing);
                }
            }
            *next.metrics.entry(METRIC_COMPARISONS.to_string()).or_insert(0) += 1;
        }

        Event::Swap { indices } => {
            let [i, j] = *indices;
            if i < next.array.len() && j < next.array.len() {
                next.array.swap(i, j);
            }
            next.marks.clear();
            for &k in indices {
                if k < next.array.len() {
                    next.marks.insert(k, MarkKind::Swapping);
                }
            }
            *next.metrics.entry(METRIC_SWAPS.to_string()).or_insert(0) += 1;
        }

        Event::Set { index, value, .. } => {
            if let Some(slot) = next.array.get_mut(*index) {
                *slot = *value;
            }
        }

        Event::Mark { indices, kind } => {
            for &i in indices {
                if i < next.array.len() {
                    next.marks.insert(i, *kind);
                }
            }
        }

        Event::Unmark { indices } => {
            for i in indices {
                next.marks.remove(i);
            }
        }

        Event::Message {
            text,
            level,
            highlight_line,
        } => {
            next.message = text.clone();
            next.message_level = *level;
            if let Some(line) = highlight_line {
                next.highlighted = vec![*line];
            }
        }

        Event::Highlight { lines } => {
            let mut set = lines.clone();
            set.sort_unstable();
            set.dedup();
            next.highlighted = set;
        }

        Event::Metric { name, value, delta } => match delta {
            Some(d) => {
                *next.metrics.entry(name.clone()).or_insert(0) += d;
            }
            None => {
                next.metrics.insert(name.clone(), *value);
            }
        },

        Event::Pointer {
            pointers,
            variables,
            expression,
        } => {
            next.pointers = pointers.clone();
            next.expression = expression.clone();
            for binding in variables {
                next.variables
                    .insert(binding.name.clone(), binding.value.clone());
            }
        }

        Event::Auxiliary { state } => {
            next.aux = Some(state.clone());
        }

        Event::Result { kind, value, label } => {
            next.outcome = Some(Outcome {
                kind: *kind,
                value: *value,
                label: label.clone(),
            });
        }
    }

    next
}

/// The fully materialized history of one run.
///
/// Always holds exactly `events.len() + 1` snapshots: index 0 is the
/// initial state and index `i + 1` is the state after `events[i]`.
#[derive(Debug, Clone)]
pub struct Timeline {
    snapshots: Vec<Snapshot>,
    events: Vec<Event>,
}

impl Timeline {
    /// Fold the reducer over the whole event list up front.
    pub fn build(input: &[i64], events: Vec<Event>) -> Self {
        let mut snapshots = Vec::with_capacity(events.len() + 1);
        snapshots.push(Snapshot::initial(input));
        for event in &events {
            let next = apply(&snapshots[snapshots.len() - 1], event);
            snapshots.push(next);
        }
        debug!(
            events = events.len(),
            snapshots = snapshots.len(),
            "timeline built"
        );
        Timeline { snapshots, events }
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Final snapshot of the run. A timeline always holds at least the
    /// initial snapshot, so this never fails.
    pub fn last(&self) -> &Snapshot {
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Number of snapshots (always events + 1).
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Largest valid snapshot index.
    pub fn last_index(&self) -> usize {
        self.snapshots.len() - 1
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The event whose application produced snapshot `index`, if any.
    /// Snapshot 0 has no leading event.
    pub fn event_leading_to(&self, index: usize) -> Option<&Event> {
        if index == 0 {
            None
        } else {
            self.events.get(index - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{CompareOutcome, PointerTint, VariableBinding};

    #[test]
    fn test_initial_snapshot_is_pristine() {
        let snap = Snapshot::initial(&[3, 1, 2]);
        assert_eq!(snap.step, 0);
        assert_eq!(snap.array, vec![3, 1, 2]);
        assert!(snap.marks.is_empty());
        assert_eq!(snap.message, "Ready");
        assert!(snap.metrics.is_empty());
        assert!(snap.pointers.is_empty());
        assert!(snap.variables.is_empty());
        assert!(snap.aux.is_none());
        assert!(snap.outcome.is_none());
    }

    #[test]
    fn test_compare_clears_marks_and_counts() {
        let snap = Snapshot::initial(&[3, 1, 2]);
        let marked = apply(&snap, &Event::mark(vec![0, 1, 2], MarkKind::Sorted));
        assert_eq!(marked.marks.len(), 3);

        let compared = apply(&marked, &Event::compare(0, 1, CompareOutcome::Greater));
        assert_eq!(compared.marks.len(), 2);
        assert_eq!(compared.marks.get(&0), Some(&MarkKind::Comparing));
        assert_eq!(compared.marks.get(&1), Some(&MarkKind::Comparing));
        assert_eq!(compared.metrics.get(METRIC_COMPARISONS), Some(&1));
    }

    #[test]
    fn test_swap_exchanges_values() {
        let snap = Snapshot::initial(&[3, 1, 2]);
        let next = apply(&snap, &Event::swap(0, 2));
        assert_eq!(next.array, vec![2, 1, 3]);
        assert_eq!(next.marks.get(&0), Some(&MarkKind::Swapping));
        assert_eq!(next.metrics.get(METRIC_SWAPS), Some(&1));
    }

    #[test]
    fn test_out_of_bounds_set_is_ignored() {
        let snap = Snapshot::initial(&[3, 1, 2]);
        let next = apply(&snap, &Event::set(99, 7, 0));
        assert_eq!(next.array, vec![3, 1, 2]);
        assert_eq!(next.step, 1);
    }

    #[test]
    fn test_message_with_highlight_line_replaces_line_set() {
        let snap = Snapshot::initial(&[1]);
        let lit = apply(
            &snap,
            &Event::Highlight {
                lines: vec![4, 2, 2],
            },
        );
        assert_eq!(lit.highlighted, vec![2, 4]);

        let messaged = apply(
            &lit,
            &Event::Message {
                text: "checking".to_string(),
                level: None,
                highlight_line: Some(7),
            },
        );
        assert_eq!(messaged.highlighted, vec![7]);
        assert_eq!(messaged.message, "checking");
    }

    #[test]
    fn test_pointer_merges_variables_but_replaces_pointers() {
        let snap = Snapshot::initial(&[1, 2, 3]);
        let first = apply(
            &snap,
            &Event::Pointer {
                pointers: vec![PointerMarker {
                    name: "i".to_string(),
                    index: 0,
                    tint: PointerTint::Blue,
                }],
                variables: vec![VariableBinding {
                    name: "best".to_string(),
                    value: VarValue::Int(1),
                }],
                expression: None,
            },
        );
        assert_eq!(first.pointers.len(), 1);
        assert_eq!(first.variables.get("best"), Some(&VarValue::Int(1)));

        let second = apply(
            &first,
            &Event::Pointer {
                pointers: vec![PointerMarker {
                    name: "j".to_string(),
                    index: 2,
                    tint: PointerTint::Orange,
                }],
                variables: vec![VariableBinding {
                    name: "sum".to_string(),
                    value: VarValue::Int(6),
                }],
                expression: Some("sum / 2".to_string()),
            },
        );
        // Pointer list replaced wholesale, variables accumulated by name.
        assert_eq!(second.pointers.len(), 1);
        assert_eq!(second.pointers[0].name, "j");
        assert_eq!(second.variables.len(), 2);
        assert_eq!(second.variables.get("best"), Some(&VarValue::Int(1)));
        assert_eq!(second.expression.as_deref(), Some("sum / 2"));
    }

    #[test]
    fn test_timeline_length_invariant() {
        let events = vec![
            Event::compare(0, 1, CompareOutcome::Greater),
            Event::swap(0, 1),
            Event::message("done"),
        ];
        let timeline = Timeline::build(&[2, 1], events);
        assert_eq!(timeline.len(), 4);
        assert_eq!(timeline.last_index(), 3);
        assert_eq!(timeline.last().array, vec![1, 2]);
        assert!(timeline.event_leading_to(0).is_none());
        assert_eq!(
            timeline.event_leading_to(2),
            Some(&Event::swap(0, 1))
        );
    }
}
