//! Property-based tests for the snapshot reducer.
//!
//! The reducer must stay total over arbitrary events, including events
//! whose indices point outside the array, and a built timeline must agree
//! with a manual fold of the same event list.

use algotty::event::{
    CompareOutcome, Event, MarkKind, Outcome, OutcomeKind, PointerMarker, PointerTint, VarValue,
    VariableBinding,
};
use algotty::timeline::{apply, Snapshot, Timeline};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn reducer_config() -> Config {
    Config {
        cases: 128,
        ..Config::default()
    }
}

// ============================================================================
// Strategies
// ============================================================================

fn array_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-999..=999i64, 1..=16)
}

fn mark_kind_strategy() -> impl Strategy<Value = MarkKind> {
    prop_oneof![
        Just(MarkKind::Comparing),
        Just(MarkKind::Swapping),
        Just(MarkKind::Sorted),
        Just(MarkKind::Visited),
        Just(MarkKind::Pivot),
        Just(MarkKind::Found),
        Just(MarkKind::Minimum),
        Just(MarkKind::Boundary),
        Just(MarkKind::Current),
    ]
}

fn outcome_kind_strategy() -> impl Strategy<Value = OutcomeKind> {
    prop_oneof![
        Just(OutcomeKind::Found),
        Just(OutcomeKind::NotFound),
        Just(OutcomeKind::Completed),
    ]
}

fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("probes".to_string()),
        Just("writes".to_string()),
        Just("depth".to_string()),
        Just("passes".to_string()),
    ]
}

/// Arbitrary events. Indices run past the longest generated array on
/// purpose, so out-of-range handling is always exercised.
fn event_strategy() -> impl Strategy<Value = Event> {
    prop_oneof![
        (0..24usize, 0..24usize)
            .prop_map(|(i, j)| Event::compare(i, j, CompareOutcome::from(i.cmp(&j)))),
        (0..24usize, 0..24usize).prop_map(|(i, j)| Event::swap(i, j)),
        (0..24usize, -999..=999i64).prop_map(|(index, value)| Event::Set {
            index,
            value,
            previous: None,
        }),
        (prop::collection::vec(0..24usize, 0..4), mark_kind_strategy())
            .prop_map(|(indices, kind)| Event::mark(indices, kind)),
        prop::collection::vec(0..24usize, 0..4).prop_map(Event::unmark),
        (name_strategy(), proptest::option::of(0..40usize)).prop_map(|(text, line)| {
            Event::Message {
                text,
                level: None,
                highlight_line: line,
            }
        }),
        prop::collection::vec(0..40usize, 0..6).prop_map(|lines| Event::Highlight { lines }),
        (name_strategy(), -99..=99i64, proptest::option::of(-9..=9i64))
            .prop_map(|(name, value, delta)| Event::Metric { name, value, delta }),
        (0..24usize, name_strategy()).prop_map(|(index, name)| Event::Pointer {
            pointers: vec![PointerMarker {
                name: name.clone(),
                index,
                tint: PointerTint::Blue,
            }],
            variables: vec![VariableBinding {
                name,
                value: VarValue::Int(index as i64),
            }],
            expression: None,
        }),
        (outcome_kind_strategy(), proptest::option::of(-999..=999i64))
            .prop_map(|(kind, value)| Event::Result {
                kind,
                value,
                label: None,
            }),
    ]
}

fn fold(input: &[i64], events: &[Event]) -> Snapshot {
    let mut state = Snapshot::initial(input);
    for event in events {
        state = apply(&state, event);
    }
    state
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(reducer_config())]

    #[test]
    fn prop_apply_never_changes_array_length(
        input in array_strategy(),
        event in event_strategy(),
    ) {
        let first = Snapshot::initial(&input);
        let next = apply(&first, &event);
        prop_assert_eq!(next.array.len(), input.len());
    }

    #[test]
    fn prop_only_swap_and_set_touch_the_array(
        input in array_strategy(),
        event in event_strategy(),
    ) {
        let first = Snapshot::initial(&input);
        let next = apply(&first, &event);
        if !matches!(event, Event::Swap { .. } | Event::Set { .. }) {
            prop_assert_eq!(&next.array, &first.array);
        }
    }

    #[test]
    fn prop_timeline_has_one_snapshot_per_prefix(
        input in array_strategy(),
        events in prop::collection::vec(event_strategy(), 0..32),
    ) {
        let timeline = Timeline::build(&input, events.clone());
        prop_assert_eq!(timeline.len(), events.len() + 1);
        for k in 0..timeline.len() {
            prop_assert_eq!(timeline.get(k).map(|s| s.step), Some(k));
        }
        prop_assert!(timeline.get(timeline.len()).is_none());
    }

    #[test]
    fn prop_snapshots_match_a_manual_fold(
        input in array_strategy(),
        events in prop::collection::vec(event_strategy(), 0..32),
    ) {
        let timeline = Timeline::build(&input, events.clone());
        let mut state = Snapshot::initial(&input);
        prop_assert_eq!(timeline.get(0), Some(&state));
        for (k, event) in events.iter().enumerate() {
            state = apply(&state, event);
            prop_assert_eq!(timeline.get(k + 1), Some(&state));
        }
    }

    #[test]
    fn prop_marks_stay_inside_the_array(
        input in array_strategy(),
        events in prop::collection::vec(event_strategy(), 0..32),
    ) {
        let timeline = Timeline::build(&input, events);
        for k in 0..timeline.len() {
            let snapshot = timeline.get(k).expect("index in range");
            prop_assert!(snapshot.marks.keys().all(|&i| i < snapshot.array.len()));
        }
    }

    #[test]
    fn prop_compare_leaves_only_the_pair_marked(
        input in array_strategy(),
        events in prop::collection::vec(event_strategy(), 0..16),
        i in 0..24usize,
        j in 0..24usize,
    ) {
        let state = fold(&input, &events);
        let next = apply(&state, &Event::compare(i, j, CompareOutcome::from(i.cmp(&j))));
        prop_assert!(next.marks.len() <= 2);
        prop_assert!(next.marks.keys().all(|&k| k == i || k == j));
        prop_assert!(next.marks.values().all(|&kind| kind == MarkKind::Comparing));
    }

    #[test]
    fn prop_highlighted_lines_stay_sorted_and_unique(
        input in array_strategy(),
        events in prop::collection::vec(event_strategy(), 0..32),
    ) {
        let timeline = Timeline::build(&input, events);
        for k in 0..timeline.len() {
            let highlighted = &timeline.get(k).expect("index in range").highlighted;
            prop_assert!(highlighted.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn prop_message_line_focuses_the_highlight(
        input in array_strategy(),
        events in prop::collection::vec(event_strategy(), 0..16),
        line in 0..40usize,
    ) {
        let state = fold(&input, &events);
        let next = apply(&state, &Event::Message {
            text: "look here".to_string(),
            level: None,
            highlight_line: Some(line),
        });
        prop_assert_eq!(&next.highlighted, &vec![line]);
    }

    #[test]
    fn prop_result_preserves_the_array(
        input in array_strategy(),
        events in prop::collection::vec(event_strategy(), 0..16),
        kind in outcome_kind_strategy(),
        value in proptest::option::of(-999..=999i64),
    ) {
        let state = fold(&input, &events);
        let next = apply(&state, &Event::Result { kind, value, label: None });
        prop_assert_eq!(&next.array, &state.array);
        prop_assert_eq!(&next.outcome, &Some(Outcome { kind, value, label: None }));
    }

    #[test]
    fn prop_tracked_variables_never_disappear(
        input in array_strategy(),
        events in prop::collection::vec(event_strategy(), 0..32),
    ) {
        let timeline = Timeline::build(&input, events);
        for k in 1..timeline.len() {
            let prev = timeline.get(k - 1).expect("index in range");
            let next = timeline.get(k).expect("index in range");
            for name in prev.variables.keys() {
                prop_assert!(next.variables.contains_key(name));
            }
        }
    }

    #[test]
    fn prop_swap_is_an_involution_on_values(
        input in array_strategy(),
        i in 0..24usize,
        j in 0..24usize,
    ) {
        let first = Snapshot::initial(&input);
        let swap = Event::swap(i, j);
        let twice = apply(&apply(&first, &swap), &swap);
        prop_assert_eq!(&twice.array, &first.array);
    }

    #[test]
    fn prop_disjoint_marks_commute(
        input in array_strategy(),
        evens in prop::collection::vec(0..12usize, 0..4),
        odds in prop::collection::vec(0..12usize, 0..4),
        kind_a in mark_kind_strategy(),
        kind_b in mark_kind_strategy(),
    ) {
        // Disjoint by construction: one event marks even indices, the other odd
        let a = Event::mark(evens.iter().map(|i| i * 2).collect(), kind_a);
        let b = Event::mark(odds.iter().map(|i| i * 2 + 1).collect(), kind_b);
        let first = Snapshot::initial(&input);
        let ab = apply(&apply(&first, &a), &b);
        let ba = apply(&apply(&first, &b), &a);
        prop_assert_eq!(&ab, &ba);
    }

    #[test]
    fn prop_overlapping_marks_take_the_last_write(
        input in array_strategy(),
        raw in 0..24usize,
        kind_a in mark_kind_strategy(),
        kind_b in mark_kind_strategy(),
    ) {
        let i = raw % input.len();
        let first = Snapshot::initial(&input);
        let next = apply(
            &apply(&first, &Event::mark(vec![i], kind_a)),
            &Event::mark(vec![i], kind_b),
        );
        prop_assert_eq!(next.marks.get(&i).copied(), Some(kind_b));
    }

    #[test]
    fn prop_metric_deltas_accumulate(
        input in array_strategy(),
        name in name_strategy(),
        deltas in prop::collection::vec(-9..=9i64, 1..8),
    ) {
        let mut state = Snapshot::initial(&input);
        for &delta in &deltas {
            state = apply(&state, &Event::Metric {
                name: name.clone(),
                value: 0,
                delta: Some(delta),
            });
        }
        prop_assert_eq!(
            state.metrics.get(&name).copied(),
            Some(deltas.iter().sum::<i64>())
        );
    }
}
