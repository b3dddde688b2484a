//! Linear and binary search.
//!
//! Searches never touch the array, so their runs are all narration: probe
//! marks, pointer moves, and a terminal result event.

use super::{
    validate_bounds, Algorithm, AlgorithmInfo, Category, Complexity, Difficulty, InputError, Trace,
    MAX_VALUE, MIN_VALUE,
};
use crate::algo::params::{ParamSpec, ParamValues};
use crate::event::{Event, MarkKind, MessageLevel};

fn target_param() -> ParamSpec {
    ParamSpec::Number {
        id: "target",
        label: "Target value",
        default: 5,
        min: MIN_VALUE,
        max: MAX_VALUE,
        step: 1,
    }
}

fn missing(t: &mut Trace, target: i64) {
    t.push(Event::Message {
        text: format!("{} is not in the array", target),
        level: Some(MessageLevel::Warning),
        highlight_line: None,
    });
    t.not_found(format!("{} absent", target));
}

// ===== Linear search =====

pub struct LinearSearch;

impl Algorithm for LinearSearch {
    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "linear-search",
            name: "Linear Search",
            category: Category::Searching,
            difficulty: Difficulty::Beginner,
            complexity: Complexity {
                time_best: "O(1)",
                time_average: "O(n)",
                time_worst: "O(n)",
                space: "O(1)",
            },
        }
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![target_param()]
    }

    fn run(&self, input: &[i64], params: &ParamValues) -> Vec<Event> {
        let a = input.to_vec();
        let mut t = Trace::new();
        let target = params.number_or("target", 5);

        t.message(format!("Scan left to right looking for {}", target));
        for i in 0..a.len() {
            t.mark_one(i, MarkKind::Current);
            t.pointers_with_vars(&[("i", i)], &[("target", target)]);
            t.metric_add("probes", 1);
            if a[i] == target {
                t.mark_one(i, MarkKind::Found);
                t.success(format!("Found {} at position {}", target, i));
                t.found(i as i64, format!("index {}", i));
                return t.into_events();
            }
            t.mark_one(i, MarkKind::Visited);
        }
        missing(&mut t, target);
        t.into_events()
    }
}

// ===== Binary search =====

pub struct BinarySearch;

impl Algorithm for BinarySearch {
    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "binary-search",
            name: "Binary Search",
            category: Category::Searching,
            difficulty: Difficulty::Intermediate,
            complexity: Complexity {
                time_best: "O(1)",
                time_average: "O(log n)",
                time_worst: "O(log n)",
                space: "O(1)",
            },
        }
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![target_param()]
    }

    /// Binary search additionally requires ascending order.
    fn validate(&self, input: &[i64]) -> Result<(), InputError> {
        validate_bounds(input)?;
        for index in 1..input.len() {
            if input[index - 1] > input[index] {
                return Err(InputError::NotSorted { index });
            }
        }
        Ok(())
    }

    fn run(&self, input: &[i64], params: &ParamValues) -> Vec<Event> {
        let a = input.to_vec();
        let mut t = Trace::new();
        let target = params.number_or("target", 5);

        t.message(format!("Bisect the sorted range looking for {}", target));
        let mut lo: i64 = 0;
        let mut hi: i64 = a.len() as i64 - 1;
        while lo <= hi {
            let mid = lo + (hi - lo) / 2;
            let (l, m, h) = (lo as usize, mid as usize, hi as usize);
            t.mark_one(m, MarkKind::Current);
            t.inspect(
                &[("lo", l), ("mid", m), ("hi", h)],
                &[("target", target)],
                Some("arr[mid] vs target"),
            );
            t.metric_add("probes", 1);
            if a[m] == target {
                t.mark_one(m, MarkKind::Found);
                t.success(format!("Found {} at position {}", target, m));
                t.found(m as i64, format!("index {}", m));
                return t.into_events();
            }
            if a[m] < target {
                t.message(format!("{} < {}, discard the left half", a[m], target));
                t.mark(&(l..=m).collect::<Vec<_>>(), MarkKind::Visited);
                lo = mid + 1;
            } else {
                t.message(format!("{} > {}, discard the right half", a[m], target));
                t.mark(&(m..=h).collect::<Vec<_>>(), MarkKind::Visited);
                hi = mid - 1;
            }
        }
        missing(&mut t, target);
        t.into_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::params::ParamValue;
    use crate::event::OutcomeKind;

    fn with_target(target: i64) -> ParamValues {
        let mut params = ParamValues::new();
        params.set("target", ParamValue::Number(target));
        params
    }

    fn final_result(events: &[Event]) -> Option<(OutcomeKind, Option<i64>)> {
        match events.last() {
            Some(Event::Result { kind, value, .. }) => Some((*kind, *value)),
            _ => None,
        }
    }

    #[test]
    fn test_linear_search_reports_first_match() {
        let events = LinearSearch.run(&[4, 7, 7, 2], &with_target(7));
        assert_eq!(
            final_result(&events),
            Some((OutcomeKind::Found, Some(1))),
            "first occurrence wins"
        );
    }

    #[test]
    fn test_linear_search_misses_with_not_found() {
        let events = LinearSearch.run(&[4, 7, 2], &with_target(9));
        assert_eq!(final_result(&events), Some((OutcomeKind::NotFound, None)));
    }

    #[test]
    fn test_binary_search_finds_the_midpoint_target() {
        let events = BinarySearch.run(&[1, 3, 5, 7], &with_target(5));
        assert_eq!(final_result(&events), Some((OutcomeKind::Found, Some(2))));
    }

    #[test]
    fn test_binary_search_handles_edges_and_misses() {
        let input = [2, 4, 6, 8, 10];
        assert_eq!(
            final_result(&BinarySearch.run(&input, &with_target(2))),
            Some((OutcomeKind::Found, Some(0)))
        );
        assert_eq!(
            final_result(&BinarySearch.run(&input, &with_target(10))),
            Some((OutcomeKind::Found, Some(4)))
        );
        assert_eq!(
            final_result(&BinarySearch.run(&input, &with_target(5))),
            Some((OutcomeKind::NotFound, None))
        );
        assert_eq!(
            final_result(&BinarySearch.run(&input, &with_target(1))),
            Some((OutcomeKind::NotFound, None))
        );
    }

    #[test]
    fn test_binary_search_rejects_unsorted_input() {
        assert_eq!(
            BinarySearch.validate(&[3, 1, 2]),
            Err(InputError::NotSorted { index: 1 })
        );
        assert!(BinarySearch.validate(&[1, 1, 2]).is_ok());
    }

    #[test]
    fn test_searches_emit_no_array_mutations() {
        for events in [
            LinearSearch.run(&[1, 2, 3], &with_target(2)),
            BinarySearch.run(&[1, 2, 3], &with_target(2)),
        ] {
            assert!(events
                .iter()
                .all(|e| !matches!(e, Event::Swap { .. } | Event::Set { .. })));
        }
    }
}
