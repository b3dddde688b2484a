//! Two-pointer and scanning routines over plain arrays.

use super::{Algorithm, AlgorithmInfo, Category, Complexity, Difficulty, Trace};
use crate::algo::params::ParamValues;
use crate::event::{Event, MarkKind};

// ===== Reverse =====

pub struct Reverse;

impl Algorithm for Reverse {
    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "reverse",
            name: "Reverse",
            category: Category::Arrays,
            difficulty: Difficulty::Beginner,
            complexity: Complexity {
                time_best: "O(n)",
                time_average: "O(n)",
                time_worst: "O(n)",
                space: "O(1)",
            },
        }
    }

    fn run(&self, input: &[i64], _params: &ParamValues) -> Vec<Event> {
        let mut a = input.to_vec();
        let mut t = Trace::new();
        let n = a.len();

        t.message("Swap outward pairs while the pointers walk inward");
        let mut i = 0;
        let mut j = n - 1;
        while i < j {
            t.mark(&[i, j], MarkKind::Boundary);
            t.pointers(&[("i", i), ("j", j)]);
            t.swap(&mut a, i, j);
            i += 1;
            j -= 1;
        }
        t.success("Array reversed");
        t.completed(None, "reversed");
        t.into_events()
    }
}

// ===== Maximum subarray =====

pub struct MaxSubarray;

impl Algorithm for MaxSubarray {
    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "max-subarray",
            name: "Max Subarray (Kadane)",
            category: Category::Arrays,
            difficulty: Difficulty::Advanced,
            complexity: Complexity {
                time_best: "O(n)",
                time_average: "O(n)",
                time_worst: "O(n)",
                space: "O(1)",
            },
        }
    }

    fn run(&self, input: &[i64], _params: &ParamValues) -> Vec<Event> {
        let a = input.to_vec();
        let mut t = Trace::new();
        let n = a.len();

        t.message("Extend the window while the running sum still helps");
        let mut current = a[0];
        let mut best = a[0];
        let mut window_start = 0;
        let (mut start, mut end) = (0, 0);

        t.mark_one(0, MarkKind::Current);
        t.inspect(
            &[("i", 0), ("start", 0)],
            &[("current", current), ("best", best)],
            Some("current = max(current + arr[i], arr[i])"),
        );
        t.metric("best", best);

        for i in 1..n {
            t.mark_one(i, MarkKind::Current);
            if current + a[i] < a[i] {
                t.unmark(&(window_start..i).collect::<Vec<_>>());
                t.message(format!("Running sum stopped helping, restart at {}", i));
                current = a[i];
                window_start = i;
            } else {
                current += a[i];
            }
            t.inspect(
                &[("i", i), ("start", window_start)],
                &[("current", current), ("best", best)],
                Some("current = max(current + arr[i], arr[i])"),
            );
            if current > best {
                best = current;
                start = window_start;
                end = i;
                t.mark(&(start..=end).collect::<Vec<_>>(), MarkKind::Found);
                t.message(format!("New best sum {} over [{}, {}]", best, start, end));
            }
            t.metric("best", best);
        }

        t.unmark(&(0..n).collect::<Vec<_>>());
        t.mark(&(start..=end).collect::<Vec<_>>(), MarkKind::Found);
        t.success(format!("Maximum subarray sum is {}", best));
        t.completed(Some(best), format!("[{}, {}]", start, end));
        t.into_events()
    }
}
