//! Comparison and distribution sorts.
//!
//! Every producer works on a private copy of the input and narrates each
//! array operation through its [`Trace`], so replaying the events over the
//! original input reconstructs the run exactly.

use super::{
    validate_bounds, Algorithm, AlgorithmInfo, Category, Complexity, Difficulty, InputError, Trace,
};
use crate::algo::params::{ParamSpec, ParamValues};
use crate::event::{AuxState, Bucket, Event, MarkKind};
use std::cmp::Ordering;

/// Largest value counting sort accepts. Keeps the bucket panel readable.
pub const COUNTING_CEILING: i64 = 20;

fn all_indices(n: usize) -> Vec<usize> {
    (0..n).collect()
}

// ===== Bubble sort =====

pub struct BubbleSort;

impl Algorithm for BubbleSort {
    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "bubble-sort",
            name: "Bubble Sort",
            category: Category::Sorting,
            difficulty: Difficulty::Beginner,
            complexity: Complexity {
                time_best: "O(n)",
                time_average: "O(n²)",
                time_worst: "O(n²)",
                space: "O(1)",
            },
        }
    }

    fn run(&self, input: &[i64], _params: &ParamValues) -> Vec<Event> {
        let mut a = input.to_vec();
        let mut t = Trace::new();
        let n = a.len();

        t.message("Bubble the largest remaining value to the end of each pass");
        for end in (1..n).rev() {
            t.metric_add("passes", 1);
            t.pointers(&[("end", end)]);
            let mut swapped = false;
            for i in 0..end {
                if t.compare(&a, i, i + 1) == Ordering::Greater {
                    t.swap(&mut a, i, i + 1);
                    swapped = true;
                }
            }
            t.mark_one(end, MarkKind::Sorted);
            if !swapped {
                t.message("No swaps in this pass, the prefix is already in order");
                break;
            }
        }
        t.mark(&all_indices(n), MarkKind::Sorted);
        t.success("Array sorted");
        t.completed(None, "sorted");
        t.into_events()
    }
}

// ===== Insertion sort =====

pub struct InsertionSort;

impl Algorithm for InsertionSort {
    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "insertion-sort",
            name: "Insertion Sort",
            category: Category::Sorting,
            difficulty: Difficulty::Beginner,
            complexity: Complexity {
                time_best: "O(n)",
                time_average: "O(n²)",
                time_worst: "O(n²)",
                space: "O(1)",
            },
        }
    }

    fn run(&self, input: &[i64], _params: &ParamValues) -> Vec<Event> {
        let mut a = input.to_vec();
        let mut t = Trace::new();
        let n = a.len();

        t.message("Grow a sorted prefix, sinking each new value into place");
        for i in 1..n {
            t.mark_one(i, MarkKind::Current);
            t.pointers(&[("i", i)]);
            let mut j = i;
            while j > 0 && t.compare(&a, j - 1, j) == Ordering::Greater {
                t.swap(&mut a, j - 1, j);
                t.metric_add("shifts", 1);
                j -= 1;
            }
        }
        t.mark(&all_indices(n), MarkKind::Sorted);
        t.success("Array sorted");
        t.completed(None, "sorted");
        t.into_events()
    }
}

// ===== Selection sort =====

pub struct SelectionSort;

impl Algorithm for SelectionSort {
    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "selection-sort",
            name: "Selection Sort",
            category: Category::Sorting,
            difficulty: Difficulty::Beginner,
            complexity: Complexity {
                time_best: "O(n²)",
                time_average: "O(n²)",
                time_worst: "O(n²)",
                space: "O(1)",
            },
        }
    }

    fn run(&self, input: &[i64], _params: &ParamValues) -> Vec<Event> {
        let mut a = input.to_vec();
        let mut t = Trace::new();
        let n = a.len();

        t.message("Select the minimum of the unsorted suffix each round");
        for i in 0..n.saturating_sub(1) {
            let mut min = i;
            t.mark_one(min, MarkKind::Minimum);
            t.pointers(&[("i", i), ("min", min)]);
            for j in i + 1..n {
                if t.compare(&a, j, min) == Ordering::Less {
                    min = j;
                    t.mark_one(min, MarkKind::Minimum);
                    t.pointers(&[("i", i), ("min", min)]);
                }
            }
            if min != i {
                t.swap(&mut a, i, min);
            }
            t.mark_one(i, MarkKind::Sorted);
        }
        t.mark(&all_indices(n), MarkKind::Sorted);
        t.success("Array sorted");
        t.completed(None, "sorted");
        t.into_events()
    }
}

// ===== Quick sort =====

#[derive(Clone, Copy)]
enum PivotChoice {
    First,
    Middle,
    Last,
}

impl PivotChoice {
    fn parse(s: &str) -> PivotChoice {
        match s {
            "first" => PivotChoice::First,
            "middle" => PivotChoice::Middle,
            _ => PivotChoice::Last,
        }
    }

    fn pick(self, lo: usize, hi: usize) -> usize {
        match self {
            PivotChoice::First => lo,
            PivotChoice::Middle => lo + (hi - lo) / 2,
            PivotChoice::Last => hi,
        }
    }
}

pub struct QuickSort;

impl QuickSort {
    fn sort(t: &mut Trace, a: &mut [i64], lo: usize, hi: usize, choice: PivotChoice) {
        if lo >= hi {
            if lo == hi {
                t.mark_one(lo, MarkKind::Sorted);
            }
            return;
        }
        let p = Self::partition(t, a, lo, hi, choice);
        if p > lo {
            Self::sort(t, a, lo, p - 1, choice);
        }
        if p < hi {
            Self::sort(t, a, p + 1, hi, choice);
        }
    }

    /// Lomuto partition over the inclusive range `lo..=hi`. The chosen
    /// pivot is swapped to `hi` first so the scan shape is always the same.
    fn partition(t: &mut Trace, a: &mut [i64], lo: usize, hi: usize, choice: PivotChoice) -> usize {
        let pivot_at = choice.pick(lo, hi);
        if pivot_at != hi {
            t.swap(a, pivot_at, hi);
        }
        t.mark_one(hi, MarkKind::Pivot);
        t.pointers(&[("lo", lo), ("hi", hi)]);
        t.metric_add("partitions", 1);

        let mut i = lo;
        for j in lo..hi {
            let ord = t.compare(a, j, hi);
            t.mark_one(hi, MarkKind::Pivot);
            if ord != Ordering::Greater {
                if i != j {
                    t.swap(a, i, j);
                    t.mark_one(hi, MarkKind::Pivot);
                }
                i += 1;
            }
        }
        if i != hi {
            t.swap(a, i, hi);
        }
        t.mark_one(i, MarkKind::Sorted);
        i
    }
}

impl Algorithm for QuickSort {
    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "quick-sort",
            name: "Quick Sort",
            category: Category::Sorting,
            difficulty: Difficulty::Intermediate,
            complexity: Complexity {
                time_best: "O(n log n)",
                time_average: "O(n log n)",
                time_worst: "O(n²)",
                space: "O(log n)",
            },
        }
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::Select {
            id: "pivot",
            label: "Pivot choice",
            default: "last",
            options: &["first", "middle", "last"],
        }]
    }

    fn run(&self, input: &[i64], params: &ParamValues) -> Vec<Event> {
        let mut a = input.to_vec();
        let mut t = Trace::new();
        let n = a.len();
        let choice = PivotChoice::parse(params.text_or("pivot", "last"));

        t.message(format!(
            "Partition around the {} element, then sort each side",
            params.text_or("pivot", "last")
        ));
        if n > 0 {
            Self::sort(&mut t, &mut a, 0, n - 1, choice);
        }
        t.mark(&all_indices(n), MarkKind::Sorted);
        t.success("Array sorted");
        t.completed(None, "sorted");
        t.into_events()
    }
}

// ===== Merge sort =====

pub struct MergeSort;

impl MergeSort {
    fn sort(t: &mut Trace, a: &mut [i64], lo: usize, hi: usize) {
        if hi - lo <= 1 {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        t.pointers(&[("lo", lo), ("mid", mid), ("hi", hi - 1)]);
        Self::sort(t, a, lo, mid);
        Self::sort(t, a, mid, hi);
        Self::merge(t, a, lo, mid, hi);
    }

    /// Merge `a[lo..mid]` and `a[mid..hi]`. All comparisons happen before
    /// any write-back, so the compared positions still hold the compared
    /// values in the replayed snapshots.
    fn merge(t: &mut Trace, a: &mut [i64], lo: usize, mid: usize, hi: usize) {
        let left = a[lo..mid].to_vec();
        let right = a[mid..hi].to_vec();
        t.aux(AuxState::Merge {
            left: left.clone(),
            right: right.clone(),
            merged: Vec::new(),
        });

        let mut merged: Vec<i64> = Vec::with_capacity(hi - lo);
        let (mut li, mut ri) = (0, 0);
        while li < left.len() && ri < right.len() {
            if t.compare(a, lo + li, mid + ri) == Ordering::Greater {
                merged.push(right[ri]);
                ri += 1;
            } else {
                merged.push(left[li]);
                li += 1;
            }
            t.aux(AuxState::Merge {
                left: left[li..].to_vec(),
                right: right[ri..].to_vec(),
                merged: merged.clone(),
            });
        }
        merged.extend_from_slice(&left[li..]);
        merged.extend_from_slice(&right[ri..]);
        t.aux(AuxState::Merge {
            left: Vec::new(),
            right: Vec::new(),
            merged: merged.clone(),
        });

        for (k, &value) in merged.iter().enumerate() {
            if a[lo + k] != value {
                t.set(a, lo + k, value);
            }
        }
        t.metric_add("merges", 1);
        t.mark(&(lo..hi).collect::<Vec<_>>(), MarkKind::Sorted);
    }
}

impl Algorithm for MergeSort {
    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "merge-sort",
            name: "Merge Sort",
            category: Category::Sorting,
            difficulty: Difficulty::Intermediate,
            complexity: Complexity {
                time_best: "O(n log n)",
                time_average: "O(n log n)",
                time_worst: "O(n log n)",
                space: "O(n)",
            },
        }
    }

    fn run(&self, input: &[i64], _params: &ParamValues) -> Vec<Event> {
        let mut a = input.to_vec();
        let mut t = Trace::new();
        let n = a.len();

        t.message("Split in half, sort each half, merge the sorted halves");
        Self::sort(&mut t, &mut a, 0, n);
        t.mark(&all_indices(n), MarkKind::Sorted);
        t.success("Array sorted");
        t.completed(None, "sorted");
        t.into_events()
    }
}

// ===== Heap sort =====

pub struct HeapSort;

impl HeapSort {
    fn sift_down(t: &mut Trace, a: &mut [i64], mut root: usize, heap_size: usize) {
        t.metric_add("sifts", 1);
        loop {
            let left = 2 * root + 1;
            if left >= heap_size {
                break;
            }
            let right = left + 1;
            let mut largest = root;
            if t.compare(a, left, largest) == Ordering::Greater {
                largest = left;
            }
            if right < heap_size && t.compare(a, right, largest) == Ordering::Greater {
                largest = right;
            }
            if largest == root {
                break;
            }
            t.swap(a, root, largest);
            t.aux(AuxState::Heap {
                nodes: a[..heap_size].to_vec(),
                heap_size,
                active: vec![root, largest],
            });
            root = largest;
        }
    }
}

impl Algorithm for HeapSort {
    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "heap-sort",
            name: "Heap Sort",
            category: Category::Sorting,
            difficulty: Difficulty::Advanced,
            complexity: Complexity {
                time_best: "O(n log n)",
                time_average: "O(n log n)",
                time_worst: "O(n log n)",
                space: "O(1)",
            },
        }
    }

    fn run(&self, input: &[i64], _params: &ParamValues) -> Vec<Event> {
        let mut a = input.to_vec();
        let mut t = Trace::new();
        let n = a.len();

        t.message("Build a max-heap over the array");
        for i in (0..n / 2).rev() {
            Self::sift_down(&mut t, &mut a, i, n);
        }
        t.aux(AuxState::Heap {
            nodes: a.clone(),
            heap_size: n,
            active: Vec::new(),
        });
        t.message("Extract the maximum until the heap is empty");
        for end in (1..n).rev() {
            t.swap(&mut a, 0, end);
            t.mark_one(end, MarkKind::Sorted);
            t.aux(AuxState::Heap {
                nodes: a[..end].to_vec(),
                heap_size: end,
                active: vec![0],
            });
            Self::sift_down(&mut t, &mut a, 0, end);
        }
        t.mark(&all_indices(n), MarkKind::Sorted);
        t.success("Array sorted");
        t.completed(None, "sorted");
        t.into_events()
    }
}

// ===== Counting sort =====

pub struct CountingSort;

impl Algorithm for CountingSort {
    fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            id: "counting-sort",
            name: "Counting Sort",
            category: Category::Sorting,
            difficulty: Difficulty::Intermediate,
            complexity: Complexity {
                time_best: "O(n+k)",
                time_average: "O(n+k)",
                time_worst: "O(n+k)",
                space: "O(k)",
            },
        }
    }

    /// Counting sort additionally requires small non-negative values.
    fn validate(&self, input: &[i64]) -> Result<(), InputError> {
        validate_bounds(input)?;
        for (index, &value) in input.iter().enumerate() {
            if !(0..=COUNTING_CEILING).contains(&value) {
                return Err(InputError::ValueOutOfRange {
                    index,
                    value,
                    min: 0,
                    max: COUNTING_CEILING,
                });
            }
        }
        Ok(())
    }

    fn run(&self, input: &[i64], _params: &ParamValues) -> Vec<Event> {
        let mut a = input.to_vec();
        let mut t = Trace::new();
        let n = a.len();
        let max = a.iter().copied().max().unwrap_or(0);

        let buckets_of = |counts: &[usize]| AuxState::Buckets {
            buckets: counts
                .iter()
                .enumerate()
                .map(|(value, &count)| Bucket {
                    label: value.to_string(),
                    items: vec![value as i64; count],
                })
                .collect(),
        };

        t.message(format!("Tally every value into buckets 0..={}", max));
        let mut counts = vec![0usize; max as usize + 1];
        for i in 0..n {
            t.mark_one(i, MarkKind::Current);
            counts[a[i] as usize] += 1;
            t.aux(buckets_of(&counts));
            t.unmark(&[i]);
        }

        t.message("Replay the buckets back into the array in order");
        let mut k = 0;
        for (value, &count) in counts.iter().enumerate() {
            for _ in 0..count {
                t.set(&mut a, k, value as i64);
                t.metric_add("writes", 1);
                t.mark_one(k, MarkKind::Sorted);
                k += 1;
            }
        }
        t.success("Array sorted");
        t.completed(None, "sorted");
        t.into_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::Timeline;

    fn replayed_final(algo: &dyn Algorithm, input: &[i64]) -> Vec<i64> {
        let params = ParamValues::with_defaults(&algo.params());
        algo.validate(input).expect("input should validate");
        let events = algo.run(input, &params);
        Timeline::build(input, events).last().array.clone()
    }

    #[test]
    fn test_every_sort_orders_the_demo_input() {
        let algos: Vec<Box<dyn Algorithm>> = vec![
            Box::new(BubbleSort),
            Box::new(InsertionSort),
            Box::new(SelectionSort),
            Box::new(QuickSort),
            Box::new(MergeSort),
            Box::new(HeapSort),
            Box::new(CountingSort),
        ];
        let mut expected = super::super::DEMO_INPUT.to_vec();
        expected.sort_unstable();
        for algo in &algos {
            assert_eq!(
                replayed_final(algo.as_ref(), super::super::DEMO_INPUT),
                expected,
                "{} must sort the demo input",
                algo.info().id
            );
        }
    }

    #[test]
    fn test_quick_sort_honors_every_pivot_choice() {
        let input = [9, 1, 8, 2, 7, 3];
        for pivot in ["first", "middle", "last"] {
            let mut params = ParamValues::new();
            params.set("pivot", crate::algo::params::ParamValue::Text(pivot.into()));
            let events = QuickSort.run(&input, &params);
            let replayed = Timeline::build(&input, events).last().array.clone();
            assert_eq!(replayed, vec![1, 2, 3, 7, 8, 9], "pivot {}", pivot);
        }
    }

    #[test]
    fn test_single_element_runs_emit_a_result() {
        for algo in crate::algo::all() {
            if algo.info().category != Category::Sorting {
                continue;
            }
            let events = algo.run(&[4], &ParamValues::with_defaults(&algo.params()));
            assert!(
                matches!(events.last(), Some(Event::Result { .. })),
                "{} should finish with a result event",
                algo.info().id
            );
        }
    }

    #[test]
    fn test_counting_sort_rejects_values_above_ceiling() {
        assert!(matches!(
            CountingSort.validate(&[1, COUNTING_CEILING + 1]),
            Err(InputError::ValueOutOfRange { index: 1, .. })
        ));
        assert!(matches!(
            CountingSort.validate(&[3, -1]),
            Err(InputError::ValueOutOfRange { index: 1, .. })
        ));
        assert!(CountingSort.validate(&[0, 20, 5]).is_ok());
    }

    #[test]
    fn test_merge_sort_reports_merge_buffers() {
        let events = MergeSort.run(&[4, 1, 3, 2], &ParamValues::new());
        let merges: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, Event::Auxiliary { .. }))
            .collect();
        assert!(!merges.is_empty(), "merge sort should show its buffers");
        let final_aux = Timeline::build(&[4, 1, 3, 2], events).last().aux.clone();
        match final_aux {
            Some(AuxState::Merge { merged, .. }) => assert_eq!(merged, vec![1, 2, 3, 4]),
            other => panic!("expected merge aux state, got {:?}", other),
        }
    }

    #[test]
    fn test_heap_sort_keeps_heap_prefix_in_aux() {
        let events = HeapSort.run(&[5, 9, 3, 1, 7], &ParamValues::new());
        let saw_heap = events.iter().any(|e| {
            matches!(
                e,
                Event::Auxiliary {
                    state: AuxState::Heap { heap_size, .. }
                } if *heap_size <= 5
            )
        });
        assert!(saw_heap, "heap sort should publish heap aux states");
    }
}
