//! Property-based tests using proptest
//!
//! Random inputs are heapified and drained, checking the heap property,
//! size bookkeeping and the final arrangement of the backing slice.

use proptest::prelude::*;
use sel_heap::{max_heap_sort, min_heap_sort, Heap, HeapError};

fn sorted(values: &[i32]) -> Vec<i32> {
    let mut out = values.to_vec();
    out.sort();
    out
}

proptest! {
    #[test]
    fn heap_property_holds_after_every_pop(values in prop::collection::vec(any::<i32>(), 0..200)) {
        let mut data = values.clone();
        let mut heap = Heap::min_heap(&mut data);
        prop_assert!(heap.is_valid());

        let mut expected_len = values.len();
        while let Ok(popped) = heap.try_pop() {
            expected_len -= 1;
            prop_assert_eq!(heap.len(), expected_len);
            prop_assert!(heap.is_valid());
            if let Some(next) = heap.peek() {
                prop_assert!(popped <= *next);
            }
        }
        prop_assert!(heap.is_empty());
        prop_assert_eq!(heap.try_pop(), Err(HeapError::Empty));
    }

    #[test]
    fn min_heap_sort_is_ascending_and_reverses_input(values in prop::collection::vec(-50i32..50, 0..100)) {
        let mut data = values.clone();
        let out = min_heap_sort(&mut data);

        let expected = sorted(&values);
        prop_assert_eq!(&out, &expected);

        let mut descending = expected;
        descending.reverse();
        prop_assert_eq!(data, descending);
    }

    #[test]
    fn max_heap_sort_is_ascending_in_place(values in prop::collection::vec(-50i32..50, 0..100)) {
        let mut data = values.clone();
        max_heap_sort(&mut data);
        prop_assert_eq!(data, sorted(&values));
    }

    #[test]
    fn max_heap_pops_in_descending_order(values in prop::collection::vec(any::<i32>(), 1..100)) {
        let mut data = values.clone();
        let mut heap = Heap::max_heap(&mut data);
        let out: Vec<i32> = heap.drain_sorted().collect();

        let mut expected = sorted(&values);
        expected.reverse();
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn partial_drain_keeps_the_rest(values in prop::collection::vec(any::<i32>(), 0..100), take in 0usize..100) {
        let mut data = values.clone();
        let mut heap = Heap::min_heap(&mut data);
        let taken: Vec<i32> = heap.drain_sorted().take(take).collect();

        prop_assert_eq!(taken.len(), take.min(values.len()));
        prop_assert_eq!(heap.len(), values.len() - taken.len());
        prop_assert!(heap.is_valid());

        let mut all = taken;
        all.extend(heap.as_slice().iter().copied());
        prop_assert_eq!(sorted(&all), sorted(&values));
    }
}
