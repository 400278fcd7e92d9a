//! A binary heap laid over storage owned by the caller.
//!
//! [`Heap`] borrows a slice, heapifies it in place and then hands out its
//! elements one by one. Which element counts as "top" is decided by a
//! *selector*, a plain function or closure returning an [`Order`]; the presets
//! [`select_min`] and [`select_max`] give the usual min-heap and max-heap.
//!
//! Popping never removes anything from the slice. The extracted value is
//! parked in the slot the shrinking heap just gave up, so once a heap is fully
//! drained the caller's slice is sorted: descending for a min-heap, ascending
//! for a max-heap.
//!
//! ```
//! use sel_heap::Heap;
//!
//! let mut data = vec![1, 6, 3, 7, 8, 3, 5];
//! let mut heap = Heap::min_heap(&mut data);
//!
//! assert_eq!(heap.pop(), 1);
//! assert_eq!(heap.pop(), 3);
//! assert_eq!(heap.len(), 5);
//!
//! while !heap.is_empty() {
//!     heap.pop();
//! }
//! assert_eq!(data, [8, 7, 6, 5, 3, 3, 1]);
//! ```

use core::fmt;
use core::iter::FusedIterator;

use thiserror::Error;
use tracing::{debug, trace};

/// In a comparison, should we pick the first or the second value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// The left argument wins.
    First,
    /// The right argument wins.
    Second,
}

/// Errors reported by fallible heap operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// An element was requested from a heap with no elements left.
    #[error("pop from an empty heap")]
    Empty,
}

/// The selector type of heaps built with [`Heap::min_heap`] and [`Heap::max_heap`].
pub type SelectFn<T> = fn(&T, &T) -> Order;

/// Pick the smallest element.
///
/// ```
/// use sel_heap::{select_min, Order};
///
/// assert_eq!(select_min(&1, &2), Order::First);
/// assert_eq!(select_min(&2, &2), Order::Second);
/// ```
pub fn select_min<T: PartialOrd + ?Sized>(a: &T, b: &T) -> Order {
    if a < b {
        Order::First
    } else {
        Order::Second
    }
}

/// Pick the largest element.
pub fn select_max<T: PartialOrd + ?Sized>(a: &T, b: &T) -> Order {
    if b < a {
        Order::First
    } else {
        Order::Second
    }
}

#[inline(always)]
fn parent(i: usize) -> usize {
    (i - 1) / 2
}

#[inline(always)]
fn left(i: usize) -> usize {
    2 * i + 1
}

#[inline(always)]
fn right(i: usize) -> usize {
    2 * i + 2
}

/// A binary heap over a borrowed slice.
///
/// The first [`len`] slots of the slice hold the heap. Every [`pop`] moves
/// the selected value to the end of that region and shrinks it by one, so the
/// slots from `len` onwards hold the values already extracted, the most
/// recent one first.
///
/// Any ordering rule can be used as long as it is a function of two
/// references returning [`Order`]. It is a logic error for the selector not
/// to be a strict weak order: the heap will still hand out every element
/// exactly once, but in no particular order.
///
/// # Examples
///
/// A max-heap over records, ordered by one field:
///
/// ```
/// use sel_heap::{Heap, Order};
///
/// type Job = (&'static str, u32);
///
/// let mut jobs: Vec<Job> = vec![("compile", 2), ("deploy", 9), ("lint", 5)];
/// let mut heap = Heap::new(&mut jobs, |a: &Job, b: &Job| {
///     if a.1 > b.1 {
///         Order::First
///     } else {
///         Order::Second
///     }
/// });
///
/// assert_eq!(heap.peek(), Some(&("deploy", 9)));
/// assert_eq!(heap.pop().0, "deploy");
/// assert_eq!(heap.pop().0, "lint");
/// assert_eq!(heap.pop().0, "compile");
/// assert!(heap.is_empty());
/// ```
///
/// # Time complexity
///
/// | [new]     | [pop]         | [peek] |
/// |-----------|---------------|--------|
/// | *O*(*n*)  | *O*(log(*n*)) | *O*(1) |
///
/// [len]: Heap::len
/// [new]: Heap::new
/// [pop]: Heap::pop
/// [peek]: Heap::peek
pub struct Heap<'a, T, S = SelectFn<T>> {
    data: &'a mut [T],
    len: usize,
    select: S,
}

impl<'a, T: PartialOrd> Heap<'a, T> {
    /// Wraps `data` as a min-heap: [`pop`](Heap::pop) yields the smallest value.
    ///
    /// # Examples
    ///
    /// Basic usage:
    ///
    /// ```
    /// use sel_heap::Heap;
    ///
    /// let mut data = [4, 1, 3];
    /// let mut heap = Heap::min_heap(&mut data);
    /// assert_eq!(heap.pop(), 1);
    /// ```
    #[must_use]
    pub fn min_heap(data: &'a mut [T]) -> Self {
        Heap::new(data, select_min as SelectFn<T>)
    }

    /// Wraps `data` as a max-heap: [`pop`](Heap::pop) yields the largest value.
    ///
    /// # Examples
    ///
    /// Basic usage:
    ///
    /// ```
    /// use sel_heap::Heap;
    ///
    /// let mut data = [4, 1, 3];
    /// let mut heap = Heap::max_heap(&mut data);
    /// assert_eq!(heap.pop(), 4);
    /// ```
    #[must_use]
    pub fn max_heap(data: &'a mut [T]) -> Self {
        Heap::new(data, select_max as SelectFn<T>)
    }
}

impl<'a, T, S> Heap<'a, T, S>
where
    S: Fn(&T, &T) -> Order,
{
    /// Wraps `data` as a heap ordered by `select` and heapifies it in place.
    ///
    /// No element is added or removed, they only change position. The
    /// borrow of `data` is held until the heap is dropped.
    ///
    /// # Time complexity
    ///
    /// *O*(*n*) comparisons and swaps.
    #[must_use]
    pub fn new(data: &'a mut [T], select: S) -> Self {
        let len = data.len();
        let mut heap = Heap { data, len, select };
        heap.rebuild();
        debug!(len, "heapified backing storage");
        heap
    }

    /// Removes the top value and leaves it in the slot just behind the heap,
    /// returning a reference to it there.
    ///
    /// This is the clone-free form of [`pop`](Heap::pop).
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::Empty`] if the heap has no elements left.
    ///
    /// # Examples
    ///
    /// ```
    /// use sel_heap::{Heap, HeapError};
    ///
    /// let mut data = [String::from("b"), String::from("a")];
    /// let mut heap = Heap::min_heap(&mut data);
    ///
    /// assert_eq!(heap.pop_to_tail().map(String::as_str), Ok("a"));
    /// assert_eq!(heap.pop_to_tail().map(String::as_str), Ok("b"));
    /// assert_eq!(heap.pop_to_tail(), Err(HeapError::Empty));
    /// assert_eq!(data, ["b", "a"]);
    /// ```
    ///
    /// # Time complexity
    ///
    /// *O*(log(*n*)).
    pub fn pop_to_tail(&mut self) -> Result<&T, HeapError> {
        if self.is_empty() {
            debug!("pop from an empty heap");
            return Err(HeapError::Empty);
        }

        self.len -= 1;
        self.data.swap(0, self.len);
        self.sift_down(0);
        trace!(remaining = self.len, "extracted heap root");

        Ok(&self.data[self.len])
    }

    /// Checks the heap property over the live region: no element is
    /// preferred by the selector over its parent.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (1..self.len).all(|c| (self.select)(&self.data[c], &self.data[parent(c)]) != Order::First)
    }

    fn rebuild(&mut self) {
        // Leaves are already heaps, start from the last parent.
        let mut n = self.len / 2;
        while n > 0 {
            n -= 1;
            self.sift_down(n);
        }
    }

    /// The child of `pos` that should move up if `pos` is out of order.
    fn preferred_child(&self, pos: usize) -> Option<usize> {
        let (l, r) = (left(pos), right(pos));
        if l >= self.len {
            return None;
        }
        if r >= self.len {
            return Some(l);
        }

        match (self.select)(&self.data[l], &self.data[r]) {
            Order::First => Some(l),
            Order::Second => Some(r),
        }
    }

    /// Move the value at `pos` down until neither child is preferred over it.
    fn sift_down(&mut self, mut pos: usize) {
        while pos < self.len {
            let child = match self.preferred_child(pos) {
                Some(child) => child,
                None => break,
            };
            if (self.select)(&self.data[pos], &self.data[child]) == Order::First {
                break;
            }
            self.data.swap(pos, child);
            pos = child;
        }
    }
}

impl<'a, T: Clone, S> Heap<'a, T, S>
where
    S: Fn(&T, &T) -> Order,
{
    /// Removes the top value and returns a copy of it.
    ///
    /// The value itself stays in the backing slice, just past the end of the
    /// shrunk heap.
    ///
    /// # Errors
    ///
    /// Returns [`HeapError::Empty`] if the heap has no elements left.
    pub fn try_pop(&mut self) -> Result<T, HeapError> {
        self.pop_to_tail().map(T::clone)
    }

    /// Removes the top value and returns a copy of it.
    ///
    /// # Panics
    ///
    /// Panics if the heap is empty.
    ///
    /// # Examples
    ///
    /// Basic usage:
    ///
    /// ```
    /// use sel_heap::Heap;
    ///
    /// let mut data = vec![1, 3];
    /// let mut heap = Heap::max_heap(&mut data);
    ///
    /// assert_eq!(heap.pop(), 3);
    /// assert_eq!(heap.pop(), 1);
    /// assert!(heap.try_pop().is_err());
    /// ```
    ///
    /// # Time complexity
    ///
    /// The worst case cost of `pop` on a heap containing *n* elements is *O*(log(*n*)).
    pub fn pop(&mut self) -> T {
        match self.try_pop() {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }

    /// Returns an iterator popping the remaining elements in heap order.
    ///
    /// Elements not consumed before the iterator is dropped stay in the heap.
    ///
    /// # Examples
    ///
    /// ```
    /// use sel_heap::Heap;
    ///
    /// let mut data = [5, 1, 4, 2, 3];
    /// let mut heap = Heap::max_heap(&mut data);
    ///
    /// assert_eq!(heap.drain_sorted().take(2).collect::<Vec<_>>(), [5, 4]);
    /// assert_eq!(heap.len(), 3);
    /// ```
    #[inline]
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, 'a, T, S> {
        DrainSorted { inner: self }
    }
}

impl<'a, T, S> Heap<'a, T, S> {
    /// Returns the number of elements still in the heap.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Checks if the heap is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the top value without removing it, or `None` if the heap is empty.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// The live heap region of the backing slice, in heap (not sorted) order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.len]
    }

    /// The values popped so far, most recent first.
    #[must_use]
    pub fn retired(&self) -> &[T] {
        &self.data[self.len..]
    }

    /// Releases the heap and gives the whole backing slice back.
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_inner(self) -> &'a mut [T] {
        self.data
    }
}

impl<T: fmt::Debug, S> fmt::Debug for Heap<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice().iter()).finish()
    }
}

/// A draining iterator over the elements of a `Heap` in heap order.
///
/// This `struct` is created by [`Heap::drain_sorted()`]. See its
/// documentation for more.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct DrainSorted<'h, 'a, T, S> {
    inner: &'h mut Heap<'a, T, S>,
}

impl<T: fmt::Debug, S> fmt::Debug for DrainSorted<'_, '_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DrainSorted").field(&self.inner).finish()
    }
}

impl<T: Clone, S> Iterator for DrainSorted<'_, '_, T, S>
where
    S: Fn(&T, &T) -> Order,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.try_pop().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let exact = self.inner.len();
        (exact, Some(exact))
    }
}

impl<T: Clone, S> ExactSizeIterator for DrainSorted<'_, '_, T, S> where S: Fn(&T, &T) -> Order {}

impl<T: Clone, S> FusedIterator for DrainSorted<'_, '_, T, S> where S: Fn(&T, &T) -> Order {}

/// Sort `data` and return the sorted values in a new vector.
///
/// A min-heap is laid over `data` itself, so as a side effect `data` is left
/// in descending order. Pass a copy if the original must be preserved.
///
/// ```
/// use sel_heap::min_heap_sort;
///
/// let mut data = vec![1, 4, 2, 3, 5];
/// assert_eq!(min_heap_sort(&mut data), [1, 2, 3, 4, 5]);
/// assert_eq!(data, [5, 4, 3, 2, 1]);
/// ```
#[must_use]
pub fn min_heap_sort<T: PartialOrd + Clone>(data: &mut [T]) -> Vec<T> {
    Heap::min_heap(data).drain_sorted().collect()
}

/// Sort `data` in place, ascending, and return it.
///
/// ```
/// use sel_heap::max_heap_sort;
///
/// let mut data = vec![1, 4, 2, 3, 5];
/// assert_eq!(max_heap_sort(&mut data), [1, 2, 3, 4, 5]);
/// assert_eq!(data, [1, 2, 3, 4, 5]);
/// ```
pub fn max_heap_sort<T: PartialOrd>(data: &mut [T]) -> &mut [T] {
    let mut heap = Heap::max_heap(&mut *data);
    while heap.pop_to_tail().is_ok() {}
    data
}
