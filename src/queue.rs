//! Comparator-ordered job sequence.
//!
//! A priority queue with list-like extras: positional access, removal by
//! index, and removal by identity. Ordering comes entirely from a
//! comparator captured at construction; identity checks never consult it.
//!
//! # Insertion
//! A new element goes in front of the first element it compares strictly
//! earlier than, so elements that compare equal keep their insertion
//! order. A comparator that reports every distinct pair as `Greater`
//! (round robin) therefore yields plain FIFO behavior.
//!
//! # Complexity
//! | Operation | Cost |
//! |-----------|------|
//! | `insert` | O(n) comparisons |
//! | `peek_head`, `remove_head` | O(1) |
//! | `at` | O(1) |
//! | `remove_at`, `remove_matching` | O(n) |

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

/// Boxed three-way comparator. `Less` = first argument sorts earlier.
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// An ordered sequence of items under an injected comparator.
///
/// # Example
/// ```
/// use u_cpusched::queue::OrderedJobSequence;
///
/// let mut q = OrderedJobSequence::new(|a: &i32, b: &i32| a.cmp(b));
/// q.insert(5);
/// q.insert(1);
/// assert_eq!(q.insert(3), 1);
/// assert_eq!(q.peek_head(), Some(&1));
/// assert_eq!(q.at(2), Some(&5));
/// assert_eq!(q.at(3), None);
/// ```
pub struct OrderedJobSequence<T> {
    items: VecDeque<T>,
    comparator: Comparator<T>,
}

impl<T> OrderedJobSequence<T> {
    /// Creates an empty sequence ordered by `comparator`.
    pub fn new<F>(comparator: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self {
            items: VecDeque::new(),
            comparator: Box::new(comparator),
        }
    }

    /// Inserts `item` in comparator order and returns its zero-based index.
    pub fn insert(&mut self, item: T) -> usize {
        let position = self
            .items
            .iter()
            .position(|existing| (self.comparator)(&item, existing) == Ordering::Less)
            .unwrap_or(self.items.len());
        self.items.insert(position, item);
        position
    }

    /// The head of the sequence, or `None` if empty.
    pub fn peek_head(&self) -> Option<&T> {
        self.items.front()
    }

    /// Removes and returns the head, or `None` if empty.
    pub fn remove_head(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// The element at `index`, or `None` if `index >= size()`.
    pub fn at(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Removes every element `is_target` accepts and returns how many.
    ///
    /// The predicate expresses identity (e.g., same job id); the
    /// comparator is not consulted.
    pub fn remove_matching<F>(&mut self, mut is_target: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.items.len();
        self.items.retain(|item| !is_target(item));
        before - self.items.len()
    }

    /// Removes and returns the element at `index`, shifting later
    /// elements down. Returns `None` without mutating if out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        self.items.remove(index)
    }

    /// Number of elements.
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates in queue order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Compares two items with the captured comparator.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.comparator)(a, b)
    }

    /// Discards every remaining element and returns how many there were.
    pub fn destroy(self) -> usize {
        self.items.len()
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedJobSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedJobSequence")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}
