//! Array-backed binary heap ordered by a caller-supplied predicate.
//!
//! The tree is encoded by index: the children of `i` live at `2i + 1` and
//! `2i + 2`, and the parent of `i > 0` at `(i - 1) / 2`. After every
//! mutation no element has strictly higher priority than its parent, so the
//! root is always the highest-priority element.

use std::fmt;

/// Plain function-pointer comparator, the default for [`PriorityQueue`].
pub type MinOrder<T> = fn(&T, &T) -> bool;

fn less<T: Ord>(a: &T, b: &T) -> bool {
    a < b
}

/// A binary-heap priority queue.
///
/// `compare(a, b)` must return `true` when `a` has strictly higher priority
/// than `b`. It has to be irreflexive and transitive; the queue does not
/// check this, and an inconsistent predicate produces an unspecified order
/// rather than a panic.
///
/// There is no decrease-key. To change an element's priority, push it again
/// and let the consumer discard the outdated copy when it surfaces.
pub struct PriorityQueue<T, C = MinOrder<T>> {
    elements: Vec<T>,
    compare: C,
}

impl<T, C> PriorityQueue<T, C>
where
    C: Fn(&T, &T) -> bool,
{
    /// Create an empty queue ordered by `compare`.
    pub fn new(compare: C) -> Self {
        Self {
            elements: Vec::new(),
            compare,
        }
    }

    /// Create a queue holding `elements`, pushed one by one (O(n log n)).
    pub fn with_elements<I>(elements: I, compare: C) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut queue = Self::new(compare);
        for element in elements {
            queue.push(element);
        }
        queue
    }

    /// Number of elements in the queue.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The highest-priority element, or `None` if the queue is empty.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }

    /// Insert `element` in O(log n).
    pub fn push(&mut self, element: T) {
        self.elements.push(element);
        self.sift_up(self.elements.len() - 1);
    }

    /// Remove and return the highest-priority element, or `None` if the
    /// queue is empty.
    pub fn pop(&mut self) -> Option<T> {
        let last = self.elements.len().checked_sub(1)?;
        self.elements.swap(0, last);
        let top = self.elements.pop();
        if !self.elements.is_empty() {
            self.sift_down(0);
        }
        top
    }

    /// Remove every element, keeping the allocation.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Iterate over the elements in heap-array order (not priority order).
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Consume the queue, returning the backing storage in heap-array order.
    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }

    #[inline]
    fn outranks(&self, a: usize, b: usize) -> bool {
        (self.compare)(&self.elements[a], &self.elements[b])
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if !self.outranks(child, parent) {
                break;
            }
            self.elements.swap(child, parent);
            child = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.elements.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            // Right child first; when both children outrank the node, the
            // left one wins only if it strictly outranks the right one.
            let next = if right < len && self.outranks(right, index) {
                if self.outranks(left, right) { left } else { right }
            } else if left < len && self.outranks(left, index) {
                left
            } else {
                break;
            };
            self.elements.swap(index, next);
            index = next;
        }
    }
}

impl<T: Ord> PriorityQueue<T> {
    /// Empty queue that pops the smallest element first.
    pub fn min_heap() -> Self {
        Self::new(less::<T>)
    }
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::min_heap()
    }
}

impl<T: Ord> FromIterator<T> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::with_elements(iter, less::<T>)
    }
}

impl<T: fmt::Debug, C> PriorityQueue<T, C> {
    fn fmt_node(&self, index: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(element) = self.elements.get(index) else {
            return f.write_str("nil");
        };
        write!(f, "({element:?} ")?;
        self.fmt_node(2 * index + 1, f)?;
        f.write_str(" ")?;
        self.fmt_node(2 * index + 2, f)?;
        f.write_str(")")
    }
}

impl<T: fmt::Debug, C> fmt::Debug for PriorityQueue<T, C> {
    /// Renders the tree as nested `(element left right)` groups.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PriorityQueue<")?;
        self.fmt_node(0, f)?;
        f.write_str(">")
    }
}
