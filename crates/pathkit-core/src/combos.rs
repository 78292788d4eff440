//! Power-set enumeration.

use crate::bits::IntBits;

/// Iterator over every subset of a slice, produced by [`combinations`].
#[derive(Clone, Debug)]
pub struct Combinations<'a, T> {
    items: &'a [T],
    next: usize,
    end: usize,
}

/// Enumerate all `2^n` subsets of `items` in bitmask order.
///
/// Subset `k` contains the items whose index bit is set in `k`, in index
/// order, so the first subset is empty and the last is the whole slice.
///
/// # Panics
///
/// Panics if `items.len() >= usize::BITS`.
pub fn combinations<T: Clone>(items: &[T]) -> Combinations<'_, T> {
    assert!(
        items.len() < usize::BITS as usize,
        "combinations: {} items overflow the subset counter",
        items.len()
    );
    Combinations {
        items,
        next: 0,
        end: 1usize << items.len(),
    }
}

impl<T: Clone> Iterator for Combinations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.next >= self.end {
            return None;
        }
        let mask = self.next;
        self.next += 1;
        Some(
            mask.set_bits()
                .into_iter()
                .map(|i| self.items[i].clone())
                .collect(),
        )
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.end - self.next;
        (left, Some(left))
    }
}

impl<T: Clone> ExactSizeIterator for Combinations<'_, T> {}
