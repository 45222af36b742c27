//! Strongly-typed indices
//!
//! Every entity kind stored by a [`Scene`](crate::scene::Scene) is addressed
//! by its own handle type so a mesh index can never be used where a node
//! index is expected. Handles are plain `u32` newtypes with a reserved
//! `INVALID` value (`u32::MAX`), and [`IndexVec`] is the owning sequence
//! they subscript.
//!
//! ```rust,ignore
//! define_index! {
//!     /// Index of a widget.
//!     pub struct WidgetIndex;
//! }
//!
//! let mut widgets: IndexVec<WidgetIndex, Widget> = IndexVec::new();
//! let w = widgets.push(Widget::default());
//! assert_eq!(w, WidgetIndex::new(0));
//! ```

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Common behaviour of every handle declared with [`define_index!`].
pub trait Idx: Copy + Eq + Ord + Hash + fmt::Debug {
    /// The reserved "no entity" value.
    const INVALID: Self;

    fn new(value: usize) -> Self;

    fn value(self) -> usize;

    #[inline]
    fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

/// Declares one or more handle types.
///
/// Each generated type is `#[repr(transparent)]` over `u32`, defaults to
/// `INVALID` and orders by its underlying integer.
#[macro_export]
macro_rules! define_index {
    ($($(#[$meta:meta])* $vis:vis struct $name:ident;)+) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
            #[repr(transparent)]
            $vis struct $name(u32);

            impl $name {
                pub const INVALID: Self = Self(u32::MAX);

                #[inline]
                #[must_use]
                pub const fn new(value: usize) -> Self {
                    Self(value as u32)
                }

                #[inline]
                #[must_use]
                pub const fn value(self) -> usize {
                    self.0 as usize
                }

                #[inline]
                #[must_use]
                pub const fn is_valid(self) -> bool {
                    self.0 != u32::MAX
                }
            }

            impl $crate::utils::index::Idx for $name {
                const INVALID: Self = Self(u32::MAX);

                #[inline]
                fn new(value: usize) -> Self {
                    Self(value as u32)
                }

                #[inline]
                fn value(self) -> usize {
                    self.0 as usize
                }
            }

            impl Default for $name {
                fn default() -> Self {
                    Self::INVALID
                }
            }

            impl From<usize> for $name {
                fn from(value: usize) -> Self {
                    Self::new(value)
                }
            }

            impl ::std::fmt::Debug for $name {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    if self.is_valid() {
                        write!(f, "{}({})", stringify!($name), self.0)
                    } else {
                        write!(f, "{}(INVALID)", stringify!($name))
                    }
                }
            }

            impl ::std::fmt::Display for $name {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    if self.is_valid() {
                        write!(f, "{}", self.0)
                    } else {
                        f.write_str("INVALID")
                    }
                }
            }
        )+
    };
}

/// An owning `Vec<T>` addressed by a typed index `I`.
///
/// Removal shifts every later element down by one, exactly like
/// `Vec::remove`; callers are responsible for renumbering any handle that
/// pointed past the removed slot.
#[derive(Clone, PartialEq)]
pub struct IndexVec<I: Idx, T> {
    raw: Vec<T>,
    _marker: PhantomData<fn(&I)>,
}

impl<I: Idx, T> IndexVec<I, T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            raw: Vec::new(),
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw: Vec::with_capacity(capacity),
            _marker: PhantomData,
        }
    }

    /// Creates a sequence of `len` clones of `value`.
    #[must_use]
    pub fn from_elem(value: T, len: usize) -> Self
    where
        T: Clone,
    {
        Self {
            raw: vec![value; len],
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Appends `value` and returns its index.
    pub fn push(&mut self, value: T) -> I {
        let index = I::new(self.raw.len());
        self.raw.push(value);
        index
    }

    #[inline]
    pub fn get(&self, index: I) -> Option<&T> {
        if index.is_valid() {
            self.raw.get(index.value())
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: I) -> Option<&mut T> {
        if index.is_valid() {
            self.raw.get_mut(index.value())
        } else {
            None
        }
    }

    /// Removes the element at `index`, shifting the tail down.
    ///
    /// Returns `None` when `index` is out of range.
    pub fn remove(&mut self, index: I) -> Option<T> {
        if index.is_valid() && index.value() < self.raw.len() {
            Some(self.raw.remove(index.value()))
        } else {
            None
        }
    }

    pub fn truncate(&mut self, len: usize) {
        self.raw.truncate(len);
    }

    pub fn resize_with(&mut self, len: usize, f: impl FnMut() -> T) {
        self.raw.resize_with(len, f);
    }

    pub fn clear(&mut self) {
        self.raw.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.raw.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.raw.iter_mut()
    }

    /// Iterates `(index, &element)` pairs in ascending index order.
    pub fn iter_enumerated(&self) -> impl DoubleEndedIterator<Item = (I, &T)> + '_ {
        self.raw.iter().enumerate().map(|(i, v)| (I::new(i), v))
    }

    /// All valid indices in ascending order.
    pub fn indices(&self) -> impl DoubleEndedIterator<Item = I> + use<I, T> {
        (0..self.raw.len()).map(I::new)
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.raw
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.raw
    }
}

impl<I: Idx, T> Default for IndexVec<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Idx, T: fmt::Debug> fmt::Debug for IndexVec<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.raw, f)
    }
}

impl<I: Idx, T> Index<I> for IndexVec<I, T> {
    type Output = T;

    #[inline]
    fn index(&self, index: I) -> &T {
        &self.raw[index.value()]
    }
}

impl<I: Idx, T> IndexMut<I> for IndexVec<I, T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut T {
        &mut self.raw[index.value()]
    }
}

impl<I: Idx, T> From<Vec<T>> for IndexVec<I, T> {
    fn from(raw: Vec<T>) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }
}

impl<I: Idx, T> FromIterator<T> for IndexVec<I, T> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a, I: Idx, T> IntoIterator for &'a IndexVec<I, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.raw.iter()
    }
}

impl<I: Idx, T> IntoIterator for IndexVec<I, T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.raw.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    define_index! {
        struct TestIndex;
    }

    #[test]
    fn test_invalid_is_default_and_max() {
        assert_eq!(TestIndex::default(), TestIndex::INVALID);
        assert!(!TestIndex::INVALID.is_valid());
        assert!(TestIndex::new(3) < TestIndex::INVALID);
        assert_eq!(format!("{:?}", TestIndex::INVALID), "TestIndex(INVALID)");
        assert_eq!(format!("{}", TestIndex::new(7)), "7");
    }

    #[test]
    fn test_push_get_remove() {
        let mut v: IndexVec<TestIndex, &str> = IndexVec::new();
        let a = v.push("a");
        let b = v.push("b");
        let c = v.push("c");
        assert_eq!((a.value(), b.value(), c.value()), (0, 1, 2));

        assert_eq!(v.remove(b), Some("b"));
        assert_eq!(v[TestIndex::new(1)], "c");
        assert_eq!(v.len(), 2);
        assert!(v.get(TestIndex::INVALID).is_none());
        assert!(v.remove(TestIndex::new(9)).is_none());
    }

    #[test]
    fn test_iter_enumerated_order() {
        let v: IndexVec<TestIndex, u8> = vec![10, 20, 30].into();
        let collected: Vec<_> = v.iter_enumerated().map(|(i, x)| (i.value(), *x)).collect();
        assert_eq!(collected, vec![(0, 10), (1, 20), (2, 30)]);
        let rev: Vec<_> = v.indices().rev().map(TestIndex::value).collect();
        assert_eq!(rev, vec![2, 1, 0]);
    }
}
