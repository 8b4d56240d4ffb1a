use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ops::Range;
use std::ptr::NonNull;

use crate::error::ListError;
use crate::list::cursor::{Cursor, CursorMut};
use crate::{IntoIter, Iter, IterMut};

pub mod cursor;
pub mod iterator;

mod algorithms;

#[cfg(test)]
mod tests;

/// The `List` is a singly-linked list with owned nodes, implemented as a circular
/// list. It allows pushing at both ends, and inserting or removing after any
/// given position, in constant time. Splicing and splitting are constant time
/// pointer surgery as well.
///
/// In compromise, the list does not cache its length: [`List::count`] walks the
/// ring in *O*(*n*) time.
///
/// The `List` contains only a pointer `last` to the tail node of the ring, or
/// nothing if the list is empty. The head of the list is always `last.next`.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of list nodes, both inclusive;
/// - `start..end`: a half-open range of list nodes, left inclusive and right
///   exclusive.
pub struct List<T> {
    last: Option<NonNull<Node<T>>>,
    _marker: PhantomData<Box<Node<T>>>,
}

pub(crate) struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) element: T,
}

/// A position in the ring, as seen by cursors.
///
/// `At { prev, node }` always satisfies `prev.next == node`. For the head
/// node, `prev` is the `last` node of the list (or the node itself if it is
/// the only one).
pub(crate) enum Position<T> {
    BeforeBegin,
    At {
        prev: NonNull<Node<T>>,
        node: NonNull<Node<T>>,
    },
    End,
}

impl<T> Clone for Position<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Position<T> {}

impl<T> PartialEq for Position<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Position::BeforeBegin, Position::BeforeBegin) => true,
            (Position::At { node: a, .. }, Position::At { node: b, .. }) => a == b,
            (Position::End, Position::End) => true,
            _ => false,
        }
    }
}

impl<T> Eq for Position<T> {}

/// Nodes fragment detached from a list, used in list splitting or
/// splicing.
///
/// While detached, the fragment is a closed ring: `back.next == front`.
pub(crate) struct DetachedNodes<T> {
    pub(crate) front: NonNull<Node<T>>,
    pub(crate) back: NonNull<Node<T>>,
    _marker: PhantomData<Box<Node<T>>>,
}

// private methods
impl<T> List<T> {
    pub(crate) fn last_node(&self) -> Option<NonNull<Node<T>>> {
        self.last
    }

    pub(crate) fn front_node(&self) -> Option<NonNull<Node<T>>> {
        // SAFETY: `last.next` is always valid (either `last` itself, or the first
        // element in the ring).
        self.last.map(|last| unsafe { last.as_ref().next })
    }

    /// The position of the first element, or `End` if the list is empty.
    pub(crate) fn begin_position(&self) -> Position<T> {
        match self.last {
            Some(last) => Position::At {
                prev: last,
                // SAFETY: `last` is a valid node of the ring.
                node: unsafe { last.as_ref().next },
            },
            None => Position::End,
        }
    }

    /// The position following `pos`. `End` is a fixed point.
    pub(crate) fn next_position(&self, pos: Position<T>) -> Position<T> {
        match pos {
            Position::BeforeBegin => self.begin_position(),
            Position::At { node, .. } if Some(node) == self.last => Position::End,
            Position::At { node, .. } => Position::At {
                prev: node,
                // SAFETY: `node` belongs to the ring, so `node.next` is valid.
                node: unsafe { node.as_ref().next },
            },
            Position::End => Position::End,
        }
    }

    /// The node a new element is linked after when inserting after `pos`, and
    /// whether that new element becomes the `last` node.
    ///
    /// Inserting after the before-begin position never moves `last`, while
    /// inserting after the `last` node (or at the end) always does.
    pub(crate) fn anchor_of(&self, pos: Position<T>) -> (Option<NonNull<Node<T>>>, bool) {
        match pos {
            Position::BeforeBegin => (self.last, self.last.is_none()),
            Position::At { node, .. } => (Some(node), Some(node) == self.last),
            Position::End => (self.last, true),
        }
    }

    /// Link a single detached `node` right after `anchor`, or make it a ring of
    /// one if `anchor` is `None`. Set it as the `last` node if `becomes_last`.
    ///
    /// It is unsafe because it does not check whether `anchor` belongs to the list,
    /// or whether `anchor` is `None` only for an empty list.
    pub(crate) unsafe fn attach_after(
        &mut self,
        anchor: Option<NonNull<Node<T>>>,
        mut node: NonNull<Node<T>>,
        becomes_last: bool,
    ) {
        match anchor {
            Some(mut anchor) => {
                node.as_mut().next = anchor.as_ref().next;
                anchor.as_mut().next = node;
            }
            None => {
                debug_assert!(self.is_empty(), "only an empty list has no anchor");
                node.as_mut().next = node;
            }
        }
        if becomes_last || self.last.is_none() {
            self.last = Some(node);
        }
    }

    /// Unlink the node after `anchor` from the list, and return it.
    ///
    /// It is unsafe because it does not check whether `anchor` belongs to the list.
    ///
    /// If the `anchor` does not belong to the list, this function call will make
    /// the list ill-formed.
    pub(crate) unsafe fn detach_after(
        &mut self,
        mut anchor: NonNull<Node<T>>,
    ) -> NonNull<Node<T>> {
        let node = anchor.as_ref().next;
        let next = node.as_ref().next;
        anchor.as_mut().next = next;
        if node == next {
            self.last = None;
        } else if Some(node) == self.last {
            self.last = Some(anchor);
        }
        node
    }

    /// Attach a closed ring of detached nodes right after `anchor`. If the list
    /// is empty, the detached nodes simply become the list.
    ///
    /// It is unsafe because it does not check whether `anchor` belongs to the list.
    pub(crate) unsafe fn attach_nodes_after(
        &mut self,
        anchor: Option<NonNull<Node<T>>>,
        detached: DetachedNodes<T>,
        becomes_last: bool,
    ) {
        let DetachedNodes {
            front, mut back, ..
        } = detached;
        match anchor {
            Some(mut anchor) => {
                back.as_mut().next = anchor.as_ref().next;
                anchor.as_mut().next = front;
                if becomes_last {
                    self.last = Some(back);
                }
            }
            None => {
                debug_assert!(self.is_empty(), "only an empty list has no anchor");
                self.last = Some(back);
            }
        }
    }

    /// Cut the nodes `front..=back` out of the list and close them into a ring
    /// of their own. `prev` is the node right before `front`.
    ///
    /// It is unsafe because it does not check whether `front..=back` is a valid
    /// range of the list, or whether `prev.next == front`.
    pub(crate) unsafe fn detach_nodes(
        &mut self,
        mut prev: NonNull<Node<T>>,
        front: NonNull<Node<T>>,
        mut back: NonNull<Node<T>>,
    ) -> DetachedNodes<T> {
        debug_assert!(prev.as_ref().next == front);
        prev.as_mut().next = back.as_ref().next;
        back.as_mut().next = front;
        if Some(back) == self.last {
            self.last = if prev == back { None } else { Some(prev) };
        }
        DetachedNodes::new(front, back)
    }

    /// Detach all nodes from the list, and return the detached nodes, or return
    /// `None` if the list is empty.
    pub(crate) fn detach_all_nodes(&mut self) -> Option<DetachedNodes<T>> {
        let back = self.last.take()?;
        // SAFETY: `back` was the last node of a closed ring.
        let front = unsafe { back.as_ref().next };
        Some(DetachedNodes::new(front, back))
    }

    /// Construct a list from detached nodes.
    pub(crate) fn from_detached(detached: DetachedNodes<T>) -> Self {
        let mut list = List::new();
        // SAFETY: the list is empty, so `None` is the only valid anchor.
        unsafe { list.attach_nodes_after(None, detached, true) };
        list
    }

    /// Sort the ring with `compare`, relinking nodes only.
    pub(crate) fn sort_nodes<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        if let Some(last) = self.last.as_mut() {
            // SAFETY: `last` is the tail of a valid ring owned by `self`.
            unsafe { algorithms::sort::merge_sort(last, &mut compare) };
        }
    }

    /// Provides a cursor with editing operations after the first `at` elements,
    /// so that inserting after it puts the new element at index `at`.
    fn cursor_mut_after(&mut self, at: usize) -> Result<CursorMut<'_, T>, ListError> {
        let count = self.count();
        if at > count {
            return Err(ListError::OutOfBounds { index: at, count });
        }
        let mut cursor = self.cursor_before_begin_mut();
        cursor.seek_forward(at).map_err(|_| ListError::OutOfBounds { index: at, count })?;
        Ok(cursor)
    }
}

impl<T> List<T> {
    /// Create an empty `List`. No memory is allocated.
    ///
    /// # Examples
    /// ```
    /// use cyclic_slist::List;
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            last: None,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.is_empty());
    ///
    /// list.push_front("foo");
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }

    /// Returns the number of elements in the `List`.
    ///
    /// The length is not cached, which keeps splicing and splitting in constant
    /// time.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::new();
    /// list.push_front(2);
    /// list.push_back(3);
    /// assert_eq!(list.count(), 2);
    /// ```
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Removes all elements from the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    #[inline]
    pub fn clear(&mut self) {
        while self.pop_front().is_ok() {}
    }

    /// Provides a reference to the front element, or [`ListError::EmptyAccess`]
    /// if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::{List, ListError};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.front(), Err(ListError::EmptyAccess));
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Ok(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Result<&T, ListError> {
        self.cursor_start().current().ok_or(ListError::EmptyAccess)
    }

    /// Provides a mutable reference to the front element, or
    /// [`ListError::EmptyAccess`] if the list is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Result<&mut T, ListError> {
        let mut front = self.front_node().ok_or(ListError::EmptyAccess)?;
        // SAFETY: `front` is a valid node owned by the list, which is borrowed
        // mutably for the lifetime of the returned reference.
        Ok(unsafe { &mut front.as_mut().element })
    }

    /// Provides a reference to the back element, or [`ListError::EmptyAccess`]
    /// if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::{List, ListError};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.back(), Err(ListError::EmptyAccess));
    ///
    /// list.push_back(1);
    /// list.push_front(0);
    /// assert_eq!(list.back(), Ok(&1));
    /// ```
    #[inline]
    pub fn back(&self) -> Result<&T, ListError> {
        let last = self.last.ok_or(ListError::EmptyAccess)?;
        // SAFETY: `last` is a valid node owned by the list.
        Ok(unsafe { &(*last.as_ptr()).element })
    }

    /// Provides a mutable reference to the back element, or
    /// [`ListError::EmptyAccess`] if the list is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Result<&mut T, ListError> {
        let mut last = self.last.ok_or(ListError::EmptyAccess)?;
        // SAFETY: `last` is a valid node owned by the list, which is borrowed
        // mutably for the lifetime of the returned reference.
        Ok(unsafe { &mut last.as_mut().element })
    }

    /// Adds an element first in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.front(), Ok(&2));
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Ok(&1));
    /// assert_eq!(list.back(), Ok(&2));
    /// ```
    pub fn push_front(&mut self, elt: T) {
        self.cursor_before_begin_mut().insert_after(elt);
    }

    /// Appends an element to the back of a list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.back(), Ok(&3));
    /// ```
    pub fn push_back(&mut self, elt: T) {
        self.cursor_end_mut().insert_after(elt);
    }

    /// Removes the first element and returns it, or [`ListError::EmptyAccess`]
    /// if the list is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::{List, ListError};
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_front(), Err(ListError::EmptyAccess));
    ///
    /// list.push_front(1);
    /// list.push_front(3);
    /// assert_eq!(list.pop_front(), Ok(3));
    /// assert_eq!(list.pop_front(), Ok(1));
    /// assert_eq!(list.pop_front(), Err(ListError::EmptyAccess));
    /// ```
    pub fn pop_front(&mut self) -> Result<T, ListError> {
        self.cursor_before_begin_mut()
            .erase_after()
            .ok_or(ListError::EmptyAccess)
    }

    /// Provides a cursor at the node with given index.
    ///
    /// By convention, the cursor is at the end position if `at == count`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::OutOfBounds`] if `at > count`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// assert_eq!(list.cursor(1).unwrap().current(), Some(&2));
    /// assert!(list.cursor(3).unwrap().is_end());
    /// assert!(list.cursor(4).is_err());
    /// ```
    pub fn cursor(&self, at: usize) -> Result<Cursor<'_, T>, ListError> {
        let mut cursor = self.cursor_start();
        cursor
            .seek_forward(at)
            .map_err(|_| ListError::OutOfBounds {
                index: at,
                count: self.count(),
            })?;
        Ok(cursor)
    }

    /// Provides a cursor at the before-begin position, which is only an anchor
    /// for [`CursorMut::insert_after`] and friends and has no element.
    pub fn cursor_before_begin(&self) -> Cursor<'_, T> {
        Cursor::new(self, Position::BeforeBegin)
    }

    /// Provides a cursor at the first node, or at the end position if the list
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// let cursor = list.cursor_start();
    /// assert_eq!(cursor.current(), Some(&1));
    /// ```
    pub fn cursor_start(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.begin_position())
    }

    /// Provides a cursor at the end position, right past the last node.
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, Position::End)
    }

    /// Provides a cursor with editing operations at the node with given index.
    ///
    /// By convention, the cursor is at the end position if `at == count`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::OutOfBounds`] if `at > count`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_mut(1).unwrap();
    ///
    /// if let Some(x) = cursor.current_mut() {
    ///     *x *= 5;
    /// }
    /// assert_eq!(cursor.current(), Some(&10));
    /// assert_eq!(list.cursor_mut(3).unwrap().current_mut(), None);
    /// ```
    pub fn cursor_mut(&mut self, at: usize) -> Result<CursorMut<'_, T>, ListError> {
        let count = self.count();
        if at > count {
            return Err(ListError::OutOfBounds { index: at, count });
        }
        let mut cursor = self.cursor_start_mut();
        cursor
            .seek_forward(at)
            .map_err(|_| ListError::OutOfBounds { index: at, count })?;
        Ok(cursor)
    }

    /// Provides a cursor with editing operations at the before-begin position.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::from([2, 3]);
    /// let mut cursor = list.cursor_before_begin_mut();
    /// cursor.insert_after(1);
    /// assert_eq!(cursor.current(), Some(&1));
    /// assert_eq!(list, List::from([1, 2, 3]));
    /// ```
    pub fn cursor_before_begin_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self, Position::BeforeBegin)
    }

    /// Provides a cursor with editing operations at the first node, or at the end
    /// position if the list is empty.
    pub fn cursor_start_mut(&mut self) -> CursorMut<'_, T> {
        let pos = self.begin_position();
        CursorMut::new(self, pos)
    }

    /// Provides a cursor with editing operations at the end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// let mut cursor = list.cursor_end_mut();
    /// cursor.insert_after(3);
    /// assert_eq!(list.back(), Ok(&3));
    /// ```
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self, Position::End)
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::from([0, 1, 2]);
    ///
    /// for element in list.iter_mut() {
    ///     *element += 10;
    /// }
    ///
    /// assert_eq!(list, List::from([10, 11, 12]));
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Inserts an element after the first `at` elements, so that it ends up at
    /// index `at`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::OutOfBounds`] if `at > count`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    ///
    /// list.insert_after(2, 4).unwrap();
    /// list.insert_after(4, 5).unwrap();
    /// assert!(list.insert_after(7, 6).is_err());
    ///
    /// assert_eq!(list, List::from([1, 2, 4, 3, 5]));
    /// ```
    pub fn insert_after(&mut self, at: usize, elt: T) -> Result<(), ListError> {
        self.cursor_mut_after(at)?.insert_after(elt);
        Ok(())
    }

    /// Moves all elements from `other` to the end of the list.
    ///
    /// This reuses all the nodes from `other` and moves them into `self`. After
    /// this operation, `other` becomes empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list1 = List::from(['a']);
    /// let mut list2 = List::from(['b', 'c']);
    ///
    /// list1.append(&mut list2);
    ///
    /// assert_eq!(list1, List::from(['a', 'b', 'c']));
    /// assert!(list2.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        self.cursor_end_mut().splice_after(other);
    }

    /// Moves all elements from `other` to the begin of the list.
    ///
    /// This reuses all the nodes from `other` and moves them into `self`. After
    /// this operation, `other` becomes empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list1 = List::from(['a']);
    /// let mut list2 = List::from(['b', 'c']);
    ///
    /// list2.prepend(&mut list1);
    ///
    /// assert_eq!(list2, List::from(['a', 'b', 'c']));
    /// assert!(list1.is_empty());
    /// ```
    pub fn prepend(&mut self, other: &mut Self) {
        self.cursor_before_begin_mut().splice_after(other);
    }

    /// Splices another list after the first `at` elements. After this operation,
    /// `other` becomes empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time to find the position, the
    /// splicing itself is *O*(1).
    ///
    /// # Errors
    ///
    /// Returns [`ListError::OutOfBounds`] if `at > count`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut other = List::from([4, 5, 6]);
    ///
    /// list.splice_after(2, &mut other).unwrap();
    ///
    /// assert_eq!(list, List::from([1, 2, 4, 5, 6, 3]));
    /// assert!(other.is_empty());
    /// ```
    pub fn splice_after(&mut self, at: usize, other: &mut Self) -> Result<(), ListError> {
        self.cursor_mut_after(at)?.splice_after(other);
        Ok(())
    }

    /// Splits the elements in `range` off the list, and returns them as a new
    /// list. The remaining elements are closed around the gap.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time to find the positions, the
    /// splitting itself is *O*(1).
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidRange`] if `range.start > range.end`, or
    /// [`ListError::OutOfBounds`] if `range.end > count`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::from([0, 1, 2, 3, 4]);
    /// let split = list.split_off(1..3).unwrap();
    ///
    /// assert_eq!(split, List::from([1, 2]));
    /// assert_eq!(list, List::from([0, 3, 4]));
    /// ```
    pub fn split_off(&mut self, range: Range<usize>) -> Result<List<T>, ListError> {
        if range.start > range.end {
            return Err(ListError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        let count = self.count();
        if range.end > count {
            return Err(ListError::OutOfBounds {
                index: range.end,
                count,
            });
        }
        let mut cursor = self.cursor_mut(range.start)?;
        cursor.set_mark();
        cursor
            .seek_forward(range.end - range.start)
            .map_err(|_| ListError::OutOfBounds {
                index: range.end,
                count,
            })?;
        Ok(cursor.split_from_mark())
    }

    /// Erases the elements in `range`, and returns how many were erased.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// The same as [`List::split_off`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::from([0, 1, 2, 3, 4]);
    /// assert_eq!(list.erase_range(2..5), Ok(3));
    /// assert_eq!(list, List::from([0, 1]));
    /// ```
    pub fn erase_range(&mut self, range: Range<usize>) -> Result<usize, ListError> {
        let erased = self.split_off(range)?;
        Ok(erased.count())
    }

    /// Asserts the invariants of the ring: following `next` from the `last` node
    /// visits every node exactly once and returns to `last`.
    ///
    /// # Panics
    ///
    /// Panics if the ring is ill-formed.
    pub fn assert_valid(&self) {
        let last = match self.last {
            Some(last) => last,
            None => return,
        };
        let mut seen = std::collections::HashSet::new();
        let mut node = last;
        loop {
            assert!(
                seen.insert(node),
                "a node was visited twice before the ring returned to `last`"
            );
            // SAFETY: every node reachable from `last` is owned by the list.
            node = unsafe { node.as_ref().next };
            if node == last {
                break;
            }
        }
        assert_eq!(seen.len(), self.count(), "ring length differs from count");
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Node<T> {
    /// Create a detached node with given element. Its `next` pointer refers to
    /// itself until it is linked into a ring.
    pub(crate) fn new_detached(element: T) -> NonNull<Node<T>> {
        let node = Box::leak(Box::new(Node {
            next: NonNull::dangling(),
            element,
        }));
        node.next = NonNull::from(&*node);
        NonNull::from(node)
    }

    /// Reclaim a node that has been unlinked from every list.
    ///
    /// It is unsafe because `node` must have been created by
    /// [`Node::new_detached`] and must not be reachable from any list.
    pub(crate) unsafe fn into_element(node: NonNull<Node<T>>) -> T {
        Box::from_raw(node.as_ptr()).element
    }
}

impl<T> DetachedNodes<T> {
    fn new(front: NonNull<Node<T>>, back: NonNull<Node<T>>) -> Self {
        // SAFETY: detached nodes are closed rings.
        debug_assert!(unsafe { back.as_ref().next } == front);
        Self {
            front,
            back,
            _marker: PhantomData,
        }
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}

// Ensure that `List` and its read-only iterators are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}

#[cfg(test)]
mod list_tests {
    use crate::error::ListError;
    use crate::list::List;
    use std::cell::RefCell;
    use std::fmt::Debug;

    #[test]
    fn list_create() {
        let mut list = List::<i32>::new();
        assert!(list.is_empty());
        list.push_back(1);
        assert!(!list.is_empty());
        assert_eq!(list.pop_front(), Ok(1));
        assert!(list.is_empty());
        list.assert_valid();
    }

    #[test]
    fn list_drop() {
        #[derive(Debug)]
        struct DropChecker<'a, T: Copy> {
            value: T,
            dropped: &'a RefCell<Vec<T>>,
        }
        impl<'a, T: Copy> DropChecker<'a, T> {
            fn new(value: T, dropped: &'a RefCell<Vec<T>>) -> Self {
                Self { value, dropped }
            }
        }
        impl<'a, T: Copy> Drop for DropChecker<'a, T> {
            fn drop(&mut self) {
                self.dropped.borrow_mut().push(self.value);
            }
        }
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut list = List::new();
        list.push_back(DropChecker::new(1, &dropped));
        list.push_back(DropChecker::new(2, &dropped));
        list.push_back(DropChecker::new(3, &dropped));
        drop(list);
        assert_eq!(dropped.borrow().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn list_push_and_pop() {
        let mut list = List::new();
        assert!(list.is_empty());
        assert_eq!(list.count(), 0);

        assert_eq!(list.front(), Err(ListError::EmptyAccess));
        assert_eq!(list.back(), Err(ListError::EmptyAccess));
        assert_eq!(list.pop_front(), Err(ListError::EmptyAccess));

        list.push_back(1);
        assert_eq!(list.back(), Ok(&1));
        assert_eq!(list.front(), Ok(&1));
        assert_eq!(list.pop_front(), Ok(1));
        assert!(list.is_empty());

        list.push_front(1);
        list.push_front(2);
        list.push_back(3);
        list.assert_valid();
        assert_eq!(list.count(), 3);
        assert_eq!(list.back(), Ok(&3));
        assert_eq!(list.front(), Ok(&2));
        assert_eq!(list.pop_front(), Ok(2));
        assert_eq!(list.pop_front(), Ok(1));
        assert_eq!(list.front(), Ok(&3));
        assert_eq!(list.back(), Ok(&3));
        assert_eq!(list.pop_front(), Ok(3));
        assert_eq!(list.front(), Err(ListError::EmptyAccess));
        assert!(list.is_empty());
    }

    #[test]
    fn list_front_and_back_mut() {
        let mut list = List::from([1, 2, 3]);
        *list.front_mut().unwrap() = 10;
        *list.back_mut().unwrap() = 30;
        assert_eq!(list, List::from([10, 2, 30]));

        let mut empty = List::<i32>::new();
        assert_eq!(empty.front_mut(), Err(ListError::EmptyAccess));
        assert_eq!(empty.back_mut(), Err(ListError::EmptyAccess));
    }

    #[test]
    fn list_insert_after() {
        fn list_eq<T, I>(list: &List<T>, expected: I)
        where
            T: Debug + Clone + Eq,
            I: IntoIterator<Item = T>,
        {
            list.assert_valid();
            assert_eq!(
                Vec::from_iter(list.iter().cloned()),
                Vec::from_iter(expected)
            );
        }

        let mut list = List::from_iter(0..10);
        list.insert_after(5, 10).unwrap();
        list_eq(&list, (0..5).chain(Some(10)).chain(5..10));

        list.insert_after(0, 11).unwrap();
        assert_eq!(list.front(), Ok(&11));
        list_eq(&list, (11..=11).chain(0..5).chain(Some(10)).chain(5..10));

        list.insert_after(12, 12).unwrap();
        assert_eq!(list.back(), Ok(&12));
        list_eq(
            &list,
            (11..=11).chain(0..5).chain(Some(10)).chain(5..10).chain(Some(12)),
        );

        assert_eq!(
            list.insert_after(14, 13),
            Err(ListError::OutOfBounds {
                index: 14,
                count: 13
            })
        );
    }

    #[test]
    fn list_split_and_append() {
        fn test_list_split_and_append_and_prepend<T, I1, I2, I3>(
            list: I1,
            other: I2,
            at: usize,
            appended: I3,
        ) where
            T: Clone + Eq + Debug,
            I1: IntoIterator<Item = T>,
            I2: IntoIterator<Item = T>,
            I3: IntoIterator<Item = T>,
        {
            // Construct the lists with iterators.
            let mut list = List::from_iter(list);
            let other = List::from_iter(other);
            let appended = List::from_iter(appended);

            let cloned = list.clone();
            let mut other_cloned = other.clone();

            // Test append
            list.append(&mut other_cloned);
            list.assert_valid();
            assert!(other_cloned.is_empty());
            assert_eq!(list, appended);
            assert_eq!(list.count(), cloned.count() + other.count());

            // Test split
            let total = list.count();
            let split = list.split_off(at..total).unwrap();
            list.assert_valid();
            split.assert_valid();
            assert_eq!(list, cloned);
            assert_eq!(split, other);

            // Test prepend
            let mut front = cloned.clone();
            let mut back = other.clone();
            back.prepend(&mut front);
            back.assert_valid();
            assert!(front.is_empty());
            assert_eq!(back, appended);

            // Test split at the head
            let head = back.split_off(0..at).unwrap();
            back.assert_valid();
            head.assert_valid();
            assert_eq!(head, cloned);
            assert_eq!(back, other);
        }
        test_list_split_and_append_and_prepend(0..5, 5..7, 5, 0..7);
        test_list_split_and_append_and_prepend(0..5, None, 5, 0..5);
        test_list_split_and_append_and_prepend(0..5, 5..6, 5, 0..6);
        test_list_split_and_append_and_prepend(0..1, 1..3, 1, 0..3);
        test_list_split_and_append_and_prepend(0..1, None, 1, 0..1);
        test_list_split_and_append_and_prepend(0..1, 1..2, 1, 0..2);
        test_list_split_and_append_and_prepend(None, 0..2, 0, 0..2);
        test_list_split_and_append_and_prepend::<i32, _, _, _>(None, None, 0, None);
        test_list_split_and_append_and_prepend(None, 0..1, 0, 0..1);
    }

    #[test]
    fn list_splice() {
        fn test_list_splice<T, I1, I2, I3>(list: I1, other: I2, at: usize, spliced: I3)
        where
            T: Clone + Eq + Debug,
            I1: IntoIterator<Item = T>,
            I2: IntoIterator<Item = T>,
            I3: IntoIterator<Item = T>,
        {
            let mut list = List::from_iter(list);
            let mut other = List::from_iter(other);
            let spliced = List::from_iter(spliced);

            list.splice_after(at, &mut other).unwrap();
            list.assert_valid();
            assert!(other.is_empty());
            assert_eq!(list, spliced);
            assert_eq!(list.back().ok(), spliced.back().ok());
        }
        test_list_splice(0..5, 5..7, 5, 0..7);
        test_list_splice(0..5, 5..7, 2, (0..2).chain(5..7).chain(2..5));
        test_list_splice(0..5, 5..7, 0, (5..7).chain(0..5));
        test_list_splice(0..5, Some(5), 5, 0..6);
        test_list_splice(0..5, Some(5), 2, (0..2).chain(Some(5)).chain(2..5));
        test_list_splice(0..5, Some(5), 0, Some(5).into_iter().chain(0..5));
        test_list_splice(Some(0), 1..3, 1, 0..3);
        test_list_splice(Some(0), 1..3, 0, (1..3).chain(Some(0)));
        test_list_splice(None, 0..2, 0, 0..2);
        test_list_splice(None, Some(0), 0, Some(0));
        test_list_splice::<i32, _, _, _>(None, None, 0, None);
    }

    #[test]
    fn list_split_off_ranges() {
        let mut list = List::from_iter(0..6);

        let empty = list.split_off(3..3).unwrap();
        assert!(empty.is_empty());
        assert_eq!(list, List::from_iter(0..6));

        let head = list.split_off(0..2).unwrap();
        assert_eq!(head, List::from([0, 1]));
        assert_eq!(list, List::from_iter(2..6));
        assert_eq!(list.front(), Ok(&2));
        assert_eq!(list.back(), Ok(&5));

        let all = list.split_off(0..4).unwrap();
        all.assert_valid();
        assert_eq!(all, List::from_iter(2..6));
        assert!(list.is_empty());

        #[allow(clippy::reversed_empty_ranges)]
        let reversed = list.split_off(1..0);
        assert_eq!(reversed, Err(ListError::InvalidRange { start: 1, end: 0 }));
        assert_eq!(
            list.split_off(0..1),
            Err(ListError::OutOfBounds { index: 1, count: 0 })
        );
    }

    #[test]
    fn list_erase_range() {
        let mut list = List::from_iter(0..8);
        assert_eq!(list.erase_range(2..5), Ok(3));
        list.assert_valid();
        assert_eq!(list, List::from([0, 1, 5, 6, 7]));
        assert_eq!(list.back(), Ok(&7));

        assert_eq!(list.erase_range(3..5), Ok(2));
        assert_eq!(list.back(), Ok(&5));
        assert_eq!(list.erase_range(1..1), Ok(0));
        assert_eq!(list.erase_range(0..3), Ok(3));
        assert!(list.is_empty());
    }

    #[test]
    fn list_count() {
        let mut list = List::new();
        assert!(list.is_empty());
        assert_eq!(list.count(), 0);

        list.push_back(1);
        assert_eq!(list.count(), 1);

        list.pop_front().unwrap();
        assert_eq!(list.count(), 0);

        list.append(&mut List::from_iter(0..5));
        assert_eq!(list.count(), 5);

        list.splice_after(3, &mut List::from_iter(5..7)).unwrap();
        assert_eq!(list.count(), 7);

        let other = list.split_off(4..7).unwrap();
        assert_eq!(list.count(), 4);
        assert_eq!(other.count(), 3);

        list.prepend(&mut List::from_iter(7..10));
        assert_eq!(list.count(), 7);

        list.clear();
        assert_eq!(list.count(), 0);
    }

    #[test]
    fn list_reverse() {
        let mut list = List::from_iter(0..5);
        list.reverse();
        list.assert_valid();
        assert_eq!(list, List::from([4, 3, 2, 1, 0]));
        assert_eq!(list.back(), Ok(&0));
        list.reverse();
        assert_eq!(list, List::from_iter(0..5));

        let mut single = List::from([1]);
        single.reverse();
        assert_eq!(single, List::from([1]));

        let mut empty = List::<i32>::new();
        empty.reverse();
        assert!(empty.is_empty());
    }

    #[test]
    fn list_find_and_remove() {
        let mut list = List::from([10, 20, 30, 40, 30, 50]);
        assert_eq!(list.find(&30).current(), Some(&30));
        assert_eq!(list.find(&30).peek_next(), Some(&40));
        assert!(list.find(&60).is_end());
        assert!(list.contains(&50));

        assert_eq!(list.remove(&30), 2);
        list.assert_valid();
        assert_eq!(list, List::from([10, 20, 40, 50]));
        assert_eq!(list.remove(&50), 1);
        assert_eq!(list.back(), Ok(&40));
        assert_eq!(list.remove(&60), 0);

        if let Some(x) = list.get_mut(&20) {
            *x = 25;
        }
        assert_eq!(list.get(&25), Some(&25));
        assert_eq!(list.get(&20), None);

        let mut same = List::from([7, 7, 7]);
        assert_eq!(same.remove(&7), 3);
        assert!(same.is_empty());
    }

    #[test]
    fn list_find_by_projection() {
        let mut list: List<String> = ["one", "two", "three"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(list.find("two").current().map(String::as_str), Some("two"));
        assert_eq!(list.remove("one"), 1);
        assert_eq!(list.front().map(String::as_str), Ok("two"));
    }

    #[test]
    fn list_scenario() {
        let mut list = List::new();
        for x in [5, 3, 8, 1] {
            list.push_back(x);
        }
        assert_eq!(list, List::from([5, 3, 8, 1]));
        list.sort();
        assert_eq!(list, List::from([1, 3, 5, 8]));
        list.push_front(0);
        assert_eq!(list, List::from([0, 1, 3, 5, 8]));
        assert_eq!(list.remove(&3), 1);
        assert_eq!(list, List::from([0, 1, 5, 8]));
        assert_eq!(list.pop_front(), Ok(0));
        assert_eq!(list, List::from([1, 5, 8]));
        list.assert_valid();
    }
}
