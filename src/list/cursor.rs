use crate::error::ListError;
use crate::list::{List, Node, Position};
use crate::util::trace;
use std::fmt;
use std::fmt::Formatter;

/// A cursor over a `List`.
///
/// A `Cursor` is like an iterator, except that it can stay put, and it can
/// also point to the positions before the first element and past the last one.
///
/// In a list with length *n*, there are *n* + 2 valid locations for the cursor:
/// the before-begin position, the *n* elements, and the end position. The
/// before-begin position is an anchor for inserting at the front, it never
/// holds an element.
///
/// # Examples
///
/// Here is a simple example showing how the cursors work. (The before-begin
/// position is denoted by `^`, and the end position by `$`).
/// ```
/// use cyclic_slist::List;
///
/// // Create a list: [^ A B C D $]
/// let list = List::from(['A', 'B', 'C', 'D']);
///
/// // Create a cursor at start: [^|A B C D $]
/// let mut cursor = list.cursor_start();
/// assert_eq!(cursor.current(), Some(&'A'));
///
/// // Move cursor forward: [^ A|B C D $]
/// assert!(cursor.move_next().is_ok());
/// assert_eq!(cursor.current(), Some(&'B'));
/// assert_eq!(cursor.peek_next(), Some(&'C'));
///
/// // Create a cursor in the end: [^ A B C D|$]
/// let mut cursor = list.cursor_end();
/// assert_eq!(cursor.current(), None);
/// assert!(cursor.move_next().is_err());
///
/// // Move cursor forward, cyclically: [^|A B C D $]
/// cursor.move_next_cyclic();
/// assert_eq!(cursor.current(), Some(&'A'));
///
/// // The before-begin position holds nothing, but peeks at the front.
/// let cursor = list.cursor_before_begin();
/// assert_eq!(cursor.current(), None);
/// assert_eq!(cursor.peek_next(), Some(&'A'));
/// ```
pub struct Cursor<'a, T: 'a> {
    pub(crate) pos: Position<T>,
    pub(crate) list: &'a List<T>,
}

impl<'a, T: 'a> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        Self {
            pos: self.pos,
            list: self.list,
        }
    }
}

/// Compare cursors by its position.
///
/// Only cursors belong to the same list and have the same positions
/// are considered equal.
///
/// # Examples
/// ```
/// use cyclic_slist::List;
///
/// let list = List::from([1, 2, 3]);
/// let cursor1 = list.cursor_start();
/// let mut cursor2 = cursor1.clone();
/// // The same list, and the same position.
/// assert_eq!(cursor1, cursor2);
///
/// cursor2.move_next_cyclic();
/// // The same list, but different positions.
/// assert_ne!(cursor1, cursor2);
///
/// let another_list = list.clone();
/// let cursor3 = another_list.cursor_start();
/// // Different list, different positions.
/// assert_ne!(cursor1, cursor3);
///
/// // A failed search lands on the end position.
/// assert_eq!(list.find(&4), list.cursor_end());
/// ```
impl<'a, T: 'a> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_list_with(other) && self.pos == other.pos
    }
}

impl<'a, T: 'a> Eq for Cursor<'a, T> {}

/// A cursor over a `List` with editing operations.
///
/// A `CursorMut` can safely mutate the list during iteration. This is because the
/// lifetime of its yielded references is tied to its own lifetime, instead of just
/// the underlying list. This means cursors cannot yield multiple elements at once.
///
/// Besides its position, a `CursorMut` may hold a *mark*, set by
/// [`CursorMut::set_mark`]. The half-open range from the mark to the cursor can
/// then be split off or erased in one step. Any structural change made through
/// the cursor clears the mark, and so do moving to the start, moving to the
/// before-begin position and wrapping around the end.
///
/// # Examples
///
/// ```compile_fail
/// use cyclic_slist::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut cursor = list.cursor_start_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", cursor.current());
/// ```
pub struct CursorMut<'a, T: 'a> {
    pub(crate) pos: Position<T>,
    pub(crate) list: &'a mut List<T>,
    mark: Option<Position<T>>,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        impl<'a, T: 'a> $CURSOR<'a, T> {
            /// Returns `true` if the `List` is empty. See [`List::is_empty`].
            pub fn is_empty(&self) -> bool {
                self.list.is_empty()
            }

            /// Returns `true` if the cursor is at the end position.
            pub fn is_end(&self) -> bool {
                self.pos == Position::End
            }

            /// Returns `true` if the cursor is at the before-begin position.
            pub fn is_before_begin(&self) -> bool {
                self.pos == Position::BeforeBegin
            }

            /// Move the cursor to the next position, where passing through the
            /// end position is allowed.
            ///
            /// From the end position (and from the before-begin position), the
            /// cursor moves to the first element. On an empty list, it does nothing.
            ///
            /// This operation should compute in *O*(*1*) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use cyclic_slist::List;
            ///
            /// let list = List::from([1, 2, 3]);
            /// let mut cursor = list.cursor(2).unwrap();
            ///
            /// cursor.move_next_cyclic();
            /// assert!(cursor.is_end());
            ///
            /// cursor.move_next_cyclic();
            /// assert_eq!(cursor.current(), Some(&1));
            /// ```
            pub fn move_next_cyclic(&mut self) {
                if self.is_empty() {
                    return;
                }
                if self.is_end() {
                    self.rewind();
                    self.pos = self.list.begin_position();
                } else {
                    self.pos = self.list.next_position(self.pos);
                }
            }

            /// Move the cursor to the next position, or return an error
            /// when the cursor is at the end position.
            ///
            /// This operation should compute in *O*(*1*) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use cyclic_slist::{List, ListError};
            ///
            /// let list = List::from([1, 2, 3]);
            /// let mut cursor = list.cursor(2).unwrap();
            ///
            /// assert!(cursor.move_next().is_ok());
            /// assert!(cursor.is_end());
            ///
            /// // Forbid to move passing through the end
            /// assert_eq!(cursor.move_next(), Err(ListError::PastEnd));
            /// assert!(cursor.is_end());
            /// ```
            pub fn move_next(&mut self) -> Result<(), ListError> {
                if self.is_end() {
                    return Err(ListError::PastEnd);
                }
                self.pos = self.list.next_position(self.pos);
                Ok(())
            }

            /// Move forward the cursor by given steps, or return the number of
            /// steps actually taken when it reaches the end position first.
            ///
            /// If an error occurs, the cursor will stay at the end position.
            ///
            /// This operation should compute in *O*(*n*) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use cyclic_slist::List;
            ///
            /// let list = List::from([1, 2, 3]);
            /// let mut cursor = list.cursor_start();
            ///
            /// assert!(cursor.seek_forward(2).is_ok());
            /// assert_eq!(cursor.current(), Some(&3));
            ///
            /// // Forbid to move passing through the end
            /// assert_eq!(cursor.seek_forward(5), Err(1));
            /// assert!(cursor.is_end());
            /// ```
            pub fn seek_forward(&mut self, steps: usize) -> Result<(), usize> {
                (0..steps).try_for_each(|i| self.move_next().map_err(|_| i))
            }

            /// Move the cursor to the first element, or to the end position if
            /// the list is empty.
            #[inline]
            pub fn move_to_start(&mut self) {
                self.rewind();
                self.pos = self.list.begin_position();
            }

            /// Move the cursor to the before-begin position.
            #[inline]
            pub fn move_to_before_begin(&mut self) {
                self.rewind();
                self.pos = Position::BeforeBegin;
            }

            /// Move the cursor to the end position.
            #[inline]
            pub fn move_to_end(&mut self) {
                self.pos = Position::End;
            }
        }

        impl<'a, T: fmt::Debug + 'a> fmt::Debug for $CURSOR<'a, T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                let position = match self.pos {
                    Position::BeforeBegin => "before-begin",
                    Position::At { .. } => "at",
                    Position::End => "end",
                };
                f.debug_struct(stringify!($CURSOR))
                    .field("list", &self.list)
                    .field("position", &position)
                    .field("current", &self.current())
                    .finish()
            }
        }
    };
}

impl_cursor!(CursorMut);
impl_cursor!(Cursor);

impl<'a, T: 'a> Cursor<'a, T> {
    pub(crate) fn new(list: &'a List<T>, pos: Position<T>) -> Self {
        Self { pos, list }
    }

    fn same_list_with(&self, other: &Self) -> bool {
        std::ptr::eq(self.list, other.list)
    }

    // A shared cursor has no mark to drop.
    #[inline]
    fn rewind(&mut self) {}

    /// Provides a reference to the element at the cursor, or `None` at the
    /// before-begin and end positions.
    pub fn current(&self) -> Option<&'a T> {
        match self.pos {
            // SAFETY: `node` is a valid node of the list, which is borrowed for 'a.
            Position::At { node, .. } => Some(unsafe { &(*node.as_ptr()).element }),
            _ => None,
        }
    }

    /// Provides a reference to the element after the cursor, or `None` if the
    /// cursor is at the last element or at the end position.
    pub fn peek_next(&self) -> Option<&'a T> {
        let next = match self.pos {
            Position::BeforeBegin => self.list.front_node()?,
            Position::At { node, .. } if Some(node) == self.list.last_node() => return None,
            // SAFETY: `node` is a valid node of the list.
            Position::At { node, .. } => unsafe { node.as_ref().next },
            Position::End => return None,
        };
        // SAFETY: `next` is a valid node of the list, which is borrowed for 'a.
        Some(unsafe { &(*next.as_ptr()).element })
    }
}

impl<'a, T: 'a> CursorMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>, pos: Position<T>) -> Self {
        Self {
            pos,
            list,
            mark: None,
        }
    }

    fn rewind(&mut self) {
        self.mark = None;
    }
}

// Methods that do not change the linking structure of the list.
impl<'a, T: 'a> CursorMut<'a, T> {
    /// Provides a reference to the element at the cursor, or `None` at the
    /// before-begin and end positions.
    pub fn current(&self) -> Option<&T> {
        self.as_cursor().current()
    }

    /// Provides a mutable reference to the element at the cursor, or `None` at
    /// the before-begin and end positions.
    pub fn current_mut(&mut self) -> Option<&mut T> {
        match self.pos {
            // SAFETY: `node` is a valid node of the list, which is borrowed
            // mutably through `self`.
            Position::At { mut node, .. } => Some(unsafe { &mut node.as_mut().element }),
            _ => None,
        }
    }

    /// Provides a reference to the element after the cursor.
    /// See [`Cursor::peek_next`].
    pub fn peek_next(&self) -> Option<&T> {
        self.as_cursor().peek_next()
    }

    /// Provides a read-only cursor at the same position, borrowing this one.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.list, self.pos)
    }

    /// Converts into a read-only cursor at the same position.
    pub fn into_cursor(self) -> Cursor<'a, T> {
        Cursor::new(self.list, self.pos)
    }

    /// Temporarily borrows the whole list.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_start_mut();
    /// cursor.insert_after(4);
    /// assert_eq!(cursor.view(), &List::from([1, 4, 2, 3]));
    /// ```
    pub fn view(&self) -> &List<T> {
        self.list
    }

    /// Sets the mark at the current position. A mark set at the before-begin
    /// position is placed at the first element instead.
    pub fn set_mark(&mut self) {
        let mark = match self.pos {
            Position::BeforeBegin => self.list.begin_position(),
            pos => pos,
        };
        self.mark = Some(mark);
    }

    /// Removes the mark, if any.
    pub fn clear_mark(&mut self) {
        self.mark = None;
    }

    /// Returns `true` if a mark is set.
    pub fn has_mark(&self) -> bool {
        self.mark.is_some()
    }
}

// Methods that might change the linking structure of the list.
impl<'a, T: 'a> CursorMut<'a, T> {
    /// Inserts a new element directly after the cursor, and moves the cursor
    /// onto it.
    ///
    /// - At the before-begin position, the element becomes the first one.
    /// - At an element, the new element follows it, and becomes the last one
    ///   if the cursor was at the last element.
    /// - At the end position, the element becomes the last one.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::from([1, 3]);
    /// let mut cursor = list.cursor_start_mut();
    /// cursor.insert_after(2);
    /// assert_eq!(cursor.current(), Some(&2));
    ///
    /// cursor.move_to_end();
    /// cursor.insert_after(4);
    /// assert_eq!(cursor.current(), Some(&4));
    /// assert_eq!(list, List::from([1, 2, 3, 4]));
    /// ```
    pub fn insert_after(&mut self, elt: T) {
        let (anchor, becomes_last) = self.list.anchor_of(self.pos);
        let node = Node::new_detached(elt);
        // SAFETY: `anchor` is a node of the list, or `None` for an empty list.
        unsafe { self.list.attach_after(anchor, node, becomes_last) };
        self.pos = Position::At {
            prev: anchor.unwrap_or(node),
            node,
        };
        self.mark = None;
    }

    /// Inserts a new element directly before the cursor. The cursor stays at
    /// its element, or at the end position.
    ///
    /// At the before-begin position, the element is inserted at the front.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::from([1, 3]);
    /// let mut cursor = list.cursor_mut(1).unwrap();
    /// cursor.insert_before(2);
    /// assert_eq!(cursor.current(), Some(&3));
    ///
    /// cursor.move_to_end();
    /// cursor.insert_before(4);
    /// assert!(cursor.is_end());
    /// assert_eq!(list, List::from([1, 2, 3, 4]));
    /// ```
    pub fn insert_before(&mut self, elt: T) {
        match self.pos {
            Position::At { prev, node } => {
                let new = Node::new_detached(elt);
                // SAFETY: `prev` is the node before the cursor.
                unsafe { self.list.attach_after(Some(prev), new, false) };
                self.pos = Position::At { prev: new, node };
            }
            Position::End => self.list.push_back(elt),
            Position::BeforeBegin => self.list.push_front(elt),
        }
        self.mark = None;
    }

    /// Removes the element after the cursor and returns it. The cursor does not
    /// move, its next element is now the one following the removed element.
    ///
    /// Returns `None` if the cursor is at the last element or at the end position.
    /// Although the nodes form a ring, erasing never wraps around to the first
    /// element here: the last element has no next element. To remove the first
    /// element, erase after the before-begin position, or use
    /// [`List::pop_front`].
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_start_mut();
    /// assert_eq!(cursor.erase_after(), Some(2));
    /// assert_eq!(cursor.erase_after(), Some(3));
    /// assert_eq!(cursor.erase_after(), None);
    /// assert_eq!(list, List::from([1]));
    /// ```
    pub fn erase_after(&mut self) -> Option<T> {
        let anchor = match self.pos {
            Position::BeforeBegin => self.list.last_node()?,
            Position::At { node, .. } if Some(node) == self.list.last_node() => return None,
            Position::At { node, .. } => node,
            Position::End => return None,
        };
        // SAFETY: `anchor` is a node of the list, and its successor is an element.
        let removed = unsafe { self.list.detach_after(anchor) };
        if let Position::At { prev, node } = &mut self.pos {
            // In a ring of two, the node before the cursor was the one removed.
            if *prev == removed {
                *prev = *node;
            }
        }
        self.mark = None;
        // SAFETY: `removed` is unlinked from the list.
        Some(unsafe { Node::into_element(removed) })
    }

    /// Removes the element at the cursor and returns it. The cursor moves to the
    /// next element, or to the end position if the last element was removed.
    ///
    /// Returns `None` at the before-begin and end positions.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_mut(1).unwrap();
    /// assert_eq!(cursor.remove_current(), Some(2));
    /// assert_eq!(cursor.current(), Some(&3));
    /// assert_eq!(cursor.remove_current(), Some(3));
    /// assert!(cursor.is_end());
    /// assert_eq!(list, List::from([1]));
    /// ```
    pub fn remove_current(&mut self) -> Option<T> {
        let (prev, node) = match self.pos {
            Position::At { prev, node } => (prev, node),
            _ => return None,
        };
        let was_last = Some(node) == self.list.last_node();
        // SAFETY: `prev` is the node before the cursor.
        let removed = unsafe { self.list.detach_after(prev) };
        debug_assert!(removed == node);
        self.pos = if was_last || self.list.is_empty() {
            Position::End
        } else {
            Position::At {
                prev,
                // SAFETY: `prev` is still linked in the list.
                node: unsafe { prev.as_ref().next },
            }
        };
        self.mark = None;
        // SAFETY: `removed` is unlinked from the list.
        Some(unsafe { Node::into_element(removed) })
    }

    /// Splits the elements from the mark (inclusive) to the cursor (exclusive)
    /// off the list, and returns them as a new list. The mark is cleared.
    ///
    /// If no mark is set, or the mark is at the cursor, nothing is split off and
    /// the returned list is empty.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::from([1, 2, 3, 4, 5]);
    /// let mut cursor = list.cursor_mut(1).unwrap();
    /// cursor.set_mark();
    /// cursor.seek_forward(2).unwrap();
    ///
    /// let split = cursor.split_from_mark();
    /// assert_eq!(cursor.current(), Some(&4));
    /// assert_eq!(split, List::from([2, 3]));
    /// assert_eq!(list, List::from([1, 4, 5]));
    /// ```
    pub fn split_from_mark(&mut self) -> List<T> {
        let (front_prev, front) = match self.mark.take() {
            Some(Position::At { prev, node }) => (prev, node),
            _ => return List::new(),
        };
        let back = match self.pos {
            Position::At { node, .. } if node == front => return List::new(),
            Position::At { prev, .. } => prev,
            Position::End => match self.list.last_node() {
                Some(last) => last,
                None => return List::new(),
            },
            Position::BeforeBegin => return List::new(),
        };
        // SAFETY: the mark never lies after the cursor, so `front..=back` is a
        // valid range of the list and `front_prev.next == front`.
        let detached = unsafe { self.list.detach_nodes(front_prev, front, back) };
        if let Position::At { prev, .. } = &mut self.pos {
            *prev = front_prev;
        }
        trace!("split_from_mark");
        List::from_detached(detached)
    }

    /// Erases the elements from the mark (inclusive) to the cursor (exclusive),
    /// and returns how many were erased. See [`CursorMut::split_from_mark`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::from([1, 2, 3, 4, 5]);
    /// let mut cursor = list.cursor_start_mut();
    /// cursor.move_next().unwrap();
    /// cursor.set_mark();
    /// cursor.move_to_end();
    /// assert_eq!(cursor.erase_from_mark(), 4);
    /// assert_eq!(list, List::from([1]));
    /// ```
    pub fn erase_from_mark(&mut self) -> usize {
        self.split_from_mark().count()
    }

    /// Moves all elements of `other` directly after the cursor. The cursor does
    /// not move, and `other` becomes empty.
    ///
    /// The anchor rules are the same as for [`CursorMut::insert_after`].
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::from([1, 4]);
    /// let mut other = List::from([2, 3]);
    ///
    /// let mut cursor = list.cursor_start_mut();
    /// cursor.splice_after(&mut other);
    /// assert_eq!(cursor.current(), Some(&1));
    /// assert_eq!(cursor.peek_next(), Some(&2));
    ///
    /// assert_eq!(list, List::from([1, 2, 3, 4]));
    /// assert!(other.is_empty());
    /// ```
    pub fn splice_after(&mut self, other: &mut List<T>) {
        let detached = match other.detach_all_nodes() {
            Some(detached) => detached,
            None => return,
        };
        let (anchor, becomes_last) = self.list.anchor_of(self.pos);
        // SAFETY: `anchor` is a node of the list, or `None` for an empty list.
        unsafe { self.list.attach_nodes_after(anchor, detached, becomes_last) };
        if let (Position::At { prev, node }, Some(last)) = (&mut self.pos, self.list.last_node()) {
            // A lone element was its own predecessor, now the spliced tail is.
            if *prev == *node {
                *prev = last;
            }
        }
        self.mark = None;
        trace!(becomes_last, "splice_after");
    }
}

unsafe impl<T: Sync> Send for Cursor<'_, T> {}

unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

unsafe impl<T: Send> Send for CursorMut<'_, T> {}

unsafe impl<T: Sync> Sync for CursorMut<'_, T> {}
