//! This crate provides a singly-linked list with owned nodes, implemented as a
//! circular list.
//!
//! The [`List`] allows pushing elements at both ends, and inserting or removing
//! elements after any given position, in constant time. Moving a whole list (or
//! a range of it) into another list is constant time pointer surgery as well.
//! In compromise, accessing elements at any position, and counting them, take
//! *O*(*n*) time.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use cyclic_slist::List;
//!
//! let mut list = List::from([1, 2, 3, 4]);
//!
//! let mut cursor = list.cursor_before_begin_mut();
//!
//! cursor.insert_after(0); // insert 0 at the beginning of the list
//! assert_eq!(cursor.current(), Some(&0));
//! assert_eq!(cursor.view(), &List::from([0, 1, 2, 3, 4]));
//!
//! cursor.seek_forward(2).unwrap(); // move the cursor to 2, and remove the next one.
//! assert_eq!(cursor.erase_after(), Some(3));
//! assert_eq!(cursor.view(), &List::from([0, 1, 2, 4]));
//!
//! cursor.move_to_end(); // inserting at the end pushes back
//! cursor.insert_after(5);
//! assert_eq!(list, List::from([0, 1, 2, 4, 5]));
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the list is like the following graph:
//! ```text
//!    ┌──────────────────────────────────────────────────────────────────┐
//!    ↓                                                                  │
//! ╔═══════════╗           ╔═══════════╗                        ╔═══════════╗
//! ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ ║   next    ║
//! ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ╟───────────╢
//! ║ payload T ║           ║ payload T ║                        ║ payload T ║
//! ╚═══════════╝           ╚═══════════╝                        ╚═══════════╝
//!     Node 0                  Node 1                            Node n - 1
//!                                                                   ↑
//! ╔═══════════╗                                                     │
//! ║   last    ║ ────────────────────────────────────────────────────┘
//! ╚═══════════╝
//!     List
//! ```
//! The `List` contains only a pointer `last` to the last node, or nothing if the
//! list is empty. There is no sentinel node, so an empty list allocates nothing.
//!
//! Each node of the list `List<T>` is allocated on heap, which contains:
//! - the `next` pointer that points to the next element, or the first element if
//!   it is the last one;
//! - the actual payload `T`.
//!
//! So the first element is always `last.next`, which makes both ends of the list
//! reachable in constant time with a single pointer. The end of the ring is
//! detected by comparing a node with `last`.
//!
//! # Iteration
//!
//! Iterating over a list is by the [`Iter`] and [`IterMut`] iterators. These are
//! forward iterators and iterate the list like an array (fused and non-cyclic).
//! [`IterMut`] provides mutability of the elements (but not the linked structure of
//! the list).
//!
//! ## Examples
//!
//! ```
//! use cyclic_slist::List;
//!
//! let mut list = List::from([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), Some(&3));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused and non-cyclic
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```
//!
//! # Cursor Views
//!
//! Beside iteration, the cursors [`Cursor`] and [`CursorMut`] provide more
//! flexible ways of viewing a list.
//!
//! In a list with length *n*, there are *n* + 2 valid locations for a cursor:
//! the before-begin position, the *n* elements, and the end position. Since the
//! list is singly-linked, cursors only move forward. The before-begin position
//! is where insertions at the front of the list are anchored.
//!
//! # Cursor Mutations
//!
//! [`CursorMut`] provides many useful ways to mutate the list in any position.
//! - [`insert_after`]: insert a new item after the cursor, and move onto it;
//! - [`insert_before`]: insert a new item before the cursor;
//! - [`erase_after`]: remove the item after the cursor;
//! - [`remove_current`]: remove the item at the cursor;
//! - [`split_from_mark`]: split the items from a previously set mark up to the
//!   cursor into a new list;
//! - [`splice_after`]: splice another list after the cursor position.
//!
//! ## Examples
//!
//! ```
//! use cyclic_slist::List;
//!
//! let mut list = List::from([1, 2, 3, 4]);
//!
//! let mut cursor = list.cursor_start_mut();
//!
//! cursor.insert_before(5); // becomes [5, 1, 2, 3, 4], points to 1
//! assert_eq!(cursor.current(), Some(&1));
//!
//! assert!(cursor.seek_forward(2).is_ok());
//! assert_eq!(cursor.remove_current(), Some(3)); // becomes [5, 1, 2, 4], points to 4
//! assert_eq!(cursor.current(), Some(&4));
//!
//! cursor.set_mark();
//! cursor.move_to_end();
//! let tail = cursor.split_from_mark(); // becomes [5, 1, 2]
//! assert_eq!(tail, List::from([4]));
//!
//! assert_eq!(Vec::from_iter(list), vec![5, 1, 2]);
//! ```
//!
//! See more functions in [`CursorMut`].
//!
//! # Algorithms
//!
//! The list is sorted in place by a stable bottom-up merge sort, which relinks
//! nodes and never moves elements. Searching, removing by value, and reversing
//! are provided as well.
//!
//! ```
//! use cyclic_slist::List;
//!
//! let mut list = List::from([5, 3, 8, 1]);
//! list.sort();
//! list.push_front(0);
//! assert_eq!(list.remove(&3), 1);
//! assert_eq!(list.pop_front(), Ok(0));
//! assert_eq!(list, List::from([1, 5, 8]));
//!
//! list.reverse();
//! assert_eq!(list, List::from([8, 5, 1]));
//! ```
//!
//! # Features
//!
//! - `tracing` (enabled by default): emits `trace`-level [`tracing`] events for
//!   structural operations such as splicing, splitting and merge sort passes.
//!
//! [`List`]: crate::List
//! [`Iter`]: crate::Iter
//! [`IterMut`]: crate::IterMut
//! [`Cursor`]: crate::list::cursor::Cursor
//! [`CursorMut`]: crate::list::cursor::CursorMut
//! [`insert_after`]: crate::list::cursor::CursorMut::insert_after
//! [`insert_before`]: crate::list::cursor::CursorMut::insert_before
//! [`erase_after`]: crate::list::cursor::CursorMut::erase_after
//! [`remove_current`]: crate::list::cursor::CursorMut::remove_current
//! [`split_from_mark`]: crate::list::cursor::CursorMut::split_from_mark
//! [`splice_after`]: crate::list::cursor::CursorMut::splice_after
//! [`tracing`]: https://docs.rs/tracing

#[doc(inline)]
pub use error::ListError;
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;

mod util;

mod error;
pub mod list;
