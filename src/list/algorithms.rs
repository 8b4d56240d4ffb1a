use crate::list::cursor::Cursor;
use crate::list::{List, Position};
use crate::util::trace;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

pub(super) mod sort;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for List<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    /// Overwrites the elements of `self` in place, appends what `self` lacks,
    /// and drops what `other` lacks. Existing nodes are reused.
    fn clone_from(&mut self, other: &Self) {
        let mut cursor = self.cursor_start_mut();
        for elem_other in other {
            match cursor.current_mut() {
                Some(elem) => {
                    elem.clone_from(elem_other);
                    // Only the end position cannot move forward.
                    if cursor.move_next().is_err() {
                        break;
                    }
                }
                None => cursor.insert_before(elem_other.clone()),
            }
        }
        cursor.set_mark();
        cursor.move_to_end();
        cursor.erase_from_mark();
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the given value.
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
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.iter().any(|e| <T as Borrow<Q>>::borrow(e) == value)
    }

    /// Sort the list.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time and *O*(1) memory.
    ///
    /// # Current Implementation
    ///
    /// The current algorithm is a bottom-up merge sort, which only relinks
    /// nodes. There is no extra temporary storage during merging.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::from([5, 2, 4, 3, 1]);
    ///
    /// list.sort();
    ///
    /// assert_eq!(list, List::from([1, 2, 3, 4, 5]));
    /// assert_eq!(list.back(), Ok(&5));
    /// ```
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_nodes(T::cmp);
    }

    /// Sort the list with a comparator function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// The comparator function must define a total ordering for the
    /// elements in the list. If the ordering is not total, the order
    /// of the elements is unspecified.
    ///
    /// For example, while [`f64`] doesn’t implement [`Ord`] because
    /// `NaN != NaN`, we can use `partial_cmp` as our sort function
    /// when we know the list doesn’t contain a `NaN`.
    /// ```
    /// use cyclic_slist::List;
    /// let mut floats = List::from([5f64, 4.0, 1.0, 3.0, 2.0]);
    /// floats.sort_by(|a, b| a.partial_cmp(b).unwrap());
    /// assert_eq!(floats, List::from([1.0, 2.0, 3.0, 4.0, 5.0]));
    /// ```
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    /// let mut v = List::from([5, 4, 1, 3, 2]);
    /// v.sort_by(|a, b| a.cmp(b));
    /// assert_eq!(v, List::from([1, 2, 3, 4, 5]));
    ///
    /// // reverse sorting
    /// v.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(v, List::from([5, 4, 3, 2, 1]));
    /// ```
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.sort_nodes(compare);
    }

    /// Sorts the list with a key extraction function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements)
    /// and *O*(*m* \* *n* \* log(*n*)) worst-case, where the
    /// key function is *O*(*m*).
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    /// let mut v = List::from([-5i32, 4, 1, -3, 2]);
    ///
    /// v.sort_by_key(|k| k.abs());
    /// assert_eq!(v, List::from([1, 2, -3, 4, -5]));
    /// ```
    pub fn sort_by_key<K, F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        self.sort_nodes(|a, b| f(a).cmp(&f(b)));
    }
}

impl<T> List<T> {
    /// Reverses the list in place, by moving every node from the front of the
    /// list to the front of an accumulator list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// list.reverse();
    /// assert_eq!(list, List::from([3, 2, 1]));
    /// ```
    pub fn reverse(&mut self) {
        let mut reversed = List::new();
        while let Some(last) = self.last {
            // SAFETY: `last` is a valid node of `self`, and the unlinked node is
            // attached before-begin into `reversed`.
            unsafe {
                let node = self.detach_after(last);
                let (anchor, becomes_last) = reversed.anchor_of(Position::BeforeBegin);
                reversed.attach_after(anchor, node, becomes_last);
            }
        }
        std::mem::swap(self, &mut reversed);
        trace!("reverse: done");
    }

    /// Returns a cursor at the first element equal to `value`, or a cursor at
    /// the end position if there is none.
    ///
    /// The comparison goes through the [`Borrow`] projection, so that e.g. a
    /// `List<String>` can be searched with a `&str`.
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
    /// let list = List::from([String::from("a"), String::from("b")]);
    /// let found = list.find("b");
    /// assert_eq!(found.current().map(String::as_str), Some("b"));
    /// assert!(list.find("z").is_end());
    /// ```
    pub fn find<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        let mut cursor = self.cursor_start();
        while let Some(element) = cursor.current() {
            if <T as Borrow<Q>>::borrow(element) == value || cursor.move_next().is_err() {
                break;
            }
        }
        cursor
    }

    /// Returns a reference to the first element equal to `value`.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.find(value).current()
    }

    /// Returns a mutable reference to the first element equal to `value`.
    pub fn get_mut<Q>(&mut self, value: &Q) -> Option<&mut T>
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.iter_mut()
            .find(|element| <T as Borrow<Q>>::borrow(element) == value)
    }

    /// Removes every element equal to `value`, and returns how many were removed.
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
    /// let mut list = List::from([10, 20, 30, 40, 30, 50]);
    /// assert_eq!(list.remove(&30), 2);
    /// assert_eq!(list, List::from([10, 20, 40, 50]));
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.remove_by(|element| <T as Borrow<Q>>::borrow(element) == value)
    }

    /// Removes every element for which `pred` returns `true`, and returns how
    /// many were removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_slist::List;
    ///
    /// let mut list = List::from([1, 2, 3, 4, 5, 6]);
    /// assert_eq!(list.remove_by(|x| x % 2 == 0), 3);
    /// assert_eq!(list, List::from([1, 3, 5]));
    /// ```
    pub fn remove_by<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut removed = 0;
        let mut cursor = self.cursor_start_mut();
        while let Some(element) = cursor.current() {
            if pred(element) {
                drop(cursor.remove_current());
                removed += 1;
            } else if cursor.move_next().is_err() {
                break;
            }
        }
        removed
    }
}
