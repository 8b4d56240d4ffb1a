use crate::list::Node;
use crate::util::trace;
use std::cmp::Ordering;
use std::ptr::NonNull;

/// The successor of `node` within the current pass, or `None` when the
/// successor is `oldhead`, i.e. the pass has walked around the whole ring.
unsafe fn next_in_pass<T>(
    node: NonNull<Node<T>>,
    oldhead: NonNull<Node<T>>,
) -> Option<NonNull<Node<T>>> {
    let next = node.as_ref().next;
    if next == oldhead {
        None
    } else {
        Some(next)
    }
}

/// The state of one merge pass over the ring.
///
/// Every node of the ring is, in order, either in the merged chain
/// `head..=tail`, among the `psize` nodes left in the left run from `p`, or in
/// the unvisited chain from `q` up to the end of the pass. When dropped, the
/// three parts are closed into a single ring again and `last` is updated, so a
/// panicking comparator leaves a valid list behind.
struct Pass<'a, T> {
    last: &'a mut NonNull<Node<T>>,
    oldhead: NonNull<Node<T>>,
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    p: Option<NonNull<Node<T>>>,
    psize: usize,
    q: Option<NonNull<Node<T>>>,
}

impl<'a, T> Pass<'a, T> {
    fn new(last: &'a mut NonNull<Node<T>>) -> Self {
        // SAFETY: `last` is a node of a valid ring.
        let oldhead = unsafe { (*last).as_ref().next };
        Self {
            last,
            oldhead,
            head: None,
            tail: None,
            p: None,
            psize: 0,
            q: Some(oldhead),
        }
    }

    /// Start a new pass over the ring beginning at `head`.
    fn restart(&mut self, head: NonNull<Node<T>>) {
        self.oldhead = head;
        self.p = None;
        self.psize = 0;
        self.q = Some(head);
    }

    /// Append `node` to the merged chain.
    unsafe fn push(&mut self, node: NonNull<Node<T>>) {
        match self.tail {
            Some(mut tail) => tail.as_mut().next = node,
            None => self.head = Some(node),
        }
        self.tail = Some(node);
    }

    /// Close the merged chain into a ring, make its tail the `last` node, and
    /// return its head.
    unsafe fn close(&mut self) -> Option<NonNull<Node<T>>> {
        let (head, mut tail) = (self.head.take()?, self.tail.take()?);
        tail.as_mut().next = head;
        *self.last = tail;
        Some(head)
    }
}

impl<T> Drop for Pass<'_, T> {
    fn drop(&mut self) {
        // SAFETY: the left run and the unvisited chain still carry their
        // original links, and every node they hold is pushed exactly once.
        unsafe {
            while self.psize > 0 {
                let node = match self.p {
                    Some(node) => node,
                    None => break,
                };
                self.psize -= 1;
                self.p = next_in_pass(node, self.oldhead);
                self.push(node);
            }
            while let Some(node) = self.q {
                self.q = next_in_pass(node, self.oldhead);
                self.push(node);
            }
            self.close();
        }
    }
}

/// Sort the ring ending at `last` by `compare` with a bottom-up merge sort,
/// and point `last` at the new tail of the ring.
///
/// Every pass merges adjacent runs of `insize` nodes into runs twice as long,
/// and closes the merged chain into a ring again. The sort ends with the first
/// pass that performs at most one merge.
///
/// If `compare` panics, the nodes are left in an unspecified order, but still
/// form a valid ring ending at `last`.
///
/// It is unsafe because `last` must be a node of a valid ring, whose nodes are
/// not aliased during the sort.
pub(crate) unsafe fn merge_sort<T, F>(last: &mut NonNull<Node<T>>, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut pass = Pass::new(last);
    let mut insize = 1_usize;
    loop {
        let oldhead = pass.oldhead;
        let mut nmerges = 0_usize;

        while let Some(run) = pass.q {
            nmerges += 1;

            // Step `q` over at most `insize` nodes, which form the left run.
            pass.p = Some(run);
            pass.psize = 0;
            while pass.psize < insize {
                match pass.q {
                    Some(node) => {
                        pass.psize += 1;
                        pass.q = next_in_pass(node, oldhead);
                    }
                    None => break,
                }
            }
            let mut qsize = insize;

            // Merge the left run `p` with the right run `q`.
            loop {
                let from_p = if pass.psize > 0 { pass.p } else { None };
                let from_q = if qsize > 0 { pass.q } else { None };
                let (element, from_left) = match (from_p, from_q) {
                    (None, None) => break,
                    (Some(p_node), None) => (p_node, true),
                    (None, Some(q_node)) => (q_node, false),
                    (Some(p_node), Some(q_node)) => {
                        let order = compare(&p_node.as_ref().element, &q_node.as_ref().element);
                        // On a tie, the left run wins, which keeps the sort stable.
                        if order == Ordering::Greater {
                            (q_node, false)
                        } else {
                            (p_node, true)
                        }
                    }
                };
                if from_left {
                    pass.psize -= 1;
                    pass.p = next_in_pass(element, oldhead);
                } else {
                    qsize -= 1;
                    pass.q = next_in_pass(element, oldhead);
                }
                pass.push(element);
            }
        }

        trace!(insize, nmerges, "merge pass");
        match pass.close() {
            Some(head) if nmerges > 1 => {
                pass.restart(head);
                insize *= 2;
            }
            _ => return,
        }
    }
}
