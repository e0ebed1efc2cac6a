//! Arena-backed doubly-linked list
//!
//! Nodes are stored in `Vec<Option<Node<T>>>` and reference their neighbours
//! by slot index. Removing a node vacates its slot and pushes it on the free
//! list, so the next push reuses it instead of growing the arena.
//!
//! Every node is stamped from a counter that never repeats within a list,
//! and handles carry that stamp. A handle whose slot was vacated or reused
//! no longer matches and is rejected.

use std::collections::TryReserveError;
use std::fmt;
use std::iter::FusedIterator;

use crate::error::{Error, Result};

/// Stable reference to a node in a [`List`]
///
/// Valid only while the node remains linked in the list that returned it.
/// Passing a handle from another list, or one whose node was removed, is a
/// bug in the caller and panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: usize,
    stamp: u64,
}

impl Handle {
    /// Slot index backing this handle
    pub fn index(self) -> usize {
        self.index
    }
}

struct Node<T> {
    value: T,
    stamp: u64,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Doubly-linked list with O(1) removal and move-to-front by handle
pub struct List<T> {
    nodes: Vec<Option<Node<T>>>,
    free_list: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    next_stamp: u64,
}

impl<T> List<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty list with room for `capacity` nodes before the arena grows
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            head: None,
            tail: None,
            len: 0,
            next_stamp: 0,
        }
    }

    /// Reserve arena room for `additional` more nodes, failing instead of
    /// aborting when the allocation cannot be made
    pub fn try_reserve(&mut self, additional: usize) -> std::result::Result<(), TryReserveError> {
        self.nodes.try_reserve(additional)
    }

    /// Number of linked nodes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle of the first node
    pub fn front(&self) -> Option<Handle> {
        self.head.map(|idx| self.handle(idx))
    }

    /// Handle of the last node
    pub fn back(&self) -> Option<Handle> {
        self.tail.map(|idx| self.handle(idx))
    }

    /// Insert `value` before the current head
    pub fn push_front(&mut self, value: T) -> Handle {
        let idx = self.alloc(value);
        self.link_front(idx);
        self.len += 1;
        self.handle(idx)
    }

    /// Insert `value` after the current tail
    pub fn push_back(&mut self, value: T) -> Handle {
        let idx = self.alloc(value);
        self.link_back(idx);
        self.len += 1;
        self.handle(idx)
    }

    /// Unlink the node and return its payload
    ///
    /// # Panics
    /// If `handle` is not linked in this list.
    pub fn remove(&mut self, handle: Handle) -> T {
        let idx = self.resolve(handle);
        self.unlink(idx);
        self.len -= 1;

        match self.nodes[idx].take() {
            Some(node) => {
                self.free_list.push(idx);
                node.value
            }
            // resolve() already rejected vacant slots
            None => unreachable!(),
        }
    }

    /// Relink the node as the new head
    ///
    /// No-op when the node is already the head or the list holds fewer than
    /// two nodes. The handle keeps naming the same payload afterwards.
    pub fn move_to_front(&mut self, handle: Handle) {
        if self.len < 2 {
            return;
        }

        let idx = self.resolve(handle);
        if self.head == Some(idx) {
            return;
        }

        self.unlink(idx);
        self.link_front(idx);
    }

    /// Borrow the payload behind `handle`
    pub fn get(&self, handle: Handle) -> &T {
        &self.node(self.resolve(handle)).value
    }

    /// Mutably borrow the payload behind `handle`
    pub fn get_mut(&mut self, handle: Handle) -> &mut T {
        let idx = self.resolve(handle);
        &mut self.node_mut(idx).value
    }

    /// Handle of the node after `handle`, towards the tail
    pub fn next(&self, handle: Handle) -> Option<Handle> {
        let next = self.node(self.resolve(handle)).next;
        next.map(|idx| self.handle(idx))
    }

    /// Handle of the node before `handle`, towards the head
    pub fn prev(&self, handle: Handle) -> Option<Handle> {
        let prev = self.node(self.resolve(handle)).prev;
        prev.map(|idx| self.handle(idx))
    }

    /// Iterate payloads from front to back
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Drop every node; all outstanding handles become invalid
    ///
    /// Stamps keep counting across a clear, so pre-clear handles stay
    /// rejected after their slots are reused.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Walk the list and check every structural invariant
    ///
    /// Checks that head/tail agree with the length, that every `prev` link
    /// mirrors the `next` link before it, that the walk reaches exactly
    /// `len` nodes and ends at the tail, and that occupied plus free slots
    /// cover the arena.
    pub fn validate(&self) -> Result<()> {
        match (self.head, self.tail, self.len) {
            (None, None, 0) => {}
            (Some(_), Some(_), len) if len > 0 => {}
            _ => return Err(Error::DanglingEnds),
        }

        let mut walked = 0;
        let mut prev = None;
        let mut cursor = self.head;

        while let Some(idx) = cursor {
            let node = match self.nodes.get(idx) {
                Some(Some(node)) => node,
                _ => return Err(Error::BrokenLink { slot: idx }),
            };
            if node.prev != prev {
                return Err(Error::BrokenLink { slot: idx });
            }

            walked += 1;
            if walked > self.len {
                // cycle or overlong chain
                return Err(Error::LengthMismatch {
                    recorded: self.len,
                    walked,
                });
            }

            prev = Some(idx);
            cursor = node.next;
        }

        if walked != self.len {
            return Err(Error::LengthMismatch {
                recorded: self.len,
                walked,
            });
        }
        if prev != self.tail {
            return Err(Error::DanglingEnds);
        }

        let occupied = self.nodes.iter().filter(|slot| slot.is_some()).count();
        let free_is_vacant = self
            .free_list
            .iter()
            .all(|&idx| matches!(self.nodes.get(idx), Some(None)));

        if occupied != self.len
            || occupied + self.free_list.len() != self.nodes.len()
            || !free_is_vacant
        {
            return Err(Error::SlotLeak {
                occupied,
                free: self.free_list.len(),
                slots: self.nodes.len(),
            });
        }

        Ok(())
    }

    fn alloc(&mut self, value: T) -> usize {
        let stamp = self.next_stamp;
        self.next_stamp += 1;

        let node = Node {
            value,
            stamp,
            prev: None,
            next: None,
        };

        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx] = Some(node);
            idx
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        }
    }

    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let node = self.node_mut(idx);
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(head_idx) => self.node_mut(head_idx).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn link_back(&mut self, idx: usize) {
        let old_tail = self.tail;
        {
            let node = self.node_mut(idx);
            node.prev = old_tail;
            node.next = None;
        }

        match old_tail {
            Some(tail_idx) => self.node_mut(tail_idx).next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.node(idx);
            (node.prev, node.next)
        };

        match prev {
            Some(prev_idx) => self.node_mut(prev_idx).next = next,
            None => self.head = next,
        }

        match next {
            Some(next_idx) => self.node_mut(next_idx).prev = prev,
            None => self.tail = prev,
        }

        let node = self.node_mut(idx);
        node.prev = None;
        node.next = None;
    }

    fn handle(&self, idx: usize) -> Handle {
        Handle {
            index: idx,
            stamp: self.node(idx).stamp,
        }
    }

    /// Slot index of a live handle; panics on stale or foreign handles
    fn resolve(&self, handle: Handle) -> usize {
        match self.nodes.get(handle.index) {
            Some(Some(node)) if node.stamp == handle.stamp => handle.index,
            _ => panic!("stale list handle: slot {} is not linked", handle.index),
        }
    }

    fn node(&self, idx: usize) -> &Node<T> {
        match self.nodes.get(idx) {
            Some(Some(node)) => node,
            _ => panic!("corrupt list link: slot {} is vacant", idx),
        }
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<T> {
        match self.nodes.get_mut(idx) {
            Some(Some(node)) => node,
            _ => panic!("corrupt list link: slot {} is vacant", idx),
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over a [`List`], front to back
pub struct Iter<'a, T> {
    list: &'a List<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.list.node(self.front?);
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.list.node(self.back?);
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
