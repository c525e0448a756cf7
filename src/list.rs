use crate::error::InvariantError;
use alloc::format;
use alloc::vec::Vec;
use core::fmt;

/// Upper bound on the number of nodes reserved when a list is built.
///
/// Larger lists grow on demand until they reach `cap`.
pub(crate) const MAX_PREALLOC: usize = 1024;

/// Stable handle to a node in a [`List`].
///
/// A `SlotId` stays valid until the node it names is removed. Moving other
/// nodes around never invalidates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SlotId(usize);

impl SlotId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// A node in the doubly linked list.
///
/// Links are slot ids into the owning arena rather than pointers.
struct Entry<T> {
    val: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// A doubly linked list with fixed capacity, stored in a slot arena.
///
/// Nodes live in `slots` and link to each other by index; freed slots are
/// pushed on `free` and reused by the next `add`. Because `add` refuses to
/// go past `cap`, the arena never holds more than `cap` slots and a
/// remove-then-add cycle does not allocate.
///
/// The front of the list is the most recently added or moved node.
pub(crate) struct List<T> {
    /// Maximum number of items the list can hold.
    cap: usize,
    /// Current number of items in the list.
    len: usize,
    slots: Vec<Option<Entry<T>>>,
    free: Vec<SlotId>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> List<T> {
    /// Creates a new list that holds at most `cap` items.
    ///
    /// Storage for up to [`MAX_PREALLOC`] nodes is reserved up front.
    pub(crate) fn new(cap: usize) -> List<T> {
        let reserve = cap.min(MAX_PREALLOC);
        List {
            cap,
            len: 0,
            slots: Vec::with_capacity(reserve),
            free: Vec::with_capacity(reserve),
            head: None,
            tail: None,
        }
    }

    #[inline]
    pub(crate) fn cap(&self) -> usize {
        self.cap
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.len == self.cap
    }

    #[inline]
    pub(crate) fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    #[inline]
    pub(crate) fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    pub(crate) fn get(&self, id: SlotId) -> Option<&T> {
        self.entry(id).map(|entry| &entry.val)
    }

    /// Adds a value to the front of the list.
    ///
    /// Returns the id of the new node, or `None` if the list is full. A list
    /// with zero capacity is always full.
    pub(crate) fn add(&mut self, val: T) -> Option<SlotId> {
        if self.is_full() {
            return None;
        }
        let entry = Entry {
            val,
            prev: None,
            next: None,
        };
        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = Some(entry);
                id
            }
            None => {
                self.slots.push(Some(entry));
                SlotId(self.slots.len() - 1)
            }
        };
        self.attach(id);
        self.len += 1;
        Some(id)
    }

    /// Moves a node to the front of the list.
    ///
    /// Returns `false` if `id` is not a live node.
    pub(crate) fn move_to_front(&mut self, id: SlotId) -> bool {
        if self.entry(id).is_none() {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        self.detach(id);
        self.attach(id);
        true
    }

    /// Unlinks a node, frees its slot, and returns its value.
    pub(crate) fn remove(&mut self, id: SlotId) -> Option<T> {
        self.entry(id)?;
        self.detach(id);
        let entry = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id);
        self.len -= 1;
        Some(entry.val)
    }

    /// Removes the last (least recently used) node.
    pub(crate) fn remove_last(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Replaces the value of a node in place, returning the old value.
    ///
    /// The node keeps its position in the list.
    pub(crate) fn update(&mut self, id: SlotId, val: T) -> Option<T> {
        let entry = self.slots.get_mut(id.0)?.as_mut()?;
        Some(core::mem::replace(&mut entry.val, val))
    }

    /// Drops every node. The reserved storage is kept.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates from front (most recent) to back.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
            remaining: self.len,
        }
    }

    /// Walks the list and checks that links, length and free slots agree.
    pub(crate) fn validate(&self) -> Result<(), InvariantError> {
        if self.len > self.cap {
            return Err(InvariantError::new(format!(
                "list holds {} nodes but its capacity is {}",
                self.len, self.cap
            )));
        }
        if self.slots.len() > self.cap {
            return Err(InvariantError::new(format!(
                "arena grew to {} slots past capacity {}",
                self.slots.len(),
                self.cap
            )));
        }
        if self.head.is_none() != self.tail.is_none() {
            return Err(InvariantError::new("head and tail disagree on emptiness"));
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let entry = self.entry(id).ok_or_else(|| {
                InvariantError::new(format!("link to free slot {}", id.index()))
            })?;
            if entry.prev != prev {
                return Err(InvariantError::new(format!(
                    "slot {} has a stale back link",
                    id.index()
                )));
            }
            count += 1;
            if count > self.len {
                return Err(InvariantError::new("cycle or overlong chain in list"));
            }
            prev = Some(id);
            current = entry.next;
        }

        if prev != self.tail {
            return Err(InvariantError::new("tail does not end the chain"));
        }
        if count != self.len {
            return Err(InvariantError::new(format!(
                "chain has {} nodes but len is {}",
                count, self.len
            )));
        }
        if self.len + self.free.len() != self.slots.len() {
            return Err(InvariantError::new(format!(
                "{} live and {} free slots do not cover {} slots",
                self.len,
                self.free.len(),
                self.slots.len()
            )));
        }
        Ok(())
    }

    fn entry(&self, id: SlotId) -> Option<&Entry<T>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn entry_mut(&mut self, id: SlotId) -> Option<&mut Entry<T>> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Unlinks a live node from its neighbours without freeing its slot.
    fn detach(&mut self, id: SlotId) {
        let (prev, next) = match self.entry_mut(id) {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return,
        };

        match prev.and_then(|p| self.entry_mut(p)) {
            Some(prev_entry) => prev_entry.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.entry_mut(n)) {
            Some(next_entry) => next_entry.prev = prev,
            None => self.tail = prev,
        }
    }

    /// Links a detached node in as the new head.
    fn attach(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(entry) = self.entry_mut(id) {
            entry.prev = None;
            entry.next = old_head;
        } else {
            return;
        }
        match old_head.and_then(|h| self.entry_mut(h)) {
            Some(head_entry) => head_entry.prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("cap", &self.cap)
            .field("len", &self.len)
            .finish()
    }
}

/// Front-to-back iterator over a [`List`].
pub(crate) struct Iter<'a, T> {
    list: &'a List<T>,
    current: Option<SlotId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let entry = self.list.entry(id)?;
        self.current = entry.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&entry.val)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            list: self.list,
            current: self.current,
            remaining: self.remaining,
        }
    }
}
