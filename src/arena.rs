//! Stable-slot storage for the entry sequence.
//!
//! [`Arena`] owns every entry of a map and threads the occupied slots into a
//! doubly linked chain that defines sequence order. A [`NodeId`] is a position
//! handle: unlinking one node never moves nor invalidates the id of any other
//! node, so an index over ids stays valid across unrelated mutations.

use alloc::vec::Vec;
use core::mem;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeId(usize);

#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
    pub(crate) key: K,
    pub(crate) value: V,
}

#[derive(Clone, Debug)]
enum Slot<K, V> {
    Occupied(Node<K, V>),
    Vacant { next_free: Option<NodeId> },
}

#[derive(Clone, Debug)]
pub(crate) struct Arena<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Option<NodeId>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl<K, V> Arena<K, V> {
    pub(crate) const fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: None,
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn head(&self) -> Option<NodeId> {
        self.head
    }

    pub(crate) fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    fn node(&self, id: NodeId) -> &Node<K, V> {
        match &self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("dangling node id"),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        match &mut self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("dangling node id"),
        }
    }

    pub(crate) fn next(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next
    }

    pub(crate) fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev
    }

    pub(crate) fn entry(&self, id: NodeId) -> (&K, &V) {
        let node = self.node(id);
        (&node.key, &node.value)
    }

    pub(crate) fn entry_mut(&mut self, id: NodeId) -> (&K, &mut V) {
        let node = self.node_mut(id);
        (&node.key, &mut node.value)
    }

    pub(crate) fn value_mut(&mut self, id: NodeId) -> &mut V {
        &mut self.node_mut(id).value
    }

    fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        match self.free {
            Some(id) => {
                let slot = mem::replace(&mut self.slots[id.0], Slot::Occupied(node));
                self.free = match slot {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => panic!("occupied slot in free list"),
                };
                id
            }
            _ => {
                let id = NodeId(self.slots.len());
                self.slots.push(Slot::Occupied(node));
                id
            }
        }
    }

    /// Links a new node immediately before `anchor` in sequence order, where
    /// `None` is the end marker (the node becomes the tail).
    pub(crate) fn link_before(&mut self, anchor: Option<NodeId>, key: K, value: V) -> NodeId {
        let prev = match anchor {
            Some(anchor) => self.node(anchor).prev,
            _ => self.tail,
        };
        let id = self.alloc(Node {
            prev,
            next: anchor,
            key,
            value,
        });
        match prev {
            Some(prev) => self.node_mut(prev).next = Some(id),
            _ => self.head = Some(id),
        }
        match anchor {
            Some(anchor) => self.node_mut(anchor).prev = Some(id),
            _ => self.tail = Some(id),
        }
        self.len += 1;
        id
    }

    /// Detaches the node from the chain and returns its entry. Ids of all
    /// other nodes remain valid.
    pub(crate) fn unlink(&mut self, id: NodeId) -> (K, V) {
        let slot = mem::replace(
            &mut self.slots[id.0],
            Slot::Vacant {
                next_free: self.free,
            },
        );
        let node = match slot {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("dangling node id"),
        };
        self.free = Some(id);
        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            _ => self.head = node.next,
        }
        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            _ => self.tail = node.prev,
        }
        self.len -= 1;
        (node.key, node.value)
    }

    /// Removes the node without repairing its neighbors' links. This is only
    /// meaningful while draining, where the chain is consumed in traversal
    /// order and neighbor links are never read again.
    pub(crate) fn take(&mut self, id: NodeId) -> Node<K, V> {
        let slot = mem::replace(&mut self.slots[id.0], Slot::Vacant { next_free: None });
        match slot {
            Slot::Occupied(node) => {
                self.len -= 1;
                node
            }
            Slot::Vacant { .. } => panic!("dangling node id"),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// The id of the node at `index` in sequence order, walking from the
    /// nearer end.
    pub(crate) fn nth(&self, index: usize) -> Option<NodeId> {
        if index >= self.len {
            return None;
        }
        let mut at;
        if index <= self.len / 2 {
            at = self.head;
            for _ in 0..index {
                at = at.and_then(|id| self.node(id).next);
            }
        }
        else {
            at = self.tail;
            for _ in 0..(self.len - 1 - index) {
                at = at.and_then(|id| self.node(id).prev);
            }
        }
        at
    }

    pub(crate) fn order(&self) -> Vec<NodeId> {
        let mut output = Vec::with_capacity(self.len);
        let mut at = self.head;
        while let Some(id) = at {
            output.push(id);
            at = self.node(id).next;
        }
        output
    }

    /// Rethreads the chain so that the nodes appear in the order given by
    /// `order`, which must contain every occupied id exactly once.
    pub(crate) fn relink(&mut self, order: &[NodeId]) {
        self.head = order.first().copied();
        self.tail = order.last().copied();
        for (index, &id) in order.iter().enumerate() {
            let node = self.node_mut(id);
            node.prev = index.checked_sub(1).map(|prev| order[prev]);
            node.next = order.get(index + 1).copied();
        }
    }

    pub(crate) fn reverse(&mut self) {
        let mut at = self.head;
        while let Some(id) = at {
            let node = self.node_mut(id);
            mem::swap(&mut node.prev, &mut node.next);
            at = node.prev;
        }
        mem::swap(&mut self.head, &mut self.tail);
    }
}
