//! Handle table for live page elements
//!
//! Slot 0 is the root and is never released. Released slots go on a free
//! list and are handed out again, so the table stays as large as the number
//! of elements the front end currently holds on to.

use crate::page::NodeId;

/// Slot table mapping [`NodeId`]s to backend handles
#[derive(Debug, Clone)]
pub(crate) struct HandleRegistry<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
}

impl<T> HandleRegistry<T> {
    /// Table holding only `root` at `NodeId(0)`
    pub(crate) fn new(root: T) -> Self {
        Self {
            slots: vec![Some(root)],
            free: Vec::new(),
        }
    }

    /// Returns the existing handle for `item` or stores it in a free slot
    pub(crate) fn register(&mut self, item: T, same: impl Fn(&T, &T) -> bool) -> NodeId {
        if let Some(index) = self
            .slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|known| same(known, &item)))
        {
            return node_id(index);
        }
        if let Some(index) = self.free.pop() {
            self.slots[index] = Some(item);
            return node_id(index);
        }
        self.slots.push(Some(item));
        node_id(self.slots.len() - 1)
    }

    pub(crate) fn get(&self, node: NodeId) -> Option<&T> {
        self.slots.get(usize::try_from(node.0).ok()?)?.as_ref()
    }

    /// Forgets `node`; its id may be reused by a later registration
    pub(crate) fn release(&mut self, node: NodeId) -> Option<T> {
        let index = usize::try_from(node.0).ok()?;
        if index == 0 {
            return None;
        }
        let item = self.slots.get_mut(index)?.take()?;
        self.free.push(index);
        Some(item)
    }

    /// Number of handles currently held
    pub(crate) fn live(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Number of slots ever allocated
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }
}

fn node_id(index: usize) -> NodeId {
    NodeId(u32::try_from(index).unwrap_or(u32::MAX))
}
