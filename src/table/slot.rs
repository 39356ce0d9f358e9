//! Slot storage

use super::{Key, EMPTY, TOMBSTONE};

/// Logical state of a slot, derived from its key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    Tombstone,
    Occupied,
}

/// One element of the backing array
#[derive(Debug, Clone)]
pub(crate) struct Slot<V> {
    pub(crate) key: Key,
    pub(crate) value: V,
}

impl<V: Default> Slot<V> {
    pub(crate) fn empty() -> Self {
        Self {
            key: EMPTY,
            value: V::default(),
        }
    }
}

impl<V> Slot<V> {
    #[inline]
    pub(crate) fn state(&self) -> SlotState {
        match self.key {
            EMPTY => SlotState::Empty,
            TOMBSTONE => SlotState::Tombstone,
            _ => SlotState::Occupied,
        }
    }
}
