//! Slot synchronization message
//!
//! After a grid is rewritten locally, the slots whose content changed are sent
//! to the authoritative side as one [`SlotSync`].

use crate::error::SortResult;
use serde::{Deserialize, Serialize};
use void_inventory::{ItemStack, SlotGrid, SlotProvider};

/// New content of one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotChange {
    /// Target slot number
    pub slot: usize,
    /// New content, `None` for empty
    pub stack: Option<ItemStack>,
}

/// Ordered list of slot changes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSync {
    pub changes: Vec<SlotChange>,
}

impl SlotSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a change
    pub fn push(&mut self, slot: usize, stack: Option<ItemStack>) {
        self.changes.push(SlotChange { slot, stack });
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Slots touched by this message, in order
    pub fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.changes.iter().map(|change| change.slot)
    }

    /// Encode for transport
    pub fn to_bytes(&self) -> SortResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a received message
    pub fn from_bytes(bytes: &[u8]) -> SortResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Apply the changes to a provider
    pub fn apply<P: SlotProvider + ?Sized>(&self, provider: &mut P) {
        for change in &self.changes {
            provider.put_stack(change.slot, change.stack.clone());
        }
    }
}

/// Content of a grid captured before mutation
#[derive(Debug, Clone)]
pub struct GridSnapshot {
    slots: Vec<(usize, Option<ItemStack>)>,
}

impl GridSnapshot {
    /// Record every slot of the grid
    pub fn capture<P: SlotProvider + ?Sized>(provider: &P, grid: &SlotGrid) -> Self {
        Self {
            slots: grid
                .row_major()
                .map(|slot| (slot, provider.stack(slot).cloned()))
                .collect(),
        }
    }

    /// Slots whose content differs from the snapshot, in row-major order
    pub fn changes<P: SlotProvider + ?Sized>(&self, provider: &P) -> SlotSync {
        let mut sync = SlotSync::new();
        for (slot, before) in &self.slots {
            let after = provider.stack(*slot);
            if after != before.as_ref() {
                sync.push(*slot, after.cloned());
            }
        }
        sync
    }
}
