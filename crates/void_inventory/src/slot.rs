//! Slot provider contract and per-slot placement rules

use crate::item::ItemStack;
use serde::{Deserialize, Serialize};

/// Anything that exposes numbered item slots.
///
/// Slots are owned by the provider; callers only read and replace their content.
pub trait SlotProvider {
    /// Gets the stack in the given slot, `None` if empty or out of range.
    fn stack(&self, slot: usize) -> Option<&ItemStack>;

    /// Returns whether the item may ever be placed in the given slot.
    fn is_item_valid(&self, slot: usize, item: &ItemStack) -> bool;

    /// Maximum quantity of this item the slot can hold. Zero means none.
    fn stack_limit(&self, slot: usize, item: &ItemStack) -> u32;

    /// Replaces the content of the given slot.
    fn put_stack(&mut self, slot: usize, stack: Option<ItemStack>);
}

/// Which items a slot accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotFilter {
    /// Any item
    Any,
    /// Only the listed item ids
    Only(Vec<String>),
    /// Anything except the listed item ids
    Except(Vec<String>),
    /// Only items from the given namespace
    Namespace(String),
}

impl Default for SlotFilter {
    fn default() -> Self {
        Self::Any
    }
}

impl SlotFilter {
    /// Check if an item passes this filter
    pub fn accepts(&self, item: &ItemStack) -> bool {
        match self {
            Self::Any => true,
            Self::Only(ids) => ids.iter().any(|id| *id == item.item_id),
            Self::Except(ids) => !ids.iter().any(|id| *id == item.item_id),
            Self::Namespace(namespace) => item.namespace() == namespace,
        }
    }
}

/// Placement rules of a single slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRules {
    /// Accepted items
    pub filter: SlotFilter,
    /// Slot-wide stack limit, applied on top of the item's own max stack
    pub limit: u32,
}

impl SlotRules {
    /// Rules that accept anything up to the item's own max stack
    pub fn new() -> Self {
        Self {
            filter: SlotFilter::Any,
            limit: u32::MAX,
        }
    }

    /// Set the filter
    pub fn with_filter(mut self, filter: SlotFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the slot-wide limit
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Limit for a specific item in this slot
    pub fn limit_for(&self, item: &ItemStack) -> u32 {
        self.limit.min(item.max_stack)
    }
}

impl Default for SlotRules {
    fn default() -> Self {
        Self::new()
    }
}
