//! Slot-based inventory

use crate::item::ItemStack;
use crate::slot::{SlotProvider, SlotRules};
use serde::{Deserialize, Serialize};

/// Inventory with per-slot placement rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    /// Inventory slots (None = empty)
    slots: Vec<Option<ItemStack>>,
    /// Placement rules, one per slot
    rules: Vec<SlotRules>,
}

impl Inventory {
    /// Create a new inventory with given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            rules: vec![SlotRules::default(); capacity],
        }
    }

    /// Apply the same rules to every slot
    pub fn with_rules(mut self, rules: SlotRules) -> Self {
        self.rules = vec![rules; self.slots.len()];
        self
    }

    /// Set rules for a single slot
    pub fn set_slot_rules(&mut self, slot: usize, rules: SlotRules) {
        if let Some(existing) = self.rules.get_mut(slot) {
            *existing = rules;
        }
    }

    /// Get inventory capacity
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Get number of used slots
    pub fn used_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Check if inventory is empty
    pub fn is_empty(&self) -> bool {
        self.used_slots() == 0
    }

    /// Get slot contents
    pub fn get_slot(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot)?.as_ref()
    }

    /// Put a stack into a slot, bypassing rules
    pub fn set_slot(&mut self, slot: usize, stack: ItemStack) {
        if let Some(existing) = self.slots.get_mut(slot) {
            *existing = Some(stack);
        }
    }

    /// Clear a slot
    pub fn clear_slot(&mut self, slot: usize) -> Option<ItemStack> {
        self.slots.get_mut(slot)?.take()
    }

    /// Count total quantity of an item across all variants and metadata
    pub fn count_item(&self, item_id: &str) -> u32 {
        self.slots
            .iter()
            .filter_map(|s| s.as_ref())
            .filter(|i| i.item_id == item_id)
            .map(|i| i.quantity)
            .sum()
    }

    /// Count total quantity of stacks compatible with `item`
    pub fn count_matching(&self, item: &ItemStack) -> u32 {
        self.slots
            .iter()
            .filter_map(|s| s.as_ref())
            .filter(|i| i.is_stack_compatible(item))
            .map(|i| i.quantity)
            .sum()
    }

    /// Get all items as iterator
    pub fn items(&self) -> impl Iterator<Item = (usize, &ItemStack)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|stack| (i, stack)))
    }
}

impl SlotProvider for Inventory {
    fn stack(&self, slot: usize) -> Option<&ItemStack> {
        self.get_slot(slot)
    }

    fn is_item_valid(&self, slot: usize, item: &ItemStack) -> bool {
        self.rules
            .get(slot)
            .map(|rules| rules.filter.accepts(item))
            .unwrap_or(false)
    }

    fn stack_limit(&self, slot: usize, item: &ItemStack) -> u32 {
        self.rules
            .get(slot)
            .map(|rules| rules.limit_for(item))
            .unwrap_or(0)
    }

    fn put_stack(&mut self, slot: usize, stack: Option<ItemStack>) {
        if let Some(existing) = self.slots.get_mut(slot) {
            *existing = stack.filter(|s| !s.is_empty());
        }
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(27)
    }
}
