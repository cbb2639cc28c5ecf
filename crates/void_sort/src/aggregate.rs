//! Folding scattered stacks into one counted entry per item

use crate::comparator::ItemComparator;
use std::collections::HashMap;
use void_inventory::{ItemStack, SlotProvider};

/// An item identity with the total quantity found for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountedItem {
    /// Identity, quantity normalised to 1
    pub item: ItemStack,
    /// Sum of all matching stacks, wider than a single stack's quantity
    pub count: u64,
}

/// Multiset of items in first-seen order
#[derive(Debug, Clone, Default)]
pub struct ItemCounts {
    entries: Vec<CountedItem>,
    index: HashMap<ItemStack, usize>,
}

impl ItemCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stack to the running total of its identity
    pub fn add(&mut self, stack: &ItemStack) {
        if stack.is_empty() {
            return;
        }
        let key = stack.key();
        match self.index.get(&key) {
            Some(&i) => self.entries[i].count += u64::from(stack.quantity),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push(CountedItem {
                    item: key,
                    count: u64::from(stack.quantity),
                });
            }
        }
    }

    /// Total quantity recorded for stacks compatible with `item`
    pub fn count(&self, item: &ItemStack) -> u64 {
        self.index
            .get(&item.key())
            .map(|&i| self.entries[i].count)
            .unwrap_or(0)
    }

    /// Number of distinct items
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over all items
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountedItem> {
        self.entries.iter()
    }

    /// Entries in placement priority order
    pub fn into_sorted(self, comparator: &ItemComparator) -> Vec<CountedItem> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| comparator.compare(&a.item, &b.item));
        entries
    }
}

impl<'a> FromIterator<&'a ItemStack> for ItemCounts {
    fn from_iter<I: IntoIterator<Item = &'a ItemStack>>(iter: I) -> Self {
        let mut counts = Self::new();
        for stack in iter {
            counts.add(stack);
        }
        counts
    }
}

/// Read every listed slot and total its stacks. Empty slots are skipped.
pub fn gather_items<P, I>(provider: &P, slots: I) -> ItemCounts
where
    P: SlotProvider + ?Sized,
    I: IntoIterator<Item = usize>,
{
    slots
        .into_iter()
        .filter_map(|slot| provider.stack(slot))
        .collect()
}
