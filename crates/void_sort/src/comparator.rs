//! Rule chains combined into a single item order

use crate::rule::{NbtSortRule, SortRule};
use std::cmp::Ordering;
use std::sync::Arc;
use void_inventory::{ItemMetadata, ItemStack};

/// Ordered metadata rules, consulted only through a delegating item rule
#[derive(Clone)]
pub struct NbtRuleChain {
    rules: Arc<[Arc<dyn NbtSortRule>]>,
}

impl NbtRuleChain {
    pub fn new(rules: Vec<Arc<dyn NbtSortRule>>) -> Self {
        Self {
            rules: rules.into(),
        }
    }

    /// First non-equal result of the chain
    pub fn compare(&self, a: &ItemMetadata, b: &ItemMetadata) -> Ordering {
        self.rules
            .iter()
            .map(|rule| rule.compare(a, b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    pub fn rule_keys(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.key()).collect()
    }

}

impl Default for NbtRuleChain {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl std::fmt::Debug for NbtRuleChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("NbtRuleChain").field(&self.rule_keys()).finish()
    }
}

/// Item order built from prioritized rules.
///
/// Rule 0 decides first; later rules only break its ties. Items every rule
/// considers equal keep their relative order when sorted.
#[derive(Clone)]
pub struct ItemComparator {
    rules: Vec<Arc<dyn SortRule>>,
}

impl ItemComparator {
    pub fn new(rules: Vec<Arc<dyn SortRule>>) -> Self {
        Self { rules }
    }

    /// Compare two items
    pub fn compare(&self, a: &ItemStack, b: &ItemStack) -> Ordering {
        self.rules
            .iter()
            .map(|rule| rule.compare(a, b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Sort items in place, smallest first
    pub fn sort(&self, items: &mut [ItemStack]) {
        items.sort_by(|a, b| self.compare(a, b));
    }

    /// Keys of the item rules, in priority order
    pub fn rule_keys(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.key()).collect()
    }
}

impl std::fmt::Debug for ItemComparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemComparator")
            .field("rules", &self.rule_keys())
            .finish()
    }
}
