//! Item stacks and instance metadata

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// Namespace used when an item id carries none
pub const DEFAULT_NAMESPACE: &str = "void";

/// Default maximum stack size
pub const DEFAULT_MAX_STACK: u32 = 64;

/// Instance metadata attached to a stack (enchantments, potion, durability, ...)
pub type ItemMetadata = BTreeMap<String, ItemProperty>;

/// Item property value
///
/// Floats compare and hash by their bit pattern so that metadata can take part
/// in stack identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ItemProperty {
    /// Integer value
    Int(i64),
    /// Float value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<ItemProperty>),
}

impl ItemProperty {
    /// Get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Get as array
    pub fn as_array(&self) -> Option<&[ItemProperty]> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }
}

impl PartialEq for ItemProperty {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ItemProperty {}

impl Hash for ItemProperty {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Int(v) => v.hash(state),
            Self::Float(v) => v.to_bits().hash(state),
            Self::Bool(v) => v.hash(state),
            Self::String(v) => v.hash(state),
            Self::Array(v) => v.hash(state),
        }
    }
}

/// A stack of items
///
/// Everything except `quantity` is the stack's identity: two stacks can be
/// merged iff [`ItemStack::is_stack_compatible`] holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item ID in `namespace:path` form
    pub item_id: String,
    /// Sub-type discriminator (damage value, color, ...)
    pub variant: u32,
    /// Quantity
    pub quantity: u32,
    /// Natural maximum stack size of the item
    pub max_stack: u32,
    /// Instance-specific properties (durability, enchantments, etc.)
    pub instance_data: ItemMetadata,
}

impl ItemStack {
    /// Create a new item stack
    pub fn new(item_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            variant: 0,
            quantity: quantity.max(1),
            max_stack: DEFAULT_MAX_STACK,
            instance_data: ItemMetadata::new(),
        }
    }

    /// Create a single item
    pub fn single(item_id: impl Into<String>) -> Self {
        Self::new(item_id, 1)
    }

    /// Set the variant
    pub fn with_variant(mut self, variant: u32) -> Self {
        self.variant = variant;
        self
    }

    /// Set max stack size
    pub fn with_max_stack(mut self, max: u32) -> Self {
        self.max_stack = max.max(1);
        self
    }

    /// Set instance data
    pub fn with_data(mut self, key: impl Into<String>, value: ItemProperty) -> Self {
        self.instance_data.insert(key.into(), value);
        self
    }

    /// Set durability
    pub fn with_durability(self, current: f32, max: f32) -> Self {
        self.with_data("durability", ItemProperty::Float(current as f64))
            .with_data("max_durability", ItemProperty::Float(max as f64))
    }

    /// Add an enchantment entry
    pub fn with_enchantment(mut self, name: impl Into<String>, level: i64) -> Self {
        let entry = ItemProperty::Array(vec![ItemProperty::String(name.into()), ItemProperty::Int(level)]);
        match self.instance_data.get_mut("enchantments") {
            Some(ItemProperty::Array(list)) => list.push(entry),
            _ => {
                self.instance_data
                    .insert("enchantments".to_string(), ItemProperty::Array(vec![entry]));
            }
        }
        self
    }

    /// Get durability (current, max)
    pub fn durability(&self) -> Option<(f32, f32)> {
        let current = self.instance_data.get("durability")?.as_float()? as f32;
        let max = self.instance_data.get("max_durability")?.as_float()? as f32;
        Some((current, max))
    }

    /// Namespace part of the item id
    pub fn namespace(&self) -> &str {
        match self.item_id.split_once(':') {
            Some((namespace, _)) => namespace,
            None => DEFAULT_NAMESPACE,
        }
    }

    /// Path part of the item id
    pub fn path(&self) -> &str {
        match self.item_id.split_once(':') {
            Some((_, path)) => path,
            None => &self.item_id,
        }
    }

    /// Whether any instance data is attached
    pub fn has_metadata(&self) -> bool {
        !self.instance_data.is_empty()
    }

    /// Check if two stacks are the same item, ignoring quantity
    pub fn is_stack_compatible(&self, other: &ItemStack) -> bool {
        self.item_id == other.item_id
            && self.variant == other.variant
            && self.max_stack == other.max_stack
            && self.instance_data == other.instance_data
    }

    /// Copy of this stack with a different quantity
    pub fn with_quantity(&self, quantity: u32) -> ItemStack {
        ItemStack {
            quantity,
            ..self.clone()
        }
    }

    /// Quantity-independent key of this stack (quantity normalised to 1)
    pub fn key(&self) -> ItemStack {
        self.with_quantity(1)
    }

    /// Check if this stack is empty
    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }
}

impl Default for ItemStack {
    fn default() -> Self {
        Self::single("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_item_stack() {
        let stack = ItemStack::new("void:gold_coin", 50).with_max_stack(99);

        assert_eq!(stack.quantity, 50);
        assert_eq!(stack.max_stack, 99);
        assert_eq!(stack.namespace(), "void");
        assert_eq!(stack.path(), "gold_coin");
    }

    #[test]
    fn test_namespace_defaults() {
        let stack = ItemStack::single("arrow");
        assert_eq!(stack.namespace(), DEFAULT_NAMESPACE);
        assert_eq!(stack.path(), "arrow");
    }

    #[test]
    fn test_stack_compatibility_ignores_quantity() {
        let a = ItemStack::new("void:stone", 10).with_variant(2);
        let b = ItemStack::new("void:stone", 40).with_variant(2);
        let c = ItemStack::new("void:stone", 10).with_variant(3);

        assert!(a.is_stack_compatible(&b));
        assert!(!a.is_stack_compatible(&c));
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_metadata_is_identity() {
        let plain = ItemStack::single("void:sword");
        let enchanted = ItemStack::single("void:sword").with_enchantment("sharpness", 3);

        assert!(!plain.is_stack_compatible(&enchanted));
        assert!(enchanted.has_metadata());

        let mut keys = HashSet::new();
        keys.insert(plain.key());
        keys.insert(enchanted.key());
        keys.insert(enchanted.with_quantity(7).key());
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_float_property_hashes_by_bits() {
        let a = ItemStack::single("void:pick").with_durability(80.0, 100.0);
        let b = ItemStack::single("void:pick").with_durability(80.0, 100.0);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_durability() {
        let stack = ItemStack::single("sword").with_durability(80.0, 100.0);

        let (current, max) = stack.durability().unwrap();
        assert_eq!(current, 80.0);
        assert_eq!(max, 100.0);
    }
}
