//! Sort rules and the registry that resolves them by name

use crate::comparator::{ItemComparator, NbtRuleChain};
use crate::config::SortConfig;
use crate::error::{SortError, SortResult};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use void_inventory::{ItemMetadata, ItemProperty, ItemStack};

/// Name of the rule that hands ties to the metadata chain
pub const NBT_RULES_KEY: &str = "nbt_rules";

/// Orders two item identities
pub trait SortRule: Send + Sync {
    /// Stable name used in configuration
    fn key(&self) -> &str;

    /// Compare two items; quantity is never looked at
    fn compare(&self, a: &ItemStack, b: &ItemStack) -> Ordering;
}

/// Orders two metadata payloads
pub trait NbtSortRule: Send + Sync {
    /// Stable name used in configuration
    fn key(&self) -> &str;

    /// Compare two payloads
    fn compare(&self, a: &ItemMetadata, b: &ItemMetadata) -> Ordering;
}

// ========== Item Rules ==========

/// Orders by item namespace
pub struct ModRule;

impl SortRule for ModRule {
    fn key(&self) -> &str {
        "mod"
    }

    fn compare(&self, a: &ItemStack, b: &ItemStack) -> Ordering {
        a.namespace().cmp(b.namespace())
    }
}

/// Orders by full item id
pub struct IdRule;

impl SortRule for IdRule {
    fn key(&self) -> &str {
        "id"
    }

    fn compare(&self, a: &ItemStack, b: &ItemStack) -> Ordering {
        a.item_id.cmp(&b.item_id)
    }
}

/// Orders by variant
pub struct MetaRule;

impl SortRule for MetaRule {
    fn key(&self) -> &str {
        "meta"
    }

    fn compare(&self, a: &ItemStack, b: &ItemStack) -> Ordering {
        a.variant.cmp(&b.variant)
    }
}

/// Plain items before items carrying metadata
pub struct NbtHasRule;

impl SortRule for NbtHasRule {
    fn key(&self) -> &str {
        "nbt_has"
    }

    fn compare(&self, a: &ItemStack, b: &ItemStack) -> Ordering {
        a.has_metadata().cmp(&b.has_metadata())
    }
}

/// Delegates to the metadata rule chain
pub struct NbtRulesRule {
    chain: NbtRuleChain,
}

impl NbtRulesRule {
    pub fn new(chain: NbtRuleChain) -> Self {
        Self { chain }
    }
}

impl SortRule for NbtRulesRule {
    fn key(&self) -> &str {
        NBT_RULES_KEY
    }

    fn compare(&self, a: &ItemStack, b: &ItemStack) -> Ordering {
        self.chain.compare(&a.instance_data, &b.instance_data)
    }
}

// ========== Metadata Rules ==========

/// Orders by an enchantment list: unenchanted first, then fewer enchantments,
/// then by name and level.
pub struct EnchantmentRule {
    key: &'static str,
    tag: &'static str,
}

impl EnchantmentRule {
    /// Enchantments applied to the item itself
    pub fn applied() -> Self {
        Self {
            key: "enchantment",
            tag: "enchantments",
        }
    }

    /// Enchantments stored in a book
    pub fn stored() -> Self {
        Self {
            key: "stored_enchantment",
            tag: "stored_enchantments",
        }
    }
}

impl NbtSortRule for EnchantmentRule {
    fn key(&self) -> &str {
        self.key
    }

    fn compare(&self, a: &ItemMetadata, b: &ItemMetadata) -> Ordering {
        let a = a.get(self.tag).and_then(ItemProperty::as_array);
        let b = b.get(self.tag).and_then(ItemProperty::as_array);
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => a
                .len()
                .cmp(&b.len())
                .then_with(|| compare_slices(a, b)),
        }
    }
}

/// Orders by the value of a single tag; missing tags first
pub struct TagRule {
    key: &'static str,
    tag: &'static str,
}

impl TagRule {
    pub fn new(key: &'static str, tag: &'static str) -> Self {
        Self { key, tag }
    }
}

impl NbtSortRule for TagRule {
    fn key(&self) -> &str {
        self.key
    }

    fn compare(&self, a: &ItemMetadata, b: &ItemMetadata) -> Ordering {
        compare_optional(a.get(self.tag), b.get(self.tag))
    }
}

/// Most worn items last
pub struct DurabilityRule;

impl DurabilityRule {
    fn remaining(data: &ItemMetadata) -> Option<f64> {
        let current = data.get("durability")?.as_float()?;
        let max = data.get("max_durability")?.as_float()?;
        if max <= 0.0 {
            return None;
        }
        Some(current / max)
    }
}

impl NbtSortRule for DurabilityRule {
    fn key(&self) -> &str {
        "durability"
    }

    fn compare(&self, a: &ItemMetadata, b: &ItemMetadata) -> Ordering {
        match (Self::remaining(a), Self::remaining(b)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => b.total_cmp(&a),
        }
    }
}

/// Total order over property values: by kind, then by value
pub fn compare_property(a: &ItemProperty, b: &ItemProperty) -> Ordering {
    fn rank(p: &ItemProperty) -> u8 {
        match p {
            ItemProperty::Bool(_) => 0,
            ItemProperty::Int(_) => 1,
            ItemProperty::Float(_) => 2,
            ItemProperty::String(_) => 3,
            ItemProperty::Array(_) => 4,
        }
    }

    match (a, b) {
        (ItemProperty::Bool(a), ItemProperty::Bool(b)) => a.cmp(b),
        (ItemProperty::Int(a), ItemProperty::Int(b)) => a.cmp(b),
        (ItemProperty::Float(a), ItemProperty::Float(b)) => a.total_cmp(b),
        (ItemProperty::String(a), ItemProperty::String(b)) => a.cmp(b),
        (ItemProperty::Array(a), ItemProperty::Array(b)) => compare_slices(a, b),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn compare_slices(a: &[ItemProperty], b: &[ItemProperty]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(a, b)| compare_property(a, b))
        .find(|ord| ord.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

fn compare_optional(a: Option<&ItemProperty>, b: Option<&ItemProperty>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_property(a, b),
    }
}

// ========== Registry ==========

/// Named rules available to configuration
pub struct RuleRegistry {
    item_rules: HashMap<String, Arc<dyn SortRule>>,
    nbt_rules: HashMap<String, Arc<dyn NbtSortRule>>,
}

impl RuleRegistry {
    /// Registry without any rules
    pub fn empty() -> Self {
        Self {
            item_rules: HashMap::new(),
            nbt_rules: HashMap::new(),
        }
    }

    /// Registry with every built-in rule
    pub fn with_builtin() -> Self {
        let mut registry = Self::empty();
        let item_rules: [Arc<dyn SortRule>; 4] = [
            Arc::new(ModRule),
            Arc::new(IdRule),
            Arc::new(MetaRule),
            Arc::new(NbtHasRule),
        ];
        for rule in item_rules {
            registry.item_rules.insert(rule.key().to_string(), rule);
        }
        let nbt_rules: [Arc<dyn NbtSortRule>; 4] = [
            Arc::new(EnchantmentRule::applied()),
            Arc::new(EnchantmentRule::stored()),
            Arc::new(TagRule::new("potion", "potion")),
            Arc::new(DurabilityRule),
        ];
        for rule in nbt_rules {
            registry.nbt_rules.insert(rule.key().to_string(), rule);
        }
        registry
    }

    /// Register an item rule
    pub fn register_item_rule(&mut self, rule: Arc<dyn SortRule>) -> SortResult<()> {
        let key = rule.key().to_string();
        if key == NBT_RULES_KEY || self.item_rules.contains_key(&key) {
            return Err(SortError::DuplicateRule(key));
        }
        self.item_rules.insert(key, rule);
        Ok(())
    }

    /// Register a metadata rule
    pub fn register_nbt_rule(&mut self, rule: Arc<dyn NbtSortRule>) -> SortResult<()> {
        let key = rule.key().to_string();
        if self.nbt_rules.contains_key(&key) {
            return Err(SortError::DuplicateRule(key));
        }
        self.nbt_rules.insert(key, rule);
        Ok(())
    }

    /// Look up an item rule
    pub fn item_rule(&self, key: &str) -> Option<Arc<dyn SortRule>> {
        self.item_rules.get(key).cloned()
    }

    /// Look up a metadata rule
    pub fn nbt_rule(&self, key: &str) -> Option<Arc<dyn NbtSortRule>> {
        self.nbt_rules.get(key).cloned()
    }

    /// Build the comparator named by a config
    pub fn resolve(&self, config: &SortConfig) -> SortResult<ItemComparator> {
        let nbt_rules = config
            .nbt_rules
            .iter()
            .map(|key| {
                self.nbt_rule(key)
                    .ok_or_else(|| SortError::UnknownNbtRule(key.clone()))
            })
            .collect::<SortResult<Vec<_>>>()?;
        let chain = NbtRuleChain::new(nbt_rules);

        let rules = config
            .item_rules
            .iter()
            .map(|key| {
                if key == NBT_RULES_KEY {
                    return Ok(Arc::new(NbtRulesRule::new(chain.clone())) as Arc<dyn SortRule>);
                }
                self.item_rule(key)
                    .ok_or_else(|| SortError::UnknownItemRule(key.clone()))
            })
            .collect::<SortResult<Vec<_>>>()?;

        log::debug!(
            "Resolved sort rules {:?} with nbt rules {:?}",
            config.item_rules,
            config.nbt_rules
        );
        Ok(ItemComparator::new(rules))
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(items: &[&str], nbt: &[&str]) -> SortConfig {
        SortConfig {
            item_rules: items.iter().map(|s| s.to_string()).collect(),
            nbt_rules: nbt.iter().map(|s| s.to_string()).collect(),
            ..SortConfig::default()
        }
    }

    #[test]
    fn test_item_rules() {
        let a = ItemStack::single("alpha:stone").with_variant(3);
        let b = ItemStack::single("beta:dirt").with_variant(1);

        assert_eq!(ModRule.compare(&a, &b), Ordering::Less);
        assert_eq!(IdRule.compare(&a, &b), Ordering::Less);
        assert_eq!(MetaRule.compare(&a, &b), Ordering::Greater);
        assert_eq!(NbtHasRule.compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn test_nbt_has_puts_plain_first() {
        let plain = ItemStack::single("void:sword");
        let enchanted = plain.clone().with_enchantment("sharpness", 1);
        assert_eq!(NbtHasRule.compare(&plain, &enchanted), Ordering::Less);
    }

    #[test]
    fn test_enchantment_rule() {
        let rule = EnchantmentRule::applied();
        let none = ItemMetadata::new();
        let one = ItemStack::single("x").with_enchantment("sharpness", 2).instance_data;
        let one_higher = ItemStack::single("x").with_enchantment("sharpness", 5).instance_data;
        let two = ItemStack::single("x")
            .with_enchantment("sharpness", 1)
            .with_enchantment("unbreaking", 1)
            .instance_data;

        assert_eq!(rule.compare(&none, &one), Ordering::Less);
        assert_eq!(rule.compare(&one, &one_higher), Ordering::Less);
        assert_eq!(rule.compare(&two, &one_higher), Ordering::Greater);
        assert_eq!(rule.compare(&one, &one), Ordering::Equal);
    }

    #[test]
    fn test_durability_rule_most_worn_last() {
        let fresh = ItemStack::single("x").with_durability(90.0, 100.0).instance_data;
        let worn = ItemStack::single("x").with_durability(10.0, 100.0).instance_data;
        assert_eq!(DurabilityRule.compare(&fresh, &worn), Ordering::Less);
    }

    #[test]
    fn test_compare_property_mixed_kinds() {
        assert_eq!(
            compare_property(&ItemProperty::Int(5), &ItemProperty::String("a".into())),
            Ordering::Less
        );
        assert_eq!(
            compare_property(&ItemProperty::Float(1.5), &ItemProperty::Float(0.5)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_resolve_default_config() {
        let comparator = RuleRegistry::with_builtin()
            .resolve(&SortConfig::default())
            .unwrap();
        assert_eq!(comparator.rule_keys(), vec!["mod", "id", "meta", "nbt_has", "nbt_rules"]);
    }

    #[test]
    fn test_unknown_rules_fail() {
        let registry = RuleRegistry::with_builtin();

        let err = registry.resolve(&config(&["mod", "weight"], &[])).unwrap_err();
        assert!(matches!(err, SortError::UnknownItemRule(name) if name == "weight"));

        let err = registry.resolve(&config(&["mod"], &["color"])).unwrap_err();
        assert!(matches!(err, SortError::UnknownNbtRule(name) if name == "color"));
    }

    #[test]
    fn test_register_custom_rule() {
        struct CountHint;
        impl SortRule for CountHint {
            fn key(&self) -> &str {
                "stack_size"
            }
            fn compare(&self, a: &ItemStack, b: &ItemStack) -> Ordering {
                b.max_stack.cmp(&a.max_stack)
            }
        }

        let mut registry = RuleRegistry::with_builtin();
        registry.register_item_rule(Arc::new(CountHint)).unwrap();
        assert!(matches!(
            registry.register_item_rule(Arc::new(CountHint)),
            Err(SortError::DuplicateRule(_))
        ));
        assert!(matches!(
            registry.register_item_rule(Arc::new(NbtRulesRule::new(NbtRuleChain::default()))),
            Err(SortError::DuplicateRule(_))
        ));

        let comparator = registry.resolve(&config(&["stack_size", "id"], &[])).unwrap();
        let pearls = ItemStack::single("void:pearl").with_max_stack(16);
        let stone = ItemStack::single("void:stone");
        assert_eq!(comparator.compare(&stone, &pearls), Ordering::Less);
    }
}
