//! Packing leftovers into maximal stacks

use crate::aggregate::CountedItem;
use void_inventory::ItemStack;

/// Split each leftover into stacks no larger than the item's max stack,
/// keeping the given item order.
pub fn prepare_drop_list<'a, I>(leftovers: I) -> Vec<ItemStack>
where
    I: IntoIterator<Item = &'a CountedItem>,
{
    let mut drops = Vec::new();
    for entry in leftovers {
        let max = u64::from(entry.item.max_stack.max(1));
        let mut amount = entry.count;
        while amount > 0 {
            let size = amount.min(max);
            // size <= max_stack
            drops.push(entry.item.with_quantity(size as u32));
            amount -= size;
        }
    }
    drops
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counted(id: &str, max: u32, count: u64) -> CountedItem {
        CountedItem {
            item: ItemStack::single(id).with_max_stack(max),
            count,
        }
    }

    #[test]
    fn test_splits_into_max_stacks() {
        let drops = prepare_drop_list(&[counted("void:arrow", 64, 150)]);
        let sizes: Vec<u32> = drops.iter().map(|s| s.quantity).collect();
        assert_eq!(sizes, vec![64, 64, 22]);
    }

    #[test]
    fn test_keeps_item_order() {
        let drops = prepare_drop_list(&[counted("void:b", 16, 20), counted("void:a", 1, 2)]);
        let ids: Vec<(&str, u32)> = drops
            .iter()
            .map(|s| (s.item_id.as_str(), s.quantity))
            .collect();
        assert_eq!(ids, vec![("void:b", 16), ("void:b", 4), ("void:a", 1), ("void:a", 1)]);
    }

    #[test]
    fn test_nothing_left() {
        assert!(prepare_drop_list(&[counted("void:a", 64, 0)]).is_empty());
        assert!(prepare_drop_list(&[]).is_empty());
    }
}
