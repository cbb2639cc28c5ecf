//! Ordered redistribution of items into a slot grid
//!
//! A fill runs in two phases. First every slot on the traversal path is read
//! into an owned [`ItemCounts`](crate::aggregate::ItemCounts); only then are
//! the slots cleared and refilled. The grid is never read after the first
//! write.

use crate::aggregate::{gather_items, CountedItem};
use crate::comparator::ItemComparator;
use crate::overflow::prepare_drop_list;
use void_inventory::{ItemStack, SlotGrid, SlotProvider};

/// Traversal order of a fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOrder {
    /// Row by row
    Horizontal,
    /// Column by column, up to the shortest row's length
    Vertical,
}

impl FillOrder {
    /// Slots visited, in order
    pub fn traverse(self, grid: &SlotGrid) -> Vec<usize> {
        match self {
            Self::Horizontal => grid.row_major().collect(),
            Self::Vertical => grid.column_major().collect(),
        }
    }
}

/// Result of a fill
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillOutcome {
    /// Distinct items found on the traversal path
    pub distinct_items: usize,
    /// Stacks that did not fit, in placement order
    pub overflow: Vec<ItemStack>,
}

impl FillOutcome {
    /// Whether anything has to be disposed of
    pub fn has_overflow(&self) -> bool {
        !self.overflow.is_empty()
    }
}

/// Fill row by row
pub fn fill_horizontal<P>(provider: &mut P, grid: &SlotGrid, comparator: &ItemComparator) -> FillOutcome
where
    P: SlotProvider + ?Sized,
{
    fill(provider, grid, FillOrder::Horizontal, comparator)
}

/// Fill column by column
pub fn fill_vertical<P>(provider: &mut P, grid: &SlotGrid, comparator: &ItemComparator) -> FillOutcome
where
    P: SlotProvider + ?Sized,
{
    fill(provider, grid, FillOrder::Vertical, comparator)
}

/// Gather, order, and re-place the items on the traversal path of `order`
pub fn fill<P>(
    provider: &mut P,
    grid: &SlotGrid,
    order: FillOrder,
    comparator: &ItemComparator,
) -> FillOutcome
where
    P: SlotProvider + ?Sized,
{
    let path = order.traverse(grid);
    let items = gather_items(&*provider, path.iter().copied());
    if items.is_empty() {
        return FillOutcome::default();
    }
    let distinct_items = items.len();
    let ordered = items.into_sorted(comparator);

    let leftovers = place(provider, &path, ordered);
    let overflow = prepare_drop_list(&leftovers);
    if !overflow.is_empty() {
        log::debug!(
            "{:?} fill left {} item(s) unplaced in {} stack(s)",
            order,
            leftovers.len(),
            overflow.len()
        );
    }
    FillOutcome {
        distinct_items,
        overflow,
    }
}

/// Greedy placement along `path`.
///
/// An item the current slot rejects stays under the cursor; the slot is passed
/// over. Returns what is left of the ordered sequence.
fn place<P>(provider: &mut P, path: &[usize], ordered: Vec<CountedItem>) -> Vec<CountedItem>
where
    P: SlotProvider + ?Sized,
{
    for &slot in path {
        provider.put_stack(slot, None);
    }

    let mut queue = ordered.into_iter();
    let mut cursor = queue.next();
    for &slot in path {
        let current = match cursor.as_mut() {
            Some(current) => current,
            None => {
                provider.put_stack(slot, None);
                continue;
            }
        };
        if !provider.is_item_valid(slot, &current.item) {
            continue;
        }
        let capacity = provider
            .stack_limit(slot, &current.item)
            .min(current.item.max_stack);
        let limit = u64::from(capacity).min(current.count);
        if limit == 0 {
            continue;
        }
        // limit <= capacity, so it fits a stack quantity
        provider.put_stack(slot, Some(current.item.with_quantity(limit as u32)));
        debug_assert!(limit <= current.count);
        current.count -= limit;
        if current.count == 0 {
            cursor = queue.next();
        }
    }

    cursor.into_iter().chain(queue).collect()
}
