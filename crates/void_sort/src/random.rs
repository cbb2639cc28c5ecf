//! Random placement: strategy draw, full shuffle, and per-slot noise

use rand::Rng;
use void_inventory::{ItemStack, SlotGrid, SlotProvider};

/// Algorithm a sort request runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortStrategy {
    /// Ordered row-major fill
    Ordered,
    /// Full random shuffle
    Bogo,
}

impl SortStrategy {
    /// Draw a strategy; `bogo_chance` is the probability of [`SortStrategy::Bogo`]
    pub fn choose<R: Rng + ?Sized>(rng: &mut R, bogo_chance: f32) -> Self {
        if rng.gen::<f32>() < bogo_chance {
            Self::Bogo
        } else {
            Self::Ordered
        }
    }
}

/// Move every stack of the grid to a random distinct cell.
///
/// Stacks keep their quantity and are neither merged nor split, so the number
/// of occupied cells is unchanged. Returns the number of stacks moved.
pub fn shuffle_grid<P, R>(provider: &mut P, grid: &SlotGrid, rng: &mut R) -> usize
where
    P: SlotProvider + ?Sized,
    R: Rng + ?Sized,
{
    let stacks: Vec<ItemStack> = grid
        .row_major()
        .filter_map(|slot| provider.stack(slot).cloned())
        .collect();
    let moved = stacks.len();

    let mut cells: Vec<Vec<Option<ItemStack>>> = grid
        .rows()
        .iter()
        .map(|row| vec![None; row.len()])
        .collect();
    for stack in stacks {
        loop {
            let row = rng.gen_range(0..cells.len());
            let column = rng.gen_range(0..cells[row].len());
            if cells[row][column].is_none() {
                cells[row][column] = Some(stack);
                break;
            }
        }
    }

    for (slots, row) in grid.rows().iter().zip(cells) {
        for (&slot, stack) in slots.iter().zip(row) {
            provider.put_stack(slot, stack);
        }
    }
    moved
}

/// Replace slots with random catalog items.
///
/// Each slot is replaced independently with probability `chance`. Slot
/// validity and limits are ignored. Returns the replaced slots in row-major
/// order.
pub fn randomize_slots<P, R>(
    provider: &mut P,
    grid: &SlotGrid,
    catalog: &[ItemStack],
    chance: f32,
    rng: &mut R,
) -> Vec<usize>
where
    P: SlotProvider + ?Sized,
    R: Rng + ?Sized,
{
    if catalog.is_empty() {
        return Vec::new();
    }
    let mut replaced = Vec::new();
    for slot in grid.row_major() {
        if rng.gen::<f32>() < chance {
            let item = catalog[rng.gen_range(0..catalog.len())].clone();
            provider.put_stack(slot, Some(item));
            replaced.push(slot);
        }
    }
    replaced
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use void_inventory::{Inventory, SlotFilter, SlotRules};

    fn occupied(inv: &Inventory) -> Vec<(String, u32)> {
        let mut items: Vec<(String, u32)> = inv
            .items()
            .map(|(_, s)| (s.item_id.clone(), s.quantity))
            .collect();
        items.sort();
        items
    }

    #[test]
    fn test_choose_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(SortStrategy::choose(&mut rng, 0.0), SortStrategy::Ordered);
            assert_eq!(SortStrategy::choose(&mut rng, 1.0), SortStrategy::Bogo);
        }
    }

    #[test]
    fn test_shuffle_is_bijection() {
        let grid = SlotGrid::from_slots(3, &(0..9).collect::<Vec<_>>());
        for seed in 0..20 {
            let mut inv = Inventory::new(9);
            inv.set_slot(0, ItemStack::new("a", 5));
            inv.set_slot(4, ItemStack::new("b", 7));
            inv.set_slot(5, ItemStack::new("a", 2));
            inv.set_slot(8, ItemStack::new("c", 1));
            let before = occupied(&inv);

            let mut rng = StdRng::seed_from_u64(seed);
            let moved = shuffle_grid(&mut inv, &grid, &mut rng);

            assert_eq!(moved, 4);
            assert_eq!(inv.used_slots(), 4);
            assert_eq!(occupied(&inv), before);
        }
    }

    #[test]
    fn test_shuffle_full_and_ragged_grids() {
        let grid = SlotGrid::new(vec![vec![0, 1, 2], vec![3]]);
        let mut inv = Inventory::new(4);
        for slot in 0..4 {
            inv.set_slot(slot, ItemStack::new(format!("item_{}", slot), 1));
        }
        let before = occupied(&inv);

        shuffle_grid(&mut inv, &grid, &mut StdRng::seed_from_u64(3));

        assert_eq!(occupied(&inv), before);
    }

    #[test]
    fn test_shuffle_ignores_slots_outside_grid() {
        let grid = SlotGrid::new(vec![vec![0, 1]]);
        let mut inv = Inventory::new(3);
        inv.set_slot(0, ItemStack::new("a", 1));
        inv.set_slot(2, ItemStack::new("outside", 1));

        shuffle_grid(&mut inv, &grid, &mut StdRng::seed_from_u64(11));

        assert_eq!(inv.get_slot(2).unwrap().item_id, "outside");
        assert_eq!(inv.count_item("a"), 1);
    }

    #[test]
    fn test_randomize_always() {
        let grid = SlotGrid::new(vec![vec![0, 1], vec![2, 3]]);
        let mut inv = Inventory::new(4).with_rules(
            SlotRules::new().with_filter(SlotFilter::Only(vec!["void:nothing".into()])),
        );
        let catalog = vec![ItemStack::new("void:apple", 3), ItemStack::single("void:bone")];

        let replaced = randomize_slots(
            &mut inv,
            &grid,
            &catalog,
            1.0,
            &mut StdRng::seed_from_u64(5),
        );

        assert_eq!(replaced, vec![0, 1, 2, 3]);
        assert_eq!(inv.used_slots(), 4);
        assert!(inv
            .items()
            .all(|(_, s)| s.item_id == "void:apple" || s.item_id == "void:bone"));
    }

    #[test]
    fn test_randomize_never_or_empty_catalog() {
        let grid = SlotGrid::new(vec![vec![0, 1]]);
        let mut inv = Inventory::new(2);
        let catalog = vec![ItemStack::single("void:apple")];
        let mut rng = StdRng::seed_from_u64(1);

        assert!(randomize_slots(&mut inv, &grid, &catalog, 0.0, &mut rng).is_empty());
        assert!(randomize_slots(&mut inv, &grid, &[], 1.0, &mut rng).is_empty());
        assert!(inv.is_empty());
    }
}
