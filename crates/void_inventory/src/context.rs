//! Sorting context: which slot group a slot belongs to

use crate::grid::SlotGrid;
use std::collections::HashMap;
use std::ops::Range;

/// Player inventory indices of the main rows (hotbar and armor excluded)
pub const PLAYER_MAIN_SLOTS: Range<usize> = 9..36;

/// Row width of the player inventory
pub const PLAYER_ROW_SIZE: usize = 9;

/// Containers that describe their own sortable groups
pub trait SortableContainer {
    /// Register this container's slot groups
    fn build_sorting_context(&self, builder: &mut SortingContextBuilder);
}

/// Maps slot numbers to the slot group they trigger a sort on.
///
/// Built once per open container and immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct SortingContext {
    groups: Vec<SlotGrid>,
    slot_to_group: HashMap<usize, usize>,
}

impl SortingContext {
    /// Context without any groups
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start building a context
    pub fn builder() -> SortingContextBuilder {
        SortingContextBuilder::default()
    }

    /// Build the context of a sortable container
    pub fn for_container<C: SortableContainer + ?Sized>(container: &C) -> Self {
        let mut builder = Self::builder();
        container.build_sorting_context(&mut builder);
        builder.build()
    }

    /// Group the main player inventory of a container.
    ///
    /// Takes `(container_slot, inventory_index)` pairs for the slots backed by
    /// the player inventory. Slots whose inventory index lies in
    /// [`PLAYER_MAIN_SLOTS`] form one group of rows, keyed by container slot.
    pub fn player_inventory(slots: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let main: Vec<usize> = slots
            .into_iter()
            .filter(|(_, index)| PLAYER_MAIN_SLOTS.contains(index))
            .map(|(slot, _)| slot)
            .collect();
        let mut builder = Self::builder();
        builder.add_slot_group(PLAYER_ROW_SIZE, &main);
        builder.build()
    }

    /// Group containing a slot
    pub fn slot_group(&self, slot: usize) -> Option<&SlotGrid> {
        self.slot_to_group
            .get(&slot)
            .and_then(|index| self.groups.get(*index))
    }

    /// All groups
    pub fn groups(&self) -> &[SlotGrid] {
        &self.groups
    }

    /// Check if there is nothing to sort
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Builder for [`SortingContext`]
#[derive(Debug, Default)]
pub struct SortingContextBuilder {
    groups: Vec<SlotGrid>,
}

impl SortingContextBuilder {
    /// Add a group of slots laid out in rows of `row_size`
    pub fn add_slot_group(&mut self, row_size: usize, slots: &[usize]) -> &mut Self {
        self.add_grid(SlotGrid::from_slots(row_size, slots))
    }

    /// Add a group with an explicit row layout
    pub fn add_grid(&mut self, grid: SlotGrid) -> &mut Self {
        if grid.is_empty() {
            return self;
        }
        self.groups.push(grid);
        self
    }

    /// Finish the context
    ///
    /// A slot listed in more than one group resolves to the first group.
    pub fn build(self) -> SortingContext {
        let mut slot_to_group = HashMap::new();
        for (index, grid) in self.groups.iter().enumerate() {
            for slot in grid.row_major() {
                if slot_to_group.contains_key(&slot) {
                    log::warn!("Slot {} already belongs to group {}", slot, slot_to_group[&slot]);
                    continue;
                }
                slot_to_group.insert(slot, index);
            }
        }
        SortingContext {
            groups: self.groups,
            slot_to_group,
        }
    }
}
