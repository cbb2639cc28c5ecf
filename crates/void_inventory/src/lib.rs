//! Void Inventory - Item stacks, slots, and sortable slot groups
//!
//! This crate provides the inventory side of sorting: what an item is,
//! where it may go, and how slots are grouped into grids.
//!
//! # Features
//!
//! - Item stacks with variants, max stack sizes, and instance metadata
//! - Slot provider contract with per-slot validity and stack limits
//! - Slot-based inventory with configurable slot rules
//! - Ragged slot grids with row-major and column-major traversal
//! - Sorting context mapping slots to their group
//!
//! # Example
//!
//! ```ignore
//! use void_inventory::prelude::*;
//!
//! let mut inventory = Inventory::new(36);
//! inventory.set_slot(12, ItemStack::new("void:torch", 20));
//!
//! let context = SortingContext::player_inventory((0..36).map(|slot| (slot, slot)));
//! let grid = context.slot_group(12).unwrap();
//! ```

pub mod context;
pub mod grid;
pub mod inventory;
pub mod item;
pub mod slot;

pub mod prelude {
    pub use crate::context::{SortableContainer, SortingContext, SortingContextBuilder};
    pub use crate::grid::SlotGrid;
    pub use crate::inventory::Inventory;
    pub use crate::item::{ItemMetadata, ItemProperty, ItemStack};
    pub use crate::slot::{SlotFilter, SlotProvider, SlotRules};
}

pub use prelude::*;
