//! Void Sort - Rule-based inventory sorting
//!
//! This crate reorders the items of a slot group according to a chain of
//! comparison rules, while respecting what each slot accepts and how much it
//! can hold.
//!
//! # Features
//!
//! - Named item and metadata rules resolved once from configuration
//! - Aggregation of scattered stacks into counted items
//! - Row-major and column-major fills with overflow collection
//! - Full random shuffle and per-slot randomization
//! - Change-only slot synchronization messages
//!
//! # Example
//!
//! ```ignore
//! use void_sort::prelude::*;
//!
//! let config = SortConfig::load_from_file("sort.toml")?;
//! let context = SortingContext::player_inventory((0..46).map(|slot| (slot, slot)));
//! let handler = SortHandler::from_config(context, &RuleRegistry::with_builtin(), config)?;
//!
//! // Sort the group containing slot 12
//! handler.sort(&mut inventory, &mut host, 12);
//! ```

pub mod aggregate;
pub mod comparator;
pub mod config;
pub mod error;
pub mod handler;
pub mod overflow;
pub mod placement;
pub mod random;
pub mod rule;
pub mod sync;

pub mod prelude {
    pub use crate::aggregate::{gather_items, CountedItem, ItemCounts};
    pub use crate::comparator::{ItemComparator, NbtRuleChain};
    pub use crate::config::SortConfig;
    pub use crate::error::{SortError, SortResult};
    pub use crate::handler::{SortHandler, SortHost, SortReport, BOGO_MESSAGE};
    pub use crate::overflow::prepare_drop_list;
    pub use crate::placement::{fill, fill_horizontal, fill_vertical, FillOrder, FillOutcome};
    pub use crate::random::{randomize_slots, shuffle_grid, SortStrategy};
    pub use crate::rule::{NbtSortRule, RuleRegistry, SortRule};
    pub use crate::sync::{GridSnapshot, SlotChange, SlotSync};
    pub use void_inventory::prelude::*;
}

pub use prelude::*;
