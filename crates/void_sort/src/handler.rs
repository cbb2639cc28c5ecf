//! Sort requests against an open container

use crate::comparator::ItemComparator;
use crate::config::SortConfig;
use crate::error::SortResult;
use crate::placement::{fill, FillOrder};
use crate::random::{randomize_slots, shuffle_grid, SortStrategy};
use crate::rule::RuleRegistry;
use crate::sync::{GridSnapshot, SlotSync};
use rand::Rng;
use void_inventory::{ItemStack, SlotGrid, SlotProvider, SortingContext};

/// Message shown when a sort shuffles instead
pub const BOGO_MESSAGE: &str = "Get Bogo'd!";

/// The side that owns the player and the authoritative inventory
pub trait SortHost {
    /// Forward changed slots to the authoritative side
    fn sync_slots(&mut self, sync: SlotSync);

    /// Hand stacks that no longer fit to the player
    fn give_items(&mut self, stacks: Vec<ItemStack>);

    /// Show a message to the player
    fn notify(&mut self, _message: &str) {}
}

/// What a sort request did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortReport {
    /// Algorithm that ran
    pub strategy: SortStrategy,
    /// Stacks handed to the host
    pub overflow: Vec<ItemStack>,
    /// Number of slots synchronized
    pub synced_slots: usize,
}

/// Runs sort, clear, and randomize requests for one container
#[derive(Debug, Clone)]
pub struct SortHandler {
    context: SortingContext,
    comparator: ItemComparator,
    config: SortConfig,
}

impl SortHandler {
    pub fn new(context: SortingContext, comparator: ItemComparator, config: SortConfig) -> Self {
        Self {
            context,
            comparator,
            config,
        }
    }

    /// Resolve the config's rules against a registry
    pub fn from_config(
        context: SortingContext,
        registry: &RuleRegistry,
        config: SortConfig,
    ) -> SortResult<Self> {
        let comparator = registry.resolve(&config)?;
        Ok(Self::new(context, comparator, config))
    }

    pub fn context(&self) -> &SortingContext {
        &self.context
    }

    pub fn comparator(&self) -> &ItemComparator {
        &self.comparator
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Sort the group containing `slot`. Unknown slots are ignored.
    pub fn sort<P, H>(&self, provider: &mut P, host: &mut H, slot: usize) -> Option<SortReport>
    where
        P: SlotProvider + ?Sized,
        H: SortHost + ?Sized,
    {
        self.sort_with_rng(provider, host, slot, &mut rand::thread_rng())
    }

    /// [`SortHandler::sort`] with a caller-supplied random source
    pub fn sort_with_rng<P, H, R>(
        &self,
        provider: &mut P,
        host: &mut H,
        slot: usize,
        rng: &mut R,
    ) -> Option<SortReport>
    where
        P: SlotProvider + ?Sized,
        H: SortHost + ?Sized,
        R: Rng + ?Sized,
    {
        let grid = self.group(slot)?;
        let strategy = SortStrategy::choose(rng, self.config.bogo_chance);
        let snapshot = GridSnapshot::capture(&*provider, grid);

        let overflow = match strategy {
            SortStrategy::Bogo => {
                let moved = shuffle_grid(provider, grid, rng);
                log::info!("Shuffled {} stack(s) instead of sorting", moved);
                host.notify(BOGO_MESSAGE);
                Vec::new()
            }
            SortStrategy::Ordered => self.fill_and_dispose(provider, host, grid, FillOrder::Horizontal),
        };

        let synced_slots = Self::sync(&snapshot, &*provider, host);
        Some(SortReport {
            strategy,
            overflow,
            synced_slots,
        })
    }

    /// Sort the group containing `slot` column by column
    pub fn sort_vertical<P, H>(&self, provider: &mut P, host: &mut H, slot: usize) -> Option<SortReport>
    where
        P: SlotProvider + ?Sized,
        H: SortHost + ?Sized,
    {
        let grid = self.group(slot)?;
        let snapshot = GridSnapshot::capture(&*provider, grid);
        let overflow = self.fill_and_dispose(provider, host, grid, FillOrder::Vertical);
        let synced_slots = Self::sync(&snapshot, &*provider, host);
        Some(SortReport {
            strategy: SortStrategy::Ordered,
            overflow,
            synced_slots,
        })
    }

    /// Empty every slot in the group containing `slot`; returns the number cleared
    pub fn clear_all_items<P, H>(&self, provider: &mut P, host: &mut H, slot: usize) -> usize
    where
        P: SlotProvider + ?Sized,
        H: SortHost + ?Sized,
    {
        let grid = match self.group(slot) {
            Some(grid) => grid,
            None => return 0,
        };
        let mut sync = SlotSync::new();
        for slot in grid.row_major() {
            if provider.stack(slot).is_some() {
                provider.put_stack(slot, None);
                sync.push(slot, None);
            }
        }
        let cleared = sync.len();
        host.sync_slots(sync);
        cleared
    }

    /// Replace random slots of the group containing `slot` with catalog items
    pub fn randomize_items<P, H>(
        &self,
        provider: &mut P,
        host: &mut H,
        slot: usize,
        catalog: &[ItemStack],
    ) -> usize
    where
        P: SlotProvider + ?Sized,
        H: SortHost + ?Sized,
    {
        self.randomize_items_with_rng(provider, host, slot, catalog, &mut rand::thread_rng())
    }

    /// [`SortHandler::randomize_items`] with a caller-supplied random source
    pub fn randomize_items_with_rng<P, H, R>(
        &self,
        provider: &mut P,
        host: &mut H,
        slot: usize,
        catalog: &[ItemStack],
        rng: &mut R,
    ) -> usize
    where
        P: SlotProvider + ?Sized,
        H: SortHost + ?Sized,
        R: Rng + ?Sized,
    {
        let grid = match self.group(slot) {
            Some(grid) => grid,
            None => return 0,
        };
        let replaced = randomize_slots(provider, grid, catalog, self.config.randomize_chance, rng);
        let mut sync = SlotSync::new();
        for slot in &replaced {
            sync.push(*slot, provider.stack(*slot).cloned());
        }
        host.sync_slots(sync);
        replaced.len()
    }

    fn group(&self, slot: usize) -> Option<&SlotGrid> {
        let grid = self.context.slot_group(slot);
        if grid.is_none() {
            log::debug!("Slot {} is not part of a sortable group", slot);
        }
        grid
    }

    fn fill_and_dispose<P, H>(
        &self,
        provider: &mut P,
        host: &mut H,
        grid: &SlotGrid,
        order: FillOrder,
    ) -> Vec<ItemStack>
    where
        P: SlotProvider + ?Sized,
        H: SortHost + ?Sized,
    {
        let outcome = fill(provider, grid, order, &self.comparator);
        if outcome.has_overflow() {
            log::warn!(
                "{} stack(s) did not fit back into the grid",
                outcome.overflow.len()
            );
            host.give_items(outcome.overflow.clone());
        }
        outcome.overflow
    }

    fn sync<P, H>(snapshot: &GridSnapshot, provider: &P, host: &mut H) -> usize
    where
        P: SlotProvider + ?Sized,
        H: SortHost + ?Sized,
    {
        let sync = snapshot.changes(provider);
        let synced = sync.len();
        if !sync.is_empty() {
            host.sync_slots(sync);
        }
        synced
    }
}
