//! Two-dimensional slot groups

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Rows of slot numbers forming one sortable group.
///
/// Rows may differ in length. Column-major traversal only covers the columns
/// every row has, so trailing cells of longer rows are never visited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGrid {
    rows: Vec<Vec<usize>>,
}

impl SlotGrid {
    /// Create a grid from explicit rows.
    ///
    /// A slot listed more than once keeps only its first cell; rows left
    /// empty are dropped.
    pub fn new(rows: Vec<Vec<usize>>) -> Self {
        let mut seen = HashSet::new();
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .filter(|slot| {
                        let first = seen.insert(*slot);
                        if !first {
                            log::warn!("Slot {} listed twice in one grid", slot);
                        }
                        first
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|row| !row.is_empty())
            .collect();
        Self { rows }
    }

    /// Lay out slots in rows of `row_size`; the last row may be shorter
    pub fn from_slots(row_size: usize, slots: &[usize]) -> Self {
        let row_size = row_size.max(1);
        Self::new(slots.chunks(row_size).map(|chunk| chunk.to_vec()).collect())
    }

    /// Rows of the grid
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the shortest row, 0 for an empty grid
    pub fn min_row_len(&self) -> usize {
        self.rows.iter().map(Vec::len).min().unwrap_or(0)
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Check if the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check if the grid contains a slot
    pub fn contains(&self, slot: usize) -> bool {
        self.rows.iter().any(|row| row.contains(&slot))
    }

    /// Slot at a cell
    pub fn get(&self, row: usize, column: usize) -> Option<usize> {
        self.rows.get(row)?.get(column).copied()
    }

    /// Every slot, row by row
    pub fn row_major(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().flat_map(|row| row.iter().copied())
    }

    /// Column by column, bounded by the shortest row
    pub fn column_major(&self) -> impl Iterator<Item = usize> + '_ {
        let columns = self.min_row_len();
        (0..columns).flat_map(move |c| self.rows.iter().map(move |row| row[c]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slots() {
        let grid = SlotGrid::from_slots(3, &[10, 11, 12, 13, 14]);

        assert_eq!(grid.rows(), &[vec![10, 11, 12], vec![13, 14]]);
        assert_eq!(grid.cell_count(), 5);
        assert_eq!(grid.min_row_len(), 2);
        assert_eq!(grid.get(1, 1), Some(14));
        assert_eq!(grid.get(1, 2), None);
    }

    #[test]
    fn test_row_major() {
        let grid = SlotGrid::new(vec![vec![0, 1], vec![2, 3]]);
        assert_eq!(grid.row_major().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_column_major() {
        let grid = SlotGrid::new(vec![vec![0, 1], vec![2, 3]]);
        assert_eq!(grid.column_major().collect::<Vec<_>>(), vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_column_major_ragged_stops_at_shortest_row() {
        let grid = SlotGrid::new(vec![vec![0, 1, 2], vec![3, 4, 5], vec![6]]);
        assert_eq!(grid.column_major().collect::<Vec<_>>(), vec![0, 3, 6]);
    }

    #[test]
    fn test_repeated_slots_keep_first_cell() {
        let grid = SlotGrid::from_slots(2, &[0, 1, 1, 2, 0]);
        assert_eq!(grid.rows(), &[vec![0, 1], vec![2]]);
        assert_eq!(grid.cell_count(), 3);

        let grid = SlotGrid::new(vec![vec![5], vec![5]]);
        assert_eq!(grid.rows(), &[vec![5]]);
    }

    #[test]
    fn test_empty_rows_dropped() {
        let grid = SlotGrid::new(vec![vec![], vec![4]]);
        assert_eq!(grid.row_count(), 1);
        assert!(grid.contains(4));
        assert!(!SlotGrid::new(vec![]).contains(4));
    }
}
