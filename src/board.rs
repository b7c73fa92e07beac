//! Per-puzzle grid state: cell occupancy and remaining placement counts.
//!
//! One board is created per puzzle and mutated in place by the search.
//! Every mutation has an exact inverse (`try_place`/`undo`,
//! `decrement`/`restore`); the solver pairs them strictly so an abandoned
//! branch always restores the board before the next candidate is tried.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

use crate::shape::{Catalog, Cell, Shape};

pub struct Board {
    width: usize,
    height: usize,
    /// Cells covered by placed shapes. Disjoint by construction.
    occupied: FxHashSet<Cell>,
    /// Placements still required per shape id. Zero-count entries removed.
    remaining: BTreeMap<usize, usize>,
}

impl Board {
    /// Creates a board for a `width` x `height` grid with the given required
    /// count per shape id. Zero counts are dropped.
    pub fn new(
        width: usize,
        height: usize,
        counts: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let remaining = counts
            .into_iter()
            .filter(|&(_, count)| count > 0)
            .collect();

        Self {
            width,
            height,
            occupied: FxHashSet::default(),
            remaining,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn total_area(&self) -> usize {
        self.width * self.height
    }

    /// Cells not covered by any placement.
    pub fn free_area(&self) -> usize {
        self.total_area() - self.occupied.len()
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.occupied.contains(&cell)
    }

    /// True once every required placement has been made.
    pub fn all_placed(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Shape ids still requiring placements, in ascending order.
    pub fn remaining_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.remaining.keys().copied()
    }

    pub fn remaining_count(&self, shape_id: usize) -> usize {
        self.remaining.get(&shape_id).copied().unwrap_or(0)
    }

    /// Total grid area the remaining placements will cover.
    pub fn remaining_required_area(&self, catalog: &Catalog) -> usize {
        self.remaining
            .iter()
            .map(|(&id, &count)| catalog.get(id).map_or(0, Shape::area) * count)
            .sum()
    }

    fn in_bounds(&self, (row, col): Cell) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }

    /// Attempts to place a shape variation anchored at `anchor`.
    ///
    /// Adds `anchor + offset` for every offset of the variation and returns
    /// the covered cells as the token for the matching [`Board::undo`] call.
    /// Returns `None`, leaving the board untouched, if any cell would fall
    /// outside the grid or is already occupied.
    pub fn try_place(&mut self, variation: &[Cell], anchor: Cell) -> Option<Vec<Cell>> {
        let mut cells = Vec::with_capacity(variation.len());
        for &(dr, dc) in variation {
            let cell = (anchor.0 + dr, anchor.1 + dc);
            if !self.in_bounds(cell) || self.occupied.contains(&cell) {
                return None;
            }
            cells.push(cell);
        }

        for &cell in &cells {
            self.occupied.insert(cell);
        }
        Some(cells)
    }

    /// Removes the cells of an earlier placement.
    ///
    /// `cells` must be exactly what the matching `try_place` returned.
    pub fn undo(&mut self, cells: &[Cell]) {
        for cell in cells {
            let removed = self.occupied.remove(cell);
            debug_assert!(removed, "undo of unoccupied cell {cell:?}");
        }
    }

    /// Records one required placement of `shape_id` as made.
    pub fn decrement(&mut self, shape_id: usize) {
        if let Some(count) = self.remaining.get_mut(&shape_id) {
            *count -= 1;
            if *count == 0 {
                self.remaining.remove(&shape_id);
            }
        }
    }

    /// Reverts one [`Board::decrement`] of `shape_id`.
    pub fn restore(&mut self, shape_id: usize) {
        *self.remaining.entry(shape_id).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_board(width: usize, height: usize) -> Board {
        Board::new(width, height, [])
    }

    #[test]
    fn test_try_place_covers_anchor_plus_offsets() {
        let mut board = empty_board(3, 3);
        let cells = board.try_place(&[(0, 0), (0, 1), (1, 0)], (1, 1)).unwrap();
        assert_eq!(cells, vec![(1, 1), (1, 2), (2, 1)]);
        assert!(board.is_occupied((1, 1)));
        assert!(board.is_occupied((1, 2)));
        assert!(board.is_occupied((2, 1)));
        assert_eq!(board.free_area(), 6);
    }

    #[test]
    fn test_try_place_rejects_out_of_bounds_without_mutation() {
        let mut board = empty_board(2, 2);
        assert!(board.try_place(&[(0, 0), (0, 1), (0, 2)], (0, 0)).is_none());
        assert_eq!(board.free_area(), 4);
    }

    #[test]
    fn test_try_place_rejects_negative_offsets_leaving_grid() {
        let mut board = empty_board(3, 3);
        // S-shape variation reaching left of its anchor
        assert!(board.try_place(&[(0, 0), (1, -1), (1, 0)], (0, 0)).is_none());
        assert_eq!(board.free_area(), 9);
    }

    #[test]
    fn test_try_place_rejects_collision_without_mutation() {
        let mut board = empty_board(2, 2);
        board.try_place(&[(0, 0)], (0, 1)).unwrap();
        assert!(board.try_place(&[(0, 0), (0, 1)], (0, 0)).is_none());
        assert_eq!(board.free_area(), 3);
        assert!(!board.is_occupied((0, 0)));
    }

    #[test]
    fn test_undo_restores_placed_cells() {
        let mut board = empty_board(2, 2);
        let cells = board.try_place(&[(0, 0), (0, 1)], (0, 0)).unwrap();
        board.undo(&cells);
        assert_eq!(board.free_area(), 4);
        let again = board.try_place(&[(0, 0), (0, 1)], (0, 0)).unwrap();
        assert_eq!(again, cells);
    }

    #[test]
    fn test_decrement_removes_exhausted_entry() {
        let mut board = Board::new(2, 2, [(0, 1), (1, 2)]);
        board.decrement(0);
        assert_eq!(board.remaining_count(0), 0);
        assert_eq!(board.remaining_ids().collect::<Vec<_>>(), vec![1]);
        board.restore(0);
        assert_eq!(board.remaining_count(0), 1);
    }

    #[test]
    fn test_zero_counts_are_dropped_at_construction() {
        let board = Board::new(2, 2, [(0, 0), (1, 3), (2, 0)]);
        assert_eq!(board.remaining_ids().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_remaining_required_area_weights_by_shape_area() {
        let mut catalog = Catalog::new();
        catalog.insert(Shape::parse(0, &["#"]));
        catalog.insert(Shape::parse(1, &["##", "#."]));
        let board = Board::new(4, 4, [(0, 2), (1, 3)]);
        assert_eq!(board.remaining_required_area(&catalog), 2 + 9);
    }
}
