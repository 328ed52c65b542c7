//! Weekly availability grid.
//!
//! Each classroom and staff member owns a 6×5 grid (slots × days) of
//! tri-state cells. Grids start fully open; hard constraints block
//! cells before search begins. The search never writes into a grid:
//! `Reserved` cells only appear in occupancy grids derived from a
//! finished [`Schedule`](super::Schedule).
//!
//! # Precedence
//! A slot is usable for a new session iff its cell is `Open`.

use serde::{Deserialize, Serialize};

use super::time_slot::{DAYS_PER_WEEK, SLOTS_PER_DAY};
use super::TimeSlot;

/// State of one grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Free to use.
    #[default]
    Open,
    /// Unavailable because of a hard constraint.
    Blocked,
    /// Taken by a scheduled session.
    Reserved,
}

/// A 6×5 availability matrix indexed by [`TimeSlot`] grid coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityGrid {
    cells: [[Cell; DAYS_PER_WEEK]; SLOTS_PER_DAY],
}

impl AvailabilityGrid {
    /// Creates a fully open grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell at a slot.
    #[inline]
    pub fn get(&self, slot: TimeSlot) -> Cell {
        let (row, col) = slot.grid();
        self.cells[row][col]
    }

    /// Sets the cell at a slot.
    #[inline]
    pub fn set(&mut self, slot: TimeSlot, cell: Cell) {
        let (row, col) = slot.grid();
        self.cells[row][col] = cell;
    }

    /// Marks a slot as blocked by a hard constraint.
    pub fn block(&mut self, slot: TimeSlot) {
        self.set(slot, Cell::Blocked);
    }

    /// Marks a slot as taken by a session. Blocked cells stay blocked.
    pub fn reserve(&mut self, slot: TimeSlot) {
        if self.get(slot) == Cell::Open {
            self.set(slot, Cell::Reserved);
        }
    }

    /// Whether a slot is open.
    #[inline]
    pub fn is_open(&self, slot: TimeSlot) -> bool {
        self.get(slot) == Cell::Open
    }

    /// Slots that are still open, in week order.
    pub fn open_slots(&self) -> Vec<TimeSlot> {
        TimeSlot::all().filter(|s| self.is_open(*s)).collect()
    }

    /// Number of cells in the given state.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().flatten().filter(|c| **c == cell).count()
    }

    /// Row-major view of the cells (rows are slots, columns are days).
    pub fn rows(&self) -> &[[Cell; DAYS_PER_WEEK]; SLOTS_PER_DAY] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(code: &str) -> TimeSlot {
        TimeSlot::from_code(code).unwrap()
    }

    #[test]
    fn test_new_grid_is_open() {
        let grid = AvailabilityGrid::new();
        assert_eq!(grid.count(Cell::Open), 30);
        assert_eq!(grid.open_slots().len(), 30);
    }

    #[test]
    fn test_block_and_reserve() {
        let mut grid = AvailabilityGrid::new();
        grid.block(slot("M1"));
        grid.reserve(slot("T2"));

        assert_eq!(grid.get(slot("M1")), Cell::Blocked);
        assert_eq!(grid.get(slot("T2")), Cell::Reserved);
        assert!(!grid.is_open(slot("M1")));
        assert!(grid.is_open(slot("M2")));
        assert_eq!(grid.count(Cell::Open), 28);
        assert_eq!(grid.rows()[0][0], Cell::Blocked);
        assert_eq!(grid.rows()[1][1], Cell::Reserved);
    }

    #[test]
    fn test_reserve_keeps_block() {
        let mut grid = AvailabilityGrid::new();
        grid.block(slot("F6"));
        grid.reserve(slot("F6"));
        assert_eq!(grid.get(slot("F6")), Cell::Blocked);
    }
}
