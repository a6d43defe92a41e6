//! Slot grid: six spokes by N depths
//!
//! Coordinates are `(spoke, depth)`. Depth 0 touches the central hexagon and
//! depth N-1 is at the rim. Spokes form a cycle (spoke 5 borders spoke 0);
//! depth has hard ends.
//!
//! Storage is row-major by depth so that each ring of six slots is one
//! contiguous slice, which makes rotation a per-row slice rotate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::color::ColorId;
use crate::consts::SPOKES;

/// A slot coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub spoke: usize,
    pub depth: usize,
}

impl Coord {
    pub const fn new(spoke: usize, depth: usize) -> Self {
        Self { spoke, depth }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("slot ({spoke}, {depth}) is outside the grid")]
    OutOfRange { spoke: usize, depth: usize },
    #[error("grid with {slots} slots per spoke cannot hold {cells} cells")]
    CellCount { slots: usize, cells: usize },
}

/// Fixed-size slot storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridData")]
pub struct Grid {
    slots: usize,
    cells: Vec<Option<ColorId>>,
}

/// Unchecked wire form of a grid
#[derive(Deserialize)]
struct GridData {
    slots: usize,
    cells: Vec<Option<ColorId>>,
}

impl TryFrom<GridData> for Grid {
    type Error = GridError;

    fn try_from(data: GridData) -> Result<Self, GridError> {
        if data.slots.checked_mul(SPOKES) != Some(data.cells.len()) {
            return Err(GridError::CellCount {
                slots: data.slots,
                cells: data.cells.len(),
            });
        }
        Ok(Self {
            slots: data.slots,
            cells: data.cells,
        })
    }
}

impl Grid {
    /// Create an empty grid with `slots` depths per spoke
    pub fn new(slots: usize) -> Self {
        Self {
            slots,
            cells: vec![None; SPOKES * slots],
        }
    }

    /// Number of depths per spoke (N)
    pub fn slots(&self) -> usize {
        self.slots
    }

    #[inline]
    fn index(&self, spoke: usize, depth: usize) -> Result<usize, GridError> {
        if spoke >= SPOKES || depth >= self.slots {
            return Err(GridError::OutOfRange { spoke, depth });
        }
        Ok(depth * SPOKES + spoke)
    }

    pub fn contains(&self, spoke: usize, depth: usize) -> bool {
        spoke < SPOKES && depth < self.slots
    }

    pub fn get(&self, spoke: usize, depth: usize) -> Result<Option<ColorId>, GridError> {
        self.index(spoke, depth).map(|i| self.cells[i])
    }

    pub fn set(
        &mut self,
        spoke: usize,
        depth: usize,
        value: Option<ColorId>,
    ) -> Result<(), GridError> {
        let i = self.index(spoke, depth)?;
        self.cells[i] = value;
        Ok(())
    }

    pub fn is_empty(&self, spoke: usize, depth: usize) -> Result<bool, GridError> {
        self.get(spoke, depth).map(|c| c.is_none())
    }

    /// Slot contents at a coordinate known to be in range.
    ///
    /// Panics on an out-of-range coordinate; callers inside the simulation
    /// only produce coordinates from `neighbors` or bounded loops.
    #[inline]
    pub(crate) fn at(&self, c: Coord) -> Option<ColorId> {
        self.cells[c.depth * SPOKES + c.spoke]
    }

    #[inline]
    pub(crate) fn put(&mut self, c: Coord, value: Option<ColorId>) {
        self.cells[c.depth * SPOKES + c.spoke] = value;
    }

    /// First empty depth on `spoke` at or outward of `depth`
    pub fn first_empty_from(&self, spoke: usize, depth: usize) -> Option<usize> {
        if spoke >= SPOKES {
            return None;
        }
        (depth..self.slots).find(|&d| self.at(Coord::new(spoke, d)).is_none())
    }

    /// Number of occupied slots in the whole grid
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// In-range ring neighbors: both adjacent spokes (wrapping) at the same
    /// depth, then the slots directly inward and outward (not wrapping).
    pub fn neighbors(&self, c: Coord) -> impl Iterator<Item = Coord> + use<> {
        let slots = self.slots;
        let cw = Coord::new((c.spoke + 1) % SPOKES, c.depth);
        let ccw = Coord::new((c.spoke + SPOKES - 1) % SPOKES, c.depth);
        let inward = c.depth.checked_sub(1).map(|d| Coord::new(c.spoke, d));
        let outward = (c.depth + 1 < slots).then(|| Coord::new(c.spoke, c.depth + 1));
        [Some(cw), Some(ccw), inward, outward].into_iter().flatten()
    }

    /// One ring of six slots per depth, innermost first
    pub fn rows(&self) -> impl Iterator<Item = &[Option<ColorId>]> {
        self.cells.chunks_exact(SPOKES)
    }

    pub(crate) fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Option<ColorId>]> {
        self.cells.chunks_exact_mut(SPOKES)
    }

    /// Every occupied slot with its color, in (depth, spoke) order
    pub fn iter_occupied(&self) -> impl Iterator<Item = (Coord, ColorId)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            cell.map(|color| (Coord::new(i % SPOKES, i / SPOKES), color))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(8);
        assert_eq!(grid.slots(), 8);
        assert_eq!(grid.occupied(), 0);
        for spoke in 0..SPOKES {
            for depth in 0..8 {
                assert_eq!(grid.is_empty(spoke, depth), Ok(true));
            }
        }
    }

    #[test]
    fn test_get_set() {
        let mut grid = Grid::new(8);
        grid.set(5, 7, Some(ColorId::Blue)).unwrap();
        assert_eq!(grid.get(5, 7), Ok(Some(ColorId::Blue)));
        assert_eq!(grid.is_empty(5, 7), Ok(false));
        assert_eq!(grid.get(4, 7), Ok(None));
        grid.set(5, 7, None).unwrap();
        assert_eq!(grid.occupied(), 0);
    }

    #[test]
    fn test_out_of_range() {
        let mut grid = Grid::new(4);
        assert_eq!(
            grid.get(6, 0),
            Err(GridError::OutOfRange { spoke: 6, depth: 0 })
        );
        assert_eq!(
            grid.set(0, 4, Some(ColorId::Red)),
            Err(GridError::OutOfRange { spoke: 0, depth: 4 })
        );
        assert!(grid.is_empty(0, 99).is_err());
        assert_eq!(grid.occupied(), 0);
    }

    #[test]
    fn test_neighbors_wrap_spokes_only() {
        let grid = Grid::new(8);

        let n: Vec<_> = grid.neighbors(Coord::new(5, 0)).collect();
        assert_eq!(n, vec![Coord::new(0, 0), Coord::new(4, 0), Coord::new(5, 1)]);

        let n: Vec<_> = grid.neighbors(Coord::new(0, 7)).collect();
        assert_eq!(n, vec![Coord::new(1, 7), Coord::new(5, 7), Coord::new(0, 6)]);
    }

    #[test]
    fn test_first_empty_from() {
        let mut grid = Grid::new(4);
        grid.set(2, 0, Some(ColorId::Red)).unwrap();
        grid.set(2, 1, Some(ColorId::Red)).unwrap();
        assert_eq!(grid.first_empty_from(2, 0), Some(2));
        assert_eq!(grid.first_empty_from(2, 3), Some(3));
        grid.set(2, 2, Some(ColorId::Red)).unwrap();
        grid.set(2, 3, Some(ColorId::Red)).unwrap();
        assert_eq!(grid.first_empty_from(2, 0), None);
    }

    #[test]
    fn test_deserialize_checks_cell_count() {
        let mut grid = Grid::new(2);
        grid.set(1, 1, Some(ColorId::Purple)).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(serde_json::from_str::<Grid>(&json).unwrap(), grid);

        let short = r#"{ "slots": 8, "cells": [null, null, null] }"#;
        let err = serde_json::from_str::<Grid>(short).unwrap_err();
        assert!(err.to_string().contains("cannot hold 3 cells"));
    }

    #[test]
    fn test_iter_occupied_reports_coords() {
        let mut grid = Grid::new(3);
        grid.set(4, 2, Some(ColorId::Green)).unwrap();
        let all: Vec<_> = grid.iter_occupied().collect();
        assert_eq!(all, vec![(Coord::new(4, 2), ColorId::Green)]);
    }
}
