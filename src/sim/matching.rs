//! Connected same-color region detection
//!
//! Flood fill over the ring graph. Visited slots are tracked in a side set,
//! so the grid's colors are never touched while searching and the resolver
//! can decide afterwards whether the region clears.

use std::collections::BTreeSet;

use super::color::ColorId;
use super::grid::{Coord, Grid};

/// A maximal connected same-color region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRegion {
    pub color: ColorId,
    pub members: BTreeSet<Coord>,
}

impl MatchRegion {
    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.members.contains(&c)
    }
}

/// Collect the region of `color` connected to `start`.
///
/// If `start` does not hold `color` the region is empty.
pub fn flood(grid: &Grid, start: Coord, color: ColorId) -> MatchRegion {
    let mut members = BTreeSet::new();
    let mut stack = Vec::new();

    if grid.contains(start.spoke, start.depth) && grid.at(start) == Some(color) {
        members.insert(start);
        stack.push(start);
    }

    while let Some(c) = stack.pop() {
        for n in grid.neighbors(c) {
            if grid.at(n) == Some(color) && members.insert(n) {
                stack.push(n);
            }
        }
    }

    MatchRegion { color, members }
}
