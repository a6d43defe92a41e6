//! Clearing matched regions and releasing the blocks above them
//!
//! A region at or above the match threshold is emptied. Every block left
//! outward of a cleared slot on the same spoke is lifted out of the grid and
//! handed back as a re-fall, so it slides inward through the gap on later
//! ticks and gets its own landing (and its own match check).

use super::color::ColorId;
use super::grid::{Coord, Grid};
use super::matching::MatchRegion;
use crate::consts::SPOKES;

/// Outcome of resolving one region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// True if the region reached the threshold and was emptied
    pub cleared: bool,
    /// Blocks lifted out of the grid, innermost first per spoke
    pub refalls: Vec<(Coord, ColorId)>,
}

/// Clear `region` if it holds at least `min_match` slots.
///
/// Below the threshold nothing changes: the detector never marked the grid,
/// so there is nothing to restore.
pub fn resolve(grid: &mut Grid, region: &MatchRegion, min_match: usize) -> Resolution {
    if region.count() < min_match {
        return Resolution::default();
    }

    // Innermost cleared depth per spoke bounds everything that must fall.
    let mut lowest_gap: [Option<usize>; SPOKES] = [None; SPOKES];
    for &c in &region.members {
        grid.put(c, None);
        let gap = &mut lowest_gap[c.spoke];
        *gap = Some(gap.map_or(c.depth, |d| d.min(c.depth)));
    }

    let mut refalls = Vec::new();
    for (spoke, gap) in lowest_gap.iter().enumerate() {
        let Some(gap) = *gap else { continue };
        for depth in gap + 1..grid.slots() {
            let c = Coord::new(spoke, depth);
            if let Some(color) = grid.at(c) {
                grid.put(c, None);
                refalls.push((c, color));
            }
        }
    }

    log::info!(
        "Cleared {} {:?} blocks, {} released",
        region.count(),
        region.color,
        refalls.len()
    );

    Resolution {
        cleared: true,
        refalls,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MIN_MATCH;
    use crate::sim::matching::flood;

    fn grid_with(slots: usize, cells: &[(usize, usize, ColorId)]) -> Grid {
        let mut grid = Grid::new(slots);
        for &(s, d, c) in cells {
            grid.set(s, d, Some(c)).unwrap();
        }
        grid
    }

    #[test]
    fn test_three_clear() {
        let mut grid = grid_with(
            8,
            &[
                (0, 0, ColorId::Red),
                (1, 0, ColorId::Red),
                (2, 0, ColorId::Red),
            ],
        );
        let region = flood(&grid, Coord::new(1, 0), ColorId::Red);
        let res = resolve(&mut grid, &region, MIN_MATCH);
        assert!(res.cleared);
        assert!(res.refalls.is_empty());
        assert_eq!(grid.occupied(), 0);
    }

    #[test]
    fn test_two_stay() {
        let mut grid = grid_with(8, &[(0, 0, ColorId::Red), (1, 0, ColorId::Red)]);
        let before = grid.clone();
        let region = flood(&grid, Coord::new(0, 0), ColorId::Red);
        let res = resolve(&mut grid, &region, MIN_MATCH);
        assert!(!res.cleared);
        assert!(res.refalls.is_empty());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_blocks_above_gap_fall() {
        // Red row at depth 0 on spokes 0..3, a stack of two on spoke 1.
        let mut grid = grid_with(
            8,
            &[
                (0, 0, ColorId::Red),
                (1, 0, ColorId::Red),
                (2, 0, ColorId::Red),
                (1, 1, ColorId::Blue),
                (1, 2, ColorId::Green),
                (4, 0, ColorId::Purple),
            ],
        );
        let region = flood(&grid, Coord::new(0, 0), ColorId::Red);
        let res = resolve(&mut grid, &region, MIN_MATCH);

        assert!(res.cleared);
        assert_eq!(
            res.refalls,
            vec![
                (Coord::new(1, 1), ColorId::Blue),
                (Coord::new(1, 2), ColorId::Green),
            ]
        );
        // Lifted blocks leave the grid immediately, untouched spokes stay.
        assert_eq!(grid.occupied(), 1);
        assert_eq!(grid.get(4, 0), Ok(Some(ColorId::Purple)));
    }

    #[test]
    fn test_vertical_match_releases_only_outward() {
        let mut grid = grid_with(
            8,
            &[
                (3, 0, ColorId::Orange),
                (3, 1, ColorId::Green),
                (3, 2, ColorId::Green),
                (3, 3, ColorId::Green),
                (3, 4, ColorId::Blue),
            ],
        );
        let region = flood(&grid, Coord::new(3, 2), ColorId::Green);
        let res = resolve(&mut grid, &region, MIN_MATCH);

        assert_eq!(res.refalls, vec![(Coord::new(3, 4), ColorId::Blue)]);
        assert_eq!(grid.get(3, 0), Ok(Some(ColorId::Orange)));
        assert_eq!(grid.occupied(), 1);
    }

    #[test]
    fn test_custom_threshold() {
        let mut grid = grid_with(8, &[(0, 0, ColorId::Red), (1, 0, ColorId::Red)]);
        let region = flood(&grid, Coord::new(0, 0), ColorId::Red);
        assert!(resolve(&mut grid, &region, 2).cleared);
        assert_eq!(grid.occupied(), 0);
    }
}
