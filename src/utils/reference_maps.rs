//! Built-in 12x24 warehouse layout used by the demo binaries

use nalgebra::DMatrix;

use crate::common::{Cell, GridPos, PlannerResult};
use crate::utils::grid_map::GridMap;

pub const HEIGHT: usize = 12;
pub const WIDTH: usize = 24;

#[rustfmt::skip]
const LAYOUT: [i32; HEIGHT * WIDTH] = [
    1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,
    1,0,0,0,0,0,0,0,0,1,0,0,0,0,0,0,0,0,0,0,0,0,0,1,
    1,0,-1,0,0,0,0,0,0,1,0,0,0,0,0,0,0,1,1,1,1,1,0,1,
    1,0,0,0,0,0,0,0,0,1,0,0,0,0,0,0,0,1,0,0,0,1,0,1,
    1,0,0,0,0,0,0,0,0,1,0,0,0,1,1,1,1,1,0,0,9,1,0,1,
    1,0,0,0,0,0,0,0,0,1,0,0,0,1,1,0,0,1,0,0,0,1,0,1,
    1,0,1,1,1,1,1,1,1,1,0,0,0,1,0,0,0,1,0,0,0,1,0,1,
    1,0,0,0,0,0,0,0,0,1,0,0,0,1,0,1,0,1,0,0,0,1,0,1,
    1,0,0,0,0,0,0,0,0,1,0,0,0,1,1,1,0,1,0,0,0,1,0,1,
    1,0,1,1,1,0,0,0,0,0,0,0,0,0,0,0,0,1,0,0,0,1,0,1,
    1,0,0,0,1,0,1,1,1,1,0,0,0,0,0,0,0,1,0,0,0,0,0,1,
    1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,
];

/// Extra targets placed for the multi-target run, as (row, col, rank)
pub const EXTRA_TARGETS: [(usize, usize, u8); 3] = [(7, 15, 8), (5, 5, 7), (9, 18, 6)];

/// Layout with start (2, 2) and a single rank-9 target at (4, 20)
pub fn single_target() -> PlannerResult<GridMap> {
    GridMap::from_matrix(&DMatrix::from_row_slice(HEIGHT, WIDTH, &LAYOUT))
}

/// Single-target layout plus the targets in `EXTRA_TARGETS`
pub fn multi_target() -> PlannerResult<GridMap> {
    EXTRA_TARGETS
        .iter()
        .try_fold(single_target()?, |grid, &(row, col, rank)| {
            grid.with_cell(GridPos::new(row, col), Cell::Goal(rank))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_target_layout() {
        let grid = single_target().unwrap();
        assert_eq!(grid.shape(), (12, 24));
        assert_eq!(grid.start(), Some(GridPos::new(2, 2)));
        assert_eq!(grid.goals(), vec![(GridPos::new(4, 20), 9)]);
        assert_eq!(grid.obstacle_count(), 123);
        assert_eq!(grid.free_count(), 163);
    }

    #[test]
    fn test_multi_target_scan_order() {
        let grid = multi_target().unwrap();
        let goals: Vec<GridPos> = grid.goals().into_iter().map(|(pos, _)| pos).collect();
        assert_eq!(
            goals,
            vec![
                GridPos::new(4, 20),
                GridPos::new(5, 5),
                GridPos::new(7, 15),
                GridPos::new(9, 18),
            ]
        );
    }
}
