//! Motion model and heuristic for 4-connected unit-cost grids

use crate::common::GridPos;

/// Unit offsets (d_row, d_col) in expansion order: up, down, left, right
///
/// The order decides tie-breaks between equally good routes, so it must
/// stay fixed for reproducible paths.
pub const MOTION_4: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Manhattan distance, admissible and consistent for 4-connected moves
pub fn manhattan(a: GridPos, b: GridPos) -> usize {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}

/// In-bounds neighbors of `pos`, in the order of `offsets`
pub fn neighbors<'a>(
    pos: GridPos,
    offsets: &'a [(isize, isize)],
    height: usize,
    width: usize,
) -> impl Iterator<Item = GridPos> + 'a {
    offsets
        .iter()
        .filter_map(move |&(d_row, d_col)| pos.offset(d_row, d_col))
        .filter(move |n| n.row < height && n.col < width)
}
