//! Common types used throughout grid_astar_sim

use std::fmt;

/// Cell coordinate on the occupancy grid (row-major, zero based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Apply a signed unit offset, `None` if the result would be negative
    pub fn offset(&self, d_row: isize, d_col: isize) -> Option<GridPos> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Some(GridPos { row, col })
    }
}

impl From<(usize, usize)> for GridPos {
    fn from(tuple: (usize, usize)) -> Self {
        Self { row: tuple.0, col: tuple.1 }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// State of one grid cell
///
/// Literal grids use integer codes: `1` wall, `0` free, `-1` start,
/// `2` visited path and any value above 5 for a goal of that rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Free,
    Wall,
    Start,
    Goal(u8),
    /// Goal the robot already arrived at during a multi-target run
    Reached(u8),
    VisitedPath,
}

impl Cell {
    /// Lowest integer code that denotes a goal
    pub const MIN_GOAL_CODE: i32 = 6;

    /// Decode a literal grid value, `None` for codes with no meaning
    pub fn from_code(code: i32) -> Option<Cell> {
        match code {
            0 => Some(Cell::Free),
            1 => Some(Cell::Wall),
            -1 => Some(Cell::Start),
            2 => Some(Cell::VisitedPath),
            c if (Self::MIN_GOAL_CODE..=i32::from(u8::MAX)).contains(&c) => {
                Some(Cell::Goal(c as u8))
            }
            _ => None,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Cell::Free => 0,
            Cell::Wall => 1,
            Cell::Start => -1,
            Cell::VisitedPath => 2,
            Cell::Goal(rank) | Cell::Reached(rank) => i32::from(*rank),
        }
    }

    pub fn is_goal(&self) -> bool {
        matches!(self, Cell::Goal(_))
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, Cell::Wall)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Free
    }
}

/// Which orchestrator produced a frame or report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    SingleTarget,
    MultiTarget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_codes() {
        assert_eq!(Cell::from_code(1), Some(Cell::Wall));
        assert_eq!(Cell::from_code(-1), Some(Cell::Start));
        assert_eq!(Cell::from_code(9), Some(Cell::Goal(9)));
        assert_eq!(Cell::from_code(6), Some(Cell::Goal(6)));
        assert_eq!(Cell::from_code(5), None);
        assert_eq!(Cell::from_code(-3), None);
        assert_eq!(Cell::Goal(7).code(), 7);
    }

    #[test]
    fn test_grid_pos_offset() {
        let p = GridPos::new(0, 3);
        assert_eq!(p.offset(-1, 0), None);
        assert_eq!(p.offset(1, -1), Some(GridPos::new(1, 2)));
        assert_eq!(format!("{}", p), "(0, 3)");
    }
}
