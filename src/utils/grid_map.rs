// occupancy grid for the A* simulator
// cells are stored row-major in a nalgebra matrix indexed by (row, col)

use itertools::iproduct;
use nalgebra::DMatrix;

use crate::common::{Cell, GridPos, PlannerError, PlannerResult};

#[derive(Debug, Clone, PartialEq)]
pub struct GridMap {
    cells: DMatrix<Cell>,
}

impl GridMap {
    /// Build a grid from a row-major slice of literal cell codes
    pub fn from_codes(height: usize, width: usize, codes: &[i32]) -> PlannerResult<Self> {
        if codes.len() != height * width {
            return Err(PlannerError::InvalidShape {
                height,
                width,
                len: codes.len(),
            });
        }

        let mut cells = DMatrix::from_element(height, width, Cell::Free);
        let mut start: Option<GridPos> = None;
        for (pos, &code) in iproduct!(0..height, 0..width)
            .map(|(row, col)| GridPos::new(row, col))
            .zip(codes.iter())
        {
            let cell = Cell::from_code(code).ok_or(PlannerError::InvalidCell { pos, code })?;
            if cell == Cell::Start {
                if let Some(first) = start {
                    return Err(PlannerError::MultipleStarts { first, second: pos });
                }
                start = Some(pos);
            }
            cells[(pos.row, pos.col)] = cell;
        }

        Ok(Self { cells })
    }

    /// Build a grid from an integer code matrix
    pub fn from_matrix(matrix: &DMatrix<i32>) -> PlannerResult<Self> {
        let (height, width) = matrix.shape();
        // DMatrix iterates column-major
        let codes: Vec<i32> = iproduct!(0..height, 0..width)
            .map(|(row, col)| matrix[(row, col)])
            .collect();
        Self::from_codes(height, width, &codes)
    }

    /// Authoring helper: return the grid with one cell replaced
    ///
    /// Meant for setting up a layout before any run; keeps the single
    /// start invariant.
    pub fn with_cell(mut self, pos: GridPos, cell: Cell) -> PlannerResult<Self> {
        self.check_bounds(pos)?;
        if cell == Cell::Start {
            if let Some(first) = self.start() {
                if first != pos {
                    return Err(PlannerError::MultipleStarts { first, second: pos });
                }
            }
        }
        self.cells[(pos.row, pos.col)] = cell;
        Ok(self)
    }

    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.cells.shape()
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        pos.row < self.height() && pos.col < self.width()
    }

    fn check_bounds(&self, pos: GridPos) -> PlannerResult<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(PlannerError::OutOfBounds {
                pos,
                height: self.height(),
                width: self.width(),
            })
        }
    }

    pub fn state_at(&self, pos: GridPos) -> PlannerResult<Cell> {
        self.check_bounds(pos)?;
        Ok(self.cells[(pos.row, pos.col)])
    }

    pub fn is_traversable(&self, pos: GridPos) -> bool {
        self.contains(pos) && !self.cells[(pos.row, pos.col)].is_wall()
    }

    /// Mark a cell as lying on a found route
    ///
    /// Only `Free` cells change; start, goal, wall and already marked cells
    /// are left as they are. Returns whether the cell changed.
    pub fn mark_path(&mut self, pos: GridPos) -> PlannerResult<bool> {
        self.check_bounds(pos)?;
        let cell = &mut self.cells[(pos.row, pos.col)];
        if *cell == Cell::Free {
            *cell = Cell::VisitedPath;
            return Ok(true);
        }
        Ok(false)
    }

    /// Record that the robot arrived at a goal cell
    pub fn mark_reached(&mut self, pos: GridPos) -> PlannerResult<bool> {
        self.check_bounds(pos)?;
        let cell = &mut self.cells[(pos.row, pos.col)];
        if let Cell::Goal(rank) = *cell {
            *cell = Cell::Reached(rank);
            return Ok(true);
        }
        Ok(false)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (GridPos, Cell)> + '_ {
        iproduct!(0..self.height(), 0..self.width())
            .map(move |(row, col)| (GridPos::new(row, col), self.cells[(row, col)]))
    }

    pub fn row(&self, row: usize) -> impl Iterator<Item = Cell> + '_ {
        (0..self.width()).map(move |col| self.cells[(row, col)])
    }

    pub fn start(&self) -> Option<GridPos> {
        self.cells()
            .find(|(_, cell)| *cell == Cell::Start)
            .map(|(pos, _)| pos)
    }

    /// Goal cells with their rank, in row-major scan order
    pub fn goals(&self) -> Vec<(GridPos, u8)> {
        self.cells()
            .filter_map(|(pos, cell)| match cell {
                Cell::Goal(rank) => Some((pos, rank)),
                _ => None,
            })
            .collect()
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall()).count()
    }

    pub fn free_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Free).count()
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }
}
