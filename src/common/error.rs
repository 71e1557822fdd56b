//! Error types for grid_astar_sim

use thiserror::Error;

use crate::common::types::GridPos;

/// Main error type for grid planning runs
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Position outside the grid bounds
    #[error("position {pos} is outside the {height}x{width} grid")]
    OutOfBounds {
        pos: GridPos,
        height: usize,
        width: usize,
    },
    /// Frontier exhausted before the goal was reached
    #[error("no path from {start} to {goal} ({nodes_explored} nodes explored)")]
    NotFound {
        start: GridPos,
        goal: GridPos,
        nodes_explored: usize,
        cells_expanded: usize,
    },
    /// Grid lacks a start marker or has no goal marker at all
    #[error("grid has no start position or no targets (start: {has_start}, targets: {goal_count})")]
    NoStartOrGoal { has_start: bool, goal_count: usize },
    /// Literal grid value with no cell meaning
    #[error("invalid cell code {code} at {pos}")]
    InvalidCell { pos: GridPos, code: i32 },
    /// More than one start marker in a literal grid
    #[error("second start marker at {second}, first at {first}")]
    MultipleStarts { first: GridPos, second: GridPos },
    /// Literal grid whose length does not match the declared shape
    #[error("grid of {height}x{width} needs {} cells, got {len}", .height * .width)]
    InvalidShape {
        height: usize,
        width: usize,
        len: usize,
    },
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed configuration file
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
    /// Route plot could not be produced
    #[error("plot error: {0}")]
    Plot(String),
}

/// Result type alias for planning operations
pub type PlannerResult<T> = Result<T, PlannerError>;
