//! Utility modules for grid_astar_sim

pub mod grid_map;
pub mod reference_maps;
pub mod report;
pub mod visualization;

pub use grid_map::*;
pub use report::TextReport;
pub use visualization::{TerminalRenderer, RoutePlot, colors};
