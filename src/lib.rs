//! grid_astar_sim - A* path planning on occupancy grids, animated in a terminal
//!
//! A single robot plans 4-connected unit-cost routes from a start cell to
//! one target or to several targets in sequence. The search engine reports
//! every expansion to an observer so it runs headless in tests and
//! animated in the demo binaries.

// Core modules
pub mod common;
pub mod utils;

// Algorithm modules
pub mod path_planning;
pub mod mission_planning;

// Re-export common types for convenience
pub use common::{Cell, GridPos, RunMode, SimConfig};
pub use common::{Frame, FrameSink, ReportSink, SearchObserver, NullSink};
pub use common::{PlannerError, PlannerResult};
pub use path_planning::{AStarConfig, AStarPlanner, SearchMetrics};
pub use mission_planning::{run_mission, run_multi, run_single, exit_code, RunSummary};
pub use utils::GridMap;
