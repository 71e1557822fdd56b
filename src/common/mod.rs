//! Common types, traits, error definitions and configuration for grid_astar_sim
//!
//! This module provides the building blocks shared by the grid model,
//! the search engine, the sinks and the run orchestrator.

pub mod types;
pub mod traits;
pub mod error;
pub mod config;

pub use types::*;
pub use traits::*;
pub use error::*;
pub use config::*;
