//! Run configuration for the simulator binaries
//!
//! Every field has a default matching the reference demo, so an empty
//! TOML file (or no file at all) reproduces it.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use serde::Deserialize;

use crate::common::error::PlannerResult;
use crate::path_planning::a_star::AStarConfig;

/// Environment variable naming an optional TOML config file
pub const CONFIG_ENV_VAR: &str = "ASTAR_SIM_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Pause after each rendered expansion, in milliseconds (0 disables it)
    pub frame_delay_ms: u64,
    /// Clear the terminal before each frame
    pub clear_screen: bool,
    /// Wait for Enter before the first search
    pub wait_for_enter: bool,
    /// Report written by the single-target binary
    pub single_report_path: PathBuf,
    /// Report written by the multi-target binary
    pub multi_report_path: PathBuf,
    /// Optional SVG plot of the final route
    pub plot_path: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frame_delay_ms: 100,
            clear_screen: true,
            wait_for_enter: true,
            single_report_path: PathBuf::from("single_target_report.txt"),
            multi_report_path: PathBuf::from("performance_report.txt"),
            plot_path: None,
        }
    }
}

impl SimConfig {
    /// Configuration for headless runs: no delay, no screen clearing, no prompt
    pub fn headless() -> Self {
        Self {
            frame_delay_ms: 0,
            clear_screen: false,
            wait_for_enter: false,
            ..Default::default()
        }
    }

    pub fn from_toml_str(text: &str) -> PlannerResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> PlannerResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Load the file named by `ASTAR_SIM_CONFIG`, or defaults when unset
    pub fn from_env() -> PlannerResult<Self> {
        match env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let path = PathBuf::from(path);
                info!("loading config from {}", path.display());
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    /// Planner settings derived from this config
    pub fn planner(&self) -> AStarConfig {
        AStarConfig {
            frame_delay: self.frame_delay(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = SimConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.frame_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_partial_toml() {
        let config = SimConfig::from_toml_str(
            "frame_delay_ms = 0\nplot_path = \"route.svg\"\n",
        )
        .unwrap();
        assert_eq!(config.frame_delay_ms, 0);
        assert_eq!(config.plot_path, Some(PathBuf::from("route.svg")));
        assert!(config.clear_screen);
        assert_eq!(config.planner().frame_delay, Duration::ZERO);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = SimConfig::from_toml_str("diagonal = true\n");
        assert!(matches!(result, Err(crate::common::PlannerError::Config(_))));
    }
}
