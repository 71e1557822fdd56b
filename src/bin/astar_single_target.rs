// Single-target A* path planning demo on the built-in warehouse grid
//
// Set ASTAR_SIM_CONFIG to a TOML file to change pacing or report paths.

use std::process;

use grid_astar_sim::common::{RunMode, SimConfig};
use grid_astar_sim::mission_planning::demo::{init_logging, run_demo};
use grid_astar_sim::utils::reference_maps;

fn main() {
    init_logging();
    let code = run_demo(
        RunMode::SingleTarget,
        reference_maps::single_target(),
        SimConfig::from_env(),
    );
    process::exit(code);
}
