// Multi-target A* path planning demo: visits every target of the
// built-in grid in row-major order

use std::process;

use grid_astar_sim::common::{RunMode, SimConfig};
use grid_astar_sim::mission_planning::demo::{init_logging, run_demo};
use grid_astar_sim::utils::reference_maps;

fn main() {
    init_logging();
    let code = run_demo(
        RunMode::MultiTarget,
        reference_maps::multi_target(),
        SimConfig::from_env(),
    );
    process::exit(code);
}
