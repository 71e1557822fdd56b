//! Interactive glue shared by the demo binaries

use std::io::{self, BufRead, Write};

use log::error;

use crate::common::{PlannerError, PlannerResult, ReportSink, RunMode, SimConfig};
use crate::mission_planning::sequencer::{exit_code, run_mission, RunSummary};
use crate::path_planning::a_star::AStarPlanner;
use crate::utils::{GridMap, RoutePlot, TerminalRenderer, TextReport};

/// Install `env_logger` on stderr, `info` unless `RUST_LOG` says otherwise
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn wait_for_enter() -> io::Result<()> {
    print!("Press Enter to begin...");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

/// Sinks receiving the final summary: text report, plus a plot if configured
pub fn report_sinks(mode: RunMode, config: &SimConfig) -> Vec<Box<dyn ReportSink>> {
    let report_path = match mode {
        RunMode::SingleTarget => config.single_report_path.clone(),
        RunMode::MultiTarget => config.multi_report_path.clone(),
    };
    let mut sinks: Vec<Box<dyn ReportSink>> = vec![Box::new(TextReport::new(report_path))];
    if let Some(plot_path) = &config.plot_path {
        sinks.push(Box::new(RoutePlot::new(plot_path.clone())));
    }
    sinks
}

fn run(mode: RunMode, mut grid: GridMap, config: &SimConfig) -> PlannerResult<RunSummary> {
    let label = match mode {
        RunMode::SingleTarget => "Single-Target",
        RunMode::MultiTarget => "Multi-Target",
    };
    println!("\nStarting {} Path Planning...", label);
    if config.wait_for_enter {
        wait_for_enter()?;
    }

    let planner = AStarPlanner::new(config.planner());
    let mut frames = TerminalRenderer::stdout(config.clear_screen);
    let mut reports = report_sinks(mode, config);
    run_mission(mode, &mut grid, &planner, &mut frames, &mut reports)
}

/// Run a mission end to end and return the process exit code
pub fn run_demo(mode: RunMode, grid: PlannerResult<GridMap>, config: PlannerResult<SimConfig>) -> i32 {
    let result = config.and_then(|config| {
        let grid = grid?;
        let summary = run(mode, grid, &config)?;
        let report_path = match mode {
            RunMode::SingleTarget => &config.single_report_path,
            RunMode::MultiTarget => &config.multi_report_path,
        };
        match &summary {
            RunSummary::Single(_) => println!("\nPath visualization complete."),
            RunSummary::Multi(_) => println!("\nMulti-target path planning complete."),
        }
        println!(
            "\nPerformance report has been saved to '{}'",
            report_path.display()
        );
        Ok(summary)
    });

    match &result {
        Err(PlannerError::NotFound { .. }) => println!("No path found."),
        Err(PlannerError::NoStartOrGoal { .. }) => {
            println!("Error: No start position or targets found!")
        }
        Err(e) => error!("{}", e),
        Ok(_) => {}
    }
    exit_code(&result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_report_sinks_follow_config() {
        let config = SimConfig::headless();
        assert_eq!(report_sinks(RunMode::SingleTarget, &config).len(), 1);

        let config = SimConfig {
            plot_path: Some(PathBuf::from("route.svg")),
            ..SimConfig::headless()
        };
        assert_eq!(report_sinks(RunMode::MultiTarget, &config).len(), 2);
    }

    #[test]
    fn test_missing_start_exit_code() {
        let grid = crate::utils::reference_maps::single_target()
            .and_then(|g| g.with_cell(crate::common::GridPos::new(2, 2), crate::common::Cell::Free));
        assert_eq!(run_demo(RunMode::SingleTarget, grid, Ok(SimConfig::headless())), 1);
    }
}
