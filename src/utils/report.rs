// plain-text performance report written after a run

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::common::{PlannerResult, ReportSink};
use crate::mission_planning::{MultiRunSummary, RunSummary, SingleRunSummary};

pub const ALGORITHM_NAME: &str = "A* Search";

/// Writes the run summary to a text file
pub struct TextReport {
    path: PathBuf,
}

impl TextReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for TextReport {
    fn submit(&mut self, summary: &RunSummary) -> PlannerResult<()> {
        fs::write(&self.path, format_report(summary))?;
        info!("performance report saved to {}", self.path.display());
        Ok(())
    }
}

pub fn format_report(summary: &RunSummary) -> String {
    match summary {
        RunSummary::Single(s) => format_single(s),
        RunSummary::Multi(m) => format_multi(m),
    }
}

// writing into a String cannot fail, hence the ignored fmt results
fn format_single(s: &SingleRunSummary) -> String {
    let (height, width) = s.grid.shape();
    let mut out = String::new();
    out.push_str("=== Single-Target A* Path Planning Performance Report ===\n\n");
    let _ = writeln!(out, "Algorithm: {}", ALGORITHM_NAME);
    let _ = writeln!(out, "Environment Size: {}x{}\n", height, width);

    out.push_str("Performance Metrics:\n");
    out.push_str("-------------------\n");
    let _ = writeln!(out, "Nodes Explored: {}", s.metrics.nodes_explored);
    let _ = writeln!(out, "Path Length: {}", s.metrics.path_length);
    let _ = writeln!(out, "Execution Time: {:.3} ms", s.metrics.execution_time_ms());
    let _ = writeln!(out, "Obstacles: {}", s.obstacles);
    let _ = writeln!(out, "Free Spaces: {}\n", s.free_spaces);

    let _ = writeln!(out, "Start Position: {}", s.start);
    let _ = writeln!(out, "Target Position: {}\n", s.goal);

    out.push_str("Path Coordinates:\n");
    for pos in &s.metrics.path {
        let _ = writeln!(out, "{}", pos);
    }
    out
}

fn format_multi(m: &MultiRunSummary) -> String {
    let (height, width) = m.grid.shape();
    let mut out = String::new();
    out.push_str("=== Multi-Target A* Path Planning Performance Report ===\n\n");
    let _ = writeln!(out, "Algorithm: {}", ALGORITHM_NAME);
    let _ = writeln!(out, "Environment Size: {}x{}", height, width);
    let _ = writeln!(out, "Total Targets: {}\n", m.goals.len());

    out.push_str("Performance Metrics:\n");
    out.push_str("-------------------\n");
    let _ = writeln!(out, "Total Nodes Explored: {}", m.metrics.nodes_explored);
    let _ = writeln!(out, "Total Path Length: {}", m.metrics.path_length);
    let _ = writeln!(out, "Total Execution Time: {:.3} ms", m.metrics.execution_time_ms());
    let _ = writeln!(out, "Targets Successfully Reached: {}\n", m.metrics.goals_reached);

    out.push_str("Target Positions:\n");
    for (i, (pos, _)) in m.goals.iter().enumerate() {
        let status = match m.metrics.legs.get(i) {
            Some(leg) if !leg.reached => " (unreachable)",
            _ => "",
        };
        let _ = writeln!(out, "Target {}: {}{}", i + 1, pos, status);
    }

    out.push_str("\nPath Coordinates:\n");
    for pos in &m.metrics.path {
        let _ = writeln!(out, "{}", pos);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::NullSink;
    use crate::mission_planning::{run_multi, run_single};
    use crate::path_planning::{AStarConfig, AStarPlanner};
    use crate::utils::{reference_maps, GridMap};

    fn planner() -> AStarPlanner {
        AStarPlanner::new(AStarConfig::without_delay())
    }

    #[test]
    fn test_single_report_contents() {
        let mut grid = GridMap::from_codes(3, 5, &[1, 1, 1, 1, 1, 1, -1, 0, 9, 1, 1, 1, 1, 1, 1]).unwrap();
        let summary = run_single(&mut grid, &planner(), &mut NullSink, &mut NullSink).unwrap();
        let text = format_report(&RunSummary::Single(summary));

        assert!(text.starts_with("=== Single-Target A* Path Planning Performance Report ===\n\n"));
        assert!(text.contains("Algorithm: A* Search\n"));
        assert!(text.contains("Environment Size: 3x5\n"));
        assert!(text.contains("Nodes Explored: 3\n"));
        assert!(text.contains("Path Length: 2\n"));
        assert!(text.contains("Obstacles: 12\n"));
        assert!(text.contains("Free Spaces: 1\n"));
        assert!(text.contains("Start Position: (1, 1)\nTarget Position: (1, 3)\n"));
        assert!(text.ends_with("Path Coordinates:\n(1, 1)\n(1, 2)\n(1, 3)\n"));

        let time_line = text.lines().find(|l| l.starts_with("Execution Time: ")).unwrap();
        let decimals = time_line.trim_end_matches(" ms").rsplit('.').next().unwrap();
        assert_eq!(decimals.len(), 3);
    }

    #[test]
    fn test_multi_report_contents() {
        let mut grid = reference_maps::multi_target().unwrap();
        let summary = run_multi(&mut grid, &planner(), &mut NullSink, &mut NullSink).unwrap();
        let text = format_report(&RunSummary::Multi(summary.clone()));

        assert!(text.contains("Total Targets: 4\n"));
        assert!(text.contains("Targets Successfully Reached: 4\n"));
        assert!(text.contains("Target 1: (4, 20)\n"));
        assert!(text.contains("Target 4: (9, 18)\n"));
        assert!(text.contains(&format!("Total Path Length: {}\n", summary.metrics.path_length)));

        let coords: Vec<&str> = text
            .split("Path Coordinates:\n")
            .nth(1)
            .unwrap()
            .lines()
            .collect();
        assert_eq!(coords.len(), summary.metrics.path.len());
        assert_eq!(coords.first(), Some(&"(2, 2)"));
        assert_eq!(coords.last(), Some(&"(9, 18)"));
    }

    #[test]
    fn test_text_report_writes_file() {
        let path = std::env::temp_dir().join(format!("astar_report_{}.txt", std::process::id()));
        let mut grid = reference_maps::single_target().unwrap();
        let mut sink = TextReport::new(path.clone());

        run_single(&mut grid, &planner(), &mut NullSink, &mut sink).unwrap();

        let written = fs::read_to_string(sink.path()).unwrap();
        assert!(written.contains("Path Length: 54\n"));
        assert!(written.contains("Target Position: (4, 20)\n"));
        let _ = fs::remove_file(&path);
    }
}
