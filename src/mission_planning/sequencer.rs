//! Run orchestration for single- and multi-target missions
//!
//! A mission validates the grid, runs one A* leg per target, forwards
//! expansion frames to a `FrameSink` and hands the final summary to a
//! `ReportSink`. Targets are visited in row-major scan order of the grid,
//! not by distance.

use std::time::Duration;

use log::{info, warn};

use crate::common::{
    Frame, FrameSink, GridPos, PlannerError, PlannerResult, ReportSink, RunMode, SearchObserver,
};
use crate::path_planning::a_star::{AStarPlanner, SearchMetrics};
use crate::utils::GridMap;

/// Result of a single-target run
#[derive(Debug, Clone, PartialEq)]
pub struct SingleRunSummary {
    /// Grid after the run, route cells marked
    pub grid: GridMap,
    pub start: GridPos,
    pub goal: GridPos,
    pub metrics: SearchMetrics,
    /// Wall count before the run
    pub obstacles: usize,
    /// Free cell count before the run
    pub free_spaces: usize,
}

/// Outcome of one leg of a multi-target run
#[derive(Debug, Clone, PartialEq)]
pub struct LegRecord {
    pub from: GridPos,
    pub goal: GridPos,
    pub reached: bool,
    pub nodes_explored: usize,
    pub path_length: usize,
    pub execution_time: Duration,
}

/// Totals over every leg of a multi-target run
///
/// Explored and expanded counts include failed legs; path length, time
/// and route only count legs that reached their target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunMetrics {
    pub nodes_explored: usize,
    pub cells_expanded: usize,
    pub path_length: usize,
    pub execution_time: Duration,
    pub goals_reached: usize,
    /// Concatenated route; junction cells appear once
    pub path: Vec<GridPos>,
    pub legs: Vec<LegRecord>,
}

impl RunMetrics {
    fn record_reached(&mut self, from: GridPos, goal: GridPos, leg: &SearchMetrics) {
        self.nodes_explored += leg.nodes_explored;
        self.cells_expanded += leg.cells_expanded;
        self.path_length += leg.path_length;
        self.execution_time += leg.execution_time;
        self.goals_reached += 1;

        let skip = usize::from(self.path.last() == leg.path.first());
        self.path.extend(leg.path.iter().skip(skip).copied());

        self.legs.push(LegRecord {
            from,
            goal,
            reached: true,
            nodes_explored: leg.nodes_explored,
            path_length: leg.path_length,
            execution_time: leg.execution_time,
        });
    }

    fn record_failed(&mut self, from: GridPos, goal: GridPos, nodes_explored: usize, cells_expanded: usize) {
        self.nodes_explored += nodes_explored;
        self.cells_expanded += cells_expanded;
        self.legs.push(LegRecord {
            from,
            goal,
            reached: false,
            nodes_explored,
            path_length: 0,
            execution_time: Duration::ZERO,
        });
    }

    /// Totals viewed as search metrics, for the closing frame
    pub fn as_search_metrics(&self) -> SearchMetrics {
        SearchMetrics {
            nodes_explored: self.nodes_explored,
            cells_expanded: self.cells_expanded,
            path_length: self.path_length,
            execution_time: self.execution_time,
            path: self.path.clone(),
        }
    }

    pub fn execution_time_ms(&self) -> f64 {
        self.execution_time.as_secs_f64() * 1000.0
    }
}

/// Result of a multi-target run
#[derive(Debug, Clone, PartialEq)]
pub struct MultiRunSummary {
    pub grid: GridMap,
    pub start: GridPos,
    /// Targets with their rank, in visiting order
    pub goals: Vec<(GridPos, u8)>,
    pub metrics: RunMetrics,
    pub final_position: GridPos,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunSummary {
    Single(SingleRunSummary),
    Multi(MultiRunSummary),
}

impl RunSummary {
    pub fn mode(&self) -> RunMode {
        match self {
            RunSummary::Single(_) => RunMode::SingleTarget,
            RunSummary::Multi(_) => RunMode::MultiTarget,
        }
    }

    pub fn grid(&self) -> &GridMap {
        match self {
            RunSummary::Single(s) => &s.grid,
            RunSummary::Multi(m) => &m.grid,
        }
    }

    pub fn start(&self) -> GridPos {
        match self {
            RunSummary::Single(s) => s.start,
            RunSummary::Multi(m) => m.start,
        }
    }

    pub fn route(&self) -> &[GridPos] {
        match self {
            RunSummary::Single(s) => &s.metrics.path,
            RunSummary::Multi(m) => &m.metrics.path,
        }
    }
}

/// Forwards engine progress to a frame sink, tagged with leg information
struct LegObserver<'a> {
    frames: &'a mut dyn FrameSink,
    mode: RunMode,
    goal_index: usize,
    goal_count: usize,
    goals_reached: usize,
}

impl SearchObserver for LegObserver<'_> {
    fn on_expand(&mut self, grid: &GridMap, metrics: &SearchMetrics) {
        self.frames.render(&Frame {
            grid,
            metrics,
            mode: self.mode,
            goal_index: self.goal_index,
            goal_count: self.goal_count,
            goals_reached: self.goals_reached,
        });
    }
}

fn start_and_goals(grid: &GridMap) -> PlannerResult<(GridPos, Vec<(GridPos, u8)>)> {
    let start = grid.start();
    let goals = grid.goals();
    match start {
        Some(start) if !goals.is_empty() => Ok((start, goals)),
        _ => Err(PlannerError::NoStartOrGoal {
            has_start: start.is_some(),
            goal_count: goals.len(),
        }),
    }
}

/// Search from the grid's start to its first target
pub fn run_single(
    grid: &mut GridMap,
    planner: &AStarPlanner,
    frames: &mut dyn FrameSink,
    reports: &mut dyn ReportSink,
) -> PlannerResult<SingleRunSummary> {
    let (start, goals) = start_and_goals(grid)?;
    let goal = goals[0].0;
    if goals.len() > 1 {
        warn!("{} targets on the grid, single run only visits {}", goals.len(), goal);
    }

    let obstacles = grid.obstacle_count();
    let free_spaces = grid.free_count();
    info!("single-target run from {} to {}", start, goal);

    let mut observer = LegObserver {
        frames: &mut *frames,
        mode: RunMode::SingleTarget,
        goal_index: 0,
        goal_count: 1,
        goals_reached: 0,
    };
    let (_, metrics) = planner.find_path(grid, start, goal, &mut observer)?;

    frames.render(&Frame {
        grid: &*grid,
        metrics: &metrics,
        mode: RunMode::SingleTarget,
        goal_index: 0,
        goal_count: 1,
        goals_reached: 1,
    });
    info!(
        "path found: length {}, {} nodes explored, {:.3} ms",
        metrics.path_length,
        metrics.nodes_explored,
        metrics.execution_time_ms()
    );

    let summary = SingleRunSummary {
        grid: grid.clone(),
        start,
        goal,
        metrics,
        obstacles,
        free_spaces,
    };
    reports.submit(&RunSummary::Single(summary.clone()))?;
    Ok(summary)
}

/// Visit every target in row-major order, chaining legs
///
/// A leg without a path is logged and skipped; the robot stays where it
/// was and the next target is attempted.
pub fn run_multi(
    grid: &mut GridMap,
    planner: &AStarPlanner,
    frames: &mut dyn FrameSink,
    reports: &mut dyn ReportSink,
) -> PlannerResult<MultiRunSummary> {
    let (start, goals) = start_and_goals(grid)?;
    let goal_count = goals.len();
    info!("multi-target run from {} over {} targets", start, goal_count);

    let mut metrics = RunMetrics::default();
    let mut current = start;

    for (goal_index, &(goal, rank)) in goals.iter().enumerate() {
        let mut observer = LegObserver {
            frames: &mut *frames,
            mode: RunMode::MultiTarget,
            goal_index,
            goal_count,
            goals_reached: metrics.goals_reached,
        };

        match planner.find_path(grid, current, goal, &mut observer) {
            Ok((_, leg)) => {
                info!(
                    "target {} (rank {}) at {} reached: length {}",
                    goal_index + 1,
                    rank,
                    goal,
                    leg.path_length
                );
                metrics.record_reached(current, goal, &leg);
                grid.mark_reached(goal)?;
                current = goal;
            }
            Err(PlannerError::NotFound {
                nodes_explored,
                cells_expanded,
                ..
            }) => {
                warn!("no path found to target {} at {}", goal_index + 1, goal);
                metrics.record_failed(current, goal, nodes_explored, cells_expanded);
            }
            Err(e) => return Err(e),
        }
    }

    let totals = metrics.as_search_metrics();
    frames.render(&Frame {
        grid: &*grid,
        metrics: &totals,
        mode: RunMode::MultiTarget,
        goal_index: goal_count - 1,
        goal_count,
        goals_reached: metrics.goals_reached,
    });
    info!(
        "multi-target run complete: {}/{} targets reached",
        metrics.goals_reached, goal_count
    );

    let summary = MultiRunSummary {
        grid: grid.clone(),
        start,
        goals,
        metrics,
        final_position: current,
    };
    reports.submit(&RunSummary::Multi(summary.clone()))?;
    Ok(summary)
}

/// Run either mission kind
pub fn run_mission(
    mode: RunMode,
    grid: &mut GridMap,
    planner: &AStarPlanner,
    frames: &mut dyn FrameSink,
    reports: &mut dyn ReportSink,
) -> PlannerResult<RunSummary> {
    match mode {
        RunMode::SingleTarget => run_single(grid, planner, frames, reports).map(RunSummary::Single),
        RunMode::MultiTarget => run_multi(grid, planner, frames, reports).map(RunSummary::Multi),
    }
}

/// Process exit code for a finished mission
///
/// Failed legs of a multi-target run still exit with 0; a missing route
/// in single mode or a grid without start/targets exits with 1.
pub fn exit_code(result: &PlannerResult<RunSummary>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Cell, NullSink};
    use crate::path_planning::a_star::AStarConfig;
    use crate::utils::reference_maps;

    #[derive(Default)]
    struct FrameLog {
        frames: Vec<(usize, usize, usize)>,
    }

    impl FrameSink for FrameLog {
        fn render(&mut self, frame: &Frame<'_>) {
            self.frames
                .push((frame.goal_index, frame.goal_count, frame.goals_reached));
        }
    }

    #[derive(Default)]
    struct ReportLog {
        summaries: Vec<RunSummary>,
    }

    impl ReportSink for ReportLog {
        fn submit(&mut self, summary: &RunSummary) -> PlannerResult<()> {
            self.summaries.push(summary.clone());
            Ok(())
        }
    }

    fn planner() -> AStarPlanner {
        AStarPlanner::new(AStarConfig::without_delay())
    }

    #[test]
    fn test_single_run_reference() {
        let mut grid = reference_maps::single_target().unwrap();
        let mut frames = FrameLog::default();
        let mut reports = ReportLog::default();

        let summary = run_single(&mut grid, &planner(), &mut frames, &mut reports).unwrap();

        assert_eq!(summary.start, GridPos::new(2, 2));
        assert_eq!(summary.goal, GridPos::new(4, 20));
        assert_eq!(summary.metrics.path_length, 54);
        assert_eq!(summary.obstacles, 123);
        assert_eq!(summary.free_spaces, 163);
        assert_eq!(summary.grid, grid);
        assert_eq!(reports.summaries, vec![RunSummary::Single(summary.clone())]);
        // expansion frames plus the closing frame
        assert_eq!(frames.frames.len(), summary.metrics.cells_expanded);
        assert_eq!(frames.frames.last(), Some(&(0, 1, 1)));
    }

    #[test]
    fn test_single_run_no_path() {
        let mut grid = reference_maps::single_target()
            .unwrap()
            .with_cell(GridPos::new(10, 21), Cell::Wall)
            .unwrap();
        let mut reports = ReportLog::default();

        let result = run_mission(RunMode::SingleTarget, &mut grid, &planner(), &mut NullSink, &mut reports);

        assert!(matches!(result, Err(PlannerError::NotFound { .. })));
        assert_eq!(exit_code(&result), 1);
        assert!(reports.summaries.is_empty());
        assert_eq!(grid.count(Cell::VisitedPath), 0);
    }

    #[test]
    fn test_multi_run_reference() {
        let mut grid = reference_maps::multi_target().unwrap();
        let mut frames = FrameLog::default();
        let mut reports = ReportLog::default();

        let summary = run_multi(&mut grid, &planner(), &mut frames, &mut reports).unwrap();

        assert_eq!(summary.metrics.goals_reached, 4);
        assert_eq!(summary.final_position, GridPos::new(9, 18));
        assert_eq!(summary.metrics.legs.len(), 4);
        assert!(summary.metrics.legs.iter().all(|leg| leg.reached));
        assert_eq!(
            summary.metrics.legs.iter().map(|l| l.path_length).collect::<Vec<_>>(),
            vec![54, 54, 26, 39]
        );
        assert_eq!(summary.metrics.path_length, 54 + 54 + 26 + 39);
        assert_eq!(summary.metrics.path.len(), summary.metrics.path_length + 1);
        assert_eq!(summary.metrics.path.first(), Some(&GridPos::new(2, 2)));
        assert_eq!(summary.metrics.path.last(), Some(&GridPos::new(9, 18)));
        assert!(grid.goals().is_empty());
        assert_eq!(grid.count(Cell::Reached(6)), 1);
        assert_eq!(grid.state_at(GridPos::new(2, 2)).unwrap(), Cell::Start);

        // frames of the second leg report one target reached
        assert!(frames.frames.contains(&(1, 4, 1)));
        assert_eq!(frames.frames.last(), Some(&(3, 4, 4)));
        assert_eq!(reports.summaries.len(), 1);
    }

    #[test]
    fn test_multi_run_skips_unreachable_target() {
        // wall in the (5, 5) target so the second leg fails
        let mut grid = reference_maps::multi_target().unwrap();
        for pos in [
            GridPos::new(4, 5),
            GridPos::new(5, 4),
            GridPos::new(5, 6),
        ] {
            grid = grid.with_cell(pos, Cell::Wall).unwrap();
        }
        let mut reports = ReportLog::default();

        let result = run_mission(RunMode::MultiTarget, &mut grid, &planner(), &mut NullSink, &mut reports);
        assert_eq!(exit_code(&result), 0);

        let summary = match result {
            Ok(RunSummary::Multi(summary)) => summary,
            other => panic!("unexpected result {:?}", other),
        };
        assert_eq!(summary.metrics.goals_reached, 3);
        assert_eq!(summary.final_position, GridPos::new(9, 18));
        let failed: Vec<_> = summary.metrics.legs.iter().filter(|l| !l.reached).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].goal, GridPos::new(5, 5));
        // next leg starts where the robot stood before the failure
        assert_eq!(summary.metrics.legs[2].from, GridPos::new(4, 20));
        assert_eq!(grid.state_at(GridPos::new(5, 5)).unwrap(), Cell::Goal(7));
    }

    #[test]
    fn test_missing_start_aborts_before_search() {
        let mut grid = reference_maps::multi_target()
            .unwrap()
            .with_cell(GridPos::new(2, 2), Cell::Free)
            .unwrap();
        let before = grid.clone();
        let mut frames = FrameLog::default();
        let mut reports = ReportLog::default();

        let result = run_mission(RunMode::MultiTarget, &mut grid, &planner(), &mut frames, &mut reports);

        assert!(matches!(
            result,
            Err(PlannerError::NoStartOrGoal { has_start: false, goal_count: 4 })
        ));
        assert_eq!(exit_code(&result), 1);
        assert!(frames.frames.is_empty());
        assert!(reports.summaries.is_empty());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_missing_goal_aborts() {
        let mut grid = reference_maps::single_target()
            .unwrap()
            .with_cell(GridPos::new(4, 20), Cell::Free)
            .unwrap();
        let result = run_mission(RunMode::SingleTarget, &mut grid, &planner(), &mut NullSink, &mut NullSink);
        assert!(matches!(
            result,
            Err(PlannerError::NoStartOrGoal { has_start: true, goal_count: 0 })
        ));
    }
}
