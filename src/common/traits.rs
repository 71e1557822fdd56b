//! Traits defining the seams between the search engine and its collaborators

use crate::common::error::PlannerResult;
use crate::common::types::RunMode;
use crate::mission_planning::RunSummary;
use crate::path_planning::a_star::SearchMetrics;
use crate::utils::grid_map::GridMap;

/// Receives progress from the A* engine after every node expansion
pub trait SearchObserver {
    fn on_expand(&mut self, grid: &GridMap, metrics: &SearchMetrics);
}

impl<F> SearchObserver for F
where
    F: FnMut(&GridMap, &SearchMetrics),
{
    fn on_expand(&mut self, grid: &GridMap, metrics: &SearchMetrics) {
        self(grid, metrics)
    }
}

/// Snapshot handed to a visualization sink
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub grid: &'a GridMap,
    pub metrics: &'a SearchMetrics,
    pub mode: RunMode,
    /// Zero-based index of the goal currently searched for
    pub goal_index: usize,
    pub goal_count: usize,
    pub goals_reached: usize,
}

/// Trait for frame-by-frame visualization
pub trait FrameSink {
    fn render(&mut self, frame: &Frame<'_>);
}

/// Trait for consumers of the final run summary
pub trait ReportSink {
    fn submit(&mut self, summary: &RunSummary) -> PlannerResult<()>;
}

impl ReportSink for Vec<Box<dyn ReportSink>> {
    fn submit(&mut self, summary: &RunSummary) -> PlannerResult<()> {
        for sink in self.iter_mut() {
            sink.submit(summary)?;
        }
        Ok(())
    }
}

/// Sink that discards everything, for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SearchObserver for NullSink {
    fn on_expand(&mut self, _grid: &GridMap, _metrics: &SearchMetrics) {}
}

impl FrameSink for NullSink {
    fn render(&mut self, _frame: &Frame<'_>) {}
}

impl ReportSink for NullSink {
    fn submit(&mut self, _summary: &RunSummary) -> PlannerResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::GridPos;

    #[test]
    fn test_closure_observer() {
        let grid = GridMap::from_codes(1, 2, &[-1, 9]).unwrap();
        let metrics = SearchMetrics::default();
        let mut calls = 0;
        {
            let mut observer = |g: &GridMap, _m: &SearchMetrics| {
                assert_eq!(g.state_at(GridPos::new(0, 0)).unwrap(), crate::common::Cell::Start);
                calls += 1;
            };
            observer.on_expand(&grid, &metrics);
            observer.on_expand(&grid, &metrics);
        }
        assert_eq!(calls, 2);
    }
}
