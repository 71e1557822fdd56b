//! A* path planning on 4-connected occupancy grids
//!
//! Nodes live in an arena (`node_storage`) and point at their parent by
//! index. The open set may hold several entries for the same cell; stale
//! ones are dropped when popped because their cell is already closed.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::thread::sleep;
use std::time::{Duration, Instant};

use log::{debug, trace};
use nalgebra::DMatrix;

use crate::common::{GridPos, PlannerError, PlannerResult, SearchObserver};
use crate::path_planning::motion::{manhattan, neighbors, MOTION_4};
use crate::utils::GridMap;

/// Configuration for the A* planner
#[derive(Debug, Clone, PartialEq)]
pub struct AStarConfig {
    /// Pause after each expansion so frames can be watched
    pub frame_delay: Duration,
}

impl Default for AStarConfig {
    fn default() -> Self {
        Self {
            frame_delay: Duration::from_millis(100),
        }
    }
}

impl AStarConfig {
    pub fn without_delay() -> Self {
        Self {
            frame_delay: Duration::ZERO,
        }
    }
}

/// Counters and route produced by one search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchMetrics {
    /// Frontier pops, stale duplicates included
    pub nodes_explored: usize,
    /// Distinct cells closed
    pub cells_expanded: usize,
    /// Unit moves from start to goal
    pub path_length: usize,
    /// Search time, excluding observer callbacks and frame delays
    pub execution_time: Duration,
    /// Route from start to goal, both included
    pub path: Vec<GridPos>,
}

impl SearchMetrics {
    pub fn execution_time_ms(&self) -> f64 {
        self.execution_time.as_secs_f64() * 1000.0
    }
}

#[derive(Debug, Clone)]
struct SearchNode {
    pos: GridPos,
    g: usize,
    h: usize,
    parent_index: Option<usize>,
}

impl SearchNode {
    fn f(&self) -> usize {
        self.g + self.h
    }
}

/// Open set entry; `index` doubles as insertion order
#[derive(Debug, PartialEq, Eq)]
struct NodeWithPriority {
    f: usize,
    h: usize,
    index: usize,
}

impl Ord for NodeWithPriority {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for NodeWithPriority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub struct AStarPlanner {
    config: AStarConfig,
    motion: Vec<(isize, isize)>,
}

impl AStarPlanner {
    pub fn new(config: AStarConfig) -> Self {
        let motion = Self::get_motion_model();
        AStarPlanner { config, motion }
    }

    pub fn config(&self) -> &AStarConfig {
        &self.config
    }

    /// Search a route from `start` to `goal`
    ///
    /// On success every free cell strictly between start and goal is marked
    /// as path on `grid`. The observer is called after each expansion with
    /// the grid and the live metrics. Fails with `NotFound` when the
    /// frontier runs dry, leaving the grid untouched.
    pub fn find_path(
        &self,
        grid: &mut GridMap,
        start: GridPos,
        goal: GridPos,
        observer: &mut dyn SearchObserver,
    ) -> PlannerResult<(Vec<GridPos>, SearchMetrics)> {
        grid.state_at(start)?;
        grid.state_at(goal)?;
        debug!("[AStar] find_path: start={} goal={}", start, goal);

        let timer = Instant::now();
        let mut paused = Duration::ZERO;
        let (height, width) = grid.shape();

        let mut metrics = SearchMetrics::default();
        let mut open_set = BinaryHeap::new();
        let mut closed_set = DMatrix::from_element(height, width, false);
        let mut node_storage: Vec<SearchNode> = Vec::new();

        node_storage.push(SearchNode {
            pos: start,
            g: 0,
            h: manhattan(start, goal),
            parent_index: None,
        });
        open_set.push(NodeWithPriority {
            f: node_storage[0].f(),
            h: node_storage[0].h,
            index: 0,
        });

        while let Some(current_item) = open_set.pop() {
            metrics.nodes_explored += 1;

            let current_index = current_item.index;
            let current = node_storage[current_index].clone();
            let closed = &mut closed_set[(current.pos.row, current.pos.col)];
            if *closed {
                continue;
            }
            *closed = true;
            metrics.cells_expanded += 1;

            if current.pos == goal {
                let path = self.calc_final_path(current_index, &node_storage);
                if path.len() > 2 {
                    for &pos in &path[1..path.len() - 1] {
                        grid.mark_path(pos)?;
                    }
                }
                metrics.path_length = path.len() - 1;
                metrics.path = path.clone();
                metrics.execution_time = timer.elapsed().saturating_sub(paused);
                debug!(
                    "[AStar] goal {} reached: length={} explored={}",
                    goal, metrics.path_length, metrics.nodes_explored
                );
                return Ok((path, metrics));
            }

            trace!(
                "[AStar] expand {} g={} h={} open={}",
                current.pos,
                current.g,
                current.h,
                open_set.len()
            );

            for next in neighbors(current.pos, &self.motion, height, width) {
                if !grid.is_traversable(next) || closed_set[(next.row, next.col)] {
                    continue;
                }

                let node = SearchNode {
                    pos: next,
                    g: current.g + 1,
                    h: manhattan(next, goal),
                    parent_index: Some(current_index),
                };
                let item = NodeWithPriority {
                    f: node.f(),
                    h: node.h,
                    index: node_storage.len(),
                };
                node_storage.push(node);
                open_set.push(item);
            }

            let pause_start = Instant::now();
            metrics.execution_time = pause_start.duration_since(timer).saturating_sub(paused);
            observer.on_expand(grid, &metrics);
            if !self.config.frame_delay.is_zero() {
                sleep(self.config.frame_delay);
            }
            paused += pause_start.elapsed();
        }

        debug!(
            "[AStar] FAILED: no path from {} to {} after {} pops",
            start, goal, metrics.nodes_explored
        );
        Err(PlannerError::NotFound {
            start,
            goal,
            nodes_explored: metrics.nodes_explored,
            cells_expanded: metrics.cells_expanded,
        })
    }

    fn calc_final_path(&self, goal_index: usize, node_storage: &[SearchNode]) -> Vec<GridPos> {
        let mut path = Vec::new();
        let mut current_index = Some(goal_index);

        while let Some(index) = current_index {
            let node = &node_storage[index];
            path.push(node.pos);
            current_index = node.parent_index;
        }

        path.reverse();
        path
    }

    fn get_motion_model() -> Vec<(isize, isize)> {
        MOTION_4.to_vec()
    }
}

impl Default for AStarPlanner {
    fn default() -> Self {
        Self::new(AStarConfig::default())
    }
}
