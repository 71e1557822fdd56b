//! Visualization utilities for grid_astar_sim
//!
//! `TerminalRenderer` draws one ANSI-colored frame per expansion;
//! `RoutePlot` saves the final grid and route with gnuplot.

use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};

use colored::{Color as TermColor, ColoredString, Colorize};
use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};
use log::{info, warn};

use crate::common::{Cell, Frame, FrameSink, PlannerError, PlannerResult, ReportSink, RunMode};
use crate::mission_planning::RunSummary;
use crate::utils::grid_map::GridMap;

/// Color palette for the route plot
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const RED: &str = "#FF0000";
    pub const BLUE: &str = "#0000FF";
    pub const ORANGE: &str = "#FFA500";

    // Semantic colors
    pub const OBSTACLE: &str = BLACK;
    pub const START: &str = RED;
    pub const GOAL: &str = BLUE;
    pub const PATH: &str = ORANGE;
}

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

fn rank_color(rank: u8) -> TermColor {
    match rank {
        9 => TermColor::Blue,
        8 => TermColor::Magenta,
        7 => TermColor::Yellow,
        6 => TermColor::Cyan,
        _ => TermColor::White,
    }
}

fn cell_glyph(cell: Cell) -> ColoredString {
    match cell {
        Cell::Wall => "██".green(),
        Cell::Start => " R".red(),
        Cell::Goal(rank) => " ▲".color(rank_color(rank)).bold(),
        Cell::Reached(rank) => " ●".color(rank_color(rank)),
        Cell::VisitedPath => " .".yellow(),
        Cell::Free => "  ".normal(),
    }
}

/// Draws frames as colored text on any writer
pub struct TerminalRenderer<W: Write> {
    out: W,
    clear_screen: bool,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout(clear_screen: bool) -> Self {
        Self::new(io::stdout(), clear_screen)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, clear_screen: bool) -> Self {
        Self { out, clear_screen }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        if self.clear_screen {
            write!(self.out, "{}", CLEAR_SCREEN)?;
        }
        self.draw_legend(frame)?;
        self.draw_grid(frame.grid)?;
        self.draw_stats(frame)?;
        self.out.flush()
    }

    fn draw_legend(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let title = match frame.mode {
            RunMode::SingleTarget => "● A* Path Planning: single target",
            RunMode::MultiTarget => "● A* Path Planning: multiple targets",
        };
        writeln!(self.out, "\n{}", title.green())?;
        write!(
            self.out,
            "{} Wall (1)  {} Space (0)  {} Start (-1)  ",
            "■".green(),
            "□".white(),
            "●".red()
        )?;

        let mut ranks: Vec<u8> = frame
            .grid
            .cells()
            .filter_map(|(_, cell)| match cell {
                Cell::Goal(rank) | Cell::Reached(rank) => Some(rank),
                _ => None,
            })
            .collect();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        ranks.dedup();

        match frame.mode {
            RunMode::SingleTarget => {
                for rank in ranks {
                    write!(self.out, "{} Target ({})  ", "▲".color(rank_color(rank)).bold(), rank)?;
                }
            }
            RunMode::MultiTarget => {
                for (i, rank) in ranks.into_iter().enumerate() {
                    write!(
                        self.out,
                        "{} Target {} ({})  ",
                        "▲".color(rank_color(rank)).bold(),
                        i + 1,
                        rank
                    )?;
                }
            }
        }
        writeln!(self.out, "{} Path (2)\n", "●".yellow())
    }

    fn draw_grid(&mut self, grid: &GridMap) -> io::Result<()> {
        for row in 0..grid.height() {
            for cell in grid.row(row) {
                write!(self.out, "{}", cell_glyph(cell))?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn draw_stats(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let metrics = frame.metrics;
        writeln!(self.out, "{}", "\n=== Performance Metrics ===".cyan())?;
        writeln!(self.out, "Nodes Explored: {}", metrics.nodes_explored)?;
        writeln!(self.out, "Path Length: {}", metrics.path_length)?;
        writeln!(self.out, "Execution Time: {:.3} ms", metrics.execution_time_ms())?;
        match frame.mode {
            RunMode::SingleTarget => {
                let free = frame.grid.free_count() + frame.grid.count(Cell::VisitedPath);
                writeln!(self.out, "Obstacles: {}", frame.grid.obstacle_count())?;
                writeln!(self.out, "Free Spaces: {}", free)?;
            }
            RunMode::MultiTarget => {
                writeln!(
                    self.out,
                    "Targets Reached: {}/{}",
                    frame.goals_reached, frame.goal_count
                )?;
                writeln!(self.out, "Current Target: {}", frame.goal_index + 1)?;
            }
        }
        writeln!(self.out, "{}", "===========================".cyan())
    }
}

impl<W: Write> FrameSink for TerminalRenderer<W> {
    fn render(&mut self, frame: &Frame<'_>) {
        if let Err(e) = self.draw(frame) {
            warn!("failed to draw frame: {}", e);
        }
    }
}

/// Saves the final grid and route as an SVG via gnuplot
pub struct RoutePlot {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl RoutePlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            width: 800,
            height: 600,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build the figure: columns on x, rows growing downwards on y
    fn figure(summary: &RunSummary) -> Figure {
        let grid = summary.grid();
        let to_xy = |row: usize, col: usize| (col as f64, -(row as f64));

        let mut wall_x = Vec::new();
        let mut wall_y = Vec::new();
        let mut goal_x = Vec::new();
        let mut goal_y = Vec::new();
        for (pos, cell) in grid.cells() {
            let (x, y) = to_xy(pos.row, pos.col);
            match cell {
                Cell::Wall => {
                    wall_x.push(x);
                    wall_y.push(y);
                }
                Cell::Goal(_) | Cell::Reached(_) => {
                    goal_x.push(x);
                    goal_y.push(y);
                }
                _ => {}
            }
        }
        let (route_x, route_y): (Vec<f64>, Vec<f64>) = summary
            .route()
            .iter()
            .map(|p| to_xy(p.row, p.col))
            .unzip();
        let (start_x, start_y) = to_xy(summary.start().row, summary.start().col);

        let title = match summary.mode() {
            RunMode::SingleTarget => "A* Path Planning (single target)",
            RunMode::MultiTarget => "A* Path Planning (multiple targets)",
        };

        let mut fg = Figure::new();
        fg.axes2d()
            .set_title(title, &[])
            .set_x_range(AutoOption::Fix(-1.0), AutoOption::Fix(grid.width() as f64))
            .set_y_range(AutoOption::Fix(-(grid.height() as f64)), AutoOption::Fix(1.0))
            .set_aspect_ratio(AutoOption::Fix(1.0))
            .points(
                &wall_x,
                &wall_y,
                &[Caption("Wall"), Color(colors::OBSTACLE), PointSymbol('S'), PointSize(2.0)],
            )
            .points(
                &[start_x],
                &[start_y],
                &[Caption("Start"), Color(colors::START), PointSymbol('O'), PointSize(1.5)],
            )
            .points(
                &goal_x,
                &goal_y,
                &[Caption("Target"), Color(colors::GOAL), PointSymbol('T'), PointSize(1.5)],
            )
            .lines(
                &route_x,
                &route_y,
                &[Caption("Path"), Color(colors::PATH), LineWidth(2.0)],
            );
        fg
    }

    pub fn save(&self, summary: &RunSummary) -> PlannerResult<()> {
        let mut fg = Self::figure(summary);
        let file = self.path.to_string_lossy().into_owned();
        fg.save_to_svg(file.as_str(), self.width, self.height)
            .map_err(|e| PlannerError::Plot(e.to_string()))?;
        info!("route plot saved to {}", self.path.display());
        Ok(())
    }
}

impl ReportSink for RoutePlot {
    /// A missing gnuplot install only costs the plot, not the run
    fn submit(&mut self, summary: &RunSummary) -> PlannerResult<()> {
        if let Err(e) = self.save(summary) {
            warn!("route plot skipped: {}", e);
        }
        Ok(())
    }
}
