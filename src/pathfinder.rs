use std::sync::Arc;

use glam::DVec3;
use grid_util::point::Point;
use itertools::Itertools;
use log::{info, warn};

use crate::{octile_distance, turn_points, OccupancyGrid, PathError, SearchContext};

/// Selects which cells of a found path are reported as waypoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WaypointMode {
    /// Every cell after the start.
    #[default]
    All,
    /// Only cells where the direction of travel changes, and the goal.
    TurnPoints,
}

/// A path found by a [Pathfinder].
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    /// Every cell from the start to the goal, both included.
    pub cells: Vec<Point>,
    /// World positions to walk through, excluding the start. Empty if start and goal coincide.
    pub waypoints: Vec<DVec3>,
    /// Total cost in units of [C](crate::C) per straight step.
    pub cost: i32,
    pub mode: WaypointMode,
}

impl Path {
    pub fn start(&self) -> Option<Point> {
        self.cells.first().copied()
    }

    pub fn goal(&self) -> Option<Point> {
        self.cells.last().copied()
    }

    /// Grid cells matching [waypoints](Path::waypoints).
    pub fn waypoint_cells(&self) -> Vec<Point> {
        match self.mode {
            WaypointMode::All => self.cells.iter().skip(1).copied().collect(),
            WaypointMode::TurnPoints => turn_points(&self.cells),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

/// Finds paths on a shared [OccupancyGrid]. Each pathfinder owns the storage its searches reuse, so
/// concurrent callers should each use their own (see [fork](Pathfinder::fork)).
#[derive(Clone, Debug)]
pub struct Pathfinder {
    grid: Arc<OccupancyGrid>,
    context: SearchContext,
    /// Whether diagonal steps may pass between two obstacles touching at a corner. Enabled by
    /// default.
    pub allow_corner_cutting: bool,
    last_path: Option<Path>,
}

impl Pathfinder {
    pub fn new(grid: impl Into<Arc<OccupancyGrid>>) -> Pathfinder {
        let grid = grid.into();
        let context = SearchContext::new(grid.node_count());
        Pathfinder {
            grid,
            context,
            allow_corner_cutting: true,
            last_path: None,
        }
    }

    /// A new pathfinder on the same grid with its own search storage.
    pub fn fork(&self) -> Pathfinder {
        Pathfinder {
            allow_corner_cutting: self.allow_corner_cutting,
            ..Pathfinder::new(Arc::clone(&self.grid))
        }
    }

    pub fn grid(&self) -> &Arc<OccupancyGrid> {
        &self.grid
    }

    /// The most recently found path.
    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_ref()
    }

    /// Nodes finalized by the most recent search, in expansion order.
    pub fn expanded_nodes(&self) -> impl Iterator<Item = &crate::GridNode> + '_ {
        self.context
            .expanded()
            .map(move |ix| self.grid.node_by_index(ix))
    }

    /// Sum of the step costs along a chain of cells.
    pub fn path_cost(cells: &[Point]) -> i32 {
        cells
            .iter()
            .tuple_windows()
            .map(|(&a, &b)| octile_distance(a, b))
            .sum()
    }

    /// Computes the cheapest path between the cells containing `start` and `end`. Positions
    /// outside the grid are clamped to the nearest edge cell.
    ///
    /// Fails with [PathError::NoPath] if the goal cell is an obstacle or cannot be reached; no
    /// partial path is returned. On failure the last path is left untouched.
    pub fn find_path(
        &mut self,
        start: DVec3,
        end: DVec3,
        mode: WaypointMode,
    ) -> Result<Path, PathError> {
        let grid = Arc::clone(&self.grid);
        let start_ix = grid.index_at(start);
        let goal_ix = grid.index_at(end);
        let start_pos = grid.node_by_index(start_ix).grid_position;
        let goal_pos = grid.node_by_index(goal_ix).grid_position;
        let no_path = PathError::NoPath {
            start: start_pos,
            end: goal_pos,
        };

        if !grid.reachable(start_ix, goal_ix) {
            info!("{} is not reachable from {}", goal_pos, start_pos);
            return Err(no_path);
        }
        let (chain, cost) = if start_ix == goal_ix {
            (vec![start_ix], 0)
        } else {
            match self
                .context
                .search(&grid, start_ix, goal_ix, self.allow_corner_cutting)
            {
                Some(found) => found,
                None => {
                    if self.allow_corner_cutting {
                        warn!(
                            "Reachable goal {} could not be pathed to from {}, are the components correct?",
                            goal_pos, start_pos
                        );
                    } else {
                        info!(
                            "{} is only reachable from {} by cutting corners",
                            goal_pos, start_pos
                        );
                    }
                    return Err(no_path);
                }
            }
        };

        let cells = chain
            .iter()
            .map(|&ix| grid.node_by_index(ix).grid_position)
            .collect::<Vec<_>>();
        let waypoints = match mode {
            WaypointMode::All => chain
                .iter()
                .skip(1)
                .map(|&ix| grid.node_by_index(ix).world_position)
                .collect(),
            WaypointMode::TurnPoints => turn_points(&cells)
                .into_iter()
                .filter_map(|p| grid.world_position(p))
                .collect(),
        };
        let path = Path {
            cells,
            waypoints,
            cost,
            mode,
        };
        self.last_path = Some(path.clone());
        Ok(path)
    }
}
