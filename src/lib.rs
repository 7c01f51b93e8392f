//! # occupancy_pathfinding
//!
//! A grid-based pathfinding engine for continuous 2D worlds. An [OccupancyGrid] is sampled once from
//! an [OccupancyOracle] (anything that can tell whether a circle overlaps an obstacle), after which
//! a [Pathfinder] answers world-space path queries with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) on the 8-connected grid. The open set is
//! a [BinaryMinHeap] with in-place decrease-key, and
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) are
//! pre-computed so that unreachable goals are rejected without flood-filling the grid.
//!
//! Costs are integers: a straight step costs [C], a diagonal step costs [D], which makes the
//! [octile distance](octile_distance) an exact, admissible heuristic.
//!
//! ```
//! use glam::{DVec2, DVec3};
//! use occupancy_pathfinding::{GridConfig, OccupancyGrid, Pathfinder, WaypointMode};
//!
//! let config = GridConfig::new(DVec3::ZERO, DVec2::new(5.0, 5.0), 1.0);
//! let grid = OccupancyGrid::build(&config, &|_: DVec3, _: f64| false).unwrap();
//! let mut pathfinder = Pathfinder::new(grid);
//! let path = pathfinder
//!     .find_path(
//!         DVec3::new(-2.0, -2.0, 0.0),
//!         DVec3::new(2.0, 2.0, 0.0),
//!         WaypointMode::TurnPoints,
//!     )
//!     .unwrap();
//! assert_eq!(path.cost, 56);
//! assert_eq!(path.waypoints, vec![DVec3::new(2.0, 2.0, 0.0)]);
//! ```
mod astar;
pub mod config;
pub mod error;
pub mod heap;
pub mod node;
pub mod occupancy_grid;
pub mod oracle;
pub mod pathfinder;
pub mod service;

pub use crate::astar::SearchContext;
pub use crate::config::GridConfig;
pub use crate::error::{GridError, PathError};
pub use crate::heap::{BinaryMinHeap, HeapItem};
pub use crate::node::{GridNode, NodeScore};
pub use crate::occupancy_grid::OccupancyGrid;
pub use crate::oracle::{Obstacle, ObstacleSet, OccupancyOracle};
pub use crate::pathfinder::{Path, Pathfinder, WaypointMode};
pub use crate::service::{PathFollower, PathService};

pub use grid_util::point::Point;
use itertools::Itertools;

/// Cost of a straight (cardinal) step.
pub const C: i32 = 10;
/// Cost of a diagonal step, 10·√2 rounded down.
pub const D: i32 = 14;
/// Amount by which the probe radius is shrunk so that obstacles touching a cell border do not
/// block the neighbouring cell.
pub const OBSTACLE_MARGIN: f64 = 0.025;

const N_SMALLVEC_SIZE: usize = 8;

/// Octile distance between two grid points: the cost of the cheapest 8-connected walk on an empty
/// grid, taking as many diagonal steps as possible before going straight.
pub fn octile_distance(a: Point, b: Point) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let (low, high) = if dx < dy { (dx, dy) } else { (dy, dx) };
    D * low + C * (high - low)
}

/// Unit step from `a` towards `b` along each axis.
pub(crate) fn step_direction(a: Point, b: Point) -> (i32, i32) {
    ((b.x - a.x).signum(), (b.y - a.y).signum())
}

/// Reduces a chain of adjacent cells (start included) to the cells at which the walking direction
/// changes, plus the final cell. The start itself is never part of the result.
pub fn turn_points(cells: &[Point]) -> Vec<Point> {
    let mut points: Vec<Point> = cells
        .iter()
        .tuple_windows()
        .filter(|&(&a, &b, &c)| step_direction(a, b) != step_direction(b, c))
        .map(|(_, &b, _)| b)
        .collect();
    if cells.len() > 1 {
        points.extend(cells.last().copied());
    }
    points
}

/// Turns waypoints into a path on the grid which can be followed step by step, starting from (and
/// including) `start`. Each waypoint is approached diagonally until one axis lines up, then
/// straight, so replaying [turn_points] reproduces the original corridor.
pub fn expand_waypoints(start: Point, waypoints: &[Point]) -> Vec<Point> {
    let mut current = start;
    let mut path = vec![current];
    for &next in waypoints {
        while current != next {
            let (dx, dy) = step_direction(current, next);
            current = Point::new(current.x + dx, current.y + dy);
            path.push(current);
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octile_costs() {
        let origin = Point::new(0, 0);
        assert_eq!(octile_distance(origin, origin), 0);
        assert_eq!(octile_distance(origin, Point::new(3, 0)), 30);
        assert_eq!(octile_distance(origin, Point::new(4, 4)), 56);
        assert_eq!(octile_distance(Point::new(4, 1), Point::new(0, 3)), 2 * D + 2 * C);
    }

    #[test]
    fn turn_points_of_diagonal_is_endpoint() {
        let cells = (0..5).map(|i| Point::new(i, i)).collect::<Vec<_>>();
        assert_eq!(turn_points(&cells), vec![Point::new(4, 4)]);
    }

    #[test]
    fn turn_points_keep_corners() {
        // S . .
        //     .
        //     E
        let cells = vec![
            Point::new(0, 2),
            Point::new(1, 2),
            Point::new(2, 2),
            Point::new(2, 1),
            Point::new(2, 0),
        ];
        assert_eq!(turn_points(&cells), vec![Point::new(2, 2), Point::new(2, 0)]);
    }

    #[test]
    fn turn_points_of_trivial_chains() {
        assert!(turn_points(&[]).is_empty());
        assert!(turn_points(&[Point::new(1, 1)]).is_empty());
        assert_eq!(
            turn_points(&[Point::new(1, 1), Point::new(2, 1)]),
            vec![Point::new(2, 1)]
        );
    }

    #[test]
    fn expanding_turn_points_restores_cells() {
        let cells = vec![
            Point::new(0, 0),
            Point::new(1, 1),
            Point::new(2, 2),
            Point::new(3, 2),
            Point::new(4, 2),
            Point::new(4, 3),
        ];
        let waypoints = turn_points(&cells);
        assert_eq!(expand_waypoints(cells[0], &waypoints), cells);
    }
}
