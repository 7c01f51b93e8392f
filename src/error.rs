//! Error types for grid construction and path queries

use grid_util::point::Point;
use thiserror::Error;

/// Invalid [GridConfig](crate::GridConfig) parameters. Returned by
/// [OccupancyGrid::build](crate::OccupancyGrid::build); no partially built grid exists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("cell size must be finite and positive, got {0}")]
    InvalidCellSize(f64),

    #[error("world extent must be finite and positive, got {width} x {height}")]
    InvalidExtent { width: f64, height: f64 },

    #[error("grid of {columns} x {rows} cells is degenerate")]
    DegenerateGrid { columns: usize, rows: usize },

    #[error("grid of {columns} x {rows} cells is too large")]
    TooManyNodes { columns: usize, rows: usize },
}

/// Failure of a path query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The goal is an obstacle or cannot be reached from the start. This is an ordinary outcome.
    #[error("no path exists from {start:?} to {end:?}")]
    NoPath { start: Point, end: Point },

    /// A path was requested before a grid was built.
    #[error("the occupancy grid has not been built")]
    GridNotBuilt,
}
