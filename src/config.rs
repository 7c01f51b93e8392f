use glam::{DVec2, DVec3};
use num_traits::ToPrimitive;

use crate::{GridError, OBSTACLE_MARGIN};

/// Describes the part of the world covered by an [OccupancyGrid](crate::OccupancyGrid).
///
/// Default options:
/// ```
/// # use glam::{DVec2, DVec3};
/// # use occupancy_pathfinding::GridConfig;
/// assert_eq!(
///     GridConfig {
///         center: DVec3::ZERO,
///         size: DVec2::new(10.0, 10.0),
///         cell_size: 1.0,
///         obstacle_margin: 0.025,
///     },
///     Default::default()
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    /// World-space center of the grid. Its `z` is copied to every node's world position.
    pub center: DVec3,
    /// World-space width and height covered by the grid.
    pub size: DVec2,
    /// Edge length of a single square cell.
    pub cell_size: f64,
    /// The obstacle probe around a cell center has radius `cell_size / 2 - obstacle_margin`.
    pub obstacle_margin: f64,
}

impl GridConfig {
    pub fn new(center: DVec3, size: DVec2, cell_size: f64) -> GridConfig {
        GridConfig {
            center,
            size,
            cell_size,
            ..Default::default()
        }
    }

    pub fn with_obstacle_margin(self, obstacle_margin: f64) -> GridConfig {
        GridConfig {
            obstacle_margin,
            ..self
        }
    }

    /// World-space bottom-left corner of the grid.
    pub fn origin(&self) -> DVec2 {
        self.center.truncate() - self.size / 2.0
    }

    /// Radius used when asking the oracle whether a cell is blocked.
    pub fn probe_radius(&self) -> f64 {
        (self.cell_size / 2.0 - self.obstacle_margin).max(0.0)
    }

    /// Checks the parameters and computes the number of columns and rows,
    /// rounding `size / cell_size` per axis.
    pub fn dimensions(&self) -> Result<(usize, usize), GridError> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(GridError::InvalidCellSize(self.cell_size));
        }
        if !self.size.is_finite() || self.size.x <= 0.0 || self.size.y <= 0.0 {
            return Err(GridError::InvalidExtent {
                width: self.size.x,
                height: self.size.y,
            });
        }
        let cells = (self.size / self.cell_size).round();
        let columns = cells.x.to_usize().unwrap_or(usize::MAX);
        let rows = cells.y.to_usize().unwrap_or(usize::MAX);
        if columns == 0 || rows == 0 {
            return Err(GridError::DegenerateGrid { columns, rows });
        }
        match columns.checked_mul(rows) {
            Some(count) if count <= u32::MAX as usize => Ok((columns, rows)),
            _ => Err(GridError::TooManyNodes { columns, rows }),
        }
    }
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            center: DVec3::ZERO,
            size: DVec2::new(10.0, 10.0),
            cell_size: 1.0,
            obstacle_margin: OBSTACLE_MARGIN,
        }
    }
}
