//! Owned entry points for consumers: a [PathService] holding the grid and its pathfinder, and a
//! [PathFollower] that keeps an agent's waypoints up to date as its endpoints move.
use glam::DVec3;
use log::debug;

use crate::{
    GridConfig, GridError, OccupancyGrid, OccupancyOracle, Path, PathError, Pathfinder,
    WaypointMode,
};

/// Builds the grid for a [GridConfig] and serves path requests against it. Requests made before a
/// successful [build](PathService::build) fail with [PathError::GridNotBuilt].
#[derive(Clone, Debug)]
pub struct PathService {
    config: GridConfig,
    pathfinder: Option<Pathfinder>,
}

impl PathService {
    pub fn new(config: GridConfig) -> PathService {
        PathService {
            config,
            pathfinder: None,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Samples the world and replaces any previously built grid. On error the service keeps its
    /// previous state.
    pub fn build<O>(&mut self, oracle: &O) -> Result<(), GridError>
    where
        O: OccupancyOracle + ?Sized,
    {
        let grid = OccupancyGrid::build(&self.config, oracle)?;
        self.pathfinder = Some(Pathfinder::new(grid));
        Ok(())
    }

    pub fn is_built(&self) -> bool {
        self.pathfinder.is_some()
    }

    pub fn grid(&self) -> Option<&OccupancyGrid> {
        self.pathfinder.as_ref().map(|pathfinder| &**pathfinder.grid())
    }

    pub fn pathfinder(&self) -> Option<&Pathfinder> {
        self.pathfinder.as_ref()
    }

    pub fn last_path(&self) -> Option<&Path> {
        self.pathfinder.as_ref().and_then(Pathfinder::last_path)
    }

    pub fn request_path(
        &mut self,
        start: DVec3,
        end: DVec3,
        mode: WaypointMode,
    ) -> Result<Path, PathError> {
        self.pathfinder
            .as_mut()
            .ok_or(PathError::GridNotBuilt)?
            .find_path(start, end, mode)
    }
}

/// An agent walking from its position to a target. Whenever either endpoint moves, call
/// [update_waypoints](PathFollower::update_waypoints) to re-plan.
#[derive(Clone, Debug, PartialEq)]
pub struct PathFollower {
    position: DVec3,
    target: DVec3,
    mode: WaypointMode,
    waypoints: Vec<DVec3>,
}

impl PathFollower {
    pub fn new(position: DVec3, target: DVec3, mode: WaypointMode) -> PathFollower {
        PathFollower {
            position,
            target,
            mode,
            waypoints: Vec::new(),
        }
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn target(&self) -> DVec3 {
        self.target
    }

    pub fn mode(&self) -> WaypointMode {
        self.mode
    }

    pub fn waypoints(&self) -> &[DVec3] {
        &self.waypoints
    }

    pub fn set_position(&mut self, position: DVec3) {
        self.position = position;
    }

    pub fn set_target(&mut self, target: DVec3) {
        self.target = target;
    }

    pub fn set_mode(&mut self, mode: WaypointMode) {
        self.mode = mode;
    }

    /// Re-plans from the current position to the target. If no path is found, the previous
    /// waypoints are kept and the error is returned so the caller can decide how to react.
    pub fn update_waypoints(&mut self, service: &mut PathService) -> Result<&[DVec3], PathError> {
        match service.request_path(self.position, self.target, self.mode) {
            Ok(path) => {
                self.waypoints = path.waypoints;
                Ok(&self.waypoints)
            }
            Err(err) => {
                debug!("Keeping {} previous waypoints: {}", self.waypoints.len(), err);
                Err(err)
            }
        }
    }
}
