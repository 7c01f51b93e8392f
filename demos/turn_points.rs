use glam::{DVec2, DVec3};
use occupancy_pathfinding::{
    expand_waypoints, GridConfig, Obstacle, ObstacleSet, OccupancyGrid, Pathfinder, WaypointMode,
};

// Turn points keep only the cells where the direction of travel changes. Agents can walk straight
// between them, and expanding them again recovers every cell of the path.
fn main() {
    env_logger::init();
    const N: f64 = 20.0;
    let config = GridConfig::new(DVec3::new(N / 2.0, N / 2.0, 0.0), DVec2::splat(N), 1.0);
    let obstacles: ObstacleSet = [
        Obstacle::rect(DVec2::new(4.0, 0.0), DVec2::new(6.0, 14.0)),
        Obstacle::rect(DVec2::new(10.0, 6.0), DVec2::new(12.0, 20.0)),
        Obstacle::circle(DVec2::new(16.0, 6.0), 2.5),
    ]
    .into_iter()
    .collect();
    let grid = OccupancyGrid::build(&config, &obstacles).unwrap();
    println!("{}", grid);

    let mut pathfinder = Pathfinder::new(grid);
    let start = DVec3::new(1.5, 1.5, 0.0);
    let end = DVec3::new(18.5, 18.5, 0.0);
    let path = pathfinder
        .find_path(start, end, WaypointMode::TurnPoints)
        .unwrap();
    println!(
        "{} cells reduced to {} turn points:",
        path.cells.len(),
        path.waypoints.len()
    );
    for (cell, waypoint) in path.waypoint_cells().iter().zip(&path.waypoints) {
        println!("{} at {}", cell, waypoint);
    }
    if let Some(start_cell) = path.start() {
        let expanded = expand_waypoints(start_cell, &path.waypoint_cells());
        assert_eq!(expanded, path.cells);
    }
    println!(
        "{} nodes were expanded during the search",
        pathfinder.expanded_nodes().count()
    );
}
