use glam::{DVec2, DVec3};
use occupancy_pathfinding::{
    GridConfig, Obstacle, ObstacleSet, OccupancyGrid, Pathfinder, WaypointMode,
};

// In this example a path is found across a 6x4 world with a single box in the middle:
// ......
// ..##..
// S.##.E
// ......
// S marks the start
// E marks the end
// Every cell of the path is printed as a waypoint.
fn main() {
    env_logger::init();
    let config = GridConfig::new(DVec3::new(3.0, 2.0, 0.0), DVec2::new(6.0, 4.0), 1.0);
    let mut obstacles = ObstacleSet::new();
    obstacles.add(Obstacle::rect(DVec2::new(2.0, 1.0), DVec2::new(4.0, 3.0)));
    let grid = OccupancyGrid::build(&config, &obstacles).unwrap();
    println!("{}", grid);

    let mut pathfinder = Pathfinder::new(grid);
    let start = DVec3::new(0.5, 1.5, 0.0);
    let end = DVec3::new(5.5, 1.5, 0.0);
    match pathfinder.find_path(start, end, WaypointMode::All) {
        Ok(path) => {
            println!("A path of cost {} has been found:", path.cost);
            for waypoint in path.waypoints {
                println!("{}", waypoint);
            }
        }
        Err(err) => println!("{}", err),
    }
}
