use glam::{DVec2, DVec3};
use occupancy_pathfinding::{
    GridConfig, Obstacle, ObstacleSet, PathFollower, PathService, WaypointMode,
};

// A follower re-plans whenever its target moves. When the new target cannot be reached, it keeps
// walking along its previous waypoints.
fn main() {
    env_logger::init();
    let mut service = PathService::new(GridConfig::new(
        DVec3::ZERO,
        DVec2::new(16.0, 16.0),
        0.5,
    ));
    let obstacles: ObstacleSet = [
        Obstacle::circle(DVec2::new(0.0, 0.0), 3.0),
        Obstacle::rect(DVec2::new(4.0, -8.0), DVec2::new(5.0, 2.0)),
    ]
    .into_iter()
    .collect();
    service.build(&obstacles).unwrap();

    let mut follower = PathFollower::new(
        DVec3::new(-7.0, -7.0, 0.0),
        DVec3::new(7.0, 7.0, 0.0),
        WaypointMode::TurnPoints,
    );
    for target in [
        DVec3::new(7.0, 7.0, 0.0),
        DVec3::new(7.0, -7.0, 0.0),
        // Inside the circle.
        DVec3::new(0.5, 0.5, 0.0),
    ] {
        follower.set_target(target);
        if let Err(err) = follower.update_waypoints(&mut service) {
            println!("{}", err);
        }
        println!("To {}: {:?}", target, follower.waypoints());
    }
}
