/// Fuzzes the pathfinding system on many random grids. A path must be found exactly when the goal
/// is reachable, its cost must match a plain Dijkstra search over the same cells, and replaying its
/// turn points must reproduce it. Both corner cutting settings are tested.
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use glam::{DVec2, DVec3};
use occupancy_pathfinding::{
    expand_waypoints, GridConfig, OccupancyGrid, Pathfinder, Point, WaypointMode, C, D,
};
use rand::prelude::*;

struct RandomWorld {
    n: usize,
    blocked: Vec<bool>,
}

impl RandomWorld {
    fn new(n: usize, rng: &mut StdRng) -> RandomWorld {
        let mut blocked = (0..n * n).map(|_| rng.gen_bool(0.4)).collect::<Vec<_>>();
        // Keeps the corners used as endpoints free.
        blocked[0] = false;
        blocked[n * n - 1] = false;
        RandomWorld { n, blocked }
    }

    fn is_blocked(&self, x: i32, y: i32) -> bool {
        x < 0
            || y < 0
            || x >= self.n as i32
            || y >= self.n as i32
            || self.blocked[y as usize * self.n + x as usize]
    }

    /// Unit cells with the bottom-left corner at the world origin.
    fn grid(&self) -> OccupancyGrid {
        let size = DVec2::splat(self.n as f64);
        let config = GridConfig::new((size / 2.0).extend(0.0), size, 1.0);
        OccupancyGrid::build(&config, &|center: DVec3, _: f64| {
            self.is_blocked(center.x.floor() as i32, center.y.floor() as i32)
        })
        .unwrap()
    }

    /// Reference cost of the cheapest walk, without any heuristic.
    fn dijkstra(&self, start: Point, goal: Point, allow_corner_cutting: bool) -> Option<i32> {
        let n = self.n as i32;
        let index = |x: i32, y: i32| (y * n + x) as usize;
        let mut dist = vec![i32::MAX; self.n * self.n];
        let mut queue = BinaryHeap::new();
        dist[index(start.x, start.y)] = 0;
        queue.push(Reverse((0, start.x, start.y)));
        while let Some(Reverse((d, x, y))) = queue.pop() {
            if (x, y) == (goal.x, goal.y) {
                return Some(d);
            }
            if d > dist[index(x, y)] {
                continue;
            }
            for dx in -1..=1 {
                for dy in -1..=1 {
                    let (nx, ny) = (x + dx, y + dy);
                    if (dx, dy) == (0, 0) || self.is_blocked(nx, ny) {
                        continue;
                    }
                    let diagonal = dx != 0 && dy != 0;
                    if diagonal
                        && !allow_corner_cutting
                        && (self.is_blocked(nx, y) || self.is_blocked(x, ny))
                    {
                        continue;
                    }
                    let next = d + if diagonal { D } else { C };
                    if next < dist[index(nx, ny)] {
                        dist[index(nx, ny)] = next;
                        queue.push(Reverse((next, nx, ny)));
                    }
                }
            }
        }
        None
    }

    fn visualize(&self, start: Point, end: Point) {
        for y in (0..self.n as i32).rev() {
            for x in 0..self.n as i32 {
                let p = Point::new(x, y);
                if start == p {
                    print!("S");
                } else if end == p {
                    print!("G");
                } else if self.is_blocked(x, y) {
                    print!("#");
                } else {
                    print!(".");
                }
            }
            println!();
        }
    }
}

fn cell_center(p: Point) -> DVec3 {
    DVec3::new(p.x as f64 + 0.5, p.y as f64 + 0.5, 0.0)
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);

    for allow_corner_cutting in [true, false] {
        for _ in 0..N_GRIDS {
            let world = RandomWorld::new(N, &mut rng);
            let grid = world.grid();
            let reachable = grid.reachable(
                grid.index_of(start).unwrap(),
                grid.index_of(end).unwrap(),
            );
            let mut pathfinder = Pathfinder::new(grid);
            pathfinder.allow_corner_cutting = allow_corner_cutting;
            let path = pathfinder.find_path(cell_center(start), cell_center(end), WaypointMode::All);
            let expected = world.dijkstra(start, end, allow_corner_cutting);

            if path.as_ref().ok().map(|p| p.cost) != expected {
                println!("corner cutting: {allow_corner_cutting}; expected cost: {expected:?}");
                world.visualize(start, end);
            }
            assert_eq!(path.as_ref().ok().map(|p| p.cost), expected);
            if allow_corner_cutting {
                assert_eq!(path.is_ok(), reachable);
            } else if path.is_ok() {
                assert!(reachable);
            }
        }
    }
}

#[test]
fn fuzz_turn_points() {
    const N: usize = 12;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(1);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);

    for _ in 0..N_GRIDS {
        let world = RandomWorld::new(N, &mut rng);
        let mut pathfinder = Pathfinder::new(world.grid());
        let Ok(path) =
            pathfinder.find_path(cell_center(start), cell_center(end), WaypointMode::TurnPoints)
        else {
            continue;
        };
        assert_eq!(path.start(), Some(start));
        assert_eq!(path.goal(), Some(end));
        assert!(path.cells.iter().all(|p| !world.is_blocked(p.x, p.y)));
        assert_eq!(Pathfinder::path_cost(&path.cells), path.cost);
        assert_eq!(path.waypoints.len(), path.waypoint_cells().len());
        assert_eq!(path.waypoints.last(), Some(&cell_center(end)));
        assert_eq!(expand_waypoints(start, &path.waypoint_cells()), path.cells);
    }
}

#[test]
fn fuzz_reused_pathfinder() {
    const N: usize = 8;
    const N_QUERIES: usize = 2000;
    let mut rng = StdRng::seed_from_u64(2);
    let world = RandomWorld::new(N, &mut rng);
    let mut pathfinder = Pathfinder::new(world.grid());

    for _ in 0..N_QUERIES {
        let start = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        let end = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        if world.is_blocked(start.x, start.y) {
            continue;
        }
        let path = pathfinder.find_path(cell_center(start), cell_center(end), WaypointMode::All);
        assert_eq!(
            path.ok().map(|p| p.cost),
            world.dijkstra(start, end, true),
            "from {start} to {end}"
        );
    }
}
