//! World occupancy queries used while sampling an [OccupancyGrid](crate::OccupancyGrid).

use glam::{DVec2, DVec3};

/// Answers whether a circle in the world overlaps a registered obstacle.
///
/// The grid only ever asks about cell centers with a radius slightly smaller than half a cell.
/// Any closure `Fn(DVec3, f64) -> bool` is an oracle.
pub trait OccupancyOracle {
    fn is_occupied(&self, center: DVec3, radius: f64) -> bool;
}

impl<F> OccupancyOracle for F
where
    F: Fn(DVec3, f64) -> bool,
{
    fn is_occupied(&self, center: DVec3, radius: f64) -> bool {
        self(center, radius)
    }
}

/// A solid shape in the world plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Obstacle {
    Circle { center: DVec2, radius: f64 },
    /// Axis-aligned rectangle spanning `min` to `max`.
    Rect { min: DVec2, max: DVec2 },
}

impl Obstacle {
    pub fn circle(center: DVec2, radius: f64) -> Obstacle {
        Obstacle::Circle { center, radius }
    }

    /// Rectangle from two opposite corners in any order.
    pub fn rect(a: DVec2, b: DVec2) -> Obstacle {
        Obstacle::Rect {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Whether a circle strictly overlaps this shape. Touching edges do not count.
    pub fn overlaps_circle(&self, point: DVec2, radius: f64) -> bool {
        match *self {
            Obstacle::Circle { center, radius: r } => point.distance(center) < r + radius,
            Obstacle::Rect { min, max } => point.clamp(min, max).distance(point) < radius,
        }
    }
}

/// A plain list of obstacles; the overlap test is linear in the number of shapes.
#[derive(Clone, Debug, Default)]
pub struct ObstacleSet {
    obstacles: Vec<Obstacle>,
}

impl ObstacleSet {
    pub fn new() -> ObstacleSet {
        ObstacleSet::default()
    }

    pub fn add(&mut self, obstacle: Obstacle) -> &mut Self {
        self.obstacles.push(obstacle);
        self
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }
}

impl FromIterator<Obstacle> for ObstacleSet {
    fn from_iter<I: IntoIterator<Item = Obstacle>>(iter: I) -> Self {
        ObstacleSet {
            obstacles: iter.into_iter().collect(),
        }
    }
}

impl OccupancyOracle for ObstacleSet {
    fn is_occupied(&self, center: DVec3, radius: f64) -> bool {
        let point = center.truncate();
        self.obstacles
            .iter()
            .any(|obstacle| obstacle.overlaps_circle(point, radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_overlap() {
        let obstacle = Obstacle::circle(DVec2::new(0.0, 0.0), 1.0);
        assert!(obstacle.overlaps_circle(DVec2::new(1.4, 0.0), 0.5));
        assert!(!obstacle.overlaps_circle(DVec2::new(1.5, 0.0), 0.5));
    }

    #[test]
    fn rect_overlap_ignores_touching_neighbours() {
        // Unit rectangle occupying exactly the cell [1, 2] x [0, 1].
        let obstacle = Obstacle::rect(DVec2::new(2.0, 1.0), DVec2::new(1.0, 0.0));
        assert!(obstacle.overlaps_circle(DVec2::new(1.5, 0.5), 0.475));
        // Neighbouring cell centers lie exactly half a cell away from the edge.
        assert!(!obstacle.overlaps_circle(DVec2::new(0.5, 0.5), 0.475));
        assert!(!obstacle.overlaps_circle(DVec2::new(2.5, 0.5), 0.475));
        assert!(!obstacle.overlaps_circle(DVec2::new(1.5, 1.5), 0.475));
    }

    #[test]
    fn closures_are_oracles() {
        let oracle = |center: DVec3, _radius: f64| center.x > 0.0;
        assert!(oracle.is_occupied(DVec3::new(1.0, 0.0, 0.0), 0.5));
        assert!(!oracle.is_occupied(DVec3::new(-1.0, 0.0, 0.0), 0.5));
    }

    #[test]
    fn obstacle_set_checks_every_shape() {
        let set: ObstacleSet = [
            Obstacle::circle(DVec2::new(5.0, 5.0), 1.0),
            Obstacle::rect(DVec2::new(-3.0, -3.0), DVec2::new(-2.0, -2.0)),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
        assert!(set.is_occupied(DVec3::new(5.0, 5.5, 0.0), 0.1));
        assert!(set.is_occupied(DVec3::new(-2.5, -2.5, 0.0), 0.1));
        assert!(!set.is_occupied(DVec3::new(0.0, 0.0, 0.0), 0.1));
    }
}
