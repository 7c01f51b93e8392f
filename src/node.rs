//! Grid nodes and the per-search bookkeeping attached to them.
use std::cmp::Ordering;

use glam::DVec3;
use grid_util::point::Point;

use crate::heap::HeapItem;

/// A single cell of an [OccupancyGrid](crate::OccupancyGrid). Nodes are created when the grid is
/// built and never change afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridNode {
    pub is_obstacle: bool,
    /// Center of the cell in world space.
    pub world_position: DVec3,
    pub grid_position: Point,
}

impl GridNode {
    pub fn new(is_obstacle: bool, world_position: DVec3, grid_position: Point) -> GridNode {
        GridNode {
            is_obstacle,
            world_position,
            grid_position,
        }
    }

    pub fn grid_x(&self) -> i32 {
        self.grid_position.x
    }

    pub fn grid_y(&self) -> i32 {
        self.grid_position.y
    }
}

/// Search state of one node. A record only describes the current search if its `epoch` matches
/// the epoch of the [SearchContext](crate::SearchContext) it belongs to; anything else is left over
/// from an earlier search and must be overwritten before it is read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeScore {
    /// Cost of the best known path from the start.
    pub g_score: i32,
    /// Heuristic estimate of the remaining cost to the goal.
    pub h_score: i32,
    /// Arena index of the predecessor on the best known path.
    pub parent: Option<usize>,
    pub heap_index: Option<usize>,
    pub epoch: u32,
}

impl NodeScore {
    pub fn f_score(&self) -> i32 {
        self.g_score + self.h_score
    }
}

impl HeapItem for NodeScore {
    fn heap_index(&self) -> Option<usize> {
        self.heap_index
    }

    fn set_heap_index(&mut self, index: Option<usize>) {
        self.heap_index = index;
    }

    /// Lower f-score wins; on equal f-scores the node closer to the goal (lower h-score) wins.
    fn compare_priority(&self, other: &Self) -> Ordering {
        match other.f_score().cmp(&self.f_score()) {
            Ordering::Equal => other.h_score.cmp(&self.h_score),
            s => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(g_score: i32, h_score: i32) -> NodeScore {
        NodeScore {
            g_score,
            h_score,
            ..Default::default()
        }
    }

    #[test]
    fn f_score_is_sum() {
        assert_eq!(score(24, 30).f_score(), 54);
    }

    #[test]
    fn lower_f_score_has_priority() {
        assert_eq!(score(10, 10).compare_priority(&score(10, 20)), Ordering::Greater);
        assert_eq!(score(10, 20).compare_priority(&score(10, 10)), Ordering::Less);
    }

    #[test]
    fn ties_prefer_lower_h_score() {
        assert_eq!(score(30, 10).compare_priority(&score(10, 30)), Ordering::Greater);
        assert_eq!(score(20, 20).compare_priority(&score(20, 20)), Ordering::Equal);
    }
}
