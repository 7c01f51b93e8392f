//! This module implements the A* search itself. All per-search state lives in a [SearchContext],
//! which is allocated once per grid size and reused, so that repeated queries do not allocate.
use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use log::debug;

use crate::{octile_distance, BinaryMinHeap, NodeScore, OccupancyGrid};

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Reusable storage for searches over one [OccupancyGrid]: the score side table, the open set and
/// the closed set. Concurrent searches on a shared grid each need their own context.
#[derive(Clone, Debug)]
pub struct SearchContext {
    scores: Vec<NodeScore>,
    open: BinaryMinHeap,
    closed: FxIndexSet<usize>,
    epoch: u32,
}

impl SearchContext {
    pub fn new(node_count: usize) -> SearchContext {
        SearchContext {
            scores: vec![NodeScore::default(); node_count],
            open: BinaryMinHeap::with_capacity(node_count),
            closed: FxIndexSet::default(),
            epoch: 0,
        }
    }

    pub fn node_count(&self) -> usize {
        self.scores.len()
    }

    /// Nodes finalized by the most recent search, in expansion order.
    pub fn expanded(&self) -> impl Iterator<Item = usize> + '_ {
        self.closed.iter().copied()
    }

    /// Score of a node, if the most recent search discovered it.
    pub fn score(&self, index: usize) -> Option<&NodeScore> {
        self.scores
            .get(index)
            .filter(|score| self.epoch != 0 && score.epoch == self.epoch)
    }

    fn discovered(&self, index: usize) -> bool {
        self.scores[index].epoch == self.epoch
    }

    /// Starts a new search epoch, invalidating every score recorded before.
    fn begin(&mut self) {
        self.open.clear();
        self.closed.clear();
        self.epoch = self.epoch.wrapping_add(1);
        if self.epoch == 0 {
            self.scores.fill(NodeScore::default());
            self.epoch = 1;
        }
    }

    /// Runs A* from `start` to `goal` (arena indices). Returns the node chain from start to goal
    /// together with its cost, or [None] once the open set is exhausted.
    pub(crate) fn search(
        &mut self,
        grid: &OccupancyGrid,
        start: usize,
        goal: usize,
        allow_corner_cutting: bool,
    ) -> Option<(Vec<usize>, i32)> {
        debug_assert_eq!(grid.node_count(), self.scores.len());
        self.begin();
        let goal_pos = grid.node_by_index(goal).grid_position;
        let estimate = |ix: usize| octile_distance(grid.node_by_index(ix).grid_position, goal_pos);

        self.scores[start] = NodeScore {
            g_score: 0,
            h_score: estimate(start),
            parent: None,
            heap_index: None,
            epoch: self.epoch,
        };
        self.open.insert(&mut self.scores, start);

        while let Some(current) = self.open.extract_min(&mut self.scores) {
            self.closed.insert(current);
            if current == goal {
                let cost = self.scores[goal].g_score;
                debug!(
                    "Found path of cost {} after expanding {} nodes",
                    cost,
                    self.closed.len()
                );
                return Some((self.reverse_path(goal), cost));
            }
            let current_g = self.scores[current].g_score;
            let current_pos = grid.node_by_index(current).grid_position;
            for neighbor in grid.walkable_neighbors(current) {
                if self.closed.contains(&neighbor) {
                    continue;
                }
                if !allow_corner_cutting && grid.cuts_corner(current, neighbor) {
                    continue;
                }
                let tentative_g = current_g
                    + octile_distance(current_pos, grid.node_by_index(neighbor).grid_position);
                let first_visit = !self.discovered(neighbor);
                if first_visit || tentative_g < self.scores[neighbor].g_score {
                    let score = &mut self.scores[neighbor];
                    if first_visit {
                        *score = NodeScore {
                            epoch: self.epoch,
                            ..NodeScore::default()
                        };
                    }
                    score.g_score = tentative_g;
                    score.h_score = estimate(neighbor);
                    score.parent = Some(current);

                    if self.open.contains(&self.scores, neighbor) {
                        self.open.update_improved(&mut self.scores, neighbor);
                    } else {
                        self.open.insert(&mut self.scores, neighbor);
                    }
                }
            }
        }
        debug!(
            "Open set exhausted after expanding {} nodes",
            self.closed.len()
        );
        None
    }

    fn reverse_path(&self, goal: usize) -> Vec<usize> {
        let mut path: Vec<usize> =
            std::iter::successors(Some(goal), |&ix| self.scores[ix].parent).collect();
        path.reverse();
        path
    }
}
