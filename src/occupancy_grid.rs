use core::fmt;

use glam::{DVec2, DVec3};
use grid_util::point::Point;
use log::info;
use num_traits::{clamp, ToPrimitive};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::{GridConfig, GridError, GridNode, OccupancyOracle, N_SMALLVEC_SIZE};

/// [OccupancyGrid] samples the world once into a matrix of [GridNode]s and maintains information
/// about connected components using a [UnionFind] structure, so that unreachable goals can be
/// detected without searching. Nodes are stored row-major in a flat arena and addressed by index;
/// the grid is immutable after [build](OccupancyGrid::build) and can be shared between searches.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    origin: DVec2,
    cell_size: f64,
    columns: usize,
    rows: usize,
    nodes: Vec<GridNode>,
    components: UnionFind<usize>,
}

impl OccupancyGrid {
    /// Samples the world described by `config`. A cell is an obstacle if the oracle reports an
    /// overlap for a circle at its center with radius [GridConfig::probe_radius].
    pub fn build<O>(config: &GridConfig, oracle: &O) -> Result<OccupancyGrid, GridError>
    where
        O: OccupancyOracle + ?Sized,
    {
        let (columns, rows) = config.dimensions()?;
        let origin = config.origin();
        let cell_size = config.cell_size;
        let radius = config.probe_radius();

        let mut nodes = Vec::with_capacity(columns * rows);
        for y in 0..rows {
            for x in 0..columns {
                let offset = DVec2::new(x as f64 + 0.5, y as f64 + 0.5) * cell_size;
                let world_position = (origin + offset).extend(config.center.z);
                let is_obstacle = oracle.is_occupied(world_position, radius);
                nodes.push(GridNode::new(
                    is_obstacle,
                    world_position,
                    Point::new(x as i32, y as i32),
                ));
            }
        }

        let mut grid = OccupancyGrid {
            origin,
            cell_size,
            columns,
            rows,
            nodes,
            components: UnionFind::new(0),
        };
        grid.generate_components();
        info!(
            "Built {}x{} occupancy grid with {} obstacle cells",
            columns,
            rows,
            grid.nodes.iter().filter(|node| node.is_obstacle).count()
        );
        Ok(grid)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// World-space bottom-left corner.
    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GridNode> {
        self.nodes.iter()
    }

    pub fn node_by_index(&self, index: usize) -> &GridNode {
        &self.nodes[index]
    }

    pub fn node(&self, x: i32, y: i32) -> Option<&GridNode> {
        self.index_of(Point::new(x, y)).map(|ix| &self.nodes[ix])
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.columns
            && (point.y as usize) < self.rows
    }

    /// Arena index of a grid point, if it lies on the grid.
    pub fn index_of(&self, point: Point) -> Option<usize> {
        if self.in_bounds(point) {
            Some(point.y as usize * self.columns + point.x as usize)
        } else {
            None
        }
    }

    pub fn is_obstacle(&self, point: Point) -> bool {
        self.node(point.x, point.y).map_or(true, |node| node.is_obstacle)
    }

    pub fn world_position(&self, point: Point) -> Option<DVec3> {
        self.node(point.x, point.y).map(|node| node.world_position)
    }

    /// Arena index of the cell containing `world`. Positions off the grid are clamped to the
    /// nearest edge cell.
    pub fn index_at(&self, world: DVec3) -> usize {
        let extent = DVec2::new(self.columns as f64, self.rows as f64) * self.cell_size;
        let percent = (world.truncate() - self.origin) / extent;
        let x = Self::cell_index(percent.x, self.columns);
        let y = Self::cell_index(percent.y, self.rows);
        y * self.columns + x
    }

    fn cell_index(percent: f64, cells: usize) -> usize {
        // NaN coordinates end up in the first cell.
        let percent = if percent.is_nan() {
            0.0
        } else {
            clamp(percent, 0.0, 1.0)
        };
        (cells as f64 * percent)
            .floor()
            .to_usize()
            .unwrap_or(0)
            .min(cells - 1)
    }

    /// The node whose cell contains `world`, clamped to the grid.
    pub fn node_at(&self, world: DVec3) -> &GridNode {
        &self.nodes[self.index_at(world)]
    }

    /// Arena indices of the up to 8 cells surrounding `index`, in a fixed order.
    pub fn neighbors(&self, index: usize) -> SmallVec<[usize; N_SMALLVEC_SIZE]> {
        let center = self.nodes[index].grid_position;
        let mut neighbors = SmallVec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if let Some(ix) = self.index_of(Point::new(center.x + dx, center.y + dy)) {
                    neighbors.push(ix);
                }
            }
        }
        neighbors
    }

    /// Passable cells around `index`.
    pub fn walkable_neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors(index)
            .into_iter()
            .filter(move |&ix| !self.nodes[ix].is_obstacle)
    }

    /// Whether a diagonal move between two adjacent cells clips an obstacle in one of the two
    /// cells sharing both of their edges.
    pub fn cuts_corner(&self, from: usize, to: usize) -> bool {
        let a = self.nodes[from].grid_position;
        let b = self.nodes[to].grid_position;
        a.x != b.x
            && a.y != b.y
            && (self.is_obstacle(Point::new(a.x, b.y)) || self.is_obstacle(Point::new(b.x, a.y)))
    }

    /// Retrieves the component id of a node.
    pub fn get_component(&self, index: usize) -> usize {
        self.components.find(index)
    }

    /// Checks whether a walk from `start` can end at `goal`. The goal must be passable; the start
    /// may be an obstacle, in which case any passable neighbour of it has to share the goal's
    /// component.
    pub fn reachable(&self, start: usize, goal: usize) -> bool {
        if start == goal {
            return true;
        }
        if self.nodes[goal].is_obstacle {
            return false;
        }
        if self.nodes[start].is_obstacle {
            self.walkable_neighbors(start)
                .any(|ix| self.components.equiv(ix, goal))
        } else {
            self.components.equiv(start, goal)
        }
    }

    /// Generates a new [UnionFind] structure and links up passable neighbours to the same
    /// components.
    fn generate_components(&mut self) {
        let mut components = UnionFind::new(self.nodes.len());
        for ix in 0..self.nodes.len() {
            if self.nodes[ix].is_obstacle {
                continue;
            }
            let p = self.nodes[ix].grid_position;
            // Links to the remaining neighbours are made when those are visited.
            [
                Point::new(p.x + 1, p.y - 1),
                Point::new(p.x + 1, p.y),
                Point::new(p.x + 1, p.y + 1),
                Point::new(p.x, p.y + 1),
            ]
            .into_iter()
            .filter_map(|n| self.index_of(n))
            .filter(|&n| !self.nodes[n].is_obstacle)
            .for_each(|n| {
                components.union(ix, n);
            });
        }
        self.components = components;
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in (0..self.rows).rev() {
            let row = &self.nodes[y * self.columns..(y + 1) * self.columns];
            let line = row
                .iter()
                .map(|node| if node.is_obstacle { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
