use core::fmt;

use grid_util::grid::Grid as _;
use grid_util::grid::SimpleGrid;
use grid_util::point::Point;
use itertools::iproduct;
use log::debug;
use petgraph::unionfind::UnionFind;
use thiserror::Error;

/// Cell symbol marking the start of a path query.
pub const START: char = 'S';
/// Cell symbol marking the target of a path query.
pub const TARGET: char = 'X';
/// Impassable cell symbol. Every other symbol is walkable floor.
pub const WALL: char = '#';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid must have at least one row and one column")]
    Empty,
    /// `row` is zero-based.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Immutable rectangular grid of cell symbols. Positions are [Point]s with `x` as the
/// column and `y` as the row, both zero-based. The connected components of walkable
/// cells are computed once on construction using a [UnionFind] structure.
#[derive(Clone, Debug)]
pub struct Grid {
    symbols: SimpleGrid<char>,
    rows: usize,
    cols: usize,
    components: UnionFind<usize>,
}

impl Grid {
    /// Builds a grid from equally long rows of symbols. Rows are counted in characters,
    /// not bytes.
    pub fn from_rows<I, S>(rows: I) -> Result<Grid, GridError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.as_ref().chars().collect::<Vec<char>>())
            .collect::<Vec<_>>();
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(GridError::Empty);
        }
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(GridError::Ragged {
                row,
                expected: cols,
                found: cells.len(),
            });
        }
        let mut symbols = SimpleGrid::new(cols, rows.len(), '.');
        for (y, row) in rows.iter().enumerate() {
            for (x, &symbol) in row.iter().enumerate() {
                symbols.set(x, y, symbol);
            }
        }
        let mut grid = Grid {
            symbols,
            rows: rows.len(),
            cols,
            components: UnionFind::new(0),
        };
        grid.generate_components();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.cols
            && (point.y as usize) < self.rows
    }

    /// Symbol at `point`.
    ///
    /// # Panics
    /// If `point` is outside the grid. Use [Grid::get] or check [Grid::in_bounds] first.
    pub fn cell_at(&self, point: Point) -> char {
        assert!(self.in_bounds(point), "{} is outside the grid", point);
        self.symbols.get_point(point)
    }

    pub fn get(&self, point: Point) -> Option<char> {
        self.in_bounds(point).then(|| self.symbols.get_point(point))
    }

    /// Whether a walker may stand on `point`: it lies inside the grid and is not a wall.
    pub fn is_passable(&self, point: Point) -> bool {
        self.get(point).is_some_and(|symbol| symbol != WALL)
    }

    /// Every position with its symbol, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Point, char)> + '_ {
        iproduct!(0..self.rows, 0..self.cols).map(move |(y, x)| {
            let point = Point::new(x as i32, y as i32);
            (point, self.symbols.get(x, y))
        })
    }

    fn index(&self, point: Point) -> usize {
        point.y as usize * self.cols + point.x as usize
    }

    /// Checks if both positions are walkable and lie on the same connected component.
    pub fn reachable(&self, start: Point, goal: Point) -> bool {
        self.is_passable(start)
            && self.is_passable(goal)
            && self.components.equiv(self.index(start), self.index(goal))
    }

    /// Links every walkable cell to its walkable right and lower neighbours.
    fn generate_components(&mut self) {
        let mut components = UnionFind::new(self.rows * self.cols);
        for (point, _) in self.cells().filter(|&(p, _)| self.is_passable(p)) {
            let parent_ix = self.index(point);
            [Point::new(point.x + 1, point.y), Point::new(point.x, point.y + 1)]
                .into_iter()
                .filter(|p| self.is_passable(*p))
                .for_each(|p| {
                    components.union(parent_ix, self.index(p));
                });
        }
        self.components = components;
        debug!(
            "Generated connected components for {}x{} grid",
            self.rows, self.cols
        );
    }

    /// Renders the grid with the interior of `points` drawn as `*`. The first and last
    /// points keep their own symbols so the markers stay visible.
    pub fn render_path(&self, points: &[Point]) -> String {
        let mut rows = (0..self.rows)
            .map(|y| {
                (0..self.cols)
                    .map(|x| self.symbols.get(x, y))
                    .collect::<Vec<char>>()
            })
            .collect::<Vec<_>>();
        if points.len() > 2 {
            for p in &points[1..points.len() - 1] {
                if self.in_bounds(*p) {
                    rows[p.y as usize][p.x as usize] = '*';
                }
            }
        }
        rows.into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.rows {
            let row = (0..self.cols)
                .map(|x| self.symbols.get(x, y))
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
