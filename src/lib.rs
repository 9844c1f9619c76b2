//! # greedy_pathfinding
//!
//! Finds a route between the `S` and `X` cells of a character grid by greedy stepping:
//! from the current cell, move to the walkable 4-neighbour with the smallest
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) to the target,
//! preferring up, down, left and right in that order on ties. `#` cells are walls.
//!
//! The walk never backtracks, so it is not guaranteed to find a route even when one exists.
//! Instead of looping forever it reports a [PathError] when it gets stuck or returns to a
//! cell it has already visited.
//!
//! ```
//! use greedy_pathfinding::{find_path, Grid};
//!
//! let grid = Grid::from_rows(["S.#", "..#", "#.X"]).unwrap();
//! assert_eq!(find_path(&grid).unwrap().to_string(), "drdr");
//! ```
pub mod greedy;
pub mod grid;
pub mod path;
pub mod reader;

pub use greedy::{
    find_path, GreedyConfig, GreedySolver, Marker, MarkerPolicy, Markers, PathError,
};
pub use grid::{Grid, GridError};
pub use path::{Direction, ParsePathError, Path};
pub use reader::{parse_grid, FileReader, GridReader, InputError, StreamReader};
