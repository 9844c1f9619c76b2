//! Greedy stepping towards the target. At every step the walkable neighbour closest to the
//! target by [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) is taken,
//! without lookahead and without backtracking. This is not a shortest-path search and it
//! can fail on grids where a route exists.
use core::fmt;

use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexSet;
use log::{debug, info, trace, warn};
use thiserror::Error;

use crate::grid::{Grid, START, TARGET};
use crate::path::{Direction, Path};

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    Start,
    Target,
}

impl Marker {
    pub fn symbol(self) -> char {
        match self {
            Marker::Start => START,
            Marker::Target => TARGET,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Marker::Start => write!(f, "start `{}`", self.symbol()),
            Marker::Target => write!(f, "target `{}`", self.symbol()),
        }
    }
}

/// What to do when a marker symbol occurs more than once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarkerPolicy {
    /// Reject the grid with [PathError::DuplicateMarker].
    #[default]
    Unique,
    /// Keep the occurrence scanned last in row-major order.
    LastWins,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GreedyConfig {
    pub marker_policy: MarkerPolicy,
    /// Upper bound on the number of steps taken. Walks are always finite because
    /// revisiting a cell is detected, this only cuts them shorter.
    pub max_steps: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("{0} not found in grid")]
    MarkerNotFound(Marker),
    #[error("{marker} occurs more than once (at {first} and {second})")]
    DuplicateMarker {
        marker: Marker,
        first: Point,
        second: Point,
    },
    #[error("stuck at {position} after {steps} steps: no walkable neighbour")]
    Stuck {
        position: Point,
        steps: usize,
        target_reachable: bool,
    },
    #[error("walk returned to {position} after {steps} steps, first visited at step {first_visit}")]
    Cycle {
        position: Point,
        first_visit: usize,
        steps: usize,
        target_reachable: bool,
    },
    #[error("gave up at {position} after reaching the limit of {limit} steps")]
    StepLimitExceeded {
        limit: usize,
        position: Point,
        target_reachable: bool,
    },
}

impl PathError {
    /// True for the failures where the markers were fine but the greedy walk did not
    /// arrive at the target.
    pub fn is_no_path(&self) -> bool {
        matches!(
            self,
            PathError::Stuck { .. }
                | PathError::Cycle { .. }
                | PathError::StepLimitExceeded { .. }
        )
    }

    /// Whether the target was connected to the start at all. [None] for marker errors.
    pub fn target_reachable(&self) -> Option<bool> {
        match self {
            PathError::Stuck {
                target_reachable, ..
            }
            | PathError::Cycle {
                target_reachable, ..
            }
            | PathError::StepLimitExceeded {
                target_reachable, ..
            } => Some(*target_reachable),
            _ => None,
        }
    }
}

/// Start and target positions found in a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Markers {
    pub start: Point,
    pub target: Point,
}

#[derive(Clone, Debug, Default)]
pub struct GreedySolver {
    pub config: GreedyConfig,
}

impl GreedySolver {
    pub fn new() -> GreedySolver {
        GreedySolver::default()
    }

    pub fn with_config(config: GreedyConfig) -> GreedySolver {
        GreedySolver { config }
    }

    /// Scans the grid in row-major order for the start and target symbols.
    pub fn find_markers(&self, grid: &Grid) -> Result<Markers, PathError> {
        let mut start: Option<Point> = None;
        let mut target: Option<Point> = None;
        for (point, symbol) in grid.cells() {
            let (slot, marker) = match symbol {
                START => (&mut start, Marker::Start),
                TARGET => (&mut target, Marker::Target),
                _ => continue,
            };
            if let Some(first) = slot.replace(point) {
                match self.config.marker_policy {
                    MarkerPolicy::Unique => {
                        return Err(PathError::DuplicateMarker {
                            marker,
                            first,
                            second: point,
                        })
                    }
                    MarkerPolicy::LastWins => {
                        warn!("{} found at {} and {}, using {}", marker, first, point, point)
                    }
                }
            }
        }
        Ok(Markers {
            start: start.ok_or(PathError::MarkerNotFound(Marker::Start))?,
            target: target.ok_or(PathError::MarkerNotFound(Marker::Target))?,
        })
    }

    /// Walks greedily from the start marker to the target marker.
    pub fn find_path(&self, grid: &Grid) -> Result<Path, PathError> {
        let markers = self.find_markers(grid)?;
        self.walk(grid, markers)
    }

    /// The stepping loop behind [find_path](Self::find_path), for callers that already
    /// know the endpoints. Equal endpoints give an empty [Path].
    pub fn walk(&self, grid: &Grid, markers: Markers) -> Result<Path, PathError> {
        let Markers { start, target } = markers;
        info!("Walking greedily from {} to {}", start, target);
        let mut visited: FxIndexSet<Point> = FxIndexSet::default();
        let mut steps: Vec<Direction> = Vec::new();
        let mut current = start;
        while current != target {
            if let Some(limit) = self.config.max_steps {
                if steps.len() >= limit {
                    warn!("Step limit of {} reached at {}", limit, current);
                    return Err(PathError::StepLimitExceeded {
                        limit,
                        position: current,
                        target_reachable: grid.reachable(start, target),
                    });
                }
            }
            let (first_visit, fresh) = visited.insert_full(current);
            if !fresh {
                warn!(
                    "Revisited {} at step {}, first seen at step {}",
                    current,
                    steps.len(),
                    first_visit
                );
                return Err(PathError::Cycle {
                    position: current,
                    first_visit,
                    steps: steps.len(),
                    target_reachable: grid.reachable(start, target),
                });
            }
            let Some(direction) = next_step(grid, current, target) else {
                warn!("No walkable neighbour around {}", current);
                return Err(PathError::Stuck {
                    position: current,
                    steps: steps.len(),
                    target_reachable: grid.reachable(start, target),
                });
            };
            trace!("{} -> {}", current, direction);
            steps.push(direction);
            current = direction.step(current);
        }
        debug!("Reached {} in {} steps", target, steps.len());
        Ok(Path::new(steps))
    }
}

/// Picks the walkable neighbour of `current` closest to `target`. Neighbours are scanned
/// in [Direction::ALL] order and `min_by_key` keeps the first of equal minima, so an
/// earlier direction wins ties.
pub fn next_step(grid: &Grid, current: Point, target: Point) -> Option<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|direction| grid.is_passable(direction.step(current)))
        .min_by_key(|direction| direction.step(current).manhattan_distance(&target))
}

/// Runs a default [GreedySolver] on `grid`.
pub fn find_path(grid: &Grid) -> Result<Path, PathError> {
    GreedySolver::new().find_path(grid)
}
