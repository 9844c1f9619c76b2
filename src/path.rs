use core::fmt;
use std::str::FromStr;

use grid_util::point::Point;
use thiserror::Error;

/// One unit step on the grid. Rows grow downwards, so [Direction::Up] decreases the row
/// (the `y` coordinate of a [Point]) and [Direction::Left] decreases the column (`x`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The order in which neighbours are considered. Earlier entries win ties.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Column and row offset as `(dx, dy)`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn token(self) -> char {
        match self {
            Direction::Up => 'u',
            Direction::Down => 'd',
            Direction::Left => 'l',
            Direction::Right => 'r',
        }
    }

    pub fn from_token(token: char) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.token() == token)
    }

    /// The neighbour of `point` in this direction. May lie outside any grid.
    pub fn step(self, point: Point) -> Point {
        let (dx, dy) = self.delta();
        Point::new(point.x + dx, point.y + dy)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Ordered sequence of unit steps produced by a path query. Displays as the compact
/// token string, e.g. `drdr`; the empty path displays as an empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path {
    steps: Vec<Direction>,
}

impl Path {
    pub fn new(steps: Vec<Direction>) -> Path {
        Path { steps }
    }
    pub fn steps(&self) -> &[Direction] {
        &self.steps
    }
    pub fn len(&self) -> usize {
        self.steps.len()
    }
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
    /// Expands the steps into the visited positions, starting with `start` itself. The
    /// result always holds one more point than there are steps.
    pub fn points(&self, start: Point) -> Vec<Point> {
        let mut current = start;
        let mut points = Vec::with_capacity(self.steps.len() + 1);
        points.push(current);
        for direction in &self.steps {
            current = direction.step(current);
            points.push(current);
        }
        points
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for direction in &self.steps {
            write!(f, "{}", direction)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid direction token `{token}` at offset {offset}")]
pub struct ParsePathError {
    pub token: char,
    pub offset: usize,
}

impl FromStr for Path {
    type Err = ParsePathError;

    fn from_str(s: &str) -> Result<Path, ParsePathError> {
        s.chars()
            .enumerate()
            .map(|(offset, token)| {
                Direction::from_token(token).ok_or(ParsePathError { token, offset })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Path::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_follow_scan_order() {
        let tokens: String = Direction::ALL.iter().map(|d| d.token()).collect();
        assert_eq!(tokens, "udlr");
    }

    #[test]
    fn display_and_parse() {
        let path: Path = "drdr".parse().unwrap();
        assert_eq!(
            path.steps(),
            &[
                Direction::Down,
                Direction::Right,
                Direction::Down,
                Direction::Right
            ]
        );
        assert_eq!(path.to_string(), "drdr");
        assert_eq!(Path::default().to_string(), "");
    }

    #[test]
    fn parse_rejects_unknown_token() {
        let err = "dux".parse::<Path>().unwrap_err();
        assert_eq!(
            err,
            ParsePathError {
                token: 'x',
                offset: 2
            }
        );
    }

    /// Rows grow downwards, so moving down increases `y`.
    #[test]
    fn points_walk_rows_and_columns() {
        let path: Path = "dr".parse().unwrap();
        let points = path.points(Point::new(0, 0));
        assert_eq!(
            points,
            vec![Point::new(0, 0), Point::new(0, 1), Point::new(1, 1)]
        );
    }
}
