//! Loading grids from text. The format is a header with the row and column counts
//! followed by one line per row:
//!
//! ```text
//! 3 3
//! S.#
//! ..#
//! #.X
//! ```
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::grid::{Grid, GridError};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("could not open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not read input: {0}")]
    Io(#[from] io::Error),
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    #[error("invalid grid dimensions {rows}x{cols}, both must be positive")]
    InvalidDimensions { rows: i64, cols: i64 },
    #[error("row {row} has {found} characters, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("input ended before row {row} of {expected}")]
    MissingRow { row: usize, expected: usize },
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// A source of grids. Implementations differ only in where the text comes from.
pub trait GridReader {
    fn read_grid(&mut self) -> Result<Grid, InputError>;
}

/// Reads a grid from any buffered stream, such as standard input.
pub struct StreamReader<R> {
    inner: R,
}

impl<R: BufRead> StreamReader<R> {
    pub fn new(inner: R) -> StreamReader<R> {
        StreamReader { inner }
    }
}

impl<R: BufRead> GridReader for StreamReader<R> {
    fn read_grid(&mut self) -> Result<Grid, InputError> {
        parse_grid(&mut self.inner)
    }
}

/// Reads a grid from a file, opened anew on every call.
#[derive(Clone, Debug)]
pub struct FileReader {
    path: PathBuf,
}

impl FileReader {
    pub fn new(path: impl Into<PathBuf>) -> FileReader {
        FileReader { path: path.into() }
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GridReader for FileReader {
    fn read_grid(&mut self) -> Result<Grid, InputError> {
        info!("Reading grid from {}", self.path.display());
        let file = File::open(&self.path).map_err(|source| InputError::Open {
            path: self.path.clone(),
            source,
        })?;
        parse_grid(BufReader::new(file))
    }
}

/// Parses the header and exactly `rows` lines of `cols` characters each. Anything after
/// the last row is left unread.
pub fn parse_grid<R: BufRead>(reader: R) -> Result<Grid, InputError> {
    let mut lines = reader.lines();
    let (rows, cols) = read_header(&mut lines)?;
    debug!("Header declares {} rows and {} columns", rows, cols);
    // The header is untrusted, so rows are not preallocated from it.
    let mut cells = Vec::new();
    for row in 1..=rows {
        let line = lines.next().ok_or(InputError::MissingRow {
            row,
            expected: rows,
        })??;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        let found = line.chars().count();
        if found != cols {
            return Err(InputError::RowLength {
                row,
                expected: cols,
                found,
            });
        }
        cells.push(line.to_owned());
    }
    Ok(Grid::from_rows(cells)?)
}

/// The first two whitespace separated integers, which may be spread over several lines.
/// Further tokens on the line holding the column count are rejected.
fn read_header<I>(lines: &mut I) -> Result<(usize, usize), InputError>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut tokens: Vec<String> = Vec::with_capacity(2);
    while tokens.len() < 2 {
        let line = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(InputError::InvalidHeader(
                    "expected row and column counts".to_owned(),
                ))
            }
        };
        tokens.extend(line.split_whitespace().map(str::to_owned));
    }
    if tokens.len() > 2 {
        return Err(InputError::InvalidHeader(format!(
            "unexpected trailing input `{}`",
            tokens[2..].join(" ")
        )));
    }
    let rows = parse_dimension(&tokens[0])?;
    let cols = parse_dimension(&tokens[1])?;
    if rows <= 0 || cols <= 0 {
        return Err(InputError::InvalidDimensions { rows, cols });
    }
    Ok((rows as usize, cols as usize))
}

fn parse_dimension(token: &str) -> Result<i64, InputError> {
    token
        .parse::<i64>()
        .map_err(|_| InputError::InvalidHeader(format!("`{}` is not an integer", token)))
}
