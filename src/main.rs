use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use greedy_pathfinding::{
    FileReader, GreedyConfig, GreedySolver, GridReader, MarkerPolicy, StreamReader,
};
use log::info;

/// Greedily walks from `S` to `X` on a character grid and prints the steps as u/d/l/r.
///
/// The input starts with the row and column counts, followed by one line per row.
/// `#` marks a wall.
#[derive(Parser, Debug)]
#[command(name = "greedy_path", version)]
struct Cli {
    /// Grid file to read. Reads standard input when omitted.
    file: Option<PathBuf>,

    /// Give up after this many steps.
    #[arg(long)]
    max_steps: Option<usize>,

    /// Use the last `S`/`X` in reading order instead of rejecting duplicates.
    #[arg(long)]
    last_marker_wins: bool,

    /// Also print the grid with the path drawn in.
    #[arg(long)]
    show: bool,
}

impl Cli {
    fn config(&self) -> GreedyConfig {
        GreedyConfig {
            marker_policy: if self.last_marker_wins {
                MarkerPolicy::LastWins
            } else {
                MarkerPolicy::Unique
            },
            max_steps: self.max_steps,
        }
    }
}

const SUCCESS: u8 = 0;
const FAILURE: u8 = 1;

/// Reads the grid from the file named in `cli`, or from `input` when there is none, and
/// reports the result on `out` or `err`. Returns the process exit status.
fn run(cli: &Cli, input: impl BufRead, out: &mut impl Write, err: &mut impl Write) -> u8 {
    match solve(cli, input, out) {
        Ok(()) => SUCCESS,
        Err(message) => {
            // Nothing sensible is left to do if stderr is gone.
            let _ = writeln!(err, "Error: {}", message);
            FAILURE
        }
    }
}

fn solve(cli: &Cli, input: impl BufRead, out: &mut impl Write) -> Result<(), String> {
    let grid = match &cli.file {
        Some(path) => {
            let mut reader = FileReader::new(path);
            info!("Using grid file {}", reader.path().display());
            reader.read_grid()
        }
        None => StreamReader::new(input).read_grid(),
    }
    .map_err(|e| e.to_string())?;
    info!("Loaded {}x{} grid", grid.rows(), grid.cols());

    let solver = GreedySolver::with_config(cli.config());
    let markers = solver.find_markers(&grid).map_err(|e| e.to_string())?;
    let path = solver.walk(&grid, markers).map_err(|e| {
        if e.target_reachable() == Some(false) {
            format!("{}\nThe target is not connected to the start.", e)
        } else {
            e.to_string()
        }
    })?;
    writeln!(out, "Output: {}", path).map_err(write_failed)?;
    if cli.show {
        writeln!(out, "{}", grid.render_path(&path.points(markers.start))).map_err(write_failed)?;
    }
    Ok(())
}

fn write_failed(e: io::Error) -> String {
    format!("could not write output: {}", e)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    ExitCode::from(run(
        &cli,
        io::stdin().lock(),
        &mut io::stdout(),
        &mut io::stderr(),
    ))
}
