/// Fuzzes the greedy walk on many random grids: every query must terminate, every path that
/// is returned must be walkable and end on the target, and failures must agree with the
/// connectivity of the grid.
use greedy_pathfinding::{find_path, Direction, Grid, GreedySolver, PathError};
use grid_util::point::Point;
use rand::prelude::*;

fn random_rows(w: usize, h: usize, rng: &mut StdRng) -> Vec<String> {
    let mut rows: Vec<Vec<char>> = (0..h)
        .map(|_| {
            (0..w)
                .map(|_| if rng.gen_bool(0.3) { '#' } else { '.' })
                .collect()
        })
        .collect();
    let start = (rng.gen_range(0..w), rng.gen_range(0..h));
    let mut target = start;
    while target == start {
        target = (rng.gen_range(0..w), rng.gen_range(0..h));
    }
    rows[start.1][start.0] = 'S';
    rows[target.1][target.0] = 'X';
    rows.into_iter().map(|row| row.into_iter().collect()).collect()
}

fn visualize_grid(rows: &[String]) {
    for row in rows {
        println!("{}", row);
    }
}

#[test]
fn fuzz() {
    const N: usize = 8;
    const N_GRIDS: usize = 5000;
    let mut rng = StdRng::seed_from_u64(0);
    let solver = GreedySolver::new();
    let (mut found, mut failed) = (0, 0);
    for _ in 0..N_GRIDS {
        let rows = random_rows(N, N, &mut rng);
        let grid = Grid::from_rows(&rows).unwrap();
        let markers = solver.find_markers(&grid).unwrap();
        let reachable = grid.reachable(markers.start, markers.target);
        match solver.find_path(&grid) {
            Ok(path) => {
                let points = path.points(markers.start);
                for pair in points.windows(2) {
                    assert_eq!(pair[0].manhattan_distance(&pair[1]), 1);
                    if !grid.is_passable(pair[1]) {
                        visualize_grid(&rows);
                    }
                    assert!(grid.is_passable(pair[1]));
                }
                assert_eq!(*points.last().unwrap(), markers.target);
                assert!(reachable);
                found += 1;
            }
            Err(err) => {
                if !err.is_no_path() || err.target_reachable() != Some(reachable) {
                    visualize_grid(&rows);
                }
                assert!(err.is_no_path());
                assert_eq!(err.target_reachable(), Some(reachable));
                failed += 1;
            }
        }
    }
    assert!(found > 0 && failed > 0);
}

#[test]
fn fuzz_determinism() {
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..N_GRIDS {
        let w = rng.gen_range(2..12);
        let h = rng.gen_range(1..12);
        let grid = Grid::from_rows(random_rows(w, h, &mut rng)).unwrap();
        assert_eq!(find_path(&grid), find_path(&grid));
    }
}

/// Walks never exceed the number of cells, since revisiting a cell ends the walk.
#[test]
fn fuzz_walk_length() {
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..N_GRIDS {
        let grid = Grid::from_rows(random_rows(10, 10, &mut rng)).unwrap();
        let steps = match find_path(&grid) {
            Ok(path) => path.len(),
            Err(PathError::Cycle { steps, .. }) | Err(PathError::Stuck { steps, .. }) => steps,
            Err(err) => panic!("unexpected error {err}"),
        };
        assert!(steps <= grid.rows() * grid.cols());
    }
}

/// On an open grid the greedy walk is optimal: it goes vertical first, then horizontal.
#[test]
fn open_grid_is_direct() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let (w, h) = (rng.gen_range(2..10), rng.gen_range(2..10));
        let mut rows = vec![vec!['.'; w]; h];
        let s = Point::new(rng.gen_range(0..w as i32), rng.gen_range(0..h as i32));
        let mut x = s;
        while x == s {
            x = Point::new(rng.gen_range(0..w as i32), rng.gen_range(0..h as i32));
        }
        rows[s.y as usize][s.x as usize] = 'S';
        rows[x.y as usize][x.x as usize] = 'X';
        let rows: Vec<String> = rows.into_iter().map(|r| r.into_iter().collect()).collect();
        let path = find_path(&Grid::from_rows(&rows).unwrap()).unwrap();
        assert_eq!(path.len() as i32, s.manhattan_distance(&x));
        let vertical = path
            .steps()
            .iter()
            .take_while(|d| matches!(d, Direction::Up | Direction::Down))
            .count();
        assert_eq!(vertical as i32, (s.y - x.y).abs());
    }
}
