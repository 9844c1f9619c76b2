use greedy_pathfinding::{find_path, Grid, PathError};

// In this example a path is found on a grid with shape
// S..#
// .#.#
// ...X
// where
// - # marks a wall
// - S marks the start
// - X marks the target
//
// A second grid shows the greedy walk failing even though a route exists.

fn main() {
    let grid = Grid::from_rows(["S..#", ".#.#", "...X"]).unwrap();
    println!("{}", grid);
    let path = find_path(&grid).unwrap();
    println!("Path: {}", path);
    println!("{}\n", grid.render_path(&path.points(grid_util::point::Point::new(0, 0))));

    let trap = Grid::from_rows(["....", "S.#X"]).unwrap();
    println!("{}", trap);
    match find_path(&trap) {
        Ok(path) => println!("Path: {}", path),
        Err(err @ PathError::Cycle { .. }) => println!("No path: {}", err),
        Err(err) => println!("Error: {}", err),
    }
}
