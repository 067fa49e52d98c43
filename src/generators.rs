use log::{debug, trace};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use crate::coordinates::MazeCoordinate;
use crate::errors::*;
use crate::grid::MazeGrid;
use crate::random::RandomSource;
use crate::units::{ColumnsCount, NodesCount, RowsCount};
use crate::walls::WallGrid;

/// Generate a perfect maze of `rows` by `columns` cells with an entrance and an exit punched
/// through the outer wall at the `start` and `exit` border cells.
///
/// Coordinates are in maze cells and may be negative to count from the far edges.
pub fn generate(rows: RowsCount,
                columns: ColumnsCount,
                start: MazeCoordinate,
                exit: MazeCoordinate)
                -> Result<WallGrid> {
    let mut rng = XorShiftRng::from_entropy();
    generate_with_rng(rows, columns, start, exit, &mut rng)
}

/// As `generate`, but the same `seed` always gives the same maze.
pub fn generate_seeded(rows: RowsCount,
                       columns: ColumnsCount,
                       start: MazeCoordinate,
                       exit: MazeCoordinate,
                       seed: u64)
                       -> Result<WallGrid> {
    let mut rng = XorShiftRng::seed_from_u64(seed);
    generate_with_rng(rows, columns, start, exit, &mut rng)
}

/// As `generate`, drawing every random choice from `rng`.
///
/// Fails before any carving if the dimensions are empty or either entry point is not a border
/// cell of the maze.
pub fn generate_with_rng<R>(rows: RowsCount,
                            columns: ColumnsCount,
                            start: MazeCoordinate,
                            exit: MazeCoordinate,
                            rng: &mut R)
                            -> Result<WallGrid>
    where R: RandomSource + ?Sized
{
    let mut grid = MazeGrid::new(rows, columns)?;
    grid.open_wall(start)?;
    grid.open_wall(exit)?;
    recursive_backtracker(&mut grid, rng);
    Ok(grid.into_walls())
}

/// Carve a random spanning tree of passages through every node cell of the grid.
///
/// A randomised depth first search with an explicit path stack. From the cell on top of the
/// stack a random unexplored direction is taken and crossed off for both cells either side of
/// the wall. If the neighbour has never been visited the wall is knocked down and the neighbour
/// joins the path, unless it has no directions left to explore. When the top cell has run out
/// of directions we backtrack. Once every node cell has been visited the search stops, whatever
/// is left on the stack.
///
/// Walls towards already visited cells are never opened, which is what keeps the maze free of
/// loops.
pub fn recursive_backtracker<R>(grid: &mut MazeGrid, rng: &mut R)
    where R: RandomSource + ?Sized
{
    let NodesCount(nodes_count) = grid.size();

    let seed = grid.random_node(rng);
    grid.set_open(seed);
    let mut path = vec![seed];
    let mut visited_count = 1;
    let mut steps = 0;

    while visited_count != nodes_count {
        let current = match path.last() {
            Some(&coord) => coord,
            None => break,
        };
        steps += 1;

        let remaining = grid.remaining_directions(current)
            .expect("Path only holds node cells");
        if remaining.is_empty() {
            trace!("Backtracking from {:?}", current);
            path.pop();
            continue;
        }

        let dir = rng.choose_direction(remaining.directions());
        grid.take_direction(current, dir);

        let next = current.offset(dir, 2)
            .expect("Direction masks only lead to node cells inside the grid");
        grid.take_direction(next, dir.opposite());

        if grid.is_solid(next) {
            visited_count += 1;

            let next_has_directions = grid.remaining_directions(next)
                .map_or(false, |mask| !mask.is_empty());
            if next_has_directions {
                path.push(next);
            }

            let wall = current.offset(dir, 1)
                .expect("A wall always lies between two node cells");
            grid.set_open(wall);
            grid.set_open(next);
        }
    }

    debug!("Performed {} steps for maze of size {}", steps, nodes_count);
}
