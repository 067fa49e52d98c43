use std::convert::From;

use crate::directions::CompassPrimary;

/// A maze cell position in maze cell units.
///
/// Negative values index from the far edge of the maze, so `-1` is the last row or column.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct MazeCoordinate {
    pub row: isize,
    pub column: isize,
}

impl MazeCoordinate {
    pub fn new(row: isize, column: isize) -> MazeCoordinate {
        MazeCoordinate { row, column }
    }
}

impl From<(isize, isize)> for MazeCoordinate {
    fn from(row_column_pair: (isize, isize)) -> MazeCoordinate {
        MazeCoordinate::new(row_column_pair.0, row_column_pair.1)
    }
}

/// A position in the doubled grid, where walls are cells of their own.
///
/// Odd row and odd column is a node cell, exactly one even index is a wall cell and
/// two even indices is a corner filler that nothing reads.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: usize,
    pub column: usize,
}

impl GridCoordinate {
    pub fn new(row: usize, column: usize) -> GridCoordinate {
        GridCoordinate { row, column }
    }

    #[inline]
    pub fn is_node(&self) -> bool {
        self.row % 2 == 1 && self.column % 2 == 1
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        (self.row % 2 == 0) != (self.column % 2 == 0)
    }

    /// Creates a new `GridCoordinate` `distance` cells away in the given direction.
    /// Returns None if the coordinate would go below zero on either axis.
    pub fn offset(&self, dir: CompassPrimary, distance: usize) -> Option<GridCoordinate> {
        let (row_step, column_step) = dir.step();
        let row = shift(self.row, row_step, distance)?;
        let column = shift(self.column, column_step, distance)?;
        Some(GridCoordinate::new(row, column))
    }
}

fn shift(index: usize, step: isize, distance: usize) -> Option<usize> {
    match step {
        0 => Some(index),
        s if s < 0 => index.checked_sub(distance),
        _ => index.checked_add(distance),
    }
}

/// Convert a maze cell index along one axis with `nodes_count` cells into a doubled grid index.
///
/// The result is always odd. Negative indices wrap from the far edge, down to `-nodes_count`.
pub fn node_axis_to_grid(index: isize, nodes_count: usize) -> Option<usize> {
    let count = nodes_count as isize;
    let node = if index >= 0 { index } else { count + index };
    if node >= 0 && node < count {
        Some(2 * node as usize + 1)
    } else {
        None
    }
}
