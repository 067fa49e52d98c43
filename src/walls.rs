use bit_set::BitSet;
use itertools::Itertools;
use std::fmt;

use crate::coordinates::GridCoordinate;
use crate::units::{Height, Width};

/// A finished maze as a binary grid: `true` is a wall, `false` is a passage.
///
/// Node cells read as passages once carved. This is the only artifact handed on to anything
/// that wants to draw or store a maze.
#[derive(Clone, PartialEq, Eq)]
pub struct WallGrid {
    walls: BitSet,
    height: usize,
    width: usize,
}

impl WallGrid {
    pub(crate) fn new(height: Height, width: Width, walls: BitSet) -> WallGrid {
        WallGrid {
            walls,
            height: height.0,
            width: width.0,
        }
    }

    #[inline]
    pub fn height(&self) -> Height {
        Height(self.height)
    }

    #[inline]
    pub fn width(&self) -> Width {
        Width(self.width)
    }

    /// Is there a wall at the coordinate? None outside the grid.
    pub fn get(&self, coord: GridCoordinate) -> Option<bool> {
        if coord.row < self.height && coord.column < self.width {
            Some(self.walls.contains(coord.row * self.width + coord.column))
        } else {
            None
        }
    }

    /// Is there a wall at the coordinate?
    ///
    /// Everything outside the grid is solid.
    #[inline]
    pub fn is_wall(&self, coord: GridCoordinate) -> bool {
        self.get(coord).unwrap_or(true)
    }

    pub fn iter_rows<'a>(&'a self) -> impl Iterator<Item = Vec<bool>> + 'a {
        (0..self.height).map(move |row| {
            (0..self.width)
                .map(|column| self.walls.contains(row * self.width + column))
                .collect()
        })
    }

    pub fn to_vec(&self) -> Vec<Vec<bool>> {
        self.iter_rows().collect()
    }
}

impl fmt::Debug for WallGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "WallGrid :: height: {}, width: {}\n{}", self.height, self.width, self)
    }
}

impl fmt::Display for WallGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL: char = '#';
        const PASSAGE: char = ' ';

        let output = self.iter_rows()
            .map(|row| {
                row.into_iter()
                    .map(|is_wall| if is_wall { WALL } else { PASSAGE })
                    .collect::<String>()
            })
            .join("\n");
        write!(f, "{}", output)
    }
}
