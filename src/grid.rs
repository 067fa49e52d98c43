use bit_set::BitSet;
use error_chain::bail;
use log::debug;
use std::fmt;

use crate::coordinates::{node_axis_to_grid, GridCoordinate, MazeCoordinate};
use crate::directions::{CompassPrimary, DirectionMask, PUNCTURE_ORDER};
use crate::errors::*;
use crate::random::RandomSource;
use crate::units::{ColumnsCount, Height, NodesCount, RowsCount, Width};
use crate::walls::WallGrid;

/// The doubled coordinate grid a maze is carved in.
///
/// A grid of `rows` by `columns` maze cells is `2 * rows + 1` high and `2 * columns + 1` wide,
/// so that every wall between two cells, and every wall on the outer border, is a grid cell of
/// its own.
///
/// Two planes of data are kept:
/// - `solid`: a set bit is a wall that has not been opened. Node cells use the same plane as
///   their unvisited flag while carving.
/// - `remaining`: per node cell, the directions towards other node cells not yet explored.
pub struct MazeGrid {
    rows: RowsCount,
    columns: ColumnsCount,
    solid: BitSet,
    remaining: Vec<DirectionMask>,
}

impl fmt::Debug for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MazeGrid :: rows: {:?}, columns: {:?}, solid: {:?}",
               self.rows, self.columns, self.solid)
    }
}

impl MazeGrid {
    /// Allocates the grid with every cell solid and every node seeded with the directions
    /// that lead to another node inside the grid.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<MazeGrid> {

        let (RowsCount(r), ColumnsCount(c)) = (rows, columns);
        let height = r.checked_mul(2).and_then(|h| h.checked_add(1));
        let width = c.checked_mul(2).and_then(|w| w.checked_add(1));
        let grid_cells = match (height, width) {
            (Some(h), Some(w)) if r > 0 && c > 0 => h.checked_mul(w),
            _ => None,
        };
        let grid_cells = grid_cells
            .ok_or_else(|| Error::from(ErrorKind::InvalidDimensions(r, c)))?;

        let mut solid = BitSet::with_capacity(grid_cells);
        for index in 0..grid_cells {
            solid.insert(index);
        }

        let remaining = (0..r)
            .flat_map(|row| (0..c).map(move |column| interior_mask(row, column, r, c)))
            .collect::<Vec<_>>();

        debug!("Allocated {} x {} grid for a {} x {} maze", 2 * r + 1, 2 * c + 1, r, c);

        Ok(MazeGrid {
            rows,
            columns,
            solid,
            remaining,
        })
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// The number of maze node cells.
    #[inline]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.rows.0 * self.columns.0)
    }

    #[inline]
    pub fn height(&self) -> Height {
        Height(2 * self.rows.0 + 1)
    }

    #[inline]
    pub fn width(&self) -> Width {
        Width(2 * self.columns.0 + 1)
    }

    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        coord.row < self.height().0 && coord.column < self.width().0
    }

    /// Is the grid cell still a solid wall (or, for a node cell, still unvisited)?
    ///
    /// Anything outside the grid counts as solid.
    pub fn is_solid(&self, coord: GridCoordinate) -> bool {
        self.grid_index(coord).map_or(true, |index| self.solid.contains(index))
    }

    /// The directions the carving process has not yet explored from a node cell.
    /// None if the coordinate is not a node cell inside the grid.
    pub fn remaining_directions(&self, node: GridCoordinate) -> Option<DirectionMask> {
        self.node_index(node).map(|index| self.remaining[index])
    }

    /// The directions from a node cell that lead to another node cell inside the grid.
    /// None if the coordinate is not a node cell inside the grid.
    pub fn interior_directions(&self, node: GridCoordinate) -> Option<DirectionMask> {
        self.node_index(node)
            .map(|_| interior_mask(node.row / 2, node.column / 2, self.rows.0, self.columns.0))
    }

    /// Convert a maze cell coordinate, possibly indexed from the far edges, into the grid.
    pub fn resolve(&self, coord: MazeCoordinate) -> Result<GridCoordinate> {
        let row = node_axis_to_grid(coord.row, self.rows.0);
        let column = node_axis_to_grid(coord.column, self.columns.0);
        match (row, column) {
            (Some(r), Some(c)) => Ok(GridCoordinate::new(r, c)),
            _ => bail!(ErrorKind::OutOfBounds(coord)),
        }
    }

    /// Opens one outer wall of a border cell to allow entry to or exit from the maze.
    ///
    /// Exterior facing walls are tried West, East, North then South and the first that is
    /// still solid is opened. Returns the grid coordinate of the opened wall.
    pub fn open_wall(&mut self, coord: MazeCoordinate) -> Result<GridCoordinate> {

        let node = self.resolve(coord)?;
        let exterior = self.interior_directions(node)
            .ok_or_else(|| Error::from(ErrorKind::OutOfBounds(coord)))?
            .complement();

        let wall = PUNCTURE_ORDER.iter()
            .filter(|dir| exterior.contains(**dir))
            .filter_map(|dir| node.offset(*dir, 1))
            .find(|wall| self.is_solid(*wall));

        match wall {
            Some(wall_coord) => {
                self.set_open(wall_coord);
                debug!("Opened border wall {:?} for cell {:?}", wall_coord, coord);
                Ok(wall_coord)
            }
            None => bail!(ErrorKind::NotOnBorder(coord)),
        }
    }

    /// Draws a uniformly random node cell, row first then column.
    pub fn random_node<R: RandomSource + ?Sized>(&self, rng: &mut R) -> GridCoordinate {
        let row = rng.index_below(self.rows.0);
        let column = rng.index_below(self.columns.0);
        GridCoordinate::new(2 * row + 1, 2 * column + 1)
    }

    /// Hand back the walls plane, dropping the carving state.
    pub fn into_walls(self) -> WallGrid {
        WallGrid::new(self.height(), self.width(), self.solid)
    }

    pub(crate) fn set_open(&mut self, coord: GridCoordinate) {
        if let Some(index) = self.grid_index(coord) {
            self.solid.remove(index);
        }
    }

    /// Mark a direction from a node as explored. Returns true if it had not been explored yet.
    pub(crate) fn take_direction(&mut self, node: GridCoordinate, dir: CompassPrimary) -> bool {
        match self.node_index(node) {
            Some(index) => self.remaining[index].remove(dir),
            None => false,
        }
    }

    fn grid_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row * self.width().0 + coord.column)
        } else {
            None
        }
    }

    fn node_index(&self, coord: GridCoordinate) -> Option<usize> {
        if coord.is_node() && self.is_valid_coordinate(coord) {
            Some((coord.row / 2) * self.columns.0 + coord.column / 2)
        } else {
            None
        }
    }
}

/// The directions from maze cell (`row`, `column`) towards its neighbours in a
/// `rows` by `columns` maze.
///
/// Corners get 2 directions, the rest of the border 3 and the centre all 4. Single row or
/// single column mazes only ever connect along their one axis, and a 1x1 maze has nowhere to go.
fn interior_mask(row: usize, column: usize, rows: usize, columns: usize) -> DirectionMask {
    let mut mask = DirectionMask::EMPTY;
    if row > 0 {
        mask.insert(CompassPrimary::North);
    }
    if row + 1 < rows {
        mask.insert(CompassPrimary::South);
    }
    if column > 0 {
        mask.insert(CompassPrimary::West);
    }
    if column + 1 < columns {
        mask.insert(CompassPrimary::East);
    }
    mask
}


#[cfg(test)]
mod tests {

    use super::*;
    use itertools::Itertools;

    fn grid(rows: usize, columns: usize) -> MazeGrid {
        MazeGrid::new(RowsCount(rows), ColumnsCount(columns)).expect("valid dimensions")
    }

    fn node(row: usize, column: usize) -> GridCoordinate {
        GridCoordinate::new(2 * row + 1, 2 * column + 1)
    }

    fn mask_bits(g: &MazeGrid, row: usize, column: usize) -> u8 {
        g.remaining_directions(node(row, column)).expect("node cell").bits()
    }

    fn all_masks(g: &MazeGrid) -> Vec<DirectionMask> {
        (0..g.rows().0)
            .cartesian_product(0..g.columns().0)
            .map(|(r, c)| g.remaining_directions(node(r, c)).unwrap())
            .collect()
    }

    fn solid_count(g: &MazeGrid) -> usize {
        (0..g.height().0)
            .cartesian_product(0..g.width().0)
            .filter(|&(r, c)| g.is_solid(GridCoordinate::new(r, c)))
            .count()
    }

    #[test]
    fn zero_dimensions_are_invalid() {
        for &(r, c) in &[(0, 5), (5, 0), (0, 0)] {
            match MazeGrid::new(RowsCount(r), ColumnsCount(c)) {
                Err(Error(ErrorKind::InvalidDimensions(er, ec), _)) => assert_eq!((er, ec), (r, c)),
                other => panic!("expected InvalidDimensions, got {:?}", other),
            }
        }
    }

    #[test]
    fn overflowing_dimensions_are_invalid() {
        let result = MazeGrid::new(RowsCount(usize::MAX), ColumnsCount(2));
        assert!(matches!(result, Err(Error(ErrorKind::InvalidDimensions(..), _))));
    }

    #[test]
    fn grid_shape_is_doubled_plus_one() {
        let g = grid(3, 7);
        assert_eq!(g.height(), Height(7));
        assert_eq!(g.width(), Width(15));
        assert_eq!(g.size(), NodesCount(21));
        assert_eq!(solid_count(&g), 7 * 15);
    }

    #[test]
    fn single_cell_has_no_directions() {
        let g = grid(1, 1);
        assert_eq!(mask_bits(&g, 0, 0), 0);
    }

    #[test]
    fn single_row_masks() {
        let g = grid(1, 4);
        let bits = (0..4).map(|c| mask_bits(&g, 0, c)).collect::<Vec<_>>();
        assert_eq!(bits, vec![1, 5, 5, 4]);
    }

    #[test]
    fn single_column_masks() {
        let g = grid(4, 1);
        let bits = (0..4).map(|r| mask_bits(&g, r, 0)).collect::<Vec<_>>();
        assert_eq!(bits, vec![2, 10, 10, 8]);
    }

    #[test]
    fn general_masks() {
        let g = grid(4, 5);

        // Corners
        assert_eq!(mask_bits(&g, 0, 0), 3);
        assert_eq!(mask_bits(&g, 3, 0), 9);
        assert_eq!(mask_bits(&g, 3, 4), 12);
        assert_eq!(mask_bits(&g, 0, 4), 6);

        // Edges
        assert_eq!(mask_bits(&g, 0, 2), 7);
        assert_eq!(mask_bits(&g, 2, 0), 11);
        assert_eq!(mask_bits(&g, 3, 2), 13);
        assert_eq!(mask_bits(&g, 1, 4), 14);

        // Centre
        assert_eq!(mask_bits(&g, 1, 1), 15);
        assert_eq!(mask_bits(&g, 2, 3), 15);

        let counts = all_masks(&g).iter().map(|m| m.len()).sorted().collect::<Vec<_>>();
        let expected = [vec![2; 4], vec![3; 10], vec![4; 6]].concat();
        assert_eq!(counts, expected);
    }

    #[test]
    fn masks_only_point_at_nodes_inside_the_grid() {
        for &(r, c) in &[(1, 1), (1, 6), (6, 1), (2, 2), (5, 7)] {
            let g = grid(r, c);
            for (row, column) in (0..r).cartesian_product(0..c) {
                let from = node(row, column);
                for dir in g.remaining_directions(from).unwrap().directions() {
                    let to = from.offset(*dir, 2).expect("never leaves the grid");
                    assert!(g.remaining_directions(to).is_some());
                }
            }
        }
    }

    #[test]
    fn non_node_cells_have_no_directions() {
        let g = grid(2, 2);
        assert_eq!(g.remaining_directions(GridCoordinate::new(0, 1)), None);
        assert_eq!(g.remaining_directions(GridCoordinate::new(2, 2)), None);
        assert_eq!(g.remaining_directions(GridCoordinate::new(5, 5)), None);
    }

    #[test]
    fn resolve_wraps_negative_coordinates() {
        let g = grid(5, 3);
        let mc = |r, c| MazeCoordinate::new(r, c);
        assert_eq!(g.resolve(mc(0, 0)).unwrap(), GridCoordinate::new(1, 1));
        assert_eq!(g.resolve(mc(-1, -1)).unwrap(), GridCoordinate::new(9, 5));
        assert_eq!(g.resolve(mc(2, -3)).unwrap(), GridCoordinate::new(5, 1));
    }

    #[test]
    fn resolve_out_of_bounds() {
        let g = grid(5, 5);
        for &(r, c) in &[(10, 10), (5, 0), (0, 5), (-6, 0), (0, -6)] {
            match g.resolve(MazeCoordinate::new(r, c)) {
                Err(Error(ErrorKind::OutOfBounds(coord), _)) => {
                    assert_eq!(coord, MazeCoordinate::new(r, c))
                }
                other => panic!("expected OutOfBounds, got {:?}", other),
            }
        }
    }

    #[test]
    fn open_wall_on_each_side() {
        let mut g = grid(3, 3);
        let mc = |r, c| MazeCoordinate::new(r, c);
        assert_eq!(g.open_wall(mc(1, 0)).unwrap(), GridCoordinate::new(3, 0));
        assert_eq!(g.open_wall(mc(1, -1)).unwrap(), GridCoordinate::new(3, 6));
        assert_eq!(g.open_wall(mc(0, 1)).unwrap(), GridCoordinate::new(0, 3));
        assert_eq!(g.open_wall(mc(-1, 1)).unwrap(), GridCoordinate::new(6, 3));
        assert_eq!(solid_count(&g), 7 * 7 - 4);
    }

    #[test]
    fn open_wall_prefers_west_then_east_then_north_then_south() {
        let mut g = grid(1, 1);
        let origin = MazeCoordinate::new(0, 0);
        let opened = (0..4).map(|_| g.open_wall(origin).unwrap()).collect::<Vec<_>>();
        assert_eq!(opened,
                   vec![GridCoordinate::new(1, 0),
                        GridCoordinate::new(1, 2),
                        GridCoordinate::new(0, 1),
                        GridCoordinate::new(2, 1)]);

        assert!(matches!(g.open_wall(origin), Err(Error(ErrorKind::NotOnBorder(_), _))));
    }

    #[test]
    fn open_wall_on_a_corner_uses_both_exterior_walls_then_fails() {
        let mut g = grid(5, 5);
        let corner = MazeCoordinate::new(-1, -1);
        assert_eq!(g.open_wall(corner).unwrap(), GridCoordinate::new(9, 10));
        assert_eq!(g.open_wall(corner).unwrap(), GridCoordinate::new(10, 9));
        assert!(matches!(g.open_wall(corner), Err(Error(ErrorKind::NotOnBorder(_), _))));
    }

    #[test]
    fn open_wall_rejects_interior_cells() {
        let mut g = grid(5, 5);
        match g.open_wall(MazeCoordinate::new(2, 2)) {
            Err(Error(ErrorKind::NotOnBorder(coord), _)) => assert_eq!(coord, MazeCoordinate::new(2, 2)),
            other => panic!("expected NotOnBorder, got {:?}", other),
        }
        assert_eq!(solid_count(&g), 11 * 11);
    }

    #[test]
    fn open_wall_rejects_cells_outside_the_maze() {
        let mut g = grid(5, 5);
        let result = g.open_wall(MazeCoordinate::new(10, 10));
        assert!(matches!(result, Err(Error(ErrorKind::OutOfBounds(_), _))));
        assert_eq!(solid_count(&g), 11 * 11);
    }

    #[test]
    fn open_wall_leaves_node_state_alone() {
        let mut g = grid(4, 6);
        let masks_before = all_masks(&g);
        for &(r, c) in &[(0, 0), (-1, -1), (2, 0), (0, 3), (-1, 2)] {
            let wall = g.open_wall(MazeCoordinate::new(r, c)).unwrap();
            assert!(wall.is_wall());
            assert!(!g.is_solid(wall));
        }
        assert_eq!(all_masks(&g), masks_before);
        for (r, c) in (0..4).cartesian_product(0..6) {
            assert!(g.is_solid(node(r, c)));
        }
        assert_eq!(solid_count(&g), 9 * 13 - 5);
    }

    #[test]
    fn random_node_is_always_a_node() {
        let g = grid(3, 8);
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let coord = g.random_node(&mut rng);
            assert!(coord.is_node());
            assert!(g.remaining_directions(coord).is_some());
        }
    }

    #[test]
    fn take_direction_reports_whether_it_was_present() {
        let mut g = grid(2, 2);
        let top_left = node(0, 0);
        assert!(g.take_direction(top_left, CompassPrimary::East));
        assert!(!g.take_direction(top_left, CompassPrimary::East));
        assert!(!g.take_direction(top_left, CompassPrimary::North));
        assert_eq!(g.remaining_directions(top_left).unwrap().directions(), &[CompassPrimary::South]);
    }
}
