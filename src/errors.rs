//! Error types for maze generation.
//!
//! `error_chain!` creates the `Error`, `ErrorKind`, `ResultExt` and `Result` types.
//! Other modules `use crate::errors::*;` to get at all of them.

use error_chain::*;

use crate::coordinates::MazeCoordinate;

error_chain! {
    errors {
        InvalidDimensions(rows: usize, columns: usize) {
            description("invalid maze dimensions")
            display("Invalid maze dimensions: {} rows by {} columns", rows, columns)
        }
        OutOfBounds(coord: MazeCoordinate) {
            description("entrypoint cell outside of maze")
            display("Entrypoint cell ({}, {}) outside of maze", coord.row, coord.column)
        }
        NotOnBorder(coord: MazeCoordinate) {
            description("entrypoint cell not on maze border")
            display("Entrypoint cell ({}, {}) not on maze border", coord.row, coord.column)
        }
    }
}
