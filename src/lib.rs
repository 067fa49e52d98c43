//! **mazegen** generates perfect mazes: every cell reachable from every other by exactly one
//! path, handed back as a binary grid of walls and passages.

// error_chain! expands deeply
#![recursion_limit = "1024"]

pub mod coordinates;
pub mod directions;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod random;
pub mod units;
pub mod walls;

pub use crate::coordinates::MazeCoordinate;
pub use crate::generators::{generate, generate_seeded, generate_with_rng};
pub use crate::walls::WallGrid;
