//! Grid maze with an iterative backtracking route search.
//!
//! A [`Maze`] owns a fixed-size [`Grid`] of [`MazeCell`]s. After walls, start
//! and exit are placed, [`Maze::find_path`] walks the grid depth-first using an
//! explicit [`PathStack`], marking cells on the current route and cells it had
//! to back out of, until it reaches the exit or runs out of cells to try.

#![no_std]

extern crate alloc;

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use grid::*;
pub use layout::*;
pub use stack::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod grid;
mod layout;
mod stack;
mod types;
