use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::*;

/// LIFO of cell coordinates, bottom element first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStack {
    cells: Vec<Coord2>,
}

impl PathStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, coords: Coord2) {
        self.cells.push(coords);
    }

    pub fn pop(&mut self) -> Result<Coord2> {
        self.cells.pop().ok_or(MazeError::EmptyStack)
    }

    pub fn peek(&self) -> Result<Coord2> {
        self.cells.last().copied().ok_or(MazeError::EmptyStack)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn as_slice(&self) -> &[Coord2] {
        &self.cells
    }
}
