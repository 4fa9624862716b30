use core::ops::Index;

use ndarray::Array2;
use serde::Serialize;

use crate::*;

/// Fixed-size two-dimensional cell store indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid {
    cells: Array2<MazeCell>,
}

impl Grid {
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // dimensions always originate from a `Coord2`
        (rows as Coord, cols as Coord)
    }

    pub fn num_rows(&self) -> Coord {
        self.size().0
    }

    pub fn num_cols(&self) -> Coord {
        self.size().1
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(self.size(), coords)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(MazeError::OutOfBounds(coords))
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<MazeCell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn set(&mut self, coords: Coord2, cell: MazeCell) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self.cells[coords.to_nd_index()] = cell;
        Ok(())
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Cells with their coordinates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, MazeCell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = MazeCell> + '_> + '_ {
        self.cells.rows().into_iter().map(|row| row.into_iter().copied())
    }

    /// Rewrites every cell matching `from` to `to`, returning how many changed.
    pub fn replace_all(&mut self, from: impl Fn(MazeCell) -> bool, to: MazeCell) -> usize {
        let mut replaced = 0;
        for cell in self.cells.iter_mut().filter(|cell| from(**cell)) {
            *cell = to;
            replaced += 1;
        }
        replaced
    }

    pub fn count(&self, cell: MazeCell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }
}

impl Index<Coord2> for Grid {
    type Output = MazeCell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
