use ndarray::Array2;

/// Single coordinate axis used for grid rows, columns and dimensions.
pub type Coord = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn in_bounds((rows, cols): Coord2, (row, col): Coord2) -> bool {
    row < rows && col < cols
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        let size = (saturate(rows), saturate(cols));
        NeighborIter::new(index, size)
    }
}

fn saturate(len: usize) -> Coord {
    len.try_into().unwrap_or(Coord::MAX)
}

/// Candidate moves in priority order: right, left, down, up. Column offsets
/// are tried within the current row before moving to the row below, then above.
const DISPLACEMENTS: [(isize, isize); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;

    let next = (next_row, next_col);
    in_bounds(bounds, next).then_some(next)
}

/// Orthogonal neighbours of a cell that lie inside the grid.
///
/// Yields `(row, col + 1)`, `(row, col - 1)`, `(row + 1, col)`, `(row - 1, col)`
/// in that order, skipping any that fall off the grid. The search takes the
/// first open cell from this sequence, so the order fixes which route is found.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    next_delta: usize,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            next_delta: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = DISPLACEMENTS.get(self.next_delta) {
            self.next_delta += 1;
            if let Some(neighbor) = apply_delta(self.center, delta, self.bounds) {
                return Some(neighbor);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(DISPLACEMENTS.len() - self.next_delta))
    }
}

/// Whether two cells share an edge.
pub fn is_adjacent(a: Coord2, b: Coord2) -> bool {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn neighbors_follow_priority_order() {
        let found: Vec<_> = NeighborIter::new((1, 1), (3, 3)).collect();
        assert_eq!(found, [(1, 2), (1, 0), (2, 1), (0, 1)]);
    }

    #[test]
    fn neighbors_skip_cells_outside_the_grid() {
        let corner: Vec<_> = NeighborIter::new((0, 0), (2, 2)).collect();
        assert_eq!(corner, [(0, 1), (1, 0)]);

        let far_corner: Vec<_> = NeighborIter::new((1, 1), (2, 2)).collect();
        assert_eq!(far_corner, [(1, 0), (0, 1)]);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn adjacency_is_four_connected() {
        assert!(is_adjacent((1, 1), (1, 2)));
        assert!(is_adjacent((1, 1), (0, 1)));
        assert!(!is_adjacent((1, 1), (2, 2)));
        assert!(!is_adjacent((1, 1), (1, 1)));
    }
}
