use std::slice;

use ndarray::Array2;

/// Single board axis, used for the grid dimension and for positions.
pub type Coord = u8;

/// Count type for mines, revealed cells, and whole-board totals.
pub type CellCount = u16;

/// Board position as `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToGridIndex {
    type Output;
    fn to_grid_index(self) -> Self::Output;
}

impl ToGridIndex for Coord2 {
    type Output = [usize; 2];

    fn to_grid_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Number of cells on a square board. `255 * 255` still fits in a `CellCount`.
pub const fn cell_area(size: Coord) -> CellCount {
    let size = size as CellCount;
    size * size
}

/// `(row, col)` displacements of the 8 Chebyshev neighbors.
const NEIGHBOR_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `center`, returning the result only while it stays on
/// the board. Coordinates never wrap at either edge.
fn step(center: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let row = center.0.checked_add_signed(delta.0)?;
    let col = center.1.checked_add_signed(delta.1)?;

    if row < bounds.0 && col < bounds.1 {
        Some((row, col))
    } else {
        None
    }
}

/// Iterator over the in-bounds neighbors of a cell, at most 8 of them.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    offsets: slice::Iter<'static, (i8, i8)>,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            offsets: NEIGHBOR_OFFSETS.iter(),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let (center, bounds) = (self.center, self.bounds);
        self.offsets
            .by_ref()
            .find_map(|&delta| step(center, delta, bounds))
    }
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        let dim = self.dim();
        let bounds = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        NeighborIter::new(center, bounds)
    }
}
