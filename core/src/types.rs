use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToIndex {
    type Output;
    fn to_index(self) -> Self::Output;
}

impl ToIndex for Coord2 {
    type Output = [usize; 2];

    fn to_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `offset` to `center`, returning a value only when it remains in bounds.
fn offset_within(center: Coord2, offset: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let row = center.0.checked_add_signed(offset.0)?;
    if row >= bounds.0 {
        return None;
    }

    let col = center.1.checked_add_signed(offset.1)?;
    if col >= bounds.1 {
        return None;
    }

    Some((row, col))
}

/// Iterator over the up to 8 cells at Chebyshev distance 1 from a center
/// cell, clipped at the grid edges. No wraparound.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    offsets: core::slice::Iter<'static, (i8, i8)>,
}

pub fn iter_neighbors(center: Coord2, bounds: Coord2) -> NeighborIter {
    NeighborIter {
        center,
        bounds,
        offsets: OFFSETS.iter(),
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        for &offset in self.offsets.by_ref() {
            if let Some(coords) = offset_within(self.center, offset, self.bounds) {
                return Some(coords);
            }
        }
        None
    }
}

pub trait GridNeighbors {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> GridNeighbors for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        let dim = self.dim();
        let bounds = (
            dim.0.try_into().expect("grid rows should fit in Coord"),
            dim.1.try_into().expect("grid cols should fit in Coord"),
        );
        iter_neighbors(center, bounds)
    }
}
