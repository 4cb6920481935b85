use ndarray::Array2;

/// Single grid axis, used for row/column indices and grid dimensions.
pub type Coord = usize;

/// Grid position `(row, col)`.
pub type Pos = (Coord, Coord);

/// Neighbor offsets in exploration order: Right, Down, Left, Up.
///
/// The search pushes neighbors in this order, so the *last* valid one is
/// the next cell explored.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Applies `delta` to `pos`, returning a value only when it remains in bounds.
fn apply_delta(pos: Pos, delta: (isize, isize), bounds: Pos) -> Option<Pos> {
    let (row, col) = pos;
    let (d_row, d_col) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, pos: Pos) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, pos: Pos) -> NeighborIter {
        NeighborIter::new(pos, self.dim())
    }
}

/// In-bounds 4-neighbors of a cell, yielded in [`DIRECTIONS`] order.
#[derive(Debug)]
pub struct NeighborIter {
    center: Pos,
    bounds: Pos,
    index: u8,
}

impl NeighborIter {
    fn new(center: Pos, bounds: Pos) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = DIRECTIONS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, *delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}
