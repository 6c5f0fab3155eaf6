/// Coordinate axis used for board width, height, and cell positions.
pub type Coord = u8;

/// Count type for mine totals and cell tallies.
pub type CellCount = u16;

/// Cell coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Multiplies two axis lengths without overflowing the count type.
pub(crate) const fn area(width: Coord, height: Coord) -> CellCount {
    (width as CellCount).saturating_mul(height as CellCount)
}

pub(crate) const fn nd((x, y): Coord2) -> (usize, usize) {
    (x as usize, y as usize)
}

#[rustfmt::skip]
const DISPLACEMENTS: [(i16, i16); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// Iterator over the in-bounds 8-neighborhood of a cell.
///
/// Positions outside `[0, width) x [0, height)` are skipped rather than
/// yielded, so adjacency counts and reveal cascades never index outside the
/// board.
#[derive(Debug)]
pub struct Neighbors {
    center: Coord2,
    bounds: Coord2,
    index: usize,
}

impl Neighbors {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Coord2> {
        while let Some(&(dx, dy)) = DISPLACEMENTS.get(self.index) {
            self.index += 1;

            let x = self.center.0 as i16 + dx;
            let y = self.center.1 as i16 + dy;
            if (0..self.bounds.0 as i16).contains(&x) && (0..self.bounds.1 as i16).contains(&y) {
                return Some((x as Coord, y as Coord));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_cell_has_three_neighbors() {
        let neighbors: Vec<_> = Neighbors::new((0, 0), (3, 3)).collect();
        assert_eq!(neighbors, [(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        assert_eq!(Neighbors::new((1, 1), (3, 3)).count(), 8);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(Neighbors::new((0, 0), (1, 1)).count(), 0);
    }
}
