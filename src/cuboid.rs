//! Cuboid definitions and coordinate types.
//!
//! A cuboid is an axis-aligned box resting on the grid. Its footprint is the
//! `depth x width` rectangle of cells starting at its anchor (top-left cell).

/// A grid coordinate as `(row, col)`.
///
/// Signed so that roll targets falling off the top or left edge can be
/// represented before the bounds check rejects them.
pub type Coord = (i32, i32);

/// The three oriented extents of a cuboid.
///
/// `width` runs along columns, `depth` along rows and `height` off the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Extents {
    pub width: u16,
    pub depth: u16,
    pub height: u16,
}

impl Extents {
    pub const fn new(width: u16, depth: u16, height: u16) -> Self {
        Self {
            width,
            depth,
            height,
        }
    }

    /// Returns the extents sorted ascending. Rolls permute the extents but
    /// never change this multiset.
    pub fn sorted(&self) -> [u16; 3] {
        let mut extents = [self.width, self.depth, self.height];
        extents.sort_unstable();
        extents
    }

    /// Number of cells covered on the grid.
    #[inline]
    pub fn area(&self) -> usize {
        self.width as usize * self.depth as usize
    }
}

/// A cuboid placed on the grid.
///
/// Plain `Copy` value: the footprint is derived from the anchor and extents,
/// so each transition builds new values instead of mutating shared ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cuboid {
    /// 1-based id assigned in row-major discovery order.
    pub id: usize,
    /// Top-left cell of the footprint.
    pub anchor: Coord,
    pub extents: Extents,
}

impl Cuboid {
    pub const fn new(id: usize, anchor: Coord, extents: Extents) -> Self {
        Self {
            id,
            anchor,
            extents,
        }
    }

    /// Returns a cuboid with the same id at a new placement.
    pub fn move_to(&self, anchor: Coord, extents: Extents) -> Self {
        Self {
            id: self.id,
            anchor,
            extents,
        }
    }

    /// Iterates the footprint cells in row-major order.
    pub fn footprint(&self) -> impl Iterator<Item = Coord> {
        footprint_cells(self.anchor, self.extents)
    }

    /// Returns whether `cell` lies inside the footprint.
    #[inline]
    pub fn covers(&self, (row, col): Coord) -> bool {
        let (top, left) = self.anchor;
        row >= top
            && row < top + self.extents.depth as i32
            && col >= left
            && col < left + self.extents.width as i32
    }

    /// Returns whether this footprint shares any cell with a footprint at
    /// `anchor` with `extents`.
    #[inline]
    pub fn overlaps(&self, anchor: Coord, extents: Extents) -> bool {
        let (top, left) = self.anchor;
        let (other_top, other_left) = anchor;
        top < other_top + extents.depth as i32
            && other_top < top + self.extents.depth as i32
            && left < other_left + extents.width as i32
            && other_left < left + self.extents.width as i32
    }
}

/// Iterates the cells of a `depth x width` rectangle at `anchor`, row-major.
pub fn footprint_cells(anchor: Coord, extents: Extents) -> impl Iterator<Item = Coord> {
    let (top, left) = anchor;
    let width = extents.width as i32;
    (0..extents.depth as i32).flat_map(move |row_offset| {
        (0..width).map(move |col_offset| (top + row_offset, left + col_offset))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprint_is_row_major_rectangle() {
        let cuboid = Cuboid::new(1, (2, 3), Extents::new(2, 3, 1));
        let cells: Vec<Coord> = cuboid.footprint().collect();
        assert_eq!(cells, vec![(2, 3), (2, 4), (3, 3), (3, 4), (4, 3), (4, 4)]);
        assert_eq!(cells.len(), cuboid.extents.area());
    }

    #[test]
    fn test_move_to_keeps_id() {
        let cuboid = Cuboid::new(4, (0, 0), Extents::new(1, 1, 2));
        let moved = cuboid.move_to((1, 0), Extents::new(1, 2, 1));
        assert_eq!(moved.id, 4);
        assert_eq!(moved.anchor, (1, 0));
        assert_eq!(cuboid.anchor, (0, 0), "source cuboid must be untouched");
    }

    #[test]
    fn test_covers_matches_footprint() {
        let cuboid = Cuboid::new(1, (1, 1), Extents::new(2, 2, 3));
        for row in -1..5 {
            for col in -1..5 {
                let in_footprint = cuboid.footprint().any(|cell| cell == (row, col));
                assert_eq!(cuboid.covers((row, col)), in_footprint, "cell ({row},{col})");
            }
        }
    }

    #[test]
    fn test_overlap_detection() {
        let cuboid = Cuboid::new(1, (0, 0), Extents::new(2, 2, 1));
        assert!(cuboid.overlaps((1, 1), Extents::new(1, 1, 1)));
        assert!(!cuboid.overlaps((0, 2), Extents::new(1, 3, 1)));
        assert!(!cuboid.overlaps((2, 0), Extents::new(2, 1, 1)));
        assert!(cuboid.overlaps((-1, -1), Extents::new(2, 2, 1)));
    }

    #[test]
    fn test_sorted_extents() {
        assert_eq!(Extents::new(3, 1, 2).sorted(), [1, 2, 3]);
    }
}
