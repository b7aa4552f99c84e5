//! Roll transforms for cuboids on the grid.
//!
//! A roll tips a cuboid a quarter turn over one of its base edges. Rolling
//! along the row axis exchanges height and depth; rolling along the column
//! axis exchanges height and width. The anchor shifts by the extent of the
//! edge the box tips over (forward rolls) or by the new extent along that
//! axis, which is the old height (backward rolls).

use std::fmt;

use crate::cuboid::{Coord, Cuboid, Extents};

/// One of the four roll directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Up,
    Right,
    Left,
}

/// All roll directions in expansion order.
///
/// Ordering note: the solver expands neighbours in this order, which decides
/// which of several equally short solutions is reported.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Down,
    Direction::Up,
    Direction::Right,
    Direction::Left,
];

impl Direction {
    pub fn name(self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Left => "left",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Computes the anchor and extents a cuboid would have after rolling.
///
/// Pure geometry: no bounds or collision checks happen here.
pub fn roll(cuboid: &Cuboid, direction: Direction) -> (Coord, Extents) {
    let (row, col) = cuboid.anchor;
    let Extents {
        width,
        depth,
        height,
    } = cuboid.extents;

    match direction {
        Direction::Down => ((row + depth as i32, col), Extents::new(width, height, depth)),
        Direction::Up => ((row - height as i32, col), Extents::new(width, height, depth)),
        Direction::Right => ((row, col + width as i32), Extents::new(height, depth, width)),
        Direction::Left => ((row, col - height as i32), Extents::new(height, depth, width)),
    }
}
