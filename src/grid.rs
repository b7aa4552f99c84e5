//! Grid representation and puzzle text parsing.
//!
//! The grid is a flat row-major array of [`Tile`]s. Parsing also extracts the
//! cuboids (4-connected runs of one digit), goal areas (4-connected runs of
//! `g`) and the special tiles (every `h`).

use tracing::{debug, warn};

use crate::cuboid::{Coord, Cuboid, Extents};
use crate::error::ValidationError;
use crate::tiles::TileSet;

/// Marks a cell that does not exist, used to pad ragged rows.
pub const VOID_SYMBOL: char = ' ';
pub const WALL_SYMBOL: char = 'x';
pub const SPECIAL_SYMBOL: char = 'h';
pub const GOAL_SYMBOL: char = 'g';

/// Largest row or column count accepted by the parser.
pub const MAX_GRID_DIM: usize = i16::MAX as usize;

/// The four orthogonal neighbour offsets used by flood fill.
const NEIGHBOR_OFFSETS: [Coord; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// A single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    /// Plain floor, including cells that held a cuboid seed digit.
    Floor,
    /// Part of a goal area. Passable.
    Goal,
    /// Impassable wall.
    Wall,
    /// Not part of the board at all.
    Void,
    /// One-time tile; the payload is its index into the special-tile list.
    Special(usize),
}

/// Immutable board geometry shared by every state of one solve.
#[derive(Clone, Debug)]
pub struct Grid {
    height: usize,
    width: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the tile at `(row, col)`, or `None` outside the grid.
    #[inline]
    pub fn tile(&self, (row, col): Coord) -> Option<Tile> {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return None;
        }
        Some(self.tiles[row as usize * self.width + col as usize])
    }

    /// Returns whether a cuboid may rest on `cell` given the still-active
    /// special tiles. Consumed special tiles are blocked for good.
    #[inline]
    pub fn is_open(&self, cell: Coord, active: &TileSet) -> bool {
        match self.tile(cell) {
            None | Some(Tile::Wall) | Some(Tile::Void) => false,
            Some(Tile::Special(index)) => active.contains(index),
            Some(Tile::Floor) | Some(Tile::Goal) => true,
        }
    }
}

/// A maximal 4-connected run of goal cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoalArea {
    /// 1-based id in discovery order.
    pub id: usize,
    /// The cells of the area, sorted row-major.
    pub cells: Vec<Coord>,
}

impl GoalArea {
    /// Returns whether `cuboid` covers exactly this area's cells.
    pub fn matches(&self, cuboid: &Cuboid) -> bool {
        self.cells.len() == cuboid.extents.area()
            && cuboid.footprint().eq(self.cells.iter().copied())
    }
}

/// Everything extracted from puzzle text.
#[derive(Clone, Debug)]
pub struct ParsedGrid {
    pub grid: Grid,
    /// Cuboids in id order.
    pub cuboids: Vec<Cuboid>,
    pub goal_areas: Vec<GoalArea>,
    /// Special tile coordinates, indexed by [`Tile::Special`] payloads.
    pub special_tiles: Vec<Coord>,
}

/// Parses puzzle text into a grid and its cuboids, goal areas and special tiles.
///
/// Blank lines are dropped and shorter rows are padded with [`VOID_SYMBOL`].
/// A cuboid's footprint is the bounding box of its digit run even when the
/// run is not a full rectangle; that case is logged, not rejected.
pub fn parse(text: &str) -> Result<ParsedGrid, ValidationError> {
    let rows: Vec<Vec<char>> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.chars().collect())
        .collect();

    let height = rows.len();
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if height == 0 || width == 0 {
        return Err(ValidationError::EmptyGrid);
    }
    if height > MAX_GRID_DIM || width > MAX_GRID_DIM {
        return Err(ValidationError::GridTooLarge {
            rows: height,
            cols: width,
            max: MAX_GRID_DIM,
        });
    }

    let mut symbols = Vec::with_capacity(height * width);
    for row in &rows {
        symbols.extend(row.iter().copied());
        symbols.extend(std::iter::repeat(VOID_SYMBOL).take(width - row.len()));
    }
    let chars = CharGrid {
        height,
        width,
        symbols,
    };

    let mut special_tiles = Vec::new();
    let tiles = chars
        .symbols
        .iter()
        .enumerate()
        .map(|(cell_index, &symbol)| match symbol {
            VOID_SYMBOL => Tile::Void,
            WALL_SYMBOL => Tile::Wall,
            GOAL_SYMBOL => Tile::Goal,
            SPECIAL_SYMBOL => {
                special_tiles.push(chars.coord(cell_index));
                Tile::Special(special_tiles.len() - 1)
            }
            _ => Tile::Floor,
        })
        .collect();

    let cuboids = extract_cuboids(&chars);
    let goal_areas = extract_goal_areas(&chars);

    debug!(
        height,
        width,
        cuboids = cuboids.len(),
        goal_areas = goal_areas.len(),
        special_tiles = special_tiles.len(),
        "parsed puzzle grid"
    );

    Ok(ParsedGrid {
        grid: Grid {
            height,
            width,
            tiles,
        },
        cuboids,
        goal_areas,
        special_tiles,
    })
}

/// Raw padded character grid, only alive during parsing.
struct CharGrid {
    height: usize,
    width: usize,
    symbols: Vec<char>,
}

impl CharGrid {
    #[inline]
    fn coord(&self, cell_index: usize) -> Coord {
        ((cell_index / self.width) as i32, (cell_index % self.width) as i32)
    }

    #[inline]
    fn index(&self, (row, col): Coord) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    /// Collects the 4-connected run of `target` symbols containing `start`,
    /// marking every collected cell in `visited`.
    fn flood_fill(&self, start: usize, target: char, visited: &mut [bool]) -> Vec<Coord> {
        let mut cells = Vec::new();
        let mut stack = vec![start];
        visited[start] = true;

        while let Some(cell_index) = stack.pop() {
            let (row, col) = self.coord(cell_index);
            cells.push((row, col));

            for (row_offset, col_offset) in NEIGHBOR_OFFSETS {
                let Some(neighbor) = self.index((row + row_offset, col + col_offset)) else {
                    continue;
                };
                if !visited[neighbor] && self.symbols[neighbor] == target {
                    visited[neighbor] = true;
                    stack.push(neighbor);
                }
            }
        }

        cells
    }

    /// Counts cells inside `(top, left, bottom, right)` that a cuboid seeded
    /// with `symbol` could not stand on: walls, void and other seed digits.
    fn blocked_in_box(
        &self,
        (top, left, bottom, right): (i32, i32, i32, i32),
        symbol: char,
    ) -> usize {
        (top..=bottom)
            .flat_map(|row| (left..=right).map(move |col| (row, col)))
            .filter_map(|cell| self.index(cell))
            .filter(|&cell_index| {
                let found = self.symbols[cell_index];
                found != symbol
                    && (found == WALL_SYMBOL
                        || found == VOID_SYMBOL
                        || cuboid_height(found).is_some())
            })
            .count()
    }
}

/// Finds every digit run in row-major order and turns it into a cuboid.
fn extract_cuboids(chars: &CharGrid) -> Vec<Cuboid> {
    let mut visited = vec![false; chars.symbols.len()];
    let mut cuboids = Vec::new();

    for cell_index in 0..chars.symbols.len() {
        let symbol = chars.symbols[cell_index];
        let Some(height) = cuboid_height(symbol) else {
            continue;
        };
        if visited[cell_index] {
            continue;
        }

        let cells = chars.flood_fill(cell_index, symbol, &mut visited);
        let (top, left, bottom, right) = bounding_box(&cells);
        let extents = Extents::new((right - left + 1) as u16, (bottom - top + 1) as u16, height);
        let id = cuboids.len() + 1;

        if cells.len() != extents.area() {
            let blocked = chars.blocked_in_box((top, left, bottom, right), symbol);
            if blocked > 0 {
                warn!(
                    cuboid = id,
                    cells = cells.len(),
                    footprint = extents.area(),
                    blocked,
                    "digit run is not rectangular and its bounding box covers walls, \
                     void or other cuboids"
                );
            } else {
                warn!(
                    cuboid = id,
                    cells = cells.len(),
                    footprint = extents.area(),
                    "digit run is not rectangular; using its bounding box as the footprint"
                );
            }
        }

        cuboids.push(Cuboid::new(id, (top, left), extents));
    }

    cuboids
}

/// Finds every run of goal symbols in row-major order.
fn extract_goal_areas(chars: &CharGrid) -> Vec<GoalArea> {
    let mut visited = vec![false; chars.symbols.len()];
    let mut goal_areas = Vec::new();

    for cell_index in 0..chars.symbols.len() {
        if chars.symbols[cell_index] != GOAL_SYMBOL || visited[cell_index] {
            continue;
        }

        let mut cells = chars.flood_fill(cell_index, GOAL_SYMBOL, &mut visited);
        cells.sort_unstable();
        goal_areas.push(GoalArea {
            id: goal_areas.len() + 1,
            cells,
        });
    }

    goal_areas
}

/// Height extent encoded by a seed symbol, if it is one.
fn cuboid_height(symbol: char) -> Option<u16> {
    match symbol {
        '1'..='9' => symbol.to_digit(10).map(|digit| digit as u16),
        _ => None,
    }
}

/// Returns `(top, left, bottom, right)` of a non-empty cell list.
fn bounding_box(cells: &[Coord]) -> (i32, i32, i32, i32) {
    cells.iter().fold(
        (i32::MAX, i32::MAX, i32::MIN, i32::MIN),
        |(top, left, bottom, right), &(row, col)| {
            (top.min(row), left.min(col), bottom.max(row), right.max(col))
        },
    )
}

/// Formats a placement of cuboids over the grid.
///
/// Cuboid cells show their id (`A`, `B`, ... past 9), untouched special
/// tiles show `h`, consumed ones `#`, and floor `.`.
pub fn format_placement(grid: &Grid, cuboids: &[Cuboid], active: &TileSet) -> String {
    let mut output = String::with_capacity(grid.height * (grid.width + 1));

    for row in 0..grid.height as i32 {
        for col in 0..grid.width as i32 {
            let cell = (row, col);
            let display_char = match cuboids.iter().find(|cuboid| cuboid.covers(cell)) {
                Some(cuboid) if cuboid.id < 10 => char::from(b'0' + cuboid.id as u8),
                Some(cuboid) => char::from_digit(cuboid.id as u32, 36)
                    .map(|digit| digit.to_ascii_uppercase())
                    .unwrap_or('*'),
                None => match grid.tile(cell) {
                    Some(Tile::Wall) => WALL_SYMBOL,
                    Some(Tile::Goal) => GOAL_SYMBOL,
                    Some(Tile::Special(index)) if active.contains(index) => SPECIAL_SYMBOL,
                    Some(Tile::Special(_)) => '#',
                    Some(Tile::Floor) => '.',
                    Some(Tile::Void) | None => VOID_SYMBOL,
                },
            };
            output.push(display_char);
        }
        // ragged padding is not part of the picture
        let trimmed = output.trim_end_matches(VOID_SYMBOL).len();
        output.truncate(trimmed);
        output.push('\n');
    }

    output
}
