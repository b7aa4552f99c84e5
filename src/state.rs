//! Search states for the rolling-cuboid puzzle.
//!
//! A state is the placement of every cuboid plus the set of special tiles
//! nobody has rolled over yet. The grid and goal areas never change during a
//! solve, so they are passed in by reference instead of being stored.

use std::fmt;

use crate::cuboid::{footprint_cells, Coord, Cuboid, Extents};
use crate::geometry::{roll, Direction, DIRECTIONS};
use crate::grid::{GoalArea, Grid, Tile};
use crate::tiles::TileSet;

/// How a state is judged solved once every special tile is consumed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GoalRule {
    /// Every cuboid's footprint must equal a distinct goal area exactly.
    #[default]
    Matching,
    /// The union of all footprints must equal the union of all goal areas.
    UnionCoverage,
}

/// A single roll of one cuboid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Action {
    pub cuboid_id: usize,
    pub direction: Direction,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{} {}", self.cuboid_id, self.direction)
    }
}

/// Canonical identity of a [`GameState`].
///
/// Holds each cuboid's anchor and extents in id order followed by the
/// active special tiles. The tile bitset is indexed in row-major order, so
/// it encodes the sorted tile coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateKey {
    placements: Vec<(Coord, Extents)>,
    active: TileSet,
}

/// One node of the search graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    cuboids: Vec<Cuboid>,
    active: TileSet,
}

impl GameState {
    /// Builds the starting state. Special tiles already under a cuboid are
    /// consumed immediately.
    pub fn initial(grid: &Grid, cuboids: Vec<Cuboid>, special_tiles: &[Coord]) -> Self {
        let mut active = TileSet::full(special_tiles.len());
        for cuboid in &cuboids {
            consume_covered(grid, cuboid.anchor, cuboid.extents, &mut active);
        }
        Self { cuboids, active }
    }

    /// Cuboids in id order.
    pub fn cuboids(&self) -> &[Cuboid] {
        &self.cuboids
    }

    /// Special tiles not yet covered by any cuboid.
    pub fn active_tiles(&self) -> &TileSet {
        &self.active
    }

    /// Returns the canonical key used for deduplication.
    pub fn key(&self) -> StateKey {
        StateKey {
            placements: self
                .cuboids
                .iter()
                .map(|cuboid| (cuboid.anchor, cuboid.extents))
                .collect(),
            active: self.active.clone(),
        }
    }

    /// Returns whether this state solves the puzzle under `rule`.
    pub fn is_goal(&self, goal_areas: &[GoalArea], rule: GoalRule) -> bool {
        if !self.active.is_empty() {
            return false;
        }
        if goal_areas.is_empty() {
            return true;
        }
        match rule {
            GoalRule::Matching => has_perfect_matching(&self.cuboids, goal_areas),
            GoalRule::UnionCoverage => covers_goal_union(&self.cuboids, goal_areas),
        }
    }

    /// Tries to roll cuboid `index` in `direction`.
    ///
    /// Returns `None` if any target cell is off the grid, blocked, a consumed
    /// special tile, or under another cuboid.
    pub fn roll_cuboid(&self, grid: &Grid, index: usize, direction: Direction) -> Option<Self> {
        let moving = &self.cuboids[index];
        let (anchor, extents) = roll(moving, direction);

        let blocked = footprint_cells(anchor, extents)
            .any(|cell| !grid.is_open(cell, &self.active));
        if blocked {
            return None;
        }

        let collides = self
            .cuboids
            .iter()
            .enumerate()
            .any(|(other, cuboid)| other != index && cuboid.overlaps(anchor, extents));
        if collides {
            return None;
        }

        let mut active = self.active.clone();
        consume_covered(grid, anchor, extents, &mut active);

        let mut cuboids = self.cuboids.clone();
        cuboids[index] = moving.move_to(anchor, extents);

        Some(Self { cuboids, active })
    }

    /// Every legal single roll from this state, cuboid by cuboid in
    /// [`DIRECTIONS`] order.
    pub fn neighbors(&self, grid: &Grid) -> Vec<(GameState, Action)> {
        let mut neighbors = Vec::with_capacity(self.cuboids.len() * DIRECTIONS.len());

        for (index, cuboid) in self.cuboids.iter().enumerate() {
            for direction in DIRECTIONS {
                if let Some(next) = self.roll_cuboid(grid, index, direction) {
                    let action = Action {
                        cuboid_id: cuboid.id,
                        direction,
                    };
                    neighbors.push((next, action));
                }
            }
        }

        neighbors
    }
}

/// Clears every special tile inside the given footprint.
fn consume_covered(grid: &Grid, anchor: Coord, extents: Extents, active: &mut TileSet) {
    for cell in footprint_cells(anchor, extents) {
        if let Some(Tile::Special(index)) = grid.tile(cell) {
            active.remove(index);
        }
    }
}

/// Kuhn's augmenting-path matching between cuboids and goal areas.
///
/// An edge exists when a cuboid's footprint equals a goal area exactly.
/// Succeeds only if every cuboid gets its own area.
fn has_perfect_matching(cuboids: &[Cuboid], goal_areas: &[GoalArea]) -> bool {
    if goal_areas.len() < cuboids.len() {
        return false;
    }

    let edges: Vec<Vec<usize>> = cuboids
        .iter()
        .map(|cuboid| {
            goal_areas
                .iter()
                .enumerate()
                .filter(|(_, area)| area.matches(cuboid))
                .map(|(area_index, _)| area_index)
                .collect()
        })
        .collect();

    // each cuboid needs at least one candidate before augmenting is worth it
    if edges.iter().any(Vec::is_empty) {
        return false;
    }

    let mut owner: Vec<Option<usize>> = vec![None; goal_areas.len()];
    for cuboid in 0..cuboids.len() {
        let mut visited = vec![false; goal_areas.len()];
        if !augment(cuboid, &edges, &mut owner, &mut visited) {
            return false;
        }
    }
    true
}

/// Looks for an augmenting path starting at `cuboid`.
fn augment(
    cuboid: usize,
    edges: &[Vec<usize>],
    owner: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for &area in &edges[cuboid] {
        if visited[area] {
            continue;
        }
        visited[area] = true;

        let free = match owner[area] {
            None => true,
            Some(current) => augment(current, edges, owner, visited),
        };
        if free {
            owner[area] = Some(cuboid);
            return true;
        }
    }
    false
}

/// Whether all footprints together cover exactly the goal cells.
fn covers_goal_union(cuboids: &[Cuboid], goal_areas: &[GoalArea]) -> bool {
    let mut goal_cells: Vec<Coord> = goal_areas
        .iter()
        .flat_map(|area| area.cells.iter().copied())
        .collect();
    goal_cells.sort_unstable();

    let mut covered: Vec<Coord> = cuboids.iter().flat_map(Cuboid::footprint).collect();
    covered.sort_unstable();
    covered.dedup();

    covered == goal_cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::parse;

    fn initial(text: &str) -> (crate::grid::ParsedGrid, GameState) {
        let parsed = parse(text).unwrap();
        let state = GameState::initial(&parsed.grid, parsed.cuboids.clone(), &parsed.special_tiles);
        (parsed, state)
    }

    #[test]
    fn test_blocked_cuboid_has_no_neighbors() {
        let (parsed, state) = initial("1xh\nxxx\nxxx");
        assert!(state.neighbors(&parsed.grid).is_empty());
        assert!(!state.is_goal(&parsed.goal_areas, GoalRule::Matching));
    }

    #[test]
    fn test_roll_consumes_special_tiles() {
        let (parsed, state) = initial("1hh\n1hh\n1hh");
        assert_eq!(state.active_tiles().len(), 6);

        let neighbors = state.neighbors(&parsed.grid);
        assert_eq!(neighbors.len(), 1);
        let (next, action) = &neighbors[0];
        assert_eq!(action.to_string(), "C1 right");
        assert_eq!(next.cuboids()[0].anchor, (0, 1));
        assert_eq!(next.active_tiles().iter().collect::<Vec<_>>(), vec![1, 3, 5]);
        assert_eq!(state.active_tiles().len(), 6, "source state must be untouched");
    }

    #[test]
    fn test_consumed_tile_blocks_the_cuboid_that_consumed_it() {
        let (parsed, state) = initial("1h.");
        let stepped = state.roll_cuboid(&parsed.grid, 0, Direction::Right).unwrap();
        assert!(stepped.active_tiles().is_empty());

        let onward = stepped.roll_cuboid(&parsed.grid, 0, Direction::Right).unwrap();
        assert_eq!(onward.cuboids()[0].anchor, (0, 2));
        assert!(
            onward.roll_cuboid(&parsed.grid, 0, Direction::Left).is_none(),
            "the consumed tile must stay blocked"
        );
    }

    #[test]
    fn test_special_tile_under_initial_footprint_is_consumed() {
        // the bounding box of this run covers the h
        let (_, state) = initial("11\n1h");
        assert!(state.active_tiles().is_empty());
    }

    #[test]
    fn test_cuboids_cannot_roll_into_each_other() {
        let (parsed, state) = initial("1.1");
        let moves: Vec<String> = state
            .neighbors(&parsed.grid)
            .iter()
            .map(|(_, action)| action.to_string())
            .collect();
        assert_eq!(moves, vec!["C1 right", "C2 left"]);

        let (parsed, state) = initial("12");
        assert!(state.roll_cuboid(&parsed.grid, 0, Direction::Right).is_none());
    }

    #[test]
    fn test_key_distinguishes_active_tiles() {
        let (parsed, state) = initial("1h.");
        let there = state.roll_cuboid(&parsed.grid, 0, Direction::Right).unwrap();
        let back = there.roll_cuboid(&parsed.grid, 0, Direction::Left).unwrap();
        assert_eq!(back.cuboids(), state.cuboids());
        assert_ne!(back.key(), state.key());
        assert_eq!(back.key(), back.clone().key());
    }

    #[test]
    fn test_no_goal_areas_means_tiles_alone_decide() {
        let (parsed, state) = initial("1.");
        assert!(state.is_goal(&parsed.goal_areas, GoalRule::Matching));
        assert!(state.is_goal(&parsed.goal_areas, GoalRule::UnionCoverage));
    }

    #[test]
    fn test_matching_needs_a_goal_area_per_cuboid() {
        let (parsed, state) = initial("1gg1");
        let state = state
            .roll_cuboid(&parsed.grid, 0, Direction::Right)
            .and_then(|state| state.roll_cuboid(&parsed.grid, 1, Direction::Left))
            .unwrap();
        assert!(!state.is_goal(&parsed.goal_areas, GoalRule::Matching));
        assert!(state.is_goal(&parsed.goal_areas, GoalRule::UnionCoverage));
    }

    #[test]
    fn test_matching_assigns_distinct_areas() {
        let (parsed, state) = initial("1g.g1");
        let state = state
            .roll_cuboid(&parsed.grid, 0, Direction::Right)
            .and_then(|state| state.roll_cuboid(&parsed.grid, 1, Direction::Left))
            .unwrap();
        assert!(state.is_goal(&parsed.goal_areas, GoalRule::Matching));
        assert!(state.is_goal(&parsed.goal_areas, GoalRule::UnionCoverage));
    }

    #[test]
    fn test_extra_goal_areas_are_allowed_by_matching_only() {
        let (parsed, state) = initial("1g.g");
        let state = state.roll_cuboid(&parsed.grid, 0, Direction::Right).unwrap();
        assert!(state.is_goal(&parsed.goal_areas, GoalRule::Matching));
        assert!(!state.is_goal(&parsed.goal_areas, GoalRule::UnionCoverage));
    }

    #[test]
    fn test_augmenting_path_reassigns_areas() {
        let cuboids = [
            Cuboid::new(1, (0, 0), Extents::new(1, 1, 1)),
            Cuboid::new(2, (0, 0), Extents::new(1, 1, 1)),
        ];
        let areas = [
            GoalArea {
                id: 1,
                cells: vec![(0, 0)],
            },
            GoalArea {
                id: 2,
                cells: vec![(0, 0)],
            },
        ];
        assert!(has_perfect_matching(&cuboids, &areas));
        assert!(!has_perfect_matching(&cuboids, &areas[..1]));
    }
}
