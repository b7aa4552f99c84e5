//! Rolling Puzzle Solver Library
//!
//! Solves two kinds of logic puzzles with breadth-first search, reporting a
//! minimal move sequence:
//! - rolling-cuboid grids, where boxes tip over their edges to consume
//!   one-time tiles and settle on goal areas
//! - rotating-dial combinations, where operations turn every dial at once

pub mod compress;
pub mod cuboid;
pub mod dial;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod presets;
pub mod result;
pub mod solver;
pub mod state;
pub mod tiles;

use dial::DialPuzzle;
use error::ValidationError;
use grid::ParsedGrid;
use result::SolveResult;
use solver::SolverConfig;

/// Common surface of both puzzle kinds, so callers can hold either behind
/// a `Box<dyn PuzzleSolver>`.
pub trait PuzzleSolver {
    /// Short name of the puzzle kind.
    fn kind(&self) -> &'static str;
    /// Runs the search to completion.
    fn solve(&self) -> SolveResult;
    /// Renders the puzzle as given.
    fn describe(&self) -> String;
}

/// A parsed rolling-cuboid puzzle with its solver settings.
#[derive(Clone, Debug)]
pub struct CuboidPuzzle {
    pub parsed: ParsedGrid,
    pub config: SolverConfig,
}

impl CuboidPuzzle {
    pub fn parse(text: &str, config: SolverConfig) -> Result<Self, ValidationError> {
        Ok(Self {
            parsed: grid::parse(text)?,
            config,
        })
    }
}

impl PuzzleSolver for CuboidPuzzle {
    fn kind(&self) -> &'static str {
        "cuboid"
    }

    fn solve(&self) -> SolveResult {
        solver::solve(&self.parsed, &self.config)
    }

    fn describe(&self) -> String {
        let start = state::GameState::initial(
            &self.parsed.grid,
            self.parsed.cuboids.clone(),
            &self.parsed.special_tiles,
        );
        let mut output = format!(
            "{} cuboids, {} goal areas, {} special tiles\n",
            self.parsed.cuboids.len(),
            self.parsed.goal_areas.len(),
            self.parsed.special_tiles.len()
        );
        output.push_str(&grid::format_placement(
            &self.parsed.grid,
            start.cuboids(),
            start.active_tiles(),
        ));
        output
    }
}

impl PuzzleSolver for DialPuzzle {
    fn kind(&self) -> &'static str {
        "dial"
    }

    fn solve(&self) -> SolveResult {
        DialPuzzle::solve(self)
    }

    fn describe(&self) -> String {
        format!(
            "{} dials, {} operations\n",
            self.dial_count(),
            self.operation_count()
        )
    }
}

/// Solves a rolling-cuboid puzzle given as grid text, with default settings.
pub fn solve_cuboid_puzzle(text: &str) -> Result<SolveResult, ValidationError> {
    Ok(CuboidPuzzle::parse(text, SolverConfig::default())?.solve())
}

/// Solves a dial puzzle given its moduli, operations and initial digits.
pub fn solve_dial_puzzle(
    moduli: &str,
    operations: &str,
    initial: &str,
) -> Result<SolveResult, ValidationError> {
    Ok(DialPuzzle::parse(moduli, operations, initial)?.solve())
}

/// Formats a result as human-readable lines.
///
/// Timing is left out so the output is stable across runs.
pub fn format_result(result: &SolveResult) -> String {
    let mut output = String::new();
    let states = result.states_explored.unwrap_or(0);

    if !result.success {
        let reason = if result.truncated {
            "gave up at the state limit"
        } else {
            "no solution exists"
        };
        output.push_str(&format!("No solution: {reason} ({states} states explored)\n"));
        return output;
    }

    let steps = result.steps.unwrap_or(0);
    output.push_str(&format!("Solved in {steps} moves ({states} states explored)\n"));
    if let Some(solution) = &result.solution {
        for (index, step) in solution.moves().iter().enumerate() {
            output.push_str(&format!("{:>3}. {step}\n", index + 1));
        }
    }
    output
}
