//! Rotating-dial combination puzzles.
//!
//! Each dial shows a digit modulo its own modulus. An operation turns every
//! dial by a fixed increment at once. The goal is to bring all dials to zero
//! with the fewest operations.

use std::collections::VecDeque;
use std::time::Instant;

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::compress::run_lengths;
use crate::error::ValidationError;
use crate::result::{Solution, SolveResult};

/// Cap on distinct dial positions recorded before giving up.
pub const DIAL_MAX_STATES: usize = 100_000;

/// How a dial search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialOutcome {
    /// All dials reached zero; operation indices in order.
    Solved(Vec<usize>),
    /// Every reachable position was recorded without reaching zero.
    Exhausted,
    /// [`DIAL_MAX_STATES`] positions were recorded first.
    StateLimit,
}

/// Result of [`DialPuzzle::search`].
#[derive(Clone, Debug)]
pub struct DialSearch {
    pub outcome: DialOutcome,
    /// Distinct positions recorded, the start included.
    pub states_explored: usize,
}

/// A validated dial puzzle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialPuzzle {
    moduli: Vec<u8>,
    operations: Vec<Vec<u8>>,
    initial: Vec<u8>,
}

impl DialPuzzle {
    /// Validates the three digit strings of a dial puzzle.
    ///
    /// `operations` is split into chunks of one digit per dial.
    pub fn parse(moduli: &str, operations: &str, initial: &str) -> Result<Self, ValidationError> {
        let moduli = digits("moduli", moduli)?;
        let raw_operations = digits("operations", operations)?;
        let initial = digits("initial state", initial)?;

        let dials = moduli.len();
        if dials == 0 {
            return Err(ValidationError::NoDials);
        }
        if let Some(dial) = moduli.iter().position(|&modulus| modulus == 0) {
            return Err(ValidationError::ZeroModulus { dial });
        }
        if raw_operations.len() % dials != 0 {
            return Err(ValidationError::OperationsLength {
                operations: raw_operations.len(),
                dials,
            });
        }
        if initial.len() != dials {
            return Err(ValidationError::InitialLength {
                initial: initial.len(),
                dials,
            });
        }
        for (dial, (&value, &modulus)) in initial.iter().zip(&moduli).enumerate() {
            if value >= modulus {
                return Err(ValidationError::InitialOutOfRange {
                    dial,
                    value,
                    modulus,
                });
            }
        }

        Ok(Self {
            moduli,
            operations: raw_operations.chunks(dials).map(<[u8]>::to_vec).collect(),
            initial,
        })
    }

    /// Parses the combined `moduli|operations|initial` form.
    pub fn parse_combined(text: &str) -> Result<Self, ValidationError> {
        let mut fields = text.trim().splitn(3, '|');
        let moduli = fields.next().unwrap_or_default();
        let operations = fields.next().unwrap_or_default();
        let initial = fields.next().unwrap_or_default();
        Self::parse(moduli, operations, initial)
    }

    pub fn dial_count(&self) -> usize {
        self.moduli.len()
    }

    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    /// Applies operation `index` to `positions`.
    fn apply(&self, positions: &[u8], index: usize) -> Vec<u8> {
        positions
            .iter()
            .zip(&self.operations[index])
            .zip(&self.moduli)
            .map(|((&position, &increment), &modulus)| {
                ((position as u16 + increment as u16) % modulus as u16) as u8
            })
            .collect()
    }

    /// Finds a shortest operation sequence reaching all zeros.
    pub fn search(&self) -> DialSearch {
        let target = vec![0u8; self.dial_count()];
        let mut parents: FxHashMap<Vec<u8>, Option<(Vec<u8>, usize)>> = FxHashMap::default();
        parents.insert(self.initial.clone(), None);
        let mut frontier = VecDeque::from([self.initial.clone()]);

        while let Some(positions) = frontier.pop_front() {
            if positions == target {
                return DialSearch {
                    outcome: DialOutcome::Solved(reconstruct_path(&parents, &target)),
                    states_explored: parents.len(),
                };
            }

            for index in 0..self.operation_count() {
                let next = self.apply(&positions, index);
                if parents.contains_key(&next) {
                    continue;
                }
                if parents.len() >= DIAL_MAX_STATES {
                    warn!(max_states = DIAL_MAX_STATES, "dial state limit reached");
                    return DialSearch {
                        outcome: DialOutcome::StateLimit,
                        states_explored: parents.len(),
                    };
                }
                parents.insert(next.clone(), Some((positions.clone(), index)));
                frontier.push_back(next);
            }
        }

        debug!(states = parents.len(), "dial positions exhausted");
        DialSearch {
            outcome: DialOutcome::Exhausted,
            states_explored: parents.len(),
        }
    }

    /// Solves and packages the outcome as a [`SolveResult`].
    pub fn solve(&self) -> SolveResult {
        let started = Instant::now();
        let search = self.search();
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        match search.outcome {
            DialOutcome::Solved(path) => {
                info!(
                    moves = path.len(),
                    states = search.states_explored,
                    "found dial solution"
                );
                SolveResult::solved(
                    Solution::Moves(compress_moves(&path)),
                    path.len(),
                    search.states_explored,
                    elapsed_ms,
                )
            }
            outcome => SolveResult::unsolved(
                search.states_explored,
                elapsed_ms,
                outcome == DialOutcome::StateLimit,
            ),
        }
    }
}

/// Converts a string of decimal digits to their values.
fn digits(field: &'static str, text: &str) -> Result<Vec<u8>, ValidationError> {
    text.chars()
        .map(|found| {
            found
                .to_digit(10)
                .map(|digit| digit as u8)
                .ok_or(ValidationError::NonDigit { field, found })
        })
        .collect()
}

/// Follows parent links from `target` back to the start.
fn reconstruct_path(
    parents: &FxHashMap<Vec<u8>, Option<(Vec<u8>, usize)>>,
    target: &[u8],
) -> Vec<usize> {
    let mut path = Vec::new();
    let mut current = target;
    while let Some(Some((parent, index))) = parents.get(current) {
        path.push(*index);
        current = parent.as_slice();
    }
    path.reverse();
    path
}

/// Run-length encodes operation indices as `"Move <index>, <n> times"`.
pub fn compress_moves(path: &[usize]) -> Vec<String> {
    run_lengths(path)
        .into_iter()
        .map(|(index, count)| format!("Move {index}, {count} times"))
        .collect()
}
