//! Breadth-first search over rolling-cuboid states.
//!
//! Key properties:
//! - FIFO frontier, so the first goal dequeued is reached in the fewest rolls
//! - FxHashSet of state keys, seeded with the start, so no state is expanded twice
//! - Parent links instead of per-entry path copies; the winning path is rebuilt once
//! - Hard cap on distinct states, turning a blow-up into a plain failure

use std::collections::VecDeque;
use std::time::Instant;

use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use crate::compress::compress_actions;
use crate::grid::ParsedGrid;
use crate::result::{Solution, SolveResult, MOVE_SEPARATOR};
use crate::state::{Action, GameState, GoalRule, StateKey};

/// Default cap on distinct states before the search gives up.
pub const DEFAULT_MAX_STATES: usize = 1_000_000;

/// Knobs for one cuboid solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Maximum number of distinct states recorded, the start included.
    pub max_states: usize,
    pub goal_rule: GoalRule,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_states: DEFAULT_MAX_STATES,
            goal_rule: GoalRule::default(),
        }
    }
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A goal state was reached by `actions`.
    Solved {
        actions: Vec<Action>,
        final_state: GameState,
    },
    /// Every reachable state was examined without finding a goal.
    Exhausted,
    /// The state cap was hit first.
    StateLimit,
}

/// Result of [`search`] with its bookkeeping.
#[derive(Clone, Debug)]
pub struct Search {
    pub outcome: SearchOutcome,
    /// Distinct states discovered, the start included.
    pub states_explored: usize,
}

/// A discovered state and the roll that first reached it.
struct Node {
    state: GameState,
    parent: Option<(usize, Action)>,
}

/// Runs breadth-first search from the parsed puzzle's starting placement.
pub fn search(parsed: &ParsedGrid, config: &SolverConfig) -> Search {
    let start = GameState::initial(&parsed.grid, parsed.cuboids.clone(), &parsed.special_tiles);
    let max_states = config.max_states.max(1);

    let mut seen_states: FxHashSet<StateKey> = FxHashSet::default();
    seen_states.insert(start.key());

    let mut nodes = vec![Node {
        state: start,
        parent: None,
    }];
    let mut frontier = VecDeque::from([0usize]);

    while let Some(node_index) = frontier.pop_front() {
        let current = &nodes[node_index].state;

        if current.is_goal(&parsed.goal_areas, config.goal_rule) {
            let actions = reconstruct_path(&nodes, node_index);
            info!(
                moves = actions.len(),
                states = seen_states.len(),
                "found solution"
            );
            return Search {
                outcome: SearchOutcome::Solved {
                    actions,
                    final_state: current.clone(),
                },
                states_explored: seen_states.len(),
            };
        }

        for (next, action) in current.neighbors(&parsed.grid) {
            let key = next.key();
            if seen_states.contains(&key) {
                continue;
            }
            if seen_states.len() >= max_states {
                warn!(max_states, "state limit reached, giving up");
                return Search {
                    outcome: SearchOutcome::StateLimit,
                    states_explored: seen_states.len(),
                };
            }
            seen_states.insert(key);

            frontier.push_back(nodes.len());
            nodes.push(Node {
                state: next,
                parent: Some((node_index, action)),
            });
        }
    }

    debug!(states = seen_states.len(), "frontier exhausted");
    Search {
        outcome: SearchOutcome::Exhausted,
        states_explored: seen_states.len(),
    }
}

/// Walks parent links back to the start and returns the rolls in order.
fn reconstruct_path(nodes: &[Node], mut node_index: usize) -> Vec<Action> {
    let mut actions = Vec::new();
    while let Some((parent, action)) = nodes[node_index].parent {
        actions.push(action);
        node_index = parent;
    }
    actions.reverse();
    actions
}

/// Searches and packages the outcome as a [`SolveResult`].
pub fn solve(parsed: &ParsedGrid, config: &SolverConfig) -> SolveResult {
    let started = Instant::now();
    let search = search(parsed, config);
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    match search.outcome {
        SearchOutcome::Solved { actions, .. } => {
            let moves = compress_actions(&actions, parsed.cuboids.len());
            SolveResult::solved(
                Solution::Text(moves.join(MOVE_SEPARATOR)),
                actions.len(),
                search.states_explored,
                elapsed_ms,
            )
        }
        SearchOutcome::Exhausted => SolveResult::unsolved(search.states_explored, elapsed_ms, false),
        SearchOutcome::StateLimit => SolveResult::unsolved(search.states_explored, elapsed_ms, true),
    }
}
