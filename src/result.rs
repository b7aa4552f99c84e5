//! The result record shared by both puzzle solvers.

use serde::Serialize;

/// A solution as reported to the caller.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Solution {
    /// Compressed moves joined into one line.
    Text(String),
    /// One compressed move per entry.
    Moves(Vec<String>),
}

impl Solution {
    /// Returns the moves one per entry, splitting joined text.
    pub fn moves(&self) -> Vec<&str> {
        match self {
            Solution::Text(text) if text.is_empty() => Vec::new(),
            Solution::Text(text) => text.split(MOVE_SEPARATOR).collect(),
            Solution::Moves(moves) => moves.iter().map(String::as_str).collect(),
        }
    }
}

/// Separator between moves in a [`Solution::Text`].
pub const MOVE_SEPARATOR: &str = " -> ";

/// Outcome of one solver invocation.
///
/// `success == false` with no solution covers both an exhausted frontier and
/// hitting the explored-state cap; neither is an error.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<Solution>,
    /// Number of moves before compression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub states_explored: Option<usize>,
    /// Wall-clock milliseconds spent searching.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    /// Set when the search stopped at the state cap rather than exhausting
    /// the reachable states.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
}

impl SolveResult {
    pub fn solved(solution: Solution, steps: usize, states_explored: usize, time: f64) -> Self {
        Self {
            success: true,
            solution: Some(solution),
            steps: Some(steps),
            states_explored: Some(states_explored),
            time: Some(time),
            truncated: false,
        }
    }

    pub fn unsolved(states_explored: usize, time: f64, truncated: bool) -> Self {
        Self {
            success: false,
            solution: None,
            steps: None,
            states_explored: Some(states_explored),
            time: Some(time),
            truncated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_serializes_without_solution() {
        let result = SolveResult::unsolved(1, 0.5, false);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "statesExplored": 1, "time": 0.5 })
        );
    }

    #[test]
    fn test_solution_shapes() {
        let text = SolveResult::solved(Solution::Text("up -> down".into()), 2, 3, 1.0);
        let json = serde_json::to_value(&text).unwrap();
        assert_eq!(json["solution"], "up -> down");
        assert_eq!(json["steps"], 2);
        assert_eq!(text.solution.unwrap().moves(), vec!["up", "down"]);

        let moves = Solution::Moves(vec!["Move 0, 2 times".into()]);
        assert_eq!(
            serde_json::to_value(&moves).unwrap(),
            serde_json::json!(["Move 0, 2 times"])
        );
        assert!(Solution::Text(String::new()).moves().is_empty());
    }

    #[test]
    fn test_truncated_flag_is_reported() {
        let json = serde_json::to_value(SolveResult::unsolved(10, 0.0, true)).unwrap();
        assert_eq!(json["truncated"], true);
    }
}
