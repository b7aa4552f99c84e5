//! Rolling Puzzle Solver
//!
//! Command-line front end for the rolling-cuboid and dial puzzle solvers.
//! Grids come from a file, stdin or a built-in preset; results print as
//! readable text or as the JSON result record.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use roller::dial::DialPuzzle;
use roller::presets::{self, GRID_PRESETS};
use roller::solver::{SolverConfig, DEFAULT_MAX_STATES};
use roller::state::GoalRule;
use roller::{format_result, CuboidPuzzle, PuzzleSolver};

/// Solves rolling-cuboid and dial combination puzzles.
#[derive(Parser)]
#[command(name = "roller")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a rolling-cuboid grid.
    Cuboid(CuboidArgs),
    /// Solve a dial combination puzzle.
    Dial(DialArgs),
    /// List the built-in cuboid grids.
    Presets,
}

#[derive(Args)]
struct CuboidArgs {
    /// Grid file. Reads stdin when absent or `-`.
    file: Option<PathBuf>,
    /// Use a built-in grid instead of a file.
    #[arg(long, conflicts_with = "file")]
    preset: Option<String>,
    /// Give up after this many distinct states.
    #[arg(long, default_value_t = DEFAULT_MAX_STATES)]
    max_states: usize,
    /// How goal areas are checked once all special tiles are consumed.
    #[arg(long, value_enum, default_value_t = GoalRuleArg::Matching)]
    goal_rule: GoalRuleArg,
    /// Print the result record as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct DialArgs {
    /// One modulus digit per dial, e.g. `4656`.
    moduli: String,
    /// Per-dial increment digits, one chunk per operation.
    operations: String,
    /// Starting digit of each dial.
    initial: String,
    /// Print the result record as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum GoalRuleArg {
    /// Each cuboid must sit exactly on its own goal area.
    Matching,
    /// All cuboids together must cover exactly the goal cells.
    Union,
}

impl From<GoalRuleArg> for GoalRule {
    fn from(arg: GoalRuleArg) -> Self {
        match arg {
            GoalRuleArg::Matching => GoalRule::Matching,
            GoalRuleArg::Union => GoalRule::UnionCoverage,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Cuboid(args)) => run_cuboid(args),
        Some(Command::Dial(args)) => run_dial(args),
        Some(Command::Presets) => {
            run_presets();
            Ok(())
        }
        None => run_demo(),
    }
}

/// Solves a cuboid grid from the chosen source.
fn run_cuboid(args: CuboidArgs) -> anyhow::Result<()> {
    let text = match (&args.preset, &args.file) {
        (Some(name), _) => match presets::grid_preset(name) {
            Some(preset) => preset.grid.to_string(),
            None => bail!("unknown preset {name:?}; run `roller presets` to list them"),
        },
        (None, Some(path)) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read grid from {}", path.display()))?,
        (None, _) => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read grid from stdin")?;
            text
        }
    };

    let config = SolverConfig {
        max_states: args.max_states,
        goal_rule: args.goal_rule.into(),
    };
    let puzzle = CuboidPuzzle::parse(&text, config).context("invalid cuboid grid")?;
    report(&puzzle, args.json)
}

/// Solves a dial puzzle from its three digit strings.
fn run_dial(args: DialArgs) -> anyhow::Result<()> {
    let puzzle = DialPuzzle::parse(&args.moduli, &args.operations, &args.initial)
        .context("invalid dial puzzle")?;
    report(&puzzle, args.json)
}

/// Prints the built-in grids.
fn run_presets() {
    for preset in GRID_PRESETS {
        println!("{:<10} {}", preset.name, preset.description);
    }
}

/// Solves both default puzzles.
fn run_demo() -> anyhow::Result<()> {
    let dial = DialPuzzle::parse_combined(presets::DEFAULT_DIAL)?;
    let cuboid = CuboidPuzzle::parse(presets::DEFAULT_GRID, SolverConfig::default())?;

    let puzzles: [&dyn PuzzleSolver; 2] = [&dial, &cuboid];
    for puzzle in puzzles {
        println!("=== {} puzzle ===", puzzle.kind());
        report(puzzle, false)?;
        println!();
    }
    Ok(())
}

/// Solves `puzzle` and prints the outcome.
fn report(puzzle: &dyn PuzzleSolver, json: bool) -> anyhow::Result<()> {
    let result = puzzle.solve();

    if json {
        let output = serde_json::to_string_pretty(&result).context("failed to encode result")?;
        println!("{output}");
        return Ok(());
    }

    print!("{}", puzzle.describe());
    print!("{}", format_result(&result));
    if let Some(time) = result.time {
        println!("Took {time:.1} ms");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset_puzzle(name: &str) -> CuboidPuzzle {
        let preset = presets::grid_preset(name).unwrap();
        CuboidPuzzle::parse(preset.grid, SolverConfig::default()).unwrap()
    }

    #[test]
    fn test_column_preset_report() {
        let puzzle = preset_puzzle("column");
        let output = format!("{}{}", puzzle.describe(), format_result(&puzzle.solve()));
        insta::assert_snapshot!(output, @r"
1 cuboids, 0 goal areas, 6 special tiles
1hh
1hh
1hh
Solved in 2 moves (4 states explored)
  1. right 2 times
");
    }

    #[test]
    fn test_walled_preset_report() {
        let puzzle = preset_puzzle("walled");
        insta::assert_snapshot!(format_result(&puzzle.solve()), @r"
No solution: no solution exists (1 states explored)
");
    }

    #[test]
    fn test_pair_preset_report() {
        let puzzle = preset_puzzle("pair");
        insta::assert_snapshot!(format_result(&puzzle.solve()), @r"
Solved in 2 moves (8 states explored)
  1. C1 right
  2. C2 left
");
    }

    #[test]
    fn test_dial_report() {
        let puzzle = DialPuzzle::parse("44", "1011", "12").unwrap();
        let output = format!("{}{}", puzzle.describe(), format_result(&puzzle.solve()));
        insta::assert_snapshot!(output, @r"
2 dials, 2 operations
Solved in 3 moves (12 states explored)
  1. Move 0, 1 times
  2. Move 1, 2 times
");
    }

    #[test]
    fn test_goal_rule_flag_maps_to_rule() {
        assert_eq!(GoalRule::from(GoalRuleArg::Union), GoalRule::UnionCoverage);
        assert_eq!(GoalRule::from(GoalRuleArg::Matching), GoalRule::Matching);
    }

    #[test]
    fn test_cli_parses_cuboid_flags() {
        let cli = Cli::try_parse_from([
            "roller",
            "cuboid",
            "--preset",
            "pair",
            "--goal-rule",
            "union",
            "--max-states",
            "10",
            "--json",
        ])
        .unwrap();
        let Some(Command::Cuboid(args)) = cli.command else {
            panic!("expected cuboid subcommand");
        };
        assert_eq!(args.preset.as_deref(), Some("pair"));
        assert_eq!(args.max_states, 10);
        assert!(matches!(args.goal_rule, GoalRuleArg::Union));
        assert!(args.json);
    }
}
