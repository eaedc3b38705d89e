//! Analyze command - minimax values and optimal moves
//!
//! Prints the game-theoretic value and optimal move(s) for a position, and
//! can export the AI's complete perfect-play policy as JSON.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use indicatif::ProgressBar;
use serde::Serialize;

use crate::{
    board::{Board, Coord, Player},
    cli::output,
    minimax,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum PolicyMode {
    /// Report the single move the AI would actually pick
    Single,
    /// Report all moves with the optimal minimax value
    Full,
}

impl PolicyMode {
    fn as_str(&self) -> &'static str {
        match self {
            PolicyMode::Single => "single",
            PolicyMode::Full => "full",
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Analyze positions with the minimax engine")]
pub struct AnalyzeArgs {
    /// Board to analyze: 9 cells ('.', 'X', 'O') in row-major order
    #[arg(long)]
    pub state: Option<String>,

    /// Which token moves next in the analyzed position (`x` or `o`)
    #[arg(long, default_value = "o")]
    pub to_move: String,

    /// How many optimal moves to report
    #[arg(long, value_enum, default_value_t = PolicyMode::Single)]
    pub mode: PolicyMode,

    /// Export the complete AI policy to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    if let Some(s) = &args.state {
        let board = Board::from_string(s)?;
        let to_move = parse_player_token(&args.to_move, "--to-move")?;
        output::print_section("Minimax analysis");
        analyze_position(&board, to_move, "Custom state", args.mode);
    } else {
        output::print_section("Optimal policy analysis");
        println!("Showing optimal moves for key positions:\n");

        analyze_position(&Board::new(), Player::Human, "Empty board", args.mode);

        let center = Board::from_string("....X....")?;
        analyze_position(&center, Player::Ai, "Center taken by X", args.mode);

        let corner = Board::from_string("X........")?;
        analyze_position(&corner, Player::Ai, "Corner taken by X", args.mode);
    }

    if let Some(path) = &args.export {
        export_policy(path, args.mode)?;
        println!("\nAI policy exported to: {}", path.display());
    }

    Ok(())
}

/// Parse a player token (`x` or `o`) into the matching player
fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.to_lowercase().as_str() {
        "x" => Ok(Player::Human),
        "o" => Ok(Player::Ai),
        other => Err(anyhow::anyhow!(
            "invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

/// Analyze a single position
fn analyze_position(board: &Board, to_move: Player, description: &str, mode: PolicyMode) {
    println!("{description}:");
    println!("{board}");

    if board.is_terminal() {
        println!("  (state is terminal)\n");
        return;
    }

    let value = minimax::evaluate(board, to_move);
    println!("Value with {to_move} to move: {value:+}");

    let best = best_moves(board, to_move);
    if mode == PolicyMode::Single {
        println!("Optimal move: {}\n", best[0]);
    } else {
        println!("Optimal moves (all minimax-equivalent):");
        for coord in &best {
            println!("  - {coord}");
        }
        println!();
    }
}

/// All moves attaining the minimax value for `to_move`, in row-major order.
///
/// The first entry is the move the strict-`>` scan in
/// [`minimax::find_best_move`] would pick when the AI is active.
fn best_moves(board: &Board, to_move: Player) -> Vec<Coord> {
    let scored = minimax::score_moves(board, to_move);
    let best = match to_move {
        Player::Ai => scored.iter().map(|&(_, value)| value).max(),
        Player::Human => scored.iter().map(|&(_, value)| value).min(),
    };
    let Some(best) = best else {
        return Vec::new();
    };

    scored
        .into_iter()
        .filter(|&(_, value)| value == best)
        .map(|(coord, _)| coord)
        .collect()
}

#[derive(Serialize)]
struct PolicyExport {
    description: &'static str,
    player: &'static str,
    mode: &'static str,
    total_states: usize,
    policy: BTreeMap<String, PolicyEntry>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum PolicyEntry {
    Single(Coord),
    Multiple(Vec<Coord>),
}

/// Export the AI's reply for every reachable position to a JSON file
fn export_policy(path: &Path, mode: PolicyMode) -> Result<()> {
    let spinner = output::create_spinner("Computing the AI reply for every reachable position...");
    let policy = collect_ai_policy(mode, &spinner);
    spinner.finish_and_clear();

    println!("  Total policy entries: {}", policy.len());

    let export = PolicyExport {
        description: "Perfect-play policy for the AI (O) in Tic-Tac-Toe",
        player: "O",
        mode: mode.as_str(),
        total_states: policy.len(),
        policy,
    };

    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &export)?;

    Ok(())
}

/// Walk every position reachable from the opening (human moves first,
/// strict alternation) and record the optimal move(s) wherever the AI is
/// to move. Keyed by the board encoding; under strict alternation the
/// encoding determines whose turn it is, so the key is unambiguous.
fn collect_ai_policy(mode: PolicyMode, spinner: &ProgressBar) -> BTreeMap<String, PolicyEntry> {
    let mut seen = HashSet::new();
    let mut policy = BTreeMap::new();
    walk(Board::new(), Player::Human, mode, &mut seen, &mut policy, spinner);
    policy
}

fn walk(
    board: Board,
    to_move: Player,
    mode: PolicyMode,
    seen: &mut HashSet<String>,
    policy: &mut BTreeMap<String, PolicyEntry>,
    spinner: &ProgressBar,
) {
    let key = board.encode();
    if !seen.insert(key.clone()) {
        return;
    }
    if board.is_terminal() {
        return;
    }

    if to_move == Player::Ai {
        let best = best_moves(&board, Player::Ai);
        let entry = match mode {
            PolicyMode::Single => PolicyEntry::Single(best[0]),
            PolicyMode::Full => PolicyEntry::Multiple(best),
        };
        policy.insert(key, entry);
        spinner.tick();
    }

    for coord in board.empty_cells() {
        let next = board
            .place(coord, to_move)
            .expect("empty-cell scan should not yield an occupied cell");
        walk(next, to_move.opponent(), mode, seen, policy, spinner);
    }
}
