//! Exhaustive game-tree search for the AI player
//!
//! The 3x3 game tree is small enough that every position is searched to the
//! end on every call; there is no pruning, memoization, or heuristic cutoff.
//! Scores are not discounted by depth, so the search has no preference among
//! winning lines or between hastening and delaying a loss; any win is a win.

use crate::{
    board::{Board, Coord, Player},
    error::Error,
};

/// Game-theoretic value of a position
pub type Score = i32;

/// The AI has a completed line
pub const AI_WIN: Score = 10;
/// The human has a completed line
pub const HUMAN_WIN: Score = -10;
/// Neither player can force a win
pub const DRAW: Score = 0;

/// Compute the minimax value of a board with `to_move` active.
///
/// The AI maximizes and the human minimizes the same score. Terminal states
/// are checked in a fixed priority order: AI win, then human win, then full
/// board. The board is taken by reference and never modified; trial moves
/// are explored on copies.
///
/// Turn-count legality is not enforced; the value is defined for whatever
/// board and active player are passed in.
pub fn evaluate(board: &Board, to_move: Player) -> Score {
    if board.has_won(Player::Ai) {
        return AI_WIN;
    }
    if board.has_won(Player::Human) {
        return HUMAN_WIN;
    }
    if board.is_full() {
        return DRAW;
    }

    let mut best = match to_move {
        Player::Ai => Score::MIN,
        Player::Human => Score::MAX,
    };

    for coord in board.empty_cells() {
        let trial = board
            .place(coord, to_move)
            .expect("empty-cell scan should not yield an occupied cell");
        let score = evaluate(&trial, to_move.opponent());
        best = match to_move {
            Player::Ai => best.max(score),
            Player::Human => best.min(score),
        };
    }

    best
}

/// Find the AI's optimal move.
///
/// Scans the empty cells in row-major order (row 0-2, col 0-2), scores the
/// opponent's best reply to each, and keeps the first cell attaining the
/// maximum under a strict `>` comparison. The tie-break is therefore
/// deterministic: among equally good moves the earliest cell in row-major
/// order wins.
///
/// # Errors
///
/// Returns [`Error::NoLegalMoves`] if the board is already terminal (a
/// completed line for either player, or no empty cell).
pub fn find_best_move(board: &Board) -> Result<Coord, Error> {
    if board.is_terminal() {
        return Err(Error::NoLegalMoves);
    }

    let mut best_score = Score::MIN;
    let mut best_move = None;

    for coord in board.empty_cells() {
        let trial = board
            .place(coord, Player::Ai)
            .expect("empty-cell scan should not yield an occupied cell");
        let score = evaluate(&trial, Player::Human);
        if score > best_score {
            best_score = score;
            best_move = Some(coord);
        }
    }

    best_move.ok_or(Error::NoLegalMoves)
}

/// Score every legal move for `to_move`, in row-major order.
///
/// Each entry pairs an empty cell with the minimax value of the position
/// after `to_move` fills it. This is the scan [`find_best_move`] reduces
/// over, exposed for analysis output.
pub fn score_moves(board: &Board, to_move: Player) -> Vec<(Coord, Score)> {
    board
        .empty_cells()
        .map(|coord| {
            let trial = board
                .place(coord, to_move)
                .expect("empty-cell scan should not yield an occupied cell");
            (coord, evaluate(&trial, to_move.opponent()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_priority_ai_win() {
        // AI line complete, empties remain; value is +10 for either active player
        let board = Board::from_string("OOOXX.X..").unwrap();
        assert_eq!(evaluate(&board, Player::Ai), AI_WIN);
        assert_eq!(evaluate(&board, Player::Human), AI_WIN);
    }

    #[test]
    fn terminal_priority_human_win() {
        let board = Board::from_string("XXXOO....").unwrap();
        assert_eq!(evaluate(&board, Player::Ai), HUMAN_WIN);
        assert_eq!(evaluate(&board, Player::Human), HUMAN_WIN);
    }

    #[test]
    fn immediate_win_outranks_block() {
        // O O .        X X .
        // X X .  vs    . O .
        // . . .        . . .
        let win_now = Board::from_string("OO.XX....").unwrap();
        assert_eq!(find_best_move(&win_now).unwrap(), Coord::new(0, 2).unwrap());

        let must_block = Board::from_string("XX..O....").unwrap();
        assert_eq!(
            find_best_move(&must_block).unwrap(),
            Coord::new(0, 2).unwrap()
        );
    }

    #[test]
    fn score_moves_matches_best_move_scan() {
        let board = Board::from_string("XX..O....").unwrap();
        let scored = score_moves(&board, Player::Ai);
        assert_eq!(scored.len(), board.empty_cells().count());

        let best = scored.iter().map(|&(_, s)| s).max().unwrap();
        let first_best = scored.iter().find(|&&(_, s)| s == best).unwrap().0;
        assert_eq!(find_best_move(&board).unwrap(), first_best);
    }

    #[test]
    fn no_legal_moves_on_terminal_board() {
        let won = Board::from_string("XXXOO....").unwrap();
        assert!(matches!(find_best_move(&won), Err(Error::NoLegalMoves)));

        let full = Board::from_string("XOXXOOOXX").unwrap();
        assert!(matches!(find_best_move(&full), Err(Error::NoLegalMoves)));
    }
}
