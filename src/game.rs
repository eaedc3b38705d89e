//! Turn orchestration for a human-vs-AI match

use serde::{Deserialize, Serialize};

use crate::{
    board::{Board, Coord, Player},
    error::Error,
    minimax,
};

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win(Player),
    Draw,
}

/// A human-vs-AI match
///
/// The human plays X and always moves first; the players then alternate,
/// so the X count stays equal to or one ahead of the O count. The outcome
/// is re-checked after every half-move, win before draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    to_move: Player,
    outcome: Option<Outcome>,
}

impl Game {
    /// Start a new game with the human to move
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            to_move: Player::Human,
            outcome: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Apply the active player's mark at `coord` and pass the turn.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] if the game already has an outcome, or
    /// the underlying placement error for an occupied cell.
    pub fn play(&mut self, coord: Coord) -> Result<(), Error> {
        if self.outcome.is_some() {
            return Err(Error::GameOver);
        }

        self.board = self.board.place(coord, self.to_move)?;
        self.refresh_outcome();
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    /// Let the AI take the current turn and report the cell it chose.
    ///
    /// Must be called when it is the AI's turn.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] if the game already has an outcome, or
    /// [`Error::NoLegalMoves`] if the board is terminal.
    pub fn play_ai(&mut self) -> Result<Coord, Error> {
        if self.outcome.is_some() {
            return Err(Error::GameOver);
        }
        debug_assert_eq!(self.to_move, Player::Ai);

        let coord = minimax::find_best_move(&self.board)?;
        self.play(coord)?;
        Ok(coord)
    }

    fn refresh_outcome(&mut self) {
        if let Some(winner) = self.board.winner() {
            self.outcome = Some(Outcome::Win(winner));
        } else if self.board.is_full() {
            self.outcome = Some(Outcome::Draw);
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(row: usize, col: usize) -> Coord {
        Coord::new(row, col).unwrap()
    }

    #[test]
    fn test_turn_alternation() {
        let mut game = Game::new();
        assert_eq!(game.to_move(), Player::Human);

        game.play(coord(0, 0)).unwrap();
        assert_eq!(game.to_move(), Player::Ai);

        game.play(coord(1, 0)).unwrap();
        assert_eq!(game.to_move(), Player::Human);
    }

    #[test]
    fn test_win_ends_game() {
        let mut game = Game::new();
        game.play(coord(0, 0)).unwrap(); // X
        game.play(coord(1, 0)).unwrap(); // O
        game.play(coord(0, 1)).unwrap(); // X
        game.play(coord(1, 1)).unwrap(); // O
        game.play(coord(0, 2)).unwrap(); // X wins top row

        assert_eq!(game.outcome(), Some(Outcome::Win(Player::Human)));
        assert!(game.is_over());

        let result = game.play(coord(2, 2));
        assert!(matches!(result, Err(Error::GameOver)));
    }

    #[test]
    fn test_ai_takes_the_drawing_reply() {
        let mut game = Game::new();
        game.play(coord(1, 1)).unwrap(); // human takes the center

        // Only a corner reply avoids a forced loss; the first corner in
        // row-major order is (0, 0).
        let reply = game.play_ai().unwrap();
        assert_eq!(reply, coord(0, 0));
        assert_eq!(game.to_move(), Player::Human);
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut game = Game::new();
        game.play(coord(0, 0)).unwrap();
        let result = game.play(coord(0, 0));
        assert!(result.is_err());
        assert!(game.outcome().is_none());
    }
}
