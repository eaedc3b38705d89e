//! Play command - interactive human-vs-AI game

use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};

use crate::{
    board::{Board, Coord, Player},
    game::{Game, Outcome},
};

pub fn execute() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();
    run(&mut input, &mut output)
}

/// Drive a full game over the given handles.
///
/// Generic over the reader and writer so the interaction contract is
/// testable without a terminal.
fn run(input: &mut impl BufRead, output: &mut impl Write) -> Result<()> {
    writeln!(output, "Welcome to AI Tic-Tac-Toe!")?;
    writeln!(output, "You are 'X' and the AI is 'O'.")?;

    let mut game = Game::new();
    render(game.board(), output)?;

    loop {
        // Human's turn
        let coord = prompt_move(game.board(), input, output)?;
        game.play(coord)?;
        render(game.board(), output)?;
        if announce_if_over(&game, output)? {
            break;
        }

        // AI's turn
        writeln!(output, "AI is thinking...")?;
        let reply = game.play_ai()?;
        writeln!(output, "AI played at ({}, {}):", reply.row(), reply.col())?;
        render(game.board(), output)?;
        if announce_if_over(&game, output)? {
            break;
        }
    }

    Ok(())
}

/// Prompt until the human enters a legal move.
///
/// Any rejected line (unparsable, out of bounds, or an occupied cell) gets
/// one error message and a fresh prompt; input is never fatal while the
/// stream stays open.
fn prompt_move(board: &Board, input: &mut impl BufRead, output: &mut impl Write) -> Result<Coord> {
    loop {
        write!(output, "Enter your move (row and column, 0-2): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before the game finished");
        }

        match parse_coords(&line) {
            Some(coord) if board.is_empty_at(coord) => return Ok(coord),
            _ => writeln!(
                output,
                "Invalid move. The cell is already taken or out of bounds."
            )?,
        }
    }
}

/// Parse exactly two whitespace-separated in-bounds coordinates
fn parse_coords(line: &str) -> Option<Coord> {
    let mut parts = line.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Coord::new(row, col).ok()
}

fn render(board: &Board, output: &mut impl Write) -> Result<()> {
    writeln!(output)?;
    writeln!(output, "{board}")?;
    writeln!(output)?;
    Ok(())
}

fn announce_if_over(game: &Game, output: &mut impl Write) -> Result<bool> {
    match game.outcome() {
        Some(Outcome::Win(Player::Human)) => {
            writeln!(output, "Congratulations! You win!")?;
            Ok(true)
        }
        Some(Outcome::Win(Player::Ai)) => {
            writeln!(output, "AI wins! Better luck next time.")?;
            Ok(true)
        }
        Some(Outcome::Draw) => {
            writeln!(output, "It's a draw!")?;
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_parse_coords() {
        assert_eq!(parse_coords("0 2\n"), Some(Coord::new(0, 2).unwrap()));
        assert_eq!(parse_coords("  1\t2  "), Some(Coord::new(1, 2).unwrap()));

        assert_eq!(parse_coords(""), None);
        assert_eq!(parse_coords("1"), None);
        assert_eq!(parse_coords("a b"), None);
        assert_eq!(parse_coords("0 1 2"), None);
        assert_eq!(parse_coords("-1 0"), None);
        assert_eq!(parse_coords("3 0"), None);
    }

    #[test]
    fn test_prompt_reprompts_until_valid() {
        let board = Board::new();
        let mut input = Cursor::new(&b"9 9\nfoo\n0 0\n"[..]);
        let mut output = Vec::new();

        let coord = prompt_move(&board, &mut input, &mut output).unwrap();
        assert_eq!(coord, Coord::new(0, 0).unwrap());

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Invalid move.").count(), 2);
        assert_eq!(text.matches("Enter your move").count(), 3);
    }

    #[test]
    fn test_prompt_rejects_occupied_cell() {
        let board = Board::from_string("X........").unwrap();
        let mut input = Cursor::new(&b"0 0\n1 1\n"[..]);
        let mut output = Vec::new();

        let coord = prompt_move(&board, &mut input, &mut output).unwrap();
        assert_eq!(coord, Coord::new(1, 1).unwrap());

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Invalid move.").count(), 1);
    }

    #[test]
    fn test_prompt_errors_on_eof() {
        let board = Board::new();
        let mut input = Cursor::new(&b"not a move\n"[..]);
        let mut output = Vec::new();

        assert!(prompt_move(&board, &mut input, &mut output).is_err());
    }
}
