//! Stateless game rules.
//!
//! Every function here looks only at the board it is given and the two
//! players' markers, so the session and the search can evaluate real and
//! hypothetical positions the same way.

use crate::board::{Action, Board, Cell};
use crate::player::{Marker, Player};

/// Utility of a won, lost or drawn position from the first player's view.
pub type Score = i32;

pub const WIN: Score = 1;
pub const LOSS: Score = -1;
pub const DRAW: Score = 0;

/// The state of a game as read off the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// No line is complete and empty cells remain.
    InProgress,
    /// The player completed a full row, column or diagonal.
    Won(&'a Player),
    /// The board is full without a complete line.
    Tie,
}

impl Outcome<'_> {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Number of cells nobody has played yet.
pub fn empty_cell_count(board: &Board) -> usize {
    board.cells().iter().filter(|c| c.is_empty()).count()
}

/// Number of cells carrying a marker.
pub fn marked_cell_count(board: &Board) -> usize {
    board.cell_count() - empty_cell_count(board)
}

/// Every empty cell in row-major order.
pub fn legal_actions(board: &Board) -> Vec<Action> {
    board
        .iter()
        .filter(|(_, cell)| cell.is_empty())
        .map(|(action, _)| action)
        .collect()
}

/// The player to move, derived from how many cells are filled.
///
/// `first` moves whenever an even number of cells is occupied.
pub fn active_player<'a>(board: &Board, first: &'a Player, second: &'a Player) -> &'a Player {
    if marked_cell_count(board) % 2 == 0 {
        first
    } else {
        second
    }
}

/// Returns the player owning a complete line, checking rows, then columns,
/// then the two diagonals.
///
/// Lines filled with a marker that belongs to neither player are skipped.
pub fn winner<'a>(board: &Board, first: &'a Player, second: &'a Player) -> Option<&'a Player> {
    let owner = |marker: Marker| {
        if marker == first.marker() {
            Some(first)
        } else if marker == second.marker() {
            Some(second)
        } else {
            None
        }
    };
    let n = board.size();
    let at = |row, column| board.cell(Action::new(row, column)).unwrap_or_default();
    let line = |cells: &mut dyn Iterator<Item = Cell>| line_owner(cells).and_then(owner);

    (0..n)
        .find_map(|row| line(&mut (0..n).map(|column| at(row, column))))
        .or_else(|| (0..n).find_map(|column| line(&mut (0..n).map(|row| at(row, column)))))
        .or_else(|| line(&mut (0..n).map(|i| at(i, i))))
        .or_else(|| line(&mut (0..n).map(|i| at(i, n - 1 - i))))
}

/// True once somebody has won or the board is full.
pub fn is_terminal(board: &Board, first: &Player, second: &Player) -> bool {
    winner(board, first, second).is_some() || empty_cell_count(board) == 0
}

/// `+1` if `first` won, `-1` if `second` won, `0` otherwise.
///
/// Only meaningful on terminal boards: an unfinished game also scores `0`.
pub fn utility(board: &Board, first: &Player, second: &Player) -> Score {
    match winner(board, first, second) {
        Some(player) if player.marker() == first.marker() => WIN,
        Some(_) => LOSS,
        None => DRAW,
    }
}

/// Reads the current [`Outcome`] off the board.
pub fn outcome<'a>(board: &Board, first: &'a Player, second: &'a Player) -> Outcome<'a> {
    match winner(board, first, second) {
        Some(player) => Outcome::Won(player),
        None if empty_cell_count(board) == 0 => Outcome::Tie,
        None => Outcome::InProgress,
    }
}

/// The utility of `board` if the game is over, `None` while it is still running.
pub fn terminal_utility(board: &Board, first: &Player, second: &Player) -> Option<Score> {
    match outcome(board, first, second) {
        Outcome::InProgress => None,
        Outcome::Won(player) if player.marker() == first.marker() => Some(WIN),
        Outcome::Won(_) => Some(LOSS),
        Outcome::Tie => Some(DRAW),
    }
}

/// The marker filling every cell of the line, if there is one.
fn line_owner(mut line: impl Iterator<Item = Cell>) -> Option<Marker> {
    let owner = line.next()?.marker()?;
    line.all(|cell| cell == Cell::Occupied(owner))
        .then_some(owner)
}
