use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Glyph used for empty cells in the textual board form; never a valid marker.
pub const EMPTY_GLYPH: char = '.';

/// The token a player leaves in the cells they occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Marker(char);

impl Marker {
    /// Creates a marker, rejecting whitespace and the empty-cell glyph.
    pub fn new(symbol: char) -> Result<Self, BoardError> {
        if symbol.is_whitespace() || symbol == EMPTY_GLYPH {
            return Err(BoardError::InvalidMarker(symbol));
        }
        Ok(Self(symbol))
    }

    /// Returns the character this marker is drawn with.
    pub fn symbol(self) -> char {
        self.0
    }
}

impl TryFrom<char> for Marker {
    type Error = BoardError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        Marker::new(symbol)
    }
}

impl From<Marker> for char {
    fn from(marker: Marker) -> Self {
        marker.0
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a player chooses their moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerMode {
    /// Moves come from outside the engine.
    Human,
    /// Uniformly random legal moves.
    AutomatedRandom,
    /// Exact minimax moves.
    AutomatedOptimal,
}

impl PlayerMode {
    /// Returns the automation strategy for this mode, `None` for humans.
    pub fn automation(self) -> Option<Automation> {
        match self {
            PlayerMode::Human => None,
            PlayerMode::AutomatedRandom => Some(Automation::Random),
            PlayerMode::AutomatedOptimal => Some(Automation::Optimal),
        }
    }
}

/// Strategy used by [`GameSession::play_automated_round`](crate::session::GameSession::play_automated_round).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Automation {
    Random,
    Optimal,
}

/// A participant in a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    name: String,
    marker: Marker,
    mode: PlayerMode,
}

impl Player {
    /// Creates a player; names and markers are checked for clashes by the session.
    pub fn new(name: impl Into<String>, marker: Marker, mode: PlayerMode) -> Self {
        Self {
            name: name.into(),
            marker,
            mode,
        }
    }

    /// Shorthand for a human player; fails if `symbol` is not a valid marker.
    pub fn human(name: impl Into<String>, symbol: char) -> Result<Self, BoardError> {
        Ok(Self::new(name, Marker::new(symbol)?, PlayerMode::Human))
    }

    /// Display name, unique within a session.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The marker this player puts on the board.
    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// How this player's moves are chosen.
    pub fn mode(&self) -> PlayerMode {
        self.mode
    }

    /// Returns a copy of this player with a different mode.
    pub fn with_mode(mut self, mode: PlayerMode) -> Self {
        self.mode = mode;
        self
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_rejects_blank_and_empty_glyph() {
        assert_eq!(Marker::new(' '), Err(BoardError::InvalidMarker(' ')));
        assert_eq!(Marker::new('.'), Err(BoardError::InvalidMarker('.')));
        assert_eq!(Marker::new('X').map(Marker::symbol), Ok('X'));
    }

    #[test]
    fn automation_follows_mode() {
        assert_eq!(PlayerMode::Human.automation(), None);
        assert_eq!(
            PlayerMode::AutomatedRandom.automation(),
            Some(Automation::Random)
        );
        assert_eq!(
            PlayerMode::AutomatedOptimal.automation(),
            Some(Automation::Optimal)
        );
    }

    #[test]
    fn player_display_shows_name_and_marker() {
        let player = Player::human("Ada", 'X').unwrap();
        assert_eq!(player.to_string(), "Ada (X)");
        assert_eq!(player.mode(), PlayerMode::Human);
    }
}
