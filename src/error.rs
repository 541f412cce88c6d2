use thiserror::Error;

/// Errors raised while building a board from its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The board has fewer rows than the smallest playable size.
    /// The requested board is smaller than 3×3.
    #[error("board size {size} is below the minimum of {min}")]
    TooSmall { size: usize, min: usize },
    /// A row does not have as many cells as the board has rows.
    #[error("row {row} has {len} cells, expected {size}")]
    RaggedRow { row: usize, len: usize, size: usize },
    /// A cell holds a character that cannot be used as a marker.
    #[error("invalid marker {0:?}")]
    InvalidMarker(char),
}

/// Errors raised while loading or validating an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The text is not valid TOML or has unknown keys.
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The optimal size cap is below the smallest board.
    #[error("max_optimal_board_size must be at least {min}, got {value}")]
    OptimalSizeTooSmall { value: usize, min: usize },
    /// A node limit of zero would refuse every search.
    #[error("node_limit must be positive")]
    ZeroNodeLimit,
}

/// Errors raised by [`MinimaxSearch`](crate::search::MinimaxSearch) and
/// [`GameTree`](crate::analysis::GameTree).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Searching a finished game has no meaning.
    #[error("cannot search a terminal board")]
    TerminalBoard,
    /// The player to move is neither of the two players.
    #[error("player with marker '{0}' is not part of this game")]
    UnknownMover(char),
    /// The configured node budget was used up before the search finished.
    #[error("search exceeded the node limit of {limit}")]
    NodeLimitExceeded { limit: u64 },
    /// The board has more empty cells than the analysis is allowed to expand.
    #[error("board has {empty} empty cells, analysis is limited to {limit}")]
    TreeTooLarge { empty: usize, limit: usize },
}

/// Errors raised by [`GameSession`](crate::session::GameSession).
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("board size {size} is below the minimum of {min}")]
    BoardTooSmall { size: usize, min: usize },
    /// An optimal player was asked to play on a board above the configured cap.
    #[error("optimal play is limited to boards up to {limit}x{limit}, got {size}x{size}")]
    OptimalSearchUnavailable { size: usize, limit: usize },
    /// Both players share a name.
    #[error("both players are named {0:?}")]
    DuplicateName(String),
    /// Both players share a marker.
    #[error("both players use the marker '{0}'")]
    DuplicateMarker(char),
    /// The engine configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The search failed, for instance on its node limit.
    #[error(transparent)]
    Search(#[from] SearchError),
}
