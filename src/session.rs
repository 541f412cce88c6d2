use crate::board::{Action, Board, MIN_BOARD_SIZE};
use crate::config::EngineConfig;
use crate::error::SessionError;
use crate::player::{Automation, Player, PlayerMode};
use crate::random::{RandomGenerator, StandardRandomGenerator};
use crate::rules::{self, Outcome};
use crate::search::{MinimaxSearch, SearchReport};
use std::fmt;
use tracing::{debug, info, instrument};

/// Where a session stands, derived from its board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState<'a> {
    /// The game goes on and this player moves next.
    AwaitingMove(&'a Player),
    /// The player completed a line.
    Won(&'a Player),
    /// The board filled up without a line.
    Tied,
}

/// Why a round was refused. A refused round leaves the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The coordinate is not on the board.
    OutOfBounds,
    /// Somebody already played there.
    Occupied,
    /// The game has already been won or tied.
    GameOver,
    /// An automated turn was requested while a human is to move.
    HumanToMove,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::OutOfBounds => "cell is outside the board",
            RejectReason::Occupied => "cell is already taken",
            RejectReason::GameOver => "game is over",
            RejectReason::HumanToMove => "a human player is to move",
        };
        f.write_str(text)
    }
}

/// What happened after a round, ready to be shown to the players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The move was applied and this player moves next.
    NextTurn(Player),
    /// The move completed a line for this player.
    Won(Player),
    /// The move filled the board without a line.
    Tie,
    /// Nothing was applied.
    Rejected(RejectReason),
}

impl RoundOutcome {
    /// True when nothing was applied.
    pub fn is_rejected(&self) -> bool {
        matches!(self, RoundOutcome::Rejected(_))
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundOutcome::NextTurn(player) => write!(f, "{}'s turn.", player.name()),
            RoundOutcome::Won(player) => write!(f, "{} wins!", player.name()),
            RoundOutcome::Tie => f.write_str("Tie!"),
            RoundOutcome::Rejected(reason) => write!(f, "Move rejected: {reason}."),
        }
    }
}

/// An automated round: the move the engine picked and its effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomatedRound {
    /// The chosen move, `None` when the round was rejected.
    pub action: Option<Action>,
    /// What the move did to the game.
    pub outcome: RoundOutcome,
    /// The search behind an optimal move.
    pub report: Option<SearchReport>,
}

impl AutomatedRound {
    fn rejected(reason: RejectReason) -> Self {
        Self {
            action: None,
            outcome: RoundOutcome::Rejected(reason),
            report: None,
        }
    }
}

/// A game between two players on one board.
///
/// The board is the only state: whose turn it is and whether the game is
/// over are recomputed from it on every query.
#[derive(Debug)]
pub struct GameSession<K: RandomGenerator = StandardRandomGenerator> {
    board: Board,
    first: Player,
    second: Player,
    config: EngineConfig,
    search: MinimaxSearch,
    random: K,
}

/// A builder for creating instances of `GameSession`.
///
/// `build` is where the setup is validated: board size, distinct names and
/// markers, the engine configuration, and whether optimal players fit on
/// the board.
pub struct GameSessionBuilder<K: RandomGenerator> {
    size: usize,
    first: Player,
    second: Player,
    config: EngineConfig,
    random_generator: K,
}

impl<K: RandomGenerator> GameSessionBuilder<K> {
    /// Replaces the random source used for random moves and tie-breaks.
    pub fn with_random_generator<R: RandomGenerator>(self, rg: R) -> GameSessionBuilder<R> {
        GameSessionBuilder {
            size: self.size,
            first: self.first,
            second: self.second,
            config: self.config,
            random_generator: rg,
        }
    }

    /// Replaces the default engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<GameSession<K>, SessionError> {
        self.config.validate()?;

        if self.size < MIN_BOARD_SIZE {
            return Err(SessionError::BoardTooSmall {
                size: self.size,
                min: MIN_BOARD_SIZE,
            });
        }
        if self.first.name() == self.second.name() {
            return Err(SessionError::DuplicateName(self.first.name().to_string()));
        }
        if self.first.marker() == self.second.marker() {
            return Err(SessionError::DuplicateMarker(self.first.marker().symbol()));
        }
        let wants_optimal = [&self.first, &self.second]
            .iter()
            .any(|p| p.mode() == PlayerMode::AutomatedOptimal);
        if wants_optimal && !self.config.allows_optimal(self.size) {
            return Err(SessionError::OptimalSearchUnavailable {
                size: self.size,
                limit: self.config.max_optimal_board_size,
            });
        }

        info!(
            size = self.size,
            first = %self.first,
            second = %self.second,
            "Creating game session"
        );
        Ok(GameSession {
            board: Board::new(self.size),
            search: MinimaxSearch::from_config(&self.config),
            first: self.first,
            second: self.second,
            config: self.config,
            random: self.random_generator,
        })
    }
}

impl GameSession<StandardRandomGenerator> {
    /// Starts configuring a session on an empty `size`×`size` board.
    /// `first` always moves first.
    pub fn builder(
        size: usize,
        first: Player,
        second: Player,
    ) -> GameSessionBuilder<StandardRandomGenerator> {
        GameSessionBuilder {
            size,
            first,
            second,
            config: EngineConfig::default(),
            random_generator: StandardRandomGenerator,
        }
    }

    /// A session with default configuration and thread-local randomness.
    pub fn new(size: usize, first: Player, second: Player) -> Result<Self, SessionError> {
        Self::builder(size, first, second).build()
    }
}

impl<K: RandomGenerator> GameSession<K> {
    /// The current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player who opened the game.
    pub fn first_player(&self) -> &Player {
        &self.first
    }

    /// The player who moves second.
    pub fn second_player(&self) -> &Player {
        &self.second
    }

    /// The configuration the session was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The player whose turn it is, even once the game is over.
    pub fn active_player(&self) -> &Player {
        rules::active_player(&self.board, &self.first, &self.second)
    }

    /// The player who completed a line, if any.
    pub fn winner(&self) -> Option<&Player> {
        rules::winner(&self.board, &self.first, &self.second)
    }

    /// True once the game has been won or tied.
    pub fn is_terminal(&self) -> bool {
        rules::is_terminal(&self.board, &self.first, &self.second)
    }

    /// The rules' view of the board.
    pub fn outcome(&self) -> Outcome<'_> {
        rules::outcome(&self.board, &self.first, &self.second)
    }

    /// Who moves next, or how the game ended.
    pub fn state(&self) -> SessionState<'_> {
        match self.outcome() {
            Outcome::InProgress => SessionState::AwaitingMove(self.active_player()),
            Outcome::Won(player) => SessionState::Won(player),
            Outcome::Tie => SessionState::Tied,
        }
    }

    /// Plays `action` for the active player.
    ///
    /// Out-of-bounds or occupied cells and finished games are rejected
    /// without touching the board.
    #[instrument(skip(self))]
    pub fn play_round(&mut self, action: Action) -> RoundOutcome {
        if let Err(reason) = self.check(action) {
            debug!(%reason, "Round rejected");
            return RoundOutcome::Rejected(reason);
        }

        let marker = self.active_player().marker();
        info!(%marker, row = action.row, column = action.column, "Marking cell");
        self.board.mark(action, marker);

        match self.outcome() {
            Outcome::Won(player) => {
                info!(winner = player.name(), "Game won");
                RoundOutcome::Won(player.clone())
            }
            Outcome::Tie => {
                info!("Game tied");
                RoundOutcome::Tie
            }
            Outcome::InProgress => RoundOutcome::NextTurn(self.active_player().clone()),
        }
    }

    /// Lets the engine pick a move for the active player and plays it.
    ///
    /// Random mode draws uniformly from the legal moves; optimal mode draws
    /// uniformly from the moves the search reports as tied best. Optimal
    /// mode is refused on boards larger than the configured limit.
    #[instrument(skip(self))]
    pub fn play_automated_round(
        &mut self,
        mode: Automation,
    ) -> Result<AutomatedRound, SessionError> {
        if self.is_terminal() {
            return Ok(AutomatedRound::rejected(RejectReason::GameOver));
        }

        let (choice, report) = match mode {
            Automation::Random => {
                let actions = rules::legal_actions(&self.board);
                (self.random.choose(&actions).copied(), None)
            }
            Automation::Optimal => {
                let size = self.board.size();
                if !self.config.allows_optimal(size) {
                    return Err(SessionError::OptimalSearchUnavailable {
                        size,
                        limit: self.config.max_optimal_board_size,
                    });
                }
                let report = self.search.best_actions(
                    &self.board.snapshot(),
                    self.active_player(),
                    &self.first,
                    &self.second,
                )?;
                (self.random.choose(&report.actions).copied(), Some(report))
            }
        };

        let Some(action) = choice else {
            return Ok(AutomatedRound::rejected(RejectReason::GameOver));
        };
        let outcome = self.play_round(action);
        Ok(AutomatedRound {
            action: Some(action),
            outcome,
            report,
        })
    }

    /// Plays one automated round in the active player's own mode.
    ///
    /// Rejected with [`RejectReason::HumanToMove`] when the active player is
    /// human; their move has to come through [`GameSession::play_round`].
    pub fn play_turn(&mut self) -> Result<AutomatedRound, SessionError> {
        if self.is_terminal() {
            return Ok(AutomatedRound::rejected(RejectReason::GameOver));
        }
        match self.active_player().mode().automation() {
            Some(mode) => self.play_automated_round(mode),
            None => Ok(AutomatedRound::rejected(RejectReason::HumanToMove)),
        }
    }

    fn check(&self, action: Action) -> Result<(), RejectReason> {
        if self.is_terminal() {
            Err(RejectReason::GameOver)
        } else if !self.board.contains(action) {
            Err(RejectReason::OutOfBounds)
        } else if !self.board.is_empty_cell(action) {
            Err(RejectReason::Occupied)
        } else {
            Ok(())
        }
    }
}
