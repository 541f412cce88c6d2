use crate::board::{Action, Board};
use crate::config::EngineConfig;
use crate::error::SearchError;
use crate::player::{Marker, Player};
use crate::rules::{self, DRAW, Score};
use tracing::{debug, instrument, trace};

/// The corner cells of the 3×3 board, all equally strong first moves.
pub const OPENING_CORNERS: [Action; 4] = [
    Action::new(0, 0),
    Action::new(0, 2),
    Action::new(2, 0),
    Action::new(2, 2),
];

/// The result of a search: every move that reaches the optimal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    /// Equally good moves in board order. Never empty.
    pub actions: Vec<Action>,
    /// Minimax value of those moves from the first player's view.
    pub value: Score,
    /// Positions visited, zero when the opening book answered.
    pub nodes: u64,
    /// True when the answer came from the opening book.
    pub from_book: bool,
}

/// Exact minimax search over the whole remaining game tree.
///
/// The first player maximizes [`rules::utility`], the second minimizes it.
/// Alpha-beta pruning skips subtrees that cannot change a result and is on
/// by default; switching it off gives the same values and action sets,
/// only slower.
#[derive(Debug, Clone)]
pub struct MinimaxSearch {
    use_alpha_beta_pruning: bool,
    use_opening_book: bool,
    node_limit: Option<u64>,
}

impl Default for MinimaxSearch {
    fn default() -> Self {
        MinimaxSearchBuilder::new().build()
    }
}

/// A builder for creating instances of `MinimaxSearch`.
#[derive(Debug, Clone)]
pub struct MinimaxSearchBuilder {
    use_alpha_beta_pruning: bool,
    use_opening_book: bool,
    node_limit: Option<u64>,
}

impl Default for MinimaxSearchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MinimaxSearchBuilder {
    /// Pruning and the opening book on, no node limit.
    pub fn new() -> Self {
        Self {
            use_alpha_beta_pruning: true,
            use_opening_book: true,
            node_limit: None,
        }
    }

    /// Enables or disables alpha-beta pruning.
    pub fn with_alpha_beta_pruning(mut self, use_abp: bool) -> Self {
        self.use_alpha_beta_pruning = use_abp;
        self
    }

    /// Enables or disables the corner opening on the empty 3×3 board.
    pub fn with_opening_book(mut self, use_book: bool) -> Self {
        self.use_opening_book = use_book;
        self
    }

    /// Caps the number of positions a single search may visit.
    pub fn with_node_limit(mut self, limit: Option<u64>) -> Self {
        self.node_limit = limit;
        self
    }

    /// Creates the configured `MinimaxSearch`.
    pub fn build(self) -> MinimaxSearch {
        MinimaxSearch {
            use_alpha_beta_pruning: self.use_alpha_beta_pruning,
            use_opening_book: self.use_opening_book,
            node_limit: self.node_limit,
        }
    }
}

impl MinimaxSearch {
    /// Returns a new builder for `MinimaxSearch`.
    pub fn builder() -> MinimaxSearchBuilder {
        MinimaxSearchBuilder::new()
    }

    /// Configures a search from the engine settings.
    pub fn from_config(config: &EngineConfig) -> Self {
        MinimaxSearchBuilder::new()
            .with_alpha_beta_pruning(config.alpha_beta_pruning)
            .with_opening_book(config.opening_book)
            .with_node_limit(config.node_limit)
            .build()
    }

    /// Finds every move for `mover` that achieves the minimax value of `board`.
    ///
    /// Each root move is evaluated with a full window so that equal values are
    /// exact and ties can be collected; pruning only happens below the root.
    /// The caller picks among the returned moves.
    #[instrument(skip_all, fields(mover = %mover.marker(), size = board.size()))]
    pub fn best_actions(
        &self,
        board: &Board,
        mover: &Player,
        first: &Player,
        second: &Player,
    ) -> Result<SearchReport, SearchError> {
        let maximizing = if mover.marker() == first.marker() {
            true
        } else if mover.marker() == second.marker() {
            false
        } else {
            return Err(SearchError::UnknownMover(mover.marker().symbol()));
        };

        if rules::is_terminal(board, first, second) {
            return Err(SearchError::TerminalBoard);
        }

        if self.use_opening_book && is_opening_position(board) {
            debug!("Answering from the opening book");
            return Ok(SearchReport {
                actions: OPENING_CORNERS.to_vec(),
                value: DRAW,
                nodes: 0,
                from_book: true,
            });
        }

        let mut walk = Walk {
            first,
            second,
            prune: self.use_alpha_beta_pruning,
            node_limit: self.node_limit,
            nodes: 0,
        };
        let marker = if maximizing {
            first.marker()
        } else {
            second.marker()
        };

        let mut best_value = if maximizing { Score::MIN } else { Score::MAX };
        let mut best = Vec::new();
        for action in rules::legal_actions(board) {
            let child = child_board(board, action, marker);
            let value = if maximizing {
                walk.min_value(&child, Score::MIN, Score::MAX)?
            } else {
                walk.max_value(&child, Score::MIN, Score::MAX)?
            };
            trace!(%action, value, "Root move evaluated");

            let improves = if maximizing {
                value > best_value
            } else {
                value < best_value
            };
            if improves {
                best_value = value;
                best.clear();
                best.push(action);
            } else if value == best_value {
                best.push(action);
            }
        }

        debug!(
            value = best_value,
            nodes = walk.nodes,
            ties = best.len(),
            "Search finished"
        );
        Ok(SearchReport {
            actions: best,
            value: best_value,
            nodes: walk.nodes,
            from_book: false,
        })
    }
}

/// The empty standard board, where the opening book applies.
fn is_opening_position(board: &Board) -> bool {
    board.size() == 3 && rules::empty_cell_count(board) == board.cell_count()
}

fn child_board(board: &Board, action: Action, marker: Marker) -> Board {
    let mut child = board.snapshot();
    child.mark(action, marker);
    child
}

/// State of one search: the players, pruning switch and node accounting.
struct Walk<'a> {
    first: &'a Player,
    second: &'a Player,
    prune: bool,
    node_limit: Option<u64>,
    nodes: u64,
}

impl Walk<'_> {
    fn visit(&mut self, board: &Board) -> Result<Option<Score>, SearchError> {
        self.nodes += 1;
        if let Some(limit) = self.node_limit
            && self.nodes > limit
        {
            return Err(SearchError::NodeLimitExceeded { limit });
        }

        Ok(rules::terminal_utility(board, self.first, self.second))
    }

    /// Value of `board` with the first player to move.
    fn max_value(
        &mut self,
        board: &Board,
        mut alpha: Score,
        beta: Score,
    ) -> Result<Score, SearchError> {
        if let Some(utility) = self.visit(board)? {
            return Ok(utility);
        }

        let mut best = Score::MIN;
        for action in rules::legal_actions(board) {
            let child = child_board(board, action, self.first.marker());
            best = best.max(self.min_value(&child, alpha, beta)?);
            alpha = alpha.max(best);
            if self.prune && alpha >= beta {
                break;
            }
        }
        Ok(best)
    }

    /// Value of `board` with the second player to move.
    fn min_value(
        &mut self,
        board: &Board,
        alpha: Score,
        mut beta: Score,
    ) -> Result<Score, SearchError> {
        if let Some(utility) = self.visit(board)? {
            return Ok(utility);
        }

        let mut best = Score::MAX;
        for action in rules::legal_actions(board) {
            let child = child_board(board, action, self.second.marker());
            best = best.min(self.max_value(&child, alpha, beta)?);
            beta = beta.min(best);
            if self.prune && alpha >= beta {
                break;
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerMode;
    use crate::rules::WIN;

    fn players() -> (Player, Player) {
        (
            Player::new("Player 1", Marker::new('X').unwrap(), PlayerMode::AutomatedOptimal),
            Player::new("Player 2", Marker::new('O').unwrap(), PlayerMode::AutomatedOptimal),
        )
    }

    fn unpruned() -> MinimaxSearch {
        MinimaxSearch::builder()
            .with_alpha_beta_pruning(false)
            .with_opening_book(false)
            .build()
    }

    #[test]
    fn opening_book_answers_with_corners() {
        // arrange
        let (p1, p2) = players();
        let search = MinimaxSearch::default();

        // act
        let report = search.best_actions(&Board::new(3), &p1, &p1, &p2).unwrap();

        // assert
        assert!(report.from_book);
        assert_eq!(report.nodes, 0);
        assert_eq!(report.value, DRAW);
        assert_eq!(report.actions, OPENING_CORNERS.to_vec());
    }

    #[test]
    fn every_opening_move_draws_without_book() {
        let (p1, p2) = players();
        let search = MinimaxSearch::builder().with_opening_book(false).build();

        let report = search.best_actions(&Board::new(3), &p1, &p1, &p2).unwrap();

        assert!(!report.from_book);
        assert_eq!(report.value, DRAW);
        assert_eq!(report.actions, rules::legal_actions(&Board::new(3)));
    }

    #[test]
    fn takes_the_immediate_win() {
        let (p1, p2) = players();
        let board = Board::from_rows(&["XX.", "OO.", "X.O"]).unwrap();

        let report = MinimaxSearch::default()
            .best_actions(&board, &p1, &p1, &p2)
            .unwrap();

        assert_eq!(report.actions, vec![Action::new(0, 2)]);
        assert_eq!(report.value, WIN);
    }

    #[test]
    fn second_player_blocks_the_threat() {
        let (p1, p2) = players();
        let board = Board::from_rows(&["X..", "X..", "..O"]).unwrap();

        let report = MinimaxSearch::default()
            .best_actions(&board, &p2, &p1, &p2)
            .unwrap();

        assert_eq!(report.actions, vec![Action::new(2, 0)]);
        assert!(report.value < WIN);
    }

    #[test]
    fn pruning_agrees_with_plain_minimax() {
        let (p1, p2) = players();
        let boards = [
            (Board::from_rows(&["X..", "...", "..."]).unwrap(), &p2),
            (Board::from_rows(&["X..", ".O.", "..."]).unwrap(), &p1),
            (Board::from_rows(&["XO.", ".X.", "..."]).unwrap(), &p2),
            (Board::from_rows(&[".X.", "XO.", "..O"]).unwrap(), &p1),
        ];
        let pruned = MinimaxSearch::builder().with_opening_book(false).build();

        for (board, mover) in &boards {
            let fast = pruned.best_actions(board, mover, &p1, &p2).unwrap();
            let slow = unpruned().best_actions(board, mover, &p1, &p2).unwrap();
            assert_eq!(fast.value, slow.value, "value differs on\n{board}");
            assert_eq!(fast.actions, slow.actions, "actions differ on\n{board}");
            assert!(fast.nodes <= slow.nodes);
        }
    }

    #[test]
    fn pruning_visits_fewer_nodes() {
        let (p1, p2) = players();
        let board = Board::from_rows(&["X..", "...", "..."]).unwrap();
        let pruned = MinimaxSearch::default()
            .best_actions(&board, &p2, &p1, &p2)
            .unwrap();
        let plain = unpruned().best_actions(&board, &p2, &p1, &p2).unwrap();
        assert!(pruned.nodes < plain.nodes);
    }

    #[test]
    fn terminal_board_is_rejected() {
        let (p1, p2) = players();
        let won = Board::from_rows(&["XXX", "OO.", "..."]).unwrap();
        let full = Board::from_rows(&["XOX", "XOO", "OXX"]).unwrap();
        let search = MinimaxSearch::default();
        assert_eq!(
            search.best_actions(&won, &p2, &p1, &p2),
            Err(SearchError::TerminalBoard)
        );
        assert_eq!(
            search.best_actions(&full, &p1, &p1, &p2),
            Err(SearchError::TerminalBoard)
        );
    }

    #[test]
    fn unknown_mover_is_rejected() {
        let (p1, p2) = players();
        let stranger = Player::human("Stranger", 'Z').unwrap();
        let result = MinimaxSearch::default().best_actions(&Board::new(3), &stranger, &p1, &p2);
        assert_eq!(result, Err(SearchError::UnknownMover('Z')));
    }

    #[test]
    fn node_limit_stops_the_search() {
        let (p1, p2) = players();
        let search = MinimaxSearch::builder()
            .with_opening_book(false)
            .with_node_limit(Some(10))
            .build();
        let result = search.best_actions(&Board::new(3), &p1, &p1, &p2);
        assert_eq!(result, Err(SearchError::NodeLimitExceeded { limit: 10 }));
    }

    #[test]
    fn search_leaves_the_board_untouched() {
        let (p1, p2) = players();
        let board = Board::from_rows(&["X..", ".O.", "..."]).unwrap();
        let before = board.clone();
        MinimaxSearch::default()
            .best_actions(&board, &p1, &p1, &p2)
            .unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn opening_book_is_scoped_to_three_by_three() {
        let (p1, p2) = players();
        let board = Board::from_rows(&["XO..", "OX..", "XO..", "OX.."]).unwrap();
        let report = MinimaxSearch::default()
            .best_actions(&board, &p1, &p1, &p2)
            .unwrap();
        assert!(!report.from_book);
        assert!(report.nodes > 0);
    }
}
