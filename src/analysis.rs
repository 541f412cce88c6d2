use crate::board::{Action, Board};
use crate::error::SearchError;
use crate::player::Player;
use crate::rules::{self, Score};
use ego_tree::{NodeMut, NodeRef, Tree};
use tracing::{debug, instrument};

/// A position in the expanded game tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// The move that led here from the parent, `None` at the root.
    pub action: Option<Action>,
    /// The board after `action`.
    pub board: Board,
    /// Exact minimax value from the first player's view.
    pub value: Score,
    /// Whether the first player is to move in this position.
    pub maximizing: bool,
}

/// The complete game tree below a position, with every node valued.
///
/// Unlike [`MinimaxSearch`](crate::search::MinimaxSearch) nothing is pruned:
/// every reachable position is kept in memory, which makes the tree useful to
/// inspect lines of play and to cross-check the search, but only for boards
/// with few empty cells.
#[derive(Debug, Clone)]
pub struct GameTree {
    tree: Tree<TreeNode>,
}

impl GameTree {
    /// Expands every line of play from `board` with `mover` to play.
    ///
    /// Boards with more than `max_empty_cells` empty cells are refused. A
    /// terminal board yields a tree holding only its root.
    #[instrument(skip_all, fields(mover = %mover.marker(), max_empty_cells = max_empty_cells))]
    pub fn expand(
        board: &Board,
        mover: &Player,
        first: &Player,
        second: &Player,
        max_empty_cells: usize,
    ) -> Result<Self, SearchError> {
        let maximizing = if mover.marker() == first.marker() {
            true
        } else if mover.marker() == second.marker() {
            false
        } else {
            return Err(SearchError::UnknownMover(mover.marker().symbol()));
        };

        let empty = rules::empty_cell_count(board);
        if empty > max_empty_cells {
            return Err(SearchError::TreeTooLarge {
                empty,
                limit: max_empty_cells,
            });
        }

        let mut tree = Tree::new(TreeNode {
            action: None,
            board: board.snapshot(),
            value: rules::DRAW,
            maximizing,
        });
        let value = grow(tree.root_mut(), first, second);
        debug!(value, nodes = tree.nodes().count(), "Game tree expanded");

        Ok(Self { tree })
    }

    /// The underlying tree.
    pub fn tree(&self) -> &Tree<TreeNode> {
        &self.tree
    }

    /// Minimax value of the root position.
    pub fn value(&self) -> Score {
        self.tree.root().value().value
    }

    /// Number of positions in the tree, the root included.
    pub fn node_count(&self) -> usize {
        self.tree.nodes().count()
    }

    /// Every move from the root with the value it leads to, in board order.
    pub fn root_values(&self) -> Vec<(Action, Score)> {
        self.tree
            .root()
            .children()
            .filter_map(|child| {
                let node = child.value();
                node.action.map(|action| (action, node.value))
            })
            .collect()
    }

    /// The root moves that reach the root's value. Empty for terminal roots.
    pub fn best_actions(&self) -> Vec<Action> {
        let value = self.value();
        self.root_values()
            .into_iter()
            .filter(|&(_, v)| v == value)
            .map(|(action, _)| action)
            .collect()
    }

    /// One line of optimal play from the root to the end of the game,
    /// always following the first optimal move in board order.
    pub fn principal_variation(&self) -> Vec<Action> {
        let mut line = Vec::new();
        let mut node = self.tree.root();
        while let Some(next) = best_child(node) {
            if let Some(action) = next.value().action {
                line.push(action);
            }
            node = next;
        }
        line
    }
}

fn best_child(node: NodeRef<'_, TreeNode>) -> Option<NodeRef<'_, TreeNode>> {
    let value = node.value().value;
    node.children().find(|child| child.value().value == value)
}

/// Appends all children of `node`, values them bottom-up and returns the
/// value stored in `node`.
fn grow(mut node: NodeMut<'_, TreeNode>, first: &Player, second: &Player) -> Score {
    let board = node.value().board.clone();
    let maximizing = node.value().maximizing;

    if let Some(utility) = rules::terminal_utility(&board, first, second) {
        node.value().value = utility;
        return utility;
    }

    let marker = if maximizing {
        first.marker()
    } else {
        second.marker()
    };
    let mut best = if maximizing { Score::MIN } else { Score::MAX };
    for action in rules::legal_actions(&board) {
        let mut child = board.snapshot();
        child.mark(action, marker);
        let value = grow(
            node.append(TreeNode {
                action: Some(action),
                board: child,
                value: rules::DRAW,
                maximizing: !maximizing,
            }),
            first,
            second,
        );
        best = if maximizing {
            best.max(value)
        } else {
            best.min(value)
        };
    }

    node.value().value = best;
    best
}
