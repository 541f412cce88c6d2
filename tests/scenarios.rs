use tictactoe_minimax::board::{Action, Board};
use tictactoe_minimax::player::{Automation, Player};
use tictactoe_minimax::random::CustomNumberGenerator;
use tictactoe_minimax::rules;
use tictactoe_minimax::search::{MinimaxSearch, OPENING_CORNERS};
use tictactoe_minimax::session::{GameSession, RoundOutcome, SessionState};

fn humans() -> (Player, Player) {
    (
        Player::human("Player 1", 'X').unwrap(),
        Player::human("Player 2", 'O').unwrap(),
    )
}

#[test]
fn centre_and_corner_leave_seven_moves_and_no_winner() {
    let (p1, p2) = humans();
    let mut session = GameSession::new(3, p1, p2).unwrap();

    session.play_round(Action::new(1, 1));
    session.play_round(Action::new(0, 0));

    assert_eq!(session.winner(), None);
    assert_eq!(rules::legal_actions(session.board()).len(), 7);
    assert_eq!(session.active_player().name(), "Player 1");
}

#[test]
fn complete_top_row_wins_for_first_player() {
    let (p1, p2) = humans();
    let board = Board::from_rows(&["XXX", "...", "..."]).unwrap();

    assert_eq!(rules::winner(&board, &p1, &p2), Some(&p1));
    assert!(rules::is_terminal(&board, &p1, &p2));
}

#[test]
fn full_board_without_line_is_terminal_tie() {
    let (p1, p2) = humans();
    let board = Board::from_rows(&["XOX", "OXX", "OXO"]).unwrap();

    assert_eq!(rules::winner(&board, &p1, &p2), None);
    assert!(rules::is_terminal(&board, &p1, &p2));
    assert_eq!(rules::utility(&board, &p1, &p2), rules::DRAW);
}

#[test]
fn opening_book_always_picks_a_corner() {
    let (p1, p2) = humans();
    let board = Board::new(3);
    let report = MinimaxSearch::default()
        .best_actions(&board, &p1, &p1, &p2)
        .unwrap();
    assert!(report.actions.iter().all(|a| OPENING_CORNERS.contains(a)));

    for seed in 0..16 {
        let mut session = GameSession::builder(3, p1.clone(), p2.clone())
            .with_random_generator(CustomNumberGenerator::new(seed))
            .build()
            .unwrap();
        let round = session.play_automated_round(Automation::Optimal).unwrap();
        assert!(OPENING_CORNERS.contains(&round.action.unwrap()));
    }
}

#[test]
fn replaying_an_applied_move_changes_nothing() {
    let (p1, p2) = humans();
    let mut session = GameSession::new(3, p1, p2).unwrap();
    session.play_round(Action::new(2, 1));
    let before = session.board().clone();

    let again = session.play_round(Action::new(2, 1));

    assert!(again.is_rejected());
    assert_eq!(session.board(), &before);
}

#[test]
fn legal_actions_are_always_markable() {
    let (p1, p2) = humans();
    let mut session = GameSession::builder(4, p1.clone(), p2.clone())
        .with_random_generator(CustomNumberGenerator::new(5))
        .build()
        .unwrap();

    while !session.is_terminal() {
        for action in rules::legal_actions(session.board()) {
            let mut probe = session.board().snapshot();
            assert!(probe.mark(action, p1.marker()), "{action} refused");
        }
        session.play_automated_round(Automation::Random).unwrap();
    }

    assert!(matches!(
        session.state(),
        SessionState::Won(_) | SessionState::Tied
    ));
}

#[test]
fn active_player_flips_after_each_legal_round() {
    let (p1, p2) = humans();
    let mut session = GameSession::builder(3, p1, p2)
        .with_random_generator(CustomNumberGenerator::new(21))
        .build()
        .unwrap();

    while !session.is_terminal() {
        let before = session.active_player().clone();
        let round = session.play_automated_round(Automation::Random).unwrap();
        match round.outcome {
            RoundOutcome::NextTurn(next) => {
                assert_ne!(next, before);
                assert_eq!(session.active_player(), &next);
            }
            RoundOutcome::Won(winner) => assert_eq!(winner, before),
            RoundOutcome::Tie => assert!(session.winner().is_none()),
            RoundOutcome::Rejected(reason) => panic!("legal round rejected: {reason}"),
        }
    }
}
