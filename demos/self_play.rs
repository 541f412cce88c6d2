use tictactoe_minimax::player::{Marker, Player, PlayerMode};
use tictactoe_minimax::random::StandardRandomGenerator;
use tictactoe_minimax::session::GameSession;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // An optimal player against a random one on the classic board
    let optimal = Player::new("Optimal", Marker::new('X').unwrap(), PlayerMode::AutomatedOptimal);
    let random = Player::new("Random", Marker::new('O').unwrap(), PlayerMode::AutomatedRandom);

    let mut session = GameSession::builder(3, optimal, random)
        .with_random_generator(StandardRandomGenerator)
        .build()
        .unwrap();

    while !session.is_terminal() {
        let round = session.play_turn().unwrap();
        if let Some(report) = &round.report {
            println!(
                "Expected value {} after {} nodes, {} equally good moves",
                report.value,
                report.nodes,
                report.actions.len()
            );
        }
        println!("{}\n{}\n", session.board(), round.outcome);
    }
}
