use std::env;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::info;

use rook_minimax::engines::engine_trait::Engine;
use rook_minimax::engines::minimax_engine::MinimaxEngine;
use rook_minimax::game_state::chess_types::Color;
use rook_minimax::game_state::game::{Game, GameEvent};
use rook_minimax::game_state::player::Player;
use rook_minimax::utils::logging::init_logging;

fn parse_arg<T: std::str::FromStr>(args: &[String], idx: usize, default: T) -> T {
    args.get(idx)
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}

fn engine(depth: u8, threads: usize) -> Arc<MinimaxEngine> {
    let engine = MinimaxEngine::new();
    engine.set_depth(depth);
    engine.set_thread_count(threads);
    Arc::new(engine)
}

/// Engine-vs-engine self-play: `rook_minimax [depth] [threads] [max_plies]`.
fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let depth: u8 = parse_arg(&args, 1, 2u8);
    let threads: usize = parse_arg(&args, 2, 4usize);
    let max_plies: usize = parse_arg(&args, 3, 40usize);

    let white = engine(depth, threads);
    let black = engine(depth, threads);
    info!(depth, threads, max_plies, engine = white.name(), "self-play starting");

    let mut game = Game::new(
        Player::with_engine(Color::White, white),
        Player::with_engine(Color::Black, black),
    );
    let events = game.subscribe();

    // Print events as they arrive
    thread::spawn(move || {
        for event in events {
            match event {
                GameEvent::EngineMoveSelected(mv) => println!("{mv}"),
                GameEvent::GameCompleted(result) => println!("game over: {result:?}"),
                _ => {}
            }
        }
    });

    game.start_new_game();
    while game.move_history().len() < max_plies && game.result().is_none() {
        if game.poll_engine().is_none() {
            if !game.is_engine_running() {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    println!("{}", game.board());
    println!(
        "plies: {}  result: {:?}",
        game.move_history().len(),
        game.result()
    );
}
