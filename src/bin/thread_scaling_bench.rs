use rook_minimax::engines::engine_trait::Engine;
use rook_minimax::engines::minimax_engine::{EngineConfig, MinimaxEngine};
use rook_minimax::game_state::board::Board;
use rook_minimax::game_state::chess_types::Color;
use rook_minimax::move_generation::legal_move_generator::legal_moves_for_color;
use rook_minimax::search::threading::ThreadingConfig;
use rook_minimax::utils::logging::init_logging;
use std::env;
use std::time::Instant;

fn parse_arg<T: std::str::FromStr>(args: &[String], idx: usize, default: T) -> T {
    args.get(idx)
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}

/// Start position plus the positions after 1.e4 and 1.e4 e5, Black and White
/// to move respectively.
fn positions() -> Vec<(Board, Color)> {
    let mut out = vec![(Board::standard(), Color::White)];
    let mut board = Board::standard();
    for (color, to) in [(Color::White, (4, 3)), (Color::Black, (4, 4))] {
        let Some(mv) = legal_moves_for_color(&mut board, color)
            .into_iter()
            .find(|m| (m.to.x, m.to.y) == to)
        else {
            break;
        };
        mv.execute(&mut board);
        out.push((board.clone(), color.opposite()));
    }
    out
}

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let max_threads: usize = parse_arg(&args, 1, 8usize);
    let depth: u8 = parse_arg(&args, 2, 2u8);
    let runs_per_thread: usize = parse_arg(&args, 3, 3usize);

    let positions = positions();

    println!(
        "Thread scaling benchmark: max_threads={} depth={} runs_per_thread={}",
        max_threads, depth, runs_per_thread
    );
    println!("threads,total_ms,avg_ms,positions,searched_runs,best_values");

    for threads in 1..=max_threads.max(1) {
        let mut total_ms: u128 = 0;
        let mut searched_runs = 0usize;
        let mut best_values = Vec::new();

        for run in 0..runs_per_thread.max(1) {
            for (board, color) in &positions {
                let engine = MinimaxEngine::with_config(EngineConfig {
                    depth,
                    threading: ThreadingConfig::new(threads),
                    pruning: true,
                    seed: Some(run as u64),
                });

                let start = Instant::now();
                let outcome = engine.select_move(board, *color, &mut |_| {});
                total_ms += start.elapsed().as_millis();
                searched_runs += 1;
                if run == 0 {
                    if let Ok(outcome) = outcome {
                        best_values.push(outcome.best_value.to_string());
                    }
                }
            }
        }

        let avg_ms = if searched_runs == 0 {
            0.0
        } else {
            total_ms as f64 / searched_runs as f64
        };
        println!(
            "{},{},{:.2},{},{},{}",
            threads,
            total_ms,
            avg_ms,
            positions.len(),
            searched_runs,
            best_values.join("/")
        );
    }
}
