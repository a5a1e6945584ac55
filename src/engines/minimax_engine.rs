//! Parallel root-split minimax engine.
//!
//! Every legal root move becomes one pool task with its own board copy. The
//! tasks of one search share a `PositionCache` that lives only as long as that
//! search. The best move is the first one seen, in completion order, with the
//! highest value.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::engines::engine_trait::{Engine, SearchOutcome, SearchProgress};
use crate::errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::move_generation::legal_move_generator::legal_moves_for_color;
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::{BoardScorer, PositionalScorer, Score, MAX_SCORE, MIN_SCORE};
use crate::search::minimax::MinimaxSearch;
use crate::search::position_cache::PositionCache;
use crate::search::threading::{run_in_completion_order, ThreadingConfig};

pub const DEFAULT_DEPTH: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Plies searched after each root move.
    pub depth: u8,
    pub threading: ThreadingConfig,
    pub pruning: bool,
    /// Fixed shuffle seed; `None` shuffles differently on every search.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            threading: ThreadingConfig::default(),
            pruning: true,
            seed: None,
        }
    }
}

struct CandidateResult {
    value: Score,
    moves_evaluated: u64,
    cache_hits: u64,
}

pub struct MinimaxEngine {
    config: Mutex<EngineConfig>,
    active_searches: AtomicUsize,
    scorer: Box<dyn BoardScorer>,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_scorer(config, Box::new(PositionalScorer))
    }

    pub fn with_scorer(config: EngineConfig, scorer: Box<dyn BoardScorer>) -> Self {
        Self {
            config: Mutex::new(config),
            active_searches: AtomicUsize::new(0),
            scorer,
        }
    }

    pub fn config(&self) -> EngineConfig {
        *self.config.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update_config(&self, update: impl FnOnce(&mut EngineConfig)) {
        let mut guard = self.config.lock().unwrap_or_else(PoisonError::into_inner);
        update(&mut guard);
    }

    pub fn set_depth(&self, depth: u8) {
        self.update_config(|cfg| cfg.depth = depth);
    }

    pub fn set_thread_count(&self, threads: usize) {
        self.update_config(|cfg| cfg.threading = ThreadingConfig::new(threads));
    }

    pub fn set_pruning(&self, pruning: bool) {
        self.update_config(|cfg| cfg.pruning = pruning);
    }

    pub fn set_seed(&self, seed: Option<u64>) {
        self.update_config(|cfg| cfg.seed = seed);
    }

    fn evaluate_candidate(
        &self,
        board: &Board,
        color: Color,
        mv: &ChessMove,
        cache: &PositionCache,
        config: EngineConfig,
    ) -> CandidateResult {
        let mut board = board.clone();
        mv.execute(&mut board);
        let mut search = MinimaxSearch::new(
            board,
            color,
            self.scorer.as_ref(),
            cache,
            config.pruning,
        );
        let value = search.minimax(config.depth, false, MIN_SCORE, MAX_SCORE);
        CandidateResult {
            value,
            moves_evaluated: search.moves_evaluated(),
            cache_hits: search.cache_hits(),
        }
    }

    fn search(
        &self,
        board: &Board,
        color: Color,
        config: EngineConfig,
        progress: &mut dyn FnMut(SearchProgress),
    ) -> Result<SearchOutcome, ChessErrors> {
        let mut root = board.clone();
        let mut candidates = legal_moves_for_color(&mut root, color);
        if candidates.is_empty() {
            return Err(ChessErrors::NoLegalMoves);
        }
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        candidates.shuffle(&mut StdRng::seed_from_u64(seed));

        let cache = PositionCache::new();
        let total = candidates.len();
        let mut completed = 0usize;
        let mut moves_evaluated = 0u64;
        let mut cache_hits = 0u64;
        let mut failed_candidates = 0usize;
        let mut last_failure = String::new();
        let mut best: Option<(ChessMove, Score)> = None;

        debug!(
            %color,
            candidates = total,
            depth = config.depth,
            threads = config.threading.workers_for(total),
            "root search started"
        );

        run_in_completion_order(
            &candidates,
            config.threading,
            |mv| self.evaluate_candidate(&root, color, mv, &cache, config),
            |done| {
                completed += 1;
                let mv = candidates[done.index];
                match done.result {
                    Ok(result) => {
                        moves_evaluated += result.moves_evaluated;
                        cache_hits += result.cache_hits;
                        debug!(%mv, value = result.value, "candidate evaluated");
                        if best.map_or(true, |(_, value)| result.value > value) {
                            best = Some((mv, result.value));
                        }
                    }
                    Err(message) => {
                        failed_candidates += 1;
                        warn!(%mv, %message, "candidate evaluation failed; excluded");
                        last_failure = message;
                    }
                }
                progress(SearchProgress {
                    fraction: completed as f64 / total as f64,
                    moves_evaluated,
                    cache_hits,
                });
            },
        );

        let cache_stats = cache.stats();
        debug!(
            entries = cache.len(),
            hits = cache_stats.hits,
            probes = cache_stats.probes,
            "root search finished"
        );

        let (best_move, best_value) = best.ok_or(ChessErrors::SearchFailed(last_failure))?;
        Ok(SearchOutcome {
            best_move,
            best_value,
            moves_evaluated,
            cache_hits,
            failed_candidates,
        })
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts one search as active until it ends, however it ends.
struct SearchGuard<'a> {
    engine: &'a MinimaxEngine,
}

impl<'a> SearchGuard<'a> {
    fn enter(engine: &'a MinimaxEngine) -> Self {
        engine.active_searches.fetch_add(1, Ordering::AcqRel);
        Self { engine }
    }
}

impl Drop for SearchGuard<'_> {
    fn drop(&mut self) {
        self.engine.active_searches.fetch_sub(1, Ordering::AcqRel);
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "Minimax"
    }

    fn set_option(&self, name: &str, value: &str) -> Result<(), ChessErrors> {
        let invalid = || ChessErrors::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        };
        match name.trim().to_ascii_lowercase().as_str() {
            "depth" => self.set_depth(value.trim().parse().map_err(|_| invalid())?),
            "threads" => self.set_thread_count(value.trim().parse().map_err(|_| invalid())?),
            "pruning" => self.set_pruning(value.trim().parse().map_err(|_| invalid())?),
            "seed" => {
                let seed = match value.trim() {
                    "" | "none" => None,
                    text => Some(text.parse().map_err(|_| invalid())?),
                };
                self.set_seed(seed);
            }
            _ => return Err(invalid()),
        }
        Ok(())
    }

    fn select_move(
        &self,
        board: &Board,
        color: Color,
        progress: &mut dyn FnMut(SearchProgress),
    ) -> Result<SearchOutcome, ChessErrors> {
        let config = self.config();
        let _guard = SearchGuard::enter(self);

        let outcome = self.search(board, color, config, progress)?;
        info!(
            best = %outcome.best_move,
            value = outcome.best_value,
            moves = outcome.moves_evaluated,
            cache_hits = outcome.cache_hits,
            "engine selected move"
        );
        Ok(outcome)
    }

    fn is_running(&self) -> bool {
        self.active_searches.load(Ordering::Acquire) > 0
    }
}
