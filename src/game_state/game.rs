//! Game session: board, players, turn state machine, and notifications.
//!
//! Listeners receive `GameEvent`s over channels from `subscribe`. An engine
//! player searches on its own thread and reports back over a private channel;
//! the chosen move is applied here, on the session's own turn path, when the
//! owner calls `poll_engine` or `wait_for_engine`.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use tracing::{debug, info, warn};

use crate::engines::engine_trait::{SearchOutcome, SearchProgress};
use crate::errors::ChessErrors;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Piece, Position};
use crate::game_state::player::{Player, PlayerSlot};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{
    has_legal_move, legal_moves_for_color, legal_moves_for_piece,
};
use crate::move_generation::move_manager::MoveManager;
use crate::moves::chess_move::ChessMove;
use crate::search::zobrist::position_hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// Stalemate.
    Draw,
    Checkmate { winner: Color },
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    TurnCompleted,
    UndoCompleted,
    RedoCompleted,
    GameCompleted(GameResult),
    EngineMoveSelected(ChessMove),
    EngineProgress(SearchProgress),
}

enum EngineEvent {
    Progress(SearchProgress),
    Finished(Result<SearchOutcome, ChessErrors>),
}

pub struct Game {
    board: Board,
    players: [Player; 2],
    active: PlayerSlot,
    move_manager: MoveManager,
    listeners: Vec<Sender<GameEvent>>,
    pending_engine: Option<Receiver<EngineEvent>>,
    result: Option<GameResult>,
}

impl Game {
    /// Standard setup; `first` moves first.
    pub fn new(first: Player, second: Player) -> Self {
        Self::with_board(first, second, Board::standard())
    }

    pub fn with_board(first: Player, second: Player, board: Board) -> Self {
        Self {
            board,
            players: [first, second],
            active: PlayerSlot::First,
            move_manager: MoveManager::new(),
            listeners: Vec::new(),
            pending_engine: None,
            result: None,
        }
    }

    /// Deep copy of board, players, and history. Listeners and any in-flight
    /// engine search stay with the original.
    pub fn copy(&self) -> Self {
        Self {
            board: self.board.clone(),
            players: self.players.clone(),
            active: self.active,
            move_manager: self.move_manager.clone(),
            listeners: Vec::new(),
            pending_engine: None,
            result: self.result,
        }
    }

    /// Resets the board and history and hands the move to the first player,
    /// starting its engine if it has one. A running search is abandoned.
    pub fn start_new_game(&mut self) {
        self.pending_engine = None;
        self.active = PlayerSlot::First;
        self.board.reset();
        self.move_manager.clear();
        self.result = None;
        info!("new game started");
        self.start_engine_turn();
    }

    /// New receiver for this game's events. Dropped receivers are pruned on
    /// the next notification.
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        let (sender, receiver) = mpsc::channel();
        self.listeners.push(sender);
        receiver
    }

    fn notify(&mut self, event: GameEvent) {
        self.listeners
            .retain(|listener| listener.send(event.clone()).is_ok());
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn player(&self, slot: PlayerSlot) -> &Player {
        &self.players[slot.index()]
    }

    #[inline]
    pub fn active_slot(&self) -> PlayerSlot {
        self.active
    }

    #[inline]
    pub fn active_player(&self) -> &Player {
        self.player(self.active)
    }

    #[inline]
    pub fn active_color(&self) -> Color {
        self.active_player().color()
    }

    /// Set once the game ends; cleared by undo and new game.
    #[inline]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Structural hash of (board, side to move).
    pub fn position_hash(&self) -> u64 {
        position_hash(&self.board, self.active_color())
    }

    /// Executes `mv` with history, discarding any redo branch. `mv` must be
    /// legal; nothing is validated here.
    pub fn execute_move(&mut self, mv: ChessMove) {
        self.move_manager.execute_move(&mut self.board, mv);
    }

    pub fn execute_move_with_history(&mut self, mv: ChessMove, record: bool) {
        self.move_manager.execute(&mut self.board, mv, record);
    }

    pub fn undo_move(&mut self, mv: ChessMove, record: bool) {
        self.move_manager.undo(&mut self.board, mv, record);
    }

    pub fn end_turn(&mut self) {
        self.end_turn_with_history(true);
    }

    /// Hands the move to the other player. With `record` unset only the
    /// active slot flips; otherwise listeners hear about it, the game-over
    /// test runs, and an engine player starts searching.
    pub fn end_turn_with_history(&mut self, record: bool) {
        self.active = self.active.other();
        if !record {
            return;
        }

        debug!(to_move = %self.active_color(), "turn completed");
        self.notify(GameEvent::TurnCompleted);

        match self.compute_result() {
            Some(result) => {
                info!(?result, "game completed");
                self.result = Some(result);
                self.notify(GameEvent::GameCompleted(result));
            }
            None => self.start_engine_turn(),
        }
    }

    fn compute_result(&mut self) -> Option<GameResult> {
        let color = self.active_color();
        if has_legal_move(&mut self.board, color) {
            None
        } else if is_king_in_check(&self.board, color) {
            Some(GameResult::Checkmate {
                winner: color.opposite(),
            })
        } else {
            Some(GameResult::Draw)
        }
    }

    pub fn valid_moves_for(&mut self, color: Color) -> Vec<ChessMove> {
        legal_moves_for_color(&mut self.board, color)
    }

    pub fn valid_moves_for_piece(&mut self, piece: &Piece) -> Vec<ChessMove> {
        legal_moves_for_piece(&mut self.board, piece)
    }

    /// True when a legal move of the same piece has the same origin and
    /// destination.
    pub fn is_valid_move(&mut self, mv: &ChessMove) -> bool {
        self.valid_moves_for_piece(&mv.piece)
            .iter()
            .any(|m| m.from == mv.from && m.to == mv.to)
    }

    /// Whether the side to move is in check.
    pub fn is_check(&self) -> bool {
        is_king_in_check(&self.board, self.active_color())
    }

    pub fn is_checkmate(&mut self) -> bool {
        let color = self.active_color();
        self.is_check() && !has_legal_move(&mut self.board, color)
    }

    /// Stalemate; repetition and move-count draws are not tracked.
    pub fn is_draw(&mut self) -> bool {
        let color = self.active_color();
        !self.is_check() && !has_legal_move(&mut self.board, color)
    }

    #[inline]
    pub fn move_history(&self) -> &[ChessMove] {
        self.move_manager.history()
    }

    #[inline]
    pub fn most_recent_move(&self) -> Option<&ChessMove> {
        self.move_manager.most_recent_move()
    }

    #[inline]
    pub fn is_undo_available(&self) -> bool {
        self.move_manager.can_undo()
    }

    #[inline]
    pub fn is_redo_available(&self) -> bool {
        self.move_manager.can_redo()
    }

    /// Takes back one full turn. Refused while an engine is searching.
    pub fn undo(&mut self) -> bool {
        if self.is_engine_running() || !self.move_manager.undo_turn(&mut self.board) {
            return false;
        }
        self.result = None;
        self.notify(GameEvent::UndoCompleted);
        true
    }

    /// Replays one undone turn. Refused while an engine is searching.
    pub fn redo(&mut self) -> bool {
        if self.is_engine_running() || !self.move_manager.redo_turn(&mut self.board) {
            return false;
        }
        self.result = self.compute_result();
        self.notify(GameEvent::RedoCompleted);
        true
    }

    /// Board-interaction entry point: moves the active player's piece on
    /// `from` to `to` and ends the turn.
    pub fn try_move(&mut self, from: Position, to: Position) -> Result<ChessMove, ChessErrors> {
        if self.is_engine_running() {
            return Err(ChessErrors::EngineRunning);
        }
        if self.result.is_some() {
            return Err(ChessErrors::GameOver);
        }
        let piece = *self
            .board
            .piece_at(from)
            .ok_or(ChessErrors::EmptySquare(from))?;
        if piece.color != self.active_color() {
            return Err(ChessErrors::NotYourPiece(from));
        }
        let Some(mv) = self
            .valid_moves_for_piece(&piece)
            .into_iter()
            .find(|m| m.to == to)
        else {
            warn!(%from, %to, "rejected illegal move");
            return Err(ChessErrors::InvalidMove { from, to });
        };

        self.execute_move(mv);
        self.end_turn();
        Ok(mv)
    }

    /// True from the moment an engine turn starts until its move has been
    /// applied by `poll_engine` / `wait_for_engine`.
    #[inline]
    pub fn is_engine_running(&self) -> bool {
        self.pending_engine.is_some()
    }

    fn start_engine_turn(&mut self) {
        let player = self.active_player();
        let Some(engine) = player.engine().cloned() else {
            return;
        };
        let color = player.color();
        let board = self.board.clone();
        let (sender, receiver) = mpsc::channel();

        debug!(%color, engine = engine.name(), "engine turn started");
        thread::spawn(move || {
            let mut report = |progress| {
                // The game may have moved on; nobody is listening then.
                let _ = sender.send(EngineEvent::Progress(progress));
            };
            let result = engine.select_move(&board, color, &mut report);
            let _ = sender.send(EngineEvent::Finished(result));
        });
        self.pending_engine = Some(receiver);
    }

    /// Processes engine messages without blocking. Returns the engine's move
    /// once it has been applied.
    pub fn poll_engine(&mut self) -> Option<ChessMove> {
        loop {
            let event = match self.pending_engine.as_ref()?.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => return self.engine_vanished(),
            };
            if let Some(applied) = self.handle_engine_event(event) {
                return applied;
            }
        }
    }

    /// Blocks until the running engine (if any) has moved. Returns the move.
    pub fn wait_for_engine(&mut self) -> Option<ChessMove> {
        loop {
            let event = match self.pending_engine.as_ref()?.recv() {
                Ok(event) => event,
                Err(_) => return self.engine_vanished(),
            };
            if let Some(applied) = self.handle_engine_event(event) {
                return applied;
            }
        }
    }

    /// `Some(..)` once the search is over (with the applied move, if any).
    fn handle_engine_event(&mut self, event: EngineEvent) -> Option<Option<ChessMove>> {
        match event {
            EngineEvent::Progress(progress) => {
                self.notify(GameEvent::EngineProgress(progress));
                None
            }
            EngineEvent::Finished(Ok(outcome)) => {
                self.pending_engine = None;
                let mv = outcome.best_move;
                self.notify(GameEvent::EngineMoveSelected(mv));
                self.execute_move(mv);
                self.end_turn();
                Some(Some(mv))
            }
            EngineEvent::Finished(Err(err)) => {
                self.pending_engine = None;
                warn!(%err, "engine search failed");
                Some(None)
            }
        }
    }

    fn engine_vanished(&mut self) -> Option<ChessMove> {
        warn!("engine thread ended without a result");
        self.pending_engine = None;
        None
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::engines::minimax_engine::{EngineConfig, MinimaxEngine};
    use crate::game_state::chess_types::PieceKind;
    use crate::search::threading::ThreadingConfig;
    use crate::utils::algebraic::algebraic_to_position;

    fn sq(name: &str) -> Position {
        algebraic_to_position(name).expect("valid square")
    }

    fn humans() -> Game {
        Game::new(Player::human(Color::White), Player::human(Color::Black))
    }

    fn play(game: &mut Game, from: &str, to: &str) -> ChessMove {
        game.try_move(sq(from), sq(to)).expect("legal move")
    }

    fn drain(events: &Receiver<GameEvent>) -> Vec<GameEvent> {
        events.try_iter().collect()
    }

    #[test]
    fn first_player_starts_with_twenty_moves() {
        let mut game = humans();
        assert_eq!(game.active_color(), Color::White);
        assert_eq!(game.valid_moves_for(Color::White).len(), 20);
        assert!(!game.is_check());
        assert!(!game.is_undo_available());
        assert!(game.most_recent_move().is_none());
    }

    #[test]
    fn try_move_executes_and_swaps_turns() {
        let mut game = humans();
        let events = game.subscribe();
        let mv = play(&mut game, "e2", "e4");
        assert_eq!(mv.to_string(), "White pawn moves from e2 to e4");
        assert_eq!(game.active_color(), Color::Black);
        assert_eq!(game.most_recent_move(), Some(&mv));
        assert_eq!(drain(&events), vec![GameEvent::TurnCompleted]);
    }

    #[test]
    fn try_move_rejections() {
        let mut game = humans();
        assert_eq!(
            game.try_move(sq("e4"), sq("e5")),
            Err(ChessErrors::EmptySquare(sq("e4")))
        );
        assert_eq!(
            game.try_move(sq("e7"), sq("e5")),
            Err(ChessErrors::NotYourPiece(sq("e7")))
        );
        assert_eq!(
            game.try_move(sq("e2"), sq("e5")),
            Err(ChessErrors::InvalidMove {
                from: sq("e2"),
                to: sq("e5")
            })
        );
        assert!(game.move_history().is_empty());
    }

    #[test]
    fn is_valid_move_compares_origin_and_destination() {
        let mut game = humans();
        let knight = *game.board().piece_at(sq("g1")).expect("knight");
        let moves = game.valid_moves_for_piece(&knight);
        assert_eq!(moves.len(), 2);
        assert!(game.is_valid_move(&moves[0]));

        let bogus = ChessMove::new(knight, sq("g3"), None);
        assert!(!game.is_valid_move(&bogus));
    }

    #[test]
    fn undo_redo_restore_positions() {
        let mut game = humans();
        let events = game.subscribe();
        let start_hash = game.position_hash();
        play(&mut game, "e2", "e4");
        assert!(!game.is_undo_available());
        play(&mut game, "e7", "e5");
        assert!(game.is_undo_available());
        let turn_hash = game.position_hash();
        let turn_board = game.board().clone();
        drain(&events);

        assert!(game.undo());
        assert_eq!(game.position_hash(), start_hash);
        assert_eq!(game.board(), &Board::standard());
        assert!(game.is_redo_available());
        assert!(!game.is_undo_available());

        assert!(game.redo());
        assert_eq!(game.position_hash(), turn_hash);
        assert_eq!(game.board(), &turn_board);
        assert_eq!(game.move_history().len(), 2);
        assert_eq!(
            drain(&events),
            vec![GameEvent::UndoCompleted, GameEvent::RedoCompleted]
        );
        assert!(!game.redo());
    }

    #[test]
    fn fools_mate_ends_the_game() {
        let mut game = humans();
        let events = game.subscribe();
        play(&mut game, "f2", "f3");
        play(&mut game, "e7", "e5");
        play(&mut game, "g2", "g4");
        play(&mut game, "d8", "h4");

        assert!(game.is_check());
        assert!(game.is_checkmate());
        assert!(!game.is_draw());
        let winner = GameResult::Checkmate {
            winner: Color::Black,
        };
        assert_eq!(game.result(), Some(winner));
        assert_eq!(drain(&events).last(), Some(&GameEvent::GameCompleted(winner)));
        assert_eq!(game.try_move(sq("a2"), sq("a3")), Err(ChessErrors::GameOver));

        assert!(game.undo());
        assert_eq!(game.result(), None);
    }

    #[test]
    fn stalemate_is_a_draw() {
        let pieces = vec![
            Piece::new(PieceKind::King, Color::White, sq("f7")),
            Piece::new(PieceKind::Queen, Color::White, sq("g5")),
            Piece::new(PieceKind::King, Color::Black, sq("h8")),
        ];
        let mut game = Game::with_board(
            Player::human(Color::White),
            Player::human(Color::Black),
            Board::new(8, 8, pieces),
        );
        play(&mut game, "g5", "g6");
        assert_eq!(game.result(), Some(GameResult::Draw));
        assert!(game.is_draw());
        assert!(!game.is_checkmate());
    }

    #[test]
    fn unrecorded_turn_flips_side_only() {
        let mut game = humans();
        let events = game.subscribe();
        let mv = game.valid_moves_for(Color::White)[0];
        game.execute_move_with_history(mv, false);
        game.end_turn_with_history(false);
        assert_eq!(game.active_color(), Color::Black);
        assert!(game.move_history().is_empty());
        assert!(drain(&events).is_empty());

        game.undo_move(mv, false);
        game.end_turn_with_history(false);
        assert_eq!(game.board(), &Board::standard());
    }

    #[test]
    fn copy_is_independent() {
        let mut game = humans();
        play(&mut game, "d2", "d4");
        let mut copy = game.copy();
        assert_eq!(copy.position_hash(), game.position_hash());
        play(&mut copy, "d7", "d5");
        assert_ne!(copy.position_hash(), game.position_hash());
        assert_eq!(game.move_history().len(), 1);
    }

    #[test]
    fn engine_reply_is_applied_on_the_session_path() {
        let engine = Arc::new(MinimaxEngine::with_config(EngineConfig {
            depth: 1,
            threading: ThreadingConfig::new(2),
            pruning: true,
            seed: Some(3),
        }));
        let mut game = Game::new(
            Player::human(Color::White),
            Player::with_engine(Color::Black, engine),
        );
        let events = game.subscribe();

        play(&mut game, "e2", "e4");
        assert!(game.is_engine_running());
        assert_eq!(game.try_move(sq("d2"), sq("d4")), Err(ChessErrors::EngineRunning));
        assert!(!game.undo());

        let reply = game.wait_for_engine().expect("engine moves");
        assert_eq!(reply.piece.color, Color::Black);
        assert!(!game.is_engine_running());
        assert_eq!(game.active_color(), Color::White);
        assert_eq!(game.move_history().len(), 2);

        let events = drain(&events);
        assert!(events.contains(&GameEvent::EngineMoveSelected(reply)));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::EngineProgress(p) if p.fraction == 1.0)));
        assert_eq!(events.last(), Some(&GameEvent::TurnCompleted));
    }

    #[test]
    fn new_game_resets_and_starts_engine_first_player() {
        let engine = Arc::new(MinimaxEngine::with_config(EngineConfig {
            depth: 1,
            threading: ThreadingConfig::new(1),
            pruning: true,
            seed: Some(5),
        }));
        let mut game = Game::new(
            Player::with_engine(Color::White, engine),
            Player::human(Color::Black),
        );
        game.start_new_game();
        assert!(game.is_engine_running());
        let opening = game.wait_for_engine().expect("engine opens");
        assert_eq!(opening.piece.color, Color::White);
        assert_eq!(game.active_color(), Color::Black);

        game.start_new_game();
        game.wait_for_engine();
        game.start_new_game();
        assert!(game.is_engine_running());
        assert_eq!(game.board(), &Board::standard());
        assert!(game.move_history().is_empty());
    }
}
