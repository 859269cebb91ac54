//! # Application State and Core Components
//!
//! Defines the data structures that manage the application's state: the
//! menu/game mode machine, the drop animation, the AI worker thread, and the
//! communication channels between the UI loop and the search engine.

use puissance4::game_controller::{GameController, MoveResult};
use puissance4::games::connect4::{Connect4Move, Connect4State, RED, YELLOW};
use puissance4::{Minimax, SearchStatistics};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use ratatui::widgets::ListState;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Standard board dimensions.
pub const BOARD_WIDTH: usize = 7;
pub const BOARD_HEIGHT: usize = 6;
pub const LINE_SIZE: usize = 4;

/// Entries of the main menu, in display order.
pub const MENU_ITEMS: [&str; 3] = ["1 Player", "2 Players", "Quit"];

/// Messages sent to the AI worker thread.
///
/// Each search carries an id so responses for positions that no longer exist
/// (the game was restarted mid-search) can be discarded.
#[derive(Debug)]
pub enum AiRequest {
    Search(Connect4State, u64),
    Stop,
}

/// Messages received from the AI worker thread.
#[derive(Debug)]
pub enum AiResponse {
    Move(Connect4Move, SearchStatistics<Connect4Move>, u64),
}

/// The AI worker that runs in a separate thread.
///
/// Owns the [`Minimax`] engine and serves search requests over channels so
/// the UI never blocks on the search.
pub struct AiWorker {
    handle: Option<JoinHandle<()>>,
    tx_req: Sender<AiRequest>,
    rx_resp: Receiver<AiResponse>,
    stop_flag: Arc<AtomicBool>,
}

impl AiWorker {
    pub fn new(depth: u32, num_threads: usize, seed: Option<u64>) -> Self {
        let (tx_req, rx_req) = mpsc::channel::<AiRequest>();
        let (tx_resp, rx_resp) = mpsc::channel();
        let stop_flag = Arc::new(AtomicBool::new(false));
        let stop_flag_clone = stop_flag.clone();

        let handle = thread::spawn(move || {
            let engine = Minimax::new(depth, num_threads, seed);

            for request in rx_req {
                match request {
                    AiRequest::Search(state, id) => {
                        if stop_flag_clone.load(Ordering::Relaxed) {
                            break;
                        }
                        let (best_move, stats) =
                            engine.search_with_stop(&state, Some(&stop_flag_clone));
                        if !stop_flag_clone.load(Ordering::Relaxed) {
                            // Ignore send errors if the receiver is gone.
                            tx_resp.send(AiResponse::Move(best_move, stats, id)).ok();
                        }
                    }
                    AiRequest::Stop => break,
                }
            }
        });

        Self {
            handle: Some(handle),
            tx_req,
            rx_resp,
            stop_flag,
        }
    }

    pub fn start_search(&self, state: Connect4State, id: u64) {
        self.tx_req.send(AiRequest::Search(state, id)).ok();
    }

    pub fn try_recv(&self) -> Option<AiResponse> {
        self.rx_resp.try_recv().ok()
    }

    /// Explicitly stop the AI worker.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        self.tx_req.send(AiRequest::Stop).ok();
    }
}

impl Drop for AiWorker {
    fn drop(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        self.tx_req.send(AiRequest::Stop).ok();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Type of player (human or AI).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerType {
    Human,
    Ai,
}

/// Current screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Menu,
    InGame,
    GameOver,
}

/// A piece mid-drop. The move is only applied to the controller once the
/// piece reaches its target row.
#[derive(Debug, Clone, Copy)]
pub struct FallingPiece {
    pub mv: Connect4Move,
    pub player: i32,
    pub row: usize,
    pub target_row: usize,
}

/// Runtime configuration handed down from the command line.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub depth: u32,
    pub num_threads: usize,
    pub ai_delay_ms: (u64, u64),
    pub seed: Option<u64>,
}

/// The main application state.
pub struct App {
    pub should_quit: bool,
    pub mode: AppMode,
    pub menu_state: ListState,
    pub controller: GameController,
    /// (player_id, type) for both sides.
    pub player_options: Vec<(i32, PlayerType)>,
    pub ai_worker: AiWorker,
    pub last_search_stats: Option<SearchStatistics<Connect4Move>>,
    pub falling: Option<FallingPiece>,
    /// Column currently under the cursor; the preview piece hovers here.
    pub hover_col: usize,
    /// When the scheduled AI move becomes due.
    ai_move_due: Option<Instant>,
    /// Set while a search is in flight.
    pub ai_thinking_since: Option<Instant>,
    search_id: u64,
    rng: Xoshiro256PlusPlus,
    ai_delay_ms: (u64, u64),
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let mut menu_state = ListState::default();
        menu_state.select(Some(0));

        let rng = match config.seed {
            Some(s) => Xoshiro256PlusPlus::seed_from_u64(s),
            None => Xoshiro256PlusPlus::from_entropy(),
        };

        Self {
            should_quit: false,
            mode: AppMode::Menu,
            menu_state,
            controller: GameController::new(Connect4State::new(
                BOARD_WIDTH,
                BOARD_HEIGHT,
                LINE_SIZE,
            )),
            player_options: vec![(RED, PlayerType::Human), (YELLOW, PlayerType::Human)],
            ai_worker: AiWorker::new(config.depth, config.num_threads, config.seed),
            last_search_stats: None,
            falling: None,
            hover_col: BOARD_WIDTH / 2,
            ai_move_due: None,
            ai_thinking_since: None,
            search_id: 0,
            rng,
            ai_delay_ms: config.ai_delay_ms,
        }
    }

    /// One tick of the application: advances the drop animation and drives
    /// the AI turn sequence. Called once per UI frame.
    pub fn update(&mut self) {
        if self.mode != AppMode::InGame {
            return;
        }

        // A falling piece owns the turn until it lands.
        if let Some(piece) = self.falling {
            if piece.row < piece.target_row {
                self.falling = Some(FallingPiece {
                    row: piece.row + 1,
                    ..piece
                });
                return;
            }
            self.falling = None;
            if let MoveResult::Success { game_over, .. } = self.controller.try_make_move(piece.mv)
            {
                if game_over {
                    self.mode = AppMode::GameOver;
                } else if self.is_current_player_ai() {
                    self.schedule_ai_move();
                }
            }
            return;
        }

        if !self.is_current_player_ai() {
            return;
        }

        // Waiting for the engine.
        if self.ai_thinking_since.is_some() {
            if let Some(AiResponse::Move(mv, stats, id)) = self.ai_worker.try_recv() {
                if id != self.search_id {
                    return; // Response to a position that was restarted away.
                }
                self.ai_thinking_since = None;
                self.last_search_stats = Some(stats);
                self.spawn_falling(mv);
            }
            return;
        }

        // Waiting out the think delay, or starting one.
        match self.ai_move_due {
            None => self.schedule_ai_move(),
            Some(due) if Instant::now() >= due => {
                self.ai_move_due = None;
                self.ai_thinking_since = Some(Instant::now());
                self.ai_worker
                    .start_search(self.controller.get_state_for_search(), self.search_id);
            }
            Some(_) => {}
        }
    }

    // --- Menu -----------------------------------------------------------

    pub fn select_next_menu_item(&mut self) {
        let i = self.menu_state.selected().map_or(0, |i| (i + 1) % MENU_ITEMS.len());
        self.menu_state.select(Some(i));
    }

    pub fn select_prev_menu_item(&mut self) {
        let i = self
            .menu_state
            .selected()
            .map_or(0, |i| (i + MENU_ITEMS.len() - 1) % MENU_ITEMS.len());
        self.menu_state.select(Some(i));
    }

    /// Activates the selected menu entry.
    pub fn confirm_menu_item(&mut self) {
        match self.menu_state.selected() {
            Some(0) => self.start_game(true),
            Some(1) => self.start_game(false),
            Some(2) => self.should_quit = true,
            _ => {}
        }
    }

    /// Starts a fresh game; in single-player mode Yellow is the AI.
    pub fn start_game(&mut self, single_player: bool) {
        self.player_options = vec![
            (RED, PlayerType::Human),
            (
                YELLOW,
                if single_player {
                    PlayerType::Ai
                } else {
                    PlayerType::Human
                },
            ),
        ];
        self.restart_game();
    }

    /// Resets the board with a random starting player, keeping the player
    /// configuration. Bound to 'r' in game.
    pub fn restart_game(&mut self) {
        let starting = if self.rng.gen_bool(0.5) { RED } else { YELLOW };
        self.controller.reset(
            Connect4State::new(BOARD_WIDTH, BOARD_HEIGHT, LINE_SIZE).with_to_move(starting),
        );
        self.falling = None;
        self.ai_move_due = None;
        self.ai_thinking_since = None;
        self.last_search_stats = None;
        self.hover_col = BOARD_WIDTH / 2;
        self.search_id += 1;
        self.mode = AppMode::InGame;
    }

    /// Leaves the game and returns to the main menu.
    pub fn back_to_menu(&mut self) {
        self.falling = None;
        self.ai_move_due = None;
        self.ai_thinking_since = None;
        self.search_id += 1;
        self.mode = AppMode::Menu;
    }

    // --- Gameplay ---------------------------------------------------------

    pub fn player_type_of(&self, player_id: i32) -> PlayerType {
        self.player_options
            .iter()
            .find(|(id, _)| *id == player_id)
            .map(|(_, t)| *t)
            .unwrap_or(PlayerType::Human)
    }

    pub fn is_current_player_ai(&self) -> bool {
        self.player_type_of(self.controller.get_current_player()) == PlayerType::Ai
    }

    /// True when column input should be accepted: a human to move, nothing
    /// falling, game running.
    pub fn accepts_human_move(&self) -> bool {
        self.mode == AppMode::InGame
            && self.falling.is_none()
            && !self.controller.is_game_over()
            && !self.is_current_player_ai()
    }

    /// Handles a human drop request in `col`. Full columns and out-of-turn
    /// input are ignored silently.
    pub fn try_drop(&mut self, col: usize) {
        if !self.accepts_human_move() {
            return;
        }
        let mv = Connect4Move(col);
        if self.controller.validate_move(&mv).is_ok() {
            self.spawn_falling(mv);
        }
    }

    fn spawn_falling(&mut self, mv: Connect4Move) {
        if let Some(target_row) = self.controller.get_render_state().next_open_row(mv.0) {
            self.falling = Some(FallingPiece {
                mv,
                player: self.controller.get_current_player(),
                row: 0,
                target_row,
            });
        }
    }

    fn schedule_ai_move(&mut self) {
        let (min, max) = self.ai_delay_ms;
        let delay = if max > min {
            self.rng.gen_range(min..=max)
        } else {
            min
        };
        self.ai_move_due = Some(Instant::now() + Duration::from_millis(delay));
    }

    pub fn move_hover_left(&mut self) {
        self.hover_col = self.hover_col.saturating_sub(1);
    }

    pub fn move_hover_right(&mut self) {
        self.hover_col = (self.hover_col + 1).min(self.board_width() - 1);
    }

    pub fn board_width(&self) -> usize {
        self.controller.get_render_state().width()
    }

    /// Gracefully shut down the application, stopping the worker thread.
    pub fn shutdown(&mut self) {
        self.ai_worker.stop();
    }
}

/// Human-readable side name.
pub fn player_name(player_id: i32) -> &'static str {
    if player_id == RED {
        "Red"
    } else {
        "Yellow"
    }
}
