//! Minimax game engine for Puissance 4.
//!
//! The library side of the crate holds everything that does not touch a
//! terminal: the [`GameState`] trait, the alpha-beta [`Minimax`] engine, the
//! Connect 4 rules in [`games`], and the authoritative [`game_controller`].
//! The `play` binary layers the application state machine and the TUI on top.

use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

pub mod game_controller;
pub mod games;

/// Score of a position already won by the searching player.
///
/// Returned scores are offset by the ply at which the win occurs, so a win in
/// one move outranks a win in three, and every forced win outranks any
/// heuristic score.
pub const WIN_SCORE: i32 = 1_000_000;

/// The state of the game. Must be cloneable to be used in the search.
/// `Send` and `Sync` are required for parallel root-move evaluation.
pub trait GameState: Clone + Send + Sync {
    /// The type of a move in the game.
    type Move: Clone + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync;

    /// Returns a vector of all possible moves from the current state.
    fn get_possible_moves(&self) -> Vec<Self::Move>;
    /// Applies a move to the state, modifying it.
    fn make_move(&mut self, mv: &Self::Move);
    /// Returns true if the game is over.
    fn is_terminal(&self) -> bool;
    /// Returns the winner of the game, if any.
    /// `Some(player_id)` if a player has won, `None` for a draw or an
    /// unfinished game.
    fn get_winner(&self) -> Option<i32>;
    /// Returns the player whose turn it is to move.
    fn get_current_player(&self) -> i32;
    /// Heuristic value of the position from `perspective`'s point of view.
    /// Only consulted at the depth horizon; must stay well inside
    /// `(-WIN_SCORE, WIN_SCORE)`.
    fn evaluate(&self, perspective: i32) -> i32;
}

/// Statistics gathered during one search, for display in the UI.
#[derive(Debug, Clone)]
pub struct SearchStatistics<M> {
    /// Total nodes visited, across all root subtrees.
    pub nodes: u64,
    /// The depth the search was run at.
    pub depth: u32,
    /// Wall-clock search time.
    pub elapsed: Duration,
    /// Score of the selected move, from the searching player's perspective.
    pub best_score: i32,
    /// Every root move with its minimax score, best first.
    pub root_scores: Vec<(M, i32)>,
}

/// Fixed-depth minimax engine with alpha-beta pruning.
///
/// Root moves are distributed over a rayon thread pool; each subtree is then
/// searched sequentially. The engine keeps no state between searches, so one
/// instance can serve any number of positions and games.
pub struct Minimax {
    depth: u32,
    pool: ThreadPool,
    rng: Mutex<Xoshiro256PlusPlus>,
}

impl Minimax {
    /// Creates a new engine.
    ///
    /// # Arguments
    /// * `depth` - How many plies to look ahead. Clamped to at least 1.
    /// * `num_threads` - Worker threads for root parallelism. 0 means one per core.
    /// * `seed` - RNG seed for tie-breaking; `None` seeds from the OS.
    pub fn new(depth: u32, num_threads: usize, seed: Option<u64>) -> Self {
        let threads = if num_threads > 0 {
            num_threads
        } else {
            num_cpus::get()
        };
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .expect("failed to build search thread pool");
        let rng = match seed {
            Some(s) => Xoshiro256PlusPlus::seed_from_u64(s),
            None => Xoshiro256PlusPlus::from_entropy(),
        };
        Minimax {
            depth: depth.max(1),
            pool,
            rng: Mutex::new(rng),
        }
    }

    /// The configured search depth.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Searches the position and returns the best move with statistics.
    ///
    /// Panics if `state` has no legal moves; callers check for terminal
    /// positions before asking for a move.
    pub fn search<S: GameState>(&self, state: &S) -> (S::Move, SearchStatistics<S::Move>) {
        self.search_with_stop(state, None)
    }

    /// Like [`Minimax::search`], but aborts early when `stop` is raised.
    ///
    /// On abort the unfinished subtrees fall back to the heuristic, so a move
    /// is still returned; it is simply no longer a full-depth result.
    pub fn search_with_stop<S: GameState>(
        &self,
        state: &S,
        stop: Option<&AtomicBool>,
    ) -> (S::Move, SearchStatistics<S::Move>) {
        let start = Instant::now();
        let root_player = state.get_current_player();
        let moves = state.get_possible_moves();
        assert!(
            !moves.is_empty(),
            "search called on a position with no legal moves"
        );

        let nodes = AtomicU64::new(0);
        let depth = self.depth;
        let mut scored: Vec<(S::Move, i32)> = self.pool.install(|| {
            moves
                .into_par_iter()
                .map(|mv| {
                    let mut child = state.clone();
                    child.make_move(&mv);
                    let score = minimax(
                        &child,
                        depth - 1,
                        1,
                        -i32::MAX,
                        i32::MAX,
                        root_player,
                        &nodes,
                        stop,
                    );
                    (mv, score)
                })
                .collect()
        });

        scored.sort_by_key(|&(_, score)| std::cmp::Reverse(score));
        let best_score = scored[0].1;
        let num_best = scored.iter().take_while(|&&(_, s)| s == best_score).count();
        let pick = if num_best > 1 {
            self.rng.lock().gen_range(0..num_best)
        } else {
            0
        };
        let best_move = scored[pick].0.clone();

        let stats = SearchStatistics {
            nodes: nodes.load(Ordering::Relaxed),
            depth,
            elapsed: start.elapsed(),
            best_score,
            root_scores: scored,
        };
        (best_move, stats)
    }
}

/// Sequential minimax over one subtree.
///
/// `ply` counts moves from the root position and offsets terminal scores so
/// that earlier wins (and later losses) are preferred.
#[allow(clippy::too_many_arguments)]
fn minimax<S: GameState>(
    state: &S,
    depth: u32,
    ply: i32,
    mut alpha: i32,
    mut beta: i32,
    root_player: i32,
    nodes: &AtomicU64,
    stop: Option<&AtomicBool>,
) -> i32 {
    nodes.fetch_add(1, Ordering::Relaxed);

    if let Some(winner) = state.get_winner() {
        return if winner == root_player {
            WIN_SCORE - ply
        } else {
            -WIN_SCORE + ply
        };
    }

    let moves = state.get_possible_moves();
    if moves.is_empty() {
        return 0; // Board full with no winner: draw.
    }

    if depth == 0 || stop.map_or(false, |s| s.load(Ordering::Relaxed)) {
        return state.evaluate(root_player);
    }

    if state.get_current_player() == root_player {
        let mut value = -i32::MAX;
        for mv in &moves {
            let mut child = state.clone();
            child.make_move(mv);
            let score = minimax(
                &child,
                depth - 1,
                ply + 1,
                alpha,
                beta,
                root_player,
                nodes,
                stop,
            );
            value = value.max(score);
            alpha = alpha.max(value);
            if alpha >= beta {
                break;
            }
        }
        value
    } else {
        let mut value = i32::MAX;
        for mv in &moves {
            let mut child = state.clone();
            child.make_move(mv);
            let score = minimax(
                &child,
                depth - 1,
                ply + 1,
                alpha,
                beta,
                root_player,
                nodes,
                stop,
            );
            value = value.min(score);
            beta = beta.min(value);
            if alpha >= beta {
                break;
            }
        }
        value
    }
}
