//! # Game Controller - Central Game State Management
//!
//! The [`GameController`] owns the authoritative game state and keeps it
//! separate from the copies floating around the program:
//!
//! - **Authoritative state**: the "real" game, owned by the controller
//! - **AI search states**: clones handed to the engine for exploration
//! - **UI render states**: references used for display only
//!
//! All moves are validated here before application, and a timestamped move
//! history is maintained for the history panel.

use crate::games::connect4::{Connect4Move, Connect4State};
use crate::GameState;
use std::time::SystemTime;

/// Result of attempting to apply a move.
#[derive(Debug, Clone)]
pub enum MoveResult {
    /// Move was successfully applied.
    Success {
        /// The applied move.
        move_made: Connect4Move,
        /// Player who made the move.
        player: i32,
        /// Whether the game is now over.
        game_over: bool,
        /// Winner if game is over (None for a draw or an unfinished game).
        winner: Option<i32>,
    },
    /// Move was rejected as invalid.
    Invalid {
        /// Reason the move was rejected.
        reason: MoveValidationError,
    },
    /// Game is already over, no more moves allowed.
    GameOver,
}

/// Errors that can occur during move validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveValidationError {
    /// The column is out of bounds or full.
    IllegalMove,
    /// The game is already in a terminal state.
    GameAlreadyOver,
}

impl std::fmt::Display for MoveValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveValidationError::IllegalMove => write!(f, "Illegal move"),
            MoveValidationError::GameAlreadyOver => write!(f, "Game is already over"),
        }
    }
}

/// A single entry in the move history.
#[derive(Debug, Clone)]
pub struct MoveHistoryEntry {
    /// When the move was made.
    pub timestamp: SystemTime,
    /// Player who made the move.
    pub player: i32,
    /// The move that was made.
    pub move_made: Connect4Move,
    /// Move number (1-indexed).
    pub move_number: usize,
}

impl MoveHistoryEntry {
    pub fn new(player: i32, move_made: Connect4Move, move_number: usize) -> Self {
        Self {
            timestamp: SystemTime::now(),
            player,
            move_made,
            move_number,
        }
    }
}

/// Current game status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Game is still in progress.
    InProgress,
    /// Game ended with a winner.
    Win(i32),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Check if the game is over.
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// The central game controller that owns the authoritative game state.
///
/// All moves go through the controller, which validates them before
/// application.
#[derive(Debug, Clone)]
pub struct GameController {
    /// The authoritative game state.
    game_state: Connect4State,
    /// Complete history of moves made.
    move_history: Vec<MoveHistoryEntry>,
    /// Current game status.
    status: GameStatus,
}

impl GameController {
    /// Create a new game controller with the given initial state.
    pub fn new(initial_state: Connect4State) -> Self {
        Self {
            game_state: initial_state,
            move_history: Vec::new(),
            status: GameStatus::InProgress,
        }
    }

    /// Validate a move without applying it.
    pub fn validate_move(&self, mv: &Connect4Move) -> Result<(), MoveValidationError> {
        if self.status.is_game_over() {
            return Err(MoveValidationError::GameAlreadyOver);
        }
        if !self.game_state.is_legal(mv) {
            return Err(MoveValidationError::IllegalMove);
        }
        Ok(())
    }

    /// Attempt to make a move.
    ///
    /// Validates the move and applies it if valid. The returned
    /// [`MoveResult`] carries the resulting status, so callers never have to
    /// re-derive win/draw themselves.
    pub fn try_make_move(&mut self, mv: Connect4Move) -> MoveResult {
        if let Err(reason) = self.validate_move(&mv) {
            return match reason {
                MoveValidationError::GameAlreadyOver => MoveResult::GameOver,
                _ => MoveResult::Invalid { reason },
            };
        }

        let player = self.game_state.get_current_player();
        let move_number = self.move_history.len() + 1;

        self.game_state.make_move(&mv);
        self.move_history
            .push(MoveHistoryEntry::new(player, mv, move_number));

        let game_over = self.game_state.is_terminal();
        let winner = if game_over {
            self.game_state.get_winner()
        } else {
            None
        };

        if game_over {
            self.status = match winner {
                Some(w) => GameStatus::Win(w),
                None => GameStatus::Draw,
            };
        }

        MoveResult::Success {
            move_made: mv,
            player,
            game_over,
            winner,
        }
    }

    /// Get a clone of the game state for the AI to search.
    pub fn get_state_for_search(&self) -> Connect4State {
        self.game_state.clone()
    }

    /// Get a reference to the game state for rendering.
    pub fn get_render_state(&self) -> &Connect4State {
        &self.game_state
    }

    /// Get the current player.
    pub fn get_current_player(&self) -> i32 {
        self.game_state.get_current_player()
    }

    /// Get the current game status.
    pub fn get_status(&self) -> GameStatus {
        self.status
    }

    /// Check if the game is over.
    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    /// Get the winner if the game is over.
    pub fn get_winner(&self) -> Option<i32> {
        match self.status {
            GameStatus::Win(w) => Some(w),
            _ => None,
        }
    }

    /// Get the complete move history.
    pub fn get_move_history(&self) -> &[MoveHistoryEntry] {
        &self.move_history
    }

    /// Get the number of moves made.
    pub fn move_count(&self) -> usize {
        self.move_history.len()
    }

    /// Get legal moves for the current player.
    pub fn get_legal_moves(&self) -> Vec<Connect4Move> {
        if self.status.is_game_over() {
            Vec::new()
        } else {
            self.game_state.get_possible_moves()
        }
    }

    /// Reset the game to a fresh state.
    pub fn reset(&mut self, new_state: Connect4State) {
        self.game_state = new_state;
        self.move_history.clear();
        self.status = GameStatus::InProgress;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::connect4::{RED, YELLOW};

    fn controller() -> GameController {
        GameController::new(Connect4State::new(7, 6, 4))
    }

    #[test]
    fn test_valid_move() {
        let mut controller = controller();
        match controller.try_make_move(Connect4Move(3)) {
            MoveResult::Success {
                player, game_over, ..
            } => {
                assert_eq!(player, RED);
                assert!(!game_over);
            }
            _ => panic!("Expected successful move"),
        }
        assert_eq!(controller.get_current_player(), YELLOW);
    }

    #[test]
    fn test_invalid_move_full_column() {
        let mut controller = controller();
        for _ in 0..6 {
            controller.try_make_move(Connect4Move(2));
        }
        match controller.try_make_move(Connect4Move(2)) {
            MoveResult::Invalid {
                reason: MoveValidationError::IllegalMove,
            } => {}
            other => panic!("Expected illegal move error, got {:?}", other),
        }
        // The failed attempt must not enter the history.
        assert_eq!(controller.move_count(), 6);
    }

    #[test]
    fn test_invalid_move_out_of_bounds() {
        let mut controller = controller();
        assert_eq!(
            controller.validate_move(&Connect4Move(7)),
            Err(MoveValidationError::IllegalMove)
        );
    }

    #[test]
    fn test_win_sets_status() {
        let mut controller = controller();
        for col in 0..3 {
            controller.try_make_move(Connect4Move(col)); // Red
            controller.try_make_move(Connect4Move(col)); // Yellow
        }
        match controller.try_make_move(Connect4Move(3)) {
            MoveResult::Success {
                game_over, winner, ..
            } => {
                assert!(game_over);
                assert_eq!(winner, Some(RED));
            }
            _ => panic!("Expected winning move to succeed"),
        }
        assert_eq!(controller.get_status(), GameStatus::Win(RED));
        assert!(controller.get_legal_moves().is_empty());
    }

    #[test]
    fn test_no_moves_after_game_over() {
        let mut controller = controller();
        for col in 0..3 {
            controller.try_make_move(Connect4Move(col));
            controller.try_make_move(Connect4Move(col));
        }
        controller.try_make_move(Connect4Move(3)); // Red wins
        match controller.try_make_move(Connect4Move(4)) {
            MoveResult::GameOver => {}
            other => panic!("Expected GameOver, got {:?}", other),
        }
    }

    #[test]
    fn test_move_history() {
        let mut controller = controller();
        controller.try_make_move(Connect4Move(3));
        controller.try_make_move(Connect4Move(4));

        assert_eq!(controller.move_count(), 2);
        let history = controller.get_move_history();
        assert_eq!(history[0].player, RED);
        assert_eq!(history[0].move_number, 1);
        assert_eq!(history[1].player, YELLOW);
        assert_eq!(history[1].move_number, 2);
    }

    #[test]
    fn test_reset() {
        let mut controller = controller();
        controller.try_make_move(Connect4Move(3));
        assert_eq!(controller.move_count(), 1);

        controller.reset(Connect4State::new(7, 6, 4).with_to_move(YELLOW));
        assert_eq!(controller.move_count(), 0);
        assert_eq!(controller.get_status(), GameStatus::InProgress);
        assert_eq!(controller.get_current_player(), YELLOW);
    }
}
