//! # Connect 4 Game Implementation
//!
//! Players take turns dropping pieces into columns, trying to get four in a
//! row horizontally, vertically, or diagonally.
//!
//! ## Rules
//! - Players alternate dropping pieces into columns
//! - Pieces fall to the lowest available spot in the column due to gravity
//! - First player to get `line_size` pieces in a row wins
//! - Game is a draw if the board fills up with no winner

use crate::GameState;
use std::fmt;
use std::str::FromStr;

/// Player id of the red side (moves first by default).
pub const RED: i32 = 1;
/// Player id of the yellow side.
pub const YELLOW: i32 = -1;

/// A move in Connect 4: the 0-based column to drop a piece into.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Connect4Move(pub usize);

impl fmt::Display for Connect4Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Columns are shown 1-based everywhere the user sees them.
        write!(f, "col {}", self.0 + 1)
    }
}

impl FromStr for Connect4Move {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c = s.trim().parse::<usize>().map_err(|e| e.to_string())?;
        Ok(Connect4Move(c))
    }
}

/// Complete state of a Connect 4 game.
///
/// The board is a flat row-major vector with row 0 at the top; cells hold
/// [`RED`], [`YELLOW`], or 0 for empty.
#[derive(Debug, Clone)]
pub struct Connect4State {
    /// The game board as a flat vector (row-major).
    board: Vec<i32>,
    /// Current player (RED or YELLOW).
    current_player: i32,
    /// Board width (number of columns).
    width: usize,
    /// Board height (number of rows).
    height: usize,
    /// Number of pieces needed in a row to win.
    line_size: usize,
    /// Last move made, if any (row, column).
    last_move: Option<(usize, usize)>,
}

impl fmt::Display for Connect4State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.height {
            for c in 0..self.width {
                let symbol = match self.board[r * self.width + c] {
                    RED => "X",
                    YELLOW => "O",
                    _ => ".",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl GameState for Connect4State {
    type Move = Connect4Move;

    fn get_possible_moves(&self) -> Vec<Self::Move> {
        (0..self.width)
            .filter(|&c| self.board[c] == 0)
            .map(Connect4Move)
            .collect()
    }

    fn make_move(&mut self, mv: &Self::Move) {
        for r in (0..self.height).rev() {
            let idx = r * self.width + mv.0;
            if self.board[idx] == 0 {
                self.board[idx] = self.current_player;
                self.last_move = Some((r, mv.0));
                self.current_player = -self.current_player;
                return;
            }
        }
    }

    fn is_terminal(&self) -> bool {
        self.get_winner().is_some() || self.get_possible_moves().is_empty()
    }

    fn get_winner(&self) -> Option<i32> {
        let (r, c) = self.last_move?;
        let player = self.board[r * self.width + c];
        if player == 0 {
            return None;
        }

        // Only lines through the last move can have completed a win.
        for (dr, dc) in [(0i32, 1i32), (1, 0), (1, 1), (1, -1)] {
            let run = 1
                + self.count_direction(r, c, dr, dc, player)
                + self.count_direction(r, c, -dr, -dc, player);
            if run >= self.line_size {
                return Some(player);
            }
        }
        None
    }

    fn get_current_player(&self) -> i32 {
        self.current_player
    }

    fn evaluate(&self, perspective: i32) -> i32 {
        let mut score = 0;

        // Center-column control is worth a small constant bonus per piece.
        let center = self.width / 2;
        for r in 0..self.height {
            if self.board[r * self.width + center] == perspective {
                score += 3;
            }
        }

        let n = self.line_size;
        // Horizontal windows
        for r in 0..self.height {
            for c in 0..=(self.width - n) {
                score += self.score_window(r, c, 0, 1, perspective);
            }
        }
        // Vertical windows
        for c in 0..self.width {
            for r in 0..=(self.height - n) {
                score += self.score_window(r, c, 1, 0, perspective);
            }
        }
        // Diagonal down-right windows
        for r in 0..=(self.height - n) {
            for c in 0..=(self.width - n) {
                score += self.score_window(r, c, 1, 1, perspective);
            }
        }
        // Diagonal up-right windows
        for r in (n - 1)..self.height {
            for c in 0..=(self.width - n) {
                score += self.score_window(r, c, -1, 1, perspective);
            }
        }

        score
    }
}

impl Connect4State {
    /// Creates a new game with the given configuration. Red moves first.
    pub fn new(width: usize, height: usize, line_size: usize) -> Self {
        assert!(line_size >= 2 && line_size <= width.min(height));
        Self {
            board: vec![0; width * height],
            current_player: RED,
            width,
            height,
            line_size,
            last_move: None,
        }
    }

    /// Sets the player to move first; used to randomize the starting side.
    pub fn with_to_move(mut self, player: i32) -> Self {
        debug_assert!(player == RED || player == YELLOW);
        self.current_player = player;
        self
    }

    /// Board width (number of columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Board height (number of rows).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pieces needed in a row to win.
    pub fn line_size(&self) -> usize {
        self.line_size
    }

    /// Cell contents at (row, col); row 0 is the top of the board.
    pub fn cell(&self, row: usize, col: usize) -> i32 {
        self.board[row * self.width + col]
    }

    /// The board as rows of cells, for rendering.
    pub fn get_board(&self) -> Vec<Vec<i32>> {
        self.board.chunks(self.width).map(|row| row.to_vec()).collect()
    }

    /// The row a piece dropped in `col` would land in, if the column is open.
    /// This is the target of the falling-piece animation.
    pub fn next_open_row(&self, col: usize) -> Option<usize> {
        if col >= self.width {
            return None;
        }
        (0..self.height).rev().find(|&r| self.board[r * self.width + col] == 0)
    }

    /// A move is legal if the column is in bounds and its top cell is empty.
    pub fn is_legal(&self, mv: &Connect4Move) -> bool {
        mv.0 < self.width && self.board[mv.0] == 0
    }

    /// Counts consecutive `player` pieces from (r, c) exclusive, walking (dr, dc).
    fn count_direction(&self, r: usize, c: usize, dr: i32, dc: i32, player: i32) -> usize {
        let mut count = 0;
        let mut rr = r as i32 + dr;
        let mut cc = c as i32 + dc;
        while rr >= 0
            && cc >= 0
            && (rr as usize) < self.height
            && (cc as usize) < self.width
            && self.board[rr as usize * self.width + cc as usize] == player
        {
            count += 1;
            rr += dr;
            cc += dc;
        }
        count
    }

    /// Scores one `line_size`-cell window starting at (r, c) walking (dr, dc).
    ///
    /// A completed line counts 100, an open three 5, an open two 2, and an
    /// opponent open three -4.
    fn score_window(&self, r: usize, c: usize, dr: i32, dc: i32, perspective: i32) -> i32 {
        let mut own = 0;
        let mut opp = 0;
        let mut empty = 0;
        for i in 0..self.line_size as i32 {
            let rr = (r as i32 + dr * i) as usize;
            let cc = (c as i32 + dc * i) as usize;
            match self.board[rr * self.width + cc] {
                v if v == perspective => own += 1,
                0 => empty += 1,
                _ => opp += 1,
            }
        }

        let mut score = 0;
        if own == self.line_size {
            score += 100;
        } else if own == self.line_size - 1 && empty == 1 {
            score += 5;
        } else if own == self.line_size - 2 && empty == 2 {
            score += 2;
        }
        if opp == self.line_size - 1 && empty == 1 {
            score -= 4;
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let game = Connect4State::new(7, 6, 4);
        assert_eq!(game.get_current_player(), RED);
        assert_eq!(game.get_board().len(), 6);
        assert_eq!(game.get_board()[0].len(), 7);
        assert_eq!(game.line_size(), 4);
        assert!(!game.is_terminal());
        assert_eq!(game.get_winner(), None);
    }

    #[test]
    fn test_legal_moves() {
        let game = Connect4State::new(7, 6, 4);
        let moves = game.get_possible_moves();
        assert_eq!(moves.len(), 7);
        for i in 0..7 {
            assert!(moves.contains(&Connect4Move(i)));
        }
        assert!(!game.is_legal(&Connect4Move(7)));
    }

    #[test]
    fn test_make_move() {
        let mut game = Connect4State::new(7, 6, 4);
        game.make_move(&Connect4Move(3));
        assert_eq!(game.get_board()[5][3], RED);
        assert_eq!(game.get_current_player(), YELLOW);

        game.make_move(&Connect4Move(3));
        assert_eq!(game.get_board()[4][3], YELLOW);
        assert_eq!(game.get_current_player(), RED);
    }

    #[test]
    fn test_with_to_move() {
        let game = Connect4State::new(7, 6, 4).with_to_move(YELLOW);
        assert_eq!(game.get_current_player(), YELLOW);
    }

    #[test]
    fn test_next_open_row() {
        let mut game = Connect4State::new(7, 6, 4);
        assert_eq!(game.next_open_row(0), Some(5));
        game.make_move(&Connect4Move(0));
        assert_eq!(game.next_open_row(0), Some(4));
        assert_eq!(game.next_open_row(9), None);
    }

    #[test]
    fn test_full_column_rejected() {
        let mut game = Connect4State::new(7, 6, 4);
        for _ in 0..6 {
            game.make_move(&Connect4Move(2));
        }
        assert!(!game.is_legal(&Connect4Move(2)));
        assert!(!game.get_possible_moves().contains(&Connect4Move(2)));
        assert_eq!(game.next_open_row(2), None);
    }

    #[test]
    fn test_win_condition_horizontal() {
        let mut game = Connect4State::new(7, 6, 4);
        game.make_move(&Connect4Move(0)); // Red
        game.make_move(&Connect4Move(0)); // Yellow
        game.make_move(&Connect4Move(1)); // Red
        game.make_move(&Connect4Move(1)); // Yellow
        game.make_move(&Connect4Move(2)); // Red
        game.make_move(&Connect4Move(2)); // Yellow
        game.make_move(&Connect4Move(3)); // Red wins

        assert_eq!(game.get_winner(), Some(RED));
        assert!(game.is_terminal());
    }

    #[test]
    fn test_win_condition_vertical() {
        let mut game = Connect4State::new(7, 6, 4);
        game.make_move(&Connect4Move(0)); // Red
        game.make_move(&Connect4Move(1)); // Yellow
        game.make_move(&Connect4Move(0)); // Red
        game.make_move(&Connect4Move(1)); // Yellow
        game.make_move(&Connect4Move(0)); // Red
        game.make_move(&Connect4Move(1)); // Yellow
        game.make_move(&Connect4Move(0)); // Red wins

        assert_eq!(game.get_winner(), Some(RED));
        assert!(game.is_terminal());
    }

    #[test]
    fn test_win_condition_diagonal_up_right() {
        let mut game = Connect4State::new(7, 6, 4);
        // Build a / diagonal for Red on columns 0-3.
        game.make_move(&Connect4Move(0)); // Red (5,0)
        game.make_move(&Connect4Move(1)); // Yellow (5,1)
        game.make_move(&Connect4Move(1)); // Red (4,1)
        game.make_move(&Connect4Move(2)); // Yellow (5,2)
        game.make_move(&Connect4Move(2)); // Red (4,2)
        game.make_move(&Connect4Move(3)); // Yellow (5,3)
        game.make_move(&Connect4Move(2)); // Red (3,2)
        game.make_move(&Connect4Move(3)); // Yellow (4,3)
        game.make_move(&Connect4Move(3)); // Red (3,3)
        game.make_move(&Connect4Move(0)); // Yellow (4,0)
        game.make_move(&Connect4Move(3)); // Red (2,3) wins

        assert_eq!(game.get_winner(), Some(RED));
        assert!(game.is_terminal());
    }

    #[test]
    fn test_win_condition_diagonal_down_right() {
        let mut game = Connect4State::new(7, 6, 4);
        // Mirror image: a \ diagonal for Red on columns 0-3.
        game.make_move(&Connect4Move(3)); // Red (5,3)
        game.make_move(&Connect4Move(2)); // Yellow (5,2)
        game.make_move(&Connect4Move(2)); // Red (4,2)
        game.make_move(&Connect4Move(1)); // Yellow (5,1)
        game.make_move(&Connect4Move(1)); // Red (4,1)
        game.make_move(&Connect4Move(0)); // Yellow (5,0)
        game.make_move(&Connect4Move(1)); // Red (3,1)
        game.make_move(&Connect4Move(0)); // Yellow (4,0)
        game.make_move(&Connect4Move(0)); // Red (3,0)
        game.make_move(&Connect4Move(4)); // Yellow (5,4)
        game.make_move(&Connect4Move(0)); // Red (2,0) wins

        assert_eq!(game.get_winner(), Some(RED));
        assert!(game.is_terminal());
    }

    #[test]
    fn test_draw_on_full_board() {
        // 4x4 board filled so every row reads RRYY or YYRR and every column
        // alternates colors: no line of four anywhere.
        let mut game = Connect4State::new(4, 4, 4);
        for &col in &[0, 2, 1, 3, 2, 0, 3, 1, 0, 2, 1, 3, 2, 0, 3, 1] {
            assert_eq!(game.get_winner(), None);
            game.make_move(&Connect4Move(col));
        }
        assert_eq!(game.get_winner(), None);
        assert!(game.get_possible_moves().is_empty());
        assert!(game.is_terminal());
    }

    #[test]
    fn test_evaluate_center_preference() {
        let mut center = Connect4State::new(7, 6, 4);
        center.make_move(&Connect4Move(3));
        let mut edge = Connect4State::new(7, 6, 4);
        edge.make_move(&Connect4Move(0));
        assert!(center.evaluate(RED) > edge.evaluate(RED));
    }

    #[test]
    fn test_evaluate_rewards_threats() {
        let mut game = Connect4State::new(7, 6, 4);
        game.make_move(&Connect4Move(0)); // Red
        game.make_move(&Connect4Move(0)); // Yellow
        game.make_move(&Connect4Move(1)); // Red
        game.make_move(&Connect4Move(1)); // Yellow
        game.make_move(&Connect4Move(2)); // Red: three on the bottom row
        // Red has an open three; Yellow sees the mirrored threat.
        assert!(game.evaluate(RED) > 0);
        assert!(game.evaluate(YELLOW) < game.evaluate(RED));
    }

    #[test]
    fn test_move_display_and_parse() {
        let mv: Connect4Move = "3".parse().unwrap();
        assert_eq!(mv, Connect4Move(3));
        assert_eq!(mv.to_string(), "col 4");
        assert!("x".parse::<Connect4Move>().is_err());
    }
}
