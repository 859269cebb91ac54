//! # Exhibition Mode
//!
//! Headless AI-vs-AI games for watching or sanity-checking the engine
//! without the TUI. Prints every move as it is played, each final position
//! with colored pieces, and a win/draw tally at the end.

use colored::Colorize;
use puissance4::games::connect4::{Connect4Move, Connect4State, RED, YELLOW};
use puissance4::{GameState, Minimax};

pub fn run(depth: u32, num_threads: usize, seed: Option<u64>, games: usize) {
    let engine = Minimax::new(depth, num_threads, seed);

    let mut red_wins = 0usize;
    let mut yellow_wins = 0usize;
    let mut draws = 0usize;
    let mut total_nodes = 0u64;
    let mut total_moves = 0usize;

    for game_no in 1..=games {
        // Alternate the starting side so neither color keeps the first-move
        // advantage across the series.
        let starting = if game_no % 2 == 1 { RED } else { YELLOW };
        let mut state = Connect4State::new(7, 6, 4).with_to_move(starting);
        let mut moves = 0usize;

        println!("{}", format!("=== Game {} ===", game_no).bold());
        while !state.is_terminal() {
            let mover = state.get_current_player();
            let (mv, stats) = engine.search(&state);
            total_nodes += stats.nodes;
            state.make_move(&mv);
            moves += 1;
            println!("{}", move_line(moves, mover, &mv));
        }
        total_moves += moves;

        print_board(&state);
        match state.get_winner() {
            Some(RED) => {
                red_wins += 1;
                println!("{}", format!("Red wins ({} moves)", moves).red().bold());
            }
            Some(_) => {
                yellow_wins += 1;
                println!("{}", format!("Yellow wins ({} moves)", moves).yellow().bold());
            }
            None => {
                draws += 1;
                println!("{}", format!("Draw ({} moves)", moves).bold());
            }
        }
        println!();
    }

    println!("{}", "=== Summary ===".bold());
    println!(
        "{} games: {} {} / {} {} / {} draws",
        games,
        red_wins,
        "red".red(),
        yellow_wins,
        "yellow".yellow(),
        draws
    );
    println!(
        "{} nodes searched over {} moves (depth {})",
        total_nodes,
        total_moves,
        engine.depth()
    );
}

/// One line per applied move, colored by the side that played it.
fn move_line(move_no: usize, player: i32, mv: &Connect4Move) -> String {
    let name = if player == RED {
        "Red".red()
    } else {
        "Yellow".yellow()
    };
    format!("{:>2}. {} plays {}", move_no, name, mv)
}

fn print_board(state: &Connect4State) {
    for r in 0..state.height() {
        let mut line = String::new();
        for c in 0..state.width() {
            let cell = match state.cell(r, c) {
                RED => "● ".red().to_string(),
                YELLOW => "● ".yellow().to_string(),
                _ => "· ".dimmed().to_string(),
            };
            line.push_str(&cell);
        }
        println!("{}", line);
    }
    let numbers: String = (1..=state.width()).map(|c| format!("{} ", c)).collect();
    println!("{}", numbers.dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_lines_name_the_side_and_column() {
        colored::control::set_override(false);
        assert_eq!(move_line(1, RED, &Connect4Move(3)), " 1. Red plays col 4");
        assert_eq!(move_line(12, YELLOW, &Connect4Move(0)), "12. Yellow plays col 1");
        colored::control::unset_override();
    }
}
