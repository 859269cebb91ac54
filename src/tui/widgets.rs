//! # UI Widgets Module
//!
//! Drawing functions for the menu, the board, and the side panels. The
//! layout helpers are shared with the mouse handling in `input` so clicks
//! map to the same rectangles that were rendered.

use crate::app::{App, AppMode, PlayerType, MENU_ITEMS};
use puissance4::game_controller::GameStatus;
use puissance4::games::connect4::{RED, YELLOW};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.size();
    match app.mode {
        AppMode::Menu => draw_menu(frame, app, area),
        AppMode::InGame | AppMode::GameOver => draw_game_view(frame, app, area),
    }
}

/// The centered rectangle holding the main menu list. Shared with the mouse
/// handler so clicks land on the same items that were drawn.
pub fn menu_rect(area: Rect) -> Rect {
    let width = 24u16.min(area.width);
    let height = (MENU_ITEMS.len() as u16 + 2).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + area.height / 3;
    Rect::new(x, y, width, height)
}

/// Splits the screen into the board panel and the info side panel.
pub fn game_chunks(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);
    (chunks[0], chunks[1])
}

/// The drawable area inside the board panel's border.
pub fn board_inner_rect(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

fn draw_menu(f: &mut Frame, app: &mut App, area: Rect) {
    let menu = menu_rect(area);

    // Title above the menu box.
    if menu.y >= area.y + 2 {
        let title_area = Rect::new(area.x, menu.y - 2, area.width, 1);
        let title = Paragraph::new("P U I S S A N C E   4")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        f.render_widget(title, title_area);
    }

    let items: Vec<ListItem> = MENU_ITEMS.iter().map(|name| ListItem::new(*name)).collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Menu"))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Yellow),
        )
        .highlight_symbol("> ");
    f.render_stateful_widget(list, menu, &mut app.menu_state);

    let hint_y = menu.y + menu.height + 1;
    if hint_y < area.y + area.height {
        let hint = Paragraph::new("Up/Down + Enter, or click to choose. 'q' quits.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, Rect::new(area.x, hint_y, area.width, 1));
    }
}

fn draw_game_view(f: &mut Frame, app: &App, area: Rect) {
    let (board_area, side_area) = game_chunks(area);
    draw_board(f, app, board_area);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(14), Constraint::Percentage(40)])
        .split(side_area);
    draw_game_info(f, app, side[0]);
    draw_move_history(f, app, side[1]);
}

fn piece_style(player: i32) -> Style {
    if player == RED {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Yellow)
    }
}

fn draw_board(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Puissance 4");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let state = app.controller.get_render_state();
    let width = state.width();
    let height = state.height();

    let mut lines: Vec<Line> = Vec::with_capacity(height + 2);

    // Hover row: preview piece above the board while a human is to move.
    let mut hover_spans = Vec::with_capacity(width);
    for c in 0..width {
        if c == app.hover_col && app.accepts_human_move() {
            hover_spans.push(Span::styled(
                "● ",
                piece_style(app.controller.get_current_player()),
            ));
        } else {
            hover_spans.push(Span::raw("  "));
        }
    }
    lines.push(Line::from(hover_spans));

    // Board rows, with the falling piece drawn over its current cell.
    for r in 0..height {
        let mut spans = Vec::with_capacity(width);
        for c in 0..width {
            let falling_here = app
                .falling
                .map_or(false, |p| p.row == r && p.mv.0 == c);
            let (symbol, style) = if falling_here {
                ("● ", piece_style(app.falling.unwrap().player))
            } else {
                match state.cell(r, c) {
                    RED => ("● ", piece_style(RED)),
                    YELLOW => ("● ", piece_style(YELLOW)),
                    _ => ("· ", Style::default().fg(Color::DarkGray)),
                }
            };
            spans.push(Span::styled(symbol, style));
        }
        lines.push(Line::from(spans));
    }

    // Column numbers, 1-based like the move display.
    let numbers: String = (1..=width).map(|c| format!("{} ", c)).collect();
    lines.push(Line::from(Span::styled(
        numbers,
        Style::default().fg(Color::DarkGray),
    )));

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_game_info(f: &mut Frame, app: &App, area: Rect) {
    let mut text = Vec::new();

    // Turn / result banner.
    let banner = match app.controller.get_status() {
        GameStatus::Win(w) => Line::from(Span::styled(
            format!("{} wins! Press 'r' to restart", crate::app::player_name(w).to_uppercase()),
            piece_style(w).add_modifier(Modifier::BOLD),
        )),
        GameStatus::Draw => Line::from(Span::styled(
            "Draw! Press 'r' to restart",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        GameStatus::InProgress => {
            let current = app.controller.get_current_player();
            Line::from(Span::styled(
                format!("{}'s turn", crate::app::player_name(current).to_uppercase()),
                piece_style(current).add_modifier(Modifier::BOLD),
            ))
        }
    };
    text.push(banner);
    text.push(Line::from(""));

    for (id, p_type) in &app.player_options {
        let type_str = match p_type {
            PlayerType::Human => "Human",
            PlayerType::Ai => "AI",
        };
        text.push(Line::from(vec![
            Span::styled("● ", piece_style(*id)),
            Span::raw(format!("{}: {}", crate::app::player_name(*id), type_str)),
        ]));
    }
    text.push(Line::from(""));

    if let Some(since) = app.ai_thinking_since {
        text.push(Line::from(format!(
            "AI is thinking... ({:.1}s)",
            since.elapsed().as_secs_f32()
        )));
        text.push(Line::from(""));
    }

    if let Some(stats) = &app.last_search_stats {
        text.push(Line::from(format!(
            "Last search: {} nodes, depth {}, {} ms",
            stats.nodes,
            stats.depth,
            stats.elapsed.as_millis()
        )));
        text.push(Line::from(format!("Best score: {}", stats.best_score)));
        text.push(Line::from("Top moves:"));
        for (mv, score) in stats.root_scores.iter().take(3) {
            text.push(Line::from(format!("  {}: {}", mv, score)));
        }
        text.push(Line::from(""));
    }

    let instructions = if app.controller.is_game_over() {
        "'r' restart | Esc menu | 'q' quit"
    } else if app.is_current_player_ai() {
        "'r' restart | Esc menu | 'q' quit"
    } else {
        "Left/Right move, Enter/Space drop, or click a column"
    };
    text.push(Line::from(Span::styled(
        instructions,
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Game Info"));
    f.render_widget(paragraph, area);
}

fn draw_move_history(f: &mut Frame, app: &App, area: Rect) {
    // Show the tail that fits; the newest move is the interesting one.
    let capacity = area.height.saturating_sub(2) as usize;
    let history = app.controller.get_move_history();
    let skip = history.len().saturating_sub(capacity);

    let items: Vec<ListItem> = history
        .iter()
        .skip(skip)
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{}. ", entry.move_number)),
                Span::styled("● ", piece_style(entry.player)),
                Span::raw(format!(
                    "{}: {}",
                    crate::app::player_name(entry.player),
                    entry.move_made
                )),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Move History"));
    f.render_widget(list, area);
}
