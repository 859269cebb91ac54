//! # Input Handling Module
//!
//! Translates keyboard and mouse events into application actions, routed by
//! the current [`AppMode`]. Mouse coordinates are mapped through the same
//! layout helpers the widgets render with.

use crate::app::{App, AppMode, MENU_ITEMS};
use crate::tui::widgets;
use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use ratatui::layout::Rect;

/// Handles keyboard input based on the current application mode.
pub fn handle_key_press(app: &mut App, key_code: KeyCode) {
    match app.mode {
        AppMode::Menu => handle_menu_input(key_code, app),
        AppMode::InGame => handle_ingame_input(key_code, app),
        AppMode::GameOver => handle_game_over_input(key_code, app),
    }
}

fn handle_menu_input(key_code: KeyCode, app: &mut App) {
    match key_code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up => app.select_prev_menu_item(),
        KeyCode::Down => app.select_next_menu_item(),
        KeyCode::Enter => app.confirm_menu_item(),
        _ => {}
    }
}

fn handle_ingame_input(key_code: KeyCode, app: &mut App) {
    match key_code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('r') => app.restart_game(),
        KeyCode::Esc => app.back_to_menu(),
        KeyCode::Left => app.move_hover_left(),
        KeyCode::Right => app.move_hover_right(),
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => {
            let col = app.hover_col;
            app.try_drop(col);
        }
        _ => {}
    }
}

fn handle_game_over_input(key_code: KeyCode, app: &mut App) {
    match key_code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('r') => app.restart_game(),
        KeyCode::Esc => app.back_to_menu(),
        _ => {}
    }
}

/// Handles mouse events: hovering over the board moves the preview piece,
/// a left click drops in the clicked column (or picks a menu entry).
pub fn handle_mouse_event(
    app: &mut App,
    kind: MouseEventKind,
    col: u16,
    row: u16,
    terminal_rect: Rect,
) {
    match app.mode {
        AppMode::Menu => {
            if let MouseEventKind::Down(MouseButton::Left) = kind {
                handle_menu_click(app, col, row, terminal_rect);
            }
        }
        AppMode::InGame => match kind {
            MouseEventKind::Moved => {
                if let Some(board_col) = board_column_at(app, col, terminal_rect) {
                    app.hover_col = board_col;
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                // Any click inside the board panel counts; only the x
                // position selects the column.
                if row < terminal_rect.height {
                    if let Some(board_col) = board_column_at(app, col, terminal_rect) {
                        app.hover_col = board_col;
                        app.try_drop(board_col);
                    }
                }
            }
            _ => {}
        },
        AppMode::GameOver => {}
    }
}

fn handle_menu_click(app: &mut App, col: u16, row: u16, terminal_rect: Rect) {
    let menu = widgets::menu_rect(terminal_rect);
    // Items start one row below the border.
    let inner_x = menu.x + 1;
    let inner_y = menu.y + 1;
    if col < inner_x
        || col >= menu.x + menu.width.saturating_sub(1)
        || row < inner_y
        || row >= menu.y + menu.height.saturating_sub(1)
    {
        return;
    }
    let index = (row - inner_y) as usize;
    if index < MENU_ITEMS.len() {
        app.menu_state.select(Some(index));
        app.confirm_menu_item();
    }
}

/// Maps an absolute terminal x coordinate to a board column, if it falls
/// inside the rendered board cells (each cell is two characters wide).
fn board_column_at(app: &App, col: u16, terminal_rect: Rect) -> Option<usize> {
    let (board_area, _) = widgets::game_chunks(terminal_rect);
    let inner = widgets::board_inner_rect(board_area);
    let width = app.board_width();
    if col < inner.x {
        return None;
    }
    let offset = (col - inner.x) as usize / 2;
    if offset < width && (col - inner.x) < (width * 2) as u16 {
        Some(offset)
    } else {
        None
    }
}
