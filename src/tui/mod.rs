//! # Terminal User Interface Module
//!
//! The complete terminal frontend for the game, built with Ratatui. It owns
//! terminal setup/teardown, the main event loop, and delegates input handling
//! and rendering to the submodules.
//!
//! The loop polls input at ~50ms, which doubles as the tick driving the
//! falling-piece animation and the AI turn sequencing in [`App::update`].

use crate::app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::{io, time::Duration};

pub mod input;
pub mod widgets;

/// Main entry point for the terminal user interface.
///
/// Initializes the terminal, runs the event loop, and restores the terminal
/// on exit. Errors from terminal operations are propagated to `main`.
pub fn run(app: &mut App) -> io::Result<()> {
    let mut terminal = init_terminal()?;

    loop {
        if app.should_quit {
            app.shutdown();
            break;
        }

        app.update();

        terminal.draw(|f| widgets::render(app, f))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        input::handle_key_press(app, key.code);
                    }
                }
                Event::Mouse(mouse) => {
                    let terminal_size = terminal.size()?;
                    let terminal_rect = Rect::new(0, 0, terminal_size.width, terminal_size.height);
                    input::handle_mouse_event(app, mouse.kind, mouse.column, mouse.row, terminal_rect);
                }
                _ => {}
            }
        }
    }

    restore_terminal(&mut terminal)
}

/// Initializes the terminal for raw mode operation.
fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    execute!(
        handle,
        EnterAlternateScreen,
        EnableMouseCapture,
        crossterm::cursor::Hide
    )?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Restores the terminal to normal operation mode.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    terminal.show_cursor()?;
    disable_raw_mode()?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    execute!(
        handle,
        LeaveAlternateScreen,
        DisableMouseCapture,
        crossterm::cursor::Show
    )?;
    Ok(())
}
