// UI layer: raw-mode terminal handling around the menu state machine.
// The state machine itself lives in `menu`; this module only translates
// crossterm events into menu keys and writes frames to the screen.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use crate::menu::{run_loop, MenuKey};
use crate::state::AppState;

/// Map a terminal key press onto the keys the menu knows about.
pub fn key_from_event(key: &KeyEvent) -> MenuKey {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => MenuKey::Quit,
        KeyCode::Char('q') | KeyCode::Esc => MenuKey::Quit,
        KeyCode::Up | KeyCode::Char('k') => MenuKey::Up,
        KeyCode::Down | KeyCode::Char('j') => MenuKey::Down,
        _ => MenuKey::Other,
    }
}

/// Block until the next key press. Releases, mouse and resize events are
/// skipped.
fn next_key() -> Result<MenuKey> {
    loop {
        if let Event::Key(key) = event::read().context("Failed to read terminal event")? {
            if key.kind == KeyEventKind::Press {
                return Ok(key_from_event(&key));
            }
        }
    }
}

/// Clear the screen and draw one frame. Raw mode needs explicit carriage
/// returns.
fn draw_frame<W: Write>(out: &mut W, frame: &str) -> Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    out.write_all(frame.replace('\n', "\r\n").as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Run the interactive menu until the user quits. The terminal is restored
/// before returning, whether or not the loop failed.
pub fn run_menu(app: &mut AppState) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen, Hide) {
        let _ = disable_raw_mode();
        return Err(err).context("Failed to enter alternate screen");
    }

    let res = run_loop(&mut app.menu, next_key, |frame| draw_frame(&mut stdout, frame));

    let screen = execute!(stdout, Show, LeaveAlternateScreen);
    let raw = disable_raw_mode();
    let frames = settle(res, screen, raw)?;
    debug!(frames, "menu closed");
    Ok(())
}

/// Combine the loop outcome with the two restore steps. A loop error wins;
/// a restore failure on top of it is only logged.
fn settle<T>(res: Result<T>, screen: io::Result<()>, raw: io::Result<()>) -> Result<T> {
    match res {
        Ok(value) => {
            raw.context("Failed to disable raw mode")?;
            screen.context("Failed to leave alternate screen")?;
            Ok(value)
        }
        Err(err) => {
            for restore in [screen, raw] {
                if let Err(restore_err) = restore {
                    warn!("terminal restore failed: {restore_err}");
                }
            }
            Err(err)
        }
    }
}

/// Show a spinner on stderr while `f` runs.
pub fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let out = f();
    spinner.finish_and_clear();
    out
}
