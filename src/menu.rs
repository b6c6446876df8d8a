// Menu state machine: cursor movement, key handling and text rendering.
// Nothing in here touches the terminal; `ui` feeds keys in and writes the
// rendered frames out.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use tracing::debug;

use crate::api::Side;

/// Options shown on the main menu.
pub const DEFAULT_OPTIONS: [&str; 3] = [
    "Enter players in the team",
    "Select current side",
    "Reset",
];

const HEADER: &str = "Please choose one of the options below:\n\n";
const FOOTER: &str = "\n\nPress q to quit.\n";

/// Key presses the menu understands, already decoupled from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Up,
    Down,
    Quit,
    Other,
}

/// Which way the cursor moves for the up and down keys.
///
/// `Conventional` moves toward the end of the list on `Down`. `Inverted`
/// moves toward the end on `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Navigation {
    #[default]
    Conventional,
    Inverted,
}

impl FromStr for Navigation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conventional" | "normal" => Ok(Navigation::Conventional),
            "inverted" | "reversed" => Ok(Navigation::Inverted),
            other => anyhow::bail!("unknown navigation mode `{other}`"),
        }
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Navigation::Conventional => f.write_str("conventional"),
            Navigation::Inverted => f.write_str("inverted"),
        }
    }
}

/// Outcome of feeding one key to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Continue,
    Quit,
}

/// Cursor, options and the team's current side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    cursor: usize,
    options: Vec<String>,
    side: Side,
    navigation: Navigation,
}

impl Default for MenuState {
    fn default() -> Self {
        MenuState::new(DEFAULT_OPTIONS.iter().map(|s| s.to_string()).collect())
    }
}

impl MenuState {
    /// Menu over `options` with the cursor on the first row, attacking,
    /// using conventional navigation.
    pub fn new(options: Vec<String>) -> Self {
        MenuState {
            cursor: 0,
            options,
            side: Side::Attacker,
            navigation: Navigation::Conventional,
        }
    }

    /// Same menu with a different up/down mapping.
    pub fn with_navigation(mut self, navigation: Navigation) -> Self {
        self.navigation = navigation;
        self
    }

    /// Zero-based index of the highlighted row.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Text of the highlighted option, `None` for an empty menu.
    pub fn selected(&self) -> Option<&str> {
        self.options.get(self.cursor).map(String::as_str)
    }

    /// The team's current side.
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn set_side(&mut self, side: Side) {
        self.side = side;
    }

    pub fn navigation(&self) -> Navigation {
        self.navigation
    }

    /// Move one row toward the end of the list, stopping at the last row.
    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.options.len() {
            self.cursor += 1;
        }
    }

    /// Move one row toward the start of the list, stopping at the first row.
    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Put the cursor back on the first row and the side back to attack.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.side = Side::Attacker;
    }

    /// Apply one key. Only a quit key ends the menu; keys it does not know
    /// leave the state untouched.
    pub fn handle_key(&mut self, key: MenuKey) -> Transition {
        match (key, self.navigation) {
            (MenuKey::Quit, _) => return Transition::Quit,
            (MenuKey::Down, Navigation::Conventional) | (MenuKey::Up, Navigation::Inverted) => {
                self.select_next()
            }
            (MenuKey::Up, Navigation::Conventional) | (MenuKey::Down, Navigation::Inverted) => {
                self.select_prev()
            }
            (MenuKey::Other, _) => {}
        }
        Transition::Continue
    }
}

/// Render the whole menu as plain text, marking the cursor row with `>`.
pub fn render(state: &MenuState) -> String {
    let mut out = String::from(HEADER);
    for (i, option) in state.options.iter().enumerate() {
        let marker = if i == state.cursor { '>' } else { ' ' };
        out.push_str(&format!("{} {}) {}\n", marker, i + 1, option));
    }
    out.push_str(FOOTER);
    out.push('\n');
    out
}

/// Drive the menu: draw once, then apply one key at a time and redraw after
/// each, until a quit key arrives. Returns the number of frames drawn.
///
/// No frame is drawn for the quit key itself.
pub fn run_loop<K, D>(state: &mut MenuState, mut next_key: K, mut draw: D) -> Result<usize>
where
    K: FnMut() -> Result<MenuKey>,
    D: FnMut(&str) -> Result<()>,
{
    draw(&render(state))?;
    let mut frames = 1;
    loop {
        let key = next_key()?;
        if state.handle_key(key) == Transition::Quit {
            debug!(cursor = state.cursor, frames, "menu quit");
            return Ok(frames);
        }
        draw(&render(state))?;
        frames += 1;
    }
}
