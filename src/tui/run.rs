//! TUI effects boundary: render surface, terminal lifecycle, key mapping,
//! and the blocking decision loop.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to a [`Surface`]. The loop is strictly
//! draw → read one key → transition, on a single thread.

use std::io::{self, Stdout};

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{Dispatch, debug, info};

use crate::types::{CandidateMap, SaveChoice, Shortlist, Summary};

use super::state::{Action, Session, Transition, Ui};
use super::update::{update, update_menu};
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action. Command keys only
/// count when typed plainly (Shift allowed, for `?`).
pub fn map_key(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if key.modifiers != KeyModifiers::NONE && key.modifiers != KeyModifiers::SHIFT {
        return None;
    }

    match key.code {
        KeyCode::Char('y') => Some(Action::Yes),
        KeyCode::Char('n') => Some(Action::No),
        KeyCode::Char('s') => Some(Action::Skip),
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char(c @ '0'..='9') => Some(Action::NumberKey(c as u8 - b'0')),
        _ => None,
    }
}

// ============================================================================
// RENDER SURFACE
// ============================================================================

/// Something the surface reports back while the engine is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A key press.
    Key(KeyEvent),
    /// The surface changed size; the current screen must be redrawn.
    Resize,
}

/// Somewhere to draw a [`Ui`] and read keys from.
pub trait Surface {
    /// Clear and redraw the whole surface.
    fn draw(&mut self, ui: &Ui<'_>) -> io::Result<()>;

    /// Block until the next key press or resize.
    fn read_input(&mut self) -> io::Result<Input>;
}

/// The real terminal: raw mode on the alternate screen.
pub struct TerminalSurface {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSurface {
    /// Enter raw mode and the alternate screen.
    ///
    /// The terminal is restored on drop and on panic.
    pub fn open() -> io::Result<Self> {
        install_panic_hook();
        enable_raw_mode()?;
        io::stdout().execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Surface for TerminalSurface {
    fn draw(&mut self, ui: &Ui<'_>) -> io::Result<()> {
        self.terminal.draw(|frame| render(ui, frame))?;
        Ok(())
    }

    fn read_input(&mut self) -> io::Result<Input> {
        loop {
            match event::read()? {
                // Release/repeat events arrive on some platforms; only presses count.
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(Input::Key(key)),
                Event::Resize(..) => return Ok(Input::Resize),
                _ => {}
            }
        }
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        let _ = restore_terminal();
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// SHORTLISTING ENGINE
// ============================================================================

/// How the review phase ended.
#[derive(Debug, PartialEq)]
pub enum Review {
    /// Every word was visited.
    Completed {
        candidates: CandidateMap,
        shortlist: Shortlist,
    },
    /// The user pressed `q`; the partial shortlist is gone.
    Aborted,
}

/// How the whole interactive run ended.
#[derive(Debug, PartialEq)]
pub enum Exit {
    /// Quit during review. Nothing to save.
    Aborted,
    /// Review finished and the user picked a save option.
    Completed {
        shortlist: Shortlist,
        choice: SaveChoice,
    },
}

/// Drives a session against a surface, logging through its own dispatcher.
pub struct Shortlister<S: Surface> {
    surface: S,
    log: Dispatch,
}

impl<S: Surface> Shortlister<S> {
    pub fn new(surface: S, log: Dispatch) -> Self {
        Self { surface, log }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Review every candidate, one key per decision.
    pub fn review(&mut self, candidates: CandidateMap) -> io::Result<Review> {
        let _log = tracing::dispatcher::set_default(&self.log);
        info!(
            words = candidates.len(),
            candidates = candidates.total_values(),
            "shortlisting session started"
        );

        let mut transition = Session::start(candidates);
        loop {
            let session = match transition {
                Transition::Review(session) => session,
                Transition::Finished { candidates, shortlist } => {
                    info!(accepted = shortlist.total_values(), "shortlisting session finished");
                    return Ok(Review::Completed { candidates, shortlist });
                }
                Transition::Quit => {
                    info!("quit requested; discarding shortlist");
                    return Ok(Review::Aborted);
                }
            };

            self.surface.draw(&session.ui())?;
            let action = match self.surface.read_input()? {
                Input::Key(key) => map_key(key),
                Input::Resize => None,
            };

            transition = match action {
                Some(action) => {
                    if let Some((word, candidate)) = session.current() {
                        debug!(word, candidate, ?action, mode = ?session.mode(), "decision");
                    }
                    update(session, &action)
                }
                None => Transition::Review(session),
            };
        }
    }

    /// Show the summary and block until a save option is picked.
    pub fn choose(&mut self, summary: &Summary) -> io::Result<SaveChoice> {
        let _log = tracing::dispatcher::set_default(&self.log);

        loop {
            self.surface.draw(&Ui::Summary(summary))?;
            let Input::Key(key) = self.surface.read_input()? else {
                continue;
            };
            if let Some(choice) = map_key(key).as_ref().and_then(update_menu) {
                info!(?choice, "save option chosen");
                return Ok(choice);
            }
        }
    }

    /// Review, then (unless aborted) summarise and ask how to save.
    pub fn run(&mut self, candidates: CandidateMap) -> io::Result<Exit> {
        match self.review(candidates)? {
            Review::Aborted => Ok(Exit::Aborted),
            Review::Completed { candidates, shortlist } => {
                let summary = Summary::new(&candidates, &shortlist);
                let choice = self.choose(&summary)?;
                Ok(Exit::Completed { shortlist, choice })
            }
        }
    }
}

/// Run the interactive session on the real terminal.
///
/// The terminal is restored before this returns, whatever the outcome.
pub fn run(candidates: CandidateMap, log: Dispatch) -> io::Result<Exit> {
    let surface = TerminalSurface::open()?;
    let mut shortlister = Shortlister::new(surface, log);
    shortlister.run(candidates)
}

// ============================================================================
// TESTS
// ============================================================================
