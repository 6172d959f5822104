mod draw;
mod events;
mod session;

pub use events::InputEvent;
pub use session::{Mode, Outcome, Session};

use std::io::{self, Stderr};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::{CrosstermBackend, Terminal};

use crate::error::Result;

/// Run the blocking read-eval-render loop until the user confirms or
/// cancels. Returns the confirmed path, or `None` on cancel.
///
/// The TUI draws on stderr: stdout is reserved for the selected path
/// so shell wrappers can capture it with `$(...)`. The terminal is
/// restored on every exit path, including render failures.
pub fn run(session: &mut Session, max_height: usize) -> Result<Option<String>> {
    let mut terminal = init_terminal()?;
    let result = event_loop(session, max_height, &mut terminal);
    restore_terminal(terminal)?;

    Ok(match result? {
        Outcome::Confirmed(path) => Some(path),
        Outcome::Cancelled => None,
    })
}

fn event_loop(
    session: &mut Session,
    max_height: usize,
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
) -> Result<Outcome> {
    loop {
        terminal.draw(|frame| draw::frame(frame, session, max_height))?;
        if let Some(event) = events::next()? {
            session.handle(event);
        }
        if let Some(outcome) = session.take_outcome() {
            return Ok(outcome);
        }
    }
}

fn init_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    enable_raw_mode()?;
    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stderr);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
