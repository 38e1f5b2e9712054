//! Live terminal UI for interactive analysis.
//!
//! Feature-gated behind `tui`. Launch with `--tui` on the CLI. The dataset
//! is loaded once; adjusting the rolling window or anomaly threshold
//! recomputes only the affected derivations.

mod controls;
mod layout;
/// Application state and recomputation.
pub mod runtime;
mod style;

use std::error::Error;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::analysis::types::ConsumptionRecord;
use crate::config::AnalysisConfig;
use runtime::App;

/// Input poll interval; the UI only changes on key presses.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Launches the TUI for an already-loaded dataset.
///
/// Sets up the terminal (raw mode, alternate screen), runs the event loop,
/// and restores the terminal on exit.
///
/// # Errors
///
/// Returns an error if the initial pipeline run or terminal handling fails.
pub fn run(records: Vec<ConsumptionRecord>, cfg: &AnalysisConfig) -> Result<(), Box<dyn Error>> {
    let mut app = App::new(records, cfg)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
    };

    let result = event_loop(&mut terminal, &mut app);

    // Teardown — always restore terminal state
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    result.map_err(Into::into)
}

/// Core event loop: draw, poll input, apply parameter changes.
fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| layout::render(frame, app))?;

        if app.quit {
            return Ok(());
        }

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                controls::handle_key(app, key);
            }
        }
    }
}
