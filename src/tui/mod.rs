pub mod input;
pub mod ui;

use anyhow::{Context, Result};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};

use crate::{
    config::DialogConfig,
    dialog::{DialogEvent, DialogHost, PortSelectDialog, Selection},
    ports::{PortSource, SerialPortSource},
};

/// Runs the dialog full-screen on the controlling terminal.
///
/// Raw mode and the alternate screen are entered on construction and left
/// again on drop, including when the event loop bails out with an error.
pub struct TerminalHost {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalHost {
    pub fn new() -> Result<Self> {
        crossterm::terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(err) = crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen) {
            let _ = crossterm::terminal::disable_raw_mode();
            return Err(err).context("Failed to enter alternate screen");
        }

        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(err) => {
                restore_terminal();
                return Err(err).context("Failed to initialize terminal backend");
            }
        };
        log::info!("[TUI] terminal host ready");
        Ok(Self { terminal })
    }
}

fn restore_terminal() {
    if let Err(err) = crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)
    {
        log::error!("[TUI] failed to leave alternate screen: {err}");
    }
    if let Err(err) = crossterm::terminal::disable_raw_mode() {
        log::error!("[TUI] failed to disable raw mode: {err}");
    }
}

impl Drop for TerminalHost {
    fn drop(&mut self) {
        if let Err(err) = self.terminal.show_cursor() {
            log::warn!("[TUI] failed to show cursor: {err}");
        }
        restore_terminal();
        log::info!("[TUI] terminal restored");
    }
}

impl DialogHost for TerminalHost {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn render(&mut self, dialog: &PortSelectDialog) -> Result<()> {
        self.terminal
            .draw(|f| ui::render_dialog(f, dialog))
            .context("Failed to draw dialog")?;
        Ok(())
    }

    fn poll_event(&mut self, timeout: Duration) -> Result<Option<DialogEvent>> {
        if !crossterm::event::poll(timeout).context("Failed to poll terminal input")? {
            return Ok(None);
        }
        let event = crossterm::event::read().context("Failed to read terminal input")?;
        Ok(input::map_event(&event))
    }
}

/// Open the dialog on the terminal with the system port enumeration and
/// default settings. Returns `None` when the user cancels.
pub fn select_port_and_baud() -> Result<Option<Selection>> {
    select_port_and_baud_with(Box::new(SerialPortSource), DialogConfig::default())
}

pub fn select_port_and_baud_with(
    source: Box<dyn PortSource>,
    config: DialogConfig,
) -> Result<Option<Selection>> {
    let mut dialog = PortSelectDialog::new(source, config);
    let mut host = TerminalHost::new()?;
    let selection = dialog.open_and_select(&mut host);
    // Leave the alternate screen before the caller prints anything.
    drop(host);
    selection
}
