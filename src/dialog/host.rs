use anyhow::Result;
use std::time::{Duration, Instant};

use super::PortSelectDialog;

/// Input the dialog understands, already decoupled from any key encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    FocusNext,
    FocusPrev,
    /// Move the highlighted entry of the focused list up.
    SelectPrev,
    /// Move the highlighted entry of the focused list down.
    SelectNext,
    Char(char),
    Backspace,
    /// Empty the focused text field.
    ClearField,
    Confirm,
    Cancel,
}

/// The environment a dialog runs in: a rendering surface, an input source
/// and the clock the refresh timer is measured against.
pub trait DialogHost {
    fn now(&self) -> Instant;

    fn render(&mut self, dialog: &PortSelectDialog) -> Result<()>;

    /// Wait up to `timeout` for the next input event.
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<DialogEvent>>;
}
