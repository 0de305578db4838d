//! The port/baud selection dialog.
//!
//! [`PortSelectDialog`] owns every piece of dialog state: the displayed port
//! list, the baud list, both manual fields and their labels. It is driven by
//! [`PortSelectDialog::open_and_select`] on any [`DialogHost`], which makes the
//! whole flow testable without a terminal.

mod host;
mod timer;
mod validate;

pub use host::{DialogEvent, DialogHost};
pub use timer::RefreshTimer;
pub use validate::{
    accepts_manual_baud, is_valid_baud, is_valid_port, parse_baud, validate_port, SelectionError,
};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::{config::DialogConfig, i18n::lang, ports::PortSource};

/// The confirmed port and baud rate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub port: String,
    pub baud: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    Accepted(Selection),
    Rejected,
}

/// What the port list currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortList {
    Devices(Vec<String>),
    /// Rendered as a single "no ports available" placeholder entry.
    Empty,
}

impl PortList {
    pub fn from_devices(devices: Vec<String>) -> Self {
        if devices.is_empty() {
            PortList::Empty
        } else {
            PortList::Devices(devices)
        }
    }

    pub fn devices(&self) -> &[String] {
        match self {
            PortList::Devices(devices) => devices,
            PortList::Empty => &[],
        }
    }

    /// Number of rows the list occupies, counting the placeholder.
    pub fn rows(&self) -> usize {
        match self {
            PortList::Devices(devices) => devices.len(),
            PortList::Empty => 1,
        }
    }
}

#[derive(EnumIter, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    PortList,
    PortInput,
    BaudList,
    BaudInput,
    Confirm,
}

impl Focus {
    pub fn next(self) -> Self {
        Focus::iter()
            .cycle()
            .skip_while(|f| *f != self)
            .nth(1)
            .unwrap_or(self)
    }

    pub fn prev(self) -> Self {
        Focus::iter()
            .rev()
            .cycle()
            .skip_while(|f| *f != self)
            .nth(1)
            .unwrap_or(self)
    }
}

pub struct PortSelectDialog {
    source: Box<dyn PortSource>,
    config: DialogConfig,
    ports: PortList,
    port_selected: usize,
    baud_selected: usize,
    port_input: String,
    baud_input: String,
    port_error: Option<SelectionError>,
    baud_error: Option<SelectionError>,
    focus: Focus,
    outcome: Option<DialogOutcome>,
}

impl PortSelectDialog {
    pub fn new(source: Box<dyn PortSource>, config: DialogConfig) -> Self {
        let baud_selected = config.default_baud_index();
        let mut dialog = Self {
            source,
            config,
            ports: PortList::Empty,
            port_selected: 0,
            baud_selected,
            port_input: String::new(),
            baud_input: String::new(),
            port_error: None,
            baud_error: None,
            focus: Focus::PortList,
            outcome: None,
        };
        dialog.ports = PortList::from_devices(dialog.list_ports());
        log::info!(
            "dialog created with {} ports, baud preset {:?}",
            dialog.ports.devices().len(),
            dialog.config.baud_rates.get(dialog.baud_selected)
        );
        dialog
    }

    /// Query the port source. Failures count as "no ports".
    pub fn list_ports(&self) -> Vec<String> {
        match self.source.available_ports() {
            Ok(ports) => ports,
            Err(err) => {
                log::warn!("port source failed, showing no ports: {err:#}");
                Vec::new()
            }
        }
    }

    /// Re-query the port source and replace the displayed list if it changed.
    ///
    /// Returns `true` when the list was replaced. The highlighted entry stays on
    /// the same device if it is still present, otherwise it moves to the top.
    pub fn refresh_tick(&mut self) -> bool {
        let fresh = PortList::from_devices(self.list_ports());
        if fresh == self.ports {
            log::trace!("refresh_tick: port list unchanged");
            return false;
        }

        let previous = self.selected_device().map(str::to_owned);
        self.port_selected = previous
            .and_then(|name| fresh.devices().iter().position(|d| *d == name))
            .unwrap_or(0);
        log::debug!(
            "refresh_tick: port list changed to {:?}",
            fresh.devices()
        );
        self.ports = fresh;
        true
    }

    /// The effective port: manual text when non-empty, else the highlighted device.
    /// The placeholder entry never resolves to a port.
    pub fn resolve_port(&self) -> Option<String> {
        if !self.port_input.is_empty() {
            return Some(self.port_input.clone());
        }
        self.selected_device().map(str::to_owned)
    }

    /// The effective baud text: manual text when non-empty, else the highlighted list entry.
    pub fn resolve_baud(&self) -> String {
        if !self.baud_input.is_empty() {
            return self.baud_input.clone();
        }
        self.config
            .baud_rates
            .get(self.baud_selected)
            .map(u32::to_string)
            .unwrap_or_default()
    }

    /// Validate the resolved pair and close the dialog on success.
    ///
    /// On failure the dialog stays open, the offending field's label shows the
    /// error and typed text is kept. The port is checked before the baud rate.
    pub fn confirm(&mut self) -> Result<Selection, SelectionError> {
        let port_text = self.resolve_port().unwrap_or_default();
        let port = match validate_port(&port_text) {
            Ok(port) => port.to_string(),
            Err(err) => {
                log::info!("confirm rejected: {err}");
                self.port_error = Some(err.clone());
                return Err(err);
            }
        };
        self.port_error = None;

        let baud_text = self.resolve_baud();
        let baud = match parse_baud(&baud_text) {
            Ok(baud) => baud,
            Err(err) => {
                log::info!("confirm rejected: {err}");
                self.baud_error = Some(err.clone());
                return Err(err);
            }
        };
        self.baud_error = None;

        let selection = Selection { port, baud };
        log::info!(
            "confirm accepted: port={} baud={}",
            selection.port,
            selection.baud
        );
        self.outcome = Some(DialogOutcome::Accepted(selection.clone()));
        Ok(selection)
    }

    /// Dismiss the dialog without a selection.
    pub fn cancel(&mut self) {
        log::info!("dialog cancelled");
        self.outcome = Some(DialogOutcome::Rejected);
    }

    pub fn handle_event(&mut self, event: DialogEvent) {
        match event {
            DialogEvent::FocusNext => self.focus = self.focus.next(),
            DialogEvent::FocusPrev => self.focus = self.focus.prev(),
            DialogEvent::SelectNext => self.move_selection(true),
            DialogEvent::SelectPrev => self.move_selection(false),
            DialogEvent::Char(c) => self.type_char(c),
            DialogEvent::Backspace => {
                if let Some(field) = self.focused_field_mut() {
                    field.pop();
                }
            }
            DialogEvent::ClearField => {
                if let Some(field) = self.focused_field_mut() {
                    field.clear();
                }
            }
            DialogEvent::Confirm => {
                // Rejections are already reflected in the labels.
                let _ = self.confirm();
            }
            DialogEvent::Cancel => self.cancel(),
        }
    }

    /// Run the dialog on `host` until it is confirmed or dismissed.
    ///
    /// The refresh timer lives only for the duration of this call.
    pub fn open_and_select(&mut self, host: &mut dyn DialogHost) -> Result<Option<Selection>> {
        self.outcome = None;
        let mut timer = RefreshTimer::new(self.config.refresh_interval());
        timer.arm(host.now());

        while self.outcome.is_none() {
            host.render(self)?;

            let wait = timer.time_until_due(host.now());
            if let Some(event) = host.poll_event(wait)? {
                log::trace!("dialog event: {event:?}");
                self.handle_event(event);
            }

            if self.outcome.is_none() && timer.poll_due(host.now()) {
                self.refresh_tick();
            }
        }

        timer.disarm();
        Ok(self.selection().cloned())
    }

    pub fn is_open(&self) -> bool {
        self.outcome.is_none()
    }

    pub fn outcome(&self) -> Option<&DialogOutcome> {
        self.outcome.as_ref()
    }

    pub fn selection(&self) -> Option<&Selection> {
        match &self.outcome {
            Some(DialogOutcome::Accepted(selection)) => Some(selection),
            _ => None,
        }
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    pub fn ports(&self) -> &PortList {
        &self.ports
    }

    pub fn port_selected(&self) -> usize {
        self.port_selected
    }

    pub fn selected_device(&self) -> Option<&str> {
        self.ports
            .devices()
            .get(self.port_selected)
            .map(String::as_str)
    }

    pub fn baud_rates(&self) -> &[u32] {
        &self.config.baud_rates
    }

    pub fn baud_selected(&self) -> usize {
        self.baud_selected
    }

    pub fn port_input(&self) -> &str {
        &self.port_input
    }

    pub fn baud_input(&self) -> &str {
        &self.baud_input
    }

    pub fn set_port_input(&mut self, text: impl Into<String>) {
        self.port_input = text.into();
    }

    /// Replace the manual baud text. Returns `false` and leaves the field
    /// untouched when the text would not pass the field's input filter.
    pub fn set_baud_input(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if !accepts_manual_baud(&text, self.config.manual_baud_max) {
            return false;
        }
        self.baud_input = text;
        true
    }

    /// Highlight `port` in the list. Returns `false` if it is not listed.
    pub fn select_port(&mut self, port: &str) -> bool {
        match self.ports.devices().iter().position(|d| d == port) {
            Some(idx) => {
                self.port_selected = idx;
                true
            }
            None => false,
        }
    }

    /// Highlight `baud` in the list. Returns `false` if it is not listed.
    pub fn select_baud(&mut self, baud: u32) -> bool {
        match self.config.baud_rates.iter().position(|&b| b == baud) {
            Some(idx) => {
                self.baud_selected = idx;
                true
            }
            None => false,
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn port_error(&self) -> Option<&SelectionError> {
        self.port_error.as_ref()
    }

    pub fn baud_error(&self) -> Option<&SelectionError> {
        self.baud_error.as_ref()
    }

    /// Text of the label above the manual port field.
    pub fn port_label(&self) -> &'static str {
        match self.port_error {
            Some(_) => lang().invalid_port.as_str(),
            None => lang().port_input_label.as_str(),
        }
    }

    /// Text of the label above the manual baud field.
    pub fn baud_label(&self) -> &'static str {
        match self.baud_error {
            Some(_) => lang().invalid_baud.as_str(),
            None => lang().baud_input_label.as_str(),
        }
    }

    fn move_selection(&mut self, forward: bool) {
        let (selected, len) = match self.focus {
            Focus::PortList => (&mut self.port_selected, self.ports.devices().len()),
            Focus::BaudList => (&mut self.baud_selected, self.config.baud_rates.len()),
            _ => return,
        };
        if len == 0 {
            return;
        }
        *selected = if forward {
            (*selected + 1) % len
        } else if *selected == 0 {
            len - 1
        } else {
            *selected - 1
        };
    }

    fn type_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        match self.focus {
            Focus::PortInput => self.port_input.push(c),
            Focus::BaudInput => {
                let mut candidate = self.baud_input.clone();
                candidate.push(c);
                if !self.set_baud_input(candidate) {
                    log::trace!("baud field rejected keystroke {c:?}");
                }
            }
            _ => {}
        }
    }

    fn focused_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::PortInput => Some(&mut self.port_input),
            Focus::BaudInput => Some(&mut self.baud_input),
            _ => None,
        }
    }
}
