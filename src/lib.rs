//! comsel: a modal serial port and baud rate picker for the terminal.
//!
//! The dialog lists the serial devices attached to the host (refreshed every
//! second), offers a fixed set of common baud rates, accepts manual entry for
//! both values and validates the result before handing it back:
//!
//! ```no_run
//! match comsel::select_port_and_baud()? {
//!     Some(selection) => println!("{} @ {}", selection.port, selection.baud),
//!     None => println!("cancelled"),
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! The dialog core in [`dialog`] is independent of the terminal: any
//! [`dialog::DialogHost`] can drive it, and any [`ports::PortSource`] can feed
//! it devices.

#[doc(hidden)]
pub mod boot;
pub mod config;
pub mod dialog;
pub mod i18n;
pub mod ports;
pub mod tui;

pub use config::DialogConfig;
pub use dialog::{
    is_valid_baud, is_valid_port, DialogOutcome, PortSelectDialog, Selection, SelectionError,
};
pub use tui::{select_port_and_baud, select_port_and_baud_with};
