//! Port sources: where the dialog gets its list of serial devices from.

mod serial;

pub use serial::{sort_and_dedup_ports, SerialPortSource};

use anyhow::Result;

/// Enumerates the serial devices currently attached to the host.
///
/// Queried once when the dialog is built and again on every refresh tick, so
/// implementations should answer quickly and synchronously.
pub trait PortSource {
    fn available_ports(&self) -> Result<Vec<String>>;
}

impl<F> PortSource for F
where
    F: Fn() -> Result<Vec<String>>,
{
    fn available_ports(&self) -> Result<Vec<String>> {
        self()
    }
}

/// A port source that always reports the same devices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedPortSource {
    ports: Vec<String>,
}

impl FixedPortSource {
    pub fn new<I, S>(ports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ports: ports.into_iter().map(Into::into).collect(),
        }
    }

    /// Build from a comma separated list, ignoring blank entries.
    pub fn parse(list: &str) -> Self {
        Self::new(
            list.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty()),
        )
    }
}

impl PortSource for FixedPortSource {
    fn available_ports(&self) -> Result<Vec<String>> {
        Ok(self.ports.clone())
    }
}
