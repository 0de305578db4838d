use anyhow::{Context, Result};
use serialport::{SerialPortInfo, SerialPortType};
use std::{cmp::Ordering, collections::HashSet};

use super::PortSource;

/// Port source backed by the platform enumeration of the `serialport` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialPortSource;

impl PortSource for SerialPortSource {
    fn available_ports(&self) -> Result<Vec<String>> {
        let raw_ports = serialport::available_ports().context("Failed to enumerate serial ports")?;
        log::trace!("serialport reported {} devices", raw_ports.len());
        Ok(sort_and_dedup_ports(raw_ports)
            .into_iter()
            .map(|p| p.port_name)
            .collect())
    }
}

fn dedup_key(p: &SerialPortInfo) -> String {
    let base = match p.port_name.rsplit('/').next() {
        Some(b) => b.to_lowercase(),
        None => p.port_name.to_lowercase(),
    };
    match &p.port_type {
        SerialPortType::UsbPort(info) => {
            format!("{}:vid={:04x}:pid={:04x}", base, info.vid, info.pid)
        }
        _ => base,
    }
}

// USB/ACM adapters first, then built-in UARTs, then anything else.
fn priority(name: &str) -> i32 {
    let n = name.to_lowercase();
    if n.contains("ttyusb") || n.contains("usb") {
        0
    } else if n.contains("acm") {
        1
    } else if n.contains("ttys") || n.contains("serial") {
        2
    } else {
        10
    }
}

/// Split a trailing decimal number off a device name, so "COM10" sorts after "COM9".
fn split_trailing_number(name: &str) -> (&str, Option<u64>) {
    let digits = name
        .bytes()
        .rev()
        .take_while(|b| b.is_ascii_digit())
        .count();
    let (stem, number) = name.split_at(name.len() - digits);
    (stem, number.parse().ok())
}

fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (stem_a, num_a) = split_trailing_number(a);
    let (stem_b, num_b) = split_trailing_number(b);
    stem_a
        .cmp(stem_b)
        .then(num_a.cmp(&num_b))
        .then_with(|| a.cmp(b))
}

/// Drop duplicate device entries and order the rest for display.
pub fn sort_and_dedup_ports(raw_ports: Vec<SerialPortInfo>) -> Vec<SerialPortInfo> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut ports: Vec<SerialPortInfo> = raw_ports
        .into_iter()
        .filter(|p| seen.insert(dedup_key(p)))
        .collect();

    ports.sort_by(|a, b| {
        priority(&a.port_name)
            .cmp(&priority(&b.port_name))
            .then_with(|| natural_cmp(&a.port_name, &b.port_name))
    });

    ports
}

#[cfg(test)]
mod tests {
    use super::*;
    use serialport::UsbPortInfo;

    fn make(name: &str) -> SerialPortInfo {
        SerialPortInfo {
            port_name: name.to_string(),
            port_type: SerialPortType::Unknown,
        }
    }

    fn usb(name: &str, vid: u16, pid: u16) -> SerialPortInfo {
        SerialPortInfo {
            port_name: name.to_string(),
            port_type: SerialPortType::UsbPort(UsbPortInfo {
                vid,
                pid,
                serial_number: None,
                manufacturer: None,
                product: None,
            }),
        }
    }

    fn names(ports: Vec<SerialPortInfo>) -> Vec<String> {
        ports.into_iter().map(|p| p.port_name).collect()
    }

    #[test]
    fn usb_and_acm_sort_before_builtin_uarts() {
        let input = vec![
            make("/dev/ttyS1"),
            make("/dev/ttyUSB0"),
            make("/dev/ttyACM0"),
            make("/dev/ttyS0"),
        ];
        assert_eq!(
            names(sort_and_dedup_ports(input)),
            vec!["/dev/ttyUSB0", "/dev/ttyACM0", "/dev/ttyS0", "/dev/ttyS1"]
        );
    }

    #[test]
    fn com_ports_sort_numerically() {
        let input = vec![make("COM10"), make("COM2"), make("COM1")];
        assert_eq!(
            names(sort_and_dedup_ports(input)),
            vec!["COM1", "COM2", "COM10"]
        );
    }

    #[test]
    fn duplicate_device_nodes_are_dropped() {
        let input = vec![
            usb("/dev/cu.usbserial", 0x0403, 0x6001),
            usb("/dev/tty.usbserial", 0x0403, 0x6001),
            usb("/dev/tty.usbserial", 0x0403, 0x6001),
            make("COM3"),
            make("com3"),
        ];
        let out = names(sort_and_dedup_ports(input));
        assert_eq!(out.len(), 3);
        assert_eq!(out.iter().filter(|n| n.contains("usbserial")).count(), 2);
        assert!(out.contains(&"COM3".to_string()));
    }
}
