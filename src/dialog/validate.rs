//! Pure validation rules for the two values the dialog negotiates.
//!
//! Nothing here touches the rendering surface, so the rules can be checked
//! directly without a terminal.

use derive_more::{Display, Error};
use once_cell::sync::Lazy;
use regex::Regex;

static PORT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^COM[0-9]+$").expect("port pattern is a valid regex"));

/// Reason a confirmation attempt was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SelectionError {
    #[display("invalid port identifier {input:?}")]
    InvalidPort { input: String },
    #[display("invalid baud rate {input:?}")]
    InvalidBaud { input: String },
}

/// `COM` followed by one or more ASCII digits, nothing else.
pub fn is_valid_port(port: &str) -> bool {
    PORT_PATTERN.is_match(port)
}

/// Digits only, no leading zero, strictly positive and within `u32`.
pub fn is_valid_baud(baud: &str) -> bool {
    parse_baud(baud).is_ok()
}

pub fn validate_port(port: &str) -> Result<&str, SelectionError> {
    if is_valid_port(port) {
        Ok(port)
    } else {
        Err(SelectionError::InvalidPort {
            input: port.to_string(),
        })
    }
}

pub fn parse_baud(baud: &str) -> Result<u32, SelectionError> {
    let invalid = || SelectionError::InvalidBaud {
        input: baud.to_string(),
    };

    if baud.is_empty() || !baud.bytes().all(|b| b.is_ascii_digit()) || baud.starts_with('0') {
        return Err(invalid());
    }

    match baud.parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(invalid()),
    }
}

/// Keystroke filter for the manual baud field.
///
/// Accepts the candidate text when it is empty or all digits with a value not
/// above `max`. The lower bound is left to [`parse_baud`] so the user can pass
/// through intermediate text while typing.
pub fn accepts_manual_baud(candidate: &str, max: u32) -> bool {
    if candidate.is_empty() {
        return true;
    }
    if !candidate.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    candidate
        .parse::<u64>()
        .is_ok_and(|value| value <= u64::from(max))
}
