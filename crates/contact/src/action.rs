//! Outbound deep links.

use crate::error::{ContactError, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use std::fmt;

/// Everything except unreserved characters is escaped in the `text` parameter.
const MESSAGE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const WHATSAPP_BASE: &str = "https://wa.me";

/// A contact intent handed to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "channel")]
pub enum ContactAction {
    /// Open the dialer, optionally prefilled
    #[serde(rename = "call")]
    Dial {
        /// Dialable characters only; empty opens a blank dialer
        number: String,
    },
    /// Open a chat with a prefilled message
    #[serde(rename = "whatsapp")]
    WhatsApp {
        /// Digits only, country code included
        number: String,
        /// Message text, unencoded
        message: String,
    },
}

impl ContactAction {
    /// Dial intent; anything but digits, `+`, `*` and `#` is dropped.
    pub fn dial(number: &str) -> Self {
        Self::Dial {
            number: number
                .chars()
                .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '*' | '#'))
                .collect(),
        }
    }

    /// WhatsApp intent to `number` (digits kept, everything else dropped).
    pub fn whatsapp(number: &str, message: impl Into<String>) -> Result<Self> {
        let digits: String = number.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(ContactError::InvalidNumber(number.to_string()));
        }
        Ok(Self::WhatsApp {
            number: digits,
            message: message.into(),
        })
    }

    /// Deep-link URI.
    #[must_use]
    pub fn uri(&self) -> String {
        match self {
            Self::Dial { number } => format!("tel:{number}"),
            Self::WhatsApp { number, message } => format!(
                "{WHATSAPP_BASE}/{number}?text={}",
                utf8_percent_encode(message, MESSAGE)
            ),
        }
    }

    /// Short channel name.
    #[must_use]
    pub fn channel(&self) -> &'static str {
        match self {
            Self::Dial { .. } => "call",
            Self::WhatsApp { .. } => "whatsapp",
        }
    }
}

impl fmt::Display for ContactAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dial_strips_formatting() {
        let action = ContactAction::dial("+91 98220-12345");
        assert_eq!(action.uri(), "tel:+919822012345");
        assert_eq!(action.channel(), "call");
    }

    #[test]
    fn test_empty_dial_opens_dialer() {
        assert_eq!(ContactAction::dial("").uri(), "tel:");
    }

    #[test]
    fn test_whatsapp_encodes_message() {
        let action = ContactAction::whatsapp("+91 98765 43210", "Hi, need a mason & helper?").unwrap();
        assert_eq!(
            action.uri(),
            "https://wa.me/919876543210?text=Hi%2C%20need%20a%20mason%20%26%20helper%3F"
        );
        assert_eq!(action.to_string(), action.uri());
    }

    #[test]
    fn test_whatsapp_requires_digits() {
        assert_eq!(
            ContactAction::whatsapp("n/a", "hello"),
            Err(ContactError::InvalidNumber("n/a".to_string()))
        );
    }
}
