//! Administration PIN

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Four-digit shared secret chosen when a match is created.
///
/// Stored and compared verbatim as text: `"0420"` and `"420"` are different
/// values, and only the former is a valid PIN.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pin(String);

impl Pin {
    pub const LEN: usize = 4;

    /// Generate a random PIN in `1000..=9999`
    #[must_use]
    pub fn generate() -> Self {
        let value: u16 = rand::thread_rng().gen_range(1000..=9999);
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(value: &str) -> Result<(), String> {
        if value.len() == Self::LEN && value.bytes().all(|byte| byte.is_ascii_digit()) {
            Ok(())
        } else {
            Err(format!("PIN must be exactly {} digits", Self::LEN))
        }
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin([REDACTED])")
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Pin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::validate(s)?;
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for Pin {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::validate(&value)?;
        Ok(Self(value))
    }
}

impl From<Pin> for String {
    fn from(pin: Pin) -> Self {
        pin.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_four_digits_including_leading_zero() {
        assert_eq!("0420".parse::<Pin>().unwrap().as_str(), "0420");
        assert!("420".parse::<Pin>().is_err());
        assert!("12345".parse::<Pin>().is_err());
        assert!("12a4".parse::<Pin>().is_err());
        assert!(" 123".parse::<Pin>().is_err());
    }

    #[test]
    fn generated_pins_are_in_range() {
        for _ in 0..500 {
            let pin = Pin::generate();
            let value: u32 = pin.as_str().parse().unwrap();
            assert!((1000..=9999).contains(&value));
        }
    }

    #[test]
    fn debug_does_not_leak_value() {
        let pin: Pin = "7391".parse().unwrap();
        assert!(!format!("{pin:?}").contains("7391"));
    }

    #[test]
    fn deserialize_rejects_malformed_pin() {
        assert!(serde_json::from_str::<Pin>("\"99\"").is_err());
        assert!(serde_json::from_str::<Pin>("\"0099\"").is_ok());
    }
}
