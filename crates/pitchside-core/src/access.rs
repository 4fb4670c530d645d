//! PIN access gate for administrative operations.
//!
//! The PIN is a shared secret set by whoever created the match. It is a
//! scorer-convenience gate, not a security boundary. Failed attempts are
//! never counted or throttled. Every admin view must re-check
//! the PIN when it is opened; callers may cache a grant only for the
//! lifetime of that view.

use crate::error::{Error, Result};
use crate::models::MatchRecord;

/// Outcome of a PIN check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Denied,
}

impl Access {
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Compare `supplied` with the record's PIN verbatim.
///
/// No trimming or numeric normalization: `"0420"` does not match `"420"`.
pub fn authorize(record: &MatchRecord, supplied: &str) -> Access {
    if record.pin.as_str() == supplied {
        Access::Granted
    } else {
        tracing::warn!(match_id = %record.id, "Rejected admin PIN");
        Access::Denied
    }
}

/// [`authorize`], surfacing a denial as [`Error::Unauthorized`].
pub fn require(record: &MatchRecord, supplied: &str) -> Result<()> {
    match authorize(record, supplied) {
        Access::Granted => Ok(()),
        Access::Denied => Err(Error::Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_pin(pin: &str) -> MatchRecord {
        MatchRecord::new("TeamA", "TeamB", pin.parse().unwrap()).unwrap()
    }

    #[test]
    fn grants_only_exact_match() {
        let record = record_with_pin("7391");
        assert_eq!(authorize(&record, "7390"), Access::Denied);
        assert_eq!(authorize(&record, "7391"), Access::Granted);
    }

    #[test]
    fn leading_zeros_are_significant() {
        let record = record_with_pin("0420");
        assert_eq!(authorize(&record, "420"), Access::Denied);
        assert_eq!(authorize(&record, "0420"), Access::Granted);
    }

    #[test]
    fn denies_every_other_four_digit_value() {
        let record = record_with_pin("5082");
        let granted = (0..10_000)
            .map(|value| format!("{value:04}"))
            .filter(|candidate| authorize(&record, candidate).is_granted())
            .collect::<Vec<_>>();
        assert_eq!(granted, vec!["5082".to_string()]);
    }

    #[test]
    fn no_whitespace_normalization() {
        let record = record_with_pin("1234");
        assert_eq!(authorize(&record, " 1234"), Access::Denied);
        assert_eq!(authorize(&record, "1234\n"), Access::Denied);
    }

    #[test]
    fn repeated_failures_do_not_lock_out() {
        let record = record_with_pin("1234");
        for _ in 0..20 {
            assert!(require(&record, "0000").is_err());
        }
        assert!(require(&record, "1234").is_ok());
    }

    #[test]
    fn require_maps_denial_to_unauthorized() {
        let record = record_with_pin("1234");
        assert!(matches!(require(&record, "4321"), Err(Error::Unauthorized)));
    }
}
