//! PIN credential types
//!
//! A [`Pin`] is the validated clear-text credential a caller supplies; it only
//! lives for the duration of a single operation. A [`PinHash`] is what an
//! account stores. There is no way to turn a hash back into a PIN.

use crate::types::error::LedgerError;
use sha2::{Digest, Sha256};
use std::fmt;

/// Number of digits in a PIN
pub const PIN_LENGTH: usize = 4;

/// A well-formed PIN: exactly four ASCII digits
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    /// Validate raw input as a PIN
    ///
    /// # Errors
    ///
    /// Returns a validation error unless `raw` is exactly four ASCII digits.
    /// Surrounding whitespace is not stripped.
    pub fn parse(raw: &str) -> Result<Self, LedgerError> {
        if raw.len() == PIN_LENGTH && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Pin(raw.to_string()))
        } else {
            Err(LedgerError::validation(
                "pin",
                "PIN must be exactly 4 digits (numbers only)",
            ))
        }
    }

    /// One-way hash of this PIN
    pub fn hash(&self) -> PinHash {
        PinHash(hex::encode(Sha256::digest(self.0.as_bytes())))
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

/// SHA-256 hex digest of a PIN
#[derive(Clone, PartialEq, Eq)]
pub struct PinHash(String);

impl PinHash {
    /// Check a PIN against this hash
    ///
    /// Hash comparison is the only verification path.
    pub fn verify(&self, pin: &Pin) -> bool {
        pin.hash() == *self
    }
}

impl fmt::Debug for PinHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PinHash(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::four_digits("1234")]
    #[case::leading_zeros("0007")]
    #[case::all_zero("0000")]
    fn test_parse_accepts_four_digits(#[case] raw: &str) {
        assert!(Pin::parse(raw).is_ok());
    }

    #[rstest]
    #[case::empty("")]
    #[case::too_short("123")]
    #[case::too_long("12345")]
    #[case::letters("12a4")]
    #[case::padded(" 1234")]
    #[case::negative("-123")]
    #[case::unicode_digits("١٢٣٤")]
    fn test_parse_rejects_malformed(#[case] raw: &str) {
        let err = Pin::parse(raw).unwrap_err();
        assert!(matches!(err, LedgerError::Validation { field: "pin", .. }));
    }

    #[test]
    fn test_hash_is_sha256_hex() {
        let hash = Pin::parse("1234").unwrap().hash();
        assert_eq!(
            hash.0,
            "03ac674216f3e15c761ee1a5e255f067953623c8b388b4459e13f978d7c846f4"
        );
    }

    #[test]
    fn test_verify_matches_only_same_pin() {
        let hash = Pin::parse("1234").unwrap().hash();
        assert!(hash.verify(&Pin::parse("1234").unwrap()));
        assert!(!hash.verify(&Pin::parse("4321").unwrap()));
    }

    #[test]
    fn test_debug_never_reveals_secret() {
        let pin = Pin::parse("9876").unwrap();
        assert_eq!(format!("{:?}", pin), "Pin(****)");
        assert!(!format!("{:?}", pin.hash()).contains('9'));
    }
}
