//! Validated field types shared across bulk-order.
//!
//! These newtypes can only be constructed from values that satisfy the
//! shape the order form accepts, so a record holding them is known-good.

use crate::error::OrderError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Two-letter codes accepted by the order form: the 50 states, DC, Puerto Rico
/// and the US Virgin Islands.
pub const US_STATE_CODES: [&str; 53] = [
    "AK", "AL", "AR", "AZ", "CA", "CO", "CT", "DC", "DE", "FL", "GA", "HI", "IA", "ID", "IL",
    "IN", "KS", "KY", "LA", "MA", "MD", "ME", "MI", "MN", "MO", "MS", "MT", "NC", "ND", "NE",
    "NH", "NJ", "NM", "NV", "NY", "OH", "OK", "OR", "PA", "PR", "RI", "SC", "SD", "TN", "TX",
    "UT", "VA", "VI", "VT", "WA", "WI", "WV", "WY",
];

/// Newtype for US state/territory/DC codes.
///
/// Codes are matched case-sensitively against [`US_STATE_CODES`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UsState(String);

impl UsState {
    /// Create a new `UsState` from a string.
    ///
    /// # Errors
    /// Returns error if the code is not in the fixed set.
    pub fn new(code: impl Into<String>) -> Result<Self, OrderError> {
        let code = code.into();
        if US_STATE_CODES.contains(&code.as_str()) {
            Ok(Self(code))
        } else {
            Err(OrderError::Validation(format!(
                "invalid state: must be a two-letter US state code, got '{code}'"
            )))
        }
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UsState {
    type Error = OrderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UsState> for String {
    fn from(state: UsState) -> Self {
        state.0
    }
}

impl fmt::Display for UsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for ZIP codes: `12345` or `12345-6789`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZipCode(String);

impl ZipCode {
    /// Create a new `ZipCode` from a string.
    ///
    /// # Errors
    /// Returns error if the value is neither ZIP nor ZIP+4.
    pub fn new(zip: impl Into<String>) -> Result<Self, OrderError> {
        static ZIP_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = ZIP_REGEX
            .get_or_init(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("valid regex"));

        let zip = zip.into();
        if regex.is_match(&zip) {
            Ok(Self(zip))
        } else {
            Err(OrderError::Validation(format!(
                "invalid zip code: must be 5 digits or 5+4 digits, got '{zip}'"
            )))
        }
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ZipCode {
    type Error = OrderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ZipCode> for String {
    fn from(zip: ZipCode) -> Self {
        zip.0
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for contact emails in the simple `local@domain.tld` shape.
///
/// The local part is word characters, the domain letters or underscores,
/// and the top-level domain two or three letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Create a new `Email` from a string.
    ///
    /// # Errors
    /// Returns error if the value does not match `local@domain.tld`.
    pub fn new(email: impl Into<String>) -> Result<Self, OrderError> {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"^[A-Za-z0-9_]+@[A-Za-z_]+\.[A-Za-z]{2,3}$").expect("valid regex")
        });

        let email = email.into();
        if regex.is_match(&email) {
            Ok(Self(email))
        } else {
            Err(OrderError::Validation(format!(
                "invalid email: expected local@domain.tld, got '{email}'"
            )))
        }
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = OrderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_codes_are_unique() {
        let mut codes = US_STATE_CODES.to_vec();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 53);
    }

    #[test]
    fn test_state_valid() {
        for code in ["NY", "DC", "PR", "VI", "WY", "AK"] {
            assert!(UsState::new(code).is_ok(), "Failed for: {code}");
        }
    }

    #[test]
    fn test_state_invalid() {
        for code in ["ny", "XX", "GU", "N", "NYC", "", " NY"] {
            assert!(UsState::new(code).is_err(), "Should fail for: {code}");
        }
    }

    #[test]
    fn test_zip_valid() {
        let zip = ZipCode::new("10001").expect("valid zip");
        assert_eq!(zip.as_str(), "10001");

        let zip = ZipCode::new("10001-1234").expect("valid zip+4");
        assert_eq!(zip.to_string(), "10001-1234");
    }

    #[test]
    fn test_zip_invalid() {
        for zip in ["1000", "100011", "10001-123", "10001 1234", "abcde", "", "١٢٣٤٥"] {
            assert!(ZipCode::new(zip).is_err(), "Should fail for: {zip}");
        }
    }

    #[test]
    fn test_email_valid() {
        for email in ["jo@example.com", "jo_li@mail.io", "J0@ex_ample.org"] {
            assert!(Email::new(email).is_ok(), "Failed for: {email}");
        }
    }

    #[test]
    fn test_email_invalid() {
        let invalid = [
            "jo.li@example.com", // dot in local part
            "jo@example.info",   // four-letter TLD
            "jo@mail.example.com",
            "jo@example",
            "@example.com",
            "jo@exa-mple.com",
            "",
        ];

        for email in invalid {
            assert!(Email::new(email).is_err(), "Should fail for: {email}");
        }
    }

    #[test]
    fn test_serde_rejects_invalid_state() {
        let ok: UsState = serde_json::from_str("\"CA\"").expect("deserialize state");
        assert_eq!(ok.as_str(), "CA");

        let bad: Result<UsState, _> = serde_json::from_str("\"ZZ\"");
        assert!(bad.is_err());
    }
}
