//! Raw input rows and validated address records.

use bulkorder_core::{Email, UsState, ZipCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One input row as read: column name to trimmed value, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<(String, String)>,
}

impl RawRow {
    /// Build a row from `(column, value)` pairs. Values are trimmed.
    pub fn new<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.as_ref().trim().to_string()))
                .collect(),
        }
    }

    /// Value of a column; `None` if the column is absent.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Value of a column, treating an empty value as absent.
    #[must_use]
    pub fn get_non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|value| !value.is_empty())
    }

    /// Render as a JSON object, preserving column order.
    #[must_use]
    pub fn to_json(&self) -> String {
        let body = self
            .fields
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}:{}",
                    serde_json::Value::String(k.clone()),
                    serde_json::Value::String(v.clone())
                )
            })
            .collect::<Vec<_>>()
            .join(",");
        format!("{{{body}}}")
    }
}

impl fmt::Display for RawRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

/// Fields checked by the validation predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    /// Contact first name
    FirstName,
    /// Contact last name
    LastName,
    /// Optional contact email
    Email,
    /// Street address
    StreetAddress,
    /// City
    City,
    /// Two-letter state code
    State,
    /// ZIP or ZIP+4
    ZipCode,
}

impl RecordField {
    /// Header name of the input column.
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::StreetAddress => "street_address",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zip_code",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Shipping override columns.
pub(crate) const FIRST_NAME_SHIPPING: &str = "first_name_shipping";
pub(crate) const LAST_NAME_SHIPPING: &str = "last_name_shipping";

/// One validated person/address to submit.
///
/// Only [`validate_row`](crate::validate_row) constructs these from input,
/// so every instance satisfies the validation predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    /// Contact first name
    pub first_name: String,
    /// Contact last name
    pub last_name: String,
    /// Optional contact email
    pub email: Option<Email>,
    /// Street address
    pub street_address: String,
    /// City
    pub city: String,
    /// State code
    pub state: UsState,
    /// ZIP code
    pub zip_code: ZipCode,
    /// Shipping first name override
    pub first_name_shipping: Option<String>,
    /// Shipping last name override
    pub last_name_shipping: Option<String>,
}

impl AddressRecord {
    /// Contact name as `first last`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// First name for the shipping section, override first.
    #[must_use]
    pub fn shipping_first_name(&self) -> &str {
        self.first_name_shipping
            .as_deref()
            .unwrap_or(&self.first_name)
    }

    /// Last name for the shipping section, override first.
    #[must_use]
    pub fn shipping_last_name(&self) -> &str {
        self.last_name_shipping
            .as_deref()
            .unwrap_or(&self.last_name)
    }

    /// Email for the contact section; empty when absent.
    #[must_use]
    pub fn contact_email(&self) -> &str {
        self.email.as_ref().map_or("", Email::as_str)
    }
}
