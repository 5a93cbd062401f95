//! The row validation predicate.

use crate::error::{IngestError, Result};
use crate::record::{AddressRecord, RawRow, RecordField, FIRST_NAME_SHIPPING, LAST_NAME_SHIPPING};
use bulkorder_core::{Email, UsState, ZipCode};

/// Minimum length of the required free-text fields.
const MIN_TEXT_LEN: usize = 2;

fn required_text(row: &RawRow, field: RecordField) -> Option<String> {
    row.get(field.column())
        .filter(|value| value.chars().count() >= MIN_TEXT_LEN)
        .map(str::to_string)
}

/// Keep `value`, noting `field` as failing when it is `None`.
fn check<T>(failing: &mut Vec<RecordField>, field: RecordField, value: Option<T>) -> Option<T> {
    if value.is_none() {
        failing.push(field);
    }
    value
}

/// Validate one row, `position` being its 1-based index in the batch.
///
/// Every field is checked, so a rejection lists all failing fields in
/// column order. An absent or empty email is accepted. Empty shipping
/// overrides are treated as absent.
pub fn validate_row(row: &RawRow, position: usize) -> Result<AddressRecord> {
    use RecordField as F;

    let mut failing = Vec::new();
    let first_name = check(&mut failing, F::FirstName, required_text(row, F::FirstName));
    let last_name = check(&mut failing, F::LastName, required_text(row, F::LastName));
    let email = check(
        &mut failing,
        F::Email,
        row.get_non_empty(F::Email.column())
            .map(Email::new)
            .transpose()
            .ok(),
    );
    let street_address = check(
        &mut failing,
        F::StreetAddress,
        required_text(row, F::StreetAddress),
    );
    let city = check(&mut failing, F::City, required_text(row, F::City));
    let state = check(
        &mut failing,
        F::State,
        row.get(F::State.column()).and_then(|state| UsState::new(state).ok()),
    );
    let zip_code = check(
        &mut failing,
        F::ZipCode,
        row.get(F::ZipCode.column()).and_then(|zip| ZipCode::new(zip).ok()),
    );

    match (first_name, last_name, email, street_address, city, state, zip_code) {
        (
            Some(first_name),
            Some(last_name),
            Some(email),
            Some(street_address),
            Some(city),
            Some(state),
            Some(zip_code),
        ) => Ok(AddressRecord {
            first_name,
            last_name,
            email,
            street_address,
            city,
            state,
            zip_code,
            first_name_shipping: row.get_non_empty(FIRST_NAME_SHIPPING).map(str::to_string),
            last_name_shipping: row.get_non_empty(LAST_NAME_SHIPPING).map(str::to_string),
        }),
        _ => Err(IngestError::InvalidRow {
            row: position,
            content: row.to_json(),
            fields: failing,
        }),
    }
}
