// 📐 Receipt Validation - shape and format checks on submitted JSON
//
// Checks run in a fixed order and the first failure is reported. A passing
// receipt comes back fully typed, so nothing downstream re-validates.

use crate::error::ValidationError;
use crate::receipt::{parse_amount, Item, Receipt, DATE_FORMAT, TIME_FORMAT};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde_json::Value;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Check a raw receipt without keeping the parsed form
pub fn validate(raw: &Value) -> ValidationResult<()> {
    parse_receipt(raw).map(|_| ())
}

/// Validate a raw receipt and build the typed [`Receipt`] from it.
///
/// Order: retailer, purchase date, purchase time, items (each item's
/// description then price), total.
pub fn parse_receipt(raw: &Value) -> ValidationResult<Receipt> {
    let retailer = non_blank_text(raw.get("retailer")).ok_or(ValidationError::Retailer)?;

    let purchase_date = text(raw.get("purchaseDate"))
        .and_then(parse_date)
        .ok_or(ValidationError::PurchaseDate)?;

    let purchase_time = text(raw.get("purchaseTime"))
        .and_then(parse_time)
        .ok_or(ValidationError::PurchaseTime)?;

    let raw_items = match raw.get("items") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return Err(ValidationError::Items),
    };

    let items = raw_items
        .iter()
        .map(parse_item)
        .collect::<ValidationResult<Vec<_>>>()?;

    let total = text(raw.get("total"))
        .and_then(parse_amount)
        .ok_or(ValidationError::Total)?;

    Ok(Receipt {
        retailer: retailer.to_string(),
        purchase_date,
        purchase_time,
        total,
        items,
    })
}

fn parse_item(raw: &Value) -> ValidationResult<Item> {
    let short_description = non_blank_text(raw.get("shortDescription"))
        .ok_or(ValidationError::ItemDescription)?;

    let price = text(raw.get("price"))
        .and_then(parse_amount)
        .filter(|price| *price >= Decimal::ZERO)
        .ok_or(ValidationError::ItemPrice)?;

    Ok(Item {
        short_description: short_description.to_string(),
        price,
    })
}

// ============================================================================
// FIELD HELPERS
// ============================================================================

fn text(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str)
}

/// String value with something other than whitespace in it
fn non_blank_text(value: Option<&Value>) -> Option<&str> {
    text(value).filter(|s| !s.trim().is_empty())
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

/// Strict `HH:MM`: exactly two digits, a colon, two digits.
///
/// chrono alone would also take single-digit hours, so the shape is checked
/// before handing off for the range checks.
fn parse_time(text: &str) -> Option<NaiveTime> {
    let bytes = text.as_bytes();
    let shaped = bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());

    if !shaped {
        return None;
    }

    NaiveTime::parse_from_str(text, TIME_FORMAT).ok()
}

// ============================================================================
// TESTS
// ============================================================================
