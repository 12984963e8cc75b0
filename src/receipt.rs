// 🧾 Receipt Model - validated, immutable purchase records
//
// Amounts are exact decimals and dates/times carry no time zone, so scoring
// never depends on float rounding or the host's local clock.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

// ============================================================================
// ITEM
// ============================================================================

/// One purchased line on a receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Description as submitted (untrimmed)
    pub short_description: String,

    /// Non-negative price
    pub price: Decimal,
}

impl Item {
    /// Length of the description with surrounding whitespace removed, in chars
    pub fn trimmed_description_len(&self) -> usize {
        self.short_description.trim().chars().count()
    }
}

// ============================================================================
// RECEIPT
// ============================================================================

/// A receipt that has passed validation.
///
/// Only [`crate::validation::parse_receipt`] builds these from untrusted input,
/// so holding a `Receipt` means every field is well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub retailer: String,
    pub purchase_date: NaiveDate,
    #[serde(serialize_with = "serialize_hhmm")]
    pub purchase_time: NaiveTime,
    pub total: Decimal,
    pub items: Vec<Item>,
}

fn serialize_hhmm<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&time.format(TIME_FORMAT))
}

/// Wire format of `purchaseDate`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format of `purchaseTime`
pub const TIME_FORMAT: &str = "%H:%M";

// ============================================================================
// AMOUNT PARSING
// ============================================================================

/// Parse decimal text such as `"35.35"` or `"-2"` into an exact [`Decimal`].
///
/// Accepts an optional leading `-`, digits, and an optional fractional part
/// with at least one digit. Whitespace, `+`, exponents and separators are
/// rejected, as is anything `Decimal` cannot hold without rounding.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let unsigned = text.strip_prefix('-').unwrap_or(text);

    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let all_digits =
        |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    if !all_digits(whole) || !fraction.map_or(true, all_digits) {
        return None;
    }

    // from_str rounds digits past what fits; a changed scale means it did
    let amount = Decimal::from_str(text).ok()?;
    let digits = fraction.map_or(0, str::len);
    (amount.scale() as usize == digits).then_some(amount)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_receipt() -> Receipt {
        Receipt {
            retailer: "Target".to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            purchase_time: NaiveTime::from_hms_opt(13, 1, 0).unwrap(),
            total: Decimal::new(3535, 2),
            items: vec![Item {
                short_description: "  Emils Cheese Pizza ".to_string(),
                price: Decimal::new(1225, 2),
            }],
        }
    }

    #[test]
    fn test_parse_amount_valid() {
        assert_eq!(parse_amount("35.35"), Some(Decimal::new(3535, 2)));
        assert_eq!(parse_amount("100"), Some(Decimal::new(100, 0)));
        assert_eq!(parse_amount("0.25"), Some(Decimal::new(25, 2)));
        assert_eq!(parse_amount("-1.50"), Some(Decimal::new(-150, 2)));
    }

    #[test]
    fn test_parse_amount_keeps_scale() {
        let amount = parse_amount("100.00").unwrap();
        assert_eq!(amount.to_string(), "100.00");
        assert_eq!(amount.scale(), 2);
    }

    #[test]
    fn test_parse_amount_rejects_malformed() {
        let malformed = [
            "", "-", ".", "1.", ".5", "+1.00", " 1.00", "1.00 ", "1e3", "1,000.00", "12.2.5", "abc",
            "NaN",
        ];
        for text in malformed {
            assert_eq!(parse_amount(text), None, "{text:?} should be rejected");
        }
    }

    #[test]
    fn test_parse_amount_rejects_overflow() {
        assert_eq!(parse_amount("99999999999999999999999999999999"), None);
    }

    #[test]
    fn test_parse_amount_rejects_excess_precision() {
        // 29 fractional digits would otherwise round to 0.25 and 5.00
        assert_eq!(parse_amount("0.25000000000000000000000000001"), None);
        assert_eq!(parse_amount("4.99999999999999999999999999999"), None);
        assert_eq!(parse_amount("99999999999999999999999999.999"), None);
    }

    #[test]
    fn test_parse_amount_accepts_full_precision() {
        let tiny = parse_amount("0.0000000000000000000000000001").unwrap();
        assert_eq!(tiny.scale(), 28);
        assert!(tiny > Decimal::ZERO);
    }

    #[test]
    fn test_trimmed_description_len() {
        let receipt = create_test_receipt();
        assert_eq!(receipt.items[0].trimmed_description_len(), 18);
    }

    #[test]
    fn test_serializes_wire_shape() {
        let json = serde_json::to_value(create_test_receipt()).unwrap();

        assert_eq!(json["retailer"], "Target");
        assert_eq!(json["purchaseDate"], "2022-01-01");
        assert_eq!(json["purchaseTime"], "13:01");
        assert_eq!(json["total"], "35.35");
        assert_eq!(json["items"][0]["price"], "12.25");
        assert_eq!(json["items"][0]["shortDescription"], "  Emils Cheese Pizza ");
    }
}
