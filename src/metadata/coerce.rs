//! Best-effort conversion of analyzer scalars into typed numbers.
//!
//! MediaInfo's JSON output carries almost every value as a string
//! (`"OverallBitRate": "320000"`), but numbers do show up, and some fields
//! hold free text where a number was expected. Every function here is
//! total: anything that isn't a usable number becomes `None`.

use serde_json::Value;

/// Coerce a JSON scalar into an integer of type `T`.
///
/// Integer numbers are used as-is; decimal numbers and decimal strings are
/// truncated toward zero. Values that don't fit `T` (e.g. a negative track
/// number into `u32`) are absent.
pub fn integer<T: TryFrom<i64>>(value: Option<&Value>) -> Option<T> {
    let raw = match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate))?,
        Value::String(s) => parse_integer(s)?,
        _ => return None,
    };
    T::try_from(raw).ok()
}

/// Coerce a JSON scalar into a finite decimal.
pub fn decimal(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Coerce a recording date into a year.
///
/// Accepts everything [`integer`] accepts, plus date strings that start
/// with a four-digit year (`"2004-03-12"`, `"2004/03"`).
pub fn year(value: Option<&Value>) -> Option<i32> {
    integer(value).or_else(|| match value? {
        Value::String(s) => leading_year(s.trim()),
        _ => None,
    })
}

fn parse_integer(s: &str) -> Option<i64> {
    let s = s.trim();
    s.parse::<i64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().and_then(truncate))
}

fn truncate(f: f64) -> Option<i64> {
    // the range check also rejects NaN and infinities
    if f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

fn leading_year(s: &str) -> Option<i32> {
    let digits = s.get(..4)?;
    let followed_by_digit = s[4..].chars().next().is_some_and(|c| c.is_ascii_digit());
    if digits.bytes().all(|b| b.is_ascii_digit()) && !followed_by_digit {
        digits.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_from_string_and_number() {
        assert_eq!(integer::<u32>(Some(&json!("128"))), Some(128));
        assert_eq!(integer::<u32>(Some(&json!(128))), Some(128));
    }

    #[test]
    fn test_integer_absent_cases() {
        assert_eq!(integer::<u32>(Some(&Value::Null)), None);
        assert_eq!(integer::<u32>(Some(&json!("not-a-number"))), None);
        assert_eq!(integer::<u32>(Some(&json!(""))), None);
        assert_eq!(integer::<u32>(None), None);
        assert_eq!(integer::<u32>(Some(&json!(true))), None);
        assert_eq!(integer::<u32>(Some(&json!(["1"]))), None);
    }

    #[test]
    fn test_integer_truncates_decimals() {
        assert_eq!(integer::<u32>(Some(&json!("120.7"))), Some(120));
        assert_eq!(integer::<u32>(Some(&json!(99.9))), Some(99));
    }

    #[test]
    fn test_integer_out_of_range_is_absent() {
        assert_eq!(integer::<u32>(Some(&json!("-3"))), None);
        assert_eq!(integer::<u8>(Some(&json!(300))), None);
        assert_eq!(integer::<u32>(Some(&json!("NaN"))), None);
        assert_eq!(integer::<u32>(Some(&json!("inf"))), None);
    }

    #[test]
    fn test_integer_trims_whitespace() {
        assert_eq!(integer::<u64>(Some(&json!(" 320000 "))), Some(320_000));
    }

    #[test]
    fn test_decimal() {
        assert_eq!(decimal(Some(&json!("245.317"))), Some(245.317));
        assert_eq!(decimal(Some(&json!(12))), Some(12.0));
        assert_eq!(decimal(Some(&json!("abc"))), None);
        assert_eq!(decimal(Some(&json!("NaN"))), None);
        assert_eq!(decimal(Some(&Value::Null)), None);
    }

    #[test]
    fn test_year_from_date_string() {
        assert_eq!(year(Some(&json!("2004"))), Some(2004));
        assert_eq!(year(Some(&json!("2004-03-12"))), Some(2004));
        assert_eq!(year(Some(&json!(1999))), Some(1999));
        assert_eq!(year(Some(&json!("20040312"))), Some(20_040_312));
        assert_eq!(year(Some(&json!("UTC 2004"))), None);
        assert_eq!(year(Some(&json!("204"))), None);
    }
}
