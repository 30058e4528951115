//! Loosely typed request fields and their coercion rules.
//!
//! Request bodies are accepted as JSON where numeric fields may be sent either
//! as numbers or as numeric strings. A field is first checked for presence
//! under the active [`ValidationMode`], then coerced to the type the record
//! stores.

use serde::{Deserialize, Serialize};

/// A single request field before validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

/// How required fields are checked for presence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Reject absent, `null`, `false`, `0`, `NaN` and `""`.
    ///
    /// Note that this rejects a legitimate zero amount or a zero user id.
    #[default]
    Truthy,
    /// Reject only absent, `null` and `""`.
    Presence,
}

impl ValidationMode {
    /// Whether `field` counts as supplied.
    pub fn accepts(self, field: Option<&FieldValue>) -> bool {
        match field {
            None => false,
            Some(value) => match self {
                ValidationMode::Truthy => value.is_truthy(),
                ValidationMode::Presence => !value.is_blank(),
            },
        }
    }
}

impl FieldValue {
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Bool(flag) => *flag,
            FieldValue::Number(number) => *number != 0.0 && !number.is_nan(),
            FieldValue::Text(text) => !text.is_empty(),
            FieldValue::Other(value) => !value.is_null(),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::Other(value) => value.is_null(),
            FieldValue::Bool(_) | FieldValue::Number(_) => false,
        }
    }

    /// Integer coercion: numbers truncate toward zero, strings yield their
    /// leading signed decimal prefix.
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Number(number) if number.is_finite() => Some(number.trunc() as i64),
            FieldValue::Text(text) => leading_integer(text),
            _ => None,
        }
    }

    /// Float coercion: numbers as-is, strings yield their longest leading
    /// prefix that reads as a finite float.
    pub fn to_float(&self) -> Option<f64> {
        match self {
            FieldValue::Number(number) if number.is_finite() => Some(*number),
            FieldValue::Text(text) => leading_float(text),
            _ => None,
        }
    }

    pub fn to_text(&self) -> Option<String> {
        match self {
            FieldValue::Text(text) => Some(text.clone()),
            FieldValue::Number(number) if number.fract() == 0.0 && number.abs() < 1e15 => {
                Some(format!("{}", *number as i64))
            }
            FieldValue::Number(number) => Some(number.to_string()),
            FieldValue::Bool(flag) => Some(flag.to_string()),
            FieldValue::Other(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<f64> for FieldValue {
    fn from(number: f64) -> Self {
        FieldValue::Number(number)
    }
}

impl From<i64> for FieldValue {
    fn from(number: i64) -> Self {
        FieldValue::Number(number as f64)
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    trimmed[..sign_len + digits].parse().ok()
}

/// Reads the leading decimal literal: optional sign, digits with an optional
/// fraction, then an exponent only when it carries at least one digit.
fn leading_float(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(trimmed.starts_with(['+', '-']));
    let integral = digits_from(end);
    end += integral;

    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        end += 1 + fraction;
    }
    if integral == 0 && fraction == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent = digits_from(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }

    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> FieldValue {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn deserializes_json_scalars() {
        assert_eq!(parse("12"), FieldValue::Number(12.0));
        assert_eq!(parse("\"12\""), FieldValue::Text("12".to_string()));
        assert_eq!(parse("true"), FieldValue::Bool(true));
        assert_eq!(parse("[1]"), FieldValue::Other(serde_json::json!([1])));
        assert_eq!(parse("null"), FieldValue::Other(serde_json::Value::Null));
    }

    #[test]
    fn truthy_mode_rejects_falsy_values() {
        let mode = ValidationMode::Truthy;
        assert!(!mode.accepts(None));
        assert!(!mode.accepts(Some(&parse("null"))));
        assert!(!mode.accepts(Some(&parse("0"))));
        assert!(!mode.accepts(Some(&parse("false"))));
        assert!(!mode.accepts(Some(&parse("\"\""))));
        assert!(!mode.accepts(Some(&FieldValue::Number(f64::NAN))));

        assert!(mode.accepts(Some(&parse("\"0\""))));
        assert!(mode.accepts(Some(&parse("0.5"))));
        assert!(mode.accepts(Some(&parse("{}"))));
    }

    #[test]
    fn presence_mode_accepts_zero() {
        let mode = ValidationMode::Presence;
        assert!(mode.accepts(Some(&parse("0"))));
        assert!(mode.accepts(Some(&parse("false"))));
        assert!(!mode.accepts(Some(&parse("\"\""))));
        assert!(!mode.accepts(Some(&parse("null"))));
        assert!(!mode.accepts(None));
    }

    #[test]
    fn integer_coercion_reads_leading_digits() {
        assert_eq!(FieldValue::from(3.9_f64).to_integer(), Some(3));
        assert_eq!(FieldValue::from(-3.9_f64).to_integer(), Some(-3));
        assert_eq!(FieldValue::from("42").to_integer(), Some(42));
        assert_eq!(FieldValue::from("  7 apples").to_integer(), Some(7));
        assert_eq!(FieldValue::from("-12.5").to_integer(), Some(-12));
        assert_eq!(FieldValue::from("abc").to_integer(), None);
        assert_eq!(FieldValue::from("-").to_integer(), None);
        assert_eq!(FieldValue::Bool(true).to_integer(), None);
    }

    #[test]
    fn float_coercion_reads_longest_prefix() {
        assert_eq!(FieldValue::from(100.0_f64).to_float(), Some(100.0));
        assert_eq!(FieldValue::from("100.50").to_float(), Some(100.5));
        assert_eq!(FieldValue::from("1e2xyz").to_float(), Some(100.0));
        assert_eq!(FieldValue::from("3.5.1").to_float(), Some(3.5));
        assert_eq!(FieldValue::from(".5").to_float(), Some(0.5));
        assert_eq!(FieldValue::from("inf").to_float(), None);
        assert_eq!(FieldValue::from("abc").to_float(), None);
        assert_eq!(FieldValue::Bool(true).to_float(), None);
    }

    #[test]
    fn float_coercion_stops_at_incomplete_exponent_and_fraction() {
        assert_eq!(FieldValue::from("5.").to_float(), Some(5.0));
        assert_eq!(FieldValue::from("-2.5e").to_float(), Some(-2.5));
        assert_eq!(FieldValue::from("4e+").to_float(), Some(4.0));
        assert_eq!(FieldValue::from("4e-1x").to_float(), Some(0.4));
        assert_eq!(FieldValue::from("+.e5").to_float(), None);
        assert_eq!(FieldValue::from("1e400").to_float(), None);
    }

    #[test]
    fn float_coercion_is_linear_in_input_length() {
        let trailing_signs = format!("7{}", "+".repeat(200_000));
        let long_digits = format!("{}{}", "1".repeat(20_000), "+".repeat(20_000));

        let started = std::time::Instant::now();
        assert_eq!(FieldValue::from(trailing_signs).to_float(), Some(7.0));
        assert_eq!(FieldValue::from(long_digits).to_float(), None);
        assert!(started.elapsed() < std::time::Duration::from_secs(2));
    }

    #[test]
    fn text_coercion_formats_scalars() {
        assert_eq!(FieldValue::from("card").to_text(), Some("card".to_string()));
        assert_eq!(FieldValue::from(5.0_f64).to_text(), Some("5".to_string()));
        assert_eq!(FieldValue::from(5.25_f64).to_text(), Some("5.25".to_string()));
        assert_eq!(FieldValue::Bool(true).to_text(), Some("true".to_string()));
        assert_eq!(parse("[1]").to_text(), None);
    }
}
