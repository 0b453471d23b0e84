use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::LedgerError;

/// A validated monetary amount: finite and strictly greater than zero.
///
/// Amounts are plain `f64` values on the wire. Construction is the only
/// place validation happens, so every `Amount` reaching the ledger is
/// already known to be usable.
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(f64);

impl Amount {
    /// Validate a raw floating-point value.
    pub fn new(value: f64) -> Result<Self, LedgerError> {
        if !value.is_finite() {
            return Err(LedgerError::InvalidAmount(format!(
                "{value} is not a finite number"
            )));
        }
        if value <= 0.0 {
            return Err(LedgerError::InvalidAmount(format!(
                "{value} must be greater than zero"
            )));
        }
        Ok(Self(value))
    }

    /// Parse an amount out of an optional JSON value.
    ///
    /// Accepts numbers and numeric strings (`"12.50"`). Anything else,
    /// including a missing value, is rejected.
    pub fn from_json(value: Option<&Value>) -> Result<Self, LedgerError> {
        match value {
            None | Some(Value::Null) => {
                Err(LedgerError::InvalidAmount("amount is required".into()))
            }
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) => Self::new(v),
                None => Err(LedgerError::InvalidAmount(format!("{n} is not representable"))),
            },
            Some(Value::String(s)) => s.parse(),
            Some(other) => Err(LedgerError::InvalidAmount(format!(
                "expected a number, got {other}"
            ))),
        }
    }

    /// The raw value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl FromStr for Amount {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| LedgerError::InvalidAmount(format!("{s:?} is not a number")))?;
        Self::new(value)
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({})", self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_positive_values() {
        assert_eq!(Amount::new(0.01).unwrap().value(), 0.01);
        assert_eq!(Amount::new(500.0).unwrap().value(), 500.0);
    }

    #[test]
    fn rejects_zero_negative_and_non_finite() {
        for bad in [0.0, -0.0, -5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(Amount::new(bad), Err(LedgerError::InvalidAmount(_))));
        }
    }

    #[test]
    fn parses_numeric_strings() {
        let a: Amount = " 12.5 ".parse().unwrap();
        assert_eq!(a.value(), 12.5);
        assert!("abc".parse::<Amount>().is_err());
        assert!("".parse::<Amount>().is_err());
        assert!("-3".parse::<Amount>().is_err());
        assert!("inf".parse::<Amount>().is_err());
    }

    #[test]
    fn from_json_accepts_numbers_and_strings() {
        assert_eq!(Amount::from_json(Some(&json!(100))).unwrap().value(), 100.0);
        assert_eq!(Amount::from_json(Some(&json!("42.75"))).unwrap().value(), 42.75);
    }

    #[test]
    fn from_json_rejects_missing_and_wrong_types() {
        assert!(Amount::from_json(None).is_err());
        assert!(Amount::from_json(Some(&Value::Null)).is_err());
        assert!(Amount::from_json(Some(&json!(true))).is_err());
        assert!(Amount::from_json(Some(&json!([1]))).is_err());
        assert!(Amount::from_json(Some(&json!("ten"))).is_err());
        assert!(Amount::from_json(Some(&json!(0))).is_err());
    }

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(Amount::new(7.0).unwrap().to_string(), "7.00");
    }
}
