use std::fmt;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Brewer price in the catalog currency.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> Self {
        assert!(value.is_finite(), "price must be finite");
        assert!(value >= 0.0, "price must be non-negative");

        Price(value)
    }

    pub fn checked(value: f64) -> Result<Self> {
        if !value.is_finite() {
            bail!("price must be finite, got {value}");
        }
        if value < 0.0 {
            bail!("price must be non-negative, got {value}");
        }

        Ok(Price(value))
    }

    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for Price {
    type Error = anyhow::Error;

    fn try_from(value: f64) -> Result<Self> {
        Price::checked(value)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> f64 {
        price.as_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Price::new(30.0).to_string(), "30.00");
        assert_eq!(Price::new(4.5).to_string(), "4.50");
    }

    #[test]
    fn rejects_negative_and_non_finite_values() {
        assert!(Price::checked(-1.0).is_err());
        assert!(Price::checked(f64::NAN).is_err());
        assert!(Price::checked(f64::INFINITY).is_err());
        assert!(Price::checked(0.0).is_ok());
    }

    #[test]
    fn deserializes_through_validation() {
        let price: Price = serde_json::from_str("12.5").unwrap();
        assert_eq!(price.as_f64(), 12.5);

        assert!(serde_json::from_str::<Price>("-3").is_err());
    }

    #[test]
    fn try_from_validates_instead_of_panicking() {
        assert_eq!(Price::try_from(7.25).unwrap(), Price::new(7.25));
        assert!(Price::try_from(-0.5).is_err());
        assert!(Price::try_from(f64::NEG_INFINITY).is_err());
    }
}
