use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};

use crate::types::price::Price;

/// Inclusive price bracket used by the catalog filter.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Price,
    pub max: Price,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Price::new(min),
            max: Price::new(max),
        }
    }

    /// `min <= price <= max`.
    pub fn contains(&self, price: Price) -> bool {
        self.min <= price && price <= self.max
    }

    pub fn validate(&self) -> Result<()> {
        if self.min > self.max {
            bail!("price range min {} exceeds max {}", self.min, self.max);
        }
        Ok(())
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

impl FromStr for PriceRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (min, max) = s
            .split_once('-')
            .ok_or_else(|| anyhow!("invalid price range \"{s}\", expected MIN-MAX"))?;

        let min: f64 = min
            .trim()
            .parse()
            .with_context(|| format!("invalid price range minimum in \"{s}\""))?;
        let max: f64 = max
            .trim()
            .parse()
            .with_context(|| format!("invalid price range maximum in \"{s}\""))?;

        let range = Self {
            min: Price::checked(min)?,
            max: Price::checked(max)?,
        };
        range.validate()?;

        Ok(range)
    }
}
