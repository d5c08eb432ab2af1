//! Storefront price buckets, written as `"min-max"` in whole dollars.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::Money;

/// Upper bound used by the open-ended top bucket.
const OPEN_ENDED_MAX: i64 = 999_999;

/// Inclusive price range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceRange {
    min: i64,
    max: i64,
}

impl PriceRange {
    pub fn new(min: i64, max: i64) -> Result<Self, PriceRangeError> {
        if min < 0 { return Err(PriceRangeError::Negative(min)); }
        if min > max { return Err(PriceRangeError::Inverted { min, max }); }
        Ok(Self { min, max })
    }

    /// The buckets offered on the shop page.
    pub fn storefront_buckets() -> [PriceRange; 5] {
        [
            Self { min: 0, max: 1_000 },
            Self { min: 1_000, max: 5_000 },
            Self { min: 5_000, max: 10_000 },
            Self { min: 10_000, max: 20_000 },
            Self { min: 20_000, max: OPEN_ENDED_MAX },
        ]
    }

    pub fn min(&self) -> Money { Money::from_dollars(self.min) }
    pub fn max(&self) -> Money { Money::from_dollars(self.max) }

    pub fn contains(&self, price: Money) -> bool { price >= self.min() && price <= self.max() }

    pub fn label(&self) -> String {
        if self.min == 0 {
            format!("Under {}", self.max().to_whole_dollars())
        } else if self.max >= OPEN_ENDED_MAX {
            format!("{}+", self.min().to_whole_dollars())
        } else {
            format!("{} - {}", self.min().to_whole_dollars(), self.max().to_whole_dollars())
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}-{}", self.min, self.max) }
}

impl FromStr for PriceRange {
    type Err = PriceRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || PriceRangeError::Malformed(s.to_string());
        let (min, max) = s.trim().split_once('-').ok_or_else(malformed)?;
        let min = min.trim().parse::<i64>().map_err(|_| malformed())?;
        let max = max.trim().parse::<i64>().map_err(|_| malformed())?;
        Self::new(min, max)
    }
}

impl Serialize for PriceRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire {
            slug: String,
            label: String,
            min: Money,
            max: Money,
        }
        Wire { slug: self.to_string(), label: self.label(), min: self.min(), max: self.max() }.serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceRangeError {
    #[error("price range must look like \"min-max\", got {0:?}")]
    Malformed(String),
    #[error("price range cannot start below zero, got {0}")]
    Negative(i64),
    #[error("price range minimum {min} exceeds maximum {max}")]
    Inverted { min: i64, max: i64 },
}
