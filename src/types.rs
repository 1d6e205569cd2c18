//! Common value types for package definitions.
//!
//! This module defines the small, copyable building blocks shared by the
//! range validator, the selector and the store: physical dimensions and
//! closed item-count ranges.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outer dimensions of a package in inches.
///
/// # Examples
/// ```
/// use nursery_shipping::types::Dimensions;
///
/// let small = Dimensions::new(12.0, 10.0, 8.0);
/// assert_eq!(small.to_string(), "12 x 10 x 8 in");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    #[inline]
    pub const fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {} x {} in", self.length, self.width, self.height)
    }
}

/// Inclusive item-count range `[min, max]` a package is intended for.
///
/// Ranges that merely touch (`[1,4]` and `[4,8]`) share a quantity and
/// therefore overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct QuantityRange {
    pub min: u32,
    pub max: u32,
}

impl QuantityRange {
    #[inline]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Closed-interval overlap test: `a.min <= b.max && a.max >= b.min`.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min <= other.max && self.max >= other.min
    }

    /// Checks whether `quantity` lies within the range.
    #[inline]
    pub fn contains(&self, quantity: u64) -> bool {
        quantity >= u64::from(self.min) && quantity <= u64::from(self.max)
    }

    /// A range is well-formed when `1 <= min <= max`.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.min >= 1 && self.min <= self.max
    }
}

impl std::fmt::Display for QuantityRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Field validators shared by package drafts and request parsing.
pub mod validation {
    /// Validates a single dimension.
    ///
    /// # Returns
    /// `Ok(())` for valid values, otherwise error text
    pub fn validate_dimension(value: f64, name: &str) -> Result<(), String> {
        if value.is_nan() {
            return Err(format!("{} must not be NaN", name));
        }
        if value.is_infinite() {
            return Err(format!("{} must not be infinite", name));
        }
        if value <= 0.0 {
            return Err(format!("{} must be positive, got: {}", name, value));
        }
        Ok(())
    }

    /// Validates a weight. Zero is allowed.
    pub fn validate_weight(value: f64, name: &str) -> Result<(), String> {
        if value.is_nan() {
            return Err(format!("{} must not be NaN", name));
        }
        if value.is_infinite() {
            return Err(format!("{} must not be infinite", name));
        }
        if value < 0.0 {
            return Err(format!("{} must not be negative, got: {}", name, value));
        }
        Ok(())
    }
}
