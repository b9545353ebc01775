//! Unit representation with conversion factors

use std::fmt;
use thiserror::Error;
use crate::Category;

/// A canonical unit of the registry
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    /// The unit symbol as registered (e.g., "m", "lbf", "ft^3")
    pub symbol: &'static str,
    /// Category the unit belongs to
    pub category: Category,
    /// Factor to convert to the category base unit (base = value * factor)
    pub factor: f64,
    /// Shift of this unit's zero point, in base units. `None` means aligned with the base.
    pub offset: Option<f64>,
    /// Exponent baked into a literal compound symbol ("m^3" -> 3), 1 otherwise
    pub exponent: i32,
}

impl Unit {
    /// Create a unit with proportional conversion (no offset)
    pub const fn new(symbol: &'static str, category: Category, factor: f64) -> Self {
        Unit {
            symbol,
            category,
            factor,
            offset: None,
            exponent: 1,
        }
    }

    /// Create a unit with offset (temperature scales)
    pub const fn with_offset(symbol: &'static str, category: Category, factor: f64, offset: f64) -> Self {
        Unit {
            symbol,
            category,
            factor,
            offset: Some(offset),
            exponent: 1,
        }
    }

    /// Create a literal compound unit such as "m^3" living in a non-length category
    pub const fn compound(symbol: &'static str, category: Category, factor: f64, exponent: i32) -> Self {
        Unit {
            symbol,
            category,
            factor,
            offset: None,
            exponent,
        }
    }

    /// Check if this is the base unit of its category
    pub fn is_base(&self) -> bool {
        self.factor == 1.0 && self.offset.is_none() && self.symbol == self.category.base_unit()
    }

    /// Check if this unit has an offset (non-proportional conversion)
    pub fn has_offset(&self) -> bool {
        self.offset.is_some()
    }

    /// Check if two units can be converted into each other
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.category == other.category
    }

    /// Convert a value in this unit, raised to `power`, to the base unit
    pub fn to_base(&self, value: f64, power: i32) -> f64 {
        value * self.factor.powi(power) + self.offset.unwrap_or(0.0)
    }

    /// Convert a value in the base unit to this unit, raised to `power`
    pub fn from_base(&self, value: f64, power: i32) -> f64 {
        (value - self.offset.unwrap_or(0.0)) / self.factor.powi(power)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const INVALID_POWER: &str = "INVALID_POWER";
    pub const INCOMPATIBLE_UNITS: &str = "INCOMPATIBLE_UNITS";
}

/// Which token of a request an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The unit the value is expressed in
    Source,
    /// The unit the value is converted to
    Target,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => write!(f, "source"),
            Side::Target => write!(f, "target"),
        }
    }
}

/// Why two units cannot be converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    /// The units belong to different categories
    Category { from: Category, to: Category },
    /// Both tokens carry explicit powers and they differ
    Power { from: i32, to: i32 },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Category { from, to } => write!(f, "{} vs {}", from, to),
            Mismatch::Power { from, to } => write!(f, "power {} vs power {}", from, to),
        }
    }
}

/// Errors that can occur during unit conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The token names no registered unit, even after prefix stripping
    #[error("unknown {side} unit: {token}")]
    UnknownUnit { token: String, side: Side },

    /// The text after '^' is not an integer
    #[error("invalid power suffix '{suffix}' in unit '{token}'")]
    InvalidPowerSuffix { token: String, suffix: String },

    /// Units resolve to different categories or carry unequal powers
    #[error("cannot convert {from} to {to}: incompatible units ({mismatch})")]
    IncompatibleUnits {
        from: String,
        to: String,
        mismatch: Mismatch,
    },
}

impl ConversionError {
    pub(crate) fn unknown(token: &str, side: Side) -> Self {
        ConversionError::UnknownUnit { token: token.to_string(), side }
    }

    pub(crate) fn incompatible(from: &str, to: &str, mismatch: Mismatch) -> Self {
        ConversionError::IncompatibleUnits {
            from: from.to_string(),
            to: to.to_string(),
            mismatch,
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ConversionError::UnknownUnit { .. } => codes::UNKNOWN_UNIT,
            ConversionError::InvalidPowerSuffix { .. } => codes::INVALID_POWER,
            ConversionError::IncompatibleUnits { .. } => codes::INCOMPATIBLE_UNITS,
        }
    }

    /// The side the error is tied to, when it is tied to a single token
    pub fn side(&self) -> Option<Side> {
        match self {
            ConversionError::UnknownUnit { side, .. } => Some(*side),
            _ => None,
        }
    }
}
