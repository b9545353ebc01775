//! Propsim Units - unit conversion for simulation inputs
//!
//! Converts scalars and nested arrays of numbers between the units of a
//! fixed registry. Tokens are matched case-insensitively, may carry a power
//! suffix ("in^2") and may be prefixed with a metric prefix ("kPa").
//!
//! Categories:
//! - Length (m, in, ft)
//! - Volume (L, m^3, mm^3, in^3, ft^3)
//! - Force (N, lbf)
//! - Time (s, hr, min)
//! - Mass (g, lb, slug)
//! - Pressure (Pa, psi, atm, bar)
//! - Temperature (K, R, C, F)
//! - Dimensionless (unitless, none)
//!
//! Metric prefixes: k, h, da, d, c, m, n.
//!
//! ```
//! use propsim_units::{convert, Value};
//!
//! let value = convert(1.0, "km", "m").unwrap();
//! assert_eq!(value, Value::Scalar(1000.0));
//! ```

mod category;
mod unit;
mod units;
mod parse;
mod resolve;
mod value;
mod convert;

pub use category::Category;
pub use unit::{codes, Unit, ConversionError, Mismatch, Side};
pub use units::{UnitRegistry, MetricPrefix, METRIC_PREFIXES, UNITS};
pub use parse::{parse_unit_token, parse_conversion, UnitToken, TokenPair};
pub use resolve::Resolved;
pub use value::Value;
pub use convert::{
    convert, convert_scalar, validate,
    list_available_units, list_compatible_units, units_by_category,
};
