//! Conversion and query operations over the unit registry

use tracing::{debug, trace};
use crate::parse::{parse_conversion, parse_unit_token};
use crate::unit::{ConversionError, Mismatch, Side};
use crate::units::{UnitRegistry, UNITS};
use crate::{Category, Value};

impl UnitRegistry {
    /// Convert `value` from one unit token to another
    ///
    /// The source prefix scales the input up front, the target prefix scales
    /// the output at the end.
    pub fn convert(&self, value: &Value, from: &str, to: &str) -> Result<Value, ConversionError> {
        let pair = parse_conversion(from, to)?;
        let power = pair.power;

        let src = self.resolve(pair.from)
            .ok_or_else(|| ConversionError::unknown(from, Side::Source))?;
        let dst = self.resolve(pair.to)
            .ok_or_else(|| ConversionError::unknown(to, Side::Target))?;

        if src.unit.category != dst.unit.category {
            debug!(from, to, "rejected conversion across categories");
            return Err(ConversionError::incompatible(
                from,
                to,
                Mismatch::Category { from: src.unit.category, to: dst.unit.category },
            ));
        }

        if src == dst {
            return Ok(value.clone());
        }

        let input_scale = src.prefix_multiplier(power);
        let output_scale = 1.0 / dst.prefix_multiplier(power);
        if src.prefix.is_some() || dst.prefix.is_some() {
            trace!(
                from = src.unit.symbol,
                to = dst.unit.symbol,
                input_scale,
                output_scale,
                "normalized metric prefixes"
            );
        }

        let (src, dst) = (src.unit, dst.unit);
        Ok(value.map(|x| {
            let base = src.to_base(x * input_scale, power);
            dst.from_base(base, power) * output_scale
        }))
    }

    /// Whether `from` can be converted to `to`
    pub fn validate(&self, from: &str, to: &str) -> Result<bool, ConversionError> {
        match self.convert(&Value::Scalar(1.0), from, to) {
            Ok(_) => Ok(true),
            Err(ConversionError::UnknownUnit { .. } | ConversionError::IncompatibleUnits { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Every canonical unit symbol, without prefixes or powers
    pub fn list_available_units(&self) -> Vec<&'static str> {
        self.symbols()
    }

    /// Units sharing a category with `unit`, carrying its power suffix
    ///
    /// Only direct registry names are recognized here; prefixed names and
    /// invalid power suffixes yield an empty list.
    pub fn list_compatible_units(&self, unit: &str) -> Vec<String> {
        let Ok(token) = parse_unit_token(unit) else {
            return Vec::new();
        };
        let Some(found) = self.get(token.name) else {
            return Vec::new();
        };

        self.by_category(found.category)
            .into_iter()
            .map(|u| match token.power {
                Some(power) => format!("{}^{}", u.symbol, power),
                None => u.symbol.to_string(),
            })
            .collect()
    }

    /// Canonical units grouped by category, in registry order
    pub fn units_by_category(&self) -> Vec<(Category, Vec<&'static str>)> {
        Category::ALL.iter()
            .map(|&c| (c, self.by_category(c).iter().map(|u| u.symbol).collect()))
            .collect()
    }
}

/// Convert `value` from one unit to another using the global registry
pub fn convert(value: impl Into<Value>, from: &str, to: &str) -> Result<Value, ConversionError> {
    UNITS.convert(&value.into(), from, to)
}

/// Convert a single number using the global registry
pub fn convert_scalar(value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
    let converted = UNITS.convert(&Value::Scalar(value), from, to)?;
    Ok(converted.as_scalar().unwrap_or(f64::NAN))
}

/// Whether `from` can be converted to `to`
pub fn validate(from: &str, to: &str) -> Result<bool, ConversionError> {
    UNITS.validate(from, to)
}

/// Every canonical unit symbol
pub fn list_available_units() -> Vec<&'static str> {
    UNITS.list_available_units()
}

/// Units convertible with `unit`
pub fn list_compatible_units(unit: &str) -> Vec<String> {
    UNITS.list_compatible_units(unit)
}

/// Canonical units grouped by category
pub fn units_by_category() -> Vec<(Category, Vec<&'static str>)> {
    UNITS.units_by_category()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_convert_length() {
        assert_eq!(convert_scalar(1.0, "km", "m").unwrap(), 1000.0);
        assert_relative_eq!(convert_scalar(1.0, "in", "cm").unwrap(), 2.54, max_relative = 1e-12);
        assert_relative_eq!(convert_scalar(1.0, "km", "in").unwrap(), 1000.0 / 0.0254, max_relative = 1e-12);
        assert_relative_eq!(convert_scalar(1.0, "in", "km").unwrap(), 2.54e-5, max_relative = 1e-12);
    }

    #[test]
    fn test_convert_temperature() {
        assert_eq!(convert_scalar(0.0, "C", "K").unwrap(), 273.15);
        assert_eq!(convert_scalar(273.15, "K", "C").unwrap(), 0.0);
        assert_eq!(convert_scalar(-273.15, "C", "K").unwrap(), 0.0);
        assert_relative_eq!(convert_scalar(212.0, "F", "C").unwrap(), 100.0, max_relative = 1e-12);
        assert_relative_eq!(convert_scalar(491.67, "R", "F").unwrap(), 32.0, max_relative = 1e-9);
    }

    #[test]
    fn test_convert_mass_with_prefix() {
        let kg = convert_scalar(1.0, "lb", "kg").unwrap();
        assert!((kg - 1.0 / 2.21).abs() <= 1e-2);
    }

    #[test]
    fn test_convert_area() {
        let in2 = convert_scalar(1.0, "mm^2", "in^2").unwrap();
        assert!((in2 - 0.00155).abs() <= 1e-3);
        assert_relative_eq!(convert_scalar(1.0, "mm^2", "m^2").unwrap(), 1e-6, max_relative = 1e-12);
    }

    #[test]
    fn test_to_side_prefix() {
        assert_relative_eq!(convert_scalar(1.0, "m", "km").unwrap(), 1e-3, max_relative = 1e-12);
        assert_relative_eq!(convert_scalar(1.0, "bar", "kPa").unwrap(), 100.0, max_relative = 1e-12);
        assert_relative_eq!(convert_scalar(1.0, "m^3", "cm^3").unwrap(), 1e6, max_relative = 1e-9);
    }

    #[test]
    fn test_literal_volume_keys() {
        assert_relative_eq!(convert_scalar(1.0, "m^3", "L").unwrap(), 1000.0, max_relative = 1e-12);
        assert_relative_eq!(convert_scalar(1.0, "L", "ft^3").unwrap(), 0.0353146667, max_relative = 1e-8);
        assert_relative_eq!(convert_scalar(1.0, "cm^3", "L").unwrap(), 1e-3, max_relative = 1e-12);
    }

    #[test]
    fn test_identity_is_exact() {
        for unit in ["in", "C", "F", "km", "ft^2", "L"] {
            assert_eq!(convert_scalar(0.1, unit, unit).unwrap(), 0.1, "{unit}");
        }
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            convert_scalar(1.0, "m", "s"),
            Err(ConversionError::IncompatibleUnits { mismatch: Mismatch::Category { .. }, .. })
        ));
        assert!(matches!(
            convert_scalar(1.0, "zorp", "m"),
            Err(ConversionError::UnknownUnit { side: Side::Source, .. })
        ));
        assert!(matches!(
            convert_scalar(1.0, "m", "zorp"),
            Err(ConversionError::UnknownUnit { side: Side::Target, .. })
        ));
        assert!(matches!(
            convert_scalar(1.0, "m^2", "m^3"),
            Err(ConversionError::IncompatibleUnits { mismatch: Mismatch::Power { from: 2, to: 3 }, .. })
        ));
        // Invalid suffix degrades to a literal lookup that finds nothing
        assert!(matches!(
            convert_scalar(1.0, "m^x", "m^2"),
            Err(ConversionError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn test_validate() {
        assert!(validate("L", "ft^3").unwrap());
        assert!(validate("psi", "atm").unwrap());
        assert!(!validate("m", "s").unwrap());
        assert!(!validate("zorp", "m").unwrap());
        assert!(!validate("m^2", "m^3").unwrap());
    }

    #[test]
    fn test_list_available_units() {
        let units = list_available_units();
        assert_eq!(units.len(), 26);
        assert!(units.contains(&"slug"));
        assert!(units.contains(&"ft^3"));
        assert!(!units.contains(&"km"));
    }

    #[test]
    fn test_list_compatible_units() {
        assert_eq!(list_compatible_units("lbf"), vec!["N", "lbf"]);
        assert_eq!(list_compatible_units("IN^2"), vec!["m^2", "in^2", "ft^2"]);
        assert!(list_compatible_units("km").is_empty());
        assert!(list_compatible_units("zorp").is_empty());
        assert!(list_compatible_units("m^x").is_empty());
    }

    #[test]
    fn test_units_by_category() {
        let groups = units_by_category();
        assert_eq!(groups.len(), Category::ALL.len());
        assert_eq!(groups[0], (Category::Length, vec!["m", "in", "ft"]));
        assert_eq!(groups[7], (Category::Dimensionless, vec!["unitless", "none"]));
    }
}
