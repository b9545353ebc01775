//! Unit definitions - the fixed registry of categories, units, offsets and prefixes

use std::collections::HashMap;
use std::sync::LazyLock;
use crate::{Category, Unit};

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

const INCH: f64 = 0.0254;

/// A metric prefix applicable to any canonical unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricPrefix {
    pub symbol: &'static str,
    pub multiplier: f64,
}

/// Prefixes in lookup order. "da" must precede "d".
pub const METRIC_PREFIXES: [MetricPrefix; 7] = [
    MetricPrefix { symbol: "k", multiplier: 1e3 },
    MetricPrefix { symbol: "h", multiplier: 1e2 },
    MetricPrefix { symbol: "da", multiplier: 10.0 },
    MetricPrefix { symbol: "d", multiplier: 0.1 },
    MetricPrefix { symbol: "c", multiplier: 1e-2 },
    MetricPrefix { symbol: "m", multiplier: 1e-3 },
    MetricPrefix { symbol: "n", multiplier: 1e-9 },
];

/// Registry of all known units
pub struct UnitRegistry {
    units: Vec<Unit>,
    /// casefolded symbol -> index into `units`
    index: HashMap<String, usize>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry {
            units: Vec::new(),
            index: HashMap::new(),
        };
        registry.register_all_units();
        registry
    }

    /// Get a unit by symbol, ignoring case
    pub fn get(&self, symbol: &str) -> Option<&Unit> {
        self.index
            .get(&fold(symbol))
            .map(|&i| &self.units[i])
    }

    /// Get all units in a category, in registration order
    pub fn by_category(&self, category: Category) -> Vec<&Unit> {
        self.units.iter()
            .filter(|u| u.category == category)
            .collect()
    }

    /// Get all unit symbols, in registration order
    pub fn symbols(&self) -> Vec<&'static str> {
        self.units.iter().map(|u| u.symbol).collect()
    }

    /// All registered units
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Metric prefixes in lookup order
    pub fn prefixes(&self) -> &'static [MetricPrefix] {
        &METRIC_PREFIXES
    }

    fn register(&mut self, unit: Unit) {
        debug_assert!(unit.factor > 0.0, "unit {} has non-positive factor", unit.symbol);
        let previous = self.index.insert(fold(unit.symbol), self.units.len());
        debug_assert!(previous.is_none(), "unit {} registered twice", unit.symbol);
        self.units.push(unit);
    }

    fn register_all_units(&mut self) {
        self.register_length_units();
        self.register_volume_units();
        self.register_force_units();
        self.register_time_units();
        self.register_mass_units();
        self.register_pressure_units();
        self.register_temperature_units();
        self.register_dimensionless_units();
    }

    fn register_length_units(&mut self) {
        // Area and volume reuse these through the power suffix (in^2, m^3)
        self.register(Unit::new("m", Category::Length, 1.0));
        self.register(Unit::new("in", Category::Length, INCH));
        self.register(Unit::new("ft", Category::Length, INCH * 12.0));
    }

    fn register_volume_units(&mut self) {
        // Litre is not a power of a length unit, so the cubic forms are registered literally
        self.register(Unit::new("L", Category::Volume, 1.0));
        self.register(Unit::compound("m^3", Category::Volume, 1e3, 3));
        self.register(Unit::compound("mm^3", Category::Volume, 1e-6, 3));
        self.register(Unit::compound("in^3", Category::Volume, (INCH * INCH * INCH) / 1e-3, 3));
        self.register(Unit::compound("ft^3", Category::Volume, (INCH * INCH * INCH) * 1728.0 / 1e-3, 3));
    }

    fn register_force_units(&mut self) {
        self.register(Unit::new("N", Category::Force, 1.0));
        self.register(Unit::new("lbf", Category::Force, 4.4482216));
    }

    fn register_time_units(&mut self) {
        self.register(Unit::new("s", Category::Time, 1.0));
        self.register(Unit::new("hr", Category::Time, 3600.0));
        self.register(Unit::new("min", Category::Time, 60.0));
    }

    fn register_mass_units(&mut self) {
        self.register(Unit::new("g", Category::Mass, 1.0));
        self.register(Unit::new("lb", Category::Mass, 453.59237));
        self.register(Unit::new("slug", Category::Mass, 14593.90));
    }

    fn register_pressure_units(&mut self) {
        self.register(Unit::new("Pa", Category::Pressure, 1.0));
        self.register(Unit::new("psi", Category::Pressure, 6894.7572931783));
        self.register(Unit::new("atm", Category::Pressure, 101325.0));
        self.register(Unit::new("bar", Category::Pressure, 1e5));
    }

    fn register_temperature_units(&mut self) {
        // Kelvin is the base
        self.register(Unit::new("K", Category::Temperature, 1.0));
        self.register(Unit::new("R", Category::Temperature, 5.0 / 9.0));

        // K = C + 273.15
        self.register(Unit::with_offset("C", Category::Temperature, 1.0, 273.15));

        // K = F * 5/9 + (273.15 - 32 * 5/9)
        self.register(Unit::with_offset(
            "F", Category::Temperature,
            5.0 / 9.0,
            273.15 - 32.0 * 5.0 / 9.0,
        ));
    }

    fn register_dimensionless_units(&mut self) {
        self.register(Unit::new("unitless", Category::Dimensionless, 1.0));
        self.register(Unit::new("none", Category::Dimensionless, 1.0));
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive key for registry lookups
pub(crate) fn fold(s: &str) -> String {
    s.to_lowercase()
}

/// Strip `prefix` from the start of `s`, ignoring case
pub(crate) fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}
