//! Unit resolution - map a parsed name to a registered unit, stripping a metric prefix if needed

use crate::Unit;
use crate::units::{strip_prefix_ignore_case, MetricPrefix, UnitRegistry};

/// A name resolved against the registry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<'r> {
    pub unit: &'r Unit,
    /// The metric prefix that was stripped to reach `unit`
    pub prefix: Option<&'r MetricPrefix>,
}

impl<'r> Resolved<'r> {
    /// Multiplier contributed by the prefix at the given power
    ///
    /// A prefix on a literal compound key ("cm^3") also carries the key's own exponent.
    pub fn prefix_multiplier(&self, power: i32) -> f64 {
        match self.prefix {
            Some(prefix) => prefix.multiplier.powi(power * self.unit.exponent),
            None => 1.0,
        }
    }
}

impl UnitRegistry {
    /// Resolve a name directly, or after stripping one metric prefix
    ///
    /// Only the first prefix that matches the text is stripped, and the
    /// remainder is only looked up directly, so neither "kkm" nor "datm"
    /// resolves.
    pub fn resolve(&self, name: &str) -> Option<Resolved<'_>> {
        if let Some(unit) = self.get(name) {
            return Some(Resolved { unit, prefix: None });
        }

        let (prefix, rest) = self.prefixes().iter().find_map(|prefix| {
            strip_prefix_ignore_case(name, prefix.symbol).map(|rest| (prefix, rest))
        })?;
        let unit = self.get(rest)?;
        Some(Resolved { unit, prefix: Some(prefix) })
    }
}

#[cfg(test)]
mod tests {
    use crate::Category;
    use crate::units::UNITS;

    #[test]
    fn test_direct_hit() {
        let r = UNITS.resolve("lbf").unwrap();
        assert_eq!(r.unit.symbol, "lbf");
        assert!(r.prefix.is_none());
        assert_eq!(r.prefix_multiplier(3), 1.0);
    }

    #[test]
    fn test_direct_hit_wins_over_prefix() {
        // "min" is minutes, not milli-inches
        let r = UNITS.resolve("min").unwrap();
        assert_eq!(r.unit.category, Category::Time);
        assert!(r.prefix.is_none());

        // "C" is Celsius even though "c" is a prefix
        let r = UNITS.resolve("c").unwrap();
        assert_eq!(r.unit.symbol, "C");
    }

    #[test]
    fn test_prefix_strip() {
        let r = UNITS.resolve("km").unwrap();
        assert_eq!(r.unit.symbol, "m");
        assert_eq!(r.prefix.unwrap().symbol, "k");
        assert_eq!(r.prefix_multiplier(1), 1000.0);

        let r = UNITS.resolve("kg").unwrap();
        assert_eq!(r.unit.category, Category::Mass);

        let r = UNITS.resolve("KPA").unwrap();
        assert_eq!(r.unit.symbol, "Pa");
    }

    #[test]
    fn test_deca_before_deci() {
        let r = UNITS.resolve("dam").unwrap();
        assert_eq!(r.prefix.unwrap().symbol, "da");
        assert_eq!(r.unit.symbol, "m");

        let r = UNITS.resolve("dm").unwrap();
        assert_eq!(r.prefix.unwrap().symbol, "d");
    }

    #[test]
    fn test_first_textual_prefix_only() {
        // "da" matches the text, "tm" is not a unit; "d" + "atm" is never tried
        assert!(UNITS.resolve("datm").is_none());
        assert!(UNITS.resolve("DAtm").is_none());
    }

    #[test]
    fn test_prefixed_compound_key() {
        let r = UNITS.resolve("cm^3").unwrap();
        assert_eq!(r.unit.symbol, "m^3");
        assert!((r.prefix_multiplier(1) - 1e-6).abs() < 1e-20);
    }

    #[test]
    fn test_single_hop() {
        assert!(UNITS.resolve("kkm").is_none());
        assert!(UNITS.resolve("mmm").is_none());
        assert!(UNITS.resolve("zorp").is_none());
        assert!(UNITS.resolve("").is_none());
    }
}
