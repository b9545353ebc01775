//! Unit categories
//!
//! Every registered unit belongs to exactly one category. Units are only
//! convertible within their own category.

use std::fmt;

/// A physical dimension grouping mutually convertible units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Linear distance, base `m`. Area and volume go through the `^` power suffix.
    Length,
    /// Volume, base `L`. Carries literal `m^3`-style keys next to `L`.
    Volume,
    /// Force, base `N`.
    Force,
    /// Time, base `s`.
    Time,
    /// Mass, base `g`.
    Mass,
    /// Pressure, base `Pa`.
    Pressure,
    /// Temperature, base `K`. The only category with offsets.
    Temperature,
    /// Pure numbers, base `unitless`.
    Dimensionless,
}

impl Category {
    /// All categories in registry order
    pub const ALL: [Category; 8] = [
        Category::Length,
        Category::Volume,
        Category::Force,
        Category::Time,
        Category::Mass,
        Category::Pressure,
        Category::Temperature,
        Category::Dimensionless,
    ];

    /// Lowercase category name
    pub fn name(&self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Volume => "volume",
            Category::Force => "force",
            Category::Time => "time",
            Category::Mass => "mass",
            Category::Pressure => "pressure",
            Category::Temperature => "temperature",
            Category::Dimensionless => "dimensionless",
        }
    }

    /// Symbol of the base unit (factor 1, no offset)
    pub fn base_unit(&self) -> &'static str {
        match self {
            Category::Length => "m",
            Category::Volume => "L",
            Category::Force => "N",
            Category::Time => "s",
            Category::Mass => "g",
            Category::Pressure => "Pa",
            Category::Temperature => "K",
            Category::Dimensionless => "unitless",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Category::Length), "length");
        assert_eq!(format!("{}", Category::Dimensionless), "dimensionless");
    }

    #[test]
    fn test_base_units() {
        assert_eq!(Category::Volume.base_unit(), "L");
        assert_eq!(Category::Temperature.base_unit(), "K");
        assert_eq!(Category::Mass.base_unit(), "g");
    }

    #[test]
    fn test_all_is_distinct() {
        let mut names: Vec<_> = Category::ALL.iter().map(|c| c.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Category::ALL.len());
    }
}
