//! Unit token parsing - split tokens like "mm^2" into a name and a power

use tracing::trace;
use crate::unit::{ConversionError, Mismatch};

/// A caller-supplied unit token split at its power suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitToken<'a> {
    /// The token exactly as given
    pub raw: &'a str,
    /// Everything before the first '^', case preserved
    pub name: &'a str,
    /// The integer after '^', if any
    pub power: Option<i32>,
}

/// Parse a unit token
///
/// Supported formats:
/// - Simple: "m", "psi", "L"
/// - Powers: "in^2", "m^3", "s^-1"
///
/// The suffix must be a signed decimal integer with no surrounding whitespace.
pub fn parse_unit_token(token: &str) -> Result<UnitToken<'_>, ConversionError> {
    match token.split_once('^') {
        None => Ok(UnitToken { raw: token, name: token, power: None }),
        Some((name, suffix)) => {
            let power = suffix.parse::<i32>().map_err(|_| ConversionError::InvalidPowerSuffix {
                token: token.to_string(),
                suffix: suffix.to_string(),
            })?;
            Ok(UnitToken { raw: token, name, power: Some(power) })
        }
    }
}

/// Source and target names ready for resolution, with the shared power
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPair<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub power: i32,
    /// Both tokens are looked up whole, suffix included
    pub literal: bool,
}

/// Parse the two tokens of a conversion and decide how they are read
///
/// Both suffixed with valid integers: powers must match and are split off.
/// Neither suffixed: power 1. Any other shape: both tokens are used whole as
/// literal registry keys, which is how "L" meets "ft^3".
pub fn parse_conversion<'a>(from: &'a str, to: &'a str) -> Result<TokenPair<'a>, ConversionError> {
    let parsed = (parse_unit_token(from), parse_unit_token(to));

    match parsed {
        (Ok(src), Ok(dst)) => match (src.power, dst.power) {
            (None, None) => Ok(TokenPair { from: src.name, to: dst.name, power: 1, literal: false }),
            (Some(p), Some(q)) if p == q => Ok(TokenPair { from: src.name, to: dst.name, power: p, literal: false }),
            (Some(p), Some(q)) => Err(ConversionError::incompatible(from, to, Mismatch::Power { from: p, to: q })),
            _ => Ok(literal_pair(from, to)),
        },
        _ => Ok(literal_pair(from, to)),
    }
}

fn literal_pair<'a>(from: &'a str, to: &'a str) -> TokenPair<'a> {
    trace!(from, to, "power suffixes disagree, using literal unit keys");
    TokenPair { from, to, power: 1, literal: true }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_unit() {
        let token = parse_unit_token("psi").unwrap();
        assert_eq!(token.name, "psi");
        assert_eq!(token.power, None);
    }

    #[test]
    fn test_parse_unit_with_power() {
        let token = parse_unit_token("mm^2").unwrap();
        assert_eq!(token.name, "mm");
        assert_eq!(token.power, Some(2));

        let token = parse_unit_token("s^-1").unwrap();
        assert_eq!(token.power, Some(-1));

        let token = parse_unit_token("in^+3").unwrap();
        assert_eq!(token.power, Some(3));
    }

    #[test]
    fn test_case_preserved() {
        let token = parse_unit_token("KM^2").unwrap();
        assert_eq!(token.name, "KM");
    }

    #[test]
    fn test_invalid_power() {
        for bad in ["m^x", "m^", "m^ 2", "m^2 ", "m^3^1", "m^2.5"] {
            let err = parse_unit_token(bad).unwrap_err();
            assert!(matches!(err, ConversionError::InvalidPowerSuffix { .. }), "{bad}");
        }
    }

    #[test]
    fn test_pair_plain() {
        let pair = parse_conversion("in", "m").unwrap();
        assert_eq!(pair, TokenPair { from: "in", to: "m", power: 1, literal: false });
    }

    #[test]
    fn test_pair_same_power() {
        let pair = parse_conversion("mm^2", "in^2").unwrap();
        assert_eq!(pair, TokenPair { from: "mm", to: "in", power: 2, literal: false });
    }

    #[test]
    fn test_pair_power_mismatch() {
        let err = parse_conversion("m^2", "m^3").unwrap_err();
        assert_eq!(err, ConversionError::IncompatibleUnits {
            from: "m^2".to_string(),
            to: "m^3".to_string(),
            mismatch: Mismatch::Power { from: 2, to: 3 },
        });
    }

    #[test]
    fn test_pair_literal_fallback() {
        let pair = parse_conversion("L", "ft^3").unwrap();
        assert_eq!(pair, TokenPair { from: "L", to: "ft^3", power: 1, literal: true });

        let pair = parse_conversion("m^3", "L").unwrap();
        assert!(pair.literal);
        assert_eq!(pair.from, "m^3");
    }

    #[test]
    fn test_pair_invalid_power_is_literal() {
        let pair = parse_conversion("m^x", "m^2").unwrap();
        assert!(pair.literal);
        assert_eq!(pair.from, "m^x");
        assert_eq!(pair.to, "m^2");
    }
}
