//! Linear unit tags and conversion factors

use serde::{Deserialize, Serialize};

/// Linear unit of a portable mesh's vertex data.
///
/// Serialized with the short tags portable records carry on the wire
/// (`"mm"`, `"cm"`, `"m"`, ...). Conversion between any two units goes
/// through meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Units {
    #[serde(rename = "mm")]
    Millimeters,
    #[serde(rename = "cm")]
    Centimeters,
    #[default]
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "km")]
    Kilometers,
    #[serde(rename = "in")]
    Inches,
    #[serde(rename = "ft")]
    Feet,
    #[serde(rename = "yd")]
    Yards,
    #[serde(rename = "mi")]
    Miles,
}

impl Units {
    /// Length of one of this unit, in meters
    pub fn meters_per_unit(self) -> f64 {
        match self {
            Units::Millimeters => 0.001,
            Units::Centimeters => 0.01,
            Units::Meters => 1.0,
            Units::Kilometers => 1000.0,
            Units::Inches => 0.0254,
            Units::Feet => 0.3048,
            Units::Yards => 0.9144,
            Units::Miles => 1609.344,
        }
    }

    /// Scale factor taking coordinates in `from` units into `to` units
    pub fn conversion_factor(from: Units, to: Units) -> f64 {
        from.meters_per_unit() / to.meters_per_unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_to_meters() {
        assert_eq!(Units::conversion_factor(Units::Millimeters, Units::Meters), 0.001);
        assert_eq!(Units::conversion_factor(Units::Kilometers, Units::Meters), 1000.0);
    }

    #[test]
    fn test_conversion_between_imperial() {
        let factor = Units::conversion_factor(Units::Feet, Units::Inches);
        assert!((factor - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_identity_conversion() {
        assert_eq!(Units::conversion_factor(Units::Yards, Units::Yards), 1.0);
    }

    #[test]
    fn test_serde_tags() {
        assert_eq!(serde_json::to_string(&Units::Millimeters).unwrap(), "\"mm\"");
        let parsed: Units = serde_json::from_str("\"ft\"").unwrap();
        assert_eq!(parsed, Units::Feet);
    }
}
