//! Facility type data for data-driven facility definitions.

use serde::{Deserialize, Serialize};

/// Data-driven facility type definition.
///
/// Only the attributes the base view reads are kept here: footprint size,
/// sprite bank offsets, build time and hangar capacity.
///
/// # Example RON
///
/// ```ron
/// FacilityData(
///     id: "hangar",
///     size: 2,
///     sprite_shape: 10,
///     sprite_facility: 10,
///     build_time: 25,
///     crafts: 1,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityData {
    /// Unique string identifier for this facility type.
    pub id: String,

    /// Footprint side length in cells.
    #[serde(default = "default_size")]
    pub size: u32,

    /// First frame of the footprint shape bank.
    pub sprite_shape: usize,

    /// First frame of the icon bank (drawn only for single-cell facilities).
    #[serde(default)]
    pub sprite_facility: usize,

    /// Construction time in days.
    #[serde(default)]
    pub build_time: u32,

    /// Number of craft this facility can house.
    #[serde(default)]
    pub crafts: u32,
}

/// Default footprint for facilities without explicit size.
const fn default_size() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_defaults() {
        let data: FacilityData =
            ron::from_str("(id: \"lab\", sprite_shape: 4)").expect("valid facility");
        assert_eq!(data.id, "lab");
        assert_eq!(data.size, 1);
        assert_eq!(data.sprite_facility, 0);
        assert_eq!(data.crafts, 0);
    }

    #[test]
    fn test_parse_hangar() {
        let data: FacilityData = ron::from_str(
            "(id: \"hangar\", size: 2, sprite_shape: 10, sprite_facility: 10, build_time: 25, crafts: 1)",
        )
        .expect("valid facility");
        assert_eq!(data.size, 2);
        assert_eq!(data.build_time, 25);
        assert_eq!(data.crafts, 1);
    }
}
