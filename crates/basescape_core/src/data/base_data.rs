//! Saved base layouts and ruleset bundles.

use serde::{Deserialize, Serialize};

use super::{CraftData, FacilityData};

/// A full set of facility and craft types.
///
/// # Example RON
///
/// ```ron
/// RulesetData(
///     facilities: [
///         (id: "access_lift", sprite_shape: 2, sprite_facility: 17),
///         (id: "hangar", size: 2, sprite_shape: 10, crafts: 1),
///     ],
///     crafts: [
///         (id: "interceptor", sprite: 33),
///     ],
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetData {
    /// Facility type definitions.
    #[serde(default)]
    pub facilities: Vec<FacilityData>,

    /// Craft type definitions.
    #[serde(default)]
    pub crafts: Vec<CraftData>,
}

/// One facility placed in a saved base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityPlacementData {
    /// Facility type id.
    pub kind: String,

    /// Origin column.
    pub x: u32,

    /// Origin row.
    pub y: u32,

    /// Days of construction remaining; 0 means operational.
    #[serde(default)]
    pub build_time: u32,
}

/// A saved base: placed facilities plus docked craft, both in list order.
///
/// # Example RON
///
/// ```ron
/// BaseData(
///     name: "Alpha",
///     facilities: [
///         (kind: "access_lift", x: 2, y: 2),
///         (kind: "hangar", x: 0, y: 2, build_time: 12),
///     ],
///     crafts: ["interceptor"],
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseData {
    /// Display name of the base.
    #[serde(default)]
    pub name: String,

    /// Facilities in list order.
    #[serde(default)]
    pub facilities: Vec<FacilityPlacementData>,

    /// Craft type ids in list order.
    #[serde(default)]
    pub crafts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_data() {
        let data: BaseData = ron::from_str(
            r#"(
                name: "Alpha",
                facilities: [
                    (kind: "access_lift", x: 2, y: 2),
                    (kind: "hangar", x: 0, y: 2, build_time: 12),
                ],
                crafts: ["interceptor"],
            )"#,
        )
        .expect("valid base");

        assert_eq!(data.name, "Alpha");
        assert_eq!(data.facilities.len(), 2);
        assert_eq!(data.facilities[0].build_time, 0);
        assert_eq!(data.facilities[1].build_time, 12);
        assert_eq!(data.crafts, vec!["interceptor".to_string()]);
    }

    #[test]
    fn test_parse_ruleset_data() {
        let data: RulesetData = ron::from_str(
            r#"(
                facilities: [(id: "lift", sprite_shape: 2)],
                crafts: [(id: "skyranger", sprite: 34)],
            )"#,
        )
        .expect("valid ruleset");
        assert_eq!(data.facilities[0].size, 1);
        assert_eq!(data.crafts[0].sprite, 34);
    }
}
