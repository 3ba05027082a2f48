//! Data structures for ruleset and base definitions.
//!
//! This module contains pure data structures that describe facility types,
//! craft types and saved base layouts. All structs are designed to be
//! deserialized from RON files.
//!
//! **Note:** This module contains no IO - it only defines data types.
//! File loading is handled by `basescape_tools`.

mod base_data;
mod craft_data;
mod facility_data;

pub use base_data::{BaseData, FacilityPlacementData, RulesetData};
pub use craft_data::CraftData;
pub use facility_data::FacilityData;

use crate::error::{GameError, Result};

/// Parse any RON data record, labelling errors with `path`.
pub fn parse_ron<T>(path: &str, text: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    ron::from_str(text).map_err(|e| GameError::DataParse {
        path: path.to_string(),
        message: e.to_string(),
    })
}
