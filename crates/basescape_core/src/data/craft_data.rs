//! Craft type data.

use serde::{Deserialize, Serialize};

/// Data-driven craft type definition.
///
/// The base view only needs the docked icon frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftData {
    /// Unique string identifier for this craft type.
    pub id: String,

    /// Frame in the base sprite set drawn when the craft is docked.
    pub sprite: usize,
}
