//! Error types for the base grid engine.

use thiserror::Error;

use crate::placement::PlacementResult;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Top-level error type for all fallible engine operations.
///
/// Queries (occupancy, placement, hover) never fail; they answer with
/// booleans and options. Only loading, rule resolution and committing
/// changes to a base can produce one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Data file parsing error.
    #[error("Failed to parse data '{path}': {message}")]
    DataParse {
        /// Path (or label) of the data that failed to parse.
        path: String,
        /// Error message.
        message: String,
    },

    /// A base references a facility type missing from the ruleset.
    #[error("Unknown facility type: {0}")]
    UnknownFacilityType(String),

    /// A base references a craft type missing from the ruleset.
    #[error("Unknown craft type: {0}")]
    UnknownCraftType(String),

    /// Two rules share the same identifier.
    #[error("Duplicate rule id: {0}")]
    DuplicateRule(String),

    /// A facility rule declares a footprint of zero cells.
    #[error("Facility type '{0}' has an invalid footprint size of 0")]
    InvalidFacilitySize(String),

    /// Display scale must be strictly positive.
    #[error("Invalid display scale: {0}")]
    InvalidScale(String),

    /// View configuration is inconsistent.
    #[error("Invalid view configuration: {0}")]
    InvalidConfig(String),

    /// Pixel buffer does not match the declared surface dimensions.
    #[error("Invalid surface: {0}")]
    InvalidSurface(String),

    /// An operation needed a bound base but the view has none.
    #[error("No base is bound to the view")]
    NoBaseBound,

    /// A facility could not be placed at the requested cell.
    #[error("Placement rejected: {0:?}")]
    PlacementRejected(PlacementResult),

    /// Facility handle does not resolve to a facility.
    #[error("Facility not found: {0}")]
    FacilityNotFound(u32),
}
