//! Resolved facility and craft rules.
//!
//! Rules are immutable once loaded and shared by every facility and craft
//! of their type through an [`Arc`].

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::data::{CraftData, FacilityData, RulesetData};
use crate::error::{GameError, Result};

/// Static attributes of a facility type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacilityRule {
    id: String,
    size: u32,
    sprite_shape: usize,
    sprite_facility: usize,
    build_time: u32,
    crafts: u32,
}

impl FacilityRule {
    /// Build a rule from its data record.
    pub fn from_data(data: &FacilityData) -> Result<Self> {
        if data.size == 0 {
            return Err(GameError::InvalidFacilitySize(data.id.clone()));
        }
        Ok(Self {
            id: data.id.clone(),
            size: data.size,
            sprite_shape: data.sprite_shape,
            sprite_facility: data.sprite_facility,
            build_time: data.build_time,
            crafts: data.crafts,
        })
    }

    /// Type id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Footprint side length in cells (always at least 1).
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// First frame of the footprint shape bank.
    #[must_use]
    pub const fn sprite_shape(&self) -> usize {
        self.sprite_shape
    }

    /// First frame of the icon bank.
    #[must_use]
    pub const fn sprite_facility(&self) -> usize {
        self.sprite_facility
    }

    /// Days needed to build a new facility of this type.
    #[must_use]
    pub const fn build_time(&self) -> u32 {
        self.build_time
    }

    /// Hangar capacity.
    #[must_use]
    pub const fn crafts(&self) -> u32 {
        self.crafts
    }

    /// Whether facilities of this type can house a craft.
    #[must_use]
    pub const fn is_hangar(&self) -> bool {
        self.crafts > 0
    }
}

/// Static attributes of a craft type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftRule {
    id: String,
    sprite: usize,
}

impl CraftRule {
    /// Build a rule from its data record.
    #[must_use]
    pub fn from_data(data: &CraftData) -> Self {
        Self {
            id: data.id.clone(),
            sprite: data.sprite,
        }
    }

    /// Type id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Frame drawn for a docked craft of this type.
    #[must_use]
    pub const fn sprite(&self) -> usize {
        self.sprite
    }
}

/// Registry of all facility and craft types.
#[derive(Debug, Clone, Default)]
pub struct Ruleset {
    facilities: HashMap<String, Arc<FacilityRule>>,
    crafts: HashMap<String, Arc<CraftRule>>,
}

impl Ruleset {
    /// Create an empty ruleset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ruleset from its data bundle.
    ///
    /// Fails on duplicate ids and zero-size facilities.
    pub fn from_data(data: &RulesetData) -> Result<Self> {
        let mut ruleset = Self::new();
        for facility in &data.facilities {
            ruleset.add_facility(FacilityRule::from_data(facility)?)?;
        }
        for craft in &data.crafts {
            ruleset.add_craft(CraftRule::from_data(craft))?;
        }
        debug!(
            facilities = ruleset.facilities.len(),
            crafts = ruleset.crafts.len(),
            "Ruleset loaded"
        );
        Ok(ruleset)
    }

    /// Register a facility type.
    pub fn add_facility(&mut self, rule: FacilityRule) -> Result<Arc<FacilityRule>> {
        if self.facilities.contains_key(rule.id()) {
            return Err(GameError::DuplicateRule(rule.id.clone()));
        }
        let rule = Arc::new(rule);
        self.facilities.insert(rule.id.clone(), Arc::clone(&rule));
        Ok(rule)
    }

    /// Register a craft type.
    pub fn add_craft(&mut self, rule: CraftRule) -> Result<Arc<CraftRule>> {
        if self.crafts.contains_key(rule.id()) {
            return Err(GameError::DuplicateRule(rule.id.clone()));
        }
        let rule = Arc::new(rule);
        self.crafts.insert(rule.id.clone(), Arc::clone(&rule));
        Ok(rule)
    }

    /// Look up a facility type.
    #[must_use]
    pub fn facility(&self, id: &str) -> Option<&Arc<FacilityRule>> {
        self.facilities.get(id)
    }

    /// Look up a facility type, failing with [`GameError::UnknownFacilityType`].
    pub fn require_facility(&self, id: &str) -> Result<&Arc<FacilityRule>> {
        self.facility(id)
            .ok_or_else(|| GameError::UnknownFacilityType(id.to_string()))
    }

    /// Look up a craft type.
    #[must_use]
    pub fn craft(&self, id: &str) -> Option<&Arc<CraftRule>> {
        self.crafts.get(id)
    }

    /// Look up a craft type, failing with [`GameError::UnknownCraftType`].
    pub fn require_craft(&self, id: &str) -> Result<&Arc<CraftRule>> {
        self.craft(id)
            .ok_or_else(|| GameError::UnknownCraftType(id.to_string()))
    }

    /// All facility types, sorted by id.
    pub fn facilities(&self) -> impl Iterator<Item = &Arc<FacilityRule>> + '_ {
        let mut rules: Vec<_> = self.facilities.values().collect();
        rules.sort_by(|a, b| a.id().cmp(b.id()));
        rules.into_iter()
    }

    /// All craft types, sorted by id.
    pub fn crafts(&self) -> impl Iterator<Item = &Arc<CraftRule>> + '_ {
        let mut rules: Vec<_> = self.crafts.values().collect();
        rules.sort_by(|a, b| a.id().cmp(b.id()));
        rules.into_iter()
    }

    /// Number of facility types.
    #[must_use]
    pub fn facility_count(&self) -> usize {
        self.facilities.len()
    }

    /// Number of craft types.
    #[must_use]
    pub fn craft_count(&self) -> usize {
        self.crafts.len()
    }
}
