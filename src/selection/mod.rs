//! Choose a chatter character for an officer.

mod picker;
mod store;

pub use picker::WeightedPicker;
pub use store::AssignmentStore;

use rand::Rng;

use crate::config::ChatterConfig;
use crate::data::ChatterCatalog;

/// Returned whenever no character can be chosen.
pub const DEFAULT_CHARACTER_ID: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unspecified,
}

impl Gender {
    /// Code used in character definitions.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Male => "m",
            Self::Female => "f",
            Self::Unspecified => "n",
        }
    }
}

/// What kind of battle the selection happens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatMode {
    Campaign,
    CampaignSimulator,
    /// One-off mission; nothing is remembered.
    Mission,
    /// Combat outside any campaign or mission (e.g. standalone simulator).
    Standalone,
}

impl CombatMode {
    pub fn is_mission(&self) -> bool {
        matches!(self, Self::Mission)
    }

    pub fn is_campaign(&self) -> bool {
        matches!(self, Self::Campaign | Self::CampaignSimulator)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Officer {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    /// Personality tag such as `aggressive` or `cautious`.
    pub personality: String,
    pub faction_id: String,
    /// Faction the officer originally served, overriding `faction_id` when set.
    pub original_faction: Option<String>,
}

impl Officer {
    pub fn effective_faction(&self) -> &str {
        self.original_faction.as_deref().unwrap_or(&self.faction_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShipContext {
    pub name: String,
    pub hull_id: String,
    pub is_ally: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct SelectionRequest<'a> {
    pub officer: &'a Officer,
    pub ship: &'a ShipContext,
    pub mode: CombatMode,
    /// Officer ids of the fleet the ship belongs to.
    pub fleet_officers: &'a [String],
}

/// Picks characters from a resolved catalog.
#[derive(Debug, Clone, Copy)]
pub struct CharacterSelector<'a> {
    catalog: &'a ChatterCatalog,
    config: &'a ChatterConfig,
}

impl<'a> CharacterSelector<'a> {
    pub fn new(catalog: &'a ChatterCatalog, config: &'a ChatterConfig) -> Self {
        Self { catalog, config }
    }

    /// Character id for the request's officer, or [DEFAULT_CHARACTER_ID].
    ///
    /// A stored assignment to a character that still exists is returned unchanged. Otherwise a
    /// character is drawn by weight and, outside missions and allied ships, stored.
    pub fn select_character<S, R>(
        &self,
        request: &SelectionRequest<'_>,
        store: &mut S,
        rng: &mut R,
    ) -> String
    where
        S: AssignmentStore + ?Sized,
        R: Rng + ?Sized,
    {
        let officer = request.officer;
        if let Some(saved) = store.get(&officer.id) {
            if self.catalog.contains(saved) {
                return saved.to_string();
            }
        }

        let faction = self.combat_faction(request);
        let mut picker = self.candidates(request, &faction);
        let backup = picker.clone();

        if !request.ship.is_ally && request.mode.is_campaign() {
            for other in request.fleet_officers.iter().filter(|id| **id != officer.id) {
                if let Some(taken) = store.get(other) {
                    picker.remove(taken);
                }
            }
        }
        if picker.is_empty() {
            picker = backup;
        }

        let Some(character_id) = picker.pick(rng).map(str::to_string) else {
            return DEFAULT_CHARACTER_ID.to_string();
        };

        tracing::info!(
            character = %character_id,
            officer = %officer.name,
            faction = %faction,
            "assigning chatter character"
        );
        if !request.ship.is_ally && !request.mode.is_mission() {
            store.put(&officer.id, &character_id);
        }
        character_id
    }

    /// Faction used for compatibility checks. Missions infer it from the ship name prefix,
    /// then the hull id prefix; empty when neither matches.
    pub fn combat_faction(&self, request: &SelectionRequest<'_>) -> String {
        if !request.mode.is_mission() {
            return request.officer.effective_faction().to_string();
        }
        let from_name = self.catalog.faction_from_ship_name(&request.ship.name);
        if !from_name.is_empty() {
            return from_name;
        }
        self.catalog.faction_from_hull_id(&request.ship.hull_id)
    }

    fn candidates(&self, request: &SelectionRequest<'_>, faction: &str) -> WeightedPicker {
        let gender = request.officer.gender.code();
        let mut picker = WeightedPicker::new();
        for character in self.catalog.characters() {
            if !request.mode.is_mission() && !character.allows_gender(gender) {
                continue;
            }
            if self.config.faction_specific_characters && !character.allows_faction(faction) {
                continue;
            }
            if character.has_personality(&request.officer.personality) {
                picker.add(character.id.clone(), character.chance);
            }
        }
        picker
    }
}
