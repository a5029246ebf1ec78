//! Chatter catalog built in two phases.
//!
//! Phase 1 ([CatalogTables::load]) parses every table and character definition from a
//! [ContentSource]. Phase 2 ([CatalogTables::resolve]) needs a populated [FactionRegistry]:
//! it computes each character's allowed factions and yields the immutable [ChatterCatalog]
//! that selection reads from.

use std::collections::HashMap;

use crate::data::character::Character;
use crate::data::compatibility::{CompatibilityRules, FactionTags};
use crate::data::prefixes::PrefixTable;
use crate::data::tables::{ContentSource, TableRow};
use crate::data::{
    CHARACTERS_DIR, CHARACTERS_LIST, CHARACTER_FACTIONS_FILE, FACTION_TAGS_FILE,
    HULL_FACTION_PREFIX_FILE, SHIP_NAME_FACTION_PREFIX_FILE,
};

/// Every faction currently known to the game.
pub trait FactionRegistry {
    fn faction_ids(&self) -> Vec<String>;
}

impl FactionRegistry for [String] {
    fn faction_ids(&self) -> Vec<String> {
        self.to_vec()
    }
}

impl FactionRegistry for Vec<String> {
    fn faction_ids(&self) -> Vec<String> {
        self.clone()
    }
}

impl FactionRegistry for [&str] {
    fn faction_ids(&self) -> Vec<String> {
        self.iter().map(|id| id.to_string()).collect()
    }
}

/// Parsed tables, before faction resolution.
#[derive(Debug, Clone, Default)]
pub struct CatalogTables {
    pub faction_tags: FactionTags,
    pub compatibility: CompatibilityRules,
    pub characters: Vec<Character>,
    pub hull_prefixes: PrefixTable,
    pub ship_name_prefixes: PrefixTable,
}

impl CatalogTables {
    /// Read all tables. A table that fails to load is logged and left empty; a character
    /// whose definition fails is logged and skipped. Never fails as a whole.
    pub fn load(source: &dyn ContentSource) -> Self {
        let faction_tags = source
            .merged_table(FACTION_TAGS_FILE, "faction")
            .and_then(|rows| FactionTags::from_rows(&rows))
            .unwrap_or_else(|err| {
                tracing::error!("faction tags not loaded: {err}");
                FactionTags::default()
            });

        let compatibility = source
            .merged_table(CHARACTER_FACTIONS_FILE, "character")
            .and_then(|rows| CompatibilityRules::from_rows(&rows))
            .unwrap_or_else(|err| {
                tracing::error!("character-faction compatibility not loaded: {err}");
                CompatibilityRules::default()
            });

        let characters = match source.merged_table(CHARACTERS_LIST, "character") {
            Ok(rows) => load_characters(source, &rows),
            Err(err) => {
                tracing::error!("character list not loaded: {err}");
                Vec::new()
            }
        };

        let hull_prefixes = load_prefixes(source, HULL_FACTION_PREFIX_FILE);
        let ship_name_prefixes = load_prefixes(source, SHIP_NAME_FACTION_PREFIX_FILE);

        tracing::debug!(
            factions = faction_tags.len(),
            rules = compatibility.len(),
            characters = characters.len(),
            hull_prefixes = hull_prefixes.len(),
            ship_name_prefixes = ship_name_prefixes.len(),
            "chatter tables loaded"
        );

        Self {
            faction_tags,
            compatibility,
            characters,
            hull_prefixes,
            ship_name_prefixes,
        }
    }

    /// Resolve allowed factions for every character.
    /// Precondition: `registry` already lists every faction in play.
    pub fn resolve<R: FactionRegistry + ?Sized>(self, registry: &R) -> ChatterCatalog {
        let factions = registry.faction_ids();
        let mut characters = self.characters;
        for character in &mut characters {
            character.allowed_factions = self.compatibility.allowed_factions(
                &character.id,
                factions.iter().map(String::as_str),
                &self.faction_tags,
            );
        }
        let by_id = characters
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        ChatterCatalog {
            characters,
            by_id,
            faction_tags: self.faction_tags,
            compatibility: self.compatibility,
            hull_prefixes: self.hull_prefixes,
            ship_name_prefixes: self.ship_name_prefixes,
        }
    }
}

fn load_characters(source: &dyn ContentSource, rows: &[TableRow]) -> Vec<Character> {
    let mut characters: Vec<Character> = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(id) = row.get("character") else {
            continue;
        };
        if characters.iter().any(|c| c.id == id) {
            continue;
        }
        let path = format!("{CHARACTERS_DIR}{id}.json");
        match source
            .read_definition(&path)
            .and_then(|raw| Character::from_json(id, &raw, &path))
        {
            Ok(character) => characters.push(character),
            Err(err) => tracing::error!(character = id, "error loading character: {err}"),
        }
    }
    characters
}

fn load_prefixes(source: &dyn ContentSource, path: &str) -> PrefixTable {
    match source.merged_table(path, "prefix") {
        Ok(rows) => PrefixTable::from_rows(&rows),
        Err(err) => {
            tracing::error!("prefix table not loaded: {err}");
            PrefixTable::default()
        }
    }
}

/// Read-only chatter data, shared by every selection for the rest of the session.
#[derive(Debug, Clone)]
pub struct ChatterCatalog {
    characters: Vec<Character>,
    by_id: HashMap<String, usize>,
    faction_tags: FactionTags,
    compatibility: CompatibilityRules,
    hull_prefixes: PrefixTable,
    ship_name_prefixes: PrefixTable,
}

impl ChatterCatalog {
    /// Convenience for both phases in one call.
    pub fn load<R: FactionRegistry + ?Sized>(source: &dyn ContentSource, registry: &R) -> Self {
        CatalogTables::load(source).resolve(registry)
    }

    /// Characters in character-list order.
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn character(&self, id: &str) -> Option<&Character> {
        self.by_id.get(id).map(|&i| &self.characters[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn faction_tags(&self) -> &FactionTags {
        &self.faction_tags
    }

    pub fn compatibility(&self) -> &CompatibilityRules {
        &self.compatibility
    }

    pub fn is_character_allowed_for_faction(&self, character: &str, faction: &str) -> bool {
        self.compatibility
            .is_allowed(character, faction, &self.faction_tags)
    }

    pub fn hull_prefixes(&self) -> &PrefixTable {
        &self.hull_prefixes
    }

    pub fn ship_name_prefixes(&self) -> &PrefixTable {
        &self.ship_name_prefixes
    }

    pub fn faction_from_hull_id(&self, hull_id: &str) -> String {
        self.hull_prefixes.faction_from_hull_id(hull_id)
    }

    pub fn faction_from_ship_name(&self, ship_name: &str) -> String {
        self.ship_name_prefixes.faction_from_ship_name(ship_name)
    }
}
