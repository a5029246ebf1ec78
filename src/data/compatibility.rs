//! Character/faction compatibility: faction tag sets and per-character allow/forbid rules.

use std::collections::{HashMap, HashSet};

use crate::data::tables::{DataError, TableRow, ROW_SOURCE_COLUMN};

/// Faction id -> tags (e.g. `pirates` -> {`pirate`, `lowtech`}).
#[derive(Debug, Clone, Default)]
pub struct FactionTags {
    tags: HashMap<String, HashSet<String>>,
}

impl FactionTags {
    pub fn from_rows(rows: &[TableRow]) -> Result<Self, DataError> {
        let mut tags = HashMap::new();
        for row in rows {
            let faction = row.require("faction")?;
            let set = row
                .require("tags")?
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect();
            tags.insert(faction.to_string(), set);
        }
        Ok(Self { tags })
    }

    pub fn insert(
        &mut self,
        faction: impl Into<String>,
        tags: impl IntoIterator<Item = impl Into<String>>,
    ) {
        self.tags
            .insert(faction.into(), tags.into_iter().map(Into::into).collect());
    }

    pub fn tags_for(&self, faction: &str) -> Option<&HashSet<String>> {
        self.tags.get(faction)
    }

    pub fn faction_ids(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compatibility {
    Allow,
    Forbid,
    Unspecified,
}

impl Compatibility {
    pub fn from_value(value: i32) -> Self {
        match value {
            1 => Self::Allow,
            -1 => Self::Forbid,
            _ => Self::Unspecified,
        }
    }
}

/// Character id -> ordered (faction-or-tag, value) rules, in table column order.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityRules {
    rules: HashMap<String, Vec<(String, i32)>>,
}

impl CompatibilityRules {
    pub fn from_rows(rows: &[TableRow]) -> Result<Self, DataError> {
        let mut rules = HashMap::new();
        for row in rows {
            let character = row.require("character")?;
            let mut entries = Vec::new();
            for (column, value) in &row.cells {
                if column == ROW_SOURCE_COLUMN || column == "character" || value.is_empty() {
                    continue;
                }
                let parsed = value.parse::<i32>().map_err(|_| DataError::InvalidValue {
                    path: row.source.clone(),
                    column: column.clone(),
                    value: value.clone(),
                })?;
                entries.push((column.clone(), parsed));
            }
            rules.insert(character.to_string(), entries);
        }
        Ok(Self { rules })
    }

    pub fn insert(&mut self, character: impl Into<String>, entries: Vec<(String, i32)>) {
        self.rules.insert(character.into(), entries);
    }

    pub fn rules_for(&self, character: &str) -> Option<&[(String, i32)]> {
        self.rules.get(character).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether `character` may appear in `faction`'s fleets.
    ///
    /// A character without a rule row allows everything. Otherwise an explicit entry for the
    /// faction id decides; failing that the first rule (in column order) naming one of the
    /// faction's tags decides; failing that the faction is forbidden.
    pub fn is_allowed(&self, character: &str, faction: &str, tags: &FactionTags) -> bool {
        let Some(entries) = self.rules.get(character) else {
            return true;
        };

        let explicit = entries
            .iter()
            .find(|(key, _)| key == faction)
            .map(|(_, value)| Compatibility::from_value(*value));
        match explicit {
            Some(Compatibility::Allow) => return true,
            Some(Compatibility::Forbid) => return false,
            _ => {}
        }

        let Some(faction_tags) = tags.tags_for(faction) else {
            return false;
        };
        for (key, value) in entries {
            if !faction_tags.contains(key) {
                continue;
            }
            match Compatibility::from_value(*value) {
                Compatibility::Allow => return true,
                Compatibility::Forbid => return false,
                Compatibility::Unspecified => {}
            }
        }
        false
    }

    /// Every faction in `factions` that [Self::is_allowed] accepts for `character`.
    pub fn allowed_factions<'a>(
        &self,
        character: &str,
        factions: impl IntoIterator<Item = &'a str>,
        tags: &FactionTags,
    ) -> HashSet<String> {
        factions
            .into_iter()
            .filter(|faction| self.is_allowed(character, faction, tags))
            .map(str::to_string)
            .collect()
    }
}
