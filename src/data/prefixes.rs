//! Guess a faction from a ship's hull id or display name, for mission combat where the
//! officer's own faction says nothing about the opposing fleet.

use crate::data::tables::{DataError, TableRow};

/// Ordered (prefix, faction) pairs; the first matching prefix wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixTable {
    entries: Vec<(String, String)>,
}

impl PrefixTable {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// Build from `prefix`/`faction` rows. Rows missing either column are logged and skipped.
    pub fn from_rows(rows: &[TableRow]) -> Self {
        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            let prefix = row.get("prefix").unwrap_or("<unknown>");
            match row_entry(row) {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    tracing::error!(prefix, "failed to load prefix -> faction mapping: {err}");
                }
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Faction for a hull id such as `ii_olympus`, or `""` when nothing matches.
    /// Any hull ending in `_cabal` belongs to the Cabal.
    pub fn faction_from_hull_id(&self, hull_id: &str) -> String {
        let hull_id = hull_id.to_lowercase();
        if hull_id.ends_with("_cabal") {
            return "cabal".to_string();
        }
        self.entries
            .iter()
            .find(|(prefix, _)| hull_id.starts_with(prefix.as_str()))
            .map(|(_, faction)| faction.clone())
            .unwrap_or_default()
    }

    /// Faction for a ship name such as `TTS Invincible`, or `""` when nothing matches.
    /// The prefix must be followed by a space.
    pub fn faction_from_ship_name(&self, ship_name: &str) -> String {
        self.entries
            .iter()
            .find(|(prefix, _)| {
                ship_name
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with(' '))
            })
            .map(|(_, faction)| faction.clone())
            .unwrap_or_default()
    }
}

fn row_entry(row: &TableRow) -> Result<(String, String), DataError> {
    let prefix = row.require("prefix")?;
    let faction = row.require("faction")?;
    if faction.is_empty() {
        return Err(DataError::InvalidValue {
            path: row.source.clone(),
            column: "faction".to_string(),
            value: faction.to_string(),
        });
    }
    Ok((prefix.to_string(), faction.to_string()))
}
