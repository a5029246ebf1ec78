//! Chatter characters and their line banks, parsed from per-character JSON definitions.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::data::tables::DataError;

/// Combat situations a character can have lines for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Start,
    StartBoss,
    Retreat,
    FullRetreat,
    Pursuing,
    Running,
    NeedHelp,
    OutOfMissiles,
    Engaged,
    Hull90,
    Hull50,
    Hull30,
    Overload,
    Death,
    Victory,
    Idle,
}

impl MessageType {
    pub const ALL: [MessageType; 16] = [
        Self::Start,
        Self::StartBoss,
        Self::Retreat,
        Self::FullRetreat,
        Self::Pursuing,
        Self::Running,
        Self::NeedHelp,
        Self::OutOfMissiles,
        Self::Engaged,
        Self::Hull90,
        Self::Hull50,
        Self::Hull30,
        Self::Overload,
        Self::Death,
        Self::Victory,
        Self::Idle,
    ];

    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::StartBoss => "START_BOSS",
            Self::Retreat => "RETREAT",
            Self::FullRetreat => "FULL_RETREAT",
            Self::Pursuing => "PURSUING",
            Self::Running => "RUNNING",
            Self::NeedHelp => "NEED_HELP",
            Self::OutOfMissiles => "OUT_OF_MISSILES",
            Self::Engaged => "ENGAGED",
            Self::Hull90 => "HULL_90",
            Self::Hull50 => "HULL_50",
            Self::Hull30 => "HULL_30",
            Self::Overload => "OVERLOAD",
            Self::Death => "DEATH",
            Self::Victory => "VICTORY",
            Self::Idle => "IDLE",
        }
    }

    /// Match a line-bank key case-insensitively. Accented Latin letters fold to their base
    /// letter (`é` -> `E`); any other non-ASCII character is dropped.
    pub fn from_key(key: &str) -> Option<Self> {
        let folded: String = key
            .trim()
            .chars()
            .filter_map(fold_to_ascii)
            .map(|c| c.to_ascii_uppercase())
            .collect();
        Self::ALL.into_iter().find(|t| t.as_key() == folded)
    }
}

fn fold_to_ascii(c: char) -> Option<char> {
    if c.is_ascii() {
        return Some(c);
    }
    let base = match c.to_lowercase().next()? {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' => 'h',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        _ => return None,
    };
    Some(base)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatterLine {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub sound: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Character {
    pub id: String,
    pub name: String,
    /// Allowed officer genders: any of `m`, `f`, `n`.
    pub gender: Vec<String>,
    pub personalities: Vec<String>,
    pub chance: f64,
    /// Loaded from `chance`; nothing reads it yet.
    pub talkativeness: f64,
    pub lines: HashMap<MessageType, Vec<ChatterLine>>,
    /// Filled in when the catalog is resolved against the faction registry.
    pub allowed_factions: HashSet<String>,
}

#[derive(Debug, Deserialize)]
struct CharacterDefinition {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    personalities: Vec<String>,
    #[serde(default)]
    gender: Vec<String>,
    #[serde(default)]
    chance: Option<f64>,
    lines: Map<String, Value>,
}

impl Character {
    /// Parse a definition document. `path` is only used in error messages.
    pub fn from_json(id: &str, raw: &str, path: &str) -> Result<Self, DataError> {
        let json_error = |source: serde_json::Error| DataError::Json {
            path: path.to_string(),
            source,
        };
        let definition: CharacterDefinition = serde_json::from_str(raw).map_err(json_error)?;

        let mut lines = HashMap::new();
        for (key, value) in definition.lines {
            let Some(message_type) = MessageType::from_key(&key) else {
                continue;
            };
            let bank: Vec<ChatterLine> = serde_json::from_value(value).map_err(json_error)?;
            lines.insert(message_type, bank);
        }

        let chance = definition.chance.unwrap_or(1.0).max(0.0);
        Ok(Self {
            id: id.to_string(),
            name: definition.name.unwrap_or_else(|| id.to_string()),
            gender: definition.gender,
            personalities: definition.personalities,
            chance,
            talkativeness: chance,
            lines,
            allowed_factions: HashSet::new(),
        })
    }

    pub fn lines(&self, message_type: MessageType) -> &[ChatterLine] {
        self.lines
            .get(&message_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn allows_gender(&self, gender: &str) -> bool {
        self.gender.iter().any(|g| g == gender)
    }

    pub fn has_personality(&self, personality: &str) -> bool {
        self.personalities.iter().any(|p| p == personality)
    }

    pub fn allows_faction(&self, faction: &str) -> bool {
        self.allowed_factions.contains(faction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRUFF: &str = r#"{
        "name": "Gruff Veteran",
        "personalities": ["steady", "aggressive"],
        "gender": ["m", "f"],
        "chance": 0.5,
        "lines": {
            "start": [
                { "text": "Let's get this over with." },
                { "text": "Weapons free.", "sound": "gruff_start_2" }
            ],
            "Hull_50": [{ "text": "Armor's holding. Barely." }],
            "some_future_type": [{ "unexpected": true }]
        }
    }"#;

    #[test]
    fn parses_definition_and_skips_unknown_message_types() {
        let c = Character::from_json("gruff", GRUFF, "gruff.json").unwrap();
        assert_eq!(c.name, "Gruff Veteran");
        assert_eq!(c.personalities, vec!["steady", "aggressive"]);
        assert!(c.allows_gender("f") && !c.allows_gender("n"));
        assert_eq!(c.chance, 0.5);
        assert_eq!(c.talkativeness, c.chance);
        assert_eq!(c.lines.len(), 2);
        assert_eq!(c.lines(MessageType::Start).len(), 2);
        assert_eq!(c.lines(MessageType::Start)[1].sound.as_deref(), Some("gruff_start_2"));
        assert_eq!(c.lines(MessageType::Hull50)[0].text, "Armor's holding. Barely.");
        assert!(c.lines(MessageType::Death).is_empty());
        assert!(c.allowed_factions.is_empty());
    }

    #[test]
    fn optional_fields_default() {
        let c = Character::from_json("quiet", r#"{ "lines": {} }"#, "quiet.json").unwrap();
        assert_eq!(c.name, "quiet");
        assert_eq!(c.chance, 1.0);
        assert!(c.gender.is_empty() && c.personalities.is_empty());
    }

    #[test]
    fn missing_lines_or_bad_json_fails() {
        assert!(Character::from_json("x", r#"{ "name": "X" }"#, "x.json").is_err());
        assert!(Character::from_json("x", "{", "x.json").is_err());
        let bad_bank = r#"{ "lines": { "start": "not a list" } }"#;
        assert!(matches!(
            Character::from_json("x", bad_bank, "x.json"),
            Err(DataError::Json { .. })
        ));
    }

    #[test]
    fn message_type_keys_fold_case() {
        assert_eq!(MessageType::from_key("out_of_missiles"), Some(MessageType::OutOfMissiles));
        assert_eq!(MessageType::from_key(" HULL_30 "), Some(MessageType::Hull30));
        assert_eq!(MessageType::from_key("victory"), Some(MessageType::Victory));
        assert_eq!(MessageType::from_key("unknown"), None);
    }

    #[test]
    fn accented_keys_fold_to_base_letters() {
        assert_eq!(MessageType::from_key("éngaged"), Some(MessageType::Engaged));
        assert_eq!(MessageType::from_key("VICTÖRY"), Some(MessageType::Victory));
        assert_eq!(MessageType::from_key("déath★"), Some(MessageType::Death));
    }
}
