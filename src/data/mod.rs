pub mod catalog;
pub mod character;
pub mod compatibility;
pub mod prefixes;
pub mod tables;

pub use catalog::{CatalogTables, ChatterCatalog, FactionRegistry};
pub use character::{Character, ChatterLine, MessageType};
pub use compatibility::{Compatibility, CompatibilityRules, FactionTags};
pub use prefixes::PrefixTable;
pub use tables::{ContentPacks, ContentSource, DataError, TableRow};

pub const CONFIG_DIR: &str = "data/config/chatter/";
pub const CHARACTERS_DIR: &str = "data/config/chatter/characters/";
pub const CHARACTERS_LIST: &str = "data/config/chatter/characters.csv";
pub const FACTION_TAGS_FILE: &str = "data/config/chatter/factiontags.csv";
pub const CHARACTER_FACTIONS_FILE: &str = "data/config/chatter/character_factions.csv";
pub const HULL_FACTION_PREFIX_FILE: &str = "data/config/chatter/hull_prefixes.csv";
pub const SHIP_NAME_FACTION_PREFIX_FILE: &str = "data/config/chatter/ship_name_prefixes.csv";
