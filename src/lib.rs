//! Combat chatter character selection.
//!
//! Loads character and faction compatibility data from content packs into an immutable
//! [data::ChatterCatalog], then picks a chatter character for each officer with
//! [selection::CharacterSelector].

pub mod config;
pub mod data;
pub mod plugin;
pub mod selection;

pub use config::{load_config, ChatterConfig, ConfigError, DEFAULT_CONFIG_PATH};
pub use data::{ChatterCatalog, ContentPacks, ContentSource, DataError, FactionRegistry};
pub use plugin::ChatterPlugin;
pub use selection::{
    AssignmentStore, CharacterSelector, CombatMode, Gender, Officer, SelectionRequest, ShipContext,
    DEFAULT_CHARACTER_ID,
};
