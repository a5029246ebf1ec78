//! Validate chatter content packs: load every table and character, resolve factions against
//! the faction tag table, and print what a game would end up with.
//! Run: cargo run --bin validate_chatter_data -- <pack_dir> [<pack_dir>...]

use chatter::data::{CatalogTables, ContentPacks, MessageType};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let roots: Vec<String> = std::env::args().skip(1).collect();
    if roots.is_empty() {
        eprintln!("usage: validate_chatter_data <pack_dir> [<pack_dir>...]");
        std::process::exit(2);
    }
    for root in &roots {
        if !std::path::Path::new(root).is_dir() {
            eprintln!("Content pack not found: {root}");
            std::process::exit(1);
        }
    }

    let packs = ContentPacks::new(&roots);
    let tables = CatalogTables::load(&packs);
    let mut factions: Vec<String> = tables.faction_tags.faction_ids().map(str::to_string).collect();
    factions.sort();
    let catalog = tables.resolve(&factions);

    for character in catalog.characters() {
        let lines: usize = MessageType::ALL
            .iter()
            .map(|t| character.lines(*t).len())
            .sum();
        let mut allowed: Vec<_> = character.allowed_factions.iter().map(String::as_str).collect();
        allowed.sort_unstable();
        println!(
            "{id:<24} chance={chance:<5} genders={genders:<6} \
             personalities={personalities} lines={lines} factions=[{allowed}]",
            id = character.id,
            chance = character.chance,
            genders = character.gender.join(","),
            personalities = character.personalities.join(","),
            allowed = allowed.join(","),
        );
    }

    println!(
        "Loaded {} characters, {} factions, {} hull prefixes, {} ship name prefixes",
        catalog.characters().len(),
        factions.len(),
        catalog.hull_prefixes().len(),
        catalog.ship_name_prefixes().len()
    );
    if catalog.characters().is_empty() {
        std::process::exit(1);
    }
}
