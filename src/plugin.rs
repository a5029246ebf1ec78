//! Game-load entry point: owns the settings and the once-loaded catalog.

use std::path::Path;
use std::sync::Arc;

use crate::config::{load_config, ChatterConfig};
use crate::data::{ChatterCatalog, ContentSource, FactionRegistry};
use crate::selection::CharacterSelector;

#[derive(Debug, Default)]
pub struct ChatterPlugin {
    config: ChatterConfig,
    catalog: Option<Arc<ChatterCatalog>>,
}

impl ChatterPlugin {
    pub fn new(config: ChatterConfig) -> Self {
        Self {
            config,
            catalog: None,
        }
    }

    /// Plugin with settings read from `config_path` (defaults if unreadable).
    pub fn from_config_file(config_path: impl AsRef<Path>) -> Self {
        Self::new(load_config(config_path))
    }

    /// Load the catalog on first call; later calls return the same catalog without reading
    /// `source` again. The faction registry must already be populated.
    pub fn on_game_load<R: FactionRegistry + ?Sized>(
        &mut self,
        source: &dyn ContentSource,
        registry: &R,
    ) -> Arc<ChatterCatalog> {
        if let Some(catalog) = &self.catalog {
            return Arc::clone(catalog);
        }
        let catalog = Arc::new(ChatterCatalog::load(source, registry));
        tracing::info!(characters = catalog.characters().len(), "chatter characters loaded");
        self.catalog = Some(Arc::clone(&catalog));
        catalog
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn config(&self) -> &ChatterConfig {
        &self.config
    }

    pub fn catalog(&self) -> Option<&Arc<ChatterCatalog>> {
        self.catalog.as_ref()
    }

    /// Selector over the loaded catalog; None before [Self::on_game_load].
    pub fn selector(&self) -> Option<CharacterSelector<'_>> {
        self.catalog
            .as_deref()
            .map(|catalog| CharacterSelector::new(catalog, &self.config))
    }
}
