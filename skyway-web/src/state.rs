use std::sync::Arc;
use skyway_catalog::RouteTable;
use skyway_config::Config;
use skyway_core::{SearchCriteria, ValidationPolicy};
use skyway_offer::{seeded_rng, FlightGenerator, OfferError, SearchResults};

/// Page metadata rendered into every HTML page
#[derive(Clone, Debug)]
pub struct SiteMeta {
    pub title: String,
    pub icon: String,
}

/// Immutable per-process state. Session flags travel in `UiState`, not here.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<FlightGenerator>,
    pub policy: ValidationPolicy,
    pub site: SiteMeta,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, OfferError> {
        let generator = FlightGenerator::new(config.search.generator_config(), RouteTable::default())?;
        Ok(Self {
            generator: Arc::new(generator),
            policy: config.search.validation_policy(),
            site: SiteMeta {
                title: config.site.title.clone(),
                icon: config.site.icon.clone(),
            },
        })
    }

    /// Reproduce the flights of a search from its seed
    pub fn search(&self, criteria: &SearchCriteria, seed: u64) -> SearchResults {
        self.search_with_count(criteria, self.generator.config().flights_per_leg, seed)
    }

    pub fn search_with_count(&self, criteria: &SearchCriteria, count: usize, seed: u64) -> SearchResults {
        self.generator.search(criteria, count, &mut seeded_rng(seed))
    }
}
