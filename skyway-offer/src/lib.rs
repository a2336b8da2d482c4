pub mod models;
pub mod generator;
pub mod results;
pub mod search;

pub use models::Flight;
pub use generator::{FlightGenerator, GeneratorConfig};
pub use results::{ResultFilter, SortKey};
pub use search::{fresh_seed, seeded_rng, SearchResults};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OfferError {
    #[error("Departure window {start_hour}:00-{end_hour}:00 is empty or out of range")]
    InvalidDepartureWindow { start_hour: u32, end_hour: u32 },

    #[error("Departure slot length must be between 1 and 60 minutes, got {0}")]
    InvalidSlot(u32),

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),
}
