pub mod city;
pub mod airline;
pub mod fare;
pub mod route;

pub use city::City;
pub use airline::Airline;
pub use fare::{FareClass, FareRules, PriceBand};
pub use route::{DurationRange, RouteTable};

/// Lookup failures for the fixed catalog enumerations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    #[error("Unknown airline: {0}")]
    UnknownAirline(String),

    #[error("Unknown fare class: {0}")]
    UnknownFareClass(String),
}
