pub mod search;

use chrono::NaiveDate;
use skyway_catalog::CatalogError;

pub use search::{LegKind, SearchCriteria, SearchLeg, SearchRequest, TripType, ValidationPolicy};

/// Passenger counts offered by the travelers dropdown
pub const MAX_PASSENGERS: u32 = 9;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Origin and destination must be different")]
    SameOriginAndDestination,

    #[error("Please choose a return date for a round trip")]
    MissingReturnDate,

    #[error("Return date {return_date} is before departure date {departure_date}")]
    ReturnBeforeDeparture {
        departure_date: NaiveDate,
        return_date: NaiveDate,
    },

    #[error("Invalid {field} date: {value}")]
    InvalidDate { field: &'static str, value: String },

    #[error("Passengers must be between 1 and {max}, got {0}", max = MAX_PASSENGERS)]
    PassengerCount(u32),

    #[error("Unknown trip type: {0}")]
    UnknownTripType(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub type CoreResult<T> = Result<T, CoreError>;
