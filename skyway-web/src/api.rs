use axum::{
    extract::{FromRequest, State},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use skyway_catalog::{Airline, City, CatalogError, FareClass, FareRules, PriceBand};
use skyway_core::{SearchRequest, TripType};
use skyway_offer::{fresh_seed, Flight, ResultFilter, SortKey};

use crate::error::AppError;
use crate::state::AppState;

/// Upper bound on `count` for a single leg
pub const MAX_FLIGHTS_PER_LEG: usize = 50;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/v1/flights/search", post(search_flights))
        .route("/v1/catalog/cities", get(list_cities))
        .route("/v1/catalog/airlines", get(list_airlines))
        .route("/v1/catalog/fare-classes", get(list_fare_classes))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// JSON body whose rejections come back as `AppError` bodies
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Deserialize)]
pub struct SearchFlightsRequest {
    #[serde(flatten)]
    pub search: SearchRequest,
    pub count: Option<usize>,
    /// Replays an earlier search when given
    pub seed: Option<u64>,
    pub sort: Option<String>,
    #[serde(default)]
    pub airlines: Vec<String>,
    #[serde(default)]
    pub fare_classes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchFlightsResponse {
    pub seed: u64,
    pub trip_type: TripType,
    pub passengers: u32,
    pub sort: SortKey,
    pub outbound: Vec<FlightResponse>,
    pub inbound: Option<Vec<FlightResponse>>,
}

#[derive(Debug, Serialize)]
pub struct AirlineResponse {
    pub code: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub logo_url: Option<&'static str>,
}

impl From<Airline> for AirlineResponse {
    fn from(airline: Airline) -> Self {
        Self {
            code: airline.code(),
            name: airline.name(),
            color: airline.color(),
            logo_url: airline.logo_url(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FlightResponse {
    pub index: usize,
    pub flight_number: String,
    pub airline: AirlineResponse,
    pub origin: City,
    pub destination: City,
    pub date: NaiveDate,
    pub departure_time: String,
    pub arrival_time: String,
    pub arrives_next_day: bool,
    pub duration_minutes: u32,
    pub fare_class: FareClass,
    pub price: u32,
    pub total_price: u64,
    pub currency: &'static str,
}

impl FlightResponse {
    fn new(flight: &Flight, passengers: u32) -> Self {
        Self {
            index: flight.index,
            flight_number: flight.flight_number(),
            airline: flight.airline.into(),
            origin: flight.origin,
            destination: flight.destination,
            date: flight.date,
            departure_time: flight.departure.format("%H:%M").to_string(),
            arrival_time: flight.arrival.format("%H:%M").to_string(),
            arrives_next_day: flight.arrives_next_day(),
            duration_minutes: flight.duration_minutes,
            fare_class: flight.fare_class,
            price: flight.price,
            total_price: flight.total_price(passengers),
            currency: "INR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CityResponse {
    pub code: &'static str,
    pub name: &'static str,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct FareClassResponse {
    pub id: FareClass,
    pub name: &'static str,
    pub price_band: PriceBand,
    pub rules: FareRules,
}

// ============================================================================
// Handlers
// ============================================================================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// POST /v1/flights/search
/// Generate synthetic flights for every leg, then filter and sort them
async fn search_flights(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SearchFlightsRequest>,
) -> Result<Json<SearchFlightsResponse>, AppError> {
    // 1. Validate criteria and result controls
    let criteria = req.search.validate(&state.policy)?;
    let sort = req.sort.as_deref().map(str::parse::<SortKey>).transpose()?.unwrap_or_default();
    let filter = ResultFilter {
        airlines: req.airlines.iter().map(|a| a.parse()).collect::<Result<_, CatalogError>>()?,
        fare_classes: req.fare_classes.iter().map(|c| c.parse()).collect::<Result<_, CatalogError>>()?,
    };
    let count = req.count.unwrap_or(state.generator.config().flights_per_leg);
    if count > MAX_FLIGHTS_PER_LEG {
        return Err(AppError::ValidationError(format!(
            "count must be at most {}, got {}",
            MAX_FLIGHTS_PER_LEG, count
        )));
    }

    // 2. Generate
    let seed = req.seed.unwrap_or_else(fresh_seed);
    let results = state.search_with_count(&criteria, count, seed).refine(&filter, sort);

    // 3. Convert to response format
    let to_response = |flights: &[Flight]| -> Vec<FlightResponse> {
        flights.iter().map(|f| FlightResponse::new(f, criteria.passengers)).collect()
    };

    Ok(Json(SearchFlightsResponse {
        seed,
        trip_type: criteria.trip_type,
        passengers: criteria.passengers,
        sort,
        outbound: to_response(results.outbound.as_slice()),
        inbound: results.inbound.as_deref().map(to_response),
    }))
}

/// GET /v1/catalog/cities
async fn list_cities() -> Json<Vec<CityResponse>> {
    Json(
        City::ALL
            .iter()
            .map(|city| CityResponse {
                code: city.code(),
                name: city.name(),
                label: city.label(),
            })
            .collect(),
    )
}

/// GET /v1/catalog/airlines
async fn list_airlines() -> Json<Vec<AirlineResponse>> {
    Json(Airline::ALL.iter().copied().map(AirlineResponse::from).collect())
}

/// GET /v1/catalog/fare-classes
async fn list_fare_classes() -> Json<Vec<FareClassResponse>> {
    Json(
        FareClass::ALL
            .iter()
            .map(|class| FareClassResponse {
                id: *class,
                name: class.name(),
                price_band: class.price_band(),
                rules: class.rules(),
            })
            .collect(),
    )
}
