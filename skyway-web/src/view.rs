use serde::{Deserialize, Serialize};
use skyway_catalog::{Airline, FareClass};
use skyway_core::{SearchRequest, TripType};
use skyway_offer::{ResultFilter, SortKey};

/// Page of the booking wizard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Search,
    Results,
    Review,
    Payment,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Search,
        WizardStep::Results,
        WizardStep::Review,
        WizardStep::Payment,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            WizardStep::Search => "search",
            WizardStep::Results => "results",
            WizardStep::Review => "review",
            WizardStep::Payment => "payment",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::Search => "Search",
            WizardStep::Results => "Flights",
            WizardStep::Review => "Review",
            WizardStep::Payment => "Payment",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        WizardStep::ALL.iter().copied().find(|s| s.slug() == value)
    }
}

/// Everything a page needs to re-render a session: the raw search, the seed
/// that reproduces its flights, the result controls and the selections.
/// Serialized into the query string and into hidden form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub step: WizardStep,
    pub search: SearchRequest,
    pub seed: Option<u64>,
    pub sort: SortKey,
    pub filter: ResultFilter,
    /// Generation index of the chosen departing flight
    pub outbound: Option<usize>,
    /// Generation index of the chosen return flight
    pub inbound: Option<usize>,
}

impl UiState {
    /// Decode from query pairs. Repeated `airline` and `class` keys build the
    /// filter sets; unreadable control values fall back to their defaults,
    /// while search fields are kept raw for validation to report on.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut state = UiState::default();

        for (key, value) in pairs {
            let value = value.trim();
            match key.as_str() {
                "step" => state.step = WizardStep::parse(value).unwrap_or_default(),
                "trip_type" => match value.parse::<TripType>() {
                    Ok(trip_type) => state.search.trip_type = trip_type,
                    Err(err) => tracing::debug!("Ignoring trip type: {}", err),
                },
                "origin" => state.search.origin = value.to_string(),
                "destination" => state.search.destination = value.to_string(),
                "departure_date" => state.search.departure_date = value.to_string(),
                "return_date" => state.search.return_date = Some(value.to_string()).filter(|v| !v.is_empty()),
                "passengers" => state.search.passengers = value.parse().unwrap_or(0),
                "fare_class" => state.search.fare_class = Some(value.to_string()).filter(|v| !v.is_empty()),
                "seed" => state.seed = value.parse().ok(),
                "sort" => state.sort = value.parse().unwrap_or_default(),
                "airline" => match value.parse::<Airline>() {
                    Ok(airline) => { state.filter.airlines.insert(airline); },
                    Err(err) => tracing::debug!("Ignoring airline filter: {}", err),
                },
                "class" => match value.parse::<FareClass>() {
                    Ok(class) => { state.filter.fare_classes.insert(class); },
                    Err(err) => tracing::debug!("Ignoring class filter: {}", err),
                },
                "outbound" => state.outbound = value.parse().ok(),
                "inbound" => state.inbound = value.parse().ok(),
                _ => {}
            }
        }

        state
    }

    /// Inverse of `from_pairs`
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("step", self.step.slug().to_string()),
            ("trip_type", self.search.trip_type.slug().to_string()),
            ("origin", self.search.origin.clone()),
            ("destination", self.search.destination.clone()),
            ("departure_date", self.search.departure_date.clone()),
            ("passengers", self.search.passengers.to_string()),
            ("sort", self.sort.slug().to_string()),
        ];
        if let Some(date) = &self.search.return_date {
            pairs.push(("return_date", date.clone()));
        }
        if let Some(class) = &self.search.fare_class {
            pairs.push(("fare_class", class.clone()));
        }
        if let Some(seed) = self.seed {
            pairs.push(("seed", seed.to_string()));
        }
        pairs.extend(self.filter.airlines.iter().map(|a| ("airline", a.code().to_string())));
        pairs.extend(self.filter.fare_classes.iter().map(|c| ("class", c.slug().to_string())));
        if let Some(index) = self.outbound {
            pairs.push(("outbound", index.to_string()));
        }
        if let Some(index) = self.inbound {
            pairs.push(("inbound", index.to_string()));
        }
        pairs
    }

    pub fn is_round_trip(&self) -> bool {
        self.search.trip_type == TripType::RoundTrip
    }

    /// All legs the trip type requires have a selection
    pub fn selection_complete(&self) -> bool {
        self.outbound.is_some() && (!self.is_round_trip() || self.inbound.is_some())
    }

    pub fn with_step(&self, step: WizardStep) -> Self {
        Self { step, ..self.clone() }
    }
}
