use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use skyway_catalog::{City, FareClass};
use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult, MAX_PASSENGERS};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripType {
    #[default]
    OneWay,
    RoundTrip,
}

impl TripType {
    pub fn slug(&self) -> &'static str {
        match self {
            TripType::OneWay => "one_way",
            TripType::RoundTrip => "round_trip",
        }
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripType::OneWay => f.write_str("One Way"),
            TripType::RoundTrip => f.write_str("Round Trip"),
        }
    }
}

impl FromStr for TripType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "one_way" | "oneway" => Ok(TripType::OneWay),
            "round_trip" | "roundtrip" => Ok(TripType::RoundTrip),
            other => Err(CoreError::UnknownTripType(other.to_string())),
        }
    }
}

/// Unvalidated search input as submitted by the form or the JSON API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub trip_type: TripType,
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default = "default_passengers")]
    pub passengers: u32,
    #[serde(default)]
    pub fare_class: Option<String>,
}

fn default_passengers() -> u32 { 1 }

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            trip_type: TripType::OneWay,
            origin: String::new(),
            destination: String::new(),
            departure_date: String::new(),
            return_date: None,
            passengers: default_passengers(),
            fare_class: None,
        }
    }
}

/// Validation checks that can be switched off through configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub allow_same_city: bool,
}

/// Validated search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchCriteria {
    pub trip_type: TripType,
    pub origin: City,
    pub destination: City,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub passengers: u32,
    pub fare_class: Option<FareClass>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegKind {
    Outbound,
    Return,
}

/// One directional leg of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchLeg {
    pub kind: LegKind,
    pub origin: City,
    pub destination: City,
    pub date: NaiveDate,
}

impl SearchRequest {
    pub fn validate(&self, policy: &ValidationPolicy) -> CoreResult<SearchCriteria> {
        let origin: City = self.origin.parse()?;
        let destination: City = self.destination.parse()?;

        if origin == destination && !policy.allow_same_city {
            tracing::debug!(city = %origin, "Rejected search with identical endpoints");
            return Err(CoreError::SameOriginAndDestination);
        }

        let departure_date = parse_date("departure", &self.departure_date)?;

        let return_date = match self.trip_type {
            TripType::OneWay => None,
            TripType::RoundTrip => {
                let raw = non_empty(self.return_date.as_deref())
                    .ok_or(CoreError::MissingReturnDate)?;
                let return_date = parse_date("return", raw)?;
                if return_date < departure_date {
                    return Err(CoreError::ReturnBeforeDeparture {
                        departure_date,
                        return_date,
                    });
                }
                Some(return_date)
            }
        };

        if self.passengers == 0 || self.passengers > MAX_PASSENGERS {
            return Err(CoreError::PassengerCount(self.passengers));
        }

        let fare_class = non_empty(self.fare_class.as_deref())
            .map(str::parse::<FareClass>)
            .transpose()?;

        Ok(SearchCriteria {
            trip_type: self.trip_type,
            origin,
            destination,
            departure_date,
            return_date,
            passengers: self.passengers,
            fare_class,
        })
    }
}

impl SearchCriteria {
    pub fn is_round_trip(&self) -> bool {
        self.trip_type == TripType::RoundTrip
    }

    pub fn outbound(&self) -> SearchLeg {
        SearchLeg {
            kind: LegKind::Outbound,
            origin: self.origin,
            destination: self.destination,
            date: self.departure_date,
        }
    }

    /// The reverse leg; present only for round trips
    pub fn inbound(&self) -> Option<SearchLeg> {
        match (self.trip_type, self.return_date) {
            (TripType::RoundTrip, Some(date)) => Some(SearchLeg {
                kind: LegKind::Return,
                origin: self.destination,
                destination: self.origin,
                date,
            }),
            _ => None,
        }
    }

    pub fn legs(&self) -> Vec<SearchLeg> {
        std::iter::once(self.outbound()).chain(self.inbound()).collect()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(field: &'static str, value: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| CoreError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
