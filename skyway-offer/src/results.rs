use serde::{Deserialize, Serialize};
use skyway_catalog::{Airline, FareClass};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::models::Flight;
use crate::OfferError;

/// Single ordering key for a result list. All orderings are ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Price,
    Duration,
    #[default]
    Departure,
    Arrival,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Price, SortKey::Duration, SortKey::Departure, SortKey::Arrival];

    pub fn slug(&self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Duration => "duration",
            SortKey::Departure => "departure",
            SortKey::Arrival => "arrival",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Price => "Price (lowest first)",
            SortKey::Duration => "Duration (shortest first)",
            SortKey::Departure => "Departure (earliest first)",
            SortKey::Arrival => "Arrival (earliest first)",
        }
    }

    fn key(&self, flight: &Flight) -> u32 {
        match self {
            SortKey::Price => flight.price,
            SortKey::Duration => flight.duration_minutes,
            SortKey::Departure => flight.departure_minutes(),
            SortKey::Arrival => flight.arrival_minutes(),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for SortKey {
    type Err = OfferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .iter()
            .copied()
            .find(|k| s.trim().eq_ignore_ascii_case(k.slug()))
            .ok_or_else(|| OfferError::UnknownSortKey(s.trim().to_string()))
    }
}

/// Airline and fare-class checkboxes. An empty set places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultFilter {
    #[serde(default)]
    pub airlines: BTreeSet<Airline>,
    #[serde(default)]
    pub fare_classes: BTreeSet<FareClass>,
}

impl ResultFilter {
    pub fn is_empty(&self) -> bool {
        self.airlines.is_empty() && self.fare_classes.is_empty()
    }

    pub fn matches(&self, flight: &Flight) -> bool {
        (self.airlines.is_empty() || self.airlines.contains(&flight.airline))
            && (self.fare_classes.is_empty() || self.fare_classes.contains(&flight.fare_class))
    }

    pub fn apply(&self, flights: &[Flight]) -> Vec<Flight> {
        flights.iter().filter(|f| self.matches(f)).copied().collect()
    }
}

/// Stable ascending sort on one key
pub fn sort_flights(flights: &mut [Flight], key: SortKey) {
    flights.sort_by_key(|f| key.key(f));
}

/// Filter then sort, leaving the input untouched
pub fn refine(flights: &[Flight], filter: &ResultFilter, key: SortKey) -> Vec<Flight> {
    let mut refined = filter.apply(flights);
    sort_flights(&mut refined, key);
    refined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::FlightGenerator;
    use crate::models::fixtures::flight;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use skyway_catalog::City;
    use skyway_core::{LegKind, SearchLeg};

    fn generated(seed: u64) -> Vec<Flight> {
        let leg = SearchLeg {
            kind: LegKind::Outbound,
            origin: City::Mumbai,
            destination: City::Bangalore,
            date: NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
        };
        FlightGenerator::default().generate(&leg, None, 40, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_airline_filter_keeps_only_subset() {
        let flights = generated(1);
        let filter = ResultFilter {
            airlines: [Airline::IndiGo, Airline::Vistara].into_iter().collect(),
            ..Default::default()
        };

        let filtered = filter.apply(&flights);
        assert!(!filtered.is_empty());
        assert!(filtered.iter().all(|f| filter.airlines.contains(&f.airline)));
        assert_eq!(
            filtered.len(),
            flights.iter().filter(|f| matches!(f.airline, Airline::IndiGo | Airline::Vistara)).count()
        );
    }

    #[test]
    fn test_filter_is_idempotent() {
        let flights = generated(2);
        let filter = ResultFilter {
            airlines: [Airline::SpiceJet, Airline::AirIndia].into_iter().collect(),
            fare_classes: [FareClass::Economy, FareClass::Business].into_iter().collect(),
        };

        let once = filter.apply(&flights);
        let twice = filter.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let flights = generated(3);
        let filter = ResultFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&flights), flights);
    }

    #[test]
    fn test_sort_by_price_non_decreasing() {
        let mut flights = generated(4);
        sort_flights(&mut flights, SortKey::Price);
        assert!(flights.windows(2).all(|w| w[0].price <= w[1].price));
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut flights = vec![
            flight(0, Airline::IndiGo, (9, 0), 120, 5_000),
            flight(1, Airline::AirIndia, (7, 0), 120, 4_000),
            flight(2, Airline::SpiceJet, (6, 0), 120, 5_000),
            flight(3, Airline::Vistara, (8, 0), 120, 4_000),
        ];

        sort_flights(&mut flights, SortKey::Price);
        let order: Vec<usize> = flights.iter().map(|f| f.index).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);

        // Equal durations keep the previous order
        sort_flights(&mut flights, SortKey::Duration);
        let order: Vec<usize> = flights.iter().map(|f| f.index).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_arrival_sort_accounts_for_next_day() {
        let mut flights = vec![
            flight(0, Airline::IndiGo, (22, 30), 150, 5_000), // 01:00 next day
            flight(1, Airline::AirIndia, (20, 0), 120, 4_000), // 22:00
            flight(2, Airline::SpiceJet, (6, 0), 60, 4_500),   // 07:00
        ];
        sort_flights(&mut flights, SortKey::Arrival);
        let order: Vec<usize> = flights.iter().map(|f| f.index).collect();
        assert_eq!(order, vec![2, 1, 0]);

        sort_flights(&mut flights, SortKey::Departure);
        let order: Vec<usize> = flights.iter().map(|f| f.index).collect();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn test_refine_leaves_input_untouched() {
        let flights = generated(5);
        let filter = ResultFilter {
            fare_classes: [FareClass::PremiumEconomy].into_iter().collect(),
            ..Default::default()
        };
        let refined = refine(&flights, &filter, SortKey::Price);

        assert!(refined.iter().all(|f| f.fare_class == FareClass::PremiumEconomy));
        assert!(refined.windows(2).all(|w| w[0].price <= w[1].price));
        assert_eq!(flights.iter().map(|f| f.index).collect::<Vec<_>>(), (0..40).collect::<Vec<_>>());
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("price".parse::<SortKey>().unwrap(), SortKey::Price);
        assert_eq!("Arrival".parse::<SortKey>().unwrap(), SortKey::Arrival);
        assert_eq!(
            "rating".parse::<SortKey>(),
            Err(OfferError::UnknownSortKey("rating".to_string()))
        );
    }
}
