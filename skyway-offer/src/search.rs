use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skyway_core::SearchCriteria;

use crate::generator::FlightGenerator;
use crate::models::Flight;
use crate::results::{refine, ResultFilter, SortKey};

/// Outbound flights plus, for round trips only, the return set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub outbound: Vec<Flight>,
    pub inbound: Option<Vec<Flight>>,
}

impl SearchResults {
    pub fn refine(&self, filter: &ResultFilter, key: SortKey) -> SearchResults {
        SearchResults {
            outbound: refine(&self.outbound, filter, key),
            inbound: self.inbound.as_deref().map(|flights| refine(flights, filter, key)),
        }
    }

    pub fn outbound_flight(&self, index: usize) -> Option<&Flight> {
        self.outbound.iter().find(|f| f.index == index)
    }

    pub fn inbound_flight(&self, index: usize) -> Option<&Flight> {
        self.inbound.as_ref()?.iter().find(|f| f.index == index)
    }
}

impl FlightGenerator {
    /// Generate every leg of a validated search. The outbound leg is drawn
    /// first so a given seed always reproduces both sets.
    pub fn search<R: Rng + ?Sized>(&self, criteria: &SearchCriteria, count: usize, rng: &mut R) -> SearchResults {
        let outbound = self.generate(&criteria.outbound(), criteria.fare_class, count, &mut *rng);
        let inbound = criteria
            .inbound()
            .map(|leg| self.generate(&leg, criteria.fare_class, count, &mut *rng));

        tracing::info!(
            origin = criteria.origin.code(),
            destination = criteria.destination.code(),
            trip_type = criteria.trip_type.slug(),
            outbound = outbound.len(),
            inbound = inbound.as_ref().map_or(0, Vec::len),
            "Flight search completed"
        );

        SearchResults { outbound, inbound }
    }
}

/// Deterministic RNG for a search seed
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Seed for a brand-new search
pub fn fresh_seed() -> u64 {
    rand::thread_rng().gen()
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyway_catalog::FareClass;
    use skyway_core::{SearchRequest, TripType, ValidationPolicy};

    fn criteria(trip_type: TripType) -> SearchCriteria {
        SearchRequest {
            trip_type,
            origin: "DEL".to_string(),
            destination: "HYD".to_string(),
            departure_date: "2024-12-25".to_string(),
            return_date: Some("2024-12-30".to_string()),
            passengers: 2,
            fare_class: None,
        }
        .validate(&ValidationPolicy::default())
        .unwrap()
    }

    #[test]
    fn test_one_way_has_no_return_set() {
        let results = FlightGenerator::default().search(&criteria(TripType::OneWay), 6, &mut seeded_rng(1));
        assert_eq!(results.outbound.len(), 6);
        assert!(results.inbound.is_none());
    }

    #[test]
    fn test_round_trip_has_reverse_return_set() {
        let criteria = criteria(TripType::RoundTrip);
        let results = FlightGenerator::default().search(&criteria, 6, &mut seeded_rng(1));

        let inbound = results.inbound.as_ref().expect("round trip must have a return set");
        assert_eq!(inbound.len(), 6);
        assert!(inbound.iter().all(|f| f.origin == criteria.destination && f.destination == criteria.origin));
        assert!(inbound.iter().all(|f| Some(f.date) == criteria.return_date));
        assert!(results.outbound.iter().all(|f| f.date == criteria.departure_date));
    }

    #[test]
    fn test_seed_reproduces_results() {
        let generator = FlightGenerator::default();
        let criteria = criteria(TripType::RoundTrip);
        assert_eq!(
            generator.search(&criteria, 5, &mut seeded_rng(99)),
            generator.search(&criteria, 5, &mut seeded_rng(99))
        );
    }

    #[test]
    fn test_fare_class_constraint_applies_to_both_legs() {
        let mut criteria = criteria(TripType::RoundTrip);
        criteria.fare_class = Some(FareClass::Business);
        let results = FlightGenerator::default().search(&criteria, 10, &mut seeded_rng(8));

        let all = results.outbound.iter().chain(results.inbound.iter().flatten());
        for flight in all {
            assert_eq!(flight.fare_class, FareClass::Business);
            assert!(FareClass::Business.price_band().contains(flight.price));
        }
    }

    #[test]
    fn test_selection_lookup_survives_refine() {
        let results = FlightGenerator::default().search(&criteria(TripType::RoundTrip), 8, &mut seeded_rng(4));
        let refined = results.refine(&ResultFilter::default(), SortKey::Price);

        let original = results.outbound_flight(5).unwrap();
        assert_eq!(refined.outbound_flight(5), Some(original));
        assert!(refined.inbound_flight(7).is_some());
        assert!(refined.inbound_flight(8).is_none());
    }
}
