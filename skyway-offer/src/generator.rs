use chrono::{Duration, NaiveTime};
use rand::seq::SliceRandom;
use rand::Rng;
use skyway_catalog::{Airline, FareClass, RouteTable};
use skyway_core::SearchLeg;

use crate::models::Flight;
use crate::OfferError;

const SECONDS_PER_DAY: i64 = 86_400;

/// Tunables for synthetic flight generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Flights generated for each leg of a search
    pub flights_per_leg: usize,
    /// Earliest departure hour, inclusive
    pub window_start_hour: u32,
    /// Latest departure hour, exclusive
    pub window_end_hour: u32,
    /// Departures fall on multiples of this many minutes
    pub slot_minutes: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            flights_per_leg: 8,
            window_start_hour: 5,
            window_end_hour: 23,
            slot_minutes: 5,
        }
    }
}

/// Synthesizes flights for a leg from the catalog tables and a caller-supplied RNG
pub struct FlightGenerator {
    config: GeneratorConfig,
    routes: RouteTable,
    departure_slots: Vec<NaiveTime>,
}

impl FlightGenerator {
    pub fn new(config: GeneratorConfig, routes: RouteTable) -> Result<Self, OfferError> {
        if config.slot_minutes == 0 || config.slot_minutes > 60 {
            return Err(OfferError::InvalidSlot(config.slot_minutes));
        }
        if config.window_start_hour >= config.window_end_hour || config.window_end_hour > 24 {
            return Err(OfferError::InvalidDepartureWindow {
                start_hour: config.window_start_hour,
                end_hour: config.window_end_hour,
            });
        }

        Ok(Self::build(config, routes))
    }

    fn build(config: GeneratorConfig, routes: RouteTable) -> Self {
        let departure_slots = departure_slots(&config);
        Self { config, routes, departure_slots }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Generate `count` flights for one leg. A fare-class constraint pins the
    /// class and its price band; otherwise each flight draws a class.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        leg: &SearchLeg,
        fare_class: Option<FareClass>,
        count: usize,
        rng: &mut R,
    ) -> Vec<Flight> {
        let flights: Vec<Flight> = (0..count)
            .filter_map(|index| self.generate_one(index, leg, fare_class, &mut *rng))
            .collect();

        tracing::debug!(
            origin = leg.origin.code(),
            destination = leg.destination.code(),
            date = %leg.date,
            count = flights.len(),
            "Generated synthetic flights"
        );

        flights
    }

    fn generate_one<R: Rng + ?Sized>(
        &self,
        index: usize,
        leg: &SearchLeg,
        fare_class: Option<FareClass>,
        rng: &mut R,
    ) -> Option<Flight> {
        // 1. Carrier and flight number
        let airline = *Airline::ALL.choose(&mut *rng)?;
        let number = rng.gen_range(1000..=9999);

        // 2. Departure slot, never empty once the config is validated
        let departure = *self.departure_slots.choose(&mut *rng)?;

        // 3. Block time from the route table, arrival wraps past midnight
        let range = self.routes.duration_range(leg.origin, leg.destination);
        let duration_minutes = rng.gen_range(range.min_minutes..=range.max_minutes);
        let (arrival, wrapped_seconds) =
            departure.overflowing_add_signed(Duration::minutes(i64::from(duration_minutes)));
        let arrival_day_offset = (wrapped_seconds / SECONDS_PER_DAY) as u8;

        // 4. Fare class and price
        let fare_class = match fare_class {
            Some(class) => class,
            None => *FareClass::ALL.choose(&mut *rng)?,
        };
        let band = fare_class.price_band();
        let price = rng.gen_range(band.min..=band.max);

        Some(Flight {
            index,
            airline,
            number,
            origin: leg.origin,
            destination: leg.destination,
            date: leg.date,
            departure,
            arrival,
            arrival_day_offset,
            duration_minutes,
            fare_class,
            price,
        })
    }
}

impl Default for FlightGenerator {
    fn default() -> Self {
        Self::build(GeneratorConfig::default(), RouteTable::default())
    }
}

fn departure_slots(config: &GeneratorConfig) -> Vec<NaiveTime> {
    (config.window_start_hour * 60..config.window_end_hour * 60)
        .step_by(config.slot_minutes as usize)
        .filter_map(|minute| NaiveTime::from_hms_opt(minute / 60, minute % 60, 0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use skyway_catalog::City;
    use skyway_core::LegKind;

    fn leg(origin: City, destination: City) -> SearchLeg {
        SearchLeg {
            kind: LegKind::Outbound,
            origin,
            destination,
            date: NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
        }
    }

    #[test]
    fn test_arrival_matches_departure_plus_duration() {
        let generator = FlightGenerator::default();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            for flight in generator.generate(&leg(City::Mumbai, City::Kolkata), None, 20, &mut rng) {
                let start = flight.departure_minutes();
                let end = start + flight.duration_minutes;
                let arrival = flight.arrival.hour() * 60 + flight.arrival.minute();
                assert_eq!(arrival, end % (24 * 60));
                assert_eq!(flight.arrival_day_offset as u32, end / (24 * 60));
                assert_eq!(flight.arrival_minutes(), end);
            }
        }
    }

    #[test]
    fn test_constrained_price_stays_in_band() {
        let generator = FlightGenerator::default();
        let mut rng = StdRng::seed_from_u64(7);
        for class in FareClass::ALL {
            let band = class.price_band();
            for flight in generator.generate(&leg(City::Delhi, City::Chennai), Some(class), 200, &mut rng) {
                assert_eq!(flight.fare_class, class);
                assert!(band.contains(flight.price), "{} outside {:?}", flight.price, band);
            }
        }
    }

    #[test]
    fn test_unconstrained_price_matches_drawn_class() {
        let generator = FlightGenerator::default();
        let mut rng = StdRng::seed_from_u64(11);
        for flight in generator.generate(&leg(City::Pune, City::Hyderabad), None, 200, &mut rng) {
            assert!(flight.fare_class.price_band().contains(flight.price));
        }
    }

    #[test]
    fn test_duration_uses_route_table_or_fallback() {
        let generator = FlightGenerator::default();
        let mut rng = StdRng::seed_from_u64(3);

        let known = generator.routes().get(City::Bangalore, City::Chennai).unwrap();
        for flight in generator.generate(&leg(City::Chennai, City::Bangalore), None, 100, &mut rng) {
            assert!(known.contains(flight.duration_minutes));
        }

        let fallback = generator.routes().fallback();
        for flight in generator.generate(&leg(City::Pune, City::Ahmedabad), None, 100, &mut rng) {
            assert!(fallback.contains(flight.duration_minutes));
        }
    }

    #[test]
    fn test_departures_fall_in_window_on_slots() {
        let generator = FlightGenerator::default();
        let mut rng = StdRng::seed_from_u64(5);
        for flight in generator.generate(&leg(City::Mumbai, City::Delhi), None, 200, &mut rng) {
            let minute = flight.departure_minutes();
            assert!(minute >= 5 * 60 && minute < 23 * 60);
            assert_eq!(minute % 5, 0);
            assert!((1000..=9999).contains(&flight.number));
        }
    }

    #[test]
    fn test_same_seed_same_flights() {
        let generator = FlightGenerator::default();
        let a = generator.generate(&leg(City::Mumbai, City::Delhi), None, 10, &mut StdRng::seed_from_u64(42));
        let b = generator.generate(&leg(City::Mumbai, City::Delhi), None, 10, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(a.iter().map(|f| f.index).collect::<Vec<_>>(), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_default_matches_validated_construction() {
        let built = FlightGenerator::new(GeneratorConfig::default(), RouteTable::default()).unwrap();
        let default = FlightGenerator::default();
        assert_eq!(built.config(), default.config());
        assert_eq!(built.departure_slots, default.departure_slots);
        assert_eq!(default.departure_slots.len(), (23 - 5) * 12);

        let a = built.generate(&leg(City::Mumbai, City::Pune), None, 8, &mut StdRng::seed_from_u64(1));
        let b = default.generate(&leg(City::Mumbai, City::Pune), None, 8, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_window_rejected() {
        let config = GeneratorConfig {
            window_start_hour: 10,
            window_end_hour: 10,
            ..Default::default()
        };
        assert!(matches!(
            FlightGenerator::new(config, RouteTable::default()),
            Err(OfferError::InvalidDepartureWindow { .. })
        ));

        let config = GeneratorConfig { slot_minutes: 0, ..Default::default() };
        assert_eq!(
            FlightGenerator::new(config, RouteTable::default()).err(),
            Some(OfferError::InvalidSlot(0))
        );
    }
}
