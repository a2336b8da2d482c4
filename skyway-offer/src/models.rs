use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use serde::Serialize;
use skyway_catalog::{Airline, City, FareClass};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// A synthetic flight shown on a result card. Generated per search, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Flight {
    /// Position in generation order; selections refer to this
    pub index: usize,
    pub airline: Airline,
    pub number: u16,
    pub origin: City,
    pub destination: City,
    pub date: NaiveDate,
    pub departure: NaiveTime,
    pub arrival: NaiveTime,
    /// 1 when the arrival falls after midnight
    pub arrival_day_offset: u8,
    pub duration_minutes: u32,
    pub fare_class: FareClass,
    /// Per passenger, whole rupees
    pub price: u32,
}

impl Flight {
    /// e.g. `6E-1234`
    pub fn flight_number(&self) -> String {
        format!("{}-{}", self.airline.code(), self.number)
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }

    /// e.g. `2h 05m`
    pub fn duration_label(&self) -> String {
        format!("{}h {:02}m", self.duration_minutes / 60, self.duration_minutes % 60)
    }

    pub fn arrives_next_day(&self) -> bool {
        self.arrival_day_offset > 0
    }

    pub fn departure_minutes(&self) -> u32 {
        minutes_of_day(self.departure)
    }

    /// Minutes from midnight of the departure date, counting any day wrap
    pub fn arrival_minutes(&self) -> u32 {
        u32::from(self.arrival_day_offset) * MINUTES_PER_DAY + minutes_of_day(self.arrival)
    }

    pub fn total_price(&self, passengers: u32) -> u64 {
        u64::from(self.price) * u64::from(passengers)
    }
}

fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}


#[cfg(test)]
mod tests {
    use super::fixtures::flight;
    use super::*;

    #[test]
    fn test_flight_labels() {
        let f = flight(3, Airline::IndiGo, (9, 0), 150, 4_999);
        assert_eq!(f.flight_number(), "6E-1003");
        assert_eq!(f.duration_label(), "2h 30m");
        assert_eq!(f.arrival, NaiveTime::from_hms_opt(11, 30, 0).unwrap());
        assert!(!f.arrives_next_day());
    }

    #[test]
    fn test_overnight_arrival_minutes() {
        let f = flight(0, Airline::Vistara, (22, 50), 130, 6_000);
        assert!(f.arrives_next_day());
        assert_eq!(f.arrival, NaiveTime::from_hms_opt(1, 0, 0).unwrap());
        assert_eq!(f.arrival_minutes(), 24 * 60 + 60);
        assert_eq!(f.departure_minutes(), 22 * 60 + 50);
    }

    #[test]
    fn test_total_price() {
        let f = flight(0, Airline::SpiceJet, (6, 0), 90, 4_500);
        assert_eq!(f.total_price(3), 13_500);
    }
}
