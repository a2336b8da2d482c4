use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::City;

/// Inclusive block-time range in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRange {
    pub min_minutes: u32,
    pub max_minutes: u32,
}

impl DurationRange {
    pub const fn new(min_minutes: u32, max_minutes: u32) -> Self {
        Self { min_minutes, max_minutes }
    }

    pub fn contains(&self, minutes: u32) -> bool {
        (self.min_minutes..=self.max_minutes).contains(&minutes)
    }
}

/// Used for city pairs missing from the table
pub const DEFAULT_DURATION: DurationRange = DurationRange::new(60, 240);

/// Block times between served cities. Lookups ignore direction.
pub struct RouteTable {
    durations: HashMap<(City, City), DurationRange>,
    fallback: DurationRange,
}

impl RouteTable {
    pub fn new(fallback: DurationRange) -> Self {
        Self {
            durations: HashMap::new(),
            fallback,
        }
    }

    pub fn insert(&mut self, a: City, b: City, range: DurationRange) {
        self.durations.insert(Self::key(a, b), range);
    }

    /// Range for the pair if it is tabulated
    pub fn get(&self, a: City, b: City) -> Option<DurationRange> {
        self.durations.get(&Self::key(a, b)).copied()
    }

    /// Range for the pair, falling back to the wide default
    pub fn duration_range(&self, a: City, b: City) -> DurationRange {
        self.get(a, b).unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> DurationRange {
        self.fallback
    }

    fn key(a: City, b: City) -> (City, City) {
        if a <= b { (a, b) } else { (b, a) }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        let mut table = RouteTable::new(DEFAULT_DURATION);
        for (a, b, min, max) in [
            (City::Mumbai, City::Delhi, 120, 140),
            (City::Mumbai, City::Bangalore, 95, 110),
            (City::Mumbai, City::Chennai, 105, 120),
            (City::Mumbai, City::Kolkata, 150, 170),
            (City::Mumbai, City::Hyderabad, 80, 95),
            (City::Mumbai, City::Ahmedabad, 65, 80),
            (City::Delhi, City::Bangalore, 160, 180),
            (City::Delhi, City::Chennai, 165, 180),
            (City::Delhi, City::Kolkata, 125, 140),
            (City::Delhi, City::Hyderabad, 130, 145),
            (City::Delhi, City::Pune, 125, 140),
            (City::Bangalore, City::Chennai, 55, 65),
            (City::Bangalore, City::Hyderabad, 70, 80),
            (City::Bangalore, City::Kolkata, 145, 160),
            (City::Chennai, City::Kolkata, 130, 145),
        ] {
            table.insert(a, b, DurationRange::new(min, max));
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_direction() {
        let table = RouteTable::default();
        assert_eq!(
            table.get(City::Mumbai, City::Delhi),
            table.get(City::Delhi, City::Mumbai)
        );
        assert_eq!(
            table.get(City::Chennai, City::Bangalore),
            Some(DurationRange::new(55, 65))
        );
    }

    #[test]
    fn test_missing_pair_uses_fallback() {
        let table = RouteTable::default();
        assert_eq!(table.get(City::Pune, City::Ahmedabad), None);
        assert_eq!(
            table.duration_range(City::Pune, City::Ahmedabad),
            DEFAULT_DURATION
        );
    }

    #[test]
    fn test_tabulated_ranges_are_well_formed() {
        let table = RouteTable::default();
        for a in City::ALL {
            for b in City::ALL {
                let range = table.duration_range(a, b);
                assert!(range.min_minutes > 0);
                assert!(range.min_minutes <= range.max_minutes);
            }
        }
    }
}
