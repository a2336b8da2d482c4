use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CatalogError;

/// Service tier of a fare
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FareClass {
    Economy,
    PremiumEconomy,
    Business,
}

/// Inclusive per-passenger price range, in whole rupees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBand {
    pub min: u32,
    pub max: u32,
}

impl PriceBand {
    pub fn contains(&self, price: u32) -> bool {
        (self.min..=self.max).contains(&price)
    }
}

/// Fixed rule sheet shown on the booking summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FareRules {
    pub cancellation_fee: u32,
    pub date_change_fee: u32,
    pub baggage: &'static str,
    pub meal: &'static str,
    pub refundable: bool,
}

impl FareClass {
    pub const ALL: [FareClass; 3] = [
        FareClass::Economy,
        FareClass::PremiumEconomy,
        FareClass::Business,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FareClass::Economy => "Economy",
            FareClass::PremiumEconomy => "Premium Economy",
            FareClass::Business => "Business",
        }
    }

    /// Stable identifier used in forms and query strings
    pub fn slug(&self) -> &'static str {
        match self {
            FareClass::Economy => "economy",
            FareClass::PremiumEconomy => "premium_economy",
            FareClass::Business => "business",
        }
    }

    pub fn price_band(&self) -> PriceBand {
        match self {
            FareClass::Economy => PriceBand { min: 3_000, max: 8_000 },
            FareClass::PremiumEconomy => PriceBand { min: 8_000, max: 15_000 },
            FareClass::Business => PriceBand { min: 15_000, max: 35_000 },
        }
    }

    pub fn rules(&self) -> FareRules {
        match self {
            FareClass::Economy => FareRules {
                cancellation_fee: 3_500,
                date_change_fee: 2_500,
                baggage: "15 kg check-in, 7 kg cabin",
                meal: "Paid meals on board",
                refundable: false,
            },
            FareClass::PremiumEconomy => FareRules {
                cancellation_fee: 2_000,
                date_change_fee: 1_500,
                baggage: "25 kg check-in, 7 kg cabin",
                meal: "Complimentary snack",
                refundable: true,
            },
            FareClass::Business => FareRules {
                cancellation_fee: 0,
                date_change_fee: 0,
                baggage: "35 kg check-in, 10 kg cabin",
                meal: "Complimentary gourmet meal",
                refundable: true,
            },
        }
    }
}

impl fmt::Display for FareClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FareClass {
    type Err = CatalogError;

    /// Accepts the slug or the display name, ignoring case and separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "economy" => Ok(FareClass::Economy),
            "premiumeconomy" => Ok(FareClass::PremiumEconomy),
            "business" => Ok(FareClass::Business),
            _ => Err(CatalogError::UnknownFareClass(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_bands_are_ordered_by_tier() {
        let bands: Vec<PriceBand> = FareClass::ALL.iter().map(|c| c.price_band()).collect();
        for pair in bands.windows(2) {
            assert!(pair[0].max <= pair[1].min);
        }
        for band in bands {
            assert!(band.min <= band.max);
        }
    }

    #[test]
    fn test_price_band_is_inclusive() {
        let band = FareClass::Economy.price_band();
        assert!(band.contains(3_000));
        assert!(band.contains(8_000));
        assert!(!band.contains(2_999));
        assert!(!band.contains(8_001));
    }

    #[test]
    fn test_fare_class_parsing() {
        assert_eq!("economy".parse::<FareClass>().unwrap(), FareClass::Economy);
        assert_eq!("Premium Economy".parse::<FareClass>().unwrap(), FareClass::PremiumEconomy);
        assert_eq!("premium_economy".parse::<FareClass>().unwrap(), FareClass::PremiumEconomy);
        assert_eq!("BUSINESS".parse::<FareClass>().unwrap(), FareClass::Business);
        assert!("first".parse::<FareClass>().is_err());
    }

    #[test]
    fn test_only_economy_is_non_refundable() {
        assert!(!FareClass::Economy.rules().refundable);
        assert!(FareClass::PremiumEconomy.rules().refundable);
        assert_eq!(FareClass::Business.rules().cancellation_fee, 0);
    }
}
