use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CatalogError;

/// Carriers the generator draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Airline {
    #[serde(rename = "6E")]
    IndiGo,
    #[serde(rename = "AI")]
    AirIndia,
    #[serde(rename = "SG")]
    SpiceJet,
    #[serde(rename = "UK")]
    Vistara,
    #[serde(rename = "QP")]
    AkasaAir,
    #[serde(rename = "I5")]
    AirAsiaIndia,
}

impl Airline {
    pub const ALL: [Airline; 6] = [
        Airline::IndiGo,
        Airline::AirIndia,
        Airline::SpiceJet,
        Airline::Vistara,
        Airline::AkasaAir,
        Airline::AirAsiaIndia,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Airline::IndiGo => "IndiGo",
            Airline::AirIndia => "Air India",
            Airline::SpiceJet => "SpiceJet",
            Airline::Vistara => "Vistara",
            Airline::AkasaAir => "Akasa Air",
            Airline::AirAsiaIndia => "AirAsia India",
        }
    }

    /// Two-character designator used as the flight number prefix
    pub fn code(&self) -> &'static str {
        match self {
            Airline::IndiGo => "6E",
            Airline::AirIndia => "AI",
            Airline::SpiceJet => "SG",
            Airline::Vistara => "UK",
            Airline::AkasaAir => "QP",
            Airline::AirAsiaIndia => "I5",
        }
    }

    /// Brand color as a CSS hex string
    pub fn color(&self) -> &'static str {
        match self {
            Airline::IndiGo => "#001b94",
            Airline::AirIndia => "#da251d",
            Airline::SpiceJet => "#e41b23",
            Airline::Vistara => "#5f259f",
            Airline::AkasaAir => "#ff6d38",
            Airline::AirAsiaIndia => "#ff0000",
        }
    }

    /// Remote logo image. Renderers must fall back to the code badge when
    /// this is absent or fails to load.
    pub fn logo_url(&self) -> Option<&'static str> {
        match self {
            Airline::IndiGo => Some("https://images.kiwi.com/airlines/64/6E.png"),
            Airline::AirIndia => Some("https://images.kiwi.com/airlines/64/AI.png"),
            Airline::SpiceJet => Some("https://images.kiwi.com/airlines/64/SG.png"),
            Airline::Vistara => Some("https://images.kiwi.com/airlines/64/UK.png"),
            Airline::AkasaAir => Some("https://images.kiwi.com/airlines/64/QP.png"),
            Airline::AirAsiaIndia => None,
        }
    }
}

impl fmt::Display for Airline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Airline {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Airline::ALL
            .iter()
            .copied()
            .find(|a| needle.eq_ignore_ascii_case(a.code()) || needle.eq_ignore_ascii_case(a.name()))
            .ok_or_else(|| CatalogError::UnknownAirline(needle.to_string()))
    }
}
