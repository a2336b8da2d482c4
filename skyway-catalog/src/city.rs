use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CatalogError;

/// Cities served by the search form, keyed by IATA airport code on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum City {
    #[serde(rename = "BOM")]
    Mumbai,
    #[serde(rename = "DEL")]
    Delhi,
    #[serde(rename = "BLR")]
    Bangalore,
    #[serde(rename = "MAA")]
    Chennai,
    #[serde(rename = "CCU")]
    Kolkata,
    #[serde(rename = "HYD")]
    Hyderabad,
    #[serde(rename = "PNQ")]
    Pune,
    #[serde(rename = "AMD")]
    Ahmedabad,
}

impl City {
    /// Display order of the city dropdowns
    pub const ALL: [City; 8] = [
        City::Mumbai,
        City::Delhi,
        City::Bangalore,
        City::Chennai,
        City::Kolkata,
        City::Hyderabad,
        City::Pune,
        City::Ahmedabad,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            City::Mumbai => "Mumbai",
            City::Delhi => "Delhi",
            City::Bangalore => "Bangalore",
            City::Chennai => "Chennai",
            City::Kolkata => "Kolkata",
            City::Hyderabad => "Hyderabad",
            City::Pune => "Pune",
            City::Ahmedabad => "Ahmedabad",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            City::Mumbai => "BOM",
            City::Delhi => "DEL",
            City::Bangalore => "BLR",
            City::Chennai => "MAA",
            City::Kolkata => "CCU",
            City::Hyderabad => "HYD",
            City::Pune => "PNQ",
            City::Ahmedabad => "AMD",
        }
    }

    /// Dropdown label, e.g. `Mumbai (BOM)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name(), self.code())
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

impl FromStr for City {
    type Err = CatalogError;

    /// Accepts an airport code, a city name or the full label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        City::ALL
            .iter()
            .copied()
            .find(|city| {
                needle.eq_ignore_ascii_case(city.code())
                    || needle.eq_ignore_ascii_case(city.name())
                    || needle.eq_ignore_ascii_case(&city.label())
            })
            .ok_or_else(|| CatalogError::UnknownCity(needle.to_string()))
    }
}
