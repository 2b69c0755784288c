use std::fmt;

use serde::{Deserialize, Serialize};

/// Leagues the fetcher keeps. Serialized with the short keys used in the
/// snapshot and the league reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum League {
    #[serde(rename = "EPL")]
    Epl,
    #[serde(rename = "LaLiga")]
    LaLiga,
    #[serde(rename = "Serie A")]
    SerieA,
    #[serde(rename = "Bundesliga")]
    Bundesliga,
    #[serde(rename = "Ligue 1")]
    Ligue1,
}

impl League {
    pub const ALL: [League; 5] = [
        League::Epl,
        League::LaLiga,
        League::SerieA,
        League::Bundesliga,
        League::Ligue1,
    ];

    /// Maps the provider's league name. Exact match only; anything else is
    /// an unsupported league.
    pub fn from_api_name(name: &str) -> Option<Self> {
        match name.trim() {
            "Premier League" => Some(Self::Epl),
            "La Liga" => Some(Self::LaLiga),
            "Serie A" => Some(Self::SerieA),
            "Bundesliga" => Some(Self::Bundesliga),
            "Ligue 1" => Some(Self::Ligue1),
            _ => None,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.into_iter().find(|l| l.key() == key)
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Epl => "EPL",
            Self::LaLiga => "LaLiga",
            Self::SerieA => "Serie A",
            Self::Bundesliga => "Bundesliga",
            Self::Ligue1 => "Ligue 1",
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_provider_names() {
        assert_eq!(League::from_api_name("Premier League"), Some(League::Epl));
        assert_eq!(League::from_api_name("La Liga"), Some(League::LaLiga));
        assert_eq!(League::from_api_name("Serie A"), Some(League::SerieA));
        assert_eq!(League::from_api_name("Bundesliga"), Some(League::Bundesliga));
        assert_eq!(League::from_api_name("Ligue 1"), Some(League::Ligue1));
    }

    #[test]
    fn unknown_names_are_unsupported() {
        assert_eq!(League::from_api_name("Eredivisie"), None);
        assert_eq!(League::from_api_name("premier league"), None);
        assert_eq!(League::from_api_name("Championship"), None);
    }

    #[test]
    fn keys_round_trip() {
        for league in League::ALL {
            assert_eq!(League::from_key(league.key()), Some(league));
        }
        assert_eq!(League::from_key("MLS"), None);
    }
}
