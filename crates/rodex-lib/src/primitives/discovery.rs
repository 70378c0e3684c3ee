use serde::{Deserialize, Serialize};
use std::fmt;

/// Discovery intents the orchestrator knows how to serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscoveryIntent {
    /// Free-text keyword search
    Search,
    /// Currently trending games
    Trending,
    /// Popular games (same catalog heuristics as trending)
    Popular,
    /// Best rated games
    TopRated,
    /// Personalised home recommendations
    Recommended,
}

impl DiscoveryIntent {
    /// Intent string fed to the strategy resolver
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryIntent::Search => "search",
            DiscoveryIntent::Trending => "trending",
            DiscoveryIntent::Popular => "popular",
            DiscoveryIntent::TopRated => "top rated",
            DiscoveryIntent::Recommended => "recommended",
        }
    }
}

impl fmt::Display for DiscoveryIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryIntent::Search => write!(f, "search"),
            DiscoveryIntent::Trending => write!(f, "trending"),
            DiscoveryIntent::Popular => write!(f, "popular"),
            DiscoveryIntent::TopRated => write!(f, "top-rated"),
            DiscoveryIntent::Recommended => write!(f, "recommended"),
        }
    }
}

/// Upstream game genre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Genre {
    #[default]
    Unknown,
    Adventure,
    Building,
    Comedy,
    Fighting,
    Fps,
    Horror,
    Medieval,
    Military,
    Naval,
    Rpg,
    SciFi,
    Sports,
    TownAndCity,
    WildWest,
}

impl Genre {
    /// Lenient parse of the free-text genre labels upstream returns.
    /// Unrecognised labels (including "All") map to `Unknown`.
    pub fn from_label(label: &str) -> Self {
        let normalized: String = label
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "adventure" => Genre::Adventure,
            "building" => Genre::Building,
            "comedy" | "funny" => Genre::Comedy,
            "fighting" => Genre::Fighting,
            "fps" | "firstpersonshooter" => Genre::Fps,
            "horror" | "scary" => Genre::Horror,
            "medieval" => Genre::Medieval,
            "military" => Genre::Military,
            "naval" => Genre::Naval,
            "rpg" => Genre::Rpg,
            "scifi" => Genre::SciFi,
            "sports" => Genre::Sports,
            "townandcity" => Genre::TownAndCity,
            "wildwest" | "western" => Genre::WildWest,
            _ => Genre::Unknown,
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Genre::Unknown => "unknown",
            Genre::Adventure => "adventure",
            Genre::Building => "building",
            Genre::Comedy => "comedy",
            Genre::Fighting => "fighting",
            Genre::Fps => "fps",
            Genre::Horror => "horror",
            Genre::Medieval => "medieval",
            Genre::Military => "military",
            Genre::Naval => "naval",
            Genre::Rpg => "rpg",
            Genre::SciFi => "sci-fi",
            Genre::Sports => "sports",
            Genre::TownAndCity => "town-and-city",
            Genre::WildWest => "wild-west",
        };
        write!(f, "{}", label)
    }
}
