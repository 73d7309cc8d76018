use serde::{Deserialize, Serialize};

/// One of the company's sub-brands. `General` covers shared content.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    sqlx::Type,
)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BusinessLine {
    #[default]
    General,
    BikeLpg,
    FillingStation,
    FurnitureHouse,
}

impl BusinessLine {
    pub const ALL: [BusinessLine; 4] = [
        Self::General,
        Self::BikeLpg,
        Self::FillingStation,
        Self::FurnitureHouse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::BikeLpg => "bike_lpg",
            Self::FillingStation => "filling_station",
            Self::FurnitureHouse => "furniture_house",
        }
    }

    /// URL segment of the line's public page.
    pub fn url_slug(&self) -> &'static str {
        match self {
            Self::General => "",
            Self::BikeLpg => "bike-lpg",
            Self::FillingStation => "filling-station",
            Self::FurnitureHouse => "furniture-house",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::BikeLpg => "Bike LPG",
            Self::FillingStation => "Filling Station",
            Self::FurnitureHouse => "Furniture House",
        }
    }

    pub fn from_url_slug(slug: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|line| *line != Self::General && line.url_slug() == slug)
    }
}

impl std::fmt::Display for BusinessLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq<&str> for BusinessLine {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::str::FromStr for BusinessLine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "general" => Ok(Self::General),
            "bike_lpg" => Ok(Self::BikeLpg),
            "filling_station" => Ok(Self::FillingStation),
            "furniture_house" => Ok(Self::FurnitureHouse),
            _ => Err(format!("invalid business line: {}", s)),
        }
    }
}
