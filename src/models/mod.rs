use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

pub mod place;
pub mod search;

pub use place::{ImageRef, Place, SourceLink};
pub use search::{GeoPoint, Notice, SearchQuery, SearchResult};

/// Kind of point of interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Travel,
    Food,
    Events,
    Entertainment,
    Shopping,
    Adventure,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Travel,
        Category::Food,
        Category::Events,
        Category::Entertainment,
        Category::Shopping,
        Category::Adventure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Travel => "Travel",
            Category::Food => "Food",
            Category::Events => "Events",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Adventure => "Adventure",
        }
    }

    /// Human-readable label, also used in prompts
    pub fn label(&self) -> &'static str {
        match self {
            Category::Travel => "Places to Visit",
            Category::Food => "Food & Restaurants",
            Category::Events => "Events & Happenings",
            Category::Entertainment => "Entertainment & Fun",
            Category::Shopping => "Shopping & Markets",
            Category::Adventure => "Activities & Adventures",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| {
                c.as_str().eq_ignore_ascii_case(needle) || c.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| format!("unknown category: {}", needle))
    }
}

impl TryFrom<String> for Category {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

macro_rules! districts {
    ($($variant:ident),+ $(,)?) => {
        /// A Tamil Nadu district, or the statewide wildcard
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum Region {
            All,
            $($variant),+
        }

        impl Region {
            pub const DISTRICTS: &'static [Region] = &[$(Region::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    Region::All => "All",
                    $(Region::$variant => stringify!($variant)),+
                }
            }
        }
    };
}

districts!(
    Ariyalur,
    Chengalpattu,
    Chennai,
    Coimbatore,
    Cuddalore,
    Dharmapuri,
    Dindigul,
    Erode,
    Kallakurichi,
    Kancheepuram,
    Karur,
    Krishnagiri,
    Madurai,
    Mayiladuthurai,
    Nagapattinam,
    Kanyakumari,
    Namakkal,
    Nilgiris,
    Perambalur,
    Pudukkottai,
    Ramanathapuram,
    Ranipet,
    Salem,
    Sivaganga,
    Tenkasi,
    Thanjavur,
    Theni,
    Thoothukudi,
    Tiruchirappalli,
    Tirunelveli,
    Tirupattur,
    Tiruppur,
    Tiruvallur,
    Tiruvannamalai,
    Tiruvarur,
    Vellore,
    Viluppuram,
    Virudhunagar,
);

/// Informal names the front end and the AI guide tend to use
const REGION_ALIASES: &[(&str, Region)] = &[
    ("trichy", Region::Tiruchirappalli),
    ("the nilgiris", Region::Nilgiris),
    ("ooty", Region::Nilgiris),
    ("kanchipuram", Region::Kancheepuram),
    ("tuticorin", Region::Thoothukudi),
    ("villupuram", Region::Viluppuram),
];

impl Region {
    pub fn is_all(&self) -> bool {
        matches!(self, Region::All)
    }
}

impl Default for Region {
    fn default() -> Self {
        Region::All
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let needle = lowered.strip_suffix(" district").unwrap_or(&lowered).trim();

        if needle == "all" {
            return Ok(Region::All);
        }

        if let Some((_, region)) = REGION_ALIASES.iter().find(|(alias, _)| *alias == needle) {
            return Ok(*region);
        }

        Region::DISTRICTS
            .iter()
            .copied()
            .find(|r| r.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown region: {}", s.trim()))
    }
}

impl TryFrom<String> for Region {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.as_str().to_string()
    }
}

/// Price bracket of a place
///
/// Open-ended in practice: unknown strings are kept verbatim as `Other` and
/// serialize back unchanged, leaving the display style to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PriceTier {
    Free,
    Budget,
    MidRange,
    Premium,
    Other(String),
}

impl PriceTier {
    pub fn as_str(&self) -> &str {
        match self {
            PriceTier::Free => "Free",
            PriceTier::Budget => "Budget",
            PriceTier::MidRange => "Mid-range",
            PriceTier::Premium => "Premium",
            PriceTier::Other(raw) => raw,
        }
    }
}

impl From<String> for PriceTier {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "free" => PriceTier::Free,
            "budget" => PriceTier::Budget,
            "mid-range" | "midrange" | "mid range" => PriceTier::MidRange,
            "premium" => PriceTier::Premium,
            _ => PriceTier::Other(value),
        }
    }
}

impl From<&str> for PriceTier {
    fn from(value: &str) -> Self {
        PriceTier::from(value.to_string())
    }
}

impl From<PriceTier> for String {
    fn from(tier: PriceTier) -> Self {
        tier.as_str().to_string()
    }
}

/// Language the AI guide answers in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ta,
    Hi,
}

impl Language {
    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ta => "Tamil",
            Language::Hi => "Hindi",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parses_name_and_label() {
        assert_eq!("food".parse::<Category>(), Ok(Category::Food));
        assert_eq!(
            "Food & Restaurants".parse::<Category>(),
            Ok(Category::Food)
        );
        assert_eq!(
            "activities & adventures".parse::<Category>(),
            Ok(Category::Adventure)
        );
        assert!("Nightlife".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&Category::Shopping).unwrap();
        assert_eq!(json, "\"Shopping\"");

        let parsed: Category = serde_json::from_str("\"Places to Visit\"").unwrap();
        assert_eq!(parsed, Category::Travel);
    }

    #[test]
    fn test_region_parses_aliases() {
        assert_eq!("Trichy".parse::<Region>(), Ok(Region::Tiruchirappalli));
        assert_eq!("The Nilgiris".parse::<Region>(), Ok(Region::Nilgiris));
        assert_eq!("madurai district".parse::<Region>(), Ok(Region::Madurai));
        assert_eq!(" ALL ".parse::<Region>(), Ok(Region::All));
        assert!("Bengaluru".parse::<Region>().is_err());
    }

    #[test]
    fn test_region_table_covers_every_district() {
        assert_eq!(Region::DISTRICTS.len(), 38);
        for region in Region::DISTRICTS {
            assert_eq!(region.as_str().parse::<Region>(), Ok(*region));
        }
    }

    #[test]
    fn test_region_serde_rejects_unknown() {
        let parsed: Region = serde_json::from_str("\"Chennai\"").unwrap();
        assert_eq!(parsed, Region::Chennai);
        assert!(serde_json::from_str::<Region>("\"Atlantis\"").is_err());
    }

    #[test]
    fn test_price_tier_known_values() {
        assert_eq!(PriceTier::from("Mid-range"), PriceTier::MidRange);
        assert_eq!(PriceTier::from("free"), PriceTier::Free);
    }

    #[test]
    fn test_price_tier_unknown_degrades() {
        let tier = PriceTier::from("Luxury");
        assert_eq!(tier, PriceTier::Other("Luxury".to_string()));
        assert_eq!(tier.as_str(), "Luxury");

        let json = serde_json::to_string(&tier).unwrap();
        assert_eq!(json, "\"Luxury\"");
    }

    #[test]
    fn test_language_serde() {
        let lang: Language = serde_json::from_str("\"ta\"").unwrap();
        assert_eq!(lang, Language::Ta);
        assert_eq!(lang.name(), "Tamil");
        assert_eq!(Language::default(), Language::En);
    }
}
