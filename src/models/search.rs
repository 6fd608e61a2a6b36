use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Language, Place, Region};
use crate::error::GatewayError;

/// Best-effort user coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Input of one search
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub text: String,
    /// `None` means every category
    #[serde(default, with = "category_filter")]
    pub category: Option<Category>,
    #[serde(default)]
    pub region: Region,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub language: Language,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    pub fn with_location(mut self, location: GeoPoint) -> Self {
        self.location = Some(location);
        self
    }

    /// Drops unusable coordinates; location is advisory, never an error
    pub fn normalized(mut self) -> Self {
        if self.location.is_some_and(|loc| !loc.is_valid()) {
            tracing::debug!("Ignoring out-of-range coordinates");
            self.location = None;
        }
        self
    }

    /// The text actually sent to the AI guide
    pub fn effective_text<'a>(&'a self, trending_phrase: &'a str) -> &'a str {
        let text = self.text.trim();
        if text.is_empty() {
            trending_phrase
        } else {
            text
        }
    }

    pub fn matches(&self, place: &Place) -> bool {
        self.category.map_or(true, |c| c == place.category)
            && (self.region.is_all() || self.region == place.region)
    }
}

/// Serializes `Option<Category>` with `"All"` standing for `None`
mod category_filter {
    use super::Category;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Category>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(category) => s.serialize_str(category.as_str()),
            None => s.serialize_str("All"),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Category>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
            Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }
}

/// Advisory banner attached to a failed search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    OfflineMode,
    CuratedFallback,
}

impl Notice {
    pub fn for_error(error: &GatewayError) -> Self {
        match error {
            GatewayError::Unauthorized(_) => Notice::OfflineMode,
            GatewayError::Transient(_) | GatewayError::MalformedResponse(_) => {
                Notice::CuratedFallback
            }
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::OfflineMode => {
                "Note: Explore is running in 'Offline Mode'. Connect your Gemini API Key in settings to unlock real-time AI insights!"
            }
            Notice::CuratedFallback => "Couldn't load fresh insights. Showing curated favorites.",
        }
    }
}

/// Published view of the current search
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub generation: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<SearchQuery>,
    pub results: Vec<Place>,
    pub loading: bool,
    pub error: Option<String>,
    pub updated_at: DateTime<Utc>,
}
