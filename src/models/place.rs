use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{Category, PriceTier, Region};

/// Citation attached to AI-sourced places
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    pub title: String,
    pub uri: String,
}

/// Resolved image locator: a remote URL or an inline `data:` URI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn url(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Builds a `data:` URI from base64 image bytes
    pub fn inline(mime_type: &str, base64_data: &str) -> Self {
        Self(format!("data:{};base64,{}", mime_type, base64_data))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A recommendable point of interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_name: Option<String>,
    pub category: Category,
    pub region: Region,
    pub sub_area: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub description: String,
    pub price_tier: PriceTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<ImageRef>,
    #[serde(default)]
    pub source_links: Vec<SourceLink>,
}

impl Place {
    /// Ordering for "best rated first": rated places before unrated ones,
    /// NaN sorts last among the rated.
    pub fn by_rating_desc(a: &Place, b: &Place) -> Ordering {
        match (a.rating, b.rating) {
            (Some(x), Some(y)) => match (x.is_nan(), y.is_nan()) {
                (false, false) => y.total_cmp(&x),
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str, rating: Option<f64>) -> Place {
        Place {
            id: id.to_string(),
            name: id.to_string(),
            local_name: None,
            category: Category::Travel,
            region: Region::Chennai,
            sub_area: "Mylapore".to_string(),
            location: None,
            description: "A place".to_string(),
            price_tier: PriceTier::Free,
            cost: None,
            best_time: None,
            rating,
            image_ref: None,
            source_links: vec![],
        }
    }

    #[test]
    fn test_image_ref_inline() {
        let image = ImageRef::inline("image/png", "iVBORw0KGgo=");
        assert_eq!(image.as_str(), "data:image/png;base64,iVBORw0KGgo=");
        assert_eq!(
            ImageRef::url("https://example.com/a.jpg").as_str(),
            "https://example.com/a.jpg"
        );
    }

    #[test]
    fn test_rating_sort_tolerates_out_of_range_and_nan() {
        let mut places = vec![
            place("none", None),
            place("nan", Some(f64::NAN)),
            place("low", Some(-2.0)),
            place("huge", Some(11.0)),
            place("mid", Some(4.5)),
        ];
        places.sort_by(Place::by_rating_desc);

        let order: Vec<&str> = places.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["huge", "mid", "low", "nan", "none"]);
    }

    #[test]
    fn test_place_json_shape() {
        let mut p = place("marina-beach", Some(4.6));
        p.local_name = Some("மெரினா கடற்கரை".to_string());
        let json = serde_json::to_value(&p).unwrap();

        assert_eq!(json["subArea"], "Mylapore");
        assert_eq!(json["priceTier"], "Free");
        assert_eq!(json["localName"], "மெரினா கடற்கரை");
        assert_eq!(json["region"], "Chennai");
        assert!(json.get("imageRef").is_none());
    }
}
