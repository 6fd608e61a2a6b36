/// AI Gateway
///
/// Turns a `SearchQuery` into a schema-constrained request for the generative
/// backend and turns the answer back into validated `Place`s. Also hosts the
/// image and tagline helpers, which never fail: they fall back to fixed values.
use serde::Deserialize;
use serde_json::{json, Value};
use std::{future::Future, sync::Arc, time::Duration};

use crate::{
    config::Config,
    error::{GatewayError, GatewayResult},
    models::{Category, ImageRef, Place, PriceTier, Region, SearchQuery, SourceLink},
    services::providers::{GenerativeBackend, ImageRequest, TextRequest, TextResponse},
};

/// Shown when image generation is unavailable
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1582510003544-4d00b7f74220?q=80&w=1200&auto=format&fit=crop";

pub const DEFAULT_TAGLINE: &str = "Explore the heart of Tamil Nadu.";

const MAX_SOURCE_LINKS: usize = 3;
const IMAGE_ASPECT_RATIO: &str = "16:9";
const QUOTE_CHARS: &[char] = &['"', '\'', '`', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

/// Source of AI-generated recommendations for the search engine
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn fetch_recommendations(&self, query: &SearchQuery) -> GatewayResult<Vec<Place>>;
}

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// Upper bound for one backend call
    pub timeout: Duration,
    /// Sent instead of an empty query
    pub trending_phrase: String,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for GatewaySettings {
    fn from(config: &Config) -> Self {
        Self {
            timeout: config.request_timeout(),
            trending_phrase: config.trending_phrase.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AiGateway {
    backend: Arc<dyn GenerativeBackend>,
    settings: GatewaySettings,
}

impl AiGateway {
    pub fn new(backend: Arc<dyn GenerativeBackend>, settings: GatewaySettings) -> Self {
        Self { backend, settings }
    }

    /// Asks the AI guide for places matching the query
    ///
    /// A `Transient` failure is retried once without web grounding. Parse and
    /// credential failures are returned as-is.
    pub async fn fetch_recommendations(&self, query: &SearchQuery) -> GatewayResult<Vec<Place>> {
        let request = self.recommendation_request(query);
        let response = self.generate_with_retry(request).await?;
        let places = parse_places(&response, query)?;

        tracing::info!(
            query = %query.text,
            results = places.len(),
            citations = response.citations.len(),
            provider = self.backend.name(),
            "AI recommendations fetched"
        );

        Ok(places)
    }

    /// Generates a 16:9 picture of the place, or the placeholder on any failure
    pub async fn generate_image(&self, place_name: &str, description: &str) -> ImageRef {
        let request = ImageRequest {
            prompt: format!(
                "A breathtaking, high-quality travel photograph of {} in Tamil Nadu, India. {} \
                 Vivid natural light, authentic local atmosphere, no text or watermarks.",
                place_name,
                description.trim()
            ),
            aspect_ratio: IMAGE_ASPECT_RATIO.to_string(),
        };

        match self.bounded(self.backend.generate_image(request)).await {
            Ok(image) => ImageRef::inline(&image.mime_type, &image.data),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    place = %place_name,
                    "Image generation failed, using placeholder"
                );
                ImageRef::url(PLACEHOLDER_IMAGE_URL)
            }
        }
    }

    /// Generates a one-line promotional tagline, or the default on any failure
    pub async fn generate_tagline(&self, subject: &str) -> String {
        let subject = subject.trim();
        let subject = if subject.is_empty() { "Tamil Nadu" } else { subject };

        let request = TextRequest {
            system_instruction: "You write short, evocative travel taglines for a Tamil Nadu \
                                 tourism guide."
                .to_string(),
            prompt: format!(
                "Write one catchy promotional tagline (under 12 words) for {}. \
                 Reply with the tagline only.",
                subject
            ),
            response_schema: None,
            web_grounding: false,
        };

        match self.bounded(self.backend.generate_text(request)).await {
            Ok(response) => {
                let tagline = strip_quotes(&response.text);
                if tagline.is_empty() {
                    DEFAULT_TAGLINE.to_string()
                } else {
                    tagline.to_string()
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Tagline generation failed, using default");
                DEFAULT_TAGLINE.to_string()
            }
        }
    }

    fn recommendation_request(&self, query: &SearchQuery) -> TextRequest {
        let text = query.effective_text(&self.settings.trending_phrase);
        let category = query
            .category
            .map(|c| c.label().to_string())
            .unwrap_or_else(|| "all categories".to_string());
        let region = if query.region.is_all() {
            "anywhere in Tamil Nadu".to_string()
        } else {
            format!("{} district", query.region)
        };
        let coordinates = query
            .location
            .map(|loc| format!("Lat: {}, Lng: {}", loc.lat, loc.lng))
            .unwrap_or_else(|| "Not provided".to_string());
        let categories: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();

        let system_instruction = format!(
            "You are 'TAMIL NADU EXPLORE Guide', a local expert for Chennai and the entire Tamil Nadu state.\n\
             Your goal is to help users find the best things to do, eat, and see.\n\
             Focus on: {category}.\n\
             Region: {region}.\n\
             User Query: {text}.\n\
             Current User Coordinates: {coordinates}.\n\n\
             CRITICAL: For every place, you MUST identify the specific 'subArea' \
             (e.g. 'T. Nagar', 'Adyar', 'Mylapore' for Chennai; or 'Kodaikanal Lake Area', \
             'East Coast Road' for state-wide spots) and the Tamil Nadu district as 'region'.\n\
             Use one of these values for 'category': {categories}.\n\
             Categorize 'priceTier' as: 'Free', 'Budget', 'Mid-range', or 'Premium'.\n\
             Write descriptions in {language}; keep id, category, region and priceTier in English.\n\
             Return a JSON array of recommendations only.",
            categories = categories.join(", "),
            language = query.language.name(),
        );

        let prompt = format!(
            "Find recommendations for: {} in {} category, {}. \
             Ensure each has a subArea, region and price tier.",
            text, category, region
        );

        TextRequest {
            system_instruction,
            prompt,
            response_schema: Some(recommendation_schema()),
            web_grounding: true,
        }
    }

    async fn generate_with_retry(&self, request: TextRequest) -> GatewayResult<TextResponse> {
        match self.bounded(self.backend.generate_text(request.clone())).await {
            Err(e) if e.is_retryable() => {
                tracing::warn!(
                    error = %e,
                    provider = self.backend.name(),
                    "AI request failed, retrying once without web grounding"
                );
                let reduced = TextRequest {
                    web_grounding: false,
                    ..request
                };
                self.bounded(self.backend.generate_text(reduced)).await
            }
            other => other,
        }
    }

    async fn bounded<T, F>(&self, call: F) -> GatewayResult<T>
    where
        F: Future<Output = GatewayResult<T>>,
    {
        tokio::time::timeout(self.settings.timeout, call)
            .await
            .map_err(|_| {
                GatewayError::Transient(format!(
                    "AI request timed out after {}ms",
                    self.settings.timeout.as_millis()
                ))
            })?
    }
}

#[async_trait::async_trait]
impl RecommendationSource for AiGateway {
    async fn fetch_recommendations(&self, query: &SearchQuery) -> GatewayResult<Vec<Place>> {
        AiGateway::fetch_recommendations(self, query).await
    }
}

/// Output schema declared to the service
fn recommendation_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "name": { "type": "STRING" },
                "localName": { "type": "STRING" },
                "category": { "type": "STRING" },
                "description": { "type": "STRING" },
                "location": { "type": "STRING" },
                "subArea": { "type": "STRING" },
                "region": { "type": "STRING" },
                "priceTier": { "type": "STRING" },
                "cost": { "type": "STRING" },
                "bestTime": { "type": "STRING" },
                "rating": { "type": "NUMBER" }
            },
            "required": ["id", "name", "category", "description", "subArea", "region", "priceTier"]
        }
    })
}

/// One recommendation as emitted by the service
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePlace {
    id: String,
    name: String,
    category: String,
    description: String,
    #[serde(alias = "area")]
    sub_area: String,
    #[serde(alias = "district")]
    region: String,
    #[serde(alias = "priceCategory")]
    price_tier: String,
    #[serde(default, alias = "nameTamil")]
    local_name: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    cost: Option<String>,
    #[serde(default)]
    best_time: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
}

impl WirePlace {
    fn into_place(self, query: &SearchQuery, links: &[SourceLink]) -> Place {
        let category = self.category.parse().unwrap_or_else(|_| {
            tracing::debug!(category = %self.category, "Unknown category from AI guide");
            query.category.unwrap_or(Category::Travel)
        });
        let region: Region = self.region.parse().unwrap_or_else(|_| {
            tracing::debug!(region = %self.region, "Unknown region from AI guide");
            query.region
        });

        Place {
            id: self.id.trim().to_string(),
            name: self.name.trim().to_string(),
            local_name: self.local_name.filter(|s| !s.trim().is_empty()),
            category,
            region,
            sub_area: self.sub_area,
            location: self.location,
            description: self.description,
            price_tier: PriceTier::from(self.price_tier),
            cost: self.cost,
            best_time: self.best_time,
            rating: self.rating,
            image_ref: None,
            source_links: links.to_vec(),
        }
    }
}

/// First JSON array of recommendations in the text
///
/// Every `[` is tried as a starting point and parsing stops at the end of the
/// first complete value, so prose, code fences and citation markers like
/// `[1]` on either side of the array are ignored.
fn extract_wire_places(text: &str) -> GatewayResult<Vec<WirePlace>> {
    let mut first_error = None;

    for (start, _) in text.match_indices('[') {
        let mut values =
            serde_json::Deserializer::from_str(&text[start..]).into_iter::<Vec<WirePlace>>();
        match values.next() {
            Some(Ok(wire)) => return Ok(wire),
            Some(Err(e)) => {
                first_error.get_or_insert(e);
            }
            None => {}
        }
    }

    match first_error {
        Some(e) => {
            tracing::error!(error = %e, "AI response failed schema validation");
            Err(GatewayError::MalformedResponse(format!("Schema violation: {}", e)))
        }
        None => Err(GatewayError::MalformedResponse(
            "AI response contained no JSON array".to_string(),
        )),
    }
}

fn parse_places(response: &TextResponse, query: &SearchQuery) -> GatewayResult<Vec<Place>> {
    let wire = extract_wire_places(&response.text)?;

    if let Some(index) = wire.iter().position(|p| p.name.trim().is_empty()) {
        return Err(GatewayError::MalformedResponse(format!(
            "Recommendation {} has an empty name",
            index
        )));
    }

    let links: Vec<SourceLink> = response
        .citations
        .iter()
        .take(MAX_SOURCE_LINKS)
        .cloned()
        .collect();

    Ok(wire
        .into_iter()
        .map(|p| p.into_place(query, &links))
        .collect())
}

fn strip_quotes(text: &str) -> &str {
    text.trim().trim_matches(QUOTE_CHARS).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::{GeneratedImage, MockGenerativeBackend};
    use tokio_test::{assert_err, assert_ok};

    const TWO_PLACES: &str = r#"[
        {
            "id": "murugan-idli",
            "name": "Murugan Idli Shop",
            "category": "Food",
            "description": "Soft idlis with four chutneys.",
            "subArea": "Town Hall Road",
            "region": "Madurai",
            "priceTier": "Budget",
            "rating": 4.4
        },
        {
            "id": "kumar-mess",
            "name": "Kumar Mess",
            "category": "Food & Restaurants",
            "description": "Mutton chukka and kari dosa.",
            "area": "Anna Nagar",
            "district": "Madurai",
            "priceCategory": "Mid-range",
            "cost": "₹600 for two"
        }
    ]"#;

    fn gateway(backend: MockGenerativeBackend) -> AiGateway {
        AiGateway::new(
            Arc::new(backend),
            GatewaySettings {
                timeout: Duration::from_secs(5),
                trending_phrase: "Trending spots".to_string(),
            },
        )
    }

    fn backend() -> MockGenerativeBackend {
        let mut backend = MockGenerativeBackend::new();
        backend.expect_name().return_const("mock");
        backend
    }

    fn text(body: &str) -> TextResponse {
        TextResponse {
            text: body.to_string(),
            citations: vec![],
        }
    }

    fn link(n: usize) -> SourceLink {
        SourceLink {
            title: format!("Source {}", n),
            uri: format!("https://example.com/{}", n),
        }
    }

    fn food_in_madurai() -> SearchQuery {
        SearchQuery::new("idli")
            .with_category(Category::Food)
            .with_region(Region::Madurai)
    }

    #[tokio::test]
    async fn test_fetch_parses_places() {
        let mut backend = backend();
        backend
            .expect_generate_text()
            .times(1)
            .withf(|r| r.web_grounding && r.response_schema.is_some())
            .returning(|_| Ok(text(TWO_PLACES)));

        let places = assert_ok!(gateway(backend).fetch_recommendations(&food_in_madurai()).await);

        assert_eq!(places.len(), 2);
        assert_eq!(places[0].id, "murugan-idli");
        assert_eq!(places[0].rating, Some(4.4));
        assert_eq!(places[1].category, Category::Food);
        assert_eq!(places[1].sub_area, "Anna Nagar");
        assert_eq!(places[1].region, Region::Madurai);
        assert_eq!(places[1].price_tier, PriceTier::MidRange);
        assert_eq!(places[1].cost.as_deref(), Some("₹600 for two"));
    }

    #[tokio::test]
    async fn test_fetch_tolerates_fences_and_prose() {
        let mut backend = backend();
        backend.expect_generate_text().returning(|_| {
            Ok(text(&format!(
                "  Here you go:\n```json\n{}\n```\nEnjoy!  ",
                TWO_PLACES
            )))
        });

        let places = assert_ok!(gateway(backend).fetch_recommendations(&food_in_madurai()).await);
        assert_eq!(places.len(), 2);
    }

    #[tokio::test]
    async fn test_citations_capped_and_attached_to_every_place() {
        let mut backend = backend();
        backend.expect_generate_text().returning(|_| {
            Ok(TextResponse {
                text: TWO_PLACES.to_string(),
                citations: (1..=5).map(link).collect(),
            })
        });

        let places = assert_ok!(gateway(backend).fetch_recommendations(&food_in_madurai()).await);
        for place in &places {
            assert_eq!(place.source_links, vec![link(1), link(2), link(3)]);
        }
    }

    #[tokio::test]
    async fn test_transient_failure_retried_once_without_grounding() {
        let mut backend = backend();
        let mut seq = mockall::Sequence::new();
        backend
            .expect_generate_text()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|r| r.web_grounding)
            .returning(|_| Err(GatewayError::Transient("503".to_string())));
        backend
            .expect_generate_text()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|r| !r.web_grounding)
            .returning(|_| Ok(text(TWO_PLACES)));

        let places = assert_ok!(gateway(backend).fetch_recommendations(&food_in_madurai()).await);
        assert_eq!(places.len(), 2);
    }

    #[tokio::test]
    async fn test_second_transient_failure_is_surfaced() {
        let mut backend = backend();
        backend
            .expect_generate_text()
            .times(2)
            .returning(|_| Err(GatewayError::Transient("network".to_string())));

        let result = gateway(backend).fetch_recommendations(&food_in_madurai()).await;
        assert!(matches!(result, Err(GatewayError::Transient(_))));
    }

    #[tokio::test]
    async fn test_unauthorized_is_not_retried() {
        let mut backend = backend();
        backend
            .expect_generate_text()
            .times(1)
            .returning(|_| Err(GatewayError::Unauthorized("API_KEY_MISSING".to_string())));

        let result = gateway(backend).fetch_recommendations(&food_in_madurai()).await;
        assert!(matches!(result, Err(GatewayError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed_and_not_retried() {
        let mut backend = backend();
        backend
            .expect_generate_text()
            .times(1)
            .returning(|_| Ok(text("[{\"id\": \"broken\",")));

        let result = gateway(backend).fetch_recommendations(&food_in_madurai()).await;
        assert!(matches!(result, Err(GatewayError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_missing_required_field_is_malformed() {
        let mut backend = backend();
        backend.expect_generate_text().returning(|_| {
            Ok(text(
                r#"[{"id":"x","name":"X","category":"Food","description":"d","region":"Madurai","priceTier":"Free"}]"#,
            ))
        });

        let result = gateway(backend).fetch_recommendations(&food_in_madurai()).await;
        assert!(matches!(result, Err(GatewayError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_wrong_primitive_type_is_malformed() {
        let mut backend = backend();
        backend.expect_generate_text().returning(|_| {
            Ok(text(
                r#"[{"id":"x","name":"X","category":"Food","description":"d","subArea":"s","region":"Madurai","priceTier":"Free","rating":"five"}]"#,
            ))
        });

        let result = gateway(backend).fetch_recommendations(&food_in_madurai()).await;
        assert!(matches!(result, Err(GatewayError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_unknown_category_and_region_fall_back_to_filters() {
        let mut backend = backend();
        backend.expect_generate_text().returning(|_| {
            Ok(text(
                r#"[{"id":"x","name":"X","category":"Street Eats","description":"d","subArea":"s","region":"Atlantis","priceTier":"Cheap"}]"#,
            ))
        });

        let places = assert_ok!(gateway(backend).fetch_recommendations(&food_in_madurai()).await);
        assert_eq!(places[0].category, Category::Food);
        assert_eq!(places[0].region, Region::Madurai);
        assert_eq!(places[0].price_tier, PriceTier::Other("Cheap".to_string()));
    }

    #[tokio::test]
    async fn test_empty_query_uses_trending_phrase() {
        let mut backend = backend();
        backend
            .expect_generate_text()
            .times(1)
            .withf(|r| r.prompt.contains("Trending spots") && r.system_instruction.contains("Trending spots"))
            .returning(|_| Ok(text("[]")));

        let places = assert_ok!(gateway(backend).fetch_recommendations(&SearchQuery::new("  ")).await);
        assert!(places.is_empty());
    }

    #[tokio::test]
    async fn test_prompt_carries_constraints_and_location() {
        let mut backend = backend();
        backend
            .expect_generate_text()
            .times(1)
            .withf(|r| {
                r.prompt.contains("Food & Restaurants")
                    && r.prompt.contains("Madurai district")
                    && r.system_instruction.contains("Lat: 9.92, Lng: 78.12")
                    && r.system_instruction.contains("Tamil")
            })
            .returning(|_| Ok(text("[]")));

        let mut query = food_in_madurai().with_location(crate::models::GeoPoint {
            lat: 9.92,
            lng: 78.12,
        });
        query.language = crate::models::Language::Ta;

        assert_ok!(gateway(backend).fetch_recommendations(&query).await);
    }

    #[tokio::test]
    async fn test_slow_backend_times_out_as_transient() {
        struct SlowBackend;

        #[async_trait::async_trait]
        impl GenerativeBackend for SlowBackend {
            async fn generate_text(&self, _request: TextRequest) -> GatewayResult<TextResponse> {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(TextResponse::default())
            }

            async fn generate_image(&self, _request: ImageRequest) -> GatewayResult<GeneratedImage> {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Err(GatewayError::Transient("unreachable".to_string()))
            }

            fn name(&self) -> &'static str {
                "slow"
            }
        }

        let gateway = AiGateway::new(
            Arc::new(SlowBackend),
            GatewaySettings {
                timeout: Duration::from_millis(20),
                trending_phrase: "Trending spots".to_string(),
            },
        );

        let err = assert_err!(gateway.fetch_recommendations(&SearchQuery::new("x")).await);
        assert!(matches!(err, GatewayError::Transient(_)));

        assert_eq!(gateway.generate_tagline("Madurai").await, DEFAULT_TAGLINE);
        assert_eq!(
            gateway.generate_image("Temple", "Old").await,
            ImageRef::url(PLACEHOLDER_IMAGE_URL)
        );
    }

    #[tokio::test]
    async fn test_generate_image_returns_inline_data() {
        let mut backend = backend();
        backend
            .expect_generate_image()
            .times(1)
            .withf(|r| r.aspect_ratio == "16:9" && r.prompt.contains("Marina Beach"))
            .returning(|_| {
                Ok(GeneratedImage {
                    mime_type: "image/png".to_string(),
                    data: "AAAA".to_string(),
                })
            });

        let image = gateway(backend)
            .generate_image("Marina Beach", "Long urban beach")
            .await;
        assert_eq!(image.as_str(), "data:image/png;base64,AAAA");
    }

    #[tokio::test]
    async fn test_generate_image_falls_back_to_placeholder() {
        let mut backend = backend();
        backend
            .expect_generate_image()
            .returning(|_| Err(GatewayError::Unauthorized("API_KEY_MISSING".to_string())));

        let image = gateway(backend).generate_image("Marina Beach", "").await;
        assert_eq!(image, ImageRef::url(PLACEHOLDER_IMAGE_URL));
    }

    #[tokio::test]
    async fn test_tagline_strips_quotes() {
        let mut backend = backend();
        backend
            .expect_generate_text()
            .times(1)
            .withf(|r| r.response_schema.is_none() && !r.web_grounding)
            .returning(|_| Ok(text("  \u{201C}Where temples touch the sky\u{201D}\n")));

        let tagline = gateway(backend).generate_tagline("Madurai").await;
        assert_eq!(tagline, "Where temples touch the sky");
    }

    #[tokio::test]
    async fn test_tagline_falls_back_on_failure_or_empty() {
        let mut backend = backend();
        backend
            .expect_generate_text()
            .returning(|_| Err(GatewayError::Transient("down".to_string())));
        assert_eq!(gateway(backend).generate_tagline("Chennai").await, DEFAULT_TAGLINE);

        let mut backend = self::backend();
        backend.expect_generate_text().returning(|_| Ok(text("\"\"")));
        assert_eq!(gateway(backend).generate_tagline("Chennai").await, DEFAULT_TAGLINE);
    }

    #[tokio::test]
    async fn test_fetch_ignores_bracketed_citation_markers() {
        let mut backend = backend();
        backend
            .expect_generate_text()
            .times(1)
            .returning(|_| Ok(text(&format!("{}\nSources: see [1].", TWO_PLACES))));

        let places = assert_ok!(gateway(backend).fetch_recommendations(&food_in_madurai()).await);
        assert_eq!(places.len(), 2);
        assert_eq!(places[1].id, "kumar-mess");
    }

    #[tokio::test]
    async fn test_fetch_skips_bracketed_prose_before_the_array() {
        let mut backend = backend();
        backend.expect_generate_text().returning(|_| {
            Ok(text(&format!(
                "Here are [2] picks:\n```json\n{}\n```\nSee [3] for more.",
                TWO_PLACES
            )))
        });

        let places = assert_ok!(gateway(backend).fetch_recommendations(&food_in_madurai()).await);
        let ids: Vec<&str> = places.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["murugan-idli", "kumar-mess"]);
    }

    #[test]
    fn test_extract_wire_places() {
        assert_eq!(assert_ok!(extract_wire_places(" [] ")).len(), 0);
        assert_eq!(assert_ok!(extract_wire_places("```json\n[]\n```")).len(), 0);
        assert_eq!(assert_ok!(extract_wire_places(TWO_PLACES)).len(), 2);

        let err = assert_err!(extract_wire_places("no json here"));
        assert_eq!(
            err,
            GatewayError::MalformedResponse("AI response contained no JSON array".to_string())
        );
        assert!(matches!(
            extract_wire_places("] backwards ["),
            Err(GatewayError::MalformedResponse(_))
        ));
        assert!(matches!(
            extract_wire_places("only a marker [1] here"),
            Err(GatewayError::MalformedResponse(_))
        ));
    }
}
