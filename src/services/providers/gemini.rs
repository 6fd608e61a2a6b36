/// Gemini REST backend
///
/// Calls `models/{model}:generateContent` for both text and images. The API
/// key travels in the `x-goog-api-key` header; a missing key short-circuits to
/// `Unauthorized` without touching the network.
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use crate::{
    config::Config,
    error::{GatewayError, GatewayResult},
    models::SourceLink,
    services::providers::{
        GeneratedImage, GenerativeBackend, ImageRequest, TextRequest, TextResponse,
    },
};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiBackend {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    text_model: String,
    image_model: String,
}

impl GeminiBackend {
    pub fn new(
        api_key: Option<String>,
        api_url: String,
        text_model: String,
        image_model: String,
        timeout: Duration,
    ) -> GatewayResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transient(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            api_url: api_url.trim_end_matches('/').to_string(),
            text_model,
            image_model,
        })
    }

    pub fn from_config(config: &Config) -> GatewayResult<Self> {
        Self::new(
            config.api_key().map(str::to_string),
            config.gemini_api_url.clone(),
            config.text_model.clone(),
            config.image_model.clone(),
            config.request_timeout(),
        )
    }

    fn api_key(&self) -> GatewayResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| GatewayError::Unauthorized("API_KEY_MISSING".to_string()))
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_url, model)
    }

    fn text_body(request: &TextRequest) -> Value {
        let mut generation_config = json!({});
        if let Some(schema) = &request.response_schema {
            generation_config = json!({
                "responseMimeType": "application/json",
                "responseSchema": schema,
            });
        }

        let mut body = json!({
            "systemInstruction": { "parts": [{ "text": request.system_instruction }] },
            "contents": [{ "role": "user", "parts": [{ "text": request.prompt }] }],
            "generationConfig": generation_config,
        });

        if request.web_grounding {
            body["tools"] = json!([{ "googleSearch": {} }]);
        }

        body
    }

    fn image_body(request: &ImageRequest) -> Value {
        json!({
            "contents": [{ "role": "user", "parts": [{ "text": request.prompt }] }],
            "generationConfig": {
                "responseModalities": ["IMAGE"],
                "imageConfig": { "aspectRatio": request.aspect_ratio },
            },
        })
    }

    async fn call(&self, model: &str, body: Value) -> GatewayResult<GenerateContentResponse> {
        let api_key = self.api_key()?;

        let response = self
            .http_client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = %status,
                model = %model,
                provider = "gemini",
                "Gemini request failed"
            );
            return Err(classify_failure(status, &body));
        }

        let response_text = response.text().await?;
        tracing::debug!(response = %response_text, "Raw Gemini response");

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(error = %e, "Failed to deserialize Gemini response");
            GatewayError::MalformedResponse(format!("Failed to parse Gemini response: {}", e))
        })
    }
}

/// Maps a non-success response to the gateway taxonomy
fn classify_failure(status: StatusCode, body: &str) -> GatewayError {
    let detail = format!("Gemini API returned status {}: {}", status, body);

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return GatewayError::Unauthorized(detail);
    }

    // Bad keys come back as 400 INVALID_ARGUMENT with an API_KEY_INVALID reason
    if status == StatusCode::BAD_REQUEST && body.contains("API_KEY_INVALID") {
        return GatewayError::Unauthorized(detail);
    }

    GatewayError::Transient(detail)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    #[serde(default)]
    title: Option<String>,
    uri: String,
}

impl GenerateContentResponse {
    fn first_candidate(&self) -> GatewayResult<&Candidate> {
        self.candidates.first().ok_or_else(|| {
            GatewayError::MalformedResponse("Gemini response had no candidates".to_string())
        })
    }

    fn into_text(self) -> GatewayResult<TextResponse> {
        let candidate = self.first_candidate()?;

        let text: String = candidate
            .content
            .iter()
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| part.text.as_deref())
            .collect();

        let citations = candidate
            .grounding_metadata
            .iter()
            .flat_map(|meta| meta.grounding_chunks.iter())
            .filter_map(|chunk| chunk.web.as_ref())
            .map(|web| SourceLink {
                title: web.title.clone().unwrap_or_else(|| web.uri.clone()),
                uri: web.uri.clone(),
            })
            .collect();

        Ok(TextResponse { text, citations })
    }

    fn into_image(self) -> GatewayResult<GeneratedImage> {
        let candidate = self.first_candidate()?;

        candidate
            .content
            .iter()
            .flat_map(|content| content.parts.iter())
            .find_map(|part| part.inline_data.as_ref())
            .map(|inline| GeneratedImage {
                mime_type: inline.mime_type.clone(),
                data: inline.data.clone(),
            })
            .ok_or_else(|| {
                GatewayError::MalformedResponse("Gemini response had no image data".to_string())
            })
    }
}

#[async_trait::async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn generate_text(&self, request: TextRequest) -> GatewayResult<TextResponse> {
        let body = Self::text_body(&request);
        let response = self.call(&self.text_model, body).await?.into_text()?;

        tracing::info!(
            chars = response.text.len(),
            citations = response.citations.len(),
            grounded = request.web_grounding,
            provider = "gemini",
            "Text generated"
        );

        Ok(response)
    }

    async fn generate_image(&self, request: ImageRequest) -> GatewayResult<GeneratedImage> {
        let body = Self::image_body(&request);
        let image = self.call(&self.image_model, body).await?.into_image()?;

        tracing::info!(
            mime_type = %image.mime_type,
            provider = "gemini",
            "Image generated"
        );

        Ok(image)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
