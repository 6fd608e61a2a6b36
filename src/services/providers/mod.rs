/// Generative AI backends
///
/// A backend is the raw transport to a text/image generation service. Prompt
/// construction, validation, retries and fallbacks live in the gateway, so a
/// backend only has to move requests and classify failures.
use serde_json::Value;

use crate::{error::GatewayResult, models::SourceLink};

pub mod gemini;

pub use gemini::GeminiBackend;

/// Text generation request
#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    pub system_instruction: String,
    pub prompt: String,
    /// JSON schema the output must follow, if any
    pub response_schema: Option<Value>,
    /// Whether the service may ground its answer with web search
    pub web_grounding: bool,
}

/// Generated text plus any citations the service attached
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextResponse {
    pub text: String,
    pub citations: Vec<SourceLink>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub prompt: String,
    /// Aspect ratio hint such as "16:9"
    pub aspect_ratio: String,
}

/// Inline image bytes, base64 encoded
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: String,
}

/// Trait for generative AI backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate_text(&self, request: TextRequest) -> GatewayResult<TextResponse>;

    async fn generate_image(&self, request: ImageRequest) -> GatewayResult<GeneratedImage>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}
