use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::Display;

pub mod gemini_api;

mod error;
pub use error::GenerateError;

#[derive(
    Debug, Clone, Copy, Display, clap::ValueEnum, Serialize, Deserialize, PartialEq, Eq, Default,
)]
pub enum Model {
    #[default]
    #[strum(to_string = "gemini-3-pro-image")]
    #[value(name = "gemini-3-pro-image")]
    #[serde(rename = "gemini-3-pro-image")]
    Gemini3ProImage,

    #[strum(to_string = "gemini-2.5-flash-image")]
    #[value(name = "gemini-2.5-flash-image")]
    #[serde(rename = "gemini-2.5-flash-image")]
    Gemini25FlashImage,
}

/// The decoded result of a generation request: raw image bytes, the mime
/// type the service reported for them, and any text the model produced
/// alongside the image.
#[derive(Debug)]
pub struct GeneratedImage {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub text: Option<String>,
}

#[derive(Clone)]
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Runs one full generation: encode references, send the request, and
    /// extract the inline image from the response. Reference encoding
    /// happens before any network I/O, so a missing file never produces
    /// traffic.
    pub async fn generate(
        &self,
        model: Model,
        prompt: &str,
        references: &[PathBuf],
    ) -> Result<GeneratedImage, GenerateError> {
        let body = gemini_api::build_request(prompt, references)?;
        let response =
            gemini_api::send_request(&self.client, &self.base_url, &self.api_key, model, &body)
                .await?;
        gemini_api::extract_image(response)
    }
}
