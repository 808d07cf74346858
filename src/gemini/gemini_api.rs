use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use log::debug;
use serde::{Deserialize, Serialize};

use super::{GenerateError, GeneratedImage, Model};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// How much of a text-only response ends up in the NoImage error message.
const TEXT_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
}

/// One outbound content part, either an inline image or the prompt text.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
    pub data: String,
}

fn default_mime_type() -> String {
    "image/png".to_string()
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    pub parts: Option<Vec<ResponsePart>>,
}

/// A response part may carry inline image data, text, or neither (e.g.
/// a part kind this tool doesn't know about). Unknown kinds are skipped.
#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(rename = "inlineData")]
    pub inline_data: Option<Blob>,
    pub text: Option<String>,
}

pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

/// Reads a reference image and base64-encodes it, with the mime type
/// inferred from the file extension. The content itself is not validated.
pub fn encode_reference(path: &Path) -> Result<Blob, GenerateError> {
    if !path.exists() {
        return Err(GenerateError::ReferenceNotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path).map_err(|source| GenerateError::ReferenceRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Blob {
        mime_type: mime_type_for(path).to_string(),
        data: BASE64.encode(bytes),
    })
}

/// Builds the generateContent payload: one inline part per reference image
/// (in input order), the prompt text last, and both response modalities
/// requested.
pub fn build_request(prompt: &str, references: &[PathBuf]) -> Result<RequestBody, GenerateError> {
    let mut parts = Vec::with_capacity(references.len() + 1);
    for path in references {
        parts.push(Part::InlineData {
            inline_data: encode_reference(path)?,
        });
    }
    parts.push(Part::Text {
        text: prompt.to_string(),
    });

    Ok(RequestBody {
        contents: vec![Content {
            role: "user".to_string(),
            parts,
        }],
        generation_config: GenerationConfig {
            response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
        },
    })
}

pub async fn send_request(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    model: Model,
    body: &RequestBody,
) -> Result<GenerateResponse, GenerateError> {
    let url = format!("{base_url}/v1beta/models/{model}:generateContent");
    debug!("POST {url}");

    let resp = client
        .post(&url)
        .timeout(REQUEST_TIMEOUT)
        .bearer_auth(api_key)
        .json(body)
        .send()
        .await?;

    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(GenerateError::Status { status, body: text });
    }

    Ok(serde_json::from_str(&text)?)
}

/// Walks the first candidate's parts. If several image parts are present
/// the last one wins, same for text parts.
pub fn extract_image(response: GenerateResponse) -> Result<GeneratedImage, GenerateError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(GenerateError::MalformedResponse("no candidates in response"))?;
    let parts = candidate
        .content
        .and_then(|c| c.parts)
        .ok_or(GenerateError::MalformedResponse(
            "no content parts in response",
        ))?;

    let mut image: Option<(Vec<u8>, String)> = None;
    let mut text: Option<String> = None;

    for part in parts {
        if let Some(blob) = part.inline_data {
            let bytes = BASE64.decode(blob.data.as_bytes())?;
            image = Some((bytes, blob.mime_type));
        } else if let Some(t) = part.text {
            text = Some(t);
        }
    }

    match image {
        Some((data, mime_type)) => Ok(GeneratedImage {
            data,
            mime_type,
            text,
        }),
        None => Err(GenerateError::NoImage(
            text.unwrap_or_default()
                .chars()
                .take(TEXT_PREVIEW_CHARS)
                .collect(),
        )),
    }
}
