pub mod gemini;
pub mod output;

pub use gemini::{GeminiClient, GenerateError, GeneratedImage, Model};

pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:8317";
pub const DEFAULT_API_KEY: &str = "local-api-key";
