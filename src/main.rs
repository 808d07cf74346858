use std::path::PathBuf;

use clap::Parser;
use color_eyre::{Result, eyre::eyre};
use imggen::{DEFAULT_API_KEY, DEFAULT_PROXY_URL, GeminiClient, Model, output};
use log::{debug, info};

/// Generate images with Gemini models through CLIProxyAPI. Supports
/// text-to-image and image-to-image with one or more references.
#[derive(clap::Parser)]
struct Cli {
    /// Image generation prompt
    prompt: String,

    /// Output file path (default: ~/.openclaw/workspace/tmp/generated_image.png)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Model to use
    #[arg(short, long, default_value_t)]
    model: Model,

    /// Reference image path(s) for image-to-image generation. Can be given
    /// multiple times: -r img1.png -r img2.png
    #[arg(short = 'r', long = "ref")]
    references: Vec<PathBuf>,

    /// CLIProxyAPI base URL
    #[arg(long, default_value = DEFAULT_PROXY_URL)]
    proxy_url: String,

    /// API key, sent as a bearer token
    #[arg(long, default_value = DEFAULT_API_KEY)]
    api_key: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    pretty_env_logger::init();
    color_eyre::install()?;

    let output = match args.output {
        Some(path) => path,
        None => default_output_path()?,
    };

    info!("Generating image with {}", args.model);
    debug!("Prompt: {}", args.prompt);
    if !args.references.is_empty() {
        info!("References: {} image(s)", args.references.len());
    }

    let client = GeminiClient::new(args.proxy_url, args.api_key);
    let image = client
        .generate(args.model, &args.prompt, &args.references)
        .await?;
    if let Some(text) = &image.text {
        debug!("Text response: {text}");
    }

    let path = output::write_image(output, &image.mime_type, &image.data)?;
    println!("Saved image to {}, {} bytes", path.display(), image.data.len());

    Ok(())
}

fn default_output_path() -> Result<PathBuf> {
    Ok(dirs::home_dir()
        .ok_or(eyre!("Couldn't find home dir"))?
        .join(".openclaw/workspace/tmp/generated_image.png"))
}
