use anyhow::{Context, Result};
use clap::Parser;
use cover_colors::{ColorSample, ExtractOptions, extract_colors};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{Level, info};

/// Extract per-pixel colors (RGB, HSL, hex) from images and print them as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more image URLs, `data:` URLs or file paths
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Cross-origin policy passed to the loader (e.g. "anonymous")
    #[arg(short = 'x', long)]
    cross_origin: Option<String>,

    /// JSON options file; flags given here take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Largest image area, in pixels, that will be rasterized
    #[arg(long)]
    max_surface_pixels: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Log each pipeline step
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Extraction<'a> {
    url: &'a str,
    colors: Vec<ColorSample>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut options = match &args.config {
        Some(path) => ExtractOptions::from_json_file(path)?,
        None => ExtractOptions::default(),
    };
    if let Some(cross_origin) = args.cross_origin {
        options.cross_origin = Some(cross_origin);
    }
    if let Some(max) = args.max_surface_pixels {
        options.max_surface_pixels = max;
    }

    let mut results = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        let colors = extract_colors(input, &options)
            .await
            .with_context(|| format!("color extraction failed for {input}"))?;
        info!(url = %input, samples = colors.len(), "extracted");
        results.push(Extraction { url: input, colors });
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&results)?
    } else {
        serde_json::to_string(&results)?
    };
    println!("{json}");

    Ok(())
}
