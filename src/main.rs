// This file is an example runner for the `chroma_regions` library.
// It decodes one image, runs the analysis pipeline, and prints the aggregated
// report as JSON — the shape the presentation layer consumes.

use std::env;
use std::path::Path;
use std::process::ExitCode;

use chroma_regions::core_modules::pixel_buffer::PixelBuffer;
use chroma_regions::pipeline::{AnalysisPipeline, ClassificationConfig};

fn main() -> ExitCode {
    // --- 1. Argument Parsing & Setup ---
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: chroma_regions <input_image_path> [config_json_path]");
        return ExitCode::FAILURE;
    }

    match run(&args[1], args.get(2).map(String::as_str)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(image_path: &str, config_path: Option<&str>) -> Result<(), String> {
    // --- 2. Configuration ---
    let config = match config_path {
        Some(path) => ClassificationConfig::from_json_file(Path::new(path))
            .map_err(|e| e.to_string())?,
        None => ClassificationConfig::default(),
    };

    // --- 3. Image Decoding ---
    // Format decoding is the `image` crate's job; the engine only sees the
    // adapted RGBA buffer.
    let decoded = image::open(image_path)
        .map_err(|e| format!("failed to open {image_path}: {e}"))?
        .to_rgba8();
    let buffer = PixelBuffer::from_image(&decoded).map_err(|e| e.to_string())?;

    // --- 4. Analysis & Report ---
    let pipeline = AnalysisPipeline::new(config).map_err(|e| e.to_string())?;
    let report = pipeline.analyze(&buffer).map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
    println!("{json}");

    Ok(())
}
