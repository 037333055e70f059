// src/cli/mod.rs
//
// Command-line interface module

mod args;
mod output;

pub use args::{AnalyzeArgs, Cli, Command, MetadataArgs, OutputFormat, SimulateArgs};
pub use output::{format_document, format_probability_bars, print_summary, write_document};

use anyhow::{bail, Context, Result};
use colorful::Colorful;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{ClinicalTables, PipelineConfig};
use crate::core::{EcgAnalyzer, LinearClassifier};
use crate::metadata::MetadataExtractor;
use crate::synth::render_trace;

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "tif", "tiff"];

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Analyze(args) => analyze(&args, cli.verbose),
        Command::Metadata(args) => metadata(&args),
        Command::Simulate(args) => simulate(&args),
    }
}

fn analyze(args: &AnalyzeArgs, verbose: bool) -> Result<()> {
    let config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    let tables = match &args.tables {
        Some(path) => ClinicalTables::from_json_file(path)
            .with_context(|| format!("Failed to load tables: {}", path.display()))?,
        None => ClinicalTables::default(),
    };
    let model = LinearClassifier::from_json_file(&args.model)
        .with_context(|| format!("Failed to load model: {}", args.model.display()))?;

    let analyzer = EcgAnalyzer::<LinearClassifier>::builder()
        .config(config)
        .tables(tables)
        .build(model)?;

    let images = collect_image_files(&args.input)?;
    if images.is_empty() {
        println!("{}", "No ECG images found!".red());
        return Ok(());
    }
    println!("Found {} image(s)\n", images.len());

    if !args.no_write {
        std::fs::create_dir_all(&args.output)
            .with_context(|| format!("Failed to create {}", args.output.display()))?;
    }

    let progress = ProgressBar::new(images.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("  Analyzing: [{bar:30}] {pos}/{len}") {
        progress.set_style(style);
    }

    // Each image gets its own RNG; runs share nothing mutable
    let outcomes: Vec<_> = images
        .par_iter()
        .enumerate()
        .progress_with(progress.clone())
        .map(|(index, path)| {
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
                None => StdRng::from_entropy(),
            };
            (path, analyzer.analyze_path(path, &mut rng))
        })
        .collect();
    progress.finish_and_clear();

    let mut failures = 0;
    for (path, outcome) in outcomes {
        match outcome {
            Ok(outcome) => {
                print_summary(path, &outcome, verbose);
                if !args.no_write {
                    let doc = analyzer.render(&outcome.report);
                    let written = write_document(&doc, &args.output, args.format)?;
                    println!("  Report saved to: {}", written.display());
                }
            }
            Err(e) => {
                failures += 1;
                println!("{} {}", path.display().to_string().cyan(), format!("failed: {}", e).red());
            }
        }
        println!();
    }

    if failures > 0 {
        bail!("{} of {} image(s) failed", failures, images.len());
    }
    Ok(())
}

fn metadata(args: &MetadataArgs) -> Result<()> {
    let extractor = MetadataExtractor::with_engine(&args.tesseract)?;
    let text = extractor
        .extract(&args.input)
        .with_context(|| format!("Failed to read metadata from {}", args.input.display()))?;
    println!("{}", text);
    Ok(())
}

fn simulate(args: &SimulateArgs) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let img = render_trace(args.kind, args.width, args.height, &mut rng);
    img.save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!("wrote {} trace to {}", args.kind, args.output.display());
    println!("Trace saved to: {}", args.output.display());
    Ok(())
}

/// Image files under `path`, or `path` itself when it is an image file
pub fn collect_image_files(path: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        // An explicitly named file is always attempted
        files.push(path.to_path_buf());
    } else if path.is_dir() {
        for entry in WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let entry_path = entry.path();
            if entry_path.is_file() && has_image_extension(entry_path) {
                files.push(entry_path.to_path_buf());
            }
        }
        files.sort();
    } else {
        bail!("Input not found: {}", path.display());
    }

    debug!("collected {} image(s) from {}", files.len(), path.display());
    Ok(files)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}
