//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::synth::TraceKind;

#[derive(Parser, Debug)]
#[command(name = "ecgreport")]
#[command(version, about = "Analyze ECG images and produce structured diagnostic reports")]
pub struct Cli {
    /// Verbose output (debug logging, class probabilities)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the diagnostic pipeline on an image or a directory of images
    Analyze(AnalyzeArgs),
    /// Read printed metadata from an ECG image with Tesseract OCR
    Metadata(MetadataArgs),
    /// Write a synthetic ECG trace image
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Input image file or directory
    pub input: PathBuf,

    /// Classifier weights (JSON with `weights` and `bias`)
    #[arg(short, long, env = "ECGREPORT_MODEL")]
    pub model: PathBuf,

    /// Directory for rendered reports
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Report file format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Seed for reproducible confidence calibration and display vitals
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pipeline parameter overrides (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Substitute clinical tables (JSON)
    #[arg(long)]
    pub tables: Option<PathBuf>,

    /// Print summaries only, do not write report files
    #[arg(long)]
    pub no_write: bool,
}

#[derive(Args, Debug)]
pub struct MetadataArgs {
    /// ECG image to read
    pub input: PathBuf,

    /// Tesseract executable
    #[arg(long, default_value = "tesseract")]
    pub tesseract: PathBuf,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Trace type (normal, mi)
    #[arg(short, long, value_parser = parse_trace_kind, default_value = "normal")]
    pub kind: TraceKind,

    /// Output image path (format from extension)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Width in pixels, one 5 ms sample per column
    #[arg(long, default_value_t = 600)]
    pub width: u32,

    #[arg(long, default_value_t = 256)]
    pub height: u32,

    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

fn parse_trace_kind(name: &str) -> Result<TraceKind, String> {
    TraceKind::from_name(name).ok_or_else(|| format!("Unknown trace kind: {} (use normal or mi)", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "ecgreport",
            "analyze",
            "scan.png",
            "--model",
            "weights.json",
            "--format",
            "json",
            "--seed",
            "7",
        ])
        .unwrap();

        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.input, PathBuf::from("scan.png"));
                assert_eq!(args.model, PathBuf::from("weights.json"));
                assert_eq!(args.format, OutputFormat::Json);
                assert_eq!(args.seed, Some(7));
                assert_eq!(args.output, PathBuf::from("."));
                assert!(!args.no_write);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_simulate_defaults() {
        let cli = Cli::try_parse_from(["ecgreport", "-v", "simulate", "-o", "trace.png"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Simulate(args) => {
                assert_eq!(args.kind, TraceKind::Normal);
                assert_eq!(args.width, 600);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_trace_kind() {
        let result = Cli::try_parse_from(["ecgreport", "simulate", "-k", "flutter", "-o", "t.png"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(OutputFormat::Text.extension(), "txt");
        assert_eq!(OutputFormat::Json.extension(), "json");
    }
}
