//! Shared fixtures for integration tests
#![allow(dead_code)]

use ecgreport::core::{ClassProbabilities, Signal};
use ecgreport::synth::{render_trace, TraceKind};
use ecgreport::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

pub const CANONICAL_LENGTH: usize = 187;

pub fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ecgreport"))
}

/// Render a synthetic trace to `dir/name` and return its path
pub fn write_trace_image(dir: &Path, name: &str, kind: TraceKind, seed: u64) -> PathBuf {
    let mut rng = StdRng::seed_from_u64(seed);
    let path = dir.join(name);
    render_trace(kind, 600, 256, &mut rng)
        .save(&path)
        .expect("Failed to write trace image");
    path
}

/// Classifier that ignores the signal and returns fixed scores
pub fn fixed_classifier(raw: [f32; 5]) -> impl Fn(&Signal) -> Result<ClassProbabilities> {
    move |_: &Signal| ClassProbabilities::from_raw(&raw)
}

/// Zero-weight linear model whose biases pick the winning class
pub fn write_bias_model(dir: &Path, bias: [f32; 5]) -> PathBuf {
    let model = json!({
        "weights": vec![vec![0.0f32; CANONICAL_LENGTH]; 5],
        "bias": bias,
    });
    let path = dir.join("model.json");
    fs::write(&path, model.to_string()).expect("Failed to write model");
    path
}

/// Flat trace at `base` with the ST window (samples 100..120) at `st`
pub fn shaped_signal(base: f32, st: f32) -> Signal {
    let mut samples = vec![base; CANONICAL_LENGTH];
    for s in &mut samples[100..120] {
        *s = st;
    }
    Signal::new(samples)
}
