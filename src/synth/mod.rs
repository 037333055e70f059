// src/synth/mod.rs
//
// Synthetic ECG traces for demos and tests.
//
// A one-second beat (60 BPM) is built piecewise from P, QRS, ST, and T
// phases with a little uniform noise. The infarction variant raises the ST
// segment, deepens the Q wave, and inverts the T wave. Traces can be drawn
// into grayscale images that the signal deriver accepts.

use image::{GrayImage, Luma};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fmt;

use crate::core::classifier::DiagnosticClass;

/// Length of one simulated beat
pub const BEAT_MS: u32 = 1000;
/// Time step between plotted samples
pub const SAMPLE_STEP_MS: u32 = 5;

/// Amplitude range mapped onto the image height
const PLOT_MIN: f32 = -100.0;
const PLOT_MAX: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceKind {
    Normal,
    Infarction,
}

impl TraceKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "mi" | "infarction" => Some(Self::Infarction),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Infarction => "mi",
        }
    }
}

impl fmt::Display for TraceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Noise-free waveform value at `time_ms`
pub fn clean_point(time_ms: u32, kind: TraceKind) -> f32 {
    let t = (time_ms % BEAT_MS) as f32;

    let mut y = match t {
        // P wave
        t if t < 100.0 => (t / 100.0 * PI).sin() * 10.0,
        // PR segment
        t if t < 150.0 => 0.0,
        // QRS: Q dip, R spike, S return
        t if t < 170.0 => (t - 170.0) / 20.0 * 30.0,
        t if t < 200.0 => (t - 170.0) / 30.0 * -80.0,
        t if t < 250.0 => (t - 200.0) / 50.0 * 50.0,
        // ST segment
        t if t < 320.0 => 0.0,
        // T wave
        t if t < 450.0 => ((t - 320.0) / 130.0 * PI).sin() * 20.0,
        _ => 0.0,
    };

    if kind == TraceKind::Infarction {
        if (250.0..320.0).contains(&t) {
            y -= 30.0;
        }
        if (150.0..170.0).contains(&t) {
            y += (t - 170.0) / 20.0 * 60.0;
        }
        if (320.0..450.0).contains(&t) {
            y *= -1.5;
        }
    }

    y
}

/// Waveform value at `time_ms` with uniform noise in [-2.5, 2.5)
pub fn ecg_point<R: Rng>(time_ms: u32, kind: TraceKind, rng: &mut R) -> f32 {
    let t = time_ms % BEAT_MS;
    let noise = (rng.gen::<f32>() - 0.5) * 5.0;

    if kind == TraceKind::Infarction && (320..450).contains(&t) {
        // Inversion applies to the noisy value
        let base = clean_point(time_ms, TraceKind::Normal) + noise;
        return base * -1.5;
    }
    clean_point(time_ms, kind) + noise
}

/// Sample `count` consecutive points, `SAMPLE_STEP_MS` apart
pub fn generate_trace<R: Rng>(count: usize, kind: TraceKind, rng: &mut R) -> Vec<f32> {
    (0..count)
        .map(|i| ecg_point(i as u32 * SAMPLE_STEP_MS, kind, rng))
        .collect()
}

/// Draw a trace one sample per column, dark on white
pub fn render_trace<R: Rng>(kind: TraceKind, width: u32, height: u32, rng: &mut R) -> GrayImage {
    let mut img = GrayImage::from_pixel(width, height, Luma([255]));
    if width == 0 || height == 0 {
        return img;
    }

    let to_row = |value: f32| -> u32 {
        let norm = ((value - PLOT_MIN) / (PLOT_MAX - PLOT_MIN)).clamp(0.0, 1.0);
        (norm * (height - 1) as f32).round() as u32
    };

    let trace = generate_trace(width as usize, kind, rng);
    let mut prev: Option<u32> = None;
    for (x, &value) in trace.iter().enumerate() {
        let row = to_row(value);
        let (lo, hi) = match prev {
            Some(p) => (p.min(row), p.max(row)),
            None => (row, row),
        };
        for y in lo..=hi {
            img.put_pixel(x as u32, y, Luma([0]));
        }
        prev = Some(row);
    }
    img
}

/// Textbook features listed alongside a diagnosis in the summary view
pub fn typical_characteristics(class: DiagnosticClass) -> &'static [&'static str] {
    match class {
        DiagnosticClass::Normal => &[
            "Regular rhythm",
            "Heart rate 60-100 bpm",
            "Normal P waves preceding each QRS complex",
            "Normal PR interval (0.12-0.20s)",
            "Normal QRS duration (<0.12s)",
            "Isoelectric ST segment",
            "Upright T waves",
        ],
        DiagnosticClass::MyocardialInfarction => &[
            "ST segment elevation or depression (depending on MI type)",
            "Pathological Q waves (wider and deeper than normal)",
            "T-wave inversion or hyperacute T waves",
            "Possible abnormal R-wave progression",
            "May be associated with arrhythmias",
        ],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_phase_values() {
        assert!((clean_point(50, TraceKind::Normal) - 10.0).abs() < 1e-4);
        assert_eq!(clean_point(120, TraceKind::Normal), 0.0);
        assert!((clean_point(199, TraceKind::Normal) - (29.0 / 30.0 * -80.0)).abs() < 1e-4);
        assert_eq!(clean_point(300, TraceKind::Normal), 0.0);
        assert!((clean_point(385, TraceKind::Normal) - 20.0).abs() < 1e-3);
        assert_eq!(clean_point(700, TraceKind::Normal), 0.0);
    }

    #[test]
    fn test_beats_repeat() {
        for t in [0, 160, 275, 400, 999] {
            assert_eq!(
                clean_point(t, TraceKind::Infarction),
                clean_point(t + BEAT_MS, TraceKind::Infarction)
            );
        }
    }

    #[test]
    fn test_infarction_changes() {
        // ST raised
        assert_eq!(clean_point(300, TraceKind::Infarction), -30.0);
        // Deeper Q
        assert!(clean_point(160, TraceKind::Infarction) < clean_point(160, TraceKind::Normal));
        // Inverted T
        assert!((clean_point(385, TraceKind::Infarction) + 30.0).abs() < 1e-2);
    }

    #[test]
    fn test_noise_is_bounded() {
        let mut rng = StdRng::seed_from_u64(2);
        for t in (0..2000).step_by(5) {
            let noisy = ecg_point(t, TraceKind::Normal, &mut rng);
            assert!((noisy - clean_point(t, TraceKind::Normal)).abs() <= 2.5 + 1e-3);
        }
    }

    #[test]
    fn test_render_trace_dimensions() {
        let mut rng = StdRng::seed_from_u64(2);
        let img = render_trace(TraceKind::Normal, 600, 200, &mut rng);
        assert_eq!(img.dimensions(), (600, 200));
        assert!(img.pixels().any(|p| p.0[0] == 0));
        assert!(img.pixels().any(|p| p.0[0] == 255));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(TraceKind::from_name("MI"), Some(TraceKind::Infarction));
        assert_eq!(TraceKind::from_name("normal"), Some(TraceKind::Normal));
        assert_eq!(TraceKind::from_name("flutter"), None);
    }

    #[test]
    fn test_characteristics() {
        assert_eq!(typical_characteristics(DiagnosticClass::Normal).len(), 7);
        assert!(typical_characteristics(DiagnosticClass::StElevation).is_empty());
    }
}
