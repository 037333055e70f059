// src/core/analysis/st_segment.rs
//
// ST-segment level from a derived single-lead trace.
//
// Windows are index based against the canonical length: the first samples
// are the isoelectric baseline and a short window right after the assumed
// QRS end is the ST segment.

use log::debug;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::config::PipelineConfig;
use crate::core::dsp::stats::window_median;
use crate::core::signal::Signal;

/// ST-segment findings for one signal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StAnalysis {
    pub elevation: bool,
    pub depression: bool,
    /// median(ST window) - median(baseline)
    pub level: f32,
    pub leads_affected: BTreeSet<String>,
}

impl StAnalysis {
    /// Derive both flags from one level against a symmetric threshold, so
    /// elevation and depression can never both hold.
    pub fn from_level(level: f32, threshold: f32, leads_affected: BTreeSet<String>) -> Self {
        Self {
            elevation: level > threshold,
            depression: level < -threshold,
            level,
            leads_affected,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StSegmentAnalyzer {
    baseline_window: usize,
    qrs_end: usize,
    st_width: usize,
    threshold: f32,
    // Only one trace is derived from the image, so the affected lead is a
    // fixed choice rather than something inferred.
    default_lead: String,
}

impl StSegmentAnalyzer {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            baseline_window: config.baseline_window,
            qrs_end: config.qrs_end_offset,
            st_width: config.st_window_width,
            threshold: config.st_threshold,
            default_lead: config.default_lead.clone(),
        }
    }

    pub fn analyze(&self, signal: &Signal) -> StAnalysis {
        let samples = signal.samples();
        let len = samples.len();

        let baseline = window_median(&samples[..self.baseline_window.min(len)]);
        let st_start = self.qrs_end.min(len);
        let st_end = (self.qrs_end + self.st_width).min(len);
        let st = window_median(&samples[st_start..st_end]);
        let level = st - baseline;

        let leads = BTreeSet::from([self.default_lead.clone()]);
        let analysis = StAnalysis::from_level(level, self.threshold, leads);

        debug!(
            "ST analysis: baseline {:.4}, st {:.4}, level {:+.4} (elevation={}, depression={})",
            baseline, st, level, analysis.elevation, analysis.depression
        );
        analysis
    }
}
