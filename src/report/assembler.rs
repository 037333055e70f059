// src/report/assembler.rs
//
// Composes classifier output, calibrated confidence, and ST analysis into a
// finished report. Display-only vitals are drawn from the injected RNG.

use log::{debug, info};
use rand::Rng;

use super::record::{ClinicalSummary, LeadIIDetail, Report, Rhythm, StSegment};
use crate::config::LeadGroupTable;
use crate::core::analysis::{StAnalysis, TerritoryClassifier};
use crate::core::classifier::ClassProbabilities;

pub const CARDIAC_AXIS: &str = "Normal Axis";

/// Share of reports drawn with a regular rhythm
const REGULAR_RHYTHM_PROBABILITY: f64 = 0.8;

pub struct ReportAssembler<'a> {
    territories: TerritoryClassifier<'a>,
}

impl<'a> ReportAssembler<'a> {
    pub fn new(table: &'a LeadGroupTable) -> Self {
        Self {
            territories: TerritoryClassifier::new(table),
        }
    }

    /// Build the provisional summary for one image
    pub fn summarize<R: Rng>(
        &self,
        probabilities: &ClassProbabilities,
        confidence: f32,
        st: &StAnalysis,
        rng: &mut R,
    ) -> ClinicalSummary {
        let diagnosis = probabilities.argmax();
        let st_segment = StSegment::from_diagnosis(diagnosis);
        let territory = self.territories.territory_for(diagnosis, st);

        let rhythm = if rng.gen_bool(REGULAR_RHYTHM_PROBABILITY) {
            Rhythm::Regular
        } else {
            Rhythm::Irregular
        };

        let summary = ClinicalSummary {
            patient_id: patient_token(rng),
            heart_rate: format!("{} BPM", rng.gen_range(50..110)),
            rr_interval_secs: rng.gen_range(0.6..1.0),
            rhythm,
            cardiac_axis: CARDIAC_AXIS.to_string(),
            st_segment,
            diagnosis,
            territory,
            confidence,
            affected_leads: st.leads_affected.clone(),
            lead_ii: LeadIIDetail::illustrative(st_segment),
        };
        debug!("provisional summary: {:?}", summary);
        summary
    }

    /// Two-phase assembly: summarize, then validate and freeze
    pub fn assemble<R: Rng>(
        &self,
        probabilities: &ClassProbabilities,
        confidence: f32,
        st: &StAnalysis,
        rng: &mut R,
    ) -> Report {
        let report = self.summarize(probabilities, confidence, st, rng).finalize();
        info!(
            "report {}: {} ({}), {} warning(s)",
            report.patient_id(),
            report.diagnosis(),
            report.confidence_display(),
            report.warnings().len()
        );
        report
    }
}

/// Short opaque patient token: first eight hex digits of a v4 UUID
fn patient_token<R: Rng>(rng: &mut R) -> String {
    let uuid = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
    uuid.simple().to_string()[..8].to_string()
}
