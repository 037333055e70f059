// src/config/tables.rs
//
// Static clinical tables: infarction territories by lead group, and the
// per-lead reference ranges printed in the lead-wise summary.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EcgError, Result};

/// The twelve standard leads in report order
pub const CANONICAL_LEADS: [&str; 12] = [
    "I", "II", "III", "aVR", "aVL", "aVF", "V1", "V2", "V3", "V4", "V5", "V6",
];

/// One infarction territory and the leads that must all be involved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadGroup {
    pub territory: String,
    pub leads: Vec<String>,
    pub criteria: String,
}

impl LeadGroup {
    pub fn new(territory: &str, leads: &[&str], criteria: &str) -> Self {
        Self {
            territory: territory.to_string(),
            leads: leads.iter().map(|l| l.to_string()).collect(),
            criteria: criteria.to_string(),
        }
    }
}

/// Ordered territory table. Order is the tie-break: first full match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadGroupTable {
    groups: Vec<LeadGroup>,
}

impl LeadGroupTable {
    pub fn new(groups: Vec<LeadGroup>) -> Result<Self> {
        if let Some(empty) = groups.iter().find(|g| g.leads.is_empty()) {
            // An empty lead set would match every analysis
            return Err(EcgError::Config(format!(
                "territory '{}' has no leads",
                empty.territory
            )));
        }
        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[LeadGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Default for LeadGroupTable {
    fn default() -> Self {
        Self {
            groups: vec![
                LeadGroup::new(
                    "Anterior",
                    &["V2", "V3", "V4"],
                    "ST elevation >= 2mm (men) or >= 1.5mm (women)",
                ),
                LeadGroup::new("Inferior", &["II", "III", "aVF"], "ST elevation >= 1mm"),
                LeadGroup::new("Lateral", &["I", "aVL", "V5", "V6"], "ST elevation >= 1mm"),
                LeadGroup::new(
                    "Posterior",
                    &["V1", "V2"],
                    "ST depression with dominant R wave",
                ),
                LeadGroup::new(
                    "Right Ventricular",
                    &["V1", "V4R"],
                    "ST elevation >= 1mm in V4R",
                ),
            ],
        }
    }
}

/// Display-only reference ranges for one lead
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadReference {
    pub lead: String,
    pub amplitude: String,
    pub duration: String,
}

impl LeadReference {
    fn new(lead: &str, amplitude: &str, duration: &str) -> Self {
        Self {
            lead: lead.to_string(),
            amplitude: amplitude.to_string(),
            duration: duration.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadReferenceTable {
    entries: Vec<LeadReference>,
}

impl LeadReferenceTable {
    pub fn new(entries: Vec<LeadReference>) -> Self {
        Self { entries }
    }

    pub fn get(&self, lead: &str) -> Option<&LeadReference> {
        self.entries.iter().find(|e| e.lead == lead)
    }

    pub fn entries(&self) -> &[LeadReference] {
        &self.entries
    }
}

impl Default for LeadReferenceTable {
    fn default() -> Self {
        // ASCII only, the text sink cannot be assumed to handle anything else
        Self {
            entries: vec![
                LeadReference::new("I", "0.5-1.7 mV", "<= 120 ms"),
                LeadReference::new("II", "0.5-1.7 mV", "<= 120 ms"),
                LeadReference::new("III", "0.1-0.5 mV", "<= 120 ms"),
                LeadReference::new("aVR", "0.1-0.5 mV", "<= 120 ms"),
                LeadReference::new("aVL", "0.1-0.5 mV", "<= 120 ms"),
                LeadReference::new("aVF", "0.1-0.5 mV", "<= 120 ms"),
                LeadReference::new("V1", "<= 0.3 mV", "<= 110 ms"),
                LeadReference::new("V2", "<= 0.3 mV", "<= 110 ms"),
                LeadReference::new("V3", "0.3-1.5 mV", "<= 110 ms"),
                LeadReference::new("V4", "0.5-2.5 mV", "<= 110 ms"),
                LeadReference::new("V5", "0.5-2.5 mV", "<= 120 ms"),
                LeadReference::new("V6", "0.5-2.5 mV", "<= 120 ms"),
            ],
        }
    }
}

/// Both clinical tables, loaded once at start-up and shared read-only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicalTables {
    pub territories: LeadGroupTable,
    pub lead_reference: LeadReferenceTable,
}

impl ClinicalTables {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| EcgError::io(path, e))?;
        let tables: Self = serde_json::from_str(&text)
            .map_err(|e| EcgError::Config(format!("{}: {}", path.display(), e)))?;
        // Re-run the constructor checks that deserialization bypasses
        LeadGroupTable::new(tables.territories.groups.clone())?;
        Ok(tables)
    }
}
