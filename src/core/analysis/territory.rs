// src/core/analysis/territory.rs
//
// Rule-based infarction territory lookup over the lead-group table.

use log::debug;
use serde::Serialize;
use std::fmt;

use super::st_segment::StAnalysis;
use crate::config::LeadGroupTable;
use crate::core::classifier::DiagnosticClass;

/// Territory shown in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Territory {
    /// Territory name taken from the lead-group table
    Named(String),
    /// Diagnosis is not an infarction
    NotApplicable,
    /// Infarction, but no lead group fully matched
    Undetermined,
}

impl Territory {
    pub fn label(&self) -> &str {
        match self {
            Territory::Named(name) => name,
            Territory::NotApplicable => "N/A",
            Territory::Undetermined => "Undetermined Type",
        }
    }
}

impl fmt::Display for Territory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Territory> for String {
    fn from(territory: Territory) -> Self {
        territory.label().to_string()
    }
}

pub struct TerritoryClassifier<'a> {
    table: &'a LeadGroupTable,
}

impl<'a> TerritoryClassifier<'a> {
    pub fn new(table: &'a LeadGroupTable) -> Self {
        Self { table }
    }

    /// First territory, in table order, whose whole lead set is affected
    pub fn infer(&self, analysis: &StAnalysis) -> Territory {
        self.table
            .groups()
            .iter()
            .find(|group| {
                group
                    .leads
                    .iter()
                    .all(|lead| analysis.leads_affected.contains(lead))
            })
            .map(|group| Territory::Named(group.territory.clone()))
            .unwrap_or(Territory::Undetermined)
    }

    /// Territory for the report: only infarctions are localised
    pub fn territory_for(&self, diagnosis: DiagnosticClass, analysis: &StAnalysis) -> Territory {
        if diagnosis != DiagnosticClass::MyocardialInfarction {
            return Territory::NotApplicable;
        }
        let territory = self.infer(analysis);
        debug!(
            "territory {} from leads {:?}",
            territory, analysis.leads_affected
        );
        territory
    }
}
