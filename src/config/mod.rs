//! Configuration module for the report pipeline

mod pipeline;
mod tables;

pub use pipeline::{PipelineConfig, PipelineConfigBuilder, DEFAULT_AFFECTED_LEAD};
pub use tables::{
    ClinicalTables, LeadGroup, LeadGroupTable, LeadReference, LeadReferenceTable,
    CANONICAL_LEADS,
};
