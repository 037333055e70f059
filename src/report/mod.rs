//! Report record, assembly, and document rendering

mod assembler;
mod document;
mod record;
mod text;

pub use assembler::{ReportAssembler, CARDIAC_AXIS};
pub use document::{
    Document, DocumentRenderer, Section, Table, WarningsBlock, DOCUMENT_TITLE, WARNINGS_HEADING,
};
pub use record::{ClinicalSummary, LeadIIDetail, Report, Rhythm, StSegment};
pub use text::render_text;
