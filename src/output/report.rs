//! Combined analysis report

use crate::processing::flaw_analyzer::EnhancedAnalysis;
use crate::processing::job_matcher::JobMatchResult;
use crate::processing::parser::ParsedSections;
use crate::processing::scorer::AnalysisResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything one analysis run produces, bundled for the formatters and
/// for callers that persist results verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// ATS score breakdown, feedback, keywords, improvements
    pub analysis: AnalysisResult,

    /// Flaw tiers, approval tips, and readiness verdict
    pub enhanced: EnhancedAnalysis,

    /// Present only when a job description was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_match: Option<JobMatchResult>,

    /// Sections as extracted from the resume text
    pub sections: ParsedSections,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub source_file: String,
    pub word_count: usize,
    pub character_count: usize,
    pub processing_time_ms: u64,
    pub version: String,
}
