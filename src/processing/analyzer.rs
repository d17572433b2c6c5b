//! Analysis engine coordinating the full pipeline
//!
//! clean text -> extract sections -> ATS score -> flaw analysis, with an
//! optional job description match. Mirrors the business logic behind the
//! upload/analyze/match endpoints, framework-free.

use crate::output::report::{AnalysisReport, ReportMetadata};
use crate::processing::flaw_analyzer::FlawAnalyzer;
use crate::processing::job_matcher::{JobMatchResult, JobMatcher};
use crate::processing::parser::ResumeParser;
use crate::processing::scorer::AtsScorer;
use crate::processing::text_processor::TextProcessor;
use log::{debug, info};
use std::time::Instant;

pub struct AnalysisEngine {
    text_processor: TextProcessor,
    parser: ResumeParser,
    scorer: AtsScorer,
    flaw_analyzer: FlawAnalyzer,
    job_matcher: JobMatcher,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisEngine {
    pub fn new() -> Self {
        Self {
            text_processor: TextProcessor::new(),
            parser: ResumeParser::new(),
            scorer: AtsScorer::new(),
            flaw_analyzer: FlawAnalyzer::new(),
            job_matcher: JobMatcher::new(),
        }
    }

    /// Run the full analysis pipeline over raw extracted resume text.
    pub fn analyze(&self, raw_text: &str, source: &str) -> AnalysisReport {
        self.run(raw_text, None, source)
    }

    /// Run the full pipeline and additionally match the resume against a
    /// job description.
    pub fn analyze_with_job(
        &self,
        raw_text: &str,
        job_description: &str,
        source: &str,
    ) -> AnalysisReport {
        self.run(raw_text, Some(job_description), source)
    }

    /// Match already-extracted resume text against a job description
    /// without re-running the scoring passes.
    pub fn match_job(&self, raw_text: &str, job_description: &str) -> JobMatchResult {
        let text = self.text_processor.clean_text(raw_text);
        let sections = self.parser.extract_sections(&text);
        self.job_matcher
            .match_job_description(&text, &sections, job_description)
    }

    fn run(&self, raw_text: &str, job_description: Option<&str>, source: &str) -> AnalysisReport {
        let started = Instant::now();

        let text = self.text_processor.clean_text(raw_text);
        debug!("Cleaned text: {} characters", text.len());

        let sections = self.parser.extract_sections(&text);
        debug!(
            "Extracted sections: {} experience entries, {} skills",
            sections.experience.len(),
            sections.skills.len()
        );

        let analysis = self.scorer.calculate_score(&text, &sections);
        info!("Overall ATS score: {}", analysis.overall_score);

        let enhanced = self.flaw_analyzer.analyze(&text, &sections, &analysis);
        info!(
            "Readiness: {} ({} flaws)",
            enhanced.readiness_score,
            enhanced.flaws.len()
        );

        let job_match = job_description
            .map(|jd| self.job_matcher.match_job_description(&text, &sections, jd));

        let metadata = ReportMetadata {
            generated_at: chrono::Utc::now(),
            source_file: source.to_string(),
            word_count: self.text_processor.word_count(&text),
            character_count: self.text_processor.character_count(&text),
            processing_time_ms: started.elapsed().as_millis() as u64,
            version: env!("CARGO_PKG_VERSION").to_string(),
        };

        AnalysisReport {
            analysis,
            enhanced,
            job_match,
            sections,
            metadata,
        }
    }
}
