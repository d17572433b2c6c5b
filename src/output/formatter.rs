//! Output formatters: console, JSON, Markdown, and HTML

use crate::config::OutputFormat;
use crate::error::{Result, ResumeAtsError};
use crate::output::report::AnalysisReport;
use crate::processing::flaw_analyzer::{FlawCategory, OverallReadiness};
use crate::processing::scorer::FeedbackStatus;
use askama::Template;
use colored::{Color, Colorize};

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and score badges
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for documentation and reports
pub struct MarkdownFormatter;

/// HTML formatter with a small self-contained stylesheet
pub struct HtmlFormatter;

/// Coordinates the formatters behind a single entry point
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>ATS Resume Analysis Report</title>
    <style>
        body { font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; color: #333; max-width: 860px; margin: 0 auto; padding: 20px; background: #f8f9fa; }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .score { font-size: 3em; font-weight: bold; color: {{ score_color }}; }
        .badge { display: inline-block; padding: 2px 10px; border-radius: 12px; background: #eef; font-size: 0.8em; }
        table { border-collapse: collapse; width: 100%; margin: 12px 0; }
        td, th { border-bottom: 1px solid #e0e0e0; padding: 6px 10px; text-align: left; }
        .flaw-critical { border-left: 4px solid #c0392b; padding-left: 10px; margin: 8px 0; }
        .flaw-major { border-left: 4px solid #e67e22; padding-left: 10px; margin: 8px 0; }
        .flaw-minor { border-left: 4px solid #f1c40f; padding-left: 10px; margin: 8px 0; }
        .metadata { color: #888; font-size: 0.85em; margin-top: 24px; }
    </style>
</head>
<body>
    <div class="container">
        <h1>ATS Resume Analysis</h1>
        <p><span class="score">{{ overall_score }}</span>/100 <span class="badge">{{ score_label }}</span></p>
        <h2>Score Breakdown</h2>
        {{ breakdown_html|safe }}
        <h2>Readiness: {{ readiness_score }}/100 ({{ readiness_label }})</h2>
        <p>{{ summary }}</p>
        <h2>Flaws</h2>
        {{ flaws_html|safe }}
        <h2>Approval Checklist</h2>
        {{ tips_html|safe }}
        {{ job_match_html|safe }}
        <div class="metadata">
            <p>Generated {{ generated_at }} from {{ source_file }} ({{ word_count }} words) by resume-ats v{{ version }}</p>
        </div>
    </div>
</body>
</html>"#,
    ext = "html"
)]
struct HtmlReportTemplate {
    overall_score: u8,
    score_label: String,
    score_color: String,
    breakdown_html: String,
    readiness_score: u8,
    readiness_label: String,
    summary: String,
    flaws_html: String,
    tips_html: String,
    job_match_html: String,
    generated_at: String,
    source_file: String,
    word_count: usize,
    version: String,
}

fn score_label(score: u8) -> &'static str {
    match score {
        90..=100 => "EXCELLENT",
        80..=89 => "VERY GOOD",
        70..=79 => "GOOD",
        60..=69 => "FAIR",
        50..=59 => "BELOW AVG",
        _ => "POOR",
    }
}

fn readiness_label(readiness: OverallReadiness) -> &'static str {
    match readiness {
        OverallReadiness::Ready => "ready",
        OverallReadiness::NeedsWork => "needs work",
        OverallReadiness::NotReady => "not ready",
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!(
                "\n{} {}\n",
                prefix.color(color).bold(),
                title.color(color).bold()
            )
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let badge = score_label(score);
        let color = match score {
            80..=100 => Color::Green,
            60..=79 => Color::Yellow,
            _ => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn status_icon(&self, status: FeedbackStatus) -> String {
        match status {
            FeedbackStatus::Good => self.colorize("✓", Color::Green),
            FeedbackStatus::Warning => self.colorize("⚠", Color::Yellow),
            FeedbackStatus::Error => self.colorize("✗", Color::Red),
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📊 ATS RESUME ANALYSIS", 1));
        output.push_str(&format!(
            "Source: {} | {} words | Generated: {}\n",
            report.metadata.source_file,
            report.metadata.word_count,
            report.metadata.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));

        output.push_str(&format!(
            "\nOverall Score: {}/100 {}\n",
            report.analysis.overall_score,
            self.format_score_badge(report.analysis.overall_score)
        ));

        output.push_str(&self.format_header("Score Breakdown", 2));
        let s = &report.analysis.scores;
        for (name, value) in [
            ("Keyword Relevance", s.keyword_relevance),
            ("Section Structure", s.section_structure),
            ("Formatting", s.formatting),
            ("Experience Quality", s.experience_quality),
            ("Skills Match", s.skills_match),
            ("File Structure", s.file_structure),
        ] {
            output.push_str(&format!(
                "  {:<20} {:>3}/100 {}\n",
                name,
                value,
                self.format_score_badge(value)
            ));
        }

        output.push_str(&self.format_header("Section Feedback", 2));
        for feedback in &report.analysis.feedback {
            output.push_str(&format!(
                "  {} {} ({}/100)\n",
                self.status_icon(feedback.status),
                feedback.section,
                feedback.score
            ));
            for issue in &feedback.issues {
                output.push_str(&format!("      issue: {}\n", issue));
            }
            if self.detailed {
                for suggestion in &feedback.suggestions {
                    output.push_str(&format!("      tip: {}\n", suggestion));
                }
            }
        }

        output.push_str(&self.format_header("Keywords", 2));
        output.push_str(&format!(
            "  Found {} industry keywords (relevance {}%)\n",
            report.analysis.keywords.found.len(),
            report.analysis.keywords.relevance_score
        ));
        if !report.analysis.keywords.missing.is_empty() {
            output.push_str(&format!(
                "  Top missing: {}\n",
                report.analysis.keywords.missing.join(", ")
            ));
        }

        if !report.analysis.improvements.is_empty() {
            output.push_str(&self.format_header("Improvements", 2));
            for improvement in &report.analysis.improvements {
                output.push_str(&format!(
                    "  [{:?}] {}: {} — {}\n",
                    improvement.kind, improvement.section, improvement.issue, improvement.suggestion
                ));
            }
        }

        let enhanced = &report.enhanced;
        output.push_str(&self.format_header("ATS Flaws", 2));
        let critical = enhanced
            .flaws
            .iter()
            .filter(|f| f.category == FlawCategory::Critical)
            .count();
        let major = enhanced
            .flaws
            .iter()
            .filter(|f| f.category == FlawCategory::Major)
            .count();
        let minor = enhanced.flaws.len() - critical - major;
        output.push_str(&format!(
            "  {} critical, {} major, {} minor\n",
            critical, major, minor
        ));
        for flaw in &enhanced.flaws {
            output.push_str(&format!("  [{:?}] {}\n", flaw.category, flaw.title));
            if self.detailed {
                output.push_str(&format!("      {}\n", flaw.description));
                output.push_str(&format!("      Fix: {}\n", flaw.how_to_fix));
            }
        }

        output.push_str(&self.format_header("Approval Checklist", 2));
        for tip in &enhanced.approval_tips {
            let mark = if tip.implemented {
                self.colorize("[x]", Color::Green)
            } else {
                self.colorize("[ ]", Color::Red)
            };
            output.push_str(&format!("  {} {} — {}\n", mark, tip.category, tip.title));
        }

        output.push_str(&self.format_header("Readiness", 2));
        output.push_str(&format!(
            "  {}/100 ({})\n  {}\n",
            enhanced.readiness_score,
            readiness_label(enhanced.overall_readiness),
            enhanced.summary
        ));

        if let Some(job_match) = &report.job_match {
            output.push_str(&self.format_header("Job Match", 2));
            output.push_str(&format!(
                "  Match score: {}/100 (keywords {}%)\n",
                job_match.match_score, job_match.keyword_match.percentage
            ));
            output.push_str(&format!(
                "  Matched {} keywords, missing {}\n",
                job_match.keyword_match.matched.len(),
                job_match.keyword_match.missing.len()
            ));
            if !job_match.skill_gap.missing_skills.is_empty() {
                output.push_str(&format!(
                    "  Missing skills: {}\n",
                    job_match.skill_gap.missing_skills.join(", ")
                ));
            }
            for recommendation in &job_match.recommendations {
                output.push_str(&format!("  • {}\n", recommendation));
            }
            output.push_str(&format!(
                "  Improvement potential: +{}\n",
                job_match.improvement_potential
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# ATS Resume Analysis\n\n");
        output.push_str(&format!(
            "Source: `{}` · {} words · generated {}\n\n",
            report.metadata.source_file,
            report.metadata.word_count,
            report.metadata.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));

        output.push_str(&format!(
            "## Overall Score: {}/100 ({})\n\n",
            report.analysis.overall_score,
            score_label(report.analysis.overall_score)
        ));

        output.push_str("## Score Breakdown\n\n");
        output.push_str("| Component | Score |\n|---|---|\n");
        let s = &report.analysis.scores;
        for (name, value) in [
            ("Keyword Relevance", s.keyword_relevance),
            ("Section Structure", s.section_structure),
            ("Formatting", s.formatting),
            ("Experience Quality", s.experience_quality),
            ("Skills Match", s.skills_match),
            ("File Structure", s.file_structure),
        ] {
            output.push_str(&format!("| {} | {}/100 |\n", name, value));
        }
        output.push('\n');

        output.push_str("## Section Feedback\n\n");
        for feedback in &report.analysis.feedback {
            output.push_str(&format!(
                "### {} — {}/100\n\n",
                feedback.section, feedback.score
            ));
            for issue in &feedback.issues {
                output.push_str(&format!("- ⚠ {}\n", issue));
            }
            for suggestion in &feedback.suggestions {
                output.push_str(&format!("- 💡 {}\n", suggestion));
            }
            output.push('\n');
        }

        output.push_str(&format!(
            "## Readiness: {}/100 ({})\n\n{}\n\n",
            report.enhanced.readiness_score,
            readiness_label(report.enhanced.overall_readiness),
            report.enhanced.summary
        ));

        output.push_str("## Flaws\n\n");
        for flaw in &report.enhanced.flaws {
            output.push_str(&format!(
                "- **{:?}** — {}: {}\n",
                flaw.category, flaw.title, flaw.how_to_fix
            ));
        }
        output.push('\n');

        output.push_str("## Approval Checklist\n\n");
        for tip in &report.enhanced.approval_tips {
            let mark = if tip.implemented { "x" } else { " " };
            output.push_str(&format!("- [{}] {} — {}\n", mark, tip.category, tip.title));
        }
        output.push('\n');

        if let Some(job_match) = &report.job_match {
            output.push_str(&format!(
                "## Job Match: {}/100\n\n",
                job_match.match_score
            ));
            output.push_str(&format!(
                "- Keyword match: {}%\n- Missing skills: {}\n- Improvement potential: +{}\n\n",
                job_match.keyword_match.percentage,
                job_match.skill_gap.missing_skills.join(", "),
                job_match.improvement_potential
            ));
            output.push_str("### Recommendations\n\n");
            for recommendation in &job_match.recommendations {
                output.push_str(&format!("1. {}\n", recommendation));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    fn breakdown_html(report: &AnalysisReport) -> String {
        let s = &report.analysis.scores;
        let mut rows = String::from("<table><tr><th>Component</th><th>Score</th></tr>");
        for (name, value) in [
            ("Keyword Relevance", s.keyword_relevance),
            ("Section Structure", s.section_structure),
            ("Formatting", s.formatting),
            ("Experience Quality", s.experience_quality),
            ("Skills Match", s.skills_match),
            ("File Structure", s.file_structure),
        ] {
            rows.push_str(&format!("<tr><td>{}</td><td>{}/100</td></tr>", name, value));
        }
        rows.push_str("</table>");
        rows
    }

    fn flaws_html(report: &AnalysisReport) -> String {
        let mut html = String::new();
        for flaw in &report.enhanced.flaws {
            let class = match flaw.category {
                FlawCategory::Critical => "flaw-critical",
                FlawCategory::Major => "flaw-major",
                FlawCategory::Minor => "flaw-minor",
            };
            html.push_str(&format!(
                "<div class=\"{}\"><strong>{}</strong><br>{}<br><em>{}</em></div>",
                class,
                escape_html(&flaw.title),
                escape_html(&flaw.description),
                escape_html(&flaw.how_to_fix)
            ));
        }
        if html.is_empty() {
            html.push_str("<p>No flaws detected.</p>");
        }
        html
    }

    fn tips_html(report: &AnalysisReport) -> String {
        let mut html = String::from("<ul>");
        for tip in &report.enhanced.approval_tips {
            let mark = if tip.implemented { "✅" } else { "⬜" };
            html.push_str(&format!(
                "<li>{} <strong>{}</strong> — {}</li>",
                mark,
                escape_html(&tip.category),
                escape_html(&tip.title)
            ));
        }
        html.push_str("</ul>");
        html
    }

    fn job_match_html(report: &AnalysisReport) -> String {
        let Some(job_match) = &report.job_match else {
            return String::new();
        };

        let mut html = format!(
            "<h2>Job Match: {}/100</h2><p>Keyword match {}%, improvement potential +{}</p><ul>",
            job_match.match_score,
            job_match.keyword_match.percentage,
            job_match.improvement_potential
        );
        for recommendation in &job_match.recommendations {
            html.push_str(&format!("<li>{}</li>", escape_html(recommendation)));
        }
        html.push_str("</ul>");
        html
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let score = report.analysis.overall_score;
        let template = HtmlReportTemplate {
            overall_score: score,
            score_label: score_label(score).to_string(),
            score_color: match score {
                80..=100 => "#27ae60".to_string(),
                60..=79 => "#f39c12".to_string(),
                _ => "#c0392b".to_string(),
            },
            breakdown_html: Self::breakdown_html(report),
            readiness_score: report.enhanced.readiness_score,
            readiness_label: readiness_label(report.enhanced.overall_readiness).to_string(),
            summary: report.enhanced.summary.clone(),
            flaws_html: Self::flaws_html(report),
            tips_html: Self::tips_html(report),
            job_match_html: Self::job_match_html(report),
            generated_at: report
                .metadata
                .generated_at
                .format("%Y-%m-%d %H:%M UTC")
                .to_string(),
            source_file: report.metadata.source_file.clone(),
            word_count: report.metadata.word_count,
            version: report.metadata.version.clone(),
        };

        template
            .render()
            .map_err(|e| ResumeAtsError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter,
            html_formatter: HtmlFormatter,
        }
    }

    pub fn generate(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::AnalysisEngine;

    fn sample_report() -> AnalysisReport {
        let engine = AnalysisEngine::new();
        engine.analyze_with_job(
            "John Smith\njohn@x.com\n555-123-4567\nSKILLS\nPython, SQL, Docker\n",
            "Requirements:\n• Python\n",
            "resume.txt",
        )
    }

    #[test]
    fn test_console_format_contains_core_sections() {
        let report = sample_report();
        let formatter = ConsoleFormatter::new(false, true);

        let output = formatter.format_report(&report).unwrap();

        assert!(output.contains("ATS RESUME ANALYSIS"));
        assert!(output.contains("Score Breakdown"));
        assert!(output.contains("Approval Checklist"));
        assert!(output.contains("Job Match"));
    }

    #[test]
    fn test_json_format_roundtrips() {
        let report = sample_report();
        let formatter = JsonFormatter::new(true);

        let json = formatter.format_report(&report).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(parsed["analysis"]["overallScore"].is_number());
        assert!(parsed["enhanced"]["approvalTips"].as_array().unwrap().len() == 14);
        assert!(parsed["jobMatch"]["matchScore"].is_number());
    }

    #[test]
    fn test_markdown_format_has_tables() {
        let report = sample_report();
        let output = MarkdownFormatter.format_report(&report).unwrap();

        assert!(output.contains("| Component | Score |"));
        assert!(output.contains("## Readiness"));
    }

    #[test]
    fn test_html_format_renders() {
        let report = sample_report();
        let output = HtmlFormatter.format_report(&report).unwrap();

        assert!(output.starts_with("<!DOCTYPE html>"));
        assert!(output.contains("Score Breakdown"));
        assert!(output.contains("Approval Checklist"));
    }

    #[test]
    fn test_generator_dispatch() {
        let report = sample_report();
        let generator = ReportGenerator::new(false, false);

        for format in [
            OutputFormat::Console,
            OutputFormat::Json,
            OutputFormat::Markdown,
            OutputFormat::Html,
        ] {
            let output = generator.generate(&report, &format).unwrap();
            assert!(!output.is_empty());
        }
    }
}
