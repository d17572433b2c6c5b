//! Second-pass flaw analysis
//!
//! Runs after the scorer and turns its output plus the parsed sections
//! into categorized flaws (critical/major/minor), a fixed checklist of
//! approval tips, and an overall readiness verdict.

use crate::processing::parser::ParsedSections;
use crate::processing::scorer::{AnalysisResult, Severity};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Verbs whose presence in experience bullets signals impact.
const STRONG_VERBS: &[&str] = &[
    "led",
    "developed",
    "implemented",
    "achieved",
    "increased",
    "reduced",
    "designed",
    "built",
    "managed",
    "created",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsFlaw {
    pub category: FlawCategory,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub how_to_fix: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlawCategory {
    Critical,
    Major,
    Minor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsApprovalTip {
    pub category: String,
    pub title: String,
    pub description: String,
    pub priority: TipPriority,
    pub implemented: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedAnalysis {
    pub flaws: Vec<AtsFlaw>,
    pub approval_tips: Vec<AtsApprovalTip>,
    pub overall_readiness: OverallReadiness,
    pub readiness_score: u8,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallReadiness {
    Ready,
    NeedsWork,
    NotReady,
}

impl OverallReadiness {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => OverallReadiness::Ready,
            50..=79 => OverallReadiness::NeedsWork,
            _ => OverallReadiness::NotReady,
        }
    }
}

/// Flaw detection pass over the resume, its sections, and the scorer's
/// result.
pub struct FlawAnalyzer {
    quantified_regex: Regex,
}

impl Default for FlawAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl FlawAnalyzer {
    pub fn new() -> Self {
        let quantified_regex = Regex::new(
            r"(?i)\d+%|\$\d+|\d+\s*(?:users?|customers?|clients?|projects?|team members?)",
        )
        .expect("Invalid quantified regex");

        Self { quantified_regex }
    }

    /// Analyze the resume and produce flaws, approval tips, and an
    /// overall readiness verdict. Pure: the scorer's result is an input,
    /// never recomputed.
    pub fn analyze(
        &self,
        text: &str,
        sections: &ParsedSections,
        analysis: &AnalysisResult,
    ) -> EnhancedAnalysis {
        let flaws = self.detect_flaws(text, sections, analysis);
        let approval_tips = self.generate_approval_tips(text, sections, analysis);
        let readiness_score = calculate_readiness_score(&flaws, &approval_tips);

        EnhancedAnalysis {
            summary: generate_summary(&flaws, readiness_score),
            overall_readiness: OverallReadiness::from_score(readiness_score),
            readiness_score,
            flaws,
            approval_tips,
        }
    }

    /// Ordered list of independent conditionals, each appending at most
    /// one flaw per tier.
    fn detect_flaws(
        &self,
        text: &str,
        sections: &ParsedSections,
        analysis: &AnalysisResult,
    ) -> Vec<AtsFlaw> {
        let mut flaws = Vec::new();

        // Critical tier
        if sections.contact.email.is_none() {
            flaws.push(AtsFlaw {
                category: FlawCategory::Critical,
                title: "Missing Email Address".to_string(),
                description: "Your resume does not contain a visible email address.".to_string(),
                impact: "Recruiters cannot contact you, and ATS systems may reject your application."
                    .to_string(),
                how_to_fix: "Add your professional email address prominently at the top of your resume."
                    .to_string(),
                examples: vec![
                    "john.smith@email.com".to_string(),
                    "jane.doe@gmail.com".to_string(),
                ],
            });
        }

        if sections.contact.phone.is_none() {
            flaws.push(AtsFlaw {
                category: FlawCategory::Critical,
                title: "Missing Phone Number".to_string(),
                description: "No phone number detected in your resume.".to_string(),
                impact: "Limits recruiter's ability to reach you quickly.".to_string(),
                how_to_fix: "Include your phone number in the contact section.".to_string(),
                examples: vec![
                    "+1 (555) 123-4567".to_string(),
                    "555-123-4567".to_string(),
                ],
            });
        }

        if sections.experience.is_empty() {
            flaws.push(AtsFlaw {
                category: FlawCategory::Critical,
                title: "No Work Experience Section".to_string(),
                description: "Your resume lacks a work experience section.".to_string(),
                impact:
                    "ATS systems prioritize work experience. Without it, your resume may score very low."
                        .to_string(),
                how_to_fix:
                    "Add a clear \"Work Experience\" or \"Professional Experience\" section with your job history."
                        .to_string(),
                examples: vec![
                    "SOFTWARE ENGINEER | ABC Company | Jan 2020 - Present".to_string(),
                    "• Developed RESTful APIs serving 10,000+ daily users".to_string(),
                    "• Reduced deployment time by 40% through CI/CD implementation".to_string(),
                ],
            });
        }

        if sections.skills.is_empty() {
            flaws.push(AtsFlaw {
                category: FlawCategory::Critical,
                title: "No Skills Section".to_string(),
                description: "Skills section is missing from your resume.".to_string(),
                impact: "ATS systems match job keywords against skills. Missing skills = missing matches."
                    .to_string(),
                how_to_fix: "Create a dedicated \"Skills\" or \"Technical Skills\" section."
                    .to_string(),
                examples: vec![
                    "Programming: JavaScript, Python, Java".to_string(),
                    "Tools: Docker, AWS, Git".to_string(),
                ],
            });
        }

        // Major tier
        let word_count = text
            .split_whitespace()
            .filter(|w| w.chars().count() > 1)
            .count();
        if word_count < 100 {
            flaws.push(AtsFlaw {
                category: FlawCategory::Major,
                title: "Insufficient Text Content Detected".to_string(),
                description:
                    "Your resume has very little extractable text. This may indicate an image-heavy or graphical resume."
                        .to_string(),
                impact:
                    "ATS systems cannot read images or graphics. Your resume may appear blank to automated systems."
                        .to_string(),
                how_to_fix:
                    "Use a text-based resume format. Avoid graphics, images, logos, and complex layouts."
                        .to_string(),
                examples: vec![
                    "Use simple, clean layouts".to_string(),
                    "Stick to standard fonts like Arial, Calibri, or Times New Roman".to_string(),
                ],
            });
        }

        let has_quantified_achievements = sections.experience.iter().any(|exp| {
            exp.description
                .iter()
                .any(|desc| self.quantified_regex.is_match(desc))
        });
        if !has_quantified_achievements && !sections.experience.is_empty() {
            flaws.push(AtsFlaw {
                category: FlawCategory::Major,
                title: "No Quantified Achievements".to_string(),
                description: "Your experience bullets lack specific numbers and metrics."
                    .to_string(),
                impact: "Quantified achievements are 40% more likely to catch recruiter attention."
                    .to_string(),
                how_to_fix: "Add specific numbers, percentages, and metrics to your accomplishments."
                    .to_string(),
                examples: vec![
                    "❌ \"Improved sales performance\"".to_string(),
                    "✅ \"Increased sales by 35% within 6 months, generating $500K in new revenue\""
                        .to_string(),
                    "❌ \"Managed a team\"".to_string(),
                    "✅ \"Led a team of 8 engineers to deliver 3 major product releases\"".to_string(),
                ],
            });
        }

        if sections
            .summary
            .as_ref()
            .map(|s| s.chars().count() < 50)
            .unwrap_or(true)
        {
            flaws.push(AtsFlaw {
                category: FlawCategory::Major,
                title: "Missing or Weak Professional Summary".to_string(),
                description: "Your resume lacks a compelling professional summary.".to_string(),
                impact: "A strong summary helps both ATS and recruiters quickly understand your value."
                    .to_string(),
                how_to_fix:
                    "Add a 2-4 sentence summary highlighting your experience, key skills, and career goals."
                        .to_string(),
                examples: vec![
                    "Results-driven software engineer with 5+ years of experience in full-stack development. Proven track record of building scalable applications serving 1M+ users. Expertise in React, Node.js, and AWS."
                        .to_string(),
                ],
            });
        }

        let experience_text = sections
            .experience
            .iter()
            .map(|e| e.description.join(" "))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let strong_verb_count = STRONG_VERBS
            .iter()
            .filter(|verb| experience_text.contains(*verb))
            .count();
        if strong_verb_count < 3 && !sections.experience.is_empty() {
            flaws.push(AtsFlaw {
                category: FlawCategory::Major,
                title: "Weak Action Verbs".to_string(),
                description: "Your resume lacks strong action verbs that demonstrate impact."
                    .to_string(),
                impact: "Strong verbs improve ATS matching and make your achievements more compelling."
                    .to_string(),
                how_to_fix: "Start each bullet point with a powerful action verb.".to_string(),
                examples: vec![
                    "Strong verbs: Led, Developed, Implemented, Achieved, Increased, Reduced, Designed, Optimized, Spearheaded"
                        .to_string(),
                    "❌ \"Was responsible for managing...\"".to_string(),
                    "✅ \"Managed a portfolio of 20+ client accounts...\"".to_string(),
                ],
            });
        }

        // Minor tier
        if sections.contact.linkedin.is_none() {
            flaws.push(AtsFlaw {
                category: FlawCategory::Minor,
                title: "No LinkedIn Profile".to_string(),
                description: "LinkedIn URL is not included in your resume.".to_string(),
                impact: "Many recruiters check LinkedIn for additional information.".to_string(),
                how_to_fix: "Add your LinkedIn profile URL to your contact information.".to_string(),
                examples: vec!["linkedin.com/in/yourname".to_string()],
            });
        }

        if sections.education.is_empty() {
            flaws.push(AtsFlaw {
                category: FlawCategory::Minor,
                title: "Missing Education Section".to_string(),
                description: "No education information found.".to_string(),
                impact: "Some ATS systems and jobs require education verification.".to_string(),
                how_to_fix: "Add your educational background with degree, institution, and graduation date."
                    .to_string(),
                examples: vec!["Bachelor of Science in Computer Science | MIT | May 2020".to_string()],
            });
        }

        if sections.skills.len() < 5 {
            flaws.push(AtsFlaw {
                category: FlawCategory::Minor,
                title: "Insufficient Skills Listed".to_string(),
                description: format!(
                    "Only {} skills detected. This is below the recommended 10-15.",
                    sections.skills.len()
                ),
                impact: "Fewer skills mean fewer keyword matches with job descriptions.".to_string(),
                how_to_fix: "Add more relevant technical and soft skills.".to_string(),
                examples: vec![
                    "Aim for 10-15 key skills".to_string(),
                    "Include both hard skills (Python, SQL) and soft skills (Leadership, Communication)"
                        .to_string(),
                ],
            });
        }

        let high_severity: Vec<&str> = analysis
            .format_issues
            .iter()
            .filter(|i| i.severity == Severity::High)
            .map(|i| i.description.as_str())
            .collect();
        if !high_severity.is_empty() {
            flaws.push(AtsFlaw {
                category: FlawCategory::Major,
                title: "Formatting Issues Detected".to_string(),
                description: high_severity.join("; "),
                impact: "Poor formatting can cause ATS parsing errors.".to_string(),
                how_to_fix:
                    "Use a clean, single-column layout with standard fonts and no tables or graphics."
                        .to_string(),
                examples: Vec::new(),
            });
        }

        flaws
    }

    /// The fixed 14-entry approval checklist. Every analysis produces
    /// exactly these tips; only `implemented` varies.
    fn generate_approval_tips(
        &self,
        text: &str,
        sections: &ParsedSections,
        analysis: &AnalysisResult,
    ) -> Vec<AtsApprovalTip> {
        let mut tips = Vec::new();

        tips.push(AtsApprovalTip {
            category: "Contact Information".to_string(),
            title: "Include Complete Contact Details".to_string(),
            description: "Full name, email, phone number, LinkedIn, and location (city, state)"
                .to_string(),
            priority: TipPriority::High,
            implemented: sections.contact.email.is_some() && sections.contact.phone.is_some(),
        });

        tips.push(AtsApprovalTip {
            category: "Format".to_string(),
            title: "Use ATS-Friendly File Format".to_string(),
            description: "Save your resume as PDF or DOCX. Avoid images or scanned documents."
                .to_string(),
            priority: TipPriority::High,
            // The upload made it through the decoder, so the format held up.
            implemented: true,
        });

        tips.push(AtsApprovalTip {
            category: "Format".to_string(),
            title: "Use Standard Section Headers".to_string(),
            description:
                "Use clear headers like \"Work Experience\", \"Education\", \"Skills\" instead of creative alternatives."
                    .to_string(),
            priority: TipPriority::High,
            implemented: analysis.scores.section_structure >= 70,
        });

        tips.push(AtsApprovalTip {
            category: "Format".to_string(),
            title: "Avoid Tables, Graphics, and Images".to_string(),
            description: "ATS cannot read images. Use plain text and simple bullet points."
                .to_string(),
            priority: TipPriority::High,
            implemented: !analysis.format_issues.iter().any(|i| i.kind == "tables"),
        });

        tips.push(AtsApprovalTip {
            category: "Format".to_string(),
            title: "Use Standard Fonts".to_string(),
            description: "Stick to Arial, Calibri, Times New Roman, or similar readable fonts."
                .to_string(),
            priority: TipPriority::Medium,
            // Font choice is invisible in extracted text.
            implemented: true,
        });

        tips.push(AtsApprovalTip {
            category: "Keywords".to_string(),
            title: "Include Industry Keywords".to_string(),
            description: "Mirror keywords from the job description naturally throughout your resume."
                .to_string(),
            priority: TipPriority::High,
            implemented: analysis.scores.keyword_relevance >= 60,
        });

        tips.push(AtsApprovalTip {
            category: "Keywords".to_string(),
            title: "Use Both Acronyms and Full Terms".to_string(),
            description:
                "Include both \"SEO\" and \"Search Engine Optimization\" to match various ATS searches."
                    .to_string(),
            priority: TipPriority::Medium,
            implemented: analysis.keywords.found.len() >= 10,
        });

        tips.push(AtsApprovalTip {
            category: "Experience".to_string(),
            title: "Quantify Your Achievements".to_string(),
            description: "Use numbers, percentages, and dollar amounts to demonstrate impact."
                .to_string(),
            priority: TipPriority::High,
            implemented: analysis.scores.experience_quality >= 70,
        });

        tips.push(AtsApprovalTip {
            category: "Experience".to_string(),
            title: "Use Strong Action Verbs".to_string(),
            description: "Start bullets with verbs like Developed, Led, Implemented, Achieved, Increased."
                .to_string(),
            priority: TipPriority::High,
            implemented: analysis.scores.experience_quality >= 60,
        });

        tips.push(AtsApprovalTip {
            category: "Experience".to_string(),
            title: "Include Relevant Job Titles".to_string(),
            description: "Use industry-standard job titles that match what recruiters search for."
                .to_string(),
            priority: TipPriority::Medium,
            implemented: sections
                .experience
                .first()
                .map(|e| !e.title.is_empty())
                .unwrap_or(false),
        });

        tips.push(AtsApprovalTip {
            category: "Skills".to_string(),
            title: "Create a Dedicated Skills Section".to_string(),
            description: "List 10-15 relevant skills in a separate, clearly labeled section."
                .to_string(),
            priority: TipPriority::High,
            implemented: sections.skills.len() >= 5,
        });

        tips.push(AtsApprovalTip {
            category: "Skills".to_string(),
            title: "Include Both Hard and Soft Skills".to_string(),
            description: "Technical skills + soft skills like Leadership, Communication, Problem-solving."
                .to_string(),
            priority: TipPriority::Medium,
            implemented: sections.skills.len() >= 8,
        });

        tips.push(AtsApprovalTip {
            category: "Summary".to_string(),
            title: "Write a Targeted Professional Summary".to_string(),
            description:
                "2-4 sentences highlighting your experience level, key skills, and career objective."
                    .to_string(),
            priority: TipPriority::Medium,
            implemented: sections
                .summary
                .as_ref()
                .map(|s| s.chars().count() >= 100)
                .unwrap_or(false),
        });

        let word_count = text.split_whitespace().count();
        tips.push(AtsApprovalTip {
            category: "Length".to_string(),
            title: "Keep Resume to 1-2 Pages".to_string(),
            description: "Entry-level: 1 page. Experienced: 1-2 pages. Executives: up to 3 pages."
                .to_string(),
            priority: TipPriority::Medium,
            implemented: (300..=1200).contains(&word_count),
        });

        tips
    }
}

/// Readiness blends the flaw deductions (70%) with the implemented-tip
/// ratio (30%), clamped to [0, 100].
fn calculate_readiness_score(flaws: &[AtsFlaw], tips: &[AtsApprovalTip]) -> u8 {
    let mut score = 100.0f64;

    for flaw in flaws {
        score -= match flaw.category {
            FlawCategory::Critical => 15.0,
            FlawCategory::Major => 10.0,
            FlawCategory::Minor => 5.0,
        };
    }

    let implemented_count = tips.iter().filter(|t| t.implemented).count();
    let implemented_ratio = implemented_count as f64 / tips.len() as f64;
    let blended = (score * 0.7 + implemented_ratio * 100.0 * 0.3).round();

    blended.clamp(0.0, 100.0) as u8
}

fn generate_summary(flaws: &[AtsFlaw], score: u8) -> String {
    let critical_count = flaws
        .iter()
        .filter(|f| f.category == FlawCategory::Critical)
        .count();
    let major_count = flaws
        .iter()
        .filter(|f| f.category == FlawCategory::Major)
        .count();

    if score >= 80 {
        "Your resume is well-optimized for ATS systems. Focus on minor tweaks to achieve a perfect score."
            .to_string()
    } else if score >= 60 {
        format!(
            "Your resume has potential but needs improvements. Found {} critical and {} major issues to address.",
            critical_count, major_count
        )
    } else if score >= 40 {
        format!(
            "Your resume needs significant work to pass ATS systems. Address the {} critical issues first.",
            critical_count
        )
    } else {
        "Your resume is not ATS-ready. It may be rejected by automated systems. Please address all critical issues immediately."
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::parser::ResumeParser;
    use crate::processing::scorer::AtsScorer;

    fn analyze(text: &str) -> EnhancedAnalysis {
        let parser = ResumeParser::new();
        let scorer = AtsScorer::new();
        let flaw_analyzer = FlawAnalyzer::new();

        let sections = parser.extract_sections(text);
        let analysis = scorer.calculate_score(text, &sections);
        flaw_analyzer.analyze(text, &sections, &analysis)
    }

    #[test]
    fn test_readiness_tier_boundaries() {
        assert_eq!(OverallReadiness::from_score(80), OverallReadiness::Ready);
        assert_eq!(OverallReadiness::from_score(79), OverallReadiness::NeedsWork);
        assert_eq!(OverallReadiness::from_score(50), OverallReadiness::NeedsWork);
        assert_eq!(OverallReadiness::from_score(49), OverallReadiness::NotReady);
    }

    #[test]
    fn test_empty_resume_has_all_critical_flaws() {
        let enhanced = analyze("");
        let critical_titles: Vec<&str> = enhanced
            .flaws
            .iter()
            .filter(|f| f.category == FlawCategory::Critical)
            .map(|f| f.title.as_str())
            .collect();

        assert!(critical_titles.contains(&"Missing Email Address"));
        assert!(critical_titles.contains(&"Missing Phone Number"));
        assert!(critical_titles.contains(&"No Work Experience Section"));
        assert!(critical_titles.contains(&"No Skills Section"));
    }

    #[test]
    fn test_always_exactly_fourteen_tips() {
        for text in ["", "John Smith\njohn@x.com\n555-123-4567\n"] {
            let enhanced = analyze(text);
            assert_eq!(enhanced.approval_tips.len(), 14);
        }
    }

    #[test]
    fn test_readiness_score_bounded() {
        for text in ["", "a", "John Smith\njohn@x.com\n"] {
            let enhanced = analyze(text);
            assert!(enhanced.readiness_score <= 100);
        }
    }

    #[test]
    fn test_minimal_valid_resume_has_no_critical_flaws() {
        let text = "John Smith\njohn@x.com\n555-123-4567\nEXPERIENCE\nEngineer at Acme\nJan 2020 - Present\n• Increased throughput by 30%\nSKILLS\nPython, SQL, Leadership, Communication, Docker";
        let enhanced = analyze(text);

        assert!(enhanced
            .flaws
            .iter()
            .all(|f| f.category != FlawCategory::Critical));
    }

    #[test]
    fn test_quantified_flaw_omitted_when_bullets_have_numbers() {
        let parser = ResumeParser::new();
        let scorer = AtsScorer::new();
        let flaw_analyzer = FlawAnalyzer::new();

        let text = "EXPERIENCE\nSenior Engineer\nAcme Corp\nJan 2020 - Present\nx\n• Grew revenue by 25% year over year\n";
        let mut sections = parser.extract_sections(text);
        if let Some(exp) = sections.experience.first_mut() {
            exp.description
                .push("Grew revenue by 25% year over year".to_string());
        }
        let analysis = scorer.calculate_score(text, &sections);
        let enhanced = flaw_analyzer.analyze(text, &sections, &analysis);

        assert!(enhanced
            .flaws
            .iter()
            .all(|f| f.title != "No Quantified Achievements"));
    }

    #[test]
    fn test_summary_message_matches_tier() {
        let enhanced = analyze("");

        assert!(enhanced.readiness_score < 40);
        assert!(enhanced.summary.contains("not ATS-ready"));
    }

    #[test]
    fn test_high_severity_format_issue_becomes_major_flaw() {
        // Short text triggers the high-severity too_short format issue.
        let enhanced = analyze("tiny");

        assert!(enhanced
            .flaws
            .iter()
            .any(|f| f.category == FlawCategory::Major && f.title == "Formatting Issues Detected"));
    }
}
