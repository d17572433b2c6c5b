//! ATS compatibility scoring
//!
//! Computes six independent 0-100 sub-scores from the parsed sections
//! and raw text, combines them into a weighted overall score, and
//! produces per-section feedback, keyword analysis, an improvements
//! list, and format issues. Deterministic: identical input always
//! yields an identical result.

use crate::processing::parser::{ContactInfo, ParsedSections};
use chrono::Datelike;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Industry keyword dictionary. Order matters for the tie-break in
/// industry detection: see `detect_industry`.
const INDUSTRY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "general",
        &[
            "leadership",
            "management",
            "communication",
            "teamwork",
            "problem-solving",
            "analytical",
            "strategic",
            "organized",
            "detail-oriented",
            "results-driven",
            "innovative",
            "collaborative",
            "adaptable",
            "proactive",
            "motivated",
        ],
    ),
    (
        "tech",
        &[
            "software development",
            "agile",
            "scrum",
            "devops",
            "cloud computing",
            "microservices",
            "api",
            "database",
            "testing",
            "deployment",
            "scalability",
            "performance",
            "security",
            "automation",
            "integration",
            "full-stack",
            "frontend",
            "backend",
            "mobile development",
            "web development",
        ],
    ),
    (
        "business",
        &[
            "project management",
            "stakeholder",
            "roi",
            "kpi",
            "budget",
            "strategy",
            "operations",
            "process improvement",
            "client relations",
            "business development",
            "account management",
            "revenue growth",
        ],
    ),
    (
        "marketing",
        &[
            "seo",
            "sem",
            "social media",
            "content marketing",
            "brand management",
            "analytics",
            "campaign",
            "lead generation",
            "digital marketing",
            "email marketing",
            "conversion",
            "engagement",
        ],
    ),
    (
        "data",
        &[
            "data analysis",
            "machine learning",
            "statistics",
            "visualization",
            "python",
            "sql",
            "tableau",
            "power bi",
            "big data",
            "predictive modeling",
            "data mining",
            "etl",
            "reporting",
            "insights",
        ],
    ),
];

/// Action verbs that strengthen resume bullets.
pub(crate) const ACTION_VERBS: &[&str] = &[
    "achieved",
    "accomplished",
    "accelerated",
    "administered",
    "analyzed",
    "built",
    "created",
    "coordinated",
    "delivered",
    "designed",
    "developed",
    "directed",
    "enhanced",
    "established",
    "exceeded",
    "executed",
    "expanded",
    "generated",
    "implemented",
    "improved",
    "increased",
    "initiated",
    "innovated",
    "launched",
    "led",
    "managed",
    "negotiated",
    "optimized",
    "orchestrated",
    "pioneered",
    "produced",
    "reduced",
    "resolved",
    "revamped",
    "spearheaded",
    "streamlined",
    "strengthened",
    "transformed",
    "unified",
];

/// Weighted contribution of each sub-score to the overall score. The
/// weights sum to exactly 1.0.
pub const SCORE_WEIGHTS: ScoreWeights = ScoreWeights {
    keyword_relevance: 0.25,
    section_structure: 0.20,
    formatting: 0.15,
    experience_quality: 0.15,
    skills_match: 0.15,
    file_structure: 0.10,
};

#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    pub keyword_relevance: f64,
    pub section_structure: f64,
    pub formatting: f64,
    pub experience_quality: f64,
    pub skills_match: f64,
    pub file_structure: f64,
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.keyword_relevance
            + self.section_structure
            + self.formatting
            + self.experience_quality
            + self.skills_match
            + self.file_structure
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub keyword_relevance: u8,
    pub section_structure: u8,
    pub formatting: u8,
    pub experience_quality: u8,
    pub skills_match: u8,
    pub file_structure: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_score: u8,
    pub scores: ScoreBreakdown,
    pub feedback: Vec<SectionFeedback>,
    pub keywords: KeywordAnalysis,
    pub improvements: Vec<Improvement>,
    pub format_issues: Vec<FormatIssue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionFeedback {
    pub section: String,
    pub score: u8,
    pub status: FeedbackStatus,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    Good,
    Warning,
    Error,
}

impl FeedbackStatus {
    fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => FeedbackStatus::Good,
            50..=79 => FeedbackStatus::Warning,
            _ => FeedbackStatus::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAnalysis {
    pub found: Vec<String>,
    pub missing: Vec<String>,
    pub relevance_score: u8,
    pub industry_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Improvement {
    #[serde(rename = "type")]
    pub kind: ImprovementKind,
    pub section: String,
    pub issue: String,
    pub suggestion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImprovementKind {
    Critical,
    Major,
    Minor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatIssue {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

/// ATS scoring engine. Stateless; all regexes compile once at
/// construction.
pub struct AtsScorer {
    format_penalties: Vec<(Regex, i32)>,
    bullet_regex: Regex,
    quantified_regex: Regex,
    feedback_quantified_regex: Regex,
    hard_skill_regexes: Vec<Regex>,
    soft_skill_regex: Regex,
    header_regexes: Vec<Regex>,
    digit_regex: Regex,
    non_ascii_regex: Regex,
    table_regex: Regex,
    header_footer_regex: Regex,
    industry_tech_regex: Regex,
    industry_tech_stack_regex: Regex,
    industry_business_regex: Regex,
    industry_marketing_regex: Regex,
    industry_data_regex: Regex,
}

impl Default for AtsScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl AtsScorer {
    pub fn new() -> Self {
        let format_penalties = vec![
            (Regex::new(r"[^\x00-\x7F]").expect("Invalid non-ASCII regex"), 5),
            (Regex::new(r"\t{2,}").expect("Invalid tab regex"), 10),
            (Regex::new(r"\n{4,}").expect("Invalid blank line regex"), 10),
            (Regex::new(r"<[^>]+>").expect("Invalid HTML tag regex"), 15),
            (Regex::new(r"[│├└┤┬┴┼]").expect("Invalid box drawing regex"), 20),
            (Regex::new(r"\|{2,}").expect("Invalid pipe regex"), 10),
        ];

        let bullet_regex = Regex::new(r"[•\-*]\s+\w").expect("Invalid bullet regex");

        let quantified_regex =
            Regex::new(r"(?i)\d+%|\$\d+|\d+\s*(?:users?|customers?|clients?|projects?|team)")
                .expect("Invalid quantified regex");

        let feedback_quantified_regex =
            Regex::new(r"(?i)\d+%|\$\d+|\d+\s*(?:users?|customers?|projects?)")
                .expect("Invalid feedback quantified regex");

        let hard_skill_regexes = vec![
            Regex::new(
                r"(?i)javascript|python|java|c\+\+|typescript|react|angular|vue|node|sql|aws|azure|docker|kubernetes",
            )
            .expect("Invalid hard skill regex"),
            Regex::new(r"(?i)excel|powerpoint|photoshop|figma|tableau|salesforce|sap|oracle")
                .expect("Invalid hard skill regex"),
        ];

        let soft_skill_regex = Regex::new(
            r"(?i)leadership|communication|teamwork|problem.?solving|management|analytical|creative",
        )
        .expect("Invalid soft skill regex");

        let header_regexes = vec![
            Regex::new(r"(?i)\b(?:SUMMARY|PROFILE|OBJECTIVE)\b").expect("Invalid header regex"),
            Regex::new(r"(?i)\b(?:EXPERIENCE|WORK|EMPLOYMENT)\b").expect("Invalid header regex"),
            Regex::new(r"(?i)\b(?:EDUCATION|ACADEMIC)\b").expect("Invalid header regex"),
            Regex::new(r"(?i)\b(?:SKILLS|COMPETENCIES|EXPERTISE)\b").expect("Invalid header regex"),
        ];

        let digit_regex = Regex::new(r"\d").expect("Invalid digit regex");
        let non_ascii_regex = Regex::new(r"[^\x00-\x7F]").expect("Invalid non-ASCII regex");
        let table_regex = Regex::new(r"[│├└┤┬┴┼|]{2,}").expect("Invalid table regex");
        let header_footer_regex =
            Regex::new(r"page \d|^\d+$|confidential").expect("Invalid header/footer regex");

        let industry_tech_regex = Regex::new(r"software|developer|engineer|programming|code|api|database")
            .expect("Invalid industry regex");
        let industry_tech_stack_regex =
            Regex::new(r"javascript|python|java|react|node|aws|docker").expect("Invalid industry regex");
        let industry_business_regex =
            Regex::new(r"manager|director|executive|strategy|operations|business")
                .expect("Invalid industry regex");
        let industry_marketing_regex =
            Regex::new(r"marketing|brand|campaign|seo|social media|content")
                .expect("Invalid industry regex");
        let industry_data_regex =
            Regex::new(r"data|analyst|machine learning|statistics|visualization|python|sql")
                .expect("Invalid industry regex");

        Self {
            format_penalties,
            bullet_regex,
            quantified_regex,
            feedback_quantified_regex,
            hard_skill_regexes,
            soft_skill_regex,
            header_regexes,
            digit_regex,
            non_ascii_regex,
            table_regex,
            header_footer_regex,
            industry_tech_regex,
            industry_tech_stack_regex,
            industry_business_regex,
            industry_marketing_regex,
            industry_data_regex,
        }
    }

    /// Calculate the full ATS compatibility analysis. Total: always
    /// returns a complete result, even for empty input.
    pub fn calculate_score(&self, text: &str, sections: &ParsedSections) -> AnalysisResult {
        let scores = self.calculate_score_breakdown(text, sections);
        let overall_score = calculate_overall_score(&scores);
        let feedback = self.generate_feedback(sections, &scores);
        let keywords = self.analyze_keywords(text, sections);
        let improvements = self.generate_improvements(sections, &scores);
        let format_issues = self.check_formatting(text);

        AnalysisResult {
            overall_score,
            scores,
            feedback,
            keywords,
            improvements,
            format_issues,
        }
    }

    fn calculate_score_breakdown(&self, text: &str, sections: &ParsedSections) -> ScoreBreakdown {
        ScoreBreakdown {
            keyword_relevance: self.score_keyword_relevance(text),
            section_structure: self.score_section_structure(sections),
            formatting: self.score_formatting(text),
            experience_quality: self.score_experience_quality(sections),
            skills_match: self.score_skills_match(sections),
            file_structure: self.score_file_structure(text, sections),
        }
    }

    /// Keyword hits against the industry dictionary (up to 60 points)
    /// plus distinct action-verb hits against a 15-verb baseline (up to
    /// 40 points).
    fn score_keyword_relevance(&self, text: &str) -> u8 {
        let lower_text = text.to_lowercase();

        let mut total_keywords = 0usize;
        let mut found_keywords = 0usize;
        for (_, keywords) in INDUSTRY_KEYWORDS {
            for keyword in *keywords {
                total_keywords += 1;
                if lower_text.contains(keyword) {
                    found_keywords += 1;
                }
            }
        }

        let action_verb_count = ACTION_VERBS
            .iter()
            .filter(|verb| lower_text.contains(*verb))
            .count();

        let mut score = 0.0f64;

        let keyword_ratio = found_keywords as f64 / total_keywords.min(50) as f64;
        score += (keyword_ratio * 100.0).min(60.0);

        let action_verb_ratio = action_verb_count as f64 / 15.0;
        score += (action_verb_ratio * 40.0).min(40.0);

        score.min(100.0).round() as u8
    }

    /// 20 points per canonical section present, plus a small bonus for
    /// projects and certifications.
    fn score_section_structure(&self, sections: &ParsedSections) -> u8 {
        let mut score = 0.0f64;
        let section_points = 100.0 / 5.0;

        if sections.contact.email.is_some() || sections.contact.phone.is_some() {
            score += section_points;
        }
        if sections
            .summary
            .as_ref()
            .map(|s| s.chars().count() > 50)
            .unwrap_or(false)
        {
            score += section_points;
        }
        if !sections.experience.is_empty() {
            score += section_points;
        }
        if !sections.education.is_empty() {
            score += section_points;
        }
        if !sections.skills.is_empty() {
            score += section_points;
        }

        if !sections.projects.is_empty() {
            score += 5.0;
        }
        if !sections.certifications.is_empty() {
            score += 5.0;
        }

        score.min(100.0).round() as u8
    }

    /// Starts at 100 and deducts fixed penalties for pathological
    /// patterns that trip ATS parsers.
    fn score_formatting(&self, text: &str) -> u8 {
        let mut score = 100i32;

        for (pattern, penalty) in &self.format_penalties {
            if pattern.find_iter(text).count() > 3 {
                score -= penalty;
            }
        }

        let word_count = text.split_whitespace().count();
        if word_count < 200 {
            score -= 15;
        }
        if word_count > 1500 {
            score -= 10;
        }

        let bullet_points = self.bullet_regex.find_iter(text).count();
        if bullet_points >= 5 {
            score += 5;
        }
        if bullet_points >= 10 {
            score += 5;
        }

        score.clamp(0, 100) as u8
    }

    fn score_experience_quality(&self, sections: &ParsedSections) -> u8 {
        if sections.experience.is_empty() {
            return 20;
        }

        let experiences = &sections.experience;
        let mut score = (experiences.len() as i32 * 15).min(30);

        for exp in experiences {
            if exp.title.chars().count() > 2 {
                score += 5;
            }
            if exp.company.chars().count() > 2 {
                score += 5;
            }
            if exp.start_date.is_some() {
                score += 3;
            }
            if exp.end_date.is_some() || exp.current {
                score += 2;
            }

            if !exp.description.is_empty() {
                score += (exp.description.len() as i32 * 3).min(15);

                for bullet in &exp.description {
                    if self.quantified_regex.is_match(bullet) {
                        score += 5;
                    }
                    let first_word = bullet
                        .split_whitespace()
                        .next()
                        .map(|w| w.to_lowercase())
                        .unwrap_or_default();
                    if ACTION_VERBS.contains(&first_word.as_str()) {
                        score += 2;
                    }
                }
            }
        }

        score.min(100) as u8
    }

    fn score_skills_match(&self, sections: &ParsedSections) -> u8 {
        if sections.skills.is_empty() {
            return 20;
        }

        let skills = &sections.skills;
        let mut score = (skills.len() as i32 * 5).min(40);

        let mut hard_skills = 0;
        let mut soft_skills = 0;
        for skill in skills {
            for pattern in &self.hard_skill_regexes {
                if pattern.is_match(skill) {
                    hard_skills += 1;
                }
            }
            if self.soft_skill_regex.is_match(skill) {
                soft_skills += 1;
            }
        }

        if hard_skills >= 5 {
            score += 20;
        }
        if soft_skills >= 2 {
            score += 10;
        }
        if hard_skills >= 3 && soft_skills >= 2 {
            score += 10;
        }

        // Variety proxy: distinct first letters across the skill list.
        let categories: HashSet<char> = skills
            .iter()
            .filter_map(|s| s.chars().next())
            .flat_map(|c| c.to_lowercase())
            .collect();
        if categories.len() >= 5 {
            score += 10;
        }

        score.min(100) as u8
    }

    fn score_file_structure(&self, text: &str, sections: &ParsedSections) -> u8 {
        let mut score = 70i32;

        for header in &self.header_regexes {
            if header.is_match(text) {
                score += 5;
            }
        }

        if let Some(email) = &sections.contact.email {
            if let Some(index) = text.to_lowercase().find(email.as_str()) {
                if index < 500 {
                    score += 10;
                }
            }
        }

        if sections.contact.email.is_none() {
            score -= 10;
        }
        if sections.contact.phone.is_none() {
            score -= 5;
        }

        score.clamp(0, 100) as u8
    }

    /// Keyword analysis against the detected industry's dictionary.
    fn analyze_keywords(&self, text: &str, sections: &ParsedSections) -> KeywordAnalysis {
        let lower_text = text.to_lowercase();
        let industry = self.detect_industry(sections);
        let industry_list = INDUSTRY_KEYWORDS
            .iter()
            .find(|(name, _)| *name == industry)
            .map(|(_, list)| *list)
            .unwrap_or(INDUSTRY_KEYWORDS[0].1);

        let mut found = Vec::new();
        let mut missing = Vec::new();
        for keyword in industry_list {
            if lower_text.contains(keyword) {
                found.push((*keyword).to_string());
            } else {
                missing.push((*keyword).to_string());
            }
        }

        let relevance_score =
            ((found.len() as f64 / industry_list.len() as f64) * 100.0).round() as u8;

        missing.truncate(10);

        KeywordAnalysis {
            found,
            missing,
            relevance_score,
            industry_keywords: industry_list
                .iter()
                .take(20)
                .map(|k| (*k).to_string())
                .collect(),
        }
    }

    /// Infer the likely industry from skills and experience text. A later
    /// industry must strictly exceed the running maximum, so ties resolve
    /// to the earlier entry and the all-zero case resolves to "general".
    fn detect_industry(&self, sections: &ParsedSections) -> &'static str {
        let skills_text = sections.skills.join(" ").to_lowercase();
        let experience_text = sections
            .experience
            .iter()
            .map(|e| format!("{} {}", e.title, e.description.join(" ")))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let combined = format!("{} {}", skills_text, experience_text);

        let mut scores: [(&'static str, i32); 5] = [
            ("tech", 0),
            ("business", 0),
            ("marketing", 0),
            ("data", 0),
            ("general", 0),
        ];

        if self.industry_tech_regex.is_match(&combined) {
            scores[0].1 += 5;
        }
        if self.industry_tech_stack_regex.is_match(&combined) {
            scores[0].1 += 3;
        }
        if self.industry_business_regex.is_match(&combined) {
            scores[1].1 += 5;
        }
        if self.industry_marketing_regex.is_match(&combined) {
            scores[2].1 += 5;
        }
        if self.industry_data_regex.is_match(&combined) {
            scores[3].1 += 5;
        }

        let mut best = ("general", 0);
        for (industry, score) in scores {
            if score > best.1 {
                best = (industry, score);
            }
        }
        best.0
    }

    fn generate_feedback(
        &self,
        sections: &ParsedSections,
        scores: &ScoreBreakdown,
    ) -> Vec<SectionFeedback> {
        vec![
            self.contact_feedback(&sections.contact),
            self.summary_feedback(sections.summary.as_deref()),
            self.experience_feedback(sections, scores.experience_quality),
            self.education_feedback(sections),
            self.skills_feedback(sections, scores.skills_match),
        ]
    }

    fn contact_feedback(&self, contact: &ContactInfo) -> SectionFeedback {
        let mut issues = Vec::new();
        let mut suggestions = Vec::new();
        let mut score = 100i32;

        if contact.email.is_none() {
            issues.push("Email address is missing".to_string());
            suggestions.push("Add a professional email address".to_string());
            score -= 30;
        }

        if contact.phone.is_none() {
            issues.push("Phone number is missing".to_string());
            suggestions.push("Include a contact phone number".to_string());
            score -= 20;
        }

        if contact.linkedin.is_none() {
            suggestions.push("Add your LinkedIn profile URL".to_string());
            score -= 10;
        }

        if contact.name.is_none() {
            issues.push("Name not clearly identified".to_string());
            suggestions
                .push("Ensure your full name is prominently displayed at the top".to_string());
            score -= 20;
        }

        let score = score.max(0) as u8;
        SectionFeedback {
            section: "Contact Information".to_string(),
            score,
            status: FeedbackStatus::from_score(score),
            issues,
            suggestions,
        }
    }

    fn summary_feedback(&self, summary: Option<&str>) -> SectionFeedback {
        let mut issues = Vec::new();
        let mut suggestions = Vec::new();
        let mut score = 100i32;

        match summary {
            None => {
                issues.push("Professional summary is missing".to_string());
                suggestions.push(
                    "Add a 2-4 sentence professional summary highlighting your key qualifications"
                        .to_string(),
                );
                score = 20;
            }
            Some(summary) => {
                let length = summary.chars().count();
                if length < 100 {
                    issues.push("Summary is too short".to_string());
                    suggestions.push("Expand your summary to 100-300 words".to_string());
                    score -= 20;
                }
                if length > 500 {
                    issues.push("Summary is too long".to_string());
                    suggestions.push(
                        "Condense your summary to 100-300 words for better ATS parsing".to_string(),
                    );
                    score -= 15;
                }
                if !self.digit_regex.is_match(summary) {
                    suggestions.push(
                        "Add quantifiable achievements (e.g., \"10+ years experience\", \"managed $1M budget\")"
                            .to_string(),
                    );
                    score -= 10;
                }
            }
        }

        let score = score.max(0) as u8;
        SectionFeedback {
            section: "Professional Summary".to_string(),
            score,
            status: FeedbackStatus::from_score(score),
            issues,
            suggestions,
        }
    }

    fn experience_feedback(&self, sections: &ParsedSections, quality_score: u8) -> SectionFeedback {
        let mut issues = Vec::new();
        let mut suggestions = Vec::new();

        if sections.experience.is_empty() {
            issues.push("Work experience section is missing".to_string());
            suggestions.push(
                "Add your work experience with clear job titles, companies, dates, and achievements"
                    .to_string(),
            );
            return SectionFeedback {
                section: "Work Experience".to_string(),
                score: 20,
                status: FeedbackStatus::Error,
                issues,
                suggestions,
            };
        }

        let mut has_quantified_bullets = false;
        let mut total_bullets = 0usize;

        for exp in &sections.experience {
            if exp.title.is_empty() {
                issues.push("Job title missing for an experience entry".to_string());
            }
            if exp.company.is_empty() {
                issues.push("Company name missing for an experience entry".to_string());
            }
            if exp.start_date.is_none() && exp.end_date.is_none() {
                issues.push("Dates missing for an experience entry".to_string());
            }

            for bullet in &exp.description {
                total_bullets += 1;
                if self.feedback_quantified_regex.is_match(bullet) {
                    has_quantified_bullets = true;
                }
            }
        }

        if total_bullets < sections.experience.len() * 3 {
            suggestions.push(
                "Add more bullet points (3-5 per position) describing your achievements"
                    .to_string(),
            );
        }

        if !has_quantified_bullets {
            suggestions.push(
                "Quantify your achievements with numbers, percentages, or dollar amounts"
                    .to_string(),
            );
        }

        suggestions.push("Start each bullet point with a strong action verb".to_string());

        SectionFeedback {
            section: "Work Experience".to_string(),
            score: quality_score,
            status: FeedbackStatus::from_score(quality_score),
            issues,
            suggestions,
        }
    }

    fn education_feedback(&self, sections: &ParsedSections) -> SectionFeedback {
        let mut issues = Vec::new();
        let mut suggestions = Vec::new();
        let mut score = 100i32;

        if sections.education.is_empty() {
            issues.push("Education section is missing".to_string());
            suggestions.push(
                "Add your educational background including degree, institution, and graduation date"
                    .to_string(),
            );
            return SectionFeedback {
                section: "Education".to_string(),
                score: 30,
                status: FeedbackStatus::Error,
                issues,
                suggestions,
            };
        }

        for edu in &sections.education {
            if edu.degree.is_empty() {
                issues.push("Degree name is missing".to_string());
                score -= 15;
            }
            if edu.institution.is_empty() {
                issues.push("Institution name is missing".to_string());
                score -= 15;
            }
            if edu.graduation_date.is_none() {
                suggestions.push("Add graduation date or expected graduation date".to_string());
                score -= 5;
            }
        }

        let first = &sections.education[0];
        if first.gpa.is_none() {
            if let Some(graduation) = &first.graduation_date {
                if let Ok(year) = graduation.parse::<i32>() {
                    if chrono::Utc::now().year() - year < 3 {
                        suggestions.push(
                            "Consider adding your GPA if it's 3.5 or higher (for recent graduates)"
                                .to_string(),
                        );
                    }
                }
            }
        }

        let score = score.max(0) as u8;
        SectionFeedback {
            section: "Education".to_string(),
            score,
            status: FeedbackStatus::from_score(score),
            issues,
            suggestions,
        }
    }

    fn skills_feedback(&self, sections: &ParsedSections, skills_score: u8) -> SectionFeedback {
        let mut issues = Vec::new();
        let mut suggestions = Vec::new();
        let mut score = skills_score as i32;

        if sections.skills.is_empty() {
            issues.push("Skills section is missing".to_string());
            suggestions
                .push("Add a skills section with relevant technical and soft skills".to_string());
            return SectionFeedback {
                section: "Skills".to_string(),
                score: 20,
                status: FeedbackStatus::Error,
                issues,
                suggestions,
            };
        }

        if sections.skills.len() < 5 {
            issues.push("Skills section is too short".to_string());
            suggestions.push("Add more relevant skills (aim for 10-15 key skills)".to_string());
            score -= 10;
        }

        if sections.skills.len() > 30 {
            issues.push("Too many skills listed".to_string());
            suggestions.push("Focus on your top 15-20 most relevant skills".to_string());
            score -= 5;
        }

        suggestions.push(
            "Organize skills by category (e.g., Programming Languages, Tools, Soft Skills)"
                .to_string(),
        );

        let score = score.clamp(0, 100) as u8;
        SectionFeedback {
            section: "Skills".to_string(),
            score,
            status: FeedbackStatus::from_score(score),
            issues,
            suggestions,
        }
    }

    /// Fixed ordered checklist of conditional improvements; each
    /// condition independently appends one entry.
    fn generate_improvements(
        &self,
        sections: &ParsedSections,
        scores: &ScoreBreakdown,
    ) -> Vec<Improvement> {
        let mut improvements = Vec::new();

        if sections.contact.email.is_none() {
            improvements.push(Improvement {
                kind: ImprovementKind::Critical,
                section: "Contact".to_string(),
                issue: "Missing email address".to_string(),
                suggestion: "Add your professional email address at the top of your resume"
                    .to_string(),
                example: Some("john.doe@email.com".to_string()),
            });
        }

        if sections.experience.is_empty() {
            improvements.push(Improvement {
                kind: ImprovementKind::Critical,
                section: "Experience".to_string(),
                issue: "No work experience listed".to_string(),
                suggestion:
                    "Add your professional experience with job titles, companies, and achievements"
                        .to_string(),
                example: None,
            });
        }

        if scores.keyword_relevance < 50 {
            improvements.push(Improvement {
                kind: ImprovementKind::Major,
                section: "Keywords".to_string(),
                issue: "Low keyword relevance score".to_string(),
                suggestion:
                    "Include more industry-specific keywords and action verbs throughout your resume"
                        .to_string(),
                example: Some(
                    "Use terms like \"managed\", \"developed\", \"implemented\", \"increased\", \"reduced\""
                        .to_string(),
                ),
            });
        }

        if scores.experience_quality < 60 {
            improvements.push(Improvement {
                kind: ImprovementKind::Major,
                section: "Experience".to_string(),
                issue: "Weak experience descriptions".to_string(),
                suggestion: "Quantify your achievements with specific numbers and metrics"
                    .to_string(),
                example: Some(
                    "Changed \"Improved sales\" to \"Increased sales by 35% within 6 months\""
                        .to_string(),
                ),
            });
        }

        if sections
            .summary
            .as_ref()
            .map(|s| s.chars().count() < 100)
            .unwrap_or(true)
        {
            improvements.push(Improvement {
                kind: ImprovementKind::Minor,
                section: "Summary".to_string(),
                issue: "Missing or weak professional summary".to_string(),
                suggestion: "Add a compelling 2-4 sentence summary of your qualifications"
                    .to_string(),
                example: None,
            });
        }

        if sections.projects.is_empty() {
            improvements.push(Improvement {
                kind: ImprovementKind::Minor,
                section: "Projects".to_string(),
                issue: "No projects section".to_string(),
                suggestion: "Consider adding relevant projects to showcase your skills".to_string(),
                example: None,
            });
        }

        if scores.formatting < 70 {
            improvements.push(Improvement {
                kind: ImprovementKind::Minor,
                section: "Formatting".to_string(),
                issue: "Formatting issues detected".to_string(),
                suggestion: "Use consistent bullet points, avoid tables/graphics, use standard fonts"
                    .to_string(),
                example: None,
            });
        }

        improvements
    }

    /// Independent pattern checks for formatting problems.
    fn check_formatting(&self, text: &str) -> Vec<FormatIssue> {
        let mut issues = Vec::new();

        let special_chars = self.non_ascii_regex.find_iter(text).count();
        if special_chars > 10 {
            issues.push(FormatIssue {
                kind: "special_characters".to_string(),
                description:
                    "Resume contains special characters that may not parse correctly in ATS systems"
                        .to_string(),
                severity: Severity::Medium,
            });
        }

        if self.table_regex.is_match(text) {
            issues.push(FormatIssue {
                kind: "tables".to_string(),
                description: "Tables detected. ATS systems may not parse tabular data correctly"
                    .to_string(),
                severity: Severity::High,
            });
        }

        let lines: Vec<&str> = text.split('\n').collect();
        if lines.len() > 3 {
            let first_line = lines[0].to_lowercase();
            let last_line = lines[lines.len() - 1].to_lowercase();
            if self.header_footer_regex.is_match(&first_line)
                || self.header_footer_regex.is_match(&last_line)
            {
                issues.push(FormatIssue {
                    kind: "headers_footers".to_string(),
                    description: "Headers/footers detected. These may interfere with ATS parsing"
                        .to_string(),
                    severity: Severity::Low,
                });
            }
        }

        let word_count = text.split_whitespace().count();
        if word_count < 200 {
            issues.push(FormatIssue {
                kind: "too_short".to_string(),
                description: "Resume appears too short. Aim for 400-800 words for a strong resume"
                    .to_string(),
                severity: Severity::High,
            });
        } else if word_count > 1500 {
            issues.push(FormatIssue {
                kind: "too_long".to_string(),
                description: "Resume may be too long. Consider condensing to 1-2 pages".to_string(),
                severity: Severity::Medium,
            });
        }

        let all_caps_lines = lines
            .iter()
            .filter(|line| line.chars().count() > 20 && **line == line.to_uppercase())
            .count();
        if all_caps_lines > 5 {
            issues.push(FormatIssue {
                kind: "excessive_caps".to_string(),
                description: "Excessive use of all caps. Use title case for better readability"
                    .to_string(),
                severity: Severity::Low,
            });
        }

        issues
    }
}

/// Weighted overall score from the six sub-scores.
pub fn calculate_overall_score(scores: &ScoreBreakdown) -> u8 {
    let w = SCORE_WEIGHTS;
    let total = scores.keyword_relevance as f64 * w.keyword_relevance
        + scores.section_structure as f64 * w.section_structure
        + scores.formatting as f64 * w.formatting
        + scores.experience_quality as f64 * w.experience_quality
        + scores.skills_match as f64 * w.skills_match
        + scores.file_structure as f64 * w.file_structure;

    total.round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::parser::ResumeParser;

    fn scorer() -> AtsScorer {
        AtsScorer::new()
    }

    fn analyzed(text: &str) -> AnalysisResult {
        let sections = ResumeParser::new().extract_sections(text);
        scorer().calculate_score(text, &sections)
    }

    #[test]
    fn test_weights_sum_to_one() {
        assert!((SCORE_WEIGHTS.sum() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overall_score_reproducible() {
        let scores = ScoreBreakdown {
            keyword_relevance: 80,
            section_structure: 80,
            formatting: 80,
            experience_quality: 80,
            skills_match: 80,
            file_structure: 80,
        };

        assert_eq!(calculate_overall_score(&scores), 80);
    }

    #[test]
    fn test_empty_resume_scores_low() {
        let result = analyzed("");

        assert!(result.overall_score <= 35);
        assert_eq!(result.scores.keyword_relevance, 0);
        assert_eq!(result.scores.section_structure, 0);
        assert_eq!(result.scores.experience_quality, 20);
        assert_eq!(result.scores.skills_match, 20);
    }

    #[test]
    fn test_all_scores_bounded() {
        let long = "word ".repeat(2000);
        let texts = [
            "",
            "short",
            "EXPERIENCE\nEngineer at Acme\nJan 2020 - Present\n• Increased revenue by 30%\n",
            long.as_str(),
        ];

        for text in texts {
            let result = analyzed(text);
            let s = &result.scores;
            for value in [
                result.overall_score,
                s.keyword_relevance,
                s.section_structure,
                s.formatting,
                s.experience_quality,
                s.skills_match,
                s.file_structure,
            ] {
                assert!(value <= 100, "score {} out of bounds for {:?}", value, &text[..text.len().min(30)]);
            }
        }
    }

    #[test]
    fn test_idempotence() {
        let text = "John Smith\njohn@x.com\n555-123-4567\nSKILLS\nPython, SQL, Docker\n";
        let sections = ResumeParser::new().extract_sections(text);
        let scorer = scorer();

        let first = scorer.calculate_score(text, &sections);
        let second = scorer.calculate_score(text, &sections);

        assert_eq!(first, second);
    }

    #[test]
    fn test_adding_email_never_decreases_structure_scores() {
        let text = "SKILLS\nPython, SQL\n";
        let parser = ResumeParser::new();
        let scorer = scorer();

        let mut without = parser.extract_sections(text);
        without.contact.email = None;
        let base = scorer.calculate_score(text, &without);

        let mut with = without.clone();
        with.contact.email = Some("jane@example.com".to_string());
        let improved = scorer.calculate_score(text, &with);

        assert!(improved.scores.section_structure >= base.scores.section_structure);
        assert!(improved.scores.file_structure >= base.scores.file_structure);
    }

    #[test]
    fn test_quantified_bullet_never_decreases_experience_quality() {
        let parser = ResumeParser::new();
        let scorer = scorer();
        let text = "EXPERIENCE\nEngineer\nAcme Corp\nJan 2020 - Present\n• Maintained internal tooling for the team\n";

        let sections = parser.extract_sections(text);
        let base = scorer.calculate_score(text, &sections);

        let mut more = sections.clone();
        if let Some(exp) = more.experience.first_mut() {
            exp.description
                .push("Increased deployment frequency by 40%".to_string());
        }
        let improved = scorer.calculate_score(text, &more);

        assert!(improved.scores.experience_quality >= base.scores.experience_quality);
    }

    #[test]
    fn test_formatting_penalties() {
        let scorer = scorer();
        let clean = "a ".repeat(300);
        let tabby = format!("{}\t\tx\t\ty\t\tz\t\tw\t\tv", "a ".repeat(300));

        let clean_score = scorer.score_formatting(&clean);
        let tabby_score = scorer.score_formatting(&tabby);

        assert!(tabby_score < clean_score);
    }

    #[test]
    fn test_industry_detection_defaults_to_general() {
        let result = analyzed("");

        assert_eq!(
            result.keywords.industry_keywords.len(),
            INDUSTRY_KEYWORDS[0].1.len().min(20)
        );
    }

    #[test]
    fn test_industry_detection_prefers_tech() {
        let text = "SKILLS\nPython, Docker, AWS\nEXPERIENCE\nSoftware Engineer\nAcme Corp\nJan 2020 - Present\n• Developed backend api services in python\n";
        let result = analyzed(text);

        // Tech list leads with "software development"
        assert!(result
            .keywords
            .industry_keywords
            .iter()
            .any(|k| k == "software development"));
    }

    #[test]
    fn test_missing_keywords_truncated() {
        let result = analyzed("");

        assert!(result.keywords.missing.len() <= 10);
        assert!(result.keywords.industry_keywords.len() <= 20);
    }

    #[test]
    fn test_feedback_covers_five_sections() {
        let result = analyzed("");
        let names: Vec<&str> = result.feedback.iter().map(|f| f.section.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "Contact Information",
                "Professional Summary",
                "Work Experience",
                "Education",
                "Skills"
            ]
        );
    }

    #[test]
    fn test_feedback_status_thresholds() {
        assert_eq!(FeedbackStatus::from_score(80), FeedbackStatus::Good);
        assert_eq!(FeedbackStatus::from_score(79), FeedbackStatus::Warning);
        assert_eq!(FeedbackStatus::from_score(50), FeedbackStatus::Warning);
        assert_eq!(FeedbackStatus::from_score(49), FeedbackStatus::Error);
    }

    #[test]
    fn test_empty_resume_improvements_include_criticals() {
        let result = analyzed("");

        assert!(result
            .improvements
            .iter()
            .any(|i| i.kind == ImprovementKind::Critical && i.issue == "Missing email address"));
        assert!(result
            .improvements
            .iter()
            .any(|i| i.kind == ImprovementKind::Critical && i.issue == "No work experience listed"));
    }

    #[test]
    fn test_short_resume_flags_too_short() {
        let result = analyzed("tiny resume");

        assert!(result
            .format_issues
            .iter()
            .any(|i| i.kind == "too_short" && i.severity == Severity::High));
    }

    #[test]
    fn test_table_characters_flagged_high() {
        let text = "Name │├ stuff ┼┤ more\n│├└┤\n";
        let scorer = scorer();
        let issues = scorer.check_formatting(text);

        assert!(issues
            .iter()
            .any(|i| i.kind == "tables" && i.severity == Severity::High));
    }
}
