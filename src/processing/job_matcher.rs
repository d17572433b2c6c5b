//! Job description matching
//!
//! Extracts keywords and required skills from a job description,
//! compares them against the resume, and reports the match score, gap
//! lists, and recommendations. Keyword matching is a bidirectional
//! substring test: a pair matches when either term contains the other.

use crate::processing::parser::ParsedSections;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Soft skills looked up verbatim in the job description.
const SOFT_SKILLS: &[&str] = &[
    "leadership",
    "communication",
    "teamwork",
    "problem-solving",
    "analytical",
    "management",
    "collaboration",
    "creative",
    "detail-oriented",
    "self-motivated",
];

/// Role-specific terms looked up verbatim in the job description.
const ROLE_TERMS: &[&str] = &[
    "full-stack",
    "frontend",
    "backend",
    "devops",
    "data engineer",
    "ml engineer",
    "product manager",
    "project manager",
    "business analyst",
    "qa engineer",
    "senior",
    "lead",
    "principal",
    "architect",
    "manager",
    "director",
];

/// Technology terms looked up verbatim in the resume text.
const RESUME_COMMON_TERMS: &[&str] = &[
    "javascript",
    "typescript",
    "python",
    "java",
    "react",
    "angular",
    "vue",
    "node",
    "express",
    "mongodb",
    "postgresql",
    "aws",
    "azure",
    "docker",
    "kubernetes",
    "agile",
    "scrum",
    "ci/cd",
    "git",
];

/// Skills commonly required by job descriptions, looked up verbatim.
const COMMON_REQUIRED_SKILLS: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "C++",
    "Go",
    "Rust",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Express",
    "Django",
    "Spring",
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "Git",
    "SQL",
    "MongoDB",
    "PostgreSQL",
    "Redis",
    "Agile",
    "Scrum",
    "CI/CD",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatchResult {
    pub match_score: u8,
    pub keyword_match: KeywordMatch,
    pub skill_gap: SkillGap,
    pub recommendations: Vec<String>,
    pub improvement_potential: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMatch {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGap {
    pub required_skills: Vec<String>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub additional_skills: Vec<String>,
}

/// Job description matcher. Stateless; regexes compile once.
pub struct JobMatcher {
    technical_patterns: Vec<Regex>,
    experience_req_regex: Regex,
    quoted_regex: Regex,
    tech_token_regex: Regex,
    requirement_section_regexes: Vec<Regex>,
    bullet_item_regex: Regex,
    skill_phrase_regex: Regex,
}

impl Default for JobMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl JobMatcher {
    pub fn new() -> Self {
        let technical_patterns = vec![
            Regex::new(r"(?i)\b(?:javascript|typescript|python|java|c\+\+|c#|ruby|go|rust|php|swift|kotlin)\b")
                .expect("Invalid technical pattern"),
            Regex::new(r"(?i)\b(?:react|angular|vue|node\.?js|express|django|flask|spring|rails|\.net)\b")
                .expect("Invalid technical pattern"),
            Regex::new(r"(?i)\b(?:aws|azure|gcp|docker|kubernetes|jenkins|ci/cd|git|github|gitlab)\b")
                .expect("Invalid technical pattern"),
            Regex::new(r"(?i)\b(?:mongodb|postgresql|mysql|redis|elasticsearch|graphql|rest\s*api)\b")
                .expect("Invalid technical pattern"),
            Regex::new(r"(?i)\b(?:html|css|sass|tailwind|bootstrap|material\s*ui)\b")
                .expect("Invalid technical pattern"),
            Regex::new(r"(?i)\b(?:machine\s*learning|deep\s*learning|tensorflow|pytorch|data\s*science)\b")
                .expect("Invalid technical pattern"),
            Regex::new(r"(?i)\b(?:agile|scrum|kanban|jira|confluence)\b")
                .expect("Invalid technical pattern"),
        ];

        let experience_req_regex = Regex::new(r"(?i)(\d+)\+?\s*years?\s*(?:of\s*)?experience")
            .expect("Invalid experience regex");

        let quoted_regex = Regex::new(r#""([^"]+)""#).expect("Invalid quoted regex");

        let tech_token_regex =
            Regex::new(r"\b[A-Z][a-z]*(?:\.[a-z]+)*\b").expect("Invalid tech token regex");

        // The requirements block runs from its header to the next known
        // job-posting header (or a trailing-whitespace end of document).
        let requirement_section_regexes = vec![
            Regex::new(
                r"(?i)requirements?:?\s*\n([\s\S]*?)(?:\n\s*(?:responsibilities|qualifications|benefits|about)|\n\s*\z)",
            )
            .expect("Invalid requirements regex"),
            Regex::new(
                r"(?i)qualifications?:?\s*\n([\s\S]*?)(?:\n\s*(?:responsibilities|requirements|benefits|about)|\n\s*\z)",
            )
            .expect("Invalid qualifications regex"),
            Regex::new(
                r"(?i)must\s*have:?\s*\n([\s\S]*?)(?:\n\s*(?:nice|good|responsibilities)|\n\s*\z)",
            )
            .expect("Invalid must-have regex"),
        ];

        let bullet_item_regex = Regex::new(r"[•\-*]\s*[^\n]+").expect("Invalid bullet item regex");

        let skill_phrase_regex =
            Regex::new(r"\b[A-Z][a-zA-Z+#.]+(?:\s+[A-Z][a-zA-Z+#.]+)?\b")
                .expect("Invalid skill phrase regex");

        Self {
            technical_patterns,
            experience_req_regex,
            quoted_regex,
            tech_token_regex,
            requirement_section_regexes,
            bullet_item_regex,
            skill_phrase_regex,
        }
    }

    /// Match a resume against a job description. Pure; empty inputs
    /// yield an empty-but-complete result.
    pub fn match_job_description(
        &self,
        resume_text: &str,
        resume_sections: &ParsedSections,
        job_description: &str,
    ) -> JobMatchResult {
        let job_keywords = self.extract_job_keywords(job_description);
        let resume_keywords = self.extract_resume_keywords(resume_text, resume_sections);

        let keyword_match = calculate_keyword_match(&job_keywords, &resume_keywords);
        let skill_gap = self.analyze_skill_gap(job_description, resume_sections);
        let match_score = calculate_match_score(&keyword_match, &skill_gap);
        let recommendations =
            self.generate_recommendations(&keyword_match, &skill_gap, job_description);
        let improvement_potential =
            calculate_improvement_potential(match_score, &keyword_match, &skill_gap);

        JobMatchResult {
            match_score,
            keyword_match,
            skill_gap,
            recommendations,
            improvement_potential,
        }
    }

    /// Union of technical-pattern matches, experience-requirement
    /// phrases, soft skills, role terms, and quoted phrases. All
    /// lowercased and deduplicated in insertion order.
    fn extract_job_keywords(&self, job_description: &str) -> Vec<String> {
        let mut keywords = Vec::new();
        let mut seen = HashSet::new();
        let lower_text = job_description.to_lowercase();

        let mut add = |keywords: &mut Vec<String>, keyword: String| {
            if seen.insert(keyword.clone()) {
                keywords.push(keyword);
            }
        };

        for pattern in &self.technical_patterns {
            for m in pattern.find_iter(job_description) {
                add(&mut keywords, m.as_str().to_lowercase());
            }
        }

        for m in self.experience_req_regex.find_iter(job_description) {
            add(&mut keywords, m.as_str().to_lowercase());
        }

        for skill in SOFT_SKILLS {
            if lower_text.contains(skill) {
                add(&mut keywords, (*skill).to_string());
            }
        }

        for term in ROLE_TERMS {
            if lower_text.contains(term) {
                add(&mut keywords, (*term).to_string());
            }
        }

        for caps in self.quoted_regex.captures_iter(job_description) {
            let cleaned = caps[1].to_lowercase();
            let length = cleaned.chars().count();
            if length > 2 && length < 50 {
                add(&mut keywords, cleaned);
            }
        }

        keywords
    }

    /// Union of resume skills, job titles, capitalized tokens from
    /// experience bullets, and common technology terms.
    fn extract_resume_keywords(&self, text: &str, sections: &ParsedSections) -> Vec<String> {
        let mut keywords = Vec::new();
        let mut seen = HashSet::new();
        let lower_text = text.to_lowercase();

        let mut add = |keywords: &mut Vec<String>, keyword: String| {
            if seen.insert(keyword.clone()) {
                keywords.push(keyword);
            }
        };

        for skill in &sections.skills {
            add(&mut keywords, skill.to_lowercase());
        }

        for exp in &sections.experience {
            if !exp.title.is_empty() {
                add(&mut keywords, exp.title.to_lowercase());
            }

            for desc in &exp.description {
                for m in self.tech_token_regex.find_iter(desc) {
                    add(&mut keywords, m.as_str().to_lowercase());
                }
            }
        }

        for term in RESUME_COMMON_TERMS {
            if lower_text.contains(term) {
                add(&mut keywords, (*term).to_string());
            }
        }

        keywords
    }

    /// Required skills from the requirements block's bullet items plus
    /// well-known skills mentioned anywhere, capped at 30 entries.
    fn extract_required_skills(&self, job_description: &str) -> Vec<String> {
        let mut skills = Vec::new();
        let mut seen = HashSet::new();
        let lower_text = job_description.to_lowercase();

        let requirements_text = self
            .requirement_section_regexes
            .iter()
            .find_map(|re| {
                re.captures(job_description)
                    .and_then(|caps| caps.get(1))
                    .map(|m| m.as_str().to_string())
            })
            .unwrap_or_else(|| job_description.to_string());

        for item in self.bullet_item_regex.find_iter(&requirements_text) {
            for phrase in self.skill_phrase_regex.find_iter(item.as_str()) {
                let skill = phrase.as_str();
                let length = skill.chars().count();
                if (2..=30).contains(&length) && seen.insert(skill.to_string()) {
                    skills.push(skill.to_string());
                }
            }
        }

        for skill in COMMON_REQUIRED_SKILLS {
            if lower_text.contains(&skill.to_lowercase()) && seen.insert((*skill).to_string()) {
                skills.push((*skill).to_string());
            }
        }

        skills.truncate(30);
        skills
    }

    fn analyze_skill_gap(&self, job_description: &str, sections: &ParsedSections) -> SkillGap {
        let required_skills = self.extract_required_skills(job_description);
        let resume_skills: Vec<String> =
            sections.skills.iter().map(|s| s.to_lowercase()).collect();

        let mut matched_skills = Vec::new();
        let mut missing_skills = Vec::new();

        for skill in &required_skills {
            let lower = skill.to_lowercase();
            let found = resume_skills
                .iter()
                .any(|rs| rs.contains(&lower) || lower.contains(rs.as_str()));
            if found {
                matched_skills.push(skill.clone());
            } else {
                missing_skills.push(skill.clone());
            }
        }

        let required_lower: Vec<String> =
            required_skills.iter().map(|s| s.to_lowercase()).collect();
        let additional_skills: Vec<String> = resume_skills
            .iter()
            .filter(|skill| {
                !required_lower
                    .iter()
                    .any(|r| r.contains(skill.as_str()) || skill.contains(r.as_str()))
            })
            .cloned()
            .collect();

        SkillGap {
            required_skills,
            matched_skills,
            missing_skills,
            additional_skills,
        }
    }

    fn generate_recommendations(
        &self,
        keyword_match: &KeywordMatch,
        skill_gap: &SkillGap,
        job_description: &str,
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        if !keyword_match.missing.is_empty() {
            let top_missing = keyword_match
                .missing
                .iter()
                .take(5)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            recommendations.push(format!(
                "Add these missing keywords to your resume: {}",
                top_missing
            ));
        }

        if !skill_gap.missing_skills.is_empty() {
            let top_missing_skills = skill_gap
                .missing_skills
                .iter()
                .take(5)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            recommendations.push(format!(
                "Consider adding these skills to your resume: {}",
                top_missing_skills
            ));
        }

        if let Some(caps) = self.experience_req_regex.captures(job_description) {
            recommendations.push(format!(
                "This role requires {}+ years of experience. Ensure your resume clearly shows relevant experience duration.",
                &caps[1]
            ));
        }

        if keyword_match.percentage < 50 {
            recommendations.push(
                "Your resume has less than 50% keyword match. Tailor your resume more closely to this job description."
                    .to_string(),
            );
        }

        if skill_gap.additional_skills.len() > 5 {
            recommendations.push(
                "You have many additional skills not mentioned in the job description. Consider highlighting the most relevant ones."
                    .to_string(),
            );
        }

        if recommendations.is_empty() {
            recommendations.push(
                "Your resume is a good match! Consider adding specific achievements that align with the job responsibilities."
                    .to_string(),
            );
        }

        recommendations
    }
}

/// Bidirectional substring test used for every keyword pair:
/// `is_matched(a, b)` holds when either contains the other, so the test
/// is symmetric by construction.
pub fn is_keyword_matched(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

fn calculate_keyword_match(job_keywords: &[String], resume_keywords: &[String]) -> KeywordMatch {
    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for keyword in job_keywords {
        let is_matched = resume_keywords
            .iter()
            .any(|rk| is_keyword_matched(rk, keyword));
        if is_matched {
            matched.push(keyword.clone());
        } else {
            missing.push(keyword.clone());
        }
    }

    let percentage = if job_keywords.is_empty() {
        0
    } else {
        ((matched.len() as f64 / job_keywords.len() as f64) * 100.0).round() as u8
    };

    KeywordMatch {
        matched,
        missing,
        percentage,
    }
}

/// Keyword match carries 60% of the score, skill match the other 40%.
fn calculate_match_score(keyword_match: &KeywordMatch, skill_gap: &SkillGap) -> u8 {
    let keyword_score = keyword_match.percentage as f64 * 0.6;

    let skill_match_ratio = if skill_gap.required_skills.is_empty() {
        0.0
    } else {
        skill_gap.matched_skills.len() as f64 / skill_gap.required_skills.len() as f64
    };
    let skill_score = skill_match_ratio * 40.0;

    (keyword_score + skill_score).round() as u8
}

/// Headroom if every gap were closed, capped so the potential plus the
/// current score never exceeds 100.
fn calculate_improvement_potential(
    match_score: u8,
    keyword_match: &KeywordMatch,
    skill_gap: &SkillGap,
) -> u8 {
    let potential_keyword_improvement = keyword_match.missing.len() as i32 * 2;
    let potential_skill_improvement = skill_gap.missing_skills.len() as i32 * 3;

    let potential_score =
        (match_score as i32 + potential_keyword_improvement + potential_skill_improvement).min(100);

    (potential_score - match_score as i32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::parser::{ParsedSections, ResumeParser};

    fn matcher() -> JobMatcher {
        JobMatcher::new()
    }

    fn sections_with_skills(skills: &[&str]) -> ParsedSections {
        ParsedSections {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_bidirectional_substring_law() {
        let pairs = [
            ("java", "javascript"),
            ("react", "react"),
            ("docker", "kubernetes"),
            ("sql", "postgresql"),
        ];

        for (a, b) in pairs {
            assert_eq!(is_keyword_matched(a, b), is_keyword_matched(b, a));
            assert_eq!(is_keyword_matched(a, b), a.contains(b) || b.contains(a));
        }
    }

    #[test]
    fn test_job_keyword_extraction() {
        let matcher = matcher();
        let jd = "We are hiring a senior backend engineer.\nRequirements:\n• 5+ years experience with Python and Django\n• Docker and Kubernetes\n• Strong communication skills\n";

        let keywords = matcher.extract_job_keywords(jd);

        assert!(keywords.contains(&"python".to_string()));
        assert!(keywords.contains(&"django".to_string()));
        assert!(keywords.contains(&"docker".to_string()));
        assert!(keywords.contains(&"communication".to_string()));
        assert!(keywords.contains(&"senior".to_string()));
        assert!(keywords.iter().any(|k| k.contains("5+ years experience")));
    }

    #[test]
    fn test_no_overlap_yields_low_match() {
        let matcher = matcher();
        let sections = sections_with_skills(&["Python"]);
        let jd = "Requirements:\n• Expert Java skills\n• Kubernetes in production\n";

        let result = matcher.match_job_description("Python", &sections, jd);

        assert!(result.keyword_match.percentage < 25);
        assert!(result
            .skill_gap
            .missing_skills
            .iter()
            .any(|s| s.to_lowercase() == "java"));
        assert!(result
            .skill_gap
            .missing_skills
            .iter()
            .any(|s| s.to_lowercase() == "kubernetes"));
        assert!(result.match_score < 50);
        assert!(result.improvement_potential > 0);
        assert!(result.match_score as u16 + result.improvement_potential as u16 <= 100);
    }

    #[test]
    fn test_perfect_overlap_yields_full_percentage() {
        let matcher = matcher();
        let resume_text = "Experienced with python, django, docker and kubernetes.";
        let parser = ResumeParser::new();
        let sections = parser.extract_sections(resume_text);
        let jd = "python django docker kubernetes";

        let result = matcher.match_job_description(resume_text, &sections, jd);

        assert_eq!(result.keyword_match.percentage, 100);
        assert!(result.keyword_match.missing.is_empty());
    }

    #[test]
    fn test_empty_job_description() {
        let matcher = matcher();
        let sections = sections_with_skills(&["Python"]);

        let result = matcher.match_job_description("resume text", &sections, "");

        assert_eq!(result.keyword_match.percentage, 0);
        assert_eq!(result.match_score, 0);
        assert!(result.skill_gap.required_skills.is_empty());
    }

    #[test]
    fn test_required_skills_capped_at_thirty() {
        let matcher = matcher();
        let mut jd = String::from("Requirements:\n");
        for i in 0..40u8 {
            let first = (b'A' + i / 26) as char;
            let second = (b'A' + i % 26) as char;
            jd.push_str(&format!("• Skill{}{} required\n", first, second));
        }

        let skills = matcher.extract_required_skills(&jd);

        assert_eq!(skills.len(), 30);
    }

    #[test]
    fn test_additional_skills_reported() {
        let matcher = matcher();
        let sections = sections_with_skills(&["Python", "Haskell", "Prolog"]);
        let jd = "Requirements:\n• Python\n";

        let result = matcher.match_job_description("Python Haskell Prolog", &sections, jd);

        assert!(result
            .skill_gap
            .additional_skills
            .contains(&"haskell".to_string()));
        assert!(result
            .skill_gap
            .additional_skills
            .contains(&"prolog".to_string()));
    }

    #[test]
    fn test_experience_requirement_echoed() {
        let matcher = matcher();
        let sections = sections_with_skills(&["Python"]);
        let jd = "Requirements:\n• 7+ years of experience with Python\n";

        let result = matcher.match_job_description("Python", &sections, jd);

        assert!(result
            .recommendations
            .iter()
            .any(|r| r.contains("7+ years of experience")));
    }

    #[test]
    fn test_good_match_message_when_nothing_to_recommend() {
        let keyword_match = KeywordMatch {
            matched: vec!["python".to_string()],
            missing: Vec::new(),
            percentage: 100,
        };
        let skill_gap = SkillGap {
            required_skills: vec!["Python".to_string()],
            matched_skills: vec!["Python".to_string()],
            missing_skills: Vec::new(),
            additional_skills: Vec::new(),
        };

        let recommendations =
            matcher().generate_recommendations(&keyword_match, &skill_gap, "great job, no reqs");

        assert_eq!(recommendations.len(), 1);
        assert!(recommendations[0].contains("good match"));
    }
}
