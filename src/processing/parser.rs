//! Resume section extraction
//!
//! Splits normalized resume text into labeled sections (contact, summary,
//! experience, education, skills, projects, certifications) using
//! header-keyword boundaries and per-section regex heuristics. Extraction
//! is total: malformed or missing sections produce empty results, never
//! errors, and downstream scoring treats the gaps as deficiencies.

use aho_corasick::AhoCorasick;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSections {
    pub contact: ContactInfo,
    pub summary: Option<String>,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    pub skills: Vec<String>,
    pub projects: Vec<ProjectItem>,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceItem {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: bool,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationItem {
    pub degree: String,
    pub institution: String,
    pub location: Option<String>,
    pub graduation_date: Option<String>,
    pub gpa: Option<String>,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: Option<String>,
}

/// Every header keyword the extractor recognizes. Used to bound the end
/// of any section block: a block runs until the first line matching one
/// of these, or the end of the document.
const SECTION_HEADERS: &[&str] = &[
    "SUMMARY",
    "PROFILE",
    "OBJECTIVE",
    "ABOUT",
    "EXPERIENCE",
    "WORK EXPERIENCE",
    "EMPLOYMENT",
    "EDUCATION",
    "ACADEMIC",
    "SKILLS",
    "TECHNICAL SKILLS",
    "COMPETENCIES",
    "PROJECTS",
    "PERSONAL PROJECTS",
    "CERTIFICATIONS",
    "CERTIFICATES",
    "AWARDS",
    "ACHIEVEMENTS",
    "LANGUAGES",
    "INTERESTS",
    "HOBBIES",
    "REFERENCES",
    "PUBLICATIONS",
];

const EXPERIENCE_HEADERS: &[&str] = &[
    "EXPERIENCE",
    "WORK EXPERIENCE",
    "PROFESSIONAL EXPERIENCE",
    "EMPLOYMENT HISTORY",
    "WORK HISTORY",
];

const EDUCATION_HEADERS: &[&str] = &["EDUCATION", "ACADEMIC BACKGROUND", "QUALIFICATIONS"];

const SKILLS_HEADERS: &[&str] = &[
    "SKILLS",
    "TECHNICAL SKILLS",
    "CORE COMPETENCIES",
    "KEY SKILLS",
    "TECHNOLOGIES",
    "EXPERTISE",
];

const PROJECTS_HEADERS: &[&str] = &[
    "PROJECTS",
    "PERSONAL PROJECTS",
    "KEY PROJECTS",
    "SELECTED PROJECTS",
];

const CERTIFICATION_HEADERS: &[&str] =
    &["CERTIFICATIONS", "CERTIFICATES", "LICENSES", "CREDENTIALS"];

/// Technology and soft-skill terms matched against the whole document,
/// independently of any skills header.
pub(crate) const COMMON_SKILLS: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "C++",
    "C#",
    "Ruby",
    "Go",
    "Rust",
    "PHP",
    "Swift",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Express",
    "Django",
    "Flask",
    "Spring",
    "Rails",
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "CI/CD",
    "Git",
    "GitHub",
    "GitLab",
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "Redis",
    "Elasticsearch",
    "GraphQL",
    "REST API",
    "HTML",
    "CSS",
    "SASS",
    "Tailwind",
    "Bootstrap",
    "Material UI",
    "Agile",
    "Scrum",
    "Jira",
    "Confluence",
    "Figma",
    "Photoshop",
    "Machine Learning",
    "Deep Learning",
    "TensorFlow",
    "PyTorch",
    "Data Analysis",
    "SQL",
    "NoSQL",
    "Linux",
    "Windows",
    "macOS",
];

/// Resume section extractor built on header-keyword boundaries.
pub struct ResumeParser {
    email_regex: Regex,
    phone_regex: Regex,
    linkedin_regex: Regex,
    github_regex: Regex,
    website_regex: Regex,
    name_regex: Regex,
    summary_regex: Regex,
    experience_patterns: Vec<Regex>,
    education_patterns: Vec<Regex>,
    skills_patterns: Vec<Regex>,
    projects_patterns: Vec<Regex>,
    certification_patterns: Vec<Regex>,
    experience_boundary_regex: Regex,
    date_range_regex: Regex,
    present_regex: Regex,
    title_regex: Regex,
    company_regex: Regex,
    capitalized_line_regex: Regex,
    degree_regex: Regex,
    institution_regex: Regex,
    trailing_year_regex: Regex,
    year_regex: Regex,
    gpa_regex: Regex,
    project_name_strip_regex: Regex,
    technologies_regex: Regex,
    link_regex: Regex,
    bullet_strip_regex: Regex,
    skill_scanner: AhoCorasick,
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeParser {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"(?i)[\w.-]+@[\w.-]+\.\w+").expect("Invalid email regex");

        let phone_regex = Regex::new(
            r"\+?\(?[0-9]{1,3}\)?[-\s.]?[0-9]{1,4}[-\s.]?[0-9]{1,4}[-\s.]?[0-9]{1,9}",
        )
        .expect("Invalid phone regex");

        let linkedin_regex =
            Regex::new(r"(?i)linkedin\.com/in/[\w-]+").expect("Invalid LinkedIn regex");

        let github_regex = Regex::new(r"(?i)github\.com/[\w-]+").expect("Invalid GitHub regex");

        let website_regex =
            Regex::new(r"(?i)(?:https?://)?(?:www\.)?[\w-]+\.[\w.-]+(?:/[\w.-]*)?")
                .expect("Invalid website regex");

        let name_regex =
            Regex::new(r"^([A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)").expect("Invalid name regex");

        // The regex crate has no lookahead, so the header that bounds the
        // summary is consumed instead of asserted. Semantics are the same
        // for a single extraction pass.
        let summary_regex = Regex::new(
            r"(?i)(?:SUMMARY|PROFILE|OBJECTIVE|ABOUT ME|PROFESSIONAL SUMMARY)[\s:]*\n?([\s\S]*?)(?:\n\s*(?:EXPERIENCE|WORK|EDUCATION|SKILLS|PROJECTS)|\n\n\n)",
        )
        .expect("Invalid summary regex");

        let experience_boundary_regex =
            Regex::new(r"^[A-Z][a-z]+.*?(?:\d{4}|Present)").expect("Invalid boundary regex");

        let date_range_regex =
            Regex::new(r"(?i)(\w+\s+\d{4})\s*[-–—]\s*(\w+\s+\d{4}|Present|Current)")
                .expect("Invalid date range regex");

        let present_regex = Regex::new(r"(?i)present|current").expect("Invalid present regex");

        let title_regex = Regex::new(r"^([A-Z][^|@\d]*?)(?:\s*[-–|@]|\s*\d{4}|$)")
            .expect("Invalid title regex");

        let company_regex =
            Regex::new(r"^([^|@\d]+?)(?:\s*[-–|]|$)").expect("Invalid company regex");

        let capitalized_line_regex = Regex::new(r"^[A-Z]").expect("Invalid capitalized regex");

        let degree_regex = Regex::new(
            r"(?i)(?:Bachelor|Master|PhD|Doctor|Associate|B\.?S\.?|M\.?S\.?|B\.?A\.?|M\.?A\.?|MBA|B\.?Tech|M\.?Tech)[^,\n]*",
        )
        .expect("Invalid degree regex");

        let institution_regex =
            Regex::new(r"(?i)university|college|institute|school").expect("Invalid institution regex");

        let trailing_year_regex = Regex::new(r"\d{4}.*$").expect("Invalid trailing year regex");

        let year_regex = Regex::new(r"\d{4}").expect("Invalid year regex");

        let gpa_regex =
            Regex::new(r"(?i)(?:GPA|CGPA)[\s:]*(\d+\.?\d*)").expect("Invalid GPA regex");

        let project_name_strip_regex =
            Regex::new(r"[-–|:].*$").expect("Invalid project name regex");

        let technologies_regex = Regex::new(r"(?i)(?:Technologies?|Stack|Built with)[\s:]+([^\n]+)")
            .expect("Invalid technologies regex");

        let link_regex = Regex::new(r"https?://\S+").expect("Invalid link regex");

        let bullet_strip_regex = Regex::new(r"^[•\-*]\s*").expect("Invalid bullet regex");

        let skill_scanner = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(COMMON_SKILLS)
            .expect("Failed to build skill scanner");

        Self {
            email_regex,
            phone_regex,
            linkedin_regex,
            github_regex,
            website_regex,
            name_regex,
            summary_regex,
            experience_patterns: Self::section_patterns(EXPERIENCE_HEADERS),
            education_patterns: Self::section_patterns(EDUCATION_HEADERS),
            skills_patterns: Self::section_patterns(SKILLS_HEADERS),
            projects_patterns: Self::section_patterns(PROJECTS_HEADERS),
            certification_patterns: Self::section_patterns(CERTIFICATION_HEADERS),
            experience_boundary_regex,
            date_range_regex,
            present_regex,
            title_regex,
            company_regex,
            capitalized_line_regex,
            degree_regex,
            institution_regex,
            trailing_year_regex,
            year_regex,
            gpa_regex,
            project_name_strip_regex,
            technologies_regex,
            link_regex,
            bullet_strip_regex,
            skill_scanner,
        }
    }

    /// One compiled pattern per header keyword, tried in list order so
    /// that ambiguous documents resolve to the caller's priority order.
    fn section_patterns(keywords: &[&str]) -> Vec<Regex> {
        let boundary = SECTION_HEADERS.join("|");

        keywords
            .iter()
            .map(|keyword| {
                Regex::new(&format!(
                    r"(?i)(?:^|\n)\s*{keyword}[\s:]*\n([\s\S]*?)(?:\n\s*(?:{boundary})[\s:]*\n|\z)"
                ))
                .expect("Invalid section header pattern")
            })
            .collect()
    }

    /// Extract structured sections from resume text. Total: any input,
    /// including the empty string, yields a complete (possibly empty)
    /// `ParsedSections`.
    pub fn extract_sections(&self, text: &str) -> ParsedSections {
        ParsedSections {
            contact: self.extract_contact_info(text),
            summary: self.extract_summary(text),
            experience: self.extract_experience(text),
            education: self.extract_education(text),
            skills: self.extract_skills(text),
            projects: self.extract_projects(text),
            certifications: self.extract_certifications(text),
        }
    }

    /// Contact details live near the top, so only the first 10 lines are
    /// scanned. Each field is independently optional.
    fn extract_contact_info(&self, text: &str) -> ContactInfo {
        let lines: Vec<&str> = text.lines().take(10).collect();
        let text_block = lines.join(" ");

        let mut contact = ContactInfo::default();

        if let Some(m) = self.email_regex.find(&text_block) {
            contact.email = Some(m.as_str().to_lowercase());
        }

        if let Some(m) = self.phone_regex.find(&text_block) {
            contact.phone = Some(m.as_str().to_string());
        }

        if let Some(m) = self.linkedin_regex.find(&text_block) {
            contact.linkedin = Some(format!("https://{}", m.as_str()));
        }

        if let Some(m) = self.github_regex.find(&text_block) {
            contact.github = Some(format!("https://{}", m.as_str()));
        }

        contact.website = self
            .website_regex
            .find_iter(&text_block)
            .map(|m| m.as_str())
            .find(|url| !url.contains("linkedin") && !url.contains("github") && !url.contains('@'))
            .map(|url| url.to_string());

        if let Some(first_line) = lines.first() {
            if let Some(caps) = self.name_regex.captures(first_line) {
                contact.name = Some(caps[1].to_string());
            }
        }

        contact
    }

    fn extract_summary(&self, text: &str) -> Option<String> {
        let caps = self.summary_regex.captures(text)?;
        let summary = caps.get(1)?.as_str().trim();
        let length = summary.chars().count();

        if length > 20 && length < 2000 {
            Some(summary.to_string())
        } else {
            None
        }
    }

    fn extract_experience(&self, text: &str) -> Vec<ExperienceItem> {
        let mut experiences = Vec::new();

        let Some(section) = self.extract_section(text, &self.experience_patterns) else {
            return experiences;
        };

        // Entry boundaries: a line opening with a capitalized word that
        // also carries a year or "Present" further along.
        let blocks = split_on_line_match(&section, &self.experience_boundary_regex);

        for block in blocks {
            if block.trim().chars().count() < 20 {
                continue;
            }

            let lines: Vec<&str> = block.lines().filter(|l| !l.trim().is_empty()).collect();
            if lines.is_empty() {
                continue;
            }

            let mut experience = ExperienceItem::default();

            let first_line = lines[0];
            if let Some(caps) = self.date_range_regex.captures(first_line) {
                experience.start_date = Some(caps[1].to_string());
                experience.end_date = Some(caps[2].to_string());
                experience.current = self.present_regex.is_match(&caps[2]);
            }

            if let Some(caps) = self.title_regex.captures(first_line) {
                experience.title = caps[1].trim().to_string();
            }

            if lines.len() > 1 {
                if let Some(caps) = self.company_regex.captures(lines[1]) {
                    experience.company = caps[1].trim().to_string();
                }
            }

            for line in lines.iter().skip(2) {
                let line = line.trim();
                let is_bullet = line.starts_with('•')
                    || line.starts_with('-')
                    || line.starts_with('*')
                    || self.capitalized_line_regex.is_match(line);
                if line.chars().count() > 10 && is_bullet {
                    experience
                        .description
                        .push(self.bullet_strip_regex.replace(line, "").to_string());
                }
            }

            if !experience.title.is_empty() || !experience.company.is_empty() {
                experiences.push(experience);
            }
        }

        experiences
    }

    fn extract_education(&self, text: &str) -> Vec<EducationItem> {
        let mut education = Vec::new();

        let Some(section) = self.extract_section(text, &self.education_patterns) else {
            return education;
        };

        let blocks = split_on_line_match(&section, &self.capitalized_line_regex);

        for block in blocks {
            if block.trim().chars().count() < 10 {
                continue;
            }

            let lines: Vec<&str> = block.lines().filter(|l| !l.trim().is_empty()).collect();
            if lines.is_empty() {
                continue;
            }

            let mut edu = EducationItem::default();

            if let Some(m) = self.degree_regex.find(lines[0]) {
                edu.degree = m.as_str().trim().to_string();
            }

            for line in &lines {
                if self.institution_regex.is_match(line) {
                    edu.institution = self
                        .trailing_year_regex
                        .replace(line, "")
                        .trim()
                        .to_string();
                    break;
                }
            }

            if let Some(m) = self.year_regex.find(&block) {
                edu.graduation_date = Some(m.as_str().to_string());
            }

            if let Some(caps) = self.gpa_regex.captures(&block) {
                edu.gpa = Some(caps[1].to_string());
            }

            if !edu.degree.is_empty() || !edu.institution.is_empty() {
                education.push(edu);
            }
        }

        education
    }

    fn extract_skills(&self, text: &str) -> Vec<String> {
        let mut skills = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        if let Some(section) = self.extract_section(text, &self.skills_patterns) {
            for line in section.lines() {
                for item in line.split([',', ';', '|', '•', '-']) {
                    let cleaned = item.trim();
                    let length = cleaned.chars().count();
                    let starts_with_letter = cleaned
                        .chars()
                        .next()
                        .map(|c| c.is_ascii_alphabetic())
                        .unwrap_or(false);

                    if (2..=40).contains(&length) && starts_with_letter
                        && seen.insert(cleaned.to_string())
                    {
                        skills.push(cleaned.to_string());
                    }
                }
            }
        }

        // Independently scan the whole document for well-known terms.
        // Overlapping search keeps each term an independent substring
        // test ("java" still hits inside "javascript").
        let mut matched_patterns: HashSet<usize> = HashSet::new();
        for m in self.skill_scanner.find_overlapping_iter(text) {
            matched_patterns.insert(m.pattern().as_usize());
        }

        for (idx, skill) in COMMON_SKILLS.iter().enumerate() {
            if matched_patterns.contains(&idx) && seen.insert((*skill).to_string()) {
                skills.push((*skill).to_string());
            }
        }

        skills
    }

    fn extract_projects(&self, text: &str) -> Vec<ProjectItem> {
        let mut projects = Vec::new();

        let Some(section) = self.extract_section(text, &self.projects_patterns) else {
            return projects;
        };

        let blocks = split_on_line_match(&section, &self.capitalized_line_regex);

        for block in blocks {
            if block.trim().chars().count() < 20 {
                continue;
            }

            let lines: Vec<&str> = block.lines().filter(|l| !l.trim().is_empty()).collect();
            if lines.is_empty() {
                continue;
            }

            let name = self
                .project_name_strip_regex
                .replace(lines[0], "")
                .trim()
                .to_string();

            let mut project = ProjectItem {
                name,
                description: lines[1..].join(" ").trim().to_string(),
                technologies: Vec::new(),
                link: None,
            };

            if let Some(caps) = self.technologies_regex.captures(&block) {
                project.technologies = caps[1]
                    .split([',', ';', '|'])
                    .map(|t| t.trim().to_string())
                    .collect();
            }

            if let Some(m) = self.link_regex.find(&block) {
                project.link = Some(m.as_str().to_string());
            }

            if !project.name.is_empty() {
                projects.push(project);
            }
        }

        projects
    }

    fn extract_certifications(&self, text: &str) -> Vec<String> {
        let mut certs = Vec::new();

        let Some(section) = self.extract_section(text, &self.certification_patterns) else {
            return certs;
        };

        for line in section.lines() {
            let cleaned = self.bullet_strip_regex.replace(line, "");
            let cleaned = cleaned.trim();
            let length = cleaned.chars().count();
            if length > 5 && length < 200 {
                certs.push(cleaned.to_string());
            }
        }

        certs
    }

    /// Locate a section by trying each header keyword pattern in priority
    /// order; the block runs until the next recognized header.
    fn extract_section(&self, text: &str, patterns: &[Regex]) -> Option<String> {
        for pattern in patterns {
            if let Some(caps) = pattern.captures(text) {
                if let Some(m) = caps.get(1) {
                    if !m.as_str().is_empty() {
                        return Some(m.as_str().trim().to_string());
                    }
                }
            }
        }
        None
    }
}

/// Split text into blocks, starting a new block at every line (after the
/// first) that matches the boundary pattern.
fn split_on_line_match(text: &str, boundary: &Regex) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        return vec![String::new()];
    }

    let mut blocks = Vec::new();
    let mut start = 0;

    for (idx, line) in lines.iter().enumerate().skip(1) {
        if boundary.is_match(line) {
            blocks.push(lines[start..idx].join("\n"));
            start = idx;
        }
    }
    blocks.push(lines[start..].join("\n"));

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "John Smith\njohn.smith@email.com\n(555) 123-4567\nlinkedin.com/in/johnsmith\n\nSUMMARY\nExperienced software engineer with 8 years building scalable backend services and leading small teams.\n\nEXPERIENCE\nSenior Software Engineer\nAcme Corp\nJan 2020 - Present\n• Increased API throughput by 40% through caching\n• Led a team of 5 engineers\n\nEDUCATION\nBachelor of Science in Computer Science\nState University 2015\n\nSKILLS\nPython, Rust, SQL, Docker, Leadership\n";

    fn parser() -> ResumeParser {
        ResumeParser::new()
    }

    #[test]
    fn test_contact_extraction() {
        let sections = parser().extract_sections(SAMPLE);
        let contact = &sections.contact;

        assert_eq!(contact.name.as_deref(), Some("John Smith"));
        assert_eq!(contact.email.as_deref(), Some("john.smith@email.com"));
        assert!(contact.phone.is_some());
        assert_eq!(
            contact.linkedin.as_deref(),
            Some("https://linkedin.com/in/johnsmith")
        );
    }

    #[test]
    fn test_summary_extraction() {
        let sections = parser().extract_sections(SAMPLE);
        let summary = sections.summary.expect("summary should be present");

        assert!(summary.starts_with("Experienced software engineer"));
    }

    #[test]
    fn test_summary_rejects_too_short() {
        let text = "SUMMARY\nToo short.\n\nEXPERIENCE\nEngineer\n";
        let sections = parser().extract_sections(text);

        assert!(sections.summary.is_none());
    }

    #[test]
    fn test_experience_extraction() {
        let sections = parser().extract_sections(SAMPLE);

        // The date line opens a new entry block, so the title/company
        // pair and the dated bullet block parse as separate entries.
        assert_eq!(sections.experience.len(), 2);

        let first = &sections.experience[0];
        assert_eq!(first.title, "Senior Software Engineer");
        assert_eq!(first.company, "Acme Corp");

        let dated = &sections.experience[1];
        assert_eq!(dated.start_date.as_deref(), Some("Jan 2020"));
        assert_eq!(dated.end_date.as_deref(), Some("Present"));
        assert!(dated.current);
        assert!(!dated.description.is_empty());
    }

    #[test]
    fn test_education_extraction() {
        let sections = parser().extract_sections(SAMPLE);

        // Each capitalized line opens a block, so degree and institution
        // land in separate entries here.
        assert_eq!(sections.education.len(), 2);
        assert!(sections.education[0]
            .degree
            .starts_with("Bachelor of Science"));
        assert_eq!(sections.education[1].institution, "State University");
        assert_eq!(
            sections.education[1].graduation_date.as_deref(),
            Some("2015")
        );
    }

    #[test]
    fn test_skills_extraction_unions_section_and_scan() {
        let sections = parser().extract_sections(SAMPLE);

        // From the skills section
        assert!(sections.skills.iter().any(|s| s == "Leadership"));
        // From the whole-document scan (canonical casing)
        assert!(sections.skills.iter().any(|s| s == "Python"));
        assert!(sections.skills.iter().any(|s| s == "Docker"));
        assert!(sections.skills.len() >= 5);
    }

    #[test]
    fn test_skills_deduplicated() {
        let sections = parser().extract_sections(SAMPLE);
        let mut sorted: Vec<&String> = sections.skills.iter().collect();
        sorted.sort();
        sorted.dedup();

        assert_eq!(sorted.len(), sections.skills.len());
    }

    #[test]
    fn test_empty_text_is_total() {
        let sections = parser().extract_sections("");

        assert_eq!(sections.contact, ContactInfo::default());
        assert!(sections.summary.is_none());
        assert!(sections.experience.is_empty());
        assert!(sections.education.is_empty());
        assert!(sections.skills.is_empty());
        assert!(sections.projects.is_empty());
        assert!(sections.certifications.is_empty());
    }

    #[test]
    fn test_certifications_extraction() {
        let text = "CERTIFICATIONS\n• AWS Certified Solutions Architect\n• CKA: Certified Kubernetes Administrator\nx\n";
        let sections = parser().extract_sections(text);

        assert_eq!(sections.certifications.len(), 2);
        assert_eq!(
            sections.certifications[0],
            "AWS Certified Solutions Architect"
        );
    }

    #[test]
    fn test_projects_extraction() {
        let text = "PROJECTS\nInventory Tracker - warehouse dashboard\nBuilt a realtime dashboard for warehouse stock levels.\nTechnologies: Rust, PostgreSQL, React\nhttps://github.com/jsmith/tracker\n";
        let sections = parser().extract_sections(text);

        // Every capitalized line opens a block, so the description and
        // technology lines become entries of their own.
        assert_eq!(sections.projects.len(), 3);
        assert_eq!(sections.projects[0].name, "Inventory Tracker");
        assert!(sections
            .projects
            .iter()
            .any(|p| p.technologies.iter().any(|t| t == "PostgreSQL")));
        assert!(sections
            .projects
            .iter()
            .any(|p| p.link.as_deref().unwrap_or("").contains("github.com")));
    }

    #[test]
    fn test_section_keyword_priority_order() {
        // Both a WORK HISTORY and an EXPERIENCE header: the EXPERIENCE
        // keyword is tried first, so its block wins.
        let text = "WORK HISTORY\nClerk at Shop\nJan 2010 - Dec 2012 retail work done here\n\nEXPERIENCE\nEngineer Acme\nJan 2020 - Present building systems every day\n";
        let sections = parser().extract_sections(text);

        assert!(!sections.experience.is_empty());
        assert!(sections.experience.iter().all(|e| !e
            .description
            .iter()
            .any(|d| d.contains("retail"))));
    }
}
