//! Integration tests for the resume ATS analyzer

use resume_ats::input::manager::InputManager;
use resume_ats::processing::analyzer::AnalysisEngine;
use resume_ats::processing::flaw_analyzer::{FlawCategory, OverallReadiness};
use resume_ats::ResumeAtsError;
use std::io::Write;
use std::path::Path;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Senior Software Engineer"));
    assert!(text.contains("Kubernetes"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("SKILLS"));
    // Should not contain markdown formatting
    assert!(!text.contains("##"));
    assert!(!text.contains("**"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.xyz");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(b"text")
        .unwrap();

    let mut manager = InputManager::new();
    let result = manager.extract_text(&path).await;

    assert!(matches!(result, Err(ResumeAtsError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_external_decoder_formats_rejected() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["resume.docx", "resume.jpg", "resume.png"] {
        let path = dir.path().join(name);
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"binary")
            .unwrap();

        let mut manager = InputManager::new();
        let result = manager.extract_text(&path).await;

        assert!(
            matches!(result, Err(ResumeAtsError::UnsupportedFormat(_))),
            "expected UnsupportedFormat for {}",
            name
        );
    }
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_input_size_cap() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.txt");
    std::fs::write(&path, "a".repeat(2048)).unwrap();

    let mut manager = InputManager::new().with_max_input_bytes(1024);
    let result = manager.extract_text(&path).await;

    assert!(matches!(result, Err(ResumeAtsError::InvalidInput(_))));
}

#[test]
fn test_empty_resume_end_to_end() {
    let engine = AnalysisEngine::new();
    let report = engine.analyze("", "empty.txt");

    // Structurally complete despite empty input
    assert_eq!(report.analysis.feedback.len(), 5);
    assert_eq!(report.enhanced.approval_tips.len(), 14);
    assert!(report.analysis.overall_score <= 35);

    let critical_titles: Vec<&str> = report
        .enhanced
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
fn test_minimal_resume_end_to_end() {
    let engine = AnalysisEngine::new();
    let text = "John Smith\njohn@x.com\n555-123-4567\nEXPERIENCE\nEngineer at Acme\nJan 2020 - Present\n• Increased throughput by 30%\nSKILLS\nPython, SQL, Leadership, Communication, Docker";

    let report = engine.analyze(text, "minimal.txt");

    assert_eq!(report.sections.contact.email.as_deref(), Some("john@x.com"));
    assert!(report.sections.experience.iter().any(|e| e.current));
    assert!(report.sections.skills.len() >= 5);
    assert!(report
        .enhanced
        .flaws
        .iter()
        .all(|f| f.category != FlawCategory::Critical));
}

#[tokio::test]
async fn test_full_pipeline_on_fixture() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();

    let engine = AnalysisEngine::new();
    let report = engine.analyze(&text, "sample_resume.txt");

    assert!(report.analysis.overall_score >= 60);
    assert!(report.analysis.overall_score <= 100);
    assert!(report.enhanced.readiness_score >= 80);
    assert_eq!(report.enhanced.overall_readiness, OverallReadiness::Ready);

    assert_eq!(
        report.sections.contact.email.as_deref(),
        Some("john.doe@email.com")
    );
    assert!(report.sections.experience.iter().any(|e| e.current));
    assert!(report.sections.skills.len() >= 10);
    assert!(!report.sections.projects.is_empty());
}

#[tokio::test]
async fn test_job_match_on_fixtures() {
    let mut manager = InputManager::new();
    let resume_text = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let job_text = manager
        .extract_text(Path::new("tests/fixtures/job_description.txt"))
        .await
        .unwrap();

    let engine = AnalysisEngine::new();
    let report = engine.analyze_with_job(&resume_text, &job_text, "sample_resume.txt");

    let job_match = report.job_match.expect("job match should be present");
    assert!(job_match.match_score >= 60);
    assert!(job_match.keyword_match.percentage >= 60);
    assert!(job_match
        .skill_gap
        .matched_skills
        .iter()
        .any(|s| s.eq_ignore_ascii_case("python")));
    assert!(
        job_match.match_score as u16 + job_match.improvement_potential as u16 <= 100
    );
}

#[test]
fn test_job_match_with_no_overlap() {
    let engine = AnalysisEngine::new();
    let resume = "SKILLS\nPython\n";
    let jd = "Requirements:\n• Expert Java skills\n• Kubernetes in production\n";

    let job_match = engine.match_job(resume, jd);

    assert!(job_match.keyword_match.percentage < 25);
    assert!(job_match
        .skill_gap
        .missing_skills
        .iter()
        .any(|s| s.eq_ignore_ascii_case("java")));
    assert!(job_match
        .skill_gap
        .missing_skills
        .iter()
        .any(|s| s.eq_ignore_ascii_case("kubernetes")));
    assert!(job_match.improvement_potential > 0);
}

#[test]
fn test_pathological_input_is_total() {
    let engine = AnalysisEngine::new();
    let long_line = "x".repeat(100_000);
    let weird = format!("{}\n\u{1F600} │├┤ <table> ||| \t\t\n{}", long_line, long_line);

    let report = engine.analyze(&weird, "weird.txt");

    assert!(report.analysis.overall_score <= 100);
    assert!(report.enhanced.readiness_score <= 100);
}

#[test]
fn test_analysis_is_deterministic() {
    let engine = AnalysisEngine::new();
    let text = "John Smith\njohn@x.com\nSKILLS\nPython, SQL, Docker\n";

    let first = engine.analyze(text, "a.txt");
    let second = engine.analyze(text, "a.txt");

    assert_eq!(first.analysis, second.analysis);
    assert_eq!(first.enhanced, second.enhanced);
}
