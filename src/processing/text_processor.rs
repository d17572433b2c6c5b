//! Text normalization shared by the extraction and scoring passes

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

pub struct TextProcessor {
    space_run_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let space_run_regex = Regex::new(r" {2,}").expect("Invalid space run regex");

        Self { space_run_regex }
    }

    /// Normalize raw extracted text before section extraction.
    ///
    /// Line endings become `\n` and non-breaking spaces become plain
    /// spaces. Line structure, tabs and blank-line runs are preserved:
    /// the formatting rules score those artifacts, so cleaning must not
    /// erase them.
    pub fn clean_text(&self, text: &str) -> String {
        let unified = text
            .replace("\r\n", "\n")
            .replace('\r', "\n")
            .replace('\u{00A0}', " ");

        let collapsed = self.space_run_regex.replace_all(&unified, " ");

        collapsed.trim().to_string()
    }

    /// Word count for report metadata, using Unicode word boundaries so
    /// bullet glyphs and stray punctuation are not counted as words.
    pub fn word_count(&self, text: &str) -> usize {
        text.unicode_words().count()
    }

    /// Character count for report metadata.
    pub fn character_count(&self, text: &str) -> usize {
        text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_endings_normalized() {
        let processor = TextProcessor::new();
        let cleaned = processor.clean_text("John Doe\r\nEngineer\rBoston");

        assert_eq!(cleaned, "John Doe\nEngineer\nBoston");
    }

    #[test]
    fn test_space_runs_collapsed_but_structure_kept() {
        let processor = TextProcessor::new();
        let cleaned = processor.clean_text("SKILLS\n\n\nPython,    SQL\t\tDocker");

        // Blank lines and tabs survive cleaning; only space runs collapse.
        assert!(cleaned.contains("\n\n\n"));
        assert!(cleaned.contains("Python, SQL"));
        assert!(cleaned.contains("\t\t"));
    }

    #[test]
    fn test_non_breaking_spaces_replaced() {
        let processor = TextProcessor::new();
        let cleaned = processor.clean_text("John\u{00A0}Doe");

        assert_eq!(cleaned, "John Doe");
    }

    #[test]
    fn test_word_count_ignores_bullet_glyphs() {
        let processor = TextProcessor::new();

        assert_eq!(processor.word_count("• Increased revenue by 30%"), 4);
        assert_eq!(processor.word_count(""), 0);
    }
}
