//! File type detection

#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    /// Recognized upload formats whose decoding happens outside this crate
    /// (DOCX conversion, image OCR).
    External(String),
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            "docx" | "jpg" | "jpeg" | "png" => FileType::External(ext.to_lowercase()),
            _ => FileType::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(FileType::from_extension("pdf"), FileType::Pdf);
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("txt"), FileType::Text);
        assert_eq!(FileType::from_extension("md"), FileType::Markdown);
    }

    #[test]
    fn test_external_extensions() {
        assert_eq!(
            FileType::from_extension("docx"),
            FileType::External("docx".to_string())
        );
        assert_eq!(
            FileType::from_extension("PNG"),
            FileType::External("png".to_string())
        );
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(FileType::from_extension("xyz"), FileType::Unknown);
    }
}
