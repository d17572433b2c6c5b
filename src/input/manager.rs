//! Input manager for handling different file types

use crate::error::{Result, ResumeAtsError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::info;
use std::collections::HashMap;
use std::path::Path;

/// Default cap on input file size; larger uploads are rejected before any
/// parsing work happens.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
    max_input_bytes: u64,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn with_max_input_bytes(mut self, max: u64) -> Self {
        self.max_input_bytes = max;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        // Check cache first
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        // Validate file exists
        if !path.exists() {
            return Err(ResumeAtsError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let size = tokio::fs::metadata(path).await?.len();
        if size > self.max_input_bytes {
            return Err(ResumeAtsError::InvalidInput(format!(
                "File exceeds the {} byte input limit: {}",
                self.max_input_bytes,
                path.display()
            )));
        }

        // Detect file type
        let file_type = self.detect_file_type(path)?;

        // Route to appropriate extractor
        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::External(ext) => {
                // DOCX conversion and image OCR run in an external decoder
                // service, not in this process.
                return Err(ResumeAtsError::UnsupportedFormat(format!(
                    "'{}' files require the external document decoder: {}",
                    ext,
                    path.display()
                )));
            }
            FileType::Unknown => {
                return Err(ResumeAtsError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}. Please upload PDF, TXT, or MD.",
                    path.display()
                )));
            }
        };

        // Cache the result
        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ResumeAtsError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
