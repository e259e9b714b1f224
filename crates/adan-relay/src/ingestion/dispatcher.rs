//! Extension-based extractor selection with a scoped temp-file lifecycle

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempPath;

use super::parser::{
    CsvExtractor, DocxExtractor, Extractor, HtmlExtractor, PdfExtractor, PlainTextExtractor,
    PptxExtractor, SpreadsheetExtractor,
};
use crate::error::{Error, Result};

/// Routes uploaded files to the extractor registered for their extension
pub struct ExtractionDispatcher {
    extractors: HashMap<&'static str, Arc<dyn Extractor>>,
    temp_dir: Option<PathBuf>,
}

impl Default for ExtractionDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionDispatcher {
    /// Dispatcher with every built-in extractor registered
    pub fn new() -> Self {
        let mut dispatcher = Self::empty();
        let builtins: [Arc<dyn Extractor>; 7] = [
            Arc::new(PdfExtractor),
            Arc::new(DocxExtractor),
            Arc::new(PptxExtractor),
            Arc::new(SpreadsheetExtractor),
            Arc::new(CsvExtractor),
            Arc::new(PlainTextExtractor),
            Arc::new(HtmlExtractor),
        ];
        for extractor in builtins {
            dispatcher.register(extractor);
        }
        dispatcher
    }

    /// Dispatcher with no extractors
    pub fn empty() -> Self {
        Self {
            extractors: HashMap::new(),
            temp_dir: None,
        }
    }

    /// Materialize uploads under `dir` instead of the system temp directory
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Register `extractor` for every extension of its file type,
    /// replacing any previous registration
    pub fn register(&mut self, extractor: Arc<dyn Extractor>) {
        for &ext in extractor.file_type().extensions() {
            self.extractors.insert(ext, Arc::clone(&extractor));
        }
    }

    /// Lowercase extension of `filename`, without the dot
    pub fn extension_of(filename: &str) -> Option<String> {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
    }

    /// Extract text from an uploaded file.
    ///
    /// The bytes are written to a uniquely named temp file carrying the
    /// upload's suffix, handed to the extractor, and removed afterwards on
    /// every exit path. A failed removal is logged and never replaces the
    /// extraction outcome.
    pub fn dispatch(&self, filename: &str, data: &[u8]) -> Result<String> {
        if filename.trim().is_empty() {
            return Err(Error::invalid_input("No file."));
        }

        let ext = Self::extension_of(filename).unwrap_or_default();
        let extractor = self.extractors.get(ext.as_str()).ok_or_else(|| {
            Error::UnsupportedFormat(if ext.is_empty() {
                "(no extension)".to_string()
            } else {
                format!(".{}", ext)
            })
        })?;

        let temp_path = self.materialize(&ext, data)?;
        tracing::debug!(
            "Extracting '{}' ({} bytes) via {} at {}",
            filename,
            data.len(),
            extractor.file_type().format_name(),
            temp_path.display()
        );

        // TempPath also removes the file if the extractor unwinds
        let result = extractor.extract(&temp_path);

        let removed = temp_path.to_path_buf();
        if let Err(e) = temp_path.close() {
            tracing::warn!("Failed to remove temp file {}: {}", removed.display(), e);
        }

        result
    }

    fn materialize(&self, ext: &str, data: &[u8]) -> Result<TempPath> {
        let suffix = format!(".{}", ext);
        let mut builder = tempfile::Builder::new();
        builder.prefix("adan-").suffix(&suffix);

        let mut file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(data)?;
        file.flush()?;

        // Close our handle; the path keeps the delete-on-drop guard
        Ok(file.into_temp_path())
    }
}
