//! Supported document formats and their registered extensions

use serde::{Deserialize, Serialize};

/// Supported file types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// Microsoft PowerPoint presentation (.pptx)
    Pptx,
    /// Excel workbook family (.xlsx, .xlsm, .xltx)
    Spreadsheet,
    /// CSV file
    Csv,
    /// Plain text, markdown, or RTF read as text
    Text,
    /// HTML document
    Html,
}

impl FileType {
    /// Every supported type, in registration order
    pub const ALL: [FileType; 7] = [
        Self::Pdf,
        Self::Docx,
        Self::Pptx,
        Self::Spreadsheet,
        Self::Csv,
        Self::Text,
        Self::Html,
    ];

    /// Lowercase extensions (without the dot) handled by this type
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Pdf => &["pdf"],
            Self::Docx => &["docx"],
            Self::Pptx => &["pptx"],
            Self::Spreadsheet => &["xlsx", "xlsm", "xltx"],
            Self::Csv => &["csv"],
            Self::Text => &["txt", "md", "rtf"],
            Self::Html => &["html", "htm"],
        }
    }

    /// Format name used in parse error messages
    pub fn format_name(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::Pptx => "PPTX",
            Self::Spreadsheet => "XLSX",
            Self::Csv => "CSV",
            Self::Text => "Text",
            Self::Html => "HTML",
        }
    }
}
