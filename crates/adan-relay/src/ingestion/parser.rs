//! Multi-format text extractors
//!
//! Each extractor reads a file already materialized on disk and flattens it to
//! plain lines. Library failures are converted to [`Error::Parse`] naming the
//! format; an empty document is never an error.

use calamine::{Data, Reader, Xlsx};
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{Read, Seek};
use std::path::Path;
use zip::ZipArchive;

use super::decode::decode_text;
use crate::error::{Error, Result};
use crate::types::FileType;

/// Text extraction capability for one file format
pub trait Extractor: Send + Sync {
    /// Format this extractor handles; its extensions are the registration keys
    fn file_type(&self) -> FileType;

    /// Extract plain text from the file at `path`
    fn extract(&self, path: &Path) -> Result<String>;
}

fn parse_error(file_type: FileType, cause: impl std::fmt::Display) -> Error {
    Error::parse(file_type.format_name(), cause)
}

// The PDF fallback and temp-file cleanup recover from extractor panics
#[cfg(not(panic = "unwind"))]
compile_error!("adan-relay must be built with panic = \"unwind\"");

/// PDF extractor: `pdf-extract` with a `lopdf` fallback
pub struct PdfExtractor;

impl PdfExtractor {
    /// Fallback PDF text extraction using lopdf directly
    fn extract_with_lopdf(path: &Path) -> std::result::Result<String, lopdf::Error> {
        let doc = lopdf::Document::load(path)?;
        let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
        if pages.is_empty() {
            return Ok(String::new());
        }
        doc.extract_text(&pages)
    }
}

impl Extractor for PdfExtractor {
    fn file_type(&self) -> FileType {
        FileType::Pdf
    }

    fn extract(&self, path: &Path) -> Result<String> {
        // pdf-extract panics on some malformed font programs
        let outcome =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| pdf_extract::extract_text(path)));

        let primary_cause = match outcome {
            Ok(Ok(text)) => return Ok(text),
            Ok(Err(e)) => e.to_string(),
            Err(panic) => panic_message(panic.as_ref()),
        };

        tracing::warn!("pdf-extract failed: {}, trying lopdf fallback", primary_cause);
        Self::extract_with_lopdf(path).map_err(|fallback| {
            tracing::debug!("lopdf fallback failed: {}", fallback);
            parse_error(FileType::Pdf, primary_cause)
        })
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "extractor panicked".to_string()
    }
}

/// DOCX extractor: one line per body paragraph
pub struct DocxExtractor;

impl DocxExtractor {
    fn collect_paragraph(children: &[docx_rs::ParagraphChild], out: &mut String) {
        for child in children {
            match child {
                docx_rs::ParagraphChild::Run(run) => {
                    for child in &run.children {
                        match child {
                            docx_rs::RunChild::Text(t) => out.push_str(&t.text),
                            docx_rs::RunChild::Tab(_) => out.push('\t'),
                            docx_rs::RunChild::Break(_) => out.push('\n'),
                            _ => {}
                        }
                    }
                }
                docx_rs::ParagraphChild::Hyperlink(link) => {
                    Self::collect_paragraph(&link.children, out);
                }
                _ => {}
            }
        }
    }
}

impl Extractor for DocxExtractor {
    fn file_type(&self) -> FileType {
        FileType::Docx
    }

    fn extract(&self, path: &Path) -> Result<String> {
        let data = fs::read(path)?;
        let doc = docx_rs::read_docx(&data).map_err(|e| parse_error(FileType::Docx, e))?;

        let paragraphs: Vec<String> = doc
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                docx_rs::DocumentChild::Paragraph(p) => {
                    let mut text = String::new();
                    Self::collect_paragraph(&p.children, &mut text);
                    Some(text)
                }
                // Tables and other block objects are not part of the paragraph model
                _ => None,
            })
            .collect();

        Ok(paragraphs.join("\n"))
    }
}

/// PowerPoint extractor: one `[Slide N]` line per slide with text
pub struct PptxExtractor;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";
const SHAPE_SEPARATOR: &str = "   ";

impl PptxExtractor {
    fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
        let mut file = archive
            .by_name(name)
            .map_err(|e| parse_error(FileType::Pptx, format!("{}: {}", name, e)))?;
        let mut xml = String::new();
        file.read_to_string(&mut xml)
            .map_err(|e| parse_error(FileType::Pptx, format!("{}: {}", name, e)))?;
        Ok(xml)
    }

    /// Slide part names in presentation order
    fn slide_order<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let presentation = Self::read_entry(archive, PRESENTATION_PART)?;
        let ordered = Self::read_entry(archive, PRESENTATION_RELS)
            .ok()
            .and_then(|rels| Self::resolve_slide_list(&presentation, &rels));

        match ordered {
            Some(slides) if !slides.is_empty() => Ok(slides),
            _ => Ok(Self::numbered_slides(archive)),
        }
    }

    /// Resolve `<p:sldId r:id=..>` entries through the presentation relationships
    fn resolve_slide_list(presentation: &str, rels: &str) -> Option<Vec<String>> {
        let mut targets = HashMap::new();
        let mut reader = quick_xml::Reader::from_str(rels);
        loop {
            match reader.read_event().ok()? {
                Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                    if let (Some(id), Some(target)) =
                        (attribute(&e, b"Id"), attribute(&e, b"Target"))
                    {
                        targets.insert(id, target);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        let mut slides = Vec::new();
        let mut reader = quick_xml::Reader::from_str(presentation);
        loop {
            match reader.read_event().ok()? {
                Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sldId" => {
                    let target = targets.get(&attribute(&e, b"r:id")?)?;
                    slides.push(match target.strip_prefix('/') {
                        Some(absolute) => absolute.to_string(),
                        None => format!("ppt/{}", target),
                    });
                }
                Event::Eof => break,
                _ => {}
            }
        }
        Some(slides)
    }

    /// Fallback ordering: `ppt/slides/slideN.xml` sorted by N
    fn numbered_slides<R: Read + Seek>(archive: &ZipArchive<R>) -> Vec<String> {
        let slide_number = |name: &str| {
            name.trim_start_matches("ppt/slides/slide")
                .trim_end_matches(".xml")
                .parse::<u32>()
                .unwrap_or(0)
        };

        let mut slide_names: Vec<String> = archive
            .file_names()
            .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
            .map(|s| s.to_string())
            .collect();
        slide_names.sort_by_key(|name| slide_number(name));
        slide_names
    }

    /// Text of every shape on a slide; paragraphs within a shape joined by `\n`
    fn shape_texts(xml: &str) -> std::result::Result<Vec<String>, quick_xml::Error> {
        struct ShapeText {
            paragraphs: Vec<String>,
            current: String,
        }

        let mut reader = quick_xml::Reader::from_str(xml);
        let mut stack: Vec<ShapeText> = Vec::new();
        let mut shapes = Vec::new();
        let mut in_text = false;

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"sp" => stack.push(ShapeText {
                        paragraphs: Vec::new(),
                        current: String::new(),
                    }),
                    b"t" => in_text = true,
                    b"br" => {
                        if let Some(shape) = stack.last_mut() {
                            shape.current.push('\n');
                        }
                    }
                    _ => {}
                },
                Event::Empty(e) => {
                    if e.local_name().as_ref() == b"br" {
                        if let Some(shape) = stack.last_mut() {
                            shape.current.push('\n');
                        }
                    }
                }
                Event::Text(e) if in_text => {
                    if let Some(shape) = stack.last_mut() {
                        shape.current.push_str(&e.unescape()?);
                    }
                }
                Event::End(e) => match e.local_name().as_ref() {
                    b"t" => in_text = false,
                    b"p" => {
                        if let Some(shape) = stack.last_mut() {
                            let paragraph = std::mem::take(&mut shape.current);
                            shape.paragraphs.push(paragraph);
                        }
                    }
                    b"sp" => {
                        if let Some(shape) = stack.pop() {
                            shapes.push(shape.paragraphs.join("\n"));
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(shapes)
    }
}

fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok())
        .map(|value| value.into_owned())
}

impl Extractor for PptxExtractor {
    fn file_type(&self) -> FileType {
        FileType::Pptx
    }

    fn extract(&self, path: &Path) -> Result<String> {
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file).map_err(|e| parse_error(FileType::Pptx, e))?;

        let mut lines = Vec::new();
        for (index, slide_name) in Self::slide_order(&mut archive)?.iter().enumerate() {
            let xml = Self::read_entry(&mut archive, slide_name)?;
            let shapes = Self::shape_texts(&xml)
                .map_err(|e| parse_error(FileType::Pptx, format!("{}: {}", slide_name, e)))?;

            let texts: Vec<&str> = shapes
                .iter()
                .map(|text| text.trim())
                .filter(|text| !text.is_empty())
                .collect();

            if !texts.is_empty() {
                lines.push(format!("[Slide {}] {}", index + 1, texts.join(SHAPE_SEPARATOR)));
            }
        }

        tracing::debug!("Extracted {} slide lines from {}", lines.len(), path.display());
        Ok(lines.join("\n"))
    }
}

/// Excel workbook extractor (.xlsx, .xlsm, .xltx)
pub struct SpreadsheetExtractor;

impl SpreadsheetExtractor {
    fn cell_to_string(cell: &Data) -> String {
        match cell {
            Data::Empty => String::new(),
            Data::Bool(true) => "TRUE".to_string(),
            Data::Bool(false) => "FALSE".to_string(),
            Data::DateTime(serial) => match serial.as_datetime() {
                Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
                None => serial.as_f64().to_string(),
            },
            Data::DateTimeIso(iso) | Data::DurationIso(iso) => iso.clone(),
            other => other.to_string(),
        }
    }
}

impl Extractor for SpreadsheetExtractor {
    fn file_type(&self) -> FileType {
        FileType::Spreadsheet
    }

    fn extract(&self, path: &Path) -> Result<String> {
        // All three extensions are OOXML workbooks, so open explicitly as Xlsx
        let mut workbook: Xlsx<_> =
            calamine::open_workbook(path).map_err(|e| parse_error(FileType::Spreadsheet, e))?;

        let mut lines = Vec::new();
        for sheet_name in workbook.sheet_names().to_vec() {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| parse_error(FileType::Spreadsheet, e))?;

            // Ranges begin at the first used cell; rows are reported from column A
            let leading_blanks = range.start().map_or(0, |(_, col)| col as usize);

            lines.push(format!("[Sheet] {}", sheet_name));
            for row in range.rows() {
                let values: Vec<String> = std::iter::repeat_with(String::new)
                    .take(leading_blanks)
                    .chain(row.iter().map(Self::cell_to_string))
                    .collect();
                if values.iter().any(|v| !v.trim().is_empty()) {
                    lines.push(values.join(" | "));
                }
            }
        }

        Ok(lines.join("\n"))
    }
}

/// CSV extractor: one ` | `-joined line per record
pub struct CsvExtractor;

impl Extractor for CsvExtractor {
    fn file_type(&self) -> FileType {
        FileType::Csv
    }

    fn extract(&self, path: &Path) -> Result<String> {
        let text = decode_text(&fs::read(path)?);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut lines = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| parse_error(FileType::Csv, e))?;
            lines.push(record.iter().collect::<Vec<_>>().join(" | "));
        }

        Ok(lines.join("\n"))
    }
}

/// Plain text, markdown, and RTF-as-text: decoded and returned verbatim
pub struct PlainTextExtractor;

impl Extractor for PlainTextExtractor {
    fn file_type(&self) -> FileType {
        FileType::Text
    }

    fn extract(&self, path: &Path) -> Result<String> {
        Ok(decode_text(&fs::read(path)?))
    }
}

/// HTML extractor: visible text only, one trimmed line per text block
pub struct HtmlExtractor;

const INVISIBLE_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

impl HtmlExtractor {
    fn html_to_text(html: &str) -> String {
        let document = scraper::Html::parse_document(html);

        let mut blocks: Vec<&str> = Vec::new();
        for node in document.tree.root().descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| INVISIBLE_ELEMENTS.contains(&el.name()))
            });
            if !hidden {
                blocks.push(text);
            }
        }

        blocks
            .join("\n")
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Extractor for HtmlExtractor {
    fn file_type(&self) -> FileType {
        FileType::Html
    }

    fn extract(&self, path: &Path) -> Result<String> {
        let html = decode_text(&fs::read(path)?);
        Ok(Self::html_to_text(&html))
    }
}
