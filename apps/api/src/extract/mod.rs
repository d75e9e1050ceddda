//! Text extraction for uploaded resumes and job descriptions.
//!
//! The format is chosen by file extension. Extracted text is trimmed; the
//! analyzer decides whether what is left is usable. PDF and DOCX parsing runs
//! on the blocking pool and a panic inside a parser is reported as an
//! unreadable file.

use std::io::{Cursor, Read};

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

pub const SUPPORTED_FORMATS: &[&str] = &["pdf", "txt", "docx"];

const DOCX_BODY: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format. Please upload {} files only.", supported_list())]
    UnsupportedFormat { extension: String },

    #[error("Unable to read {kind} file. Please try a different file or convert to text format.")]
    Unreadable { kind: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Text,
    Docx,
}

impl DocumentFormat {
    /// Detects the format from a file name's extension (case-insensitive).
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "txt" => Ok(DocumentFormat::Text),
            "docx" => Ok(DocumentFormat::Docx),
            _ => Err(ExtractError::UnsupportedFormat { extension }),
        }
    }

    fn label(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Text => "text",
            DocumentFormat::Docx => "DOCX",
        }
    }

    fn unreadable(self) -> ExtractError {
        ExtractError::Unreadable { kind: self.label() }
    }
}

/// Extracts plain text from an uploaded document.
pub async fn extract_text(file_name: &str, data: Bytes) -> Result<String, ExtractError> {
    let format = DocumentFormat::from_file_name(file_name)?;

    let text = match format {
        DocumentFormat::Text => String::from_utf8(data.to_vec()).map_err(|e| {
            debug!("Text upload '{file_name}' is not UTF-8: {e}");
            format.unreadable()
        })?,
        DocumentFormat::Pdf => {
            run_blocking(format, move || {
                pdf_extract::extract_text_from_mem(&data).map_err(|e| {
                    debug!("PDF extraction failed: {e}");
                    format.unreadable()
                })
            })
            .await?
        }
        DocumentFormat::Docx => run_blocking(format, move || docx_text(&data)).await?,
    };

    Ok(text.trim().to_string())
}

async fn run_blocking<F>(format: DocumentFormat, parse: F) -> Result<String, ExtractError>
where
    F: FnOnce() -> Result<String, ExtractError> + Send + 'static,
{
    tokio::task::spawn_blocking(parse).await.map_err(|e| {
        debug!("{} parser task failed: {e}", format.label());
        format.unreadable()
    })?
}

/// Paragraph text of a DOCX package, one paragraph per line.
fn docx_text(data: &[u8]) -> Result<String, ExtractError> {
    let unreadable = |e: &dyn std::fmt::Display| {
        debug!("DOCX extraction failed: {e}");
        DocumentFormat::Docx.unreadable()
    };

    let mut archive = zip::ZipArchive::new(Cursor::new(data)).map_err(|e| unreadable(&e))?;
    let mut body = archive.by_name(DOCX_BODY).map_err(|e| unreadable(&e))?;
    let mut xml = String::new();
    body.read_to_string(&mut xml).map_err(|e| unreadable(&e))?;

    Ok(document_xml_text(&xml))
}

/// Collects `<w:t>` runs from WordprocessingML, breaking lines at paragraph
/// ends and `<w:br/>`.
fn document_xml_text(xml: &str) -> String {
    let mut text = String::new();
    let mut rest = xml;

    while let Some(open) = rest.find('<') {
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        let tag = &rest[open + 1..open + close];
        rest = &rest[open + close + 1..];

        if let Some(closing) = tag.strip_prefix('/') {
            if closing.trim() == "w:p" {
                text.push('\n');
            }
            continue;
        }

        let name = tag
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or_default();
        match name {
            "w:t" if !tag.ends_with('/') => {
                let end = rest.find("</w:t>").unwrap_or(rest.len());
                text.push_str(&unescape_xml(&rest[..end]));
                rest = &rest[end..];
            }
            "w:tab" => text.push('\t'),
            "w:br" | "w:cr" => text.push('\n'),
            _ => {}
        }
    }

    text
}

fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn supported_list() -> String {
    SUPPORTED_FORMATS
        .iter()
        .map(|f| f.to_uppercase())
        .collect::<Vec<_>>()
        .join(", ")
}
