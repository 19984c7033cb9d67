//! Text extraction: turns an uploaded resume into plain text.
//!
//! PDF bytes are spooled to a scoped temp file for `pdf-extract`; the file is
//! removed when the guard drops, on success and failure alike.

use std::fmt::Display;
use std::io::Write;
use std::panic::{self, UnwindSafe};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The document parsed but carries no selectable text (typically a scan).
    #[error("Warning: No text could be extracted from this PDF. Please ensure your PDF contains selectable text.")]
    NoText,

    /// The extraction engine rejected the file. The cause is kept for logs only.
    #[error("Could not extract text from the PDF file. Please try with a different PDF.")]
    Unreadable(String),

    #[error("No resume text was provided.")]
    EmptyInput,
}

/// Plain text content of a resume. Never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentText(String);

impl DocumentText {
    /// Wraps pasted resume text, rejecting blank input.
    pub fn from_pasted(text: impl Into<String>) -> Result<Self, ExtractionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyInput);
        }
        Ok(Self(text))
    }

    fn from_extracted(text: String) -> Result<Self, ExtractionError> {
        if text.trim().is_empty() {
            return Err(ExtractionError::NoText);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }

    pub fn stats(&self) -> ResumeStats {
        let word_count = self.word_count();
        ResumeStats {
            word_count,
            character_count: self.0.chars().count(),
            estimated_pages: (word_count / WORDS_PER_PAGE).max(1),
            read_time_minutes: (word_count / WORDS_PER_MINUTE).max(1),
        }
    }
}

const WORDS_PER_PAGE: usize = 250;
const WORDS_PER_MINUTE: usize = 200;

/// Size signals for a resume. Pages and read time never drop below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeStats {
    pub word_count: usize,
    pub character_count: usize,
    pub estimated_pages: usize,
    pub read_time_minutes: usize,
}

/// Extracts text from PDF bytes. Blocking; call from `spawn_blocking` in async code.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<DocumentText, ExtractionError> {
    extract_with(bytes, |path| pdf_extract::extract_text(path))
}

/// Spools `bytes` to a uniquely-named temp file and runs `extractor` over it.
/// Panics inside the engine are treated like any other extraction failure.
fn extract_with<F, E>(bytes: &[u8], extractor: F) -> Result<DocumentText, ExtractionError>
where
    F: FnOnce(&Path) -> Result<String, E> + UnwindSafe,
    E: Display,
{
    let mut file = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(".pdf")
        .tempfile()
        .map_err(|e| ExtractionError::Unreadable(format!("temp file: {e}")))?;

    file.write_all(bytes)
        .and_then(|_| file.flush())
        .map_err(|e| ExtractionError::Unreadable(format!("temp file write: {e}")))?;

    let path = file.path().to_path_buf();
    debug!("Extracting {} bytes via {}", bytes.len(), path.display());

    let outcome = panic::catch_unwind(move || extractor(&path));

    // `file` drops here, deleting the temp file before we inspect the outcome.
    drop(file);

    match outcome {
        Ok(Ok(text)) => DocumentText::from_extracted(text),
        Ok(Err(e)) => {
            warn!("PDF extraction failed: {e}");
            Err(ExtractionError::Unreadable(e.to_string()))
        }
        Err(_) => {
            warn!("PDF extraction engine panicked");
            Err(ExtractionError::Unreadable(
                "extraction engine panicked".to_string(),
            ))
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_pasted_text_is_kept_verbatim() {
        let doc = DocumentText::from_pasted("  Jane Doe\nRust engineer  ").unwrap();
        assert_eq!(doc.as_str(), "  Jane Doe\nRust engineer  ");
        assert_eq!(doc.word_count(), 4);
    }

    #[test]
    fn test_stats_floor_at_one_page_and_minute() {
        let stats = DocumentText::from_pasted("one two three").unwrap().stats();
        assert_eq!(stats.word_count, 3);
        assert_eq!(stats.character_count, 13);
        assert_eq!(stats.estimated_pages, 1);
        assert_eq!(stats.read_time_minutes, 1);

        let long = DocumentText::from_pasted("word ".repeat(520)).unwrap().stats();
        assert_eq!(long.word_count, 520);
        assert_eq!(long.estimated_pages, 2);
        assert_eq!(long.read_time_minutes, 2);
    }

    #[test]
    fn test_blank_pasted_text_is_rejected() {
        let err = DocumentText::from_pasted(" \n\t ").unwrap_err();
        assert!(matches!(err, ExtractionError::EmptyInput));
    }

    #[test]
    fn test_whitespace_only_extraction_is_no_text() {
        let err = extract_with(b"%PDF-1.4", |_| Ok::<_, String>("  \n\n ".to_string()))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::NoText));
        assert!(err.to_string().contains("No text could be extracted"));
    }

    #[test]
    fn test_engine_error_is_unreadable() {
        let err = extract_with(b"junk", |_| Err::<String, _>("bad xref table")).unwrap_err();
        match err {
            ExtractionError::Unreadable(cause) => assert_eq!(cause, "bad xref table"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_engine_panic_is_unreadable() {
        let err = extract_with(b"junk", |_| -> Result<String, String> {
            panic!("engine blew up")
        })
        .unwrap_err();
        assert!(matches!(err, ExtractionError::Unreadable(_)));
    }

    #[test]
    fn test_extractor_sees_bytes_and_temp_file_is_removed() {
        let seen: Arc<Mutex<Option<PathBuf>>> = Arc::new(Mutex::new(None));
        let seen_in = Arc::clone(&seen);

        let doc = extract_with(b"resume bytes", move |path| {
            *seen_in.lock().unwrap() = Some(path.to_path_buf());
            std::fs::read_to_string(path)
        })
        .unwrap();

        assert_eq!(doc.as_str(), "resume bytes");
        let path = seen.lock().unwrap().clone().unwrap();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("pdf"));
        assert!(!path.exists(), "temp file should be removed after extraction");
    }

    #[test]
    fn test_temp_file_is_removed_on_failure() {
        let seen: Arc<Mutex<Option<PathBuf>>> = Arc::new(Mutex::new(None));
        let seen_in = Arc::clone(&seen);

        let _ = extract_with(b"junk", move |path| {
            *seen_in.lock().unwrap() = Some(path.to_path_buf());
            Err::<String, _>("corrupt")
        });

        let path = seen.lock().unwrap().clone().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_garbage_bytes_are_unreadable() {
        let err = extract_pdf_text(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::Unreadable(_)));
    }

    /// Builds a one-page PDF around `content`, with Helvetica bound to `/F1`
    /// and a correct xref table.
    pub(crate) fn single_page_pdf(content: &str) -> Vec<u8> {
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{content}\nendstream",
                content.len()
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }

        let xref_at = pdf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
            objects.len() + 1
        ));
        pdf.extend_from_slice(xref.as_bytes());
        pdf
    }

    /// A page that shows `text` in a single text object.
    pub(crate) fn text_pdf(text: &str) -> Vec<u8> {
        single_page_pdf(&format!("BT /F1 10 Tf 36 740 Td ({text}) Tj ET"))
    }

    #[test]
    fn test_real_pdf_text_is_extracted() {
        let doc = extract_pdf_text(&text_pdf("Jane Doe Senior Rust Engineer")).unwrap();
        assert!(doc.as_str().contains("Jane Doe Senior Rust Engineer"));
    }

    #[test]
    fn test_real_pdf_without_text_operators_is_no_text() {
        let err = extract_pdf_text(&single_page_pdf("0 0 m 100 100 l S")).unwrap_err();
        assert!(matches!(err, ExtractionError::NoText));
    }
}
