//! PDF text extraction for uploaded candidate files.
//!
//! `pdf-extract` is CPU-bound, so extraction runs under `spawn_blocking`.
//! Extracted text is tidied before it is sent to the analysis backend:
//! PDF extractors leave ligature code points and typographic quotes behind
//! that confuse downstream keyword matching.

use anyhow::anyhow;
use bytes::Bytes;

use crate::errors::AppError;

/// Extracts raw text from an in-memory PDF. Empty input yields empty text.
pub async fn extract_pdf_text(data: Bytes) -> Result<String, AppError> {
    if data.is_empty() {
        return Ok(String::new());
    }

    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| AppError::Internal(anyhow!("extraction task panicked: {e}")))?
        .map_err(|e| AppError::Pdf(e.to_string()))?;

    Ok(tidy_text(&text))
}

/// Replaces ligatures and typographic punctuation, and collapses whitespace
/// runs to single spaces.
pub fn tidy_text(text: &str) -> String {
    text.replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .replace('\u{FB05}', "st")
        .replace('\u{FB06}', "st")
        .replace('\u{2019}', "'")
        .replace('\u{2018}', "'")
        .replace('\u{201C}', "\"")
        .replace('\u{201D}', "\"")
        .replace('\u{2013}', "-")
        .replace('\u{2014}', "-")
        .replace('\u{2026}', "...")
        .replace('\u{00A0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tidy_text_replaces_ligatures() {
        assert_eq!(tidy_text("e\u{FB03}cient o\u{FB00}er"), "efficient offer");
    }

    #[test]
    fn test_tidy_text_normalizes_quotes_and_dashes() {
        assert_eq!(
            tidy_text("\u{201C}hands\u{2010}on\u{201D} 2019\u{2013}2023"),
            "\"hands\u{2010}on\" 2019-2023"
        );
    }

    #[test]
    fn test_tidy_text_collapses_whitespace() {
        assert_eq!(tidy_text("  one \n\n two\tthree  "), "one two three");
    }

    #[tokio::test]
    async fn test_empty_upload_extracts_to_empty_text() {
        let text = extract_pdf_text(Bytes::new()).await.unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_garbage_bytes_fail_as_pdf_error() {
        let result = extract_pdf_text(Bytes::from_static(b"not a pdf")).await;
        assert!(matches!(result, Err(AppError::Pdf(_))));
    }
}
