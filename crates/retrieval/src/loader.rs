//! PDF document loading.

use crate::types::Document;
use docseek_core::{AppError, AppResult, LoadPolicy};
use std::panic;
use std::path::{Path, PathBuf};

/// Turns file paths into documents.
pub trait DocumentLoader: Send + Sync {
    /// One document per loadable path, in input order.
    fn load(&self, paths: &[PathBuf]) -> AppResult<Vec<Document>>;
}

/// Loads PDF files, merging all pages of a file into one document.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfLoader {
    policy: LoadPolicy,
}

impl PdfLoader {
    pub fn new(policy: LoadPolicy) -> Self {
        Self { policy }
    }

    /// Load a single PDF.
    ///
    /// # Errors
    /// `DocumentLoad` naming `path` if the file is missing, is not a PDF, or
    /// cannot be parsed.
    pub fn load_one(&self, path: &Path) -> AppResult<Document> {
        if !path.is_file() {
            return Err(AppError::document_load(path, "file not found"));
        }

        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            return Err(AppError::document_load(path, "unsupported format, expected a PDF"));
        }

        // pdf-extract panics on some malformed files, e.g. undefined fonts
        let pages = panic::catch_unwind(|| pdf_extract::extract_text_by_pages(path))
            .map_err(|_| AppError::document_load(path, "PDF parser panicked"))?
            .map_err(|e| AppError::document_load(path, e))?;

        tracing::debug!("Loaded {:?} ({} pages)", path, pages.len());
        Ok(Document::from_pages(&pages, path))
    }
}

impl DocumentLoader for PdfLoader {
    fn load(&self, paths: &[PathBuf]) -> AppResult<Vec<Document>> {
        let mut docs = Vec::with_capacity(paths.len());

        for path in paths {
            match self.load_one(path) {
                Ok(doc) => docs.push(doc),
                Err(e) if self.policy == LoadPolicy::Skip => {
                    tracing::warn!("Skipping unreadable document: {}", e);
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!("Loaded {} of {} documents", docs.len(), paths.len());
        Ok(docs)
    }
}
