//! Top-level transcript document type.

use gpatally_core::{PageText, TranscriptError};
use gpatally_parse::{LopdfBackend, LopdfDocument, TranscriptBackend};

/// A transcript PDF opened for extraction.
///
/// Wraps a parsed document and exposes per-page positioned-text
/// extraction. Pages extract independently; the import pipeline joins
/// them with all-must-succeed semantics.
///
/// # Example
///
/// ```ignore
/// let transcript = Transcript::open(&bytes)?;
/// for index in 0..transcript.page_count() {
///     let page = transcript.extract_page(index)?;
///     // feed page.fragments to the line reconstructor
/// }
/// ```
pub struct Transcript {
    doc: LopdfDocument,
}

impl Transcript {
    /// Open a transcript from raw PDF bytes.
    ///
    /// # Errors
    ///
    /// [`TranscriptError::ParseError`] if the bytes are not a valid PDF,
    /// [`TranscriptError::EncryptedDocument`] if the file is encrypted.
    pub fn open(bytes: &[u8]) -> Result<Self, TranscriptError> {
        let doc = LopdfBackend::open(bytes).map_err(TranscriptError::from)?;
        Ok(Self { doc })
    }

    /// Open a transcript from a file path.
    ///
    /// Convenience wrapper around [`Transcript::open`] that reads the file
    /// into memory first.
    #[cfg(feature = "std")]
    pub fn open_file(path: impl AsRef<std::path::Path>) -> Result<Self, TranscriptError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::open(&bytes)
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        LopdfBackend::page_count(&self.doc)
    }

    /// Extract one page's metadata and positioned fragments (0-based
    /// index; the returned page numbers itself 1-based).
    ///
    /// # Errors
    ///
    /// Fails for an out-of-range index or an uninterpretable page.
    pub fn extract_page(&self, index: usize) -> Result<PageText, TranscriptError> {
        LopdfBackend::extract_page(&self.doc, index).map_err(TranscriptError::from)
    }

    /// Extract every page, joining with all-must-succeed semantics: any
    /// single page failure fails the whole call and no pages are returned.
    ///
    /// With the `parallel` feature, pages extract concurrently.
    pub fn extract_pages(&self) -> Result<Vec<PageText>, TranscriptError> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            (0..self.page_count())
                .into_par_iter()
                .map(|index| self.extract_page(index))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            (0..self.page_count())
                .map(|index| self.extract_page(index))
                .collect()
        }
    }
}

impl std::fmt::Debug for Transcript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transcript")
            .field("page_count", &self.page_count())
            .finish_non_exhaustive()
    }
}
