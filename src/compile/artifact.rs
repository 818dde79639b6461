//! Structural validation of compiled PDF artifacts.
//!
//! The backend boundary promises a `%PDF`-signed binary on success; this
//! module checks that promise before the pipeline reports success. The
//! checks are structural, not a full parse: signature, trailer, at least
//! one page object, and whether any text stream is present.

use memchr::memmem;

use crate::error::Error;

/// Structural summary of a validated artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfInfo {
    pub size: usize,
    pub page_count: usize,
    pub has_text: bool,
}

/// Validate the structural integrity of a PDF artifact.
pub fn validate_pdf(data: &[u8]) -> Result<PdfInfo, Error> {
    if data.is_empty() {
        return Err(Error::Artifact("artifact is empty".into()));
    }
    if !data.starts_with(b"%PDF-") {
        return Err(Error::Artifact("missing %PDF signature".into()));
    }
    if memmem::find(data, b"%%EOF").is_none() {
        return Err(Error::Artifact("missing %%EOF trailer".into()));
    }

    let pages = count(data, b"/Type /Pages") + count(data, b"/Type/Pages");
    let page_like = count(data, b"/Type /Page") + count(data, b"/Type/Page");
    // `/Type /Page` is a prefix of `/Type /Pages`; subtract the tree nodes.
    let page_count = page_like.saturating_sub(pages);
    if page_count == 0 {
        return Err(Error::Artifact("no page objects found".into()));
    }

    let has_text = memmem::find(data, b"BT").is_some() && memmem::find(data, b"ET").is_some();

    Ok(PdfInfo {
        size: data.len(),
        page_count,
        has_text,
    })
}

fn count(haystack: &[u8], needle: &[u8]) -> usize {
    memmem::find_iter(haystack, needle).count()
}
