//! Document Renderer: contract text in, paginated PDF bytes out.
//!
//! Pipeline: `flow::build_flow` (paragraph split + bold markup) →
//! `layout::layout_flow` (line breaking + page flow) → `pdf::write_pdf`.
//! Stateless and deterministic: identical input yields identical bytes.
//! Rendering is CPU-bound; async callers run it inside `spawn_blocking`.

pub mod flow;
pub mod font_metrics;
pub mod layout;
pub mod markup;
pub mod pdf;
pub mod styles;

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

use crate::render::flow::{build_flow, paragraphs, CONTRACT_TITLE};
use crate::render::layout::layout_flow;
use crate::render::pdf::write_pdf;
use crate::render::styles::PageGeometry;

/// Download name offered to clients.
pub const CONTRACT_FILE_NAME: &str = "loan_contract.pdf";

pub const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("layout failed: {0}")]
    Layout(String),
}

/// An immutable rendered PDF.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Bytes,
    pub page_count: usize,
}

/// Renders contract text onto US Letter pages.
pub fn render_contract(text: &str) -> Result<RenderedDocument, RenderError> {
    render_with_geometry(text, &PageGeometry::letter())
}

pub fn render_with_geometry(
    text: &str,
    geometry: &PageGeometry,
) -> Result<RenderedDocument, RenderError> {
    let flow = build_flow(text);
    let laid_out = layout_flow(&flow, geometry)?;
    let page_count = laid_out.pages.len();
    let bytes = write_pdf(&laid_out, CONTRACT_TITLE)?;

    debug!(
        paragraphs = paragraphs(&flow).len(),
        pages = page_count,
        bytes = bytes.len(),
        "Rendered contract"
    );

    Ok(RenderedDocument {
        bytes: Bytes::from(bytes),
        page_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "**Loan Amount:** $10,000\n\nThis is clause two.";

    #[test]
    fn test_render_is_deterministic() {
        let first = render_contract(SAMPLE).unwrap();
        let second = render_contract(SAMPLE).unwrap();
        assert_eq!(first.bytes, second.bytes);
    }

    #[test]
    fn test_empty_text_renders_valid_single_page() {
        let doc = render_contract("").unwrap();
        assert_eq!(doc.page_count, 1);
        assert!(doc.bytes.starts_with(b"%PDF-"));
        let tail = &doc.bytes[doc.bytes.len().saturating_sub(16)..];
        assert!(tail.windows(5).any(|w| w == b"%%EOF"));
    }

    #[test]
    fn test_sample_contains_bold_and_plain_runs() {
        let doc = render_contract(SAMPLE).unwrap();
        let text = String::from_utf8_lossy(&doc.bytes);
        let bold_font = text.find("/F2 12").unwrap();
        let bold_run = text.find("(Loan Amount: ) Tj").unwrap();
        let plain_font = text[bold_run..].find("/F1 12").unwrap() + bold_run;
        let plain_run = text.find("($10,000) Tj").unwrap();
        assert!(bold_font < bold_run && bold_run < plain_font && plain_font < plain_run);
        assert!(text.contains("(This is clause two.) Tj"));
        assert!(!text.contains("**"));
    }

    #[test]
    fn test_long_contract_spans_pages() {
        let clause = "The Borrower shall repay the principal together with accrued interest \
                      in equal monthly installments as set out in the schedule below.";
        let text = vec![clause; 120].join("\n\n");
        let doc = render_contract(&text).unwrap();
        assert!(doc.page_count > 1);
        let pdf = String::from_utf8_lossy(&doc.bytes);
        assert!(pdf.contains(&format!("/Count {}", doc.page_count)));
    }

    #[test]
    fn test_extracted_text_contains_title_and_clauses() {
        let doc = render_contract(SAMPLE).unwrap();
        let extracted = pdf_extract::extract_text_from_mem(&doc.bytes).unwrap();
        assert!(extracted.contains("Loan Contract"), "got: {extracted}");
        assert!(extracted.contains("clause"), "got: {extracted}");
    }

    #[test]
    fn test_layout_failure_propagates() {
        let cramped = PageGeometry {
            height: 100.0,
            ..PageGeometry::letter()
        };
        let err = render_with_geometry(SAMPLE, &cramped).unwrap_err();
        assert!(matches!(err, RenderError::Layout(_)));
    }
}
