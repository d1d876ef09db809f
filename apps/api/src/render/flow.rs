//! Turns raw contract text into the ordered list of flow elements that the
//! layout engine places onto pages.

use crate::render::markup::{format_paragraph, TextRun};
use crate::render::styles::{ParagraphStyle, BODY, SPACER_HEIGHT, TITLE};

/// Heading placed at the top of every contract.
pub const CONTRACT_TITLE: &str = "Loan Contract";

/// Paragraph boundary in model output.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// A discrete unit of document content queued for layout.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowElement {
    Title {
        text: String,
        style: ParagraphStyle,
    },
    Paragraph {
        runs: Vec<TextRun>,
        style: ParagraphStyle,
    },
    Spacer {
        height: f32,
    },
}

/// Builds the full flow: title, spacer, then one paragraph + spacer per segment.
///
/// Segments are produced by a plain split on `"\n\n"`, so empty text still
/// yields a single (empty) paragraph and runs of blank lines yield empty ones.
pub fn build_flow(text: &str) -> Vec<FlowElement> {
    let mut flow = vec![
        FlowElement::Title {
            text: CONTRACT_TITLE.to_string(),
            style: TITLE,
        },
        FlowElement::Spacer {
            height: SPACER_HEIGHT,
        },
    ];

    for segment in text.split(PARAGRAPH_SEPARATOR) {
        flow.push(FlowElement::Paragraph {
            runs: format_paragraph(segment),
            style: BODY,
        });
        flow.push(FlowElement::Spacer {
            height: SPACER_HEIGHT,
        });
    }

    flow
}

/// Only the body paragraphs of a flow, in order.
pub fn paragraphs(flow: &[FlowElement]) -> Vec<&[TextRun]> {
    flow.iter()
        .filter_map(|element| match element {
            FlowElement::Paragraph { runs, .. } => Some(runs.as_slice()),
            _ => None,
        })
        .collect()
}
