//! Layout engine: places flow elements onto fixed-size pages.
//!
//! # Model
//! - Whitespace inside a paragraph collapses to single word spaces.
//! - Lines are filled greedily (same strategy as the width simulation the
//!   metrics were built for): a word moves to the next line when it would
//!   overflow the frame. A single word wider than the frame gets its own line.
//! - Paragraphs split across pages at line boundaries. A lone first line is
//!   never left at the bottom of a page when more of the paragraph follows.
//! - Spacers that do not fit end the page and are dropped. Spacers are never
//!   placed at the top of a page.
//!
//! Coordinates are PDF user space: points, origin at the bottom-left corner.

use tracing::debug;

use crate::render::flow::FlowElement;
use crate::render::font_metrics::{get_metrics, FontFace};
use crate::render::markup::TextRun;
use crate::render::styles::{Alignment, PageGeometry, ParagraphStyle};
use crate::render::RenderError;

/// Tolerance for floating-point height comparisons.
const EPSILON: f32 = 1e-3;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// Text drawn in one face at one size.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub face: FontFace,
    pub font_size: f32,
}

/// A line with its final position on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f32,
    pub baseline: f32,
    /// Extra space added to every word gap (PDF `Tw`), non-zero only for justified lines.
    pub word_spacing: f32,
    /// Natural width of the line before any justification.
    pub width: f32,
    pub fragments: Vec<Fragment>,
}

impl PlacedLine {
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// The result of laying out a full flow.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutDocument {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

// ────────────────────────────────────────────────────────────────────────────
// Line breaking
// ────────────────────────────────────────────────────────────────────────────

/// A word may mix faces, e.g. `**Borrower**'s` is one word in two pieces.
#[derive(Debug, Clone, Default)]
struct Word {
    pieces: Vec<(String, bool)>,
    width: f32,
}

/// A wrapped but not yet positioned line.
#[derive(Debug, Clone)]
struct Line {
    words: Vec<Word>,
    width: f32,
}

fn split_words(runs: &[TextRun], font_size: f32) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current = Word::default();

    for run in runs {
        for c in run.text.chars() {
            if c.is_whitespace() {
                if !current.pieces.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                continue;
            }
            match current.pieces.last_mut() {
                Some((text, bold)) if *bold == run.bold => text.push(c),
                _ => current.pieces.push((c.to_string(), run.bold)),
            }
        }
    }
    if !current.pieces.is_empty() {
        words.push(current);
    }

    for word in &mut words {
        word.width = word
            .pieces
            .iter()
            .map(|(text, bold)| get_metrics(FontFace::for_run(*bold)).measure_str(text, font_size))
            .sum();
    }

    words
}

fn wrap_words(words: Vec<Word>, max_width: f32, space_width: f32) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();
    let mut current = Line {
        words: Vec::new(),
        width: 0.0,
    };

    for word in words {
        if current.words.is_empty() {
            current.width = word.width;
            current.words.push(word);
            continue;
        }
        if current.width + space_width + word.width > max_width + EPSILON {
            let full = std::mem::replace(
                &mut current,
                Line {
                    width: word.width,
                    words: vec![word],
                },
            );
            lines.push(full);
        } else {
            current.width += space_width + word.width;
            current.words.push(word);
        }
    }
    if !current.words.is_empty() {
        lines.push(current);
    }

    lines
}

/// Wraps a paragraph's runs into lines for the given style and width.
fn break_lines(runs: &[TextRun], style: &ParagraphStyle, max_width: f32) -> Vec<Line> {
    let space_width = get_metrics(FontFace::Helvetica).space_width(style.font_size);
    wrap_words(split_words(runs, style.font_size), max_width, space_width)
}

/// Joins a line's words into fragments; the gap after a word takes that word's face.
fn line_fragments(line: &Line, font_size: f32) -> Vec<Fragment> {
    let mut fragments: Vec<Fragment> = Vec::new();
    let word_count = line.words.len();

    for (i, word) in line.words.iter().enumerate() {
        let last_piece = word.pieces.len().saturating_sub(1);
        for (j, (text, bold)) in word.pieces.iter().enumerate() {
            let face = FontFace::for_run(*bold);
            let mut piece = text.clone();
            if j == last_piece && i + 1 < word_count {
                piece.push(' ');
            }
            match fragments.last_mut() {
                Some(last) if last.face == face => last.text.push_str(&piece),
                _ => fragments.push(Fragment {
                    text: piece,
                    face,
                    font_size,
                }),
            }
        }
    }

    fragments
}

// ────────────────────────────────────────────────────────────────────────────
// Page flow
// ────────────────────────────────────────────────────────────────────────────

/// Mutable cursor over the page currently being filled.
struct PageCursor<'a> {
    geometry: &'a PageGeometry,
    pages: Vec<Page>,
    current: Page,
    /// Height still free in the current frame.
    available: f32,
}

impl<'a> PageCursor<'a> {
    fn new(geometry: &'a PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            current: Page::default(),
            available: geometry.text_height(),
        }
    }

    fn is_page_empty(&self) -> bool {
        self.current.lines.is_empty()
    }

    fn new_page(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.pages.push(finished);
        self.available = self.geometry.text_height();
    }

    fn place_spacer(&mut self, height: f32) {
        if self.is_page_empty() {
            return;
        }
        if height > self.available + EPSILON {
            self.new_page();
        } else {
            self.available -= height;
        }
    }

    fn place_line(&mut self, line: &Line, style: &ParagraphStyle, is_last: bool) {
        let top = self.geometry.text_top() - (self.geometry.text_height() - self.available);
        let text_width = self.geometry.text_width();
        let slack = (text_width - line.width).max(0.0);
        let gaps = line.words.len().saturating_sub(1);

        let (x_offset, word_spacing) = match style.alignment {
            Alignment::Center => (slack / 2.0, 0.0),
            Alignment::Justify if !is_last && gaps > 0 => (0.0, slack / gaps as f32),
            Alignment::Justify => (0.0, 0.0),
        };

        self.current.lines.push(PlacedLine {
            x: self.geometry.text_left() + x_offset,
            baseline: top - style.font_size,
            word_spacing,
            width: line.width,
            fragments: line_fragments(line, style.font_size),
        });
        self.available -= style.leading;
    }

    fn place_paragraph(
        &mut self,
        runs: &[TextRun],
        style: &ParagraphStyle,
    ) -> Result<(), RenderError> {
        if style.leading > self.geometry.text_height() + EPSILON {
            return Err(RenderError::Layout(format!(
                "style '{}' has a leading of {}pt, taller than the {}pt frame",
                style.name,
                style.leading,
                self.geometry.text_height()
            )));
        }

        let lines = break_lines(runs, style, self.geometry.text_width());
        let total = lines.len();
        let mut next = 0usize;

        while next < total {
            let remaining = total - next;
            let mut fit = ((self.available + EPSILON) / style.leading).floor() as usize;
            fit = fit.min(remaining);
            // Keep at least two lines together at the start of a split paragraph.
            if next == 0 && fit == 1 && remaining > 1 && !self.is_page_empty() {
                fit = 0;
            }
            if fit == 0 {
                if self.is_page_empty() {
                    return Err(RenderError::Layout(format!(
                        "no room for a single {}pt line on an empty page",
                        style.leading
                    )));
                }
                self.new_page();
                continue;
            }

            for i in next..next + fit {
                self.place_line(&lines[i], style, i + 1 == total);
            }
            next += fit;

            if next < total {
                self.new_page();
            }
        }

        self.available = (self.available - style.space_after).max(0.0);
        Ok(())
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.is_page_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

/// Lays out a flow onto pages of the given geometry.
///
/// Returns at least one page, even when every paragraph is empty.
pub fn layout_flow(
    flow: &[FlowElement],
    geometry: &PageGeometry,
) -> Result<LaidOutDocument, RenderError> {
    let mut cursor = PageCursor::new(geometry);

    for element in flow {
        match element {
            FlowElement::Title { text, style } => {
                cursor.place_paragraph(&[TextRun::plain(text.clone())], style)?;
            }
            FlowElement::Paragraph { runs, style } => {
                cursor.place_paragraph(runs, style)?;
            }
            FlowElement::Spacer { height } => cursor.place_spacer(*height),
        }
    }

    let pages = cursor.finish();
    debug!(pages = pages.len(), "Layout complete");

    Ok(LaidOutDocument {
        geometry: geometry.clone(),
        pages,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::flow::build_flow;
    use crate::render::styles::{BODY, TITLE};

    fn clause(words: usize) -> String {
        vec!["obligation"; words].join(" ")
    }

    #[test]
    fn test_title_is_centered_on_first_page() {
        let doc = layout_flow(&build_flow(""), &PageGeometry::letter()).unwrap();
        assert_eq!(doc.pages.len(), 1);
        let title = &doc.pages[0].lines[0];
        assert_eq!(title.text(), "Loan Contract");
        let geometry = PageGeometry::letter();
        let expected_x = geometry.text_left() + (geometry.text_width() - title.width) / 2.0;
        assert!((title.x - expected_x).abs() < 1e-3);
        assert_eq!(title.fragments[0].font_size, 18.0);
    }

    #[test]
    fn test_empty_text_renders_only_title() {
        let doc = layout_flow(&build_flow(""), &PageGeometry::letter()).unwrap();
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.pages[0].lines.len(), 1);
    }

    #[test]
    fn test_whitespace_collapses_inside_paragraph() {
        let lines = break_lines(&[TextRun::plain("  one \n two\t three  ")], &BODY, 456.0);
        assert_eq!(lines.len(), 1);
        let fragments = line_fragments(&lines[0], BODY.font_size);
        assert_eq!(fragments[0].text, "one two three");
    }

    #[test]
    fn test_mixed_faces_produce_separate_fragments() {
        let runs = vec![TextRun::bold("Loan Amount:"), TextRun::plain(" $10,000")];
        let lines = break_lines(&runs, &BODY, 456.0);
        let fragments = line_fragments(&lines[0], BODY.font_size);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, "Loan Amount: ");
        assert_eq!(fragments[0].face, FontFace::HelveticaBold);
        assert_eq!(fragments[1].text, "$10,000");
        assert_eq!(fragments[1].face, FontFace::Helvetica);
    }

    #[test]
    fn test_bold_inside_word_stays_one_word() {
        let runs = vec![TextRun::bold("Borrower"), TextRun::plain("'s duties")];
        let words = split_words(&runs, 12.0);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].pieces.len(), 2);
    }

    #[test]
    fn test_long_paragraph_wraps_within_frame() {
        let text = clause(120);
        let doc = layout_flow(&build_flow(&text), &PageGeometry::letter()).unwrap();
        let geometry = PageGeometry::letter();
        let body_lines: Vec<&PlacedLine> = doc.pages[0].lines.iter().skip(1).collect();
        assert!(body_lines.len() > 1);
        for line in &body_lines {
            assert!(line.width <= geometry.text_width() + 1e-3);
        }
    }

    #[test]
    fn test_justified_lines_stretch_except_last() {
        let text = clause(120);
        let doc = layout_flow(&build_flow(&text), &PageGeometry::letter()).unwrap();
        let body_lines: Vec<&PlacedLine> = doc.pages[0].lines.iter().skip(1).collect();
        let (last, rest) = body_lines.split_last().unwrap();
        assert_eq!(last.word_spacing, 0.0);
        for line in rest {
            assert!(line.word_spacing >= 0.0);
            let gaps = line.text().matches(' ').count() as f32;
            let stretched = line.width + gaps * line.word_spacing;
            assert!((stretched - 456.0).abs() < 1e-2, "stretched to {stretched}");
        }
    }

    #[test]
    fn test_many_paragraphs_flow_onto_several_pages() {
        let text = (0..80).map(|_| clause(30)).collect::<Vec<_>>().join("\n\n");
        let geometry = PageGeometry::letter();
        let doc = layout_flow(&build_flow(&text), &geometry).unwrap();
        assert!(doc.pages.len() > 1, "expected multiple pages");
        let bottom = geometry.margin_bottom + geometry.frame_padding;
        for page in &doc.pages {
            assert!(!page.lines.is_empty());
            for line in &page.lines {
                assert!(line.baseline >= bottom - 1e-3);
                assert!(line.baseline <= geometry.text_top());
            }
        }
    }

    #[test]
    fn test_lines_on_a_page_descend() {
        let text = (0..5).map(|_| clause(40)).collect::<Vec<_>>().join("\n\n");
        let doc = layout_flow(&build_flow(&text), &PageGeometry::letter()).unwrap();
        let baselines: Vec<f32> = doc.pages[0].lines.iter().map(|l| l.baseline).collect();
        assert!(baselines.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_paragraph_does_not_leave_orphan_first_line() {
        let geometry = PageGeometry::letter();
        let mut cursor = PageCursor::new(&geometry);
        cursor
            .place_paragraph(&[TextRun::plain("Heading")], &TITLE)
            .unwrap();
        // Leave room for exactly one body line.
        cursor.available = BODY.leading + 1.0;
        cursor
            .place_paragraph(&[TextRun::plain(clause(60))], &BODY)
            .unwrap();
        let pages = cursor.finish();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].lines.len(), 1, "only the title on page one");
    }

    #[test]
    fn test_spacer_is_not_carried_to_new_page() {
        let geometry = PageGeometry::letter();
        let mut cursor = PageCursor::new(&geometry);
        cursor
            .place_paragraph(&[TextRun::plain("Heading")], &TITLE)
            .unwrap();
        cursor.available = 5.0;
        cursor.place_spacer(12.0);
        assert_eq!(cursor.pages.len(), 1);
        assert!(cursor.is_page_empty());
        assert_eq!(cursor.available, geometry.text_height());
        cursor.place_spacer(12.0);
        assert_eq!(cursor.available, geometry.text_height());
    }

    #[test]
    fn test_oversized_leading_is_a_layout_error() {
        let tiny = PageGeometry {
            height: 120.0,
            ..PageGeometry::letter()
        };
        // text height = 120 - 72 - 18 - 12 = 18pt, less than the 22pt title leading
        let err = layout_flow(&build_flow("x"), &tiny).unwrap_err();
        assert!(matches!(err, RenderError::Layout(_)));
    }

    /// Width a viewer draws for a placed line, including justification.
    fn drawn_width(line: &PlacedLine) -> f32 {
        let glyphs: f32 = line
            .fragments
            .iter()
            .map(|f| get_metrics(f.face).measure_str(&f.text, f.font_size))
            .sum();
        let gaps = line.text().matches(' ').count() as f32;
        glyphs + gaps * line.word_spacing
    }

    #[test]
    fn test_dashes_and_curly_quotes_stay_inside_frame() {
        let clause = "The Borrower\u{2014}and the Guarantor\u{2014}agree\u{2014}jointly\u{2014}that the \
                      \u{201C}Lender\u{2019}s\u{201D} rights \u{2026} survive\u{2014}in full\u{2014}any \
                      assignment\u{2014}whatsoever\u{2014}of this Agreement\u{2019}s terms.";
        let text = vec![clause; 4].join(" ");
        let geometry = PageGeometry::letter();
        let doc = layout_flow(&build_flow(&text), &geometry).unwrap();

        let body_lines: Vec<&PlacedLine> = doc.pages[0].lines.iter().skip(1).collect();
        assert!(body_lines.len() > 2);
        let (last, rest) = body_lines.split_last().unwrap();
        assert!(drawn_width(last) <= geometry.text_width() + 1e-2);
        for line in rest {
            let drawn = drawn_width(line);
            assert!(
                (drawn - geometry.text_width()).abs() < 1e-2,
                "justified line drawn at {drawn}pt: {}",
                line.text()
            );
        }
    }

    #[test]
    fn test_em_dash_is_measured_at_full_em() {
        let dashed = break_lines(&[TextRun::plain("a\u{2014}b")], &BODY, 456.0);
        let plain = break_lines(&[TextRun::plain("ab")], &BODY, 456.0);
        let dash = dashed[0].width - plain[0].width;
        assert!((dash - 12.0).abs() < 1e-3, "em dash measured {dash}pt at 12pt");
    }

    #[test]
    fn test_overlong_word_gets_its_own_line() {
        let word = "x".repeat(200);
        let text = format!("short {word} tail");
        let lines = break_lines(&[TextRun::plain(text)], &BODY, 456.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].words.len(), 1);
    }
}
