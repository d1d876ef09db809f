//! PDF serialization for laid-out contracts, built on `pdf-writer`.
//!
//! Object layout:
//! ```text
//! 1 Catalog   2 Pages   3 Helvetica   4 Helvetica-Bold   5 Info
//! 6, 7        page 1 + its content stream
//! 8, 9        page 2 + its content stream, ...
//! ```
//! Fonts are the base-14 faces with WinAnsiEncoding, so nothing is embedded and
//! the metric tables in `font_metrics` are authoritative. Content streams are
//! uncompressed and the Info dictionary carries no timestamps: the same layout
//! always produces the same bytes.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::render::font_metrics::{encode_win_ansi, FontFace};
use crate::render::layout::{LaidOutDocument, Page};
use crate::render::RenderError;

const CATALOG_ID: i32 = 1;
const PAGES_ID: i32 = 2;
const INFO_ID: i32 = 5;
const FIRST_PAGE_ID: i32 = 6;
const FONT_IDS: [(FontFace, i32); 2] = [(FontFace::Helvetica, 3), (FontFace::HelveticaBold, 4)];

const PRODUCER: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Serializes a laid-out document into PDF bytes.
pub fn write_pdf(doc: &LaidOutDocument, title: &str) -> Result<Vec<u8>, RenderError> {
    let page_count = i32::try_from(doc.pages.len())
        .map_err(|_| RenderError::Layout(format!("{} pages is too many", doc.pages.len())))?;
    let page_ids: Vec<Ref> = (0..page_count)
        .map(|i| Ref::new(FIRST_PAGE_ID + i * 2))
        .collect();

    let catalog_id = Ref::new(CATALOG_ID);
    let pages_id = Ref::new(PAGES_ID);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(page_count);

    for (face, id) in FONT_IDS {
        pdf.type1_font(Ref::new(id))
            .base_font(Name(face.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    pdf.document_info(Ref::new(INFO_ID))
        .title(TextStr(title))
        .producer(TextStr(PRODUCER));

    let media_box = Rect::new(0.0, 0.0, doc.geometry.width, doc.geometry.height);
    for (page, page_id) in doc.pages.iter().zip(&page_ids) {
        let content_id = Ref::new(page_id.get() + 1);

        let mut writer = pdf.page(*page_id);
        writer.media_box(media_box);
        writer.parent(pages_id);
        writer.contents(content_id);
        let mut resources = writer.resources();
        let mut fonts = resources.fonts();
        for (face, id) in FONT_IDS {
            fonts.pair(Name(face.resource_name().as_bytes()), Ref::new(id));
        }
        fonts.finish();
        resources.finish();
        writer.finish();

        pdf.stream(content_id, &page_content(page));
    }

    Ok(pdf.finish())
}

/// Builds the content stream for one page: one text object per line.
fn page_content(page: &Page) -> Vec<u8> {
    let mut content = Content::new();
    for line in &page.lines {
        content.begin_text();
        content.set_word_spacing(line.word_spacing);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, line.x, line.baseline]);
        for fragment in &line.fragments {
            content.set_font(
                Name(fragment.face.resource_name().as_bytes()),
                fragment.font_size,
            );
            content.show(Str(&encode_win_ansi(&fragment.text)));
        }
        content.end_text();
    }
    content.finish()
}
