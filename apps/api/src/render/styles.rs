/// Horizontal alignment of the lines inside a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Center,
    /// Every line but the last is stretched to the frame width.
    Justify,
}

/// A named bundle of font size, leading, alignment and spacing-after.
///
/// Sizes are in points. `leading` is the baseline-to-baseline distance.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    pub name: &'static str,
    pub font_size: f32,
    pub leading: f32,
    pub space_after: f32,
    pub alignment: Alignment,
}

/// Heading at the top of the first page.
pub const TITLE: ParagraphStyle = ParagraphStyle {
    name: "ContractTitle",
    font_size: 18.0,
    leading: 22.0,
    space_after: 20.0,
    alignment: Alignment::Center,
};

/// Every contract paragraph.
pub const BODY: ParagraphStyle = ParagraphStyle {
    name: "ContractBody",
    font_size: 12.0,
    leading: 14.0,
    space_after: 0.0,
    alignment: Alignment::Justify,
};

/// Fixed vertical gap after the title and after each paragraph.
pub const SPACER_HEIGHT: f32 = 12.0;

/// Page geometry in points.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// Inner padding of the content frame, applied on all four sides.
    pub frame_padding: f32,
}

impl PageGeometry {
    /// US Letter (8.5" × 11") with 72/72/72/18pt margins and a 6pt frame padding.
    pub const fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margin_top: 72.0,
            margin_bottom: 18.0,
            margin_left: 72.0,
            margin_right: 72.0,
            frame_padding: 6.0,
        }
    }

    /// Usable line width inside the padded frame.
    pub fn text_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right - 2.0 * self.frame_padding
    }

    /// Usable height inside the padded frame.
    pub fn text_height(&self) -> f32 {
        self.height - self.margin_top - self.margin_bottom - 2.0 * self.frame_padding
    }

    /// x coordinate of the left edge of the text area.
    pub fn text_left(&self) -> f32 {
        self.margin_left + self.frame_padding
    }

    /// y coordinate of the top edge of the text area (PDF origin is bottom-left).
    pub fn text_top(&self) -> f32 {
        self.height - self.margin_top - self.frame_padding
    }
}
