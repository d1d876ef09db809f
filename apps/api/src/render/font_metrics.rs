//! Static glyph-width tables for the two base-14 faces the contract uses.
//!
//! Widths come from the Adobe Helvetica / Helvetica-Bold AFM files and are
//! stored in thousandths of an em, exactly as the AFM lists them. Because the
//! fonts are never embedded, these tables are the only metrics the layout
//! engine ever sees, so measured widths match what a viewer draws.
//!
//! Text is drawn in WinAnsiEncoding. Each face has two tables: printable
//! ASCII 0x20..=0x7E (index = code - 32) and the upper half 0x80..=0xFF
//! (index = code - 128). A character with no WinAnsi code is drawn as `?`
//! and measured as `?`.

// ────────────────────────────────────────────────────────────────────────────
// Font faces
// ────────────────────────────────────────────────────────────────────────────

/// The faces available to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
}

impl FontFace {
    /// The face used for a run, given whether the run is emphasized.
    pub fn for_run(bold: bool) -> Self {
        if bold {
            FontFace::HelveticaBold
        } else {
            FontFace::Helvetica
        }
    }

    /// PostScript name written into the font dictionary.
    pub fn base_font(&self) -> &'static str {
        match self {
            FontFace::Helvetica => "Helvetica",
            FontFace::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used by content-stream `Tf` operators.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontFace::Helvetica => "F1",
            FontFace::HelveticaBold => "F2",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WinAnsi encoding
// ────────────────────────────────────────────────────────────────────────────

/// Drawn in place of characters the base-14 faces cannot show.
pub const REPLACEMENT_CHAR: char = '?';

/// Maps a character to its WinAnsiEncoding byte, if it has one.
pub fn win_ansi_code(c: char) -> Option<u8> {
    let code = match c {
        ' '..='~' | '\u{A0}'..='\u{FF}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(code)
}

/// Encodes text as WinAnsi bytes, substituting `?` for anything unencodable.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_code(c).unwrap_or(REPLACEMENT_CHAR as u8))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one face.
///
/// `widths[i]` = width of ASCII character `(i + 32)` in 1/1000 em;
/// `upper[i]` = width of WinAnsi code `(i + 128)`. Codes WinAnsi leaves
/// undefined hold 0 and are never produced by `win_ansi_code`.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    pub face: FontFace,
    widths: [u16; 95],
    upper: [u16; 128],
}

impl FontMetricTable {
    /// Width in 1/1000 em of the glyph actually drawn for `c`.
    pub fn char_width(&self, c: char) -> u16 {
        match win_ansi_code(c).unwrap_or(REPLACEMENT_CHAR as u8) {
            code @ 0x20..=0x7E => self.widths[code as usize - 32],
            code @ 0x80..=0xFF => self.upper[code as usize - 128],
            _ => self.widths[REPLACEMENT_CHAR as usize - 32],
        }
    }

    /// Measures the rendered width of a string in points at `font_size`.
    pub fn measure_str(&self, s: &str, font_size: f32) -> f32 {
        let units: u32 = s.chars().map(|c| self.char_width(c) as u32).sum();
        units as f32 * font_size / 1000.0
    }

    /// Width of one word space in points at `font_size`.
    pub fn space_width(&self, font_size: f32) -> f32 {
        self.char_width(' ') as f32 * font_size / 1000.0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    face: FontFace::Helvetica,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        278,  278,  355,  556,  556,  889,  667,  191,  333,  333,  389,  584,  278,  333,  278,  278,
        // 0     1     2     3     4     5     6     7     8     9
        556,  556,  556,  556,  556,  556,  556,  556,  556,  556,
        // :     ;     <     =     >     ?     @
        278,  278,  584,  584,  584,  556,  1015,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        667,  667,  722,  722,  667,  611,  778,  722,  278,  500,  667,  556,  833,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        722,  778,  667,  778,  722,  667,  611,  722,  667,  944,  667,  667,  611,
        // [     \     ]     ^     _     `
        278,  278,  278,  469,  556,  333,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        556,  556,  500,  556,  556,  278,  556,  556,  222,  222,  500,  222,  833,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        556,  556,  556,  556,  333,  500,  278,  556,  500,  722,  500,  500,  500,
        // {     |     }     ~
        334,  260,  334,  584,
    ],
    #[rustfmt::skip]
    upper: [
        // 0x80  €  ‚  ƒ  „  …  †  ‡  ˆ  ‰  Š  ‹  Œ  Ž
        556,    0,  222,  556,  333, 1000,  556,  556,  333, 1000,  667,  333, 1000,    0,  611,    0,
        // 0x90  ‘  ’  “  ”  •  –  —  ˜  ™  š  ›  œ  ž  Ÿ
          0,  222,  222,  333,  333,  350,  556, 1000,  333, 1000,  500,  333,  944,    0,  500,  667,
        // 0xA0  nbsp ¡ ¢ £ ¤ ¥ ¦ § ¨ © ª « ¬ shy ® ¯
        278,  333,  556,  556,  556,  556,  260,  556,  333,  737,  370,  556,  584,  333,  737,  333,
        // 0xB0  ° ± ² ³ ´ µ ¶ · ¸ ¹ º » ¼ ½ ¾ ¿
        400,  584,  333,  333,  333,  556,  537,  278,  333,  333,  365,  556,  834,  834,  834,  611,
        // 0xC0  À-Å Æ Ç È-Ë Ì-Ï
        667,  667,  667,  667,  667,  667, 1000,  722,  667,  667,  667,  667,  278,  278,  278,  278,
        // 0xD0  Ð Ñ Ò-Ö × Ø Ù-Ü Ý Þ ß
        722,  722,  778,  778,  778,  778,  778,  584,  778,  722,  722,  722,  722,  667,  667,  611,
        // 0xE0  à-å æ ç è-ë ì-ï
        556,  556,  556,  556,  556,  556,  889,  500,  556,  556,  556,  556,  278,  278,  278,  278,
        // 0xF0  ð ñ ò-ö ÷ ø ù-ü ý þ ÿ
        556,  556,  556,  556,  556,  556,  556,  584,  611,  556,  556,  556,  556,  500,  556,  500,
    ],
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    face: FontFace::HelveticaBold,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        278,  333,  474,  556,  556,  889,  722,  238,  333,  333,  389,  584,  278,  333,  278,  278,
        // 0     1     2     3     4     5     6     7     8     9
        556,  556,  556,  556,  556,  556,  556,  556,  556,  556,
        // :     ;     <     =     >     ?     @
        333,  333,  584,  584,  584,  611,  975,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        722,  722,  722,  722,  667,  611,  778,  722,  278,  556,  722,  611,  833,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        722,  778,  667,  778,  722,  667,  611,  722,  667,  944,  667,  667,  611,
        // [     \     ]     ^     _     `
        333,  278,  333,  584,  556,  333,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        556,  611,  556,  611,  556,  333,  611,  611,  278,  278,  556,  278,  889,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        611,  611,  611,  611,  389,  556,  333,  611,  556,  778,  556,  556,  500,
        // {     |     }     ~
        389,  280,  389,  584,
    ],
    #[rustfmt::skip]
    upper: [
        // 0x80  €  ‚  ƒ  „  …  †  ‡  ˆ  ‰  Š  ‹  Œ  Ž
        556,    0,  278,  556,  500, 1000,  556,  556,  333, 1000,  667,  333, 1000,    0,  611,    0,
        // 0x90  ‘  ’  “  ”  •  –  —  ˜  ™  š  ›  œ  ž  Ÿ
          0,  278,  278,  500,  500,  350,  556, 1000,  333, 1000,  556,  333,  944,    0,  500,  667,
        // 0xA0  nbsp ¡ ¢ £ ¤ ¥ ¦ § ¨ © ª « ¬ shy ® ¯
        278,  333,  556,  556,  556,  556,  280,  556,  333,  737,  370,  556,  584,  333,  737,  333,
        // 0xB0  ° ± ² ³ ´ µ ¶ · ¸ ¹ º » ¼ ½ ¾ ¿
        400,  584,  333,  333,  333,  611,  556,  278,  333,  333,  365,  556,  834,  834,  834,  611,
        // 0xC0  À-Å Æ Ç È-Ë Ì-Ï
        722,  722,  722,  722,  722,  722, 1000,  722,  667,  667,  667,  667,  278,  278,  278,  278,
        // 0xD0  Ð Ñ Ò-Ö × Ø Ù-Ü Ý Þ ß
        722,  722,  778,  778,  778,  778,  778,  584,  778,  722,  722,  722,  722,  667,  667,  611,
        // 0xE0  à-å æ ç è-ë ì-ï
        556,  556,  556,  556,  556,  556,  889,  556,  556,  556,  556,  556,  278,  278,  278,  278,
        // 0xF0  ð ñ ò-ö ÷ ø ù-ü ý þ ÿ
        611,  611,  611,  611,  611,  611,  611,  584,  611,  611,  611,  611,  611,  556,  611,  556,
    ],
};

/// Returns the static metric table for a face.
pub fn get_metrics(face: FontFace) -> &'static FontMetricTable {
    match face {
        FontFace::Helvetica => &HELVETICA_TABLE,
        FontFace::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(FontFace::Helvetica);
        assert_eq!(metrics.measure_str("", 12.0), 0.0);
    }

    #[test]
    fn test_space_width_at_12pt() {
        let metrics = get_metrics(FontFace::Helvetica);
        let width = metrics.space_width(12.0);
        assert!((width - 3.336).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(FontFace::Helvetica);
        // "Loan" = L(556) + o(556) + a(556) + n(556) = 2224 units → 22.24pt at 10pt
        let width = metrics.measure_str("Loan", 10.0);
        assert!((width - 22.24).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_punctuation_uses_real_glyph_widths() {
        let regular = get_metrics(FontFace::Helvetica);
        assert_eq!(regular.char_width('—'), 1000);
        assert_eq!(regular.char_width('…'), 1000);
        assert_eq!(regular.char_width('’'), 222);
        assert_eq!(regular.char_width('“'), 333);
        assert_eq!(regular.char_width('é'), 556);
        assert_eq!(regular.char_width('§'), 556);

        let bold = get_metrics(FontFace::HelveticaBold);
        assert_eq!(bold.char_width('’'), 278);
        assert_eq!(bold.char_width('”'), 500);
    }

    #[test]
    fn test_every_encodable_char_has_a_width() {
        for face in [FontFace::Helvetica, FontFace::HelveticaBold] {
            let metrics = get_metrics(face);
            for c in "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ\u{A0}¡§©®°±µ¶·¿ÀÆÇÑÖ×ØßàæçñöøÿÞþ".chars() {
                assert!(metrics.char_width(c) > 0, "{face:?} has no width for {c:?}");
            }
        }
    }

    #[test]
    fn test_unencodable_char_measures_as_replacement() {
        let metrics = get_metrics(FontFace::Helvetica);
        assert_eq!(metrics.char_width('借'), metrics.char_width('?'));
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("a’b"), vec![b'a', 0x92, b'b']);
        assert_eq!(encode_win_ansi("§ 4—5"), vec![0xA7, b' ', b'4', 0x97, b'5']);
        assert_eq!(encode_win_ansi("借"), b"?".to_vec());
    }

    #[test]
    fn test_bold_face_is_wider_than_regular() {
        let text = "Severability Clause";
        let regular = get_metrics(FontFace::Helvetica).measure_str(text, 12.0);
        let bold = get_metrics(FontFace::HelveticaBold).measure_str(text, 12.0);
        assert!(bold > regular, "bold {bold} should exceed regular {regular}");
    }

    #[test]
    fn test_for_run_picks_face() {
        assert_eq!(FontFace::for_run(true), FontFace::HelveticaBold);
        assert_eq!(FontFace::for_run(false), FontFace::Helvetica);
        assert_eq!(FontFace::HelveticaBold.base_font(), "Helvetica-Bold");
        assert_eq!(FontFace::Helvetica.resource_name(), "F1");
    }
}
