use std::fmt;

/// The core label faces. These are the PDF standard-14 fonts, so width
/// metrics are fixed and no font file needs to be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    Courier,
    CourierBold,
}

impl Font {
    pub fn postscript_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
            Font::Courier => "Courier",
            Font::CourierBold => "Courier-Bold",
        }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.postscript_name())
    }
}

/// Trait for text width measurement backends.
///
/// Every layout decision in the renderer goes through this; implementations
/// must be deterministic so label output is reproducible across runs.
pub trait TextMeasure {
    /// Rendered width of `text` in points at the given font and size.
    fn text_width(&self, text: &str, font: Font, size: f32) -> f32;

    /// Name of this measurement backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// AFM advance widths for Helvetica, chars 0x20..=0x7E, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// AFM advance widths for Helvetica-Bold, chars 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const COURIER_WIDTH: u16 = 600;

/// Width assumed for glyphs outside the tabulated ASCII range.
const FALLBACK_WIDTH: u16 = 556;

/// Deterministic metrics backend using embedded standard-14 width tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoreFontMetrics;

impl CoreFontMetrics {
    pub fn new() -> Self {
        Self
    }

    fn glyph_width(font: Font, ch: char) -> u16 {
        match font {
            Font::Courier | Font::CourierBold => COURIER_WIDTH,
            Font::Helvetica | Font::HelveticaOblique => Self::table_width(&HELVETICA_WIDTHS, ch),
            Font::HelveticaBold => Self::table_width(&HELVETICA_BOLD_WIDTHS, ch),
        }
    }

    fn table_width(table: &[u16; 95], ch: char) -> u16 {
        let code = ch as u32;
        if (0x20..=0x7E).contains(&code) {
            table[(code - 0x20) as usize]
        } else {
            FALLBACK_WIDTH
        }
    }
}

impl TextMeasure for CoreFontMetrics {
    fn text_width(&self, text: &str, font: Font, size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .map(|c| u32::from(Self::glyph_width(font, c)))
            .sum();
        units as f32 * size / 1000.0
    }

    fn backend_name(&self) -> &str {
        "core-afm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_has_zero_width() {
        let m = CoreFontMetrics::new();
        assert_eq!(m.text_width("", Font::Helvetica, 10.0), 0.0);
    }

    #[test]
    fn test_width_scales_linearly_with_size() {
        let m = CoreFontMetrics::new();
        let w6 = m.text_width("Danger", Font::HelveticaBold, 6.0);
        let w12 = m.text_width("Danger", Font::HelveticaBold, 12.0);
        assert!((w12 - 2.0 * w6).abs() < 1e-4);
    }

    #[test]
    fn test_courier_is_monospace() {
        let m = CoreFontMetrics::new();
        let wi = m.text_width("iiii", Font::Courier, 10.0);
        let wm = m.text_width("MMMM", Font::Courier, 10.0);
        assert_eq!(wi, wm);
        assert_eq!(wi, 4.0 * 0.6 * 10.0);
    }

    #[test]
    fn test_helvetica_proportional() {
        let m = CoreFontMetrics::new();
        // 'i' (222) is narrower than 'M' (833)
        assert!(m.text_width("i", Font::Helvetica, 10.0) < m.text_width("M", Font::Helvetica, 10.0));
    }

    #[test]
    fn test_bold_differs_from_regular() {
        let m = CoreFontMetrics::new();
        let reg = m.text_width("avast", Font::Helvetica, 10.0);
        let bold = m.text_width("avast", Font::HelveticaBold, 10.0);
        assert!(bold > reg);
    }

    #[test]
    fn test_non_ascii_uses_fallback_width() {
        let m = CoreFontMetrics::new();
        let w = m.text_width("\u{00e9}", Font::Helvetica, 10.0);
        assert_eq!(w, 556.0 * 10.0 / 1000.0);
    }
}
