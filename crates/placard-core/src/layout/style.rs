use std::str::FromStr;

use super::canvas::Color;
use crate::error::PlacardError;

/// Fixed physical page: 6" x 4" at 72 points per inch.
pub const LABEL_WIDTH: f32 = 432.0;
pub const LABEL_HEIGHT: f32 = 288.0;

pub const MARGIN: f32 = 10.0;
pub const COLUMN_GAP: f32 = 12.0;
pub const ACCENT_LINE_HEIGHT: f32 = 2.5;

pub const BARCODE_WIDTH: f32 = 65.0;
pub const BARCODE_HEIGHT: f32 = 24.0;

pub const GHS_CARD_SIZE: f32 = 42.0;
pub const GHS_CARD_GAP: f32 = 6.0;
pub const GHS_GRID_COLS: usize = 3;

/// Height reserved at the bottom of the right column for the DOT badge /
/// QR row; statement fitting subtracts this before sizing.
pub const BOTTOM_ROW_HEIGHT: f32 = 20.0;

pub const NFPA_SIZE: f32 = 44.0;

/// Font size table for the label regions, in points.
#[derive(Debug, Clone)]
pub struct FontSizes {
    pub company_name: f32,
    pub company_details: f32,
    pub product_name: f32,
    pub product_name_min: f32,
    pub grade: f32,
    pub data_label: f32,
    pub data_value: f32,
    pub net_contents_us: f32,
    pub net_contents_metric: f32,
    pub signal_word: f32,
    pub h_statement: f32,
    pub p_statement: f32,
    pub p_statement_min: f32,
    pub dot_badge: f32,
    pub footer: f32,
    pub qr_label: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            company_name: 9.0,
            company_details: 6.0,
            product_name: 20.0,
            product_name_min: 14.0,
            grade: 11.0,
            data_label: 6.5,
            data_value: 7.5,
            net_contents_us: 16.0,
            net_contents_metric: 9.0,
            signal_word: 10.0,
            h_statement: 7.0,
            p_statement: 6.0,
            p_statement_min: 4.5,
            dot_badge: 7.0,
            footer: 7.0,
            qr_label: 5.0,
        }
    }
}

/// Color palette for one style preset.
#[derive(Debug, Clone)]
pub struct Palette {
    pub band: Color,
    pub accent: Color,
    pub card: Color,
    pub border: Color,
    pub text_dark: Color,
    pub text_muted: Color,
    pub text_light: Color,
    pub text_light_muted: Color,
    pub danger: Color,
    pub warning: Color,
}

/// One cosmetic "skin": a palette plus region proportions. All three
/// presets feed the same renderer; nothing here changes layout semantics
/// beyond sizes.
#[derive(Debug, Clone)]
pub struct StylePreset {
    pub name: &'static str,
    pub palette: Palette,
    pub sizes: FontSizes,
    pub header_height: f32,
    pub footer_height: f32,
    /// Fraction of the content width given to the left column.
    pub left_column_frac: f32,
    /// Whether this skin draws the NFPA diamond when ratings are present.
    pub show_nfpa: bool,
}

impl StylePreset {
    /// Dark header/footer bands framing a white main area.
    pub fn frame() -> Self {
        Self {
            name: "frame",
            palette: Palette {
                band: Color::rgb(0.10, 0.10, 0.12),
                accent: Color::rgb(0.0, 0.83, 0.67),
                card: Color::rgb(0.16, 0.16, 0.19),
                border: Color::gray(0.78),
                text_dark: Color::rgb(0.10, 0.10, 0.12),
                text_muted: Color::gray(0.45),
                text_light: Color::WHITE,
                text_light_muted: Color::gray(0.72),
                danger: Color::rgb(0.80, 0.10, 0.12),
                warning: Color::rgb(0.95, 0.65, 0.10),
            },
            sizes: FontSizes::default(),
            header_height: 55.0,
            footer_height: 28.0,
            left_column_frac: 0.38,
            show_nfpa: false,
        }
    }

    /// Soft neutral bands, wider identity column.
    pub fn organic() -> Self {
        Self {
            name: "organic",
            palette: Palette {
                band: Color::rgb(0.95, 0.93, 0.89),
                accent: Color::rgb(0.42, 0.56, 0.35),
                card: Color::rgb(0.98, 0.97, 0.95),
                border: Color::gray(0.70),
                text_dark: Color::rgb(0.18, 0.16, 0.13),
                text_muted: Color::gray(0.42),
                text_light: Color::rgb(0.18, 0.16, 0.13),
                text_light_muted: Color::gray(0.40),
                danger: Color::rgb(0.72, 0.15, 0.12),
                warning: Color::rgb(0.85, 0.60, 0.12),
            },
            sizes: FontSizes::default(),
            header_height: 50.0,
            footer_height: 26.0,
            left_column_frac: 0.42,
            show_nfpa: false,
        }
    }

    /// Spec-sheet look with the NFPA diamond enabled.
    pub fn scientific() -> Self {
        Self {
            name: "scientific",
            palette: Palette {
                band: Color::WHITE,
                accent: Color::rgb(0.07, 0.28, 0.55),
                card: Color::gray(0.96),
                border: Color::gray(0.55),
                text_dark: Color::gray(0.08),
                text_muted: Color::gray(0.40),
                text_light: Color::gray(0.08),
                text_light_muted: Color::gray(0.35),
                danger: Color::rgb(0.78, 0.08, 0.10),
                warning: Color::rgb(0.90, 0.62, 0.08),
            },
            sizes: FontSizes::default(),
            header_height: 48.0,
            footer_height: 24.0,
            left_column_frac: 0.38,
            show_nfpa: true,
        }
    }

    pub fn regions(&self) -> Regions {
        let content_left = MARGIN;
        let content_right = LABEL_WIDTH - MARGIN;
        let content_top = LABEL_HEIGHT - MARGIN;
        let content_bottom = MARGIN;
        let content_width = content_right - content_left;

        let header_bottom = content_top - self.header_height;
        let footer_top = content_bottom + self.footer_height;

        let main_top = header_bottom - ACCENT_LINE_HEIGHT - 8.0;
        let main_bottom = footer_top + ACCENT_LINE_HEIGHT + 8.0;

        let left_column_width = content_width * self.left_column_frac;
        let right_column_left = content_left + left_column_width + COLUMN_GAP;

        Regions {
            content_left,
            content_right,
            content_top,
            content_bottom,
            content_width,
            header_bottom,
            footer_top,
            main_top,
            main_bottom,
            left_column_left: content_left,
            left_column_width,
            right_column_left,
            right_column_width: content_right - right_column_left,
        }
    }
}

/// Resolved layout geometry for one preset, all in points.
#[derive(Debug, Clone)]
pub struct Regions {
    pub content_left: f32,
    pub content_right: f32,
    pub content_top: f32,
    pub content_bottom: f32,
    pub content_width: f32,
    pub header_bottom: f32,
    pub footer_top: f32,
    pub main_top: f32,
    pub main_bottom: f32,
    pub left_column_left: f32,
    pub left_column_width: f32,
    pub right_column_left: f32,
    pub right_column_width: f32,
}

/// Selects one of the three interchangeable skins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelStyle {
    #[default]
    Frame,
    Organic,
    Scientific,
}

impl LabelStyle {
    pub fn preset(&self) -> StylePreset {
        match self {
            LabelStyle::Frame => StylePreset::frame(),
            LabelStyle::Organic => StylePreset::organic(),
            LabelStyle::Scientific => StylePreset::scientific(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelStyle::Frame => "frame",
            LabelStyle::Organic => "organic",
            LabelStyle::Scientific => "scientific",
        }
    }
}

impl FromStr for LabelStyle {
    type Err = PlacardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "frame" | "standard" => Ok(LabelStyle::Frame),
            "organic" => Ok(LabelStyle::Organic),
            "scientific" => Ok(LabelStyle::Scientific),
            other => Err(PlacardError::Render(format!(
                "unknown label style '{other}' (expected frame, organic or scientific)"
            ))),
        }
    }
}
