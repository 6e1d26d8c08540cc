//! PDF backend for the label canvas, built on `lopdf` content streams and
//! the standard 14 fonts. One `PdfCanvas` holds the operations for a single
//! 6"x4" page and assembles a complete document on save.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use qrcode::{Color as QrColor, QrCode};

use super::canvas::{Canvas, CanvasError, Color};
use super::style::{LABEL_HEIGHT, LABEL_WIDTH};
use crate::error::PlacardError;
use crate::fit::Font;

/// UPC-A left-half encodings for digits 0..=9; the right half is the
/// bitwise complement.
const UPC_LEFT: [[bool; 7]; 10] = [
    [false, false, false, true, true, false, true],
    [false, false, true, true, false, false, true],
    [false, false, true, false, false, true, true],
    [false, true, true, true, true, false, true],
    [false, true, false, false, false, true, true],
    [false, true, true, false, false, false, true],
    [false, true, false, true, true, true, true],
    [false, true, true, true, false, true, true],
    [false, true, true, false, true, true, true],
    [false, false, false, true, false, true, true],
];

const UPC_MODULES: usize = 95;

fn font_resource_name(font: Font) -> &'static str {
    match font {
        Font::Helvetica => "F1",
        Font::HelveticaBold => "F2",
        Font::HelveticaOblique => "F3",
        Font::Courier => "F4",
        Font::CourierBold => "F5",
    }
}

/// Expand a 12-digit UPC-A string into its 95 bar modules, or `None` when
/// the input is not 12 digits.
fn upc_modules(digits: &str) -> Option<Vec<bool>> {
    if digits.len() != 12 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let values: Vec<usize> = digits.bytes().map(|b| (b - b'0') as usize).collect();

    let mut modules = Vec::with_capacity(UPC_MODULES);
    modules.extend([true, false, true]);
    for &d in &values[..6] {
        modules.extend(UPC_LEFT[d]);
    }
    modules.extend([false, true, false, true, false]);
    for &d in &values[6..] {
        modules.extend(UPC_LEFT[d].iter().map(|&bit| !bit));
    }
    modules.extend([true, false, true]);

    debug_assert_eq!(modules.len(), UPC_MODULES);
    Some(modules)
}

/// Canvas backend that records PDF content-stream operations.
pub struct PdfCanvas {
    ops: Vec<Operation>,
}

impl PdfCanvas {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.ops.push(Operation::new(operator, operands));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.op(
            "rg",
            vec![
                Object::Real(color.r),
                Object::Real(color.g),
                Object::Real(color.b),
            ],
        );
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.op(
            "RG",
            vec![
                Object::Real(color.r),
                Object::Real(color.g),
                Object::Real(color.b),
            ],
        );
    }

    /// Assemble and write the single-page document.
    pub fn save(&self, path: &Path) -> Result<(), PlacardError> {
        let mut doc = Document::with_version("1.5");

        let pages_id = doc.new_object_id();

        let content = Content {
            operations: self.ops.clone(),
        };
        let encoded = content
            .encode()
            .map_err(|e| PlacardError::Render(format!("content stream encoding: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let mut fonts = lopdf::Dictionary::new();
        for font in [
            Font::Helvetica,
            Font::HelveticaBold,
            Font::HelveticaOblique,
            Font::Courier,
            Font::CourierBold,
        ] {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.postscript_name(),
            });
            fonts.set(font_resource_name(font), font_id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => Object::Dictionary(fonts),
        });

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(LABEL_WIDTH),
                Object::Real(LABEL_HEIGHT),
            ],
        });

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        doc.compress();
        doc.save(path)
            .map_err(|e| PlacardError::Render(format!("writing {}: {e}", path.display())))?;
        Ok(())
    }
}

impl Default for PdfCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for PdfCanvas {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.set_fill_color(color);
        self.op(
            "re",
            vec![
                Object::Real(x),
                Object::Real(y),
                Object::Real(w),
                Object::Real(h),
            ],
        );
        self.op("f", vec![]);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, line_width: f32, color: Color) {
        self.set_stroke_color(color);
        self.op("w", vec![Object::Real(line_width)]);
        self.op(
            "re",
            vec![
                Object::Real(x),
                Object::Real(y),
                Object::Real(w),
                Object::Real(h),
            ],
        );
        self.op("S", vec![]);
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, line_width: f32, color: Color) {
        self.set_stroke_color(color);
        self.op("w", vec![Object::Real(line_width)]);
        self.op("m", vec![Object::Real(x1), Object::Real(y1)]);
        self.op("l", vec![Object::Real(x2), Object::Real(y2)]);
        self.op("S", vec![]);
    }

    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Color) {
        if points.len() < 3 {
            return;
        }
        self.set_fill_color(color);
        self.op(
            "m",
            vec![Object::Real(points[0].0), Object::Real(points[0].1)],
        );
        for &(x, y) in &points[1..] {
            self.op("l", vec![Object::Real(x), Object::Real(y)]);
        }
        self.op("h", vec![]);
        self.op("f", vec![]);
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, font: Font, size: f32, color: Color) {
        self.set_fill_color(color);
        self.op("BT", vec![]);
        self.op(
            "Tf",
            vec![
                Object::Name(font_resource_name(font).into()),
                Object::Real(size),
            ],
        );
        self.op("Td", vec![Object::Real(x), Object::Real(y)]);
        self.op("Tj", vec![Object::string_literal(text)]);
        self.op("ET", vec![]);
    }

    fn draw_barcode(
        &mut self,
        digits: &str,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    ) -> Result<(), CanvasError> {
        let modules = upc_modules(digits)
            .ok_or_else(|| CanvasError(format!("UPC-A requires 12 digits, got '{digits}'")))?;

        let module_width = w / UPC_MODULES as f32;
        let mut i = 0;
        while i < modules.len() {
            if modules[i] {
                let start = i;
                while i < modules.len() && modules[i] {
                    i += 1;
                }
                let run = (i - start) as f32;
                self.fill_rect(
                    x + start as f32 * module_width,
                    y,
                    run * module_width,
                    h,
                    Color::BLACK,
                );
            } else {
                i += 1;
            }
        }
        Ok(())
    }

    fn draw_qr(&mut self, payload: &str, x: f32, y: f32, size: f32) -> Result<(), CanvasError> {
        let code = QrCode::new(payload.as_bytes())
            .map_err(|e| CanvasError(format!("QR encoding failed for '{payload}': {e}")))?;

        let width = code.width();
        let module = size / width as f32;
        let colors = code.to_colors();

        // Light backing square so the symbol stays readable on colored
        // bands.
        self.fill_rect(x, y, size, size, Color::WHITE);

        // Row 0 of the symbol is its top edge; merge horizontal runs of
        // dark modules into single rects like the barcode path.
        for row in 0..width {
            let row_y = y + size - (row + 1) as f32 * module;
            let mut col = 0;
            while col < width {
                if colors[row * width + col] == QrColor::Dark {
                    let start = col;
                    while col < width && colors[row * width + col] == QrColor::Dark {
                        col += 1;
                    }
                    self.fill_rect(
                        x + start as f32 * module,
                        row_y,
                        (col - start) as f32 * module,
                        module,
                        Color::BLACK,
                    );
                } else {
                    col += 1;
                }
            }
        }
        Ok(())
    }
}
