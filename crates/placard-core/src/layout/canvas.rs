use crate::fit::Font;

/// RGB color in 0.0..=1.0 components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(v: f32) -> Self {
        Self { r: v, g: v, b: v }
    }

    pub const BLACK: Color = Color::gray(0.0);
    pub const WHITE: Color = Color::gray(1.0);
}

/// Failure of a decorative canvas operation (barcode, QR). Callers degrade
/// to a textual fallback rather than aborting the label.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct CanvasError(pub String);

/// Opaque 2D drawing surface for a single 6"x4" label page.
///
/// Coordinates are in points with the origin at the bottom-left corner, y
/// increasing upward. The layout engine only depends on the positional
/// contract of these operations, never on how a backend rasterizes them.
pub trait Canvas {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, line_width: f32, color: Color);

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, line_width: f32, color: Color);

    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Color);

    /// Draw `text` with its baseline at `(x, y)`.
    fn draw_text(&mut self, x: f32, y: f32, text: &str, font: Font, size: f32, color: Color);

    /// Render a UPC-A barcode for a 12-digit string. Opaque collaborator
    /// operation; may fail if the backend has no barcode support.
    fn draw_barcode(
        &mut self,
        digits: &str,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    ) -> Result<(), CanvasError>;

    /// Render a QR code for `payload`. Opaque collaborator operation; may
    /// fail if the backend cannot encode the payload.
    fn draw_qr(&mut self, payload: &str, x: f32, y: f32, size: f32) -> Result<(), CanvasError>;
}
