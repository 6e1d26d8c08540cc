//! Regulated visual elements shared by all style presets: GHS pictogram
//! grid, NFPA 704 diamond, DOT badge, signal word pill, barcode and SDS/QR
//! blocks. All drawing is vector-only through the Canvas trait.

use super::canvas::{Canvas, Color};
use super::style::{StylePreset, GHS_CARD_GAP, GHS_CARD_SIZE, GHS_GRID_COLS};
use crate::fit::{truncate_text, Font, TextMeasure};
use crate::model::{GhsPictogram, SignalWord};

/// GHS red frame color (fixed by regulation, not by preset).
const GHS_RED: Color = Color::rgb(0.84, 0.08, 0.11);

/// NFPA 704 quadrant colors.
const NFPA_BLUE: Color = Color::rgb(0.16, 0.35, 0.80);
const NFPA_RED: Color = Color::rgb(0.86, 0.12, 0.12);
const NFPA_YELLOW: Color = Color::rgb(0.98, 0.85, 0.10);

/// Draw the GHS pictogram grid anchored at `(x, y)` (bottom-left), up to
/// three cards per row. Returns the grid height actually used.
pub fn draw_ghs_grid(
    canvas: &mut dyn Canvas,
    metrics: &dyn TextMeasure,
    pictograms: &[GhsPictogram],
    x: f32,
    y: f32,
    preset: &StylePreset,
) -> f32 {
    if pictograms.is_empty() {
        return 0.0;
    }

    let rows = pictograms.len().div_ceil(GHS_GRID_COLS);
    let grid_height = rows as f32 * GHS_CARD_SIZE + (rows - 1) as f32 * GHS_CARD_GAP;

    for (i, pictogram) in pictograms.iter().enumerate() {
        let row = i / GHS_GRID_COLS;
        let col = i % GHS_GRID_COLS;
        let card_x = x + col as f32 * (GHS_CARD_SIZE + GHS_CARD_GAP);
        // First row sits at the top of the grid.
        let card_y = y + grid_height - (row + 1) as f32 * GHS_CARD_SIZE - row as f32 * GHS_CARD_GAP;

        draw_ghs_card(canvas, metrics, *pictogram, card_x, card_y, preset);
    }

    grid_height
}

fn draw_ghs_card(
    canvas: &mut dyn Canvas,
    metrics: &dyn TextMeasure,
    pictogram: GhsPictogram,
    x: f32,
    y: f32,
    preset: &StylePreset,
) {
    let size = GHS_CARD_SIZE;
    canvas.fill_rect(x, y, size, size, Color::WHITE);

    // Regulation diamond: red square frame rotated 45 degrees.
    let caption_height = 7.0;
    let cx = x + size / 2.0;
    let cy = y + caption_height + (size - caption_height) / 2.0;
    let half = (size - caption_height) / 2.0 - 2.0;

    let corners = [
        (cx, cy + half),
        (cx + half, cy),
        (cx, cy - half),
        (cx - half, cy),
    ];
    for i in 0..4 {
        let (x1, y1) = corners[i];
        let (x2, y2) = corners[(i + 1) % 4];
        canvas.line(x1, y1, x2, y2, 1.5, GHS_RED);
    }

    // Code in the diamond center, caption underneath.
    let code = pictogram.code();
    let code_size = 6.0;
    let code_width = metrics.text_width(code, Font::HelveticaBold, code_size);
    canvas.draw_text(
        cx - code_width / 2.0,
        cy - code_size / 2.0,
        code,
        Font::HelveticaBold,
        code_size,
        preset.palette.text_dark,
    );

    let caption = pictogram.caption();
    let caption_size = 4.0;
    let caption_width = metrics.text_width(caption, Font::Helvetica, caption_size);
    canvas.draw_text(
        cx - caption_width / 2.0,
        y + 1.5,
        caption,
        Font::Helvetica,
        caption_size,
        preset.palette.text_muted,
    );
}

/// Draw the NFPA 704 diamond with its four quadrant ratings. `(x, y)` is
/// the bottom-left of the bounding square of `size` points.
#[allow(clippy::too_many_arguments)]
pub fn draw_nfpa_diamond(
    canvas: &mut dyn Canvas,
    metrics: &dyn TextMeasure,
    x: f32,
    y: f32,
    size: f32,
    health: Option<u8>,
    fire: Option<u8>,
    reactivity: Option<u8>,
    special: Option<&str>,
) {
    let cx = x + size / 2.0;
    let cy = y + size / 2.0;
    let half = size / 2.0;
    let quarter = half / 2.0;

    let top = (cx, cy + half);
    let right = (cx + half, cy);
    let bottom = (cx, cy - half);
    let left = (cx - half, cy);
    let center = (cx, cy);
    let mid_tl = (cx - quarter, cy + quarter);
    let mid_tr = (cx + quarter, cy + quarter);
    let mid_bl = (cx - quarter, cy - quarter);
    let mid_br = (cx + quarter, cy - quarter);

    // Quadrants: fire top, health left, reactivity right, special bottom.
    canvas.fill_polygon(&[mid_tl, top, mid_tr, center], NFPA_RED);
    canvas.fill_polygon(&[left, mid_tl, center, mid_bl], NFPA_BLUE);
    canvas.fill_polygon(&[center, mid_tr, right, mid_br], NFPA_YELLOW);
    canvas.fill_polygon(&[mid_bl, center, mid_br, bottom], Color::WHITE);

    for i in 0..4 {
        let pts = [top, right, bottom, left];
        let (x1, y1) = pts[i];
        let (x2, y2) = pts[(i + 1) % 4];
        canvas.line(x1, y1, x2, y2, 1.0, Color::BLACK);
    }
    canvas.line(left.0, left.1, right.0, right.1, 0.6, Color::BLACK);
    canvas.line(top.0, top.1, bottom.0, bottom.1, 0.6, Color::BLACK);

    let rating_size = size * 0.22;
    let mut draw_rating = |value: Option<u8>, qx: f32, qy: f32, color: Color| {
        if let Some(v) = value {
            let text = v.to_string();
            let w = metrics.text_width(&text, Font::HelveticaBold, rating_size);
            canvas.draw_text(
                qx - w / 2.0,
                qy - rating_size / 2.0,
                &text,
                Font::HelveticaBold,
                rating_size,
                color,
            );
        }
    };

    draw_rating(fire, cx, cy + quarter, Color::WHITE);
    draw_rating(health, cx - quarter, cy, Color::WHITE);
    draw_rating(reactivity, cx + quarter, cy, Color::BLACK);

    if let Some(sym) = special {
        let sym_size = size * 0.18;
        let w = metrics.text_width(sym, Font::HelveticaBold, sym_size);
        canvas.draw_text(
            cx - w / 2.0,
            cy - quarter - sym_size / 2.0,
            sym,
            Font::HelveticaBold,
            sym_size,
            Color::BLACK,
        );
    }
}

/// Inline DOT badge: dark card with "UN1219 | CLASS 3 | PG II". Returns
/// the badge height.
#[allow(clippy::too_many_arguments)]
pub fn draw_dot_badge(
    canvas: &mut dyn Canvas,
    metrics: &dyn TextMeasure,
    x: f32,
    y: f32,
    width: f32,
    un_number: &str,
    hazard_class: &str,
    packing_group: &str,
    preset: &StylePreset,
) -> f32 {
    let height = 18.0;
    let size = preset.sizes.dot_badge;

    canvas.fill_rect(x, y, width, height, preset.palette.card);
    canvas.stroke_rect(x, y, width, height, 0.8, preset.palette.border);

    let mut parts: Vec<String> = Vec::new();
    if !un_number.is_empty() {
        parts.push(un_number.to_string());
    }
    if !hazard_class.is_empty() {
        parts.push(format!("CLASS {hazard_class}"));
    }
    if !packing_group.is_empty() {
        parts.push(format!("PG {packing_group}"));
    }
    let text = parts.join("  |  ");
    let text = truncate_text(&text, Font::HelveticaBold, size, width - 8.0, metrics);

    let text_width = metrics.text_width(&text, Font::HelveticaBold, size);
    canvas.draw_text(
        x + (width - text_width).max(8.0) / 2.0,
        y + (height - size) / 2.0 + 1.0,
        &text,
        Font::HelveticaBold,
        size,
        preset.palette.text_light,
    );

    height
}

/// Signal word pill. Returns the pill height.
pub fn draw_signal_pill(
    canvas: &mut dyn Canvas,
    metrics: &dyn TextMeasure,
    x: f32,
    top_y: f32,
    signal: SignalWord,
    preset: &StylePreset,
) -> f32 {
    let size = preset.sizes.signal_word;
    let text = signal.as_str().to_uppercase();
    let text_width = metrics.text_width(&text, Font::HelveticaBold, size);

    let padding = 6.0;
    let height = size + 6.0;
    let width = text_width + padding * 2.0;

    let fill = match signal {
        SignalWord::Danger => preset.palette.danger,
        SignalWord::Warning => preset.palette.warning,
    };
    let text_color = match signal {
        SignalWord::Danger => Color::WHITE,
        SignalWord::Warning => preset.palette.text_dark,
    };

    canvas.fill_rect(x, top_y - height, width, height, fill);
    canvas.draw_text(
        x + padding,
        top_y - height + 4.0,
        &text,
        Font::HelveticaBold,
        size,
        text_color,
    );

    height
}

/// Barcode in a white card. On barcode backend failure the raw digit
/// string is drawn instead of aborting the label.
pub fn draw_barcode_card(
    canvas: &mut dyn Canvas,
    digits: &str,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    preset: &StylePreset,
) {
    let padding = 4.0;
    canvas.fill_rect(
        x - padding,
        y - padding,
        w + padding * 2.0,
        h + padding * 2.0,
        Color::WHITE,
    );

    if canvas.draw_barcode(digits, x, y, w, h).is_err() {
        log::warn!("barcode render failed for '{digits}', falling back to text");
        canvas.draw_text(x, y + 5.0, digits, Font::Courier, 6.0, preset.palette.text_dark);
    }
}

/// QR code linking to the SDS, with a caption. On QR backend failure the
/// URL is drawn as small text instead.
pub fn draw_sds_qr(
    canvas: &mut dyn Canvas,
    metrics: &dyn TextMeasure,
    url: &str,
    x: f32,
    y: f32,
    size: f32,
    preset: &StylePreset,
) {
    let caption = "SCAN FOR SDS";
    let caption_size = preset.sizes.qr_label;

    match canvas.draw_qr(url, x, y + caption_size + 2.0, size) {
        Ok(()) => {
            let w = metrics.text_width(caption, Font::Helvetica, caption_size);
            canvas.draw_text(
                x + (size - w) / 2.0,
                y,
                caption,
                Font::Helvetica,
                caption_size,
                preset.palette.text_muted,
            );
        }
        Err(_) => {
            let text = truncate_text(
                &format!("SDS: {url}"),
                Font::Helvetica,
                caption_size,
                size.max(90.0),
                metrics,
            );
            canvas.draw_text(
                x,
                y,
                &text,
                Font::Helvetica,
                caption_size,
                preset.palette.text_muted,
            );
        }
    }
}
