//! Single-pass label layout. The renderer walks the page top to bottom
//! with a y-cursor that only ever decreases; every region reserves its own
//! height before anything below it is placed.

use super::canvas::{Canvas, Color};
use super::components;
use super::style::{
    Regions, StylePreset, ACCENT_LINE_HEIGHT, BARCODE_HEIGHT, BARCODE_WIDTH, BOTTOM_ROW_HEIGHT,
    GHS_CARD_GAP, GHS_CARD_SIZE, GHS_GRID_COLS, LABEL_HEIGHT, LABEL_WIDTH, NFPA_SIZE,
};
use crate::config::CompanyInfo;
use crate::error::PlacardError;
use crate::fit::{
    fit_statements_to_area, fit_text_to_width, line_height, process_precautionary_statements,
    strip_statement_code, truncate_text, wrap_text, Font, TextMeasure,
};
use crate::model::LabelRecord;

/// Draws one complete label onto a canvas.
pub struct LabelRenderer<'a> {
    preset: StylePreset,
    company: CompanyInfo,
    metrics: &'a dyn TextMeasure,
}

impl<'a> LabelRenderer<'a> {
    pub fn new(preset: StylePreset, metrics: &'a dyn TextMeasure) -> Self {
        Self {
            preset,
            company: CompanyInfo::default(),
            metrics,
        }
    }

    pub fn with_company(mut self, company: CompanyInfo) -> Self {
        self.company = company;
        self
    }

    /// Render `record` onto `canvas`. Invalid record data is a hard error;
    /// decorative failures (barcode, QR) degrade inside the components.
    pub fn render(&self, record: &LabelRecord, canvas: &mut dyn Canvas) -> Result<(), PlacardError> {
        record.validate()?;

        let regions = self.preset.regions();

        self.draw_frame(canvas, &regions);
        self.draw_header(canvas, &regions, record);
        self.draw_footer(canvas, &regions, record);
        self.draw_left_column(canvas, &regions, record);
        self.draw_right_column(canvas, &regions, record);

        Ok(())
    }

    fn draw_frame(&self, canvas: &mut dyn Canvas, regions: &Regions) {
        let p = &self.preset.palette;

        canvas.fill_rect(0.0, 0.0, LABEL_WIDTH, LABEL_HEIGHT, Color::WHITE);

        // Header and footer bands run full bleed.
        canvas.fill_rect(
            0.0,
            regions.header_bottom,
            LABEL_WIDTH,
            LABEL_HEIGHT - regions.header_bottom,
            p.band,
        );
        canvas.fill_rect(0.0, 0.0, LABEL_WIDTH, regions.footer_top, p.band);

        canvas.fill_rect(
            0.0,
            regions.header_bottom - ACCENT_LINE_HEIGHT,
            LABEL_WIDTH,
            ACCENT_LINE_HEIGHT,
            p.accent,
        );
        canvas.fill_rect(0.0, regions.footer_top, LABEL_WIDTH, ACCENT_LINE_HEIGHT, p.accent);
    }

    fn draw_header(&self, canvas: &mut dyn Canvas, regions: &Regions, record: &LabelRecord) {
        let p = &self.preset.palette;
        let s = &self.preset.sizes;
        let x = regions.content_left;
        let mut y = regions.content_top - s.company_name;

        canvas.draw_text(
            x,
            y,
            &self.company.name.to_uppercase(),
            Font::HelveticaBold,
            s.company_name,
            p.text_light,
        );
        y -= s.company_details + 2.0;
        let details = format!("{}  |  {}", self.company.address, self.company.phone);
        canvas.draw_text(x, y, &details, Font::Helvetica, s.company_details, p.text_light_muted);

        // Product name fitted to the content width, shrinking before it
        // ever truncates.
        let (name_size, name) = fit_text_to_width(
            &record.product_name.to_uppercase(),
            Font::HelveticaBold,
            s.product_name,
            s.product_name_min,
            regions.content_width,
            self.metrics,
        );
        y -= name_size + 4.0;
        canvas.draw_text(x, y, &name, Font::HelveticaBold, name_size, p.text_light);

        if let Some(grade) = &record.grade_or_concentration {
            y -= s.grade + 2.0;
            canvas.draw_text(x, y, grade, Font::HelveticaOblique, s.grade, p.accent);
        }
    }

    fn draw_footer(&self, canvas: &mut dyn Canvas, regions: &Regions, record: &LabelRecord) {
        let p = &self.preset.palette;
        let s = &self.preset.sizes;
        let y = (regions.footer_top - ACCENT_LINE_HEIGHT - s.footer) / 2.0 + 2.0;

        let emergency = format!("24HR EMERGENCY (CHEMTEL): {}", record.chemtel_number);
        canvas.draw_text(
            regions.content_left,
            y,
            &emergency,
            Font::HelveticaBold,
            s.footer,
            p.text_light,
        );

        let site = &self.company.website;
        let site_width = self.metrics.text_width(site, Font::Helvetica, s.footer);
        canvas.draw_text(
            regions.content_right - site_width,
            y,
            site,
            Font::Helvetica,
            s.footer,
            p.text_light_muted,
        );
    }

    fn draw_left_column(&self, canvas: &mut dyn Canvas, regions: &Regions, record: &LabelRecord) {
        let p = &self.preset.palette;
        let s = &self.preset.sizes;
        let x = regions.left_column_left;
        let width = regions.left_column_width;
        let mut y = regions.main_top;

        // Net contents, US units dominant.
        y -= s.net_contents_us;
        canvas.draw_text(
            x,
            y,
            &record.net_contents_us,
            Font::HelveticaBold,
            s.net_contents_us,
            p.text_dark,
        );
        y -= s.net_contents_metric + 2.0;
        canvas.draw_text(
            x,
            y,
            &record.net_contents_metric,
            Font::Helvetica,
            s.net_contents_metric,
            p.text_muted,
        );

        // Data block: label/value rows.
        y -= 8.0;
        let mut rows: Vec<(&str, String)> = vec![("SKU", record.sku.clone())];
        if let Some(cas) = &record.cas_number {
            rows.push(("CAS", cas.clone()));
        }
        if let Some(lot) = &record.lot_number {
            rows.push(("LOT", lot.clone()));
        }
        for (label, value) in rows {
            y -= s.data_value + 3.0;
            canvas.draw_text(x, y, label, Font::Helvetica, s.data_label, p.text_muted);
            let value = truncate_text(&value, Font::CourierBold, s.data_value, width - 30.0, self.metrics);
            canvas.draw_text(x + 28.0, y, &value, Font::CourierBold, s.data_value, p.text_dark);
        }

        // NFPA diamond, skins that carry it only.
        if self.preset.show_nfpa && record.has_nfpa() {
            y -= NFPA_SIZE + 10.0;
            components::draw_nfpa_diamond(
                canvas,
                self.metrics,
                x + 4.0,
                y,
                NFPA_SIZE,
                record.nfpa_health,
                record.nfpa_fire,
                record.nfpa_reactivity,
                record.nfpa_special.as_deref(),
            );
        }

        // Barcode pinned to the bottom of the column.
        components::draw_barcode_card(
            canvas,
            &record.upc_gtin12,
            x + 4.0,
            regions.main_bottom + 6.0,
            BARCODE_WIDTH,
            BARCODE_HEIGHT,
            &self.preset,
        );
    }

    fn draw_right_column(&self, canvas: &mut dyn Canvas, regions: &Regions, record: &LabelRecord) {
        let p = &self.preset.palette;
        let s = &self.preset.sizes;
        let x = regions.right_column_left;
        let width = regions.right_column_width;
        let mut y = regions.main_top;

        if !record.hazcom_applicable {
            y -= s.h_statement + 2.0;
            canvas.draw_text(
                x,
                y,
                "Not classified as hazardous under 29 CFR 1910.1200.",
                Font::HelveticaOblique,
                s.h_statement,
                p.text_muted,
            );
            self.draw_bottom_row(canvas, regions, record);
            return;
        }

        if !record.ghs_pictograms.is_empty() {
            let rows = record.ghs_pictograms.len().div_ceil(GHS_GRID_COLS);
            let grid_height =
                rows as f32 * GHS_CARD_SIZE + (rows - 1) as f32 * GHS_CARD_GAP;
            components::draw_ghs_grid(
                canvas,
                self.metrics,
                &record.ghs_pictograms,
                x,
                y - grid_height,
                &self.preset,
            );
            y -= grid_height + 6.0;
        }

        if let Some(signal) = record.signal_word {
            let pill_height =
                components::draw_signal_pill(canvas, self.metrics, x, y, signal, &self.preset);
            y -= pill_height + 5.0;
        }

        // Hazard statements wrap at fixed size; codes are display noise.
        for statement in &record.hazard_statements {
            let text = strip_statement_code(statement);
            for line in wrap_text(&text, Font::HelveticaBold, s.h_statement, width, self.metrics) {
                y -= line_height(s.h_statement, 1.15);
                canvas.draw_text(x, y, &line, Font::HelveticaBold, s.h_statement, p.text_dark);
            }
        }

        if !record.precaution_statements.is_empty() {
            y -= 4.0;
            canvas.line(x, y, x + width, y, 0.5, p.border);
            y -= 4.0;
        }

        // Everything left above the reserved DOT/QR row goes to the
        // precautionary block; the fitter shrinks and truncates to fit.
        let floor = regions.main_bottom + BOTTOM_ROW_HEIGHT;
        let available = (y - floor).max(0.0);
        let statements = process_precautionary_statements(&record.precaution_statements, true);
        let (size, lines) = fit_statements_to_area(
            &statements,
            Font::Helvetica,
            s.p_statement,
            s.p_statement_min,
            width,
            available,
            1.2,
            self.metrics,
        );
        for line in &lines {
            let next = y - line_height(size, 1.2);
            if next < floor {
                break;
            }
            y = next;
            canvas.draw_text(x, y, line, Font::Helvetica, size, p.text_muted);
        }

        self.draw_bottom_row(canvas, regions, record);
    }

    fn draw_bottom_row(&self, canvas: &mut dyn Canvas, regions: &Regions, record: &LabelRecord) {
        let x = regions.right_column_left;
        let width = regions.right_column_width;
        let y = regions.main_bottom;

        let qr_size = BOTTOM_ROW_HEIGHT - 2.0;
        let badge_width = if record.sds_url.is_some() {
            width - qr_size - 8.0
        } else {
            width
        };

        if record.dot_regulated {
            components::draw_dot_badge(
                canvas,
                self.metrics,
                x,
                y,
                badge_width,
                record.un_number.as_deref().unwrap_or(""),
                record.hazard_class.as_deref().unwrap_or(""),
                record
                    .packing_group
                    .map(|g| g.as_str())
                    .unwrap_or(""),
                &self.preset,
            );
        }

        if let Some(url) = &record.sds_url {
            components::draw_sds_qr(
                canvas,
                self.metrics,
                url,
                x + width - qr_size,
                y,
                qr_size,
                &self.preset,
            );
        }
    }
}
