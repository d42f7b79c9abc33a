//! Paginated A4 rendering of a [`Report`].
//!
//! Everything, charts included, is drawn with vector primitives and the
//! built-in Helvetica faces so no font or image assets are needed.

use std::f32::consts::{FRAC_PI_2, TAU};

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Rgb,
};

use crate::report::{money_label, Report, ReportError, REPORT_FOOTER, UNCATEGORIZED_LABEL};
use crate::summary::CategoryTotal;
use crate::trend::MonthlyTotal;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_X: f32 = 18.0;
const MARGIN_TOP: f32 = 25.0;
const MARGIN_BOTTOM: f32 = 20.0;
const FOOTER_Y: f32 = 10.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN_X;
const PT_TO_MM: f32 = 0.3528;

const TITLE_BLUE: (u8, u8, u8) = (0x1F, 0x4E, 0x79);
const SECTION_BLUE: (u8, u8, u8) = (0x15, 0x43, 0x60);
const HEADER_BLUE: (u8, u8, u8) = (0x1F, 0x61, 0x8D);
const BAR_BLUE: (u8, u8, u8) = (0x28, 0x74, 0xA6);
const GRID_GREY: (u8, u8, u8) = (0x99, 0x99, 0x99);
const TEXT_BLACK: (u8, u8, u8) = (0x22, 0x22, 0x22);
const WHITE: (u8, u8, u8) = (0xFF, 0xFF, 0xFF);

const PIE_PALETTE: [(u8, u8, u8); 8] = [
    (0x28, 0x74, 0xA6),
    (0xE6, 0x7E, 0x22),
    (0x27, 0xAE, 0x60),
    (0xC0, 0x39, 0x2B),
    (0x8E, 0x44, 0xAD),
    (0xF1, 0xC4, 0x0F),
    (0x16, 0xA0, 0x85),
    (0x7F, 0x8C, 0x8D),
];

pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub pages: usize,
}

#[derive(Clone, Copy)]
enum Face {
    Regular,
    Bold,
    Oblique,
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

impl Fonts {
    fn get(&self, face: Face) -> &IndirectFontRef {
        match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
            Face::Oblique => &self.oblique,
        }
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

fn line_height(size: f32) -> f32 {
    size * PT_TO_MM * 1.4
}

/// Rough Helvetica advance width; good enough for centering and clipping.
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5 * PT_TO_MM
}

fn fit_text(text: &str, size: f32, width: f32) -> String {
    if text_width(text, size) <= width {
        return text.to_string();
    }
    let max_chars = (width / (size * 0.5 * PT_TO_MM)) as usize;
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

fn pdf_error(err: impl std::fmt::Display) -> ReportError {
    ReportError::Render(err.to_string())
}

struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    /// Baseline of the next line, in millimetres from the page bottom.
    cursor: f32,
    pages: usize,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self, ReportError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Page 1");
        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?,
            oblique: doc
                .add_builtin_font(BuiltinFont::HelveticaOblique)
                .map_err(pdf_error)?,
        };
        let layer = doc.get_page(page).get_layer(layer);
        let writer = PageWriter {
            doc,
            layer,
            fonts,
            cursor: PAGE_HEIGHT - MARGIN_TOP,
            pages: 1,
        };
        writer.draw_footer();
        Ok(writer)
    }

    fn new_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            format!("Page {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = PAGE_HEIGHT - MARGIN_TOP;
        self.draw_footer();
    }

    fn draw_footer(&self) {
        let size = 8.0;
        let x = (PAGE_WIDTH - text_width(REPORT_FOOTER, size)) / 2.0;
        self.layer.set_fill_color(rgb(TEXT_BLACK));
        self.layer.use_text(
            REPORT_FOOTER,
            size,
            Mm(x),
            Mm(FOOTER_Y),
            self.fonts.get(Face::Oblique),
        );
    }

    fn ensure_space(&mut self, height: f32) {
        if self.cursor - height < MARGIN_BOTTOM {
            self.new_page();
        }
    }

    fn gap(&mut self, height: f32) {
        self.cursor -= height;
    }

    fn put_text(&self, text: &str, size: f32, face: Face, x: f32, y: f32, color: (u8, u8, u8)) {
        self.layer.set_fill_color(rgb(color));
        self.layer
            .use_text(text, size, Mm(x), Mm(y), self.fonts.get(face));
    }

    fn paragraph(&mut self, text: &str, size: f32, face: Face, indent: f32, color: (u8, u8, u8)) {
        let height = line_height(size);
        self.ensure_space(height);
        self.cursor -= height;
        let text = fit_text(text, size, CONTENT_WIDTH - indent);
        self.put_text(&text, size, face, MARGIN_X + indent, self.cursor, color);
    }

    fn centered(&mut self, text: &str, size: f32, face: Face, color: (u8, u8, u8)) {
        let height = line_height(size);
        self.ensure_space(height);
        self.cursor -= height;
        let text = fit_text(text, size, CONTENT_WIDTH);
        let x = (PAGE_WIDTH - text_width(&text, size)) / 2.0;
        self.put_text(&text, size, face, x, self.cursor, color);
    }

    fn section(&mut self, heading: &str) {
        self.paragraph(heading, 14.0, Face::Bold, 0.0, SECTION_BLUE);
        self.gap(2.0);
    }

    fn bullet(&mut self, text: &str) {
        self.paragraph(&format!("- {text}"), 11.0, Face::Regular, 8.0, TEXT_BLACK);
    }

    fn fill_rect(&self, x: f32, y: f32, width: f32, height: f32, color: (u8, u8, u8)) {
        self.fill_polygon(
            &[(x, y), (x + width, y), (x + width, y + height), (x, y + height)],
            color,
        );
    }

    fn fill_polygon(&self, points: &[(f32, f32)], color: (u8, u8, u8)) {
        self.layer.set_fill_color(rgb(color));
        let ring = points
            .iter()
            .map(|&(x, y)| (Point::new(Mm(x), Mm(y)), false))
            .collect();
        self.layer.add_polygon(Polygon {
            rings: vec![ring],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn stroke(&self, points: &[(f32, f32)], closed: bool, color: (u8, u8, u8), thickness: f32) {
        self.layer.set_outline_color(rgb(color));
        self.layer.set_outline_thickness(thickness);
        self.layer.add_line(Line {
            points: points
                .iter()
                .map(|&(x, y)| (Point::new(Mm(x), Mm(y)), false))
                .collect(),
            is_closed: closed,
        });
    }

    fn rule(&mut self, color: (u8, u8, u8)) {
        self.gap(2.0);
        self.stroke(
            &[(MARGIN_X, self.cursor), (PAGE_WIDTH - MARGIN_X, self.cursor)],
            false,
            color,
            1.0,
        );
    }

    /// Grid table; the header row is repeated at the top of continuation pages.
    fn table(
        &mut self,
        headers: &[&str],
        widths: &[f32],
        rows: &[Vec<String>],
        size: f32,
        header_color: (u8, u8, u8),
    ) {
        let row_height = line_height(size) + 3.0;
        let table_width: f32 = widths.iter().sum();
        let left = MARGIN_X + (CONTENT_WIDTH - table_width) / 2.0;

        self.ensure_space(row_height * 2.0);
        self.table_row(left, widths, headers, size, row_height, Some(header_color));
        for row in rows {
            if self.cursor - row_height < MARGIN_BOTTOM {
                self.new_page();
                self.table_row(left, widths, headers, size, row_height, Some(header_color));
            }
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            self.table_row(left, widths, &cells, size, row_height, None);
        }
    }

    fn table_row(
        &mut self,
        left: f32,
        widths: &[f32],
        cells: &[&str],
        size: f32,
        height: f32,
        header: Option<(u8, u8, u8)>,
    ) {
        let top = self.cursor;
        let bottom = top - height;
        let total: f32 = widths.iter().sum();
        if let Some(background) = header {
            self.fill_rect(left, bottom, total, height, background);
        }

        let (face, color) = match header {
            Some(_) => (Face::Bold, WHITE),
            None => (Face::Regular, TEXT_BLACK),
        };
        let mut x = left;
        for (cell, width) in cells.iter().zip(widths) {
            let text = fit_text(cell, size, width - 2.0);
            let text_x = x + (width - text_width(&text, size)) / 2.0;
            self.put_text(&text, size, face, text_x, bottom + 2.0, color);
            self.stroke(
                &[(x, bottom), (x + width, bottom), (x + width, top), (x, top)],
                true,
                GRID_GREY,
                0.5,
            );
            x += width;
        }
        self.cursor = bottom;
    }

    fn bar_chart(&mut self, months: &[MonthlyTotal]) {
        let chart_height = 70.0;
        let label_band = 10.0;
        self.ensure_space(chart_height + label_band + line_height(12.0) + 4.0);
        self.centered("Monthly Expense Trend", 12.0, Face::Bold, TEXT_BLACK);
        self.gap(4.0);

        let top = self.cursor;
        let base = top - chart_height;
        let axis_left = MARGIN_X + 12.0;
        let axis_right = PAGE_WIDTH - MARGIN_X;
        let plot_width = axis_right - axis_left;

        for step in 1..=4 {
            let y = base + (chart_height - 6.0) * step as f32 / 4.0;
            self.stroke(&[(axis_left, y), (axis_right, y)], false, GRID_GREY, 0.3);
        }
        self.stroke(
            &[(axis_left, top), (axis_left, base), (axis_right, base)],
            false,
            TEXT_BLACK,
            0.8,
        );

        let max = months.iter().map(|m| m.total_cents).max().unwrap_or(0);
        let slot = plot_width / months.len().max(1) as f32;
        let bar_width = slot * 0.6;
        let label_size = if months.len() > 8 { 6.0 } else { 8.0 };
        for (index, month) in months.iter().enumerate() {
            let x = axis_left + slot * index as f32 + (slot - bar_width) / 2.0;
            let height = if max > 0 {
                (chart_height - 6.0) * month.total_cents as f32 / max as f32
            } else {
                0.0
            };
            self.fill_rect(x, base, bar_width, height, BAR_BLUE);

            let label = month.label();
            let label_x = x + (bar_width - text_width(&label, label_size)) / 2.0;
            self.put_text(&label, label_size, Face::Regular, label_x, base - 5.0, TEXT_BLACK);

            let value = money_label(month.total_cents);
            let value_x = x + (bar_width - text_width(&value, label_size)) / 2.0;
            self.put_text(&value, label_size, Face::Regular, value_x, base + height + 1.5, TEXT_BLACK);
        }

        self.cursor = base - label_band;
    }

    fn pie_chart(&mut self, slices: &[CategoryTotal]) {
        let radius = 32.0;
        let title_height = line_height(12.0) + 4.0;
        self.ensure_space(radius * 2.0 + title_height + 6.0);
        self.centered("Expenses by Category", 12.0, Face::Bold, TEXT_BLACK);
        self.gap(4.0);

        let total = slices
            .iter()
            .map(|s| s.total_cents)
            .fold(0_i64, i64::saturating_add);
        let cx = MARGIN_X + radius + 10.0;
        let cy = self.cursor - radius;
        if total <= 0 {
            self.paragraph("No spending to chart.", 11.0, Face::Oblique, 8.0, TEXT_BLACK);
            return;
        }

        // Slices run clockwise from twelve o'clock.
        let mut start = FRAC_PI_2;
        let legend_x = cx + radius + 15.0;
        let mut legend_y = self.cursor - 4.0;
        for (index, slice) in slices.iter().enumerate() {
            let share = slice.total_cents as f32 / total as f32;
            let sweep = share * TAU;
            let color = PIE_PALETTE[index % PIE_PALETTE.len()];
            if sweep > 0.0 {
                let steps = ((sweep / TAU) * 120.0).ceil().max(2.0) as usize;
                let mut points = Vec::with_capacity(steps + 2);
                points.push((cx, cy));
                for step in 0..=steps {
                    let angle = start - sweep * step as f32 / steps as f32;
                    points.push((cx + radius * angle.cos(), cy + radius * angle.sin()));
                }
                self.fill_polygon(&points, color);
                start -= sweep;
            }

            let name = slice.category_name.as_deref().unwrap_or(UNCATEGORIZED_LABEL);
            self.fill_rect(legend_x, legend_y - 0.5, 3.5, 3.5, color);
            let legend = fit_text(
                &format!("{name} ({:.1}%)", share * 100.0),
                9.0,
                PAGE_WIDTH - MARGIN_X - legend_x - 6.0,
            );
            self.put_text(&legend, 9.0, Face::Regular, legend_x + 5.5, legend_y, TEXT_BLACK);
            legend_y -= line_height(9.0) + 1.0;
        }

        self.cursor = (cy - radius).min(legend_y) - 4.0;
    }

    fn finish(self) -> Result<RenderedReport, ReportError> {
        let pages = self.pages;
        let bytes = self.doc.save_to_bytes().map_err(pdf_error)?;
        Ok(RenderedReport { bytes, pages })
    }
}

pub fn render(report: &Report) -> Result<RenderedReport, ReportError> {
    let mut writer = PageWriter::new(&report.title)?;

    writer.centered(&report.title, 22.0, Face::Bold, TITLE_BLUE);
    writer.rule(TITLE_BLUE);
    writer.gap(8.0);

    writer.section("Executive Summary");
    for line in report.summary.lines() {
        writer.bullet(&line);
    }
    writer.gap(8.0);

    writer.section("Monthly Expense Summary");
    let monthly: Vec<Vec<String>> = report
        .monthly_rows()
        .into_iter()
        .map(|row| row.to_vec())
        .collect();
    writer.table(
        &["Month", "Total (Rs.)"],
        &[92.0, 82.0],
        &monthly,
        11.0,
        HEADER_BLUE,
    );
    writer.gap(8.0);

    writer.bar_chart(&report.trend.months);
    writer.gap(6.0);

    writer.section("Month-over-Month Analysis");
    for line in report.narrative() {
        writer.bullet(&line);
    }
    writer.gap(8.0);

    if let Some(breakdown) = &report.category_breakdown {
        writer.pie_chart(breakdown);
    }

    writer.new_page();
    writer.section("Detailed Expense Records");
    let ledger: Vec<Vec<String>> = report
        .ledger
        .iter()
        .map(|row| {
            vec![
                row.title.clone(),
                row.category.clone(),
                row.date.clone(),
                row.amount.clone(),
            ]
        })
        .collect();
    writer.table(
        &["Title", "Category", "Date", "Amount (Rs.)"],
        &[66.0, 44.0, 32.0, 32.0],
        &ledger,
        10.0,
        SECTION_BLUE,
    );

    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PaymentMode, User};
    use crate::report::build_report;
    use crate::summary::tests::expense;
    use chrono::{Days, NaiveDate, TimeZone, Utc};

    fn user() -> User {
        User {
            id: 7,
            full_name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            reg_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn renders_a_pdf_with_ledger_on_its_own_page() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let expenses = vec![
            expense(1, Some("Food & Dining"), 4500, PaymentMode::Cash, day),
            expense(2, None, 1200, PaymentMode::Upi, day),
        ];
        let report = build_report(&user(), &expenses, None).unwrap();

        let rendered = render(&report).unwrap();
        assert!(rendered.bytes.starts_with(b"%PDF"));
        assert_eq!(rendered.pages, 2);
    }

    #[test]
    fn long_ledgers_spill_onto_more_pages() {
        let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let expenses: Vec<_> = (0..150)
            .map(|i| {
                let date = first.checked_add_days(Days::new(i * 3)).unwrap();
                expense(i as i64, Some("Transport"), 100 + i as i64, PaymentMode::Card, date)
            })
            .collect();
        let report = build_report(&user(), &expenses, None).unwrap();

        let rendered = render(&report).unwrap();
        assert!(rendered.pages >= 4);
    }

    #[test]
    fn zero_amount_expenses_still_render() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let expenses = vec![expense(1, Some("Gifts"), 0, PaymentMode::Other, day)];
        let report = build_report(&user(), &expenses, None).unwrap();
        assert!(render(&report).is_ok());
    }

    #[test]
    fn long_text_is_clipped_to_width() {
        let clipped = fit_text(&"x".repeat(200), 10.0, 30.0);
        assert!(clipped.ends_with("..."));
        assert!(text_width(&clipped, 10.0) <= 30.0);
        assert_eq!(fit_text("short", 10.0, 30.0), "short");
    }
}
