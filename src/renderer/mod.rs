//! Chart renderer — lays out a chart on one A4 page and writes it as PDF.
//!
//! The layout engine decides everything; this module only feeds the
//! resulting primitives to the page canvas in order and finalizes the
//! document.

mod constants;
mod font_metrics;
mod layout;
mod pdf_builder;
mod primitives;

use crate::config::ChartConfig;
use crate::error::ChartError;
use crate::model::Chart;
use pdf_builder::PdfCanvas;

pub use layout::{
    layout_chart, measure_primitives, place_cell, row_count, title_block, CellGeometry,
    ChartLayout, PageGeometry, RightEdge,
};
pub use primitives::{Alignment, Color, DrawingPrimitive, Font};

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Render a chart into a complete single-page PDF.
pub fn render_chart_to_pdf(chart: &Chart, config: &ChartConfig) -> Result<Vec<u8>, ChartError> {
    config.validate()?;
    let layout = layout_chart(chart, config);
    render_layout_to_pdf(&layout, &chart.title)
}

/// Draw an already computed layout.
pub fn render_layout_to_pdf(layout: &ChartLayout, title: &str) -> Result<Vec<u8>, ChartError> {
    let mut canvas = PdfCanvas::new(layout.page.width, layout.page.height);
    for primitive in &layout.primitives {
        canvas.draw(primitive);
    }
    let pdf = canvas.build(title)?;

    tracing::info!(
        measures = layout.cells.len(),
        rows = layout.rows,
        bytes = pdf.len(),
        "rendered chart PDF"
    );
    Ok(pdf)
}
