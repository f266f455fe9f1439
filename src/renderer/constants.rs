//! Shared constants for the chart renderer (all in PDF points unless noted).

/// One millimetre in points.
pub(super) const MM: f64 = 72.0 / 25.4;

// ── Page & margins (A4 portrait) ────────────────────────────────────
pub(super) const PAGE_WIDTH: f64 = 210.0 * MM;
pub(super) const PAGE_HEIGHT: f64 = 297.0 * MM;
pub(super) const PAGE_MARGIN: f64 = 15.0 * MM;
pub(super) const TITLE_DROP: f64 = 25.0 * MM; // title baseline below the page top
pub(super) const GRID_DROP: f64 = 30.0 * MM; // grid top below the page top

// ── Cells ───────────────────────────────────────────────────────────
pub(super) const ROW_HEIGHT: f64 = 22.0 * MM;
pub(super) const SUB_COLUMNS: usize = 4; // chord slots per measure
pub(super) const BORDER_WIDTH: f64 = 0.7;
pub(super) const FINAL_BAR_WIDTH: f64 = 2.0;
pub(super) const FINAL_BAR_THIN_WIDTH: f64 = 0.5;
pub(super) const FINAL_BAR_GAP: f64 = 1.0 * MM;

// ── Rehearsal badge ─────────────────────────────────────────────────
pub(super) const BADGE_SIZE: f64 = 6.0 * MM;
pub(super) const BADGE_LIFT: f64 = 1.0 * MM; // gap between cell top and badge
pub(super) const BADGE_TEXT_LIFT: f64 = 2.5 * MM;

// ── Slashes ─────────────────────────────────────────────────────────
pub(super) const SLASH_WIDTH: f64 = 0.4;
pub(super) const SLASH_HALF_WIDTH: f64 = 2.0 * MM;
pub(super) const SLASH_HALF_HEIGHT: f64 = 3.0 * MM;

// ── Text ────────────────────────────────────────────────────────────
pub(super) const TITLE_SIZE: f64 = 18.0;
pub(super) const TIME_SIG_SIZE: f64 = 10.0;
pub(super) const BADGE_TEXT_SIZE: f64 = 10.0;
pub(super) const MEASURE_NUMBER_SIZE: f64 = 7.0;
pub(super) const CHORD_SIZE: f64 = 14.0;
pub(super) const MEASURE_NUMBER_INSET_X: f64 = 1.5 * MM;
pub(super) const MEASURE_NUMBER_DROP: f64 = 4.0 * MM;
pub(super) const CHORD_INSET_X: f64 = 2.0 * MM;
pub(super) const CHORD_DROP: f64 = 2.0 * MM; // chord baseline below the cell middle

pub(super) const PRODUCER: &str = "chordgrid";
