//! Grid layout — places measures into a fixed-width page, row-major, and
//! emits the drawing primitives for each cell.
//!
//! Placement is a pure function of (index, columns, page geometry), so any
//! single cell can be computed and checked without walking the chart.

use crate::config::{ChartConfig, MAX_COLUMNS, MIN_COLUMNS};
use crate::model::{Chart, MeasureRecord};
use super::constants::*;
use super::primitives::{Alignment, Color, DrawingPrimitive, Font};

// ═══════════════════════════════════════════════════════════════════════
// Layout structures
// ═══════════════════════════════════════════════════════════════════════

/// Fixed page geometry (points, origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    /// Baseline of the title block
    pub title_baseline: f64,
    /// Top edge of the first grid row
    pub grid_top: f64,
    pub row_height: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            margin: PAGE_MARGIN,
            title_baseline: PAGE_HEIGHT - TITLE_DROP,
            grid_top: PAGE_HEIGHT - GRID_DROP,
            row_height: ROW_HEIGHT,
        }
    }
}

impl PageGeometry {
    pub fn column_width(&self, columns: usize) -> f64 {
        (self.width - 2.0 * self.margin) / columns as f64
    }

    /// Rows that fit between the grid top and the bottom margin.
    pub fn rows_per_page(&self) -> usize {
        ((self.grid_top - self.margin) / self.row_height).floor() as usize
    }
}

/// Position and size of one measure cell. `y` is the cell's bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    pub index: usize,
    pub row: usize,
    pub column: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CellGeometry {
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn sub_column_width(&self) -> f64 {
        self.width / SUB_COLUMNS as f64
    }
}

/// Complete layout of one chart page.
#[derive(Debug, Clone)]
pub struct ChartLayout {
    pub page: PageGeometry,
    pub columns: usize,
    pub rows: usize,
    pub cells: Vec<CellGeometry>,
    /// Everything to draw, in paint order
    pub primitives: Vec<DrawingPrimitive>,
}

// ═══════════════════════════════════════════════════════════════════════
// Placement
// ═══════════════════════════════════════════════════════════════════════

/// Cell for the measure at `index` (0-based). Zero columns is read as one.
pub fn place_cell(index: usize, columns: usize, page: &PageGeometry) -> CellGeometry {
    let columns = columns.max(1);
    let row = index / columns;
    let column = index % columns;
    let width = page.column_width(columns);
    CellGeometry {
        index,
        row,
        column,
        x: page.margin + column as f64 * width,
        y: page.grid_top - page.row_height * (row as f64 + 1.0),
        width,
        height: page.row_height,
    }
}

pub fn row_count(measures: usize, columns: usize) -> usize {
    measures.div_ceil(columns.max(1))
}

// ═══════════════════════════════════════════════════════════════════════
// Main layout computation
// ═══════════════════════════════════════════════════════════════════════

pub fn layout_chart(chart: &Chart, config: &ChartConfig) -> ChartLayout {
    let page = PageGeometry::default();
    let columns = config.columns_per_row.clamp(MIN_COLUMNS, MAX_COLUMNS) as usize;
    let count = chart.measures.len();
    let rows = row_count(count, columns);

    if rows > page.rows_per_page() {
        tracing::warn!(
            rows,
            fit = page.rows_per_page(),
            "chart is taller than one page; lower rows fall off the page"
        );
    }

    let mut primitives = title_block(chart, &page);
    let mut cells = Vec::with_capacity(count);

    for (i, record) in chart.measures.iter().enumerate() {
        let cell = place_cell(i, columns, &page);
        let edge = RightEdge::for_cell(i, columns, count);
        primitives.extend(measure_primitives(record, &cell, edge, config.include_slashes));
        cells.push(cell);
    }

    tracing::debug!(measures = count, rows, primitives = primitives.len(), "laid out chart");

    ChartLayout {
        page,
        columns,
        rows,
        cells,
        primitives,
    }
}

/// Upper-cased title at the left margin, time signature flush right.
pub fn title_block(chart: &Chart, page: &PageGeometry) -> Vec<DrawingPrimitive> {
    vec![
        DrawingPrimitive::Text {
            x: page.margin,
            y: page.title_baseline,
            font: Font::HelveticaBold,
            size: TITLE_SIZE,
            content: chart.title.to_uppercase(),
            alignment: Alignment::Left,
        },
        DrawingPrimitive::Text {
            x: page.width - page.margin,
            y: page.title_baseline,
            font: Font::HelveticaBold,
            size: TIME_SIG_SIZE,
            content: chart.time_signature.clone(),
            alignment: Alignment::Right,
        },
    ]
}

/// How a cell's right edge is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RightEdge {
    /// Shared with the next cell's left border
    Open,
    /// Single line closing a full row
    Single,
    /// Heavy double line after the very last measure
    Final,
}

impl RightEdge {
    pub fn for_cell(index: usize, columns: usize, count: usize) -> Self {
        if index + 1 == count {
            RightEdge::Final
        } else if (index + 1) % columns == 0 {
            RightEdge::Single
        } else {
            RightEdge::Open
        }
    }
}

/// Primitives for one measure, in paint order: badge, left border, right
/// edge, bottom border, number, slashes, chords.
pub fn measure_primitives(
    record: &MeasureRecord,
    cell: &CellGeometry,
    edge: RightEdge,
    include_slashes: bool,
) -> Vec<DrawingPrimitive> {
    let mut out = Vec::new();
    let (x, y, top, right) = (cell.x, cell.y, cell.top(), cell.right());

    if let Some(ref label) = record.rehearsal_mark {
        out.push(DrawingPrimitive::Rect {
            x,
            y: top + BADGE_LIFT,
            width: BADGE_SIZE,
            height: BADGE_SIZE,
        });
        out.push(DrawingPrimitive::Text {
            x: x + BADGE_SIZE / 2.0,
            y: top + BADGE_TEXT_LIFT,
            font: Font::HelveticaBold,
            size: BADGE_TEXT_SIZE,
            content: label.clone(),
            alignment: Alignment::Center,
        });
    }

    out.push(border(x, y, x, top, BORDER_WIDTH));
    match edge {
        RightEdge::Open => {}
        RightEdge::Single => out.push(border(right, y, right, top, BORDER_WIDTH)),
        RightEdge::Final => {
            out.push(border(right, y, right, top, FINAL_BAR_WIDTH));
            let inner = right - FINAL_BAR_GAP;
            out.push(border(inner, y, inner, top, FINAL_BAR_THIN_WIDTH));
        }
    }
    out.push(border(x, y, right, y, BORDER_WIDTH));

    out.push(DrawingPrimitive::Text {
        x: x + MEASURE_NUMBER_INSET_X,
        y: top - MEASURE_NUMBER_DROP,
        font: Font::Helvetica,
        size: MEASURE_NUMBER_SIZE,
        content: record.display_number.clone(),
        alignment: Alignment::Left,
    });

    let slot = cell.sub_column_width();
    let middle = y + cell.height / 2.0;

    if record.chords.is_empty() && include_slashes {
        for s in 0..SUB_COLUMNS {
            let sx = x + slot * s as f64 + slot / 2.0;
            out.push(DrawingPrimitive::Line {
                x1: sx - SLASH_HALF_WIDTH,
                y1: middle - SLASH_HALF_HEIGHT,
                x2: sx + SLASH_HALF_WIDTH,
                y2: middle + SLASH_HALF_HEIGHT,
                width: SLASH_WIDTH,
                color: Color::Grey,
            });
        }
    }

    // Chords past the fourth slot are not drawn.
    for (idx, chord) in record.chords.iter().take(SUB_COLUMNS).enumerate() {
        out.push(DrawingPrimitive::Text {
            x: x + slot * idx as f64 + CHORD_INSET_X,
            y: middle - CHORD_DROP,
            font: Font::HelveticaBold,
            size: CHORD_SIZE,
            content: chord.text.clone(),
            alignment: Alignment::Left,
        });
    }

    out
}

fn border(x1: f64, y1: f64, x2: f64, y2: f64, width: f64) -> DrawingPrimitive {
    DrawingPrimitive::Line {
        x1,
        y1,
        x2,
        y2,
        width,
        color: Color::Black,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChordSymbol;

    fn record(number: usize, chords: &[&str]) -> MeasureRecord {
        MeasureRecord {
            display_number: number.to_string(),
            chords: chords
                .iter()
                .map(|t| ChordSymbol {
                    text: t.to_string(),
                    beat_offset: 0,
                })
                .collect(),
            rehearsal_mark: None,
        }
    }

    fn chart(records: Vec<MeasureRecord>) -> Chart {
        Chart {
            title: "Test Tune".to_string(),
            time_signature: "4/4".to_string(),
            part_id: "P1".to_string(),
            measures: records,
        }
    }

    /// Widths of the vertical strokes at `at_x` spanning `cell`.
    fn vertical_lines_at(prims: &[DrawingPrimitive], cell: &CellGeometry, at_x: f64) -> Vec<f64> {
        prims
            .iter()
            .filter_map(|p| match *p {
                DrawingPrimitive::Line { x1, y1, x2, y2, width, .. }
                    if (x1 - at_x).abs() < 1e-6
                        && (x2 - at_x).abs() < 1e-6
                        && (y1 - cell.y).abs() < 1e-6
                        && (y2 - cell.top()).abs() < 1e-6 =>
                {
                    Some(width)
                }
                _ => None,
            })
            .collect()
    }

    fn grey_lines(prims: &[DrawingPrimitive]) -> usize {
        prims
            .iter()
            .filter(|p| matches!(p, DrawingPrimitive::Line { color: Color::Grey, .. }))
            .count()
    }

    fn texts(prims: &[DrawingPrimitive]) -> Vec<&str> {
        prims.iter().filter_map(|p| p.text()).collect()
    }

    #[test]
    fn placement_is_row_major() {
        let page = PageGeometry::default();
        let cw = page.column_width(4);

        let first = place_cell(0, 4, &page);
        assert_eq!((first.row, first.column), (0, 0));
        assert!((first.x - page.margin).abs() < 1e-9);
        assert!((first.top() - page.grid_top).abs() < 1e-9);

        let wrapped = place_cell(5, 4, &page);
        assert_eq!((wrapped.row, wrapped.column), (1, 1));
        assert!((wrapped.x - (page.margin + cw)).abs() < 1e-9);
        assert!((wrapped.y - (page.grid_top - 2.0 * page.row_height)).abs() < 1e-9);
    }

    #[test]
    fn columns_fill_the_usable_width() {
        let page = PageGeometry::default();
        for columns in 4..=8 {
            let last = place_cell(columns - 1, columns, &page);
            assert!((last.right() - (page.width - page.margin)).abs() < 1e-9);
        }
    }

    #[test]
    fn row_counts_round_up() {
        assert_eq!(row_count(0, 4), 0);
        assert_eq!(row_count(4, 4), 1);
        assert_eq!(row_count(9, 4), 3);
        assert_eq!(row_count(9, 8), 2);
    }

    #[test]
    fn only_the_last_measure_gets_the_double_bar() {
        let records: Vec<MeasureRecord> = (1..=9).map(|n| record(n, &["C"])).collect();
        let layout = layout_chart(&chart(records), &ChartConfig::default());
        let prims = &layout.primitives;

        // Measure 8 closes row 2 with a single line.
        let eighth = layout.cells[7];
        assert_eq!(vertical_lines_at(prims, &eighth, eighth.right()), vec![BORDER_WIDTH]);

        // Measure 9 sits alone in row 3 and carries both strokes.
        let ninth = layout.cells[8];
        assert_eq!(
            vertical_lines_at(prims, &ninth, ninth.right()),
            vec![FINAL_BAR_WIDTH]
        );
        assert_eq!(
            vertical_lines_at(prims, &ninth, ninth.right() - FINAL_BAR_GAP),
            vec![FINAL_BAR_THIN_WIDTH]
        );

        let heavy = prims
            .iter()
            .filter(|p| matches!(p, DrawingPrimitive::Line { width, .. } if *width == FINAL_BAR_WIDTH))
            .count();
        assert_eq!(heavy, 1);
    }

    #[test]
    fn right_edge_rules() {
        assert_eq!(RightEdge::for_cell(0, 4, 9), RightEdge::Open);
        assert_eq!(RightEdge::for_cell(3, 4, 9), RightEdge::Single);
        assert_eq!(RightEdge::for_cell(7, 4, 9), RightEdge::Single);
        assert_eq!(RightEdge::for_cell(8, 4, 9), RightEdge::Final);
        // Short final row: the mid-row last measure is final.
        assert_eq!(RightEdge::for_cell(5, 4, 6), RightEdge::Final);
        assert_eq!(RightEdge::for_cell(4, 4, 6), RightEdge::Open);
    }

    #[test]
    fn chords_truncate_at_four() {
        let page = PageGeometry::default();
        let cell = place_cell(0, 4, &page);
        let rec = record(1, &["C", "D", "E", "F", "G", "A"]);
        let prims = measure_primitives(&rec, &cell, RightEdge::Final, true);

        assert_eq!(texts(&prims), vec!["1", "C", "D", "E", "F"]);
        assert_eq!(grey_lines(&prims), 0);
    }

    #[test]
    fn chords_sit_in_sub_columns() {
        let page = PageGeometry::default();
        let cell = place_cell(2, 4, &page);
        let rec = record(3, &["G", "D"]);
        let prims = measure_primitives(&rec, &cell, RightEdge::Open, true);

        let xs: Vec<f64> = prims
            .iter()
            .filter_map(|p| match p {
                DrawingPrimitive::Text { x, size, .. } if *size == CHORD_SIZE => Some(*x),
                _ => None,
            })
            .collect();
        let slot = cell.width / 4.0;
        assert_eq!(xs.len(), 2);
        assert!((xs[0] - (cell.x + CHORD_INSET_X)).abs() < 1e-9);
        assert!((xs[1] - (cell.x + slot + CHORD_INSET_X)).abs() < 1e-9);
    }

    #[test]
    fn empty_measure_gets_four_slashes() {
        let page = PageGeometry::default();
        let cell = place_cell(0, 4, &page);
        let rec = record(2, &[]);

        let with = measure_primitives(&rec, &cell, RightEdge::Open, true);
        assert_eq!(grey_lines(&with), 4);

        let without = measure_primitives(&rec, &cell, RightEdge::Open, false);
        assert_eq!(grey_lines(&without), 0);
    }

    #[test]
    fn slashes_are_centered_in_slots() {
        let page = PageGeometry::default();
        let cell = place_cell(0, 4, &page);
        let prims = measure_primitives(&record(1, &[]), &cell, RightEdge::Open, true);
        let slot = cell.width / 4.0;

        let centers: Vec<f64> = prims
            .iter()
            .filter_map(|p| match *p {
                DrawingPrimitive::Line { x1, x2, color: Color::Grey, .. } => Some((x1 + x2) / 2.0),
                _ => None,
            })
            .collect();
        for (s, c) in centers.iter().enumerate() {
            assert!((c - (cell.x + slot * s as f64 + slot / 2.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn rehearsal_badge_comes_first() {
        let page = PageGeometry::default();
        let cell = place_cell(0, 4, &page);
        let mut rec = record(1, &["C"]);
        rec.rehearsal_mark = Some("A".to_string());
        let prims = measure_primitives(&rec, &cell, RightEdge::Final, true);

        match &prims[0] {
            DrawingPrimitive::Rect { x, y, width, height } => {
                assert!((x - cell.x).abs() < 1e-9);
                assert!((y - (cell.top() + BADGE_LIFT)).abs() < 1e-9);
                assert_eq!((*width, *height), (BADGE_SIZE, BADGE_SIZE));
            }
            other => panic!("expected badge rect, got {other:?}"),
        }
        match &prims[1] {
            DrawingPrimitive::Text { content, alignment, .. } => {
                assert_eq!(content, "A");
                assert_eq!(*alignment, Alignment::Center);
            }
            other => panic!("expected badge label, got {other:?}"),
        }
    }

    #[test]
    fn cell_paint_order() {
        let page = PageGeometry::default();
        let cell = place_cell(0, 4, &page);
        let mut rec = record(1, &["C"]);
        rec.rehearsal_mark = Some("A".to_string());
        let prims = measure_primitives(&rec, &cell, RightEdge::Final, true);

        let (x, y, top, right) = (cell.x, cell.y, cell.top(), cell.right());
        let middle = y + cell.height / 2.0;
        let expected = vec![
            DrawingPrimitive::Rect {
                x,
                y: top + BADGE_LIFT,
                width: BADGE_SIZE,
                height: BADGE_SIZE,
            },
            DrawingPrimitive::Text {
                x: x + BADGE_SIZE / 2.0,
                y: top + BADGE_TEXT_LIFT,
                font: Font::HelveticaBold,
                size: BADGE_TEXT_SIZE,
                content: "A".to_string(),
                alignment: Alignment::Center,
            },
            border(x, y, x, top, BORDER_WIDTH),
            border(right, y, right, top, FINAL_BAR_WIDTH),
            border(right - FINAL_BAR_GAP, y, right - FINAL_BAR_GAP, top, FINAL_BAR_THIN_WIDTH),
            border(x, y, right, y, BORDER_WIDTH),
            DrawingPrimitive::Text {
                x: x + MEASURE_NUMBER_INSET_X,
                y: top - MEASURE_NUMBER_DROP,
                font: Font::Helvetica,
                size: MEASURE_NUMBER_SIZE,
                content: "1".to_string(),
                alignment: Alignment::Left,
            },
            DrawingPrimitive::Text {
                x: x + CHORD_INSET_X,
                y: middle - CHORD_DROP,
                font: Font::HelveticaBold,
                size: CHORD_SIZE,
                content: "C".to_string(),
                alignment: Alignment::Left,
            },
        ];
        assert_eq!(prims, expected);

        // Measure number sits 1.5 mm in from the left and 4 mm below the top.
        match &prims[6] {
            DrawingPrimitive::Text { x: nx, y: ny, .. } => {
                assert!((nx - (cell.x + 1.5 * MM)).abs() < 1e-9);
                assert!((ny - (cell.top() - 4.0 * MM)).abs() < 1e-9);
            }
            other => panic!("expected measure number, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_columns_are_clamped() {
        let records: Vec<MeasureRecord> = (1..=9).map(|n| record(n, &["C"])).collect();

        let zero = ChartConfig {
            columns_per_row: 0,
            ..ChartConfig::default()
        };
        let layout = layout_chart(&chart(records.clone()), &zero);
        assert_eq!(layout.columns, MIN_COLUMNS as usize);
        assert_eq!(layout.rows, 3);

        let wide = ChartConfig {
            columns_per_row: 40,
            ..ChartConfig::default()
        };
        let layout = layout_chart(&chart(records), &wide);
        assert_eq!(layout.columns, MAX_COLUMNS as usize);
        assert_eq!(layout.rows, 2);

        assert_eq!(row_count(3, 0), 3);
        assert_eq!(place_cell(2, 0, &PageGeometry::default()).row, 2);
    }

    #[test]
    fn empty_chart_still_has_title() {
        let layout = layout_chart(&chart(Vec::new()), &ChartConfig::default());
        assert_eq!(layout.rows, 0);
        assert!(layout.cells.is_empty());
        assert_eq!(texts(&layout.primitives), vec!["TEST TUNE", "4/4"]);
    }

    #[test]
    fn single_measure_chart() {
        let layout = layout_chart(&chart(vec![record(1, &["C"])]), &ChartConfig::default());
        assert_eq!(layout.rows, 1);
        assert_eq!(texts(&layout.primitives), vec!["TEST TUNE", "4/4", "1", "C"]);
        let cell = layout.cells[0];
        assert_eq!(
            vertical_lines_at(&layout.primitives, &cell, cell.right()),
            vec![FINAL_BAR_WIDTH]
        );
    }
}
