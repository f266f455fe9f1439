//! Drawing primitives produced by the layout engine.

/// Stroke colors used by the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Grey,
}

impl Color {
    pub fn rgb(self) -> (f32, f32, f32) {
        match self {
            Color::Black => (0.0, 0.0, 0.0),
            Color::Grey => (0.5, 0.5, 0.5),
        }
    }
}

/// The two standard PDF fonts the chart uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    pub fn base_font(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Name of the font in the page resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }
}

/// Horizontal anchoring of a text primitive relative to its x.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// One absolute-coordinate drawing operation (origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingPrimitive {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
        color: Color,
    },
    /// Stroked outline in the border pen.
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Text {
        x: f64,
        y: f64,
        font: Font,
        size: f64,
        content: String,
        alignment: Alignment,
    },
}

impl DrawingPrimitive {
    /// Text content, for text primitives.
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawingPrimitive::Text { content, .. } => Some(content),
            _ => None,
        }
    }
}
