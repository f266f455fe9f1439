//! PDF builder — a single-page canvas that accumulates content-stream
//! operations and produces the final document bytes.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::error::ChartError;
use super::constants::*;
use super::font_metrics::text_width;
use super::primitives::{Alignment, Color, DrawingPrimitive, Font};

// ═══════════════════════════════════════════════════════════════════════
// PdfCanvas
// ═══════════════════════════════════════════════════════════════════════

pub(super) struct PdfCanvas {
    pub(super) operations: Vec<Operation>,
    width: f64,
    height: f64,
    /// Stroke width and color currently set in the graphics state
    pen: Option<(f64, Color)>,
}

impl PdfCanvas {
    pub(super) fn new(width: f64, height: f64) -> Self {
        Self {
            operations: Vec::new(),
            width,
            height,
            pen: None,
        }
    }

    pub(super) fn draw(&mut self, primitive: &DrawingPrimitive) {
        match primitive {
            DrawingPrimitive::Line { x1, y1, x2, y2, width, color } => {
                self.line(*x1, *y1, *x2, *y2, *width, *color)
            }
            DrawingPrimitive::Rect { x, y, width, height } => self.rect(*x, *y, *width, *height),
            DrawingPrimitive::Text { x, y, font, size, content, alignment } => {
                self.text(*x, *y, *font, *size, content, *alignment)
            }
        }
    }

    pub(super) fn move_to(&mut self, x: f64, y: f64) {
        self.op("m", vec![real(x), real(y)]);
    }

    pub(super) fn line_to(&mut self, x: f64, y: f64) {
        self.op("l", vec![real(x), real(y)]);
    }

    pub(super) fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Color) {
        self.set_pen(width, color);
        self.move_to(x1, y1);
        self.line_to(x2, y2);
        self.op("S", vec![]);
    }

    /// Stroked rectangle in the border pen.
    pub(super) fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.set_pen(BORDER_WIDTH, Color::Black);
        self.op("re", vec![real(x), real(y), real(w), real(h)]);
        self.op("S", vec![]);
    }

    pub(super) fn text(
        &mut self,
        x: f64,
        y: f64,
        font: Font,
        size: f64,
        content: &str,
        alignment: Alignment,
    ) {
        let start_x = match alignment {
            Alignment::Left => x,
            Alignment::Center => x - text_width(font, size, content) / 2.0,
            Alignment::Right => x - text_width(font, size, content),
        };
        self.op("BT", vec![]);
        self.op(
            "Tf",
            vec![Object::Name(font.resource_name().as_bytes().to_vec()), real(size)],
        );
        self.op("Td", vec![real(start_x), real(y)]);
        self.op("Tj", vec![pdf_string(content)]);
        self.op("ET", vec![]);
    }

    fn set_pen(&mut self, width: f64, color: Color) {
        if self.pen == Some((width, color)) {
            return;
        }
        let (r, g, b) = color.rgb();
        self.op("w", vec![real(width)]);
        self.op("RG", vec![Object::Real(r), Object::Real(g), Object::Real(b)]);
        self.pen = Some((width, color));
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    /// Assemble the single-page document and serialize it.
    pub(super) fn build(self, title: &str) -> Result<Vec<u8>, ChartError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = lopdf::Dictionary::new();
        for font in [Font::Helvetica, Font::HelveticaBold] {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), font_id);
        }
        let resources_id = doc.add_object(dictionary! { "Font" => fonts });

        let content = Content {
            operations: self.operations,
        };
        let encoded = content
            .encode()
            .map_err(|e| ChartError::Pdf(format!("Content encoding failed: {e}")))?;
        let content_id = doc.add_object(Stream::new(lopdf::Dictionary::new(), encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                real(self.width),
                real(self.height),
            ],
        });

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => Object::Integer(1),
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => pdf_string(title),
            "Producer" => pdf_string(PRODUCER),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| ChartError::Pdf(format!("Save failed: {e}")))?;
        Ok(buffer)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Operand helpers
// ═══════════════════════════════════════════════════════════════════════

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

/// Literal string in the fonts' WinAnsi encoding. Characters outside
/// Latin-1 become '?'.
pub(super) fn pdf_string(text: &str) -> Object {
    Object::String(encode_latin1(text), StringFormat::Literal)
}

pub(super) fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
