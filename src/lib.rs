//! chordgrid — turns a MusicXML lead sheet into a one-page rhythmic chord chart.
//!
//! Supports both uncompressed MusicXML (.musicxml) and compressed MXL (.mxl) files.
//!
//! # Example
//! ```no_run
//! use chordgrid::{generate_chart_from_file, ChartConfig};
//!
//! let config = ChartConfig { columns_per_row: 6, ..ChartConfig::default() };
//! let chart = generate_chart_from_file("path/to/song.musicxml", &config).unwrap();
//! std::fs::write(&chart.file_name, &chart.pdf).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod extractor;
pub mod model;
pub mod mxl;
pub mod normalizer;
pub mod parser;
pub mod renderer;

use std::path::Path;

pub use config::ChartConfig;
pub use error::{ChartError, ConfigError, ExtractionError};
pub use extractor::extract_chart;
pub use model::*;
pub use mxl::parse_mxl;
pub use normalizer::normalize_harmony;
pub use parser::parse_musicxml;
pub use renderer::{layout_chart, render_chart_to_pdf, DrawingPrimitive};

/// Parse MusicXML from raw bytes with an optional format hint.
/// If `extension` is None, tries to auto-detect the format.
pub fn parse_bytes(data: &[u8], extension: Option<&str>) -> Result<Score, ExtractionError> {
    match extension {
        Some("mxl") => parse_mxl(data),
        Some("musicxml") | Some("xml") => {
            let xml = std::str::from_utf8(data).map_err(|e| {
                ExtractionError::MalformedInput(format!("Invalid UTF-8 in MusicXML file: {e}"))
            })?;
            parse_musicxml(xml)
        }
        _ => {
            // Auto-detect: try as XML first, then as MXL
            if let Ok(xml) = std::str::from_utf8(data) {
                if xml.trim_start().starts_with('<') {
                    return parse_musicxml(xml);
                }
            }
            parse_mxl(data)
        }
    }
}

/// Read and parse a score file; the format follows the file extension.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Score, ChartError> {
    let path = path.as_ref();
    let data = read_input(path)?;
    Ok(parse_bytes(&data, extension_of(path))?)
}

/// Parse and extract the chart records without rendering.
pub fn extract_chart_from_bytes(
    data: &[u8],
    extension: Option<&str>,
    config: &ChartConfig,
) -> Result<Chart, ChartError> {
    config.validate()?;
    let score = parse_bytes(data, extension)?;
    Ok(extract_chart(&score, config)?)
}

/// Run the whole pipeline: parse, extract, lay out, render.
pub fn generate_chart(
    data: &[u8],
    extension: Option<&str>,
    config: &ChartConfig,
) -> Result<RenderedChart, ChartError> {
    let chart = extract_chart_from_bytes(data, extension, config)?;
    let pdf = render_chart_to_pdf(&chart, config)?;

    Ok(RenderedChart {
        pdf,
        file_name: chart.suggested_file_name(),
        title: chart.title,
    })
}

/// [`generate_chart`] for a file on disk.
pub fn generate_chart_from_file<P: AsRef<Path>>(
    path: P,
    config: &ChartConfig,
) -> Result<RenderedChart, ChartError> {
    let path = path.as_ref();
    let data = read_input(path)?;
    generate_chart(&data, extension_of(path), config)
}

/// Convert extracted chart records to a JSON string.
pub fn chart_to_json(chart: &Chart) -> Result<String, ChartError> {
    Ok(serde_json::to_string_pretty(chart)?)
}

fn read_input(path: &Path) -> Result<Vec<u8>, ChartError> {
    std::fs::read(path).map_err(|source| ChartError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}
