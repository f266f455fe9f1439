//! MXL file handler — reads compressed MusicXML (.mxl) archives.
//!
//! An .mxl file is a ZIP archive containing:
//!   - META-INF/container.xml  — declares the root MusicXML file path
//!   - <rootfile>.xml          — the actual MusicXML content (e.g., score.xml)
//!   - (optional) other files  — images, sounds, etc.

use std::io::{Cursor, Read};
use zip::ZipArchive;

use crate::error::ExtractionError;
use crate::model::Score;
use crate::parser;

type Archive<'a> = ZipArchive<Cursor<&'a [u8]>>;

/// Read and parse a .mxl file from raw bytes.
pub fn parse_mxl(data: &[u8]) -> Result<Score, ExtractionError> {
    let xml = extract_musicxml_from_mxl(data)?;
    parser::parse_musicxml(&xml)
}

/// Extract the MusicXML content string from .mxl bytes.
pub fn extract_musicxml_from_mxl(data: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(data))
        .map_err(|e| malformed(format!("Failed to open MXL archive: {e}")))?;

    let root_file_path = match read_container_rootfile(&mut archive)? {
        Some(path) => path,
        None => guess_rootfile(&mut archive)?,
    };
    tracing::debug!(rootfile = %root_file_path, "reading MusicXML from archive");

    let mut root_file = archive
        .by_name(&root_file_path)
        .map_err(|e| malformed(format!("Root file '{root_file_path}' not found in archive: {e}")))?;

    let mut xml = String::new();
    root_file
        .read_to_string(&mut xml)
        .map_err(|e| malformed(format!("Failed to read '{root_file_path}': {e}")))?;

    Ok(xml)
}

/// Rootfile path declared by META-INF/container.xml, or `None` when the
/// archive has no container.
fn read_container_rootfile(archive: &mut Archive) -> Result<Option<String>, ExtractionError> {
    let container_xml = match archive.by_name("META-INF/container.xml") {
        Ok(mut file) => {
            let mut xml = String::new();
            file.read_to_string(&mut xml)
                .map_err(|e| malformed(format!("Failed to read container.xml: {e}")))?;
            xml
        }
        Err(_) => return Ok(None),
    };

    let doc = roxmltree::Document::parse(&container_xml)
        .map_err(|e| malformed(format!("Failed to parse container.xml: {e}")))?;

    doc.descendants()
        .filter(|n| n.tag_name().name() == "rootfile")
        .find_map(|n| n.attribute("full-path"))
        .map(|path| Some(path.to_string()))
        .ok_or_else(|| malformed("No rootfile found in container.xml".to_string()))
}

/// Fallback: first .xml/.musicxml entry outside META-INF.
fn guess_rootfile(archive: &mut Archive) -> Result<String, ExtractionError> {
    let names: Vec<String> = archive.file_names().map(String::from).collect();

    names
        .iter()
        .find(|name| {
            !name.starts_with("META-INF/")
                && (name.ends_with(".xml") || name.ends_with(".musicxml"))
        })
        .cloned()
        .ok_or_else(|| malformed(format!("No MusicXML file found in archive. Files: {names:?}")))
}

fn malformed(message: String) -> ExtractionError {
    ExtractionError::MalformedInput(message)
}
