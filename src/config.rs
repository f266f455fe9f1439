//! Chart settings, resolved once per run and passed explicitly into the
//! extractor and the layout engine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const MIN_COLUMNS: u32 = 4;
pub const MAX_COLUMNS: u32 = 8;

/// Part id tried before falling back to the first part.
pub const DEFAULT_PART_ID: &str = "P1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Measures per row (4..=8)
    pub columns_per_row: u32,
    /// First kept measure, counted from the first chorded measure (1-based)
    pub start_measure: u32,
    /// Last kept measure; 0 keeps everything to the end
    pub end_measure: u32,
    /// Draw rhythmic slashes in measures without chords
    pub include_slashes: bool,
    /// Append "/bass" to slash chords
    pub include_bass_notes: bool,
    /// Literal text replaced in every root+quality string (empty disables)
    pub find_text: String,
    pub replace_text: String,
    /// Part id to read chords from
    pub preferred_part: String,
    /// Derive a quality label from the `<kind>` value when no `text` attribute exists
    pub kind_fallback: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            columns_per_row: 4,
            start_measure: 1,
            end_measure: 0,
            include_slashes: true,
            include_bass_notes: true,
            find_text: "-".to_string(),
            replace_text: "m".to_string(),
            preferred_part: DEFAULT_PART_ID.to_string(),
            kind_fallback: false,
        }
    }
}

impl ChartConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ChartConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&self.columns_per_row) {
            return Err(ConfigError::ColumnsOutOfRange(self.columns_per_row));
        }
        if self.start_measure == 0 {
            return Err(ConfigError::StartMeasureZero);
        }
        if self.end_measure > 0 && self.end_measure < self.start_measure {
            tracing::warn!(
                start = self.start_measure,
                end = self.end_measure,
                "end measure precedes start measure; the chart will be empty"
            );
        }
        Ok(())
    }

    /// Whether the post-lead-in measure `counter` falls in the kept range.
    pub fn keeps_measure(&self, counter: u32) -> bool {
        let upper = if self.end_measure > 0 {
            self.end_measure
        } else {
            u32::MAX
        };
        (self.start_measure..=upper).contains(&counter)
    }
}
