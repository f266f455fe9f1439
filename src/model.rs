//! Data model for chord chart generation.
//!
//! Two layers live here: a raw view of the MusicXML score (only the parts a
//! chord chart needs) and the normalized chart records that the layout
//! engine consumes.

use serde::{Deserialize, Serialize};

/// Placeholder used when the score carries no title.
pub const DEFAULT_TITLE: &str = "CHORD CHART";

/// Time signature shown when the score has none.
pub const DEFAULT_TIME_SIGNATURE: &str = "4/4";

// ─── Raw score view ─────────────────────────────────────────────────

/// A MusicXML score reduced to what the chord chart reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Score {
    /// `<work-title>` text, if any
    pub work_title: Option<String>,
    /// `<movement-title>` text, if any
    pub movement_title: Option<String>,
    /// First time signature found inside an `<attributes>` block
    pub time: Option<TimeSignature>,
    /// Parts in document order
    pub parts: Vec<Part>,
}

/// Time signature, kept as the raw texts so composite meters survive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    /// Numerator text (e.g. "3" or "3+2")
    pub beats: String,
    /// Denominator text (e.g. "4")
    pub beat_type: String,
}

/// One `<part>` element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    /// Part identifier (e.g. "P1")
    pub id: String,
    /// Name from the part list, when declared
    pub name: Option<String>,
    /// Measures in document order
    pub measures: Vec<Measure>,
}

/// One `<measure>` element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Measure {
    /// The `number` attribute as written (may be "0", "X1", or absent)
    pub number: Option<String>,
    /// Harmony markings in document order
    pub harmonies: Vec<Harmony>,
    /// First rehearsal mark found anywhere in the measure
    pub rehearsal: Option<String>,
}

/// A `<harmony>` marking. Every sub-field is optional in real files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Harmony {
    /// Root note
    pub root: HarmonyRoot,
    /// `text` attribute of `<kind>`, the display quality
    pub kind_text: Option<String>,
    /// Element value of `<kind>` (e.g. "minor-seventh")
    pub kind: Option<String>,
    /// Bass note (for slash chords)
    pub bass: Option<HarmonyRoot>,
    /// `<offset>` in divisions
    pub offset: Option<i32>,
}

/// Root or bass note of a harmony.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HarmonyRoot {
    /// Note name: A–G
    pub step: Option<String>,
    /// Alteration: -1 = flat, 1 = sharp
    pub alter: Option<f64>,
}

impl Score {
    /// Resolved chart title: work title, then movement title, then the placeholder.
    pub fn resolved_title(&self) -> String {
        self.work_title
            .as_deref()
            .or(self.movement_title.as_deref())
            .unwrap_or(DEFAULT_TITLE)
            .to_string()
    }

    /// Time signature as "beats/beat-type", defaulting to 4/4.
    pub fn resolved_time_signature(&self) -> String {
        match self.time {
            Some(ref ts) => format!("{}/{}", ts.beats, ts.beat_type),
            None => DEFAULT_TIME_SIGNATURE.to_string(),
        }
    }
}

// ─── Chart records ──────────────────────────────────────────────────

/// A normalized chord symbol ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordSymbol {
    /// Display text, e.g. "Bbm7/F"
    pub text: String,
    /// Position within the measure in divisions (0 when unspecified)
    pub beat_offset: i32,
}

/// One measure as it appears in the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureRecord {
    /// Running 1-based number counted from the first chorded measure
    pub display_number: String,
    /// Chords in document order (only the first four are drawn)
    pub chords: Vec<ChordSymbol>,
    /// Rehearsal mark label, if any
    pub rehearsal_mark: Option<String>,
}

/// Everything the layout engine needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub time_signature: String,
    /// Id of the part the chords were read from
    pub part_id: String,
    pub measures: Vec<MeasureRecord>,
}

/// Output of the full pipeline.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    /// Finished PDF document
    pub pdf: Vec<u8>,
    /// Resolved song title
    pub title: String,
    /// Suggested output file name ("<title>.pdf")
    pub file_name: String,
}

impl Chart {
    /// Suggested file name for the rendered PDF.
    ///
    /// Path separators in the title are replaced so the name stays a single
    /// path component.
    pub fn suggested_file_name(&self) -> String {
        let stem: String = self
            .title
            .chars()
            .map(|c| if c == '/' || c == '\\' { '-' } else { c })
            .collect();
        format!("{stem}.pdf")
    }

    /// Number of measures that carry at least one chord.
    pub fn chorded_measure_count(&self) -> usize {
        self.measures.iter().filter(|m| !m.chords.is_empty()).count()
    }
}
