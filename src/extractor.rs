//! Score extractor — walks one part's measures and produces chart records.
//!
//! Numbering starts at the first measure that carries a chord: silent
//! lead-in measures before it are dropped without consuming a number.
//! After that, every measure consumes a number whether or not it is kept
//! by the start/end range.

use crate::config::ChartConfig;
use crate::error::ExtractionError;
use crate::model::*;
use crate::normalizer::normalize_harmony;

/// Build the chart for the configured part of `score`.
pub fn extract_chart(score: &Score, config: &ChartConfig) -> Result<Chart, ExtractionError> {
    let part = select_part(score, &config.preferred_part)?;
    let chart = Chart {
        title: score.resolved_title(),
        time_signature: score.resolved_time_signature(),
        part_id: part.id.clone(),
        measures: extract_measures(&part.measures, config),
    };

    tracing::info!(
        part = %part.id,
        name = ?part.name,
        source_measures = part.measures.len(),
        kept = chart.measures.len(),
        chorded = chart.chorded_measure_count(),
        "extracted chord chart"
    );

    Ok(chart)
}

/// The part with `preferred_id`, else the first part, else `NoPartFound`.
pub fn select_part<'a>(score: &'a Score, preferred_id: &str) -> Result<&'a Part, ExtractionError> {
    if let Some(part) = score.parts.iter().find(|p| p.id == preferred_id) {
        return Ok(part);
    }

    match score.parts.first() {
        Some(part) => {
            tracing::warn!(
                preferred = preferred_id,
                using = %part.id,
                "preferred part not found, using the first part"
            );
            Ok(part)
        }
        None => Err(ExtractionError::NoPartFound),
    }
}

/// Apply the lead-in latch, the running counter and the range filter.
pub fn extract_measures(measures: &[Measure], config: &ChartConfig) -> Vec<MeasureRecord> {
    let mut records = Vec::new();
    let mut first_chord_seen = false;
    let mut counter: u32 = 1;

    for measure in measures {
        if !first_chord_seen && measure.harmonies.is_empty() {
            tracing::debug!(number = ?measure.number, "skipping lead-in measure");
            continue;
        }
        first_chord_seen = true;

        if config.keeps_measure(counter) {
            records.push(MeasureRecord {
                display_number: counter.to_string(),
                chords: measure
                    .harmonies
                    .iter()
                    .map(|h| normalize_harmony(h, config))
                    .collect(),
                rehearsal_mark: measure.rehearsal.clone(),
            });
        } else {
            tracing::debug!(counter, "measure outside range");
        }
        counter += 1;
    }

    records
}
