//! Chord normalizer — turns one harmony marking into display text.

use crate::config::ChartConfig;
use crate::model::{ChordSymbol, Harmony, HarmonyRoot};

/// Literal quality rewrites, longest pattern first. Each runs exactly once
/// over the root+quality text; no replacement produces another pattern.
pub const QUALITY_SUBSTITUTIONS: [(&str, &str); 3] = [
    ("major-seventh", "Maj7"),
    ("minor-seventh", "m7"),
    ("major-sixth", "6"),
];

/// Build the display symbol for one harmony.
///
/// Steps, in order: root + accidental, quality label, quality table,
/// user find/replace on that root+quality text, then the optional
/// "/bass" suffix (which find/replace never touches).
pub fn normalize_harmony(harmony: &Harmony, config: &ChartConfig) -> ChordSymbol {
    let mut text = spell_note(&harmony.root);
    text.push_str(&quality_label(harmony, config.kind_fallback));

    for (pattern, replacement) in QUALITY_SUBSTITUTIONS {
        text = text.replace(pattern, replacement);
    }

    if !config.find_text.is_empty() {
        text = text.replace(&config.find_text, &config.replace_text);
    }

    if config.include_bass_notes {
        if let Some(ref bass) = harmony.bass {
            text.push('/');
            text.push_str(&spell_note(bass));
        }
    }

    ChordSymbol {
        text,
        beat_offset: harmony.offset.unwrap_or(0),
    }
}

/// "#" for +1, "b" for -1, nothing otherwise.
pub fn accidental_suffix(alter: Option<f64>) -> &'static str {
    match alter {
        Some(a) if a == 1.0 => "#",
        Some(a) if a == -1.0 => "b",
        _ => "",
    }
}

/// Step letter plus accidental. A missing step spells as empty.
pub fn spell_note(note: &HarmonyRoot) -> String {
    format!(
        "{}{}",
        note.step.as_deref().unwrap_or(""),
        accidental_suffix(note.alter)
    )
}

fn quality_label(harmony: &Harmony, kind_fallback: bool) -> String {
    match (&harmony.kind_text, &harmony.kind) {
        (Some(text), _) => text.clone(),
        (None, Some(kind)) if kind_fallback => kind_suffix(kind).to_string(),
        _ => String::new(),
    }
}

/// Conventional suffix for a MusicXML `<kind>` value.
pub fn kind_suffix(kind: &str) -> &str {
    match kind {
        "major" | "none" => "",
        "minor" => "m",
        "dominant" | "dominant-seventh" => "7",
        "major-seventh" => "Maj7",
        "minor-seventh" => "m7",
        "major-sixth" => "6",
        "minor-sixth" => "m6",
        "dominant-ninth" => "9",
        "diminished" => "dim",
        "diminished-seventh" => "dim7",
        "augmented" => "aug",
        "half-diminished" => "m7b5",
        "suspended-fourth" => "sus4",
        "suspended-second" => "sus2",
        "power" => "5",
        other => other,
    }
}
