//! MusicXML parser — reads the chord-chart view of a score-partwise document.

use roxmltree::{Document, Node};

use crate::error::ExtractionError;
use crate::model::*;

/// Parse a MusicXML XML string into a Score.
pub fn parse_musicxml(xml: &str) -> Result<Score, ExtractionError> {
    // MusicXML files include a DOCTYPE declaration, so we must allow DTDs
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let doc = Document::parse_with_options(xml, options)
        .map_err(|e| ExtractionError::MalformedInput(format!("XML parse error: {e}")))?;
    let root = doc.root_element();

    if root.tag_name().name() != "score-partwise" {
        return Err(ExtractionError::MalformedInput(format!(
            "Unsupported root element: '{}'. Only 'score-partwise' is supported.",
            root.tag_name().name()
        )));
    }

    let mut score = Score {
        work_title: first_text(&root, "work-title"),
        movement_title: first_text(&root, "movement-title"),
        time: parse_first_time(&root),
        parts: Vec::new(),
    };

    let mut part_names: Vec<(String, Option<String>)> = Vec::new();
    for child in root.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "part-list" => part_names = parse_part_list(&child),
            "part" => score.parts.push(parse_part(&child)),
            _ => {}
        }
    }

    for part in &mut score.parts {
        part.name = part_names
            .iter()
            .find(|(id, _)| *id == part.id)
            .and_then(|(_, name)| name.clone());
    }

    tracing::debug!(
        parts = score.parts.len(),
        title = ?score.work_title,
        "parsed score"
    );
    Ok(score)
}

// ─── Header ──────────────────────────────────────────────────────────

/// Trimmed text of the first descendant named `tag`; empty counts as absent.
fn first_text(node: &Node, tag: &str) -> Option<String> {
    node.descendants()
        .find(|n| n.is_element() && n.tag_name().name() == tag)
        .and_then(|n| element_text(&n))
}

fn parse_first_time(root: &Node) -> Option<TimeSignature> {
    let time = root.descendants().find(|n| {
        n.is_element()
            && n.tag_name().name() == "time"
            && n.parent_element()
                .is_some_and(|p| p.tag_name().name() == "attributes")
    })?;

    let mut beats = None;
    let mut beat_type = None;
    for child in time.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "beats" => beats = element_text(&child),
            "beat-type" => beat_type = element_text(&child),
            _ => {}
        }
    }

    Some(TimeSignature {
        beats: beats?,
        beat_type: beat_type?,
    })
}

// ─── Part List ───────────────────────────────────────────────────────

fn parse_part_list(node: &Node) -> Vec<(String, Option<String>)> {
    node.children()
        .filter(|n| n.is_element() && n.tag_name().name() == "score-part")
        .map(|sp| {
            let id = sp.attribute("id").unwrap_or("").to_string();
            let name = sp
                .children()
                .find(|n| n.is_element() && n.tag_name().name() == "part-name")
                .and_then(|n| element_text(&n));
            (id, name)
        })
        .collect()
}

// ─── Part (measures) ─────────────────────────────────────────────────

fn parse_part(node: &Node) -> Part {
    let measures = node
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "measure")
        .map(|m| parse_measure(&m))
        .collect();

    Part {
        id: node.attribute("id").unwrap_or("").to_string(),
        name: None,
        measures,
    }
}

// ─── Measure ─────────────────────────────────────────────────────────

fn parse_measure(node: &Node) -> Measure {
    let harmonies = node
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "harmony")
        .map(|h| parse_harmony(&h))
        .collect();

    // Rehearsal marks usually sit in <direction><direction-type>, so search deep.
    let rehearsal = node
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "rehearsal")
        .and_then(|n| element_text(&n));

    Measure {
        number: node.attribute("number").map(String::from),
        harmonies,
        rehearsal,
    }
}

// ─── Harmony ─────────────────────────────────────────────────────────

fn parse_harmony(node: &Node) -> Harmony {
    let mut harmony = Harmony::default();

    for n in node.descendants().filter(|n| n.is_element()) {
        match n.tag_name().name() {
            "root-step" if harmony.root.step.is_none() => {
                harmony.root.step = element_text(&n);
            }
            "root-alter" if harmony.root.alter.is_none() => {
                harmony.root.alter = parse_f64(&n);
            }
            _ => {}
        }
    }

    for child in node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "kind" if harmony.kind.is_none() => {
                harmony.kind_text = child.attribute("text").map(String::from);
                harmony.kind = Some(element_text(&child).unwrap_or_default());
            }
            "bass" if harmony.bass.is_none() => {
                harmony.bass = parse_bass(&child);
            }
            "offset" if harmony.offset.is_none() => {
                harmony.offset = parse_offset(&child);
            }
            _ => {}
        }
    }

    harmony
}

/// A `<bass>` only counts when it names a step.
fn parse_bass(node: &Node) -> Option<HarmonyRoot> {
    let mut bass = HarmonyRoot::default();
    for bc in node.children().filter(|n| n.is_element()) {
        match bc.tag_name().name() {
            "bass-step" => bass.step = element_text(&bc),
            "bass-alter" => bass.alter = parse_f64(&bc),
            _ => {}
        }
    }
    bass.step.is_some().then_some(bass)
}

fn parse_offset(node: &Node) -> Option<i32> {
    let text = node.text()?.trim();
    match text.parse::<i32>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(offset = text, "unparseable harmony offset, using 0");
            None
        }
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────

fn element_text(node: &Node) -> Option<String> {
    node.text()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(String::from)
}

fn parse_f64(node: &Node) -> Option<f64> {
    node.text()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE score-partwise PUBLIC "-//Recordare//DTD MusicXML 3.1 Partwise//EN" "http://www.musicxml.org/dtds/partwise.dtd">"#;

    #[test]
    fn reads_header_fields() {
        let xml = format!(
            r#"{HEADER}
<score-partwise version="3.1">
  <work><work-title> Autumn Leaves </work-title></work>
  <movement-title>Ignored</movement-title>
  <part-list><score-part id="P1"><part-name>Lead</part-name></score-part></part-list>
  <part id="P1">
    <measure number="1">
      <attributes><divisions>1</divisions><time><beats>3</beats><beat-type>4</beat-type></time></attributes>
    </measure>
  </part>
</score-partwise>"#
        );
        let score = parse_musicxml(&xml).unwrap();
        assert_eq!(score.work_title.as_deref(), Some("Autumn Leaves"));
        assert_eq!(score.resolved_title(), "Autumn Leaves");
        assert_eq!(score.resolved_time_signature(), "3/4");
        assert_eq!(score.parts.len(), 1);
        assert_eq!(score.parts[0].name.as_deref(), Some("Lead"));
    }

    #[test]
    fn header_defaults_when_absent() {
        let xml = r#"<score-partwise><part id="P1"><measure number="1"/></part></score-partwise>"#;
        let score = parse_musicxml(xml).unwrap();
        assert_eq!(score.resolved_title(), DEFAULT_TITLE);
        assert_eq!(score.resolved_time_signature(), "4/4");
    }

    #[test]
    fn movement_title_backs_up_work_title() {
        let xml = r#"<score-partwise><movement-title>Blue Bossa</movement-title><part id="P1"/></score-partwise>"#;
        let score = parse_musicxml(xml).unwrap();
        assert_eq!(score.resolved_title(), "Blue Bossa");
    }

    #[test]
    fn composite_meter_kept_verbatim() {
        let xml = r#"<score-partwise><part id="P1"><measure>
            <attributes><time><beats>3+2</beats><beat-type>8</beat-type></time></attributes>
        </measure></part></score-partwise>"#;
        let score = parse_musicxml(xml).unwrap();
        assert_eq!(score.resolved_time_signature(), "3+2/8");
    }

    #[test]
    fn reads_full_harmony() {
        let xml = r#"<score-partwise><part id="P1"><measure number="1">
            <harmony>
              <root><root-step>B</root-step><root-alter>-1</root-alter></root>
              <kind text="m7">minor-seventh</kind>
              <bass><bass-step>F</bass-step><bass-alter>1</bass-alter></bass>
              <offset>2</offset>
            </harmony>
        </measure></part></score-partwise>"#;
        let score = parse_musicxml(xml).unwrap();
        let h = &score.parts[0].measures[0].harmonies[0];
        assert_eq!(
            *h,
            Harmony {
                root: HarmonyRoot {
                    step: Some("B".into()),
                    alter: Some(-1.0)
                },
                kind_text: Some("m7".into()),
                kind: Some("minor-seventh".into()),
                bass: Some(HarmonyRoot {
                    step: Some("F".into()),
                    alter: Some(1.0)
                }),
                offset: Some(2),
            }
        );
    }

    #[test]
    fn sparse_harmony_defaults() {
        let xml = r#"<score-partwise><part id="P1"><measure>
            <harmony><kind>major</kind><bass><bass-alter>1</bass-alter></bass><offset>soon</offset></harmony>
        </measure></part></score-partwise>"#;
        let score = parse_musicxml(xml).unwrap();
        let h = &score.parts[0].measures[0].harmonies[0];
        assert_eq!(h.root, HarmonyRoot::default());
        assert_eq!(h.kind_text, None);
        assert_eq!(h.kind.as_deref(), Some("major"));
        assert_eq!(h.bass, None);
        assert_eq!(h.offset, None);
    }

    #[test]
    fn rehearsal_found_in_nested_direction() {
        let xml = r#"<score-partwise><part id="P1"><measure number="1">
            <direction placement="above"><direction-type><rehearsal>A</rehearsal></direction-type></direction>
            <direction><direction-type><rehearsal>B</rehearsal></direction-type></direction>
        </measure><measure number="2"><direction><direction-type><rehearsal> </rehearsal></direction-type></direction></measure></part></score-partwise>"#;
        let score = parse_musicxml(xml).unwrap();
        assert_eq!(score.parts[0].measures[0].rehearsal.as_deref(), Some("A"));
        assert_eq!(score.parts[0].measures[1].rehearsal, None);
    }

    #[test]
    fn only_direct_harmony_children_count() {
        let xml = r#"<score-partwise><part id="P1"><measure>
            <harmony><root><root-step>C</root-step></root></harmony>
            <note><harmony><root><root-step>D</root-step></root></harmony></note>
        </measure></part></score-partwise>"#;
        let score = parse_musicxml(xml).unwrap();
        assert_eq!(score.parts[0].measures[0].harmonies.len(), 1);
    }

    #[test]
    fn rejects_timewise_and_garbage() {
        let err = parse_musicxml("<score-timewise/>").unwrap_err();
        assert!(matches!(err, ExtractionError::MalformedInput(_)));

        let err = parse_musicxml("<score-partwise><part></score-partwise>").unwrap_err();
        assert!(matches!(err, ExtractionError::MalformedInput(_)));
    }
}
