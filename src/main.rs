//! chordgrid CLI - render a MusicXML lead sheet as a one-page chord chart.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chordgrid::{chart_to_json, extract_chart_from_bytes, generate_chart, ChartConfig};

/// Convert MusicXML to a rhythmic chord chart PDF
#[derive(Parser)]
#[command(name = "chordgrid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// MusicXML (.musicxml, .xml) or compressed MXL (.mxl) file
    input: PathBuf,

    /// Output PDF path (default: "<title>.pdf" in the current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with chart settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Measures per row (4-8)
    #[arg(long)]
    columns: Option<u32>,

    /// First measure to include, counted from the first chord
    #[arg(long)]
    start: Option<u32>,

    /// Last measure to include (0 for all)
    #[arg(long)]
    end: Option<u32>,

    /// Leave measures without chords empty instead of drawing slashes
    #[arg(long)]
    no_slashes: bool,

    /// Drop bass notes from slash chords
    #[arg(long)]
    no_bass: bool,

    /// Text to find in chord symbols (empty disables the swap)
    #[arg(long)]
    find: Option<String>,

    /// Replacement for --find
    #[arg(long)]
    replace: Option<String>,

    /// Part id to read chords from
    #[arg(long)]
    part: Option<String>,

    /// Spell the chord quality from <kind> when it has no text attribute
    #[arg(long)]
    kind_fallback: bool,

    /// Print the extracted measures as JSON instead of writing a PDF
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<ChartConfig> {
        let mut config = match self.config {
            Some(ref path) => ChartConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ChartConfig::default(),
        };

        if let Some(columns) = self.columns {
            config.columns_per_row = columns;
        }
        if let Some(start) = self.start {
            config.start_measure = start;
        }
        if let Some(end) = self.end {
            config.end_measure = end;
        }
        if self.no_slashes {
            config.include_slashes = false;
        }
        if self.no_bass {
            config.include_bass_notes = false;
        }
        if let Some(ref find) = self.find {
            config.find_text = find.clone();
        }
        if let Some(ref replace) = self.replace {
            config.replace_text = replace.clone();
        }
        if let Some(ref part) = self.part {
            config.preferred_part = part.clone();
        }
        if self.kind_fallback {
            config.kind_fallback = true;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chordgrid=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    let data = std::fs::read(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let extension = cli.input.extension().and_then(|e| e.to_str());

    if cli.json {
        let chart = extract_chart_from_bytes(&data, extension, &config)?;
        println!("{}", chart_to_json(&chart)?);
        return Ok(());
    }

    let rendered = generate_chart(&data, extension, &config)
        .with_context(|| format!("generating chart from {}", cli.input.display()))?;
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&rendered.file_name));
    std::fs::write(&output, &rendered.pdf)
        .with_context(|| format!("writing {}", output.display()))?;

    println!("Generated {} -> {}", rendered.title, output.display());
    Ok(())
}
