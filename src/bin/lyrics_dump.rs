//! Debug tool to inspect how a lyrics file is parsed and synchronized.
//!
//! Usage:
//!   `cargo run --bin lyrics_dump -- <file>`            parsed document as JSON
//!   `cargo run --bin lyrics_dump -- <file> --table`    one row per line
//!   `cargo run --bin lyrics_dump -- <file> --at 12.5`  engine output at 12.5s
//!
//! Pass `-` as the file to read from stdin. `--verbose` enables debug logs
//! on stderr.

use std::env;
use std::io::Read;

use anyhow::{bail, Context};
use lyricsync::lyrics::{load_file_with_format, LyricsFormat, LyricsParserService};
use lyricsync::sync::{ManualAccentScheduler, SyncEngine, SyncEvent};
use lyricsync::types::LyricsDocument;
use lyricsync::ui::format_time;
use lyricsync::{library, logging};

struct Args {
    input: String,
    table: bool,
    at: Option<f64>,
    verbose: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = env::args().skip(1);
    let mut input = None;
    let mut table = false;
    let mut at = None;
    let mut verbose = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--table" => table = true,
            "--verbose" | "-v" => verbose = true,
            "--at" => {
                let value = args.next().context("--at needs a time in seconds")?;
                at = Some(value.parse::<f64>().with_context(|| format!("Invalid time: {value}"))?);
            }
            _ if input.is_none() => input = Some(arg),
            _ => bail!("Unexpected argument: {arg}"),
        }
    }

    let Some(input) = input else {
        bail!("Usage: lyrics_dump <file|query|-> [--table] [--at <secs>] [--verbose]");
    };
    Ok(Args { input, table, at, verbose })
}

fn main() -> anyhow::Result<()> {
    let args = parse_args()?;
    logging::init_stderr_logging(args.verbose)?;

    let service = LyricsParserService::new();
    let (format, document) = if args.input == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content).context("Failed to read stdin")?;
        service.parse_with_format(&content)
    } else {
        let config = lyricsync::config::Config::load()?;
        let path = library::resolve_lyrics_path(&args.input, &config)?;
        eprintln!("Source: {}", path.display());
        load_file_with_format(&service, &path)?
    };

    match args.at {
        Some(time) => dump_sync(&document, time),
        None if args.table => dump_document(format, &document),
        None => println!("{}", serde_json::to_string_pretty(&document)?),
    }
    Ok(())
}

fn dump_document(format: LyricsFormat, document: &LyricsDocument) {
    println!("Format:   {}", format.name());
    println!("Title:    {}", document.title.as_deref().unwrap_or("-"));
    println!("Artist:   {}", document.artist.as_deref().unwrap_or("-"));
    println!("Length:   {}", format_time(document.end_time()));
    println!("Lines:    {}", document.len());
    println!();

    for (i, line) in document.lines.iter().enumerate() {
        println!(
            "{i:>4}  {:>6.2} -> {:>6.2}  {}",
            line.start_time, line.end_time, line.text
        );
    }
}

fn dump_sync(document: &LyricsDocument, time: f64) {
    let mut engine = SyncEngine::new(ManualAccentScheduler::new());
    let events = engine.update(Some(document), time, true);

    println!("At {time:.2}s ({})", format_time(time));
    match document.active_index(time).and_then(|i| document.caption(i)) {
        Some(caption) => {
            println!("  Caption: {}", caption.current);
            if let Some(next) = caption.next {
                println!("  Next:    {next}");
            }
        }
        None => println!("  No active line"),
    }
    println!("  Progress: {:.0}%", document.progress(engine.active_index()) * 100.0);
    println!();

    for event in &events {
        match event {
            SyncEvent::ActiveLineChanged { index, previous } => {
                println!("  line changed   -> {index} (from {previous:?})");
            }
            SyncEvent::Animation(intent) => {
                println!(
                    "  animation      {:<12} {:.2}  {}",
                    intent.mood.name(),
                    intent.intensity,
                    intent.color
                );
            }
        }
    }

    for pending in engine.scheduler().pending() {
        println!(
            "  after {:>4}ms  {:<12} {:.2}  {}",
            pending.delay.as_millis(),
            pending.intent.mood.name(),
            pending.intent.intensity,
            pending.intent.color
        );
    }
}
