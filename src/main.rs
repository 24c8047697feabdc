//! # linestats CLI
//!
//! Command-line interface for the linestats library.

use std::process;
use std::time::Instant;

use chrono::NaiveDate;
use clap::Parser as ClapParser;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use linestats::cli::Args;
use linestats::core::filter::parse_filter_date;
use linestats::core::stats::{ChatStats, SenderCount};
use linestats::format::{OutputFormat, write_to_format};
use linestats::report::ParseReport;
use linestats::session::ChatSession;
use linestats::{LinestatsError, Message};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const BAR_WIDTH: usize = 30;

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Machine-readable summary printed with `--json`.
#[derive(Serialize)]
struct Summary<'a> {
    input: &'a str,
    report: &'a ParseReport,
    filtered_messages: usize,
    stats: &'a ChatStats,
}

fn run() -> Result<(), LinestatsError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    let format = resolve_format(&args)?;

    let mut session = ChatSession::new();
    let parse_start = Instant::now();
    session.load_file(&args.input)?;
    debug!(elapsed = ?parse_start.elapsed(), "parsed");

    apply_filters(&mut session, &args)?;

    let selected: Vec<Message> = session.filtered_messages().into_iter().cloned().collect();
    let stats = session.stats();

    if args.json {
        let summary = Summary {
            input: &args.input,
            report: session.report(),
            filtered_messages: selected.len(),
            stats: &stats,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_header(&args);
        print_report(session.report());
        print_stats(&stats, selected.len(), args.top);
    }

    if let (Some(output), Some(format)) = (args.output.as_deref(), format) {
        write_to_format(&selected, output, format, &args.output_config())?;
        if !args.json {
            println!();
            println!("✅ Wrote {} messages as {} to {}", selected.len(), format, output);
        }
    }

    debug!(elapsed = ?total_start.elapsed(), "done");
    Ok(())
}

/// Picks the writer format: explicit flag, else the output extension.
fn resolve_format(args: &Args) -> Result<Option<OutputFormat>, LinestatsError> {
    match (&args.output, args.format) {
        (None, _) => Ok(None),
        (Some(_), Some(format)) => Ok(Some(format.into())),
        (Some(path), None) => OutputFormat::from_path(path).map(Some),
    }
}

fn apply_filters(session: &mut ChatSession, args: &Args) -> Result<(), LinestatsError> {
    if args.from.is_some() || args.to.is_some() {
        let (default_first, default_last) = session
            .default_date_range()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        let first = args
            .from
            .as_deref()
            .map(parse_filter_date)
            .transpose()?
            .unwrap_or(default_first);
        let last = args
            .to
            .as_deref()
            .map(parse_filter_date)
            .transpose()?
            .unwrap_or(default_last);
        session.set_days(first, last);
    }

    if let Some(hours) = args.hours {
        session.set_hour_range(hours.start(), hours.end())?;
    }

    if args.sender.is_some() {
        session.set_sender(args.sender.clone());
    }

    Ok(())
}

fn print_header(args: &Args) {
    println!("📊 linestats v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    if let Some(ref from) = args.from {
        println!("📅 From:    {}", from);
    }
    if let Some(ref to) = args.to {
        println!("📅 To:      {}", to);
    }
    if let Some(hours) = args.hours {
        println!("🕒 Hours:   {}", hours);
    }
    if let Some(ref sender) = args.sender {
        println!("👤 Sender:  {}", sender);
    }
    println!();
}

fn print_report(report: &ParseReport) {
    let stats = &report.stats;
    println!("📖 Parse report:");
    println!("   Lines:         {}", stats.total_lines);
    println!("   Date headers:  {}", stats.date_headers);
    println!("   Messages:      {}", stats.parsed_messages);
    println!("   Blank lines:   {}", stats.empty_lines);
    println!("   Skipped lines: {}", stats.skipped_lines);

    if !stats.failed_lines.is_empty() {
        println!();
        println!("   Sample of unparsed lines:");
        for line in &stats.failed_lines {
            println!("     {}", line);
        }
    }

    if report.has_errors() {
        println!();
        for issue in &report.errors {
            println!("⚠️  {}", issue);
        }
    }
    println!();
}

fn print_stats(stats: &ChatStats, filtered: usize, top: usize) {
    if stats.is_empty() {
        println!("ℹ️  No messages to summarize ({} selected)", filtered);
        return;
    }

    println!("📈 Statistics:");
    println!("   Messages:  {}", stats.total_messages);
    println!("   Days:      {}", stats.days_count);
    if let (Some(first), Some(last)) = (stats.first_message, stats.last_message) {
        println!("   Span:      {} → {}", first, last);
    }

    print_ranking("💬 Top senders", &stats.ranking, top);
    print_ranking("🎨 Stickers", &stats.sticker_ranking, top);

    if !stats.media_ranking.is_empty() {
        println!();
        println!("🖼️  Media:");
        for entry in stats.media_ranking.iter().take(top) {
            println!(
                "   {:<20} {:>6} (images {}, videos {}, files {})",
                entry.name, entry.total, entry.images, entry.videos, entry.files
            );
        }
    }

    println!();
    println!("🕒 By hour:");
    let labels: Vec<String> = (0..24).map(|h| format!("{h:02}")).collect();
    print_histogram(&labels, &stats.hourly_activity);

    println!();
    println!("📆 By weekday:");
    let labels: Vec<String> = WEEKDAYS.iter().map(ToString::to_string).collect();
    print_histogram(&labels, &stats.weekday_activity);
}

fn print_ranking(title: &str, ranking: &[SenderCount], top: usize) {
    if ranking.is_empty() {
        return;
    }
    println!();
    println!("{}:", title);
    for (rank, entry) in ranking.iter().take(top).enumerate() {
        println!("   {:>2}. {:<20} {:>6}", rank + 1, entry.name, entry.count);
    }
}

fn print_histogram(labels: &[String], counts: &[usize]) {
    let max = counts.iter().copied().max().unwrap_or(0).max(1);
    for (label, &count) in labels.iter().zip(counts) {
        let width = count * BAR_WIDTH / max;
        println!("   {} {:<BAR_WIDTH$} {}", label, "█".repeat(width), count);
    }
}
