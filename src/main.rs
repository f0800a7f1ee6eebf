//! # chatscope CLI
//!
//! Command-line interface for the chatscope library.

use std::fs;
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatscope::cli::{Args, ReportFormat};
use chatscope::parser::{self, ParseOutcome};
use chatscope::report::{self, AnalysisReport};
use chatscope::scope::{self, Scope};
use chatscope::{ChatscopeError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = <Args as ClapParser>::parse();

    // Keep stdout clean when the JSON report itself goes there.
    let chatty = !(args.format == ReportFormat::Json && args.output.is_none());

    if chatty {
        println!("💬 chatscope v{}", env!("CARGO_PKG_VERSION"));
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("📂 Input:  {}", args.input);
        println!("👤 Scope:  {}", args.user);
        println!();
        println!("⏳ Parsing export...");
    }

    let parse_start = Instant::now();
    let outcome = parser::parse_file(&args.input)?;
    let records = match outcome {
        ParseOutcome::Corrupted(reason) => {
            eprintln!("❌ {}", reason);
            process::exit(1);
        }
        ParseOutcome::Parsed(records) => records,
    };
    if chatty {
        println!(
            "   Found {} messages ({:.2}s)",
            records.len(),
            parse_start.elapsed().as_secs_f64()
        );
    }

    let choices = scope::sender_choices(&records);
    if args.list_users {
        println!();
        println!("👥 Participants:");
        for choice in &choices {
            println!("   {}", choice);
        }
        return Ok(());
    }

    if !choices.iter().any(|c| c == &args.user) {
        return Err(ChatscopeError::unknown_sender(&args.user));
    }
    let selected = Scope::from(args.user.as_str());

    if let Some(ref path) = args.export_records {
        report::write_records_csv(&records, Path::new(path))?;
        println!("💾 Records exported to {}", path);
    }

    let analysis = report::analyze(&selected, &records);

    match args.format {
        ReportFormat::Json => {
            let json = report::to_json(&analysis)?;
            match args.output {
                Some(path) => {
                    fs::write(&path, json)?;
                    println!();
                    println!("✅ Report saved to {}", path);
                }
                None => println!("{}", json),
            }
        }
        ReportFormat::Text => {
            let rendered = render_text(&analysis);
            match args.output {
                Some(path) => {
                    fs::write(&path, rendered)?;
                    println!();
                    println!("✅ Report saved to {}", path);
                }
                None => print!("{}", rendered),
            }
        }
    }

    Ok(())
}

/// Renders the console report.
fn render_text(report: &AnalysisReport) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    // Writing to a String cannot fail; discard the fmt results.
    let _ = writeln!(out);
    let _ = writeln!(out, "📊 Totals for {}", report.scope);
    let _ = writeln!(out, "   Messages: {}", report.totals.messages);
    let _ = writeln!(out, "   Words:    {}", report.totals.words);
    let _ = writeln!(out, "   Media:    {}", report.totals.media);
    let _ = writeln!(out, "   Links:    {}", report.totals.links);

    if let Some(active) = &report.most_active {
        let _ = writeln!(out);
        let _ = writeln!(out, "🏆 Most active:");
        for c in &active.top {
            let _ = writeln!(out, "   {:<24} {}", c.label, c.count);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "   Share of messages:");
        for s in &active.shares {
            let _ = writeln!(out, "   {:<24} {:>6.2}%", s.user, s.percent);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "🗓  Monthly timeline:");
    for b in &report.monthly_timeline {
        let _ = writeln!(out, "   {:<18} {}", b.label, b.messages);
    }
    let _ = writeln!(out, "   Active days: {}", report.daily_timeline.len());

    let _ = writeln!(out);
    let _ = writeln!(out, "📅 Busiest weekdays:");
    for c in &report.weekday_activity {
        let _ = writeln!(out, "   {:<12} {}", c.label, c.count);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "📆 Busiest months:");
    for c in &report.month_activity {
        let _ = writeln!(out, "   {:<12} {}", c.label, c.count);
    }

    let _ = writeln!(out);
    if report.common_words.is_empty() {
        let _ = writeln!(out, "🔤 No words found!");
    } else {
        let _ = writeln!(out, "🔤 Common words:");
        for c in &report.common_words {
            let _ = writeln!(out, "   {:<16} {}", c.label, c.count);
        }
    }

    let _ = writeln!(out);
    if report.common_emojis.is_empty() {
        let _ = writeln!(out, "😶 No emoji found!");
    } else {
        let _ = writeln!(out, "😀 Common emojis:");
        for c in &report.common_emojis {
            let _ = writeln!(out, "   {:<4} {}", c.label, c.count);
        }
    }

    out
}
