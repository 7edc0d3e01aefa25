//! # chatlens CLI
//!
//! Command-line driver for the chatlens library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::info;

use chatlens::analysis::Analyzer;
use chatlens::cli::Args;
use chatlens::config::{AnalysisConfig, ParserConfig};
use chatlens::format::write_table;
use chatlens::parser::ChatParser;
use chatlens::{ChatSummary, ChatlensError};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(&args);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {e}");
        process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `--log-level`, falling back to `info` when the
/// expression does not parse. Logs go to stderr so stdout stays clean.
fn init_tracing(args: &Args) {
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => match args.log_level.parse::<tracing_subscriber::EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: --log-level '{}' is not a valid tracing filter ({e}); \
                     falling back to 'info'",
                    args.log_level
                );
                tracing_subscriber::EnvFilter::new("info")
            }
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if args.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn run(args: &Args) -> Result<(), ChatlensError> {
    let total_start = Instant::now();
    let filter = args.filter_config()?;

    println!("🔎 chatlens v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    if let Some(ref output) = args.output {
        println!("💾 Output:  {} ({})", output.display(), args.output_format());
    }
    if let Some(ref report) = args.report {
        println!("📊 Report:  {}", report.display());
    }
    if let Some(ref after) = args.after {
        println!("📅 After:   {after}");
    }
    if let Some(ref before) = args.before {
        println!("📅 Before:  {before}");
    }
    if let Some(ref from) = args.from {
        println!("👤 From:    {from}");
    }
    println!();

    let parser = match args.parser_config {
        Some(ref path) => ChatParser::with_config(ParserConfig::from_json_file(path)?)?,
        None => ChatParser::new(),
    };

    println!("⏳ Parsing...");
    let parse_start = Instant::now();
    let (table, stats) = parser.load_with_stats(&args.input)?;
    println!(
        "   Found {} messages in {} lines ({:.2}s)",
        stats.messages,
        stats.lines_total,
        parse_start.elapsed().as_secs_f64()
    );
    if stats.orphan_lines > 0 {
        println!("   Skipped {} lines before the first message", stats.orphan_lines);
    }

    let table = if filter.is_active() {
        println!("🔍 Filtering messages...");
        let filtered = table.filter(&filter);
        println!("   {} messages after filtering", filtered.len());
        filtered
    } else {
        table
    };

    println!();
    print_summary(&table.summary());

    if let Some(ref output) = args.output {
        let format = args.output_format();
        println!();
        println!("💾 Writing {format}...");
        write_table(&table, output, format, &args.output_config())?;
        info!(path = %output.display(), %format, "messages written");
    }

    if let Some(ref report_path) = args.report {
        let config = match args.analysis_config {
            Some(ref path) => AnalysisConfig::from_json_file(path)?,
            None => AnalysisConfig::default(),
        };
        println!("📊 Analyzing...");
        let report = Analyzer::new(&table).with_config(config).report();
        report.write_json(report_path)?;
        info!(path = %report_path.display(), "report written");
    }

    println!();
    println!(
        "✅ Done in {:.2}s",
        total_start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn print_summary(summary: &ChatSummary) {
    println!("📋 Summary:");
    println!("   Messages:      {}", summary.total_messages);
    println!(
        "   Participants:  {} ({})",
        summary.participant_count,
        summary.participant_names.join(", ")
    );
    match summary.date_range {
        Some(range) => println!("   Date range:    {} → {}", range.start, range.end),
        None => println!("   Date range:    -"),
    }
    println!("   Text:          {}", summary.text_count);
    println!("   Media:         {}", summary.media_count);
    println!("   System:        {}", summary.system_count);
}
