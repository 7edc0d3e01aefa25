//! Synthetic chat export generator for stress testing chatlens.
//!
//! Usage: cargo run --features gen-test --bin gen_test -- [messages] [output] [style]
//! Example: cargo run --features gen-test --bin gen_test -- 100000 heavy_chat.txt bracketed
//!
//! Styles: `bracketed` (`[15/01/2024, 09:15:02] Alice: hi`) and
//! `dash` (`15/01/24, 09:15 - Alice: hi`). Dates are always day-first.

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;
use rand::seq::SliceRandom;

const AUTHORS: &[&str] = &[
    "Alice",
    "Bob",
    "Carol",
    "Dave",
    "Иван",
    "Мария",
    "村上",
    "محمد",
    "🔥FireUser🔥",
];

const PHRASES: &[&str] = &[
    "good morning",
    "are we still on for tonight?",
    "I love this, thanks so much",
    "this is terrible news",
    "not bad at all",
    "lol",
    "check this out https://example.com/article?id=42",
    "running late, sorry",
    "pizza or sushi?",
    "see you at the station",
    "Great job everyone!!!",
    "I can't believe it",
    "ok",
    "wait: what time again?",
    "- list item that looks like a header",
];

const EMOJIS: &[&str] = &["😀", "😂", "😍", "🤔", "🔥", "👍", "❤", "🎉", "🍕", "🇰🇿"];

const MEDIA: &[&str] = &[
    "<Media omitted>",
    "image omitted",
    "video omitted",
    "IMG-20240115-WA0001.jpg (file attached)",
];

const SYSTEM: &[&str] = &[
    "Alice added Dave",
    "Bob changed the subject to \"Weekend\"",
    "Carol left",
    "Messages and calls are end-to-end encrypted.",
];

#[derive(Clone, Copy)]
enum Style {
    Bracketed,
    Dash,
}

impl Style {
    fn header(self, ts: NaiveDateTime, author: &str) -> String {
        match self {
            Style::Bracketed => format!("[{}] {author}: ", ts.format("%d/%m/%Y, %H:%M:%S")),
            Style::Dash => format!("{} - {author}: ", ts.format("%d/%m/%y, %H:%M")),
        }
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map_or("heavy_chat.txt", String::as_str);
    let style = match args.get(3).map_or("bracketed", String::as_str) {
        "bracketed" | "ios" => Style::Bracketed,
        "dash" | "android" => Style::Dash,
        other => {
            eprintln!("Unknown style: {other}. Use 'bracketed' or 'dash'");
            std::process::exit(1);
        }
    };

    println!("🧪 Chat Export Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {count}");
    println!("   Output:   {output}");
    println!();

    let file = File::create(output)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file);
    let mut rng = rand::thread_rng();

    let start = Instant::now();
    let mut bytes_written: usize = 0;
    let mut ts = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap_or_default();

    // Preamble lines before the first header are skipped by the parser.
    let preamble = "Chat export generated for testing\n\n";
    writer.write_all(preamble.as_bytes())?;
    bytes_written += preamble.len();

    for i in 0..count {
        ts += next_gap(&mut rng);
        let entry = generate_entry(&mut rng, style, ts);
        bytes_written += entry.len();
        writer.write_all(entry.as_bytes())?;

        if (i + 1) % 10_000 == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            eprint!(
                "\r   Generated {}/{} ({:.1} MB, {:.0} msg/s)",
                i + 1,
                count,
                bytes_written as f64 / 1_000_000.0,
                (i + 1) as f64 / elapsed
            );
        }
    }

    writer.flush()?;

    let elapsed = start.elapsed();
    println!("\n\n✅ Done!");
    println!("   Size: {:.2} MB", bytes_written as f64 / 1_000_000.0);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
    Ok(())
}

/// Mostly quick replies, sometimes a pause, occasionally a new day.
fn next_gap(rng: &mut impl Rng) -> Duration {
    match rng.gen_range(0..100) {
        0..=69 => Duration::seconds(rng.gen_range(5..600)),
        70..=94 => Duration::minutes(rng.gen_range(10..240)),
        _ => Duration::hours(rng.gen_range(6..36)),
    }
}

fn generate_entry(rng: &mut impl Rng, style: Style, ts: NaiveDateTime) -> String {
    let roll = rng.gen_range(0..100);

    if roll < 3 {
        let body = SYSTEM.choose(rng).copied().unwrap_or("Carol left");
        return format!("{}{body}\n", style.header(ts, "System"));
    }

    let author = AUTHORS.choose(rng).copied().unwrap_or("Alice");
    let mut entry = style.header(ts, author);

    if roll < 10 {
        entry.push_str(MEDIA.choose(rng).copied().unwrap_or("<Media omitted>"));
        entry.push('\n');
        return entry;
    }

    let words = rng.gen_range(1..=3);
    for w in 0..words {
        if w > 0 {
            entry.push(' ');
        }
        entry.push_str(PHRASES.choose(rng).copied().unwrap_or("ok"));
    }
    if rng.gen_bool(0.3) {
        entry.push(' ');
        entry.push_str(EMOJIS.choose(rng).copied().unwrap_or("👍"));
    }
    entry.push('\n');

    // Multi-line bodies: plain continuation lines and blank lines.
    if roll >= 90 {
        for _ in 0..rng.gen_range(1..4) {
            if rng.gen_bool(0.2) {
                entry.push('\n');
            }
            entry.push_str(PHRASES.choose(rng).copied().unwrap_or("ok"));
            entry.push('\n');
        }
    }

    entry
}
