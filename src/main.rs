// Crawl-window inspection tool
//
// Prints the permitted intervals of a daily crawl window as JSON.

use anyhow::{Context, Result, bail};
use chrono::{Duration, Utc};
use citepreserve::crawl_window::{DailyWindow, get_crawl_intervals, total_duration};

const USAGE: &str = "usage: citepreserve windows <from H:MM> <to H:MM> <zone> [days 1;7] [hours]";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("windows") => windows(&args[1..]),
        _ => bail!("{USAGE}"),
    }
}

fn windows(args: &[String]) -> Result<()> {
    let [from, to, zone, rest @ ..] = args else {
        bail!("{USAGE}");
    };
    let days = rest.first().map(String::as_str).filter(|d| !d.is_empty());
    let hours: i64 = match rest.get(1) {
        Some(h) => h.parse().with_context(|| format!("Invalid hour count '{h}'"))?,
        None => 24,
    };

    let window = DailyWindow::new(from, to, days, zone)
        .with_context(|| format!("Invalid crawl window {from}-{to} in {zone}"))?;
    log::info!("Listing intervals of '{window}' for the next {hours} hours");

    let start = Utc::now();
    let intervals: Vec<_> =
        get_crawl_intervals(&window, start, start + Duration::hours(hours)).collect();
    log::info!(
        "{} intervals, {} minutes permitted",
        intervals.len(),
        total_duration(&intervals).num_minutes()
    );
    println!("{}", serde_json::to_string_pretty(&intervals)?);
    Ok(())
}
