//! Basic usage: resolve a date through the tiers and print the outcome.
//!
//! Run with: cargo run --example basic_usage [-- YEAR MONTH DAY]

use manseryeok_client::{
    ClientConfig, DateKey, HttpRemoteFetcher, JsonFileDataset, ManseryeokClient,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> manseryeok_client::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "manseryeok_client=debug".into()),
        )
        .init();

    let mut args = std::env::args().skip(1).flat_map(|a| a.parse::<i32>().ok());
    let year = args.next().unwrap_or(2024);
    let month = args.next().unwrap_or(1) as u32;
    let day = args.next().unwrap_or(1) as u32;

    let client = ManseryeokClient::new(
        ClientConfig::default(),
        Arc::new(HttpRemoteFetcher::new()?),
        Arc::new(JsonFileDataset::new("data/manseryeok.json")),
    )?;

    let key = DateKey::new(year, month, day);
    match client.get(key).await {
        Ok(record) => {
            println!(
                "{} → lunar {}-{:02}-{:02}{} | {}년 {}일 | {} ({}띠) [{}]",
                key,
                record.lunar.year,
                record.lunar.month,
                record.lunar.day,
                if record.lunar.is_leap_month { " (윤달)" } else { "" },
                record.ganji.year,
                record.ganji.day,
                record.week_day,
                record.zodiac,
                record.source,
            );
        }
        Err(err) => {
            // A content page would degrade to a "data unavailable" state here.
            eprintln!("lookup failed: {err}");
        }
    }

    // Calling the same key again demonstrates the cache tier.
    if let Ok(record) = client.get(key).await {
        println!("second lookup served from: {}", record.source);
    }

    let metrics = client.metrics();
    println!(
        "metrics: {} remote, {} cache, {} local, success rate {:.0}%, avg {:.2}ms",
        metrics.remote_calls,
        metrics.cache_hits,
        metrics.local_fallbacks,
        metrics.success_rate() * 100.0,
        metrics.average_latency_ms(),
    );

    Ok(())
}
