//! Analyzer binary entry point

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use analyzer::{
    AnalysisEngine, ChannelProgressSink, EngineConfig, HttpProviderClient, MemoryRecordStore,
    ProviderCredentials,
};
use shared::messages::ScanUpdate;
use shared::BusinessRecord;

#[derive(Parser)]
#[command(name = "dealscan")]
#[command(about = "Multi-provider acquisition analysis engine")]
struct Args {
    #[command(subcommand)]
    action: Action,

    /// Records analyzed concurrently per batch
    #[arg(long, default_value_t = 5)]
    batch_size: usize,

    /// Seconds to pause between batches
    #[arg(long, default_value_t = 2)]
    batch_delay_secs: u64,

    /// Attempt budget per provider call
    #[arg(long, default_value_t = 3)]
    max_attempts: u32,

    /// Log level for analyzer crates (trace|debug|info|warn|error)
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Action {
    /// Analyze every pending record in the store
    StartScan,

    /// Analyze a single record by id
    AnalyzeOne {
        record_id: Uuid,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    shared::logging::init_tracing_with_level(args.log_level.as_deref());

    let credentials = ProviderCredentials::from_env().context("loading provider credentials")?;
    println!(
        "Found credentials for: {:?}",
        credentials.available_providers()
    );

    let config = EngineConfig {
        max_attempts: args.max_attempts,
        batch_size: args.batch_size,
        batch_delay: Duration::from_secs(args.batch_delay_secs),
        ..EngineConfig::default()
    };

    let client = HttpProviderClient::new(credentials, config.request_timeout)
        .context("building provider client")?;
    let store = MemoryRecordStore::new();
    seed_demo_records(&store).await;

    let (sink, mut updates) = ChannelProgressSink::channel();
    let engine = Arc::new(AnalysisEngine::new(config, client, store, sink));

    // Print progress as it arrives on the push channel
    let printer = tokio::spawn(async move {
        while let Some(update) = updates.recv().await {
            match &update {
                ScanUpdate::Started { run_id, total } => {
                    println!("▶ Run {run_id}: {total} record(s) queued");
                }
                ScanUpdate::Progress {
                    processed,
                    added,
                    updated,
                    ..
                } => {
                    println!("  … {processed} processed ({added} added, {updated} updated)");
                }
                ScanUpdate::Completed {
                    processed,
                    added,
                    updated,
                    ..
                } => {
                    println!("✔ Done: {processed} processed ({added} added, {updated} updated)");
                }
                ScanUpdate::Failed { message, .. } => {
                    eprintln!("✖ Run failed: {message}");
                }
            }
            if update.is_terminal() {
                break;
            }
        }
    });

    match args.action {
        Action::StartScan => {
            let run_id = Uuid::new_v4();
            engine.run_scan(run_id).await?;
        }
        Action::AnalyzeOne { record_id } => {
            let run_id = Uuid::new_v4();
            let assessment = engine.run_single(run_id, record_id).await?;
            println!(
                "\n{} → composite {:.3}, cap rate {:.1}%, payback {:.1}y, confidence {}",
                assessment.record_id,
                assessment.composite_score,
                assessment.cap_rate * 100.0,
                assessment.payback_years,
                assessment.confidence
            );
            println!("\nThesis: {}", assessment.thesis);
        }
    }

    let _ = printer.await;
    Ok(())
}

/// Demo inventory standing in for the external record store
async fn seed_demo_records(store: &MemoryRecordStore) {
    let records = [
        BusinessRecord {
            id: Uuid::new_v4(),
            name: "Hill Country HVAC".to_string(),
            sector: "home services".to_string(),
            location: "Austin, TX".to_string(),
            asking_price: 2_800_000.0,
            annual_revenue: 3_500_000.0,
            annual_profit: 1_000_000.0,
        },
        BusinessRecord {
            id: Uuid::new_v4(),
            name: "Riverside Bakery".to_string(),
            sector: "food service".to_string(),
            location: "Portland, OR".to_string(),
            asking_price: 450_000.0,
            annual_revenue: 900_000.0,
            annual_profit: 150_000.0,
        },
        BusinessRecord {
            id: Uuid::new_v4(),
            name: "Summit Dental Group".to_string(),
            sector: "healthcare".to_string(),
            location: "Denver, CO".to_string(),
            asking_price: 1_600_000.0,
            annual_revenue: 2_100_000.0,
            annual_profit: 480_000.0,
        },
    ];

    for record in records {
        println!("  seeded {} ({})", record.name, record.id);
        store.insert_record(record).await;
    }
}
