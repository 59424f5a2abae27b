//! Recording processing pipeline binary.
//!
//! Usage:
//!   reclip-pipeline ingest <title> <file-path>   create a recording row
//!   reclip-pipeline process <recording-id>       run the pipeline on it

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reclip_catalog::{CatalogStore, SqliteCatalog};
use reclip_models::{Recording, RecordingId};
use reclip_pipeline::{
    FfmpegTranscoder, OpenAiClient, PipelineConfig, RecordingProcessor, Tagger, Transcriber,
};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("reclip=info".parse().unwrap())
        .add_directive("hyper=warn".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    let db_path =
        std::env::var("RECLIP_DB").unwrap_or_else(|_| "./data/catalog.db".to_string());
    let catalog = Arc::new(SqliteCatalog::open(&db_path)?);

    match args.get(1).map(String::as_str) {
        Some("ingest") => {
            let (title, file_path) = match (args.get(2), args.get(3)) {
                (Some(t), Some(p)) => (t.clone(), p.clone()),
                _ => return Err("usage: reclip-pipeline ingest <title> <file-path>".into()),
            };
            let recording = Recording::new(&title, &file_path);
            catalog.create_recording(&recording).await?;
            info!(recording_id = %recording.id, "Recording ingested");
            println!("{}", recording.id);
            Ok(())
        }
        Some("process") => {
            let id = args
                .get(2)
                .ok_or("usage: reclip-pipeline process <recording-id>")?;

            reclip_media::check_ffmpeg()?;
            reclip_media::check_ffprobe()?;

            let config = PipelineConfig::from_env();
            info!("Pipeline config: {:?}", config);

            let openai = Arc::new(OpenAiClient::from_env(Duration::from_secs(
                config.capability_timeout_secs,
            ))?);
            let transcoder = Arc::new(FfmpegTranscoder::new(
                config.encoding.clone(),
                config.transcode_timeout_secs,
            ));

            let processor = RecordingProcessor::new(
                catalog,
                transcoder,
                openai.clone() as Arc<dyn Transcriber>,
                openai as Arc<dyn Tagger>,
                config,
            );

            let summary = processor
                .process_recording(&RecordingId::from(id.as_str()))
                .await?;
            info!(
                materialized = summary.materialized_clips,
                skipped = summary.skipped_clips,
                degraded = summary.degraded_clips,
                "Run finished"
            );
            Ok(())
        }
        _ => Err("usage: reclip-pipeline <ingest|process> ...".into()),
    }
}
