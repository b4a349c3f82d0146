use clap::{Parser, Subcommand};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crawl_frontier::config_adapters::scheduler_config_from_settings;
use crawl_frontier::core::error::{Error, Result};
use crawl_frontier::core::request::Request;
use crawl_frontier::scheduler::{
    create_scheduler, DuplicateRemover, MonitorableScheduler, QueueDuplicateRemovedScheduler,
    Scheduler,
};
use crawl_frontier::settings::Settings;

#[derive(Parser)]
#[command(
    name = "frontier",
    about = "Drive a deduplicating crawl frontier from a seed file",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Push seed URLs through the frontier with concurrent producers and consumers
    #[command(name = "run")]
    Run {
        /// File with one URL per line
        seeds: String,

        /// Number of producer tasks
        #[arg(long, default_value_t = 4)]
        producers: usize,

        /// Number of consumer tasks (0 leaves everything pending)
        #[arg(long, default_value_t = 2)]
        consumers: usize,

        /// Settings file to use
        #[arg(short, long)]
        settings: Option<String>,

        /// Checkpoint file to load before pushing seeds
        #[arg(long)]
        restore: Option<String>,

        /// Write the pending requests to this file when done
        #[arg(long)]
        checkpoint: Option<String>,
    },

    /// Print one setting, or all of them
    #[command(name = "settings")]
    Settings {
        /// Name of the setting to print
        name: Option<String>,

        /// Settings file to use
        #[arg(short, long)]
        settings_file: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    env_logger::init();

    let outcome = match cli.command {
        Commands::Run {
            seeds,
            producers,
            consumers,
            settings,
            restore,
            checkpoint,
        } => run(
            &seeds,
            producers,
            consumers,
            settings.as_deref(),
            restore.as_deref(),
            checkpoint.as_deref(),
        ),
        Commands::Settings {
            name,
            settings_file,
        } => show_settings(name.as_deref(), settings_file.as_deref()),
    };

    if let Err(e) = outcome {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn load_settings(path: Option<&str>) -> Result<Settings> {
    match path {
        Some(path) => Settings::from_file(path).map_err(|e| Error::other(e.to_string())),
        None => Ok(Settings::new()),
    }
}

/// Read seed URLs, skipping blank lines and `#` comments
fn read_seeds(path: &Path) -> Result<Vec<Request>> {
    let contents = fs::read_to_string(path)?;
    let mut seeds = Vec::new();
    for (line_no, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match Request::get(line) {
            Ok(request) => seeds.push(request),
            Err(e) => warn!("Skipping seed on line {}: {}", line_no + 1, e),
        }
    }
    Ok(seeds)
}

fn read_checkpoint(path: &Path) -> Result<HashSet<Request>> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn write_checkpoint(path: &Path, requests: &HashSet<Request>) -> Result<()> {
    let json = serde_json::to_string_pretty(requests)?;
    fs::write(path, json)?;
    Ok(())
}

fn run(
    seeds_path: &str,
    producers: usize,
    consumers: usize,
    settings_path: Option<&str>,
    restore: Option<&str>,
    checkpoint: Option<&str>,
) -> Result<()> {
    let settings = load_settings(settings_path)?;
    let config =
        scheduler_config_from_settings(&settings).map_err(|e| Error::other(e.to_string()))?;
    let seeds = read_seeds(Path::new(seeds_path))?;
    info!("Loaded {} seed URLs from {}", seeds.len(), seeds_path);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let scheduler = create_scheduler(&config);

        if let Some(restore) = restore {
            let restored = read_checkpoint(Path::new(restore))?;
            // Restored requests must be known to the index before seeds are pushed
            for request in &restored {
                scheduler.duplicate_remover().is_new_and_record(request);
            }
            info!("Restored {} pending requests from {}", restored.len(), restore);
            scheduler.load(restored).await?;
        }

        let done = Arc::new(AtomicBool::new(false));
        let consumer_handles: Vec<_> = (0..consumers)
            .map(|id| tokio::spawn(consume(id, scheduler.clone(), done.clone())))
            .collect();

        let chunk_size = seeds.len().div_ceil(producers.max(1)).max(1);
        let producer_handles: Vec<_> = seeds
            .chunks(chunk_size)
            .map(|chunk| {
                let scheduler = scheduler.clone();
                let chunk = chunk.to_vec();
                tokio::spawn(async move {
                    for request in chunk {
                        scheduler.push(request).await?;
                    }
                    Ok::<(), Error>(())
                })
            })
            .collect();

        for handle in producer_handles {
            handle
                .await
                .map_err(|e| Error::other(format!("producer task failed: {}", e)))??;
        }
        done.store(true, Ordering::SeqCst);

        for handle in consumer_handles {
            handle
                .await
                .map_err(|e| Error::other(format!("consumer task failed: {}", e)))?;
        }

        if let Some(checkpoint) = checkpoint {
            let pending = scheduler.to_snapshot().await;
            write_checkpoint(Path::new(checkpoint), &pending)?;
            info!("Wrote {} pending requests to {}", pending.len(), checkpoint);
        }

        let stats = scheduler.stats().await;
        println!("{}", serde_json::to_string_pretty(&stats)?);
        Ok::<(), Error>(())
    })
}

/// Poll until producers are finished and the frontier is empty
async fn consume(
    id: usize,
    scheduler: Arc<QueueDuplicateRemovedScheduler>,
    done: Arc<AtomicBool>,
) {
    let mut handled = 0usize;
    loop {
        match scheduler.poll().await {
            Some(request) => {
                debug!("[consumer {}] {} {}", id, request.method, request.url);
                scheduler.notify_success();
                handled += 1;
            }
            None if done.load(Ordering::SeqCst) && scheduler.is_empty().await => break,
            None => tokio::task::yield_now().await,
        }
    }
    info!("[consumer {}] finished after {} requests", id, handled);
}

fn show_settings(name: Option<&str>, settings_file: Option<&str>) -> Result<()> {
    let settings = load_settings(settings_file)?;

    match name {
        Some(name) => {
            let value = settings
                .get::<serde_json::Value>(name)
                .map_err(|e| Error::other(e.to_string()))?;
            println!("{} = {}", name, value);
        }
        None => {
            let mut keys: Vec<_> = settings.all().keys().collect();
            keys.sort();
            for key in keys {
                println!("{} = {}", key, settings.all()[key]);
            }
        }
    }

    Ok(())
}
