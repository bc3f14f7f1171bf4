use clap::Parser;
use dex_harvest::{pipeline, HarvestConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Harvest PokeAPI species data into static JSON catalogs
#[derive(Parser)]
#[command(name = "dex-harvest")]
#[command(version)]
struct Cli {
    /// RON configuration file; every field is optional
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the JSON catalogs and the sprites/artwork caches
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// API root, e.g. https://pokeapi.co/api/v2
    #[arg(long)]
    api_base_url: Option<String>,

    /// Requests in flight per batch, for both chains and species
    #[arg(long)]
    batch_size: Option<usize>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn into_config(self) -> Result<HarvestConfig, dex_harvest::HarvestError> {
        let mut config = match &self.config {
            Some(path) => HarvestConfig::load(path)?,
            None => HarvestConfig::default(),
        };
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(url) = self.api_base_url {
            config.api_base_url = url;
        }
        if let Some(size) = self.batch_size {
            config.chain_batch.size = size;
            config.species_batch.size = size;
        }
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dex_harvest={}", cli.log_level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let start = Instant::now();
    let result = match cli.into_config() {
        Ok(config) => pipeline::run(&config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => {
            println!("Done!");
            println!("Duration: {:.2} seconds", start.elapsed().as_secs_f64());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
