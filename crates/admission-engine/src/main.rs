use admission_engine::{logging, Datasets, EngineConfig};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "admission-decide")]
#[command(about = "Decide traveller admission against a watchlist and country requirements")]
struct Cli {
    /// Traveller entries file (JSON or YAML)
    #[arg(long, required_unless_present = "config")]
    entries: Option<PathBuf>,

    /// Watchlist file
    #[arg(long, required_unless_present = "config")]
    watchlist: Option<PathBuf>,

    /// Country directory file
    #[arg(long, required_unless_present = "config")]
    countries: Option<PathBuf>,

    /// Run configuration file naming the three datasets
    #[arg(long, conflicts_with_all = ["entries", "watchlist", "countries"])]
    config: Option<PathBuf>,

    /// Processing date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    today: Option<NaiveDate>,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

impl Cli {
    fn engine_config(&self) -> admission_engine::Result<EngineConfig> {
        let config = match &self.config {
            Some(path) => EngineConfig::from_file(path)?,
            None => EngineConfig::new(
                self.entries.clone().unwrap_or_default(),
                self.watchlist.clone().unwrap_or_default(),
                self.countries.clone().unwrap_or_default(),
            ),
        };

        let config = match self.today {
            Some(today) => config.with_today(today),
            None => config,
        };
        config.validate()?;
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    logging::init_logger(cli.verbose);
    tracing::debug!("CLI arguments: {:?}", cli);

    let config = match cli.engine_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration failed: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let datasets = match Datasets::load(&config) {
        Ok(datasets) => datasets,
        Err(e) => {
            tracing::error!("Loading datasets failed: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let outcomes = datasets.decide(config.processing_date());
    match serde_json::to_string(&outcomes) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
