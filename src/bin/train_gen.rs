use churn_predictor::application::ml::synthetic_data::{self, DEFAULT_SAMPLES, DEFAULT_SEED};
use churn_predictor::infrastructure::dataset::write_dataset;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output CSV path
    #[arg(short, long, default_value = "data/ml/training_data.csv")]
    output: PathBuf,

    /// Number of rows to generate
    #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLES)]
    samples: usize,

    /// RNG seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let cli = Cli::parse();

    info!(
        "Generating {} synthetic customer rows (seed {})",
        cli.samples, cli.seed
    );
    let rows = synthetic_data::generate(cli.samples, cli.seed);
    write_dataset(&cli.output, &rows)?;

    info!("Done. Train with: cargo run --bin train_ml -- --input {:?}", cli.output);
    Ok(())
}
