use anyhow::Context;
use churn_predictor::application::ml::synthetic_data;
use churn_predictor::application::ml::{ChurnTrainer, TrainingConfig};
use churn_predictor::config::Config;
use churn_predictor::infrastructure::dataset::read_dataset;
use churn_predictor::infrastructure::persistence::ArtifactStore;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a labeled training CSV. Synthetic data is generated when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory receiving churn_model.json and scaler.json [env: MODEL_DIR]
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Number of synthetic rows to generate when no input is given
    #[arg(long)]
    samples: Option<usize>,

    /// Number of trees in the random forest
    #[arg(long)]
    n_trees: Option<u16>,

    /// Maximum depth of trees
    #[arg(long)]
    max_depth: Option<u16>,

    /// Minimum samples required to split an internal node
    #[arg(long)]
    min_split: Option<usize>,

    /// Seed shared by data generation, the train/test split and the forest
    #[arg(long)]
    seed: Option<u64>,

    /// Fraction of rows held out for evaluation
    #[arg(long)]
    test_ratio: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let args = Args::parse();
    let config = Config::from_env()?;
    let env_training = &config.training;

    let training = TrainingConfig {
        n_trees: args.n_trees.unwrap_or(env_training.n_trees),
        max_depth: args.max_depth.unwrap_or(env_training.max_depth),
        min_samples_split: args.min_split.unwrap_or(env_training.min_samples_split),
        seed: args.seed.unwrap_or(env_training.seed),
        test_ratio: args.test_ratio.unwrap_or(env_training.test_ratio),
    };

    let dataset = match &args.input {
        Some(path) => read_dataset(path)?,
        None => {
            let samples = args.samples.unwrap_or(env_training.samples);
            info!(
                "No input dataset given. Generating {} synthetic rows (seed {}).",
                samples, training.seed
            );
            synthetic_data::generate(samples, training.seed)
        }
    };

    let churned = dataset.iter().filter(|r| r.churn == 1).count();
    println!("\nTarget Distribution (churn):");
    println!("  Total:    {}", dataset.len());
    if !dataset.is_empty() {
        println!(
            "  Churned:  {} ({:.1}%)",
            churned,
            churned as f64 / dataset.len() as f64 * 100.0
        );
    }

    let trained = ChurnTrainer::new(training)
        .train(&dataset)
        .context("Training failed")?;

    println!(
        "\nClassification Report (train n={}, test n={}):\n",
        trained.train_rows, trained.test_rows
    );
    println!("{}", trained.report);

    let store = ArtifactStore::new(args.output_dir.unwrap_or(config.model_dir));
    store
        .save(&trained.model)
        .context("Failed to persist model artifacts")?;

    println!(
        "\nModel and scaler saved to {:?} (run {}).",
        store.dir(),
        trained.model.metadata().run_id
    );
    Ok(())
}
