use crate::config::{Config, DEFAULT_MODEL_DIR};
use std::env;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::OnceLock;

// Global lock to prevent race conditions when modifying environment variables in tests
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn get_env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

const KEYS: &[&str] = &[
    "SERVER_BIND_ADDRESS",
    "SERVER_PORT",
    "MODEL_DIR",
    "TRAINING_N_TREES",
    "TRAINING_MAX_DEPTH",
    "TRAINING_MIN_SAMPLES_SPLIT",
    "TRAINING_SEED",
    "TRAINING_TEST_RATIO",
    "TRAINING_SAMPLES",
];

fn clear_env() {
    for key in KEYS {
        unsafe { env::remove_var(key) };
    }
}

#[test]
fn test_config_defaults() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();

    let config = Config::from_env().unwrap();

    assert_eq!(config.server.bind_address, "127.0.0.1");
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.model_dir, PathBuf::from(DEFAULT_MODEL_DIR));
    assert_eq!(config.training.n_trees, 100);
    assert_eq!(config.training.max_depth, 10);
    assert_eq!(config.training.seed, 42);
    assert!((config.training.test_ratio - 0.2).abs() < f64::EPSILON);
    assert_eq!(config.training.samples, 10_000);
}

#[test]
fn test_config_overrides() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();
    unsafe {
        env::set_var("SERVER_PORT", "9100");
        env::set_var("MODEL_DIR", "/var/lib/churn");
        env::set_var("TRAINING_N_TREES", "25");
        env::set_var("TRAINING_TEST_RATIO", "0.3");
    }

    let config = Config::from_env().unwrap();

    assert_eq!(config.server.port, 9100);
    assert_eq!(config.artifact_store().dir(), PathBuf::from("/var/lib/churn"));
    let training = config.training.to_training_config();
    assert_eq!(training.n_trees, 25);
    assert!((training.test_ratio - 0.3).abs() < f64::EPSILON);

    clear_env();
}

#[test]
fn test_invalid_values_are_rejected() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();

    unsafe { env::set_var("SERVER_PORT", "eighty") };
    let err = Config::from_env().unwrap_err();
    assert!(err.to_string().contains("SERVER_PORT"));
    clear_env();

    unsafe { env::set_var("TRAINING_TEST_RATIO", "1.5") };
    assert!(Config::from_env().is_err());
    clear_env();

    unsafe { env::set_var("TRAINING_N_TREES", "0") };
    assert!(Config::from_env().is_err());
    clear_env();
}
