use std::fs;
use std::path::PathBuf;

use rust_decimal_macros::dec;

use renkoflow::{ConfigError, ConfigLoader, Pipeline, PipelineConfig};

fn temp_file(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("renkoflow_{}_{name}", std::process::id()));
    fs::write(&path, body).expect("write temp config");
    path
}

#[test]
fn loads_yaml_config() {
    let path = temp_file(
        "pipeline.yaml",
        "brick_size: \"0.0010\"\nema_fast_period: 100\nema_slow_period: 300\natr_period: 2\natr_multiplier: \"30\"\nmax_history: 500\n",
    );
    let config = ConfigLoader::load(&path).expect("load yaml");
    assert_eq!(config.brick_size, dec!(0.0010));
    assert_eq!(config.ema_slow_period, 300);
    assert_eq!(config.max_history, Some(500));
    assert!(Pipeline::from_config(config).is_ok());
    let _ = fs::remove_file(path);
}

#[test]
fn loads_json_config_without_retention() {
    let path = temp_file(
        "pipeline.json",
        r#"{"brick_size":"0.5","ema_fast_period":3,"ema_slow_period":8,"atr_period":4,"atr_multiplier":"1.5"}"#,
    );
    let config = ConfigLoader::load(&path).expect("load json");
    assert_eq!(
        config,
        PipelineConfig::new(dec!(0.5), 3, 8, 4, dec!(1.5))
    );
    let _ = fs::remove_file(path);
}

#[test]
fn loaded_config_is_validated() {
    let path = temp_file(
        "inverted.yml",
        "brick_size: \"1\"\nema_fast_period: 50\nema_slow_period: 20\natr_period: 2\natr_multiplier: \"3\"\n",
    );
    assert!(matches!(
        ConfigLoader::load(&path),
        Err(ConfigError::FastNotBelowSlow { fast: 50, slow: 20 })
    ));
    let _ = fs::remove_file(path);
}

#[test]
fn unknown_extension_is_rejected() {
    let path = temp_file("pipeline.toml", "brick_size = 1\n");
    assert!(matches!(
        ConfigLoader::load(&path),
        Err(ConfigError::UnsupportedFormat(_))
    ));
    let _ = fs::remove_file(path);
}

#[test]
fn defaults_match_source_scripts() {
    let config = PipelineConfig::default();
    assert_eq!(config.brick_size, dec!(0.0010));
    assert_eq!((config.ema_fast_period, config.ema_slow_period), (20, 50));
    assert_eq!((config.atr_period, config.atr_multiplier), (2, dec!(30)));
    assert!(config.validate().is_ok());
}
