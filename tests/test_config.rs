//! Configuration loading from JSON files.

use mlp_trainer::config::load_config;
use mlp_trainer::error::Error;
use std::fs;
use std::path::PathBuf;

fn write_temp_config(name: &str, contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("mlp_trainer_test_{}_{}.json", std::process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_valid_config() {
    let path = write_temp_config(
        "valid",
        r#"{
            "hidden_sizes": [80, 40],
            "learning_rate": 0.001,
            "decay": 0.001,
            "epochs": 100,
            "seed": 1,
            "images_path": "data/train-images-idx3-ubyte",
            "labels_path": "data/train-labels-idx1-ubyte"
        }"#,
    );

    let config = load_config(path.to_str().unwrap()).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(config.hidden_sizes, vec![80, 40]);
    assert_eq!(config.epochs, 100);
    assert!((config.learning_rate - 0.001).abs() < 1e-9);
}

#[test]
fn test_load_config_applies_defaults() {
    let path = write_temp_config(
        "defaults",
        r#"{
            "hidden_sizes": [],
            "epochs": 1,
            "images_path": "images",
            "labels_path": "labels"
        }"#,
    );

    let config = load_config(path.to_str().unwrap()).unwrap();
    fs::remove_file(&path).unwrap();

    assert!(config.hidden_sizes.is_empty());
    assert_eq!(config.seed, 1);
    assert!((config.learning_rate - 0.001).abs() < 1e-9);
    assert!((config.decay - 0.001).abs() < 1e-9);
}

#[test]
fn test_load_config_missing_file() {
    let result = load_config("/nonexistent/config.json");
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_load_config_malformed_json() {
    let path = write_temp_config("malformed", "{ not json");

    let result = load_config(path.to_str().unwrap());
    fs::remove_file(&path).unwrap();

    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn test_load_config_rejects_invalid_values() {
    let path = write_temp_config(
        "invalid",
        r#"{
            "hidden_sizes": [8],
            "decay": -1.0,
            "epochs": 10,
            "images_path": "images",
            "labels_path": "labels"
        }"#,
    );

    let result = load_config(path.to_str().unwrap());
    fs::remove_file(&path).unwrap();

    assert!(matches!(result, Err(Error::Config(_))));
}
