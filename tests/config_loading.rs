use price_estimator::{config::load_config, pricing::PriceEstimator};
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_missing_file_uses_defaults() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = load_config(&dir.path().join("absent.toml"))?;

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8501);
    assert_eq!(config.classifier.predict_url(), "http://localhost:8000/predict/");
    assert_eq!(config.history.max_entries, 100);
    assert!(config.metrics.enabled);
    assert!(config.pricing.categories.contains_key("car"));
    Ok(())
}

#[test]
fn test_file_overrides_sections() -> anyhow::Result<()> {
    let file = write_config(
        r#"
        [server]
        port = 9100
        log_format = "json"

        [classifier]
        base_url = "http://classifier.internal:8000"
        timeout_seconds = 10

        [history]
        max_entries = 5

        [pricing]
        fallback = [1000, 2000]
        luxury_categories = []

        [pricing.categories]
        bike = [100, 1100]

        [pricing.labels]
        mountain_bike = "bike"
        "#,
    );

    let config = load_config(file.path())?;
    assert_eq!(config.server.port, 9100);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.log_format, "json");
    assert_eq!(
        config.classifier.predict_url(),
        "http://classifier.internal:8000/predict/"
    );
    assert_eq!(config.classifier.timeout_seconds, 10);
    assert_eq!(config.history.max_entries, 5);

    let estimator = PriceEstimator::new(config.pricing);
    assert_eq!(estimator.estimate_price("mountain_bike", 0.5), 600);
    assert_eq!(estimator.estimate_price("sports_car", 0.5), 1500);
    Ok(())
}

#[test]
fn test_invalid_values_are_rejected() {
    let file = write_config(
        r#"
        [classifier]
        base_url = "classifier:8000"
        "#,
    );
    assert!(load_config(file.path()).is_err());

    let file = write_config(
        r#"
        [pricing.categories]
        boat = [9000, 10]
        "#,
    );
    assert!(load_config(file.path()).is_err());
}

#[test]
fn test_malformed_toml_is_rejected() {
    let file = write_config("[server\nport = ");
    assert!(load_config(file.path()).is_err());
}
