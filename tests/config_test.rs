use std::env;
use std::fs;
use std::path::PathBuf;

use glam_booking_api::config::{AppConfig, ConfigError};
use glam_booking_api::services::pricing_service::PricingService;
use glam_booking_api::services::tariff::{Tariff, TariffError};
use serial_test::serial;

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("glam-booking-{}-{}", std::process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}

fn clear_env() {
    env::remove_var("TARIFF_PATH");
    env::remove_var("MONGODB_URI");
    env::remove_var("STRIPE_SECRET_KEY");
}

#[test]
#[serial]
fn test_defaults_to_standard_tariff() {
    clear_env();

    let config = AppConfig::from_env();

    assert_eq!(config, AppConfig::default());
    assert_eq!(config.load_tariff().unwrap(), Tariff::standard());
}

#[test]
#[serial]
fn test_reads_environment() {
    clear_env();
    env::set_var("MONGODB_URI", "mongodb://localhost:27017");
    env::set_var("STRIPE_SECRET_KEY", "  ");

    let config = AppConfig::from_env();

    assert_eq!(config.mongodb_uri.as_deref(), Some("mongodb://localhost:27017"));
    assert_eq!(config.stripe_secret_key, None);
    clear_env();
}

#[test]
#[serial]
fn test_loads_tariff_override() {
    clear_env();
    let mut tariff = Tariff::standard();
    tariff.version = "2025.summer".to_string();
    tariff.default_travel_fee = 65.0;
    let path = scratch_file("tariff.json", &serde_json::to_string(&tariff).unwrap());
    env::set_var("TARIFF_PATH", &path);

    let loaded = AppConfig::from_env().load_tariff().unwrap();

    assert_eq!(loaded.version, "2025.summer");
    assert_eq!(loaded.default_travel_fee, 65.0);
    fs::remove_file(path).ok();
    clear_env();
}

#[test]
#[serial]
fn test_bad_tariff_file_is_an_error() {
    clear_env();
    let path = scratch_file("broken.json", "{ \"version\": ");
    let config = AppConfig {
        tariff_path: Some(path.clone()),
        ..Default::default()
    };

    assert!(matches!(
        config.load_tariff(),
        Err(ConfigError::TariffParse { .. })
    ));
    fs::remove_file(path).ok();

    let missing = AppConfig {
        tariff_path: Some(env::temp_dir().join("glam-booking-does-not-exist.json")),
        ..Default::default()
    };
    assert!(matches!(
        missing.load_tariff(),
        Err(ConfigError::TariffRead { .. })
    ));
}

#[test]
#[serial]
fn test_out_of_range_tariff_is_rejected() {
    clear_env();
    let mut tariff = Tariff::standard();
    tariff.non_bridal.lead.both = -250.0;
    let path = scratch_file("negative.json", &serde_json::to_string(&tariff).unwrap());
    let config = AppConfig {
        tariff_path: Some(path.clone()),
        ..Default::default()
    };

    match config.load_tariff() {
        Err(ConfigError::TariffInvalid { source, .. }) => assert_eq!(
            source,
            TariffError::InvalidPrice {
                field: "non_bridal.lead.both".to_string(),
                value: -250.0,
            }
        ),
        other => panic!("expected an invalid tariff, got {other:?}"),
    }
    fs::remove_file(path).ok();

    let mut tariff = Tariff::standard();
    tariff.deposit.non_bridal = 1.7;
    let path = scratch_file("deposit.json", &serde_json::to_string(&tariff).unwrap());
    let config = AppConfig {
        tariff_path: Some(path.clone()),
        ..Default::default()
    };

    assert!(matches!(
        config.load_tariff(),
        Err(ConfigError::TariffInvalid {
            source: TariffError::InvalidDepositRate { .. },
            ..
        })
    ));
    fs::remove_file(path).ok();
}

#[test]
#[serial]
fn test_checkout_requires_store_and_payment_settings() {
    clear_env();

    tokio_test::block_on(async {
        let none = AppConfig::default();
        let result = none.checkout_service(PricingService::default()).await;
        assert!(matches!(
            result.err(),
            Some(ConfigError::MissingSetting("MONGODB_URI"))
        ));

        let no_key = AppConfig {
            mongodb_uri: Some("mongodb://localhost:27017".to_string()),
            ..Default::default()
        };
        let result = no_key.checkout_service(PricingService::default()).await;
        assert!(matches!(
            result.err(),
            Some(ConfigError::MissingSetting("STRIPE_SECRET_KEY"))
        ));
    });
}
