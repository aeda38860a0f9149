use std::env;
use std::fs;
use std::path::PathBuf;

use log::info;
use thiserror::Error;

use crate::db::booking_store::{MongoBookingStore, StoreError};
use crate::services::checkout_service::CheckoutService;
use crate::services::pricing_service::PricingService;
use crate::services::stripe::provider::StripeProvider;
use crate::services::tariff::{Tariff, TariffError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tariff file {path}: {source}")]
    TariffRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tariff file {path}: {source}")]
    TariffParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("tariff file {path} rejected: {source}")]
    TariffInvalid {
        path: PathBuf,
        #[source]
        source: TariffError,
    },
    #[error("{0} is not set")]
    MissingSetting(&'static str),
    #[error("failed to connect booking store: {0}")]
    Store(#[from] StoreError),
}

/// Settings read from the environment. Unset and empty variables are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub tariff_path: Option<PathBuf>,
    pub mongodb_uri: Option<String>,
    pub stripe_secret_key: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            tariff_path: non_empty_var("TARIFF_PATH").map(PathBuf::from),
            mongodb_uri: non_empty_var("MONGODB_URI"),
            stripe_secret_key: non_empty_var("STRIPE_SECRET_KEY"),
        }
    }

    /// The configured tariff file, or the built-in schedule when none is set.
    pub fn load_tariff(&self) -> Result<Tariff, ConfigError> {
        let Some(path) = &self.tariff_path else {
            return Ok(Tariff::standard());
        };

        let raw = fs::read_to_string(path).map_err(|source| ConfigError::TariffRead {
            path: path.clone(),
            source,
        })?;
        let tariff = Tariff::from_json(&raw).map_err(|source| ConfigError::TariffParse {
            path: path.clone(),
            source,
        })?;
        tariff.validate().map_err(|source| ConfigError::TariffInvalid {
            path: path.clone(),
            source,
        })?;

        info!("Loaded tariff {} from {}", tariff.version, path.display());
        Ok(tariff)
    }

    /// Checkout backed by MongoDB and Stripe. Both settings are checked
    /// before any connection is attempted.
    pub async fn checkout_service(
        &self,
        pricing: PricingService,
    ) -> Result<CheckoutService<MongoBookingStore, StripeProvider>, ConfigError> {
        let uri = self
            .mongodb_uri
            .as_deref()
            .ok_or(ConfigError::MissingSetting("MONGODB_URI"))?;
        let secret_key = self
            .stripe_secret_key
            .as_deref()
            .ok_or(ConfigError::MissingSetting("STRIPE_SECRET_KEY"))?;

        let store = MongoBookingStore::connect(uri).await?;
        Ok(CheckoutService::new(
            pricing,
            store,
            StripeProvider::new(secret_key),
        ))
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
