use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::quote::PriceResult;
use crate::models::selection::ArtistTier;

/// Confirmed pricing written onto a booking record.
///
/// Each amount is rounded to cents exactly once, here, from the unrounded
/// calculator output. `total_cents` is not the sum of the other rounded parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSnapshot {
    pub artist_tier: ArtistTier,
    pub tariff_version: String,
    pub subtotal_cents: i64,
    pub hst_cents: i64,
    pub total_cents: i64,
    pub deposit_cents: i64,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub priced_at: DateTime<Utc>,
}

impl PricingSnapshot {
    pub fn from_result(
        result: &PriceResult,
        artist_tier: ArtistTier,
        tariff_version: &str,
        priced_at: DateTime<Utc>,
    ) -> Self {
        Self {
            artist_tier,
            tariff_version: tariff_version.to_string(),
            subtotal_cents: round_to_cents(result.subtotal),
            hst_cents: round_to_cents(result.hst),
            total_cents: round_to_cents(result.total),
            deposit_cents: round_to_cents(result.deposit),
            priced_at,
        }
    }
}

/// Round half to even at the cent. Non-finite amounts become 0.
pub fn round_to_cents(amount: f64) -> i64 {
    if !amount.is_finite() {
        return 0;
    }
    (amount * 100.0).round_ties_even() as i64
}
