//! Tariff schedule for bridal, semi-bridal and non-bridal bookings.
//!
//! Plain data only. Every unit price the calculator uses lives here, keyed by
//! artist tier first where the price depends on who does the work. A tariff
//! can be replaced wholesale from JSON (see `AppConfig::load_tariff`), which is
//! why every table derives serde.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::selection::{ArtistTier, ServiceCategory, ServiceType, SubRegion};

pub const HST_RATE: f64 = 0.13;
pub const BRIDAL_DEPOSIT_RATE: f64 = 0.30;
pub const NON_BRIDAL_DEPOSIT_RATE: f64 = 0.50;

const STANDARD_VERSION: &str = "2024.1";

/// A tariff that would produce negative or nonsensical quotes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TariffError {
    #[error("price {field} must be a finite non-negative amount, got {value}")]
    InvalidPrice { field: String, value: f64 },
    #[error("hst_rate must be in [0, 1), got {0}")]
    InvalidHstRate(f64),
    #[error("deposit rate {field} must be in (0, 1], got {value}")]
    InvalidDepositRate { field: &'static str, value: f64 },
}

/// One price per service combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServicePrices {
    pub both: f64,
    pub hair_only: f64,
    pub makeup_only: f64,
}

impl ServicePrices {
    fn amounts(&self) -> [(&'static str, f64); 3] {
        [
            ("both", self.both),
            ("hair_only", self.hair_only),
            ("makeup_only", self.makeup_only),
        ]
    }

    pub fn price(&self, service: ServiceType) -> f64 {
        match service {
            ServiceType::BothHairMakeup => self.both,
            ServiceType::HairOnly => self.hair_only,
            ServiceType::MakeupOnly => self.makeup_only,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ByArtist<T> {
    pub lead: T,
    pub team: T,
}

impl<T> ByArtist<T> {
    pub fn get(&self, tier: ArtistTier) -> &T {
        match tier {
            ArtistTier::Lead => &self.lead,
            ArtistTier::Team => &self.team,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelFees {
    pub toronto_gta: f64,
    pub immediate_neighbors: f64,
    pub moderate_distance: f64,
    pub further_out: f64,
}

impl TravelFees {
    fn amounts(&self) -> [(&'static str, f64); 4] {
        [
            ("toronto_gta", self.toronto_gta),
            ("immediate_neighbors", self.immediate_neighbors),
            ("moderate_distance", self.moderate_distance),
            ("further_out", self.further_out),
        ]
    }

    pub fn outside_gta(&self, band: SubRegion) -> f64 {
        match band {
            SubRegion::ImmediateNeighbors => self.immediate_neighbors,
            SubRegion::ModerateDistance => self.moderate_distance,
            SubRegion::FurtherOut => self.further_out,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BridalAddOnPrices {
    pub jewelry: f64,
    pub extensions: f64,
    pub saree_draping: f64,
    pub hijab_setting: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NonBridalAddOnPrices {
    pub jewelry: f64,
    pub extensions: f64,
    pub airbrush: f64,
    pub saree_draping: f64,
    pub hijab_setting: f64,
}

/// The same add-on is priced differently for bridal and non-bridal work.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AddOnPrices {
    pub bridal: BridalAddOnPrices,
    pub non_bridal: NonBridalAddOnPrices,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartyAddOnPrices {
    pub dupatta: f64,
    pub extensions: f64,
    pub saree_draping: f64,
    pub hijab_setting: f64,
    pub airbrush: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepositRates {
    pub bridal: f64,
    pub non_bridal: f64,
}

impl DepositRates {
    /// Semi-bridal bookings take the bridal rate.
    pub fn for_category(&self, category: ServiceCategory) -> f64 {
        match category {
            ServiceCategory::NonBridal => self.non_bridal,
            ServiceCategory::Bridal | ServiceCategory::SemiBridal => self.bridal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tariff {
    pub version: String,
    pub bridal: ByArtist<ServicePrices>,
    pub semi_bridal: ByArtist<ServicePrices>,
    pub trial: ByArtist<ServicePrices>,
    pub non_bridal: ByArtist<ServicePrices>,
    /// Bridal party members are priced the same whoever does the work.
    pub party: ServicePrices,
    pub party_add_ons: PartyAddOnPrices,
    pub add_ons: AddOnPrices,
    pub travel: ByArtist<TravelFees>,
    /// Applied to any region without its own schedule.
    pub default_travel_fee: f64,
    pub hst_rate: f64,
    pub deposit: DepositRates,
}

impl Tariff {
    pub fn standard() -> Self {
        Self {
            version: STANDARD_VERSION.to_string(),
            bridal: ByArtist {
                lead: ServicePrices {
                    both: 450.0,
                    hair_only: 200.0,
                    makeup_only: 275.0,
                },
                team: ServicePrices {
                    both: 360.0,
                    hair_only: 160.0,
                    makeup_only: 220.0,
                },
            },
            semi_bridal: ByArtist {
                lead: ServicePrices {
                    both: 400.0,
                    hair_only: 180.0,
                    makeup_only: 250.0,
                },
                team: ServicePrices {
                    both: 320.0,
                    hair_only: 140.0,
                    makeup_only: 200.0,
                },
            },
            trial: ByArtist {
                lead: ServicePrices {
                    both: 250.0,
                    hair_only: 120.0,
                    makeup_only: 150.0,
                },
                team: ServicePrices {
                    both: 200.0,
                    hair_only: 100.0,
                    makeup_only: 120.0,
                },
            },
            non_bridal: ByArtist {
                lead: ServicePrices {
                    both: 250.0,
                    hair_only: 130.0,
                    makeup_only: 150.0,
                },
                team: ServicePrices {
                    both: 200.0,
                    hair_only: 100.0,
                    makeup_only: 120.0,
                },
            },
            party: ServicePrices {
                both: 200.0,
                hair_only: 100.0,
                makeup_only: 120.0,
            },
            party_add_ons: PartyAddOnPrices {
                dupatta: 20.0,
                extensions: 20.0,
                saree_draping: 35.0,
                hijab_setting: 25.0,
                airbrush: 25.0,
            },
            add_ons: AddOnPrices {
                bridal: BridalAddOnPrices {
                    jewelry: 50.0,
                    extensions: 30.0,
                    saree_draping: 50.0,
                    hijab_setting: 30.0,
                },
                non_bridal: NonBridalAddOnPrices {
                    jewelry: 20.0,
                    extensions: 20.0,
                    airbrush: 25.0,
                    saree_draping: 35.0,
                    hijab_setting: 25.0,
                },
            },
            travel: ByArtist {
                lead: TravelFees {
                    toronto_gta: 40.0,
                    immediate_neighbors: 60.0,
                    moderate_distance: 100.0,
                    further_out: 150.0,
                },
                team: TravelFees {
                    toronto_gta: 25.0,
                    immediate_neighbors: 50.0,
                    moderate_distance: 80.0,
                    further_out: 120.0,
                },
            },
            default_travel_fee: 50.0,
            hst_rate: HST_RATE,
            deposit: DepositRates {
                bridal: BRIDAL_DEPOSIT_RATE,
                non_bridal: NON_BRIDAL_DEPOSIT_RATE,
            },
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reject prices and rates that would break the quote invariants: every
    /// amount finite and non-negative, HST in [0, 1), deposits in (0, 1].
    pub fn validate(&self) -> Result<(), TariffError> {
        let mut prices: Vec<(String, f64)> = Vec::new();
        for (table, by_artist) in [
            ("bridal", &self.bridal),
            ("semi_bridal", &self.semi_bridal),
            ("trial", &self.trial),
            ("non_bridal", &self.non_bridal),
        ] {
            for (tier, service_prices) in [("lead", &by_artist.lead), ("team", &by_artist.team)] {
                for (name, value) in service_prices.amounts() {
                    prices.push((format!("{table}.{tier}.{name}"), value));
                }
            }
        }
        for (name, value) in self.party.amounts() {
            prices.push((format!("party.{name}"), value));
        }
        for (tier, fees) in [("lead", &self.travel.lead), ("team", &self.travel.team)] {
            for (name, value) in fees.amounts() {
                prices.push((format!("travel.{tier}.{name}"), value));
            }
        }

        let party = &self.party_add_ons;
        let bridal = &self.add_ons.bridal;
        let non_bridal = &self.add_ons.non_bridal;
        for (name, value) in [
            ("party_add_ons.dupatta", party.dupatta),
            ("party_add_ons.extensions", party.extensions),
            ("party_add_ons.saree_draping", party.saree_draping),
            ("party_add_ons.hijab_setting", party.hijab_setting),
            ("party_add_ons.airbrush", party.airbrush),
            ("add_ons.bridal.jewelry", bridal.jewelry),
            ("add_ons.bridal.extensions", bridal.extensions),
            ("add_ons.bridal.saree_draping", bridal.saree_draping),
            ("add_ons.bridal.hijab_setting", bridal.hijab_setting),
            ("add_ons.non_bridal.jewelry", non_bridal.jewelry),
            ("add_ons.non_bridal.extensions", non_bridal.extensions),
            ("add_ons.non_bridal.airbrush", non_bridal.airbrush),
            ("add_ons.non_bridal.saree_draping", non_bridal.saree_draping),
            ("add_ons.non_bridal.hijab_setting", non_bridal.hijab_setting),
            ("default_travel_fee", self.default_travel_fee),
        ] {
            prices.push((name.to_string(), value));
        }

        if let Some((field, value)) = prices
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(TariffError::InvalidPrice { field, value });
        }

        // NaN fails both range checks
        if !(0.0..1.0).contains(&self.hst_rate) {
            return Err(TariffError::InvalidHstRate(self.hst_rate));
        }
        for (field, value) in [
            ("deposit.bridal", self.deposit.bridal),
            ("deposit.non_bridal", self.deposit.non_bridal),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(TariffError::InvalidDepositRate { field, value });
            }
        }

        Ok(())
    }
}

impl Default for Tariff {
    fn default() -> Self {
        Self::standard()
    }
}
