use std::fmt::Display;

use log::debug;

use crate::models::quote::PriceResult;
use crate::models::selection::{
    normalize_service_type, ArtistTier, BookingSelection, Region, ServiceCategory, ServiceMode,
    ServiceType,
};
use crate::services::tariff::{ServicePrices, Tariff};

const JEWELRY: &str = "Jewelry Setting";
const EXTENSIONS: &str = "Hair Extensions";
const SAREE_DRAPING: &str = "Saree Draping";
const HIJAB_SETTING: &str = "Hijab Setting";
const AIRBRUSH: &str = "Airbrush Makeup";
const DUPATTA: &str = "Dupatta Setting";

const SERVICE_TYPES: [ServiceType; 3] = [
    ServiceType::BothHairMakeup,
    ServiceType::MakeupOnly,
    ServiceType::HairOnly,
];

/// Travel charge for a booking, with the label shown on the quote.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelFee {
    pub amount: f64,
    pub label: String,
}

/// Resolve the travel fee for an on-location booking.
///
/// Studio bookings have no travel fee. Toronto/GTA takes the flat rate,
/// Outside GTA is priced by drive-time band and every other region takes the
/// default rate.
pub fn compute_travel_fee(
    selection: &BookingSelection,
    tier: ArtistTier,
    tariff: &Tariff,
) -> Option<TravelFee> {
    if selection.mode == ServiceMode::StudioService {
        return None;
    }

    let fees = tariff.travel.get(tier);
    let fee = match selection.region {
        Region::TorontoGta => TravelFee {
            amount: fees.toronto_gta,
            label: "Travel Fee (Toronto/GTA)".to_string(),
        },
        Region::OutsideGta(band) => TravelFee {
            amount: fees.outside_gta(band),
            label: format!("Travel Fee (Outside GTA - {})", band.label()),
        },
        Region::Other => TravelFee {
            amount: tariff.default_travel_fee,
            label: "Travel Fee".to_string(),
        },
    };
    Some(fee)
}

/// Running subtotal plus the line items that explain it.
struct QuoteBuilder {
    subtotal: f64,
    line_items: Vec<String>,
}

impl QuoteBuilder {
    fn new() -> Self {
        Self {
            subtotal: 0.0,
            line_items: Vec::new(),
        }
    }

    fn add(&mut self, label: impl Display, amount: f64) {
        self.subtotal += amount;
        self.line_items.push(format!("{}: ${:.2}", label, amount));
    }

    /// `"<label> x N"` lines, skipped when nobody asked for it.
    fn add_counted(&mut self, label: impl Display, unit_price: f64, count: u32) {
        if count > 0 {
            self.add(format!("{} x {}", label, count), unit_price * f64::from(count));
        }
    }

    /// Party lines show the unit price next to the head count.
    fn add_party(&mut self, label: impl Display, unit_price: f64, count: u32) {
        if count > 0 {
            self.add(
                format!("Party {} (${:.2} x {})", label, unit_price, count),
                unit_price * f64::from(count),
            );
        }
    }
}

/// Prices a booking selection against a tariff.
///
/// Calculation is pure: nothing is cached and the tariff is only borrowed, so
/// one service can be shared freely between callers.
pub struct PricingService {
    tariff: Tariff,
}

impl PricingService {
    pub fn new(tariff: Tariff) -> Self {
        Self { tariff }
    }

    pub fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    /// Calculate subtotal, HST, total, deposit and itemized lines.
    ///
    /// Returns `None` only when there is no selection. Missing or malformed
    /// fields contribute nothing instead of failing, and the last four line
    /// items are always Subtotal, HST, Total and Deposit.
    pub fn calculate_price(
        &self,
        selection: Option<&BookingSelection>,
        tier: ArtistTier,
    ) -> Option<PriceResult> {
        let selection = selection?;
        let tariff = &self.tariff;
        let mut quote = QuoteBuilder::new();

        debug!("Pricing {} booking for {} artist", selection.category, tier);

        match selection.category {
            ServiceCategory::NonBridal => self.price_non_bridal(selection, tier, &mut quote),
            ServiceCategory::SemiBridal => {
                self.price_bride(
                    selection,
                    tariff.semi_bridal.get(tier),
                    "Semi-Bridal",
                    &mut quote,
                );
                self.price_bridal_add_ons(selection, &mut quote);
                self.price_party(selection, &mut quote);
            }
            ServiceCategory::Bridal => {
                self.price_bride(selection, tariff.bridal.get(tier), "Bridal", &mut quote);
                self.price_trial(selection, tier, &mut quote);
                self.price_bridal_add_ons(selection, &mut quote);
                self.price_party(selection, &mut quote);
            }
        }

        if let Some(fee) = compute_travel_fee(selection, tier, tariff) {
            quote.add(fee.label, fee.amount);
        }

        let QuoteBuilder {
            subtotal,
            mut line_items,
        } = quote;
        let hst = subtotal * tariff.hst_rate;
        let total = subtotal + hst;
        let deposit_rate = tariff.deposit.for_category(selection.category);
        let deposit = total * deposit_rate;

        line_items.push(format!("Subtotal: ${:.2}", subtotal));
        line_items.push(format!("HST ({}%): ${:.2}", percent(tariff.hst_rate), hst));
        line_items.push(format!("Total: ${:.2}", total));
        line_items.push(format!(
            "Deposit required ({}%): ${:.2}",
            percent(deposit_rate),
            deposit
        ));

        debug!(
            "Priced {} booking for {} artist: subtotal {:.2}, total {:.2}, deposit {:.2}",
            selection.category, tier, subtotal, total, deposit
        );

        Some(PriceResult {
            subtotal,
            hst,
            total,
            deposit,
            line_items,
        })
    }

    fn price_non_bridal(
        &self,
        selection: &BookingSelection,
        tier: ArtistTier,
        quote: &mut QuoteBuilder,
    ) {
        let prices = self.tariff.non_bridal.get(tier);
        let counts = &selection.non_bridal;

        for service in SERVICE_TYPES {
            let count = match service {
                ServiceType::BothHairMakeup => counts.effective_both(),
                ServiceType::MakeupOnly => counts.makeup_only,
                ServiceType::HairOnly => counts.hair_only,
            };
            quote.add_counted(service, prices.price(service), count);
        }

        let add_ons = &self.tariff.add_ons.non_bridal;
        quote.add_counted(JEWELRY, add_ons.jewelry, counts.jewelry);
        quote.add_counted(EXTENSIONS, add_ons.extensions, counts.extensions);
        quote.add_counted(AIRBRUSH, add_ons.airbrush, counts.airbrush);
        quote.add_counted(SAREE_DRAPING, add_ons.saree_draping, counts.saree_draping);
        quote.add_counted(HIJAB_SETTING, add_ons.hijab_setting, counts.hijab_setting);
    }

    fn price_bride(
        &self,
        selection: &BookingSelection,
        prices: &ServicePrices,
        category_label: &str,
        quote: &mut QuoteBuilder,
    ) {
        if let Some(service) = normalize_service_type(selection.bride_service_type.as_deref()) {
            quote.add(format!("{} {}", category_label, service), prices.price(service));
        }
    }

    fn price_trial(
        &self,
        selection: &BookingSelection,
        tier: ArtistTier,
        quote: &mut QuoteBuilder,
    ) {
        if !selection.needs_trial {
            return;
        }
        if let Some(service) = normalize_service_type(selection.trial_service_type.as_deref()) {
            let price = self.tariff.trial.get(tier).price(service);
            quote.add(format!("Trial {}", service), price);
        }
    }

    fn price_bridal_add_ons(&self, selection: &BookingSelection, quote: &mut QuoteBuilder) {
        let prices = &self.tariff.add_ons.bridal;
        let wanted = &selection.add_ons;

        for (requested, label, price) in [
            (wanted.jewelry, JEWELRY, prices.jewelry),
            (wanted.extensions, EXTENSIONS, prices.extensions),
            (wanted.saree_draping, SAREE_DRAPING, prices.saree_draping),
            (wanted.hijab_setting, HIJAB_SETTING, prices.hijab_setting),
        ] {
            if requested {
                quote.add(label, price);
            }
        }
    }

    fn price_party(&self, selection: &BookingSelection, quote: &mut QuoteBuilder) {
        if !selection.has_party_members {
            return;
        }

        let prices = &self.tariff.party;
        let party = &selection.party;
        for service in SERVICE_TYPES {
            let count = match service {
                ServiceType::BothHairMakeup => party.both,
                ServiceType::MakeupOnly => party.makeup_only,
                ServiceType::HairOnly => party.hair_only,
            };
            quote.add_party(service, prices.price(service), count);
        }

        let add_ons = &self.tariff.party_add_ons;
        quote.add_party(DUPATTA, add_ons.dupatta, party.dupatta);
        quote.add_party(EXTENSIONS, add_ons.extensions, party.extensions);
        quote.add_party(SAREE_DRAPING, add_ons.saree_draping, party.saree_draping);
        quote.add_party(HIJAB_SETTING, add_ons.hijab_setting, party.hijab_setting);
        quote.add_party(AIRBRUSH, add_ons.airbrush, party.airbrush);
    }
}

impl Default for PricingService {
    fn default() -> Self {
        Self::new(Tariff::standard())
    }
}

/// `0.13` -> `"13"`, `0.125` -> `"12.5"`.
fn percent(rate: f64) -> String {
    let label = format!("{:.2}", rate * 100.0);
    label
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
