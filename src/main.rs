use std::env;
use std::io;

use env_logger::Env;
use log::{info, warn};
use serde_json::json;

use glam_booking_api::config::AppConfig;
use glam_booking_api::models::selection::{ArtistTier, BookingForm, BookingSelection};
use glam_booking_api::services::package_service::PackageService;
use glam_booking_api::services::pricing_service::PricingService;
use glam_booking_api::services::selection_validation::validate_selection;

/// Reads a booking form as JSON on stdin.
///
/// With no arguments prints the Lead and Team packages. With
/// `<booking-id> [lead|team]` it saves the quote on that booking and opens
/// the deposit charge instead.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env();
    let tariff = config.load_tariff()?;
    info!("Pricing with tariff {}", tariff.version);

    // `null` is a valid form: it prices as two empty packages
    let form: Option<BookingForm> = serde_json::from_reader(io::stdin().lock())?;
    if let Some(form) = &form {
        for warning in validate_selection(form) {
            warn!("{}", warning);
        }
    }

    let selection = form.as_ref().map(BookingSelection::from);
    let pricing = PricingService::new(tariff);

    let mut args = env::args().skip(1);
    let Some(booking_id) = args.next() else {
        let packages = PackageService::derive_packages(&pricing, selection.as_ref());
        println!("{}", serde_json::to_string_pretty(&packages)?);
        return Ok(());
    };
    let tier = match args.next() {
        Some(raw) => raw.parse::<ArtistTier>()?,
        None => ArtistTier::default(),
    };

    let checkout = config.checkout_service(pricing).await?;
    let deposit = checkout
        .start_deposit(&booking_id, selection.as_ref(), tier)
        .await?;

    let output = json!({
        "bookingId": booking_id,
        "artistTier": tier.to_string(),
        "lineItems": deposit.result.line_items,
        "depositCents": deposit.snapshot.deposit_cents,
        "paymentIntentId": deposit.intent.id,
        "clientSecret": deposit.intent.client_secret,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
