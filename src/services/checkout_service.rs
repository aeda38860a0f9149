use chrono::Utc;
use log::info;
use thiserror::Error;
use uuid::Uuid;

use crate::db::booking_store::{BookingStore, StoreError};
use crate::models::bookings::PricingSnapshot;
use crate::models::quote::PriceResult;
use crate::models::selection::{ArtistTier, BookingSelection};
use crate::services::payment::interface::{
    DepositIntent, DepositRequest, PaymentError, PaymentGateway,
};
use crate::services::pricing_service::PricingService;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("booking has no service selection to price")]
    MissingSelection,
    #[error("quoted deposit rounds to zero, nothing to charge")]
    NothingToCharge,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Payment(#[from] PaymentError),
}

#[derive(Debug, Clone)]
pub struct DepositCheckout {
    pub result: PriceResult,
    pub snapshot: PricingSnapshot,
    pub intent: DepositIntent,
}

/// Payment page flow: price the booking, persist the confirmed amounts, then
/// open a deposit charge for exactly the persisted deposit.
pub struct CheckoutService<S, G> {
    pricing: PricingService,
    store: S,
    gateway: G,
}

impl<S: BookingStore, G: PaymentGateway> CheckoutService<S, G> {
    pub fn new(pricing: PricingService, store: S, gateway: G) -> Self {
        Self {
            pricing,
            store,
            gateway,
        }
    }

    pub async fn start_deposit(
        &self,
        booking_id: &str,
        selection: Option<&BookingSelection>,
        tier: ArtistTier,
    ) -> Result<DepositCheckout, CheckoutError> {
        let result = self
            .pricing
            .calculate_price(selection, tier)
            .ok_or(CheckoutError::MissingSelection)?;

        let snapshot = PricingSnapshot::from_result(
            &result,
            tier,
            &self.pricing.tariff().version,
            Utc::now(),
        );
        if snapshot.deposit_cents <= 0 {
            return Err(CheckoutError::NothingToCharge);
        }

        self.store.save_pricing(booking_id, &snapshot).await?;

        let request = DepositRequest {
            booking_id: booking_id.to_string(),
            reference: Uuid::new_v4(),
            amount_cents: snapshot.deposit_cents,
            description: format!("{} artist booking deposit", tier),
        };
        let intent = self.gateway.create_deposit_intent(&request).await?;

        info!(
            "Opened deposit {} for booking {} ({} cents)",
            intent.id, booking_id, snapshot.deposit_cents
        );

        Ok(DepositCheckout {
            result,
            snapshot,
            intent,
        })
    }
}
