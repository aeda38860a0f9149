use log::{error, info};

use crate::services::payment::interface::{
    DepositIntent, DepositRequest, PaymentError, PaymentGateway,
};

pub struct StripeProvider {
    pub client: stripe::Client,
}

impl StripeProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: stripe::Client::new(api_key.into()),
        }
    }
}

impl PaymentGateway for StripeProvider {
    async fn create_deposit_intent(
        &self,
        request: &DepositRequest,
    ) -> Result<DepositIntent, PaymentError> {
        if request.amount_cents <= 0 {
            return Err(PaymentError::InvalidAmount(request.amount_cents));
        }

        // Deposits are quoted and charged in Canadian dollars
        let mut create_intent =
            stripe::CreatePaymentIntent::new(request.amount_cents, stripe::Currency::CAD);
        create_intent.description = Some(request.description.as_str());
        create_intent.metadata = Some(request.metadata());

        match stripe::PaymentIntent::create(&self.client, create_intent).await {
            Ok(intent) => {
                info!(
                    "Created deposit intent {} for booking {}",
                    intent.id, request.booking_id
                );
                Ok(DepositIntent {
                    id: intent.id.to_string(),
                    client_secret: intent.client_secret,
                    amount_cents: intent.amount,
                })
            }
            Err(e) => {
                error!(
                    "Error creating deposit intent for booking {}: {:?}",
                    request.booking_id, e
                );
                Err(PaymentError::Provider(e.to_string()))
            }
        }
    }
}
