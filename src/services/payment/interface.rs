use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Deposit charge for one booking, already rounded to cents.
#[derive(Debug, Clone, PartialEq)]
pub struct DepositRequest {
    pub booking_id: String,
    pub reference: Uuid,
    pub amount_cents: i64,
    pub description: String,
}

impl DepositRequest {
    pub fn metadata(&self) -> HashMap<String, String> {
        HashMap::from([
            ("booking_id".to_string(), self.booking_id.clone()),
            ("quote_reference".to_string(), self.reference.to_string()),
        ])
    }
}

/// Provider-side handle the payment page confirms against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepositIntent {
    pub id: String,
    pub client_secret: Option<String>,
    pub amount_cents: i64,
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("deposit amount must be positive, got {0} cents")]
    InvalidAmount(i64),
    #[error("payment provider error: {0}")]
    Provider(String),
}

pub trait PaymentGateway {
    async fn create_deposit_intent(
        &self,
        request: &DepositRequest,
    ) -> Result<DepositIntent, PaymentError>;
}
