use std::sync::Arc;

use bson::{doc, oid::ObjectId, Document};
use log::error;
use mongodb::{Client, Collection};
use thiserror::Error;

use crate::db::mongo::{create_mongo_client, BOOKINGS_COLLECTION, BOOKINGS_DATABASE};
use crate::models::bookings::PricingSnapshot;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid booking id: {0:?}")]
    InvalidId(String),
    #[error("booking not found: {0}")]
    NotFound(String),
    #[error("failed to encode pricing: {0}")]
    Encode(#[from] bson::ser::Error),
    #[error(transparent)]
    Database(#[from] mongodb::error::Error),
}

/// Durable owner of confirmed booking prices.
pub trait BookingStore {
    async fn save_pricing(
        &self,
        booking_id: &str,
        snapshot: &PricingSnapshot,
    ) -> Result<(), StoreError>;
}

impl<T: BookingStore> BookingStore for &T {
    async fn save_pricing(
        &self,
        booking_id: &str,
        snapshot: &PricingSnapshot,
    ) -> Result<(), StoreError> {
        (**self).save_pricing(booking_id, snapshot).await
    }
}

pub struct MongoBookingStore {
    client: Arc<Client>,
}

impl MongoBookingStore {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    pub async fn connect(uri: &str) -> Result<Self, StoreError> {
        Ok(Self::new(create_mongo_client(uri).await?))
    }

    fn collection(&self) -> Collection<Document> {
        self.client
            .database(BOOKINGS_DATABASE)
            .collection(BOOKINGS_COLLECTION)
    }
}

impl BookingStore for MongoBookingStore {
    async fn save_pricing(
        &self,
        booking_id: &str,
        snapshot: &PricingSnapshot,
    ) -> Result<(), StoreError> {
        let id = ObjectId::parse_str(booking_id)
            .map_err(|_| StoreError::InvalidId(booking_id.to_string()))?;
        let pricing = bson::to_bson(snapshot)?;

        let update = doc! {
            "$set": {
                "pricing": pricing,
                "updated_at": bson::DateTime::now(),
            }
        };

        let result = self
            .collection()
            .update_one(doc! { "_id": id }, update)
            .await
            .map_err(|e| {
                error!("Failed to save pricing for booking {}: {}", booking_id, e);
                StoreError::Database(e)
            })?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound(booking_id.to_string()));
        }
        Ok(())
    }
}
