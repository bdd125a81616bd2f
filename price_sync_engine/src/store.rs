use std::sync::Arc;

use async_trait::async_trait;
use log::*;
use reqwest::Client;

use crate::{
    db_types::PriceRecord,
    traits::{PriceStore, PriceStoreError},
};

pub const PRICE_TABLE_PATH: &str = "/db/price_table";
pub const DELETE_DUPLICATES_PATH: &str = "/db/price_table/delete_duplicates";

/// [`PriceStore`] backed by the JSON-to-DB storage service. Records are written with one POST per
/// chunk; deduplication is a single bodyless DELETE.
#[derive(Debug, Clone)]
pub struct RestPriceStore {
    base_url: String,
    client: Arc<Client>,
}

impl RestPriceStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self, PriceStoreError> {
        let client = Client::builder().build().map_err(|e| PriceStoreError::Initialization(e.to_string()))?;
        Ok(Self { base_url: base_url.into(), client: Arc::new(client) })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), PriceStoreError> {
        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| PriceStoreError::RequestError(e.to_string()))?;
            Err(PriceStoreError::QueryError { status, message })
        }
    }
}

#[async_trait]
impl PriceStore for RestPriceStore {
    async fn save_price_records(&self, records: &[PriceRecord]) -> Result<(), PriceStoreError> {
        let url = self.url(PRICE_TABLE_PATH);
        trace!("🗄️ Sending {} price records to {url}", records.len());
        let response =
            self.client.post(url).json(records).send().await.map_err(|e| PriceStoreError::RequestError(e.to_string()))?;
        Self::check_status(response).await
    }

    async fn delete_duplicate_prices(&self) -> Result<(), PriceStoreError> {
        let url = self.url(DELETE_DUPLICATES_PATH);
        trace!("🗄️ Requesting duplicate deletion at {url}");
        let response =
            self.client.delete(url).send().await.map_err(|e| PriceStoreError::RequestError(e.to_string()))?;
        Self::check_status(response).await
    }
}
