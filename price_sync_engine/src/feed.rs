use async_trait::async_trait;
use log::*;
use ozon_tools::{FetchedPrices, OzonApi, OzonConfig, OzonCredential};

use crate::traits::PriceSource;

/// [`PriceSource`] backed by the live Ozon Seller API. A fresh client is built per account since
/// the credentials live in the request headers.
#[derive(Debug, Clone)]
pub struct OzonFeed {
    config: OzonConfig,
}

impl OzonFeed {
    pub fn new(config: OzonConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl PriceSource for OzonFeed {
    async fn fetch_prices(&self, credential: &OzonCredential) -> FetchedPrices {
        match OzonApi::new(credential, self.config.clone()) {
            Ok(api) => api.fetch_all_prices().await,
            Err(e) => {
                error!("🛒️ Could not initialize the seller API client. {e} Client id: {}.", credential.client_id);
                FetchedPrices { items: vec![], failure: Some(e) }
            },
        }
    }
}
