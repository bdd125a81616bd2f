use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

use crate::{
    config::OzonConfig,
    data_objects::{FetchedPrices, OzonCredential, OzonErrorBody, PriceInfoResponse, PricePage},
    OzonApiError,
};

pub const PRICES_PATH: &str = "/v4/product/info/prices";

const PAGE_LIMIT: u32 = 500;
const VISIBILITY_ALL: &str = "ALL";

/// Client for the Ozon Seller API, bound to a single seller account. Authentication happens via
/// the static `Client-Id` and `Api-Key` headers attached to every request.
#[derive(Clone)]
pub struct OzonApi {
    config: OzonConfig,
    client_id: i64,
    client: Arc<Client>,
}

impl OzonApi {
    pub fn new(credential: &OzonCredential, config: OzonConfig) -> Result<Self, OzonApiError> {
        let mut headers = HeaderMap::with_capacity(3);
        let client_id = HeaderValue::from_str(&credential.client_id.to_string())
            .map_err(|e| OzonApiError::Initialization(e.to_string()))?;
        headers.insert("Client-Id", client_id);
        let api_key = HeaderValue::from_str(credential.api_key.reveal().as_str())
            .map_err(|e| OzonApiError::Initialization(e.to_string()))?;
        headers.insert("Api-Key", api_key);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| OzonApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client_id: credential.client_id, client: Arc::new(client) })
    }

    pub fn client_id(&self) -> i64 {
        self.client_id
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_url)
    }

    pub async fn post_query<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T, OzonApiError> {
        let url = self.url(path);
        trace!("🛒️ Sending seller API query: {url}");
        let response =
            self.client.post(url).json(body).send().await.map_err(|e| OzonApiError::RequestError(e.to_string()))?;
        if response.status().is_success() {
            trace!("🛒️ Seller API query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| OzonApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| OzonApiError::RequestError(e.to_string()))?;
            Err(OzonApiError::QueryError { status, message })
        }
    }

    /// Fetch a single page of price data. An empty `last_id` requests the first page.
    pub async fn fetch_price_page(&self, last_id: &str) -> Result<PricePage, OzonApiError> {
        let body = json!({
            "filter": { "visibility": VISIBILITY_ALL },
            "last_id": last_id,
            "limit": PAGE_LIMIT,
        });
        let response = self.post_query::<PriceInfoResponse, Value>(PRICES_PATH, &body).await?;
        let page = response.result;
        debug!("🛒️ Fetched {} price items for client {}. Cursor: {}", page.items.len(), self.client_id, page.last_id);
        Ok(page)
    }

    /// Walk the price pages for this account until the API signals the end of the data set.
    ///
    /// A failed page (transport error, non-success status, or undecodable body) aborts the walk:
    /// the error is logged with the account context and the pages accumulated so far are returned
    /// as a partial result. Failed pages are not retried.
    pub async fn fetch_all_prices(&self) -> FetchedPrices {
        let mut items = vec![];
        let mut last_id = String::new();
        loop {
            match self.fetch_price_page(&last_id).await {
                Ok(page) => {
                    let done = page.is_final();
                    items.extend(page.items);
                    if done {
                        break;
                    }
                    last_id = page.last_id;
                },
                Err(e) => {
                    self.log_pagination_failure(&e);
                    return FetchedPrices { items, failure: Some(e) };
                },
            }
        }
        info!("🛒️ Fetched {} price items in total. Client id: {}.", items.len(), self.client_id);
        FetchedPrices { items, failure: None }
    }

    fn log_pagination_failure(&self, e: &OzonApiError) {
        match e {
            OzonApiError::QueryError { status, message } => match serde_json::from_str::<OzonErrorBody>(message) {
                Ok(body) => {
                    error!("🛒️ Price pagination aborted. Status {status}, {body}. Client id: {}.", self.client_id)
                },
                Err(_) => {
                    error!("🛒️ Price pagination aborted. Status {status}. {message} Client id: {}.", self.client_id)
                },
            },
            e => error!("🛒️ Price pagination aborted. {e} Client id: {}.", self.client_id),
        }
    }
}
