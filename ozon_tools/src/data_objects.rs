use std::fmt::{self, Display};

use ops_common::Secret;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::OzonApiError;

/// Credentials for one seller account. The client id doubles as the account identifier throughout
/// the system, and the API key is never logged in the clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OzonCredential {
    pub client_id: i64,
    pub api_key: Secret<String>,
}

impl OzonCredential {
    pub fn new(client_id: i64, api_key: impl Into<String>) -> Self {
        Self { client_id, api_key: Secret::new(api_key.into()) }
    }
}

/// Response envelope for `POST /v4/product/info/prices`.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceInfoResponse {
    pub result: PricePage,
}

/// One page of raw price items. Items are kept as opaque JSON objects; the projection into the
/// storage schema happens downstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricePage {
    #[serde(default)]
    pub last_id: String,
    #[serde(default)]
    pub items: Vec<Value>,
}

impl PricePage {
    /// An empty cursor or an empty item list signals the end of pagination.
    pub fn is_final(&self) -> bool {
        self.items.is_empty() || self.last_id.is_empty()
    }
}

/// The outcome of walking every page of price data for one account. Pagination failures abort the
/// walk but keep the pages fetched so far, so `items` may be a partial result.
#[derive(Debug, Default)]
pub struct FetchedPrices {
    pub items: Vec<Value>,
    pub failure: Option<OzonApiError>,
}

impl FetchedPrices {
    pub fn is_partial(&self) -> bool {
        self.failure.is_some()
    }
}

/// Error body returned by the seller API on non-success responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OzonErrorBody {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Vec<Value>,
}

impl Display for OzonErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code {}: {}", self.code, self.message)
    }
}
