//! Trait seams for the pipeline's external collaborators: the account directory, the marketplace
//! price source, and the downstream price store. Each has exactly one shipped implementation, but
//! the orchestrator only ever sees the traits, which keeps the pipeline testable with doubles.

use async_trait::async_trait;
use ozon_tools::{FetchedPrices, OzonCredential};
use thiserror::Error;

use crate::db_types::{AccountSelector, PriceRecord};

#[derive(Debug, Error)]
pub enum AccountDirectoryError {
    #[error("Could not read the accounts file. {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse the accounts file. {0}")]
    Format(String),
}

#[derive(Debug, Error)]
pub enum PriceStoreError {
    #[error("Could not initialize storage client: {0}")]
    Initialization(String),
    #[error("Invalid storage request: {0}")]
    RequestError(String),
    #[error("Storage query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
}

/// Resolves an account selector to the credentials of the matching seller accounts.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn resolve(&self, selector: &AccountSelector) -> Result<Vec<OzonCredential>, AccountDirectoryError>;
}

/// Produces the full raw price data set for one account. Implementations absorb their own
/// failures: the outcome carries a partial item list and the error that cut it short, never a
/// bare `Err`.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_prices(&self, credential: &OzonCredential) -> FetchedPrices;
}

/// Write side of the downstream storage service.
#[async_trait]
pub trait PriceStore: Send + Sync {
    /// Persist one chunk of price records.
    async fn save_price_records(&self, records: &[PriceRecord]) -> Result<(), PriceStoreError>;

    /// Collapse duplicate rows accumulated in the price table.
    async fn delete_duplicate_prices(&self) -> Result<(), PriceStoreError>;
}
