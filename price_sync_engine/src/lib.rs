//! Price Sync Engine
//!
//! Core pipeline for synchronizing seller-account price data from the Ozon Seller API into the
//! downstream storage service. The engine is transport-agnostic at its seams: the account
//! directory, the marketplace price source and the price store are all traits ([`mod@traits`]),
//! so the pipeline can be exercised in isolation and wired to different backends.
//!
//! The pipeline for one run is: resolve the account selector to credentials, fan one sync task
//! out per account onto the tokio worker pool, join all tasks, then trigger one deduplication
//! pass on the store. Failures inside a task are absorbed and surfaced as a typed
//! [`db_types::AccountSyncReport`] rather than propagated; the only failure path of a run is
//! account directory resolution.

pub mod db_types;
pub mod helpers;
pub mod projector;
pub mod traits;

mod directory;
mod feed;
mod store;
mod sync;

#[cfg(test)]
pub mod test_utils;

pub use directory::{AccountEntry, AccountsFile, TomlAccountDirectory};
pub use feed::OzonFeed;
pub use store::{RestPriceStore, DELETE_DUPLICATES_PATH, PRICE_TABLE_PATH};
pub use sync::{sync_account, upload_price_records, PriceSyncApi, CHUNK_SIZE};
