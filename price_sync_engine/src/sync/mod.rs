//! The synchronization pipeline: per-chunk upload, the per-account sync task, and the
//! orchestrator that fans tasks out across accounts.

mod orchestrator;
mod task;
mod uploader;

pub use orchestrator::PriceSyncApi;
pub use task::sync_account;
pub use uploader::{upload_price_records, CHUNK_SIZE};
