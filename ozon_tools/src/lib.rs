mod api;
mod config;
mod error;

pub mod data_objects;

pub use api::{OzonApi, PRICES_PATH};
pub use config::OzonConfig;
pub use data_objects::{FetchedPrices, OzonCredential, OzonErrorBody, PriceInfoResponse, PricePage};
pub use error::OzonApiError;
