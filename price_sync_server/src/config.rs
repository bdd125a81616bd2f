use std::{env, path::PathBuf};

use log::*;
use ozon_tools::OzonConfig;
use price_sync_engine::projector::DEFAULT_SHOP_ID;

const DEFAULT_OPS_HOST: &str = "127.0.0.1";
const DEFAULT_OPS_PORT: u16 = 8360;
const DEFAULT_ACCOUNTS_FILE: &str = "accounts.toml";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Path to the TOML file listing seller account credentials.
    pub accounts_file: PathBuf,
    /// Base url of the JSON-to-DB storage service the price records are written to.
    pub storage_url: String,
    /// Shop identifier stamped onto every uploaded record.
    pub shop_id: i64,
    /// Seller API configuration shared by every account client.
    pub ozon: OzonConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_OPS_HOST.to_string(),
            port: DEFAULT_OPS_PORT,
            accounts_file: PathBuf::from(DEFAULT_ACCOUNTS_FILE),
            storage_url: String::default(),
            shop_id: DEFAULT_SHOP_ID,
            ozon: OzonConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("OPS_HOST").ok().unwrap_or_else(|| DEFAULT_OPS_HOST.into());
        let port = env::var("OPS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for OPS_PORT. {e} Using the default, {DEFAULT_OPS_PORT}, instead."
                    );
                    DEFAULT_OPS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_OPS_PORT);
        let accounts_file = env::var("OPS_ACCOUNTS_FILE").map(PathBuf::from).ok().unwrap_or_else(|| {
            warn!("🪛️ OPS_ACCOUNTS_FILE is not set. Using {DEFAULT_ACCOUNTS_FILE} in the working directory.");
            PathBuf::from(DEFAULT_ACCOUNTS_FILE)
        });
        let storage_url = env::var("OPS_STORAGE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ OPS_STORAGE_URL is not set. Please set it to the base url of the storage service.");
            String::default()
        });
        let shop_id = env::var("OPS_SHOP_ID")
            .map(|s| {
                s.parse::<i64>().unwrap_or_else(|e| {
                    warn!("🪛️ Invalid configuration value for OPS_SHOP_ID. {e} Using {DEFAULT_SHOP_ID} instead.");
                    DEFAULT_SHOP_ID
                })
            })
            .ok()
            .unwrap_or(DEFAULT_SHOP_ID);
        let ozon = OzonConfig::new_from_env_or_default();
        Self { host, port, accounts_file, storage_url, shop_id, ozon }
    }
}
