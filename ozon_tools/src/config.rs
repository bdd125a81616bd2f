use log::*;

pub const DEFAULT_OZON_API_URL: &str = "https://api-seller.ozon.ru";

#[derive(Debug, Clone)]
pub struct OzonConfig {
    /// Base url of the Ozon Seller API. Paths like `/v4/product/info/prices` are appended to this.
    pub api_url: String,
}

impl Default for OzonConfig {
    fn default() -> Self {
        Self { api_url: DEFAULT_OZON_API_URL.to_string() }
    }
}

impl OzonConfig {
    pub fn new_from_env_or_default() -> Self {
        let api_url = std::env::var("OPS_OZON_API_URL").unwrap_or_else(|_| {
            info!("🪛️ OPS_OZON_API_URL not set, using {DEFAULT_OZON_API_URL} as default");
            DEFAULT_OZON_API_URL.to_string()
        });
        Self { api_url }
    }
}
