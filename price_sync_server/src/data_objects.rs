use std::fmt::Display;

use price_sync_engine::db_types::AccountSelector;
use serde::{Deserialize, Serialize};

/// Body of the price update trigger. `client_id` is an account id, a list of account ids, or the
/// string `"all"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePricesRequest {
    pub client_id: AccountSelector,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}
