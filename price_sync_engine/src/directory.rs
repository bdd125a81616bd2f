use std::{fs, path::PathBuf};

use async_trait::async_trait;
use log::*;
use ozon_tools::OzonCredential;
use serde::{Deserialize, Serialize};

use crate::{
    db_types::AccountSelector,
    traits::{AccountDirectory, AccountDirectoryError},
};

/// One configured seller account.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountEntry {
    pub client_id: i64,
    pub api_key: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// On-disk shape of the accounts file:
///
/// ```toml
/// [[accounts]]
/// client_id = 112233
/// api_key = "..."
/// name = "Main shop"
/// ```
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AccountsFile {
    #[serde(default)]
    pub accounts: Vec<AccountEntry>,
}

/// Account directory backed by a TOML file. The file is re-read on every resolve so account
/// changes take effect without a restart.
#[derive(Debug, Clone)]
pub struct TomlAccountDirectory {
    path: PathBuf,
}

impl TomlAccountDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn read_accounts(&self) -> Result<AccountsFile, AccountDirectoryError> {
        let raw = fs::read_to_string(&self.path)?;
        toml::from_str(&raw).map_err(|e| AccountDirectoryError::Format(e.to_string()))
    }
}

#[async_trait]
impl AccountDirectory for TomlAccountDirectory {
    async fn resolve(&self, selector: &AccountSelector) -> Result<Vec<OzonCredential>, AccountDirectoryError> {
        let accounts = self.read_accounts()?.accounts;
        let selected = match selector {
            AccountSelector::All(_) => accounts,
            AccountSelector::Single(id) => filter_known(accounts, &[*id]),
            AccountSelector::Multiple(ids) => filter_known(accounts, ids),
        };
        Ok(selected.into_iter().map(|entry| OzonCredential::new(entry.client_id, entry.api_key)).collect())
    }
}

fn filter_known(accounts: Vec<AccountEntry>, ids: &[i64]) -> Vec<AccountEntry> {
    for id in ids {
        if !accounts.iter().any(|entry| entry.client_id == *id) {
            warn!("🗂️ No credentials configured for client {id}. Skipping it.");
        }
    }
    accounts.into_iter().filter(|entry| ids.contains(&entry.client_id)).collect()
}
