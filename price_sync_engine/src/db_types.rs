use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

//--------------------------------------  AccountSelector  -----------------------------------------------------------

/// Selects which seller accounts a sync run targets. Deserializes untagged from the trigger
/// payload: a single integer, a list of integers, or the literal string `"all"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountSelector {
    Single(i64),
    Multiple(Vec<i64>),
    All(AllAccounts),
}

/// The `"all"` keyword accepted by the trigger payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllAccounts {
    #[serde(rename = "all")]
    All,
}

impl AccountSelector {
    pub fn all() -> Self {
        Self::All(AllAccounts::All)
    }
}

impl Display for AccountSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(id) => write!(f, "{id}"),
            Self::Multiple(ids) => {
                let ids = ids.iter().map(|id| id.to_string()).collect::<Vec<String>>().join(", ");
                write!(f, "[{ids}]")
            },
            Self::All(_) => f.write_str("all"),
        }
    }
}

//--------------------------------------  PriceRecord  ---------------------------------------------------------------

/// A normalized price record destined for the storage service's price table.
///
/// The record is a sparse projection: it holds only the fields that were present and meaningful
/// in the raw marketplace item, plus the stamped metadata (`api_id`, `shop_id`, `date`). Absent
/// fields are omitted entirely rather than null-filled, which is why this is a map and not a
/// fixed-width struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceRecord(Map<String, Value>);

impl PriceRecord {
    pub fn new(product_id: Value) -> Self {
        let mut fields = Map::new();
        fields.insert("product_id".to_string(), product_id);
        Self(fields)
    }

    pub fn insert(&mut self, field: &str, value: Value) {
        self.0.insert(field.to_string(), value);
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn product_id(&self) -> Option<&Value> {
        self.get("product_id")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

//--------------------------------------  Sync outcomes  -------------------------------------------------------------

/// How far one account's sync got. Failures never propagate out of a sync task; this status is
/// how they become visible to the orchestrator and the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SyncStatus {
    /// Every page was fetched and every chunk was stored.
    Complete,
    /// Some data made it through, but pagination aborted early or some chunks failed.
    Partial,
    /// Nothing was fetched, or nothing could be stored.
    Failed,
}

impl Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => f.write_str("complete"),
            Self::Partial => f.write_str("partial"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

/// Typed outcome of one account sync task.
#[derive(Debug, Clone, Serialize)]
pub struct AccountSyncReport {
    pub client_id: i64,
    pub items_fetched: usize,
    pub records_projected: usize,
    pub chunks_sent: usize,
    pub chunks_failed: usize,
    pub status: SyncStatus,
}

impl AccountSyncReport {
    /// Report for a task that could not run at all (e.g. it panicked on its worker).
    pub fn failed(client_id: i64) -> Self {
        Self {
            client_id,
            items_fetched: 0,
            records_projected: 0,
            chunks_sent: 0,
            chunks_failed: 0,
            status: SyncStatus::Failed,
        }
    }
}

/// Roll-up of one orchestrator run: the per-account reports and whether the post-run
/// deduplication call succeeded.
#[derive(Debug, Serialize)]
pub struct SyncRunSummary {
    pub reports: Vec<AccountSyncReport>,
    pub dedup_ok: bool,
}

impl SyncRunSummary {
    pub fn completed_count(&self) -> usize {
        self.reports.iter().filter(|r| r.status == SyncStatus::Complete).count()
    }

    pub fn total_records(&self) -> usize {
        self.reports.iter().map(|r| r.records_projected).sum()
    }
}
