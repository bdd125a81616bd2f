use std::sync::Arc;

use log::*;

use crate::{
    db_types::{AccountSelector, AccountSyncReport, SyncRunSummary},
    helpers,
    sync::task::sync_account,
    traits::{AccountDirectory, AccountDirectoryError, PriceSource, PriceStore},
};

/// Orchestrates one price sync run across a set of seller accounts.
///
/// The collaborators sit behind trait seams so the orchestration can be tested with doubles.
/// One tokio task is spawned per resolved account onto the runtime's worker pool; all tasks are
/// joined before the deduplication pass runs, and that pass runs exactly once per run no matter
/// how many accounts failed.
pub struct PriceSyncApi<D, P, S> {
    directory: Arc<D>,
    source: Arc<P>,
    store: Arc<S>,
    shop_id: i64,
}

impl<D, P, S> Clone for PriceSyncApi<D, P, S> {
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
            source: Arc::clone(&self.source),
            store: Arc::clone(&self.store),
            shop_id: self.shop_id,
        }
    }
}

impl<D, P, S> PriceSyncApi<D, P, S>
where
    D: AccountDirectory + 'static,
    P: PriceSource + 'static,
    S: PriceStore + 'static,
{
    pub fn new(directory: D, source: P, store: S, shop_id: i64) -> Self {
        Self { directory: Arc::new(directory), source: Arc::new(source), store: Arc::new(store), shop_id }
    }

    /// Run one sync for the accounts matched by `selector`.
    ///
    /// Account directory resolution is the only failure path. Every other failure is absorbed
    /// inside its account task and shows up in the summary instead.
    pub async fn run(&self, selector: &AccountSelector) -> Result<SyncRunSummary, AccountDirectoryError> {
        let credentials = self.directory.resolve(selector).await?;
        info!("💱️ Start parsing data for clients: {selector}. {} account(s) resolved.", credentials.len());
        let date = helpers::sync_date();
        let mut handles = Vec::with_capacity(credentials.len());
        for credential in credentials {
            let source = Arc::clone(&self.source);
            let store = Arc::clone(&self.store);
            let shop_id = self.shop_id;
            let client_id = credential.client_id;
            let handle =
                tokio::spawn(
                    async move { sync_account(source.as_ref(), store.as_ref(), &credential, shop_id, date).await },
                );
            handles.push((client_id, handle));
        }
        // Join barrier. Deduplication must not start before every task has finished, and a
        // panicked task must not take the run down with it.
        let mut reports = Vec::with_capacity(handles.len());
        for (client_id, handle) in handles {
            match handle.await {
                Ok(report) => reports.push(report),
                Err(e) => {
                    error!("💱️ The sync task for client {client_id} did not run to completion. {e}");
                    reports.push(AccountSyncReport::failed(client_id));
                },
            }
        }
        info!("💱️ End of parsing");
        let dedup_ok = self.delete_duplicates().await;
        let summary = SyncRunSummary { reports, dedup_ok };
        info!(
            "💱️ Price sync run finished. {} of {} account(s) complete, {} record(s) projected.",
            summary.completed_count(),
            summary.reports.len(),
            summary.total_records()
        );
        Ok(summary)
    }

    async fn delete_duplicates(&self) -> bool {
        match self.store.delete_duplicate_prices().await {
            Ok(()) => {
                info!("🧹️ Duplicates were deleted from the price table");
                true
            },
            Err(e) => {
                error!("🧹️ Could not delete duplicates from the price table. {e}");
                false
            },
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use ozon_tools::{FetchedPrices, OzonApiError, OzonCredential};
    use serde_json::{json, Value};

    use super::*;
    use crate::{
        db_types::SyncStatus,
        test_utils::mocks::{MockDirectory, MockSource, MockStore},
        traits::PriceStoreError,
    };

    fn items(n: usize) -> Vec<Value> {
        (0..n).map(|i| json!({"product_id": i, "offer_id": format!("SKU-{i}")})).collect()
    }

    fn stamped_for(records: &[crate::db_types::PriceRecord], client_id: i64) -> bool {
        records.iter().all(|r| r.get("api_id") == Some(&json!(client_id)))
    }

    // Two accounts: the first yields five items (two fetched pages merged by the price source),
    // the second an empty first page. One chunk goes out for the first, nothing for the second,
    // and deduplication runs once after both tasks have joined.
    #[tokio::test]
    async fn records_are_uploaded_per_account_and_dedup_runs_once() {
        let _ = env_logger::try_init().ok();
        let selector = AccountSelector::Multiple(vec![1, 2]);
        let mut directory = MockDirectory::new();
        directory
            .expect_resolve()
            .withf(move |s| *s == AccountSelector::Multiple(vec![1, 2]))
            .times(1)
            .returning(|_| Ok(vec![OzonCredential::new(1, "key-one"), OzonCredential::new(2, "key-two")]));
        let mut source = MockSource::new();
        source.expect_fetch_prices().times(2).returning(|credential| {
            if credential.client_id == 1 {
                FetchedPrices { items: items(5), failure: None }
            } else {
                FetchedPrices::default()
            }
        });
        let uploads = Arc::new(AtomicUsize::new(0));
        let mut store = MockStore::new();
        let upload_counter = uploads.clone();
        store
            .expect_save_price_records()
            .withf(|records| records.len() == 5 && stamped_for(records, 1))
            .times(1)
            .returning(move |_| {
                upload_counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
        let uploads_at_dedup = uploads.clone();
        store.expect_delete_duplicate_prices().times(1).returning(move || {
            // The barrier guarantees all uploads happened before the dedup pass.
            assert_eq!(uploads_at_dedup.load(Ordering::SeqCst), 1);
            Ok(())
        });

        let api = PriceSyncApi::new(directory, source, store, 1);
        let summary = api.run(&selector).await.unwrap();
        assert!(summary.dedup_ok);
        assert_eq!(summary.reports.len(), 2);
        let first = summary.reports.iter().find(|r| r.client_id == 1).unwrap();
        assert_eq!(first.records_projected, 5);
        assert_eq!(first.chunks_sent, 1);
        assert_eq!(first.status, SyncStatus::Complete);
        let second = summary.reports.iter().find(|r| r.client_id == 2).unwrap();
        assert_eq!(second.records_projected, 0);
        assert_eq!(second.chunks_sent, 0);
        assert_eq!(second.status, SyncStatus::Complete);
    }

    // Three accounts resolved from "all"; the second fails its first page with a non-success
    // status. The other two still upload and deduplication still runs exactly once.
    #[tokio::test]
    async fn one_failing_account_does_not_disturb_the_others() {
        let _ = env_logger::try_init().ok();
        let mut directory = MockDirectory::new();
        directory.expect_resolve().times(1).returning(|_| {
            Ok(vec![
                OzonCredential::new(1, "key-one"),
                OzonCredential::new(2, "key-two"),
                OzonCredential::new(3, "key-three"),
            ])
        });
        let mut source = MockSource::new();
        source.expect_fetch_prices().times(3).returning(|credential| match credential.client_id {
            2 => FetchedPrices {
                items: vec![],
                failure: Some(OzonApiError::QueryError { status: 403, message: "forbidden".to_string() }),
            },
            1 => FetchedPrices { items: items(4), failure: None },
            _ => FetchedPrices { items: items(2), failure: None },
        });
        let mut store = MockStore::new();
        store
            .expect_save_price_records()
            .withf(|records| records.len() == 4 && stamped_for(records, 1))
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_save_price_records()
            .withf(|records| records.len() == 2 && stamped_for(records, 3))
            .times(1)
            .returning(|_| Ok(()));
        store.expect_delete_duplicate_prices().times(1).returning(|| Ok(()));

        let api = PriceSyncApi::new(directory, source, store, 1);
        let summary = api.run(&AccountSelector::all()).await.unwrap();
        assert!(summary.dedup_ok);
        let failed = summary.reports.iter().find(|r| r.client_id == 2).unwrap();
        assert_eq!(failed.status, SyncStatus::Failed);
        assert_eq!(failed.records_projected, 0);
        assert_eq!(summary.completed_count(), 2);
    }

    // A failed dedup pass is logged but does not fail the run.
    #[tokio::test]
    async fn a_failed_dedup_pass_is_not_fatal() {
        let _ = env_logger::try_init().ok();
        let mut directory = MockDirectory::new();
        directory.expect_resolve().times(1).returning(|_| Ok(vec![OzonCredential::new(1, "key-one")]));
        let mut source = MockSource::new();
        source.expect_fetch_prices().times(1).returning(|_| FetchedPrices { items: items(1), failure: None });
        let mut store = MockStore::new();
        store.expect_save_price_records().times(1).returning(|_| Ok(()));
        store
            .expect_delete_duplicate_prices()
            .times(1)
            .returning(|| Err(PriceStoreError::QueryError { status: 500, message: "boom".to_string() }));

        let api = PriceSyncApi::new(directory, source, store, 1);
        let summary = api.run(&AccountSelector::Single(1)).await.unwrap();
        assert!(!summary.dedup_ok);
        assert_eq!(summary.completed_count(), 1);
    }

    // Directory resolution is the orchestrator's only failure path.
    #[tokio::test]
    async fn a_directory_error_fails_the_run_before_any_task_starts() {
        let mut directory = MockDirectory::new();
        directory
            .expect_resolve()
            .times(1)
            .returning(|_| Err(crate::traits::AccountDirectoryError::Format("bad file".to_string())));
        let mut source = MockSource::new();
        source.expect_fetch_prices().times(0);
        let mut store = MockStore::new();
        store.expect_save_price_records().times(0);
        store.expect_delete_duplicate_prices().times(0);

        let api = PriceSyncApi::new(directory, source, store, 1);
        assert!(api.run(&AccountSelector::all()).await.is_err());
    }

    // An empty resolution still counts as a run: no tasks, but the dedup pass fires.
    #[tokio::test]
    async fn an_empty_account_set_still_triggers_dedup() {
        let mut directory = MockDirectory::new();
        directory.expect_resolve().times(1).returning(|_| Ok(vec![]));
        let source = MockSource::new();
        let mut store = MockStore::new();
        store.expect_delete_duplicate_prices().times(1).returning(|| Ok(()));

        let api = PriceSyncApi::new(directory, source, store, 1);
        let summary = api.run(&AccountSelector::Single(9)).await.unwrap();
        assert!(summary.reports.is_empty());
        assert!(summary.dedup_ok);
    }
}
