use chrono::NaiveDate;
use log::*;
use ozon_tools::OzonCredential;

use crate::{
    db_types::{AccountSyncReport, PriceRecord, SyncStatus},
    projector::project_price_item,
    sync::uploader::upload_price_records,
    traits::{PriceSource, PriceStore},
};

/// Run the whole pipeline for one account: fetch every price page, project each raw item,
/// upload the resulting records in chunks.
///
/// The task is self-contained. Pagination and chunk failures are logged where they happen and
/// folded into the returned report; nothing escapes to the caller, so from the orchestrator's
/// point of view every task completes.
pub async fn sync_account<P, S>(
    source: &P,
    store: &S,
    credential: &OzonCredential,
    shop_id: i64,
    date: NaiveDate,
) -> AccountSyncReport
where
    P: PriceSource + ?Sized,
    S: PriceStore + ?Sized,
{
    let client_id = credential.client_id;
    debug!("💱️ Starting price sync for client {client_id}");
    let fetched = source.fetch_prices(credential).await;
    let fetch_failed = fetched.is_partial();
    let items_fetched = fetched.items.len();
    let records: Vec<PriceRecord> =
        fetched.items.iter().filter_map(|item| project_price_item(item, client_id, shop_id, date)).collect();
    let (chunks_sent, chunks_failed) = upload_price_records(store, &records, client_id).await;
    let status = task_status(fetch_failed, items_fetched, chunks_sent, chunks_failed);
    let report = AccountSyncReport {
        client_id,
        items_fetched,
        records_projected: records.len(),
        chunks_sent,
        chunks_failed,
        status,
    };
    info!(
        "💱️ Price sync for client {client_id} finished ({status}): {} items fetched, {} records projected, {} \
         chunk(s) sent, {} failed.",
        report.items_fetched, report.records_projected, report.chunks_sent, report.chunks_failed
    );
    report
}

fn task_status(fetch_failed: bool, items_fetched: usize, chunks_sent: usize, chunks_failed: usize) -> SyncStatus {
    if !fetch_failed && chunks_failed == 0 {
        SyncStatus::Complete
    } else if fetch_failed && items_fetched == 0 {
        SyncStatus::Failed
    } else if chunks_sent == 0 && chunks_failed > 0 {
        SyncStatus::Failed
    } else {
        SyncStatus::Partial
    }
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;
    use ozon_tools::{FetchedPrices, OzonApiError, OzonCredential};
    use serde_json::json;

    use super::{sync_account, task_status};
    use crate::{
        db_types::SyncStatus,
        test_utils::mocks::{MockSource, MockStore},
    };

    // An aborted pagination keeps the pages fetched so far; those items must still be projected
    // and uploaded. The item without a product id is filtered, not counted as a failure.
    #[tokio::test]
    async fn a_partial_fetch_still_uploads_what_arrived() {
        let mut source = MockSource::new();
        source.expect_fetch_prices().times(1).returning(|_| {
            let mut items: Vec<_> = (0..3).map(|i| json!({"product_id": i})).collect();
            items.push(json!({"offer_id": "no-product-id"}));
            FetchedPrices { items, failure: Some(OzonApiError::RequestError("timed out".to_string())) }
        });
        let mut store = MockStore::new();
        store.expect_save_price_records().withf(|records| records.len() == 3).times(1).returning(|_| Ok(()));

        let credential = OzonCredential::new(5, "key-five");
        let date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let report = sync_account(&source, &store, &credential, 1, date).await;
        assert_eq!(report.status, SyncStatus::Partial);
        assert_eq!(report.items_fetched, 4);
        assert_eq!(report.records_projected, 3);
        assert_eq!(report.chunks_sent, 1);
        assert_eq!(report.chunks_failed, 0);
    }

    #[test]
    fn clean_runs_are_complete_even_when_empty() {
        assert_eq!(task_status(false, 0, 0, 0), SyncStatus::Complete);
        assert_eq!(task_status(false, 10, 1, 0), SyncStatus::Complete);
    }

    #[test]
    fn a_first_page_failure_is_a_failed_task() {
        assert_eq!(task_status(true, 0, 0, 0), SyncStatus::Failed);
    }

    #[test]
    fn losing_every_chunk_is_a_failed_task() {
        assert_eq!(task_status(false, 10, 0, 1), SyncStatus::Failed);
    }

    #[test]
    fn anything_in_between_is_partial() {
        assert_eq!(task_status(true, 5, 1, 0), SyncStatus::Partial);
        assert_eq!(task_status(false, 2500, 2, 1), SyncStatus::Partial);
    }
}
