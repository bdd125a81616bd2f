use log::*;

use crate::{db_types::PriceRecord, traits::PriceStore};

/// Maximum number of records per storage request.
pub const CHUNK_SIZE: usize = 1000;

/// Send `records` to the store in order-preserving chunks of [`CHUNK_SIZE`].
///
/// Chunks are transmitted sequentially. A failed chunk is logged with the account and chunk
/// context and the remaining chunks are still attempted; nothing is retried. Returns the number
/// of chunks sent and the number that failed.
pub async fn upload_price_records<S>(store: &S, records: &[PriceRecord], client_id: i64) -> (usize, usize)
where S: PriceStore + ?Sized {
    if records.is_empty() {
        debug!("📦️ No price records to upload. Client id: {client_id}.");
        return (0, 0);
    }
    let total = records.len();
    let parts = total.div_ceil(CHUNK_SIZE);
    let mut sent = 0;
    let mut failed = 0;
    for (index, chunk) in records.chunks(CHUNK_SIZE).enumerate() {
        let part = index + 1;
        match store.save_price_records(chunk).await {
            Ok(()) => {
                sent += 1;
                info!(
                    "📦️ Data part {part} of {parts} was sent ({} records, total: {total}). Client id: {client_id}.",
                    chunk.len()
                );
            },
            Err(e) => {
                failed += 1;
                error!("📦️ Could not send data part {part} of {parts}. {e} Client id: {client_id}.");
            },
        }
    }
    (sent, failed)
}
