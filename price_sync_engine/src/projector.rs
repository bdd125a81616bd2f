use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::{
    db_types::PriceRecord,
    helpers::format_sync_date,
};

/// Default shop identifier stamped onto every record. Overridable through the server
/// configuration.
pub const DEFAULT_SHOP_ID: i64 = 1;

/// Top-level fields copied from a raw price item.
pub const TOP_LEVEL_FIELDS: [&str; 3] = ["offer_id", "price_index", "volume_weight"];

/// Fields copied from the nested `price` object.
pub const PRICE_FIELDS: [&str; 9] = [
    "price",
    "old_price",
    "premium_price",
    "recommended_price",
    "retail_price",
    "vat",
    "min_ozon_price",
    "marketing_price",
    "marketing_seller_price",
];

/// Fields copied from the nested `commissions` object.
pub const COMMISSION_FIELDS: [&str; 16] = [
    "sales_percent",
    "fbo_fulfillment_amount",
    "fbo_direct_flow_trans_min_amount",
    "fbo_direct_flow_trans_max_amount",
    "fbo_deliv_to_customer_amount",
    "fbo_return_flow_amount",
    "fbo_return_flow_trans_min_amount",
    "fbo_return_flow_trans_max_amount",
    "fbs_first_mile_min_amount",
    "fbs_first_mile_max_amount",
    "fbs_direct_flow_trans_min_amount",
    "fbs_direct_flow_trans_max_amount",
    "fbs_deliv_to_customer_amount",
    "fbs_return_flow_amount",
    "fbs_return_flow_trans_min_amount",
    "fbs_return_flow_trans_max_amount",
];

/// Project one raw marketplace item into a normalized price record.
///
/// Returns `None` for items without a `product_id` — those are filtered, not errors. Each
/// whitelisted field is copied independently when its value is non-null and, for strings,
/// non-empty; everything else is left out of the record entirely. The account id, shop id and
/// sync date are stamped onto every emitted record.
///
/// The projection is pure: applying it twice to the same item and stamp values yields
/// value-equal records.
pub fn project_price_item(item: &Value, client_id: i64, shop_id: i64, date: NaiveDate) -> Option<PriceRecord> {
    let product_id = item.get("product_id").filter(|v| !v.is_null())?;
    let mut record = PriceRecord::new(product_id.clone());
    copy_fields(item, &TOP_LEVEL_FIELDS, &mut record);
    if let Some(prices) = item.get("price").filter(|v| v.is_object()) {
        copy_fields(prices, &PRICE_FIELDS, &mut record);
    }
    if let Some(commissions) = item.get("commissions").filter(|v| v.is_object()) {
        copy_fields(commissions, &COMMISSION_FIELDS, &mut record);
    }
    record.insert("api_id", json!(client_id));
    record.insert("shop_id", json!(shop_id));
    record.insert("date", json!(format_sync_date(date)));
    Some(record)
}

fn copy_fields(source: &Value, fields: &[&str], record: &mut PriceRecord) {
    for name in fields {
        if let Some(value) = source.get(name) {
            if include_value(value) {
                record.insert(name, value.clone());
            }
        }
    }
}

/// The inclusion rule: nulls are dropped, empty strings are dropped, everything else is kept.
/// Falsy-but-present values such as `0` or `false` stay in.
fn include_value(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
