use chrono::{Local, NaiveDate};

/// Date format used for the `date` stamp on every price record.
pub const SYNC_DATE_FORMAT: &str = "%Y-%m-%d";

/// The calendar date of the running process, in its local time zone. Stamped onto every record
/// produced during one sync run.
pub fn sync_date() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_sync_date(date: NaiveDate) -> String {
    date.format(SYNC_DATE_FORMAT).to_string()
}
