//! Wall-clock helpers.

use chrono::{Local, NaiveDateTime};

/// Current local wall-clock time without a timezone, the form submissions
/// are stamped with.
pub fn now_naive() -> NaiveDateTime {
    Local::now().naive_local()
}
