//! Reduction of raw 3-hour forecast slots into per-day summaries.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone};
use tracing::warn;

use crate::model::{DailyForecast, ForecastEntry};

/// Upper bound on the number of days produced by [`aggregate`].
pub const MAX_FORECAST_DAYS: usize = 5;

#[derive(Debug)]
struct DayBucket {
    high_c: f64,
    low_c: f64,
    condition_main: String,
    condition_description: String,
}

impl DayBucket {
    fn new(entry: &ForecastEntry) -> Self {
        Self {
            high_c: entry.temperature_c,
            low_c: entry.temperature_c,
            condition_main: entry.condition_main.clone(),
            condition_description: entry.condition_description.clone(),
        }
    }

    // The condition stays with whichever entry opened the bucket.
    fn add(&mut self, entry: &ForecastEntry) {
        self.high_c = self.high_c.max(entry.temperature_c);
        self.low_c = self.low_c.min(entry.temperature_c);
    }

    fn into_daily(self, date: NaiveDate) -> DailyForecast {
        DailyForecast {
            date,
            high_c: self.high_c,
            low_c: self.low_c,
            condition_main: self.condition_main,
            condition_description: self.condition_description,
        }
    }
}

/// Group forecast slots by calendar day and summarise each day.
///
/// The time zone of `now` is the calendar context: both today and each
/// entry's day are computed in it. Entries on today or earlier are dropped,
/// so the first summary is always tomorrow at the earliest. Within a day the
/// high and low are the max and min temperature, and the condition is taken
/// from the first entry of that day in input order. At most
/// [`MAX_FORECAST_DAYS`] summaries are returned, ascending by date.
pub fn aggregate<Tz: TimeZone>(entries: &[ForecastEntry], now: &DateTime<Tz>) -> Vec<DailyForecast> {
    let tz = now.timezone();
    let today = now.date_naive();

    let mut days: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();

    for entry in entries {
        let Some(instant) = DateTime::from_timestamp(entry.timestamp, 0) else {
            warn!(timestamp = entry.timestamp, "Skipping forecast entry with out-of-range timestamp");
            continue;
        };

        let day = instant.with_timezone(&tz).date_naive();
        if day <= today {
            continue;
        }

        days.entry(day)
            .and_modify(|bucket| bucket.add(entry))
            .or_insert_with(|| DayBucket::new(entry));
    }

    days.into_iter()
        .take(MAX_FORECAST_DAYS)
        .map(|(date, bucket)| bucket.into_daily(date))
        .collect()
}
