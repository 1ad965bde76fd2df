//! Next-watering computation for saved plants.

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::error::{Error, Result};
use crate::models::{Frequency, RepeatEvery};

impl Frequency {
    /// Days between two waterings.
    ///
    /// Weekly frequencies spread `times` waterings over seven days, truncating
    /// and never going below one day.
    pub fn interval_days(&self) -> Result<i64> {
        if self.times == 0 {
            return Err(Error::InvalidInput(
                "watering frequency must be at least once per period".to_string(),
            ));
        }

        Ok(match self.repeat_every {
            RepeatEvery::Week => (7 / i64::from(self.times)).max(1),
            RepeatEvery::Day => 1,
        })
    }
}

/// Compute the next notification time for a plant.
///
/// `reminder_at` carries the time of day the user picked. Weekly plants are
/// scheduled `interval_days` after today at that time; daily plants one day
/// after `reminder_at`.
pub fn next_watering(
    frequency: &Frequency,
    reminder_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>> {
    let interval = Duration::days(frequency.interval_days()?);

    let next = match frequency.repeat_every {
        RepeatEvery::Week => (now.date_naive() + interval)
            .and_time(reminder_at.time())
            .and_utc(),
        RepeatEvery::Day => reminder_at + interval,
    };

    tracing::debug!(%next, ?frequency, "Computed next watering");
    Ok(next)
}

/// Today's date at the given time of day.
pub fn today_at(time: NaiveTime, now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(time).and_utc()
}
