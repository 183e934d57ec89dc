//! Shared fixtures for unit tests.

use crate::task::domain::{
    CurrencyCode, GeoPoint, Money, TaskDraft, TaskDomainError, TaskLocation, TaskType,
};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::{Mutex, PoisonError};

/// Clock that starts at a fixed instant and advances one second per read.
#[derive(Debug)]
pub struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    pub const fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            next: Mutex::new(start),
        }
    }
}

/// Returns a stepping clock whose start carries nanoseconds below the
/// microsecond.
pub fn sub_microsecond_clock() -> SteppingClock {
    let start = Utc
        .timestamp_opt(1_773_478_800, 123_456_789)
        .single()
        .unwrap_or_else(Utc::now);
    SteppingClock::starting_at(start)
}

impl Default for SteppingClock {
    fn default() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 3, 14, 9, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self::starting_at(start)
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().unwrap_or_else(PoisonError::into_inner);
        let current = *next;
        *next = current + Duration::seconds(1);
        current
    }
}

/// Builds a valid draft located at the given coordinates.
pub fn draft_at(title: &str, latitude: f64, longitude: f64) -> Result<TaskDraft, TaskDomainError> {
    let amount = Money::new(4_500, CurrencyCode::new("usd")?)?;
    let location = TaskLocation::new("Lower Manhattan", GeoPoint::new(latitude, longitude)?);
    Ok(TaskDraft::new(TaskType::new("delivery")?, title, amount, location)?
        .with_description("Pick up a parcel and drop it at the front desk")
        .with_must_haves("Bike or car"))
}
