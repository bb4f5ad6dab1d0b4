//! # Appointment Admission
//!
//! Decides whether a proposed service appointment may be booked. Three rules
//! apply, in order:
//!
//! 1. The appointment must start and finish inside the shop's daily operating
//!    window (08:00 to 18:00 shop-local time by default) on a single day.
//! 2. Cancelled appointments never occupy a service bay.
//! 3. No more than [`DEFAULT_CAPACITY`] active appointments may already overlap
//!    the candidate interval.
//!
//! Everything here is pure: callers load the existing appointments and pass
//! them in, see [`crate::booking`] for the transactional workflow.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::{CarportError, CarportResult};
use crate::models::order::OrderStatus;

/// Number of service bays that can work in parallel.
pub const DEFAULT_CAPACITY: usize = 2;

/// Why an appointment was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rejection {
    #[error("Invalid order time or duration, outside of operational hours")]
    OutOfOperatingHours,

    #[error("Exceeded maximum orders for the given time")]
    CapacityExceeded,
}

/// The shop's daily service window, expressed in its local timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatingHours {
    pub timezone: Tz,
    pub open_hour: u32,
    pub close_hour: u32,
}

impl Default for OperatingHours {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Asia::Jakarta,
            open_hour: 8,
            close_hour: 18,
        }
    }
}

impl OperatingHours {
    /// Builds a window from whole opening and closing hours.
    ///
    /// `close_hour` must be later than `open_hour` on the same day.
    pub fn new(timezone: Tz, open_hour: u32, close_hour: u32) -> CarportResult<Self> {
        if open_hour >= close_hour || close_hour > 23 {
            return Err(CarportError::validation(format!(
                "invalid operating hours {:02}:00-{:02}:00",
                open_hour, close_hour
            )));
        }

        Ok(Self {
            timezone,
            open_hour,
            close_hour,
        })
    }

    /// Calendar day of `instant` as seen from the shop.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.timezone).date_naive()
    }

    /// Opening and closing instants of `day`, or `None` when the local time
    /// does not exist or is ambiguous on that date.
    pub fn window(&self, day: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let open = self.at(day, self.open_hour)?;
        let close = self.at(day, self.close_hour)?;
        Some((open, close))
    }

    /// Local midnight of `day` up to local midnight of the next day.
    pub fn day_bounds(&self, day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self
            .timezone
            .from_local_datetime(&day.and_time(NaiveTime::MIN))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| day.and_time(NaiveTime::MIN).and_utc());
        let end = start
            .checked_add_signed(Duration::days(1))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        (start, end)
    }

    /// Whether `[start, start + duration_hours)` fits inside the window of
    /// the day `start` falls on.
    pub fn permits(&self, start: DateTime<Utc>, duration_hours: u32) -> bool {
        let Some((open, close)) = self.window(self.local_date(start)) else {
            return false;
        };
        let Some(end) = end_after(start, duration_hours) else {
            return false;
        };

        start >= open && end <= close
    }

    fn at(&self, day: NaiveDate, hour: u32) -> Option<DateTime<Utc>> {
        let local = day.and_hms_opt(hour, 0, 0)?;
        self.timezone
            .from_local_datetime(&local)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// The scheduling-relevant slice of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub order_time: DateTime<Utc>,
    pub duration: u32,
    pub status: OrderStatus,
}

impl Appointment {
    pub fn end_time(&self) -> DateTime<Utc> {
        end_after(self.order_time, self.duration).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// `start + duration_hours`, or `None` past the representable range.
pub fn end_after(start: DateTime<Utc>, duration_hours: u32) -> Option<DateTime<Utc>> {
    start.checked_add_signed(Duration::hours(i64::from(duration_hours)))
}

/// Half-open interval intersection: `[a_start, a_end)` and `[b_start, b_end)`.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Counts active appointments in `existing` overlapping `[start, end)`,
/// ignoring the appointment with id `exclude`.
pub fn count_overlaps(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    existing: &[Appointment],
    exclude: Option<i64>,
) -> usize {
    existing
        .iter()
        .filter(|appointment| Some(appointment.id) != exclude)
        .filter(|appointment| !matches!(appointment.status, OrderStatus::Canceled))
        .filter(|appointment| overlaps(start, end, appointment.order_time, appointment.end_time()))
        .count()
}

/// Operating hours plus the concurrent-bay cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionPolicy {
    pub hours: OperatingHours,
    pub capacity: usize,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self {
            hours: OperatingHours::default(),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl AdmissionPolicy {
    pub fn new(hours: OperatingHours) -> Self {
        Self {
            hours,
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Admits or rejects `[start, start + duration_hours)` against `existing`.
    pub fn admit(
        &self,
        start: DateTime<Utc>,
        duration_hours: u32,
        existing: &[Appointment],
        exclude: Option<i64>,
    ) -> Result<(), Rejection> {
        let end = match end_after(start, duration_hours) {
            Some(end) if self.hours.permits(start, duration_hours) => end,
            _ => return Err(Rejection::OutOfOperatingHours),
        };
        let overlapping = count_overlaps(start, end, existing, exclude);

        if overlapping >= self.capacity {
            tracing::warn!(
                "Rejecting appointment at {}: {} overlapping orders (capacity {})",
                start,
                overlapping,
                self.capacity
            );
            return Err(Rejection::CapacityExceeded);
        }

        Ok(())
    }
}
