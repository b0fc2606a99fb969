//! Conversion between wall-clock times of day and the simulator time base.
//!
//! Internally every timestamp is [`Minutes`] elapsed since the dispatch
//! origin. Callers that think in times of day (reports, the CLI) convert at
//! the boundary through a [`DispatchClock`], which holds the one offset
//! separating the two bases.

use chrono::{NaiveTime, Timelike};

use crate::Minutes;

const SECONDS_PER_DAY: i64 = 86_400;

/// Maps times of day onto elapsed dispatch minutes and back.
///
/// # Examples
/// ```
/// use chrono::NaiveTime;
/// use courier_core::{DispatchClock, Minutes};
///
/// let clock = DispatchClock::default();
/// let ten_twenty = NaiveTime::from_hms_opt(10, 20, 0).expect("valid time");
/// assert_eq!(clock.elapsed_at(ten_twenty), Minutes::new(140.0));
/// assert_eq!(clock.time_of_day(Minutes::new(140.0)), ten_twenty);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchClock {
    origin: NaiveTime,
}

impl DispatchClock {
    /// Build a clock whose minute zero is `origin`.
    #[must_use]
    pub const fn new(origin: NaiveTime) -> Self {
        Self { origin }
    }

    /// Time of day at which elapsed minute zero falls.
    #[must_use]
    pub const fn origin(&self) -> NaiveTime {
        self.origin
    }

    /// Elapsed minutes at `time` on the dispatch day.
    ///
    /// Times before the origin produce negative values.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "second counts within one day are exactly representable as f64"
    )]
    pub fn elapsed_at(&self, time: NaiveTime) -> Minutes {
        let seconds = time.signed_duration_since(self.origin).num_seconds();
        Minutes::new(seconds as f64 / 60.0)
    }

    /// Time of day corresponding to `elapsed`, rounded to the nearest second.
    ///
    /// Results wrap around midnight.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::float_arithmetic,
        reason = "elapsed minutes are rounded to whole seconds; `as` saturates out-of-range values"
    )]
    pub fn time_of_day(&self, elapsed: Minutes) -> NaiveTime {
        let offset = (elapsed.value() * 60.0).round() as i64;
        let origin = i64::from(self.origin.num_seconds_from_midnight());
        let seconds = origin
            .saturating_add(offset.rem_euclid(SECONDS_PER_DAY))
            .rem_euclid(SECONDS_PER_DAY);
        u32::try_from(seconds)
            .ok()
            .and_then(|secs| NaiveTime::from_num_seconds_from_midnight_opt(secs, 0))
            .unwrap_or(NaiveTime::MIN)
    }
}

impl Default for DispatchClock {
    /// Fleet dispatch at 08:00.
    fn default() -> Self {
        Self::new(NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN))
    }
}
