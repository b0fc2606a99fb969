//! Distance, elapsed-time and speed quantities.
//!
//! All simulator arithmetic happens in these units: [`Miles`] for the
//! odometer and distance matrix, [`Minutes`] for the vehicle clock and
//! [`Speed`] to convert one into the other.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use thiserror::Error;

/// A non-negative road distance in miles.
///
/// # Examples
/// ```
/// use courier_core::Miles;
///
/// let total: Miles = [Miles::new(1.5), Miles::new(2.0)].into_iter().sum();
/// assert_eq!(total, Miles::new(3.5));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Miles(f64);

impl Miles {
    /// Zero distance.
    pub const ZERO: Self = Self(0.0);

    /// Wrap a raw mileage value.
    #[must_use]
    pub const fn new(miles: f64) -> Self {
        Self(miles)
    }

    /// Raw mileage value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "mileage accumulates as floating-point distances"
)]
impl Add for Miles {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Miles {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Miles {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Miles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} mi", self.0)
    }
}

/// Elapsed minutes relative to the dispatch origin.
///
/// This is the single time base used by the simulator and by status queries.
/// Minute zero is the moment the fleet is dispatched (08:00 by default, see
/// [`DispatchClock`](crate::DispatchClock)). Values may be fractional, and may
/// be negative when a caller asks about a time of day before dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Minutes(f64);

impl Minutes {
    /// The dispatch origin.
    pub const ZERO: Self = Self(0.0);

    /// Wrap a raw elapsed-minutes value.
    #[must_use]
    pub const fn new(minutes: f64) -> Self {
        Self(minutes)
    }

    /// Raw elapsed-minutes value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// The later of two instants.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        if other.0 > self.0 { other } else { self }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "the vehicle clock advances by fractional travel times"
)]
impl Add for Minutes {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Minutes {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} min", self.0)
    }
}

/// Error returned when constructing a [`Speed`] from an unusable value.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("average speed must be a positive, finite number of miles per hour (got {mph})")]
pub struct InvalidSpeed {
    /// Rejected value.
    pub mph: f64,
}

/// Average vehicle speed used to turn distances into travel time.
///
/// # Examples
/// ```
/// use courier_core::{Miles, Minutes, Speed};
///
/// let speed = Speed::from_mph(18.0)?;
/// assert_eq!(speed.travel_time(Miles::new(9.0)), Minutes::new(30.0));
/// # Ok::<(), courier_core::InvalidSpeed>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct Speed {
    mph: f64,
}

impl Speed {
    /// Fleet default of 18 miles per hour.
    pub const DEFAULT_MPH: f64 = 18.0;

    /// Validate and construct a speed in miles per hour.
    pub fn from_mph(mph: f64) -> Result<Self, InvalidSpeed> {
        if mph.is_finite() && mph > 0.0 {
            Ok(Self { mph })
        } else {
            Err(InvalidSpeed { mph })
        }
    }

    /// Miles per hour.
    #[must_use]
    pub const fn mph(self) -> f64 {
        self.mph
    }

    /// Minutes needed to cover `distance` at this speed.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "travel time is distance over speed, scaled to minutes"
    )]
    pub fn travel_time(self, distance: Miles) -> Minutes {
        Minutes(distance.value() / self.mph * 60.0)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self {
            mph: Self::DEFAULT_MPH,
        }
    }
}

impl TryFrom<f64> for Speed {
    type Error = InvalidSpeed;

    fn try_from(mph: f64) -> Result<Self, Self::Error> {
        Self::from_mph(mph)
    }
}

impl From<Speed> for f64 {
    fn from(speed: Speed) -> Self {
        speed.mph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0)]
    #[case(-5.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn speed_rejects_unusable_values(#[case] mph: f64) {
        assert!(Speed::from_mph(mph).is_err());
    }

    #[rstest]
    fn default_speed_is_eighteen_mph() {
        let speed = Speed::default();
        assert_eq!(speed.travel_time(Miles::new(18.0)), Minutes::new(60.0));
    }

    #[rstest]
    fn zero_distance_takes_no_time() {
        assert_eq!(Speed::default().travel_time(Miles::ZERO), Minutes::ZERO);
    }

    #[rstest]
    fn minutes_max_picks_later_instant() {
        assert_eq!(Minutes::new(140.0).max(Minutes::ZERO), Minutes::new(140.0));
        assert_eq!(Minutes::ZERO.max(Minutes::new(140.0)), Minutes::new(140.0));
    }
}
