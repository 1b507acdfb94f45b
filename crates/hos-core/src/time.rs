//! Duty-time model.
//!
//! # Design
//!
//! Duty time is represented as a whole number of `Minutes`.  Every
//! regulatory limit (8 h, 11 h, 14 h, 70 h, 30 min, 10 h) is an exact
//! multiple of one minute, so limit checks are integer comparisons rather
//! than epsilon tests against floating hours:
//!
//!   hours = minutes / 60
//!
//! Floating hours only appear at the API boundary: caller input
//! (`hours_used`) and reported output (`start_time`, `duration`).

use std::fmt;

/// A span or instant of duty time, in whole minutes.
///
/// Stored as `u32`: the 70-hour cycle is 4,200 minutes and even a
/// multi-week trip stays far below `u32::MAX`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Minutes(pub u32);

impl Minutes {
    pub const ZERO: Minutes = Minutes(0);

    pub const PER_HOUR: u32 = 60;

    /// Whole hours.
    #[inline]
    pub const fn hours(h: u32) -> Minutes {
        Minutes(h * Self::PER_HOUR)
    }

    /// Round floating hours to the nearest minute.
    ///
    /// Negative and non-finite inputs map to `ZERO`; callers validate before
    /// converting.
    pub fn from_hours_f64(hours: f64) -> Minutes {
        if !hours.is_finite() || hours <= 0.0 {
            return Minutes::ZERO;
        }
        let m = (hours * Self::PER_HOUR as f64).round();
        Minutes(m.min(u32::MAX as f64) as u32)
    }

    /// Fractional hours, for reporting.
    #[inline]
    pub fn as_hours(self) -> f64 {
        self.0 as f64 / Self::PER_HOUR as f64
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `self - rhs`, clamped at zero.
    #[inline]
    pub fn saturating_sub(self, rhs: Minutes) -> Minutes {
        Minutes(self.0.saturating_sub(rhs.0))
    }
}

impl std::ops::Add for Minutes {
    type Output = Minutes;
    #[inline]
    fn add(self, rhs: Minutes) -> Minutes {
        Minutes(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Minutes {
    #[inline]
    fn add_assign(&mut self, rhs: Minutes) {
        self.0 += rhs.0;
    }
}

impl std::ops::Sub for Minutes {
    type Output = Minutes;

    /// # Panics
    /// Panics in debug mode if `rhs > self`; use `saturating_sub` when the
    /// order is not guaranteed.
    #[inline]
    fn sub(self, rhs: Minutes) -> Minutes {
        Minutes(self.0 - rhs.0)
    }
}

impl std::iter::Sum for Minutes {
    fn sum<I: Iterator<Item = Minutes>>(iter: I) -> Minutes {
        iter.fold(Minutes::ZERO, |acc, m| acc + m)
    }
}

/// Renders as `H:MM`, e.g. `13:05`.  Hours are not wrapped at 24.
impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.0 / Self::PER_HOUR, self.0 % Self::PER_HOUR)
    }
}
