//! Types related to simulation time keeping.
//!
//! The simulation is driven entirely by the integer tick timestamps found in
//! the input; there is no wall-clock involved anywhere in the core.

use std::ops::{Add, AddAssign, Sub, SubAssign};

macro_rules! time_unit {
    ($name: ident) => {
        #[allow(missing_docs)]
        #[derive(
            Debug,
            Default,
            Copy,
            Clone,
            PartialOrd,
            Ord,
            PartialEq,
            Eq,
            Hash,
            derive_more::Add,
            derive_more::Display,
            derive_more::FromStr,
        )]
        pub struct $name(u64);

        impl $name {
            /// Equivalent to Self::new(0).
            pub const ZERO: $name = Self::new(0);
            /// Equivalent to Self::new(1).
            pub const ONE: $name = Self::new(1);
            /// Equivalent to Self::new(u64::MAX).
            pub const MAX: $name = Self::new(u64::MAX);

            /// Create a new time value.
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Convert the value into a `u64`.
            pub const fn into_u64(self) -> u64 {
                self.0
            }

            /// Convert the value into an `f64`.
            pub const fn into_f64(self) -> f64 {
                self.0 as f64
            }
        }
    };
}

time_unit!(Time);

impl Time {
    /// Convert the time into a delta.
    pub const fn into_delta(self) -> Delta {
        Delta::new(self.0)
    }

    /// Subtracts `rhs` from `self`, saturating at `Delta::ZERO`.
    pub const fn saturating_sub(self, rhs: Self) -> Delta {
        Delta::new(self.0.saturating_sub(rhs.0))
    }
}

impl From<u64> for Time {
    fn from(val: u64) -> Self {
        Self(val)
    }
}

time_unit!(Delta);

impl Delta {
    /// Convert the delta into a time.
    pub const fn into_time(self) -> Time {
        Time::new(self.0)
    }
}

impl Add<Delta> for Time {
    type Output = Time;

    fn add(self, rhs: Delta) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub<Delta> for Time {
    type Output = Time;

    fn sub(self, rhs: Delta) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub<Time> for Time {
    type Output = Delta;

    fn sub(self, rhs: Time) -> Self::Output {
        Delta::new(self.0 - rhs.0)
    }
}

impl AddAssign<Delta> for Time {
    fn add_assign(&mut self, rhs: Delta) {
        *self = Self(self.0 + rhs.0)
    }
}

impl SubAssign<Delta> for Time {
    fn sub_assign(&mut self, rhs: Delta) {
        *self = Self(self.0 - rhs.0)
    }
}
