//! Simulation units: packet lengths and flow weights.

use std::ops::{Add, Sub};

/// A packet length in bytes. The link rate is fixed at 1 byte per time
/// tick, so a `Bytes` value also stands in for a transmission duration.
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
    derive_more::Sub,
    derive_more::Display,
)]
pub struct Bytes(u64);

impl Bytes {
    /// Equivalent to `Self::new(0)`.
    pub const ZERO: Bytes = Self::new(0);

    /// Create a new byte count.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Convert the value into a `u64`.
    pub const fn into_u64(self) -> u64 {
        self.0
    }

    /// Convert the value into a `f64`.
    pub const fn into_f64(self) -> f64 {
        self.0 as f64
    }

    /// Convert a byte count directly into the equivalent transmission delta,
    /// given the link services 1 byte per time tick.
    pub const fn into_delta(self) -> crate::time::Delta {
        crate::time::Delta::new(self.0)
    }
}

/// A flow's WFQ weight: a positive real number. Larger weights get a
/// proportionally larger share of the link.
#[derive(Debug, Copy, Clone, PartialEq, derive_more::Display)]
pub struct Weight(f64);

impl Weight {
    /// The default weight assigned to a flow that has never carried an
    /// explicit weight.
    pub const DEFAULT: Weight = Self::new(1.0);

    /// Create a new weight. Callers are expected to only pass positive
    /// values.
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Convert the weight into an `f64`.
    pub const fn into_f64(self) -> f64 {
        self.0
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Add for Weight {
    type Output = Weight;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Weight {
    type Output = Weight;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}
