//! The virtual-time clock (C4): GPS virtual time and active weight sum.

use crate::{time::Time, units::Weight};

/// Tracks the real time `t` it was last advanced to, the GPS virtual time
/// `V`, and the sum of weights `W` of currently backlogged flows, and
/// converts real-time intervals into virtual-time intervals.
#[derive(Debug, Clone, Copy)]
pub(crate) struct VirtualClock {
    t: Time,
    v: f64,
    w: f64,
}

impl VirtualClock {
    pub(crate) fn new() -> Self {
        Self {
            t: Time::ZERO,
            v: 0.0,
            w: 0.0,
        }
    }

    pub(crate) fn real_time(&self) -> Time {
        self.t
    }

    pub(crate) fn virtual_time(&self) -> f64 {
        self.v
    }

    /// Advances `t` to `target`, charging the elapsed interval against the
    /// weight sum as it stood *before* this call. A no-op if `target` is not
    /// after the current real time.
    pub(crate) fn advance_to(&mut self, target: Time) {
        if target <= self.t {
            return;
        }
        if self.w > 0.0 {
            self.v += (target - self.t).into_f64() / self.w;
        }
        self.t = target;
    }

    /// Call after `advance_to` has caught `t` up to the event time, when a
    /// previously-idle flow becomes backlogged.
    pub(crate) fn on_flow_backlog_start(&mut self, weight: Weight) {
        self.w += weight.into_f64();
    }

    /// Call after `advance_to`, when a flow's backlog drains to zero.
    pub(crate) fn on_flow_backlog_end(&mut self, weight: Weight) {
        self.w -= weight.into_f64();
    }

    /// Call after `advance_to`, when a backlogged flow's weight changes.
    pub(crate) fn on_flow_weight_change(&mut self, old_weight: Weight, new_weight: Weight) {
        self.w = self.w - old_weight.into_f64() + new_weight.into_f64();
    }
}
