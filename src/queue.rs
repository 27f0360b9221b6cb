//! The ready priority queue (C3).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::{packet::ScheduledPacket, time::Time};

/// Tolerance below which two virtual finish times are treated as equal, so
/// that tie-breaking is deterministic across platforms instead of relying
/// on exact float equality.
const EPSILON: f64 = 1e-9;

/// The lexicographic sort key: virtual finish time (epsilon quantized),
/// flow appearance order, packet arrival time, packet sequence number.
/// Quantizing the finish time into an integer bucket lets us derive `Ord`
/// instead of hand-writing a float comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FinishKey {
    finish_bucket: i64,
    appearance_order: usize,
    arrival: Time,
    seq: u64,
}

impl FinishKey {
    fn new(p: &ScheduledPacket) -> Self {
        Self {
            finish_bucket: (p.vfinish / EPSILON).round() as i64,
            appearance_order: p.appearance_order,
            arrival: p.packet.arrival,
            seq: p.packet.seq,
        }
    }
}

#[derive(Debug, derivative::Derivative)]
#[derivative(PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    key: Reverse<FinishKey>,
    #[derivative(PartialEq = "ignore", PartialOrd = "ignore", Ord = "ignore")]
    packet: ScheduledPacket,
}

/// A min-ordered container of scheduled packets, backed by a binary heap.
#[derive(Debug, Default)]
pub(crate) struct ReadyQueue {
    inner: BinaryHeap<Entry>,
}

impl ReadyQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, packet: ScheduledPacket) {
        let key = Reverse(FinishKey::new(&packet));
        self.inner.push(Entry { key, packet });
    }

    pub(crate) fn pop_min(&mut self) -> Option<ScheduledPacket> {
        self.inner.pop().map(|entry| entry.packet)
    }

    pub(crate) fn peek_min(&self) -> Option<&ScheduledPacket> {
        self.inner.peek().map(|entry| &entry.packet)
    }

    delegate::delegate! {
        to self.inner {
            pub(crate) fn is_empty(&self) -> bool;
        }
    }
}
