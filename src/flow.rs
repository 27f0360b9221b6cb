//! The flow table (C1): per-4-tuple WFQ state.

use std::net::Ipv4Addr;

use rustc_hash::FxHashMap;

use crate::{error::Error, units::Weight};

identifier!(FlowId);

/// Identifies a flow by its 4-tuple. Two packets belong to the same flow iff
/// their keys are equal component-wise — the combination is not
/// direction-symmetric (a packet from A to B and one from B to A are
/// different flows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowKey {
    /// Source IPv4 address.
    pub src_ip: Ipv4Addr,
    /// Source port.
    pub src_port: u16,
    /// Destination IPv4 address.
    pub dst_ip: Ipv4Addr,
    /// Destination port.
    pub dst_port: u16,
}

/// Per-flow WFQ bookkeeping: current weight, the virtual finish tag of the
/// most recently enqueued packet, how many of the flow's packets are
/// currently backlogged, and the order in which the flow was first seen.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FlowState {
    pub(crate) weight: Weight,
    pub(crate) last_finish: f64,
    pub(crate) backlog: u32,
    pub(crate) appearance_order: usize,
}

impl FlowState {
    fn new(appearance_order: usize) -> Self {
        Self {
            weight: Weight::DEFAULT,
            last_finish: 0.0,
            backlog: 0,
            appearance_order,
        }
    }

    pub(crate) fn is_backlogged(&self) -> bool {
        self.backlog > 0
    }
}

/// Maps `FlowKey` to `FlowState`, amortized O(1) lookup, no eviction.
/// Capacity-bounded per `Config`; exceeding it is fatal.
#[derive(Debug, derive_new::new)]
pub(crate) struct FlowTable {
    #[new(default)]
    index: FxHashMap<FlowKey, FlowId>,
    #[new(default)]
    states: Vec<FlowState>,
    capacity: usize,
}

impl FlowTable {
    /// Looks up `key`'s flow, creating it (with appearance_order equal to
    /// the next unused integer) if this is the first time it's been seen.
    pub(crate) fn get_or_create(&mut self, key: FlowKey) -> Result<FlowId, Error> {
        if let Some(&id) = self.index.get(&key) {
            return Ok(id);
        }
        if self.states.len() >= self.capacity {
            return Err(Error::CapacityExceeded {
                limit: self.capacity,
            });
        }
        let id = FlowId::new(self.states.len());
        self.states.push(FlowState::new(id.into_usize()));
        self.index.insert(key, id);
        Ok(id)
    }

    pub(crate) fn get(&self, id: FlowId) -> &FlowState {
        &self.states[id.into_usize()]
    }

    pub(crate) fn get_mut(&mut self, id: FlowId) -> &mut FlowState {
        &mut self.states[id.into_usize()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(src_port: u16) -> FlowKey {
        FlowKey {
            src_ip: Ipv4Addr::new(1, 1, 1, 1),
            src_port,
            dst_ip: Ipv4Addr::new(2, 2, 2, 2),
            dst_port: 2,
        }
    }

    #[test]
    fn repeated_key_reuses_state_and_appearance_order() {
        let mut table = FlowTable::new(16);
        let a = table.get_or_create(key(1)).unwrap();
        let b = table.get_or_create(key(1)).unwrap();
        assert_eq!(a, b);
        assert_eq!(table.get(a).appearance_order, 0);
    }

    #[test]
    fn distinct_keys_get_increasing_appearance_order() {
        let mut table = FlowTable::new(16);
        let a = table.get_or_create(key(1)).unwrap();
        let b = table.get_or_create(key(2)).unwrap();
        assert_ne!(a, b);
        assert_eq!(table.get(a).appearance_order, 0);
        assert_eq!(table.get(b).appearance_order, 1);
    }

    #[test]
    fn capacity_exceeded_is_fatal() {
        let mut table = FlowTable::new(1);
        table.get_or_create(key(1)).unwrap();
        let err = table.get_or_create(key(2)).unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { limit: 1 }));
    }
}
