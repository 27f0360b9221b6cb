//! Packet and record types.

use typed_builder::TypedBuilder;

use crate::{
    flow::{FlowId, FlowKey},
    time::Time,
    units::{Bytes, Weight},
};

/// A packet parsed from one input line, before it has been assigned to a
/// flow. Immutable once constructed; the original line is carried verbatim
/// so it can be echoed on output.
#[derive(Debug, Clone, TypedBuilder)]
pub struct Packet {
    pub(crate) arrival: Time,
    pub(crate) key: FlowKey,
    pub(crate) length: Bytes,
    pub(crate) weight: Option<Weight>,
    pub(crate) seq: u64,
    pub(crate) line: String,
}

/// A packet that has been assigned to a flow and stamped with its GPS
/// virtual-time tags, ready to be ordered in the ready queue (C3).
#[derive(Debug, Clone)]
pub(crate) struct ScheduledPacket {
    pub(crate) packet: Packet,
    pub(crate) flow_id: FlowId,
    pub(crate) appearance_order: usize,
    #[allow(dead_code)] // not read after insertion, but kept alongside vfinish for symmetry
    pub(crate) vstart: f64,
    pub(crate) vfinish: f64,
}

/// The externally observable result of one departure: the transmission
/// start time and the packet's original input line, emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The real time at which transmission of this packet began.
    pub t_start: Time,
    /// The packet's original input line, unmodified.
    pub line: String,
}

impl Record {
    /// Render this record as `<t_start>: <original_line>`.
    pub fn to_output_line(&self) -> String {
        format!("{}: {}", self.t_start, self.line)
    }
}
