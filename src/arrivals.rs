//! The pending-arrivals source (C2).

use std::collections::VecDeque;

use crate::{packet::Packet, time::Time};

/// Produces arrivals in non-decreasing `(arrival_time, sequence_number)`
/// order, regardless of the order the input was given in.
#[derive(Debug)]
pub(crate) struct PendingArrivals {
    packets: VecDeque<Packet>,
}

impl PendingArrivals {
    pub(crate) fn new(mut packets: Vec<Packet>) -> Self {
        packets.sort_by_key(|p| (p.arrival, p.seq));
        Self {
            packets: packets.into(),
        }
    }

    /// The arrival time of the next packet, or `Time::MAX` if exhausted.
    pub(crate) fn peek_next_arrival_time(&self) -> Time {
        self.packets
            .front()
            .map(|p| p.arrival)
            .unwrap_or(Time::MAX)
    }

    delegate::delegate! {
        to self.packets {
            #[call(pop_front)]
            pub(crate) fn pop_next_arrival(&mut self) -> Option<Packet>;

            pub(crate) fn is_empty(&self) -> bool;
        }
    }
}
