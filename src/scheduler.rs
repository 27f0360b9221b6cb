//! The simulation loop (C5): the `Scheduler` that owns every other piece of
//! state and advances the simulation one event at a time.

use std::cmp;

use crate::{
    arrivals::PendingArrivals,
    clock::VirtualClock,
    error::Error,
    flow::FlowTable,
    packet::{Packet, Record, ScheduledPacket},
    queue::ReadyQueue,
    time::Time,
};

/// Owns the flow table, ready queue, pending-arrivals source, and clocks —
/// all of a run's mutable state lives here, per the design note that global
/// mutable state should be re-expressed as a single owning value.
#[derive(Debug)]
pub struct Scheduler {
    flows: FlowTable,
    ready: ReadyQueue,
    arrivals: PendingArrivals,
    clock: VirtualClock,
    t_free: Time,
}

impl Scheduler {
    /// Builds a scheduler over `packets` (any arrival order; they are
    /// stabilized internally), bounding the flow table at `flow_capacity`
    /// distinct flows.
    pub fn new(packets: Vec<Packet>, flow_capacity: usize) -> Self {
        Self {
            flows: FlowTable::new(flow_capacity),
            ready: ReadyQueue::new(),
            arrivals: PendingArrivals::new(packets),
            clock: VirtualClock::new(),
            t_free: Time::ZERO,
        }
    }

    /// True once there are no more arrivals to process and the ready queue
    /// has drained.
    pub fn is_finished(&self) -> bool {
        self.arrivals.is_empty() && self.ready.is_empty()
    }

    /// Runs to completion, returning every emitted record in transmission
    /// order.
    pub fn run(self) -> Result<Vec<Record>, Error> {
        self.run_with(|_| Ok(()))
    }

    /// Runs to completion, calling `on_departure` once per emitted record as
    /// it is produced (so a caller can stream output — see the driver's
    /// `run`), and also returning the full list.
    pub fn run_with<F>(mut self, mut on_departure: F) -> Result<Vec<Record>, Error>
    where
        F: FnMut(&Record) -> Result<(), Error>,
    {
        let mut records = Vec::new();
        while !self.is_finished() {
            if let Some(record) = self.step()? {
                on_departure(&record)?;
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Advances the simulation by exactly one event: either an arrival
    /// (returns `Ok(None)`) or a departure (returns the emitted `Record`).
    pub fn step(&mut self) -> Result<Option<Record>, Error> {
        let t = self.clock.real_time();
        let t_arrival = self.arrivals.peek_next_arrival_time();
        let t_departure = match self.ready.peek_min() {
            Some(head) => {
                let mut departure = cmp::max(t, head.packet.arrival);
                if self.t_free > t {
                    departure = cmp::max(departure, self.t_free);
                }
                departure
            }
            None => Time::MAX,
        };

        if !self.arrivals.is_empty() && t_arrival <= t_departure {
            self.handle_arrival(t_arrival)?;
            Ok(None)
        } else {
            Ok(Some(self.handle_departure()))
        }
    }

    fn handle_arrival(&mut self, t_a: Time) -> Result<(), Error> {
        let packet = self
            .arrivals
            .pop_next_arrival()
            .expect("peeked arrival must exist");

        // Record V before the bookkeeping advance; the packet conceptually
        // arrives here, and the subsequent advance only accounts for the
        // interval under the *old* backlogged-weight sum.
        let v_before = self.clock.virtual_time();
        self.clock.advance_to(t_a);

        let flow_id = self.flows.get_or_create(packet.key)?;

        if !self.flows.get(flow_id).is_backlogged() {
            let weight = self.flows.get(flow_id).weight;
            self.clock.on_flow_backlog_start(weight);
        }
        self.flows.get_mut(flow_id).backlog += 1;

        if let Some(w_p) = packet.weight {
            let current = self.flows.get(flow_id).weight;
            if w_p.into_f64() != current.into_f64() {
                self.clock.on_flow_weight_change(current, w_p);
                self.flows.get_mut(flow_id).weight = w_p;
            }
        }

        let state = self.flows.get(flow_id);
        let start = v_before.max(state.last_finish);
        let finish = start + packet.length.into_f64() / state.weight.into_f64();
        let appearance_order = state.appearance_order;
        self.flows.get_mut(flow_id).last_finish = finish;

        self.ready.insert(ScheduledPacket {
            packet,
            flow_id,
            appearance_order,
            vstart: start,
            vfinish: finish,
        });
        Ok(())
    }

    fn handle_departure(&mut self) -> Record {
        let t = self.clock.real_time();
        let head_arrival = self
            .ready
            .peek_min()
            .expect("departure only chosen when the ready queue is non-empty")
            .packet
            .arrival;
        self.clock
            .advance_to(cmp::max(cmp::max(t, self.t_free), head_arrival));

        let scheduled = self
            .ready
            .pop_min()
            .expect("departure only chosen when the ready queue is non-empty");
        let t_start = self.clock.real_time();
        self.t_free = t_start + scheduled.packet.length.into_delta();

        let state = self.flows.get_mut(scheduled.flow_id);
        state.backlog -= 1;
        if !state.is_backlogged() {
            let weight = state.weight;
            self.clock.on_flow_backlog_end(weight);
        }

        Record {
            t_start,
            line: scheduled.packet.line,
        }
    }
}
