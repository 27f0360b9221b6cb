#[macro_use]
mod ident;

pub mod time;
pub mod units;

pub(crate) mod arrivals;
pub(crate) mod clock;
pub(crate) mod driver;
pub(crate) mod error;
pub(crate) mod flow;
pub(crate) mod packet;
pub(crate) mod queue;
pub(crate) mod scheduler;

pub use driver::{run, Config, ConfigBuilder};
pub use error::Error;
pub use flow::FlowKey;
pub use packet::{Packet, Record};
pub use scheduler::Scheduler;
