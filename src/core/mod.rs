pub mod arrivals;
pub mod driver;
pub mod event;
pub mod observer;
pub mod ready;
pub mod state;
pub mod trace;

pub use arrivals::{Arrival, ArrivalFeed};
pub use driver::SchedCore;
pub use event::SchedEvent;
pub use ready::ReadyQueue;
pub use state::{Priority, ProcId, ProcState, Process, SchedCtx, Ticks};
pub use trace::{Occupant, Span, TraceBuilder};
