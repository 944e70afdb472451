//! Observable count of flights still at the gate.
//!
//! [`GateCounter::new`] returns the only [`GateWriter`] together with a
//! cloneable [`GateCounter`] for observers. Every subscriber gets its own
//! unbounded in-order queue, so no update is skipped or coalesced.

mod counter;

pub use counter::{GateCounter, GateWriter};
