//! Advisory tracker notifications for presentation layers.
//!
//! Components emit [`TrackerEvent`]s through a cloneable [`EventHandle`].
//! Emission never blocks and never fails the caller: a slow or absent consumer
//! only loses events.

mod handle;
mod types;

pub use handle::*;
pub use types::*;
