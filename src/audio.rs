//! Audio backend: the `AudioHandle` seam and its `rodio` implementation.
//!
//! `RodioHandle` forwards commands to a dedicated audio thread, which owns
//! the output stream and the current sink, and reports `Signal`s back.

mod handle;
mod sink;
mod thread;
mod types;

pub use handle::RodioHandle;
pub use types::*;
