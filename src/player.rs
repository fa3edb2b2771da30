//! Playback state machine.
//!
//! `machine::step` is a pure function from `(PlaybackState, Event)` to a new
//! state plus a list of `Effect`s for the audio handle. `Player` owns the
//! state, feeds it events and carries out the effects.

mod controller;
mod event;
mod machine;
mod state;

pub use controller::Player;
pub use event::*;
pub use machine::{Transition, step};
pub use state::*;

#[cfg(test)]
mod tests;
