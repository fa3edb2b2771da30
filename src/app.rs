//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and wraps the player together with
//! the cursor and overlay state of the terminal UI.

mod model;

pub use model::*;
