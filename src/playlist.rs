//! Playlist types and loaders.
//!
//! A `Playlist` is fixed for the lifetime of the process: it is either the
//! built-in list compiled into the binary or one read from a TOML file at
//! startup.

mod builtin;
mod load;
mod model;

pub use builtin::builtin;
pub use load::load;
pub use model::*;
