//! Process-wide helpers shared by the binaries and the server crate.

pub mod utils;
