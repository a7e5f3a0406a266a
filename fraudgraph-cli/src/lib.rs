//! Support library for the `fraudgraph` binary.
//!
//! Exposes the command pipeline and logging setup so integration tests and
//! doctests can drive the commands without spawning a subprocess.

pub mod cli;
pub mod logging;
