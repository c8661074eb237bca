//! Library crate root re-exporting the discovery server modules.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod capabilities;
pub mod cli;
pub mod discovery;
pub mod providers;
pub mod server;
