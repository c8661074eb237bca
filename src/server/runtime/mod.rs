//! MCP server startup and capability dispatch.
mod handler;
mod server_info;
mod startup;

pub use handler::DiscoveryServer;
pub use server_info::{build_instructions, SERVER_NAME};
pub use startup::{build_capabilities, run_server, RuntimeExit};
