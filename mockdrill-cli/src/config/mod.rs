//! Layered TOML configuration
//!
//! User config is loaded first, then project config overlays it, then CLI
//! flags override both.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DEFAULT_HOST, DEFAULT_PORT, MockdrillConfig, ServerSection};
