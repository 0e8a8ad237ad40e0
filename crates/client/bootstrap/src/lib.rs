//! Shared bootstrap utilities for game hosts.
//!
//! Provides environment-driven configuration, tracing setup and runtime
//! assembly that any front-end embedding the engine can reuse.
pub mod builder;
pub mod config;
pub mod logging;

pub use builder::{RuntimeBootstrap, RuntimeSetup};
pub use config::{BootstrapConfig, ChannelConfig, default_save_dir};
pub use logging::init_tracing;
