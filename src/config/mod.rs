//! Configuration for the activity regulator
//!
//! This module provides the `RegulatorConfig` struct and its builder.
//! Configuration can also be read from a JSON string.

pub mod builder;
pub mod types;

pub use builder::RegulatorConfigBuilder;
pub use types::RegulatorConfig;
