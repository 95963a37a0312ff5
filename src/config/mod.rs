//! Configuration module for zbb
//!
//! - Path resolution (env override, platform config directory)
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ZbbPaths;
pub use settings::Settings;
