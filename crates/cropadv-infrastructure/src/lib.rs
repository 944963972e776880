//! Filesystem and environment access for the crop advisory client.

pub mod config_service;
pub mod paths;

pub use config_service::ConfigService;
pub use paths::AdvisoryPaths;
