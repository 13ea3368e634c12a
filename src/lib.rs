pub mod adapters;
pub mod config;
pub mod core;
pub mod utils;

pub use adapters::{ProcessManager, SystemctlManager};
pub use config::{toml_config::TomlConfig, CliConfig, ManagerKind, OutputFormat};
pub use core::{
    ConfigProvider, FactCollector, FactReport, FactSpec, ServiceIdentifier, ServiceManager,
    ServiceStatus, ServiceStatusProbe,
};
pub use utils::error::{ProbeError, Result};
