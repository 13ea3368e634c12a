pub mod collector;
pub mod model;
pub mod ports;
pub mod probe;

pub use crate::utils::error::Result;
pub use collector::FactCollector;
pub use model::{FactReport, FactSpec, ServiceIdentifier, ServiceStatus};
pub use ports::{ConfigProvider, ServiceManager};
pub use probe::ServiceStatusProbe;
