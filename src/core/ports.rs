use crate::core::model::{FactSpec, ServiceIdentifier, ServiceStatus};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Capability interface over the host's service-management layer. The probe
/// receives an implementation explicitly so tests can substitute a fake.
#[async_trait]
pub trait ServiceManager: Send + Sync {
    /// Read-only status query for a single service unit. Errors describe why
    /// the status could not be determined; the fail-closed collapse to
    /// `false` happens at the probe boundary, not here.
    async fn query_status(&self, service: &ServiceIdentifier) -> Result<ServiceStatus>;
}

pub trait ConfigProvider: Send + Sync {
    fn fact_specs(&self) -> Vec<FactSpec>;
    fn concurrent_probes(&self) -> usize;
    fn query_timeout_seconds(&self) -> u64;
}
