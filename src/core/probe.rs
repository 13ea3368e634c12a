use crate::core::model::{ServiceIdentifier, ServiceStatus};
use crate::core::ports::ServiceManager;
use crate::utils::error::{ProbeError, Result};
use std::time::Duration;

pub const DEFAULT_QUERY_TIMEOUT_SECONDS: u64 = 5;

/// Asks a [`ServiceManager`] whether a service is running.
///
/// `is_running` never raises: any failure to resolve or query the service is
/// collapsed to `false`. Absence of evidence of "running" is treated as "not
/// running". Callers that need to distinguish "stopped" from "could not
/// determine" use [`ServiceStatusProbe::status`] instead.
#[derive(Debug, Clone)]
pub struct ServiceStatusProbe<M: ServiceManager> {
    manager: M,
    timeout: Duration,
}

impl<M: ServiceManager> ServiceStatusProbe<M> {
    pub fn new(manager: M) -> Self {
        Self {
            manager,
            timeout: Duration::from_secs(DEFAULT_QUERY_TIMEOUT_SECONDS),
        }
    }

    pub fn with_timeout(manager: M, timeout: Duration) -> Self {
        Self { manager, timeout }
    }

    /// The un-collapsed query: status or the reason it could not be
    /// determined. Bounded by the probe timeout so a wedged service manager
    /// cannot hang an embedding fact-collection cycle.
    pub async fn status(&self, service: &ServiceIdentifier) -> Result<ServiceStatus> {
        match tokio::time::timeout(self.timeout, self.manager.query_status(service)).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::QueryTimeout {
                service: service.to_string(),
                seconds: self.timeout.as_secs(),
            }),
        }
    }

    /// `true` iff the service's status is `running`. Fail-closed: every
    /// query error maps to `false`.
    pub async fn is_running(&self, service: &ServiceIdentifier) -> bool {
        match self.status(service).await {
            Ok(status) => {
                tracing::debug!("service '{}' status: {}", service, status);
                status.is_running()
            }
            Err(e) => {
                tracing::debug!(
                    "status query for '{}' failed, reporting not running: {}",
                    service,
                    e
                );
                false
            }
        }
    }
}
