use crate::core::model::{ServiceIdentifier, ServiceStatus};
use crate::core::ports::ServiceManager;
use crate::utils::error::{ProbeError, Result};
use async_trait::async_trait;
use std::ffi::OsStr;
use std::sync::{Arc, Mutex};
use sysinfo::{RefreshKind, System};

/// Fallback manager for hosts without systemd: treats the service identifier
/// as a process name and consults the process table. A present process maps
/// to running, an absent one to stopped.
#[derive(Clone)]
pub struct ProcessManager {
    system: Arc<Mutex<System>>,
}

impl ProcessManager {
    pub fn new() -> Self {
        let mut system = System::new_with_specifics(RefreshKind::everything());
        system.refresh_all();

        Self {
            system: Arc::new(Mutex::new(system)),
        }
    }
}

impl Default for ProcessManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceManager for ProcessManager {
    async fn query_status(&self, service: &ServiceIdentifier) -> Result<ServiceStatus> {
        let mut system = self
            .system
            .lock()
            .map_err(|_| ProbeError::ManagerUnavailable {
                message: "process table lock poisoned".to_string(),
            })?;

        system.refresh_all();

        let found = system
            .processes_by_exact_name(OsStr::new(service.as_str()))
            .next()
            .is_some();

        tracing::debug!("process table lookup for '{}': found={}", service, found);

        if found {
            Ok(ServiceStatus::Running)
        } else {
            Ok(ServiceStatus::Stopped)
        }
    }
}
