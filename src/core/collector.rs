use crate::core::model::{FactReport, FactSpec, ServiceIdentifier};
use crate::core::ports::ServiceManager;
use crate::core::probe::ServiceStatusProbe;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub const DEFAULT_CONCURRENT_PROBES: usize = 4;

/// Runs the configured fact specs through a probe and assembles the fact
/// catalog. Probes are independent and side-effect-free, so they run
/// concurrently up to the configured limit.
pub struct FactCollector<M>
where
    M: ServiceManager + Clone + Send + Sync + 'static,
{
    probe: ServiceStatusProbe<M>,
    concurrent_probes: usize,
    monitor: SystemMonitor,
}

impl<M> FactCollector<M>
where
    M: ServiceManager + Clone + Send + Sync + 'static,
{
    pub fn new(probe: ServiceStatusProbe<M>) -> Self {
        Self {
            probe,
            concurrent_probes: DEFAULT_CONCURRENT_PROBES,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(
        probe: ServiceStatusProbe<M>,
        concurrent_probes: usize,
        monitor_enabled: bool,
    ) -> Self {
        Self {
            probe,
            concurrent_probes: concurrent_probes.max(1),
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn collect(&self, specs: &[FactSpec]) -> Result<FactReport> {
        tracing::info!("Collecting {} facts", specs.len());

        // 先以 false 填滿目錄：探測失敗或任務中斷時仍保持 fail-closed
        let mut report = FactReport::new();
        for spec in specs {
            report.insert(spec.name.clone(), false);
        }

        let semaphore = Arc::new(Semaphore::new(self.concurrent_probes));
        let mut tasks: JoinSet<(String, bool)> = JoinSet::new();

        for spec in specs {
            let probe = self.probe.clone();
            let semaphore = Arc::clone(&semaphore);
            let name = spec.name.clone();
            let service = spec.service.clone();

            tasks.spawn(async move {
                let Ok(_permit) = semaphore.acquire().await else {
                    return (name, false);
                };

                match ServiceIdentifier::new(service) {
                    Ok(id) => {
                        let running = probe.is_running(&id).await;
                        (name, running)
                    }
                    Err(e) => {
                        tracing::debug!("fact '{}' has an invalid service identifier: {}", name, e);
                        (name, false)
                    }
                }
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((name, value)) => report.insert(name, value),
                Err(e) => tracing::warn!("probe task aborted: {}", e),
            }
        }

        if self.monitor.is_enabled() {
            self.monitor.log_stats("Collection");
            self.monitor.log_final_stats();
        }

        tracing::info!("Collected {} facts", report.len());
        Ok(report)
    }
}
