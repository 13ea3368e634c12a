use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use svc_facts::{
    CliConfig, ConfigProvider, FactCollector, ManagerKind, OutputFormat, ProbeError,
    ServiceIdentifier, ServiceManager, ServiceStatus, ServiceStatusProbe,
};

#[derive(Clone)]
struct FakeManager {
    services: Arc<HashMap<String, ServiceStatus>>,
    fail_all: bool,
}

impl FakeManager {
    fn new(entries: &[(&str, ServiceStatus)]) -> Self {
        let services = entries
            .iter()
            .map(|(name, status)| (name.to_string(), *status))
            .collect();
        Self {
            services: Arc::new(services),
            fail_all: false,
        }
    }

    fn broken() -> Self {
        Self {
            services: Arc::new(HashMap::new()),
            fail_all: true,
        }
    }
}

#[async_trait]
impl ServiceManager for FakeManager {
    async fn query_status(
        &self,
        service: &ServiceIdentifier,
    ) -> svc_facts::Result<ServiceStatus> {
        if self.fail_all {
            return Err(ProbeError::PermissionDenied {
                service: service.to_string(),
            });
        }
        self.services
            .get(service.as_str())
            .copied()
            .ok_or_else(|| ProbeError::ServiceNotFound {
                service: service.to_string(),
            })
    }
}

fn alert_manager_config() -> CliConfig {
    CliConfig {
        service: "alert_manager".to_string(),
        fact_name: "prometheus_alert_manager_running".to_string(),
        manager: ManagerKind::Systemctl,
        format: OutputFormat::Plain,
        timeout_seconds: 5,
        concurrent_probes: 4,
        user: false,
        check: false,
        monitor: false,
        verbose: false,
    }
}

#[tokio::test]
async fn test_end_to_end_running_alert_manager() {
    let manager = FakeManager::new(&[("alert_manager", ServiceStatus::Running)]);
    let config = alert_manager_config();

    let probe = ServiceStatusProbe::new(manager);
    let collector = FactCollector::new(probe);
    let report = collector.collect(&config.fact_specs()).await.unwrap();

    assert_eq!(report.get("prometheus_alert_manager_running"), Some(true));
    assert_eq!(report.to_plain(), "prometheus_alert_manager_running=true");
}

#[tokio::test]
async fn test_end_to_end_unregistered_alert_manager() {
    let manager = FakeManager::new(&[]);
    let config = alert_manager_config();

    let probe = ServiceStatusProbe::new(manager);
    let collector = FactCollector::new(probe);
    let report = collector.collect(&config.fact_specs()).await.unwrap();

    assert_eq!(report.get("prometheus_alert_manager_running"), Some(false));
}

#[tokio::test]
async fn test_end_to_end_broken_manager_never_errors() {
    let config = alert_manager_config();

    let probe = ServiceStatusProbe::new(FakeManager::broken());
    let collector = FactCollector::new(probe);
    let report = collector.collect(&config.fact_specs()).await.unwrap();

    assert_eq!(report.get("prometheus_alert_manager_running"), Some(false));
}

#[tokio::test]
async fn test_end_to_end_json_report_shape() {
    let manager = FakeManager::new(&[
        ("alert_manager", ServiceStatus::Running),
        ("nginx", ServiceStatus::Failed),
    ]);

    let probe = ServiceStatusProbe::new(manager);
    let collector = FactCollector::new(probe);
    let specs = vec![
        svc_facts::FactSpec::new("prometheus_alert_manager_running", "alert_manager"),
        svc_facts::FactSpec::new("nginx_running", "nginx"),
    ];
    let report = collector.collect(&specs).await.unwrap();

    let json = report.to_json_pretty().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed["facts"]["prometheus_alert_manager_running"], true);
    assert_eq!(parsed["facts"]["nginx_running"], false);
    assert!(parsed["collected_at"].is_string());
}

#[tokio::test]
async fn test_probe_results_are_stable_across_runs() {
    let manager = FakeManager::new(&[("alert_manager", ServiceStatus::Running)]);
    let probe = ServiceStatusProbe::new(manager);
    let id = ServiceIdentifier::new("alert_manager").unwrap();

    for _ in 0..5 {
        assert!(probe.is_running(&id).await);
    }
}
