use crate::utils::error::{ProbeError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Immutable name of a service unit known to the host's service manager.
/// The only validation is non-emptiness.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceIdentifier(String);

impl ServiceIdentifier {
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProbeError::InvalidConfigValueError {
                field: "service".to_string(),
                value: name,
                reason: "Service identifier cannot be empty".to_string(),
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Service state as reported by the host manager. The probe reduces this to
/// a boolean by testing against `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Running,
    Stopped,
    Failed,
    Activating,
    Unknown,
}

impl ServiceStatus {
    /// 解析服務管理器的單字狀態輸出 (systemctl is-active 詞彙)
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "active" | "running" => Self::Running,
            "inactive" | "stopped" | "dead" | "deactivating" => Self::Stopped,
            "failed" => Self::Failed,
            "activating" | "reloading" | "refreshing" => Self::Activating,
            _ => Self::Unknown,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Failed => "failed",
            Self::Activating => "activating",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Binding between a published fact name and the service it probes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactSpec {
    pub name: String,
    pub service: String,
}

impl FactSpec {
    pub fn new<N: Into<String>, S: Into<String>>(name: N, service: S) -> Self {
        Self {
            name: name.into(),
            service: service.into(),
        }
    }
}

/// One collection run's worth of facts, keyed by fact name.
#[derive(Debug, Clone, Serialize)]
pub struct FactReport {
    pub collected_at: DateTime<Utc>,
    pub facts: BTreeMap<String, bool>,
}

impl FactReport {
    pub fn new() -> Self {
        Self {
            collected_at: Utc::now(),
            facts: BTreeMap::new(),
        }
    }

    pub fn insert<N: Into<String>>(&mut self, name: N, value: bool) {
        self.facts.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.facts.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// 是否所有事實皆為 true (用於 --check 模式)
    pub fn all_true(&self) -> bool {
        self.facts.values().all(|v| *v)
    }

    /// `name=value` 行輸出，一行一個事實
    pub fn to_plain(&self) -> String {
        self.facts
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for FactReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_identifier_rejects_empty() {
        assert!(ServiceIdentifier::new("").is_err());
        assert!(ServiceIdentifier::new("   ").is_err());
    }

    #[test]
    fn test_service_identifier_keeps_name() {
        let id = ServiceIdentifier::new("alert_manager").unwrap();
        assert_eq!(id.as_str(), "alert_manager");
        assert_eq!(id.to_string(), "alert_manager");
    }

    #[test]
    fn test_status_parse_systemd_vocabulary() {
        assert_eq!(ServiceStatus::parse("active"), ServiceStatus::Running);
        assert_eq!(ServiceStatus::parse("running"), ServiceStatus::Running);
        assert_eq!(ServiceStatus::parse("inactive"), ServiceStatus::Stopped);
        assert_eq!(ServiceStatus::parse("dead"), ServiceStatus::Stopped);
        assert_eq!(ServiceStatus::parse("failed"), ServiceStatus::Failed);
        assert_eq!(ServiceStatus::parse("activating"), ServiceStatus::Activating);
        assert_eq!(ServiceStatus::parse("garbage"), ServiceStatus::Unknown);
    }

    #[test]
    fn test_status_parse_trims_whitespace() {
        assert_eq!(ServiceStatus::parse("active\n"), ServiceStatus::Running);
        assert_eq!(ServiceStatus::parse("  inactive  "), ServiceStatus::Stopped);
    }

    #[test]
    fn test_only_running_reduces_to_true() {
        assert!(ServiceStatus::Running.is_running());
        assert!(!ServiceStatus::Stopped.is_running());
        assert!(!ServiceStatus::Failed.is_running());
        assert!(!ServiceStatus::Activating.is_running());
        assert!(!ServiceStatus::Unknown.is_running());
    }

    #[test]
    fn test_report_plain_output_is_sorted() {
        let mut report = FactReport::new();
        report.insert("zebra_running", false);
        report.insert("alert_manager_running", true);

        assert_eq!(
            report.to_plain(),
            "alert_manager_running=true\nzebra_running=false"
        );
    }

    #[test]
    fn test_report_json_output_contains_facts() {
        let mut report = FactReport::new();
        report.insert("prometheus_alert_manager_running", true);

        let json = report.to_json_pretty().unwrap();
        assert!(json.contains("prometheus_alert_manager_running"));
        assert!(json.contains("collected_at"));
    }

    #[test]
    fn test_report_all_true() {
        let mut report = FactReport::new();
        report.insert("a", true);
        report.insert("b", true);
        assert!(report.all_true());

        report.insert("c", false);
        assert!(!report.all_true());
    }
}
