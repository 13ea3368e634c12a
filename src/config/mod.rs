pub mod toml_config;

use crate::core::model::FactSpec;
use crate::core::ports::ConfigProvider;
use crate::utils::error::{ProbeError, Result};
use crate::utils::validation::{
    validate_fact_name, validate_positive_number, validate_service_name, Validate,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which host interface answers status queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManagerKind {
    /// systemd via `systemctl is-active`
    Systemctl,
    /// process-table lookup (hosts without systemd)
    Process,
}

impl fmt::Display for ManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Systemctl => f.write_str("systemctl"),
            Self::Process => f.write_str("process"),
        }
    }
}

impl FromStr for ManagerKind {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "systemctl" => Ok(Self::Systemctl),
            "process" => Ok(Self::Process),
            other => Err(ProbeError::InvalidConfigValueError {
                field: "manager".to_string(),
                value: other.to_string(),
                reason: "Supported managers: systemctl, process".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `name=value` lines
    Plain,
    /// JSON report with collection timestamp
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => f.write_str("plain"),
            Self::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "plain" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            other => Err(ProbeError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Supported formats: plain, json".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "svc-facts")]
#[command(about = "Probe whether a service is running and publish it as a fact")]
pub struct CliConfig {
    /// Service unit to probe
    #[arg(long, default_value = "alert_manager")]
    pub service: String,

    /// Fact name the result is published under
    #[arg(long, default_value = "prometheus_alert_manager_running")]
    pub fact_name: String,

    /// Host interface used for the status query
    #[arg(long, value_enum, default_value = "systemctl")]
    pub manager: ManagerKind,

    /// Output format for the fact report
    #[arg(long, value_enum, default_value = "plain")]
    pub format: OutputFormat,

    /// Per-query timeout in seconds
    #[arg(long, default_value = "5")]
    pub timeout_seconds: u64,

    /// Maximum number of probes running at once
    #[arg(long, default_value = "4")]
    pub concurrent_probes: usize,

    /// Query user-level units (systemctl --user)
    #[arg(long)]
    pub user: bool,

    /// Exit non-zero when the service is not running
    #[arg(long, help = "Exit with code 1 if the probed service is not running")]
    pub check: bool,

    /// Log process CPU/memory stats around the collection run
    #[arg(long)]
    pub monitor: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn fact_spec(&self) -> FactSpec {
        FactSpec::new(self.fact_name.clone(), self.service.clone())
    }
}

impl ConfigProvider for CliConfig {
    fn fact_specs(&self) -> Vec<FactSpec> {
        vec![self.fact_spec()]
    }

    fn concurrent_probes(&self) -> usize {
        self.concurrent_probes
    }

    fn query_timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_service_name("service", &self.service)?;
        validate_fact_name("fact_name", &self.fact_name)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds as usize, 1)?;
        validate_positive_number("concurrent_probes", self.concurrent_probes, 1)?;
        Ok(())
    }
}
