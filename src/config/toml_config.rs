use crate::config::{ManagerKind, OutputFormat};
use crate::core::model::FactSpec;
use crate::core::ports::ConfigProvider;
use crate::utils::error::{ProbeError, Result};
use crate::utils::validation::{
    validate_fact_name, validate_positive_number, validate_service_name, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub catalog: CatalogConfig,
    pub probe: Option<ProbeSettings>,
    pub output: Option<OutputConfig>,
    #[serde(default)]
    pub facts: Vec<FactSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeSettings {
    pub manager: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub concurrent_probes: Option<usize>,
    pub monitoring: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ProbeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ProbeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${NODE_SERVICE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if self.facts.is_empty() {
            return Err(ProbeError::ConfigValidationError {
                field: "facts".to_string(),
                message: "At least one [[facts]] entry is required".to_string(),
            });
        }

        for fact in &self.facts {
            validate_fact_name("facts.name", &fact.name)?;
            validate_service_name("facts.service", &fact.service)?;
        }

        // 驗證 probe 設定
        self.manager_kind()?;
        validate_positive_number("probe.timeout_seconds", self.timeout_seconds() as usize, 1)?;
        validate_positive_number("probe.concurrent_probes", self.concurrent_probes(), 1)?;

        // 驗證輸出格式
        self.output_format()?;

        Ok(())
    }

    /// 取得服務管理器種類
    pub fn manager_kind(&self) -> Result<ManagerKind> {
        self.probe
            .as_ref()
            .and_then(|p| p.manager.as_deref())
            .unwrap_or("systemctl")
            .parse()
    }

    /// 取得輸出格式
    pub fn output_format(&self) -> Result<OutputFormat> {
        self.output
            .as_ref()
            .and_then(|o| o.format.as_deref())
            .unwrap_or("plain")
            .parse()
    }

    /// 取得單次查詢逾時秒數
    pub fn timeout_seconds(&self) -> u64 {
        self.probe
            .as_ref()
            .and_then(|p| p.timeout_seconds)
            .unwrap_or(5)
    }

    /// 取得並發探測數
    pub fn concurrent_probes(&self) -> usize {
        self.probe
            .as_ref()
            .and_then(|p| p.concurrent_probes)
            .unwrap_or(4)
    }

    /// 取得監控設定
    pub fn monitoring_enabled(&self) -> bool {
        self.probe
            .as_ref()
            .and_then(|p| p.monitoring)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn fact_specs(&self) -> Vec<FactSpec> {
        self.facts.clone()
    }

    fn concurrent_probes(&self) -> usize {
        self.concurrent_probes()
    }

    fn query_timeout_seconds(&self) -> u64 {
        self.timeout_seconds()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[catalog]
name = "node-facts"
description = "Service facts for this node"
version = "1.0.0"

[probe]
manager = "systemctl"
timeout_seconds = 3
concurrent_probes = 2

[output]
format = "json"

[[facts]]
name = "prometheus_alert_manager_running"
service = "alert_manager"

[[facts]]
name = "nginx_running"
service = "nginx"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.catalog.name, "node-facts");
        assert_eq!(config.facts.len(), 2);
        assert_eq!(config.facts[0].service, "alert_manager");
        assert_eq!(config.manager_kind().unwrap(), ManagerKind::Systemctl);
        assert_eq!(config.output_format().unwrap(), OutputFormat::Json);
        assert_eq!(config.timeout_seconds(), 3);
        assert_eq!(config.concurrent_probes(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_when_sections_omitted() {
        let toml_content = r#"
[catalog]
name = "minimal"
description = "minimal"
version = "1.0"

[[facts]]
name = "prometheus_alert_manager_running"
service = "alert_manager"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.manager_kind().unwrap(), ManagerKind::Systemctl);
        assert_eq!(config.output_format().unwrap(), OutputFormat::Plain);
        assert_eq!(config.timeout_seconds(), 5);
        assert_eq!(config.concurrent_probes(), 4);
        assert!(!config.monitoring_enabled());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_PROBE_SERVICE", "alert_manager");

        let toml_content = r#"
[catalog]
name = "test"
description = "test"
version = "1.0"

[[facts]]
name = "prometheus_alert_manager_running"
service = "${TEST_PROBE_SERVICE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.facts[0].service, "alert_manager");

        std::env::remove_var("TEST_PROBE_SERVICE");
    }

    #[test]
    fn test_validation_rejects_empty_fact_list() {
        let toml_content = r#"
[catalog]
name = "test"
description = "test"
version = "1.0"

facts = []
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_unknown_manager() {
        let toml_content = r#"
[catalog]
name = "test"
description = "test"
version = "1.0"

[probe]
manager = "launchd"

[[facts]]
name = "fact"
service = "svc"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_service() {
        let toml_content = r#"
[catalog]
name = "test"
description = "test"
version = "1.0"

[[facts]]
name = "fact"
service = ""
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[catalog]
name = "file-test"
description = "File test"
version = "1.0"

[[facts]]
name = "prometheus_alert_manager_running"
service = "alert_manager"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.catalog.name, "file-test");
    }
}
