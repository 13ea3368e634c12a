use crate::core::model::{ServiceIdentifier, ServiceStatus};
use crate::core::ports::ServiceManager;
use crate::utils::error::{ProbeError, Result};
use async_trait::async_trait;
use tokio::process::Command;

/// Queries systemd through `systemctl is-active <unit>`.
///
/// `is-active` prints a single status word and exits non-zero for anything
/// that is not active, so the exit code is ignored and only the printed
/// vocabulary is parsed. Units systemd does not know report `inactive` (or
/// `unknown` on older versions), which the probe reduces to "not running".
#[derive(Debug, Clone)]
pub struct SystemctlManager {
    systemctl_path: String,
    user_scope: bool,
}

impl SystemctlManager {
    pub fn new() -> Self {
        Self {
            systemctl_path: "systemctl".to_string(),
            user_scope: false,
        }
    }

    /// 查詢使用者層級的 systemd 單位 (systemctl --user)
    pub fn user() -> Self {
        Self {
            systemctl_path: "systemctl".to_string(),
            user_scope: true,
        }
    }

    pub fn with_path<S: Into<String>>(path: S) -> Self {
        Self {
            systemctl_path: path.into(),
            user_scope: false,
        }
    }
}

impl Default for SystemctlManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceManager for SystemctlManager {
    async fn query_status(&self, service: &ServiceIdentifier) -> Result<ServiceStatus> {
        let mut command = Command::new(&self.systemctl_path);
        if self.user_scope {
            command.arg("--user");
        }
        command.arg("is-active").arg(service.as_str());

        let output = command.output().await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ProbeError::ManagerUnavailable {
                message: format!("'{}' not found on PATH", self.systemctl_path),
            },
            std::io::ErrorKind::PermissionDenied => ProbeError::PermissionDenied {
                service: service.to_string(),
            },
            _ => ProbeError::IoError(e),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let raw = stdout.trim();
        tracing::debug!("systemctl is-active {} -> '{}'", service, raw);

        if raw.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.contains("Access denied") || stderr.contains("Permission denied") {
                return Err(ProbeError::PermissionDenied {
                    service: service.to_string(),
                });
            }
            return Err(ProbeError::UnexpectedOutput {
                service: service.to_string(),
                output: stderr,
            });
        }

        match ServiceStatus::parse(raw) {
            // 舊版 systemd 對未載入的單位回報 "unknown"
            ServiceStatus::Unknown if raw == "unknown" => Err(ProbeError::ServiceNotFound {
                service: service.to_string(),
            }),
            ServiceStatus::Unknown => Err(ProbeError::UnexpectedOutput {
                service: service.to_string(),
                output: raw.to_string(),
            }),
            status => Ok(status),
        }
    }
}
