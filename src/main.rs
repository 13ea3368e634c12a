use clap::Parser;
use std::time::Duration;
use svc_facts::utils::{logger, validation::Validate};
use svc_facts::{
    CliConfig, ConfigProvider, FactCollector, FactReport, ManagerKind, OutputFormat,
    ProcessManager, ServiceManager, ServiceStatusProbe, SystemctlManager,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting svc-facts");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let report = match collect(&config).await {
        Ok(report) => report,
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Fact collection failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                svc_facts::utils::error::ErrorSeverity::Low => 0,
                svc_facts::utils::error::ErrorSeverity::Medium => 2,
                svc_facts::utils::error::ErrorSeverity::High => 1,
                svc_facts::utils::error::ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    };

    match config.format {
        OutputFormat::Plain => println!("{}", report.to_plain()),
        OutputFormat::Json => println!("{}", report.to_json_pretty()?),
    }

    if config.check && !report.all_true() {
        tracing::info!("❌ Service '{}' is not running", config.service);
        std::process::exit(1);
    }

    tracing::info!("✅ Fact collection completed");
    Ok(())
}

async fn collect(config: &CliConfig) -> svc_facts::Result<FactReport> {
    match config.manager {
        ManagerKind::Systemctl if config.user => {
            run_collection(SystemctlManager::user(), config).await
        }
        ManagerKind::Systemctl => run_collection(SystemctlManager::new(), config).await,
        ManagerKind::Process => run_collection(ProcessManager::new(), config).await,
    }
}

async fn run_collection<M>(manager: M, config: &CliConfig) -> svc_facts::Result<FactReport>
where
    M: ServiceManager + Clone + Send + Sync + 'static,
{
    let probe = ServiceStatusProbe::with_timeout(
        manager,
        Duration::from_secs(config.query_timeout_seconds()),
    );
    let collector =
        FactCollector::new_with_monitoring(probe, config.concurrent_probes(), config.monitor);
    collector.collect(&config.fact_specs()).await
}
