use clap::Parser;
use std::time::Duration;
use svc_facts::config::toml_config::TomlConfig;
use svc_facts::utils::{logger, validation::Validate};
use svc_facts::{
    ConfigProvider, FactCollector, FactReport, ManagerKind, OutputFormat, ProcessManager,
    ServiceManager, ServiceStatusProbe, SystemctlManager,
};

#[derive(Parser)]
#[command(name = "toml-facts")]
#[command(about = "Collect service-status facts from a TOML catalog")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "facts.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the service manager from config
    #[arg(long, value_enum)]
    manager: Option<ManagerKind>,

    /// Dry run - show what would be probed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based fact collection");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    // 應用命令列覆蓋設定
    let manager_kind = match args.manager {
        Some(kind) => {
            tracing::info!("🔧 Service manager overridden to: {}", kind);
            kind
        }
        None => config.manager_kind()?,
    };

    // 顯示配置摘要
    display_config_summary(&config, manager_kind, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No services will be probed");
        return Ok(());
    }

    // 決定監控設定
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let report = match collect(&config, manager_kind, monitor_enabled).await {
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

    match config.output_format()? {
        OutputFormat::Plain => println!("{}", report.to_plain()),
        OutputFormat::Json => println!("{}", report.to_json_pretty()?),
    }

    tracing::info!("✅ Collected {} facts", report.len());
    Ok(())
}

async fn collect(
    config: &TomlConfig,
    manager_kind: ManagerKind,
    monitor_enabled: bool,
) -> svc_facts::Result<FactReport> {
    match manager_kind {
        ManagerKind::Systemctl => {
            run_collection(SystemctlManager::new(), config, monitor_enabled).await
        }
        ManagerKind::Process => run_collection(ProcessManager::new(), config, monitor_enabled).await,
    }
}

async fn run_collection<M>(
    manager: M,
    config: &TomlConfig,
    monitor_enabled: bool,
) -> svc_facts::Result<FactReport>
where
    M: ServiceManager + Clone + Send + Sync + 'static,
{
    let probe = ServiceStatusProbe::with_timeout(
        manager,
        Duration::from_secs(config.query_timeout_seconds()),
    );
    let collector =
        FactCollector::new_with_monitoring(probe, config.concurrent_probes(), monitor_enabled);
    collector.collect(&config.fact_specs()).await
}

fn display_config_summary(config: &TomlConfig, manager_kind: ManagerKind, args: &Args) {
    println!("📋 Configuration Summary:");
    println!(
        "  Catalog: {} v{}",
        config.catalog.name, config.catalog.version
    );
    println!("  Manager: {}", manager_kind);
    println!("  Facts: {}", config.facts.len());

    for fact in &config.facts {
        println!("    {} <- {}", fact.name, fact.service);
    }

    println!("  Timeout: {}s", config.timeout_seconds());
    println!("  Concurrent Probes: {}", config.concurrent_probes());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
