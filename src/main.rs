use anyhow::Result;
use clap::Parser;
use smartmon_collector::config::PluginConfig;
use smartmon_collector::metric::{Metric, MetricTemplate};
use smartmon_collector::plugin::SmartmonCollector;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/Default.toml")]
    config: String,

    /// Path to the smartctl executable (overrides config)
    #[arg(long, env = "SMARTMON_SMARTCTL_PATH")]
    smartctl_path: Option<String>,

    /// Run smartctl under sudo -n (overrides config)
    #[arg(long, env = "SMARTMON_SUDO")]
    sudo: Option<bool>,

    /// Subscription pattern, repeatable; defaults to the full catalog
    #[arg(short, long = "namespace")]
    namespaces: Vec<String>,

    /// Collection interval in seconds; runs one cycle when omitted
    #[arg(short, long, env = "SMARTMON_INTERVAL")]
    interval: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting SMARTMON collector v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = PluginConfig::load(&args.config)?;

    // Override with CLI arguments if provided
    if let Some(path) = args.smartctl_path {
        config.smartctl_path = path;
    }
    if let Some(sudo) = args.sudo {
        config.sudo = sudo;
    }

    info!("Configuration loaded successfully");
    info!(
        "smartctl path: {}, sudo: {}",
        config.smartctl_path, config.sudo
    );

    let collector = Arc::new(SmartmonCollector::new());
    let subscriptions: Arc<Vec<MetricTemplate>> = Arc::new(if args.namespaces.is_empty() {
        collector.catalog()
    } else {
        args.namespaces
            .iter()
            .map(|pattern| MetricTemplate::from_pattern(pattern))
            .collect()
    });
    let config = Arc::new(config);

    match args.interval {
        None => {
            let metrics =
                run_cycle(collector.clone(), subscriptions.clone(), config.clone()).await?;
            print_metrics(&metrics)?;
        }
        Some(seconds) => {
            info!("Collecting every {} second(s)", seconds);
            let mut ticker = interval(Duration::from_secs(seconds));
            loop {
                ticker.tick().await;
                match run_cycle(collector.clone(), subscriptions.clone(), config.clone()).await
                {
                    Ok(metrics) => {
                        if let Err(e) = print_metrics(&metrics) {
                            error!("Failed to write metrics: {}", e);
                        }
                    }
                    Err(e) => warn!("Collection cycle failed: {}", e),
                }
            }
        }
    }

    Ok(())
}

/// Run one collection cycle off the async workers; the core is synchronous
/// and may block on the smartctl subprocess.
async fn run_cycle(
    collector: Arc<SmartmonCollector>,
    subscriptions: Arc<Vec<MetricTemplate>>,
    config: Arc<PluginConfig>,
) -> Result<Vec<Metric>> {
    let metrics =
        tokio::task::spawn_blocking(move || collector.collect(&subscriptions, &config)).await??;
    Ok(metrics)
}

fn print_metrics(metrics: &[Metric]) -> Result<()> {
    for metric in metrics {
        println!("{}", metric.to_json()?);
    }
    info!("Collected {} metric(s)", metrics.len());
    Ok(())
}
