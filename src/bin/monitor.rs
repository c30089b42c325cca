use ambulance_telemetry::config::MonitorConfig;
use ambulance_telemetry::dashboard::{self, FleetView};
use ambulance_telemetry::ticker::ticker;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = MonitorConfig::load();

    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .init();

    let client = reqwest::Client::builder()
        .timeout(config.interval.max(std::time::Duration::from_secs(1)))
        .build()?;
    let mut view = FleetView::new();

    info!("Polling {} every {:?}", config.status_url, config.interval);

    let mut ticker = ticker(config.interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match dashboard::poll(&client, &config.status_url).await {
                    Ok(records) => {
                        view.merge(records);
                        info!("\n{}", view.render());
                    }
                    // Keep showing the last good view.
                    Err(e) => warn!("Polling error: {}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping monitor");
                return Ok(());
            }
        }
    }
}
