use ambulance_telemetry::config::SenderConfig;
use ambulance_telemetry::processor::DEFAULT_OFFLINE_THRESHOLD_SECS;
use ambulance_telemetry::simulator::{self, FleetSimulator};
use ambulance_telemetry::ticker::ticker;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = SenderConfig::load();

    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .init();

    let client = reqwest::Client::new();
    let mut rng = StdRng::from_entropy();
    let mut fleet = FleetSimulator::new(config.fleet_size, &mut rng);

    info!(
        "Simulating {} ambulances -> {} every {:?}",
        fleet.len(),
        config.api_url,
        config.interval
    );

    if config.interval.as_secs() >= DEFAULT_OFFLINE_THRESHOLD_SECS as u64 {
        warn!(
            "Send interval {:?} is not below the default offline threshold of {}s, vehicles will flap to OFFLINE",
            config.interval, DEFAULT_OFFLINE_THRESHOLD_SECS
        );
    }

    let mut ticker = ticker(config.interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                info!("Updating ambulance data...");
                let payloads = fleet.next_cycle(&mut rng);
                let delivered = simulator::send_cycle(&client, &config.api_url, &payloads).await;
                info!("Cycle done: {}/{} delivered", delivered, payloads.len());
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping sender");
                return Ok(());
            }
        }
    }
}
