mod console;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flightwatch_core::{
    create_event_channel, load_config_or_default, validate_config, FlightDataSource,
    FlightTracker, HttpFlightDataSource,
};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Console output belongs to the event printer; logs go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = std::env::var("FLIGHTWATCH_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("flightwatch.toml"));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;

    info!(
        passengers = config.tracker.passengers.len(),
        workers = config.tracker.worker_count,
        source = %config.source.base_url,
        "Configuration loaded"
    );

    let source: Arc<dyn FlightDataSource> =
        Arc::new(HttpFlightDataSource::new(config.source.clone()));

    let (events, events_rx) = create_event_channel(config.events.buffer_size);
    let printer = tokio::spawn(console::print_events(events_rx));

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            shutdown_signal().await;
            warn!("Shutdown signal received, cancelling");
            cancel.cancel();
        }
    });

    let tracker = FlightTracker::new(config.tracker.clone(), source).with_events(events);
    let result = tracker.run(&cancel).await;

    // The tracker holds the last event handle; dropping it lets the printer drain and exit.
    drop(tracker);
    let _ = printer.await;

    let report = result.context("Flight tracking failed")?;
    for flight in report.rejected() {
        warn!(
            passenger = %flight.passenger,
            "Flight {} was not tracked",
            flight.flight_number
        );
    }
    info!(flights = report.flights.len(), "Tracking complete");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
