use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metro_board::arrivals::{ArrivalBoard, MetroClient, MetroClientConfig, Poller};
use metro_board::config::BoardConfig;
use metro_board::directory::StationDirectory;
use metro_board::selection::{JsonFileStore, SelectionState};

/// How often the terminal view is redrawn.
const RENDER_INTERVAL: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "metro_board=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = BoardConfig::default();
    if let Ok(url) = std::env::var("METRO_API_URL") {
        config = config.with_base_url(url);
    }
    if let Ok(path) = std::env::var("METRO_STORE") {
        config = config.with_store_path(path);
    }

    let store = JsonFileStore::open(&config.store_path).expect("Failed to open selection store");
    let selection = Arc::new(SelectionState::load(Arc::new(store)));
    let directory = StationDirectory::taipei();

    let client_config = MetroClientConfig::new()
        .with_base_url(config.base_url.clone())
        .with_timeout(config.request_timeout_secs);
    let client = MetroClient::new(client_config).expect("Failed to create metro client");

    let board = Arc::new(ArrivalBoard::new());
    let poller = Arc::new(Poller::new(
        client,
        selection.clone(),
        board.clone(),
        config.poll_interval(),
    ));

    let snapshot = selection.snapshot();
    info!(line = %snapshot.line, station = %snapshot.station, "starting arrival board");
    println!(
        "Metro arrival board — {} ({} line)",
        snapshot.station,
        snapshot.line.name()
    );
    println!(
        "Stations on this line: {}",
        directory.stations_of(snapshot.line).join("、")
    );
    println!();

    tokio::spawn({
        let poller = poller.clone();
        async move { poller.run().await }
    });

    let mut tick = tokio::time::interval(RENDER_INTERVAL);
    loop {
        tick.tick().await;

        let snapshot = selection.snapshot();
        let entries = board.entries();
        if entries.is_empty() {
            println!("{}: no arrival data yet", snapshot.station);
            continue;
        }

        println!("{}:", snapshot.station);
        for entry in entries {
            let marker = if entry.is_arriving() { "▶" } else { " " };
            println!(
                " {} 往 {}  {}  車次 {}",
                marker, entry.destination, entry.countdown, entry.train_number
            );
        }
        println!();
    }
}
