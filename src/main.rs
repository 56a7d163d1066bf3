mod driver;

use driver::{DriverConfig, LogFrontend, TickDriver};
use tracing::info;
use tracing_subscriber::EnvFilter;

// Faster allocator
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("SNAKE_LOG_FORMAT").is_ok_and(|format| format == "json") {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    color_eyre::install()?;
    info!("Hello Snakes!");

    let config = DriverConfig::from_env()?;
    info!(
        width = config.session.grid.width(),
        height = config.session.grid.height(),
        tick_ms = config.tick.as_millis() as u64,
        "starting autopilot"
    );
    TickDriver::new(config, LogFrontend::default())?.run().await
}
