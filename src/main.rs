use tower_http::trace::TraceLayer;
use tracing::{info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hawaii_climate_service::api::{create_router, AppState};
use hawaii_climate_service::config::Config;
use hawaii_climate_service::db::{self, MeasurementRepository, StationRepository};
use hawaii_climate_service::services::ClimateService;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with environment filter support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,hawaii_climate_service=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;
    info!("Starting Hawaii climate service with config: {:?}", config);

    // Open the dataset read-only; a missing file is fatal here
    info!("Opening climate dataset...");
    let pool = db::connect_read_only(&config.database_url).await?;
    info!("Dataset connection established");

    // Create repositories
    let measurement_repo = MeasurementRepository::new(pool.clone());
    let station_repo = StationRepository::new(pool.clone());

    // Create services
    let climate_service = ClimateService::new(measurement_repo, station_repo);

    // Create API router
    let app_state = AppState { climate_service };
    let app = create_router(app_state).layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
