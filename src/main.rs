//! TurfBook API server
//!
//! Main application entry point

use tracing::info;

use TurfBook::{
    config::Settings,
    database::{self, DatabaseService},
    handlers,
    middleware::rate_limit::{RateLimitConfig, RateLimitMiddleware},
    services::ServiceFactory,
    state::AppState,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment and configuration
    dotenv::dotenv().ok();
    let settings = Settings::new()?;
    settings.validate()?;
    
    // Initialize logging; the guard must outlive the server loop
    let _log_guard = logging::init_logging(&settings.logging)?;
    
    info!("Starting TurfBook API server...");
    
    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = database::create_pool(&settings.database).await?;
    
    // Run database migrations
    database::run_migrations(&db_pool).await?;
    
    // Initialize services
    info!("Initializing services...");
    let database_service = DatabaseService::new(db_pool.clone());
    let services = ServiceFactory::new(settings.clone(), database_service)?;
    
    let rate_limiter = RateLimitMiddleware::new(RateLimitConfig::from_settings(&settings.rate_limit));
    
    let state = AppState {
        settings: settings.clone(),
        db: db_pool,
        services,
        rate_limiter,
    };
    
    // Build the router and start serving
    let app = handlers::build_router(state);
    
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    
    info!(addr = %addr, "TurfBook API is ready");
    axum::serve(listener, app).await?;
    
    info!("TurfBook API has been shut down.");
    
    Ok(())
}
