use dialtone::application::{CallControlService, TokenIssuer};
use dialtone::config::Config;
use dialtone::infrastructure::provider::{TelephonyProvider, TwilioGateway};
use dialtone::infrastructure::twiml::TwimlSerializer;
use dialtone::interface::api::{build_router, init_metrics, AppState};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading configuration
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dialtone=info,tower_http=info".into()),
        )
        .init();

    info!("Starting Dialtone signaling backend");

    // Configuration is read once; missing options surface at point of use
    let config = Arc::new(Config::from_env());

    let provider: Arc<dyn TelephonyProvider> = Arc::new(TwilioGateway::new(config.clone()));
    let state = AppState {
        call_control: Arc::new(CallControlService::new(config.clone(), provider)),
        token_issuer: Arc::new(TokenIssuer::new(config.clone())),
        twiml: Arc::new(TwimlSerializer::new()),
    };

    let prometheus_handle = init_metrics();
    let app = build_router(state, prometheus_handle);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on port {}", config.server.port);

    axum::serve(listener, app).await?;

    Ok(())
}
