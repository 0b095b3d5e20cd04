use mock_server::{AppState, ListEnvelope};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let envelope = match std::env::var("MOCK_ENVELOPE") {
        Ok(name) => ListEnvelope::parse(&name).unwrap_or_else(|| {
            tracing::warn!("unknown MOCK_ENVELOPE {name:?}, using data");
            ListEnvelope::Data
        }),
        Err(_) => ListEnvelope::default(),
    };

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, ?envelope, "listening");
    mock_server::run_with(listener, AppState::new(mock_server::seed_posts(), envelope)).await
}
