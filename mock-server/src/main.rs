use mock_server::MockConfig;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let user_id = std::env::var("BREWFATHER_USER_ID").unwrap_or_else(|_| "user".to_string());
    let api_key = std::env::var("BREWFATHER_API_KEY").unwrap_or_else(|_| "key".to_string());

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "mock brewfather listening");
    mock_server::run(listener, MockConfig::new(&user_id, &api_key)).await
}
