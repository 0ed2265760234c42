use opsdash_api::config::config;
use opsdash_api::routes;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL and provider keys.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config();
    tracing::info!(
        "integrations: database={} vapi={} stripe={} twilio={} google_calendar={}",
        config.database.enabled(),
        config.vapi.enabled(),
        config.stripe.enabled(),
        config.twilio.enabled(),
        config.google.enabled(),
    );

    let app = routes::app();

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
