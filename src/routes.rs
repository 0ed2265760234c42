use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::config;
use crate::handlers::{protected, public};
use crate::middleware::require_auth;

pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Inbound provider webhooks (unauthenticated, unverified)
        .merge(webhook_routes())
        // Everything else sits behind the bearer gate
        .merge(protected_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn webhook_routes() -> Router {
    Router::new()
        .route("/webhooks/vapi", post(public::webhooks::vapi))
        .route("/webhooks/stripe", post(public::webhooks::stripe))
}

fn protected_routes() -> Router {
    use axum::routing::patch;

    Router::new()
        // CRM records
        .route(
            "/api/clients",
            post(protected::clients::create).get(protected::clients::list),
        )
        .route("/api/projects", post(protected::projects::create))
        .route("/api/appointments", post(protected::appointments::create))
        .route("/api/invoices", post(protected::invoices::create))
        .route("/api/payments", post(protected::payments::create))
        // Voice agents
        .route("/api/voice-agents", post(protected::voice_agents::create))
        .route(
            "/api/voice-agents/:agent_id",
            patch(protected::voice_agents::update).delete(protected::voice_agents::remove),
        )
        .route(
            "/api/voice-agents/:agent_id/call",
            post(protected::voice_agents::call),
        )
        .route(
            "/voice-agents/:agent_id/logs",
            get(protected::voice_agents::logs),
        )
        // Payment processor
        .route("/api/stripe/payment-intent", post(protected::billing::payment_intent))
        .route("/api/stripe/customer", post(protected::billing::customer))
        .route("/api/stripe/invoice", post(protected::billing::invoice))
        // Calendar
        .route("/api/google-calendar/auth-url", get(protected::calendar::auth_url))
        .route("/api/google-calendar/callback", post(protected::calendar::callback))
        .route("/api/google-calendar/event", post(protected::calendar::create_event))
        // Reporting
        .route("/api/analytics", post(protected::analytics::report))
        // Telephony
        .route("/sms/send", post(protected::messaging::send_sms))
        .route("/phone-numbers", get(protected::messaging::phone_numbers))
        // Audit trail
        .route("/api/activities", get(protected::activities::list))
        .layer(middleware::from_fn(require_auth))
}

async fn root() -> Json<Value> {
    let cfg = config();

    Json(json!({
        "success": true,
        "message": "Operations Dashboard API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
        "integrations": {
            "vapi": cfg.vapi.enabled(),
            "stripe": cfg.stripe.enabled(),
            "twilio": cfg.twilio.enabled(),
            "google_calendar": cfg.google.enabled(),
        }
    }))
}

async fn health() -> Json<Value> {
    let cfg = config();

    Json(json!({
        "success": true,
        "status": "healthy",
        "timestamp": chrono::Utc::now(),
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "database": cfg.database.enabled(),
            "vapi": cfg.vapi.enabled(),
            "stripe": cfg.stripe.enabled(),
            "twilio": cfg.twilio.enabled(),
            "google_calendar": cfg.google.enabled(),
        }
    }))
}
