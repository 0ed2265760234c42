mod common;

use anyhow::Result;
use axum::http::StatusCode;
use tower::ServiceExt;

use opsdash_api::routes::app;

#[tokio::test]
async fn root_reports_integration_flags() -> Result<()> {
    let res = app().oneshot(common::get("/")).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_json(res).await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "operational");

    let integrations = body
        .get("integrations")
        .and_then(|v| v.as_object())
        .expect("integrations object");
    for service in ["vapi", "stripe", "twilio", "google_calendar"] {
        assert!(
            integrations.get(service).map(|v| v.is_boolean()).unwrap_or(false),
            "missing boolean flag for {}: {}",
            service,
            body
        );
    }

    Ok(())
}

#[tokio::test]
async fn health_reports_service_flags() -> Result<()> {
    let res = app().oneshot(common::get("/health")).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_json(res).await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
    assert!(body["services"]["database"].is_boolean());

    Ok(())
}

#[tokio::test]
async fn unknown_route_is_404() -> Result<()> {
    let res = app().oneshot(common::get("/nope")).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
