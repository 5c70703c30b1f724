//! HttpClient against an in-process evaluation service

use promo_client::{ClientConfig, ClientError, EvaluationCoordinator, HttpClient, VerifyOutcome};
use promo_engine::api::build_app;
use promo_engine::{Config, EvaluationContext, ServerState, evaluate, load_campaign_set};
use rust_decimal::Decimal;
use shared::models::{CartLine, CartSnapshot};
use std::time::Duration;
use tokio::net::TcpListener;

const CAMPAIGNS: &str = r#"{
    "campaigns": [
        {"id": "gift", "name": "Gift roll", "type": "thresholdGift",
         "minAmount": 2500, "targetCategory": "rolls", "targetPrice": 1},
        {"id": "pizza-3", "name": "Third pizza", "type": "nthItem", "n": 3,
         "targetCategory": "pizza", "selectionPolicy": "cheapest", "targetPrice": 1}
    ],
    "loyaltyRules": [{"id": "all", "scope": "global", "percent": 10}]
}"#;

/// Start the service on an ephemeral port, return its base URL
async fn spawn_service() -> (String, ServerState) {
    let report = load_campaign_set(CAMPAIGNS).unwrap();
    let state = ServerState::new(Config::with_overrides(0, "campaigns.json"), report.set);
    let app = build_app(&state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), state)
}

fn cart() -> Vec<CartLine> {
    vec![
        CartLine::new("p1", "Margherita", "pizza", Decimal::from(900)),
        CartLine::new("p2", "Pepperoni", "pizza", Decimal::from(1100)).with_quantity(2),
        CartLine::new("r1", "Roll", "rolls", Decimal::from(350)),
    ]
}

#[tokio::test]
async fn test_remote_matches_local_evaluation() {
    let (url, state) = spawn_service().await;
    let client = HttpClient::new(&ClientConfig::new(url)).unwrap();

    let remote = client.evaluate(&cart()).await.unwrap();
    let local = evaluate(
        &CartSnapshot::new(cart()),
        &state.campaign_set(),
        &EvaluationContext::now_in(chrono_tz::Tz::UTC),
    );

    assert_eq!(remote.cart_total, local.cart_total);
    assert_eq!(remote.points_earned, local.points.total);
    assert_eq!(remote.applied_campaigns, local.applied_campaigns);
}

#[tokio::test]
async fn test_rejected_cart_is_status_error() {
    let (url, _) = spawn_service().await;
    let client = HttpClient::new(&ClientConfig::new(url)).unwrap();

    let invalid = vec![CartLine::new("p1", "Pizza", "pizza", Decimal::from(-5))];
    match client.evaluate(&invalid).await {
        Err(ClientError::Status { status, body }) => {
            assert_eq!(status, 400);
            assert!(body.contains("p1"));
        }
        other => panic!("expected a status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_health() {
    let (url, _) = spawn_service().await;
    let client = HttpClient::new(&ClientConfig::new(format!("{}/", url))).unwrap();

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.campaigns, 2);
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    // Bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::new(format!("http://{}", addr)).with_timeout(Duration::from_secs(2));
    let client = HttpClient::new(&config).unwrap();
    let err = client.evaluate(&cart()).await.unwrap_err();
    assert_eq!(err.code(), shared::ErrorCode::RemoteUnavailable);
}

#[tokio::test]
async fn test_coordinator_over_http() {
    let (url, state) = spawn_service().await;
    let config = ClientConfig::new(url);
    let client = HttpClient::new(&config).unwrap();
    let coordinator = EvaluationCoordinator::new(client, state.campaign_set(), &config);

    let preview = coordinator.update_cart(cart()).unwrap();
    let VerifyOutcome::Authoritative(view) = coordinator.verify().await else {
        panic!("expected an authoritative outcome");
    };
    assert_eq!(view.cart_total, preview.cart_total);
    assert_eq!(view.points_earned, preview.points_earned);
}
