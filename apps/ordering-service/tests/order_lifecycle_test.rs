//! Order Lifecycle Integration Tests
//!
//! Drives the full HTTP surface through the production container wiring:
//! checkout → tracking → admin login → status walk to a final state.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use ordering_service::application::dto::{LoginResponseDto, OrderDto, PlacedOrderDto};
use ordering_service::config::load_config_from_string;
use ordering_service::domain::ordering::OrderStatus;
use ordering_service::domain::shared::Money;
use ordering_service::infrastructure::config::DefaultContainer;
use ordering_service::infrastructure::http::{ErrorResponse, create_router};

const CONFIG: &str = r#"
auth:
  jwt_secret: "integration-secret-integration-secret"
  bcrypt_cost: 4
  bootstrap_admin:
    email: "kitchen@reddragon.com"
    password: "wok-and-roll"
"#;

async fn app() -> Router {
    let config = load_config_from_string(CONFIG).unwrap();
    let container = DefaultContainer::from_config(&config);
    container
        .seed_bootstrap_admin(&config.auth.bootstrap_admin)
        .await
        .unwrap();
    create_router(container.app_state("1.0.0-test"))
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Bytes) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body)
}

fn parse<T: DeserializeOwned>(body: &[u8]) -> T {
    serde_json::from_slice(body).unwrap()
}

fn checkout(order_type: &str, address: Option<&str>) -> serde_json::Value {
    let mut customer = serde_json::json!({"name": "Mei Lin", "phone": "9876543210"});
    if let Some(address) = address {
        customer["address"] = serde_json::json!(address);
    }
    serde_json::json!({
        "items": [
            {"dishId": "d1", "name": "Kung Pao Chicken", "price": 180, "quantity": 2},
            {"dishId": "d2", "name": "Spring Rolls", "price": 120, "quantity": 1}
        ],
        "customer": customer,
        "type": order_type,
        "subtotal": 480,
        "tax": 24,
        "total": 504
    })
}

async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/admin/login",
            None,
            Some(serde_json::json!({"email": "kitchen@reddragon.com", "password": "wok-and-roll"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    parse::<LoginResponseDto>(&body).token
}

async fn place(app: &Router) -> PlacedOrderDto {
    let (status, body) = send(
        app,
        request("POST", "/orders", None, Some(checkout("delivery", Some("12 Lotus Road")))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    parse(&body)
}

async fn set_status(app: &Router, token: &str, id: &str, status: &str) -> (StatusCode, Bytes) {
    send(
        app,
        request(
            "PUT",
            &format!("/admin/orders/{id}"),
            Some(token),
            Some(serde_json::json!({"status": status})),
        ),
    )
    .await
}

#[tokio::test]
async fn checkout_prices_reference_cart() {
    let app = app().await;
    let placed = place(&app).await;

    assert_eq!(placed.status, OrderStatus::Pending);
    assert_eq!(placed.estimated_time, 45);
    assert!(placed.order_number.starts_with("RD-"));
    assert_eq!(placed.order_number.len(), 9);

    let (status, body) = send(&app, request("GET", &format!("/orders/{}", placed.order_id), None, None)).await;
    assert_eq!(status, StatusCode::OK);
    let order: OrderDto = parse(&body);
    assert_eq!(order.subtotal, Money::new(480));
    assert_eq!(order.tax, Money::new(24));
    assert_eq!(order.total, Money::new(504));
}

#[tokio::test]
async fn delivery_without_address_is_rejected() {
    let app = app().await;
    let (status, body) = send(&app, request("POST", "/orders", None, Some(checkout("delivery", None)))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!parse::<ErrorResponse>(&body).error.is_empty());
}

#[tokio::test]
async fn unknown_order_is_not_found() {
    let app = app().await;
    let (status, body) = send(&app, request("GET", "/orders/does-not-exist", None, None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(parse::<ErrorResponse>(&body).error, "Order not found");
}

#[tokio::test]
async fn admin_walks_order_to_delivered() {
    let app = app().await;
    let token = login(&app).await;
    let placed = place(&app).await;

    let (_, body) = send(&app, request("GET", &format!("/orders/{}", placed.order_id), None, None)).await;
    let mut previous = parse::<OrderDto>(&body).updated_at;

    for next in ["confirmed", "preparing", "ready", "delivered"] {
        tokio::time::sleep(Duration::from_millis(5)).await;
        let (status, body) = set_status(&app, &token, &placed.order_id, next).await;
        assert_eq!(status, StatusCode::OK, "moving to {next}");

        let order: OrderDto = parse(&body);
        assert_eq!(order.status.as_str(), next);
        assert!(order.updated_at > previous, "updatedAt refreshed on {next}");
        previous = order.updated_at;
    }

    let (_, body) = send(&app, request("GET", &format!("/orders/{}", placed.order_id), None, None)).await;
    let delivered: OrderDto = parse(&body);
    assert!(delivered.confirmed_at.is_some());
    assert!(delivered.completed_at.is_some());

    // Final state is immutable.
    let (status, _) = set_status(&app, &token, &placed.order_id, "cancelled").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(
        &app,
        request(
            "PUT",
            &format!("/admin/orders/{}", placed.order_id),
            Some(&token),
            Some(serde_json::json!({"estimatedTime": 10})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, request("GET", &format!("/orders/{}", placed.order_id), None, None)).await;
    assert_eq!(parse::<OrderDto>(&body), delivered);
}

#[tokio::test]
async fn unauthenticated_update_is_rejected() {
    let app = app().await;
    let placed = place(&app).await;

    let (status, body) = send(
        &app,
        request(
            "PUT",
            &format!("/admin/orders/{}", placed.order_id),
            None,
            Some(serde_json::json!({"status": "confirmed"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(parse::<ErrorResponse>(&body).error, "Unauthorized");

    let (status, _) = set_status(&app, "not-a-token", &placed.order_id, "confirmed").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = send(&app, request("GET", &format!("/orders/{}", placed.order_id), None, None)).await;
    assert_eq!(parse::<OrderDto>(&body).status, OrderStatus::Pending);
}

#[tokio::test]
async fn advance_follows_canonical_chain() {
    let app = app().await;
    let token = login(&app).await;
    let placed = place(&app).await;

    let mut seen = Vec::new();
    loop {
        let (status, body) = send(
            &app,
            request(
                "POST",
                &format!("/admin/orders/{}/advance", placed.order_id),
                Some(&token),
                None,
            ),
        )
        .await;
        if status == StatusCode::BAD_REQUEST {
            break;
        }
        assert_eq!(status, StatusCode::OK);
        seen.push(parse::<OrderDto>(&body).status);
    }

    assert_eq!(
        seen,
        vec![
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Delivered,
        ]
    );
}

#[tokio::test]
async fn idempotency_key_replays_placement() {
    let app = app().await;

    let make = || {
        let mut req = request("POST", "/orders", None, Some(checkout("takeaway", None)));
        req.headers_mut()
            .insert("idempotency-key", "checkout-7".parse().unwrap());
        req
    };

    let (first_status, first) = send(&app, make()).await;
    let (second_status, second) = send(&app, make()).await;
    assert_eq!(first_status, StatusCode::CREATED);
    assert_eq!(second_status, StatusCode::CREATED);
    assert_eq!(parse::<PlacedOrderDto>(&first), parse::<PlacedOrderDto>(&second));

    let token = login(&app).await;
    let (_, body) = send(&app, request("GET", "/admin/orders", Some(&token), None)).await;
    assert_eq!(parse::<Vec<OrderDto>>(&body).len(), 1);
}
