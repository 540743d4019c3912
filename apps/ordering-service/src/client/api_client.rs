//! Storefront HTTP client.
//!
//! Talks to the ordering API the same way the storefront and the admin
//! console do. Failures are returned as-is; nothing is retried.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::application::dto::{
    LoginRequestDto, LoginResponseDto, OrderDto, PlaceOrderDto, PlacedOrderDto, UpdateOrderDto,
};
use crate::domain::ordering::StatusFilter;
use crate::infrastructure::http::{ErrorResponse, IDEMPOTENCY_KEY_HEADER};

/// Errors from the storefront API.
#[derive(Debug, Error)]
pub enum ApiClientError {
    /// Base URL or path could not be turned into a request URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Connection, timeout or other transport failure.
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// `error` field of the body, or the raw body.
        message: String,
    },

    /// Success response that did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiClientError {
    /// True for a 404 answer.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// True for a 401 answer.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }
}

/// HTTP client for the ordering API.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl StorefrontClient {
    /// Create a client for the API at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiClientError::InvalidUrl(e.to_string()))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiClientError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Attach an admin bearer token to every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// `POST /orders`.
    pub async fn place_order(
        &self,
        order: &PlaceOrderDto,
        idempotency_key: Option<&str>,
    ) -> Result<PlacedOrderDto, ApiClientError> {
        let mut request = self.request(Method::POST, &["orders"])?.json(order);
        if let Some(key) = idempotency_key {
            request = request.header(IDEMPOTENCY_KEY_HEADER, key);
        }
        Self::send(request).await
    }

    /// `GET /orders/{id}`.
    pub async fn get_order(&self, order_id: &str) -> Result<OrderDto, ApiClientError> {
        Self::send(self.request(Method::GET, &["orders", order_id])?).await
    }

    /// `POST /admin/login`.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginResponseDto, ApiClientError> {
        let body = LoginRequestDto {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post_json(&["admin", "login"], &body).await
    }

    /// `GET /admin/orders?status=<filter>`.
    pub async fn list_admin_orders(
        &self,
        filter: StatusFilter,
    ) -> Result<Vec<OrderDto>, ApiClientError> {
        let request = self
            .request(Method::GET, &["admin", "orders"])?
            .query(&[("status", filter.to_string())]);
        Self::send(request).await
    }

    /// `PUT /admin/orders/{id}`.
    pub async fn update_order(
        &self,
        order_id: &str,
        update: &UpdateOrderDto,
    ) -> Result<OrderDto, ApiClientError> {
        let request = self
            .request(Method::PUT, &["admin", "orders", order_id])?
            .json(update);
        Self::send(request).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiClientError> {
        Self::send(self.request(Method::POST, segments)?.json(body)).await
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ApiClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        let request = self.client.request(method, url);
        Ok(match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiClientError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiClientError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(Self::status_error(status, body));
        }
        serde_json::from_str(&body).map_err(|e| ApiClientError::Decode(e.to_string()))
    }

    fn status_error(status: StatusCode, body: String) -> ApiClientError {
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        tracing::debug!(status = status.as_u16(), message = %message, "Storefront API error");

        ApiClientError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::CustomerDto;
    use crate::domain::ordering::OrderStatus;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> StorefrontClient {
        StorefrontClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn place_order_sends_key_and_decodes_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/orders"))
            .and(header(IDEMPOTENCY_KEY_HEADER, "k-1"))
            .and(body_partial_json(serde_json::json!({"type": "takeaway"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "orderId": "o-1",
                "orderNumber": "RD-123456",
                "status": "pending",
                "estimatedTime": 45
            })))
            .expect(1)
            .mount(&server)
            .await;

        let order = PlaceOrderDto {
            order_type: "takeaway".to_string(),
            customer: CustomerDto::default(),
            ..PlaceOrderDto::default()
        };
        let placed = client(&server)
            .place_order(&order, Some("k-1"))
            .await
            .unwrap();

        assert_eq!(placed.order_id, "o-1");
        assert_eq!(placed.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn error_body_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orders/missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"error": "Order not found"})),
            )
            .mount(&server)
            .await;

        let err = client(&server).get_order("missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "HTTP 404: Order not found");
    }

    #[tokio::test]
    async fn admin_requests_carry_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/orders"))
            .and(query_param("status", "active"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let orders = client(&server)
            .with_token("tok-1")
            .list_admin_orders(StatusFilter::Active)
            .await
            .unwrap();
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn unauthorized_is_flagged() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"error": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .login("admin@reddragon.com", "wrong")
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn unexpected_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orders/o-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client(&server).get_order("o-1").await.unwrap_err();
        assert!(matches!(err, ApiClientError::Decode(_)));
    }

    #[test]
    fn rejects_unparseable_base_url() {
        assert!(matches!(
            StorefrontClient::new("not a url", Duration::from_secs(1)),
            Err(ApiClientError::InvalidUrl(_))
        ));
    }
}
