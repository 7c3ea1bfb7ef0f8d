//! Clinic backend REST client
//!
//! HTTP client for the booking endpoints. Requests are sent once; there is
//! no retry.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;

use super::error::{ClientError, ClientResult};
use crate::booking::{Booking, BookingList, BookingUpdate};
use crate::routes::{BackendRoutes, DEFAULT_BACKEND_URL};

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Booking operations offered by the backend
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// `GET /bookings`
    async fn list_bookings(&self, token: &str) -> ClientResult<Vec<Booking>>;

    /// `PUT /bookings/{id}`
    async fn update_booking(&self, token: &str, id: &str, update: &BookingUpdate)
        -> ClientResult<()>;

    /// `DELETE /bookings/{id}`
    async fn delete_booking(&self, token: &str, id: &str) -> ClientResult<()>;
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend URL without the API root (e.g. "http://localhost:5000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// reqwest-backed [`BookingApi`]
pub struct HttpBookingApi {
    client: Client,
    routes: BackendRoutes,
}

impl HttpBookingApi {
    pub fn new(config: ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            routes: BackendRoutes::new(&config.base_url),
        }
    }

    pub fn routes(&self) -> &BackendRoutes {
        &self.routes
    }

    /// Attach auth and correlation headers, send, and check the status
    async fn send(&self, request: RequestBuilder, token: &str) -> ClientResult<Response> {
        let request_id = uuid::Uuid::new_v4().to_string();

        let request = request
            .bearer_auth(token)
            .header(REQUEST_ID_HEADER, &request_id)
            .build()
            .map_err(ClientError::Request)?;

        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!(request_id = %request_id, %method, %url, "Sending backend request");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(ClientError::from_transport)
            .map_err(|e| {
                tracing::error!(request_id = %request_id, %method, %url, error = %e, "Backend request failed");
                e
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = error_message(&text);
        tracing::error!(
            request_id = %request_id,
            %method,
            %url,
            status = status.as_u16(),
            message = %message,
            "Backend returned an error"
        );

        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn list_bookings(&self, token: &str) -> ClientResult<Vec<Booking>> {
        let response = self.send(self.client.get(self.routes.bookings()), token).await?;

        let list: BookingList = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        Ok(list.into_bookings())
    }

    async fn update_booking(
        &self,
        token: &str,
        id: &str,
        update: &BookingUpdate,
    ) -> ClientResult<()> {
        let request = self.client.put(self.routes.booking(id)).json(update);
        self.send(request, token).await?;
        Ok(())
    }

    async fn delete_booking(&self, token: &str, id: &str) -> ClientResult<()> {
        self.send(self.client.delete(self.routes.booking(id)), token)
            .await?;
        Ok(())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Pull the human message out of an error body, falling back to the raw text
fn error_message(text: &str) -> String {
    serde_json::from_str::<ErrorBody>(text)
        .ok()
        .and_then(|body| body.message.or(body.error))
        .unwrap_or_else(|| text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stub::{spawn_backend, StubBackend};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://project-s-backend-cyan.vercel.app");
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(r#"{"success":false,"message":"nope"}"#), "nope");
        assert_eq!(error_message(r#"{"error":"bad token"}"#), "bad token");
        assert_eq!(error_message("Internal Server Error\n"), "Internal Server Error");
    }

    #[tokio::test]
    async fn test_update_sends_bearer_and_body() {
        let stub = StubBackend::default();
        let api = HttpBookingApi::new(ClientConfig {
            base_url: spawn_backend(stub.clone()).await,
            ..Default::default()
        });

        let update = BookingUpdate::reschedule(Utc.with_ymd_and_hms(2024, 3, 2, 10, 30, 0).unwrap());
        api.update_booking("tok-1", "b1", &update).await.unwrap();

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "PUT");
        assert_eq!(calls[0].id, "b1");
        assert_eq!(calls[0].authorization.as_deref(), Some("Bearer tok-1"));
        assert!(calls[0].request_id.is_some());
        assert_eq!(
            calls[0].body,
            Some(serde_json::json!({ "apptDate": "2024-03-02T10:30:00.000Z" }))
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let stub = StubBackend::default();
        let api = HttpBookingApi::new(ClientConfig {
            base_url: spawn_backend(stub.clone()).await,
            ..Default::default()
        });

        api.delete_booking("tok-1", "b1").await.unwrap();

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "DELETE");
        assert_eq!(calls[0].body, None);
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let stub = StubBackend::default();
        let api = HttpBookingApi::new(ClientConfig {
            base_url: spawn_backend(stub.clone()).await,
            ..Default::default()
        });

        let err = api
            .delete_booking("tok-1", StubBackend::FAILING_ID)
            .await
            .unwrap_err();

        match err {
            ClientError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Cannot delete booking");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_bookings() {
        let stub = StubBackend::default();
        let api = HttpBookingApi::new(ClientConfig {
            base_url: spawn_backend(stub.clone()).await,
            ..Default::default()
        });

        let bookings = api.list_bookings("tok-1").await.unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].id, "b1");
        assert_eq!(bookings[0].dentist_name(), Some("Dr. Lee"));
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        // port 9 (discard) is closed on loopback in test environments
        let api = HttpBookingApi::new(ClientConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_ms: 2_000,
        });

        let err = api.delete_booking("tok-1", "b1").await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Unavailable | ClientError::Timeout | ClientError::Request(_)
        ));
    }
}
