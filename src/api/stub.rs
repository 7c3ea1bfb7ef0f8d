//! In-process stand-in for the clinic backend, used by tests

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use super::client::REQUEST_ID_HEADER;

/// A request seen by the stub
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: &'static str,
    pub id: String,
    pub authorization: Option<String>,
    pub request_id: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
pub struct StubBackend {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl StubBackend {
    /// Booking id the stub always fails on
    pub const FAILING_ID: &'static str = "broken";

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str, id: String, headers: &HeaderMap, body: Option<Value>) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        self.calls.lock().unwrap().push(RecordedCall {
            method,
            id,
            authorization: header("authorization"),
            request_id: header(REQUEST_ID_HEADER),
            body,
        });
    }

    fn router(self) -> Router {
        Router::new()
            .route("/api/v1/bookings", get(list_bookings))
            .route("/api/v1/bookings/:id", put(update_booking).delete(delete_booking))
            .with_state(self)
    }
}

/// Serve the stub on an ephemeral loopback port and return its base URL
pub async fn spawn_backend(stub: StubBackend) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, stub.router()).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn list_bookings(State(stub): State<StubBackend>, headers: HeaderMap) -> Json<Value> {
    stub.record("GET", String::new(), &headers, None);

    Json(json!({
        "success": true,
        "count": 1,
        "data": [{
            "_id": "b1",
            "user": { "_id": "u1", "name": "Ann Smith" },
            "dentist": { "_id": "d7", "name": "Dr. Lee" },
            "apptDate": "2024-03-01T09:00:00.000Z"
        }]
    }))
}

async fn update_booking(
    State(stub): State<StubBackend>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    stub.record("PUT", id.clone(), &headers, Some(body.clone()));

    if id == StubBackend::FAILING_ID {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "message": "Cannot update booking" })),
        );
    }

    (StatusCode::OK, Json(json!({ "success": true, "data": body })))
}

async fn delete_booking(
    State(stub): State<StubBackend>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    stub.record("DELETE", id.clone(), &headers, None);

    if id == StubBackend::FAILING_ID {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "message": "Cannot delete booking" })),
        );
    }

    (StatusCode::OK, Json(json!({ "success": true, "data": {} })))
}
