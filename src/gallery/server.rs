//! HTTP API for the drawing gallery.
//!
//! Routes:
//! - `GET  /api/health`   → `{"status":"ok"}`
//! - `GET  /api/drawings` → `{"drawings":[…]}` newest first
//! - `POST /api/drawings` → 201 + stored entry, 400 on a bad payload
//!
//! Validation happens before persistence, so a rejected request never
//! touches the store. Store failures collapse to a generic 500; details stay
//! in the server log.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{error, info};
use serde::{Deserialize, Serialize};
use warp::Filter;
use warp::http::StatusCode;

use super::store::{DrawingEntry, DrawingStore};

/// Request bodies above this size are rejected outright.
const MAX_BODY_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Deserialize)]
struct SubmitRequest {
    /// Kept as a raw value so a non-string payload can be rejected with a
    /// 400 instead of a deserialization rejection.
    #[serde(rename = "imageData", default)]
    image_data: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct ListResponse {
    drawings: Vec<DrawingEntry>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Builds the API filter tree around a shared store.
pub fn routes(
    store: Arc<DrawingStore>,
    min_payload_len: usize,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let store_filter = warp::any().map(move || store.clone());

    let health = warp::path!("api" / "health")
        .and(warp::get())
        .and_then(handle_health);

    let list = warp::path!("api" / "drawings")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(handle_list);

    let submit = warp::path!("api" / "drawings")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(store_filter)
        .and(warp::any().map(move || min_payload_len))
        .and_then(handle_submit);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST"])
        .allow_headers(vec!["content-type"]);

    health.or(list).or(submit).with(cors)
}

/// Binds and serves the API until the process exits.
pub async fn run(store: DrawingStore, addr: SocketAddr, min_payload_len: usize) -> Result<()> {
    let api = routes(Arc::new(store), min_payload_len);
    let (bound, serving) = warp::serve(api)
        .try_bind_ephemeral(addr)
        .with_context(|| format!("failed to bind gallery API to {addr}"))?;
    info!("Gallery API listening on http://{bound}");
    serving.await;
    Ok(())
}

async fn handle_health() -> Result<impl warp::Reply, warp::Rejection> {
    Ok(warp::reply::json(&HealthResponse { status: "ok" }))
}

async fn handle_list(store: Arc<DrawingStore>) -> Result<impl warp::Reply, warp::Rejection> {
    match store.list() {
        Ok(drawings) => Ok(warp::reply::with_status(
            warp::reply::json(&ListResponse { drawings }),
            StatusCode::OK,
        )),
        Err(err) => {
            error!("Failed to load drawings: {err:#}");
            Ok(warp::reply::with_status(
                warp::reply::json(&ErrorBody {
                    error: "failed to load drawings",
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn handle_submit(
    body: SubmitRequest,
    store: Arc<DrawingStore>,
    min_payload_len: usize,
) -> Result<impl warp::Reply, warp::Rejection> {
    let image_data = match body.image_data {
        Some(serde_json::Value::String(data)) if data.len() >= min_payload_len => data,
        _ => {
            return Ok(warp::reply::with_status(
                warp::reply::json(&ErrorBody {
                    error: "imageData field is required",
                }),
                StatusCode::BAD_REQUEST,
            ));
        }
    };

    match store.insert(image_data) {
        Ok(entry) => Ok(warp::reply::with_status(
            warp::reply::json(&entry),
            StatusCode::CREATED,
        )),
        Err(err) => {
            error!("Failed to save drawing: {err:#}");
            Ok(warp::reply::with_status(
                warp::reply::json(&ErrorBody {
                    error: "failed to save drawing",
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_api(
        max_entries: usize,
    ) -> (
        tempfile::TempDir,
        impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(DrawingStore::new(dir.path(), max_entries));
        let api = routes(store, 20);
        (dir, api)
    }

    fn payload(tag: &str) -> String {
        format!("data:image/png;base64,{tag}{}", "A".repeat(64))
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (_dir, api) = test_api(50);
        let res = warp::test::request()
            .method("GET")
            .path("/api/health")
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn submit_then_list_round_trips() {
        let (_dir, api) = test_api(50);

        let res = warp::test::request()
            .method("POST")
            .path("/api/drawings")
            .json(&serde_json::json!({ "imageData": payload("one") }))
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created: DrawingEntry = serde_json::from_slice(res.body()).unwrap();
        assert!(!created.id.is_empty());

        warp::test::request()
            .method("POST")
            .path("/api/drawings")
            .json(&serde_json::json!({ "imageData": payload("two") }))
            .reply(&api)
            .await;

        let res = warp::test::request()
            .method("GET")
            .path("/api/drawings")
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        let drawings = body["drawings"].as_array().unwrap();
        assert_eq!(drawings.len(), 2);
        // Newest first; the earlier submission is last.
        assert_eq!(drawings[1]["id"], created.id.as_str());
    }

    #[tokio::test]
    async fn short_payload_is_rejected_before_persistence() {
        let (dir, api) = test_api(50);

        let res = warp::test::request()
            .method("POST")
            .path("/api/drawings")
            .json(&serde_json::json!({ "imageData": "tiny" }))
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        // Nothing was written.
        assert!(!dir.path().join("drawings.json").exists());
    }

    #[tokio::test]
    async fn non_string_payload_is_rejected() {
        let (_dir, api) = test_api(50);

        let res = warp::test::request()
            .method("POST")
            .path("/api/drawings")
            .json(&serde_json::json!({ "imageData": 12345 }))
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = warp::test::request()
            .method("POST")
            .path("/api/drawings")
            .json(&serde_json::json!({}))
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn store_cap_applies_through_the_api() {
        let (_dir, api) = test_api(3);

        for i in 0..5 {
            warp::test::request()
                .method("POST")
                .path("/api/drawings")
                .json(&serde_json::json!({ "imageData": payload(&i.to_string()) }))
                .reply(&api)
                .await;
        }

        let res = warp::test::request()
            .method("GET")
            .path("/api/drawings")
            .reply(&api)
            .await;
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["drawings"].as_array().unwrap().len(), 3);
    }
}
