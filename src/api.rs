//! HTTP surface for the student records service.
//!
//! This module exposes a compact Axum router:
//!
//! - `GET /students` – List every record in creation order.
//! - `POST /students` – Create a record from an arbitrary JSON object; responds `201`.
//! - `GET /students/{id}` – Fetch one record, or `404 Not Found` (plain text).
//! - `PUT /students/{id}` – Merge a JSON object into a record, or `404 Not Found`.
//! - `DELETE /students/{id}` – Remove a record; always `204`, even when nothing matched.
//! - `GET /metrics` – Observe store mutation counters.
//! - `GET /api-docs/openapi.json` and `GET /docs` – OpenAPI document and Swagger UI.
//!
//! Malformed JSON bodies are rejected by Axum's `Json` extractor before reaching a handler.

pub mod openapi;

use crate::metrics::MetricsSnapshot;
use crate::records::{Record, RecordApi, RecordError, RecordFields};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use openapi::ApiDoc;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Path of the generated OpenAPI document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";
/// Path of the Swagger UI.
pub const DOCS_PATH: &str = "/docs";

/// Build the HTTP router exposing the record API surface.
pub fn create_router<S>(service: Arc<S>) -> Router
where
    S: RecordApi + 'static,
{
    Router::new()
        .route(
            "/students",
            get(list_students::<S>).post(create_student::<S>),
        )
        .route(
            "/students/:id",
            get(get_student::<S>)
                .put(update_student::<S>)
                .delete(delete_student::<S>),
        )
        .route("/metrics", get(get_metrics::<S>))
        .with_state(service)
        .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

/// List all student records.
#[utoipa::path(
    get,
    path = "/students",
    tag = "students",
    responses(
        (status = 200, description = "All records in creation order", body = [openapi::StudentDoc])
    )
)]
async fn list_students<S>(State(service): State<Arc<S>>) -> Json<Vec<Record>>
where
    S: RecordApi,
{
    Json(service.list().await)
}

/// Create a student record. Every field of the body is stored; `id` is assigned by the server.
#[utoipa::path(
    post,
    path = "/students",
    tag = "students",
    request_body = openapi::StudentInputDoc,
    responses(
        (status = 201, description = "Record created", body = openapi::StudentDoc)
    )
)]
async fn create_student<S>(
    State(service): State<Arc<S>>,
    Json(fields): Json<RecordFields>,
) -> (StatusCode, Json<Record>)
where
    S: RecordApi,
{
    let record = service.create(fields).await;
    (StatusCode::CREATED, Json(record))
}

/// Fetch a student record by id.
#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = "students",
    params(("id" = String, Path, description = "Record id")),
    responses(
        (status = 200, description = "Record found", body = openapi::StudentDoc),
        (status = 404, description = "No record with this id", body = String, content_type = "text/plain")
    )
)]
async fn get_student<S>(
    State(service): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<Record>, AppError>
where
    S: RecordApi,
{
    Ok(Json(service.get(&id).await?))
}

/// Merge the body's fields into an existing student record.
#[utoipa::path(
    put,
    path = "/students/{id}",
    tag = "students",
    params(("id" = String, Path, description = "Record id")),
    request_body = openapi::StudentInputDoc,
    responses(
        (status = 200, description = "Record updated", body = openapi::StudentDoc),
        (status = 404, description = "No record with this id", body = String, content_type = "text/plain")
    )
)]
async fn update_student<S>(
    State(service): State<Arc<S>>,
    Path(id): Path<String>,
    Json(fields): Json<RecordFields>,
) -> Result<Json<Record>, AppError>
where
    S: RecordApi,
{
    Ok(Json(service.update(&id, fields).await?))
}

/// Delete a student record. Succeeds whether or not the id exists.
#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = "students",
    params(("id" = String, Path, description = "Record id")),
    responses(
        (status = 204, description = "Record removed, or nothing to remove")
    )
)]
async fn delete_student<S>(State(service): State<Arc<S>>, Path(id): Path<String>) -> StatusCode
where
    S: RecordApi,
{
    service.delete(&id).await;
    StatusCode::NO_CONTENT
}

/// Return store mutation counters.
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "diagnostics",
    responses(
        (status = 200, description = "Counter snapshot", body = openapi::MetricsDoc)
    )
)]
async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<MetricsSnapshot>
where
    S: RecordApi,
{
    Json(service.metrics_snapshot().await)
}

struct AppError(RecordError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.0 {
            RecordError::NotFound(id) => {
                tracing::debug!(%id, "Record not found");
                (StatusCode::NOT_FOUND, "Not Found").into_response()
            }
        }
    }
}

impl From<RecordError> for AppError {
    fn from(inner: RecordError) -> Self {
        Self(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::create_router;
    use crate::records::RecordService;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(Arc::new(RecordService::new()))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("router response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (status, bytes.to_vec())
    }

    fn json_body(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).expect("json body")
    }

    #[tokio::test]
    async fn fresh_service_lists_nothing() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/students", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body), json!([]));
    }

    #[tokio::test]
    async fn crud_scenario_matches_contract() {
        let app = app();

        let (status, body) =
            send(&app, Method::POST, "/students", Some(json!({"name": "Alice"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, br#"{"id":1,"name":"Alice"}"#);

        let (status, body) =
            send(&app, Method::POST, "/students", Some(json!({"name": "Bob"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json_body(&body), json!({"id": 2, "name": "Bob"}));

        let (status, body) = send(&app, Method::GET, "/students", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json_body(&body),
            json!([{"id": 1, "name": "Alice"}, {"id": 2, "name": "Bob"}])
        );

        let (status, body) =
            send(&app, Method::PUT, "/students/1", Some(json!({"name": "Alicia"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body), json!({"id": 1, "name": "Alicia"}));

        let (status, body) = send(&app, Method::DELETE, "/students/2", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());

        let (status, body) = send(&app, Method::GET, "/students/2", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, b"Not Found");
    }

    #[tokio::test]
    async fn update_merges_and_keeps_id() {
        let app = app();
        send(
            &app,
            Method::POST,
            "/students",
            Some(json!({"name": "A", "grade": "B"})),
        )
        .await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/students/1",
            Some(json!({"name": "C", "id": 77})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body), json!({"id": 1, "name": "C", "grade": "B"}));

        let (status, _) = send(&app, Method::GET, "/students/77", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found_but_delete_succeeds() {
        let app = app();

        let (status, body) = send(&app, Method::GET, "/students/abc", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, b"Not Found");

        let (status, _) =
            send(&app, Method::PUT, "/students/5", Some(json!({"name": "X"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, "/students/5", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = send(&app, Method::GET, "/students", None).await;
        assert_eq!(json_body(&body), json!([]));
    }

    #[tokio::test]
    async fn create_accepts_bodies_without_name() {
        let app = app();
        let (status, body) =
            send(&app, Method::POST, "/students", Some(json!({"grade": "A"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json_body(&body), json!({"id": 1, "grade": "A"}));
    }

    #[tokio::test]
    async fn non_object_bodies_are_rejected_by_the_extractor() {
        let app = app();
        let (status, _) = send(&app, Method::POST, "/students", Some(json!([1, 2]))).await;
        assert!(status.is_client_error());

        let (_, body) = send(&app, Method::GET, "/students", None).await;
        assert_eq!(json_body(&body), json!([]));
    }

    #[tokio::test]
    async fn metrics_reflect_mutations() {
        let app = app();
        send(&app, Method::POST, "/students", Some(json!({"name": "A"}))).await;
        send(&app, Method::POST, "/students", Some(json!({"name": "B"}))).await;
        send(&app, Method::PUT, "/students/1", Some(json!({"name": "C"}))).await;
        send(&app, Method::DELETE, "/students/2", None).await;

        let (status, body) = send(&app, Method::GET, "/metrics", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json_body(&body),
            json!({
                "records_created": 2,
                "records_updated": 1,
                "records_deleted": 1,
                "records_live": 1
            })
        );
    }

    #[tokio::test]
    async fn openapi_document_describes_student_routes() {
        let app = app();
        let (status, body) = send(&app, Method::GET, super::OPENAPI_PATH, None).await;
        assert_eq!(status, StatusCode::OK);
        let doc = json_body(&body);
        let paths = doc["paths"].as_object().expect("paths object");
        assert!(paths.contains_key("/students"));
        assert!(paths.contains_key("/students/{id}"));
        assert!(doc["paths"]["/students/{id}"]["delete"].is_object());
    }
}
