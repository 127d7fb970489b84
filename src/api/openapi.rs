//! OpenAPI description of the HTTP surface.
//!
//! Records are schemaless, so the document types below only describe the conventional shape;
//! any extra fields a caller sends are stored and returned verbatim.

use utoipa::{OpenApi, ToSchema};

/// Body accepted by create and update. Additional fields are stored as given.
#[derive(ToSchema)]
#[schema(example = json!({"name": "Alice"}))]
pub struct StudentInputDoc {
    /// Display name of the student.
    pub name: String,
}

/// A stored student record.
#[derive(ToSchema)]
#[schema(example = json!({"id": 1, "name": "Alice"}))]
pub struct StudentDoc {
    /// Server-assigned identifier, never reused.
    pub id: u64,
    /// Display name of the student.
    pub name: String,
}

/// Store mutation counters returned by `GET /metrics`.
#[derive(ToSchema)]
pub struct MetricsDoc {
    /// Records created since startup.
    pub records_created: u64,
    /// Successful updates since startup.
    pub records_updated: u64,
    /// Records removed since startup.
    pub records_deleted: u64,
    /// Records currently held by the store.
    pub records_live: u64,
}

/// Generated API description served at [`super::OPENAPI_PATH`].
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::list_students,
        crate::api::create_student,
        crate::api::get_student,
        crate::api::update_student,
        crate::api::delete_student,
        crate::api::get_metrics,
    ),
    components(schemas(StudentInputDoc, StudentDoc, MetricsDoc)),
    tags(
        (name = "students", description = "Student record CRUD"),
        (name = "diagnostics", description = "Service counters")
    )
)]
pub struct ApiDoc;
