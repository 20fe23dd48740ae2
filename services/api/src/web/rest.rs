//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use bytes::Bytes;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use phrontier_core::domain::Resource;
use phrontier_core::ports::{PortError, ThumbnailGenerator as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        delete_resource_handler,
        upload_asset_handler,
        generate_handler,
    ),
    components(
        schemas(SuccessResponse, UploadResponse, ThumbnailResponse, ErrorResponse, GenerateRequest)
    ),
    tags(
        (name = "Phrontier API", description = "Catalog, upload, and enrichment endpoints for the physics resource library.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The response payload for accepted mutations.
#[derive(Serialize, ToSchema)]
pub struct SuccessResponse {
    success: bool,
}

impl SuccessResponse {
    fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

/// The response payload sent after a successful asset upload.
#[derive(Serialize, ToSchema)]
pub struct UploadResponse {
    success: bool,
    url: String,
}

/// A generated thumbnail, base64-encoded.
#[derive(Serialize, ToSchema)]
pub struct ThumbnailResponse {
    data: String,
}

/// Every failed request answers with this shape.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    error: String,
}

/// The enrichment request: `task` selects outcomes or thumbnail generation.
#[derive(Deserialize, ToSchema)]
pub struct GenerateRequest {
    task: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
pub struct DeleteParams {
    id: Option<String>,
}

/// Maps the port error taxonomy onto HTTP statuses. The message travels in
/// the body so clients can show it verbatim.
fn error_response(err: PortError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &err {
        PortError::MissingField(_) | PortError::InvalidField { .. } | PortError::EmptyPayload => {
            StatusCode::BAD_REQUEST
        }
        PortError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        PortError::NotFound(_) => StatusCode::NOT_FOUND,
        PortError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        PortError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        PortError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse { error: err.to_string() }))
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List the resource collection, newest-first.
///
/// The collection is mutated by many independent clients, so intermediary
/// caching is disabled on every read.
pub async fn list_resources_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    match app_state.catalog.list().await {
        Ok(resources) => Ok((
            [(header::CACHE_CONTROL, "no-store, no-cache, must-revalidate")],
            Json(resources),
        )),
        Err(e) => {
            error!("Failed to list resources: {e}");
            Err(error_response(e))
        }
    }
}

/// Publish a new resource. The catalog assigns `id` and `createdAt` when
/// the client leaves them empty.
pub async fn create_resource_handler(
    State(app_state): State<Arc<AppState>>,
    Json(record): Json<Resource>,
) -> Result<Json<SuccessResponse>, (StatusCode, Json<ErrorResponse>)> {
    match app_state.catalog.create(record).await {
        Ok(stored) => {
            tracing::info!(id = %stored.id, title = %stored.title, "resource published");
            Ok(SuccessResponse::ok())
        }
        Err(e) => {
            warn!("Failed to create resource: {e}");
            Err(error_response(e))
        }
    }
}

/// Replace an existing resource wholesale. The body must carry the `id`;
/// an unknown `id` is accepted as a no-op.
pub async fn update_resource_handler(
    State(app_state): State<Arc<AppState>>,
    Json(record): Json<Resource>,
) -> Result<Json<SuccessResponse>, (StatusCode, Json<ErrorResponse>)> {
    match app_state.catalog.update(record).await {
        Ok(stored) => {
            tracing::info!(id = %stored.id, "resource updated");
            Ok(SuccessResponse::ok())
        }
        Err(e) => {
            warn!("Failed to update resource: {e}");
            Err(error_response(e))
        }
    }
}

/// Delete a resource by id.
#[utoipa::path(
    delete,
    path = "/resources",
    params(
        ("id" = String, Query, description = "The id of the resource to delete.")
    ),
    responses(
        (status = 200, description = "Deleted (or already absent)", body = SuccessResponse),
        (status = 400, description = "Missing id parameter", body = ErrorResponse),
        (status = 503, description = "Resource store unavailable", body = ErrorResponse)
    )
)]
pub async fn delete_resource_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<SuccessResponse>, (StatusCode, Json<ErrorResponse>)> {
    let id = match params.id.filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => return Err(error_response(PortError::MissingField("id"))),
    };

    match app_state.catalog.delete(&id).await {
        Ok(()) => Ok(SuccessResponse::ok()),
        Err(e) => {
            warn!("Failed to delete resource {id}: {e}");
            Err(error_response(e))
        }
    }
}

/// Upload a binary asset and get back its public URL.
///
/// The body is the raw file; name and type travel in the `x-filename` and
/// `x-content-type` headers.
#[utoipa::path(
    post,
    path = "/upload",
    request_body(content_type = "application/octet-stream", description = "The raw file content."),
    params(
        ("x-filename" = Option<String>, Header, description = "Display name for the stored file."),
        ("x-content-type" = Option<String>, Header, description = "MIME type of the payload.")
    ),
    responses(
        (status = 200, description = "Stored", body = UploadResponse),
        (status = 400, description = "Empty payload", body = ErrorResponse),
        (status = 413, description = "Payload over the upload limit", body = ErrorResponse),
        (status = 503, description = "Blob store unavailable", body = ErrorResponse)
    )
)]
pub async fn upload_asset_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UploadResponse>, (StatusCode, Json<ErrorResponse>)> {
    let filename = headers
        .get("x-filename")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unnamed-file");
    let content_type = headers
        .get("x-content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream");

    match app_state.assets.upload(filename, content_type, &body).await {
        Ok(url) => Ok(Json(UploadResponse { success: true, url })),
        Err(e) => {
            warn!("Failed to upload {filename}: {e}");
            Err(error_response(e))
        }
    }
}

/// Run one of the enrichment tasks.
///
/// `outcomes` always answers 200 with a list (the enricher falls back on
/// provider failure); `thumbnail` answers the base64 image or an error.
#[utoipa::path(
    post,
    path = "/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Outcome list or thumbnail payload", body = ThumbnailResponse),
        (status = 400, description = "Unknown task", body = ErrorResponse),
        (status = 503, description = "Thumbnail generation not configured or unavailable", body = ErrorResponse)
    )
)]
pub async fn generate_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> Response {
    match request.task.as_str() {
        "outcomes" => {
            let outcomes = app_state
                .catalog
                .suggest_outcomes(&request.title, &request.category, &request.description)
                .await;
            Json(outcomes).into_response()
        }
        "thumbnail" => {
            let Some(generator) = &app_state.thumbnails else {
                return error_response(PortError::Unavailable(
                    "thumbnail generation is not configured".to_string(),
                ))
                .into_response();
            };

            match generator.generate(&request.title, &request.description).await {
                Ok(Some(bytes)) => Json(ThumbnailResponse {
                    data: BASE64.encode(bytes),
                })
                .into_response(),
                Ok(None) => {
                    warn!("image model produced no candidate");
                    error_response(PortError::Unexpected(
                        "no image candidate produced".to_string(),
                    ))
                    .into_response()
                }
                Err(e) => {
                    warn!("Failed to generate thumbnail: {e}");
                    error_response(e).into_response()
                }
            }
        }
        other => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Invalid task: {other}"),
            }),
        )
            .into_response(),
    }
}
