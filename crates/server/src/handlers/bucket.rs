//! Bucket listing, creation and deletion

use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use s3b_core::BucketEntry;

use crate::error::ApiError;
use crate::extract::ActiveSession;

/// GET /api/buckets
pub async fn list_buckets(
    ActiveSession(session): ActiveSession,
) -> Result<Json<Vec<BucketEntry>>, ApiError> {
    let buckets = session
        .store
        .list_buckets()
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Failed to list buckets"))?;

    Ok(Json(
        buckets.iter().filter_map(BucketEntry::from_info).collect(),
    ))
}

/// PUT /api/buckets/{name}
pub async fn create_bucket(
    ActiveSession(session): ActiveSession,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    session
        .store
        .create_bucket(&name)
        .await
        .inspect_err(|e| tracing::error!(bucket = %name, error = %e, "Failed to create bucket"))?;

    tracing::info!(bucket = %name, "Bucket created");
    Ok(StatusCode::CREATED)
}

/// DELETE /api/buckets/{name}
pub async fn delete_bucket(
    ActiveSession(session): ActiveSession,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    session
        .store
        .delete_bucket(&name)
        .await
        .inspect_err(|e| tracing::error!(bucket = %name, error = %e, "Failed to delete bucket"))?;

    tracing::info!(bucket = %name, "Bucket deleted");
    Ok(StatusCode::NO_CONTENT)
}
