//! Object listing, download, upload, deletion and presigned URLs
//!
//! The bucket is always passed as the `bucket` query parameter. The object
//! key is the remainder of the request path and may contain `/`.

use std::time::Duration;

use axum::Json;
use axum::body::Body;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use s3b_core::{ListOptions, ObjectEntry, PresignedUrl, UploadReceipt, list_all_objects};
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::ActiveSession;
use crate::state::AppState;

/// Response header carrying the token for the next page of a listing
pub const CONTINUATION_HEADER: &str = "x-continuation-token";

/// Multipart field holding the uploaded file
const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct BucketQuery {
    pub bucket: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub bucket: Option<String>,
    pub prefix: Option<String>,
    pub max_keys: Option<i32>,
    pub continuation_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PresignQuery {
    pub bucket: Option<String>,
    pub key: Option<String>,
}

fn require_bucket(bucket: Option<String>) -> Result<String, ApiError> {
    bucket
        .filter(|b| !b.is_empty())
        .ok_or_else(|| ApiError::bad_request("Bucket name is required"))
}

fn require_key(key: Option<String>) -> Result<String, ApiError> {
    key.filter(|k| !k.is_empty())
        .ok_or_else(|| ApiError::bad_request("Object key is required"))
}

fn guess_content_type(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Multipart failure with the status axum assigns (413 past the body limit)
fn multipart_error(context: &str, err: MultipartError) -> ApiError {
    tracing::error!(error = %err, "{context}");
    ApiError::new(err.status(), format!("{context}: {}", err.body_text()))
}

fn file_name(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// GET /api/objects?bucket=
///
/// Without paging parameters every page is collected. With `max_keys` or
/// `continuation_token` a single page is returned and the next token, if
/// any, is sent in [`CONTINUATION_HEADER`].
pub async fn list_objects(
    ActiveSession(session): ActiveSession,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let bucket = require_bucket(query.bucket)?;
    let paged = query.max_keys.is_some() || query.continuation_token.is_some();

    let (items, next_token) = if paged {
        let options = ListOptions {
            prefix: query.prefix,
            max_keys: query.max_keys,
            continuation_token: query.continuation_token,
            ..Default::default()
        };
        let page = session.store.list_objects(&bucket, options).await;
        let page = page.inspect_err(
            |e| tracing::error!(bucket = %bucket, error = %e, "Failed to list objects"),
        )?;
        let next = page.continuation_token.filter(|_| page.truncated);
        (page.items, next)
    } else {
        let items = list_all_objects(session.store.as_ref(), &bucket, query.prefix)
            .await
            .inspect_err(
                |e| tracing::error!(bucket = %bucket, error = %e, "Failed to list objects"),
            )?;
        (items, None)
    };

    let entries: Vec<ObjectEntry> = items.iter().map(ObjectEntry::from).collect();
    let mut response = Json(entries).into_response();
    if let Some(token) = next_token.and_then(|t| HeaderValue::from_str(&t).ok()) {
        response.headers_mut().insert(CONTINUATION_HEADER, token);
    }

    Ok(response)
}

/// GET /api/objects/{*key}?bucket=
pub async fn view_object(
    ActiveSession(session): ActiveSession,
    Path(key): Path<String>,
    Query(query): Query<BucketQuery>,
) -> Result<Response, ApiError> {
    let bucket = require_bucket(query.bucket)?;

    let object = session
        .store
        .get_object(&bucket, &key)
        .await
        .inspect_err(
            |e| tracing::error!(bucket = %bucket, key = %key, error = %e, "Failed to get object"),
        )?;

    let content_type = object
        .content_type
        .clone()
        .unwrap_or_else(|| guess_content_type(&key));
    let content_length = object
        .content_length
        .unwrap_or(object.data.len() as i64);

    let mut response = Response::new(Body::from(object.data));
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&content_type) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(content_length));
    let disposition = format!("inline; filename=\"{}\"", file_name(&key).replace('"', ""));
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    tracing::info!(bucket = %bucket, key = %key, "Object served");
    Ok(response)
}

/// POST /api/objects/{*key}?bucket=
///
/// Expects a multipart form with the file in the `file` field.
pub async fn upload_object(
    ActiveSession(session): ActiveSession,
    Path(key): Path<String>,
    Query(query): Query<BucketQuery>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadReceipt>), ApiError> {
    let bucket = require_bucket(query.bucket)?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to parse multipart form", e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field
            .content_type()
            .filter(|ct| !ct.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| guess_content_type(field.file_name().unwrap_or(&key)));
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read uploaded file", e))?;
        upload = Some((data.to_vec(), content_type));
        break;
    }

    let (data, content_type) =
        upload.ok_or_else(|| ApiError::bad_request("Failed to get file from form"))?;
    let size = data.len() as u64;

    session
        .store
        .put_object(&bucket, &key, data, Some(content_type))
        .await
        .inspect_err(|e| {
            tracing::error!(bucket = %bucket, key = %key, error = %e, "Failed to upload object")
        })?;

    tracing::info!(
        bucket = %bucket,
        key = %key,
        size = %humansize::format_size(size, humansize::BINARY),
        "Object uploaded"
    );

    Ok((StatusCode::CREATED, Json(UploadReceipt::new(bucket, key))))
}

/// `/api/objects/` with nothing after the slash
///
/// The key wildcard never matches an empty remainder, so this route answers
/// for every method that takes a key.
pub async fn missing_key(
    ActiveSession(_): ActiveSession,
    Query(query): Query<BucketQuery>,
) -> ApiError {
    match require_bucket(query.bucket) {
        Ok(_) => ApiError::bad_request("Object key is required"),
        Err(e) => e,
    }
}

/// DELETE /api/objects/{*key}?bucket=
pub async fn delete_object(
    ActiveSession(session): ActiveSession,
    Path(key): Path<String>,
    Query(query): Query<BucketQuery>,
) -> Result<StatusCode, ApiError> {
    let bucket = require_bucket(query.bucket)?;

    session
        .store
        .delete_object(&bucket, &key)
        .await
        .inspect_err(|e| {
            tracing::error!(bucket = %bucket, key = %key, error = %e, "Failed to delete object")
        })?;

    tracing::info!(bucket = %bucket, key = %key, "Object deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/presigned-url?bucket=&key=
pub async fn presigned_url(
    State(state): State<AppState>,
    ActiveSession(session): ActiveSession,
    Query(query): Query<PresignQuery>,
) -> Result<Json<PresignedUrl>, ApiError> {
    let bucket = require_bucket(query.bucket)?;
    let key = require_key(query.key)?;

    let expires = Duration::from_secs(state.config.presign.expires_secs);
    let url = session
        .store
        .presigned_get_url(&bucket, &key, &guess_content_type(&key), expires)
        .await
        .inspect_err(|e| {
            tracing::error!(bucket = %bucket, key = %key, error = %e, "Failed to generate presigned URL")
        })?;

    Ok(Json(PresignedUrl { url }))
}
