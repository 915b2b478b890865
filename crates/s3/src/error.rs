//! Translation of SDK failures into s3b-core errors
//!
//! S3-compatible backends report failures through error codes embedded in
//! the SDK error. The codes are mapped to error kinds the server can turn
//! into HTTP statuses, with messages suitable for showing to a user.

use aws_smithy_types::error::display::DisplayErrorContext;
use s3b_core::Error;

/// Storage operation that produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListBuckets,
    CreateBucket,
    DeleteBucket,
    ListObjects,
    GetObject,
    PutObject,
    DeleteObject,
    Presign,
}

impl Operation {
    fn denied_action(self) -> &'static str {
        match self {
            Operation::ListBuckets => "list buckets",
            Operation::CreateBucket => "create buckets",
            Operation::DeleteBucket => "delete this bucket",
            Operation::ListObjects => "list objects in this bucket",
            Operation::GetObject => "read this object",
            Operation::PutObject => "upload to this bucket",
            Operation::DeleteObject => "delete this object",
            Operation::Presign => "share this object",
        }
    }
}

/// Full error text including the source chain, which carries the backend error code
pub fn describe<E: std::error::Error>(err: &E) -> String {
    DisplayErrorContext(err).to_string()
}

/// Classify an SDK error
pub fn from_sdk<E: std::error::Error>(err: &E, op: Operation) -> Error {
    classify(&describe(err), op)
}

/// Classify an error from its text
pub fn classify(text: &str, op: Operation) -> Error {
    if text.contains("BucketNotEmpty") {
        Error::Conflict(
            "Cannot delete bucket: The bucket is not empty. Please delete all objects first."
                .into(),
        )
    } else if text.contains("BucketAlreadyExists") || text.contains("BucketAlreadyOwnedByYou") {
        Error::Conflict("Bucket already exists. Bucket names must be globally unique.".into())
    } else if text.contains("InvalidBucketName") {
        Error::InvalidRequest(
            "Invalid bucket name. Bucket names must follow S3 naming conventions.".into(),
        )
    } else if text.contains("NoSuchBucket") {
        Error::NotFound("Bucket not found.".into())
    } else if text.contains("NoSuchKey") || text.contains("NotFound") {
        Error::NotFound("Object not found".into())
    } else if text.contains("AccessDenied") {
        Error::AccessDenied(format!(
            "Access denied: You don't have permission to {}.",
            op.denied_action()
        ))
    } else {
        Error::Network(text.to_string())
    }
}
