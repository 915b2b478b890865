//! s3b-core: Core library for the s3-browser web application
//!
//! This crate provides the core functionality for s3-browser, including:
//! - Configuration management
//! - Wire data model shared with the browser UI
//! - View routes of the UI
//! - ObjectStore trait for S3 operations
//! - In-memory session management
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing for easy testing and potential future support for other backends.

pub mod config;
pub mod error;
pub mod models;
pub mod route;
pub mod session;
pub mod traits;

pub use config::{Config, ConfigManager, PresignConfig, ServerConfig, SessionConfig};
pub use error::{Error, Result};
pub use models::{
    BucketEntry, ConnectionCredentials, ConnectionTestResponse, LogoutReceipt, ObjectEntry,
    PresignedUrl, SessionStatus, UploadReceipt,
};
pub use route::ViewRoute;
pub use session::{Session, SessionManager};
pub use traits::{
    BucketInfo, ListOptions, ListResult, ObjectBody, ObjectInfo, ObjectStore, StoreConnector,
    list_all_objects,
};
