//! s3-browser: web UI backend for S3-compatible object storage
//!
//! This crate hosts the HTTP API used by the browser UI, the session cookie
//! handling and the static frontend. Storage access goes through the
//! `ObjectStore` trait from s3b-core, so the router can be driven against
//! any backend.

pub mod assets;
pub mod cli;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod server;
pub mod state;

pub use cli::Cli;
pub use error::ApiError;
pub use server::{create_router, serve};
pub use state::AppState;
