//! API request handlers

pub mod bucket;
pub mod object;
pub mod session;
