//! Core types for interester
//!
//! This crate contains domain types shared across all other crates.
//! Everything here is a plain JSON-serializable record; field names
//! serialize in camelCase to match the persisted document format.

mod interest;
mod preferences;
mod result;
mod search;

pub use interest::*;
pub use preferences::*;
pub use result::*;
pub use search::*;

use serde::{Deserialize, Serialize};

/// Uniform response envelope used by the HTTP API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(message.into()) }
    }
}
