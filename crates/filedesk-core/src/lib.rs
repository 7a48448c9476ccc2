//! Filedesk Core Library
//!
//! Domain models (categories, references, file records, response envelopes),
//! model-level error types and client configuration shared by the API client
//! and the CLI.

pub mod config;
pub mod error;
pub mod models;

pub use config::ClientConfig;
pub use error::ModelError;
pub use models::{
    filter_by_type, ApiResponse, DownloadTarget, DownloadUrlResponse, LoginData, LoginRequest,
    PageResponse, Reference, ReferenceType, UploadFileCategory, UploadFileResponse,
    UploadFileType,
};
