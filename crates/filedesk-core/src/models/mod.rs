mod auth;
mod category;
mod envelope;
mod file;
mod reference;

pub use auth::{LoginData, LoginRequest};
pub use category::{UploadFileCategory, UploadFileType};
pub use envelope::{ApiResponse, PageResponse};
pub use file::{filter_by_type, DownloadTarget, DownloadUrlResponse, UploadFileResponse};
pub use reference::{Reference, ReferenceType};
