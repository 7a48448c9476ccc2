use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::category::{UploadFileCategory, UploadFileType};
use super::reference::ReferenceType;

/// A stored file as returned by the file service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileResponse {
    pub id: i64,
    pub original_file_name: String,
    pub stored_file_name: String,
    pub file_size: i64,
    pub content_type: String,
    pub file_extension: String,
    pub upload_file_type: UploadFileType,
    pub upload_file_category: UploadFileCategory,
    pub reference_type: ReferenceType,
    pub reference_id: i64,
    pub is_public: bool,
    pub public_url: Option<String>,
    pub created_at: String,
}

/// Where a file's bytes can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadTarget {
    /// Publicly reachable, no signing needed.
    Public(String),
    /// Private file; ask the service for a time-limited URL.
    Signed(i64),
}

impl UploadFileResponse {
    pub fn download_target(&self) -> DownloadTarget {
        match (&self.public_url, self.is_public) {
            (Some(url), true) if !url.is_empty() => DownloadTarget::Public(url.clone()),
            _ => DownloadTarget::Signed(self.id),
        }
    }

    /// Size in kilobytes with one decimal, e.g. `12.5 KB`.
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.file_size as f64 / 1024.0)
    }

    /// Calendar date of `created_at`. The service emits either RFC 3339 or a
    /// zone-less local timestamp.
    pub fn created_date(&self) -> Option<NaiveDate> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.created_at) {
            return Some(dt.date_naive());
        }
        NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|dt| dt.date())
    }
}

/// Response of `GET /{fileId}/download-url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadUrlResponse {
    pub file_id: i64,
    pub original_file_name: String,
    pub download_url: String,
    pub expiration_minutes: u32,
}

/// Keep only records of the given type (images vs. attachments tab).
pub fn filter_by_type(
    files: Vec<UploadFileResponse>,
    file_type: UploadFileType,
) -> Vec<UploadFileResponse> {
    files
        .into_iter()
        .filter(|f| f.upload_file_type == file_type)
        .collect()
}
