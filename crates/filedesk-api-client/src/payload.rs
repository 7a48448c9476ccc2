//! File payloads for multipart uploads.

use std::path::Path;

use filedesk_core::{UploadFileCategory, UploadFileType};
use reqwest::multipart::Part;

use crate::error::ClientError;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// A file to upload: its name as the server should record it, its bytes and
/// the MIME type sent with the multipart part.
#[derive(Debug, Clone)]
pub struct UploadPayload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl UploadPayload {
    /// Payload with a content type sniffed from the bytes. This is a hint for
    /// the server only; nothing is rejected here.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name, &bytes);
        Self {
            file_name,
            bytes,
            content_type,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Image for `image/*` content, attachment for everything else.
    pub fn file_type(&self) -> UploadFileType {
        if self.content_type.starts_with("image/") {
            UploadFileType::Image
        } else {
            UploadFileType::Attachment
        }
    }

    /// Category used when the caller does not pick one.
    pub fn default_category(&self) -> UploadFileCategory {
        UploadFileCategory::default_for(self.file_type())
    }

    /// Read a local file.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        if path
            .components()
            .any(|c| c == std::path::Component::ParentDir)
        {
            return Err(ClientError::InvalidInput(format!(
                "Path must not contain '..': {}",
                path.display()
            )));
        }

        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.bin")
            .to_string();

        Ok(Self::new(file_name, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn into_part(self) -> Result<Part, ClientError> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)?;
        Ok(part)
    }
}

/// Magic-byte detection first, then a few extensions `infer` cannot tell
/// apart (legacy office formats share one container signature).
fn guess_content_type(file_name: &str, bytes: &[u8]) -> String {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type().to_string();
    }

    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("xls") => "application/vnd.ms-excel",
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        _ => FALLBACK_CONTENT_TYPE,
    }
    .to_string()
}
