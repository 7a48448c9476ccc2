//! File service operations.

use filedesk_core::{
    ApiResponse, DownloadTarget, DownloadUrlResponse, PageResponse, Reference,
    UploadFileCategory, UploadFileResponse, UploadFileType,
};
use reqwest::multipart::Form;
use tracing::{debug, info};

use crate::error::ClientError;
use crate::payload::UploadPayload;
use crate::FileServiceClient;

/// Lifetime of a signed download URL unless the caller asks otherwise.
pub const DEFAULT_EXPIRATION_MINUTES: u32 = 60;
pub const DEFAULT_PAGE_SIZE: u32 = 20;

fn upload_form(
    payload: UploadPayload,
    category: UploadFileCategory,
    reference: Reference,
) -> Result<Form, ClientError> {
    Ok(Form::new()
        .part("file", payload.into_part()?)
        .text("category", category.as_str())
        .text("referenceType", reference.reference_type().as_str())
        .text("referenceId", reference.id().to_string()))
}

impl FileServiceClient {
    /// Upload to the image endpoint. The server rejects non-image categories.
    pub async fn upload_image(
        &self,
        payload: UploadPayload,
        category: UploadFileCategory,
        reference: Reference,
    ) -> Result<ApiResponse<UploadFileResponse>, ClientError> {
        info!(file = %payload.file_name, %category, %reference, "Uploading image");
        let form = upload_form(payload, category, reference)?;
        self.post_multipart("/images", form).await
    }

    /// Upload to the attachment endpoint. The server rejects image categories.
    pub async fn upload_attachment(
        &self,
        payload: UploadPayload,
        category: UploadFileCategory,
        reference: Reference,
    ) -> Result<ApiResponse<UploadFileResponse>, ClientError> {
        info!(file = %payload.file_name, %category, %reference, "Uploading attachment");
        let form = upload_form(payload, category, reference)?;
        self.post_multipart("/attachments", form).await
    }

    /// Upload through the endpoint matching the category's file type.
    pub async fn upload(
        &self,
        payload: UploadPayload,
        category: UploadFileCategory,
        reference: Reference,
    ) -> Result<ApiResponse<UploadFileResponse>, ClientError> {
        match category.file_type() {
            UploadFileType::Image => self.upload_image(payload, category, reference).await,
            UploadFileType::Attachment => {
                self.upload_attachment(payload, category, reference).await
            }
        }
    }

    /// One page of files for a reference, optionally narrowed to a category.
    pub async fn get_files(
        &self,
        reference: Reference,
        category: Option<UploadFileCategory>,
        page: u32,
        size: u32,
    ) -> Result<ApiResponse<PageResponse<UploadFileResponse>>, ClientError> {
        if size == 0 {
            return Err(ClientError::InvalidInput(
                "page size must be greater than 0".to_string(),
            ));
        }

        let mut query = reference.query_pairs();
        query.push(("page", page.to_string()));
        query.push(("size", size.to_string()));
        if let Some(category) = category {
            query.push(("category", category.as_str().to_string()));
        }

        self.get("", &query).await
    }

    /// Every file of a reference, unpaginated and in no particular order.
    pub async fn get_files_by_reference(
        &self,
        reference: Reference,
        category: Option<UploadFileCategory>,
    ) -> Result<ApiResponse<Vec<UploadFileResponse>>, ClientError> {
        let mut query = reference.query_pairs();
        if let Some(category) = category {
            query.push(("category", category.as_str().to_string()));
        }

        self.get("/by-reference", &query).await
    }

    /// Time-limited download URL for a file.
    pub async fn get_download_url(
        &self,
        file_id: i64,
        expiration_minutes: u32,
    ) -> Result<ApiResponse<DownloadUrlResponse>, ClientError> {
        self.get(
            &format!("/{}/download-url", file_id),
            &[("expirationMinutes", expiration_minutes.to_string())],
        )
        .await
    }

    /// URL to fetch a file from: its public URL when it has one, otherwise a
    /// signed URL from the service. Public files cost no request.
    pub async fn download_link(
        &self,
        file: &UploadFileResponse,
        expiration_minutes: u32,
    ) -> Result<ApiResponse<String>, ClientError> {
        match file.download_target() {
            DownloadTarget::Public(url) => {
                debug!(file_id = file.id, "Using public URL");
                Ok(ApiResponse {
                    success: true,
                    data: Some(url),
                    message: String::new(),
                    timestamp: String::new(),
                })
            }
            DownloadTarget::Signed(file_id) => Ok(self
                .get_download_url(file_id, expiration_minutes)
                .await?
                .map(|download| download.download_url)),
        }
    }

    pub async fn delete_file(&self, file_id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/{}", file_id)).await?;
        info!(file_id, "File deleted");
        Ok(())
    }
}
