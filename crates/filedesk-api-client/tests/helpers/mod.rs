//! Test helpers: a mock file service plus a client pointed at it.
//!
//! Run with `cargo test -p filedesk-api-client`.

#![allow(dead_code)]

use filedesk_api_client::FileServiceClient;
use filedesk_core::{ClientConfig, Reference, ReferenceType};
use mockito::{Mock, Server, ServerGuard};

pub const TOKEN: &str = "test-access-token";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const FILES_PATH: &str = "/api/v1/files";

pub struct TestApp {
    pub server: ServerGuard,
    pub client: FileServiceClient,
}

impl TestApp {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let config = ClientConfig::with_api_url(&server.url());
        let client = FileServiceClient::from_config(&config).expect("client builds");
        Self { server, client }
    }

    /// Successful login returning [`TOKEN`], expected exactly `hits` times.
    pub async fn mock_login(&mut self, hits: usize) -> Mock {
        self.server
            .mock("POST", LOGIN_PATH)
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "loginId": "admin",
                "password": "admin123"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(login_body(TOKEN))
            .expect(hits)
            .create_async()
            .await
    }

    pub fn bearer() -> String {
        format!("Bearer {}", TOKEN)
    }
}

pub fn login_body(token: &str) -> String {
    serde_json::json!({
        "success": true,
        "data": {
            "accessToken": token,
            "refreshToken": "refresh",
            "tokenType": "Bearer",
            "expiresIn": 3600
        },
        "message": "ok",
        "timestamp": "2025-03-14T09:26:53"
    })
    .to_string()
}

pub fn store(id: i64) -> Reference {
    Reference::new(ReferenceType::Store, id).expect("positive id")
}

pub fn file_json(id: i64, category: &str, file_type: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "originalFileName": format!("file-{}.png", id),
        "storedFileName": format!("stored-{}.png", id),
        "fileSize": 1024,
        "contentType": "image/png",
        "fileExtension": "png",
        "uploadFileType": file_type,
        "uploadFileCategory": category,
        "referenceType": "STORE",
        "referenceId": 1,
        "isPublic": false,
        "publicUrl": null,
        "createdAt": "2025-03-14T09:26:53"
    })
}

pub fn envelope(data: serde_json::Value) -> String {
    serde_json::json!({
        "success": true,
        "data": data,
        "message": "OK",
        "timestamp": "2025-03-14T09:26:53"
    })
    .to_string()
}
