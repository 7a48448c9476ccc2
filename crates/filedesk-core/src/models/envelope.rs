use serde::{Deserialize, Serialize};

/// Standard response wrapper returned by every endpoint of the file service.
///
/// The client hands this back untouched on any 2xx status; `success` is for
/// the caller to check. `data` is absent or `null` on failure envelopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    /// Payload of a successful envelope; `None` when `success` is false.
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }

    /// Same envelope with the payload converted.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            data: self.data.map(f),
            message: self.message,
            timestamp: self.timestamp,
        }
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub first: bool,
    pub last: bool,
}
