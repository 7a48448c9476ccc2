//! Model-level errors: parsing enumerations from user input and rejecting
//! references that cannot exist on the server.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("Unknown upload category: {0}")]
    UnknownCategory(String),

    #[error("Unknown reference type: {0}")]
    UnknownReferenceType(String),

    #[error("Unknown upload file type: {0}")]
    UnknownFileType(String),

    #[error("Invalid reference id: {0} (must be a positive integer)")]
    InvalidReferenceId(i64),
}
