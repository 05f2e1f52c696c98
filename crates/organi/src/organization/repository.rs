use super::domain::Organization;

/// Storage abstraction for the organization document.
///
/// Implementations load and save the whole document atomically; there are no partial writes.
pub trait OrganizationStore: Send + Sync {
    fn load(&self) -> Result<Organization, StoreError>;
    fn save(&self, organization: &Organization) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("organization document not found")]
    NotFound,
    #[error("organization document is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("organization store io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("organization store unavailable: {0}")]
    Unavailable(String),
}
