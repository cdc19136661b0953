use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Remote image metadata produced by a listing call. Transient, never
/// persisted by this crate.
#[derive(Debug, Clone)]
pub struct ImageFile {
    /// Source specific file identifier.
    pub id: String,

    /// The name of the file as reported by the source.
    pub name: String,

    /// Always begins with `image/`.
    pub mime_type: String,

    pub modified_at: Option<DateTime<Utc>>,
}

impl ImageFile {
    pub fn new(
        id: String,
        name: String,
        mime_type: String,
        modified_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            name,
            mime_type,
            modified_at,
        }
    }
}

/// Reference to an image persisted by an
/// [ArtifactStorage][crate::core::store::ArtifactStorage] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct StoredImage(String);

impl StoredImage {
    pub fn new(reference: String) -> Self {
        Self(reference)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
