use crate::{
    core::{image::ImageFile, provider::Identity},
    error::GrabbitError,
};
use tokio::io::AsyncWrite;

/// Implement on API clients that list and download images from an external
/// container.
///
/// Every implementation of this trait must have a matching
/// [ArtifactStorage][super::ArtifactStorage] implementation receiving the
/// downloads.
#[async_trait::async_trait]
pub trait ImageSource: Identity {
    /// List the image files in the given container, in the order the source
    /// reports them. Entries whose media type does not begin with `image/`,
    /// or which are missing an identifier or name, are skipped.
    ///
    /// * `folder_id`: Source specific container identifier.
    async fn list_images(&self, folder_id: &str) -> Result<Vec<ImageFile>, GrabbitError>;

    /// Download the file's bytes into `sink`, chunk by chunk, until the
    /// transfer reports completion. Writes are append-only; a mid-transfer
    /// failure aborts immediately with no retry. Returns the amount of
    /// bytes written.
    ///
    /// * `file_id`: Source specific file identifier.
    async fn download<W>(&self, file_id: &str, sink: &mut W) -> Result<u64, GrabbitError>
    where
        W: AsyncWrite + Send + Unpin;
}
