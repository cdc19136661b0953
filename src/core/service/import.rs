use crate::{
    core::{
        block::ExecutionContext,
        image::{ImageFile, StoredImage},
        provider::Identity,
        store::{external::ImageSource, ArtifactStorage},
    },
    err,
    error::GrabbitError,
    map_err,
};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

/// Emitted verbatim on the block's error channel when a folder yields no
/// image files.
pub const NO_IMAGES_MESSAGE: &str = "No image files found in the specified folder.";

/// Creates [ImageImportService] instances bound to a concrete source API.
#[derive(Clone)]
pub struct ImportServiceFactory {
    storage: Arc<dyn ArtifactStorage + Send + Sync>,
    scratch: PathBuf,
}

impl ImportServiceFactory {
    pub fn new(storage: Arc<dyn ArtifactStorage + Send + Sync>, scratch: PathBuf) -> Self {
        Self { storage, scratch }
    }

    /// Create an instance of [ImageImportService] using the provided source API.
    pub fn source<T: ImageSource>(&self, source: T) -> ImageImportService<T> {
        ImageImportService::new(self.storage.clone(), self.scratch.clone(), source)
    }
}

/// Ephemeral service used as an abstraction for fetching images from an
/// external container into an artifact store.
#[derive(Clone)]
pub struct ImageImportService<T> {
    storage: Arc<dyn ArtifactStorage + Send + Sync>,

    /// In-progress downloads live here until they are handed to `storage`.
    scratch: PathBuf,

    source: T,
}

impl<T> ImageImportService<T> {
    pub fn new(
        storage: Arc<dyn ArtifactStorage + Send + Sync>,
        scratch: PathBuf,
        source: T,
    ) -> Self {
        Self {
            storage,
            scratch,
            source,
        }
    }
}

impl<T> ImageImportService<T>
where
    T: ImageSource,
{
    /// Import every image file from the given folder into the artifact store.
    ///
    /// Files are downloaded and stored strictly sequentially, in listing
    /// order. The first failure aborts the whole import; no partial result
    /// is ever returned.
    ///
    /// * `ctx`: The execution this import belongs to.
    /// * `folder_id`: Source specific container identifier.
    pub async fn import_folder(
        &self,
        ctx: &ExecutionContext,
        folder_id: &str,
    ) -> Result<Vec<StoredImage>, GrabbitError> {
        if folder_id.is_empty() {
            return err!(InvalidParameter, "folder id must not be empty");
        }

        let images = self.source.list_images(folder_id).await?;

        if images.is_empty() {
            tracing::warn!("No image files in folder '{folder_id}'");
            return err!(NoImages, "{NO_IMAGES_MESSAGE}");
        }

        let total = images.len();
        let mut stored = Vec::with_capacity(total);

        for (i, image) in images.iter().enumerate() {
            tracing::debug!(
                "Importing '{}' into '{}' ({}/{total})",
                image.name,
                self.storage.id(),
                i + 1
            );

            stored.push(self.import_image(ctx, image).await?);
        }

        Ok(stored)
    }

    /// Download a single image to the scratch directory, then hand the
    /// completed artifact to the store. The scratch artifact is gone after
    /// this returns, whether by being persisted or by being cleaned up.
    async fn import_image(
        &self,
        ctx: &ExecutionContext,
        image: &ImageFile,
    ) -> Result<StoredImage, GrabbitError> {
        let scratch_path = self.scratch.join(ctx.scoped_name(&image.name));

        if let Err(e) = self.download_to_scratch(&scratch_path, image).await {
            let _ = tokio::fs::remove_file(&scratch_path).await;
            return Err(e);
        }

        let result = self
            .storage
            .store(ctx, &scratch_path.to_string_lossy(), false)
            .await;

        match result {
            Ok(reference) => Ok(reference),
            Err(e) => {
                let _ = tokio::fs::remove_file(&scratch_path).await;
                Err(e)
            }
        }
    }

    /// The sink is dropped on every exit path, releasing the file handle
    /// before the artifact is moved or cleaned up.
    async fn download_to_scratch(
        &self,
        path: &Path,
        image: &ImageFile,
    ) -> Result<u64, GrabbitError> {
        let mut sink = map_err!(tokio::fs::File::create(path).await);

        let written = self.source.download(&image.id, &mut sink).await?;

        map_err!(sink.sync_all().await);

        tracing::debug!("Downloaded '{}' ({written} bytes)", image.name);

        Ok(written)
    }
}
