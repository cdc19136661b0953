use crate::{
    config::FS_STORE_ID,
    core::{
        block::ExecutionContext,
        image::StoredImage,
        provider::Identity,
        store::ArtifactStorage,
    },
    err,
    error::GrabbitError,
    map_err,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Local FS based implementation of artifact storage.
///
/// Persisting moves the completed scratch artifact into the base directory
/// and returns its absolute path as the reference. Artifact names carry the
/// execution ID prefix, so references never collide across executions.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    dir: TokioDirectory,
}

impl FsImageStore {
    pub async fn new(dir: &str) -> Self {
        Self {
            dir: TokioDirectory::new(dir).await,
        }
    }
}

impl Identity for FsImageStore {
    fn id(&self) -> &'static str {
        FS_STORE_ID
    }
}

#[async_trait::async_trait]
impl ArtifactStorage for FsImageStore {
    async fn store(
        &self,
        ctx: &ExecutionContext,
        local_path: &str,
        return_content: bool,
    ) -> Result<StoredImage, GrabbitError> {
        if return_content {
            return err!(InvalidParameter, "inline artifact content is not supported");
        }

        let Some(name) = Path::new(local_path).file_name().and_then(|n| n.to_str()) else {
            return err!(InvalidFile, "no usable file name: {local_path}");
        };

        let destination = self.dir.absolute_path(name);

        debug!("Persisting '{name}' for execution {}", ctx.id());

        map_err!(tokio::fs::rename(local_path, &destination).await);

        Ok(StoredImage::new(destination))
    }
}

/// Simple FS operations on a directory based on tokio.
#[derive(Debug, Clone)]
pub struct TokioDirectory {
    /// The base directory for operations.
    base: PathBuf,
}

impl TokioDirectory {
    pub async fn new(path: &str) -> Self {
        info!("Initialising artifact directory at {path}");

        if let Err(e) = tokio::fs::create_dir_all(path).await {
            match e.kind() {
                std::io::ErrorKind::AlreadyExists => {}
                _ => panic!("unable to create directory ({path}): {e}"),
            }
        }

        let base = std::path::absolute(path)
            .unwrap_or_else(|e| panic!("unable to determine absolute path ({path}): {e}"));

        if !base.is_dir() {
            panic!("not a directory: {path}");
        }

        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Format the absolute path of an artifact in this directory without
    /// storing anything.
    #[inline(always)]
    pub fn absolute_path(&self, name: &str) -> String {
        format!("{}/{name}", self.base.display())
    }
}
