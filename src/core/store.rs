use crate::{
    core::{block::ExecutionContext, image::StoredImage, provider::Identity},
    error::GrabbitError,
};

pub mod external;

/// Use on adapters that persist completed local artifacts.
/// Serves as indirection to decouple downloaded images from wherever they
/// ultimately live.
#[async_trait::async_trait]
pub trait ArtifactStorage: Identity {
    /// Persist the completed artifact located at `local_path` and return a
    /// stable reference to it. The artifact at `local_path` is consumed.
    ///
    /// * `ctx`: The execution the artifact belongs to.
    /// * `local_path`: The _absolute_ path of the completed artifact.
    /// * `return_content`: When `false`, the returned reference points at
    ///   the stored artifact instead of carrying its content inline.
    async fn store(
        &self,
        ctx: &ExecutionContext,
        local_path: &str,
        return_content: bool,
    ) -> Result<StoredImage, GrabbitError>;
}
