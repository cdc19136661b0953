use crate::{
    app::{
        block::drive_images::DriveImagesBlock,
        store::{FsImageStore, TokioDirectory},
    },
    config::StartArgs,
    core::{provider::Identity, service::import::ImportServiceFactory},
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    /// The blocks this service exposes.
    pub drive_images: DriveImagesBlock,
}

impl AppState {
    /// Load the application state using the provided configuration.
    pub async fn new(args: &StartArgs) -> Self {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from(args.log()))
            .init();

        let storage = Arc::new(FsImageStore::new(&args.image_store_path()).await);

        tracing::info!("Registered artifact store '{}'", storage.id());

        let scratch = TokioDirectory::new(&args.scratch_path()).await;

        let import = ImportServiceFactory::new(storage, scratch.base().to_path_buf());

        let http_client = reqwest::Client::new();

        Self {
            drive_images: DriveImagesBlock::new(http_client, import),
        }
    }
}
