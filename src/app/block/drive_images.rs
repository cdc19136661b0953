use crate::{
    app::external::google::{auth::DriveAccessToken, drive::GoogleDriveApi},
    core::{
        block::{Block, BlockCategory, BlockMeta, ExecutionContext},
        image::StoredImage,
        service::import::ImportServiceFactory,
    },
    error::{GrabbitErr, GrabbitError},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DRIVE_IMAGES_BLOCK_ID: &str = "google-drive-images";

/// Imports the image files of a Google Drive folder into the artifact
/// store.
///
/// The block always completes; any failure lands on the output's `error`
/// field instead of propagating.
#[derive(Clone)]
pub struct DriveImagesBlock {
    client: reqwest::Client,
    factory: ImportServiceFactory,
}

impl DriveImagesBlock {
    pub fn new(client: reqwest::Client, factory: ImportServiceFactory) -> Self {
        Self { client, factory }
    }
}

#[derive(Debug, Deserialize)]
pub struct DriveImagesInput {
    /// ID of the Google Drive folder containing images.
    pub folder_id: String,

    /// OAuth2 token or API key for Google Drive authentication.
    pub auth_token: DriveAccessToken,
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct DriveImagesOutput {
    /// References of every imported image, in listing order.
    pub uploaded_files: Vec<StoredImage>,

    /// Error message, if any.
    #[serde(default)]
    pub error: String,
}

#[async_trait::async_trait]
impl Block for DriveImagesBlock {
    type Input = DriveImagesInput;
    type Output = DriveImagesOutput;

    fn meta(&self) -> BlockMeta {
        BlockMeta {
            id: DRIVE_IMAGES_BLOCK_ID,
            description: "Imports images from a Google Drive folder.",
            category: BlockCategory::Multimedia,
        }
    }

    async fn run(&self, ctx: &ExecutionContext, input: Self::Input) -> Self::Output {
        let api = GoogleDriveApi::new(self.client.clone(), input.auth_token);
        let service = self.factory.source(api);

        match service.import_folder(ctx, &input.folder_id).await {
            Ok(stored) => DriveImagesOutput {
                uploaded_files: stored,
                ..Default::default()
            },
            Err(e) => {
                e.print();
                DriveImagesOutput {
                    error: block_error_message(&e),
                    ..Default::default()
                }
            }
        }
    }
}

/// Translate a raised error into the block's error channel. The missing
/// image case keeps its message verbatim; everything else is collapsed
/// into a single generic one.
fn block_error_message(e: &GrabbitError) -> String {
    match &e.error {
        GrabbitErr::NoImages(message) => message.clone(),
        error => format!("an error occurred: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{block_error_message, DriveImagesOutput};
    use crate::{
        core::service::import::NO_IMAGES_MESSAGE,
        error::{GrabbitErr, GrabbitError},
    };

    fn located(error: GrabbitErr) -> GrabbitError {
        GrabbitError::new(error, file!(), line!(), column!())
    }

    #[test]
    fn no_images_message_is_verbatim() {
        let e = located(GrabbitErr::NoImages(NO_IMAGES_MESSAGE.to_string()));

        assert_eq!(NO_IMAGES_MESSAGE, block_error_message(&e));
    }

    #[test]
    fn other_errors_are_collapsed() {
        let e = located(GrabbitErr::InvalidParameter(
            "folder id must not be empty".to_string(),
        ));

        assert_eq!(
            "an error occurred: invalid parameter: folder id must not be empty",
            block_error_message(&e)
        );
    }

    #[test]
    fn output_defaults_to_empty_channels() {
        let output = DriveImagesOutput::default();
        let value = serde_json::to_value(output).unwrap();

        assert_eq!(serde_json::json!([]), value["uploaded_files"]);
        assert_eq!(serde_json::json!(""), value["error"]);
    }
}
