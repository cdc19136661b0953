use crate::{
    app::{
        block::drive_images::{DriveImagesInput, DriveImagesOutput},
        external::google::auth::DriveAccessToken,
        state::AppState,
    },
    core::{
        block::{Block, BlockCategory, BlockMeta, ExecutionContext},
        image::StoredImage,
    },
    error::GrabbitError,
    map_err,
};
use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validify::{schema_err, schema_validation, Validate, ValidationErrors};

#[utoipa::path(
    get,
    path = "/blocks",
    responses(
        (status = 200, description = "List available blocks", body = [BlockMeta])
    )
)]
pub(super) async fn list_blocks(State(state): State<AppState>) -> Json<Vec<BlockMeta>> {
    Json(vec![state.drive_images.meta()])
}

#[utoipa::path(
    post,
    path = "/blocks/google-drive-images/execute",
    request_body = ExecutePayload,
    responses(
        (status = 200, description = "Block executed; exactly one of `uploaded_files` and `error` is populated", body = DriveImagesOutput),
        (status = 422, description = "Invalid payload"),
        (status = 500, description = "Internal server error")
    )
)]
pub(super) async fn execute_drive_images(
    State(state): State<AppState>,
    Json(payload): Json<ExecutePayload>,
) -> Result<Json<DriveImagesOutput>, GrabbitError> {
    map_err!(payload.validate());

    let ctx = payload
        .execution_id
        .map(ExecutionContext::new)
        .unwrap_or_else(ExecutionContext::random);

    let input = DriveImagesInput {
        folder_id: payload.folder_id,
        auth_token: payload.auth_token,
    };

    Ok(Json(state.drive_images.run(&ctx, input).await))
}

// DTOs

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[validate(Self::validate_schema)]
pub(super) struct ExecutePayload {
    /// Workflow execution this run belongs to. Namespaces temporary
    /// artifact names; generated when absent.
    pub execution_id: Option<Uuid>,

    /// ID of the Google Drive folder containing images.
    #[validate(length(min = 1))]
    pub folder_id: String,

    /// OAuth2 token or API key for Google Drive authentication.
    #[schema(value_type = String)]
    pub auth_token: DriveAccessToken,
}

impl ExecutePayload {
    #[schema_validation]
    fn validate_schema(&self) -> Result<(), ValidationErrors> {
        if self.auth_token.reveal().is_empty() {
            schema_err! {
                "empty_auth_token",
                "`auth_token` must not be empty"
            }
        }
    }
}

// Open API.

#[derive(utoipa::OpenApi)]
#[openapi(
    paths(list_blocks, execute_drive_images),
    components(schemas(
        ExecutePayload,
        DriveImagesOutput,
        BlockMeta,
        BlockCategory,
        StoredImage,
    ))
)]
pub(super) struct BlockApiDoc;
