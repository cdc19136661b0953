use chrono::{DateTime, Utc};
use serde::Deserialize;

pub mod auth;
pub mod drive;

#[derive(Debug, thiserror::Error)]
pub enum GoogleError {
    #[error("{0}")]
    Api(GoogleApiError),
    #[error("{0}")]
    App(String),
}

/// Encountered when using the Google Drive API.
#[derive(Debug, Deserialize, thiserror::Error)]
#[error("{error}")]
pub struct GoogleApiError {
    pub error: GoogleApiErrorInner,
}

#[derive(Debug, Deserialize, thiserror::Error)]
#[error("code: {code}, message: {message}, errors: {errors:?}, status: {status:?}")]
pub struct GoogleApiErrorInner {
    pub code: u16,
    pub message: String,
    #[serde(default)]
    pub errors: Vec<GoogleErrorDetail>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleErrorDetail {
    pub message: String,
    pub domain: String,
    pub reason: String,
}

// DTOs

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListFilesResponse {
    #[serde(default)]
    files: Vec<DriveFile>,
    next_page_token: Option<String>,
    #[serde(default)]
    incomplete_search: bool,
}

/// Drive reports entries with whatever fields it has; anything missing the
/// required ones is skipped during collection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: Option<String>,
    name: Option<String>,
    mime_type: Option<String>,
    modified_time: Option<DateTime<Utc>>,
}
