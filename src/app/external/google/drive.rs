use super::{auth::DriveAccessToken, DriveFile, GoogleApiError, GoogleError, ListFilesResponse};
use crate::{
    config::GOOGLE_SOURCE_ID,
    core::{image::ImageFile, provider::Identity, store::external::ImageSource},
    err,
    error::{GrabbitErr, GrabbitError},
    map_err,
};
use tokio::io::{AsyncWrite, AsyncWriteExt};

const FILES_EP: &str = "https://www.googleapis.com/drive/v3/files";

const LIST_FILES_FIELDS: &str = "incompleteSearch,nextPageToken,files(id,name,mimeType,modifiedTime)";

/// Google Drive API client.
/// [Identity] implementation corresponds to the artifact store receiving
/// its downloads.
#[derive(Debug, Clone)]
pub struct GoogleDriveApi {
    token: DriveAccessToken,
    client: reqwest::Client,
}

impl GoogleDriveApi {
    pub fn new(client: reqwest::Client, token: DriveAccessToken) -> Self {
        Self { token, client }
    }

    async fn list_folder_files(&self, folder_id: &str) -> Result<Vec<DriveFile>, GrabbitError> {
        let filter =
            format!("'{folder_id}' in parents and mimeType contains 'image/' and trashed = false");

        let mut files = vec![];
        let mut next_page_token: Option<String> = None;
        let mut requests = 0;

        tracing::debug!("Google Drive listing folder '{folder_id}'");

        loop {
            let query: &[(&str, &str)] = if let Some(ref npt) = next_page_token {
                &[
                    ("q", &filter),
                    ("fields", LIST_FILES_FIELDS),
                    ("pageSize", "1000"),
                    ("pageToken", npt),
                ]
            } else {
                &[
                    ("q", &filter),
                    ("fields", LIST_FILES_FIELDS),
                    ("pageSize", "1000"),
                ]
            };

            let response = map_err!(
                self.client
                    .get(FILES_EP)
                    .header("Authorization", self.token.bearer())
                    .query(query)
                    .send()
                    .await
            );

            requests += 1;

            if !response.status().is_success() {
                let response: GoogleApiError = map_err!(response.json().await);
                tracing::error!("{response}");
                return err!(GrabbitErr::GoogleApi(GoogleError::Api(response)));
            }

            let response: ListFilesResponse = map_err!(response.json().await);

            files.extend(response.files);

            if let Some(npt) = response.next_page_token {
                tracing::debug!("Continuing listing, issued requests: {requests}");
                next_page_token = Some(npt);
                continue;
            }

            if !response.incomplete_search {
                break;
            }

            tracing::debug!("Continuing listing, issued requests: {requests}");
        }

        Ok(files)
    }

    /// Stream a file's content into `sink` using the provided bearer token.
    /// Consumes the response body chunk by chunk; `chunk` yields `None`
    /// once the transfer is complete.
    async fn download_media<W>(&self, file_id: &str, sink: &mut W) -> Result<u64, GrabbitError>
    where
        W: AsyncWrite + Send + Unpin,
    {
        let mut response = map_err!(
            self.client
                .get(format!("{FILES_EP}/{file_id}"))
                .query(&[("alt", "media")])
                .header("Authorization", self.token.bearer())
                .send()
                .await
        );

        if !response.status().is_success() {
            let response: GoogleApiError = map_err!(response.json().await);
            tracing::error!("{response}");
            return err!(GrabbitErr::GoogleApi(GoogleError::Api(response)));
        }

        let mut written = 0u64;

        while let Some(chunk) = map_err!(response.chunk().await) {
            map_err!(sink.write_all(&chunk).await);
            written += chunk.len() as u64;
        }

        map_err!(sink.flush().await);

        Ok(written)
    }
}

impl Identity for GoogleDriveApi {
    fn id(&self) -> &'static str {
        GOOGLE_SOURCE_ID
    }
}

#[async_trait::async_trait]
impl ImageSource for GoogleDriveApi {
    async fn list_images(&self, folder_id: &str) -> Result<Vec<ImageFile>, GrabbitError> {
        let files = self.list_folder_files(folder_id).await?;
        Ok(collect_images(files))
    }

    async fn download<W>(&self, file_id: &str, sink: &mut W) -> Result<u64, GrabbitError>
    where
        W: AsyncWrite + Send + Unpin,
    {
        self.download_media(file_id, sink).await
    }
}

/// Map raw Drive entries to image descriptors, preserving listing order.
/// Entries missing an ID or a name are skipped, as are entries whose media
/// type does not begin with `image/`. Names containing path separators
/// would escape the scratch directory and are skipped as well.
fn collect_images(files: Vec<DriveFile>) -> Vec<ImageFile> {
    files
        .into_iter()
        .filter_map(|file| {
            let DriveFile {
                id: Some(id),
                name: Some(name),
                mime_type,
                modified_time,
            } = file
            else {
                tracing::warn!("Skipping Drive entry with missing id or name");
                return None;
            };

            let Some(mime_type) = mime_type else {
                tracing::warn!("File '{name}' does not have a media type, skipping");
                return None;
            };

            if !mime_type.starts_with("image/") {
                return None;
            }

            if name.contains(['/', '\\']) {
                tracing::warn!("File '{name}' contains path separators, skipping");
                return None;
            }

            Some(ImageFile::new(id, name, mime_type, modified_time))
        })
        .collect()
}
