use serde::Deserialize;
use std::fmt;

/// Opaque Drive credential (OAuth2 access token or API key).
///
/// The secret is only revealed when building request headers; `Debug`
/// output is redacted and the type is never serialized back out.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct DriveAccessToken(String);

impl DriveAccessToken {
    pub fn new(token: String) -> Self {
        Self(token)
    }

    /// Access the raw secret.
    pub fn reveal(&self) -> &str {
        &self.0
    }

    /// The `Authorization` header value for Drive API calls.
    pub(super) fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for DriveAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DriveAccessToken(*****)")
    }
}
