use clap::Parser;

// Adapter identifiers.

pub const FS_STORE_ID: &str = "fs";
pub const GOOGLE_SOURCE_ID: &str = "google";

/// The default directory imported images are persisted to.
const DEFAULT_IMAGE_STORE_PATH: &str = "data/images";
/// The default directory in-progress downloads are written to before they
/// are handed to the artifact store.
const DEFAULT_SCRATCH_PATH: &str = "data/scratch";
/// The default address to listen on.
const DEFAULT_ADDRESS: &str = "0.0.0.0:3600";

#[derive(Debug, Parser)]
#[command(name = "grabbit", version = "0.1", about = "Import images from Google Drive folders", long_about = None)]
pub struct StartArgs {
    /// Address to listen on.
    #[arg(long, short)]
    address: Option<String>,

    /// RUST_LOG string to use as the env filter.
    #[arg(long, short)]
    log: Option<String>,

    /// Set the directory imported images are persisted to.
    #[arg(long)]
    image_store_path: Option<String>,

    /// Set the directory in-progress downloads are written to.
    #[arg(long)]
    scratch_path: Option<String>,

    /// CORS allowed origins.
    #[arg(long)]
    cors_allowed_origins: Option<String>,

    /// CORS allowed headers.
    #[arg(long)]
    cors_allowed_headers: Option<String>,
}

/// Implement a getter method on [StartArgs], using the `$var` environment variable as a fallback
/// and either panic or default if neither the argument nor the environment variable is set.
macro_rules! arg {
    ($id:ident, $var:literal, panic $msg:literal) => {
        impl StartArgs {
            pub fn $id(&self) -> String {
                match &self.$id {
                    Some(val) => val.to_string(),
                    None => match std::env::var($var) {
                        Ok(val) => val,
                        Err(_) => panic!($msg),
                    },
                }
            }
        }
    };
    ($id:ident, $var:literal, default $value:expr) => {
        impl StartArgs {
            pub fn $id(&self) -> String {
                match &self.$id {
                    Some(val) => val.to_string(),
                    None => match std::env::var($var) {
                        Ok(val) => val,
                        Err(_) => $value,
                    },
                }
            }
        }
    };
}

impl StartArgs {
    pub fn allowed_origins(&self) -> Vec<String> {
        match &self.cors_allowed_origins {
            Some(origins) => origins
                .split(',')
                .filter_map(|o| (!o.is_empty()).then_some(String::from(o)))
                .collect(),
            None => match std::env::var("CORS_ALLOWED_ORIGINS") {
                Ok(origins) => origins
                    .split(',')
                    .filter_map(|o| (!o.is_empty()).then_some(String::from(o)))
                    .collect(),
                Err(_) => panic!(
                    "Allowed origins not found; Pass --cors-allowed-origins or set CORS_ALLOWED_ORIGINS as a comma separated list"
                ),
            },
        }
    }

    pub fn allowed_headers(&self) -> Vec<String> {
        match &self.cors_allowed_headers {
            Some(headers) => headers
                .split(',')
                .filter_map(|h| (!h.is_empty()).then_some(String::from(h)))
                .collect(),
            None => match std::env::var("CORS_ALLOWED_HEADERS") {
                Ok(headers) => headers
                    .split(',')
                    .filter_map(|h| (!h.is_empty()).then_some(String::from(h)))
                    .collect(),
                Err(_) => panic!(
                    "Allowed headers not found; Pass --cors-allowed-headers or set CORS_ALLOWED_HEADERS as a comma separated list"
                ),
            },
        }
    }
}

arg!(log,              "RUST_LOG",         default "info".to_string());
arg!(address,          "ADDRESS",          default DEFAULT_ADDRESS.to_string());
arg!(image_store_path, "IMAGE_STORE_PATH", default DEFAULT_IMAGE_STORE_PATH.to_string());
arg!(scratch_path,     "SCRATCH_PATH",     default DEFAULT_SCRATCH_PATH.to_string());
