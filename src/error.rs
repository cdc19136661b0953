use crate::app::external::google::GoogleError;

pub mod http;

/// Wrapper around [GrabbitErr] that captures the location the error
/// originated from. Always construct with [err!][crate::err] or
/// [map_err!][crate::map_err].
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct GrabbitError {
    pub error: GrabbitErr,
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl GrabbitError {
    pub fn new(error: GrabbitErr, file: &'static str, line: u32, column: u32) -> Self {
        Self {
            error,
            file,
            line,
            column,
        }
    }

    /// Log the error along with its origin.
    pub fn print(&self) {
        tracing::error!("{} | {}:{}:{}", self.error, self.file, self.line, self.column);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GrabbitErr {
    #[error("IO: {0}")]
    IO(#[from] std::io::Error),

    #[error("HTTP: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("{0}")]
    Validation(#[from] validify::ValidationErrors),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid file: {0}")]
    InvalidFile(String),

    #[error("{0}")]
    NoImages(String),

    #[error("{0}")]
    GoogleApi(GoogleError),
}

/// Shorthand for returning a [GrabbitError] with the location it originated from.
///
/// Accepts either a full [GrabbitErr] expression or a variant identifier
/// holding a message followed by format arguments.
#[macro_export]
macro_rules! err {
    ($variant:ident, $($message:tt)*) => {
        Err($crate::error::GrabbitError::new(
            $crate::error::GrabbitErr::$variant(format!($($message)*)),
            file!(),
            line!(),
            column!(),
        ))
    };
    ($error:expr) => {
        Err($crate::error::GrabbitError::new(
            $error,
            file!(),
            line!(),
            column!(),
        ))
    };
}

/// Evaluate the expression, returning early with a located [GrabbitError]
/// if it is an `Err`.
#[macro_export]
macro_rules! map_err {
    ($expression:expr) => {
        match $expression {
            Ok(value) => value,
            Err(e) => {
                return Err($crate::error::GrabbitError::new(
                    e.into(),
                    file!(),
                    line!(),
                    column!(),
                ))
            }
        }
    };
}
