use super::{GrabbitErr, GrabbitError};
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

impl GrabbitError {
    pub fn status(&self) -> StatusCode {
        use GrabbitErr as E;
        use StatusCode as SC;
        match self.error {
            E::Validation(_) | E::InvalidFile(_) => SC::UNPROCESSABLE_ENTITY,
            E::InvalidParameter(_) => SC::BAD_REQUEST,
            E::NoImages(_) => SC::NOT_FOUND,
            E::IO(_) | E::GoogleApi(_) => SC::INTERNAL_SERVER_ERROR,
            E::Reqwest(ref e) => e.status().unwrap_or(SC::INTERNAL_SERVER_ERROR),
        }
    }
}

/// Error response wrapper.
#[derive(Debug, Serialize)]
struct ResponseError<T: Serialize> {
    error_type: ErrorType,
    body: T,
}

impl<T> ResponseError<T>
where
    T: Serialize,
{
    pub fn new(error_type: ErrorType, body: T) -> Self {
        Self { error_type, body }
    }
}

#[derive(Debug, Serialize)]
enum ErrorType {
    Internal,
    Api,
}

impl<T> IntoResponse for ResponseError<T>
where
    T: Serialize,
{
    fn into_response(self) -> axum::response::Response {
        <Json<ResponseError<T>> as IntoResponse>::into_response(Json(self))
    }
}

impl IntoResponse for GrabbitError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();

        self.print();

        use ErrorType as ET;
        use GrabbitErr as GE;

        match self.error {
            GE::Validation(errors) => (status, ResponseError::new(ET::Api, errors)).into_response(),
            GE::InvalidParameter(e) | GE::InvalidFile(e) | GE::NoImages(e) => {
                (status, ResponseError::new(ET::Api, e)).into_response()
            }
            GE::IO(_) => (status, "Internal".to_string()).into_response(),
            GE::Reqwest(e) => (status, e.to_string()).into_response(),
            GE::GoogleApi(e) => (status, e.to_string()).into_response(),
        }
    }
}
