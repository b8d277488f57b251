//! Axum integration

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::ReplyError;

/// Convert a response rendered by [`Replier::render`](crate::Replier::render)
/// into an axum response.
#[must_use]
pub fn into_axum(response: http::Response<Vec<u8>>) -> Response {
    response.map(Body::from)
}

/// A failure to shape a response becomes a bare 500; the details only go to
/// the log.
impl IntoResponse for ReplyError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "failed to send response");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
