//! Convenience entry points that build a [`ResponseRequest`] from discrete
//! arguments and hand it to [`Replier::respond`].

use std::fmt;
use std::hash::Hash;

use http::StatusCode;
use serde::Serialize;

use crate::error::ReplyError;
use crate::replier::{Replier, ResponseRequest};
use crate::sink::ResponseSink;
use crate::transfer::{Headers, Meta};

/// Optional per-call attribute accepted by every aide.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseAttribute {
    /// Headers overlaid onto the writer
    Headers(Headers),
    /// Response metadata
    Meta(Meta),
}

impl ResponseAttribute {
    fn apply<K>(self, request: &mut ResponseRequest<'_, K>) {
        match self {
            Self::Headers(headers) => request.headers = Some(headers),
            Self::Meta(meta) => request.meta = Some(meta),
        }
    }
}

/// Overlay `headers` onto the response.
#[must_use]
pub fn with_headers(headers: Headers) -> ResponseAttribute {
    ResponseAttribute::Headers(headers)
}

/// Attach `meta` to the response body.
#[must_use]
pub fn with_meta(meta: Meta) -> ResponseAttribute {
    ResponseAttribute::Meta(meta)
}

fn request<'w, K>(
    writer: &'w mut dyn ResponseSink,
    attributes: impl IntoIterator<Item = ResponseAttribute>,
) -> ResponseRequest<'w, K> {
    let mut request = ResponseRequest::new(writer);
    for attribute in attributes {
        attribute.apply(&mut request);
    }
    request
}

impl<K: Eq + Hash + fmt::Debug> Replier<K> {
    /// Send a single error response.
    ///
    /// # Errors
    /// See [`Replier::respond`].
    pub fn error_response(
        &self,
        writer: &mut dyn ResponseSink,
        error: K,
        attributes: impl IntoIterator<Item = ResponseAttribute>,
    ) -> Result<(), ReplyError> {
        self.respond(request(writer, attributes).with_error(error))
    }

    /// Send a response holding every error of `errors`, in order.
    ///
    /// # Errors
    /// See [`Replier::respond`].
    pub fn multi_error_response(
        &self,
        writer: &mut dyn ResponseSink,
        errors: Vec<K>,
        attributes: impl IntoIterator<Item = ResponseAttribute>,
    ) -> Result<(), ReplyError> {
        self.respond(request(writer, attributes).with_errors(errors))
    }

    /// Send `data` as the response payload.
    ///
    /// # Errors
    /// Returns `ReplyError::Encode` without writing anything if `data` cannot
    /// be represented as JSON, otherwise see [`Replier::respond`].
    pub fn data_response<T>(
        &self,
        writer: &mut dyn ResponseSink,
        status: StatusCode,
        data: &T,
        attributes: impl IntoIterator<Item = ResponseAttribute>,
    ) -> Result<(), ReplyError>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_json::to_value(data).map_err(|e| {
            tracing::error!(error = %e, "failed to encode response data");
            ReplyError::Encode(e)
        })?;

        self.respond(
            request(writer, attributes)
                .with_status(status)
                .with_data(data),
        )
    }

    /// Send the default response.
    ///
    /// # Errors
    /// See [`Replier::respond`].
    pub fn blank_response(
        &self,
        writer: &mut dyn ResponseSink,
        status: StatusCode,
        attributes: impl IntoIterator<Item = ResponseAttribute>,
    ) -> Result<(), ReplyError> {
        self.respond(request(writer, attributes).with_status(status))
    }

    /// Send a token response. At least one of the tokens must be non-empty.
    ///
    /// # Errors
    /// Returns `ReplyError::NoTokens` without writing anything if both tokens
    /// are empty, otherwise see [`Replier::respond`].
    pub fn token_response(
        &self,
        writer: &mut dyn ResponseSink,
        status: StatusCode,
        token_one: impl Into<String>,
        token_two: impl Into<String>,
        attributes: impl IntoIterator<Item = ResponseAttribute>,
    ) -> Result<(), ReplyError> {
        let (token_one, token_two) = (token_one.into(), token_two.into());
        if token_one.is_empty() && token_two.is_empty() {
            return Err(ReplyError::NoTokens);
        }

        self.respond(
            request(writer, attributes)
                .with_status(status)
                .with_tokens(token_one, token_two),
        )
    }
}
