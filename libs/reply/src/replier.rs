//! Response engine: classifies a response request, resolves its errors against
//! the manifest and writes the resulting envelope.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use http::header::CONTENT_TYPE;
use http::{Response, StatusCode};
use serde_json::Value;

use crate::config::ReplierConfig;
use crate::error::ReplyError;
use crate::manifest::{Manifest, ManifestEntry};
use crate::sink::{ResponseSink, parse_header};
use crate::transfer::{DefaultEnvelope, DefaultErrorEntry, Envelope, ErrorEntry, Headers, Meta};

/// Headers validated up front and written together with the body.
type StagedHeaders = Vec<(String, String)>;

/// Callback invoked with every error identity missing from the manifest.
pub type UnresolvedHook<K> = Arc<dyn Fn(&K) + Send + Sync>;

/// Attributes of a single response.
///
/// Fields are not mutually exclusive; the replier picks one response kind in
/// the order multiple errors, error, tokens, data, blank.
pub struct ResponseRequest<'w, K> {
    pub writer: Option<&'w mut dyn ResponseSink>,
    /// JSON `null` counts as no data.
    pub data: Option<Value>,
    pub meta: Option<Meta>,
    pub headers: Option<Headers>,
    /// `None` sends the replier's default status.
    pub status_code: Option<StatusCode>,
    pub error: Option<K>,
    pub errors: Vec<K>,
    /// Rendered as the access token by the default envelope; empty means absent.
    pub token_one: String,
    /// Rendered as the refresh token by the default envelope; empty means absent.
    pub token_two: String,
}

impl<K> Default for ResponseRequest<'_, K> {
    fn default() -> Self {
        Self {
            writer: None,
            data: None,
            meta: None,
            headers: None,
            status_code: None,
            error: None,
            errors: Vec::new(),
            token_one: String::new(),
            token_two: String::new(),
        }
    }
}

impl<'w, K> ResponseRequest<'w, K> {
    #[must_use]
    pub fn new(writer: &'w mut dyn ResponseSink) -> Self {
        Self {
            writer: Some(writer),
            ..Self::default()
        }
    }

    /// Move every attribute onto a request targeting `writer`.
    #[must_use]
    pub fn with_writer<'a>(self, writer: &'a mut dyn ResponseSink) -> ResponseRequest<'a, K> {
        ResponseRequest {
            writer: Some(writer),
            data: self.data,
            meta: self.meta,
            headers: self.headers,
            status_code: self.status_code,
            error: self.error,
            errors: self.errors,
            token_one: self.token_one,
            token_two: self.token_two,
        }
    }

    #[must_use]
    pub fn with_error(mut self, error: K) -> Self {
        self.error = Some(error);
        self
    }

    #[must_use]
    pub fn with_errors(mut self, errors: Vec<K>) -> Self {
        self.errors = errors;
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn with_tokens(mut self, token_one: impl Into<String>, token_two: impl Into<String>) -> Self {
        self.token_one = token_one.into();
        self.token_two = token_two.into();
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status_code = Some(status);
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    #[must_use]
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// Response kind chosen for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseKind {
    MultiError,
    Error,
    Token,
    Data,
    Blank,
}

/// Shapes and sends both successful and error responses.
///
/// A replier is immutable once built and can be shared between request
/// handlers; every response is assembled on a fresh envelope.
pub struct Replier<K> {
    manifest: Manifest<K>,
    envelope: Box<dyn Envelope>,
    error_entry: Box<dyn ErrorEntry>,
    config: ReplierConfig,
    on_unresolved: Option<UnresolvedHook<K>>,
}

impl<K: fmt::Debug> fmt::Debug for Replier<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Replier")
            .field("manifest", &self.manifest)
            .field("envelope", &self.envelope)
            .field("error_entry", &self.error_entry)
            .field("config", &self.config)
            .field("on_unresolved", &self.on_unresolved.is_some())
            .finish()
    }
}

impl<K: Eq + Hash + fmt::Debug> Replier<K> {
    /// Replier with the default envelope, error entry and configuration.
    #[must_use]
    pub fn new<I>(manifests: I) -> Self
    where
        I: IntoIterator<Item = Manifest<K>>,
    {
        Self::builder(manifests).build()
    }

    #[must_use]
    pub fn builder<I>(manifests: I) -> ReplierBuilder<K>
    where
        I: IntoIterator<Item = Manifest<K>>,
    {
        ReplierBuilder::new(manifests)
    }

    #[must_use]
    pub fn manifest(&self) -> &Manifest<K> {
        &self.manifest
    }

    #[must_use]
    pub fn config(&self) -> &ReplierConfig {
        &self.config
    }

    /// Build the response described by `request` and write it to the
    /// request's writer.
    ///
    /// Errors missing from the manifest are rendered with the configured
    /// internal error entry; that is not a failure of this call.
    ///
    /// # Errors
    /// - `ReplyError::MissingWriter` if the request has no writer
    /// - `ReplyError::InvalidHeader` if a header is not valid HTTP
    /// - `ReplyError::Encode` if the envelope cannot be encoded
    /// - `ReplyError::Write` if the writer rejects the body
    ///
    /// The writer is left untouched on `InvalidHeader` and `Encode`.
    pub fn respond(&self, request: ResponseRequest<'_, K>) -> Result<(), ReplyError> {
        let ResponseRequest {
            writer,
            data,
            meta,
            headers,
            status_code,
            error,
            errors,
            token_one,
            token_two,
        } = request;

        let writer = writer.ok_or(ReplyError::MissingWriter)?;

        let headers = headers.unwrap_or_default();
        let staged = self.stage_headers(writer, &headers)?;

        let mut envelope = self.envelope.fresh();
        envelope.set_headers(headers);
        envelope.set_meta(meta.unwrap_or_default());
        envelope.set_status_code(status_code.unwrap_or(self.config.default_status));

        let kind = if !errors.is_empty() {
            self.generate_multi_error(envelope.as_mut(), &errors);
            ResponseKind::MultiError
        } else if let Some(error) = error {
            self.generate_error(envelope.as_mut(), &error);
            ResponseKind::Error
        } else if !token_one.is_empty() || !token_two.is_empty() {
            envelope.set_token_one(token_one);
            envelope.set_token_two(token_two);
            ResponseKind::Token
        } else if let Some(data) = data.filter(|data| !data.is_null()) {
            envelope.set_data(data);
            ResponseKind::Data
        } else {
            envelope.set_data(Value::String(self.config.blank_body.clone()));
            ResponseKind::Blank
        };

        tracing::debug!(
            kind = ?kind,
            status = envelope.status_code().as_u16(),
            "sending response"
        );
        send(writer, envelope.as_ref(), &staged)
    }

    /// Like [`respond`](Self::respond), but writes into a new
    /// `http::Response` and returns it. The request's own writer is ignored.
    ///
    /// # Errors
    /// Same as [`respond`](Self::respond), except `MissingWriter`.
    pub fn render(&self, request: ResponseRequest<'_, K>) -> Result<Response<Vec<u8>>, ReplyError> {
        let mut response = Response::new(Vec::new());
        self.respond(request.with_writer(&mut response))?;
        Ok(response)
    }

    /// Caller headers plus the default content type when neither the writer
    /// nor the caller sets one.
    fn stage_headers(
        &self,
        writer: &dyn ResponseSink,
        headers: &Headers,
    ) -> Result<StagedHeaders, ReplyError> {
        let content_type = CONTENT_TYPE.as_str();
        let mut staged = Vec::with_capacity(headers.len() + 1);

        let caller_content_type = headers
            .keys()
            .any(|name| name.eq_ignore_ascii_case(content_type));
        if !caller_content_type && writer.header(content_type).is_none() {
            staged.push((content_type.to_owned(), self.config.content_type.clone()));
        }
        staged.extend(headers.iter().map(|(name, value)| (name.clone(), value.clone())));

        for (name, value) in &staged {
            parse_header(name, value)?;
        }
        Ok(staged)
    }

    /// Only the first 5xx error is reported if the list contains one.
    fn generate_multi_error(&self, envelope: &mut dyn Envelope, errors: &[K]) {
        let mut entries = Vec::with_capacity(errors.len());

        for error in errors {
            let (item, status) = self.resolve(error);
            let entry = self.to_error_entry(item, status);

            if status.is_server_error() {
                envelope.set_status_code(status);
                envelope.set_errors(vec![entry]);
                return;
            }
            entries.push(entry);
        }

        envelope.set_status_code(status_or_default(&entries, self.config.default_error_status));
        envelope.set_errors(entries);
    }

    fn generate_error(&self, envelope: &mut dyn Envelope, error: &K) {
        let (item, status) = self.resolve(error);
        envelope.set_status_code(status);
        envelope.set_errors(vec![self.to_error_entry(item, status)]);
    }

    /// Manifest entry for `error` and the status it is sent with, falling
    /// back to the internal error entry.
    fn resolve(&self, error: &K) -> (&ManifestEntry, StatusCode) {
        let item = if let Some(item) = self.manifest.lookup(error) {
            item
        } else {
            tracing::warn!(error = ?error, "failed to find error manifest item");
            if let Some(hook) = &self.on_unresolved {
                hook(error);
            }
            &self.config.internal_error
        };

        (item, item.status.unwrap_or(self.config.default_error_status))
    }

    fn to_error_entry(&self, item: &ManifestEntry, status: StatusCode) -> Box<dyn ErrorEntry> {
        let mut entry = self.error_entry.fresh();
        entry.set_title(item.title.clone());
        entry.set_detail(item.detail.clone());
        entry.set_about(item.about.clone());
        entry.set_code(item.code.clone());
        entry.set_status_code(status);
        entry.set_meta(item.meta.clone());
        entry
    }
}

/// First entry status (in order) that parses as an HTTP status, else `default`.
fn status_or_default(entries: &[Box<dyn ErrorEntry>], default: StatusCode) -> StatusCode {
    entries
        .iter()
        .find_map(|entry| {
            entry
                .status_code()
                .parse::<u16>()
                .ok()
                .and_then(|code| StatusCode::from_u16(code).ok())
        })
        .unwrap_or(default)
}

/// Encode first so that a failed encoding leaves the writer untouched.
fn send(
    writer: &mut dyn ResponseSink,
    envelope: &dyn Envelope,
    headers: &[(String, String)],
) -> Result<(), ReplyError> {
    let mut body = match envelope.to_json().and_then(|json| serde_json::to_vec(&json)) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "failed to encode transfer object");
            return Err(ReplyError::Encode(e));
        }
    };
    body.push(b'\n');

    for (name, value) in headers {
        writer.set_header(name, value)?;
    }
    writer.set_status(envelope.status_code());
    writer.write_body(&body).map_err(|e| {
        tracing::error!(error = %e, "failed to write response body");
        ReplyError::Write(e)
    })
}

/// Builder for [`Replier`].
///
/// The envelope and the error entry are independent: replacing one keeps the
/// default for the other.
pub struct ReplierBuilder<K> {
    manifests: Vec<Manifest<K>>,
    envelope: Box<dyn Envelope>,
    error_entry: Box<dyn ErrorEntry>,
    config: ReplierConfig,
    on_unresolved: Option<UnresolvedHook<K>>,
}

impl<K: Eq + Hash + fmt::Debug> ReplierBuilder<K> {
    #[must_use]
    pub fn new<I>(manifests: I) -> Self
    where
        I: IntoIterator<Item = Manifest<K>>,
    {
        Self {
            manifests: manifests.into_iter().collect(),
            envelope: Box::new(DefaultEnvelope::default()),
            error_entry: Box::new(DefaultErrorEntry::default()),
            config: ReplierConfig::default(),
            on_unresolved: None,
        }
    }

    /// Append a partial manifest; it overrides entries of earlier partials.
    #[must_use]
    pub fn manifest(mut self, manifest: Manifest<K>) -> Self {
        self.manifests.push(manifest);
        self
    }

    /// Envelope whose `fresh` instances shape every response.
    #[must_use]
    pub fn envelope(mut self, prototype: impl Envelope + 'static) -> Self {
        self.envelope = Box::new(prototype);
        self
    }

    /// Error entry whose `fresh` instances shape every rendered error.
    #[must_use]
    pub fn error_entry(mut self, prototype: impl ErrorEntry + 'static) -> Self {
        self.error_entry = Box::new(prototype);
        self
    }

    #[must_use]
    pub fn config(mut self, config: ReplierConfig) -> Self {
        self.config = config;
        self
    }

    /// Called with each error identity the manifest does not know about.
    #[must_use]
    pub fn on_unresolved(mut self, hook: impl Fn(&K) + Send + Sync + 'static) -> Self {
        self.on_unresolved = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn build(self) -> Replier<K> {
        Replier {
            manifest: Manifest::merge(self.manifests),
            envelope: self.envelope,
            error_entry: self.error_entry,
            config: self.config,
            on_unresolved: self.on_unresolved,
        }
    }
}
