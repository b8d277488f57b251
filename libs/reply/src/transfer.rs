//! Output shape of a response: the envelope and the error entries inside it.
//!
//! Both shapes are traits so a replier can be configured with a custom wire
//! format. The replier only ever talks to these capability sets and obtains a
//! new instance per response through `fresh`, so a custom shape never needs
//! to be reset by hand.

use std::collections::BTreeMap;
use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Header overlay applied to a response.
pub type Headers = BTreeMap<String, String>;

/// Free-form response metadata.
pub type Meta = Map<String, Value>;

/// One rendered error inside an envelope.
pub trait ErrorEntry: fmt::Debug + Send + Sync {
    fn set_title(&mut self, title: String);
    fn title(&self) -> &str;
    fn set_detail(&mut self, detail: String);
    fn detail(&self) -> &str;
    fn set_about(&mut self, about: String);
    fn about(&self) -> &str;
    /// Stores the status as its decimal string form.
    fn set_status_code(&mut self, status: StatusCode);
    /// Status as text; the replier parses it back and skips values that do not parse.
    fn status_code(&self) -> &str;
    fn set_code(&mut self, code: String);
    fn code(&self) -> &str;
    fn set_meta(&mut self, meta: Option<Value>);
    fn meta(&self) -> Option<&Value>;

    /// Returns an empty entry of the same concrete kind.
    fn fresh(&self) -> Box<dyn ErrorEntry>;

    /// JSON form of the entry as it appears in the response body.
    ///
    /// # Errors
    /// Returns an error if the entry cannot be represented as JSON.
    fn to_json(&self) -> serde_json::Result<Value>;
}

impl Serialize for dyn ErrorEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

/// Top-level response body builder.
///
/// Headers and status are response attributes, not body fields; whether a
/// shape keeps them is up to the implementation.
pub trait Envelope: fmt::Debug + Send + Sync {
    fn set_headers(&mut self, headers: Headers);
    fn set_status_code(&mut self, status: StatusCode);
    fn status_code(&self) -> StatusCode;
    fn set_meta(&mut self, meta: Meta);
    fn set_data(&mut self, data: Value);
    fn set_token_one(&mut self, token: String);
    fn set_token_two(&mut self, token: String);
    fn set_errors(&mut self, errors: Vec<Box<dyn ErrorEntry>>);

    /// Returns an empty envelope of the same concrete kind.
    fn fresh(&self) -> Box<dyn Envelope>;

    /// JSON form of the envelope, i.e. the response body.
    ///
    /// # Errors
    /// Returns an error if the envelope (or the data it carries) cannot be
    /// represented as JSON.
    fn to_json(&self) -> serde_json::Result<Value>;
}

#[allow(clippy::ref_option)] // serde requires &T signature
fn is_absent(data: &Option<Value>) -> bool {
    matches!(data, None | Some(Value::Null))
}

/// Envelope used unless the replier is configured otherwise.
///
/// Renders `errors`, `data`, `access_token`, `refresh_token` and `meta`,
/// each omitted when empty.
#[derive(Debug, Default, Serialize)]
pub struct DefaultEnvelope {
    #[serde(skip)]
    pub headers: Headers,
    #[serde(skip)]
    pub status: StatusCode,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Box<dyn ErrorEntry>>,
    #[serde(skip_serializing_if = "is_absent")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub access_token: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub refresh_token: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub meta: Meta,
}

impl Envelope for DefaultEnvelope {
    fn set_headers(&mut self, headers: Headers) {
        self.headers = headers;
    }

    fn set_status_code(&mut self, status: StatusCode) {
        self.status = status;
    }

    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn set_meta(&mut self, meta: Meta) {
        self.meta = meta;
    }

    fn set_data(&mut self, data: Value) {
        self.data = Some(data);
    }

    fn set_token_one(&mut self, token: String) {
        self.access_token = token;
    }

    fn set_token_two(&mut self, token: String) {
        self.refresh_token = token;
    }

    fn set_errors(&mut self, errors: Vec<Box<dyn ErrorEntry>>) {
        self.errors = errors;
    }

    fn fresh(&self) -> Box<dyn Envelope> {
        Box::new(Self::default())
    }

    fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Error entry used unless the replier is configured otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultErrorEntry {
    /// Short summary of the problem
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Description of the error
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub detail: String,
    /// Link that gives further insight into the error
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub about: String,
    /// HTTP status associated with the error, as text
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    /// Internal error code
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code: String,
    /// Additional meta-information about the error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl ErrorEntry for DefaultErrorEntry {
    fn set_title(&mut self, title: String) {
        self.title = title;
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_detail(&mut self, detail: String) {
        self.detail = detail;
    }

    fn detail(&self) -> &str {
        &self.detail
    }

    fn set_about(&mut self, about: String) {
        self.about = about;
    }

    fn about(&self) -> &str {
        &self.about
    }

    fn set_status_code(&mut self, status: StatusCode) {
        self.status = status.as_u16().to_string();
    }

    fn status_code(&self) -> &str {
        &self.status
    }

    fn set_code(&mut self, code: String) {
        self.code = code;
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn set_meta(&mut self, meta: Option<Value>) {
        self.meta = meta;
    }

    fn meta(&self) -> Option<&Value> {
        self.meta.as_ref()
    }

    fn fresh(&self) -> Box<dyn ErrorEntry> {
        Box::new(Self::default())
    }

    fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
