//! Custom response shapes used by the `/custom` routes

use http::StatusCode;
use reply::{Envelope, ErrorEntry, Headers, Meta};
use serde::Serialize;
use serde_json::{Map, Value};

#[allow(clippy::ref_option)] // serde requires &T signature
fn is_absent(data: &Option<Value>) -> bool {
    matches!(data, None | Some(Value::Null))
}

/// Envelope nesting the whole body under `"bar"`.
#[derive(Debug, Default, Serialize)]
pub struct FooEnvelope {
    #[serde(skip)]
    status: StatusCode,
    bar: BarBody,
}

#[derive(Debug, Default, Serialize)]
struct BarBody {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<Box<dyn ErrorEntry>>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    meta: Meta,
    #[serde(skip_serializing_if = "is_absent")]
    data: Option<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    access_token: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    refresh_token: String,
}

impl Envelope for FooEnvelope {
    /// Headers are already on the writer; this shape does not echo them.
    fn set_headers(&mut self, _headers: Headers) {}

    fn set_status_code(&mut self, status: StatusCode) {
        self.status = status;
    }

    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn set_meta(&mut self, meta: Meta) {
        self.bar.meta = meta;
    }

    fn set_data(&mut self, data: Value) {
        self.bar.data = Some(data);
    }

    fn set_token_one(&mut self, token: String) {
        self.bar.access_token = token;
    }

    fn set_token_two(&mut self, token: String) {
        self.bar.refresh_token = token;
    }

    fn set_errors(&mut self, errors: Vec<Box<dyn ErrorEntry>>) {
        self.bar.errors = errors;
    }

    fn fresh(&self) -> Box<dyn Envelope> {
        Box::new(Self::default())
    }

    fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Error entry reporting the detail as `"message"`, with status, code and
/// meta grouped under `"more"`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BarError {
    #[serde(skip_serializing_if = "String::is_empty")]
    title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    about: String,
    more: More,
}

#[derive(Debug, Clone, Default, Serialize)]
struct More {
    #[serde(skip_serializing_if = "String::is_empty")]
    status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<Value>,
}

impl ErrorEntry for BarError {
    fn set_title(&mut self, title: String) {
        self.title = title;
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_detail(&mut self, detail: String) {
        self.message = detail;
    }

    fn detail(&self) -> &str {
        &self.message
    }

    fn set_about(&mut self, about: String) {
        self.about = about;
    }

    fn about(&self) -> &str {
        &self.about
    }

    fn set_status_code(&mut self, status: StatusCode) {
        self.more.status = status.as_u16().to_string();
    }

    fn status_code(&self) -> &str {
        &self.more.status
    }

    fn set_code(&mut self, code: String) {
        self.more.code = code;
    }

    fn code(&self) -> &str {
        &self.more.code
    }

    fn set_meta(&mut self, meta: Option<Value>) {
        self.more.meta = meta;
    }

    fn meta(&self) -> Option<&Value> {
        self.more.meta.as_ref()
    }

    fn fresh(&self) -> Box<dyn ErrorEntry> {
        Box::new(Self::default())
    }

    fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
