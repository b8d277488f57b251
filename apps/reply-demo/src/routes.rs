//! Demo API: every route answers through a [`Replier`], either by building a
//! [`ResponseRequest`] directly or through one of the aides.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use http::StatusCode;
use reply::axum_support::into_axum;
use reply::{Headers, Manifest, Replier, ReplierConfig, ReplyError, ResponseRequest, with_headers};
use serde::Serialize;

use crate::errors::DemoError;
use crate::shapes::{BarError, FooEnvelope};

const CORRELATION_ID: &str = "d7c09ac2-fa46-4ece-bcde-1d7ad81d2230";
const ACCESS_TOKEN: &str = "05e42c11-8bdd-423d-a2c1-c3c5c6604a30";
const REFRESH_TOKEN: &str = "0e95c426-d373-41a5-bfe1-08db322527bd";

type Reply = Result<Response, ReplyError>;

/// Repliers shared by all handlers, one per output shape combination.
#[derive(Clone)]
pub struct AppState {
    pub replier: Arc<Replier<DemoError>>,
    pub custom_envelope: Arc<Replier<DemoError>>,
    pub custom_error: Arc<Replier<DemoError>>,
    pub custom_both: Arc<Replier<DemoError>>,
}

impl AppState {
    #[must_use]
    pub fn new(manifests: &[Manifest<DemoError>], config: &ReplierConfig) -> Self {
        let builder = || Replier::builder(manifests.to_vec()).config(config.clone());

        Self {
            replier: Arc::new(builder().build()),
            custom_envelope: Arc::new(builder().envelope(FooEnvelope::default()).build()),
            custom_error: Arc::new(builder().error_entry(BarError::default()).build()),
            custom_both: Arc::new(
                builder()
                    .envelope(FooEnvelope::default())
                    .error_entry(BarError::default())
                    .build(),
            ),
        }
    }
}

#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/errors", get(multi_error))
        .route("/users", get(users))
        .route("/users/3", get(user_not_found))
        .route("/users/4", get(user_unexpected_error))
        .route("/tokens/refresh", get(tokens))
        .route("/defaults/1", get(default_response))
        .route("/users/3/custom", get(user_not_found_custom_envelope))
        .route("/users/404/custom", get(user_not_found_custom_shapes))
        .route("/aides/errors", get(aide_multi_error))
        .route("/aides/errors/custom", get(aide_multi_error_custom_entry))
        .route("/aides/users", get(aide_users))
        .route("/aides/users/3", get(aide_user_not_found))
        .route("/aides/users/4", get(aide_user_unexpected_error))
        .route("/aides/tokens/refresh", get(aide_tokens))
        .route("/aides/defaults/1", get(aide_default_response))
        .route("/aides/users/3/custom", get(aide_user_not_found_custom_envelope))
        .with_state(state)
}

#[derive(Serialize)]
struct User {
    id: u32,
    name: &'static str,
}

fn queried_users() -> [User; 2] {
    [
        User {
            id: 1,
            name: "John Doe",
        },
        User {
            id: 2,
            name: "Sam Smith",
        },
    ]
}

fn correlation_headers() -> Headers {
    Headers::from([("correlation-id".to_owned(), CORRELATION_ID.to_owned())])
}

fn dob_and_name_errors() -> Vec<DemoError> {
    vec![DemoError::ExampleDobValidation, DemoError::ExampleNameValidation]
}

/// Run an aide against a fresh response.
fn with_sink(
    send: impl FnOnce(&mut http::Response<Vec<u8>>) -> Result<(), ReplyError>,
) -> Reply {
    let mut response = http::Response::new(Vec::new());
    send(&mut response)?;
    Ok(into_axum(response))
}

// --- full requests ---------------------------------------------------------

async fn multi_error(State(state): State<AppState>) -> Reply {
    state
        .replier
        .render(ResponseRequest::default().with_errors(dob_and_name_errors()))
        .map(into_axum)
}

async fn users(State(state): State<AppState>) -> Reply {
    let data = serde_json::to_value(queried_users())?;
    state
        .replier
        .render(ResponseRequest::default().with_data(data))
        .map(into_axum)
}

async fn user_not_found(State(state): State<AppState>) -> Reply {
    state
        .replier
        .render(ResponseRequest::default().with_error(DemoError::Example404))
        .map(into_axum)
}

async fn user_unexpected_error(State(state): State<AppState>) -> Reply {
    state
        .replier
        .render(
            ResponseRequest::default()
                .with_error(DemoError::Unexpected)
                .with_headers(correlation_headers()),
        )
        .map(into_axum)
}

async fn tokens(State(state): State<AppState>) -> Reply {
    state
        .replier
        .render(ResponseRequest::default().with_tokens(ACCESS_TOKEN, REFRESH_TOKEN))
        .map(into_axum)
}

async fn default_response(State(state): State<AppState>) -> Reply {
    state
        .replier
        .render(ResponseRequest::default())
        .map(into_axum)
}

async fn user_not_found_custom_envelope(State(state): State<AppState>) -> Reply {
    state
        .custom_envelope
        .render(ResponseRequest::default().with_error(DemoError::Example404))
        .map(into_axum)
}

async fn user_not_found_custom_shapes(State(state): State<AppState>) -> Reply {
    state
        .custom_both
        .render(ResponseRequest::default().with_error(DemoError::Example404))
        .map(into_axum)
}

// --- aides -----------------------------------------------------------------

async fn aide_multi_error(State(state): State<AppState>) -> Reply {
    with_sink(|sink| {
        state
            .replier
            .multi_error_response(sink, dob_and_name_errors(), [])
    })
}

async fn aide_multi_error_custom_entry(State(state): State<AppState>) -> Reply {
    with_sink(|sink| {
        state
            .custom_error
            .multi_error_response(sink, dob_and_name_errors(), [])
    })
}

async fn aide_users(State(state): State<AppState>) -> Reply {
    with_sink(|sink| {
        state
            .replier
            .data_response(sink, StatusCode::CREATED, &queried_users(), [])
    })
}

async fn aide_user_not_found(State(state): State<AppState>) -> Reply {
    with_sink(|sink| state.replier.error_response(sink, DemoError::Example404, []))
}

async fn aide_user_unexpected_error(State(state): State<AppState>) -> Reply {
    with_sink(|sink| {
        state.replier.error_response(
            sink,
            DemoError::Unexpected,
            [with_headers(correlation_headers())],
        )
    })
}

async fn aide_tokens(State(state): State<AppState>) -> Reply {
    with_sink(|sink| {
        state
            .replier
            .token_response(sink, StatusCode::OK, ACCESS_TOKEN, REFRESH_TOKEN, [])
    })
}

async fn aide_default_response(State(state): State<AppState>) -> Reply {
    with_sink(|sink| state.replier.blank_response(sink, StatusCode::OK, []))
}

async fn aide_user_not_found_custom_envelope(State(state): State<AppState>) -> Reply {
    with_sink(|sink| {
        state
            .custom_envelope
            .error_response(sink, DemoError::Example404, [])
    })
}
