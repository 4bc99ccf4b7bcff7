use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use common::types::{SlashRequest, SlashResponse};
use service::{
    slash::{cerino, directory::{self, Directory}, meme, Reply},
    storage::PersDict,
};
use tracing::{info, warn};

use crate::errors::ApiError;
use crate::metrics::{self, Outcome};

#[derive(Clone)]
pub struct MemeState {
    pub store: Arc<PersDict>,
    pub token: String,
}

#[derive(Clone)]
pub struct CceState {
    pub directory: Arc<Directory>,
    pub token: String,
}

#[derive(Clone)]
pub struct CerinoState {
    pub token: String,
}

/// Everything the handlers need, built once at startup. Each command's
/// router gets its own part; optional commands are routed only when present.
#[derive(Clone)]
pub struct ServerState {
    pub meme: MemeState,
    pub cce: Option<CceState>,
    pub cerino: Option<CerinoState>,
}

fn unauthorized(command: &str, req: &SlashRequest) -> Response {
    warn!(
        command,
        received = req.command.as_deref().unwrap_or_default(),
        user = req.user_name.as_deref().unwrap_or_default(),
        "rejected slash request"
    );
    metrics::record(command, Outcome::Unauthorized);
    (StatusCode::UNAUTHORIZED, Json(serde_json::json!({"text": "invalid request"}))).into_response()
}

fn respond(command: &str, req: &SlashRequest, reply: Reply) -> Response {
    info!(
        command,
        user = req.user_name.as_deref().unwrap_or_default(),
        channel = req.channel_name.as_deref().unwrap_or_default(),
        private = reply.private,
        "slash command answered"
    );
    metrics::record(command, Outcome::Ok);
    Json(SlashResponse::new(reply.text, reply.private)).into_response()
}

/// `POST /meme`
pub async fn meme(
    State(state): State<MemeState>,
    Form(req): Form<SlashRequest>,
) -> Result<Response, ApiError> {
    let _timer = metrics::REQUEST_DURATION.start_timer();
    if !req.is_authorized(meme::COMMAND, &state.token) {
        return Ok(unauthorized(meme::COMMAND, &req));
    }

    match meme::dispatch(&state.store, req.text()).await {
        Ok(reply) => Ok(respond(meme::COMMAND, &req, reply)),
        Err(e) => {
            metrics::record(meme::COMMAND, Outcome::Error);
            Err(e.into())
        }
    }
}

/// `POST /cce`
pub async fn cce(
    State(state): State<CceState>,
    Form(req): Form<SlashRequest>,
) -> Response {
    let _timer = metrics::REQUEST_DURATION.start_timer();
    if !req.is_authorized(directory::COMMAND, &state.token) {
        return unauthorized(directory::COMMAND, &req);
    }

    let reply = state.directory.lookup(req.text());
    respond(directory::COMMAND, &req, reply)
}

/// `POST /cerino`
pub async fn cerino(
    State(state): State<CerinoState>,
    Form(req): Form<SlashRequest>,
) -> Response {
    let _timer = metrics::REQUEST_DURATION.start_timer();
    if !req.is_authorized(cerino::COMMAND, &state.token) {
        return unauthorized(cerino::COMMAND, &req);
    }

    let reply = cerino::pick(req.text());
    respond(cerino::COMMAND, &req, reply)
}
