//! HTTP action server for the dialogue engine
//!
//! Endpoints:
//! - POST /webhook - Run the action named in `next_action`
//! - GET /actions - List registered actions
//! - GET /health - Health check

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::core::{ActionDispatcher, AuditStore, DirectoryClient};
use crate::types::{ActionName, ActionOutcome, Entity, SlotEvent, Turn};

/// App state
pub struct AppState {
    pub dispatcher: ActionDispatcher,
}

/// Errors returned to the dialogue engine
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("No registered action found for name '{0}'.")]
    UnknownAction(String),
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        let ActionError::UnknownAction(ref name) = self;
        let body = serde_json::json!({
            "error": self.to_string(),
            "action_name": name,
        });
        (StatusCode::NOT_FOUND, Json(body)).into_response()
    }
}

/// Action call from the dialogue engine
#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub next_action: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub tracker: TrackerPayload,
}

/// Conversation state sent along with an action call
#[derive(Debug, Default, Deserialize)]
pub struct TrackerPayload {
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub slots: HashMap<String, Value>,
    #[serde(default)]
    pub latest_message: LatestMessage,
    #[serde(default)]
    pub events: Vec<Value>,
}

/// The user message that triggered the action
#[derive(Debug, Default, Deserialize)]
pub struct LatestMessage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub intent: Option<IntentPayload>,
    #[serde(default)]
    pub entities: Vec<EntityPayload>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IntentPayload {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EntityPayload {
    pub entity: String,
    #[serde(default)]
    pub value: Value,
}

impl TrackerPayload {
    /// Build the immutable turn the actions see
    pub fn to_turn(&self) -> Turn {
        let message = &self.latest_message;
        Turn {
            intent: message.intent.as_ref().and_then(|i| i.name.clone()),
            text: message.text.clone(),
            entities: message
                .entities
                .iter()
                .filter_map(|e| {
                    slot_text(&e.value).map(|value| Entity {
                        entity: e.entity.clone(),
                        value,
                    })
                })
                .collect(),
            slots: self
                .slots
                .iter()
                .map(|(name, value)| (name.clone(), slot_text(value)))
                .collect(),
            proposed: slots_set_since_last_user(&self.events),
        }
    }
}

/// JSON strings verbatim, null as absent, other scalars as their JSON text
fn slot_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// `slot` events recorded after the most recent `user` event
fn slots_set_since_last_user(events: &[Value]) -> Vec<SlotEvent> {
    let event_type = |e: &Value| e.get("event").and_then(Value::as_str).map(str::to_string);
    let start = events
        .iter()
        .rposition(|e| event_type(e).as_deref() == Some("user"))
        .map_or(0, |i| i + 1);

    events[start..]
        .iter()
        .filter(|e| event_type(e).as_deref() == Some("slot"))
        .filter_map(|e| {
            let name = e.get("name")?.as_str()?;
            let value = e.get("value").and_then(slot_text);
            Some(SlotEvent::new(name, value))
        })
        .collect()
}

/// Reply to the dialogue engine
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub events: Vec<SlotSetEvent>,
    pub responses: Vec<TextResponse>,
}

/// `{"event": "slot", "name": ..., "value": ...}`
#[derive(Debug, Serialize)]
pub struct SlotSetEvent {
    pub event: &'static str,
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
}

impl From<ActionOutcome> for ActionResponse {
    fn from(outcome: ActionOutcome) -> Self {
        Self {
            events: outcome
                .events
                .into_iter()
                .map(|e| SlotSetEvent {
                    event: "slot",
                    name: e.name,
                    value: e.value,
                })
                .collect(),
            responses: outcome
                .replies
                .into_iter()
                .map(|text| TextResponse { text })
                .collect(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Registered actions response
#[derive(Debug, Serialize)]
pub struct ActionsResponse {
    pub actions: Vec<&'static str>,
}

/// Create the API router
pub fn create_router(dispatcher: ActionDispatcher) -> Router {
    let state = Arc::new(AppState { dispatcher });

    Router::new()
        .route("/health", get(health))
        .route("/actions", get(list_actions))
        .route("/webhook", post(run_action))
        .with_state(state)
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

async fn list_actions() -> Json<ActionsResponse> {
    Json(ActionsResponse {
        actions: ActionName::ALL.iter().map(ActionName::name).collect(),
    })
}

/// Run one action
async fn run_action(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ActionRequest>,
) -> Result<Json<ActionResponse>, ActionError> {
    let Some(action) = ActionName::from_name(&req.next_action) else {
        warn!(action = %req.next_action, "unknown action requested");
        return Err(ActionError::UnknownAction(req.next_action));
    };

    let sender = req
        .sender_id
        .as_deref()
        .or(req.tracker.sender_id.as_deref())
        .unwrap_or("-");
    info!(action = action.name(), sender, "running action");

    let turn = req.tracker.to_turn();
    let outcome = state.dispatcher.dispatch(action, &turn).await;

    Ok(Json(ActionResponse::from(outcome)))
}

/// Build the dispatcher from config, prepare the audit log and serve
pub async fn run_server(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = AuditStore::new(&config.db_path);
    store.ensure_schema()?;

    let directory = DirectoryClient::new(&config.directory_url, config.lookup_timeout)?;
    let router = create_router(ActionDispatcher::new(directory, store));

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    info!(
        addr = %config.addr,
        directory = %config.directory_url,
        db = %config.db_path.display(),
        "action server listening"
    );
    axum::serve(listener, router).await?;
    Ok(())
}
