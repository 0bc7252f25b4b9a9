//! WebSocket message DTOs.
//!
//! Every frame is a JSON object `{"event": <name>, "payload": <value>}`.
//! Commands without arguments still carry an empty object payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{MessageKind, PointOfInterest};

/// Commands sent by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum ClientCommand {
    Authenticate(AuthenticatePayload),
    SelectPeer(SelectPeerPayload),
    SendMessage(SendMessagePayload),
    TypingActivity(EmptyPayload),
    ListConnections(EmptyPayload),
    ReportHazard(ReportHazardPayload),
    ListHazards(EmptyPayload),
}

impl ClientCommand {
    /// Event name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            ClientCommand::Authenticate(_) => "authenticate",
            ClientCommand::SelectPeer(_) => "selectPeer",
            ClientCommand::SendMessage(_) => "sendMessage",
            ClientCommand::TypingActivity(_) => "typingActivity",
            ClientCommand::ListConnections(_) => "listConnections",
            ClientCommand::ReportHazard(_) => "reportHazard",
            ClientCommand::ListHazards(_) => "listHazards",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyPayload {}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatePayload {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AuthenticatePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatePayload")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectPeerPayload {
    pub peer_user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessagePayload {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub kind: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportHazardPayload {
    #[serde(alias = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    pub location: [f64; 2],
}

/// Events sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum ServerEvent {
    Identity(IdentityPayload),
    AuthError(AuthErrorPayload),
    History(Vec<Value>),
    Message(MessagePayload),
    Typing(TypingPayload),
    Connections(Vec<ContactPayload>),
    Hazards(Vec<Value>),
    Departed(DepartedPayload),
    Error(ErrorPayload),
}

impl ServerEvent {
    /// Serialize for the wire.
    ///
    /// Every payload is built from strings, numbers and JSON values, so
    /// serialization cannot fail; a failure is logged and yields `None`.
    pub fn to_json(&self) -> Option<String> {
        match serde_json::to_string(self) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::error!("Failed to serialize server event: {}", e);
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityPayload {
    pub user_id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthErrorPayload {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    pub sender_name: String,
    pub sender_user_id: String,
    pub text: String,
    pub timestamp: i64,
    pub related_points_of_interest: Vec<PointOfInterest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingPayload {
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub user_id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartedPayload {
    pub user_id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    PreconditionFailed,
    InvalidInput,
    GatewayUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: ErrorCode,
    pub message: String,
}
