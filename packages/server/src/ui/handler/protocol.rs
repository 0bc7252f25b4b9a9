//! Protocol Handler: dispatches the commands of one connection.
//!
//! Commands are handled one at a time in arrival order. Replies go to the
//! caller only; room and global events go through the `BroadcastRouter`.

use std::sync::Arc;

use serde_json::Value;

use crate::{
    domain::{ConnectionId, Contact},
    infrastructure::dto::websocket::{
        AuthErrorPayload, ClientCommand, ContactPayload, DepartedPayload, ErrorCode, ErrorPayload,
        IdentityPayload, MessagePayload, ReportHazardPayload, SendMessagePayload, ServerEvent,
        TypingPayload,
    },
    ui::state::AppState,
    usecase::{Departure, FailureKind, OutgoingMessage, RoadConditionError},
};

/// Message of the `authError` event
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

/// Command dispatcher bound to one connection
pub struct ProtocolHandler {
    state: Arc<AppState>,
    connection_id: ConnectionId,
}

impl ProtocolHandler {
    pub fn new(state: Arc<AppState>, connection_id: ConnectionId) -> Self {
        Self {
            state,
            connection_id,
        }
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }

    /// Parse and handle one text frame.
    pub async fn handle_text(&self, text: &str) {
        match serde_json::from_str::<ClientCommand>(text) {
            Ok(command) => self.dispatch(command).await,
            Err(e) => {
                tracing::warn!(
                    "Malformed command from '{}': {}",
                    self.connection_id,
                    e
                );
                self.reply_error(ErrorCode::InvalidInput, format!("malformed command: {e}"))
                    .await;
            }
        }
    }

    pub async fn dispatch(&self, command: ClientCommand) {
        tracing::debug!(
            "Connection '{}' sent '{}'",
            self.connection_id,
            command.name()
        );

        match command {
            ClientCommand::Authenticate(payload) => {
                self.authenticate(payload.email, payload.password).await
            }
            ClientCommand::SelectPeer(payload) => self.select_peer(payload.peer_user_id).await,
            ClientCommand::SendMessage(payload) => self.send_message(payload).await,
            ClientCommand::TypingActivity(_) => self.typing_activity().await,
            ClientCommand::ListConnections(_) => self.list_connections().await,
            ClientCommand::ReportHazard(payload) => self.report_hazard(payload).await,
            ClientCommand::ListHazards(_) => self.list_hazards().await,
        }
    }

    async fn authenticate(&self, email: String, password: String) {
        match self
            .state
            .authenticate_usecase
            .execute(&self.connection_id, email, password)
            .await
        {
            Ok(identity) => {
                self.reply(ServerEvent::Identity(IdentityPayload::from(&identity)))
                    .await;
                self.list_connections().await;
            }
            Err(e) if e.kind() == FailureKind::SessionNotFound => {
                tracing::debug!("Dropping login result for '{}': {}", self.connection_id, e);
            }
            Err(e) => {
                tracing::info!("Login failed on '{}': {}", self.connection_id, e);
                self.reply(ServerEvent::AuthError(AuthErrorPayload {
                    message: LOGIN_FAILED_MESSAGE.to_string(),
                }))
                .await;
            }
        }
    }

    async fn select_peer(&self, peer_user_id: String) {
        match self
            .state
            .select_peer_usecase
            .execute(&self.connection_id, peer_user_id)
            .await
        {
            Ok(selected) => {
                let history = selected.history.into_iter().map(Value::from).collect();
                self.reply(ServerEvent::History(history)).await;
            }
            Err(e) => self.reply_failure(e.kind(), e.to_string()).await,
        }
    }

    async fn send_message(&self, payload: SendMessagePayload) {
        let message = OutgoingMessage {
            text: payload.text,
            kind: payload.kind,
            location: payload.location,
        };

        let delivery = match self
            .state
            .send_message_usecase
            .execute(&self.connection_id, message)
            .await
        {
            Ok(delivery) => delivery,
            Err(e) => return self.reply_failure(e.kind(), e.to_string()).await,
        };

        let event = ServerEvent::Message(MessagePayload::from(delivery.envelope));
        if let Some(json) = event.to_json() {
            match self
                .state
                .broadcast_router
                .to_room(&delivery.room, &json)
                .await
            {
                Ok(targets) => tracing::debug!(
                    "Delivered message to {} connection(s) in room '{}'",
                    targets.len(),
                    delivery.room
                ),
                Err(e) => tracing::warn!("Failed to deliver message: {}", e),
            }
        }
    }

    async fn typing_activity(&self) {
        let notice = match self
            .state
            .typing_activity_usecase
            .execute(&self.connection_id)
            .await
        {
            Ok(notice) => notice,
            Err(e) => return self.reply_failure(e.kind(), e.to_string()).await,
        };

        let event = ServerEvent::Typing(TypingPayload::from(&notice.identity));
        if let Some(json) = event.to_json()
            && let Err(e) = self
                .state
                .broadcast_router
                .to_room_except_caller(&notice.room, &self.connection_id, &json)
                .await
        {
            tracing::warn!("Failed to deliver typing activity: {}", e);
        }
    }

    async fn list_connections(&self) {
        let contacts = match self
            .state
            .list_connections_usecase
            .execute(&self.connection_id)
            .await
        {
            Ok(contacts) => contacts,
            Err(e) => return self.reply_failure(e.kind(), e.to_string()).await,
        };

        let first = contacts.first().map(|contact: &Contact| contact.user_id.to_string());
        let payload = contacts.into_iter().map(ContactPayload::from).collect();
        self.reply(ServerEvent::Connections(payload)).await;

        if let Some(peer_user_id) = first {
            self.select_peer(peer_user_id).await;
        }
    }

    async fn report_hazard(&self, payload: ReportHazardPayload) {
        match self
            .state
            .road_condition_usecase
            .report(
                &self.connection_id,
                payload.kind,
                payload.description,
                payload.location,
            )
            .await
        {
            Ok(hazard) => self.broadcast_hazards(vec![Value::from(hazard)]).await,
            Err(e) => self.reply_failure(e.kind(), e.to_string()).await,
        }
    }

    async fn list_hazards(&self) {
        match self
            .state
            .road_condition_usecase
            .list(&self.connection_id)
            .await
        {
            Ok(hazards) => {
                self.broadcast_hazards(hazards.into_iter().map(Value::from).collect())
                    .await
            }
            Err(RoadConditionError::Gateway(e)) => {
                tracing::warn!("Failed to list hazards: {}", e);
                self.reply(ServerEvent::Hazards(Vec::new())).await;
            }
            Err(e) => self.reply_failure(e.kind(), e.to_string()).await,
        }
    }

    async fn broadcast_hazards(&self, hazards: Vec<Value>) {
        if let Some(json) = ServerEvent::Hazards(hazards).to_json()
            && let Err(e) = self.state.broadcast_router.to_all(&json).await
        {
            tracing::warn!("Failed to broadcast hazards: {}", e);
        }
    }

    async fn reply(&self, event: ServerEvent) {
        let Some(json) = event.to_json() else {
            return;
        };
        if let Err(e) = self
            .state
            .broadcast_router
            .to_caller(&self.connection_id, &json)
            .await
        {
            tracing::debug!("Reply to '{}' dropped: {}", self.connection_id, e);
        }
    }

    async fn reply_error(&self, code: ErrorCode, message: String) {
        self.reply(ServerEvent::Error(ErrorPayload { code, message }))
            .await;
    }

    async fn reply_failure(&self, kind: FailureKind, message: String) {
        let code = match kind {
            FailureKind::PreconditionFailed => ErrorCode::PreconditionFailed,
            FailureKind::InvalidInput => ErrorCode::InvalidInput,
            FailureKind::GatewayUnavailable | FailureKind::AuthenticationFailed => {
                ErrorCode::GatewayUnavailable
            }
            FailureKind::SessionNotFound => {
                tracing::debug!(
                    "Connection '{}' is no longer tracked: {}",
                    self.connection_id,
                    message
                );
                return;
            }
        };
        tracing::info!(
            "Command from '{}' rejected: {}",
            self.connection_id,
            message
        );
        self.reply_error(code, message).await;
    }
}

/// Tell the remaining room members that a user left.
pub async fn notify_departure(state: &AppState, departure: Departure) {
    let event = ServerEvent::Departed(DepartedPayload::from(&departure.identity));
    let Some(json) = event.to_json() else {
        return;
    };
    match state.broadcast_router.to_room(&departure.room, &json).await {
        Ok(targets) => tracing::info!(
            "Notified {} connection(s) that '{}' left room '{}'",
            targets.len(),
            departure.identity.user_id,
            departure.room
        ),
        Err(e) => tracing::warn!("Failed to notify departure: {}", e),
    }
}
