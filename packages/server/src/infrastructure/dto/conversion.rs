//! Conversion logic between DTOs and domain entities.

use serde_json::Value;
use tsunagi_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    AuthGrant, AuthToken, ChatRecord, Contact, DisplayName, Hazard, Identity, MessageEnvelope,
    Session, SessionState, UserId, ValueObjectError,
};

use super::{
    gateway::{ConnectedUserDto, LoginResponse},
    http::SessionSummaryDto,
    websocket::{ContactPayload, DepartedPayload, IdentityPayload, MessagePayload, TypingPayload},
};

// ========================================
// Gateway DTO → Domain Entity
// ========================================

impl TryFrom<LoginResponse> for AuthGrant {
    type Error = ValueObjectError;

    fn try_from(dto: LoginResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            identity: Identity::new(UserId::new(dto.user_id)?, DisplayName::new(dto.user_name)?),
            token: AuthToken::new(dto.token)?,
        })
    }
}

impl TryFrom<ConnectedUserDto> for Contact {
    type Error = ValueObjectError;

    fn try_from(dto: ConnectedUserDto) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::new(dto.id)?,
            display_name: DisplayName::new(dto.name)?,
        })
    }
}

// ========================================
// Domain Entity → WebSocket DTO
// ========================================

impl From<&Identity> for IdentityPayload {
    fn from(identity: &Identity) -> Self {
        Self {
            user_id: identity.user_id.to_string(),
            display_name: identity.display_name.to_string(),
        }
    }
}

impl From<&Identity> for TypingPayload {
    fn from(identity: &Identity) -> Self {
        Self {
            display_name: identity.display_name.to_string(),
        }
    }
}

impl From<&Identity> for DepartedPayload {
    fn from(identity: &Identity) -> Self {
        Self {
            user_id: identity.user_id.to_string(),
            display_name: identity.display_name.to_string(),
        }
    }
}

impl From<Contact> for ContactPayload {
    fn from(contact: Contact) -> Self {
        Self {
            user_id: contact.user_id.into_string(),
            display_name: contact.display_name.into_string(),
        }
    }
}

impl From<MessageEnvelope> for MessagePayload {
    fn from(envelope: MessageEnvelope) -> Self {
        Self {
            sender_name: envelope.sender_name.into_string(),
            sender_user_id: envelope.sender_user_id.into_string(),
            text: envelope.text.into_string(),
            timestamp: envelope.timestamp.value(),
            related_points_of_interest: envelope.related_points_of_interest,
        }
    }
}

impl From<ChatRecord> for Value {
    fn from(record: ChatRecord) -> Self {
        record.0
    }
}

impl From<Hazard> for Value {
    fn from(hazard: Hazard) -> Self {
        hazard.0
    }
}

// ========================================
// Domain Entity → HTTP DTO
// ========================================

impl From<&Session> for SessionSummaryDto {
    fn from(session: &Session) -> Self {
        let state = match session.state() {
            SessionState::Connected => "connected",
            SessionState::Authenticated => "authenticated",
            SessionState::InRoom => "in_room",
        };
        Self {
            connection_id: session.connection_id.to_string(),
            state: state.to_string(),
            user_id: session.identity.as_ref().map(|i| i.user_id.to_string()),
            display_name: session
                .identity
                .as_ref()
                .map(|i| i.display_name.to_string()),
            room: session.room().map(|room| room.to_string()),
            connected_at: timestamp_to_rfc3339(session.connected_at.value()),
        }
    }
}
