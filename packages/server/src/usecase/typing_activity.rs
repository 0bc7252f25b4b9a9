//! UseCase: 入力中通知

use std::sync::Arc;

use crate::domain::{ConnectionId, Identity, RoomId, SessionRegistry};

use super::error::TypingActivityError;

/// 入力中通知の配信内容（送信者を除くルームに配信する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingNotice {
    pub room: RoomId,
    pub identity: Identity,
}

/// 入力中通知のユースケース
pub struct TypingActivityUseCase {
    registry: Arc<dyn SessionRegistry>,
}

impl TypingActivityUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<TypingNotice, TypingActivityError> {
        let session = self
            .registry
            .get(connection_id)
            .await
            .map_err(TypingActivityError::SessionNotFound)?;

        match (session.identity, session.conversation) {
            (Some(identity), Some(conversation)) => Ok(TypingNotice {
                room: conversation.room,
                identity,
            }),
            _ => Err(TypingActivityError::NoRoomSelected),
        }
    }
}
