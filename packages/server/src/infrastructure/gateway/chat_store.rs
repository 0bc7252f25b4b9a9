//! Chat Store Gateway over HTTP.

use async_trait::async_trait;

use crate::{
    domain::{
        AuthToken, ChatDraft, ChatRecord, ChatStoreGateway, GatewayError, PersistedMessage, UserId,
    },
    infrastructure::dto::gateway::{
        ChatsData, CreateChatRequest, CreatedChatData, DataEnvelope, PointDto,
    },
};

use super::HttpClient;

/// `POST|GET /api/v1/chats/{sender}/{recipient}`
///
/// The store answers a `GET` with both directions of the pair.
pub struct HttpChatStoreGateway {
    http: HttpClient,
}

impl HttpChatStoreGateway {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChatStoreGateway for HttpChatStoreGateway {
    async fn create_message(
        &self,
        sender: &UserId,
        recipient: &UserId,
        draft: &ChatDraft,
        token: &AuthToken,
    ) -> Result<PersistedMessage, GatewayError> {
        let request = CreateChatRequest {
            message_type: draft.kind.as_str(),
            content: draft.text.as_str(),
            location: PointDto::new(draft.location.into()),
            related_points_of_interest: &draft.related_points_of_interest,
        };

        let response: DataEnvelope<CreatedChatData> = self
            .http
            .post_json(
                &["api", "v1", "chats", sender.as_str(), recipient.as_str()],
                &request,
                Some(token),
            )
            .await?;

        Ok(PersistedMessage {
            record: ChatRecord(response.data.chat),
            related_points_of_interest: response.data.possible_common_spots.unwrap_or_default(),
        })
    }

    async fn list_messages(
        &self,
        a: &UserId,
        b: &UserId,
        token: &AuthToken,
    ) -> Result<Vec<ChatRecord>, GatewayError> {
        let response: DataEnvelope<ChatsData> = self
            .http
            .get_json(&["api", "v1", "chats", a.as_str(), b.as_str()], Some(token))
            .await?;

        Ok(response.data.chats.into_iter().map(ChatRecord).collect())
    }
}
