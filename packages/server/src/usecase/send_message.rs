//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 周辺スポットの付与、Chat Store への永続化、配信内容の構築
//!
//! ### なぜこのテストが必要か
//! - 永続化の呼び出しが返ってから配信内容が確定すること
//! - ルーム未選択以外の理由で配信が止まらないこと（周辺スポット検索や永続化の失敗、
//!   Chat Store が拒否する本文や座標を含む）
//!
//! ### どのような状況を想定しているか
//! - 正常系：テキストメッセージ、位置情報メッセージ
//! - 異常系：ルーム選択前の送信
//! - エッジケース：周辺スポット検索の失敗、永続化の失敗、長い本文、座標なしの位置情報メッセージ

use std::sync::Arc;

use tsunagi_shared::time::Clock;

use crate::domain::{
    AuthToken, ChatDraft, ChatStoreGateway, ConnectionId, GeoPoint, MessageEnvelope, MessageKind,
    MessageText, PointOfInterest, PointsOfInterestGateway, RoomId, SessionRegistry, Timestamp,
};

use super::error::SendMessageError;

/// 送信されたメッセージの入力
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMessage {
    pub text: String,
    pub kind: MessageKind,
    /// `[latitude, longitude]`
    pub location: Option<[f64; 2]>,
}

/// ルームへの配信内容
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDelivery {
    pub room: RoomId,
    pub envelope: MessageEnvelope,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Registry（接続状態の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// Chat Store Gateway（永続化）
    chat_store: Arc<dyn ChatStoreGateway>,
    /// Points-of-Interest Gateway（位置情報メッセージの周辺スポット）
    points_of_interest: Arc<dyn PointsOfInterestGateway>,
    /// 配信時刻の打刻
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        chat_store: Arc<dyn ChatStoreGateway>,
        points_of_interest: Arc<dyn PointsOfInterestGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            chat_store,
            points_of_interest,
            clock,
        }
    }

    /// メッセージを永続化し、ルームへの配信内容を返す
    ///
    /// ルーム未選択のときだけ失敗し、永続化の成否にかかわらず配信内容を返す。
    /// 呼び出し元は戻り値を受け取ってからルームに配信する。
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        message: OutgoingMessage,
    ) -> Result<MessageDelivery, SendMessageError> {
        // 1. ルーム選択済みであること
        let session = self
            .registry
            .get(connection_id)
            .await
            .map_err(SendMessageError::SessionNotFound)?;
        let (identity, token) = session
            .authenticated()
            .ok_or(SendMessageError::NoRoomSelected)?;
        let conversation = session
            .conversation
            .as_ref()
            .ok_or(SendMessageError::NoRoomSelected)?;

        // 2. 永続化する内容を組み立て、位置情報メッセージには周辺スポットを付与
        //    本文や座標の妥当性は Chat Store が判定する
        let text = MessageText::new(message.text);
        let draft = match (message.kind, message.location) {
            (MessageKind::Text, _) => ChatDraft::text(text),
            (MessageKind::Location, Some(location)) => {
                let mut draft = ChatDraft::location(text, GeoPoint::from(location));
                draft.related_points_of_interest = self.nearby_spots(draft.location, token).await;
                draft
            }
            (MessageKind::Location, None) => {
                tracing::debug!(
                    "Location message from '{}' has no coordinates, sending [0, 0]",
                    identity.user_id
                );
                ChatDraft::location(text, GeoPoint::origin())
            }
        };

        // 3. 永続化（失敗しても配信は続行）
        let related_points_of_interest = match self
            .chat_store
            .create_message(&identity.user_id, &conversation.peer, &draft, token)
            .await
        {
            Ok(persisted) if !persisted.related_points_of_interest.is_empty() => {
                persisted.related_points_of_interest
            }
            Ok(_) => draft.related_points_of_interest,
            Err(e) => {
                tracing::warn!(
                    "Failed to persist message from '{}' in room '{}': {}",
                    identity.user_id,
                    conversation.room,
                    e
                );
                draft.related_points_of_interest
            }
        };

        // 4. 配信内容を構築
        let envelope = MessageEnvelope {
            sender_name: identity.display_name.clone(),
            sender_user_id: identity.user_id.clone(),
            text: draft.text,
            timestamp: Timestamp::new(self.clock.now_millis()),
            related_points_of_interest,
        };

        Ok(MessageDelivery {
            room: conversation.room.clone(),
            envelope,
        })
    }

    async fn nearby_spots(&self, point: GeoPoint, token: &AuthToken) -> Vec<PointOfInterest> {
        match self.points_of_interest.nearby(point, token).await {
            Ok(spots) => spots,
            Err(e) => {
                tracing::warn!(
                    "Points-of-interest lookup failed near [{}, {}]: {}",
                    point.latitude(),
                    point.longitude(),
                    e
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ChatRecord, GatewayError, MockChatStoreGateway, MockPointsOfInterestGateway,
        PersistedMessage,
    };
    use crate::usecase::test_support::{
        TEST_NOW, authenticate, connect, join, pusher, registry,
    };
    use serde_json::json;
    use tsunagi_shared::time::FixedClock;

    fn persisting_chat_store() -> MockChatStoreGateway {
        let mut chat_store = MockChatStoreGateway::new();
        chat_store
            .expect_create_message()
            .returning(|_, _, _, _| {
                Ok(PersistedMessage {
                    record: ChatRecord(json!({"content": "stored"})),
                    related_points_of_interest: Vec::new(),
                })
            });
        chat_store
    }

    fn unused_points_of_interest() -> MockPointsOfInterestGateway {
        let mut poi = MockPointsOfInterestGateway::new();
        poi.expect_nearby().never();
        poi
    }

    fn create_usecase(
        registry: Arc<crate::infrastructure::repository::InMemorySessionRegistry>,
        chat_store: MockChatStoreGateway,
        poi: MockPointsOfInterestGateway,
    ) -> SendMessageUseCase {
        SendMessageUseCase::new(
            registry,
            Arc::new(chat_store),
            Arc::new(poi),
            Arc::new(FixedClock::new(TEST_NOW)),
        )
    }

    fn text_message(text: &str) -> OutgoingMessage {
        OutgoingMessage {
            text: text.to_string(),
            kind: MessageKind::Text,
            location: None,
        }
    }

    #[tokio::test]
    async fn test_send_text_message() {
        // テスト項目: テキストメッセージが永続化され、ルーム "12" への配信内容が返る
        // given (前提条件):
        let registry = registry();
        let (alice, _a) = connect(&registry, &pusher()).await;
        join(&registry, &alice, ("1", "alice"), "2").await;
        let mut chat_store = MockChatStoreGateway::new();
        chat_store
            .expect_create_message()
            .withf(|sender, recipient, draft, _| {
                sender.as_str() == "1"
                    && recipient.as_str() == "2"
                    && draft.kind == MessageKind::Text
                    && draft.location == GeoPoint::origin()
            })
            .times(1)
            .returning(|_, _, _, _| {
                Ok(PersistedMessage {
                    record: ChatRecord(json!({})),
                    related_points_of_interest: Vec::new(),
                })
            });
        let usecase = create_usecase(registry, chat_store, unused_points_of_interest());

        // when (操作):
        let delivery = usecase.execute(&alice, text_message("hi")).await.unwrap();

        // then (期待する結果):
        assert_eq!(delivery.room.as_str(), "12");
        assert_eq!(delivery.envelope.sender_name.as_str(), "alice");
        assert_eq!(delivery.envelope.sender_user_id.as_str(), "1");
        assert_eq!(delivery.envelope.text.as_str(), "hi");
        assert_eq!(delivery.envelope.timestamp.value(), TEST_NOW);
        assert!(delivery.envelope.related_points_of_interest.is_empty());
    }

    #[tokio::test]
    async fn test_send_location_message_with_points_of_interest() {
        // テスト項目: 位置情報メッセージには周辺スポットが付与され、永続化にも渡される
        // given (前提条件):
        let registry = registry();
        let (alice, _a) = connect(&registry, &pusher()).await;
        join(&registry, &alice, ("1", "alice"), "2").await;
        let mut poi = MockPointsOfInterestGateway::new();
        poi.expect_nearby()
            .withf(|point, _| point.latitude() == -29.85 && point.longitude() == 30.85)
            .returning(|_, _| Ok(vec![PointOfInterest::named("Café X")]));
        let mut chat_store = MockChatStoreGateway::new();
        chat_store
            .expect_create_message()
            .withf(|_, _, draft, _| {
                draft.kind == MessageKind::Location
                    && draft.related_points_of_interest == vec![PointOfInterest::named("Café X")]
            })
            .returning(|_, _, _, _| {
                Ok(PersistedMessage {
                    record: ChatRecord(json!({})),
                    related_points_of_interest: Vec::new(),
                })
            });
        let usecase = create_usecase(registry, chat_store, poi);

        // when (操作):
        let delivery = usecase
            .execute(
                &alice,
                OutgoingMessage {
                    text: String::new(),
                    kind: MessageKind::Location,
                    location: Some([-29.85, 30.85]),
                },
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(
            delivery.envelope.related_points_of_interest,
            vec![PointOfInterest::named("Café X")]
        );
    }

    #[tokio::test]
    async fn test_persisted_points_of_interest_take_precedence() {
        // テスト項目: 永続化が周辺スポットを返した場合はそちらが配信される
        // given (前提条件):
        let registry = registry();
        let (alice, _a) = connect(&registry, &pusher()).await;
        join(&registry, &alice, ("1", "alice"), "2").await;
        let mut poi = MockPointsOfInterestGateway::new();
        poi.expect_nearby()
            .returning(|_, _| Ok(vec![PointOfInterest::named("Café X")]));
        let mut chat_store = MockChatStoreGateway::new();
        chat_store.expect_create_message().returning(|_, _, _, _| {
            Ok(PersistedMessage {
                record: ChatRecord(json!({})),
                related_points_of_interest: vec![PointOfInterest::named("Park Y")],
            })
        });
        let usecase = create_usecase(registry, chat_store, poi);

        // when (操作):
        let delivery = usecase
            .execute(
                &alice,
                OutgoingMessage {
                    text: "meet here".to_string(),
                    kind: MessageKind::Location,
                    location: Some([1.0, 2.0]),
                },
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(
            delivery.envelope.related_points_of_interest,
            vec![PointOfInterest::named("Park Y")]
        );
    }

    #[tokio::test]
    async fn test_points_of_interest_failure_still_delivers() {
        // テスト項目: 周辺スポット検索が失敗しても空のリストで配信される
        // given (前提条件):
        let registry = registry();
        let (alice, _a) = connect(&registry, &pusher()).await;
        join(&registry, &alice, ("1", "alice"), "2").await;
        let mut poi = MockPointsOfInterestGateway::new();
        poi.expect_nearby()
            .returning(|_, _| Err(GatewayError::Unavailable("timeout".to_string())));
        let usecase = create_usecase(registry, persisting_chat_store(), poi);

        // when (操作):
        let delivery = usecase
            .execute(
                &alice,
                OutgoingMessage {
                    text: String::new(),
                    kind: MessageKind::Location,
                    location: Some([-29.85, 30.85]),
                },
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert!(delivery.envelope.related_points_of_interest.is_empty());
    }

    #[tokio::test]
    async fn test_persistence_failure_still_delivers() {
        // テスト項目: 永続化が失敗しても配信内容は返る
        // given (前提条件):
        let registry = registry();
        let (alice, _a) = connect(&registry, &pusher()).await;
        join(&registry, &alice, ("1", "alice"), "2").await;
        let mut chat_store = MockChatStoreGateway::new();
        chat_store
            .expect_create_message()
            .times(1)
            .returning(|_, _, _, _| Err(GatewayError::Unavailable("500".to_string())));
        let usecase = create_usecase(registry, chat_store, unused_points_of_interest());

        // when (操作):
        let delivery = usecase.execute(&alice, text_message("hi")).await.unwrap();

        // then (期待する結果):
        assert_eq!(delivery.envelope.text.as_str(), "hi");
    }

    #[tokio::test]
    async fn test_send_before_select_peer() {
        // テスト項目: 相手選択前の送信は NoRoomSelected になり、永続化されない
        // given (前提条件):
        let registry = registry();
        let (alice, _a) = connect(&registry, &pusher()).await;
        authenticate(&registry, &alice, "1", "alice").await;
        let mut chat_store = MockChatStoreGateway::new();
        chat_store.expect_create_message().never();
        let usecase = create_usecase(registry, chat_store, unused_points_of_interest());

        // when (操作):
        let result = usecase.execute(&alice, text_message("hi")).await;

        // then (期待する結果):
        assert_eq!(result, Err(SendMessageError::NoRoomSelected));
    }

    #[tokio::test]
    async fn test_send_long_text_is_delivered() {
        // テスト項目: 長い本文はそのまま Chat Store に渡され、拒否されても配信される
        // given (前提条件):
        let registry = registry();
        let (alice, _a) = connect(&registry, &pusher()).await;
        join(&registry, &alice, ("1", "alice"), "2").await;
        let long = "x".repeat(501);
        let expected = long.clone();
        let mut chat_store = MockChatStoreGateway::new();
        chat_store
            .expect_create_message()
            .withf(move |_, _, draft, _| draft.text.as_str() == expected)
            .times(1)
            .returning(|_, _, _, _| Err(GatewayError::Unavailable("422".to_string())));
        let usecase = create_usecase(registry, chat_store, unused_points_of_interest());

        // when (操作):
        let delivery = usecase.execute(&alice, text_message(&long)).await.unwrap();

        // then (期待する結果):
        assert_eq!(delivery.room.as_str(), "12");
        assert_eq!(delivery.envelope.text.as_str(), long);
    }

    #[tokio::test]
    async fn test_send_location_without_coordinates_is_delivered() {
        // テスト項目: 座標なしの位置情報メッセージは [0, 0] で永続化され、周辺スポット検索なしで配信される
        // given (前提条件):
        let registry = registry();
        let (alice, _a) = connect(&registry, &pusher()).await;
        join(&registry, &alice, ("1", "alice"), "2").await;
        let mut chat_store = MockChatStoreGateway::new();
        chat_store
            .expect_create_message()
            .withf(|_, _, draft, _| {
                draft.kind == MessageKind::Location && draft.location == GeoPoint::origin()
            })
            .times(1)
            .returning(|_, _, _, _| {
                Ok(PersistedMessage {
                    record: ChatRecord(json!({})),
                    related_points_of_interest: Vec::new(),
                })
            });
        let usecase = create_usecase(registry, chat_store, unused_points_of_interest());

        // when (操作):
        let delivery = usecase
            .execute(
                &alice,
                OutgoingMessage {
                    text: "here".to_string(),
                    kind: MessageKind::Location,
                    location: None,
                },
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(delivery.envelope.text.as_str(), "here");
        assert!(delivery.envelope.related_points_of_interest.is_empty());
    }

    #[tokio::test]
    async fn test_send_out_of_range_location_is_forwarded() {
        // テスト項目: 範囲外の座標もそのまま外部サービスに渡され、配信は止まらない
        // given (前提条件):
        let registry = registry();
        let (alice, _a) = connect(&registry, &pusher()).await;
        join(&registry, &alice, ("1", "alice"), "2").await;
        let mut poi = MockPointsOfInterestGateway::new();
        poi.expect_nearby()
            .withf(|point, _| point.latitude() == 91.0 && point.longitude() == 0.0)
            .times(1)
            .returning(|_, _| Err(GatewayError::Unavailable("400".to_string())));
        let mut chat_store = MockChatStoreGateway::new();
        chat_store
            .expect_create_message()
            .withf(|_, _, draft, _| draft.location == GeoPoint::new(91.0, 0.0))
            .times(1)
            .returning(|_, _, _, _| Err(GatewayError::Unavailable("400".to_string())));
        let usecase = create_usecase(registry, chat_store, poi);

        // when (操作):
        let delivery = usecase
            .execute(
                &alice,
                OutgoingMessage {
                    text: String::new(),
                    kind: MessageKind::Location,
                    location: Some([91.0, 0.0]),
                },
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(delivery.room.as_str(), "12");
        assert!(delivery.envelope.related_points_of_interest.is_empty());
    }
}
