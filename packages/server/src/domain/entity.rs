//! Entity 定義
//!
//! - `Session`: 接続ごとのインメモリ状態（識別子・認証情報・現在のルーム）
//! - 外部サービスとやり取りするレコード（連絡先、チャット、周辺スポット、道路状況）

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    room::resolve_room,
    value_object::{
        AuthToken, ConnectionId, DisplayName, GeoPoint, MessageKind, MessageText, RoomId,
        Timestamp, UserId,
    },
};

/// 認証済みユーザーの識別情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub display_name: DisplayName,
}

impl Identity {
    pub fn new(user_id: UserId, display_name: DisplayName) -> Self {
        Self {
            user_id,
            display_name,
        }
    }
}

/// 認証サービスのログイン結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub identity: Identity,
    pub token: AuthToken,
}

/// 現在の会話（相手とルーム）
///
/// ルーム ID だけでは参加者に分解できないため、相手の UserId も保持する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversation {
    pub peer: UserId,
    pub room: RoomId,
}

impl Conversation {
    /// 自分と相手からルームを解決して会話を作る
    pub fn between(me: &UserId, peer: UserId) -> Self {
        let room = resolve_room(me, &peer);
        Self { peer, room }
    }
}

/// 接続の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Connected,
    Authenticated,
    InRoom,
}

/// 接続ごとのセッション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub connection_id: ConnectionId,
    pub identity: Option<Identity>,
    pub credential: Option<AuthToken>,
    pub conversation: Option<Conversation>,
    pub connected_at: Timestamp,
}

impl Session {
    pub fn new(connection_id: ConnectionId, connected_at: Timestamp) -> Self {
        Self {
            connection_id,
            identity: None,
            credential: None,
            conversation: None,
            connected_at,
        }
    }

    pub fn state(&self) -> SessionState {
        match (&self.identity, &self.conversation) {
            (None, _) => SessionState::Connected,
            (Some(_), None) => SessionState::Authenticated,
            (Some(_), Some(_)) => SessionState::InRoom,
        }
    }

    pub fn room(&self) -> Option<&RoomId> {
        self.conversation.as_ref().map(|c| &c.room)
    }

    /// 認証済みであれば識別情報とトークンを返す
    pub fn authenticated(&self) -> Option<(&Identity, &AuthToken)> {
        self.identity.as_ref().zip(self.credential.as_ref())
    }

    /// 部分更新を適用する
    pub fn apply(&mut self, update: SessionUpdate) {
        match update {
            SessionUpdate::Authenticated {
                identity,
                credential,
            } => {
                // 別ユーザーとして再認証した場合、以前のルームは自分を含まないので破棄する
                if self.identity.as_ref() != Some(&identity) {
                    self.conversation = None;
                }
                self.identity = Some(identity);
                self.credential = Some(credential);
            }
            SessionUpdate::JoinedRoom(conversation) => {
                self.conversation = Some(conversation);
            }
        }
    }
}

/// Session Registry への部分更新
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// 認証成功（identity と credential を設定）
    Authenticated {
        identity: Identity,
        credential: AuthToken,
    },
    /// 相手の選択（ルームを設定・上書き）
    JoinedRoom(Conversation),
}

/// 承認済みの連絡先
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub user_id: UserId,
    pub display_name: DisplayName,
}

/// 周辺スポット
///
/// 名前以外の属性は外部サービスの形式のまま保持する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl PointOfInterest {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Map::new(),
        }
    }
}

/// Chat Store に永続化を依頼するメッセージ
#[derive(Debug, Clone, PartialEq)]
pub struct ChatDraft {
    pub kind: MessageKind,
    pub text: MessageText,
    /// テキストメッセージでは原点 `[0, 0]`
    pub location: GeoPoint,
    pub related_points_of_interest: Vec<PointOfInterest>,
}

impl ChatDraft {
    pub fn text(text: MessageText) -> Self {
        Self {
            kind: MessageKind::Text,
            text,
            location: GeoPoint::origin(),
            related_points_of_interest: Vec::new(),
        }
    }

    pub fn location(text: MessageText, location: GeoPoint) -> Self {
        Self {
            kind: MessageKind::Location,
            text,
            location,
            related_points_of_interest: Vec::new(),
        }
    }
}

/// Chat Store に保存されたメッセージ（形式は外部サービスに従う）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatRecord(pub Value);

/// Chat Store の作成結果
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedMessage {
    pub record: ChatRecord,
    pub related_points_of_interest: Vec<PointOfInterest>,
}

/// ルームに配信するメッセージ
#[derive(Debug, Clone, PartialEq)]
pub struct MessageEnvelope {
    pub sender_name: DisplayName,
    pub sender_user_id: UserId,
    pub text: MessageText,
    pub timestamp: Timestamp,
    pub related_points_of_interest: Vec<PointOfInterest>,
}

/// 道路状況の報告
#[derive(Debug, Clone, PartialEq)]
pub struct HazardReport {
    pub kind: String,
    pub description: String,
    pub location: GeoPoint,
}

/// Road-Condition サービスが返す道路状況（形式は外部サービスに従う）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hazard(pub Value);
