//! Value Object 定義
//!
//! 不変条件を型で表現する値オブジェクト群。
//! 生成時にバリデーションを行い、生成後は常に妥当な値であることが保証されます。

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValueObjectError;

/// Generates a validated string newtype with `new`, `as_str`, `into_string`,
/// `TryFrom<String>` and `Display`.
macro_rules! non_empty_string {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(value: String) -> Result<Self, ValueObjectError> {
                if value.trim().is_empty() {
                    return Err(ValueObjectError::Empty($field));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueObjectError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

non_empty_string!(
    /// 接続 ID（トランスポートが接続ごとに払い出す不透明な識別子）
    ConnectionId,
    "connection_id"
);

non_empty_string!(
    /// 外部の認証サービスが発行したユーザー ID
    UserId,
    "user_id"
);

non_empty_string!(
    /// 表示名
    DisplayName,
    "display_name"
);

non_empty_string!(
    /// 二者間の会話を表すルーム ID
    ///
    /// 生成は [`crate::domain::room::resolve_room`] 経由で行うこと。
    RoomId,
    "room_id"
);

impl ConnectionId {
    /// UUID v4 で新しい接続 ID を払い出す
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl RoomId {
    /// 2 つの UserId を連結する（どちらも空でないので結果も空にならない）
    pub(crate) fn concat(first: &UserId, second: &UserId) -> Self {
        Self(format!("{}{}", first.as_str(), second.as_str()))
    }
}

/// 認証サービスが発行した Bearer トークン
///
/// ログに出力されないよう `Debug` ではマスクする。
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::Empty("token"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// ログイン資格情報
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: String, password: String) -> Result<Self, ValueObjectError> {
        if email.trim().is_empty() {
            return Err(ValueObjectError::Empty("email"));
        }
        if password.is_empty() {
            return Err(ValueObjectError::Empty("password"));
        }
        Ok(Self { email, password })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// メッセージ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    Location,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Location => "location",
        }
    }
}

/// チャット本文
///
/// 空文字も許容する（位置情報メッセージ）。文字数の制約は Chat Store 側で判定する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for MessageText {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// 緯度経度
///
/// ワイヤ上では `[latitude, longitude]` の 2 要素配列で表現する。
/// 値の範囲は受け取った外部サービスが判定する。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// 位置情報を持たないテキストメッセージ用の原点
    pub fn origin() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        [point.latitude, point.longitude]
    }
}
