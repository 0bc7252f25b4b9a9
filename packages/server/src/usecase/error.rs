//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{GatewayError, RegistryError, ValueObjectError};

/// クライアントに返すエラーの分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 資格情報が拒否された
    AuthenticationFailed,
    /// 認証またはルーム選択が済んでいない
    PreconditionFailed,
    /// コマンドや値が不正
    InvalidInput,
    /// 外部サービスに到達できない
    GatewayUnavailable,
    /// 接続がもう登録されていない
    SessionNotFound,
}

/// 接続処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("connection id '{0}' is already registered")]
    DuplicateConnectionId(String),

    #[error(transparent)]
    Registry(RegistryError),
}

impl From<RegistryError> for ConnectError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::AlreadyTracked(id) => ConnectError::DuplicateConnectionId(id),
            other => ConnectError::Registry(other),
        }
    }
}

/// 認証処理のエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthenticateError {
    #[error("invalid credentials: {0}")]
    InvalidCredentials(ValueObjectError),

    #[error(transparent)]
    Gateway(GatewayError),

    #[error(transparent)]
    SessionNotFound(RegistryError),
}

impl AuthenticateError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AuthenticateError::InvalidCredentials(_) => FailureKind::InvalidInput,
            AuthenticateError::Gateway(GatewayError::AuthenticationFailed) => {
                FailureKind::AuthenticationFailed
            }
            AuthenticateError::Gateway(GatewayError::Unavailable(_)) => {
                FailureKind::GatewayUnavailable
            }
            AuthenticateError::SessionNotFound(_) => FailureKind::SessionNotFound,
        }
    }
}

/// 相手選択のエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectPeerError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("invalid peer: {0}")]
    InvalidPeer(ValueObjectError),

    #[error(transparent)]
    SessionNotFound(RegistryError),
}

impl SelectPeerError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SelectPeerError::NotAuthenticated => FailureKind::PreconditionFailed,
            SelectPeerError::InvalidPeer(_) => FailureKind::InvalidInput,
            SelectPeerError::SessionNotFound(_) => FailureKind::SessionNotFound,
        }
    }
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("no peer selected")]
    NoRoomSelected,

    #[error(transparent)]
    SessionNotFound(RegistryError),
}

impl SendMessageError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SendMessageError::NoRoomSelected => FailureKind::PreconditionFailed,
            SendMessageError::SessionNotFound(_) => FailureKind::SessionNotFound,
        }
    }
}

/// 入力中通知のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypingActivityError {
    #[error("no peer selected")]
    NoRoomSelected,

    #[error(transparent)]
    SessionNotFound(RegistryError),
}

impl TypingActivityError {
    pub fn kind(&self) -> FailureKind {
        match self {
            TypingActivityError::NoRoomSelected => FailureKind::PreconditionFailed,
            TypingActivityError::SessionNotFound(_) => FailureKind::SessionNotFound,
        }
    }
}

/// 連絡先一覧取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListConnectionsError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error(transparent)]
    SessionNotFound(RegistryError),
}

impl ListConnectionsError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ListConnectionsError::NotAuthenticated => FailureKind::PreconditionFailed,
            ListConnectionsError::SessionNotFound(_) => FailureKind::SessionNotFound,
        }
    }
}

/// 道路状況の報告・取得のエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoadConditionError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error(transparent)]
    Gateway(GatewayError),

    #[error(transparent)]
    SessionNotFound(RegistryError),
}

impl RoadConditionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            RoadConditionError::NotAuthenticated => FailureKind::PreconditionFailed,
            RoadConditionError::Gateway(_) => FailureKind::GatewayUnavailable,
            RoadConditionError::SessionNotFound(_) => FailureKind::SessionNotFound,
        }
    }
}
