//! Domain layer errors.

use thiserror::Error;

/// Value Object の生成エラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueObjectError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Session Registry のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// 接続がもう登録されていない（切断と非同期処理が競合した場合など）
    #[error("session '{0}' is not tracked")]
    SessionNotFound(String),

    #[error("session '{0}' is already tracked")]
    AlreadyTracked(String),
}

/// メッセージ送信（通知）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// 外部サービス（Gateway）呼び出しのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// 資格情報が拒否された
    #[error("authentication failed")]
    AuthenticationFailed,

    /// タイムアウト、通信失敗、非 2xx 応答、応答の解釈失敗
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}
