//! UseCase: 認証処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AuthenticateUseCase::execute() メソッド
//! - Auth Gateway でのログインと Registry への識別情報の記録
//!
//! ### なぜこのテストが必要か
//! - 認証失敗時に Registry が変更されないことを保証
//! - ログイン中に切断された接続を復活させないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：ログイン成功
//! - 異常系：資格情報の拒否、Gateway の到達不能、空の入力
//! - エッジケース：ログイン中の切断

use std::sync::Arc;

use crate::domain::{
    AuthGateway, ConnectionId, Credentials, Identity, SessionRegistry, SessionUpdate,
};

use super::error::AuthenticateError;

/// 認証のユースケース
pub struct AuthenticateUseCase {
    /// Registry（接続状態の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// Auth Gateway（認証サービス）
    auth: Arc<dyn AuthGateway>,
}

impl AuthenticateUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>, auth: Arc<dyn AuthGateway>) -> Self {
        Self { registry, auth }
    }

    /// 認証を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Identity)` - 認証済みの識別情報
    /// * `Err(AuthenticateError)` - 認証失敗。セッションは変更されない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        email: String,
        password: String,
    ) -> Result<Identity, AuthenticateError> {
        let credentials =
            Credentials::new(email, password).map_err(AuthenticateError::InvalidCredentials)?;

        let grant = self
            .auth
            .login(&credentials)
            .await
            .map_err(AuthenticateError::Gateway)?;

        let identity = grant.identity;
        self.registry
            .update(
                connection_id,
                SessionUpdate::Authenticated {
                    identity: identity.clone(),
                    credential: grant.token,
                },
            )
            .await
            .map_err(AuthenticateError::SessionNotFound)?;

        tracing::info!(
            "Connection '{}' authenticated as '{}' ({})",
            connection_id,
            identity.display_name,
            identity.user_id
        );
        Ok(identity)
    }
}
