//! UseCase: セッション一覧の取得（デバッグ用）

use std::sync::Arc;

use crate::domain::{Session, SessionRegistry};

pub struct GetSessionsUseCase {
    registry: Arc<dyn SessionRegistry>,
}

impl GetSessionsUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// 接続時刻順のスナップショット
    pub async fn execute(&self) -> Vec<Session> {
        self.registry.sessions().await
    }
}
