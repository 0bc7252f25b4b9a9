//! Shared application state.

use std::sync::Arc;

use tsunagi_shared::time::Clock;

use crate::{
    domain::{Gateways, MessagePusher, SessionRegistry},
    usecase::{
        AuthenticateUseCase, BroadcastRouter, ConnectSessionUseCase, DisconnectSessionUseCase,
        GetSessionsUseCase, ListConnectionsUseCase, RoadConditionUseCase, SelectPeerUseCase,
        SendMessageUseCase, TypingActivityUseCase,
    },
};

/// Use cases shared by every connection
pub struct AppState {
    /// ConnectSessionUseCase（接続のユースケース）
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// DisconnectSessionUseCase（切断のユースケース）
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    /// AuthenticateUseCase（認証のユースケース）
    pub authenticate_usecase: Arc<AuthenticateUseCase>,
    /// SelectPeerUseCase（相手選択のユースケース）
    pub select_peer_usecase: Arc<SelectPeerUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// TypingActivityUseCase（入力中通知のユースケース）
    pub typing_activity_usecase: Arc<TypingActivityUseCase>,
    /// ListConnectionsUseCase（連絡先一覧のユースケース）
    pub list_connections_usecase: Arc<ListConnectionsUseCase>,
    /// RoadConditionUseCase（道路状況のユースケース）
    pub road_condition_usecase: Arc<RoadConditionUseCase>,
    /// GetSessionsUseCase（セッション一覧のユースケース）
    pub get_sessions_usecase: Arc<GetSessionsUseCase>,
    /// BroadcastRouter（イベント配信）
    pub broadcast_router: Arc<BroadcastRouter>,
}

impl AppState {
    /// Wire every use case to the given registry, pusher and gateways.
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        gateways: Gateways,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            connect_session_usecase: Arc::new(ConnectSessionUseCase::new(
                registry.clone(),
                message_pusher.clone(),
            )),
            disconnect_session_usecase: Arc::new(DisconnectSessionUseCase::new(
                registry.clone(),
                message_pusher.clone(),
            )),
            authenticate_usecase: Arc::new(AuthenticateUseCase::new(
                registry.clone(),
                gateways.auth,
            )),
            select_peer_usecase: Arc::new(SelectPeerUseCase::new(
                registry.clone(),
                gateways.chat_store.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                registry.clone(),
                gateways.chat_store,
                gateways.points_of_interest,
                clock,
            )),
            typing_activity_usecase: Arc::new(TypingActivityUseCase::new(registry.clone())),
            list_connections_usecase: Arc::new(ListConnectionsUseCase::new(
                registry.clone(),
                gateways.connection_store,
            )),
            road_condition_usecase: Arc::new(RoadConditionUseCase::new(
                registry.clone(),
                gateways.road_condition,
            )),
            get_sessions_usecase: Arc::new(GetSessionsUseCase::new(registry.clone())),
            broadcast_router: Arc::new(BroadcastRouter::new(registry, message_pusher)),
        }
    }
}
