//! UseCase 層
//!
//! 接続ごとのコマンドを処理するユースケースと、イベントの配信経路（Broadcast Router）。
//! ユースケースは Domain 層の trait にだけ依存し、ワイヤ形式（DTO）は扱いません。

pub mod authenticate;
pub mod broadcast;
pub mod connect_session;
pub mod disconnect_session;
pub mod error;
pub mod get_sessions;
pub mod list_connections;
pub mod road_condition;
pub mod select_peer;
pub mod send_message;
pub mod typing_activity;

#[cfg(test)]
pub(crate) mod test_support;

pub use authenticate::AuthenticateUseCase;
pub use broadcast::BroadcastRouter;
pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::{Departure, DisconnectSessionUseCase};
pub use error::{
    AuthenticateError, ConnectError, FailureKind, ListConnectionsError, RoadConditionError,
    SelectPeerError, SendMessageError, TypingActivityError,
};
pub use get_sessions::GetSessionsUseCase;
pub use list_connections::ListConnectionsUseCase;
pub use road_condition::RoadConditionUseCase;
pub use select_peer::{SelectPeerUseCase, SelectedPeer};
pub use send_message::{MessageDelivery, OutgoingMessage, SendMessageUseCase};
pub use typing_activity::{TypingActivityUseCase, TypingNotice};
