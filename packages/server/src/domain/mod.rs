//! Domain layer.
//!
//! - `value_object` / `entity`: the session model and the records exchanged with gateways
//! - `room`: the Room Resolver
//! - `repository` / `message_pusher` / `gateway`: ports implemented by the infrastructure layer

pub mod entity;
pub mod error;
pub mod gateway;
pub mod message_pusher;
pub mod repository;
pub mod room;
pub mod value_object;

pub use entity::{
    AuthGrant, ChatDraft, ChatRecord, Contact, Conversation, Hazard, HazardReport, Identity,
    MessageEnvelope, PersistedMessage, PointOfInterest, Session, SessionState, SessionUpdate,
};
pub use error::{GatewayError, MessagePushError, RegistryError, ValueObjectError};
pub use gateway::{
    AuthGateway, ChatStoreGateway, ConnectionStoreGateway, Gateways, PointsOfInterestGateway,
    RoadConditionGateway,
};
#[cfg(test)]
pub use gateway::{
    MockAuthGateway, MockChatStoreGateway, MockConnectionStoreGateway,
    MockPointsOfInterestGateway, MockRoadConditionGateway,
};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::SessionRegistry;
pub use room::resolve_room;
pub use value_object::{
    AuthToken, ConnectionId, Credentials, DisplayName, GeoPoint, MessageKind, MessageText,
    RoomId, Timestamp, UserId,
};
