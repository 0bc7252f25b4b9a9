//! Request/response bodies of the external services.
//!
//! Field names follow the services' JSON (camelCase, MongoDB `_id`); aliases
//! accept the variants the services have used over time.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::PointOfInterest;

/// `{"data": ...}` wrapper used by the chat store and the road-condition service
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(alias = "_id", alias = "id")]
    pub user_id: String,
    #[serde(alias = "name", alias = "displayName")]
    pub user_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionsResponse {
    #[serde(default)]
    pub connected_users: Vec<ConnectedUserDto>,
}

#[derive(Debug, Deserialize)]
pub struct ConnectedUserDto {
    #[serde(rename = "_id", alias = "userId", alias = "id")]
    pub id: String,
    #[serde(alias = "userName", alias = "displayName")]
    pub name: String,
}

/// GeoJSON point as stored by the chat store
#[derive(Debug, Serialize)]
pub struct PointDto {
    pub r#type: &'static str,
    pub coordinates: [f64; 2],
}

impl PointDto {
    pub fn new(coordinates: [f64; 2]) -> Self {
        Self {
            r#type: "Point",
            coordinates,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChatRequest<'a> {
    pub message_type: &'static str,
    pub content: &'a str,
    pub location: PointDto,
    pub related_points_of_interest: &'a [PointOfInterest],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedChatData {
    #[serde(default)]
    pub chat: Value,
    #[serde(default)]
    pub possible_common_spots: Option<Vec<PointOfInterest>>,
}

#[derive(Debug, Deserialize)]
pub struct ChatsData {
    #[serde(default)]
    pub chats: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonSpotsData {
    #[serde(default)]
    pub possible_common_spots: Option<Vec<PointOfInterest>>,
}

#[derive(Debug, Serialize)]
pub struct RoadConditionRequest<'a> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub description: &'a str,
    pub location: [f64; 2],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadConditionData<T> {
    pub road_condition: T,
}
