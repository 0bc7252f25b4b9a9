//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Snapshot of one live session, as exposed by `/api/sessions`.
///
/// Credentials are never part of this DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummaryDto {
    pub connection_id: String,
    pub state: String,
    pub user_id: Option<String>,
    pub display_name: Option<String>,
    pub room: Option<String>,
    pub connected_at: String,
}
