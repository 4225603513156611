//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Response body of `GET /api/participants`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantsDto {
    pub user_count: usize,
    pub participants: Vec<String>,
}

/// Response body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}
