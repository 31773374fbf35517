use serde::{Deserialize, Serialize};

use shared_models::QueuePosition;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalRequest {
    #[serde(default)]
    pub patient_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionResponse {
    pub position: QueuePosition,
    /// Patients still ahead in the queue.
    pub ahead: u32,
}

impl From<QueuePosition> for PositionResponse {
    fn from(position: QueuePosition) -> Self {
        Self {
            position,
            ahead: position.ahead(),
        }
    }
}
