use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Idempotency record written by the auto-settlement matcher. At most one
/// marker exists per transaction id; a consumed transaction is never
/// reconsidered, even if only part of its amount was allocated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AutoSettledMarker {
    pub txn_id: String,
    pub split_person: String,
    pub settlement_id: String,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}
