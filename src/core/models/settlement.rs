use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A direct payment between two people that reduces an outstanding balance.
/// Auto-created settlements carry provenance of the source transaction in
/// `notes`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settlement {
    pub id: String,
    pub paid_by: String,
    pub paid_to: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub group_id: Option<String>,
    pub notes: Option<String>,
}
