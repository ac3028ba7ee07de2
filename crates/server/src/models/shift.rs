//! Work shifts.

use chrono::{DateTime, Utc};
use serde::Serialize;

use argos_core::{ShiftId, UserId};

/// A worker's shift. Open until closed, and closing is final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: ShiftId,
    pub user_id: UserId,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub closed: bool,
    pub created_at: DateTime<Utc>,
}

impl Shift {
    /// Whether `user` may record against or close this shift.
    #[must_use]
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.user_id == user
    }
}
