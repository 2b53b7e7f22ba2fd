use serde::{Deserialize, Serialize};

/// Stored aggregate compared with the sum of the item's vote records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateAudit {
    pub item_id: uuid::Uuid,
    pub stored_count: i32,
    pub recorded_sum: i32,
}

impl AggregateAudit {
    pub fn drift(&self) -> i32 {
        self.stored_count - self.recorded_sum
    }

    pub fn is_consistent(&self) -> bool {
        self.drift() == 0
    }
}
