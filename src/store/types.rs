use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::SystemId;

/// One recorded calculation: the system, the exact input payload, the full
/// result object, and when it ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub id: String,
    pub system_id: SystemId,
    pub input_parameters: Value,
    pub result: Value,
    pub created_at: DateTime<Utc>,
}

/// On-disk calculation history, newest record first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationLog {
    pub version: u32,
    #[serde(default)]
    pub records: Vec<CalculationRecord>,
}

impl Default for CalculationLog {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculationLog {
    /// Create a new empty log with version 1.
    pub fn new() -> Self {
        Self {
            version: 1,
            records: Vec::new(),
        }
    }

    /// Insert a record at the front, keeping newest-first order.
    pub fn prepend(&mut self, record: CalculationRecord) {
        self.records.insert(0, record);
    }

    /// The most recent records, up to `limit`.
    pub fn recent(&self, limit: usize) -> &[CalculationRecord] {
        &self.records[..limit.min(self.records.len())]
    }
}
