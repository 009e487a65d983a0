//! Row types read from the assembly table.

use serde::{Deserialize, Serialize};

/// One physical unit as recorded in the assembly table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyRecord {
    /// Unique identifier of the unit
    pub serial_num: String,
    /// Batch the unit belongs to (shared by many units)
    pub batch_code: String,
    /// Purchase order associated with the batch
    pub po_num: String,
}

impl AssemblyRecord {
    pub fn new(
        serial_num: impl Into<String>,
        batch_code: impl Into<String>,
        po_num: impl Into<String>,
    ) -> Self {
        Self {
            serial_num: serial_num.into(),
            batch_code: batch_code.into(),
            po_num: po_num.into(),
        }
    }
}

/// Batch code and PO number resolved by a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchInfo {
    pub batch_code: String,
    pub po_num: String,
}
