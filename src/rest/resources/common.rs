//! Types shared by several resources.

use serde::{Deserialize, Serialize};

/// The `archived` filter accepted by Lightspeed list endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ArchivedFilter {
    /// Only records that are not archived (the server default).
    #[default]
    #[serde(rename = "false")]
    Exclude,
    /// Archived and active records.
    #[serde(rename = "true")]
    Include,
    /// Only archived records.
    #[serde(rename = "only")]
    Only,
}
