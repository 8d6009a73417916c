//! ULD inventory wire types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unit load device tracked in inventory. `current_location_id` points at
/// the organization currently holding the unit; `current_location_type`
/// mirrors that organization's type as recorded at hand-off.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UldInventory {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub uld_number: String,
    pub uld_type: String,
    pub uld_status: String,
    pub current_location_id: Uuid,
    pub current_location_type: String,
}

/// Body for `POST /uld_inventory`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUldInventoryRequest {
    pub uld_number: String,
    pub uld_type: String,
    pub uld_status: String,
    pub current_location_id: Uuid,
    pub current_location_type: String,
}
