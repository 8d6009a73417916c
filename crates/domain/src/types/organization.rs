//! Organization wire types
//!
//! Organizations are the parties that custody ULDs: airlines, trucking
//! carriers, and warehouses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of organization, serialized with the exact strings the backend uses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrganizationType {
    Airline,
    Carrier,
    Warehouse,
}

/// An organization as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Organization {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub unique_url: String,
    pub address: String,
    pub contact_info: String,
    pub organization_type: OrganizationType,
}

/// Body for `POST /organization`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganizationRequest {
    pub name: String,
    pub address: String,
    pub contact_info: String,
    pub organization_type: OrganizationType,
}

/// Body for `PATCH /organization/{id}`. Omitted fields are left untouched by
/// the backend, so `None` fields are not serialized at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrganizationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_type: Option<OrganizationType>,
}
