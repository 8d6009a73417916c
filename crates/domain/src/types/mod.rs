//! Domain types and models
//!
//! Wire shapes for every operation the backend declares. Shapes are stated
//! here once, statically; nothing is inferred at call time.

pub mod auth;
pub mod organization;
pub mod uld;
pub mod user;

// Re-export the flat type surface for convenience
pub use auth::{LoginRequest, LoginResponse};
pub use organization::{
    CreateOrganizationRequest, Organization, OrganizationType, UpdateOrganizationRequest,
};
pub use uld::{CreateUldInventoryRequest, UldInventory};
pub use user::{CreateUserRequest, User};
