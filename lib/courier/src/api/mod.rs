//! The API: models, request builders and the [`ApiContext`] facade.

mod context;
pub mod endpoints;
pub mod models;

pub use context::ApiContext;
pub use models::{LoginRequest, LoginResponse, PermissionsResponse};
