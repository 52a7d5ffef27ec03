//! Wire models of the API.

use serde::{Deserialize, Serialize};

/// Body of the login call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Phone number or user name.
    pub login_id: String,
    /// Code received out of band.
    pub one_time_password: String,
}

/// Session returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for the following calls.
    pub token: String,
    /// Logged in customer.
    pub customer_id: String,
}

/// Permissions granted to a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionsResponse {
    /// Customer the permissions belong to.
    pub customer_id: String,
    /// Granted permission names.
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl PermissionsResponse {
    /// Returns `true` if `permission` is granted.
    #[must_use]
    pub fn has(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}
