//! Request builders, one per API operation.
//!
//! Each builder resolves the endpoint against [`ApiConfig::base_url`], starts
//! from [`ApiConfig::default_headers`] and accepts 2xx responses only.

use crate::api::models::{LoginRequest, LoginResponse, PermissionsResponse};
use crate::{ApiConfig, Error, Fixture, Fixtures, Method, Request, Result};

/// Path of the login endpoint, relative to the base URL.
pub const LOGIN_PATH: &str = "login";

/// `POST login` with the credentials as a JSON body.
pub fn login(config: &ApiConfig, login_id: &str, one_time_password: &str) -> Result<Request> {
    let body = LoginRequest {
        login_id: login_id.to_string(),
        one_time_password: one_time_password.to_string(),
    };

    Ok(
        Request::new(Method::Post, config.url(LOGIN_PATH)?, config.default_headers())
            .parameters_from(&body)
            .validate(200..=299),
    )
}

/// `GET customers/{customer_id}/permissions`, authenticated with `token`.
pub fn permissions(config: &ApiConfig, customer_id: &str, token: &str) -> Result<Request> {
    let mut url = config.base_url.clone();
    url.path_segments_mut()
        .map_err(|()| Error::invalid_request(format!("cannot be a base URL: {}", config.base_url)))?
        .pop_if_empty()
        .extend(["customers", customer_id, "permissions"]);

    Ok(Request::new(Method::Get, url, config.default_headers())
        .header("Authorization", format!("Bearer {token}"))
        .validate(200..=299))
}

impl Fixtures {
    /// Canned answers for every API operation, for offline runs.
    ///
    /// Login always succeeds as customer `42`, who holds the `read` and
    /// `transfer` permissions.
    pub fn with_defaults() -> Result<Self> {
        let session = LoginResponse {
            token: "offline-token".to_string(),
            customer_id: "42".to_string(),
        };
        let permissions = PermissionsResponse {
            customer_id: "42".to_string(),
            permissions: vec!["read".to_string(), "transfer".to_string()],
        };

        Ok(Self::new()
            .with(Method::Post, "/login", Fixture::json(200, &session)?)
            .with(
                Method::Get,
                "/customers/42/permissions",
                Fixture::json(200, &permissions)?,
            ))
    }
}
