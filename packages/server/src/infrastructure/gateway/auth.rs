//! Auth Gateway over HTTP.

use async_trait::async_trait;

use crate::{
    domain::{AuthGateway, AuthGrant, Credentials, GatewayError},
    infrastructure::dto::gateway::{LoginRequest, LoginResponse},
};

use super::{HttpClient, HttpError};

/// `POST /api/v1/users/login`
pub struct HttpAuthGateway {
    http: HttpClient,
}

impl HttpAuthGateway {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, credentials: &Credentials) -> Result<AuthGrant, GatewayError> {
        let request = LoginRequest {
            email: &credentials.email,
            password: &credentials.password,
        };

        let response: LoginResponse = self
            .http
            .post_json(&["api", "v1", "users", "login"], &request, None)
            .await
            .map_err(|e| match e {
                HttpError::Status(status) if status.is_client_error() => {
                    GatewayError::AuthenticationFailed
                }
                other => other.into(),
            })?;

        AuthGrant::try_from(response)
            .map_err(|e| GatewayError::Unavailable(format!("invalid login response: {e}")))
    }
}
