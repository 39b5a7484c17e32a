//! # Auth endpoints — login and registration
//!
//! `POST /auth/login` and `POST /auth/register`. The login response is
//! validated field by field before any session state is assembled: a body
//! missing the token or any required user field fails with an
//! [`GatewayError::Auth`] and leaves nothing behind.

use serde::Deserialize;

use crate::client::CnrClient;
use crate::error::GatewayError;
use crate::session::{Role, Session, UserProfile};

/// Loosely-typed login body, validated explicitly after parsing so each
/// missing field produces a deliberate error rather than a serde message.
#[derive(Deserialize)]
struct LoginBody {
    token: Option<String>,
    user: Option<LoginUser>,
}

#[derive(Deserialize)]
struct LoginUser {
    id: Option<u64>,
    name: Option<String>,
    email: Option<String>,
    role: Option<String>,
}

impl CnrClient {
    /// Authenticate and build a [`Session`].
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Auth`] on a non-2xx status (with the server's
    ///   message), on a body missing `token` or `user`, on missing user
    ///   fields ("Invalid user data in response"), or on a role outside
    ///   {"admin", "user"}.
    /// - [`GatewayError::Network`] on transport failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, GatewayError> {
        let endpoint = self.config.endpoint("auth/login");
        let body = serde_json::json!({ "email": email, "password": password });

        let resp = self.send(self.http.post(&endpoint).json(&body), &endpoint).await?;

        if !resp.status().is_success() {
            let message = Self::server_message(resp, "Login failed").await;
            return Err(GatewayError::auth(message));
        }

        let value = Self::json_body(resp, &endpoint).await?;
        let parsed: LoginBody = serde_json::from_value(value)
            .map_err(|_| GatewayError::auth("Invalid response format from server"))?;

        let (token, user) = match (parsed.token, parsed.user) {
            (Some(token), Some(user)) if !token.is_empty() => (token, user),
            _ => return Err(GatewayError::auth("Invalid response format from server")),
        };

        let (id, name, email, role) = match (user.id, user.name, user.email, user.role) {
            (Some(id), Some(name), Some(email), Some(role)) => (id, name, email, role),
            _ => return Err(GatewayError::auth("Invalid user data in response")),
        };

        let role = Role::parse(&role)
            .ok_or_else(|| GatewayError::auth(format!("Invalid or missing user role: {role:?}")))?;

        tracing::debug!(user = %name, %role, "login succeeded");
        Ok(Session::new(
            token,
            UserProfile {
                id,
                name,
                email,
                role,
            },
        ))
    }

    /// Register a new account. The backend answers 2xx with an empty
    /// body on success.
    ///
    /// # Errors
    ///
    /// [`GatewayError::Validation`] with the server's message on any
    /// non-2xx status; [`GatewayError::Network`] on transport failure.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), GatewayError> {
        let endpoint = self.config.endpoint("auth/register");
        let body = serde_json::json!({ "name": name, "email": email, "password": password });

        let resp = self.send(self.http.post(&endpoint).json(&body), &endpoint).await?;

        if !resp.status().is_success() {
            let message = Self::server_message(resp, "Registration failed").await;
            return Err(GatewayError::Validation { message });
        }

        tracing::debug!(email, "registration accepted");
        Ok(())
    }
}
