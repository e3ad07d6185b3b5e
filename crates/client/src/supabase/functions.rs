//! The admin auth function.
//!
//! One endpoint, many actions: the request body is tagged with `action` and
//! the function answers with either a payload or `{"error": "..."}`. Error
//! bodies can arrive with a 2xx status, so both are checked.

use pencil_gallery_core::{AdminIdentity, Email};
use reqwest::Method;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{SupabaseClient, decode, remote_error};
use crate::error::{GalleryError, Result};
use crate::remote::{AuthApi, AuthSession, ResetRequest};

const LOGIN_FAILED: &str = "Login failed. Please try again.";
const REGISTER_FAILED: &str = "Registration failed. Please try again.";
const VERIFY_FAILED: &str = "Session verification failed.";
const LOGOUT_FAILED: &str = "Logout failed.";
const RESET_REQUEST_FAILED: &str = "Failed to send reset email.";
const RESET_FAILED: &str = "Failed to reset password.";

#[derive(Debug, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
enum AuthRequest<'a> {
    Login {
        email: &'a str,
        password: &'a str,
    },
    Register {
        email: &'a str,
        password: &'a str,
        name: &'a str,
    },
    Verify {
        #[serde(rename = "sessionToken")]
        session_token: &'a str,
    },
    Logout {
        #[serde(rename = "sessionToken")]
        session_token: &'a str,
    },
    RequestReset {
        email: &'a str,
    },
    ResetPassword {
        token: &'a str,
        #[serde(rename = "newPassword")]
        new_password: &'a str,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionPayload {
    user: AdminIdentity,
    session_token: String,
}

#[derive(Debug, Deserialize)]
struct RegisterPayload {
    user: AdminIdentity,
}

#[derive(Debug, Deserialize)]
struct VerifyPayload {
    #[serde(default)]
    valid: bool,
    user: Option<AdminIdentity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResetPayload {
    reset_token: Option<String>,
}

/// Only the error field, to detect `{"error": ...}` on a 2xx response.
#[derive(Debug, Deserialize)]
struct ErrorField {
    error: Option<String>,
}

impl SupabaseClient {
    /// Invoke the auth function and return the successful body.
    ///
    /// `fallback` is the message used when the function fails without
    /// saying why.
    async fn invoke(&self, request: &AuthRequest<'_>, fallback: &str) -> Result<String> {
        let path = format!("functions/v1/{}", self.inner.auth_function);
        let url = self.endpoint(&path)?;
        let (status, body) = self
            .execute(self.request(Method::POST, url).json(request))
            .await?;

        if !status.is_success() {
            tracing::warn!(status = %status, "Auth function returned non-success status");
            return Err(remote_error(status, &body, Some(fallback)));
        }

        if let Ok(ErrorField { error: Some(message) }) = serde_json::from_str(&body) {
            let message = if message.trim().is_empty() {
                fallback.to_string()
            } else {
                message
            };
            return Err(GalleryError::Remote {
                status: Some(status.as_u16()),
                message,
            });
        }

        Ok(body)
    }
}

impl AuthApi for SupabaseClient {
    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(&self, email: &Email, password: &str) -> Result<AuthSession> {
        let request = AuthRequest::Login {
            email: email.as_str(),
            password,
        };
        let body = self.invoke(&request, LOGIN_FAILED).await?;
        let payload: SessionPayload = decode(&body)?;
        Ok(AuthSession {
            identity: payload.user,
            token: SecretString::from(payload.session_token),
        })
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn register(&self, name: &str, email: &Email, password: &str) -> Result<AdminIdentity> {
        let request = AuthRequest::Register {
            email: email.as_str(),
            password,
            name,
        };
        let body = self.invoke(&request, REGISTER_FAILED).await?;
        let payload: RegisterPayload = decode(&body)?;
        Ok(payload.user)
    }

    #[instrument(skip_all)]
    async fn verify(&self, token: &str) -> Result<Option<AdminIdentity>> {
        let request = AuthRequest::Verify {
            session_token: token,
        };
        let body = self.invoke(&request, VERIFY_FAILED).await?;
        let payload: VerifyPayload = decode(&body)?;
        Ok(payload.user.filter(|_| payload.valid))
    }

    #[instrument(skip_all)]
    async fn logout(&self, token: &str) -> Result<()> {
        let request = AuthRequest::Logout {
            session_token: token,
        };
        self.invoke(&request, LOGOUT_FAILED).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(email = %email))]
    async fn request_reset(&self, email: &Email) -> Result<ResetRequest> {
        let request = AuthRequest::RequestReset {
            email: email.as_str(),
        };
        let body = self.invoke(&request, RESET_REQUEST_FAILED).await?;
        // Production deployments may answer with an empty body
        let payload: ResetPayload = if body.trim().is_empty() {
            ResetPayload { reset_token: None }
        } else {
            decode(&body)?
        };
        Ok(ResetRequest {
            reset_token: payload.reset_token,
        })
    }

    #[instrument(skip_all)]
    async fn reset_password(&self, token: &str, new_password: &str) -> Result<()> {
        let request = AuthRequest::ResetPassword {
            token,
            new_password,
        };
        self.invoke(&request, RESET_FAILED).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_bodies_match_function_contract() {
        let cases = [
            (
                AuthRequest::Login {
                    email: "a@b.co",
                    password: "pw",
                },
                json!({"action": "login", "email": "a@b.co", "password": "pw"}),
            ),
            (
                AuthRequest::Register {
                    email: "a@b.co",
                    password: "pw",
                    name: "Ann",
                },
                json!({"action": "register", "email": "a@b.co", "password": "pw", "name": "Ann"}),
            ),
            (
                AuthRequest::Verify { session_token: "t" },
                json!({"action": "verify", "sessionToken": "t"}),
            ),
            (
                AuthRequest::Logout { session_token: "t" },
                json!({"action": "logout", "sessionToken": "t"}),
            ),
            (
                AuthRequest::RequestReset { email: "a@b.co" },
                json!({"action": "requestReset", "email": "a@b.co"}),
            ),
            (
                AuthRequest::ResetPassword {
                    token: "r",
                    new_password: "longenough",
                },
                json!({"action": "resetPassword", "token": "r", "newPassword": "longenough"}),
            ),
        ];

        for (request, expected) in cases {
            assert_eq!(serde_json::to_value(&request).unwrap(), expected);
        }
    }

    #[test]
    fn test_verify_payload_requires_valid_flag() {
        let payload: VerifyPayload = serde_json::from_value(json!({
            "valid": false,
            "user": {"id": "u1", "email": "a@b.co", "name": "Ann"}
        }))
        .unwrap();
        assert!(payload.user.filter(|_| payload.valid).is_none());

        let payload: VerifyPayload = serde_json::from_value(json!({"valid": true})).unwrap();
        assert!(payload.user.is_none());
    }

    #[test]
    fn test_session_payload_decodes() {
        let payload: SessionPayload = serde_json::from_value(json!({
            "user": {"id": "u1", "email": "a@b.co", "name": "Ann"},
            "sessionToken": "abc123"
        }))
        .unwrap();
        assert_eq!(payload.user.name, "Ann");
        assert_eq!(payload.session_token, "abc123");
    }
}
