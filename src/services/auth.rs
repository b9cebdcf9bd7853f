//! Shared-password authentication service

use chrono::{DateTime, Utc};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    session::SessionSigner,
};

#[derive(Clone)]
pub struct AuthService {
    app_password: Option<String>,
    signer: Option<SessionSigner>,
    session_duration: chrono::Duration,
}

impl AuthService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            app_password: config.app_password.clone(),
            signer: config.app_password.as_deref().map(SessionSigner::new),
            session_duration: config.session_duration(),
        }
    }

    /// Whether a shared password has been configured
    pub fn is_configured(&self) -> bool {
        self.signer.is_some()
    }

    pub fn session_duration(&self) -> chrono::Duration {
        self.session_duration
    }

    /// Check the submitted password and issue a session token
    pub fn login(&self, password: &str, now: DateTime<Utc>) -> AppResult<String> {
        if password.is_empty() {
            return Err(AppError::BadRequest("Password required".to_string()));
        }

        let (Some(expected), Some(signer)) = (self.app_password.as_deref(), self.signer.as_ref())
        else {
            return Err(AppError::Configuration(
                "Authentication not configured".to_string(),
            ));
        };

        if password != expected {
            tracing::warn!("Rejected login attempt with wrong password");
            return Err(AppError::Authentication("Invalid password".to_string()));
        }

        Ok(signer.issue(now, self.session_duration))
    }

    /// Validate a session token; an unconfigured service accepts nothing
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> bool {
        self.signer
            .as_ref()
            .is_some_and(|signer| signer.validate_token(token, now.timestamp_millis()))
    }
}
