//! Collaborator capabilities consumed by the user administration panel, plus
//! the concrete HTTP, role and settings implementations used by the apps.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{Severity, TableState, UserRecord},
    error::ApiException,
    protocol::{RemoveUserRequest, UserListResponse, USERS_PATH},
};
use thiserror::Error;
use tracing::debug;
use url::Url;

pub mod config;

pub use config::{load_settings, ClientSettings};

/// User data service. Every call is a single request with no retries; retry
/// policy, if any, belongs to implementations.
#[async_trait]
pub trait UserGateway: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserRecord>>;
    async fn add_user(&self, user: &UserRecord) -> Result<()>;
    async fn edit_user(&self, user: &UserRecord) -> Result<()>;
    async fn remove_user(&self, user: &UserRecord) -> Result<()>;
}

/// Source of the role names offered by the add/edit forms.
pub trait RoleGateway: Send + Sync {
    fn roles(&self) -> Vec<String>;
}

/// Alert/toast presentation.
pub trait AlertGateway: Send + Sync {
    fn alert(&self, dismissible: bool, severity: Severity, message: &str);
}

/// Table sorting. The panel forwards its table state and rows untouched.
pub trait TableUtility: Send + Sync {
    fn sort_table(&self, table: &mut TableState, column: &str, users: &mut Vec<UserRecord>);
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid api url '{url}': {source}")]
    InvalidApiUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("api url '{0}' must use http or https")]
    UnsupportedScheme(String),
}

/// Roles read once from configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredRoles {
    roles: Vec<String>,
}

impl ConfiguredRoles {
    pub fn new(roles: Vec<String>) -> Self {
        Self { roles }
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::new(settings.roles.clone())
    }
}

impl RoleGateway for ConfiguredRoles {
    fn roles(&self) -> Vec<String> {
        self.roles.clone()
    }
}

/// `UserGateway` backed by the JSON user administration API.
#[derive(Debug, Clone)]
pub struct HttpUserGateway {
    http: Client,
    api_url: String,
}

impl HttpUserGateway {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let api_url = normalize_api_url(api_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self { http, api_url })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        Self::new(
            &settings.api_url,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn users_url(&self) -> String {
        format!("{}{USERS_PATH}", self.api_url)
    }
}

#[async_trait]
impl UserGateway for HttpUserGateway {
    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        let response = self.http.get(self.users_url()).send().await?;
        let body: UserListResponse = ensure_success(response).await?.json().await?;
        debug!(count = body.users.len(), "fetched user list");
        Ok(body.users)
    }

    async fn add_user(&self, user: &UserRecord) -> Result<()> {
        let response = self.http.post(self.users_url()).json(user).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn edit_user(&self, user: &UserRecord) -> Result<()> {
        let response = self.http.put(self.users_url()).json(user).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn remove_user(&self, user: &UserRecord) -> Result<()> {
        let response = self
            .http
            .delete(self.users_url())
            .json(&RemoveUserRequest {
                email: user.email.clone(),
            })
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiException::from_body(status.as_u16(), &body).into())
}

fn normalize_api_url(raw: &str) -> Result<String, GatewayError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|source| GatewayError::InvalidApiUrl {
        url: trimmed.to_string(),
        source,
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(GatewayError::UnsupportedScheme(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
