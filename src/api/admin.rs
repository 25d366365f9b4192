use super::client::{ensure_success, ApiClient};
use crate::models::Property;
use crate::submission::CredentialProvider;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// One page of properties awaiting approval
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingPage {
    pub properties: Vec<Property>,
    #[serde(default = "one")]
    pub total_pages: u32,
}

fn one() -> u32 {
    1
}

/// Approval counters shown on the admin dashboard
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub pending_count: u64,
    #[serde(default)]
    pub approved_count: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Approval {
    is_admin_approved: bool,
    is_active: bool,
}

/// Admin dashboard calls. Every request carries the bearer token.
pub struct AdminClient {
    api: ApiClient,
    credentials: Arc<dyn CredentialProvider>,
}

impl AdminClient {
    pub fn new(api: ApiClient, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self { api, credentials }
    }

    fn token(&self) -> Result<String> {
        self.credentials
            .bearer_token()
            .context("User not authenticated")
    }

    /// `GET /admin?page=&limit=`
    pub async fn pending(&self, page: u32, limit: u32) -> Result<PendingPage> {
        let token = self.token()?;
        let response = self
            .api
            .http()
            .get(self.api.url("/admin"))
            .bearer_auth(token)
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await
            .context("Failed to fetch pending properties")?;

        let response = ensure_success(response, "fetch pending properties").await?;
        response
            .json()
            .await
            .context("Failed to parse pending properties")
    }

    /// `GET /admin/dashboard`
    pub async fn dashboard(&self) -> Result<DashboardStats> {
        let token = self.token()?;
        let response = self
            .api
            .http()
            .get(self.api.url("/admin/dashboard"))
            .bearer_auth(token)
            .send()
            .await
            .context("Failed to fetch dashboard")?;

        let response = ensure_success(response, "fetch dashboard").await?;
        response
            .json()
            .await
            .context("Failed to parse dashboard counters")
    }

    /// `PUT /admin/{id}` marking the property approved and active
    pub async fn approve(&self, id: &str) -> Result<()> {
        let token = self.token()?;
        let response = self
            .api
            .http()
            .put(self.api.url(&format!("/admin/{}", id)))
            .bearer_auth(token)
            .json(&Approval {
                is_admin_approved: true,
                is_active: true,
            })
            .send()
            .await
            .context("Failed to reach approval endpoint")?;

        ensure_success(response, "approve property").await?;
        info!("Approved property {}", id);
        Ok(())
    }
}
