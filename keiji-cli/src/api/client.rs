//! REST client for the hosted backend

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use super::models::{EntryRecord, SettingRow, UserInfo};
use crate::config::{BackendConfig, ValidationLimits};
use crate::master::{InspectionNotice, MasterData, Property, Template, Vendor};

/// Thin wrapper over the backend's REST interface
#[derive(Debug, Clone)]
pub struct SignageClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SignageClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn auth_headers(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", &self.api_key))
    }

    async fn get_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let req = self.auth_headers(self.http.get(self.rest_url(table)).query(query));
        let resp = req
            .send()
            .await
            .with_context(|| format!("Request to {} failed", table))?;
        let resp = resp
            .error_for_status()
            .with_context(|| format!("Backend rejected read of {}", table))?;
        resp.json()
            .await
            .with_context(|| format!("Failed to decode rows from {}", table))
    }

    /// Look up the authenticated user
    pub async fn current_user(&self) -> Result<UserInfo> {
        let url = format!("{}/auth/v1/user", self.base_url);
        let resp = self
            .auth_headers(self.http.get(url))
            .send()
            .await
            .context("User lookup request failed")?
            .error_for_status()
            .context("Backend rejected user lookup")?;
        resp.json().await.context("Failed to decode user info")
    }

    /// Ordered reads of the four master tables
    pub async fn fetch_masters(&self) -> Result<MasterData> {
        let properties: Vec<Property> = self
            .get_rows("properties", &[("select", "*"), ("order", "property_code,terminal_id")])
            .await?;
        let vendors: Vec<Vendor> = self
            .get_rows("vendors", &[("select", "*"), ("order", "vendor_name")])
            .await?;
        let inspection_notices: Vec<InspectionNotice> = self
            .get_rows("inspection_notices", &[("select", "*"), ("order", "template_no")])
            .await?;
        let templates: Vec<Template> = self
            .get_rows("templates", &[("select", "*"), ("order", "template_no")])
            .await?;
        log::info!(
            "loaded masters: {} properties, {} vendors, {} notices, {} templates",
            properties.len(),
            vendors.len(),
            inspection_notices.len(),
            templates.len()
        );
        Ok(MasterData {
            properties,
            vendors,
            inspection_notices,
            templates,
        })
    }

    /// Read the settings table and apply it over the default limits
    pub async fn fetch_limits(&self) -> Result<ValidationLimits> {
        let rows: Vec<SettingRow> = self
            .get_rows("settings", &[("select", "key,value"), ("order", "key")])
            .await?;
        Ok(ValidationLimits::from_settings(
            rows.iter().map(|r| (r.key.as_str(), r.value.as_str())),
        ))
    }

    /// Batch insert of entry records. The whole batch succeeds or fails;
    /// there are no partial-failure semantics or retries.
    pub async fn insert_entries(&self, records: &[EntryRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }
        let req = self
            .auth_headers(self.http.post(self.rest_url("entries")))
            .header("Prefer", "return=minimal")
            .json(records);
        let resp = req.send().await.context("Entry insert request failed")?;
        if let Err(e) = resp.error_for_status_ref() {
            let body = resp.text().await.unwrap_or_default();
            log::error!("entry insert rejected: {}", body);
            return Err(e).context("Backend rejected entry insert");
        }
        log::info!("inserted {} entries", records.len());
        Ok(records.len())
    }

    /// Read entries still waiting in the approval queue
    pub async fn pending_entries(&self) -> Result<Vec<EntryRecord>> {
        self.get_rows(
            "entries",
            &[("select", "*"), ("status", "eq.pending"), ("order", "start_date")],
        )
        .await
    }
}
