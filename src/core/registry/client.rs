// ─── Registry Client ───
// Thin wrapper over the registry's search / version endpoints.

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::model::{ModSummary, ModVersion, SearchResponse};
use crate::core::error::{ModError, ModResult};

pub const DEFAULT_API_BASE: &str = "https://api.modrinth.com/v2";
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: Client,
    api_base: String,
    search_limit: u32,
}

impl RegistryClient {
    pub fn new(client: Client, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self {
            client,
            api_base,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn with_search_limit(mut self, limit: u32) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Free-text search, in the registry's own relevance order.
    ///
    /// An empty result is `NotFound`; otherwise hits are returned unfiltered.
    pub async fn search_by_name(&self, query: &str) -> ModResult<Vec<ModSummary>> {
        let url = format!("{}/search", self.api_base);
        let limit = self.search_limit.to_string();
        let response: SearchResponse = self
            .get_json(&url, &[("query", query), ("limit", limit.as_str())])
            .await?;

        let summaries = response
            .hits
            .into_iter()
            .map(ModSummary::from_hit)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ModError::upstream(&url, format!("malformed search hit: {e}")))?;

        if summaries.is_empty() {
            return Err(ModError::NotFound(query.to_string()));
        }

        debug!("Search '{}' returned {} hits", query, summaries.len());
        Ok(summaries)
    }

    /// Top search hit for `name`. No confirmation step: the first hit wins.
    pub async fn get_info_by_name(&self, name: &str) -> ModResult<ModSummary> {
        let mut hits = self.search_by_name(name).await?;
        let top = hits.swap_remove(0);
        info!(
            "Resolved '{}' to project '{}' ({})",
            name, top.title, top.project_id
        );
        Ok(top)
    }

    /// Every version of a project, in registry order.
    pub async fn list_versions(&self, project_id: &str) -> ModResult<Vec<ModVersion>> {
        let url = format!("{}/project/{}/version", self.api_base, project_id);
        let versions: Vec<ModVersion> = self.get_json(&url, &[]).await?;
        debug!("Project {} has {} versions", project_id, versions.len());
        Ok(versions)
    }

    /// A single version by id.
    pub async fn get_version(&self, version_id: &str) -> ModResult<ModVersion> {
        let url = format!("{}/version/{}", self.api_base, version_id);
        self.get_json(&url, &[]).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> ModResult<T> {
        let mut request = self.client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| ModError::upstream(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ModError::upstream(url, format!("HTTP {}", status.as_u16())));
        }

        resp.json::<T>()
            .await
            .map_err(|e| ModError::upstream(url, e))
    }
}
