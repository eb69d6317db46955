use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{Character, CharacterDetail, CharacterId, Page},
    error::ApiError,
    protocol::{CharacterDetailResponse, CharacterPageResponse, DecodedPage},
};
use tracing::{debug, warn};
use url::Url;

use crate::{config::ClientSettings, error::CatalogError, CatalogPort, CharacterDetailSource};

/// HTTP adapter for the catalog API (`/characters`, `/characters/{id}`).
pub struct CatalogClient {
    http: Client,
    base_url: Url,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            http: Client::new(),
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            http,
            base_url: parse_base_url(&settings.api_base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_page(&self, page: u32, limit: u32) -> Result<DecodedPage> {
        let url = self.base_url.join("characters")?;
        debug!(%url, page, limit, "requesting catalog page");
        let res = self
            .http
            .get(url)
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;
        let body = read_success_body(res).await?;
        let decoded: CharacterPageResponse =
            serde_json::from_str(&body).context("malformed character page body")?;
        Ok(decoded.into_page())
    }

    async fn get_detail(&self, id: CharacterId) -> Result<CharacterDetail> {
        let url = self.base_url.join(&format!("characters/{}", id.0))?;
        debug!(%url, "requesting character detail");
        let res = self.http.get(url).send().await?;
        let body = read_success_body(res).await?;
        let decoded: CharacterDetailResponse =
            serde_json::from_str(&body).context("malformed character detail body")?;
        decoded
            .into_detail()
            .ok_or_else(|| anyhow!("character detail has no usable id"))
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(anyhow!("catalog base url is empty"));
    }
    // Url::join replaces the last path segment unless the base ends with a slash.
    Url::parse(&format!("{trimmed}/"))
        .with_context(|| format!("invalid catalog base url '{raw}'"))
}

async fn read_success_body(res: Response) -> Result<String> {
    let status = res.status();
    let body = res.text().await?;
    if !status.is_success() {
        return Err(ApiError::from_body(status.as_u16(), &body).into());
    }
    Ok(body)
}

#[async_trait]
impl CatalogPort for CatalogClient {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<Page<Character>, CatalogError> {
        let decoded = self
            .get_page(page, limit)
            .await
            .map_err(|source| CatalogError::fetch_failed(page, source))?;
        if decoded.skipped > 0 {
            warn!(page, skipped = decoded.skipped, "dropped catalog items without a usable id");
        }
        Ok(decoded.page)
    }
}

#[async_trait]
impl CharacterDetailSource for CatalogClient {
    async fn fetch_character(&self, id: CharacterId) -> Result<CharacterDetail, CatalogError> {
        self.get_detail(id)
            .await
            .map_err(|source| CatalogError::DetailFailed { id, source })
    }
}

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod tests;
