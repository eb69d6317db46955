use shared::domain::CharacterId;
use thiserror::Error;

/// Failures surfaced by catalog sources.
///
/// Page fetches collapse every cause (transport, status, decoding) into
/// [`CatalogError::FetchFailed`]; the list controller treats them all as retryable.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to fetch catalog page {page}: {source}")]
    FetchFailed { page: u32, source: anyhow::Error },
    #[error("failed to fetch character {id}: {source}")]
    DetailFailed {
        id: CharacterId,
        source: anyhow::Error,
    },
}

impl CatalogError {
    pub fn fetch_failed(page: u32, source: impl Into<anyhow::Error>) -> Self {
        Self::FetchFailed {
            page,
            source: source.into(),
        }
    }
}
