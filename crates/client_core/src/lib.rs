//! Client-side core of the character catalog browser.
//!
//! The [`controller::ListController`] owns the accumulated list, pagination
//! cursor and search term of one list screen. It talks to the remote catalog
//! only through [`CatalogPort`], so tests and alternative transports can stand
//! in for [`http::CatalogClient`].

use async_trait::async_trait;
use shared::domain::{Character, CharacterDetail, CharacterId, Page};

pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod normalize;

pub use config::{load_settings, ClientSettings};
pub use controller::{
    derive_view, Completion, FetchKind, ListController, ListSnapshot, ListState, ListStatus,
    PageRequest, FAILURE_MESSAGE,
};
pub use error::CatalogError;
pub use http::CatalogClient;
pub use normalize::{normalize, normalize_opt, SearchQuery};

/// Records requested per page.
pub const PAGE_SIZE: u32 = 10;

#[async_trait]
pub trait CatalogPort: Send + Sync {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<Page<Character>, CatalogError>;
}

#[async_trait]
pub trait CharacterDetailSource: Send + Sync {
    async fn fetch_character(&self, id: CharacterId) -> Result<CharacterDetail, CatalogError>;
}
