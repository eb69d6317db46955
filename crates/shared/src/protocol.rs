//! Wire shapes of the catalog HTTP API and their conversion into domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Character, CharacterDetail, CharacterId, Page, PageMeta, Planet, PlanetId, Transformation,
    TransformationId,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ki: String,
    #[serde(default)]
    pub max_ki: String,
    #[serde(default)]
    pub race: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub affiliation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl CharacterPayload {
    /// Returns `None` for items without a usable identity.
    pub fn into_character(self) -> Option<Character> {
        let id = CharacterId(self.id?);
        if !id.is_usable() {
            return None;
        }
        Some(Character {
            id,
            name: self.name,
            race: self.race,
            ki: self.ki,
            max_ki: self.max_ki,
            gender: self.gender,
            description: self.description,
            image: self.image,
            affiliation: self.affiliation,
            deleted_at: self.deleted_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetaPayload {
    #[serde(default)]
    pub total_items: u32,
    #[serde(default)]
    pub item_count: u32,
    #[serde(default)]
    pub items_per_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    pub current_page: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub first: String,
    #[serde(default)]
    pub previous: String,
    #[serde(default)]
    pub next: String,
    #[serde(default)]
    pub last: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterPageResponse {
    pub items: Vec<CharacterPayload>,
    pub meta: PageMetaPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<PageLinks>,
}

#[derive(Debug, Clone)]
pub struct DecodedPage {
    pub page: Page<Character>,
    /// Items dropped because they had no usable id.
    pub skipped: usize,
}

impl CharacterPageResponse {
    pub fn into_page(self) -> DecodedPage {
        let received = self.items.len();
        let items: Vec<Character> = self
            .items
            .into_iter()
            .filter_map(CharacterPayload::into_character)
            .collect();
        let skipped = received - items.len();
        let current_page = self.meta.current_page.max(1);
        DecodedPage {
            page: Page {
                items,
                meta: PageMeta {
                    current_page,
                    total_pages: self.meta.total_pages.max(1),
                    total_items: self.meta.total_items,
                    items_per_page: self.meta.items_per_page,
                },
            },
            skipped,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPayload {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_destroyed: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformationPayload {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub ki: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDetailResponse {
    #[serde(flatten)]
    pub character: CharacterPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_planet: Option<PlanetPayload>,
    #[serde(default)]
    pub transformations: Vec<TransformationPayload>,
}

impl CharacterDetailResponse {
    pub fn into_detail(self) -> Option<CharacterDetail> {
        let character = self.character.into_character()?;
        Some(CharacterDetail {
            character,
            origin_planet: self.origin_planet.map(|planet| Planet {
                id: PlanetId(planet.id),
                name: planet.name,
                is_destroyed: planet.is_destroyed,
                description: planet.description,
                image: planet.image,
            }),
            transformations: self
                .transformations
                .into_iter()
                .map(|t| Transformation {
                    id: TransformationId(t.id),
                    name: t.name,
                    image: t.image,
                    ki: t.ki,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
