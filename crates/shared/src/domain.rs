use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(CharacterId);
id_newtype!(PlanetId);
id_newtype!(TransformationId);

impl CharacterId {
    /// The catalog numbers characters from 1; anything else cannot be deduplicated safely.
    pub fn is_usable(self) -> bool {
        self.0 > 0
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub race: String,
    pub ki: String,
    pub max_ki: String,
    pub gender: String,
    pub description: String,
    pub image: String,
    pub affiliation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Character {
    /// Secondary classifying field used by search; for this catalog it is the race.
    pub fn category(&self) -> &str {
        &self.race
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u32,
    pub items_per_page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    pub id: PlanetId,
    pub name: String,
    pub is_destroyed: bool,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transformation {
    pub id: TransformationId,
    pub name: String,
    pub image: String,
    pub ki: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDetail {
    pub character: Character,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_planet: Option<Planet>,
    #[serde(default)]
    pub transformations: Vec<Transformation>,
}
