//! Pokémon document model / Pokémon 文档模型
//!
//! The document shape is owned by the search index (it is whatever PokeAPI
//! returned at ingest time), so every field is optional and unknown fields
//! are simply ignored. A malformed document must degrade at render time,
//! never fail a whole search.

use serde::{Deserialize, Serialize};

/// A searchable index as exposed to the UI / 暴露给前端的索引
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexSummary {
    pub id: String,
}

/// Name-only nested reference, e.g. `species`, `type`, `stat`, `ability`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: Option<String>,
}

/// Sprite URLs / 精灵图地址
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
    pub other: Option<SpriteOther>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpriteOther {
    #[serde(rename = "official-artwork")]
    pub official_artwork: Option<ArtworkSprites>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtworkSprites {
    pub front_default: Option<String>,
}

/// One type entry; `slot` 1 is the primary type / slot 为 1 的是主属性
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: Option<i64>,
    #[serde(rename = "type")]
    pub type_ref: Option<NamedRef>,
}

/// One base stat entry / 基础数值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: Option<i64>,
    pub stat: Option<NamedRef>,
}

/// One ability entry / 特性
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbilityEntry {
    pub ability: Option<NamedRef>,
    #[serde(default)]
    pub is_hidden: bool,
}

/// Pokémon document as stored in the index / 索引中的 Pokémon 文档
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pokemon {
    pub name: Option<String>,
    pub id: Option<u64>,
    /// Height in decimetres / 身高（分米）
    pub height: Option<f64>,
    /// Weight in hectograms / 体重（百克）
    pub weight: Option<f64>,
    pub species: Option<NamedRef>,
    pub sprites: Option<Sprites>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub abilities: Vec<AbilityEntry>,
}

impl Pokemon {
    /// Best sprite URL: official artwork first, then the default front
    /// sprite / 优先官方立绘，其次默认正面图
    pub fn sprite_url(&self) -> Option<&str> {
        let sprites = self.sprites.as_ref()?;
        sprites
            .other
            .as_ref()
            .and_then(|o| o.official_artwork.as_ref())
            .and_then(|a| a.front_default.as_deref())
            .or(sprites.front_default.as_deref())
    }

    /// Type names ordered by slot ascending so the primary type comes
    /// first / 按 slot 升序排列属性名
    pub fn type_names(&self) -> Vec<String> {
        let mut sorted: Vec<&TypeSlot> = self.types.iter().collect();
        sorted.sort_by_key(|t| t.slot.unwrap_or(i64::MAX));
        sorted
            .iter()
            .map(|t| {
                t.type_ref
                    .as_ref()
                    .and_then(|r| r.name.clone())
                    .unwrap_or_else(|| "Unknown".to_string())
            })
            .collect()
    }

    /// Base stat by name, e.g. `hp`, `special-attack` / 按名称取基础数值
    pub fn base_stat(&self, name: &str) -> Option<i64> {
        self.stats
            .iter()
            .find(|s| {
                s.stat
                    .as_ref()
                    .and_then(|r| r.name.as_deref())
                    .map(|n| n == name)
                    .unwrap_or(false)
            })
            .and_then(|s| s.base_stat)
    }

    /// Abilities summary: regular abilities comma-joined, hidden ones
    /// appended parenthetically / 普通特性逗号连接，隐藏特性括号追加
    pub fn abilities_text(&self) -> String {
        let named: Vec<(&str, bool)> = self
            .abilities
            .iter()
            .filter_map(|a| {
                a.ability
                    .as_ref()
                    .and_then(|r| r.name.as_deref())
                    .map(|n| (n, a.is_hidden))
            })
            .collect();

        if named.is_empty() {
            return "None".to_string();
        }

        let regular: Vec<&str> = named.iter().filter(|(_, h)| !h).map(|(n, _)| *n).collect();
        let hidden: Vec<&str> = named.iter().filter(|(_, h)| *h).map(|(n, _)| *n).collect();

        let mut text = regular.join(", ");
        if !hidden.is_empty() {
            text.push_str(&format!(" (Hidden: {})", hidden.join(", ")));
        }
        text
    }
}
