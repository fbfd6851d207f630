use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/////////////////////////////////
/// CATALOG STRUCTS AND ENUMS ///
/////////////////////////////////

/// Read-only catalogs the game loop consults.
#[derive(Debug, Clone)]
pub struct World {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub start_location: String,
    pub start_area: String,
    pub enemies: Vec<EnemyTemplate>,
    pub locations: Vec<Location>,
    pub shop: Vec<ShopListing>,
    pub loot_table: Vec<LootEntry>,
    pub explore_events: Vec<ExploreEvent>,
    pub quest_groups: Vec<QuestGroup>,
    pub reward_items: Vec<String>,
}

impl World {
    /// Looks a location up by display name or id, ignoring case.
    pub fn location(&self, name: &str) -> Option<&Location> {
        self.locations
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(name) || l.id.eq_ignore_ascii_case(name))
    }

    pub fn start_location(&self) -> Option<&Location> {
        self.location(&self.start_location)
    }

    pub fn shop_listing(&self, item_name: &str) -> Option<&ShopListing> {
        self.shop
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(item_name))
    }
}

/// Inclusive damage range. A single number is a degenerate range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DamageRange {
    pub min: u32,
    pub max: u32,
}

impl DamageRange {
    pub fn new(min: u32, max: u32) -> Option<Self> {
        (min <= max).then_some(DamageRange { min, max })
    }

    pub fn fixed(value: u32) -> Self {
        DamageRange {
            min: value,
            max: value,
        }
    }
}

impl FromStr for DamageRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| format!("invalid damage value '{}' in '{}'", part.trim(), s))
        };

        match s.split_once('-') {
            Some((lo, hi)) => {
                let (min, max) = (parse(lo)?, parse(hi)?);
                DamageRange::new(min, max)
                    .ok_or_else(|| format!("damage range '{}' has min greater than max", s))
            }
            None => parse(s).map(DamageRange::fixed),
        }
    }
}

impl TryFrom<String> for DamageRange {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DamageRange> for String {
    fn from(range: DamageRange) -> Self {
        range.to_string()
    }
}

impl fmt::Display for DamageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub max_health: u32,
    pub damage: DamageRange,
    pub xp: u32,
    pub gold: u32,
    pub loot_chance: f64,
    pub desc: String,
}

#[derive(Debug, Clone)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub areas: Vec<String>,
    pub danger: u32, // 0..=3
    pub desc: String,
}

impl Location {
    /// First area whose name contains `query`, ignoring case.
    pub fn find_area(&self, query: &str) -> Option<&str> {
        let query = query.to_lowercase();
        self.areas
            .iter()
            .find(|a| a.to_lowercase().contains(&query))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Consumable,
    Weapon,
    Armor,
    Accessory,
    Special,
}

impl ItemKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "consumable" => Some(ItemKind::Consumable),
            "weapon" => Some(ItemKind::Weapon),
            "armor" => Some(ItemKind::Armor),
            "accessory" => Some(ItemKind::Accessory),
            "special" => Some(ItemKind::Special),
            _ => None,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ItemKind::Consumable => "🧪",
            ItemKind::Weapon => "⚔️",
            ItemKind::Armor => "🛡️",
            ItemKind::Accessory => "💎",
            ItemKind::Special => "✨",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShopListing {
    pub id: u32,
    pub name: String,
    pub price: u32,
    pub kind: ItemKind,
    pub effect: Option<String>,
    pub damage: Option<DamageRange>,
    pub defense: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct LootEntry {
    pub name: String,
    pub chance: f64,
    pub kind: ItemKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExploreEventKind {
    Enemy,
    Treasure,
    Nothing,
    Shrine,
}

#[derive(Debug, Clone)]
pub struct ExploreEvent {
    pub kind: ExploreEventKind,
    pub chance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestKind {
    Combat,
    Collection,
    Exploration,
}

/// What a quest counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestTarget {
    Enemy,
    SoulShard,
    Gold,
    Area,
}

#[derive(Debug, Clone)]
pub struct QuestTemplate {
    pub name: String,
    pub desc: String, // "{count}" is replaced with `required`
    pub required: u32,
    pub target: QuestTarget,
}

#[derive(Debug, Clone)]
pub struct QuestGroup {
    pub kind: QuestKind,
    pub templates: Vec<QuestTemplate>,
}
