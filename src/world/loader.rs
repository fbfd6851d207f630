use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use super::model::{
    DamageRange, EnemyTemplate, ExploreEvent, ExploreEventKind, ItemKind, Location, LootEntry,
    QuestGroup, QuestKind, QuestTarget, QuestTemplate, ShopListing, World,
};
use super::validator::{ValidationError, validate_world};

/// Catalog shipped with the crate.
const DEFAULT_WORLD: &str = include_str!("../../public/soul_commander.toml");

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("failed to read world file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse world file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0}")]
    Invalid(String),

    #[error("world failed validation: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

////////////////////
/// TOML STRUCTS ///
////////////////////

#[derive(Deserialize)]
struct WorldFile {
    world: WorldHeader,
    #[serde(default)]
    enemy: Vec<EnemyConfig>, // [[enemy]] blocks
    #[serde(default)]
    location: Vec<LocationConfig>, // [[location]] blocks
    #[serde(default)]
    shop: Vec<ShopConfig>, // [[shop]] blocks, listed in purchase order
    #[serde(default)]
    loot: Vec<LootConfig>,
    #[serde(default)]
    explore_event: Vec<ExploreEventConfig>,
    #[serde(default)]
    quest_group: Vec<QuestGroupConfig>, // [[quest_group]] with [[quest_group.template]]
    #[serde(default)]
    rewards: RewardsConfig,
}

#[derive(Deserialize)]
struct WorldHeader {
    id: String,
    name: String,
    start_location: String,
    start_area: String,
    #[serde(default)]
    desc: String,
}

#[derive(Deserialize)]
struct EnemyConfig {
    id: String,
    name: String,
    #[serde(default = "default_level")]
    level: u32,
    health: u32,
    damage: String,
    xp: u32,
    gold: u32,
    #[serde(default)]
    loot_chance: f64,
    #[serde(default)]
    desc: String,
}

#[derive(Deserialize)]
struct LocationConfig {
    id: String,
    name: String,
    #[serde(default)]
    areas: Vec<String>,
    #[serde(default)]
    danger: u32,
    #[serde(default)]
    desc: String,
}

#[derive(Deserialize)]
struct ShopConfig {
    name: String,
    price: u32,
    kind: String,
    #[serde(default)]
    effect: Option<String>,
    #[serde(default)]
    damage: Option<String>,
    #[serde(default)]
    defense: Option<u32>,
}

#[derive(Deserialize)]
struct LootConfig {
    name: String,
    chance: f64,
    #[serde(default)]
    kind: Option<String>, // defaults to consumable
}

#[derive(Deserialize)]
struct ExploreEventConfig {
    kind: String, // "enemy" | "treasure" | "nothing" | "shrine"
    chance: f64,
}

#[derive(Deserialize)]
struct QuestGroupConfig {
    kind: String,
    #[serde(default)]
    template: Vec<QuestTemplateConfig>,
}

#[derive(Deserialize)]
struct QuestTemplateConfig {
    name: String,
    desc: String,
    required: u32,
    #[serde(default)]
    target: Option<String>,
}

#[derive(Deserialize, Default)]
struct RewardsConfig {
    #[serde(default)]
    items: Vec<String>,
}

fn default_level() -> u32 {
    1
}

/////////////////////////////
/// TOML PARSER FUNCTIONS ///
/////////////////////////////

/// Load a world from a .toml file on disk.
pub fn load_world_from_file(path: &Path) -> Result<World, WorldError> {
    let contents = fs::read_to_string(path)?;
    load_world_from_str(&contents)
}

/// The catalog bundled with the crate.
pub fn default_world() -> Result<World, WorldError> {
    load_world_from_str(DEFAULT_WORLD)
}

pub fn load_world_from_str(contents: &str) -> Result<World, WorldError> {
    let world_file: WorldFile = toml::from_str(contents)?;

    if world_file.world.id.trim().is_empty() {
        return Err(WorldError::Invalid("world.id may not be empty".into()));
    }
    if world_file.world.start_location.trim().is_empty() {
        return Err(WorldError::Invalid(
            "world.start_location may not be empty".into(),
        ));
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut enemies = Vec::with_capacity(world_file.enemy.len());
    for ec in world_file.enemy {
        if !seen.insert(ec.id.clone()) {
            return Err(WorldError::Invalid(format!("Duplicate enemy id: {}", ec.id)));
        }

        let damage: DamageRange = ec
            .damage
            .parse()
            .map_err(|msg| WorldError::Invalid(format!("enemy '{}': {}", ec.id, msg)))?;

        enemies.push(EnemyTemplate {
            id: ec.id,
            name: ec.name,
            level: ec.level,
            max_health: ec.health,
            damage,
            xp: ec.xp,
            gold: ec.gold,
            loot_chance: ec.loot_chance,
            desc: normalize_multiline_desc(&ec.desc),
        });
    }

    seen.clear();
    let mut locations = Vec::with_capacity(world_file.location.len());
    for lc in world_file.location {
        if !seen.insert(lc.id.clone()) {
            return Err(WorldError::Invalid(format!(
                "Duplicate location id: {}",
                lc.id
            )));
        }

        locations.push(Location {
            id: lc.id,
            name: lc.name,
            areas: lc.areas,
            danger: lc.danger,
            desc: normalize_multiline_desc(&lc.desc),
        });
    }

    let mut shop = Vec::with_capacity(world_file.shop.len());
    for (idx, sc) in world_file.shop.into_iter().enumerate() {
        let damage = sc
            .damage
            .as_deref()
            .map(str::parse::<DamageRange>)
            .transpose()
            .map_err(|msg| WorldError::Invalid(format!("shop item '{}': {}", sc.name, msg)))?;

        shop.push(ShopListing {
            id: idx as u32 + 1,
            kind: parse_item_kind(&sc.kind),
            name: sc.name,
            price: sc.price,
            effect: sc.effect,
            damage,
            defense: sc.defense,
        });
    }

    let loot_table = world_file
        .loot
        .into_iter()
        .map(|lc| LootEntry {
            kind: lc
                .kind
                .as_deref()
                .map(parse_item_kind)
                .unwrap_or(ItemKind::Consumable),
            name: lc.name,
            chance: lc.chance,
        })
        .collect();

    let mut explore_events = Vec::with_capacity(world_file.explore_event.len());
    for ev in world_file.explore_event {
        let kind = match ev.kind.trim().to_lowercase().as_str() {
            "enemy" => ExploreEventKind::Enemy,
            "treasure" => ExploreEventKind::Treasure,
            "nothing" => ExploreEventKind::Nothing,
            "shrine" | "special" => ExploreEventKind::Shrine,
            other => {
                return Err(WorldError::Invalid(format!(
                    "unknown explore_event kind '{}'",
                    other
                )));
            }
        };
        explore_events.push(ExploreEvent {
            kind,
            chance: ev.chance,
        });
    }

    let mut quest_groups = Vec::with_capacity(world_file.quest_group.len());
    for gc in world_file.quest_group {
        let kind = parse_quest_kind(&gc.kind)?;

        let mut templates = Vec::with_capacity(gc.template.len());
        for tc in gc.template {
            let target = match tc.target.as_deref() {
                Some(raw) => parse_quest_target(raw)?,
                None => default_target(kind),
            };
            templates.push(QuestTemplate {
                name: tc.name,
                desc: normalize_multiline_desc(&tc.desc),
                required: tc.required,
                target,
            });
        }

        quest_groups.push(QuestGroup { kind, templates });
    }

    let world = World {
        id: world_file.world.id,
        name: world_file.world.name,
        desc: normalize_multiline_desc(&world_file.world.desc),
        start_location: world_file.world.start_location,
        start_area: world_file.world.start_area,
        enemies,
        locations,
        shop,
        loot_table,
        explore_events,
        quest_groups,
        reward_items: world_file.rewards.items,
    };

    let errors = validate_world(&world);
    if !errors.is_empty() {
        return Err(WorldError::Validation(errors));
    }

    Ok(world)
}

fn normalize_multiline_desc(raw: &str) -> String {
    let mut result = String::new();
    let mut pending_blank_lines = 0usize;

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            pending_blank_lines += 1;
            continue;
        }

        if !result.is_empty() {
            // One TOML newline joins with a space; any blank line breaks the paragraph.
            result.push_str(if pending_blank_lines == 0 { " " } else { "\n" });
        }
        result.push_str(trimmed);
        pending_blank_lines = 0;
    }

    result
}

////////////////////////////
/// ENUM PARSE HELPERS   ///
////////////////////////////

fn parse_item_kind(raw: &str) -> ItemKind {
    ItemKind::parse(raw).unwrap_or_else(|| {
        tracing::warn!(kind = raw, "unknown item kind, defaulting to special");
        ItemKind::Special
    })
}

fn parse_quest_kind(raw: &str) -> Result<QuestKind, WorldError> {
    match raw.trim().to_lowercase().as_str() {
        "combat" => Ok(QuestKind::Combat),
        "collection" => Ok(QuestKind::Collection),
        "exploration" => Ok(QuestKind::Exploration),
        other => Err(WorldError::Invalid(format!(
            "unknown quest_group kind '{}'",
            other
        ))),
    }
}

fn parse_quest_target(raw: &str) -> Result<QuestTarget, WorldError> {
    match raw.trim().to_lowercase().as_str() {
        "enemy" => Ok(QuestTarget::Enemy),
        "soul_shard" | "soul_shards" => Ok(QuestTarget::SoulShard),
        "gold" => Ok(QuestTarget::Gold),
        "area" => Ok(QuestTarget::Area),
        other => Err(WorldError::Invalid(format!(
            "unknown quest target '{}'",
            other
        ))),
    }
}

fn default_target(kind: QuestKind) -> QuestTarget {
    match kind {
        QuestKind::Combat => QuestTarget::Enemy,
        QuestKind::Collection => QuestTarget::SoulShard,
        QuestKind::Exploration => QuestTarget::Area,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [world]
        id = "tiny"
        name = "Tiny"
        start_location = "camp"
        start_area = "Fire"

        [[enemy]]
        id = "rat"
        name = "Rat"
        health = 10
        damage = "1-2"
        xp = 5
        gold = 1

        [[location]]
        id = "camp"
        name = "Camp"
        areas = ["Fire", "Tent"]

        [[explore_event]]
        kind = "nothing"
        chance = 1.0

        [[quest_group]]
        kind = "combat"
        [[quest_group.template]]
        name = "Pest Control"
        desc = "Kill {count} rats"
        required = 2

        [rewards]
        items = ["Cheese"]
    "#;

    #[test]
    fn bundled_world_loads() {
        let world = default_world().unwrap();
        assert_eq!(world.enemies[0].id, "goblin");
        assert_eq!(world.enemies[0].damage, DamageRange::new(8, 15).unwrap());
        assert_eq!(world.locations.len(), 4);
        assert_eq!(world.shop[0].id, 1);
        assert_eq!(world.start_location().unwrap().name, "Sanctuary");
    }

    #[test]
    fn minimal_world_loads_with_defaults() {
        let world = load_world_from_str(MINIMAL).unwrap();
        assert_eq!(world.enemies[0].level, 1);
        assert_eq!(world.quest_groups[0].templates[0].target, QuestTarget::Enemy);
        assert!(world.shop.is_empty());
    }

    #[test]
    fn rejects_duplicate_enemy_ids() {
        let doubled = MINIMAL.replace(
            "[[location]]",
            "[[enemy]]\nid = \"rat\"\nname = \"Rat\"\nhealth = 1\ndamage = \"1\"\nxp = 1\ngold = 1\n\n[[location]]",
        );
        let err = load_world_from_str(&doubled).unwrap_err();
        assert!(matches!(err, WorldError::Invalid(ref m) if m.contains("Duplicate enemy id")));
    }

    #[test]
    fn rejects_bad_damage() {
        let broken = MINIMAL.replace("\"1-2\"", "\"2-1\"");
        assert!(matches!(
            load_world_from_str(&broken),
            Err(WorldError::Invalid(_))
        ));
    }

    #[test]
    fn unknown_start_area_fails_validation() {
        let broken = MINIMAL.replace("start_area = \"Fire\"", "start_area = \"Lake\"");
        assert!(matches!(
            load_world_from_str(&broken),
            Err(WorldError::Validation(_))
        ));
    }

    #[test]
    fn rejects_infinite_event_weight() {
        let broken = MINIMAL.replace("chance = 1.0", "chance = inf");
        let err = load_world_from_str(&broken).unwrap_err();
        assert!(matches!(err, WorldError::Validation(ref errs) if errs.len() == 1));
    }

    #[test]
    fn multiline_desc_is_joined() {
        assert_eq!(normalize_multiline_desc("  a\n  b\n\n  c  "), "a b\nc");
    }
}
