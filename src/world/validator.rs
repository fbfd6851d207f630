use std::collections::HashSet;

use super::model::{ExploreEventKind, QuestKind, QuestTarget, World};

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    fn new(msg: impl Into<String>) -> Self {
        ValidationError {
            message: msg.into(),
        }
    }
}

pub fn validate_world(world: &World) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    // Fights fall back to the first enemy, so the catalog can't be empty
    if world.enemies.is_empty() {
        errors.push(ValidationError::new("world has no enemies"));
    }

    match world.start_location() {
        None => errors.push(ValidationError::new(format!(
            "start_location '{}' not found among locations",
            world.start_location
        ))),
        Some(loc) => {
            if !loc.areas.iter().any(|a| a == &world.start_area) {
                errors.push(ValidationError::new(format!(
                    "start_area '{}' is not an area of '{}'",
                    world.start_area, loc.name
                )));
            }
        }
    }

    for enemy in &world.enemies {
        if enemy.max_health == 0 {
            errors.push(ValidationError::new(format!(
                "enemy '{}' has zero health",
                enemy.id
            )));
        }
        if !(0.0..=1.0).contains(&enemy.loot_chance) {
            errors.push(ValidationError::new(format!(
                "enemy '{}' loot_chance {} is outside [0, 1]",
                enemy.id, enemy.loot_chance
            )));
        }
    }

    for loc in &world.locations {
        if loc.areas.is_empty() {
            errors.push(ValidationError::new(format!(
                "location '{}' has no areas",
                loc.id
            )));
        }
        if loc.danger > 3 {
            errors.push(ValidationError::new(format!(
                "location '{}' danger {} is outside [0, 3]",
                loc.id, loc.danger
            )));
        }
    }

    for entry in &world.loot_table {
        if !valid_weight(entry.chance) {
            errors.push(ValidationError::new(format!(
                "loot '{}' weight must be a finite number >= 0",
                entry.name
            )));
        }
    }

    if world.explore_events.is_empty() {
        errors.push(ValidationError::new("world has no explore events"));
    }
    let mut event_kinds: HashSet<String> = HashSet::new();
    for ev in &world.explore_events {
        if !valid_weight(ev.chance) {
            errors.push(ValidationError::new(format!(
                "explore event {:?} weight must be a finite number >= 0",
                ev.kind
            )));
        }
        if !event_kinds.insert(format!("{:?}", ev.kind)) {
            errors.push(ValidationError::new(format!(
                "explore event {:?} is listed twice",
                ev.kind
            )));
        }
    }
    if world
        .explore_events
        .iter()
        .any(|ev| ev.kind == ExploreEventKind::Enemy)
        && world.enemies.is_empty()
    {
        errors.push(ValidationError::new(
            "explore event 'enemy' needs at least one enemy",
        ));
    }

    if world.quest_groups.is_empty() {
        errors.push(ValidationError::new("world has no quest groups"));
    }
    for group in &world.quest_groups {
        if group.templates.is_empty() {
            errors.push(ValidationError::new(format!(
                "quest group {:?} has no templates",
                group.kind
            )));
        }
        for t in &group.templates {
            if t.required == 0 {
                errors.push(ValidationError::new(format!(
                    "quest template '{}' requires zero progress",
                    t.name
                )));
            }
            if !target_fits(group.kind, t.target) {
                errors.push(ValidationError::new(format!(
                    "quest template '{}' target {:?} does not fit a {:?} quest",
                    t.name, t.target, group.kind
                )));
            }
        }
    }

    if world.reward_items.iter().any(|i| i.trim().is_empty()) {
        errors.push(ValidationError::new("rewards.items has an empty entry"));
    }

    for listing in &world.shop {
        if listing.name.trim().is_empty() {
            errors.push(ValidationError::new(format!(
                "shop item #{} has an empty name",
                listing.id
            )));
        }
    }

    errors
}

fn valid_weight(weight: f64) -> bool {
    weight.is_finite() && weight >= 0.0
}

fn target_fits(kind: QuestKind, target: QuestTarget) -> bool {
    match kind {
        QuestKind::Combat => target == QuestTarget::Enemy,
        QuestKind::Collection => matches!(target, QuestTarget::SoulShard | QuestTarget::Gold),
        QuestKind::Exploration => target == QuestTarget::Area,
    }
}
