use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::engine::output::Output;
use crate::engine::progression::advance_quest;
use crate::engine::weighted::weighted_pick;
use crate::player::{Player, ProgressEvent};
use crate::world::{ExploreEventKind, Location, World};

pub const TRAVEL_COST: u32 = 5;
pub const EXPLORE_COST: u32 = 10;
pub const AMBUSH_CHANCE_PER_DANGER: f64 = 0.2;
pub const SHRINE_HEALTH_BONUS: u32 = 5;
pub const TREASURE_MIN: u32 = 20;
pub const TREASURE_MAX: u32 = 70; // exclusive

#[derive(Debug, Clone, PartialEq)]
pub enum ExploreOutcome {
    Rejected,
    Traveled {
        location: String,
        area: String,
        /// Enemy that jumped the player on arrival, if any.
        ambush: Option<String>,
    },
    Event {
        kind: ExploreEventKind,
        gold: u32,
    },
}

/// `explore [area]`: travel when an area is named, otherwise explore at random.
pub fn handle_explore<R: Rng + ?Sized>(
    out: &mut Output,
    world: &World,
    player: &mut Player,
    query: &str,
    rng: &mut R,
) -> ExploreOutcome {
    let query = query.trim();
    if query.is_empty() {
        random_exploration(out, world, player, rng)
    } else {
        travel(out, world, player, query, rng)
    }
}

/// Resolves a travel target: an area of the current location first, then
/// another location (arriving in its first area).
fn resolve_destination<'a>(
    world: &'a World,
    current: &'a Location,
    query: &str,
) -> Option<(&'a Location, &'a str)> {
    if let Some(area) = current.find_area(query) {
        return Some((current, area));
    }
    let needle = query.to_lowercase();
    let location = world
        .locations
        .iter()
        .find(|l| l.name.to_lowercase().contains(&needle) || l.id.eq_ignore_ascii_case(query))?;
    let area = location.areas.first()?;
    Some((location, area.as_str()))
}

pub fn travel<R: Rng + ?Sized>(
    out: &mut Output,
    world: &World,
    player: &mut Player,
    query: &str,
    rng: &mut R,
) -> ExploreOutcome {
    let Some(current) = world.location(&player.location) else {
        out.warn("Cannot find location information");
        return ExploreOutcome::Rejected;
    };

    let Some((location, area)) = resolve_destination(world, current, query) else {
        out.warn(format!("Area '{}' not found in {}", query, current.name));
        out.say(format!("Available areas: {}", current.areas.join(", ")));
        return ExploreOutcome::Rejected;
    };

    if player.mana.current() < TRAVEL_COST {
        out.warn("Not enough Command Power to travel!");
        return ExploreOutcome::Rejected;
    }

    let revisit = player.location == location.name && player.area == area;
    player.mana.drain(TRAVEL_COST);
    player.location = location.name.clone();
    player.area = area.to_string();

    out.title(format!("Traveling to {}...", area));
    out.say(format!("You arrive at {} in {}", area, location.name));
    out.say(format!("Command Power -{}", TRAVEL_COST));
    debug!(location = %location.id, area, "travel");

    if !revisit {
        advance_quest(out, world, player, ProgressEvent::AreaVisited, rng);
    }

    let ambush = roll_ambush(world, location.danger, rng).map(|name| {
        out.combat(format!("You've been ambushed by a {}!", name));
        out.say(format!("Type 'fight {}' to defend yourself", name.to_lowercase()));
        name.to_string()
    });

    ExploreOutcome::Traveled {
        location: location.name.clone(),
        area: area.to_string(),
        ambush,
    }
}

/// With chance `danger * 0.2`, one of the first `danger + 2` catalog enemies.
fn roll_ambush<'a, R: Rng + ?Sized>(world: &'a World, danger: u32, rng: &mut R) -> Option<&'a str> {
    if danger == 0 || world.enemies.is_empty() {
        return None;
    }
    let chance = (f64::from(danger) * AMBUSH_CHANCE_PER_DANGER).clamp(0.0, 1.0);
    if !rng.gen_bool(chance) {
        return None;
    }
    let pool = world.enemies.len().min(danger as usize + 2);
    Some(world.enemies[rng.gen_range(0..pool)].name.as_str())
}

pub fn random_exploration<R: Rng + ?Sized>(
    out: &mut Output,
    world: &World,
    player: &mut Player,
    rng: &mut R,
) -> ExploreOutcome {
    player.mana.drain(EXPLORE_COST);
    out.title(format!("Exploring {}...", player.area));

    let Some(event) = weighted_pick(&world.explore_events, rng) else {
        out.say("Nothing of interest here.");
        return ExploreOutcome::Event {
            kind: ExploreEventKind::Nothing,
            gold: 0,
        };
    };

    let mut gold = 0;
    match event.kind {
        ExploreEventKind::Enemy => {
            let name = world
                .enemies
                .choose(rng)
                .map(|e| e.name.as_str())
                .unwrap_or("shadow");
            out.combat(format!("You encounter a wild {}!", name));
            out.say(format!("Type 'fight {}' to engage", name.to_lowercase()));
        }
        ExploreEventKind::Treasure => {
            gold = rng.gen_range(TREASURE_MIN..TREASURE_MAX);
            player.earn_gold(gold);
            out.loot(format!("You found a treasure chest! +{} Gold", gold));
            advance_quest(out, world, player, ProgressEvent::Gold(gold), rng);
        }
        ExploreEventKind::Shrine => {
            player.health.grow(SHRINE_HEALTH_BONUS);
            player.health.restore(SHRINE_HEALTH_BONUS);
            out.heal(format!(
                "You discover an ancient shrine! Max Health +{}",
                SHRINE_HEALTH_BONUS
            ));
        }
        ExploreEventKind::Nothing => {
            out.say("You explore the area but find nothing of interest.");
        }
    }
    out.say(format!("Command Power -{}", EXPLORE_COST));
    debug!(event = ?event.kind, gold, "random exploration");

    ExploreOutcome::Event {
        kind: event.kind,
        gold,
    }
}
