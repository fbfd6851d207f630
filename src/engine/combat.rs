use rand::Rng;
use tracing::debug;

use crate::engine::output::Output;
use crate::engine::progression::{DefeatReport, RespawnReport, defeat_enemy, player_defeated};
use crate::player::Player;
use crate::world::{DamageRange, EnemyTemplate, World};

pub const CRIT_CHANCE: f64 = 0.10;
pub const CRIT_MULTIPLIER: f64 = 1.5;
/// Armor defense points per point of damage absorbed.
pub const ARMOR_DIVISOR: u32 = 10;
pub const ARMOR_WEAR_PER_HIT: u32 = 5;

/// Working copy of an enemy template for the fight in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct Encounter {
    pub enemy_id: String,
    pub name: String,
    pub health: i64,
    pub max_health: u32,
    pub damage: DamageRange,
    pub xp: u32,
    pub gold: u32,
    pub loot_chance: f64,
}

impl Encounter {
    pub fn from_template(template: &EnemyTemplate) -> Self {
        Encounter {
            enemy_id: template.id.clone(),
            name: template.name.clone(),
            health: i64::from(template.max_health),
            max_health: template.max_health,
            damage: template.damage,
            xp: template.xp,
            gold: template.gold,
            loot_chance: template.loot_chance,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

/// The player's attack for one exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    pub damage: u32,
    pub critical: bool,
}

#[derive(Debug)]
pub enum ExchangeOutcome {
    /// Nothing happened; the player can't fight right now.
    Rejected,
    /// Both sides landed a hit and the fight goes on.
    Traded { strike: Strike, taken: u32 },
    EnemyDefeated { strike: Strike, report: DefeatReport },
    PlayerDefeated {
        strike: Strike,
        taken: u32,
        report: RespawnReport,
    },
}

/// Uniform integer in the inclusive range.
pub fn roll_damage<R: Rng + ?Sized>(range: DamageRange, rng: &mut R) -> u32 {
    rng.gen_range(range.min..=range.max)
}

pub fn critical_damage(base: u32) -> u32 {
    (f64::from(base) * CRIT_MULTIPLIER).floor() as u32
}

/// Damage the player takes from an enemy roll. Never less than 1.
pub fn mitigate(enemy_roll: u32, armor_defense: u32) -> u32 {
    enemy_roll
        .saturating_sub(armor_defense / ARMOR_DIVISOR)
        .max(1)
}

pub fn player_strike<R: Rng + ?Sized>(weapon: DamageRange, rng: &mut R) -> Strike {
    let base = roll_damage(weapon, rng);
    let critical = rng.gen_bool(CRIT_CHANCE);
    Strike {
        damage: if critical { critical_damage(base) } else { base },
        critical,
    }
}

/// Enemy whose name contains `query` (ignoring case) or whose id equals it.
/// Anything else falls back to the first catalog entry.
pub fn find_enemy<'a>(enemies: &'a [EnemyTemplate], query: &str) -> Option<&'a EnemyTemplate> {
    let query = query.trim().to_lowercase();
    enemies
        .iter()
        .find(|e| e.name.to_lowercase().contains(&query) || e.id.eq_ignore_ascii_case(&query))
        .or_else(|| enemies.first())
}

/// `fight [enemy]`: resolves exactly one exchange against the selected enemy.
///
/// An ongoing encounter with the same enemy continues; choosing a different
/// enemy starts a fresh encounter.
pub fn handle_fight<R: Rng + ?Sized>(
    out: &mut Output,
    world: &World,
    player: &mut Player,
    encounter: &mut Option<Encounter>,
    query: &str,
    rng: &mut R,
) -> ExchangeOutcome {
    if player.health.is_empty() {
        out.combat("You are too weak to fight! Heal first.");
        return ExchangeOutcome::Rejected;
    }

    let Some(template) = find_enemy(&world.enemies, query) else {
        out.warn("There is nothing here to fight.");
        return ExchangeOutcome::Rejected;
    };

    let enemy = match encounter.take() {
        Some(current) if current.enemy_id == template.id => current,
        _ => {
            out.combat(format!("You encounter a {}!", template.name));
            Encounter::from_template(template)
        }
    };

    resolve_exchange(out, world, player, encounter, enemy, rng)
}

/// Player attacks, then the enemy retaliates unless it went down.
pub fn resolve_exchange<R: Rng + ?Sized>(
    out: &mut Output,
    world: &World,
    player: &mut Player,
    encounter: &mut Option<Encounter>,
    mut enemy: Encounter,
    rng: &mut R,
) -> ExchangeOutcome {
    let weapon = &player.equipment.weapon;
    let strike = player_strike(weapon.damage, rng);

    if strike.critical {
        out.combat(format!(
            "CRITICAL HIT! You strike with {} for {} damage!",
            weapon.name, strike.damage
        ));
    } else {
        out.combat(format!(
            "You attack with {} for {} damage",
            weapon.name, strike.damage
        ));
    }

    enemy.health -= i64::from(strike.damage);
    player.stats.total_damage += u64::from(strike.damage);

    if enemy.is_defeated() {
        debug!(enemy = %enemy.enemy_id, damage = strike.damage, critical = strike.critical, "enemy defeated");
        *encounter = None;
        let report = defeat_enemy(out, world, player, &enemy, rng);
        return ExchangeOutcome::EnemyDefeated { strike, report };
    }

    let roll = roll_damage(enemy.damage, rng);
    let defense = player.equipment.armor.defense;
    let taken = mitigate(roll, defense);

    player.health.drain(taken);
    player.armor.drain(ARMOR_WEAR_PER_HIT);

    debug!(
        enemy = %enemy.enemy_id,
        dealt = strike.damage,
        critical = strike.critical,
        roll,
        taken,
        "exchange resolved"
    );

    out.combat(format!("{} attacks! You take {} damage", enemy.name, taken));
    if !player.armor.is_empty() {
        out.say(format!("Armor absorbed {} damage", defense / ARMOR_DIVISOR));
    }

    if player.health.is_empty() {
        *encounter = None;
        let report = player_defeated(out, world, player);
        return ExchangeOutcome::PlayerDefeated {
            strike,
            taken,
            report,
        };
    }

    out.combat(format!(
        "Your Health: {}/{}",
        player.health.current(),
        player.health.max()
    ));
    out.combat(format!(
        "{} Health: {}/{}",
        enemy.name, enemy.health, enemy.max_health
    ));

    *encounter = Some(enemy);
    ExchangeOutcome::Traded { strike, taken }
}
