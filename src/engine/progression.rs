use rand::Rng;
use tracing::info;

use crate::engine::combat::Encounter;
use crate::engine::output::Output;
use crate::engine::quests::generate_quest;
use crate::engine::weighted::weighted_pick;
use crate::player::{Player, ProgressEvent, Quest};
use crate::world::{ItemKind, World};

pub const LEVEL_HEALTH_GAIN: u32 = 20;
pub const LEVEL_MANA_GAIN: u32 = 10;
pub const LEVEL_ARMOR_GAIN: u32 = 15;

/// Percent of carried gold lost on defeat.
pub const DEFEAT_GOLD_PENALTY: u32 = 10;
/// Percent of each maximum restored on respawn.
pub const RESPAWN_RESTORE: u32 = 25;

pub const SOUL_SHARD_DROP_MIN: u32 = 1;
pub const SOUL_SHARD_DROP_MAX: u32 = 3;

/// Everything an enemy defeat granted.
#[derive(Debug, Clone, PartialEq)]
pub struct DefeatReport {
    pub enemy: String,
    pub experience: u32,
    pub gold: u32,
    pub soul_shards: u32,
    pub loot: Option<String>,
    pub levels_gained: u32,
    pub completed_quest: Option<Quest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RespawnReport {
    pub gold_lost: u32,
}

/// Grants the spoils of a defeated enemy, advances the active quest, and
/// processes any level-ups that follow.
pub fn defeat_enemy<R: Rng + ?Sized>(
    out: &mut Output,
    world: &World,
    player: &mut Player,
    enemy: &Encounter,
    rng: &mut R,
) -> DefeatReport {
    let shards = rng.gen_range(SOUL_SHARD_DROP_MIN..=SOUL_SHARD_DROP_MAX);

    player.xp = player.xp.saturating_add(enemy.xp);
    player.earn_gold(enemy.gold);
    player.soul_shards = player.soul_shards.saturating_add(shards);
    player.kills += 1;
    player.stats.enemies_defeated += 1;

    out.combat(format!("{} defeated!", enemy.name));
    out.xp(format!("+{} XP", enemy.xp));
    out.loot(format!("+{} Gold", enemy.gold));
    out.loot(format!("+{} Soul Shards", shards));

    let mut completed_quest = None;
    for event in [
        ProgressEvent::SoulShards(shards),
        ProgressEvent::Gold(enemy.gold),
        ProgressEvent::EnemyDefeated,
    ] {
        // One completion per defeat; the replacement starts from zero.
        if let Some(quest) = advance_quest(out, world, player, event, rng) {
            completed_quest = Some(quest);
            break;
        }
    }

    let levels_gained = apply_level_ups(out, player);
    let loot = roll_loot(out, world, player, enemy.loot_chance, rng);

    info!(
        enemy = %enemy.enemy_id,
        xp = enemy.xp,
        gold = enemy.gold,
        shards,
        levels_gained,
        "enemy defeated"
    );

    DefeatReport {
        enemy: enemy.name.clone(),
        experience: enemy.xp,
        gold: enemy.gold,
        soul_shards: shards,
        loot,
        levels_gained,
        completed_quest,
    }
}

fn roll_loot<R: Rng + ?Sized>(
    out: &mut Output,
    world: &World,
    player: &mut Player,
    chance: f64,
    rng: &mut R,
) -> Option<String> {
    if !rng.gen_bool(chance.clamp(0.0, 1.0)) {
        return None;
    }
    let entry = weighted_pick(&world.loot_table, rng)?;
    player.inventory.add(&entry.name, entry.kind, 1);
    out.loot(format!("Found {}!", entry.name));
    Some(entry.name.clone())
}

/// Levels up while experience covers the threshold. Returns the number of levels gained.
pub fn apply_level_ups(out: &mut Output, player: &mut Player) -> u32 {
    let mut gained = 0;
    while player.xp >= player.xp_to_next {
        player.xp -= player.xp_to_next;
        player.level += 1;
        let grown = (f64::from(player.xp_to_next) * 1.5).floor() as u32;
        player.xp_to_next = grown.max(player.xp_to_next.saturating_add(1));

        player.health.grow(LEVEL_HEALTH_GAIN);
        player.mana.grow(LEVEL_MANA_GAIN);
        player.armor.grow(LEVEL_ARMOR_GAIN);
        player.health.refill();
        player.mana.refill();
        player.armor.refill();

        out.xp(format!("LEVEL UP! You are now level {}!", player.level));
        out.heal(format!(
            "Health +{}, Command Power +{}, Armor +{}",
            LEVEL_HEALTH_GAIN, LEVEL_MANA_GAIN, LEVEL_ARMOR_GAIN
        ));
        info!(level = player.level, next = player.xp_to_next, "level up");
        gained += 1;
    }
    gained
}

/// Defeat penalty: lose a tenth of the gold, restore a quarter of each pool,
/// and wake up at the starting area.
pub fn player_defeated(out: &mut Output, world: &World, player: &mut Player) -> RespawnReport {
    let gold_lost = (u64::from(player.gold) * u64::from(DEFEAT_GOLD_PENALTY) / 100) as u32;
    player.gold -= gold_lost;

    player.health.set_percent(RESPAWN_RESTORE);
    player.mana.set_percent(RESPAWN_RESTORE);
    player.armor.set_percent(RESPAWN_RESTORE);

    player.location = world
        .start_location()
        .map(|l| l.name.clone())
        .unwrap_or_else(|| world.start_location.clone());
    player.area = world.start_area.clone();

    out.warn("You have been defeated!");
    out.warn(format!("Lost {} gold", gold_lost));
    out.say(format!("You awaken in the {}...", player.location));
    info!(gold_lost, "player defeated");

    RespawnReport { gold_lost }
}

/// Feeds `event` to the active quest. Returns the quest if this completed it.
pub fn advance_quest<R: Rng + ?Sized>(
    out: &mut Output,
    world: &World,
    player: &mut Player,
    event: ProgressEvent,
    rng: &mut R,
) -> Option<Quest> {
    let quest = player.active_quest.as_mut()?;
    let amount = quest.progress_for(event)?;
    if !quest.advance(amount) {
        return None;
    }
    complete_quest(out, world, player, rng)
}

/// Marks the active quest complete, pays out its reward and assigns a new quest.
///
/// Returns the completed quest. Does nothing for a quest that was already completed.
pub fn complete_quest<R: Rng + ?Sized>(
    out: &mut Output,
    world: &World,
    player: &mut Player,
    rng: &mut R,
) -> Option<Quest> {
    if player.active_quest.as_ref()?.completed {
        return None;
    }
    let mut quest = player.active_quest.take()?;
    quest.completed = true;
    quest.progress = quest.required;

    player.stats.quests_completed += 1;
    player.xp = player.xp.saturating_add(quest.reward.experience);
    player.earn_gold(quest.reward.gold);

    out.xp(format!("Quest Complete: {}!", quest.name));
    out.xp(format!("+{} XP", quest.reward.experience));
    out.loot(format!("+{} Gold", quest.reward.gold));

    if let Some(item) = &quest.reward.item {
        let kind = world
            .shop_listing(item)
            .map(|l| l.kind)
            .unwrap_or(ItemKind::Special);
        player.inventory.add(item, kind, 1);
        out.loot(format!("Received: {}", item));
    }

    player.active_quest = generate_quest(world, player.level, rng);
    if let Some(next) = &player.active_quest {
        out.title(format!("New Quest: {}", next.name));
        out.say(next.description.clone());
    }
    info!(quest = %quest.id, "quest completed");

    apply_level_ups(out, player);
    Some(quest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{QuestKind, QuestTarget, default_world};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::rstest;

    fn setup() -> (World, Player) {
        let world = default_world().unwrap();
        let player = Player::new("Sanctuary", "Town Square");
        (world, player)
    }

    fn goblin(world: &World) -> Encounter {
        Encounter::from_template(&world.enemies[0])
    }

    #[test]
    fn defeat_grants_rewards() {
        let (world, mut player) = setup();
        let mut rng = StdRng::seed_from_u64(21);
        let mut out = Output::new();

        let report = defeat_enemy(&mut out, &world, &mut player, &goblin(&world), &mut rng);

        assert_eq!(player.xp, 25);
        assert_eq!(player.gold, 1260);
        assert_eq!(player.kills, 1);
        assert!((1..=3).contains(&report.soul_shards));
        assert_eq!(player.soul_shards, report.soul_shards);
        assert_eq!(player.active_quest.as_ref().unwrap().progress, 1);
        assert_eq!(player.stats.gold_earned, 10);
    }

    #[test]
    fn third_kill_completes_initiate_trial() {
        let (world, mut player) = setup();
        let mut rng = StdRng::seed_from_u64(22);
        let mut out = Output::new();

        for _ in 0..2 {
            defeat_enemy(&mut out, &world, &mut player, &goblin(&world), &mut rng);
        }
        let report = defeat_enemy(&mut out, &world, &mut player, &goblin(&world), &mut rng);

        let done = report.completed_quest.unwrap();
        assert!(done.completed);
        assert_eq!(done.progress, 3);
        // 3 * 25 from goblins plus 100 from the quest
        assert_eq!(player.level, 2);
        assert_eq!(player.xp, 75);
        assert_eq!(player.xp_to_next, 150);
        assert!(player.inventory.count_of("Iron Sword") >= 1);
        assert_eq!(player.stats.quests_completed, 1);

        let next = player.active_quest.as_ref().unwrap();
        assert_eq!(next.progress, 0);
        assert!(!next.completed);
        assert_ne!(next.id, "initiate_trial");
        // generated before the level-up was applied
        assert_eq!(next.reward.experience, 50);
    }

    #[rstest]
    #[case(99, 1, 99, 100)]
    #[case(100, 2, 0, 150)]
    #[case(250, 3, 0, 225)]
    #[case(600, 4, 125, 337)]
    fn level_up_loop(
        #[case] xp: u32,
        #[case] level: u32,
        #[case] remaining: u32,
        #[case] next: u32,
    ) {
        let (_, mut player) = setup();
        player.xp = xp;
        let mut out = Output::new();
        apply_level_ups(&mut out, &mut player);
        assert_eq!(player.level, level);
        assert_eq!(player.xp, remaining);
        assert_eq!(player.xp_to_next, next);
        assert!(player.xp < player.xp_to_next);
    }

    #[test]
    fn tiny_threshold_still_grows() {
        let (_, mut player) = setup();
        player.xp_to_next = 1;
        player.xp = u32::MAX;
        let mut out = Output::new();

        let gained = apply_level_ups(&mut out, &mut player);

        assert!(gained < 100, "gained {gained}");
        assert!(player.xp < player.xp_to_next);
    }

    #[test]
    fn level_up_grows_and_refills_pools() {
        let (_, mut player) = setup();
        player.health.set(10);
        player.mana.set(0);
        player.xp = 100;
        let mut out = Output::new();

        assert_eq!(apply_level_ups(&mut out, &mut player), 1);

        assert_eq!((player.health.current(), player.health.max()), (120, 120));
        assert_eq!((player.mana.current(), player.mana.max()), (60, 60));
        assert_eq!((player.armor.current(), player.armor.max()), (115, 115));
        assert!(out.contains("LEVEL UP"));
    }

    #[test]
    fn respawn_penalty() {
        let (world, mut player) = setup();
        player.gold = 999;
        player.health.set(0);
        player.location = "Ancient Ruins".into();
        player.area = "Throne Room".into();
        let mut out = Output::new();

        let report = player_defeated(&mut out, &world, &mut player);

        assert_eq!(report.gold_lost, 99);
        assert_eq!(player.gold, 900);
        assert_eq!(player.health.current(), 25);
        assert_eq!(player.mana.current(), 12);
        assert_eq!(player.armor.current(), 25);
        assert_eq!(player.location, "Sanctuary");
        assert_eq!(player.area, "Town Square");
    }

    #[test]
    fn gold_collection_quest_completes_on_income() {
        let (world, mut player) = setup();
        let mut rng = StdRng::seed_from_u64(23);
        let mut out = Output::new();
        player.active_quest = Some(Quest {
            kind: QuestKind::Collection,
            target: QuestTarget::Gold,
            required: 30,
            ..Quest::initiate_trial()
        });

        assert!(advance_quest(&mut out, &world, &mut player, ProgressEvent::Gold(20), &mut rng).is_none());
        let done = advance_quest(&mut out, &world, &mut player, ProgressEvent::Gold(20), &mut rng);

        assert_eq!(done.unwrap().progress, 30);
        assert_eq!(player.stats.quests_completed, 1);
    }

    #[test]
    fn completing_twice_is_a_no_op() {
        let (world, mut player) = setup();
        let mut rng = StdRng::seed_from_u64(24);
        let mut out = Output::new();
        let mut quest = Quest::initiate_trial();
        quest.completed = true;
        player.active_quest = Some(quest);

        assert!(complete_quest(&mut out, &world, &mut player, &mut rng).is_none());
        assert_eq!(player.stats.quests_completed, 0);
        assert_eq!(player.gold, 1250);
    }

    #[test]
    fn guaranteed_loot_lands_in_inventory() {
        let (world, mut player) = setup();
        let mut rng = StdRng::seed_from_u64(25);
        let mut out = Output::new();
        let mut enemy = goblin(&world);
        enemy.loot_chance = 1.0;
        let before: u32 = player.inventory.items().iter().map(|i| i.count).sum();

        let report = defeat_enemy(&mut out, &world, &mut player, &enemy, &mut rng);

        let name = report.loot.unwrap();
        assert!(world.loot_table.iter().any(|l| l.name == name));
        let after: u32 = player.inventory.items().iter().map(|i| i.count).sum();
        assert_eq!(after, before + 1);
    }
}
