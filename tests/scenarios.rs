use soul_commander::engine::OutputBlock;
use soul_commander::player::Player;
use soul_commander::save::{FileStore, SaveData, SaveStore};
use soul_commander::world::{DamageRange, QuestKind};
use soul_commander::{GameState, default_world};
use tempfile::tempdir;

fn game(seed: u64) -> GameState {
    GameState::new(default_world().unwrap()).with_seed(seed)
}

/// Fights `enemy` until one more kill is on the books.
fn fight_until_kill(g: &mut GameState, enemy: &str) {
    let kills = g.player.kills;
    for _ in 0..20 {
        g.step(&format!("fight {enemy}"));
        if g.player.kills > kills {
            return;
        }
    }
    panic!("{enemy} survived twenty exchanges");
}

#[test]
fn goblin_defeat_grants_fixed_rewards() {
    for seed in 0..20 {
        let mut g = game(seed);
        assert_eq!(g.player.equipment.weapon.damage, DamageRange { min: 15, max: 25 });
        assert_eq!(g.player.equipment.armor.defense, 12);

        fight_until_kill(&mut g, "goblin");

        assert_eq!(g.player.xp, 25, "seed {seed}");
        assert_eq!(g.player.gold, 1250 + 10, "seed {seed}");
        assert!((1..=3).contains(&g.player.soul_shards), "seed {seed}");
        assert!(g.player.health.current() > 0);
        assert!(g.encounter.is_none());
    }
}

#[test]
fn third_kill_completes_quest_and_assigns_a_new_one() {
    let mut g = game(7);
    assert_eq!(g.player.active_quest.as_ref().unwrap().kind, QuestKind::Combat);

    for kill in 1..=3 {
        g.player.health.refill();
        fight_until_kill(&mut g, "goblin");

        let quest = g.player.active_quest.as_ref().unwrap();
        if kill < 3 {
            assert_eq!(quest.id, "initiate_trial");
            assert_eq!(quest.progress, kill);
            assert!(!quest.completed);
        }
    }

    let next = g.player.active_quest.as_ref().unwrap();
    assert_ne!(next.id, "initiate_trial");
    assert_eq!(next.progress, 0);
    assert!(!next.completed);
    assert_eq!(g.player.stats.quests_completed, 1);
    assert!(g.player.inventory.count_of("Iron Sword") >= 1);
}

#[test]
fn old_version_save_loads_with_a_warning() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("save.json");

    let mut player = Player::new("Dark Forest", "Shadow Grove");
    player.level = 7;
    player.gold = 4242;
    let data = SaveData {
        player,
        game_day: 12,
        streak: 3,
        play_time: 5000,
        last_play_date: Some("2024-01-01".into()),
        timestamp: 0,
        version: "1.0.0".into(),
    };
    FileStore::new(&path).write(&data.encode().unwrap()).unwrap();

    let mut g = game(1).with_store(FileStore::new(&path));
    let (out, quit) = g.step("load");

    assert!(!quit);
    assert!(
        out.blocks
            .iter()
            .any(|b| matches!(b, OutputBlock::Warning(s) if s.contains("different version")))
    );
    assert_eq!(g.player.level, 7);
    assert_eq!(g.player.gold, 4242);
    assert_eq!(g.player.location, "Dark Forest");
    assert_eq!(g.game_day, 12);
    assert_eq!(g.streak, 3);
}
