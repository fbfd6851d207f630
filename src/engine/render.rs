use crate::engine::output::Output;
use crate::player::Player;

/// Seconds as `1h 02m 03s`, dropping the hours when there are none.
pub fn format_duration(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs / 60) % 60, secs % 60);
    if h > 0 {
        format!("{}h {:02}m {:02}s", h, m, s)
    } else {
        format!("{}m {:02}s", m, s)
    }
}

pub fn render_stats(out: &mut Output, player: &Player, game_day: u32, streak: u32, play_time: u64) {
    out.title(format!("{} the {}", player.name, player.class_name));
    out.say(format!("Level {}  XP {}/{}", player.level, player.xp, player.xp_to_next));
    out.say(format!(
        "Health {}/{}  Command Power {}/{}  Armor {}/{}",
        player.health.current(),
        player.health.max(),
        player.mana.current(),
        player.mana.max(),
        player.armor.current(),
        player.armor.max()
    ));
    out.say(format!("Location: {} - {}", player.location, player.area));
    out.loot(format!(
        "Gold {}  Soul Shards {}  Kills {}",
        player.gold, player.soul_shards, player.kills
    ));

    let stats = &player.stats;
    out.title("Statistics");
    out.say(format!("Damage dealt: {}", stats.total_damage));
    out.say(format!("Health restored: {}", stats.total_healed));
    out.say(format!("Enemies defeated: {}", stats.enemies_defeated));
    out.say(format!("Quests completed: {}", stats.quests_completed));
    out.say(format!("Gold earned: {}", stats.gold_earned));
    out.say(format!("Commands issued: {}", stats.commands_issued));
    out.say(format!("Play time: {}", format_duration(play_time)));
    out.say(format!("Day {}  Streak {}", game_day, streak));
}

pub fn render_quest(out: &mut Output, player: &Player) {
    let Some(quest) = &player.active_quest else {
        out.say("You have no active quest.");
        return;
    };
    out.title(format!("Quest: {}", quest.name));
    out.say(quest.description.clone());
    out.say(format!("Progress: {}/{}", quest.progress, quest.required));

    let mut reward = format!(
        "Reward: {} XP, {} Gold",
        quest.reward.experience, quest.reward.gold
    );
    if let Some(item) = &quest.reward.item {
        reward.push_str(&format!(", {}", item));
    }
    out.loot(reward);
}

pub fn render_help(out: &mut Output) {
    out.title("Commands");
    for line in [
        "fight [enemy]    - Attack an enemy (goblin, skeleton, orc, dragon)",
        "explore [area]   - Travel to an area, or explore at random",
        "heal [potion]    - Rest, or drink your elixir",
        "rest / sleep     - Rest to recover health and Command Power",
        "use [item]       - Use or equip an inventory item",
        "equip [item]     - Equip a weapon, armor or accessory",
        "inventory        - Show items and equipment",
        "stats            - Show character statistics",
        "quest            - Show the active quest",
        "shop / buy [n]   - Browse the shop, buy item n",
        "save / load      - Save or load your progress",
        "reset            - Start over with a new character",
        "clear            - Clear the log",
        "quit             - Leave the game",
    ] {
        out.say(line);
    }
}
