use tracing::debug;

use crate::engine::output::Output;
use crate::player::Player;

pub const REST_HEALTH: u32 = 20;
pub const REST_MANA: u32 = 30;
/// Resting that restores more health than this takes the rest of the day.
pub const FULL_NIGHT_THRESHOLD: u32 = 10;

/// `heal [potion]`: drink the equipped elixir, or rest.
pub fn handle_heal(out: &mut Output, player: &mut Player, arg: &str, game_day: &mut u32) -> bool {
    if arg.trim().eq_ignore_ascii_case("potion") {
        drink_elixir(out, player)
    } else {
        rest(out, player, game_day)
    }
}

pub fn drink_elixir(out: &mut Output, player: &mut Player) -> bool {
    let elixir = &player.equipment.potion;
    if elixir.count == 0 {
        out.warn(format!("No {} left!", elixir.name));
        return false;
    }
    if player.health.is_full() {
        out.warn("You are already at full health!");
        return false;
    }

    let healed = player.health.restore(elixir.heal);
    player.equipment.potion.count -= 1;
    player.stats.total_healed += u64::from(healed);

    out.heal(format!(
        "You drink a {} and restore {} health!",
        player.equipment.potion.name, healed
    ));
    out.say(format!(
        "{} remaining: {}",
        player.equipment.potion.name, player.equipment.potion.count
    ));
    true
}

/// Restores health and mana. Returns false if there was nothing to restore.
pub fn rest(out: &mut Output, player: &mut Player, game_day: &mut u32) -> bool {
    if player.health.is_full() && player.mana.is_full() {
        out.warn("You are already at full health and Command Power!");
        return false;
    }

    let healed = player.health.restore(REST_HEALTH);
    let recovered = player.mana.restore(REST_MANA);
    player.stats.total_healed += u64::from(healed);

    out.heal(format!(
        "You rest and recover {} health and {} Command Power",
        healed, recovered
    ));

    if healed > FULL_NIGHT_THRESHOLD {
        *game_day += 1;
        out.say(format!("A day passes... It is now day {}", game_day));
    }
    debug!(healed, recovered, day = *game_day, "rest");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn player() -> Player {
        Player::new("Sanctuary", "Town Square")
    }

    #[test]
    fn rest_is_rejected_when_full() {
        let mut p = player();
        let mut day = 1;
        let mut out = Output::new();
        assert!(!rest(&mut out, &mut p, &mut day));
        assert_eq!(day, 1);
        assert!(out.contains("already at full"));
    }

    #[rstest]
    #[case(50, 10, 70, 40, 2)]
    #[case(95, 10, 100, 40, 1)]
    #[case(100, 40, 100, 50, 1)]
    #[case(85, 0, 100, 30, 2)]
    fn rest_clamps_and_maybe_advances_day(
        #[case] health: u32,
        #[case] mana: u32,
        #[case] health_after: u32,
        #[case] mana_after: u32,
        #[case] day_after: u32,
    ) {
        let mut p = player();
        p.health.set(health);
        p.mana.set(mana);
        let mut day = 1;
        let mut out = Output::new();

        assert!(rest(&mut out, &mut p, &mut day));

        assert_eq!(p.health.current(), health_after);
        assert_eq!(p.mana.current(), mana_after);
        assert_eq!(day, day_after);
    }

    #[test]
    fn elixir_heals_and_counts_down() {
        let mut p = player();
        p.health.set(50);
        let mut day = 1;
        let mut out = Output::new();

        assert!(handle_heal(&mut out, &mut p, "potion", &mut day));

        assert_eq!(p.health.current(), 80);
        assert_eq!(p.equipment.potion.count, 2);
        assert_eq!(p.stats.total_healed, 30);
        assert_eq!(day, 1);
    }

    #[test]
    fn empty_elixir_is_rejected() {
        let mut p = player();
        p.health.set(50);
        p.equipment.potion.count = 0;
        let mut out = Output::new();

        assert!(!drink_elixir(&mut out, &mut p));
        assert_eq!(p.health.current(), 50);
    }
}
