mod combat;
mod commands;
mod explore;
mod items;
mod output;
mod progression;
mod quests;
mod recovery;
mod render;
mod shop;
mod weighted;

pub use combat::{
    ARMOR_DIVISOR, ARMOR_WEAR_PER_HIT, CRIT_CHANCE, CRIT_MULTIPLIER, Encounter, ExchangeOutcome,
    Strike, critical_damage, find_enemy, handle_fight, mitigate, player_strike, resolve_exchange,
    roll_damage,
};
pub use commands::{Command, parse_command};
pub use explore::{
    EXPLORE_COST, ExploreOutcome, TRAVEL_COST, handle_explore, random_exploration, travel,
};
pub use items::{DEFAULT_WEAPON_DAMAGE, handle_inventory, handle_use};
pub use output::{Output, OutputBlock};
pub use progression::{
    DefeatReport, RespawnReport, advance_quest, apply_level_ups, complete_quest, defeat_enemy,
    player_defeated,
};
pub use quests::generate_quest;
pub use recovery::{drink_elixir, handle_heal, rest};
pub use render::{format_duration, render_help, render_quest, render_stats};
pub use shop::{buy, open_shop};
pub use weighted::{Weighted, weighted_pick};
