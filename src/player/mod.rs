mod equipment;
mod inventory;
mod pool;
mod quest;

use serde::{Deserialize, Serialize};

use crate::world::ItemKind;

pub use equipment::{ArmorPiece, Elixir, Equipment, Skill, Trinket, Weapon};
pub use inventory::{Inventory, InventoryItem};
pub use pool::Pool;
pub use quest::{ProgressEvent, Quest, RewardBundle};

pub const STARTING_HEALTH: u32 = 100;
pub const STARTING_MANA: u32 = 50;
pub const STARTING_ARMOR: u32 = 100;
pub const STARTING_GOLD: u32 = 1250;
pub const STARTING_XP_TO_NEXT: u32 = 100;
/// Smallest threshold that still grows under the 1.5x rule.
pub const MIN_XP_TO_NEXT: u32 = 2;

/// Cumulative counters shown by `stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    pub total_damage: u64,
    pub total_healed: u64,
    pub enemies_defeated: u32,
    pub quests_completed: u32,
    pub gold_earned: u64,
    pub play_time: u64, // seconds
    pub commands_issued: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,

    pub health: Pool,
    pub mana: Pool,
    pub armor: Pool,

    pub gold: u32,
    pub soul_shards: u32,
    pub kills: u32,

    /// Display name of an entry in the location catalog.
    pub location: String,
    pub area: String,

    pub equipment: Equipment,
    pub inventory: Inventory,
    pub active_quest: Option<Quest>,

    #[serde(default)]
    pub stats: Statistics,
}

impl Player {
    pub fn new(location: &str, area: &str) -> Self {
        let mut inventory = Inventory::new();
        inventory.add("Health Potion", ItemKind::Consumable, 3);
        inventory.add("Mana Potion", ItemKind::Consumable, 2);
        inventory.add("Bronze Dagger", ItemKind::Weapon, 1);

        Player {
            name: "Knight".into(),
            class_name: "Warrior".into(),
            level: 1,
            xp: 0,
            xp_to_next: STARTING_XP_TO_NEXT,
            health: Pool::full(STARTING_HEALTH),
            mana: Pool::full(STARTING_MANA),
            armor: Pool::full(STARTING_ARMOR),
            gold: STARTING_GOLD,
            soul_shards: 0,
            kills: 0,
            location: location.to_string(),
            area: area.to_string(),
            equipment: Equipment::default(),
            inventory,
            active_quest: Some(Quest::initiate_trial()),
            stats: Statistics::default(),
        }
    }

    /// Gold income; counted in the statistics.
    pub fn earn_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
        self.stats.gold_earned += u64::from(amount);
    }

    /// Restores invariants that a hand-edited or stale save may violate.
    pub(crate) fn normalize(&mut self) {
        self.health.clamp();
        self.mana.clamp();
        self.armor.clamp();
        self.inventory.normalize();
        self.xp_to_next = self.xp_to_next.max(MIN_XP_TO_NEXT);
        if let Some(quest) = self.active_quest.as_mut() {
            quest.progress = quest.progress.min(quest.required);
        }
    }
}
