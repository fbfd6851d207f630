use serde::{Deserialize, Serialize};

use crate::world::DamageRange;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub name: String,
    pub icon: String,
    pub damage: DamageRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    pub icon: String,
    pub damage: DamageRange,
    pub mana_cost: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmorPiece {
    pub name: String,
    pub icon: String,
    pub defense: u32,
}

/// Accessory and companion slots only carry flavor text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trinket {
    pub name: String,
    pub icon: String,
    pub effect: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Elixir {
    pub name: String,
    pub icon: String,
    pub heal: u32,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub weapon: Weapon,
    pub skill: Skill,
    pub armor: ArmorPiece,
    pub accessory: Trinket,
    pub potion: Elixir,
    pub special: Trinket,
}

impl Default for Equipment {
    fn default() -> Self {
        Equipment {
            weapon: Weapon {
                name: "Iron Sword".into(),
                icon: "⚔️".into(),
                damage: DamageRange { min: 15, max: 25 },
            },
            skill: Skill {
                name: "Soul Slam".into(),
                icon: "💥".into(),
                damage: DamageRange { min: 20, max: 35 },
                mana_cost: 15,
            },
            armor: ArmorPiece {
                name: "Leather Armor".into(),
                icon: "🛡️".into(),
                defense: 12,
            },
            accessory: Trinket {
                name: "Crystal Shard".into(),
                icon: "💎".into(),
                effect: "+5% Critical Chance".into(),
            },
            potion: Elixir {
                name: "Health Elixir".into(),
                icon: "🧪".into(),
                heal: 30,
                count: 3,
            },
            special: Trinket {
                name: "Dragon Companion".into(),
                icon: "🐉".into(),
                effect: "+10% XP Gain".into(),
            },
        }
    }
}

impl Equipment {
    /// Slot label, icon and item name, in display order.
    pub fn slots(&self) -> [(&'static str, &str, &str); 6] {
        [
            ("weapon", self.weapon.icon.as_str(), self.weapon.name.as_str()),
            ("skill", self.skill.icon.as_str(), self.skill.name.as_str()),
            ("armor", self.armor.icon.as_str(), self.armor.name.as_str()),
            ("accessory", self.accessory.icon.as_str(), self.accessory.name.as_str()),
            ("potion", self.potion.icon.as_str(), self.potion.name.as_str()),
            ("special", self.special.icon.as_str(), self.special.name.as_str()),
        ]
    }
}
