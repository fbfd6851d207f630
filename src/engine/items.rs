use std::mem;

use tracing::debug;

use crate::engine::output::Output;
use crate::player::{ArmorPiece, Player, Trinket, Weapon};
use crate::world::{DamageRange, ItemKind, World};

pub const HEALTH_POTION_HEAL: u32 = 30;
pub const MANA_POTION_RESTORE: u32 = 20;
/// Damage of a weapon the shop doesn't list.
pub const DEFAULT_WEAPON_DAMAGE: DamageRange = DamageRange { min: 20, max: 30 };

pub fn handle_inventory(out: &mut Output, player: &Player) {
    out.title("Inventory");
    if player.inventory.is_empty() {
        out.say("Your inventory is empty.");
    } else {
        for item in player.inventory.items() {
            out.say(format!("{} {} x{}", item.kind.icon(), item.name, item.count));
        }
    }

    out.title("Equipped");
    for (slot, icon, name) in player.equipment.slots() {
        out.say(format!("{} {}: {}", icon, slot, name));
    }
    out.loot(format!(
        "Gold: {}  Soul Shards: {}",
        player.gold, player.soul_shards
    ));
}

/// `use <item>` and `equip <item>`. Consumables are consumed, gear goes into its slot.
pub fn handle_use(out: &mut Output, world: &World, player: &mut Player, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        out.warn("Usage: use [item name]");
        return false;
    }

    let Some(item) = player.inventory.find(query) else {
        out.warn(format!("You don't have '{}'", query));
        return false;
    };
    let (name, kind) = (item.name.clone(), item.kind);
    debug!(item = %name, ?kind, "use item");

    match kind {
        ItemKind::Consumable => consume(out, player, &name),
        ItemKind::Weapon => equip_weapon(out, world, player, &name),
        ItemKind::Armor => equip_armor(out, world, player, &name),
        ItemKind::Accessory => equip_accessory(out, world, player, &name),
        ItemKind::Special => {
            player.inventory.remove_one(&name);
            out.say(format!("Used {}", name));
        }
    }
    true
}

fn consume(out: &mut Output, player: &mut Player, name: &str) {
    let lower = name.to_lowercase();
    if lower.contains("health") && lower.contains("potion") {
        let healed = player.health.restore(HEALTH_POTION_HEAL);
        player.stats.total_healed += u64::from(healed);
        out.heal(format!("Used {}! +{} Health", name, healed));
    } else if lower.contains("mana") && lower.contains("potion") {
        let restored = player.mana.restore(MANA_POTION_RESTORE);
        out.heal(format!("Used {}! +{} Command Power", name, restored));
    } else {
        out.say(format!("Used {}", name));
    }
    player.inventory.remove_one(name);
}

fn equip_weapon(out: &mut Output, world: &World, player: &mut Player, name: &str) {
    let damage = world
        .shop_listing(name)
        .and_then(|l| l.damage)
        .unwrap_or(DEFAULT_WEAPON_DAMAGE);
    let old = mem::replace(
        &mut player.equipment.weapon,
        Weapon {
            name: name.to_string(),
            icon: ItemKind::Weapon.icon().into(),
            damage,
        },
    );
    player.inventory.add(&old.name, ItemKind::Weapon, 1);
    player.inventory.remove_one(name);
    out.loot(format!("Equipped {} ({} damage)", name, damage));
}

fn equip_armor(out: &mut Output, world: &World, player: &mut Player, name: &str) {
    let defense = world
        .shop_listing(name)
        .and_then(|l| l.defense)
        .unwrap_or(player.equipment.armor.defense);
    let old = mem::replace(
        &mut player.equipment.armor,
        ArmorPiece {
            name: name.to_string(),
            icon: ItemKind::Armor.icon().into(),
            defense,
        },
    );
    player.inventory.add(&old.name, ItemKind::Armor, 1);
    player.inventory.remove_one(name);
    out.loot(format!("Equipped {} ({} defense)", name, defense));
}

fn equip_accessory(out: &mut Output, world: &World, player: &mut Player, name: &str) {
    let effect = world
        .shop_listing(name)
        .and_then(|l| l.effect.clone())
        .unwrap_or_else(|| player.equipment.accessory.effect.clone());
    let old = mem::replace(
        &mut player.equipment.accessory,
        Trinket {
            name: name.to_string(),
            icon: ItemKind::Accessory.icon().into(),
            effect,
        },
    );
    player.inventory.add(&old.name, ItemKind::Accessory, 1);
    player.inventory.remove_one(name);
    out.loot(format!("Equipped {}", name));
}
