use tracing::info;

use crate::engine::output::Output;
use crate::player::Player;
use crate::world::World;

pub fn open_shop(out: &mut Output, world: &World, player: &Player) {
    out.title("Soul Commander Shop");
    for listing in &world.shop {
        let mut line = format!(
            "{}. {} {} - {} Gold",
            listing.id,
            listing.kind.icon(),
            listing.name,
            listing.price
        );
        if let Some(damage) = listing.damage {
            line.push_str(&format!(" ({} damage)", damage));
        } else if let Some(defense) = listing.defense {
            line.push_str(&format!(" ({} defense)", defense));
        } else if let Some(effect) = &listing.effect {
            line.push_str(&format!(" ({})", effect));
        }
        out.say(line);
    }
    out.loot(format!("Your Gold: {}", player.gold));
    out.say("Type 'buy [number]' to purchase an item");
}

/// `buy <n>`, 1-based into the shop listing.
pub fn buy(out: &mut Output, world: &World, player: &mut Player, arg: &str) -> bool {
    let Ok(index) = arg.trim().parse::<usize>() else {
        out.warn("Usage: buy [item number]");
        return false;
    };
    let Some(listing) = index.checked_sub(1).and_then(|i| world.shop.get(i)) else {
        out.warn("Invalid item number!");
        return false;
    };

    if player.gold < listing.price {
        out.warn(format!(
            "Not enough gold! You need {} more.",
            listing.price - player.gold
        ));
        return false;
    }

    player.gold -= listing.price;
    player.inventory.add(&listing.name, listing.kind, 1);
    out.loot(format!("Purchased {} for {} Gold!", listing.name, listing.price));
    info!(item = %listing.name, price = listing.price, "purchase");
    true
}
