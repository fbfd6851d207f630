mod loader;
mod model;
mod validator;

pub use loader::{WorldError, default_world, load_world_from_file, load_world_from_str};

pub use model::{
    DamageRange, EnemyTemplate, ExploreEvent, ExploreEventKind, ItemKind, Location, LootEntry,
    QuestGroup, QuestKind, QuestTarget, QuestTemplate, ShopListing, World,
};
pub use validator::{ValidationError, validate_world};
