use serde::{Deserialize, Serialize};

use crate::world::{QuestKind, QuestTarget};

/// Rewards shared by quest completion and enemy defeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardBundle {
    pub experience: u32,
    pub gold: u32,
    #[serde(default)]
    pub item: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: QuestKind,
    pub target: QuestTarget,
    pub required: u32,
    pub progress: u32,
    pub completed: bool,
    pub reward: RewardBundle,
}

/// Gameplay events that can move a quest forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    EnemyDefeated,
    SoulShards(u32),
    Gold(u32),
    AreaVisited,
}

impl Quest {
    /// The quest every new character starts with.
    pub fn initiate_trial() -> Self {
        Quest {
            id: "initiate_trial".into(),
            name: "Initiate's Trial".into(),
            description: "Defeat 3 enemies to prove your worth".into(),
            kind: QuestKind::Combat,
            target: QuestTarget::Enemy,
            required: 3,
            progress: 0,
            completed: false,
            reward: RewardBundle {
                experience: 100,
                gold: 50,
                item: Some("Iron Sword".into()),
            },
        }
    }

    /// How much `event` advances this quest, if it counts at all.
    pub fn progress_for(&self, event: ProgressEvent) -> Option<u32> {
        if self.completed {
            return None;
        }
        match (self.kind, self.target, event) {
            (QuestKind::Combat, _, ProgressEvent::EnemyDefeated) => Some(1),
            (QuestKind::Collection, QuestTarget::SoulShard, ProgressEvent::SoulShards(n)) => Some(n),
            (QuestKind::Collection, QuestTarget::Gold, ProgressEvent::Gold(n)) => Some(n),
            (QuestKind::Exploration, _, ProgressEvent::AreaVisited) => Some(1),
            _ => None,
        }
    }

    /// Adds progress, never past `required`. Returns true once the target is reached.
    pub fn advance(&mut self, amount: u32) -> bool {
        self.progress = self.progress.saturating_add(amount).min(self.required);
        self.progress >= self.required
    }
}
